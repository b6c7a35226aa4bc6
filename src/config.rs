//! Shell configuration
//!
//! An optional `specter.toml` next to the executable (or under the user
//! config directory) overrides window placement and styling. Anything missing
//! falls back to the built-in defaults, and a malformed file is logged and
//! ignored rather than aborting startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ShellError;
use crate::logging::exe_dir;

/// Window placement and styling knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Window title
    pub title: String,
    /// Initial window origin, logical pixels
    pub x: i32,
    pub y: i32,
    /// Initial window size, logical pixels
    pub width: i32,
    pub height: i32,
    /// Layered-window alpha (0 = invisible, 255 = opaque)
    pub opacity: u8,
    /// Apply the acrylic blur effect when the composition API is available
    pub blur: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "specter".to_string(),
            x: 10,
            y: 10,
            width: 1280,
            height: 720,
            opacity: 230,
            blur: true,
        }
    }
}

impl ShellConfig {
    /// Parse a config file.
    pub fn from_path(path: &Path) -> Result<Self, ShellError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Load the shell config from the usual locations, falling back to
    /// defaults when no file exists or the file does not parse.
    pub fn load() -> Self {
        for path in Self::search_paths() {
            if !path.is_file() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("ignoring config {}: {}", path.display(), e);
                }
            }
        }
        Self::default()
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![exe_dir().join("specter.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("specter").join("specter.toml"));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.title, "specter");
        assert_eq!((config.x, config.y), (10, 10));
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.opacity, 230);
        assert!(config.blur);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title = \"overlay\"\nopacity = 128").unwrap();

        let config = ShellConfig::from_path(file.path()).unwrap();
        assert_eq!(config.title, "overlay");
        assert_eq!(config.opacity, 128);
        // Unspecified fields come from Default
        assert_eq!(config.width, 1280);
        assert!(config.blur);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = \"wide\"").unwrap();

        assert!(ShellConfig::from_path(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ShellConfig::from_path(&dir.path().join("nope.toml")).is_err());
    }
}

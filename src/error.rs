//! Shell error types

use thiserror::Error;

/// Errors surfaced by the shell layer.
///
/// OS-level rejections of hotkey operations are *not* errors; they are
/// reported as boolean outcomes through the bridge. This type covers the
/// failures that abort or degrade startup.
#[derive(Error, Debug)]
pub enum ShellError {
    /// A required windowing call failed (class registration, window creation)
    #[error("window error: {0}")]
    Window(String),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

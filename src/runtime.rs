//! Embedded runtime seam
//!
//! The shell hosts a UI runtime's view but owns none of its rendering or
//! widget logic. Everything the shell needs from the runtime fits behind this
//! trait: first refusal on top-level window messages, and a font-reload hook
//! for `WM_FONTCHANGE`.

/// The embedded UI runtime hosted by the window.
///
/// Message parameters are passed as plain integers so the trait stays
/// platform-neutral; the Win32 host unpacks them from WPARAM/LPARAM.
pub trait ViewRuntime {
    /// Offer a top-level window message to the runtime.
    ///
    /// Returns `Some(result)` when the runtime consumed the message, `None`
    /// to let the shell apply its own residual handling and fall through to
    /// default processing.
    fn handle_top_level_message(&mut self, msg: u32, wparam: usize, lparam: isize)
        -> Option<isize>;

    /// The system font table changed; drop any cached font handles.
    fn reload_system_fonts(&mut self);
}

/// Placeholder runtime used when no embedded view is linked in.
///
/// Consumes nothing, so every message falls through to the shell's own
/// handling and then to default window processing.
pub struct DetachedRuntime {
    entrypoint_args: Vec<String>,
}

impl DetachedRuntime {
    /// Process command-line arguments are handed to the runtime entrypoint;
    /// the detached runtime just records how many it was given.
    pub fn new(entrypoint_args: Vec<String>) -> Self {
        log::debug!(
            "detached runtime created with {} entrypoint argument(s)",
            entrypoint_args.len()
        );
        Self { entrypoint_args }
    }

    pub fn entrypoint_args(&self) -> &[String] {
        &self.entrypoint_args
    }
}

impl ViewRuntime for DetachedRuntime {
    fn handle_top_level_message(
        &mut self,
        _msg: u32,
        _wparam: usize,
        _lparam: isize,
    ) -> Option<isize> {
        None
    }

    fn reload_system_fonts(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_runtime_handles_nothing() {
        let mut runtime = DetachedRuntime::new(vec!["--verbose".to_string()]);
        assert_eq!(runtime.handle_top_level_message(0x001D, 0, 0), None);
        assert_eq!(runtime.entrypoint_args(), ["--verbose"]);
    }
}

//! Win32 platform implementation

pub mod bootstrap;
pub mod hotkey;
pub mod host;
pub mod styling;
pub mod window;

pub use bootstrap::{attach_console, ComGuard};
pub use hotkey::{
    is_toggle_hotkey, register_toggle_hotkey, unregister_toggle_hotkey, Win32HotkeyBackend,
    TOGGLE_HOTKEY_ID,
};
pub use host::WindowHost;
pub use styling::apply_window_styling;
pub use window::{
    clear_window_callback, create_window, destroy_window, register_window_class,
    set_window_callback, unregister_window_class,
};

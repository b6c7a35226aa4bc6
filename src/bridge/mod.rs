//! Method-call bridge between the native shell and application logic

pub mod hotkey;
pub mod messenger;

pub use hotkey::{HotkeyBackend, HotkeyService, Registration, HOTKEY_CHANNEL};
pub use messenger::{MethodCall, MethodResult, Messenger};

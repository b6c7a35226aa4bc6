//! Global hotkey registration for Windows

use windows::core::Error;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_NOREPEAT, MOD_WIN, VK_OEM_2,
};
use windows::Win32::UI::WindowsAndMessaging::{MSG, WM_HOTKEY};

use crate::bridge::HotkeyBackend;

/// Id for the fixed show/hide toggle (Win + /).
///
/// Application hotkey ids top out at 0xBFFF; the toggle sits at the top of
/// that range so the bridge counter, which starts at 1, can never collide.
pub const TOGGLE_HOTKEY_ID: i32 = 0xBFFF;

/// Register the fixed visibility toggle (Win + /) against the window.
///
/// # Returns
/// * `Ok(())` if registration succeeds
/// * `Err` if registration fails (e.g., another app has the hotkey)
pub fn register_toggle_hotkey(hwnd: HWND) -> Result<(), Error> {
    unsafe {
        let modifiers = HOT_KEY_MODIFIERS(MOD_WIN.0 | MOD_NOREPEAT.0);
        RegisterHotKey(hwnd, TOGGLE_HOTKEY_ID, modifiers, VK_OEM_2.0 as u32)?;
        Ok(())
    }
}

/// Unregister the fixed visibility toggle
pub fn unregister_toggle_hotkey(hwnd: HWND) {
    unsafe {
        let _ = UnregisterHotKey(hwnd, TOGGLE_HOTKEY_ID);
    }
}

/// Check if a queued message is the fixed toggle hotkey
pub fn is_toggle_hotkey(msg: &MSG) -> bool {
    msg.message == WM_HOTKEY && msg.wParam.0 as i32 == TOGGLE_HOTKEY_ID
}

/// OS side of the bridge-managed hotkey, bound to the shell window.
pub struct Win32HotkeyBackend {
    hwnd: HWND,
}

impl Win32HotkeyBackend {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }
}

impl HotkeyBackend for Win32HotkeyBackend {
    fn register(&mut self, id: i32, modifiers: u32, key_code: u32) -> bool {
        unsafe { RegisterHotKey(self.hwnd, id, HOT_KEY_MODIFIERS(modifiers), key_code).is_ok() }
    }

    fn unregister(&mut self, id: i32) -> bool {
        unsafe { UnregisterHotKey(self.hwnd, id).is_ok() }
    }
}

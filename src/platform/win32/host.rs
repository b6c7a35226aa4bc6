//! Window host
//!
//! Owns the shell window, the embedded runtime, the visibility flag, and the
//! single bridge-managed hotkey registration. All message routing funnels
//! through [`WindowHost::handle_message`].

use std::cell::RefCell;
use std::rc::Rc;

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{WM_FONTCHANGE, WM_HOTKEY};

use crate::bridge::hotkey::NOTIFY_PRESSED;
use crate::bridge::{HotkeyService, Messenger, HOTKEY_CHANNEL};
use crate::runtime::ViewRuntime;
use crate::shell::{VisibilityChange, VisibilityState};

use super::hotkey::Win32HotkeyBackend;
use super::window;

pub struct WindowHost {
    hwnd: HWND,
    visibility: VisibilityState,
    runtime: Box<dyn ViewRuntime>,
    messenger: Rc<RefCell<Messenger>>,
    hotkeys: Rc<RefCell<HotkeyService<Win32HotkeyBackend>>>,
}

impl WindowHost {
    /// Wire the host to its window and install the hotkey channel handler on
    /// the messenger.
    pub fn new(
        hwnd: HWND,
        runtime: Box<dyn ViewRuntime>,
        messenger: Rc<RefCell<Messenger>>,
    ) -> Self {
        let hotkeys = Rc::new(RefCell::new(HotkeyService::new(Win32HotkeyBackend::new(
            hwnd,
        ))));

        let channel_hotkeys = hotkeys.clone();
        messenger.borrow_mut().set_method_handler(
            HOTKEY_CHANNEL,
            Box::new(move |call| channel_hotkeys.borrow_mut().handle_call(call)),
        );

        Self {
            hwnd,
            visibility: VisibilityState::default(),
            runtime,
            messenger,
            hotkeys,
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Route a window message.
    ///
    /// Returns `Some(result)` when the message was consumed (by the host or
    /// the runtime); `None` lets the window procedure apply default handling.
    pub fn handle_message(
        &mut self,
        _hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> Option<LRESULT> {
        // A press of the bridge-managed hotkey is consumed here and pushed
        // to application logic; other hotkey ids fall through.
        if msg == WM_HOTKEY && self.hotkeys.borrow().current_id() == Some(wparam.0 as i32) {
            self.messenger
                .borrow_mut()
                .notify(HOTKEY_CHANNEL, NOTIFY_PRESSED);
            return Some(LRESULT(0));
        }

        // The embedded runtime gets first refusal on everything else
        if let Some(handled) = self
            .runtime
            .handle_top_level_message(msg, wparam.0, lparam.0)
        {
            return Some(LRESULT(handled));
        }

        // Native-only residual behavior, then default processing
        if msg == WM_FONTCHANGE {
            self.runtime.reload_system_fonts();
        }

        None
    }

    /// Flip window visibility; called from the message loop for the fixed
    /// toggle hotkey.
    pub fn toggle_visibility(&mut self) {
        match self.visibility.toggle() {
            VisibilityChange::Hidden => window::hide_window(self.hwnd),
            VisibilityChange::Shown => window::show_window(self.hwnd),
        }
    }
}

impl Drop for WindowHost {
    fn drop(&mut self) {
        // Release the bridge-managed registration while the handle is still
        // valid; the window is destroyed after the host.
        if let Ok(mut hotkeys) = self.hotkeys.try_borrow_mut() {
            let _ = hotkeys.unregister();
        }
        if let Ok(mut messenger) = self.messenger.try_borrow_mut() {
            messenger.remove_method_handler(HOTKEY_CHANNEL);
        }
    }
}

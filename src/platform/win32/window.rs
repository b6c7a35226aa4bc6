//! Win32 window creation and management

use std::cell::RefCell;

use windows::core::{w, Error, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::HBRUSH;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::config::ShellConfig;

/// Thread-local storage for window procedure callback data
thread_local! {
    static WINDOW_CALLBACK: RefCell<Option<Box<dyn FnMut(HWND, u32, WPARAM, LPARAM) -> Option<LRESULT>>>> = RefCell::new(None);
}

/// Set the window procedure callback
pub fn set_window_callback<F>(callback: F)
where
    F: FnMut(HWND, u32, WPARAM, LPARAM) -> Option<LRESULT> + 'static,
{
    WINDOW_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(Box::new(callback));
    });
}

/// Clear the window procedure callback
pub fn clear_window_callback() {
    WINDOW_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Window procedure: the host callback gets every message first; whatever it
/// does not consume falls through to default handling here.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let result = WINDOW_CALLBACK.with(|cb| {
        if let Some(ref mut callback) = *cb.borrow_mut() {
            callback(hwnd, msg, wparam, lparam)
        } else {
            None
        }
    });

    if let Some(r) = result {
        return r;
    }

    match msg {
        WM_DESTROY => {
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

const WINDOW_CLASS_NAME: PCWSTR = w!("SpecterWindowClass");

/// Register the window class (call once at startup)
pub fn register_window_class() -> Result<(), Error> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wnd_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: hinstance.into(),
            hIcon: HICON::default(),
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH::default(),
            lpszMenuName: PCWSTR::null(),
            lpszClassName: WINDOW_CLASS_NAME,
            hIconSm: HICON::default(),
        };

        let atom = RegisterClassExW(&wc);
        if atom == 0 {
            return Err(Error::from_win32());
        }

        Ok(())
    }
}

/// Unregister the window class (call at shutdown)
pub fn unregister_window_class() {
    unsafe {
        let _ = GetModuleHandleW(None).map(|h| {
            let _ = UnregisterClassW(WINDOW_CLASS_NAME, h);
        });
    }
}

/// Create the shell window, initially visible
pub fn create_window(config: &ShellConfig) -> Result<HWND, Error> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        // Keep the title buffer alive across the call
        let title: Vec<u16> = config.title.encode_utf16().chain(Some(0)).collect();

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            WINDOW_CLASS_NAME,
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW | WS_VISIBLE,
            config.x,
            config.y,
            config.width,
            config.height,
            None,
            None,
            hinstance,
            None,
        )?;

        Ok(hwnd)
    }
}

/// Show the window and restore foreground focus
pub fn show_window(hwnd: HWND) {
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = SetForegroundWindow(hwnd);
    }
}

/// Hide the window
pub fn hide_window(hwnd: HWND) {
    unsafe {
        let _ = ShowWindow(hwnd, SW_HIDE);
    }
}

/// Destroy the window
pub fn destroy_window(hwnd: HWND) {
    unsafe {
        let _ = DestroyWindow(hwnd);
    }
}

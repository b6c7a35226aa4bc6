//! Specter - a capture-invisible overlay shell for Windows
//!
//! Hosts an embedded UI runtime in a topmost, layered window that screen
//! capture cannot see. Press Win+/ to toggle the window.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod bridge;
mod config;
mod error;
mod logging;
mod platform;
mod runtime;
mod shell;

use std::process::ExitCode;

#[cfg(target_os = "windows")]
fn main() -> ExitCode {
    use std::cell::RefCell;
    use std::rc::Rc;

    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, TranslateMessage, MSG,
    };

    use bridge::Messenger;
    use config::ShellConfig;
    use platform::win32::{
        apply_window_styling, attach_console, clear_window_callback, create_window,
        destroy_window, is_toggle_hotkey, register_toggle_hotkey, register_window_class,
        set_window_callback, unregister_toggle_hotkey, unregister_window_class, ComGuard,
        WindowHost,
    };
    use runtime::DetachedRuntime;

    logging::init();
    log::info!("specter starting");

    attach_console();
    let _com = ComGuard::init();

    let config = ShellConfig::load();

    if let Err(e) = register_window_class() {
        log::error!("failed to register window class: {e}");
        return ExitCode::FAILURE;
    }

    let hwnd = match create_window(&config) {
        Ok(h) => h,
        Err(e) => {
            log::error!("failed to create window: {e}");
            unregister_window_class();
            return ExitCode::FAILURE;
        }
    };

    // The fixed toggle is useful but not essential; the shell runs without it
    if let Err(e) = register_toggle_hotkey(hwnd) {
        log::warn!("failed to register Win+/ toggle: {e}");
    }

    apply_window_styling(hwnd, &config);

    let messenger = Rc::new(RefCell::new(Messenger::new()));
    let entrypoint_args: Vec<String> = std::env::args().skip(1).collect();
    let runtime = Box::new(DetachedRuntime::new(entrypoint_args));
    let host = Rc::new(RefCell::new(WindowHost::new(
        hwnd,
        runtime,
        messenger.clone(),
    )));

    let callback_host = host.clone();
    set_window_callback(move |hwnd, msg, wparam, lparam| {
        // ShowWindow can re-enter the window procedure while a borrow from
        // the message loop is still held; skip rather than panic
        match callback_host.try_borrow_mut() {
            Ok(mut host) => host.handle_message(hwnd, msg, wparam, lparam),
            Err(_) => None,
        }
    });

    log::info!("entering message loop; Win+/ toggles the window");

    unsafe {
        let mut msg = MSG::default();
        loop {
            let ret = GetMessageW(&mut msg, None, 0, 0);
            if ret.0 <= 0 {
                break;
            }

            // The fixed show/hide toggle is handled here, before dispatch
            if is_toggle_hotkey(&msg) {
                host.borrow_mut().toggle_visibility();
                continue;
            }

            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    // Teardown order matters: the host drop releases the bridge-managed
    // hotkey while the window handle is still valid.
    clear_window_callback();
    drop(host);
    unregister_toggle_hotkey(hwnd);
    destroy_window(hwnd);
    unregister_window_class();

    log::info!("specter exited normally");
    ExitCode::SUCCESS
}

#[cfg(not(target_os = "windows"))]
fn main() -> ExitCode {
    eprintln!("specter is a Windows shell; this platform is not supported");
    ExitCode::FAILURE
}

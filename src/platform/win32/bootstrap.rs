//! Process entry plumbing: console attachment and COM lifetime

use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};
use windows::Win32::System::Console::{AllocConsole, AttachConsole, ATTACH_PARENT_PROCESS};
use windows::Win32::System::Diagnostics::Debug::IsDebuggerPresent;

/// Attach to the parent console when present (e.g. launched from a shell), or
/// create one when running under a debugger.
pub fn attach_console() {
    unsafe {
        if AttachConsole(ATTACH_PARENT_PROCESS).is_err() && IsDebuggerPresent().as_bool() {
            let _ = AllocConsole();
        }
    }
}

/// Apartment-threaded COM, initialized for the lifetime of the guard.
pub struct ComGuard;

impl ComGuard {
    /// Best-effort initialization; the shell runs without COM if it fails.
    pub fn init() -> Option<Self> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr.is_ok() {
            Some(Self)
        } else {
            log::warn!("COM initialization failed: 0x{:08X}", hr.0);
            None
        }
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

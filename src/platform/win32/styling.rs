//! Startup window attributes
//!
//! Everything here is best-effort: a failed call is logged to the debug sink
//! and the shell keeps running with degraded styling.

use std::ffi::c_void;

use windows::core::{s, w, Error};
use windows::Win32::Foundation::{BOOL, HWND};
use windows::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::config::ShellConfig;

/// Apply the fixed startup attributes: capture exclusion, task-switcher
/// removal, topmost placement, layered alpha, and (when available) acrylic
/// blur behind the window.
pub fn apply_window_styling(hwnd: HWND, config: &ShellConfig) {
    if let Err(e) = exclude_from_capture(hwnd) {
        log::warn!("capture exclusion failed: {e}");
    }

    remove_from_task_switcher(hwnd);

    if let Err(e) = place_above_all(hwnd) {
        log::warn!("topmost placement failed: {e}");
    }

    if let Err(e) = apply_layered_alpha(hwnd, config.opacity) {
        log::warn!("layered transparency failed: {e}");
    }

    if config.blur {
        match CompositionApi::locate() {
            Some(api) => {
                if !api.enable_acrylic(hwnd) {
                    log::warn!("acrylic accent rejected by compositor");
                }
            }
            None => log::debug!("composition API not present; skipping blur"),
        }
    }
}

/// Make the window invisible to screen capture
fn exclude_from_capture(hwnd: HWND) -> Result<(), Error> {
    unsafe { SetWindowDisplayAffinity(hwnd, WDA_EXCLUDEFROMCAPTURE) }
}

/// Remove the window from the ALT-TAB list
fn remove_from_task_switcher(hwnd: HWND) {
    unsafe {
        let mut ex_style = GetWindowLongW(hwnd, GWL_EXSTYLE) as u32;
        ex_style &= !WS_EX_APPWINDOW.0;
        ex_style |= WS_EX_TOOLWINDOW.0;
        SetWindowLongW(hwnd, GWL_EXSTYLE, ex_style as i32);
    }
}

/// Place the window above all non-topmost windows
fn place_above_all(hwnd: HWND) -> Result<(), Error> {
    unsafe {
        SetWindowPos(
            hwnd,
            HWND_TOPMOST,
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
        )
    }
}

/// Layered-window transparency at a fixed alpha
fn apply_layered_alpha(hwnd: HWND, alpha: u8) -> Result<(), Error> {
    unsafe {
        let mut ex_style = GetWindowLongW(hwnd, GWL_EXSTYLE) as u32;
        ex_style |= WS_EX_LAYERED.0;
        SetWindowLongW(hwnd, GWL_EXSTYLE, ex_style as i32);
        SetLayeredWindowAttributes(hwnd, None, alpha, LWA_ALPHA)
    }
}

const WCA_ACCENT_POLICY: i32 = 19;
const ACCENT_ENABLE_ACRYLICBLURBEHIND: i32 = 4;
/// ABGR tint blended behind the acrylic surface
const ACRYLIC_TINT: i32 = 0x33000000;

#[repr(C)]
struct AccentPolicy {
    accent_state: i32,
    flags: i32,
    gradient_color: i32,
    animation_id: i32,
}

#[repr(C)]
struct CompositionAttribData {
    attrib: i32,
    data: *mut c_void,
    size: usize,
}

type SetWindowCompositionAttributeFn =
    unsafe extern "system" fn(HWND, *mut CompositionAttribData) -> BOOL;

/// Undocumented composition entry point, resolved at runtime.
///
/// Absent on some Windows builds; callers get `None` and skip the effect.
struct CompositionApi {
    set_attribute: SetWindowCompositionAttributeFn,
}

impl CompositionApi {
    fn locate() -> Option<Self> {
        unsafe {
            let user32 = GetModuleHandleW(w!("user32.dll")).ok()?;
            let entry = GetProcAddress(user32, s!("SetWindowCompositionAttribute"))?;
            Some(Self {
                set_attribute: std::mem::transmute::<
                    unsafe extern "system" fn() -> isize,
                    SetWindowCompositionAttributeFn,
                >(entry),
            })
        }
    }

    fn enable_acrylic(&self, hwnd: HWND) -> bool {
        let mut accent = AccentPolicy {
            accent_state: ACCENT_ENABLE_ACRYLICBLURBEHIND,
            flags: 2,
            gradient_color: ACRYLIC_TINT,
            animation_id: 0,
        };
        let mut data = CompositionAttribData {
            attrib: WCA_ACCENT_POLICY,
            data: &mut accent as *mut AccentPolicy as *mut c_void,
            size: std::mem::size_of::<AccentPolicy>(),
        };
        unsafe { (self.set_attribute)(hwnd, &mut data).as_bool() }
    }
}

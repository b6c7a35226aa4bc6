//! Logging sink for the shell
//!
//! Routes the `log` facade to a file next to the executable and mirrors every
//! line to the OS debug output stream, which is where best-effort styling
//! failures end up when no console is attached.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Get the directory where the executable is located
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

struct ShellLogger {
    file: Mutex<Option<File>>,
}

static LOGGER: ShellLogger = ShellLogger {
    file: Mutex::new(None),
};

impl Log for ShellLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] {:5} {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.args()
        );

        if let Ok(mut guard) = self.file.lock() {
            if let Some(ref mut file) = *guard {
                let _ = writeln!(file, "{}", line);
                let _ = file.flush();
            }
        }

        debug_output(&line);
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

/// Initialize logging to `specter.log` next to the executable.
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init() {
    let log_path = exe_dir().join("specter.log");

    if let Ok(file) = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
    {
        if let Ok(mut guard) = LOGGER.file.lock() {
            *guard = Some(file);
        }
    }

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

/// Write a line to the OS debug output stream.
#[cfg(windows)]
fn debug_output(line: &str) {
    use windows::core::PCWSTR;
    use windows::Win32::System::Diagnostics::Debug::OutputDebugStringW;

    let mut wide: Vec<u16> = line.encode_utf16().collect();
    wide.push('\n' as u16);
    wide.push(0);
    unsafe { OutputDebugStringW(PCWSTR(wide.as_ptr())) };
}

#[cfg(not(windows))]
fn debug_output(_line: &str) {}

//! Env-gated debug log sink.
//!
//! Enabled by `PORTAL_DEBUG=1`. Lines go to `PORTAL_DEBUG_LOG`, or to
//! `<tmp>/portal_drawer-debug.log` when unset. Write failures are swallowed.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;

use crate::config::EnvConfig;

struct DebugSink {
    enabled: bool,
    path: PathBuf,
    file: Option<File>,
    failed: bool,
}

static SINK: Lazy<Mutex<DebugSink>> = Lazy::new(|| {
    let config = EnvConfig::from_env();
    let path = config
        .debug_log
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("portal_drawer-debug.log"));
    Mutex::new(DebugSink {
        enabled: config.debug,
        path,
        file: None,
        failed: false,
    })
});

fn lock_sink() -> std::sync::MutexGuard<'static, DebugSink> {
    SINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0)
}

pub fn debug_enabled() -> bool {
    lock_sink().enabled
}

/// Append one `[category]` line to the debug log.
pub fn log_debug(category: &str, message: impl AsRef<str>) {
    let mut sink = lock_sink();
    if !sink.enabled || sink.failed {
        return;
    }
    if sink.file.is_none() {
        match OpenOptions::new().create(true).append(true).open(&sink.path) {
            Ok(file) => sink.file = Some(file),
            Err(_) => {
                sink.failed = true;
                return;
            }
        }
    }
    let line = format_line(timestamp_ms(), category, message.as_ref());
    if let Some(file) = sink.file.as_mut() {
        if file.write_all(line.as_bytes()).is_err() {
            sink.failed = true;
            sink.file = None;
        }
    }
}

pub fn log_debug_redraw(reason: &str, previous_lines: usize, new_lines: usize, height: usize) {
    if !debug_enabled() {
        return;
    }
    log_debug(
        "redraw",
        format!("{reason} (prev={previous_lines}, new={new_lines}, height={height})"),
    );
}

fn format_line(timestamp: u128, category: &str, message: &str) -> String {
    format!("{timestamp} [{category}] {message}\n")
}

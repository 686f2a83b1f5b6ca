//! Environment configuration.

use std::env;
use std::time::Duration;

pub const DEFAULT_TICK_MS: u64 = 1000;
pub const DEFAULT_TIMEZONE: &str = "Asia/Singapore";

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub tick_interval: Duration,
    pub timezone: String,
    pub debug: bool,
    pub debug_log: Option<String>,
    pub write_log: Option<String>,
    pub root_mount_enabled: bool,
    pub portal_mount_enabled: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            timezone: DEFAULT_TIMEZONE.to_string(),
            debug: false,
            debug_log: None,
            write_log: None,
            root_mount_enabled: true,
            portal_mount_enabled: true,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        let tick_ms = env_string_opt("PORTAL_TICK_MS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TICK_MS);

        Self {
            tick_interval: Duration::from_millis(tick_ms),
            timezone: env_string_opt("PORTAL_TIMEZONE")
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            debug: env_flag("PORTAL_DEBUG"),
            debug_log: env_string_opt("PORTAL_DEBUG_LOG"),
            write_log: env_string_opt("PORTAL_WRITE_LOG"),
            root_mount_enabled: !env_flag("PORTAL_NO_ROOT_MOUNT"),
            portal_mount_enabled: !env_flag("PORTAL_NO_PORTAL_MOUNT"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::{
    error::{LoggerError, LoggerResult},
    object::{LoggerFormat, LoggerLevel, LoggerTimeZone},
};

/// Filter expression, e.g. `info` or `kiln_exec=debug,info`.
pub const ENV_LOG_LEVEL: &str = "KILN_LOG_LEVEL";
/// `text`, `json` or `journald`.
pub const ENV_LOG_FORMAT: &str = "KILN_LOG_FORMAT";
/// `utc` or `local`.
pub const ENV_LOG_TZ: &str = "KILN_LOG_TZ";
/// `true`/`false`; colors are still suppressed when stdout is not a terminal.
pub const ENV_LOG_COLOR: &str = "KILN_LOG_COLOR";
/// `true`/`false`; include event targets (module paths) in output.
pub const ENV_LOG_TARGETS: &str = "KILN_LOG_TARGETS";

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Log level filter expression.
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Whether to include module/target names in log output.
    pub with_targets: bool,
    /// Whether to use colored output.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Reads the `KILN_LOG_*` variables from the process environment.
    pub fn from_env() -> LoggerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// Missing or blank values keep their defaults; present values must parse.
    pub fn from_lookup<F>(lookup: F) -> LoggerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(v) = get(ENV_LOG_FORMAT) {
            cfg.format = v.parse()?;
        }
        if let Some(v) = get(ENV_LOG_LEVEL) {
            cfg.level = v.trim().parse()?;
        }
        if let Some(v) = get(ENV_LOG_TZ) {
            cfg.tz = v.parse()?;
        }
        if let Some(v) = get(ENV_LOG_COLOR) {
            cfg.use_color = parse_flag(ENV_LOG_COLOR, &v)?;
        }
        if let Some(v) = get(ENV_LOG_TARGETS) {
            cfg.with_targets = parse_flag(ENV_LOG_TARGETS, &v)?;
        }
        Ok(cfg)
    }

    /// Color is used only when enabled in config and stdout is a terminal.
    ///
    /// Evaluate at initialization time, not while parsing config.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}

fn parse_flag(key: &'static str, value: &str) -> LoggerResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoggerError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}

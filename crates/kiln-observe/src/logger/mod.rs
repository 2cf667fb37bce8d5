mod config;
mod error;
mod install;
mod object;

pub use config::{ENV_LOG_COLOR, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_LOG_TARGETS, ENV_LOG_TZ};
pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use object::LoggerFormat;
pub use object::LoggerLevel;
pub use object::{LoggerTimeZone, resolve_offset};

/// Initializes the global tracing subscriber with the given configuration.
///
/// Once initialized, all `tracing` macros (`info!`, `debug!`, etc.) go through it.
///
/// # Local timezone
/// The local UTC offset can only be detected reliably while the process is single-threaded.
/// Call this from `main()` before starting the tokio runtime when `tz` is `Local`;
/// if detection fails the logger falls back to UTC.
///
/// # Examples
/// ```rust
/// use kiln_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("Failed to initialize logger");
///
/// tracing::info!("Logger initialized successfully");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => install::install_text(cfg),
        LoggerFormat::Json => install::install_json(cfg),
        LoggerFormat::Journald => install::install_journald(cfg),
    }
}

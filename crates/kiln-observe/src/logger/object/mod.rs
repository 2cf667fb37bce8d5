pub mod format;
pub use format::LoggerFormat;

pub mod level;
pub use level::LoggerLevel;

pub mod timer;
pub use timer::LogTimer;

pub mod timezone;
pub use timezone::{LoggerTimeZone, resolve_offset};

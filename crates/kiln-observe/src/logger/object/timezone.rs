use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::UtcOffset;

use crate::logger::error::LoggerError;

/// Timezone for log timestamps.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoggerTimeZone {
    #[default]
    Utc,
    /// System timezone, resolved once at logger initialization.
    Local,
}

impl FromStr for LoggerTimeZone {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(LoggerError::InvalidTimeZone(s.to_string())),
        }
    }
}

impl fmt::Display for LoggerTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoggerTimeZone::Utc => "utc",
            LoggerTimeZone::Local => "local",
        })
    }
}

/// Resolves the offset used for timestamps.
///
/// Local offset detection fails once other threads exist on most Unix
/// platforms; in that case UTC is used.
pub fn resolve_offset(tz: LoggerTimeZone) -> UtcOffset {
    match tz {
        LoggerTimeZone::Utc => UtcOffset::UTC,
        LoggerTimeZone::Local => UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitive() {
        assert_eq!("UTC".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Utc);
        assert_eq!("Local".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Local);
    }

    #[test]
    fn rejects_invalid_timezone() {
        assert!("".parse::<LoggerTimeZone>().is_err());
        assert!("pst".parse::<LoggerTimeZone>().is_err());
    }

    #[test]
    fn utc_resolves_to_zero_offset() {
        assert_eq!(resolve_offset(LoggerTimeZone::Utc), UtcOffset::UTC);
    }

    #[test]
    fn local_resolves_to_sane_offset() {
        let offset = resolve_offset(LoggerTimeZone::Local);
        assert!(offset.whole_hours().abs() <= 14);
    }
}

//! The fixed severity enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Log severity levels, the eight standard syslog severities.
///
/// The enumeration is closed: every entry carries exactly one of these
/// levels, and every level name arriving over the string-typed call surface
/// is parsed against it. Ordering follows the syslog severity codes
/// (`Emergency` first).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// System is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Error conditions.
    Error,
    /// Warning conditions.
    Warning,
    /// Normal but significant events.
    Notice,
    /// Informational messages.
    Info,
    /// Debug-level messages.
    Debug,
}

impl LogLevel {
    /// All members of the enumeration, in severity order.
    pub const ALL: [Self; 8] = [
        Self::Emergency,
        Self::Alert,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    /// Returns the lowercase name of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    /// Parses a level name. Matching is exact: names are lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emergency" => Ok(Self::Emergency),
            "alert" => Ok(Self::Alert),
            "critical" => Ok(Self::Critical),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "notice" => Ok(Self::Notice),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            other => Err(LogError::InvalidLevel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("emergency", LogLevel::Emergency)]
    #[test_case("alert", LogLevel::Alert)]
    #[test_case("critical", LogLevel::Critical)]
    #[test_case("error", LogLevel::Error)]
    #[test_case("warning", LogLevel::Warning)]
    #[test_case("notice", LogLevel::Notice)]
    #[test_case("info", LogLevel::Info)]
    #[test_case("debug", LogLevel::Debug)]
    fn parses_level_name(name: &str, expected: LogLevel) {
        assert_eq!(name.parse::<LogLevel>().ok(), Some(expected));
        assert_eq!(expected.as_str(), name);
    }

    #[test_case("DUMMY" ; "arbitrary name")]
    #[test_case("INFO" ; "uppercase member")]
    #[test_case("warn" ; "abbreviated member")]
    #[test_case("" ; "empty name")]
    fn rejects_unknown_level_name(name: &str) {
        assert!(matches!(
            name.parse::<LogLevel>(),
            Err(LogError::InvalidLevel(_))
        ));
    }

    #[test]
    fn all_lists_every_level_once() {
        let mut seen = std::collections::BTreeSet::new();
        for level in LogLevel::ALL {
            assert!(seen.insert(level));
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn display_matches_as_str() {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string(), level.as_str());
        }
    }

    #[test]
    fn serializes_to_lowercase_name() {
        let json = serde_json::to_string(&LogLevel::Warning).expect("serialize");
        assert_eq!(json, "\"warning\"");

        let parsed: LogLevel = serde_json::from_str("\"notice\"").expect("deserialize");
        assert_eq!(parsed, LogLevel::Notice);
    }

    #[test]
    fn round_trips_through_parse() {
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>().ok(), Some(level));
        }
    }
}

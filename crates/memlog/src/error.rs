//! Error types for the in-memory logger.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Errors that can occur when logging or building queries.
///
/// All variants are programmer errors: they are raised synchronously at the
/// violating call and are never retried or suppressed internally. Validation
/// is all-or-nothing, so a failed call leaves the receiver unchanged.
#[derive(Debug, Error)]
pub enum LogError {
    /// A level name outside the fixed severity enumeration.
    #[error(
        "invalid log level \"{0}\", use one of: emergency, alert, critical, error, warning, notice, info, debug"
    )]
    InvalidLevel(String),

    /// An empty or otherwise unusable string argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A syntactically invalid regular expression.
    #[error("invalid regular expression \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The offending pattern as supplied by the caller.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// A query time window whose upper bound precedes its lower bound.
    #[error("time upper bound {upper} precedes lower bound {lower}")]
    InvalidBounds {
        /// The lower bound of the rejected window.
        lower: DateTime<FixedOffset>,
        /// The upper bound of the rejected window.
        upper: DateTime<FixedOffset>,
    },
}

/// Result type alias for logger operations.
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = LogError::InvalidLevel("DUMMY".to_string());
        assert!(err.to_string().contains("\"DUMMY\""));
        assert!(err.to_string().contains("emergency"));

        let err = LogError::InvalidArgument("text to search for must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid argument: text to search for must not be empty"
        );

        let err = LogError::InvalidPattern {
            pattern: "((message)".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert!(err.to_string().contains("((message)"));
        assert!(err.to_string().contains("unclosed group"));
    }

    #[test]
    fn bounds_error_names_both_ends() {
        let lower = DateTime::parse_from_rfc3339("2010-02-05T08:00:00+00:00")
            .expect("valid timestamp");
        let upper = DateTime::parse_from_rfc3339("2010-02-03T08:00:00+00:00")
            .expect("valid timestamp");

        let err = LogError::InvalidBounds { lower, upper };
        let message = err.to_string();
        assert!(message.contains("2010-02-05"));
        assert!(message.contains("2010-02-03"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LogError>();
    }
}

//! The logging and inspection call surfaces.
//!
//! [`Logger`] is the write side: a string-typed `log` plus per-level
//! convenience forms, all funneling into one required typed method.
//! [`InspectableLogger`] is the read side test harnesses assert against.

use crate::context::Context;
use crate::entry::LogEntry;
use crate::error::Result;
use crate::level::LogLevel;
use crate::query::LogQuery;

/// The standard logging call surface.
///
/// Implementors provide [`log_at`](Self::log_at); the string-typed
/// [`log`](Self::log) and the per-level conveniences are derived from it.
pub trait Logger: Send + Sync {
    /// Records `message` with `context` at the given level.
    fn log_at(&self, level: LogLevel, message: &str, context: Context);

    /// Records `message` at the level named by `level`.
    ///
    /// # Errors
    ///
    /// Fails with [`LogError::InvalidLevel`](crate::LogError::InvalidLevel)
    /// when `level` is not a member of the fixed enumeration; nothing is
    /// recorded in that case.
    fn log(&self, level: &str, message: &str, context: Context) -> Result<()> {
        self.log_at(level.parse()?, message, context);
        Ok(())
    }

    /// Records at [`LogLevel::Emergency`].
    fn emergency(&self, message: &str, context: Context) {
        self.log_at(LogLevel::Emergency, message, context);
    }

    /// Records at [`LogLevel::Alert`].
    fn alert(&self, message: &str, context: Context) {
        self.log_at(LogLevel::Alert, message, context);
    }

    /// Records at [`LogLevel::Critical`].
    fn critical(&self, message: &str, context: Context) {
        self.log_at(LogLevel::Critical, message, context);
    }

    /// Records at [`LogLevel::Error`].
    fn error(&self, message: &str, context: Context) {
        self.log_at(LogLevel::Error, message, context);
    }

    /// Records at [`LogLevel::Warning`].
    fn warning(&self, message: &str, context: Context) {
        self.log_at(LogLevel::Warning, message, context);
    }

    /// Records at [`LogLevel::Notice`].
    fn notice(&self, message: &str, context: Context) {
        self.log_at(LogLevel::Notice, message, context);
    }

    /// Records at [`LogLevel::Info`].
    fn info(&self, message: &str, context: Context) {
        self.log_at(LogLevel::Info, message, context);
    }

    /// Records at [`LogLevel::Debug`].
    fn debug(&self, message: &str, context: Context) {
        self.log_at(LogLevel::Debug, message, context);
    }
}

/// A boxed logger for dynamic dispatch.
pub type BoxedLogger = Box<dyn Logger>;

impl Logger for BoxedLogger {
    fn log_at(&self, level: LogLevel, message: &str, context: Context) {
        (**self).log_at(level, message, context);
    }
}

/// Read access to the retained records.
pub trait InspectableLogger: Send + Sync {
    /// Returns an independent snapshot of all entries in append order.
    ///
    /// The snapshot is deep-copied; mutating it never affects the store.
    fn read_logged_records(&self) -> Vec<LogEntry>;

    /// Returns the entries accepted by `query`, preserving append order.
    fn find_logged_record(&self, query: &LogQuery) -> Vec<LogEntry>;

    /// Renders all entries, one per line, newline-joined without a trailing
    /// newline. An empty store renders as the empty string.
    fn to_text(&self) -> String;

    /// Clears the store; subsequent reads return an empty sequence.
    fn wipe_logged_records(&self);
}

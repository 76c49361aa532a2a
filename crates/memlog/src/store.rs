//! The in-memory record store.

use chrono::Local;
use parking_lot::RwLock;

use crate::context::Context;
use crate::entry::LogEntry;
use crate::level::LogLevel;
use crate::query::LogQuery;
use crate::traits::{InspectableLogger, Logger};

/// A logger that retains every record in memory, in append order.
///
/// Intended for test harnesses and diagnostic tooling that need to assert
/// "was this logged?" without a real log backend. Records are never rotated
/// or expired; [`wipe_logged_records`](InspectableLogger::wipe_logged_records)
/// is the only way to drop them.
///
/// A single lock guards the sequence, so the store can be shared across
/// threads, although no ordering between concurrent appends is promised
/// beyond the lock's own serialization.
///
/// ```
/// use memlog::{Context, InMemoryLogger, InspectableLogger, Logger, LogQuery};
///
/// # fn main() -> memlog::Result<()> {
/// let logger = InMemoryLogger::new();
/// logger.alert("Disk almost full", Context::new().with("mount", "/var"));
/// logger.info("Test message", Context::new());
///
/// let query = LogQuery::new().with_message_substring("Disk")?;
/// assert_eq!(logger.find_logged_record(&query).len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLogger {
    records: RwLock<Vec<LogEntry>>,
}

impl InMemoryLogger {
    /// Creates an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if no records are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Logger for InMemoryLogger {
    /// Captures the current local time and appends exactly one record.
    ///
    /// Two calls with identical content produce two distinct records; there
    /// is no deduplication.
    fn log_at(&self, level: LogLevel, message: &str, context: Context) {
        let entry = LogEntry::new(
            Local::now().fixed_offset(),
            level,
            message,
            context,
            Vec::new(),
        );
        self.records.write().push(entry);
    }
}

impl InspectableLogger for InMemoryLogger {
    fn read_logged_records(&self) -> Vec<LogEntry> {
        self.records.read().clone()
    }

    fn find_logged_record(&self, query: &LogQuery) -> Vec<LogEntry> {
        self.read_logged_records()
            .into_iter()
            .filter(|entry| query.accepts(entry))
            .collect()
    }

    fn to_text(&self) -> String {
        self.records
            .read()
            .iter()
            .map(LogEntry::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn wipe_logged_records(&self) {
        self.records.write().clear();
    }
}

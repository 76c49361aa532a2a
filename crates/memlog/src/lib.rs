//! # memlog
//!
//! An in-process log sink for test harnesses and diagnostic tooling.
//!
//! Records logged through the standard [`Logger`] surface are retained in
//! memory and can be read back, searched, and rendered, so a test can assert
//! "was this logged?" without a real log backend.
//!
//! This crate provides:
//!
//! - [`LogLevel`] — the fixed enumeration of the eight syslog severities
//! - [`LogEntry`] — one immutable log record with message matching and
//!   placeholder interpolation
//! - [`Context`] / [`ContextValue`] — the structured payload attached to a
//!   record
//! - [`LogQuery`] — an immutable, incrementally-buildable filter evaluated
//!   against records
//! - [`InMemoryLogger`] — the retaining store, implementing [`Logger`] and
//!   [`InspectableLogger`]
//!
//! ## Example
//!
//! ```rust
//! use memlog::{Context, InMemoryLogger, InspectableLogger, Logger, LogQuery};
//!
//! # fn main() -> memlog::Result<()> {
//! let logger = InMemoryLogger::new();
//! logger.error("Connection to {peer} lost", Context::new().with("peer", "db-1"));
//! logger.info("Retrying", Context::new());
//!
//! let query = LogQuery::new()
//!     .with_levels(["error"])?
//!     .with_message_substring("Connection")?;
//! let found = logger.find_logged_record(&query);
//! assert_eq!(found.len(), 1);
//! assert!(found[0].render().contains("Connection to db-1 lost"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod entry;
pub mod error;
pub mod level;
pub mod query;
pub mod store;
pub mod traits;

// Re-export main types
pub use context::{Context, ContextValue};
pub use entry::{CallFrame, LogEntry};
pub use error::{LogError, Result};
pub use level::LogLevel;
pub use query::LogQuery;
pub use store::InMemoryLogger;
pub use traits::{BoxedLogger, InspectableLogger, Logger};

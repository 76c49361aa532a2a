//! Immutable log records.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta};
use regex::Regex;

use crate::context::Context;
use crate::error::{LogError, Result};
use crate::level::LogLevel;

/// One caller frame recorded alongside an entry.
///
/// The call graph is carried on every entry but takes no part in matching or
/// rendering; it is available to tooling that wants to inspect where a record
/// originated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
    /// Name of the function the frame belongs to.
    pub function: String,
    /// Source file, when known.
    pub file: Option<String>,
    /// Line within `file`, when known.
    pub line: Option<u32>,
}

/// One immutable log record.
///
/// An entry never changes after construction: every method borrows `self`
/// and produces a new return value. Entries have no identity beyond their
/// fields; two calls with identical content produce two equal but distinct
/// records.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    timestamp: DateTime<FixedOffset>,
    level: LogLevel,
    message: String,
    context: Context,
    call_graph: Vec<CallFrame>,
}

impl LogEntry {
    /// Creates a new entry.
    ///
    /// The context and call graph are stored as given, without deep
    /// validation. An empty message is valid.
    #[must_use]
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        level: LogLevel,
        message: impl Into<String>,
        context: Context,
        call_graph: Vec<CallFrame>,
    ) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
            context,
            call_graph,
        }
    }

    /// The instant the entry was recorded.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// The entry's severity.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// The raw, uninterpolated message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The context mapping attached to the entry.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// The recorded caller frames.
    #[must_use]
    pub fn call_graph(&self) -> &[CallFrame] {
        &self.call_graph
    }

    /// True iff this entry was recorded strictly before `reference`.
    ///
    /// Decided by the sign of the time difference, so at exact equality both
    /// this and [`is_after`](Self::is_after) return false. Queries rely on
    /// that to make both window bounds inclusive.
    #[must_use]
    pub fn is_before(&self, reference: DateTime<FixedOffset>) -> bool {
        self.timestamp.signed_duration_since(reference) < TimeDelta::zero()
    }

    /// True iff this entry was recorded strictly after `reference`.
    #[must_use]
    pub fn is_after(&self, reference: DateTime<FixedOffset>) -> bool {
        self.timestamp.signed_duration_since(reference) > TimeDelta::zero()
    }

    /// True iff the entry's level is a member of `levels`.
    #[must_use]
    pub fn is_of_level(&self, levels: &BTreeSet<LogLevel>) -> bool {
        levels.contains(&self.level)
    }

    /// True iff `pattern` matches anywhere in the message.
    ///
    /// Search semantics, not a full match. Fails with
    /// [`LogError::InvalidPattern`] when `pattern` is empty or not a valid
    /// regular expression.
    pub fn contains_reg_exp(&self, pattern: &str) -> Result<bool> {
        if pattern.is_empty() {
            return Err(LogError::InvalidPattern {
                pattern: String::new(),
                reason: "pattern must not be empty".to_string(),
            });
        }
        let regex = Regex::new(pattern).map_err(|err| LogError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;
        Ok(regex.is_match(&self.message))
    }

    /// True iff `partial` occurs anywhere in the message.
    ///
    /// Both sides are UTF-8, so matches can only fall on codepoint
    /// boundaries. Fails with [`LogError::InvalidArgument`] when `partial`
    /// is empty.
    pub fn contains_text(&self, partial: &str) -> Result<bool> {
        if partial.is_empty() {
            return Err(LogError::InvalidArgument(
                "text to search for must not be empty",
            ));
        }
        Ok(self.message.contains(partial))
    }

    /// True iff `partial` occurs in the serialized context.
    ///
    /// The search runs over [`Context::to_json`], so it sees keys, values,
    /// and JSON punctuation alike. Fails with [`LogError::InvalidArgument`]
    /// when `partial` is empty.
    pub fn contains_fuzzy_context(&self, partial: &str) -> Result<bool> {
        if partial.is_empty() {
            return Err(LogError::InvalidArgument(
                "text to search for must not be empty",
            ));
        }
        Ok(self.context.to_json().contains(partial))
    }

    /// Renders the entry to its canonical single-line text form:
    /// `<timestamp> [<level>] <interpolated message> <context json>`.
    ///
    /// The timestamp is RFC 3339 at seconds precision with a numeric offset.
    /// Every `{name}` placeholder naming a context key is replaced by that
    /// value's text form; unmatched placeholders stay verbatim.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} [{}] {} {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
            self.level,
            self.interpolate(),
            self.context.to_json()
        )
    }

    /// Replaces `{name}` tokens in the message from the context.
    fn interpolate(&self) -> String {
        let mut out = String::with_capacity(self.message.len());
        let mut rest = self.message.as_str();
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let token = &rest[start..];
            let Some(end) = token.find('}') else {
                // Unterminated placeholder, keep the tail verbatim.
                out.push_str(token);
                return out;
            };
            match self.context.get(&token[1..end]) {
                Some(value) => out.push_str(&value.placeholder_text()),
                None => out.push_str(&token[..=end]),
            }
            rest = &token[end + 1..];
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

//! Immutable filter specifications over stored entries.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};
use regex::Regex;

use crate::entry::LogEntry;
use crate::error::{LogError, Result};
use crate::level::LogLevel;

/// An immutable, incrementally-buildable filter over log entries.
///
/// Every field is optional and unset by default; a fully-unset query accepts
/// every entry. Each `with_*` mutator returns a new, revalidated query with
/// exactly one field changed, leaving the receiver untouched, so partial
/// queries can be shared and refined freely:
///
/// ```
/// use memlog::LogQuery;
///
/// # fn main() -> memlog::Result<()> {
/// let base = LogQuery::new().with_levels(["error", "critical"])?;
/// let narrowed = base.with_message_substring("disk")?;
/// assert_ne!(base, narrowed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    lower_bound: Option<DateTime<FixedOffset>>,
    upper_bound: Option<DateTime<FixedOffset>>,
    levels: Option<BTreeSet<LogLevel>>,
    message_regex: Option<String>,
    message_substring: Option<String>,
    context_fuzzy: Option<String>,
}

impl LogQuery {
    /// Creates a query with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The inclusive lower bound on entry timestamps, if set.
    #[must_use]
    pub const fn lower_bound(&self) -> Option<DateTime<FixedOffset>> {
        self.lower_bound
    }

    /// The inclusive upper bound on entry timestamps, if set.
    #[must_use]
    pub const fn upper_bound(&self) -> Option<DateTime<FixedOffset>> {
        self.upper_bound
    }

    /// The allowed severity set, if set.
    #[must_use]
    pub const fn levels(&self) -> Option<&BTreeSet<LogLevel>> {
        self.levels.as_ref()
    }

    /// The message regular expression, if set.
    #[must_use]
    pub fn message_regex(&self) -> Option<&str> {
        self.message_regex.as_deref()
    }

    /// The message substring, if set.
    #[must_use]
    pub fn message_substring(&self) -> Option<&str> {
        self.message_substring.as_deref()
    }

    /// The fuzzy context substring, if set.
    #[must_use]
    pub fn context_fuzzy(&self) -> Option<&str> {
        self.context_fuzzy.as_deref()
    }

    /// Returns a query whose lower time bound is `bound` (inclusive).
    ///
    /// Fails with [`LogError::InvalidBounds`] when an upper bound is set and
    /// strictly precedes `bound`.
    pub fn with_lower_bound(&self, bound: DateTime<FixedOffset>) -> Result<Self> {
        let mut next = self.clone();
        next.lower_bound = Some(bound);
        next.validate()?;
        Ok(next)
    }

    /// Returns a query with no lower time bound.
    #[must_use]
    pub fn without_lower_bound(&self) -> Self {
        let mut next = self.clone();
        next.lower_bound = None;
        next
    }

    /// Returns a query whose upper time bound is `bound` (inclusive).
    ///
    /// Fails with [`LogError::InvalidBounds`] when a lower bound is set and
    /// strictly follows `bound`. Equal bounds are valid and select the single
    /// instant.
    pub fn with_upper_bound(&self, bound: DateTime<FixedOffset>) -> Result<Self> {
        let mut next = self.clone();
        next.upper_bound = Some(bound);
        next.validate()?;
        Ok(next)
    }

    /// Returns a query with no upper time bound.
    #[must_use]
    pub fn without_upper_bound(&self) -> Self {
        let mut next = self.clone();
        next.upper_bound = None;
        next
    }

    /// Returns a query restricted to the named severity levels.
    ///
    /// Fails with [`LogError::InvalidLevel`] for a name outside the fixed
    /// enumeration and with [`LogError::InvalidArgument`] for an empty list.
    pub fn with_levels<I, S>(&self, levels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for name in levels {
            set.insert(name.as_ref().parse::<LogLevel>()?);
        }
        let mut next = self.clone();
        next.levels = Some(set);
        next.validate()?;
        Ok(next)
    }

    /// Returns a query with no severity restriction.
    #[must_use]
    pub fn without_levels(&self) -> Self {
        let mut next = self.clone();
        next.levels = None;
        next
    }

    /// Returns a query requiring the message to match `pattern`.
    ///
    /// Validity is checked by compiling the pattern, not by matching it.
    /// Fails with [`LogError::InvalidArgument`] when empty and with
    /// [`LogError::InvalidPattern`] when syntactically invalid.
    pub fn with_message_regex(&self, pattern: impl Into<String>) -> Result<Self> {
        let mut next = self.clone();
        next.message_regex = Some(pattern.into());
        next.validate()?;
        Ok(next)
    }

    /// Returns a query with no message pattern.
    #[must_use]
    pub fn without_message_regex(&self) -> Self {
        let mut next = self.clone();
        next.message_regex = None;
        next
    }

    /// Returns a query requiring the message to contain `partial`
    /// (case-sensitive).
    ///
    /// Fails with [`LogError::InvalidArgument`] when `partial` is empty.
    pub fn with_message_substring(&self, partial: impl Into<String>) -> Result<Self> {
        let mut next = self.clone();
        next.message_substring = Some(partial.into());
        next.validate()?;
        Ok(next)
    }

    /// Returns a query with no message substring.
    #[must_use]
    pub fn without_message_substring(&self) -> Self {
        let mut next = self.clone();
        next.message_substring = None;
        next
    }

    /// Returns a query requiring the serialized context to contain `partial`.
    ///
    /// Fails with [`LogError::InvalidArgument`] when `partial` is empty.
    pub fn with_context_fuzzy(&self, partial: impl Into<String>) -> Result<Self> {
        let mut next = self.clone();
        next.context_fuzzy = Some(partial.into());
        next.validate()?;
        Ok(next)
    }

    /// Returns a query with no fuzzy context restriction.
    #[must_use]
    pub fn without_context_fuzzy(&self) -> Self {
        let mut next = self.clone();
        next.context_fuzzy = None;
        next
    }

    /// Decides whether `entry` satisfies every set field (logical AND).
    ///
    /// Unset fields impose no constraint. Evaluation short-circuits on the
    /// first failing predicate, checked in fixed order: lower bound, upper
    /// bound, level membership, regex, substring, fuzzy context.
    #[must_use]
    pub fn accepts(&self, entry: &LogEntry) -> bool {
        if let Some(lower) = self.lower_bound {
            if entry.is_before(lower) {
                return false;
            }
        }
        if let Some(upper) = self.upper_bound {
            if entry.is_after(upper) {
                return false;
            }
        }
        if let Some(ref levels) = self.levels {
            if !entry.is_of_level(levels) {
                return false;
            }
        }
        // The entry predicates can only fail on arguments this query already
        // validated at assignment time; a failure is treated as a non-match.
        if let Some(ref pattern) = self.message_regex {
            if !entry.contains_reg_exp(pattern).unwrap_or(false) {
                return false;
            }
        }
        if let Some(ref partial) = self.message_substring {
            if !entry.contains_text(partial).unwrap_or(false) {
                return false;
            }
        }
        if let Some(ref partial) = self.context_fuzzy {
            if !entry.contains_fuzzy_context(partial).unwrap_or(false) {
                return false;
            }
        }
        true
    }

    fn validate(&self) -> Result<()> {
        if let (Some(lower), Some(upper)) = (self.lower_bound, self.upper_bound) {
            if upper < lower {
                return Err(LogError::InvalidBounds { lower, upper });
            }
        }
        if let Some(ref levels) = self.levels {
            if levels.is_empty() {
                return Err(LogError::InvalidArgument("level list must not be empty"));
            }
        }
        if let Some(ref pattern) = self.message_regex {
            if pattern.is_empty() {
                return Err(LogError::InvalidArgument("pattern must not be empty"));
            }
            Regex::new(pattern).map_err(|err| LogError::InvalidPattern {
                pattern: pattern.clone(),
                reason: err.to_string(),
            })?;
        }
        if let Some(ref partial) = self.message_substring {
            if partial.is_empty() {
                return Err(LogError::InvalidArgument(
                    "message substring must not be empty",
                ));
            }
        }
        if let Some(ref partial) = self.context_fuzzy {
            if partial.is_empty() {
                return Err(LogError::InvalidArgument(
                    "context substring must not be empty",
                ));
            }
        }
        Ok(())
    }
}

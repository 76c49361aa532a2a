//! Context mappings attached to log entries.
//!
//! A [`Context`] is an insertion-ordered mapping from placeholder name to
//! [`ContextValue`]. Insertion order is irrelevant for matching but defines
//! the serialization order, which in turn defines the rendered text of an
//! entry, so a plain ordered pair list is used rather than a hashed map.

use crate::entry::LogEntry;

/// Values nested deeper than this serialize as `null`.
///
/// Context values are owned and therefore acyclic, but pathological nesting
/// would otherwise recurse without bound during serialization.
const MAX_SERIALIZE_DEPTH: usize = 16;

/// A single value stored in a [`Context`].
///
/// The variants cover JSON-style scalars and collections plus a nested
/// [`LogEntry`], which placeholder interpolation renders through the entry's
/// own text form.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    /// Absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    List(Vec<ContextValue>),
    /// A nested mapping.
    Map(Context),
    /// A nested log entry.
    Entry(Box<LogEntry>),
}

impl ContextValue {
    /// Text substituted for a `{placeholder}` referencing this value.
    ///
    /// Scalars use their JSON form (strings unquoted), collections render as
    /// their kind name, and a nested entry renders through its own
    /// [`LogEntry::render`].
    pub(crate) fn placeholder_text(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::String(value) => value.clone(),
            Self::List(_) => "array".to_string(),
            Self::Map(_) => "object".to_string(),
            Self::Entry(entry) => entry.render(),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for ContextValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<LogEntry> for ContextValue {
    fn from(value: LogEntry) -> Self {
        Self::Entry(Box::new(value))
    }
}

impl From<Context> for ContextValue {
    fn from(value: Context) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<ContextValue>> for ContextValue {
    fn from(value: Vec<ContextValue>) -> Self {
        Self::List(value)
    }
}

impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => number.as_i64().map_or_else(
                || Self::Float(number.as_f64().unwrap_or_default()),
                Self::Integer,
            ),
            serde_json::Value::String(value) => Self::String(value),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(fields) => Self::Map(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, ContextValue::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Insertion-ordered mapping from placeholder name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: Vec<(String, ContextValue)>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, consuming and returning the context.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value under `key`.
    ///
    /// Re-inserting an existing key replaces its value in place, keeping the
    /// key's original position in the serialization order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Number of keys in the context.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the context holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Serializes the context to its canonical compact JSON form.
    ///
    /// This is the form the fuzzy-context match searches and the form appended
    /// to an entry's rendered text, so it is a compatibility contract:
    ///
    /// - keys appear in insertion order, without whitespace;
    /// - an empty context serializes as `[]`;
    /// - a nested entry serializes as `{}`;
    /// - non-finite floats and values beyond the depth cap serialize as
    ///   `null`.
    #[must_use]
    pub fn to_json(&self) -> String {
        if self.entries.is_empty() {
            return "[]".to_string();
        }
        let mut out = String::new();
        write_map(&mut out, self, 0);
        out
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

fn write_map(out: &mut String, map: &Context, depth: usize) {
    out.push('{');
    for (index, (key, value)) in map.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        write_string(out, key);
        out.push(':');
        write_value(out, value, depth + 1);
    }
    out.push('}');
}

fn write_value(out: &mut String, value: &ContextValue, depth: usize) {
    if depth > MAX_SERIALIZE_DEPTH {
        out.push_str("null");
        return;
    }
    match value {
        ContextValue::Null => out.push_str("null"),
        ContextValue::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
        ContextValue::Integer(value) => out.push_str(&value.to_string()),
        ContextValue::Float(value) => {
            if value.is_finite() {
                out.push_str(&value.to_string());
            } else {
                // JSON has no NaN or Infinity
                out.push_str("null");
            }
        }
        ContextValue::String(value) => write_string(out, value),
        ContextValue::List(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_value(out, item, depth + 1);
            }
            out.push(']');
        }
        ContextValue::Map(map) => write_map(out, map, depth),
        // Nested records are opaque in the serialized form.
        ContextValue::Entry(_) => out.push_str("{}"),
    }
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_context_serializes_as_empty_list() {
        assert_eq!(Context::new().to_json(), "[]");
    }

    #[test]
    fn keys_serialize_in_insertion_order() {
        let context = Context::new().with("b", 1).with("a", 2);
        assert_eq!(context.to_json(), "{\"b\":1,\"a\":2}");
    }

    #[test]
    fn reinserting_a_key_keeps_its_position() {
        let mut context = Context::new().with("a", 1).with("b", 2);
        context.insert("a", 3);
        assert_eq!(context.to_json(), "{\"a\":3,\"b\":2}");
        assert_eq!(context.len(), 2);
    }

    #[test]
    fn scalar_values_serialize_as_json_scalars() {
        let context = Context::new()
            .with("s", "text")
            .with("i", 42)
            .with("f", 1.5)
            .with("b", true)
            .with("n", ContextValue::Null);
        assert_eq!(
            context.to_json(),
            "{\"s\":\"text\",\"i\":42,\"f\":1.5,\"b\":true,\"n\":null}"
        );
    }

    #[test]
    fn nested_collections_serialize_recursively() {
        let context = Context::new()
            .with("empty", Context::new())
            .with("inner", Context::new().with("k", "v"))
            .with(
                "list",
                vec![ContextValue::from(1), ContextValue::from("two")],
            );
        assert_eq!(
            context.to_json(),
            "{\"empty\":{},\"inner\":{\"k\":\"v\"},\"list\":[1,\"two\"]}"
        );
    }

    #[test]
    fn strings_are_escaped() {
        let context = Context::new().with("k", "a \"quoted\"\n\\ value");
        assert_eq!(context.to_json(), "{\"k\":\"a \\\"quoted\\\"\\n\\\\ value\"}");
    }

    #[test]
    fn control_characters_are_escaped() {
        let context = Context::new().with("k", "\u{1}");
        assert_eq!(context.to_json(), "{\"k\":\"\\u0001\"}");
    }

    #[test]
    fn non_ascii_text_passes_through_verbatim() {
        let context = Context::new().with("k", "Grüße");
        assert_eq!(context.to_json(), "{\"k\":\"Grüße\"}");
    }

    #[test]
    fn non_finite_floats_serialize_as_null() {
        let context = Context::new().with("nan", f64::NAN).with("inf", f64::INFINITY);
        assert_eq!(context.to_json(), "{\"nan\":null,\"inf\":null}");
    }

    #[test]
    fn values_beyond_depth_cap_serialize_as_null() {
        let mut value = ContextValue::from("leaf");
        for _ in 0..32 {
            value = ContextValue::Map(Context::new().with("inner", value));
        }
        let json = Context::new().with("outer", value).to_json();
        assert!(json.contains("null"));
        assert!(!json.contains("leaf"));
    }

    #[test]
    fn json_values_convert_recursively() {
        // serde_json maps iterate in key order, so the converted mapping
        // serializes alphabetically.
        let context = Context::new().with(
            "payload",
            json!({"user": "alice", "attempts": 3, "tags": ["a", "b"], "gone": null}),
        );
        assert_eq!(
            context.to_json(),
            "{\"payload\":{\"attempts\":3,\"gone\":null,\"tags\":[\"a\",\"b\"],\"user\":\"alice\"}}"
        );
    }

    #[test]
    fn get_finds_inserted_values() {
        let context = Context::new().with("called_class", "fuzzyclass");
        assert_eq!(
            context.get("called_class"),
            Some(&ContextValue::String("fuzzyclass".to_string()))
        );
        assert_eq!(context.get("missing"), None);
    }

    #[test]
    fn collects_from_pair_iterator() {
        let context: Context = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(context.to_json(), "{\"a\":1,\"b\":2}");
    }
}

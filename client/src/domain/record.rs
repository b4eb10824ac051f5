//! Opaque server records and helper-match decoding.
//!
//! The backend owns every record shape; the access layer treats each record
//! as a structurally-typed mapping and only extracts the handful of fields
//! its own contract depends on (`id`, and `helper_id`/`score` for match
//! rankings). Extraction fails soft: an absent or wrong-typed field yields
//! `None`, never a panic.

use serde_json::{Map, Value};

/// One JSON object returned by the server for a list or detail operation.
///
/// ## Invariants
/// - Always wraps a JSON object; [`ResourceRecord::from_value`] refuses any
///   other JSON shape.
/// - The client never fabricates an `id`; identifiers are server-minted.
///
/// # Examples
/// ```
/// use client::domain::ResourceRecord;
/// use serde_json::json;
///
/// let record = ResourceRecord::from_value(json!({"id": "abc123"})).unwrap();
/// assert_eq!(record.id(), Some("abc123"));
/// assert!(ResourceRecord::from_value(json!("not an object")).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord(Map<String, Value>);

impl ResourceRecord {
    /// Wrap a JSON value, returning `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Server-minted identifier, when present and string-typed.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Raw access to an arbitrary field for presentation layers.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Borrow the underlying mapping.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Recover the record as a plain JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// One (helper, score) pair from a server-computed match ranking.
///
/// Ordering and ranking policy are owned by the server; callers must
/// preserve the order in which results arrive rather than re-sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Identifier of the candidate helper.
    pub helper_id: String,
    /// Server-assigned match score; higher means a better match.
    pub score: f64,
}

impl MatchResult {
    /// Decode one ranking element, failing soft on missing or wrong-typed
    /// fields.
    ///
    /// # Examples
    /// ```
    /// use client::domain::MatchResult;
    /// use serde_json::json;
    ///
    /// let result = MatchResult::from_value(&json!({"helper_id": "h1", "score": 0.92}));
    /// assert_eq!(result.unwrap().helper_id, "h1");
    /// assert!(MatchResult::from_value(&json!({"helper_id": "h1"})).is_none());
    /// ```
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let helper_id = value.get("helper_id")?.as_str()?.to_owned();
        let score = value.get("score")?.as_f64()?;
        Some(Self { helper_id, score })
    }
}

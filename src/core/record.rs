//! Translation between router history records and host history entries.
//!
//! Hosts store arbitrary JSON values against their history entries. Entries
//! written by the router are wrapped in an envelope keyed by a configurable
//! tag, `{ "<tag>": { "url": "..." } }`, so that entries created by anyone
//! else are never mistaken for router state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default envelope tag for router-owned history entries.
pub const DEFAULT_RECORD_TAG: &str = "navstate";

/// URL persisted against a router-owned history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub url: String,
}

impl HistoryRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Pure, total codec between [`HistoryRecord`]s and host entry values.
///
/// # Example
///
/// ```rust
/// use navstate::core::{HistoryRecord, RecordCodec};
/// use serde_json::json;
///
/// let codec = RecordCodec::new("navstate");
/// let value = codec.to_value(&HistoryRecord::new("/inbox"));
/// assert_eq!(value, json!({ "navstate": { "url": "/inbox" } }));
///
/// assert!(codec.is_own_record(&value));
/// assert!(!codec.is_own_record(&json!({ "scroll": 120 })));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordCodec {
    tag: String,
}

impl RecordCodec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Wrap a URL into a record.
    pub fn to_record(&self, url: &str) -> HistoryRecord {
        HistoryRecord::new(url)
    }

    /// Envelope a record into the value stored by the host.
    pub fn to_value(&self, record: &HistoryRecord) -> Value {
        let mut envelope = Map::new();
        let mut body = Map::new();
        body.insert("url".to_string(), Value::String(record.url.clone()));
        envelope.insert(self.tag.clone(), Value::Object(body));
        Value::Object(envelope)
    }

    /// Recover a record from a host value, or `None` if the router did not write it.
    pub fn from_value(&self, value: &Value) -> Option<HistoryRecord> {
        let body = value.as_object()?.get(&self.tag)?;
        serde_json::from_value(body.clone()).ok()
    }

    pub fn is_own_record(&self, value: &Value) -> bool {
        self.from_value(value).is_some()
    }
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_TAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_uses_configured_tag() {
        let codec = RecordCodec::new("app");
        let value = codec.to_value(&codec.to_record("/foo?x=1"));
        assert_eq!(value, json!({ "app": { "url": "/foo?x=1" } }));
    }

    #[test]
    fn from_value_recovers_record() {
        let codec = RecordCodec::default();
        let value = json!({ "navstate": { "url": "/a/b" } });
        assert_eq!(codec.from_value(&value), Some(HistoryRecord::new("/a/b")));
    }

    #[test]
    fn foreign_values_are_rejected() {
        let codec = RecordCodec::default();
        assert!(!codec.is_own_record(&Value::Null));
        assert!(!codec.is_own_record(&json!("navstate")));
        assert!(!codec.is_own_record(&json!({ "other": { "url": "/a" } })));
        assert!(!codec.is_own_record(&json!({ "navstate": "/a" })));
        assert!(!codec.is_own_record(&json!({ "navstate": { "url": 7 } })));
    }

    #[test]
    fn records_from_another_tag_are_foreign() {
        let ours = RecordCodec::new("ours");
        let theirs = RecordCodec::new("theirs");
        let value = theirs.to_value(&HistoryRecord::new("/x"));
        assert!(!ours.is_own_record(&value));
        assert!(theirs.is_own_record(&value));
    }
}

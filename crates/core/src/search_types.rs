//! Core search types
//!
//! This module defines the request and response types of global search:
//! - SearchRequest: Inbound query, tolerant of absent or malformed input
//! - Record: A row returned by the data-access layer
//! - RecordRef: `{id, displayLabel}` as shown to the caller
//! - SearchResultGroup: Matches for one entity type
//!
//! Groups serialize with camelCase keys:
//! `{"entityType", "label", "icon", "records": [{"id", "displayLabel"}]}`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

// ============================================================================
// SearchRequest
// ============================================================================

/// Inbound search request
///
/// # Examples
///
/// ```
/// use omnisearch_core::SearchRequest;
/// use serde_json::json;
///
/// assert_eq!(SearchRequest::from_json(&json!({"query": "acme"})).query, "acme");
/// assert_eq!(SearchRequest::from_json(&json!({"query": 42})).query, "");
/// assert_eq!(SearchRequest::from_json(&json!({})).query, "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Raw query text
    #[serde(default)]
    pub query: String,
}

impl SearchRequest {
    /// Create a request for `query`
    pub fn new(query: impl Into<String>) -> Self {
        SearchRequest {
            query: query.into(),
        }
    }

    /// Read a request from loosely-typed JSON
    ///
    /// An absent, null or non-string `query` is treated as empty.
    pub fn from_json(value: &JsonValue) -> Self {
        let query = value
            .get("query")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();
        SearchRequest::new(query)
    }
}

// ============================================================================
// Record
// ============================================================================

/// A record returned by the data-access layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record id, unique within its entity type
    pub id: u64,
    /// Attribute values; relation attributes hold the related id(s)
    #[serde(flatten)]
    pub values: BTreeMap<String, JsonValue>,
}

impl Record {
    /// Create a record with no attributes
    pub fn new(id: u64) -> Self {
        Record {
            id,
            values: BTreeMap::new(),
        }
    }

    /// Builder: set an attribute
    pub fn with(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Attribute value, if present
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.values.get(name)
    }
}

// ============================================================================
// SearchResultGroup
// ============================================================================

/// A matching record as shown to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRef {
    /// Record id
    pub id: u64,
    /// Human-readable label
    pub display_label: String,
}

/// Matches for one configured entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultGroup {
    /// Technical entity type name
    pub entity_type: String,
    /// Group label from the configuration
    pub label: String,
    /// Icon from the configuration, or the default icon
    pub icon: String,
    /// Matching records in the data layer's native order
    pub records: Vec<RecordRef>,
}

impl SearchResultGroup {
    /// Number of records in the group
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the group has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_from_json_null_query() {
        assert_eq!(SearchRequest::from_json(&json!({"query": null})).query, "");
        assert_eq!(SearchRequest::from_json(&json!("acme")).query, "");
    }

    #[test]
    fn test_record_builder_and_flatten() {
        let record = Record::new(3).with("name", "Acme").with("company", 7);
        assert_eq!(record.get("name"), Some(&json!("Acme")));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"id": 3, "name": "Acme", "company": 7}));

        let back: Record = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_group_serializes_camel_case() {
        let group = SearchResultGroup {
            entity_type: "contact".into(),
            label: "Contacts".into(),
            icon: "fa-address-book".into(),
            records: vec![RecordRef {
                id: 1,
                display_label: "Acme".into(),
            }],
        };
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(
            value,
            json!({
                "entityType": "contact",
                "label": "Contacts",
                "icon": "fa-address-book",
                "records": [{"id": 1, "displayLabel": "Acme"}]
            })
        );
        assert_eq!(group.len(), 1);
    }
}

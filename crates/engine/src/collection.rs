//! A single in-memory collection
//!
//! Records are kept in id order. Access control has two layers:
//! - `readers`: users allowed to read the collection at all; `None` means
//!   everyone
//! - `owner_field`: when set, a user only sees records whose owner
//!   attribute equals their name
//!
//! `Identity::System` bypasses both.

use omnisearch_core::{AttributeSchema, Identity, Record};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet};

/// Label attribute used when a collection does not name one
pub const DEFAULT_LABEL_FIELD: &str = "name";

/// Records of one entity type plus their schema and access rules
#[derive(Debug, Clone)]
pub struct Collection {
    schema: AttributeSchema,
    records: BTreeMap<u64, Record>,
    readers: Option<BTreeSet<String>>,
    owner_field: Option<String>,
    label_field: String,
}

impl Collection {
    /// Empty collection with `schema`, readable by everyone
    pub fn new(schema: AttributeSchema) -> Self {
        Collection {
            schema,
            records: BTreeMap::new(),
            readers: None,
            owner_field: None,
            label_field: DEFAULT_LABEL_FIELD.to_string(),
        }
    }

    /// Builder: set the label attribute
    pub fn with_label_field(mut self, field: impl Into<String>) -> Self {
        self.label_field = field.into();
        self
    }

    /// Builder: restrict the collection to these readers
    pub fn with_readers<I, S>(mut self, readers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.readers = Some(readers.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: hide records not owned by the caller
    pub fn with_owner_field(mut self, field: impl Into<String>) -> Self {
        self.owner_field = Some(field.into());
        self
    }

    /// Attribute schema
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// Label attribute
    pub fn label_field(&self) -> &str {
        &self.label_field
    }

    /// Insert or replace a record
    pub fn upsert(&mut self, record: Record) {
        self.records.insert(record.id, record);
    }

    /// Record by id
    pub fn get(&self, id: u64) -> Option<&Record> {
        self.records.get(&id)
    }

    /// Records in id order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn set_readers(&mut self, readers: Option<BTreeSet<String>>) {
        self.readers = readers;
    }

    /// True if `caller` may read the collection
    pub fn can_read(&self, caller: &Identity) -> bool {
        match caller {
            Identity::System => true,
            Identity::User(name) => self
                .readers
                .as_ref()
                .map_or(true, |readers| readers.contains(name)),
        }
    }

    /// True if `caller` may see `record`
    pub fn can_see(&self, caller: &Identity, record: &Record) -> bool {
        let (name, field) = match (caller, &self.owner_field) {
            (Identity::User(name), Some(field)) => (name, field),
            _ => return true,
        };
        record.get(field).and_then(JsonValue::as_str) == Some(name.as_str())
    }

    /// Human-readable label of `record`
    ///
    /// Falls back to `"<entity_type>,<id>"` when the label attribute is
    /// missing, null, or blank.
    pub fn label_of(&self, entity_type: &str, record: &Record) -> String {
        let label = match record.get(&self.label_field) {
            Some(JsonValue::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(JsonValue::Number(n)) => Some(n.to_string()),
            Some(JsonValue::Bool(b)) => Some(b.to_string()),
            _ => None,
        };
        label.unwrap_or_else(|| format!("{},{}", entity_type, record.id))
    }
}

/// Searchable text of a scalar value; arrays contribute each element
pub(crate) fn scalar_texts(value: &JsonValue, out: &mut Vec<String>) {
    match value {
        JsonValue::String(s) => out.push(s.clone()),
        JsonValue::Number(n) => out.push(n.to_string()),
        JsonValue::Bool(b) => out.push(b.to_string()),
        JsonValue::Array(items) => {
            for item in items {
                scalar_texts(item, out);
            }
        }
        JsonValue::Null | JsonValue::Object(_) => {}
    }
}

/// Ids referenced by a relation value: a single id, an array of ids, or null
pub(crate) fn related_ids(value: &JsonValue) -> Vec<u64> {
    match value {
        JsonValue::Number(n) => n.as_u64().into_iter().collect(),
        JsonValue::Array(items) => items.iter().filter_map(JsonValue::as_u64).collect(),
        _ => Vec::new(),
    }
}

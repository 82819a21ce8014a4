//! Attribute schemas of entity types
//!
//! The set of entity types and their attributes is only known at runtime;
//! the data-access layer hands out an [`AttributeSchema`] per type on request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One attribute of an entity type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Target entity type when this attribute references other records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

impl Attribute {
    /// A terminal attribute
    pub fn scalar() -> Self {
        Attribute { relation: None }
    }

    /// A reference to records of `target`
    pub fn relation(target: impl Into<String>) -> Self {
        Attribute {
            relation: Some(target.into()),
        }
    }

    /// True if the attribute references another entity type
    pub fn is_relation(&self) -> bool {
        self.relation.is_some()
    }

    /// Referenced entity type, if any
    pub fn related_entity_type(&self) -> Option<&str> {
        self.relation.as_deref()
    }
}

/// Attribute name → attribute, for one entity type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSchema {
    attributes: BTreeMap<String, Attribute>,
}

impl AttributeSchema {
    /// Empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a scalar attribute
    pub fn scalar(mut self, name: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), Attribute::scalar());
        self
    }

    /// Builder: add a relation attribute
    pub fn relation(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), Attribute::relation(target));
        self
    }

    /// Look up an attribute
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// True if `name` is an attribute
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// True if the schema has no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let schema = AttributeSchema::new()
            .scalar("name")
            .relation("company", "company");

        assert!(schema.contains("name"));
        assert!(!schema.get("name").unwrap().is_relation());
        assert_eq!(
            schema.get("company").unwrap().related_entity_type(),
            Some("company")
        );
        assert!(schema.get("missing").is_none());
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["company", "name"]);
    }

    #[test]
    fn test_deserialize_from_map() {
        let json = r#"{"name": {}, "owner": {"relation": "user"}}"#;
        let schema: AttributeSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.len(), 2);
        assert!(schema.get("owner").unwrap().is_relation());
    }
}

//! Field path resolution against runtime schemas
//!
//! Confirms that a dotted field path names real attributes, walking
//! relation attributes from one entity type to the next.
//!
//! Two depths are supported, chosen once per deployment:
//! - `RootOnly` (default): only the first segment is checked; the rest of
//!   the path is left to the data-access layer at search time
//! - `FullPath`: every segment is checked, following relations, and a
//!   scalar attribute may only appear last

use omnisearch_core::{Error, FieldPath, Result, SchemaProvider};
use serde::{Deserialize, Serialize};

/// How deep field paths are validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationPolicy {
    /// Validate the first segment only
    #[default]
    RootOnly,
    /// Validate every segment, following relations
    FullPath,
}

/// Validates field paths against a [`SchemaProvider`]
pub struct FieldPathResolver<'a> {
    schema: &'a dyn SchemaProvider,
    policy: ValidationPolicy,
}

impl<'a> FieldPathResolver<'a> {
    /// Create a resolver over `schema`
    pub fn new(schema: &'a dyn SchemaProvider, policy: ValidationPolicy) -> Self {
        FieldPathResolver { schema, policy }
    }

    /// The policy in force
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Validate `raw` as a field path on `entity_type`
    ///
    /// # Errors
    ///
    /// - `MalformedFieldPath` if `raw` is not a well-formed dotted path
    /// - `InvalidFieldPath` naming the offending segment and the entity type
    ///   it was looked up on
    pub fn validate(&self, entity_type: &str, raw: &str) -> Result<FieldPath> {
        let path = FieldPath::parse(raw)?;
        let depth = match self.policy {
            ValidationPolicy::RootOnly => 1,
            ValidationPolicy::FullPath => path.len(),
        };

        let mut current = entity_type.to_string();
        for (pos, segment) in path.segments().iter().take(depth).enumerate() {
            let schema = self.schema.attribute_schema(&current).ok_or_else(|| {
                Error::invalid_field(&current, raw, segment, "entity type is not available")
            })?;
            let attribute = schema
                .get(segment)
                .ok_or_else(|| Error::invalid_field(&current, raw, segment, "unknown attribute"))?;

            let is_last = pos + 1 == path.len();
            if is_last || self.policy == ValidationPolicy::RootOnly {
                continue;
            }

            match attribute.related_entity_type() {
                Some(target) => current = target.to_string(),
                None => {
                    return Err(Error::invalid_field(
                        &current,
                        raw,
                        segment,
                        "attribute is not a relation",
                    ))
                }
            }
        }

        Ok(path)
    }

    /// Keep only the paths that validate, in their original order
    pub fn retain_valid<'p>(&self, entity_type: &str, paths: &'p [String]) -> Vec<&'p str> {
        paths
            .iter()
            .map(String::as_str)
            .filter(|raw| self.validate(entity_type, raw).is_ok())
            .collect()
    }
}

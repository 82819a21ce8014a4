//! Global search orchestrator
//!
//! Fans a single keyword query out across every active configuration and
//! collects one result group per entity type that matched something.
//!
//! ```text
//! query ──► min length check ──► split words
//!                                     │
//!          ┌──────────────────────────┼──────────────────────────┐
//!          ▼                          ▼                          ▼
//!     config (prio 10)           config (prio 20)           config (prio 30)
//!     available? compile         available? compile         available? compile
//!     search as caller           search as caller           search as caller
//!          │                          │                          │
//!          └──────────── drop failures and empty groups ─────────┘
//!                                     │
//!                                     ▼
//!                        Vec<SearchResultGroup>, config order
//! ```
//!
//! A failure in one configuration never affects the others: access
//! denials, data-access errors, and panics are all logged and skipped.

use crate::compiler::{compile, split_words};
use crate::settings::SearchSettings;
use crate::store::{ConfigEntry, ConfigStore};
use omnisearch_core::{
    DataAccess, Error, FieldPath, Identity, RecordRef, Result, SearchRequest, SearchResultGroup,
};
use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

// ============================================================================
// GlobalSearch
// ============================================================================

/// Cross-entity keyword search
///
/// Holds only the configuration store and settings. Data access and the
/// caller's identity are supplied per request, so one `GlobalSearch` can
/// serve any number of callers concurrently.
#[derive(Clone)]
pub struct GlobalSearch {
    store: Arc<ConfigStore>,
    settings: SearchSettings,
}

impl GlobalSearch {
    /// Orchestrator over `store` with default settings
    pub fn new(store: Arc<ConfigStore>) -> Self {
        GlobalSearch {
            store,
            settings: SearchSettings::default(),
        }
    }

    /// Builder: set settings
    pub fn with_settings(mut self, settings: SearchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The configuration store
    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Settings in force
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Handle a request payload
    pub fn handle(
        &self,
        data: &dyn DataAccess,
        caller: &Identity,
        request: &SearchRequest,
    ) -> Vec<SearchResultGroup> {
        self.search(data, caller, &request.query)
    }

    /// Search every active configuration on behalf of `caller`
    ///
    /// Never fails. Returns an empty list for queries shorter than
    /// `min_query_len` characters after trimming. Groups come back in
    /// configuration order, and only for entity types with at least one
    /// visible match.
    pub fn search(
        &self,
        data: &dyn DataAccess,
        caller: &Identity,
        query: &str,
    ) -> Vec<SearchResultGroup> {
        let trimmed = query.trim();
        if trimmed.chars().count() < self.settings.min_query_len {
            debug!(target: "omnisearch::search", "Query below minimum length");
            return Vec::new();
        }

        let configs = self.store.list_active();
        let words = split_words(trimmed);
        info!(
            target: "omnisearch::search",
            words = words.len(),
            configurations = configs.len(),
            caller = %caller,
            "Global search"
        );

        let run = |entry: &ConfigEntry| self.guarded(data, caller, entry, &words);
        let groups: Vec<Option<SearchResultGroup>> = if self.settings.parallel {
            configs.par_iter().map(run).collect()
        } else {
            configs.iter().map(run).collect()
        };

        groups.into_iter().flatten().collect()
    }

    /// Run one configuration, absorbing errors and panics
    fn guarded(
        &self,
        data: &dyn DataAccess,
        caller: &Identity,
        entry: &ConfigEntry,
        words: &[String],
    ) -> Option<SearchResultGroup> {
        let entity_type = entry.config.entity_type.as_str();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.search_one(data, caller, entry, words)
        }));

        match outcome {
            Ok(Ok(group)) => group,
            Ok(Err(Error::AccessDenied { .. })) => {
                info!(
                    target: "omnisearch::search",
                    entity_type,
                    caller = %caller,
                    "Access denied, skipping entity type"
                );
                None
            }
            Ok(Err(e)) => {
                error!(
                    target: "omnisearch::search",
                    entity_type,
                    error = %e,
                    "Search failed for entity type"
                );
                None
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                    .unwrap_or("(non-string panic)");
                error!(
                    target: "omnisearch::search",
                    entity_type,
                    error = message,
                    "Search panicked for entity type"
                );
                None
            }
        }
    }

    fn search_one(
        &self,
        data: &dyn DataAccess,
        caller: &Identity,
        entry: &ConfigEntry,
        words: &[String],
    ) -> Result<Option<SearchResultGroup>> {
        let config = &entry.config;
        let entity_type = config.entity_type.as_str();

        if !data.exists(entity_type) {
            warn!(
                target: "omnisearch::search",
                entity_type,
                config = %entry.id,
                "Entity type not available, skipping"
            );
            return Ok(None);
        }

        let fields = config
            .field_paths()
            .iter()
            .map(|raw| FieldPath::parse(raw))
            .collect::<Result<Vec<_>>>()?;

        let filter = match compile(words, &fields) {
            Some(filter) => filter,
            None => return Ok(None),
        };

        let limit = config.limit_or(self.settings.default_limit);
        let records = data.search(entity_type, &filter, limit, caller)?;
        if records.is_empty() {
            return Ok(None);
        }

        let records: Vec<RecordRef> = records
            .iter()
            .take(limit)
            .map(|record| RecordRef {
                id: record.id,
                display_label: data.display_label(entity_type, record),
            })
            .collect();

        debug!(
            target: "omnisearch::search",
            entity_type,
            hits = records.len(),
            "Entity type matched"
        );

        Ok(Some(SearchResultGroup {
            entity_type: entity_type.to_string(),
            label: config.label.clone(),
            icon: config.icon_or(&self.settings.default_icon).to_string(),
            records,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ValidationPolicy;
    use omnisearch_core::{
        AttributeSchema, QueryFilter, Record, SchemaProvider, SearchConfiguration,
    };
    use parking_lot::Mutex;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Call {
        entity_type: String,
        limit: usize,
        caller: Identity,
        filter: QueryFilter,
    }

    /// Data access double: fixed records per type, records every call
    #[derive(Default)]
    struct Recording {
        types: HashMap<String, Vec<Record>>,
        denied: Vec<String>,
        failing: Vec<String>,
        panicking: Vec<String>,
        calls: Mutex<Vec<Call>>,
    }

    impl Recording {
        fn with_type(mut self, entity_type: &str, names: &[&str]) -> Self {
            let records = names
                .iter()
                .enumerate()
                .map(|(i, n)| Record::new(i as u64 + 1).with("name", *n))
                .collect();
            self.types.insert(entity_type.to_string(), records);
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }
    }

    impl SchemaProvider for Recording {
        fn exists(&self, entity_type: &str) -> bool {
            self.types.contains_key(entity_type)
        }

        fn attribute_schema(&self, entity_type: &str) -> Option<AttributeSchema> {
            self.types
                .get(entity_type)
                .map(|_| AttributeSchema::new().scalar("name").scalar("email"))
        }
    }

    impl DataAccess for Recording {
        fn search(
            &self,
            entity_type: &str,
            filter: &QueryFilter,
            limit: usize,
            caller: &Identity,
        ) -> Result<Vec<Record>> {
            self.calls.lock().push(Call {
                entity_type: entity_type.to_string(),
                limit,
                caller: caller.clone(),
                filter: filter.clone(),
            });
            if self.panicking.iter().any(|t| t == entity_type) {
                panic!("storage exploded");
            }
            if self.denied.iter().any(|t| t == entity_type) {
                return Err(Error::AccessDenied {
                    entity_type: entity_type.to_string(),
                    identity: caller.to_string(),
                });
            }
            if self.failing.iter().any(|t| t == entity_type) {
                return Err(Error::internal("connection reset"));
            }

            let records = self.types.get(entity_type).cloned().unwrap_or_default();
            Ok(records
                .into_iter()
                .filter(|r| {
                    filter.evaluate(&mut |p: &FieldPath| {
                        r.get(&p.to_string())
                            .and_then(|v| v.as_str())
                            .map(|s| vec![s.to_string()])
                            .unwrap_or_default()
                    })
                })
                .take(limit)
                .collect())
        }

        fn display_label(&self, _entity_type: &str, record: &Record) -> String {
            record
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        }
    }

    fn search_over(data: &Recording, configs: Vec<SearchConfiguration>) -> GlobalSearch {
        let store = ConfigStore::new(ValidationPolicy::RootOnly);
        for config in configs {
            store.create(data, config).unwrap();
        }
        GlobalSearch::new(Arc::new(store))
    }

    fn alice() -> Identity {
        Identity::user("alice")
    }

    #[test]
    fn test_short_query_never_touches_data() {
        let data = Recording::default().with_type("contact", &["Acme"]);
        let search = search_over(&data, vec![SearchConfiguration::new("Contacts", "contact", "name")]);

        for query in ["", "a", "  a  ", "   "] {
            assert!(search.search(&data, &alice(), query).is_empty());
        }
        assert!(data.calls().is_empty());
    }

    #[test]
    fn test_min_length_counts_characters() {
        let data = Recording::default().with_type("contact", &["Élodie"]);
        let search = search_over(&data, vec![SearchConfiguration::new("Contacts", "contact", "name")]);

        assert!(search.search(&data, &alice(), "é").is_empty());
        assert_eq!(search.search(&data, &alice(), "él").len(), 1);
    }

    #[test]
    fn test_identity_and_limit_passed_through() {
        let data = Recording::default()
            .with_type("contact", &["Acme"])
            .with_type("task", &["Acme launch"]);
        let search = search_over(
            &data,
            vec![
                SearchConfiguration::new("Contacts", "contact", "name").with_result_limit(3),
                SearchConfiguration::new("Tasks", "task", "name").with_priority(20),
            ],
        );

        search.search(&data, &alice(), "acme");

        let calls = data.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.caller == alice()));
        assert_eq!(calls[0].limit, 3);
        assert_eq!(calls[1].limit, 5);
    }

    #[test]
    fn test_default_icon_and_limit_come_from_settings() {
        let data = Recording::default().with_type("contact", &["a1", "a2", "a3", "a4"]);
        let search = search_over(&data, vec![SearchConfiguration::new("Contacts", "contact", "name")])
            .with_settings(SearchSettings {
                default_limit: 2,
                default_icon: "fa-search".to_string(),
                ..SearchSettings::default()
            });

        let groups = search.search(&data, &alice(), "a");
        assert!(groups.is_empty(), "single char query is below minimum");

        let groups = search.search(&data, &alice(), "  a1 ");
        assert_eq!(groups[0].icon, "fa-search");

        search.search(&data, &alice(), "aa aa");
        assert_eq!(data.calls().last().unwrap().limit, 2);
    }

    #[test]
    fn test_groups_follow_priority_and_skip_empty() {
        let data = Recording::default()
            .with_type("contact", &["Acme Corp"])
            .with_type("order", &["SO001"])
            .with_type("task", &["Call Acme"]);
        let search = search_over(
            &data,
            vec![
                SearchConfiguration::new("Tasks", "task", "name").with_priority(40),
                SearchConfiguration::new("Orders", "order", "name").with_priority(20),
                SearchConfiguration::new("Contacts", "contact", "name")
                    .with_priority(10)
                    .with_icon("fa-address-book"),
            ],
        );

        let groups = search.search(&data, &alice(), "acme");
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Contacts", "Tasks"]);
        assert_eq!(groups[0].icon, "fa-address-book");
        assert_eq!(groups[1].icon, "fa-file");
        assert_eq!(groups[0].records[0].display_label, "Acme Corp");
    }

    #[test]
    fn test_failures_are_isolated() {
        let mut data = Recording::default()
            .with_type("contact", &["Acme"])
            .with_type("secret", &["Acme secret"])
            .with_type("flaky", &["Acme flaky"])
            .with_type("bomb", &["Acme bomb"])
            .with_type("task", &["Acme task"]);
        data.denied.push("secret".to_string());
        data.failing.push("flaky".to_string());
        data.panicking.push("bomb".to_string());

        let search = search_over(
            &data,
            vec![
                SearchConfiguration::new("Contacts", "contact", "name").with_priority(1),
                SearchConfiguration::new("Secret", "secret", "name").with_priority(2),
                SearchConfiguration::new("Flaky", "flaky", "name").with_priority(3),
                SearchConfiguration::new("Bomb", "bomb", "name").with_priority(4),
                SearchConfiguration::new("Tasks", "task", "name").with_priority(5),
            ],
        );

        let groups = search.search(&data, &alice(), "acme");
        let types: Vec<&str> = groups.iter().map(|g| g.entity_type.as_str()).collect();
        assert_eq!(types, vec!["contact", "task"]);
        assert_eq!(data.calls().len(), 5);
    }

    #[test]
    fn test_unavailable_entity_type_skipped_without_call() {
        let data = Recording::default().with_type("contact", &["Acme"]);
        let search = search_over(
            &data,
            vec![
                SearchConfiguration::new("Leads", "crm_lead", "name,email_from").with_priority(1),
                SearchConfiguration::new("Contacts", "contact", "name").with_priority(2),
            ],
        );

        let groups = search.search(&data, &alice(), "acme");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].entity_type, "contact");
        assert!(data.calls().iter().all(|c| c.entity_type != "crm_lead"));
    }

    #[test]
    fn test_compiled_filter_is_and_of_ors() {
        let data = Recording::default().with_type("contact", &["Paul Sems"]);
        let search = search_over(
            &data,
            vec![SearchConfiguration::new("Contacts", "contact", "name,email")],
        );

        search.search(&data, &alice(), "paul sems");
        let filter = &data.calls()[0].filter;
        assert_eq!(filter.leaves().len(), 4);
        assert!(matches!(filter, QueryFilter::And(groups) if groups.len() == 2));
    }

    #[test]
    fn test_parallel_preserves_order() {
        let mut data = Recording::default();
        let mut configs = Vec::new();
        for i in 0..16 {
            let entity = format!("type{:02}", i);
            data = data.with_type(&entity, &["Acme"]);
            configs.push(
                SearchConfiguration::new(format!("Type {}", i), entity, "name")
                    .with_priority(100 - i),
            );
        }
        let search = search_over(&data, configs).with_settings(SearchSettings {
            parallel: true,
            ..SearchSettings::default()
        });

        let groups = search.search(&data, &alice(), "acme");
        let types: Vec<String> = groups.iter().map(|g| g.entity_type.clone()).collect();
        let mut expected: Vec<String> = (0..16).map(|i| format!("type{:02}", i)).collect();
        expected.reverse();
        assert_eq!(types, expected);
    }

    #[test]
    fn test_handle_uses_request_query() {
        let data = Recording::default().with_type("contact", &["Acme"]);
        let search = search_over(&data, vec![SearchConfiguration::new("Contacts", "contact", "name")]);

        let request = SearchRequest::from_json(&serde_json::json!({ "query": "acme" }));
        assert_eq!(search.handle(&data, &alice(), &request).len(), 1);

        let request = SearchRequest::from_json(&serde_json::json!({}));
        assert!(search.handle(&data, &alice(), &request).is_empty());
    }
}

//! Result → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): one block per group, one indented line per record
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use omnisearch::{ConfigEntry, Error, SearchResultGroup, SeedReport};
use serde::Serialize;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format search result groups.
pub fn format_groups(groups: &[SearchResultGroup], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(groups),
        OutputMode::Human => {
            if groups.is_empty() {
                return "(no results)".to_string();
            }
            groups
                .iter()
                .map(|group| {
                    let mut block = format!("{} ({})", group.label, group.entity_type);
                    for record in &group.records {
                        block.push_str(&format!("\n  #{:<6} {}", record.id, record.display_label));
                    }
                    block
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

#[derive(Serialize)]
struct ConfigRow<'a> {
    id: u64,
    label: &'a str,
    entity_type: &'a str,
    search_fields: &'a str,
    icon: Option<&'a str>,
    priority: i32,
    active: bool,
    result_limit: Option<usize>,
}

/// Format stored configurations.
pub fn format_configs(entries: &[ConfigEntry], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            let rows: Vec<ConfigRow<'_>> = entries
                .iter()
                .map(|e| ConfigRow {
                    id: e.id.as_u64(),
                    label: &e.config.label,
                    entity_type: &e.config.entity_type,
                    search_fields: &e.config.search_fields,
                    icon: e.config.icon.as_deref(),
                    priority: e.config.priority,
                    active: e.config.active,
                    result_limit: e.config.result_limit,
                })
                .collect();
            to_json(&rows)
        }
        OutputMode::Human => {
            if entries.is_empty() {
                return "(empty list)".to_string();
            }
            entries
                .iter()
                .map(|e| {
                    let c = &e.config;
                    format!(
                        "{}) [{}] {} ({}): {}{}",
                        e.id,
                        c.priority,
                        c.label,
                        c.entity_type,
                        c.search_fields,
                        if c.active { "" } else { " (inactive)" }
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Format a seeding report.
pub fn format_seed_report(report: &SeedReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(report),
        OutputMode::Human => format!(
            "created {}, skipped {} (unavailable {}, existing {}, no valid fields {})",
            report.created,
            report.skipped(),
            report.skipped_unavailable,
            report.skipped_existing,
            report.skipped_no_valid_fields
        ),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": format!("{}", err)
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {}", err),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnisearch::{ConfigId, RecordRef, SearchConfiguration};

    fn group() -> SearchResultGroup {
        SearchResultGroup {
            entity_type: "contact".to_string(),
            label: "Contacts".to_string(),
            icon: "fa-address-book".to_string(),
            records: vec![
                RecordRef {
                    id: 1,
                    display_label: "Acme Purchasing".to_string(),
                },
                RecordRef {
                    id: 12,
                    display_label: "Wile E. Coyote".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_format_groups_human() {
        assert_eq!(
            format_groups(&[group()], OutputMode::Human),
            "Contacts (contact)\n  #1      Acme Purchasing\n  #12     Wile E. Coyote"
        );
        assert_eq!(format_groups(&[], OutputMode::Human), "(no results)");
    }

    #[test]
    fn test_format_groups_json() {
        let out = format_groups(&[group()], OutputMode::Json);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["entityType"], "contact");
        assert_eq!(parsed[0]["records"][1]["displayLabel"], "Wile E. Coyote");
        assert_eq!(format_groups(&[], OutputMode::Json), "[]");
    }

    #[test]
    fn test_format_configs() {
        let entries = vec![
            ConfigEntry {
                id: ConfigId::new(1),
                config: SearchConfiguration::new("Contacts", "contact", "name,email"),
            },
            ConfigEntry {
                id: ConfigId::new(2),
                config: SearchConfiguration::new("Tasks", "task", "name")
                    .with_priority(40)
                    .with_active(false),
            },
        ];
        assert_eq!(
            format_configs(&entries, OutputMode::Human),
            "1) [10] Contacts (contact): name,email\n2) [40] Tasks (task): name (inactive)"
        );

        let parsed: serde_json::Value =
            serde_json::from_str(&format_configs(&entries, OutputMode::Json)).unwrap();
        assert_eq!(parsed[1]["active"], false);
        assert_eq!(parsed[0]["id"], 1);
    }

    #[test]
    fn test_format_seed_report() {
        let report = SeedReport {
            created: 2,
            skipped_unavailable: 3,
            skipped_existing: 1,
            skipped_no_valid_fields: 0,
        };
        assert_eq!(
            format_seed_report(&report, OutputMode::Human),
            "created 2, skipped 4 (unavailable 3, existing 1, no valid fields 0)"
        );
    }

    #[test]
    fn test_format_error() {
        let err = Error::UnknownEntityType("lead".to_string());
        assert!(format_error(&err, OutputMode::Human).starts_with("(error) "));
        let parsed: serde_json::Value =
            serde_json::from_str(&format_error(&err, OutputMode::Json)).unwrap();
        assert!(parsed["error"].as_str().unwrap().contains("lead"));
    }
}

//! Keyword query compiler
//!
//! Turns a raw query into a filter over a configuration's fields:
//! - Split the query on whitespace into words
//! - Per word, OR one case-insensitive substring leaf per field
//! - AND the per-word groups together
//!
//! `"paul sems"` over `name,email` becomes
//! `(name ilike paul OR email ilike paul) AND (name ilike sems OR email ilike sems)`,
//! so each word may be satisfied by a different field.

use omnisearch_core::{FieldMatch, FieldPath, QueryFilter};

/// Split a query into words
///
/// Splits on any Unicode whitespace and discards empty tokens. Case and
/// punctuation are preserved; matching is case-insensitive downstream.
///
/// # Example
///
/// ```
/// use omnisearch_search::compiler::split_words;
///
/// assert_eq!(split_words("  paul\tsems \n"), vec!["paul", "sems"]);
/// assert!(split_words("   ").is_empty());
/// ```
pub fn split_words(query: &str) -> Vec<String> {
    query.split_whitespace().map(String::from).collect()
}

/// Compile words and fields into an AND-of-ORs filter
///
/// Returns `None` when there is nothing to match: no words or no fields.
/// Degenerate groups are flattened, so a single field yields one leaf per
/// word and a single word yields its OR group without an AND wrapper.
pub fn compile(words: &[String], fields: &[FieldPath]) -> Option<QueryFilter> {
    if words.is_empty() || fields.is_empty() {
        return None;
    }

    let mut groups: Vec<QueryFilter> = words.iter().map(|word| word_group(word, fields)).collect();

    if groups.len() == 1 {
        groups.pop()
    } else {
        Some(QueryFilter::And(groups))
    }
}

/// "`word` appears in at least one of `fields`"
fn word_group(word: &str, fields: &[FieldPath]) -> QueryFilter {
    let mut leaves: Vec<QueryFilter> = fields
        .iter()
        .map(|field| QueryFilter::Match(FieldMatch::contains_ci(field.clone(), word)))
        .collect();

    if leaves.len() == 1 {
        leaves.remove(0)
    } else {
        QueryFilter::Or(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn fields(raw: &[&str]) -> Vec<FieldPath> {
        raw.iter().map(|f| FieldPath::parse(f).unwrap()).collect()
    }

    fn words(raw: &str) -> Vec<String> {
        split_words(raw)
    }

    fn matches(filter: &QueryFilter, rec: &[(&str, &str)]) -> bool {
        let map: HashMap<String, String> = rec
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        filter.evaluate(&mut |p: &FieldPath| map.get(&p.to_string()).cloned().into_iter().collect())
    }

    #[test]
    fn test_split_words_discards_empty_tokens() {
        assert_eq!(words("a  b\t\tc"), vec!["a", "b", "c"]);
        assert!(words("").is_empty());
    }

    #[test]
    fn test_no_words_or_no_fields_compiles_to_none() {
        assert!(compile(&[], &fields(&["name"])).is_none());
        assert!(compile(&words("acme"), &[]).is_none());
    }

    #[test]
    fn test_single_word_single_field_is_one_leaf() {
        let filter = compile(&words("acme"), &fields(&["name"])).unwrap();
        assert!(matches!(filter, QueryFilter::Match(_)));
    }

    #[test]
    fn test_single_field_many_words_is_and_of_leaves() {
        let filter = compile(&words("acme corp"), &fields(&["name"])).unwrap();
        match filter {
            QueryFilter::And(groups) => {
                assert_eq!(groups.len(), 2);
                assert!(groups.iter().all(|g| matches!(g, QueryFilter::Match(_))));
            }
            other => panic!("expected And, got {}", other),
        }
    }

    #[test]
    fn test_shape_is_and_of_ors() {
        let filter = compile(&words("paul sems"), &fields(&["name", "email"])).unwrap();
        assert_eq!(
            filter.to_string(),
            "((name ilike \"paul\" OR email ilike \"paul\") AND (name ilike \"sems\" OR email ilike \"sems\"))"
        );
        assert_eq!(filter.leaves().len(), 4);
    }

    #[test]
    fn test_words_may_match_different_fields() {
        let filter = compile(&words("paul sems"), &fields(&["name", "email"])).unwrap();
        assert!(matches(&filter, &[("name", "Paul Sems"), ("email", "x@y.com")]));
        assert!(matches(&filter, &[("name", "Paul Jones"), ("email", "sems@y.com")]));

        let filter = compile(&words("paul zzz"), &fields(&["name", "email"])).unwrap();
        assert!(!matches(&filter, &[("name", "Paul Sems"), ("email", "x@y.com")]));
        assert!(!matches(&filter, &[("name", "Paul Jones"), ("email", "sems@y.com")]));
    }

    #[test]
    fn test_nested_paths_are_kept() {
        let filter = compile(&words("acme"), &fields(&["name", "company.name"])).unwrap();
        let paths: Vec<String> = filter.leaves().iter().map(|l| l.path.to_string()).collect();
        assert_eq!(paths, vec!["name", "company.name"]);
    }

    proptest! {
        #[test]
        fn prop_one_leaf_per_word_and_field(
            ws in prop::collection::vec("[a-z]{1,6}", 1..5),
            nfields in 1usize..4,
        ) {
            let all = fields(&["name", "email", "phone"]);
            let fs = &all[..nfields];
            let filter = compile(&ws, fs).unwrap();
            prop_assert_eq!(filter.leaves().len(), ws.len() * nfields);
        }

        #[test]
        fn prop_record_matches_iff_every_word_hits_some_field(
            ws in prop::collection::vec("[a-c]{1,2}", 1..4),
            name in "[a-c ]{0,8}",
            email in "[a-c ]{0,8}",
        ) {
            let filter = compile(&ws, &fields(&["name", "email"])).unwrap();
            let expected = ws.iter().all(|w| name.contains(w.as_str()) || email.contains(w.as_str()));
            prop_assert_eq!(matches(&filter, &[("name", name.as_str()), ("email", email.as_str())]), expected);
        }
    }
}

//! Project autocomplete suggestions derived from the record history.

use std::collections::HashSet;

use crate::record::TaskRecord;

/// Default cap on the number of distinct suggestions collected.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Distinct non-empty project tags in first-seen order over the store's
/// current most-recent-first snapshot, capped at `limit`. Recomputed on
/// demand, so it always reflects the latest deletions and edits.
pub fn project_suggestions(records: &[TaskRecord], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();
    for record in records {
        let Some(project) = record.project.as_deref() else {
            continue;
        };
        if project.is_empty() {
            continue;
        }
        if seen.insert(project.to_string()) {
            suggestions.push(project.to_string());
            if suggestions.len() >= limit {
                break;
            }
        }
    }
    suggestions
}

/// Case-insensitive substring filter over the suggestion list. A blank
/// input returns the full list unfiltered.
pub fn filter_suggestions(suggestions: &[String], input: &str) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return suggestions.to_vec();
    }
    suggestions
        .iter()
        .filter(|s| s.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(project: Option<&str>) -> TaskRecord {
        TaskRecord::new("task", project.map(str::to_string), 0, 1).unwrap()
    }

    #[test]
    fn dedupes_preserving_first_seen_order() {
        // Store order (most-recent-first): C, A, B, A.
        let records = vec![
            record(Some("C")),
            record(Some("A")),
            record(Some("B")),
            record(Some("A")),
        ];
        assert_eq!(
            project_suggestions(&records, DEFAULT_SUGGESTION_LIMIT),
            ["C", "A", "B"]
        );
    }

    #[test]
    fn skips_records_without_project_and_honors_limit() {
        let records = vec![
            record(None),
            record(Some("One")),
            record(Some("Two")),
            record(Some("Three")),
        ];
        assert_eq!(project_suggestions(&records, 2), ["One", "Two"]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let suggestions = vec!["Client Work".to_string(), "Internal".to_string()];
        assert_eq!(filter_suggestions(&suggestions, "client"), ["Client Work"]);
        assert_eq!(filter_suggestions(&suggestions, "TERN"), ["Internal"]);
        assert!(filter_suggestions(&suggestions, "zzz").is_empty());
    }

    #[test]
    fn blank_filter_returns_everything() {
        let suggestions = vec!["A".to_string(), "B".to_string()];
        assert_eq!(filter_suggestions(&suggestions, ""), suggestions);
        assert_eq!(filter_suggestions(&suggestions, "   "), suggestions);
    }
}

//! Interest profiling over a user's journal.

use std::collections::HashMap;

use crate::keywords::extract_keywords;
use crate::models::article::JournalEntryRow;

/// Builds a ranked interest profile from a user's journal.
///
/// Title keywords count double, description keywords single. Ties break
/// alphabetically so the ranking (and therefore the recommendation query) is
/// deterministic for a given journal.
pub fn analyze_interests(entries: &[JournalEntryRow]) -> Vec<String> {
    let mut frequency: HashMap<String, u32> = HashMap::new();

    for entry in entries {
        for word in extract_keywords(&entry.title) {
            *frequency.entry(word).or_insert(0) += 2;
        }
        for word in extract_keywords(&entry.description) {
            *frequency.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, u32)> = frequency.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().map(|(word, _)| word).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_entry(title: &str, description: &str) -> JournalEntryRow {
        JournalEntryRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            url: "https://example.com/a".to_string(),
            source: "technology".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            content: String::new(),
            image_url: String::new(),
            published_at: Utc::now(),
            author: String::new(),
            keywords: vec![],
            categories: vec!["technology".to_string()],
            is_favorite: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_title_counts_double() {
        let entries = vec![make_entry(
            "climate report",
            "economy economy economy report",
        )];
        // climate: 2 (title), report: 2 (title) + 1 (description), economy: 1
        let ranked = analyze_interests(&entries);
        assert_eq!(
            ranked,
            vec![
                "report".to_string(),
                "climate".to_string(),
                "economy".to_string()
            ]
        );
    }

    #[test]
    fn test_ties_break_alphabetically() {
        let entries = vec![make_entry("zebra apple", "")];
        assert_eq!(
            analyze_interests(&entries),
            vec!["apple".to_string(), "zebra".to_string()]
        );
    }

    #[test]
    fn test_frequencies_accumulate_across_entries() {
        let entries = vec![
            make_entry("bitcoin markets", ""),
            make_entry("bitcoin regulation", ""),
        ];
        let ranked = analyze_interests(&entries);
        assert_eq!(ranked[0], "bitcoin"); // 4 vs 2
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_empty_journal_gives_empty_profile() {
        assert!(analyze_interests(&[]).is_empty());
    }
}

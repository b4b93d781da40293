//! Recently-learned-word exclusion list.
//!
//! # Responsibility
//! - Derive, per language, the words a new quiz must avoid.
//!
//! # Invariants
//! - Read-only view over the snapshot; never mutated directly.
//! - Bounded to the most recent `EXCLUSION_LIMIT` matches, most recent
//!   last.
//! - Words learned in other languages are never included.

use crate::model::entry::LogEntry;
use log::warn;
use regex::Regex;

/// Number of recent learned words withheld from new quiz generation.
pub const EXCLUSION_LIMIT: usize = 60;

/// Collects the most recent learned words for `language` from the
/// snapshot, oldest first.
pub fn build_exclusion_list(snapshot: &[LogEntry], language: &str) -> Vec<String> {
    let matcher = match language_matcher(language) {
        Some(matcher) => matcher,
        None => return Vec::new(),
    };

    let mut words: Vec<String> = snapshot
        .iter()
        .filter(|entry| matcher.is_match(&entry.category))
        .filter_map(LogEntry::learned_word)
        .map(str::to_string)
        .collect();

    if words.len() > EXCLUSION_LIMIT {
        words.drain(..words.len() - EXCLUSION_LIMIT);
    }
    words
}

/// Case-insensitive whole-word match of the language name inside an
/// entry category like `Japanese quiz`.
fn language_matcher(language: &str) -> Option<Regex> {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        return None;
    }
    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(trimmed))) {
        Ok(matcher) => Some(matcher),
        Err(err) => {
            warn!("event=bad_language_pattern module=engine status=degraded error={err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_exclusion_list, EXCLUSION_LIMIT};
    use crate::model::entry::LogEntry;
    use chrono::{NaiveDate, NaiveTime};

    fn pass(language: &str, word: &str) -> LogEntry {
        LogEntry::quiz_pass(
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            language,
            word,
        )
    }

    #[test]
    fn keeps_only_the_most_recent_limit_most_recent_last() {
        let snapshot: Vec<LogEntry> = (0..EXCLUSION_LIMIT + 5)
            .map(|i| pass("Japanese", &format!("word{i}")))
            .collect();

        let words = build_exclusion_list(&snapshot, "Japanese");
        assert_eq!(words.len(), EXCLUSION_LIMIT);
        assert_eq!(words.first().map(String::as_str), Some("word5"));
        assert_eq!(
            words.last().map(String::as_str),
            Some(format!("word{}", EXCLUSION_LIMIT + 4).as_str())
        );
    }

    #[test]
    fn other_languages_are_never_included() {
        let snapshot = vec![
            pass("Japanese", "研究"),
            pass("German", "Labor"),
            pass("Japanese", "実験"),
        ];
        let words = build_exclusion_list(&snapshot, "Japanese");
        assert_eq!(words, vec!["研究".to_string(), "実験".to_string()]);
    }

    #[test]
    fn matching_is_case_insensitive_but_word_bounded() {
        let snapshot = vec![pass("japanese", "研究"), pass("NotJapanese?", "ignored")];
        let words = build_exclusion_list(&snapshot, "Japanese");
        assert_eq!(words, vec!["研究".to_string()]);
    }

    #[test]
    fn free_text_entries_contribute_nothing() {
        let snapshot = vec![LogEntry::note(
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            "Japanese quiz",
            "studied grammar today",
            "",
        )];
        assert!(build_exclusion_list(&snapshot, "Japanese").is_empty());
    }

    #[test]
    fn blank_language_yields_empty_list() {
        let snapshot = vec![pass("Japanese", "研究")];
        assert!(build_exclusion_list(&snapshot, "  ").is_empty());
    }
}

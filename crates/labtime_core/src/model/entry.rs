//! Log, finance and paper records.
//!
//! # Responsibility
//! - Define the append-only record shapes for the `Logs`, `Finance` and
//!   `Papers` tables.
//! - Encode and recognize the sentinel inputs that mark task completions
//!   and learned quiz words inside the shared free-text log.
//!
//! # Invariants
//! - A log entry never changes after construction.
//! - Sentinel recognition is prefix-based: an entry marks an event only
//!   when its input *starts* with the sentinel, which keeps arbitrary
//!   learning notes from being misread as completions.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Prefix marking a task-completion entry. The remainder of the input is
/// the task's display name.
pub const DONE_SENTINEL: &str = "done: ";

/// Prefix marking a passed quiz entry. The remainder of the input is the
/// learned word.
pub const LEARNED_SENTINEL: &str = "learned: ";

/// Fixed reward annotation written with a task completion.
pub const TASK_REWARD: &str = "daily task (XP+5)";

/// Fixed reward annotation written with a passed quiz.
pub const QUIZ_REWARD: &str = "pass (XP+1)";

/// One row of the `Logs` table.
///
/// Insertion order is chronological order; there is no explicit key.
/// Structured events (completions, learned words) are distinguished from
/// free-text notes only by their sentinel-encoded `input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub category: String,
    pub input: String,
    pub output: String,
}

impl LogEntry {
    /// Builds a free-text learning-log entry.
    pub fn note(
        date: NaiveDate,
        time: NaiveTime,
        category: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            date,
            time,
            category: category.into(),
            input: input.into(),
            output: output.into(),
        }
    }

    /// Builds the sentinel-encoded completion entry for a task.
    pub fn task_completion(
        date: NaiveDate,
        time: NaiveTime,
        category: impl Into<String>,
        task_name: &str,
    ) -> Self {
        Self::note(
            date,
            time,
            category,
            format!("{DONE_SENTINEL}{task_name}"),
            TASK_REWARD,
        )
    }

    /// Builds the sentinel-encoded learned-word entry for a passed quiz.
    pub fn quiz_pass(date: NaiveDate, time: NaiveTime, language: &str, word: &str) -> Self {
        Self::note(
            date,
            time,
            format!("{language} quiz"),
            format!("{LEARNED_SENTINEL}{word}"),
            QUIZ_REWARD,
        )
    }

    /// Whether this entry records the completion of the named task.
    pub fn marks_completion_of(&self, task_name: &str) -> bool {
        self.input
            .strip_prefix(DONE_SENTINEL)
            .is_some_and(|rest| rest == task_name)
    }

    /// Whether this entry records any task completion.
    pub fn is_completion(&self) -> bool {
        self.input.starts_with(DONE_SENTINEL)
    }

    /// The learned word, when this entry records a passed quiz.
    pub fn learned_word(&self) -> Option<&str> {
        self.input
            .strip_prefix(LEARNED_SENTINEL)
            .map(str::trim)
            .filter(|word| !word.is_empty())
    }
}

/// One row of the `Finance` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceEntry {
    pub date: NaiveDate,
    pub amount: f64,
    pub note: String,
}

/// One row of the `Papers` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperEntry {
    pub published: NaiveDate,
    pub title: String,
    pub authors: String,
    pub summary: String,
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::{FinanceEntry, LogEntry, QUIZ_REWARD, TASK_REWARD};
    use chrono::{NaiveDate, NaiveTime};

    fn stamp() -> (NaiveDate, NaiveTime) {
        (
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn completion_entry_round_trips_through_the_sentinel() {
        let (date, time) = stamp();
        let entry = LogEntry::task_completion(date, time, "research", "Run NMR batch");

        assert!(entry.marks_completion_of("Run NMR batch"));
        assert!(entry.is_completion());
        assert!(!entry.marks_completion_of("Run NMR"));
        assert_eq!(entry.output, TASK_REWARD);
        assert_eq!(entry.learned_word(), None);
    }

    #[test]
    fn quiz_pass_entry_exposes_the_learned_word() {
        let (date, time) = stamp();
        let entry = LogEntry::quiz_pass(date, time, "Japanese", "研究");

        assert_eq!(entry.learned_word(), Some("研究"));
        assert_eq!(entry.category, "Japanese quiz");
        assert_eq!(entry.output, QUIZ_REWARD);
        assert!(!entry.is_completion());
    }

    #[test]
    fn free_text_mentioning_a_task_is_not_a_completion() {
        let (date, time) = stamp();
        let entry = LogEntry::note(
            date,
            time,
            "research",
            "today I planned done: Run NMR batch for tomorrow",
            "",
        );
        assert!(!entry.marks_completion_of("Run NMR batch"));
        assert!(!entry.is_completion());
    }

    #[test]
    fn blank_learned_word_is_ignored() {
        let (date, time) = stamp();
        let entry = LogEntry::note(date, time, "Japanese quiz", "learned:   ", "");
        assert_eq!(entry.learned_word(), None);
    }

    #[test]
    fn finance_entry_holds_amount_and_note() {
        let (date, _) = stamp();
        let entry = FinanceEntry {
            date,
            amount: 1500.0,
            note: "scholarship".to_string(),
        };
        assert_eq!(entry.amount, 1500.0);
    }
}

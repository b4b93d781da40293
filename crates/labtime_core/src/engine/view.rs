//! Pure view computations over log snapshots.
//!
//! # Responsibility
//! - Compute everything the dashboard renders from `(date, snapshot,
//!   content)` without side effects.
//!
//! # Invariants
//! - Every function here is a pure function of its inputs; calling twice
//!   with identical inputs yields identical output.

use crate::model::entry::{FinanceEntry, LogEntry};
use crate::model::task::Task;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One task with its reconciled completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusView {
    pub task: Task,
    pub is_done: bool,
}

/// The day's reconciled task board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyView {
    pub date: NaiveDate,
    pub tasks: Vec<TaskStatusView>,
}

/// Scoring outcome for one submitted quiz answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Shown after a wrong answer.
    pub correct_option: String,
}

/// One market symbol with its derived day-over-day change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolQuote {
    pub symbol: String,
    pub price: f64,
    pub change_percent: f64,
}

/// Accumulated sidebar totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_saved: f64,
    pub total_xp: u32,
}

/// One day of the weekly digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Any entry was logged that day.
    pub logged: bool,
    /// At least one task completion was logged that day.
    pub completed: bool,
}

/// Whether the named task is already completed on `today` per the
/// snapshot.
pub fn is_task_done(snapshot: &[LogEntry], today: NaiveDate, task_name: &str) -> bool {
    snapshot
        .iter()
        .any(|entry| entry.date == today && entry.marks_completion_of(task_name))
}

/// Reconciles the day's task list against the log snapshot.
pub fn compute_daily_view(today: NaiveDate, snapshot: &[LogEntry], tasks: &[Task]) -> DailyView {
    DailyView {
        date: today,
        tasks: tasks
            .iter()
            .map(|task| TaskStatusView {
                task: task.clone(),
                is_done: is_task_done(snapshot, today, &task.name),
            })
            .collect(),
    }
}

/// Sidebar totals: saved money plus experience points.
///
/// XP counts one point per language/quiz entry (category mentions one of
/// the tracked languages) and one per task completion.
pub fn derived_totals(
    snapshot: &[LogEntry],
    finance: &[FinanceEntry],
    languages: &[String],
) -> Totals {
    let total_saved = finance.iter().map(|entry| entry.amount).sum();

    let language_points = snapshot
        .iter()
        .filter(|entry| {
            languages
                .iter()
                .any(|language| entry.category.contains(language.as_str()))
        })
        .count();
    let completion_points = snapshot.iter().filter(|entry| entry.is_completion()).count();

    Totals {
        total_saved,
        total_xp: (language_points + completion_points) as u32,
    }
}

/// Maps each day of the current dashboard week (Monday-first) to its
/// activity flags.
pub fn week_overview(today: NaiveDate, snapshot: &[LogEntry]) -> Vec<DaySummary> {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let mut logged = false;
            let mut completed = false;
            for entry in snapshot.iter().filter(|entry| entry.date == date) {
                logged = true;
                completed |= entry.is_completion();
            }
            DaySummary {
                date,
                logged,
                completed,
            }
        })
        .collect()
}

/// Quarter index (1-4) for a dashboard-local date.
pub fn current_quarter(date: NaiveDate) -> u8 {
    match date.month() {
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        _ => 4,
    }
}

//! Daily-state reconciliation engine.
//!
//! # Responsibility
//! - Derive the UI-visible state from the durable log and the day's
//!   content on every pass, with no engine-owned persistent state.
//! - Own every mutating operation (task completion, quiz scoring,
//!   savings, notes) so idempotence lives in one place.
//!
//! # Invariants
//! - View computation is pure: identical inputs yield identical output.
//! - At most one completion entry per task and day, and at most one
//!   learned-word entry per quiz instance, are ever appended.
//! - No collaborator failure escapes a reconciliation pass; only
//!   user-triggered persistence failures surface, as non-fatal errors.

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod dashboard;
mod exclusion;
mod view;

pub use dashboard::DashboardEngine;
pub use exclusion::{build_exclusion_list, EXCLUSION_LIMIT};
pub use view::{
    compute_daily_view, current_quarter, derived_totals, is_task_done, week_overview,
    AnswerOutcome, DailyView, DaySummary, SymbolQuote, TaskStatusView, Totals,
};

pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level failure. Nothing here is fatal; every variant maps to a
/// visible-but-recoverable condition.
#[derive(Debug)]
pub enum EngineError {
    /// A user-triggered append could not be persisted.
    Store(StoreError),
    /// Quiz operation without an active quiz in the session.
    NoActiveQuiz,
    /// The active quiz was already scored; no re-scoring.
    AlreadyAnswered,
    /// The submitted answer is not one of the quiz options.
    UnknownOption(String),
    /// Free-text note with an empty input field.
    EmptyInput,
    /// Savings amount must be positive.
    InvalidAmount(f64),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NoActiveQuiz => write!(f, "no active quiz in this session"),
            Self::AlreadyAnswered => write!(f, "current quiz is already answered"),
            Self::UnknownOption(selected) => {
                write!(f, "`{selected}` is not one of the quiz options")
            }
            Self::EmptyInput => write!(f, "note input must not be empty"),
            Self::InvalidAmount(amount) => {
                write!(f, "savings amount must be positive, got {amount}")
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

//! Core domain logic for the lab-time dashboard.
//! This crate is the single source of truth for the reconciliation and
//! idempotence invariants; UI layers stay thin on top of it.

pub mod cache;
pub mod clock;
pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod provider;
pub mod store;

pub use cache::{DailyGate, FreshCell};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CacheWindows, ConfigError, DashboardConfig};
pub use engine::{
    build_exclusion_list, compute_daily_view, current_quarter, derived_totals, is_task_done,
    week_overview, AnswerOutcome, DailyView, DashboardEngine, DaySummary, EngineError,
    EngineResult, SymbolQuote, TaskStatusView, Totals, EXCLUSION_LIMIT,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{FinanceEntry, LogEntry, PaperEntry};
pub use model::quiz::{Quiz, QuizValidationError};
pub use model::session::{ActivityMode, SessionState};
pub use model::task::{Severity, Task, TaskCategory};
pub use provider::{
    LearnerProfile, OfflineQuizBank, PaperFeed, ProviderError, ProviderResult, QuizRequest,
    QuizSource, Quote, QuoteSource, StaticTaskSource, TaskSource,
};
pub use store::{FileLogStore, LogStore, MemoryLogStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

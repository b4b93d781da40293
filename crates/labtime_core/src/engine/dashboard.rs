//! Reconciliation engine over the log store and content providers.
//!
//! # Responsibility
//! - Recompute the user-visible daily state from durable storage on
//!   every pass.
//! - Run every mutating operation behind a read-verify-write re-check so
//!   repeated invocation cannot duplicate side effects.
//!
//! # Invariants
//! - Mutating operations re-read the latest snapshot immediately before
//!   appending; they never trust a view computed earlier in the pass.
//!   This is the sole concurrency safeguard and assumes an effectively
//!   single-writer store.
//! - A failed or slow collaborator degrades the view (cached, offline or
//!   empty content); it never aborts the pass.

use crate::cache::{DailyGate, FreshCell};
use crate::clock::Clock;
use crate::config::DashboardConfig;
use crate::engine::exclusion::build_exclusion_list;
use crate::engine::view::{
    self, compute_daily_view, AnswerOutcome, DailyView, DaySummary, SymbolQuote, Totals,
};
use crate::engine::{EngineError, EngineResult};
use crate::model::entry::{FinanceEntry, LogEntry};
use crate::model::session::{ActivityMode, SessionState};
use crate::model::quiz::Quiz;
use crate::model::task::Task;
use crate::provider::{
    pick_topic, OfflineQuizBank, PaperFeed, ProviderError, QuizRequest, QuizSource, QuoteSource,
    StaticTaskSource, TaskSource,
};
use crate::store::LogStore;
use chrono::Duration;
use log::{info, warn};

/// How many papers one daily ingestion pass requests.
const PAPER_FETCH_LIMIT: usize = 5;

/// Single source of truth for what the user sees and may do right now.
///
/// Owns no durable state of its own; everything durable lives in the log
/// store, everything ephemeral in the [`SessionState`] passed into each
/// operation.
pub struct DashboardEngine<S: LogStore, C: Clock> {
    store: S,
    clock: C,
    config: DashboardConfig,

    task_source: Box<dyn TaskSource>,
    quiz_source: Option<Box<dyn QuizSource>>,
    paper_feed: Option<Box<dyn PaperFeed>>,
    quote_source: Option<Box<dyn QuoteSource>>,
    offline_bank: OfflineQuizBank,

    task_cache: FreshCell<Vec<Task>>,
    quote_cache: FreshCell<Vec<SymbolQuote>>,
    log_cache: FreshCell<Vec<LogEntry>>,
    paper_gate: DailyGate,
}

impl<S: LogStore, C: Clock> DashboardEngine<S, C> {
    /// Builds an engine with offline-only content sources. Generative
    /// collaborators are attached with the `with_*` methods.
    pub fn new(store: S, clock: C, config: DashboardConfig) -> Self {
        let windows = &config.cache;
        let task_cache = FreshCell::new(Duration::seconds(windows.daily_tasks_secs as i64));
        let quote_cache = FreshCell::new(Duration::seconds(windows.market_quotes_secs as i64));
        let log_cache = FreshCell::new(Duration::seconds(windows.log_snapshot_secs as i64));
        Self {
            store,
            clock,
            config,
            task_source: Box::new(StaticTaskSource),
            quiz_source: None,
            paper_feed: None,
            quote_source: None,
            offline_bank: OfflineQuizBank,
            task_cache,
            quote_cache,
            log_cache,
            paper_gate: DailyGate::new(),
        }
    }

    pub fn with_task_source(mut self, source: Box<dyn TaskSource>) -> Self {
        self.task_source = source;
        self
    }

    pub fn with_quiz_source(mut self, source: Box<dyn QuizSource>) -> Self {
        self.quiz_source = Some(source);
        self
    }

    pub fn with_paper_feed(mut self, feed: Box<dyn PaperFeed>) -> Self {
        self.paper_feed = Some(feed);
        self
    }

    pub fn with_quote_source(mut self, source: Box<dyn QuoteSource>) -> Self {
        self.quote_source = Some(source);
        self
    }

    /// Latest log rows straight from the store, bypassing the snapshot
    /// cache. Used by every mutating operation (read-verify-write) and
    /// as the cache refill. A failed read degrades to an empty snapshot.
    fn fresh_log_snapshot(&self) -> Vec<LogEntry> {
        match self.store.read_logs() {
            Ok(rows) => rows,
            Err(err) => {
                warn!("event=log_read_failed module=engine status=degraded error={err}");
                Vec::new()
            }
        }
    }

    /// Cached log snapshot for view computation.
    pub fn log_snapshot(&mut self) -> Vec<LogEntry> {
        let now = self.clock.now_utc();
        let store = &self.store;
        self.log_cache
            .ensure_fresh(now, "log_snapshot", || store.read_logs())
            .cloned()
            .unwrap_or_default()
    }

    /// The day's candidate tasks, memoized for the daily-content window.
    /// Degrades to a single placeholder when no content is available.
    pub fn daily_tasks(&mut self) -> Vec<Task> {
        let now = self.clock.now_utc();
        let weekday = self.clock.weekday();
        let source = &*self.task_source;
        let profile = &self.config.profile;
        let tasks = self
            .task_cache
            .ensure_fresh(now, "daily_tasks", || source.daily_tasks(weekday, profile))
            .cloned()
            .unwrap_or_default();
        if tasks.is_empty() {
            vec![Task::placeholder()]
        } else {
            tasks
        }
    }

    /// Reconciles today's task board against the log.
    pub fn daily_view(&mut self) -> DailyView {
        let tasks = self.daily_tasks();
        let snapshot = self.log_snapshot();
        compute_daily_view(self.clock.today(), &snapshot, &tasks)
    }

    /// Marks a task completed today, exactly once.
    ///
    /// Re-checks completion against the *current* store state, so a
    /// stale button or a double click cannot append twice. Returns
    /// `Ok(None)` when the task was already done.
    pub fn mark_task_done(&mut self, task: &Task) -> EngineResult<Option<LogEntry>> {
        let today = self.clock.today();
        let snapshot = self.fresh_log_snapshot();
        if view::is_task_done(&snapshot, today, &task.name) {
            return Ok(None);
        }

        let entry = LogEntry::task_completion(
            today,
            self.clock.time_of_day(),
            task.category_label(),
            &task.name,
        );
        self.store.append_log(&entry)?;
        self.log_cache.invalidate();
        info!(
            "event=task_completed module=engine status=ok task={}",
            task.name
        );
        Ok(Some(entry))
    }

    /// Starts a new quiz for `language` and stores it in the session.
    ///
    /// Makes at most one generative call; quota exhaustion and failures
    /// fall back to the offline bank, so the caller always gets a quiz.
    pub fn start_quiz(&mut self, session: &mut SessionState, language: &str) -> Quiz {
        let snapshot = self.log_snapshot();
        let request = QuizRequest::new(
            language,
            pick_topic(),
            build_exclusion_list(&snapshot, language),
        );

        let quiz = match &self.quiz_source {
            None => self.offline_bank.pick(language),
            Some(source) => match source.generate(&request).and_then(|quiz| {
                quiz.validate()
                    .map_err(|err| ProviderError::Malformed(err.to_string()))?;
                Ok(quiz)
            }) {
                Ok(quiz) => quiz,
                Err(ProviderError::QuotaExceeded) => {
                    // Expected when rate-limited; switch banks quietly.
                    info!("event=quiz_quota_exhausted module=engine status=degraded");
                    self.offline_bank.pick(language)
                }
                Err(err) => {
                    warn!("event=quiz_generation_failed module=engine status=degraded error={err}");
                    self.offline_bank.pick(language)
                }
            },
        };

        session.active_mode = Some(ActivityMode::Quiz);
        session.active_language = Some(language.to_string());
        session.active_quiz = Some(quiz.clone());
        session.quiz_answered = false;
        quiz
    }

    /// Scores the submitted answer for the session's active quiz.
    ///
    /// A correct answer appends exactly one learned-word entry; a wrong
    /// answer appends nothing. Once scored, further submissions for the
    /// same quiz instance are rejected.
    pub fn submit_answer(
        &mut self,
        session: &mut SessionState,
        selected: &str,
    ) -> EngineResult<AnswerOutcome> {
        let quiz = match &session.active_quiz {
            Some(quiz) => quiz.clone(),
            None => return Err(EngineError::NoActiveQuiz),
        };
        if session.quiz_answered {
            return Err(EngineError::AlreadyAnswered);
        }
        if !quiz.has_option(selected) {
            return Err(EngineError::UnknownOption(selected.to_string()));
        }

        session.quiz_answered = true;
        let correct = selected == quiz.correct_option();
        let outcome = AnswerOutcome {
            correct,
            correct_option: quiz.correct_option().to_string(),
        };
        if !correct {
            return Ok(outcome);
        }

        let language = session
            .active_language
            .clone()
            .unwrap_or_else(|| "study".to_string());
        let today = self.clock.today();

        // Read-verify-write: another session may have recorded this word
        // today already.
        let snapshot = self.fresh_log_snapshot();
        let already_recorded = snapshot
            .iter()
            .any(|entry| entry.date == today && entry.learned_word() == Some(quiz.word.as_str()));
        if !already_recorded {
            let entry = LogEntry::quiz_pass(today, self.clock.time_of_day(), &language, &quiz.word);
            self.store.append_log(&entry)?;
            self.log_cache.invalidate();
            info!(
                "event=quiz_passed module=engine status=ok language={language} word={}",
                quiz.word
            );
        }
        Ok(outcome)
    }

    /// Moves on to a fresh question, clearing the finished one first so
    /// partial state cannot leak into it.
    pub fn advance_quiz(&mut self, session: &mut SessionState, language: &str) -> Quiz {
        session.clear_quiz();
        self.start_quiz(session, language)
    }

    /// Switches the session into deep-work mode, leaving any quiz.
    pub fn enter_deep_work(&mut self, session: &mut SessionState) {
        session.clear_quiz();
        session.active_mode = Some(ActivityMode::DeepWork);
    }

    /// Latest quotes for the configured symbols, cached on the market
    /// window. Symbols that fail to fetch are skipped for this window.
    pub fn market_snapshot(&mut self) -> Vec<SymbolQuote> {
        let Some(source) = self.quote_source.as_deref() else {
            return Vec::new();
        };
        let now = self.clock.now_utc();
        let symbols = &self.config.symbols;
        self.quote_cache
            .ensure_fresh(now, "market_quotes", || -> Result<Vec<SymbolQuote>, ProviderError> {
                let mut quotes = Vec::new();
                for symbol in symbols {
                    match source.fetch_quote(symbol) {
                        Ok(quote) => quotes.push(SymbolQuote {
                            symbol: symbol.clone(),
                            price: quote.price,
                            change_percent: quote.percent_change(),
                        }),
                        Err(err) => warn!(
                            "event=quote_failed module=engine status=degraded symbol={symbol} error={err}"
                        ),
                    }
                }
                Ok(quotes)
            })
            .cloned()
            .unwrap_or_default()
    }

    /// Runs the at-most-once-per-day paper ingestion check and returns
    /// how many papers were inserted.
    ///
    /// When the `Papers` table already holds an entry dated today, no
    /// fetch and no insert happen. Only papers published today are
    /// inserted, which keeps re-runs across sessions deduplicated.
    pub fn ingest_papers_if_new(&mut self) -> usize {
        let today = self.clock.today();
        if !self.paper_gate.is_open(today) {
            return 0;
        }

        let existing = match self.store.read_papers() {
            Ok(rows) => rows,
            Err(err) => {
                warn!("event=paper_read_failed module=engine status=degraded error={err}");
                Vec::new()
            }
        };
        if existing.iter().any(|paper| paper.published == today) {
            self.paper_gate.close(today);
            return 0;
        }

        let Some(feed) = self.paper_feed.as_deref() else {
            return 0;
        };
        let fetched = match feed.fetch_latest(&self.config.paper_query, PAPER_FETCH_LIMIT) {
            Ok(papers) => papers,
            Err(err) => {
                warn!("event=paper_fetch_failed module=engine status=degraded error={err}");
                // The day's one attempt is spent.
                self.paper_gate.close(today);
                return 0;
            }
        };

        let mut inserted = 0;
        for paper in fetched.iter().filter(|paper| paper.published == today) {
            match self.store.append_paper(paper) {
                Ok(()) => inserted += 1,
                Err(err) => {
                    warn!("event=paper_insert_failed module=engine status=degraded error={err}");
                    break;
                }
            }
        }
        self.paper_gate.close(today);
        if inserted > 0 {
            info!("event=papers_ingested module=engine status=ok count={inserted}");
        }
        inserted
    }

    /// Appends a free-text learning-log entry.
    pub fn record_note(
        &mut self,
        category: &str,
        input: &str,
        output: &str,
    ) -> EngineResult<LogEntry> {
        if input.trim().is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let entry = LogEntry::note(
            self.clock.today(),
            self.clock.time_of_day(),
            category,
            input,
            output,
        );
        self.store.append_log(&entry)?;
        self.log_cache.invalidate();
        Ok(entry)
    }

    /// Appends one savings record.
    pub fn record_saving(&mut self, amount: f64, note: &str) -> EngineResult<FinanceEntry> {
        if !(amount > 0.0) {
            return Err(EngineError::InvalidAmount(amount));
        }
        let entry = FinanceEntry {
            date: self.clock.today(),
            amount,
            note: note.to_string(),
        };
        self.store.append_finance(&entry)?;
        Ok(entry)
    }

    /// Accumulated savings and experience totals for the sidebar.
    pub fn totals(&mut self) -> Totals {
        let snapshot = self.log_snapshot();
        let finance = match self.store.read_finance() {
            Ok(rows) => rows,
            Err(err) => {
                warn!("event=finance_read_failed module=engine status=degraded error={err}");
                Vec::new()
            }
        };
        view::derived_totals(&snapshot, &finance, &self.config.languages)
    }

    /// Activity flags for each day of the current dashboard week.
    pub fn week_overview(&mut self) -> Vec<DaySummary> {
        let snapshot = self.log_snapshot();
        view::week_overview(self.clock.today(), &snapshot)
    }

    /// Quarter index (1-4) of the current dashboard date.
    pub fn current_quarter(&self) -> u8 {
        view::current_quarter(self.clock.today())
    }

    /// Drops all memoized content so the next reads refetch. Backs the
    /// manual refresh control.
    pub fn refresh_daily_content(&mut self) {
        self.task_cache.invalidate();
        self.quote_cache.invalidate();
        self.log_cache.invalidate();
    }
}

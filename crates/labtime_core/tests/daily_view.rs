use chrono::{NaiveDate, NaiveTime};
use labtime_core::store::StoreResult;
use labtime_core::{
    DashboardConfig, DashboardEngine, FinanceEntry, FixedClock, LogEntry, LogStore,
    MemoryLogStore, PaperEntry, StoreError,
};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn nine_am() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

fn engine_over(
    store: MemoryLogStore,
) -> DashboardEngine<MemoryLogStore, FixedClock> {
    DashboardEngine::new(
        store,
        FixedClock::at_local(monday(), nine_am()),
        DashboardConfig::default(),
    )
}

#[test]
fn empty_log_shows_all_tasks_pending_and_completion_flips_one() {
    let store = MemoryLogStore::new();
    let mut engine = engine_over(store.clone());

    let view = engine.daily_view();
    assert_eq!(view.date, monday());
    assert_eq!(view.tasks.len(), 3);
    assert!(view.tasks.iter().all(|status| !status.is_done));

    let first = view.tasks[0].task.clone();
    let appended = engine
        .mark_task_done(&first)
        .expect("append should succeed")
        .expect("task was not yet done");
    assert_eq!(appended.date, monday());
    assert_eq!(store.log_count(), 1);

    let view = engine.daily_view();
    assert!(view.tasks[0].is_done);
    assert!(!view.tasks[1].is_done);
    assert!(!view.tasks[2].is_done);
}

#[test]
fn marking_a_done_task_again_is_a_no_op() {
    let store = MemoryLogStore::new();
    let mut engine = engine_over(store.clone());

    let task = engine.daily_tasks()[0].clone();
    assert!(engine.mark_task_done(&task).unwrap().is_some());
    assert!(engine.mark_task_done(&task).unwrap().is_none());
    assert!(engine.mark_task_done(&task).unwrap().is_none());

    assert_eq!(store.log_count(), 1);
}

#[test]
fn completion_survives_into_a_new_session() {
    let store = MemoryLogStore::new();
    let mut first_session = engine_over(store.clone());
    let task = first_session.daily_tasks()[0].clone();
    first_session.mark_task_done(&task).unwrap();

    // A fresh engine over the same store reconciles to the same state.
    let mut second_session = engine_over(store);
    let view = second_session.daily_view();
    assert!(view.tasks[0].is_done);
}

#[test]
fn repeated_view_computation_is_identical() {
    let store = MemoryLogStore::new();
    store
        .append_log(&LogEntry::task_completion(
            monday(),
            nine_am(),
            "research",
            "left over from earlier",
        ))
        .unwrap();

    let mut engine = engine_over(store);
    assert_eq!(engine.daily_view(), engine.daily_view());
}

#[test]
fn totals_and_week_overview_reflect_the_log() {
    let store = MemoryLogStore::new();
    let mut engine = engine_over(store.clone());

    let task = engine.daily_tasks()[0].clone();
    engine.mark_task_done(&task).unwrap();
    engine.record_saving(800.0, "stipend").unwrap();
    engine
        .record_note("research", "ran the calibration column", "clean spectra")
        .unwrap();

    let totals = engine.totals();
    assert_eq!(totals.total_saved, 800.0);
    assert_eq!(totals.total_xp, 1);

    let week = engine.week_overview();
    assert_eq!(week.len(), 7);
    assert!(week[0].logged);
    assert!(week[0].completed);
    assert!(!week[1].logged);
}

#[test]
fn empty_note_and_non_positive_saving_are_rejected() {
    let store = MemoryLogStore::new();
    let mut engine = engine_over(store.clone());

    assert!(engine.record_note("research", "   ", "out").is_err());
    assert!(engine.record_saving(0.0, "nothing").is_err());
    assert!(engine.record_saving(-5.0, "debt").is_err());
    assert_eq!(store.log_count(), 0);
}

/// Store whose reads always fail; appends still work. Models a remote
/// sheet that can be written blind but not listed.
#[derive(Clone)]
struct ReadFailingStore {
    inner: MemoryLogStore,
}

impl LogStore for ReadFailingStore {
    fn read_logs(&self) -> StoreResult<Vec<LogEntry>> {
        Err(StoreError::Unavailable("simulated outage".to_string()))
    }

    fn append_log(&self, entry: &LogEntry) -> StoreResult<()> {
        self.inner.append_log(entry)
    }

    fn read_finance(&self) -> StoreResult<Vec<FinanceEntry>> {
        Err(StoreError::Unavailable("simulated outage".to_string()))
    }

    fn append_finance(&self, entry: &FinanceEntry) -> StoreResult<()> {
        self.inner.append_finance(entry)
    }

    fn read_papers(&self) -> StoreResult<Vec<PaperEntry>> {
        Err(StoreError::Unavailable("simulated outage".to_string()))
    }

    fn append_paper(&self, entry: &PaperEntry) -> StoreResult<()> {
        self.inner.append_paper(entry)
    }
}

#[test]
fn unreadable_store_degrades_to_an_empty_view_without_failing() {
    let inner = MemoryLogStore::new();
    let store = ReadFailingStore {
        inner: inner.clone(),
    };
    let mut engine = DashboardEngine::new(
        store,
        FixedClock::at_local(monday(), nine_am()),
        DashboardConfig::default(),
    );

    let view = engine.daily_view();
    assert!(view.tasks.iter().all(|status| !status.is_done));

    let totals = engine.totals();
    assert_eq!(totals.total_xp, 0);
    assert_eq!(totals.total_saved, 0.0);

    // Writes still land even though reads degrade to empty.
    let task = view.tasks[0].task.clone();
    engine.mark_task_done(&task).unwrap();
    assert_eq!(inner.log_count(), 1);
}

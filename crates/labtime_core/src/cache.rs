//! Bounded-freshness caching for daily content.
//!
//! # Responsibility
//! - Enforce the freshness-window rule: staleness beyond the window
//!   triggers exactly one refetch, not a refetch per read.
//! - Gate the once-per-calendar-day paper ingestion check.
//!
//! # Invariants
//! - Within the window the cached value is returned unchanged, with no
//!   provider call.
//! - A failed refetch keeps serving the stale value and still counts as
//!   the window's one attempt.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::warn;
use std::fmt::Display;

/// One cached value with a bounded freshness window.
#[derive(Debug)]
pub struct FreshCell<T> {
    value: Option<T>,
    fetched_at: Option<DateTime<Utc>>,
    window: Duration,
}

impl<T> FreshCell<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            value: None,
            fetched_at: None,
            window,
        }
    }

    /// Whether the cached value is still inside the freshness window.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.fetched_at
            .is_some_and(|fetched_at| now - fetched_at < self.window)
    }

    /// The cached value, fresh or stale, without any provider call.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns the cached value, refetching at most once when stale.
    ///
    /// On refetch failure the previous value keeps being served and the
    /// attempt timestamp is still advanced, so the next read inside the
    /// new window does not retry.
    pub fn ensure_fresh<F, E>(&mut self, now: DateTime<Utc>, label: &str, refetch: F) -> Option<&T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Display,
    {
        if !self.is_fresh(now) {
            match refetch() {
                Ok(value) => self.value = Some(value),
                Err(err) => warn!(
                    "event=refetch_failed module=cache status=degraded content={label} error={err}"
                ),
            }
            self.fetched_at = Some(now);
        }
        self.value.as_ref()
    }

    /// Drops the value and timestamp so the next read refetches.
    pub fn invalidate(&mut self) {
        self.value = None;
        self.fetched_at = None;
    }
}

/// Calendar-day gate for work that runs at most once per dashboard day.
#[derive(Debug, Default)]
pub struct DailyGate {
    last_run: Option<NaiveDate>,
}

impl DailyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the gated work has not yet run on `today`.
    pub fn is_open(&self, today: NaiveDate) -> bool {
        self.last_run != Some(today)
    }

    /// Records that the gated work ran on `today`.
    pub fn close(&mut self, today: NaiveDate) {
        self.last_run = Some(today);
    }
}

#[cfg(test)]
mod tests {
    use super::{DailyGate, FreshCell};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn at(minute: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 1, minute, 0).unwrap()
    }

    #[test]
    fn fresh_value_is_served_without_a_refetch() {
        let mut cell: FreshCell<u32> = FreshCell::new(Duration::minutes(10));
        let mut calls = 0;

        cell.ensure_fresh(at(0), "test", || -> Result<u32, String> {
            calls += 1;
            Ok(1)
        });
        // window - 1: cached, no call
        let value = cell.ensure_fresh(at(9), "test", || -> Result<u32, String> {
            calls += 1;
            Ok(2)
        });
        assert_eq!(value, Some(&1));
        assert_eq!(calls, 1);
    }

    #[test]
    fn stale_value_triggers_exactly_one_refetch() {
        let mut cell: FreshCell<u32> = FreshCell::new(Duration::minutes(10));
        let mut calls = 0;

        cell.ensure_fresh(at(0), "test", || -> Result<u32, String> {
            calls += 1;
            Ok(1)
        });
        // window + 1: one call
        let value = cell.ensure_fresh(at(11), "test", || -> Result<u32, String> {
            calls += 1;
            Ok(2)
        });
        assert_eq!(value, Some(&2));
        assert_eq!(calls, 2);
    }

    #[test]
    fn failed_refetch_keeps_serving_the_stale_value() {
        let mut cell: FreshCell<u32> = FreshCell::new(Duration::minutes(10));
        cell.ensure_fresh(at(0), "test", || -> Result<u32, String> { Ok(7) });

        let value = cell.ensure_fresh(at(11), "test", || Err("backend down".to_string()));
        assert_eq!(value, Some(&7));

        // The failed attempt consumed the window; no immediate retry.
        let mut retried = false;
        cell.ensure_fresh(at(12), "test", || -> Result<u32, String> {
            retried = true;
            Ok(8)
        });
        assert!(!retried);
    }

    #[test]
    fn invalidate_forces_the_next_read_to_refetch() {
        let mut cell: FreshCell<u32> = FreshCell::new(Duration::minutes(10));
        cell.ensure_fresh(at(0), "test", || -> Result<u32, String> { Ok(1) });
        cell.invalidate();
        assert_eq!(cell.get(), None);

        let value = cell.ensure_fresh(at(1), "test", || -> Result<u32, String> { Ok(2) });
        assert_eq!(value, Some(&2));
    }

    #[test]
    fn daily_gate_opens_once_per_date() {
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();

        let mut gate = DailyGate::new();
        assert!(gate.is_open(monday));
        gate.close(monday);
        assert!(!gate.is_open(monday));
        assert!(gate.is_open(tuesday));
    }
}

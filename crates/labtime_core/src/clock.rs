//! Dashboard clock with a fixed UTC+8 offset.
//!
//! # Responsibility
//! - Provide the single time source for every date/time stamp the core
//!   produces.
//! - Apply the dashboard offset itself so collaborators only ever supply
//!   UTC.
//!
//! # Invariants
//! - All dashboard-local stamps use the fixed UTC+8 offset, never the
//!   host timezone.
//! - Minute precision for time-of-day stamps (`HH:MM`).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use chrono::{Datelike, Duration};
use std::cell::Cell;
use std::rc::Rc;

/// Hours east of UTC for every dashboard-local stamp.
pub const DASHBOARD_UTC_OFFSET_HOURS: i32 = 8;

/// Returns the fixed dashboard offset.
pub fn dashboard_offset() -> FixedOffset {
    FixedOffset::east_opt(DASHBOARD_UTC_OFFSET_HOURS * 3600)
        .expect("offset of 8 hours is in range")
}

/// Time source abstraction so engine behavior is testable at fixed
/// instants.
pub trait Clock {
    /// Current instant in UTC. The core applies the dashboard offset.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current dashboard-local date.
    fn today(&self) -> NaiveDate {
        self.now_utc()
            .with_timezone(&dashboard_offset())
            .date_naive()
    }

    /// Current dashboard-local time of day, truncated to the minute.
    fn time_of_day(&self) -> NaiveTime {
        let local = self.now_utc().with_timezone(&dashboard_offset());
        NaiveTime::from_hms_opt(local.hour(), local.minute(), 0)
            .expect("hour/minute from a valid timestamp are in range")
    }

    /// Current dashboard-local weekday.
    fn weekday(&self) -> Weekday {
        self.today().weekday()
    }
}

/// Production clock backed by the host system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests.
///
/// Clones share the same instant, so a test can keep one handle while the
/// engine owns another and still advance time between operations.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Builds a clock at a dashboard-local date and time.
    pub fn at_local(date: NaiveDate, time: NaiveTime) -> Self {
        let local = date
            .and_time(time)
            .and_local_timezone(dashboard_offset())
            .single()
            .expect("fixed offset has no ambiguous local times");
        Self::new(local.with_timezone(&Utc))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{dashboard_offset, Clock, FixedClock};
    use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

    #[test]
    fn dashboard_date_rolls_over_before_utc() {
        // 23:30 UTC+8 on Jan 1 is 15:30 UTC the same day; 16:30 UTC is
        // already Jan 2 on the dashboard.
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 15, 30, 0).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        clock.advance(Duration::hours(1));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
    }

    #[test]
    fn time_of_day_truncates_seconds() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 1, 2, 59).unwrap());
        assert_eq!(
            clock.time_of_day(),
            NaiveTime::from_hms_opt(9, 2, 0).unwrap()
        );
    }

    #[test]
    fn at_local_round_trips_through_the_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let time = NaiveTime::from_hms_opt(8, 15, 0).unwrap();
        let clock = FixedClock::at_local(date, time);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.time_of_day(), time);
        assert_eq!(clock.weekday(), Weekday::Mon);
    }

    #[test]
    fn offset_is_exactly_eight_hours() {
        assert_eq!(dashboard_offset().local_minus_utc(), 8 * 3600);
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone,
    Weekday};

use crate::error::DomainError;

/// The Monday-through-Sunday window of a calendar week, in server local
/// time.
///
/// The window spans Monday 00:00:00.000 through Sunday 23:59:59.999,
/// inclusive on both ends. It is a derived value, recomputed on every
/// quota check and never persisted or cached — caching across a week
/// boundary would silently carry a stale window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl WeekWindow {
    /// Computes the week window containing the given instant.
    ///
    /// The containing week is determined by the weekday of `now`:
    /// Sunday maps 6 days back to the preceding Monday, Monday through
    /// Saturday map (weekday − 1) days back.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WeekWindowUnrepresentable` if either
    /// boundary falls inside a local time zone gap. No real-world zone
    /// skips local midnight, so this is effectively unreachable.
    pub fn containing(now: DateTime<Local>) -> Result<Self, DomainError> {
        let days_back: i64 = match now.weekday() {
            Weekday::Sun => 6,
            other => i64::from(other.num_days_from_monday()),
        };
        let monday: NaiveDate = now.date_naive() - Duration::days(days_back);
        let sunday: NaiveDate = monday + Duration::days(6);

        // 23:59:59.999 is always representable; the fallback is unreachable.
        let end_of_day: NaiveTime =
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);

        let start: DateTime<Local> = resolve_local(monday.and_time(NaiveTime::MIN))?;
        let end: DateTime<Local> = resolve_local(sunday.and_time(end_of_day))?;

        Ok(Self { start, end })
    }

    /// Computes the week window containing the current instant.
    ///
    /// # Errors
    ///
    /// See [`WeekWindow::containing`].
    pub fn current() -> Result<Self, DomainError> {
        Self::containing(Local::now())
    }

    /// Returns the inclusive start of the window (Monday 00:00:00.000).
    #[must_use]
    pub const fn start(&self) -> DateTime<Local> {
        self.start
    }

    /// Returns the inclusive end of the window (Sunday 23:59:59.999).
    #[must_use]
    pub const fn end(&self) -> DateTime<Local> {
        self.end
    }

    /// Returns the window start as Unix epoch milliseconds.
    #[must_use]
    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    /// Returns the window end as Unix epoch milliseconds.
    #[must_use]
    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    /// Returns whether an epoch-millisecond timestamp falls inside the
    /// window, inclusive on both ends.
    #[must_use]
    pub fn contains_millis(&self, timestamp_millis: i64) -> bool {
        timestamp_millis >= self.start_millis() && timestamp_millis <= self.end_millis()
    }
}

/// Resolves a naive local datetime to a concrete local instant.
///
/// Ambiguous instants (clock rolled back) resolve to the earlier
/// occurrence so the window never shrinks.
fn resolve_local(naive: chrono::NaiveDateTime) -> Result<DateTime<Local>, DomainError> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Ok(instant),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(DomainError::WeekWindowUnrepresentable {
            detail: naive.to_string(),
        }),
    }
}

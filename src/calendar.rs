//! Calendar and time service.
//!
//! All date arithmetic in the engine goes through this module so that every
//! consumer surface (dashboard summary, bonus evaluation, payroll runs,
//! advance checks, live estimates) agrees on what "today" and "this month"
//! mean. The workforce is single-site, so the engine operates in one fixed
//! civil timezone rather than UTC or the server-local zone.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The fixed civil timezone offset of the operating site, in hours east of UTC.
pub const OPERATING_UTC_OFFSET_HOURS: i64 = 7;

/// The earliest year the engine accepts in a pay period.
const MIN_PERIOD_YEAR: i32 = 2000;

/// A calendar-month pay period in the operating timezone.
///
/// Identified by `(year, month)`; start and end dates are inclusive.
///
/// # Example
///
/// ```
/// use payroll_engine::calendar::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2026, 2).unwrap();
/// assert_eq!(period.start, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(period.end, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert_eq!(period.days_in_month(), 28);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
    /// The first day of the period (inclusive).
    pub start: NaiveDate,
    /// The last day of the period (inclusive).
    pub end: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period for the given year and month.
    ///
    /// Returns [`EngineError::InvalidArgument`] when the month is outside
    /// 1-12 or the year is implausible, so downstream day counts can never
    /// reach a division by zero.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let (start, end) = period_bounds(year, month)?;
        Ok(Self {
            year,
            month,
            start,
            end,
        })
    }

    /// Returns the number of calendar days in this period's month.
    pub fn days_in_month(&self) -> u32 {
        self.end.day()
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true when the period starts strictly after `today`.
    pub fn is_future(&self, today: NaiveDate) -> bool {
        self.start > today
    }

    /// Returns the last day of the period that has already elapsed,
    /// i.e. `min(today, period end)`.
    pub fn elapsed_end(&self, today: NaiveDate) -> NaiveDate {
        clamp_to_today(self.end, today)
    }
}

/// Returns the inclusive start and end dates of a calendar month.
///
/// # Example
///
/// ```
/// use payroll_engine::calendar::period_bounds;
/// use chrono::NaiveDate;
///
/// let (start, end) = period_bounds(2026, 1).unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
/// ```
pub fn period_bounds(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidArgument {
            message: format!("month must be between 1 and 12, got {}", month),
        });
    }
    if year < MIN_PERIOD_YEAR {
        return Err(EngineError::InvalidArgument {
            message: format!("year must be {} or later, got {}", MIN_PERIOD_YEAR, year),
        });
    }

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or(EngineError::InvalidArgument {
        message: format!("invalid period {}-{:02}", year, month),
    })?;
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(EngineError::InvalidArgument {
        message: format!("invalid period {}-{:02}", year, month),
    })?;
    let end = next_month_start - Duration::days(1);

    Ok((start, end))
}

/// Returns the current date in the operating timezone.
///
/// Calculation entry points accept `today` as an explicit parameter; this
/// function exists for the API boundary so all call sites derive "today"
/// the same way.
pub fn today() -> NaiveDate {
    (Utc::now() + Duration::hours(OPERATING_UTC_OFFSET_HOURS)).date_naive()
}

/// Clamps a date so it is never later than `today`.
pub fn clamp_to_today(date: NaiveDate, today: NaiveDate) -> NaiveDate {
    if date > today { today } else { date }
}

/// Returns the signed number of days from `a` to `b`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Combines a date with a wall-clock time string in `HH:MM` format.
///
/// Schedule entries store start and end times as `HH:MM` strings; this is
/// the single place they are parsed into instants.
///
/// # Example
///
/// ```
/// use payroll_engine::calendar::combine_date_time;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let instant = combine_date_time(date, "09:30").unwrap();
/// assert_eq!(instant.to_string(), "2026-01-15 09:30:00");
/// ```
pub fn combine_date_time(date: NaiveDate, time: &str) -> EngineResult<NaiveDateTime> {
    let parsed =
        NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| EngineError::InvalidArgument {
            message: format!("time must be in HH:MM format, got '{}'", time),
        })?;
    Ok(date.and_time(parsed))
}

/// Iterates every calendar day from `start` through `end`, inclusive.
///
/// Yields nothing when `start` is after `end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let mut current = start;
    std::iter::from_fn(move || {
        if current > end {
            None
        } else {
            let next = current;
            current += Duration::days(1);
            Some(next)
        }
    })
}

//! Per-day attendance status resolution.
//!
//! This module provides the canonical state machine that classifies one
//! calendar day for one staff member. Every consumer surface resolves
//! days through this function, so grace handling and precedence can never
//! diverge between them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::config::AttendancePolicy;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, LeaveRequest, ScheduleEntry};

/// The classified status of one day, terminal per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// The date is strictly after today; nothing is recorded yet.
    Upcoming,
    /// An approved leave request covers the date.
    Leave,
    /// Checked in on time (or worked an unscheduled day).
    Present,
    /// Checked in after the scheduled start plus grace.
    Late,
    /// Scheduled to work, no check-in, and the day has passed.
    Absent,
    /// Not scheduled to work and did not work.
    Off,
}

/// The result of resolving one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayResolution {
    /// The classified status.
    pub status: DayStatus,
    /// Minutes late, measured from the scheduled start with ceiling
    /// rounding. Zero unless the status is [`DayStatus::Late`].
    pub late_minutes: i64,
}

impl DayResolution {
    fn of(status: DayStatus) -> Self {
        Self {
            status,
            late_minutes: 0,
        }
    }
}

/// Classifies one day's schedule, attendance, and leave facts.
///
/// Evaluation order, first match wins:
/// 1. `Upcoming` when the date is strictly after `today`.
/// 2. `Leave` when an approved leave request covers the date, regardless
///    of schedule or attendance.
/// 3. On a scheduled work day: `Late`/`Present` when a check-in exists
///    (late iff `check_in > scheduled_start + grace`), `Absent` otherwise.
/// 4. Otherwise `Off`, unless a check-in exists, in which case the staff
///    member worked an off day and is `Present`.
///
/// Lateness is never recorded for future dates, and a check-in exactly at
/// the scheduled start is `Present`.
pub fn resolve_day(
    schedule: Option<&ScheduleEntry>,
    attendance: Option<&AttendanceRecord>,
    leave: Option<&LeaveRequest>,
    date: NaiveDate,
    today: NaiveDate,
    policy: &AttendancePolicy,
) -> EngineResult<DayResolution> {
    if date > today {
        return Ok(DayResolution::of(DayStatus::Upcoming));
    }

    if leave.is_some_and(|request| request.covers(date)) {
        return Ok(DayResolution::of(DayStatus::Leave));
    }

    let checked_in = attendance.is_some_and(AttendanceRecord::has_check_in);

    if let Some(entry) = schedule.filter(|entry| entry.is_work_day()) {
        if !checked_in {
            return Ok(DayResolution::of(DayStatus::Absent));
        }

        // A work entry without a start time cannot be assessed for
        // lateness; the check-in alone makes the day Present.
        let Some(start_time) = entry.start_time.as_deref() else {
            return Ok(DayResolution::of(DayStatus::Present));
        };
        let scheduled_start = calendar::combine_date_time(date, start_time)?;

        let check_in = attendance
            .and_then(|record| record.check_in)
            .unwrap_or(scheduled_start);

        let late_seconds = (check_in - scheduled_start).num_seconds();
        if late_seconds > policy.late_grace_minutes * 60 {
            // Any started minute counts as a whole late minute.
            return Ok(DayResolution {
                status: DayStatus::Late,
                late_minutes: (late_seconds + 59) / 60,
            });
        }
        return Ok(DayResolution::of(DayStatus::Present));
    }

    if checked_in {
        // Worked a day that was not rostered.
        return Ok(DayResolution::of(DayStatus::Present));
    }

    Ok(DayResolution::of(DayStatus::Off))
}

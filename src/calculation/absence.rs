//! Unexcused-absence detection shared by the payroll, advance, and
//! estimate surfaces.
//!
//! A day is an unexcused absence for deduction purposes when it was
//! scheduled as work, has passed, was not attended, is not covered by
//! approved leave, and is not a public holiday. The holiday exclusion is
//! what separates this count from the dashboard's raw absence tally.

use chrono::NaiveDate;

use crate::calendar;
use crate::config::CompanyConfig;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, LeaveRequest, ScheduleEntry, approved_leave_on};

use super::status_resolver::{DayStatus, resolve_day};

/// Finds the schedule entry for a date, if one exists.
pub(crate) fn schedule_on(schedules: &[ScheduleEntry], date: NaiveDate) -> Option<&ScheduleEntry> {
    schedules.iter().find(|entry| entry.date == date)
}

/// Finds the attendance record for a date, if one exists.
pub(crate) fn attendance_on(
    attendance: &[AttendanceRecord],
    date: NaiveDate,
) -> Option<&AttendanceRecord> {
    attendance.iter().find(|record| record.date == date)
}

/// Counts unexcused absence days for pay deduction over an inclusive
/// date range.
///
/// Only days strictly before `today` can count; public holidays never
/// count even when rostered as work.
pub fn unexcused_absence_days(
    schedules: &[ScheduleEntry],
    attendance: &[AttendanceRecord],
    leaves: &[LeaveRequest],
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
    config: &CompanyConfig,
) -> EngineResult<u32> {
    let mut count = 0;
    for date in calendar::date_range(start, calendar::clamp_to_today(end, today)) {
        if date >= today || config.is_public_holiday(date) {
            continue;
        }
        let resolution = resolve_day(
            schedule_on(schedules, date),
            attendance_on(attendance, date),
            approved_leave_on(leaves, date),
            date,
            today,
            &config.policy,
        )?;
        if resolution.status == DayStatus::Absent {
            count += 1;
        }
    }
    Ok(count)
}

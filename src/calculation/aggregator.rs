//! Monthly attendance aggregation.
//!
//! This module iterates a pay period day by day through the status
//! resolver and accumulates the worked time, lateness, absence, and
//! schedule figures every downstream surface consumes. Given identical
//! inputs and the same `today`, aggregation is pure and idempotent.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, PayPeriod};
use crate::config::AttendancePolicy;
use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, LeaveRequest, LeaveStatus, LeaveType, PayType, ScheduleEntry,
    approved_leave_on,
};

use super::absence::{attendance_on, schedule_on};
use super::status_resolver::{DayResolution, DayStatus, resolve_day};

/// The resolution of a single day within a monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// The calendar date.
    pub date: NaiveDate,
    /// The resolved status for the day.
    pub status: DayStatus,
    /// Minutes late, zero unless the status is `Late`.
    pub late_minutes: i64,
}

/// Aggregate attendance statistics for one staff member and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// The aggregated pay period.
    pub period: PayPeriod,
    /// Minutes actually worked, net of breaks.
    pub worked_minutes: i64,
    /// Minutes rostered on work schedule entries, net of breaks.
    pub scheduled_minutes: i64,
    /// Number of late arrivals.
    pub late_count: u32,
    /// Total minutes of lateness across the period.
    pub late_minutes_total: i64,
    /// Absent days strictly before today (holiday-naive raw count).
    pub unexcused_absences: u32,
    /// Minutes left early, summed over days with an early check-out.
    pub early_departure_minutes: i64,
    /// Days with a check-in, finalized or not.
    pub worked_days: u32,
    /// Per-day resolutions for the elapsed portion of the period.
    pub days: Vec<DaySummary>,
}

/// The record inputs for one staff member's aggregation.
#[derive(Debug, Clone, Copy)]
pub struct AggregationInputs<'a> {
    /// The pay period to aggregate.
    pub period: PayPeriod,
    /// How the staff member is paid; governs the default-break rule.
    pub pay_type: PayType,
    /// Schedule entries overlapping the period.
    pub schedules: &'a [ScheduleEntry],
    /// Attendance records overlapping the period.
    pub attendance: &'a [AttendanceRecord],
    /// Approved leave requests overlapping the period.
    pub leaves: &'a [LeaveRequest],
    /// The reference "today" in the operating timezone.
    pub today: NaiveDate,
}

/// Aggregates one pay period for one staff member.
///
/// Iterates every calendar day from the period start through
/// `min(today, period end)` inclusive, resolving each through
/// [`resolve_day`] and accumulating:
///
/// - `worked_minutes`: check-out minus check-in per attended day, minus
///   the explicitly recorded break, or minus the fixed default break for
///   salaried staff when no break timestamps exist. A past day missing
///   its check-out is synthesized at the policy's default end-of-day so
///   the month can still be summarized.
/// - `scheduled_minutes`: from work schedule entries, same break rule.
/// - lateness, absence, early-departure, and worked-day counts.
pub fn aggregate(
    inputs: &AggregationInputs<'_>,
    policy: &AttendancePolicy,
) -> EngineResult<MonthlyStats> {
    let period = inputs.period;
    let elapsed_end = period.elapsed_end(inputs.today);

    let mut stats = MonthlyStats {
        period,
        worked_minutes: 0,
        scheduled_minutes: 0,
        late_count: 0,
        late_minutes_total: 0,
        unexcused_absences: 0,
        early_departure_minutes: 0,
        worked_days: 0,
        days: Vec::new(),
    };

    for date in calendar::date_range(period.start, elapsed_end) {
        let schedule = schedule_on(inputs.schedules, date);
        let attendance = attendance_on(inputs.attendance, date);
        let leave = approved_leave_on(inputs.leaves, date);

        let resolution: DayResolution =
            resolve_day(schedule, attendance, leave, date, inputs.today, policy)?;

        match resolution.status {
            DayStatus::Late => {
                stats.late_count += 1;
                stats.late_minutes_total += resolution.late_minutes;
            }
            DayStatus::Absent if date < inputs.today => {
                stats.unexcused_absences += 1;
            }
            _ => {}
        }

        if let Some(record) = attendance.filter(|record| record.has_check_in()) {
            stats.worked_days += 1;
            stats.worked_minutes +=
                worked_minutes_for_day(record, date, inputs.today, inputs.pay_type, policy)?;
        }

        if let Some(entry) = schedule.filter(|entry| entry.is_work_day()) {
            stats.scheduled_minutes += scheduled_minutes_for_day(entry, inputs.pay_type, policy)?;

            if let (Some(end_time), Some(check_out)) = (
                entry.end_time.as_deref(),
                attendance.and_then(|record| record.check_out),
            ) {
                let scheduled_end = calendar::combine_date_time(date, end_time)?;
                let early = (scheduled_end - check_out).num_minutes();
                if early > 0 {
                    stats.early_departure_minutes += early;
                }
            }
        }

        stats.days.push(DaySummary {
            date,
            status: resolution.status,
            late_minutes: resolution.late_minutes,
        });
    }

    Ok(stats)
}

/// Net worked minutes for one attended day.
fn worked_minutes_for_day(
    record: &AttendanceRecord,
    date: NaiveDate,
    today: NaiveDate,
    pay_type: PayType,
    policy: &AttendancePolicy,
) -> EngineResult<i64> {
    let Some(check_in) = record.check_in else {
        return Ok(0);
    };

    let check_out = match record.check_out {
        Some(out) => out,
        // Still on the clock today; past days get a synthesized
        // check-out so the month can be summarized.
        None if date >= today => return Ok(0),
        None => calendar::combine_date_time(date, &policy.synthesized_checkout_time)?,
    };

    let gross = (check_out - check_in).num_minutes();
    let break_minutes = break_minutes_for(record.explicit_break_minutes(), pay_type, policy);

    Ok((gross - break_minutes).max(0))
}

/// Net scheduled minutes for one work schedule entry.
fn scheduled_minutes_for_day(
    entry: &ScheduleEntry,
    pay_type: PayType,
    policy: &AttendancePolicy,
) -> EngineResult<i64> {
    let (Some(start), Some(end)) = (entry.start_time.as_deref(), entry.end_time.as_deref()) else {
        return Ok(0);
    };
    let start = calendar::combine_date_time(entry.date, start)?;
    let end = calendar::combine_date_time(entry.date, end)?;

    let gross = (end - start).num_minutes();
    let break_minutes = break_minutes_for(None, pay_type, policy);

    Ok((gross - break_minutes).max(0))
}

/// The break minutes to subtract: the explicit break when recorded,
/// otherwise the fixed default for salaried staff.
fn break_minutes_for(
    explicit: Option<i64>,
    pay_type: PayType,
    policy: &AttendancePolicy,
) -> i64 {
    match (explicit, pay_type) {
        (Some(minutes), _) => minutes,
        (None, PayType::Salaried) => policy.default_break_minutes,
        (None, PayType::Hourly) => 0,
    }
}

/// Counts approved sick-leave days consumed this calendar year strictly
/// before the period starts, seeding the rolling yearly quota.
pub fn sick_days_before_month(leaves: &[LeaveRequest], period_start: NaiveDate) -> u32 {
    leaves
        .iter()
        .filter(|leave| leave.leave_type == LeaveType::Sick && leave.status == LeaveStatus::Approved)
        .flat_map(|leave| leave.days())
        .filter(|day| day.year() == period_start.year() && *day < period_start)
        .count() as u32
}

//! Attendance-bonus streak evaluation.
//!
//! The bonus streak counts consecutive qualifying months and drives a
//! tiered monthly bonus. The streak counter itself lives on the staff
//! profile and is only mutated when a payroll run is finalized; this
//! module is the single place the transition (and its inputs) is
//! decided.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::PayPeriod;
use crate::config::{AttendanceBonusConfig, CompanyConfig};
use crate::models::{LeaveRequest, LeaveStatus, LeaveType};

use super::aggregator::MonthlyStats;

/// Minimum leave length (in days) at which sick leave requires a medical
/// certificate for the days to merely disqualify without also deducting.
const LONG_SICK_LEAVE_DAYS: u32 = 3;

/// The outcome of evaluating the attendance bonus for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusDecision {
    /// True when the month qualifies and the streak advances.
    pub qualified: bool,
    /// The streak before this month's decision.
    pub prior_streak: u32,
    /// The streak after this month's decision.
    pub new_streak: u32,
    /// The bonus amount for the month (zero when not qualified).
    pub amount: Decimal,
    /// Sick-leave days that count as absence-equivalents for deduction.
    pub sick_days_deducted: u32,
    /// Total days the payroll generator deducts: unexcused absences plus
    /// deducted sick days.
    pub days_to_deduct: u32,
    /// Human-readable reasons for disqualification, empty when qualified.
    pub reasons: Vec<String>,
}

/// Returns the tiered bonus amount for a given streak value.
///
/// Streak 1 pays `month1`, streak 2 pays `month2`, and every streak of 3
/// or more pays `month3` (flat after the third qualifying month).
pub fn bonus_amount_for_streak(streak: u32, rules: &AttendanceBonusConfig) -> Decimal {
    match streak {
        0 => Decimal::ZERO,
        1 => rules.month1,
        2 => rules.month2,
        _ => rules.month3,
    }
}

/// Evaluates the attendance bonus for one staff member and month.
///
/// Disqualification triggers, any one sufficient:
/// - more lates than `allowed_lates`,
/// - more total late minutes than `max_late_minutes_allowed`,
/// - more unexcused absences than `allowed_absences`,
/// - any sick-leave day that violates the quota or certificate rules
///   (see [`walk_sick_days`]).
///
/// Ineligible staff never lose a streak they never accrue: the streak is
/// carried through unchanged with a zero amount.
pub fn evaluate_bonus(
    stats: &MonthlyStats,
    sick_leaves: &[LeaveRequest],
    sick_days_before_month: u32,
    eligible: bool,
    current_streak: u32,
    config: &CompanyConfig,
) -> BonusDecision {
    let rules = &config.attendance_bonus;
    let mut reasons = Vec::new();

    if stats.late_count > rules.allowed_lates {
        reasons.push(format!(
            "{} late arrivals exceed the allowed {}",
            stats.late_count, rules.allowed_lates
        ));
    }
    if stats.late_minutes_total > rules.max_late_minutes_allowed {
        reasons.push(format!(
            "{} late minutes exceed the allowed {}",
            stats.late_minutes_total, rules.max_late_minutes_allowed
        ));
    }
    if stats.unexcused_absences > rules.allowed_absences {
        reasons.push(format!(
            "{} unexcused absences exceed the allowed {}",
            stats.unexcused_absences, rules.allowed_absences
        ));
    }

    let sick = walk_sick_days(
        sick_leaves,
        stats.period,
        sick_days_before_month,
        config.sick_day_quota,
    );
    reasons.extend(sick.reasons);

    let disqualified = !reasons.is_empty();
    let days_to_deduct = stats.unexcused_absences + sick.days_deducted;

    if !eligible {
        return BonusDecision {
            qualified: false,
            prior_streak: current_streak,
            new_streak: current_streak,
            amount: Decimal::ZERO,
            sick_days_deducted: sick.days_deducted,
            days_to_deduct,
            reasons: vec!["staff member is not enrolled in the attendance bonus".to_string()],
        };
    }

    if disqualified {
        return BonusDecision {
            qualified: false,
            prior_streak: current_streak,
            new_streak: 0,
            amount: Decimal::ZERO,
            sick_days_deducted: sick.days_deducted,
            days_to_deduct,
            reasons,
        };
    }

    let new_streak = current_streak + 1;
    BonusDecision {
        qualified: true,
        prior_streak: current_streak,
        new_streak,
        amount: bonus_amount_for_streak(new_streak, rules),
        sick_days_deducted: sick.days_deducted,
        days_to_deduct,
        reasons: Vec::new(),
    }
}

struct SickWalkOutcome {
    days_deducted: u32,
    reasons: Vec<String>,
}

/// Walks this month's approved sick-leave days in chronological order
/// against the rolling yearly quota.
///
/// A running counter is seeded at the days already consumed this year
/// before the month. For each day, in order:
/// - a day that pushes the counter past the quota is deducted as an
///   absence-equivalent and disqualifies;
/// - a day within a leave of [`LONG_SICK_LEAVE_DAYS`] or more without a
///   medical certificate is deducted and disqualifies;
/// - a day within a shorter leave without a certificate disqualifies but
///   is not deducted.
fn walk_sick_days(
    sick_leaves: &[LeaveRequest],
    period: PayPeriod,
    sick_days_before_month: u32,
    quota: u32,
) -> SickWalkOutcome {
    let mut days: Vec<(NaiveDate, &LeaveRequest)> = sick_leaves
        .iter()
        .filter(|leave| {
            leave.leave_type == LeaveType::Sick && leave.status == LeaveStatus::Approved
        })
        .flat_map(|leave| leave.days().map(move |day| (day, leave)))
        .filter(|(day, _)| period.contains(*day))
        .collect();
    days.sort_by_key(|(day, _)| *day);

    let mut counter = sick_days_before_month;
    let mut days_deducted = 0;
    let mut over_quota = 0;
    let mut uncertified_long = 0;
    let mut uncertified_short = 0;

    for (_, leave) in days {
        counter += 1;
        if counter > quota {
            days_deducted += 1;
            over_quota += 1;
        } else if !leave.mc_received && leave.total_days >= LONG_SICK_LEAVE_DAYS {
            days_deducted += 1;
            uncertified_long += 1;
        } else if !leave.mc_received {
            uncertified_short += 1;
        }
    }

    let mut reasons = Vec::new();
    if over_quota > 0 {
        reasons.push(format!(
            "{} sick days exceed the yearly quota of {}",
            over_quota, quota
        ));
    }
    if uncertified_long > 0 {
        reasons.push(format!(
            "{} sick days in a long leave without a medical certificate",
            uncertified_long
        ));
    }
    if uncertified_short > 0 {
        reasons.push(format!(
            "{} sick days without a medical certificate",
            uncertified_short
        ));
    }

    SickWalkOutcome {
        days_deducted,
        reasons,
    }
}

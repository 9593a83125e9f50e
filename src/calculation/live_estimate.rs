//! Mid-month live pay estimate.
//!
//! Projects what a staff member has earned so far in the current pay
//! period. The estimate reuses the payroll building blocks on
//! month-to-date data; missing optional inputs degrade to zeros rather
//! than errors so a dashboard can always render something.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CompanyConfig;
use crate::error::EngineResult;
use crate::models::{DeductionsBreakdown, EarningsBreakdown, PayType};

use super::aggregator::{AggregationInputs, aggregate, sick_days_before_month};
use super::bonus_streak::{BonusDecision, evaluate_bonus};
use super::payroll_run::{PayrollContext, compute_payslip, daily_rate_from_salary};
use super::statutory::sso_contribution;

/// A point-in-time projection of the month's pay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayEstimate {
    /// The staff member's identifier.
    pub staff_id: String,
    /// The date the projection was computed through.
    pub as_of: NaiveDate,
    /// The staff member's pay type.
    pub pay_type: PayType,
    /// Earnings accrued so far, prorated for salaried staff.
    pub earnings: EarningsBreakdown,
    /// Deductions accrued so far.
    pub deductions: DeductionsBreakdown,
    /// Projected net pay as of the estimate date.
    pub estimated_net: Decimal,
    /// Whether the month is still on track for the attendance bonus, and
    /// what it would pay if the rest of the month stays clean.
    pub bonus_on_track: bool,
    /// The projected bonus amount if the month qualifies.
    pub projected_bonus: Decimal,
    /// Minutes worked so far this month.
    pub worked_minutes: i64,
}

/// Projects the month-to-date pay for one staff member.
///
/// Salaried base is prorated by elapsed calendar days; everything else
/// comes from the same calculations payroll uses, run over the records
/// available so far. The full-month payslip is computed first and the
/// salaried base then scaled back, so the deduction stack matches what
/// finalization would produce for the same data.
pub fn live_estimate(
    ctx: &PayrollContext<'_>,
    config: &CompanyConfig,
) -> EngineResult<PayEstimate> {
    let mut payslip = compute_payslip(ctx, config, Uuid::nil())?;

    let elapsed = ctx.period.elapsed_end(ctx.today);
    if payslip.pay_type == PayType::Salaried && ctx.period.contains(ctx.today) {
        // Scale the base back to days elapsed; the separation path
        // already pays a partial month and is left alone.
        if ctx
            .profile
            .separation_date
            .filter(|d| ctx.period.contains(*d))
            .is_none()
        {
            let job = ctx
                .profile
                .current_job_as_of(ctx.period.end)
                .map(|job| job.rate)
                .unwrap_or(Decimal::ZERO);
            payslip.earnings.base_pay =
                (daily_rate_from_salary(job, ctx.period) * Decimal::from(elapsed.day())).round_dp(2);

            // Rebase the statutory line on the prorated earnings.
            let sso = sso_contribution(
                payslip.earnings.base_pay
                    + payslip.earnings.overtime
                    + payslip.earnings.attendance_bonus,
                config,
            );
            payslip.deductions.sso_contribution = sso.amount;
            payslip.earnings.sso_allowance = sso.amount;
        }
    }
    payslip.net_pay = payslip.computed_net();

    let bonus = projected_bonus(ctx, config)?;
    let stats = aggregate(
        &AggregationInputs {
            period: ctx.period,
            pay_type: payslip.pay_type,
            schedules: ctx.schedules,
            attendance: ctx.attendance,
            leaves: ctx.leaves_year,
            today: ctx.today,
        },
        &config.policy,
    )?;

    Ok(PayEstimate {
        staff_id: ctx.profile.id.clone(),
        as_of: elapsed,
        pay_type: payslip.pay_type,
        earnings: payslip.earnings,
        deductions: payslip.deductions,
        estimated_net: payslip.net_pay,
        bonus_on_track: bonus.qualified,
        projected_bonus: bonus.amount,
        worked_minutes: stats.worked_minutes,
    })
}

fn projected_bonus(
    ctx: &PayrollContext<'_>,
    config: &CompanyConfig,
) -> EngineResult<BonusDecision> {
    let pay_type = ctx
        .profile
        .current_job_as_of(ctx.period.end)
        .map(|job| job.pay_type)
        .unwrap_or(PayType::Salaried);
    let stats = aggregate(
        &AggregationInputs {
            period: ctx.period,
            pay_type,
            schedules: ctx.schedules,
            attendance: ctx.attendance,
            leaves: ctx.leaves_year,
            today: ctx.today,
        },
        &config.policy,
    )?;
    Ok(evaluate_bonus(
        &stats,
        ctx.leaves_year,
        sick_days_before_month(ctx.leaves_year, ctx.period.start),
        ctx.profile.is_attendance_bonus_eligible && pay_type == PayType::Salaried,
        ctx.profile.bonus_streak,
        config,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::PayPeriod;
    use crate::config::{AttendanceBonusConfig, AttendancePolicy};
    use crate::models::{
        AttendanceRecord, JobRecord, OvertimeStatus, ScheduleEntry, ScheduleKind, StaffProfile,
    };
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> CompanyConfig {
        CompanyConfig {
            public_holidays: Vec::new(),
            attendance_bonus: AttendanceBonusConfig {
                allowed_lates: 2,
                max_late_minutes_allowed: 30,
                allowed_absences: 0,
                month1: dec("500"),
                month2: dec("750"),
                month3: dec("1000"),
            },
            sso_rate: dec("0.05"),
            sso_floor: dec("1650"),
            sso_cap: dec("15000"),
            advance_eligibility_percentage: dec("30"),
            annual_leave_days: dec("12"),
            sick_day_quota: 30,
            public_holiday_credit_cap: 13,
            overtime_rate_multiplier: dec("1.5"),
            payroll_cutover_date: date("2025-01-01"),
            policy: AttendancePolicy::default(),
        }
    }

    fn profile(pay_type: PayType, rate: &str) -> StaffProfile {
        StaffProfile {
            id: "staff_001".to_string(),
            name: "Anucha S.".to_string(),
            hire_date: date("2023-02-01"),
            separation_date: None,
            job_history: vec![JobRecord {
                position: "Accountant".to_string(),
                department: "Finance".to_string(),
                effective_from: date("2023-02-01"),
                pay_type,
                rate: dec(rate),
            }],
            bonus_streak: 2,
            is_attendance_bonus_eligible: true,
        }
    }

    fn ctx<'a>(
        profile: &'a StaffProfile,
        schedules: &'a [ScheduleEntry],
        attendance: &'a [AttendanceRecord],
        today: &str,
    ) -> PayrollContext<'a> {
        PayrollContext {
            profile,
            period: PayPeriod::new(2026, 6).unwrap(),
            today: date(today),
            schedules,
            attendance,
            leaves_year: &[],
            advances: &[],
            loans: &[],
            adjustments: &[],
            holiday_credits_earned: 0,
        }
    }

    /// LE-001: salaried base prorates by elapsed calendar days
    #[test]
    fn test_salaried_base_prorates() {
        let staff = profile(PayType::Salaried, "30000");
        let context = ctx(&staff, &[], &[], "2026-06-10");
        let estimate = live_estimate(&context, &config()).unwrap();

        // 10 days elapsed of 30 at 1000/day.
        assert_eq!(estimate.earnings.base_pay, dec("10000.00"));
        assert_eq!(estimate.as_of, date("2026-06-10"));
    }

    /// LE-002: a clean partial month is still on track for the bonus
    #[test]
    fn test_bonus_on_track() {
        let staff = profile(PayType::Salaried, "30000");
        let context = ctx(&staff, &[], &[], "2026-06-10");
        let estimate = live_estimate(&context, &config()).unwrap();

        assert!(estimate.bonus_on_track);
        assert_eq!(estimate.projected_bonus, dec("1000"));
    }

    /// LE-003: hourly estimate is worked minutes at the rate
    #[test]
    fn test_hourly_estimate() {
        let staff = profile(PayType::Hourly, "100");
        let schedules = vec![ScheduleEntry {
            staff_id: "staff_001".to_string(),
            date: date("2026-06-05"),
            kind: ScheduleKind::Work,
            start_time: Some("09:00".to_string()),
            end_time: Some("18:00".to_string()),
            notes: None,
        }];
        let attendance = vec![AttendanceRecord {
            staff_id: "staff_001".to_string(),
            date: date("2026-06-05"),
            check_in: Some(datetime("2026-06-05 09:00")),
            check_out: Some(datetime("2026-06-05 12:00")),
            break_start: None,
            break_end: None,
            overtime_status: OvertimeStatus::None,
            overtime_approved_minutes: 0,
        }];
        let context = ctx(&staff, &schedules, &attendance, "2026-06-10");
        let estimate = live_estimate(&context, &config()).unwrap();

        assert_eq!(estimate.worked_minutes, 180);
        assert_eq!(estimate.earnings.base_pay, dec("300.00"));
        assert!(!estimate.bonus_on_track);
    }

    /// LE-004: no records at all still yields a usable estimate
    #[test]
    fn test_empty_inputs_degrade_to_zero() {
        let staff = profile(PayType::Hourly, "100");
        let context = ctx(&staff, &[], &[], "2026-06-10");
        let estimate = live_estimate(&context, &config()).unwrap();

        assert_eq!(estimate.earnings.base_pay, Decimal::ZERO);
        assert_eq!(estimate.worked_minutes, 0);
        assert_eq!(estimate.estimated_net, Decimal::ZERO);
    }

    /// LE-005: proration uses the period's calendar days as the divisor
    #[test]
    fn test_proration_divides_by_calendar_days() {
        let staff = profile(PayType::Salaried, "31000");
        let mut context = ctx(&staff, &[], &[], "2026-01-10");
        context.period = PayPeriod::new(2026, 1).unwrap();
        let estimate = live_estimate(&context, &config()).unwrap();

        // 31-day January at 31000: 10 days elapsed at 1000/day.
        assert_eq!(estimate.earnings.base_pay, dec("10000.00"));
    }
}

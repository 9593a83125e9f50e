//! Payslip generation for a pay period.
//!
//! This module turns one staff member's month of records into a payslip:
//! eligibility gating, the salaried and hourly earning paths, separation
//! handling, and the deduction stack. Roster-level orchestration (run
//! ids, persistence, per-row error isolation) lives in the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::PayPeriod;
use crate::config::CompanyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, BonusInfo, DeductionsBreakdown, EarningsBreakdown, JobRecord, LeaveRequest,
    LeaveType, Loan, MonthlyAdjustment, PayType, Payslip, SalaryAdvance, ScheduleEntry,
    StaffProfile, total_adjustments, total_approved_advances, total_loan_repayments,
};
use crate::models::AdjustmentKind;
use chrono::{Datelike, NaiveDate};

use super::absence::unexcused_absence_days;
use super::aggregator::{AggregationInputs, aggregate, sick_days_before_month};
use super::bonus_streak::evaluate_bonus;
use super::leave_payout::leave_payout;
use super::overtime::{approved_overtime_minutes, overtime_pay};
use super::statutory::sso_contribution;

/// Everything needed to compute one staff member's payslip for a period.
///
/// The borrowed slices are pre-filtered to the staff member but not to
/// the period; leave history in particular must span the whole calendar
/// year so sick-quota and payout accounting see prior months.
#[derive(Debug)]
pub struct PayrollContext<'a> {
    /// The staff member being paid.
    pub profile: &'a StaffProfile,
    /// The pay period.
    pub period: PayPeriod,
    /// The operating-timezone date the run is executed on.
    pub today: NaiveDate,
    /// Schedule entries covering the period.
    pub schedules: &'a [ScheduleEntry],
    /// Attendance records covering the period.
    pub attendance: &'a [AttendanceRecord],
    /// Leave requests for the whole calendar year.
    pub leaves_year: &'a [LeaveRequest],
    /// The staff member's salary advances; the totals helpers select
    /// the ones against this period.
    pub advances: &'a [SalaryAdvance],
    /// The staff member's loans.
    pub loans: &'a [Loan],
    /// The staff member's one-off adjustments, filtered to the period
    /// when summed.
    pub adjustments: &'a [MonthlyAdjustment],
    /// Public-holiday credits banked year-to-date, used only on
    /// separation payout.
    pub holiday_credits_earned: u32,
}

/// The result of a payroll run over a roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunOutcome {
    /// Correlates every payslip produced by this run.
    pub run_id: Uuid,
    /// The pay period the run covers.
    pub period: PayPeriod,
    /// Successfully computed payslips.
    pub payslips: Vec<Payslip>,
    /// Staff skipped with the reason (not yet hired, already separated).
    pub skipped: Vec<SkippedStaff>,
    /// Staff whose computation failed, with the error message.
    pub errors: Vec<FailedStaff>,
}

/// A roster member excluded from a run before computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedStaff {
    /// The staff member's identifier.
    pub staff_id: String,
    /// Why they were skipped.
    pub reason: String,
}

/// A roster member whose payslip computation failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedStaff {
    /// The staff member's identifier.
    pub staff_id: String,
    /// The error that stopped the computation.
    pub error: String,
}

/// Validates that a payslip may be generated for this staff member and
/// period.
///
/// Rejects periods that have not started yet, periods before the payroll
/// cutover date, staff hired after the period ends, and staff who
/// separated before it begins.
pub fn check_eligibility(
    profile: &StaffProfile,
    period: PayPeriod,
    today: NaiveDate,
    config: &CompanyConfig,
) -> EngineResult<()> {
    if period.is_future(today) {
        return Err(EngineError::FuturePeriod {
            year: period.year,
            month: period.month,
        });
    }
    if period.end < config.payroll_cutover_date {
        return Err(EngineError::PreCutoverPeriod {
            year: period.year,
            month: period.month,
        });
    }
    if profile.hire_date > period.end {
        return Err(EngineError::NotEligible {
            staff_id: profile.id.clone(),
            reason: "hired after the pay period ends".to_string(),
        });
    }
    if let Some(separation) = profile.separation_date {
        if separation < period.start {
            return Err(EngineError::NotEligible {
                staff_id: profile.id.clone(),
                reason: "separated before the pay period begins".to_string(),
            });
        }
    }
    Ok(())
}

/// The daily rate derived from a monthly salary: the salary spread over
/// the period's calendar days. The fixed 30-day divisor is used only
/// for the overtime hourly equivalent.
pub fn daily_rate_from_salary(salary: Decimal, period: PayPeriod) -> Decimal {
    salary / Decimal::from(period.days_in_month())
}

/// Computes one payslip.
///
/// The caller is expected to have run [`check_eligibility`] already; it
/// is re-checked here so the function is safe to call directly.
pub fn compute_payslip(
    ctx: &PayrollContext<'_>,
    config: &CompanyConfig,
    run_id: Uuid,
) -> EngineResult<Payslip> {
    check_eligibility(ctx.profile, ctx.period, ctx.today, config)?;

    let job = lookup_job(ctx.profile, ctx.period)?;
    let stats = aggregate(
        &AggregationInputs {
            period: ctx.period,
            pay_type: job.pay_type,
            schedules: ctx.schedules,
            attendance: ctx.attendance,
            leaves: ctx.leaves_year,
            today: ctx.today,
        },
        &config.policy,
    )?;

    let mut payslip = match job.pay_type {
        PayType::Salaried => salaried_payslip(ctx, config, job, &stats)?,
        PayType::Hourly => hourly_payslip(ctx, config, job, &stats),
    };

    let other_earnings =
        total_adjustments(ctx.adjustments, ctx.period.year, ctx.period.month, AdjustmentKind::Earning);
    let other_deductions = total_adjustments(
        ctx.adjustments,
        ctx.period.year,
        ctx.period.month,
        AdjustmentKind::Deduction,
    );
    payslip.earnings.other_earnings = other_earnings.round_dp(2);
    payslip.deductions.other_deductions = other_deductions.round_dp(2);
    payslip.deductions.advances =
        total_approved_advances(ctx.advances, ctx.period.year, ctx.period.month).round_dp(2);
    payslip.deductions.loan_repayments = total_loan_repayments(ctx.loans).round_dp(2);

    payslip.run_id = run_id;
    payslip.days_worked = stats.worked_days;
    payslip.net_pay = payslip.computed_net();
    Ok(payslip)
}

fn lookup_job<'a>(profile: &'a StaffProfile, period: PayPeriod) -> EngineResult<&'a JobRecord> {
    let as_of = profile
        .separation_date
        .filter(|separation| *separation < period.end)
        .unwrap_or(period.end);
    profile
        .current_job_as_of(as_of)
        .ok_or_else(|| EngineError::JobRecordNotFound {
            staff_id: profile.id.clone(),
            date: as_of,
        })
}

fn salaried_payslip(
    ctx: &PayrollContext<'_>,
    config: &CompanyConfig,
    job: &JobRecord,
    stats: &super::aggregator::MonthlyStats,
) -> EngineResult<Payslip> {
    let salary = job.rate;
    let daily_rate = daily_rate_from_salary(salary, ctx.period);
    let separation = ctx
        .profile
        .separation_date
        .filter(|d| ctx.period.contains(*d));

    let sick_before = sick_days_before_month(ctx.leaves_year, ctx.period.start);
    let bonus_decision = evaluate_bonus(
        stats,
        ctx.leaves_year,
        sick_before,
        ctx.profile.is_attendance_bonus_eligible,
        ctx.profile.bonus_streak,
        config,
    );

    let mut earnings = EarningsBreakdown::default();
    let mut deductions = DeductionsBreakdown::default();
    let bonus;

    if let Some(separation_date) = separation {
        // Final month: pay the days up to separation, skip the bonus and
        // absence deduction, and pay out unused leave.
        earnings.base_pay = (daily_rate * Decimal::from(separation_date.day())).round_dp(2);
        bonus = BonusInfo {
            prior_streak: ctx.profile.bonus_streak,
            new_streak: ctx.profile.bonus_streak,
            amount: Decimal::ZERO,
        };

        let used_annual = annual_leave_days_used(ctx.leaves_year, separation_date);
        let payout = leave_payout(
            ctx.profile.hire_date,
            separation_date,
            used_annual,
            ctx.holiday_credits_earned,
            daily_rate,
            config,
        );
        earnings.leave_payout = payout.amount;
    } else {
        earnings.base_pay = salary.round_dp(2);
        earnings.attendance_bonus = bonus_decision.amount;
        bonus = BonusInfo {
            prior_streak: bonus_decision.prior_streak,
            new_streak: bonus_decision.new_streak,
            amount: bonus_decision.amount,
        };

        let unexcused = unexcused_absence_days(
            ctx.schedules,
            ctx.attendance,
            ctx.leaves_year,
            ctx.period.start,
            ctx.period.end,
            ctx.today,
            config,
        )?;
        let deduct_days = unexcused + bonus_decision.sick_days_deducted;
        deductions.absence_deduction = (daily_rate * Decimal::from(deduct_days)).round_dp(2);
    }

    let ot_minutes = approved_overtime_minutes(ctx.attendance);
    earnings.overtime = overtime_pay(salary, ot_minutes, config);

    let sso_basis = earnings.base_pay + earnings.overtime + earnings.attendance_bonus;
    let sso = sso_contribution(sso_basis, config);
    deductions.sso_contribution = sso.amount;
    earnings.sso_allowance = sso.amount;

    Ok(base_payslip(ctx, job.pay_type, earnings, deductions, bonus))
}

fn hourly_payslip(
    ctx: &PayrollContext<'_>,
    config: &CompanyConfig,
    job: &JobRecord,
    stats: &super::aggregator::MonthlyStats,
) -> Payslip {
    let hours = Decimal::from(stats.worked_minutes) / Decimal::from(60);
    let mut earnings = EarningsBreakdown::default();
    earnings.base_pay = (hours * job.rate).round_dp(2);

    // Hourly staff have no bonus, no overtime line, and no absence
    // deduction: unworked time is simply unpaid. The statutory
    // contribution applies to earned wages only.
    let bonus = BonusInfo {
        prior_streak: ctx.profile.bonus_streak,
        new_streak: ctx.profile.bonus_streak,
        amount: Decimal::ZERO,
    };

    let mut deductions = DeductionsBreakdown::default();
    let sso = sso_contribution(earnings.base_pay, config);
    deductions.sso_contribution = sso.amount;
    earnings.sso_allowance = sso.amount;

    base_payslip(ctx, job.pay_type, earnings, deductions, bonus)
}

fn base_payslip(
    ctx: &PayrollContext<'_>,
    pay_type: PayType,
    earnings: EarningsBreakdown,
    deductions: DeductionsBreakdown,
    bonus: BonusInfo,
) -> Payslip {
    Payslip {
        key: Payslip::key_for(&ctx.profile.id, ctx.period.year, ctx.period.month),
        run_id: Uuid::nil(),
        staff_id: ctx.profile.id.clone(),
        year: ctx.period.year,
        month: ctx.period.month,
        pay_type,
        earnings,
        deductions,
        net_pay: Decimal::ZERO,
        bonus,
        days_worked: 0,
        generated_at: chrono::Utc::now(),
    }
}

/// Approved annual-leave days taken in the separation year, up to and
/// including the separation date.
fn annual_leave_days_used(leaves: &[LeaveRequest], separation_date: NaiveDate) -> Decimal {
    let year = separation_date.year();
    let count = leaves
        .iter()
        .filter(|leave| {
            leave.leave_type == LeaveType::Annual
                && leave.status == crate::models::LeaveStatus::Approved
        })
        .flat_map(|leave| leave.days())
        .filter(|day| day.year() == year && *day <= separation_date)
        .count();
    Decimal::from(count as u32)
}

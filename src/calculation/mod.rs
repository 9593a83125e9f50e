//! Calculation logic for the attendance and payroll engine.
//!
//! This module contains all the pure calculation functions: per-day
//! attendance status resolution, monthly aggregation, unexcused-absence
//! counting, attendance-bonus streak evaluation, overtime pay, the
//! statutory social-security contribution, separation leave payout,
//! payslip generation, salary-advance eligibility, and the mid-month
//! live pay estimate.

mod absence;
mod advance;
mod aggregator;
mod bonus_streak;
mod leave_payout;
mod live_estimate;
mod overtime;
mod payroll_run;
mod statutory;
mod status_resolver;

pub use absence::unexcused_absence_days;
pub use advance::{AdvanceEligibility, advance_eligibility};
pub use aggregator::{
    AggregationInputs, DaySummary, MonthlyStats, aggregate, sick_days_before_month,
};
pub use bonus_streak::{BonusDecision, bonus_amount_for_streak, evaluate_bonus};
pub use leave_payout::{LeavePayout, leave_payout};
pub use live_estimate::{PayEstimate, live_estimate};
pub use overtime::{approved_overtime_minutes, hourly_rate_from_salary, overtime_pay};
pub use payroll_run::{
    FailedStaff, PayrollContext, PayrollRunOutcome, SkippedStaff, check_eligibility,
    compute_payslip, daily_rate_from_salary,
};
pub use statutory::{SsoContribution, sso_contribution};
pub use status_resolver::{DayResolution, DayStatus, resolve_day};

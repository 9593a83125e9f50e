//! Salary-advance eligibility.
//!
//! Advances are computed against the salary earned so far this month,
//! net of unexcused absences, at a configured percentage, minus any
//! advances already approved against the same period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::PayPeriod;
use crate::config::CompanyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, LeaveRequest, PayType, SalaryAdvance, ScheduleEntry, StaffProfile,
    total_approved_advances,
};

use super::absence::unexcused_absence_days;
use super::payroll_run::daily_rate_from_salary;

/// The advance ceiling for one staff member and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceEligibility {
    /// The staff member's identifier.
    pub staff_id: String,
    /// Monthly salary net of month-to-date unexcused absences.
    pub current_salary_due: Decimal,
    /// The configured percentage of the due salary, floored to a whole
    /// amount.
    pub max_theoretical: Decimal,
    /// Advances already approved against this period.
    pub already_taken: Decimal,
    /// What can still be advanced: `max(0, max_theoretical - taken)`.
    pub available: Decimal,
}

/// Computes how much a staff member may take as a salary advance.
///
/// Only salaried staff are eligible; hourly staff have no fixed salary
/// to draw against and the call fails with
/// [`EngineError::HourlyNotEligible`].
pub fn advance_eligibility(
    profile: &StaffProfile,
    period: PayPeriod,
    today: NaiveDate,
    schedules: &[ScheduleEntry],
    attendance: &[AttendanceRecord],
    leaves: &[LeaveRequest],
    advances: &[SalaryAdvance],
    config: &CompanyConfig,
) -> EngineResult<AdvanceEligibility> {
    let job = profile
        .current_job_as_of(period.end)
        .ok_or_else(|| EngineError::JobRecordNotFound {
            staff_id: profile.id.clone(),
            date: period.end,
        })?;
    if job.pay_type == PayType::Hourly {
        return Err(EngineError::HourlyNotEligible {
            staff_id: profile.id.clone(),
            operation: "salary advance".to_string(),
        });
    }

    let salary = job.rate;
    let absences = unexcused_absence_days(
        schedules,
        attendance,
        leaves,
        period.start,
        period.end,
        today,
        config,
    )?;
    let current_salary_due =
        (salary - daily_rate_from_salary(salary, period) * Decimal::from(absences)).max(Decimal::ZERO);

    let max_theoretical =
        (current_salary_due * config.advance_eligibility_percentage / Decimal::from(100)).floor();
    let already_taken = total_approved_advances(advances, period.year, period.month);
    let available = (max_theoretical - already_taken).max(Decimal::ZERO);

    Ok(AdvanceEligibility {
        staff_id: profile.id.clone(),
        current_salary_due,
        max_theoretical,
        already_taken,
        available,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AttendanceBonusConfig, AttendancePolicy};
    use crate::models::{AdvanceStatus, JobRecord, ScheduleKind};
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
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
            bonus_streak: 0,
            is_attendance_bonus_eligible: true,
        }
    }

    /// AD-001: a clean month makes the configured percentage available
    #[test]
    fn test_clean_month_full_percentage() {
        let result = advance_eligibility(
            &profile(PayType::Salaried, "30000"),
            PayPeriod::new(2026, 1).unwrap(),
            date("2026-01-20"),
            &[],
            &[],
            &[],
            &[],
            &config(),
        )
        .unwrap();
        assert_eq!(result.current_salary_due, dec("30000"));
        assert_eq!(result.max_theoretical, dec("9000"));
        assert_eq!(result.available, dec("9000"));
    }

    /// AD-002: unexcused absences shrink the due salary before the cut
    #[test]
    fn test_absences_reduce_ceiling() {
        let schedules = vec![ScheduleEntry {
            staff_id: "staff_001".to_string(),
            date: date("2026-06-05"),
            kind: ScheduleKind::Work,
            start_time: Some("09:00".to_string()),
            end_time: Some("18:00".to_string()),
            notes: None,
        }];
        let result = advance_eligibility(
            &profile(PayType::Salaried, "30000"),
            PayPeriod::new(2026, 6).unwrap(),
            date("2026-06-20"),
            &schedules,
            &[],
            &[],
            &[],
            &config(),
        )
        .unwrap();
        // One absence in a 30-day month at 1000/day: due 29000, 30%
        // floored = 8700.
        assert_eq!(result.current_salary_due, dec("29000"));
        assert_eq!(result.max_theoretical, dec("8700"));
    }

    /// AD-006: the absence deduction divides by the period's calendar
    /// days
    #[test]
    fn test_daily_rate_follows_calendar_days() {
        let schedules = vec![ScheduleEntry {
            staff_id: "staff_001".to_string(),
            date: date("2026-01-05"),
            kind: ScheduleKind::Work,
            start_time: Some("09:00".to_string()),
            end_time: Some("18:00".to_string()),
            notes: None,
        }];
        let result = advance_eligibility(
            &profile(PayType::Salaried, "31000"),
            PayPeriod::new(2026, 1).unwrap(),
            date("2026-01-20"),
            &schedules,
            &[],
            &[],
            &[],
            &config(),
        )
        .unwrap();
        // 31-day January at 31000: one absence costs exactly 1000.
        assert_eq!(result.current_salary_due, dec("30000"));
        assert_eq!(result.max_theoretical, dec("9000"));
    }

    /// AD-003: advances already taken this period reduce availability
    #[test]
    fn test_taken_advances_reduce_availability() {
        let advances = vec![SalaryAdvance {
            staff_id: "staff_001".to_string(),
            amount: dec("4000"),
            period_year: 2026,
            period_month: 1,
            status: AdvanceStatus::Approved,
        }];
        let result = advance_eligibility(
            &profile(PayType::Salaried, "30000"),
            PayPeriod::new(2026, 1).unwrap(),
            date("2026-01-20"),
            &[],
            &[],
            &[],
            &advances,
            &config(),
        )
        .unwrap();
        assert_eq!(result.already_taken, dec("4000"));
        assert_eq!(result.available, dec("5000"));
    }

    /// AD-004: taking more than the ceiling floors availability at zero
    #[test]
    fn test_availability_floors_at_zero() {
        let advances = vec![SalaryAdvance {
            staff_id: "staff_001".to_string(),
            amount: dec("12000"),
            period_year: 2026,
            period_month: 1,
            status: AdvanceStatus::Approved,
        }];
        let result = advance_eligibility(
            &profile(PayType::Salaried, "30000"),
            PayPeriod::new(2026, 1).unwrap(),
            date("2026-01-20"),
            &[],
            &[],
            &[],
            &advances,
            &config(),
        )
        .unwrap();
        assert_eq!(result.available, Decimal::ZERO);
    }

    /// AD-005: hourly staff cannot take advances
    #[test]
    fn test_hourly_staff_rejected() {
        let err = advance_eligibility(
            &profile(PayType::Hourly, "100"),
            PayPeriod::new(2026, 1).unwrap(),
            date("2026-01-20"),
            &[],
            &[],
            &[],
            &[],
            &config(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::HourlyNotEligible { .. }));
    }
}

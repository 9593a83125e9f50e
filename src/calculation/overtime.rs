//! Overtime pay for salaried staff.
//!
//! Overtime is paid only for minutes with an approved overtime request.
//! The hourly base is derived from the monthly salary using the
//! configured divisor days and standard day length, then multiplied by
//! the overtime rate.

use rust_decimal::Decimal;

use crate::config::CompanyConfig;
use crate::models::AttendanceRecord;

/// Derives the plain hourly rate from a monthly salary.
///
/// `salary / overtime_base_days / standard_day_hours`, unrounded so the
/// multiplication stays precise; rounding happens at the pay line.
pub fn hourly_rate_from_salary(salary: Decimal, config: &CompanyConfig) -> Decimal {
    let daily = salary / Decimal::from(config.policy.overtime_base_days);
    daily / Decimal::from(config.policy.standard_day_hours)
}

/// Sums approved overtime minutes across the month's attendance records.
pub fn approved_overtime_minutes(attendance: &[AttendanceRecord]) -> i64 {
    attendance
        .iter()
        .map(|record| record.payable_overtime_minutes())
        .sum()
}

/// Computes the overtime pay line for the month, rounded to 2 decimals.
pub fn overtime_pay(salary: Decimal, minutes: i64, config: &CompanyConfig) -> Decimal {
    if minutes <= 0 {
        return Decimal::ZERO;
    }
    let hours = Decimal::from(minutes) / Decimal::from(60);
    let rate = hourly_rate_from_salary(salary, config);
    (hours * rate * config.overtime_rate_multiplier).round_dp(2)
}

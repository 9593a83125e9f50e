//! Unused-leave payout on separation.
//!
//! When a staff member separates, remaining annual leave plus banked
//! public-holiday credits are paid out at the daily rate on the final
//! payslip.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CompanyConfig;

/// The leave payout computed for a separating staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePayout {
    /// Annual-leave days entitled for the separation year, prorated when
    /// the staff member was also hired that year.
    pub entitled_days: Decimal,
    /// Approved annual-leave days already taken in the separation year.
    pub used_days: Decimal,
    /// Public-holiday credits paid out, capped by configuration.
    pub credit_days: Decimal,
    /// Total payable days: `max(0, entitled - used) + credits`.
    pub payout_days: Decimal,
    /// The payout amount at the daily rate, rounded to 2 decimals.
    pub amount: Decimal,
}

/// Computes the separation leave payout.
///
/// Entitlement is the full yearly allowance unless the hire date falls
/// in the same year as the separation, in which case it is prorated by
/// whole months of employment (hire month through separation month,
/// inclusive). Used days can exceed the entitlement; the shortfall is
/// never clawed back, it just zeroes the annual component.
pub fn leave_payout(
    hire_date: NaiveDate,
    separation_date: NaiveDate,
    used_annual_days: Decimal,
    holiday_credits_earned: u32,
    daily_rate: Decimal,
    config: &CompanyConfig,
) -> LeavePayout {
    let entitled_days = if hire_date.year() == separation_date.year() {
        // Saturate so inconsistent dates (hire after separation) yield
        // a single month instead of underflowing.
        let months =
            Decimal::from(separation_date.month().saturating_sub(hire_date.month()) + 1);
        (config.annual_leave_days * months / Decimal::from(12)).round_dp(2)
    } else {
        config.annual_leave_days
    };

    let remaining = (entitled_days - used_annual_days).max(Decimal::ZERO);
    let credit_days = Decimal::from(holiday_credits_earned.min(config.public_holiday_credit_cap));
    let payout_days = remaining + credit_days;

    LeavePayout {
        entitled_days,
        used_days: used_annual_days,
        credit_days,
        payout_days,
        amount: (payout_days * daily_rate).round_dp(2),
    }
}

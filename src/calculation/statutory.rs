//! Statutory social-security contribution.
//!
//! The contribution basis is the month's gross earnings clamped to a
//! configured floor and cap, and the employer mirrors the deducted
//! amount back as a net-neutral allowance line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CompanyConfig;

/// A computed social-security contribution for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsoContribution {
    /// The clamped wage basis the rate is applied to.
    pub basis: Decimal,
    /// The contribution amount, rounded to 2 decimals.
    pub amount: Decimal,
}

/// Computes the contribution on a gross monthly wage.
///
/// The wage is clamped into `[sso_floor, sso_cap]` before the rate is
/// applied. A non-positive wage yields a zero contribution rather than
/// the floor minimum, since there is nothing to deduct from.
pub fn sso_contribution(gross_wage: Decimal, config: &CompanyConfig) -> SsoContribution {
    if gross_wage <= Decimal::ZERO {
        return SsoContribution {
            basis: Decimal::ZERO,
            amount: Decimal::ZERO,
        };
    }
    let basis = gross_wage.clamp(config.sso_floor, config.sso_cap);
    SsoContribution {
        basis,
        amount: (basis * config.sso_rate).round_dp(2),
    }
}

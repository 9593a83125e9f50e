//! Payslip models.
//!
//! The [`Payslip`] is the terminal artifact of a payroll run, keyed by
//! `(staff_id, year, month)`. It is immutable once finalized; deleting it
//! must restore the staff member's prior bonus streak, which is why
//! [`BonusInfo`] records the streak value both before and after the run.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::PayType;

/// Itemized earnings on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    /// Base salary (salaried, possibly prorated) or summed hourly pay.
    pub base_pay: Decimal,
    /// Attendance bonus for the period.
    pub attendance_bonus: Decimal,
    /// Approved overtime pay.
    pub overtime: Decimal,
    /// Cash value of unused leave paid out on separation.
    pub leave_payout: Decimal,
    /// Statutory contribution mirrored as an allowance (net-neutral,
    /// kept for payslip transparency).
    pub sso_allowance: Decimal,
    /// Sum of manual earning adjustments.
    pub other_earnings: Decimal,
}

impl EarningsBreakdown {
    /// Total of all earning lines.
    pub fn total(&self) -> Decimal {
        self.base_pay
            + self.attendance_bonus
            + self.overtime
            + self.leave_payout
            + self.sso_allowance
            + self.other_earnings
    }
}

/// Itemized deductions on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeductionsBreakdown {
    /// Pay withheld for unexcused absence days.
    pub absence_deduction: Decimal,
    /// Statutory social-security contribution.
    pub sso_contribution: Decimal,
    /// Approved salary advances drawn this period.
    pub advances: Decimal,
    /// Monthly installments of active loans.
    pub loan_repayments: Decimal,
    /// Sum of manual deduction adjustments.
    pub other_deductions: Decimal,
}

impl DeductionsBreakdown {
    /// Total of all deduction lines.
    pub fn total(&self) -> Decimal {
        self.absence_deduction
            + self.sso_contribution
            + self.advances
            + self.loan_repayments
            + self.other_deductions
    }
}

/// The bonus-streak outcome recorded on a payslip.
///
/// `prior_streak` is the streak value before this run was finalized.
/// Storing it makes revert an exact inverse rather than an inference
/// from `new_streak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusInfo {
    /// The streak value before this payslip was finalized.
    pub prior_streak: u32,
    /// The streak value after this payslip was finalized.
    pub new_streak: u32,
    /// The bonus amount paid, zero when disqualified or ineligible.
    pub amount: Decimal,
}

/// A staff member's pay for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Storage key, `staffId_year_month`.
    pub key: String,
    /// Identifier of the payroll run batch this payslip was computed in.
    pub run_id: Uuid,
    /// The staff member paid.
    pub staff_id: String,
    /// Pay-period year.
    pub year: i32,
    /// Pay-period month.
    pub month: u32,
    /// How the staff member is paid.
    pub pay_type: PayType,
    /// Itemized earnings.
    pub earnings: EarningsBreakdown,
    /// Itemized deductions.
    pub deductions: DeductionsBreakdown,
    /// Earnings total minus deductions total. May be negative; the engine
    /// never clamps it.
    pub net_pay: Decimal,
    /// Bonus streak outcome, including the pre-run streak for revert.
    pub bonus: BonusInfo,
    /// Days the staff member actually worked this period.
    pub days_worked: u32,
    /// When the payslip was computed.
    pub generated_at: DateTime<Utc>,
}

impl Payslip {
    /// Builds the storage key for a staff member and period.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::Payslip;
    ///
    /// assert_eq!(Payslip::key_for("staff_001", 2026, 3), "staff_001_2026_3");
    /// ```
    pub fn key_for(staff_id: &str, year: i32, month: u32) -> String {
        format!("{}_{}_{}", staff_id, year, month)
    }

    /// Recomputes net pay from the breakdowns.
    pub fn computed_net(&self) -> Decimal {
        self.earnings.total() - self.deductions.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_payslip() -> Payslip {
        let earnings = EarningsBreakdown {
            base_pay: dec("30000"),
            attendance_bonus: dec("1000"),
            overtime: dec("250.00"),
            leave_payout: Decimal::ZERO,
            sso_allowance: dec("750"),
            other_earnings: dec("500"),
        };
        let deductions = DeductionsBreakdown {
            absence_deduction: dec("2000"),
            sso_contribution: dec("750"),
            advances: dec("5000"),
            loan_repayments: dec("1000"),
            other_deductions: Decimal::ZERO,
        };
        let net_pay = earnings.total() - deductions.total();
        Payslip {
            key: Payslip::key_for("staff_001", 2026, 1),
            run_id: Uuid::new_v4(),
            staff_id: "staff_001".to_string(),
            year: 2026,
            month: 1,
            pay_type: PayType::Salaried,
            earnings,
            deductions,
            net_pay,
            bonus: BonusInfo {
                prior_streak: 2,
                new_streak: 3,
                amount: dec("1000"),
            },
            days_worked: 24,
            generated_at: Utc::now(),
        }
    }

    /// PS-001: key format is staffId_year_month
    #[test]
    fn test_key_format() {
        assert_eq!(Payslip::key_for("staff_001", 2026, 12), "staff_001_2026_12");
        assert_eq!(Payslip::key_for("staff_001", 2026, 1), "staff_001_2026_1");
    }

    /// PS-002: net pay equals earnings total minus deductions total
    #[test]
    fn test_net_pay_matches_breakdowns() {
        let payslip = sample_payslip();
        assert_eq!(payslip.net_pay, payslip.computed_net());
        assert_eq!(payslip.net_pay, dec("23750.00"));
    }

    /// PS-003: sso allowance and contribution cancel in net pay
    #[test]
    fn test_sso_lines_are_net_neutral() {
        let mut payslip = sample_payslip();
        payslip.earnings.sso_allowance = Decimal::ZERO;
        payslip.deductions.sso_contribution = Decimal::ZERO;
        assert_eq!(payslip.computed_net(), sample_payslip().computed_net());
    }

    #[test]
    fn test_negative_net_is_representable() {
        let mut payslip = sample_payslip();
        payslip.deductions.advances = dec("40000");
        assert!(payslip.computed_net() < Decimal::ZERO);
    }

    #[test]
    fn test_payslip_serialization_round_trip() {
        let payslip = sample_payslip();
        let json = serde_json::to_string(&payslip).unwrap();
        let back: Payslip = serde_json::from_str(&json).unwrap();
        assert_eq!(payslip, back);
    }

    #[test]
    fn test_breakdown_defaults_are_zero() {
        let earnings = EarningsBreakdown::default();
        assert_eq!(earnings.total(), Decimal::ZERO);
        let deductions = DeductionsBreakdown::default();
        assert_eq!(deductions.total(), Decimal::ZERO);
    }
}

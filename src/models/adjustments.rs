//! Salary advances, loans, and manual payslip adjustments.
//!
//! These are flat records tagged by staff member and pay period (or an
//! active-loan flag). The engine only ever sums them; their lifecycle is
//! managed elsewhere.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Approval state of a salary advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceStatus {
    /// Awaiting approval; not yet deducted.
    Pending,
    /// Approved; deducted from the period's payslip.
    Approved,
    /// Rejected; never deducted.
    Rejected,
}

/// An early draw against the current period's salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryAdvance {
    /// The staff member who drew the advance.
    pub staff_id: String,
    /// The amount advanced.
    pub amount: Decimal,
    /// The pay-period year the advance is deducted in.
    pub period_year: i32,
    /// The pay-period month the advance is deducted in.
    pub period_month: u32,
    /// Approval state.
    pub status: AdvanceStatus,
}

/// A staff loan repaid in fixed monthly installments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// The staff member holding the loan.
    pub staff_id: String,
    /// The original principal.
    pub principal: Decimal,
    /// The installment deducted each month while the loan is active.
    pub monthly_repayment: Decimal,
    /// Whether installments are still being deducted.
    pub active: bool,
}

/// Whether a manual adjustment adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Added to earnings.
    Earning,
    /// Added to deductions.
    Deduction,
}

/// A one-off manual earning or deduction for a specific period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAdjustment {
    /// The staff member the adjustment applies to.
    pub staff_id: String,
    /// The pay-period year.
    pub period_year: i32,
    /// The pay-period month.
    pub period_month: u32,
    /// Whether the amount is an earning or a deduction.
    pub kind: AdjustmentKind,
    /// A short label shown on the payslip (e.g., "Referral bonus").
    pub label: String,
    /// The adjustment amount (always positive; `kind` carries the sign).
    pub amount: Decimal,
}

/// Sums approved advances taken against the given period.
///
/// The input slice need not be pre-filtered; advances against other
/// periods are ignored here.
pub fn total_approved_advances(
    advances: &[SalaryAdvance],
    period_year: i32,
    period_month: u32,
) -> Decimal {
    advances
        .iter()
        .filter(|advance| {
            advance.status == AdvanceStatus::Approved
                && advance.period_year == period_year
                && advance.period_month == period_month
        })
        .map(|advance| advance.amount)
        .sum()
}

/// Sums monthly repayments across active loans.
pub fn total_loan_repayments(loans: &[Loan]) -> Decimal {
    loans
        .iter()
        .filter(|loan| loan.active)
        .map(|loan| loan.monthly_repayment)
        .sum()
}

/// Sums manual adjustments of the given kind for the given period.
pub fn total_adjustments(
    adjustments: &[MonthlyAdjustment],
    period_year: i32,
    period_month: u32,
    kind: AdjustmentKind,
) -> Decimal {
    adjustments
        .iter()
        .filter(|adjustment| {
            adjustment.kind == kind
                && adjustment.period_year == period_year
                && adjustment.period_month == period_month
        })
        .map(|adjustment| adjustment.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(amount: i64, status: AdvanceStatus) -> SalaryAdvance {
        SalaryAdvance {
            staff_id: "staff_001".to_string(),
            amount: Decimal::new(amount, 0),
            period_year: 2026,
            period_month: 1,
            status,
        }
    }

    #[test]
    fn test_only_approved_advances_are_summed() {
        let advances = vec![
            advance(1_000, AdvanceStatus::Approved),
            advance(2_000, AdvanceStatus::Pending),
            advance(4_000, AdvanceStatus::Approved),
            advance(8_000, AdvanceStatus::Rejected),
        ];
        assert_eq!(
            total_approved_advances(&advances, 2026, 1),
            Decimal::new(5_000, 0)
        );
    }

    #[test]
    fn test_advances_against_other_periods_are_excluded() {
        let mut december = advance(3_000, AdvanceStatus::Approved);
        december.period_year = 2025;
        december.period_month = 12;
        let advances = vec![december, advance(1_000, AdvanceStatus::Approved)];
        assert_eq!(
            total_approved_advances(&advances, 2026, 1),
            Decimal::new(1_000, 0)
        );
    }

    #[test]
    fn test_only_active_loans_are_summed() {
        let loans = vec![
            Loan {
                staff_id: "staff_001".to_string(),
                principal: Decimal::new(12_000, 0),
                monthly_repayment: Decimal::new(1_000, 0),
                active: true,
            },
            Loan {
                staff_id: "staff_001".to_string(),
                principal: Decimal::new(6_000, 0),
                monthly_repayment: Decimal::new(500, 0),
                active: false,
            },
        ];
        assert_eq!(total_loan_repayments(&loans), Decimal::new(1_000, 0));
    }

    #[test]
    fn test_adjustments_split_by_kind() {
        let adjustments = vec![
            MonthlyAdjustment {
                staff_id: "staff_001".to_string(),
                period_year: 2026,
                period_month: 1,
                kind: AdjustmentKind::Earning,
                label: "Referral bonus".to_string(),
                amount: Decimal::new(500, 0),
            },
            MonthlyAdjustment {
                staff_id: "staff_001".to_string(),
                period_year: 2026,
                period_month: 1,
                kind: AdjustmentKind::Deduction,
                label: "Uniform replacement".to_string(),
                amount: Decimal::new(150, 0),
            },
        ];
        assert_eq!(
            total_adjustments(&adjustments, 2026, 1, AdjustmentKind::Earning),
            Decimal::new(500, 0)
        );
        assert_eq!(
            total_adjustments(&adjustments, 2026, 1, AdjustmentKind::Deduction),
            Decimal::new(150, 0)
        );
        // The same slice contributes nothing to a different period.
        assert_eq!(
            total_adjustments(&adjustments, 2026, 2, AdjustmentKind::Earning),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_empty_slices_sum_to_zero() {
        assert_eq!(total_approved_advances(&[], 2026, 1), Decimal::ZERO);
        assert_eq!(total_loan_repayments(&[]), Decimal::ZERO);
        assert_eq!(
            total_adjustments(&[], 2026, 1, AdjustmentKind::Earning),
            Decimal::ZERO
        );
    }
}

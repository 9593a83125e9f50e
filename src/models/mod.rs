//! Core data models for the payroll engine.
//!
//! This module contains all the domain records the engine reads and the
//! payslip artifact it writes.

mod adjustments;
mod leave;
mod payslip;
mod schedule;
mod staff;

pub use adjustments::{
    AdjustmentKind, AdvanceStatus, Loan, MonthlyAdjustment, SalaryAdvance, total_adjustments,
    total_approved_advances, total_loan_repayments,
};
pub use leave::{LeaveRequest, LeaveStatus, LeaveType, approved_leave_on};
pub use payslip::{BonusInfo, DeductionsBreakdown, EarningsBreakdown, Payslip};
pub use schedule::{AttendanceRecord, OvertimeStatus, ScheduleEntry, ScheduleKind};
pub use staff::{JobRecord, PayType, StaffProfile};

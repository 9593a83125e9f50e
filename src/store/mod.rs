//! Record storage behind the engine.
//!
//! The engine reads staff, schedule, attendance, leave and financial
//! records through the [`RecordStore`] trait and writes only on the
//! payroll finalize and revert paths. The shipped implementation is an
//! in-memory store; a database-backed implementation plugs in behind
//! the same trait.

mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, LeaveRequest, Loan, MonthlyAdjustment, Payslip, SalaryAdvance,
    ScheduleEntry, StaffProfile,
};

/// Read access to HR records plus the two atomic payroll write paths.
///
/// Range arguments are inclusive on both ends. Implementations must make
/// [`commit_run`](RecordStore::commit_run) and
/// [`revert_run`](RecordStore::revert_run) atomic: either every payslip
/// write and streak update in the batch lands, or none do.
pub trait RecordStore: Send + Sync {
    /// Fetches one staff profile by id.
    fn staff(&self, staff_id: &str) -> EngineResult<StaffProfile>;

    /// Lists every staff profile.
    fn all_staff(&self) -> EngineResult<Vec<StaffProfile>>;

    /// Schedule entries for a staff member within a date range.
    fn schedules(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<ScheduleEntry>>;

    /// Attendance records for a staff member within a date range.
    fn attendance(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Leave requests overlapping a date range, any status.
    fn leaves(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<LeaveRequest>>;

    /// Salary advances recorded against a pay period.
    fn advances(&self, staff_id: &str, year: i32, month: u32)
    -> EngineResult<Vec<SalaryAdvance>>;

    /// All loans held by a staff member.
    fn loans(&self, staff_id: &str) -> EngineResult<Vec<Loan>>;

    /// One-off adjustments recorded against a pay period.
    fn adjustments(
        &self,
        staff_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<MonthlyAdjustment>>;

    /// Fetches a finalized payslip by key, if present.
    fn payslip(&self, key: &str) -> EngineResult<Option<Payslip>>;

    /// All finalized payslips for a pay period.
    fn payslips_for_period(&self, year: i32, month: u32) -> EngineResult<Vec<Payslip>>;

    /// Persists a finalized run: writes every payslip and moves each
    /// staff member's bonus streak to the payslip's new value.
    ///
    /// Fails with `AlreadyFinalized` if any payslip key already exists,
    /// without writing anything.
    fn commit_run(&self, payslips: &[Payslip]) -> EngineResult<()>;

    /// Reverts finalized payslips by key: deletes them and restores each
    /// staff member's bonus streak to the payslip's prior value.
    ///
    /// Fails with `PayslipNotFound` if any key is missing, without
    /// deleting anything. Returns the removed payslips.
    fn revert_run(&self, keys: &[String]) -> EngineResult<Vec<Payslip>>;
}

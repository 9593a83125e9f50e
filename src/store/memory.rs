//! In-memory record store.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, LeaveRequest, Loan, MonthlyAdjustment, Payslip, SalaryAdvance,
    ScheduleEntry, StaffProfile,
};

use super::RecordStore;

#[derive(Debug, Default)]
struct Inner {
    staff: HashMap<String, StaffProfile>,
    schedules: Vec<ScheduleEntry>,
    attendance: Vec<AttendanceRecord>,
    leaves: Vec<LeaveRequest>,
    advances: Vec<SalaryAdvance>,
    loans: Vec<Loan>,
    adjustments: Vec<MonthlyAdjustment>,
    payslips: HashMap<String, Payslip>,
}

/// A [`RecordStore`] backed by `RwLock`-guarded maps.
///
/// Suitable for tests and single-process deployments. Commit and revert
/// take the write lock for the whole batch, which serializes payroll
/// writers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| EngineError::Internal {
            message: "record store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| EngineError::Internal {
            message: "record store lock poisoned".to_string(),
        })
    }

    /// Inserts or replaces a staff profile.
    pub fn put_staff(&self, profile: StaffProfile) -> EngineResult<()> {
        self.write()?.staff.insert(profile.id.clone(), profile);
        Ok(())
    }

    /// Adds a schedule entry.
    pub fn add_schedule(&self, entry: ScheduleEntry) -> EngineResult<()> {
        self.write()?.schedules.push(entry);
        Ok(())
    }

    /// Adds an attendance record.
    pub fn add_attendance(&self, record: AttendanceRecord) -> EngineResult<()> {
        self.write()?.attendance.push(record);
        Ok(())
    }

    /// Adds a leave request.
    pub fn add_leave(&self, leave: LeaveRequest) -> EngineResult<()> {
        self.write()?.leaves.push(leave);
        Ok(())
    }

    /// Adds a salary advance.
    pub fn add_advance(&self, advance: SalaryAdvance) -> EngineResult<()> {
        self.write()?.advances.push(advance);
        Ok(())
    }

    /// Adds a loan.
    pub fn add_loan(&self, loan: Loan) -> EngineResult<()> {
        self.write()?.loans.push(loan);
        Ok(())
    }

    /// Adds a one-off adjustment.
    pub fn add_adjustment(&self, adjustment: MonthlyAdjustment) -> EngineResult<()> {
        self.write()?.adjustments.push(adjustment);
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn staff(&self, staff_id: &str) -> EngineResult<StaffProfile> {
        self.read()?
            .staff
            .get(staff_id)
            .cloned()
            .ok_or_else(|| EngineError::StaffNotFound {
                staff_id: staff_id.to_string(),
            })
    }

    fn all_staff(&self) -> EngineResult<Vec<StaffProfile>> {
        let guard = self.read()?;
        let mut staff: Vec<StaffProfile> = guard.staff.values().cloned().collect();
        staff.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(staff)
    }

    fn schedules(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<ScheduleEntry>> {
        Ok(self
            .read()?
            .schedules
            .iter()
            .filter(|entry| {
                entry.staff_id == staff_id && entry.date >= start && entry.date <= end
            })
            .cloned()
            .collect())
    }

    fn attendance(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .read()?
            .attendance
            .iter()
            .filter(|record| {
                record.staff_id == staff_id && record.date >= start && record.date <= end
            })
            .cloned()
            .collect())
    }

    fn leaves(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self
            .read()?
            .leaves
            .iter()
            .filter(|leave| {
                leave.staff_id == staff_id
                    && leave.start_date <= end
                    && leave.end_date >= start
            })
            .cloned()
            .collect())
    }

    fn advances(
        &self,
        staff_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<SalaryAdvance>> {
        Ok(self
            .read()?
            .advances
            .iter()
            .filter(|advance| {
                advance.staff_id == staff_id
                    && advance.period_year == year
                    && advance.period_month == month
            })
            .cloned()
            .collect())
    }

    fn loans(&self, staff_id: &str) -> EngineResult<Vec<Loan>> {
        Ok(self
            .read()?
            .loans
            .iter()
            .filter(|loan| loan.staff_id == staff_id)
            .cloned()
            .collect())
    }

    fn adjustments(
        &self,
        staff_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<MonthlyAdjustment>> {
        Ok(self
            .read()?
            .adjustments
            .iter()
            .filter(|adjustment| {
                adjustment.staff_id == staff_id
                    && adjustment.period_year == year
                    && adjustment.period_month == month
            })
            .cloned()
            .collect())
    }

    fn payslip(&self, key: &str) -> EngineResult<Option<Payslip>> {
        Ok(self.read()?.payslips.get(key).cloned())
    }

    fn payslips_for_period(&self, year: i32, month: u32) -> EngineResult<Vec<Payslip>> {
        let guard = self.read()?;
        let mut payslips: Vec<Payslip> = guard
            .payslips
            .values()
            .filter(|payslip| payslip.year == year && payslip.month == month)
            .cloned()
            .collect();
        payslips.sort_by(|a, b| a.staff_id.cmp(&b.staff_id));
        Ok(payslips)
    }

    fn commit_run(&self, payslips: &[Payslip]) -> EngineResult<()> {
        let mut guard = self.write()?;

        // Validate the whole batch before touching anything.
        for payslip in payslips {
            if guard.payslips.contains_key(&payslip.key) {
                return Err(EngineError::AlreadyFinalized {
                    key: payslip.key.clone(),
                });
            }
        }

        for payslip in payslips {
            if let Some(profile) = guard.staff.get_mut(&payslip.staff_id) {
                profile.bonus_streak = payslip.bonus.new_streak;
            }
            guard.payslips.insert(payslip.key.clone(), payslip.clone());
        }
        Ok(())
    }

    fn revert_run(&self, keys: &[String]) -> EngineResult<Vec<Payslip>> {
        let mut guard = self.write()?;

        for key in keys {
            if !guard.payslips.contains_key(key) {
                return Err(EngineError::PayslipNotFound { key: key.clone() });
            }
        }

        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(payslip) = guard.payslips.remove(key) {
                if let Some(profile) = guard.staff.get_mut(&payslip.staff_id) {
                    profile.bonus_streak = payslip.bonus.prior_streak;
                }
                removed.push(payslip);
            }
        }
        Ok(removed)
    }
}

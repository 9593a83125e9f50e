//! Engine facade over the calculation modules and the record store.
//!
//! The engine assembles per-staff record context from a [`RecordStore`],
//! runs the pure calculations, and owns the finalize/revert write paths.
//! Every public operation takes the pay period explicitly and resolves
//! "today" once per call so a whole roster run sees one consistent date.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    AdvanceEligibility, BonusDecision, FailedStaff, MonthlyStats, PayEstimate, PayrollContext,
    PayrollRunOutcome, SkippedStaff, advance_eligibility, aggregate, check_eligibility,
    compute_payslip, evaluate_bonus, live_estimate, sick_days_before_month,
};
use crate::calculation::AggregationInputs;
use crate::calendar::{self, PayPeriod};
use crate::config::CompanyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, LeaveRequest, LeaveStatus, LeaveType, Loan, MonthlyAdjustment, PayType,
    Payslip, SalaryAdvance, ScheduleEntry, StaffProfile,
};
use crate::store::RecordStore;

/// The attendance and payroll engine.
///
/// Cheap to clone via the shared store handle; hold one per process and
/// share it across request handlers.
pub struct Engine {
    store: Arc<dyn RecordStore>,
    config: CompanyConfig,
    fixed_today: Option<NaiveDate>,
}

/// Owned record context fetched for one staff member and period.
struct StaffRecords {
    schedules: Vec<ScheduleEntry>,
    attendance: Vec<AttendanceRecord>,
    leaves_year: Vec<LeaveRequest>,
    advances: Vec<SalaryAdvance>,
    loans: Vec<Loan>,
    adjustments: Vec<MonthlyAdjustment>,
    holiday_credits_earned: u32,
}

impl Engine {
    /// Creates an engine over a store and company configuration.
    pub fn new(store: Arc<dyn RecordStore>, config: CompanyConfig) -> Self {
        Self {
            store,
            config,
            fixed_today: None,
        }
    }

    /// Pins "today" to a fixed date. Used by tests to make runs
    /// deterministic.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// The company configuration the engine runs with.
    pub fn config(&self) -> &CompanyConfig {
        &self.config
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(calendar::today)
    }

    /// Computes the monthly attendance summary for one staff member.
    pub fn monthly_summary(
        &self,
        staff_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<MonthlyStats> {
        let period = PayPeriod::new(year, month)?;
        let today = self.today();
        let profile = self.store.staff(staff_id)?;
        let pay_type = profile
            .current_job_as_of(period.end)
            .map(|job| job.pay_type)
            .unwrap_or(PayType::Salaried);
        let records = self.fetch_records(&profile, period, today)?;

        aggregate(
            &AggregationInputs {
                period,
                pay_type,
                schedules: &records.schedules,
                attendance: &records.attendance,
                leaves: &records.leaves_year,
                today,
            },
            &self.config.policy,
        )
    }

    /// Evaluates the attendance bonus for one staff member and month
    /// without persisting anything.
    pub fn evaluate_bonus(
        &self,
        staff_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<BonusDecision> {
        let period = PayPeriod::new(year, month)?;
        let today = self.today();
        let profile = self.store.staff(staff_id)?;
        let job = profile
            .current_job_as_of(period.end)
            .ok_or_else(|| EngineError::JobRecordNotFound {
                staff_id: profile.id.clone(),
                date: period.end,
            })?;
        if job.pay_type == PayType::Hourly {
            return Err(EngineError::HourlyNotEligible {
                staff_id: profile.id.clone(),
                operation: "attendance bonus".to_string(),
            });
        }

        let records = self.fetch_records(&profile, period, today)?;
        let stats = aggregate(
            &AggregationInputs {
                period,
                pay_type: job.pay_type,
                schedules: &records.schedules,
                attendance: &records.attendance,
                leaves: &records.leaves_year,
                today,
            },
            &self.config.policy,
        )?;

        Ok(evaluate_bonus(
            &stats,
            &records.leaves_year,
            sick_days_before_month(&records.leaves_year, period.start),
            profile.is_attendance_bonus_eligible,
            profile.bonus_streak,
            &self.config,
        ))
    }

    /// Computes payslips for a period without persisting them.
    ///
    /// With `staff_ids` empty the whole roster is run. Ineligible staff
    /// are skipped; computation errors are isolated per row.
    pub fn preview_run(
        &self,
        year: i32,
        month: u32,
        staff_ids: &[String],
    ) -> EngineResult<PayrollRunOutcome> {
        self.run_period(year, month, staff_ids)
    }

    /// Computes payslips for a period and commits them atomically.
    ///
    /// Committing writes every payslip and moves each staff member's
    /// bonus streak forward. Staff with a payslip already finalized for
    /// the period are skipped; the rest of the roster is still paid.
    pub fn finalize_run(
        &self,
        year: i32,
        month: u32,
        staff_ids: &[String],
    ) -> EngineResult<PayrollRunOutcome> {
        let outcome = self.run_period(year, month, staff_ids)?;
        self.store.commit_run(&outcome.payslips)?;
        info!(
            run_id = %outcome.run_id,
            year,
            month,
            payslips = outcome.payslips.len(),
            skipped = outcome.skipped.len(),
            errors = outcome.errors.len(),
            "payroll run finalized"
        );
        Ok(outcome)
    }

    /// Reverts finalized payslips by key, restoring bonus streaks to
    /// their value before the run.
    pub fn revert_run(&self, keys: &[String]) -> EngineResult<Vec<Payslip>> {
        if keys.is_empty() {
            return Err(EngineError::InvalidArgument {
                message: "revert requires at least one payslip key".to_string(),
            });
        }
        let removed = self.store.revert_run(keys)?;
        info!(reverted = removed.len(), "payroll run reverted");
        Ok(removed)
    }

    /// Computes the salary-advance ceiling for one staff member.
    pub fn advance_eligibility(
        &self,
        staff_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<AdvanceEligibility> {
        let period = PayPeriod::new(year, month)?;
        let today = self.today();
        let profile = self.store.staff(staff_id)?;
        let records = self.fetch_records(&profile, period, today)?;

        advance_eligibility(
            &profile,
            period,
            today,
            &records.schedules,
            &records.attendance,
            &records.leaves_year,
            &records.advances,
            &self.config,
        )
    }

    /// Projects the month-to-date pay for one staff member.
    pub fn live_estimate(
        &self,
        staff_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<PayEstimate> {
        let period = PayPeriod::new(year, month)?;
        let today = self.today();
        let profile = self.store.staff(staff_id)?;
        let records = self.fetch_records(&profile, period, today)?;

        live_estimate(
            &PayrollContext {
                profile: &profile,
                period,
                today,
                schedules: &records.schedules,
                attendance: &records.attendance,
                leaves_year: &records.leaves_year,
                advances: &records.advances,
                loans: &records.loans,
                adjustments: &records.adjustments,
                holiday_credits_earned: records.holiday_credits_earned,
            },
            &self.config,
        )
    }

    fn run_period(
        &self,
        year: i32,
        month: u32,
        staff_ids: &[String],
    ) -> EngineResult<PayrollRunOutcome> {
        let period = PayPeriod::new(year, month)?;
        let today = self.today();
        let run_id = Uuid::new_v4();

        let roster: Vec<StaffProfile> = if staff_ids.is_empty() {
            self.store.all_staff()?
        } else {
            staff_ids
                .iter()
                .map(|id| self.store.staff(id))
                .collect::<EngineResult<Vec<_>>>()?
        };

        let mut payslips = Vec::new();
        let mut skipped = Vec::new();
        let mut errors = Vec::new();

        for profile in &roster {
            // Roster membership gates go to skipped; the period-level
            // gates are real errors and fail the whole run up front.
            match check_eligibility(profile, period, today, &self.config) {
                Ok(()) => {}
                Err(err @ (EngineError::FuturePeriod { .. }
                | EngineError::PreCutoverPeriod { .. })) => return Err(err),
                Err(EngineError::NotEligible { reason, .. }) => {
                    skipped.push(SkippedStaff {
                        staff_id: profile.id.clone(),
                        reason,
                    });
                    continue;
                }
                Err(err) => {
                    errors.push(FailedStaff {
                        staff_id: profile.id.clone(),
                        error: err.to_string(),
                    });
                    continue;
                }
            }

            // Already-finalized staff are skipped so the rest of the
            // roster still runs; the store's batch check stays as a
            // race guard for concurrent finalizes.
            let key = Payslip::key_for(&profile.id, period.year, period.month);
            match self.store.payslip(&key) {
                Ok(Some(_)) => {
                    skipped.push(SkippedStaff {
                        staff_id: profile.id.clone(),
                        reason: "payslip already finalized for this period".to_string(),
                    });
                    continue;
                }
                Ok(None) => {}
                Err(err) => {
                    errors.push(FailedStaff {
                        staff_id: profile.id.clone(),
                        error: err.to_string(),
                    });
                    continue;
                }
            }

            let result = self
                .fetch_records(profile, period, today)
                .and_then(|records| {
                    compute_payslip(
                        &PayrollContext {
                            profile,
                            period,
                            today,
                            schedules: &records.schedules,
                            attendance: &records.attendance,
                            leaves_year: &records.leaves_year,
                            advances: &records.advances,
                            loans: &records.loans,
                            adjustments: &records.adjustments,
                            holiday_credits_earned: records.holiday_credits_earned,
                        },
                        &self.config,
                        run_id,
                    )
                });
            match result {
                Ok(payslip) => payslips.push(payslip),
                Err(err) => {
                    warn!(staff_id = %profile.id, error = %err, "payslip computation failed");
                    errors.push(FailedStaff {
                        staff_id: profile.id.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        Ok(PayrollRunOutcome {
            run_id,
            period,
            payslips,
            skipped,
            errors,
        })
    }

    /// Fetches all records needed to pay one staff member for a period.
    ///
    /// Schedule, attendance and leave reads are mandatory. The financial
    /// side records (advances, loans, adjustments) degrade to empty with
    /// a warning so one unavailable table cannot block a whole run.
    fn fetch_records(
        &self,
        profile: &StaffProfile,
        period: PayPeriod,
        today: NaiveDate,
    ) -> EngineResult<StaffRecords> {
        let year_start = NaiveDate::from_ymd_opt(period.year, 1, 1).ok_or_else(|| {
            EngineError::InvalidArgument {
                message: format!("invalid year {}", period.year),
            }
        })?;
        let year_end = NaiveDate::from_ymd_opt(period.year, 12, 31).ok_or_else(|| {
            EngineError::InvalidArgument {
                message: format!("invalid year {}", period.year),
            }
        })?;

        let schedules = self.store.schedules(&profile.id, period.start, period.end)?;
        let attendance = self.store.attendance(&profile.id, period.start, period.end)?;
        let leaves_year = self.store.leaves(&profile.id, year_start, year_end)?;

        let advances = self
            .store
            .advances(&profile.id, period.year, period.month)
            .unwrap_or_else(|err| {
                warn!(staff_id = %profile.id, error = %err, "advance lookup failed, assuming none");
                Vec::new()
            });
        let loans = self.store.loans(&profile.id).unwrap_or_else(|err| {
            warn!(staff_id = %profile.id, error = %err, "loan lookup failed, assuming none");
            Vec::new()
        });
        let adjustments = self
            .store
            .adjustments(&profile.id, period.year, period.month)
            .unwrap_or_else(|err| {
                warn!(staff_id = %profile.id, error = %err, "adjustment lookup failed, assuming none");
                Vec::new()
            });

        let holiday_credits_earned = if profile
            .separation_date
            .map(|d| period.contains(d))
            .unwrap_or(false)
        {
            let attendance_ytd = self.store.attendance(&profile.id, year_start, period.end)?;
            holiday_credits_earned(&attendance_ytd, &leaves_year, &self.config, today)
        } else {
            0
        };

        Ok(StaffRecords {
            schedules,
            attendance,
            leaves_year,
            advances,
            loans,
            adjustments,
            holiday_credits_earned,
        })
    }
}

/// Public-holiday credits banked year-to-date: days checked in on a
/// public holiday, minus in-lieu leave days already taken.
fn holiday_credits_earned(
    attendance: &[AttendanceRecord],
    leaves: &[LeaveRequest],
    config: &CompanyConfig,
    today: NaiveDate,
) -> u32 {
    let earned = attendance
        .iter()
        .filter(|record| {
            record.has_check_in()
                && record.date <= today
                && config.is_public_holiday(record.date)
        })
        .count() as u32;
    let used = leaves
        .iter()
        .filter(|leave| {
            leave.leave_type == LeaveType::PublicHolidayInLieu
                && leave.status == LeaveStatus::Approved
        })
        .flat_map(|leave| leave.days())
        .filter(|day| day.year() == today.year() && *day <= today)
        .count() as u32;
    earned.saturating_sub(used)
}

//! Staff profile and job history models.
//!
//! This module defines the [`StaffProfile`] struct with its embedded,
//! ordered [`JobRecord`] history and the [`PayType`] enum distinguishing
//! salaried from hourly staff.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a staff member's pay rate is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    /// A fixed monthly salary, prorated by day where applicable.
    Salaried,
    /// Paid per hour actually worked.
    Hourly,
}

/// A single entry in a staff member's job history.
///
/// The record with the latest `effective_from` on or before a reference
/// date is the "current job" as of that date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// The position title (e.g., "Barista", "Store Manager").
    pub position: String,
    /// The department the position belongs to.
    pub department: String,
    /// The date this job record takes effect.
    pub effective_from: NaiveDate,
    /// Whether the rate is a monthly salary or an hourly wage.
    pub pay_type: PayType,
    /// The monthly salary (salaried) or hourly wage (hourly).
    pub rate: Decimal,
}

/// A staff member subject to attendance and payroll calculation.
///
/// The job history is kept in insertion order and is never empty for an
/// active employee. `bonus_streak` is the persistent counter of
/// consecutive qualifying attendance-bonus months; it is mutated only by
/// payroll finalization and its exact inverse on revert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    /// Unique identifier for the staff member.
    pub id: String,
    /// The staff member's display name.
    pub name: String,
    /// The date the staff member was hired.
    pub hire_date: NaiveDate,
    /// The date employment ended, if the staff member has separated.
    #[serde(default)]
    pub separation_date: Option<NaiveDate>,
    /// Ordered history of job records (insertion order preserved).
    pub job_history: Vec<JobRecord>,
    /// Consecutive qualifying attendance-bonus months.
    #[serde(default)]
    pub bonus_streak: u32,
    /// Whether this staff member accrues the attendance bonus at all.
    #[serde(default = "default_bonus_eligible")]
    pub is_attendance_bonus_eligible: bool,
}

fn default_bonus_eligible() -> bool {
    true
}

impl StaffProfile {
    /// Returns the job record in effect on the given date.
    ///
    /// The current job is the record with the latest `effective_from` that
    /// is on or before `date`. Ties on `effective_from` are broken by
    /// insertion order, the later insertion winning.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{JobRecord, PayType, StaffProfile};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let profile = StaffProfile {
    ///     id: "staff_001".to_string(),
    ///     name: "Mina".to_string(),
    ///     hire_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    ///     separation_date: None,
    ///     job_history: vec![JobRecord {
    ///         position: "Barista".to_string(),
    ///         department: "Front of House".to_string(),
    ///         effective_from: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    ///         pay_type: PayType::Salaried,
    ///         rate: Decimal::new(30_000, 0),
    ///     }],
    ///     bonus_streak: 0,
    ///     is_attendance_bonus_eligible: true,
    /// };
    ///
    /// let job = profile
    ///     .current_job_as_of(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
    ///     .unwrap();
    /// assert_eq!(job.position, "Barista");
    /// ```
    pub fn current_job_as_of(&self, date: NaiveDate) -> Option<&JobRecord> {
        self.job_history
            .iter()
            .filter(|job| job.effective_from <= date)
            .max_by(|a, b| a.effective_from.cmp(&b.effective_from))
    }

    /// Returns true when the staff member is employed on the given date.
    pub fn is_active_as_of(&self, date: NaiveDate) -> bool {
        if self.hire_date > date {
            return false;
        }
        match self.separation_date {
            Some(separation) => separation >= date,
            None => true,
        }
    }

    /// Returns the separation date if it falls within the given inclusive
    /// date range.
    pub fn separation_within(&self, start: NaiveDate, end: NaiveDate) -> Option<NaiveDate> {
        self.separation_date
            .filter(|&date| date >= start && date <= end)
    }
}

//! Leave request model.
//!
//! A [`LeaveRequest`] spans one or more calendar days; only approved
//! requests feed the engine, and a request is expanded into per-day
//! lookups when resolving attendance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;

/// The category of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Paid annual leave, drawn from the yearly entitlement.
    Annual,
    /// Sick leave, subject to the yearly quota and medical-certificate
    /// rules.
    Sick,
    /// Personal business leave.
    Personal,
    /// Time off in lieu of working a public holiday.
    PublicHolidayInLieu,
    /// Unpaid leave.
    Unpaid,
}

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting manager decision.
    Pending,
    /// Approved; visible to the engine.
    Approved,
    /// Rejected; ignored by the engine.
    Rejected,
}

/// A request for one or more days of leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The staff member requesting leave.
    pub staff_id: String,
    /// The category of leave.
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Total calendar days covered by the request.
    pub total_days: u32,
    /// Approval state.
    pub status: LeaveStatus,
    /// Whether a medical certificate was received (sick leave only).
    #[serde(default)]
    pub mc_received: bool,
}

impl LeaveRequest {
    /// Returns true when this request is approved and covers the date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.status == LeaveStatus::Approved && date >= self.start_date && date <= self.end_date
    }

    /// Iterates every calendar day of the request, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        calendar::date_range(self.start_date, self.end_date)
    }
}

/// Finds the approved leave request covering a date, if any.
pub fn approved_leave_on(leaves: &[LeaveRequest], date: NaiveDate) -> Option<&LeaveRequest> {
    leaves.iter().find(|leave| leave.covers(date))
}

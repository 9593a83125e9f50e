//! Request types for the attendance and payroll engine API.

use serde::{Deserialize, Serialize};

/// Request body for the single-staff month endpoints: attendance
/// summary, bonus evaluation, advance eligibility and pay estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMonthRequest {
    /// The staff member's identifier.
    pub staff_id: String,
    /// The pay period year.
    pub year: i32,
    /// The pay period month (1-12).
    pub month: u32,
}

/// Request body for the payroll preview and finalize endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// The pay period year.
    pub year: i32,
    /// The pay period month (1-12).
    pub month: u32,
    /// Staff to include; empty runs the whole roster.
    #[serde(default)]
    pub staff_ids: Vec<String>,
}

/// Request body for the payroll revert endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevertRequest {
    /// Keys of the finalized payslips to revert.
    pub payslip_keys: Vec<String>,
}

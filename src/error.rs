//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during attendance and payroll
//! calculations.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/company.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/company.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A request argument was malformed or out of range.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// A description of what made the argument invalid.
        message: String,
    },

    /// No staff profile exists for the given identifier.
    #[error("Staff not found: {staff_id}")]
    StaffNotFound {
        /// The staff identifier that was not found.
        staff_id: String,
    },

    /// No payslip exists for the given key.
    #[error("Payslip not found: {key}")]
    PayslipNotFound {
        /// The payslip key (`staffId_year_month`) that was not found.
        key: String,
    },

    /// An active staff member has an empty job history.
    #[error("No job record for staff '{staff_id}' effective on {date}")]
    JobRecordNotFound {
        /// The staff identifier.
        staff_id: String,
        /// The reference date for which no job record applies.
        date: chrono::NaiveDate,
    },

    /// The requested pay period has not finished starting yet.
    #[error("Pay period {year}-{month:02} is in the future")]
    FuturePeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// The requested pay period precedes the payroll cutover date.
    #[error("Pay period {year}-{month:02} precedes the payroll cutover date")]
    PreCutoverPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// A payslip for this staff member and period is already finalized.
    #[error("Payslip already finalized: {key}")]
    AlreadyFinalized {
        /// The payslip key that is already finalized.
        key: String,
    },

    /// A staff member does not meet the payroll-run eligibility gate for
    /// the requested period.
    #[error("Staff '{staff_id}' is not eligible for this payroll run: {reason}")]
    NotEligible {
        /// The staff identifier.
        staff_id: String,
        /// Why the gate rejected the staff member.
        reason: String,
    },

    /// An hourly staff member requested an operation reserved for
    /// salaried staff.
    #[error("Staff '{staff_id}' is paid hourly and is not eligible for {operation}")]
    HourlyNotEligible {
        /// The staff identifier.
        staff_id: String,
        /// The operation that was requested (e.g., "salary advance").
        operation: String,
    },

    /// An unexpected fetch or compute failure occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

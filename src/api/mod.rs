//! HTTP API module for the attendance and payroll engine.
//!
//! This module exposes the engine operations as a JSON REST API: the
//! monthly attendance summary, bonus evaluation, payroll preview,
//! finalize and revert, advance eligibility, and the live pay estimate.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayrollRunRequest, RevertRequest, StaffMonthRequest};
pub use response::ApiError;
pub use state::AppState;

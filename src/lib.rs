//! Attendance and Payroll Calculation Engine.
//!
//! This crate provides the calculation core of an HR operations portal:
//! per-day attendance status resolution, monthly aggregation, the
//! attendance-bonus streak decision, payroll run generation (preview,
//! finalize, revert), advance-eligibility caps, and live mid-month pay
//! estimates. All consumer surfaces share one policy module and one
//! calendar service so their results cannot silently diverge.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;

//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load the company configuration
//! from YAML files: attendance-bonus rules, statutory contribution rates,
//! leave quotas, public holidays, and the shared attendance policy.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/company").unwrap();
//! println!("SSO rate: {}", loader.config().sso_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceBonusConfig, AttendancePolicy, CompanyConfig, HolidaysConfig, PublicHoliday,
};

//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed company configuration that is
//! deserialized from YAML configuration files. The configuration is a
//! read-only singleton from the engine's point of view.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Named attendance policy constants shared by every consumer surface.
///
/// These knobs used to be duplicated (and divergent) across the dashboard
/// summary, bonus calculator, and live estimator; they now live in one
/// place and are injected into every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendancePolicy {
    /// Minutes of lateness forgiven before a check-in counts as late.
    ///
    /// The canonical resolver historically used 0 while some surfaces
    /// used 5; the value is configurable pending a product decision.
    #[serde(default)]
    pub late_grace_minutes: i64,
    /// Break minutes subtracted for salaried staff when no explicit break
    /// timestamps exist.
    #[serde(default = "default_break_minutes")]
    pub default_break_minutes: i64,
    /// Wall-clock time (`HH:MM`) used to synthesize a missing check-out
    /// on a past day so the month can still be summarized.
    #[serde(default = "default_checkout_time")]
    pub synthesized_checkout_time: String,
    /// Hours in a standard working day, used for hourly-equivalent rates.
    #[serde(default = "default_day_hours")]
    pub standard_day_hours: u32,
    /// Fixed day count used to derive the hourly-equivalent rate from a
    /// monthly salary for overtime purposes.
    #[serde(default = "default_overtime_base_days")]
    pub overtime_base_days: u32,
}

fn default_break_minutes() -> i64 {
    60
}

fn default_checkout_time() -> String {
    "23:00".to_string()
}

fn default_day_hours() -> u32 {
    8
}

fn default_overtime_base_days() -> u32 {
    30
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            late_grace_minutes: 0,
            default_break_minutes: default_break_minutes(),
            synthesized_checkout_time: default_checkout_time(),
            standard_day_hours: default_day_hours(),
            overtime_base_days: default_overtime_base_days(),
        }
    }
}

/// Attendance-bonus qualification thresholds and tiered amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceBonusConfig {
    /// Maximum late arrivals before disqualification.
    pub allowed_lates: u32,
    /// Maximum total late minutes before disqualification.
    pub max_late_minutes_allowed: i64,
    /// Maximum unexcused absences before disqualification.
    pub allowed_absences: u32,
    /// Bonus for the first qualifying month of a streak.
    pub month1: Decimal,
    /// Bonus for the second consecutive qualifying month.
    pub month2: Decimal,
    /// Bonus for the third and every later consecutive qualifying month.
    pub month3: Decimal,
}

/// A public holiday observed by the company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The holiday's name (e.g., "Songkran").
    pub name: String,
}

/// Holidays configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// The observed public holidays.
    pub holidays: Vec<PublicHoliday>,
}

/// The company-wide configuration singleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyConfig {
    /// Public holidays observed by the company.
    #[serde(default)]
    pub public_holidays: Vec<PublicHoliday>,
    /// Attendance-bonus thresholds and amounts.
    pub attendance_bonus: AttendanceBonusConfig,
    /// Social-security contribution rate (e.g., `0.05` for 5%).
    pub sso_rate: Decimal,
    /// Lower bound of the monthly wage basis for the contribution.
    pub sso_floor: Decimal,
    /// Upper bound of the monthly wage basis for the contribution.
    pub sso_cap: Decimal,
    /// Percentage of salary due that may be drawn as an advance.
    pub advance_eligibility_percentage: Decimal,
    /// Annual leave entitlement in days for a full calendar year.
    pub annual_leave_days: Decimal,
    /// Yearly sick-day quota before sick days deduct pay.
    pub sick_day_quota: u32,
    /// Maximum public-holiday-in-lieu credits paid out on separation.
    pub public_holiday_credit_cap: u32,
    /// Multiplier applied to the hourly-equivalent rate for overtime.
    pub overtime_rate_multiplier: Decimal,
    /// The first period the payroll system is authoritative for; earlier
    /// periods cannot be generated.
    pub payroll_cutover_date: NaiveDate,
    /// Shared attendance policy constants.
    #[serde(default)]
    pub policy: AttendancePolicy,
}

impl CompanyConfig {
    /// Returns true when the date is an observed public holiday.
    pub fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.public_holidays.iter().any(|h| h.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_config() -> CompanyConfig {
        CompanyConfig {
            public_holidays: vec![PublicHoliday {
                date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                name: "New Year's Day".to_string(),
            }],
            attendance_bonus: AttendanceBonusConfig {
                allowed_lates: 2,
                max_late_minutes_allowed: 30,
                allowed_absences: 0,
                month1: dec("500"),
                month2: dec("750"),
                month3: dec("1000"),
            },
            sso_rate: dec("0.05"),
            sso_floor: dec("1650"),
            sso_cap: dec("15000"),
            advance_eligibility_percentage: dec("30"),
            annual_leave_days: dec("12"),
            sick_day_quota: 30,
            public_holiday_credit_cap: 13,
            overtime_rate_multiplier: dec("1.5"),
            payroll_cutover_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            policy: AttendancePolicy::default(),
        }
    }

    #[test]
    fn test_policy_defaults() {
        let policy = AttendancePolicy::default();
        assert_eq!(policy.late_grace_minutes, 0);
        assert_eq!(policy.default_break_minutes, 60);
        assert_eq!(policy.synthesized_checkout_time, "23:00");
        assert_eq!(policy.standard_day_hours, 8);
        assert_eq!(policy.overtime_base_days, 30);
    }

    #[test]
    fn test_policy_deserializes_from_empty_mapping() {
        let policy: AttendancePolicy = serde_yaml::from_str("{}").unwrap();
        assert_eq!(policy, AttendancePolicy::default());
    }

    #[test]
    fn test_is_public_holiday() {
        let config = test_config();
        assert!(config.is_public_holiday(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert!(!config.is_public_holiday(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()));
    }

    #[test]
    fn test_company_config_yaml_round_trip() {
        let config = test_config();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: CompanyConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_config_deserializes_with_defaulted_policy() {
        let yaml = r#"
attendance_bonus:
  allowed_lates: 3
  max_late_minutes_allowed: 45
  allowed_absences: 1
  month1: "300"
  month2: "600"
  month3: "900"
sso_rate: "0.05"
sso_floor: "1650"
sso_cap: "15000"
advance_eligibility_percentage: "50"
annual_leave_days: "10"
sick_day_quota: 30
public_holiday_credit_cap: 13
overtime_rate_multiplier: "1.5"
payroll_cutover_date: 2025-01-01
"#;
        let config: CompanyConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.attendance_bonus.allowed_lates, 3);
        assert!(config.public_holidays.is_empty());
        assert_eq!(config.policy, AttendancePolicy::default());
    }
}

//! Schedule and attendance models.
//!
//! A [`ScheduleEntry`] is what the planner intended for a day; an
//! [`AttendanceRecord`] is what actually happened. Both are unique per
//! `(staff_id, date)` and are read-only to the engine.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Whether a scheduled day is a working day or a day off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    /// A rostered working day with start and end times.
    Work,
    /// A rostered day off.
    Off,
}

/// A planned day for one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// The staff member this entry belongs to.
    pub staff_id: String,
    /// The calendar date of the entry.
    pub date: NaiveDate,
    /// Whether this is a work day or a day off.
    pub kind: ScheduleKind,
    /// Scheduled start time in `HH:MM` (work days only).
    #[serde(default)]
    pub start_time: Option<String>,
    /// Scheduled end time in `HH:MM` (work days only).
    #[serde(default)]
    pub end_time: Option<String>,
    /// Free-form planner notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl ScheduleEntry {
    /// Returns true when this entry is a rostered working day.
    pub fn is_work_day(&self) -> bool {
        self.kind == ScheduleKind::Work
    }
}

/// Approval state of overtime worked on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeStatus {
    /// No overtime recorded for the day.
    #[default]
    None,
    /// Overtime recorded, awaiting manager approval.
    Pending,
    /// Overtime approved; `overtime_approved_minutes` is payable.
    Approved,
    /// Overtime rejected; not payable.
    Rejected,
}

/// What actually happened on one day for one staff member.
///
/// Created on check-in and mutated by break/check-out events; the engine
/// never writes to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The staff member this record belongs to.
    pub staff_id: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// The check-in instant, if the staff member checked in.
    #[serde(default)]
    pub check_in: Option<NaiveDateTime>,
    /// The check-out instant, if the staff member checked out.
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
    /// The start of an explicitly recorded break.
    #[serde(default)]
    pub break_start: Option<NaiveDateTime>,
    /// The end of an explicitly recorded break.
    #[serde(default)]
    pub break_end: Option<NaiveDateTime>,
    /// Approval state of any overtime worked.
    #[serde(default)]
    pub overtime_status: OvertimeStatus,
    /// Manager-approved overtime, in minutes.
    #[serde(default)]
    pub overtime_approved_minutes: i64,
}

impl AttendanceRecord {
    /// Returns true when the staff member checked in on this day.
    pub fn has_check_in(&self) -> bool {
        self.check_in.is_some()
    }

    /// Returns the explicitly recorded break duration in minutes, if both
    /// break timestamps exist.
    pub fn explicit_break_minutes(&self) -> Option<i64> {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => Some((end - start).num_minutes().max(0)),
            _ => None,
        }
    }

    /// Returns the approved overtime minutes, or zero when overtime was
    /// not approved.
    pub fn payable_overtime_minutes(&self) -> i64 {
        if self.overtime_status == OvertimeStatus::Approved {
            self.overtime_approved_minutes.max(0)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(date_str: &str) -> AttendanceRecord {
        AttendanceRecord {
            staff_id: "staff_001".to_string(),
            date: date(date_str),
            check_in: None,
            check_out: None,
            break_start: None,
            break_end: None,
            overtime_status: OvertimeStatus::None,
            overtime_approved_minutes: 0,
        }
    }

    #[test]
    fn test_explicit_break_minutes_requires_both_timestamps() {
        let mut rec = record("2026-01-15");
        assert_eq!(rec.explicit_break_minutes(), None);

        rec.break_start = Some(datetime("2026-01-15 12:00:00"));
        assert_eq!(rec.explicit_break_minutes(), None);

        rec.break_end = Some(datetime("2026-01-15 12:45:00"));
        assert_eq!(rec.explicit_break_minutes(), Some(45));
    }

    #[test]
    fn test_explicit_break_minutes_never_negative() {
        let mut rec = record("2026-01-15");
        rec.break_start = Some(datetime("2026-01-15 13:00:00"));
        rec.break_end = Some(datetime("2026-01-15 12:30:00"));
        assert_eq!(rec.explicit_break_minutes(), Some(0));
    }

    #[test]
    fn test_payable_overtime_requires_approval() {
        let mut rec = record("2026-01-15");
        rec.overtime_approved_minutes = 90;

        rec.overtime_status = OvertimeStatus::Pending;
        assert_eq!(rec.payable_overtime_minutes(), 0);

        rec.overtime_status = OvertimeStatus::Rejected;
        assert_eq!(rec.payable_overtime_minutes(), 0);

        rec.overtime_status = OvertimeStatus::Approved;
        assert_eq!(rec.payable_overtime_minutes(), 90);
    }

    #[test]
    fn test_attendance_deserialization_defaults() {
        let json = r#"{
            "staff_id": "staff_001",
            "date": "2026-01-15",
            "check_in": "2026-01-15T08:58:00"
        }"#;

        let rec: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert!(rec.has_check_in());
        assert!(rec.check_out.is_none());
        assert_eq!(rec.overtime_status, OvertimeStatus::None);
        assert_eq!(rec.overtime_approved_minutes, 0);
    }

    #[test]
    fn test_schedule_kind_predicates() {
        let entry = ScheduleEntry {
            staff_id: "staff_001".to_string(),
            date: date("2026-01-15"),
            kind: ScheduleKind::Work,
            start_time: Some("09:00".to_string()),
            end_time: Some("18:00".to_string()),
            notes: None,
        };
        assert!(entry.is_work_day());

        let off = ScheduleEntry {
            kind: ScheduleKind::Off,
            start_time: None,
            end_time: None,
            ..entry
        };
        assert!(!off.is_work_day());
    }

    #[test]
    fn test_schedule_serialization_round_trip() {
        let entry = ScheduleEntry {
            staff_id: "staff_001".to_string(),
            date: date("2026-01-15"),
            kind: ScheduleKind::Work,
            start_time: Some("09:00".to_string()),
            end_time: Some("18:00".to_string()),
            notes: Some("open the store".to_string()),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: ScheduleEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}

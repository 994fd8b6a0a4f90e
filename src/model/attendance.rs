use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{RosterError, RosterResult};
use crate::validation;

pub const FIRST_WEEK: u8 = 2;
pub const LAST_WEEK: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Excused,
}

impl AttendanceStatus {
    pub const ALL: &'static [AttendanceStatus] = &[
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Excused,
    ];

    /// Parse user input, ignoring case.
    pub fn parse(s: &str) -> RosterResult<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| RosterError::InvalidStatus {
                field: "attendance",
                value: s.trim().to_string(),
                allowed: "present/absent/excused",
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Excused => "excused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub week: u8,
    pub status: AttendanceStatus,
}

/// Validates a tutorial week number.
pub fn check_week(week: i64) -> RosterResult<u8> {
    validation::in_range(week, FIRST_WEEK, LAST_WEEK, "Week")
}

/// Immutable map of week number to attendance record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceSheet {
    entries: BTreeMap<u8, Attendance>,
}

impl AttendanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = Attendance>) -> RosterResult<Self> {
        let mut sheet = Self::new();
        for record in entries {
            sheet = sheet.mark(i64::from(record.week), record.status)?;
        }
        Ok(sheet)
    }

    /// Records `status` for `week`, overwriting any earlier mark.
    pub fn mark(&self, week: i64, status: AttendanceStatus) -> RosterResult<Self> {
        let week = check_week(week)?;
        let mut entries = self.entries.clone();
        entries.insert(week, Attendance { week, status });
        Ok(Self { entries })
    }

    pub fn status(&self, week: i64) -> Option<AttendanceStatus> {
        u8::try_from(week)
            .ok()
            .and_then(|key| self.entries.get(&key))
            .map(|a| a.status)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attendance> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

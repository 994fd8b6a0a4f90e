use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EntityKind, RosterError, RosterResult};
use crate::validation;

pub const MIN_ASSIGNMENT_ID: u8 = 1;
pub const MAX_ASSIGNMENT_ID: u8 = 13;

/// Completion state of a single assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Complete,
    Incomplete,
    Late,
}

impl HomeworkStatus {
    pub const ALL: &'static [HomeworkStatus] = &[
        HomeworkStatus::Complete,
        HomeworkStatus::Incomplete,
        HomeworkStatus::Late,
    ];

    /// Parse user input, ignoring case.
    pub fn parse(s: &str) -> RosterResult<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| RosterError::InvalidStatus {
                field: "homework",
                value: s.trim().to_string(),
                allowed: "complete/incomplete/late",
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Complete => "complete",
            HomeworkStatus::Incomplete => "incomplete",
            HomeworkStatus::Late => "late",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homework {
    pub id: u8,
    pub status: HomeworkStatus,
}

/// Immutable map of assignment id to homework record. Every operation
/// returns a new tracker and leaves `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeworkTracker {
    entries: BTreeMap<u8, Homework>,
}

impl HomeworkTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = Homework>) -> RosterResult<Self> {
        let mut map = BTreeMap::new();
        for hw in entries {
            let id = check_id(i64::from(hw.id))?;
            map.insert(id, hw);
        }
        Ok(Self { entries: map })
    }

    /// Adds assignment `id` as incomplete. Adding an assignment that is
    /// already tracked returns an identical tracker.
    pub fn add(&self, id: i64) -> RosterResult<Self> {
        let id = check_id(id)?;
        if self.entries.contains_key(&id) {
            return Ok(self.clone());
        }
        let mut entries = self.entries.clone();
        entries.insert(
            id,
            Homework {
                id,
                status: HomeworkStatus::Incomplete,
            },
        );
        Ok(Self { entries })
    }

    pub fn remove(&self, id: i64) -> RosterResult<Self> {
        let key = self.existing_key(id)?;
        let mut entries = self.entries.clone();
        entries.remove(&key);
        Ok(Self { entries })
    }

    pub fn update_status(&self, id: i64, status: HomeworkStatus) -> RosterResult<Self> {
        let key = self.existing_key(id)?;
        let mut entries = self.entries.clone();
        entries.insert(key, Homework { id: key, status });
        Ok(Self { entries })
    }

    pub fn contains(&self, id: i64) -> bool {
        u8::try_from(id)
            .map(|key| self.entries.contains_key(&key))
            .unwrap_or(false)
    }

    pub fn status(&self, id: i64) -> Option<HomeworkStatus> {
        u8::try_from(id)
            .ok()
            .and_then(|key| self.entries.get(&key))
            .map(|hw| hw.status)
    }

    /// Homework records ordered by assignment id.
    pub fn iter(&self) -> impl Iterator<Item = &Homework> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn existing_key(&self, id: i64) -> RosterResult<u8> {
        u8::try_from(id)
            .ok()
            .filter(|key| self.entries.contains_key(key))
            .ok_or_else(|| RosterError::not_found(EntityKind::Homework, id))
    }
}

fn check_id(id: i64) -> RosterResult<u8> {
    validation::in_range(id, MIN_ASSIGNMENT_ID, MAX_ASSIGNMENT_ID, "Homework ID")
}

use std::fmt;

use thiserror::Error;

/// The kind of record an identity lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Person,
    Group,
    Consultation,
    Homework,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Person => "Student",
            EntityKind::Group => "Group",
            EntityKind::Consultation => "Consultation",
            EntityKind::Homework => "Homework",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("{kind} already exists: {id}")]
    DuplicateEntity { kind: EntityKind, id: String },

    #[error("{kind} not found: {id}")]
    EntityNotFound { kind: EntityKind, id: String },

    #[error("Cannot move student to the same group they are already in")]
    SameGroup,

    #[error("{field} must be between {min} and {max}, got {value}")]
    InvalidRange {
        field: &'static str,
        value: i64,
        min: u8,
        max: u8,
    },

    #[error("Invalid {field} status '{value}': use {allowed}")]
    InvalidStatus {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },

    #[error("Consultation overlaps with an existing consultation")]
    OverlappingConsultation,

    #[error("No students in group {group}")]
    EmptyGroup { group: String },

    #[error("{0}")]
    BatchRejected(String),

    #[error("{field}: {message}")]
    InvalidField { field: &'static str, message: String },

    #[error("{0}")]
    Parse(String),

    #[error("The student index {0} is not in the displayed list")]
    InvalidIndex(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RosterError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        RosterError::EntityNotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn duplicate(kind: EntityKind, id: impl ToString) -> Self {
        RosterError::DuplicateEntity {
            kind,
            id: id.to_string(),
        }
    }
}

pub type RosterResult<T> = Result<T, RosterError>;

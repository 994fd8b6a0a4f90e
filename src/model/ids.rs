use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::{RosterError, RosterResult};

/// Describes the textual shape of an identifier for entity type `T`.
pub trait IdFormat {
    /// Field name used in error messages.
    const FIELD: &'static str;
    /// Human-readable constraint shown when parsing fails.
    const CONSTRAINTS: &'static str;

    fn is_valid(value: &str) -> bool;
}

/// Type-safe string identifier. The phantom type parameter `T` prevents
/// mixing identifiers of different entity types (e.g. a student's nusnetid
/// and a group id). Identifiers are normalised to upper case.
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

impl<T: IdFormat> Id<T> {
    /// Parse and normalise user input.
    pub fn parse(s: &str) -> RosterResult<Self> {
        let normalised = s.trim().to_uppercase();
        if T::is_valid(&normalised) {
            Ok(Self {
                value: normalised,
                _phantom: PhantomData,
            })
        } else {
            Err(RosterError::InvalidField {
                field: T::FIELD,
                message: T::CONSTRAINTS.to_string(),
            })
        }
    }
}

impl<T> Id<T> {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T: IdFormat> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Id::parse(&raw).map_err(serde::de::Error::custom)
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

use super::attendance::AttendanceSheet;
use super::consultation::Consultation;
use super::group::GroupId;
use super::homework::HomeworkTracker;
use super::ids::{Id, IdFormat};

static NUSNETID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^E\d{7}$").unwrap());

/// A student's NUSNET id, the identity of a [`Person`].
pub type Nusnetid = Id<Person>;

impl IdFormat for Person {
    const FIELD: &'static str = "Nusnetid";
    const CONSTRAINTS: &'static str = "should start with 'E' followed by 7 digits, e.g. E1234567";

    fn is_valid(value: &str) -> bool {
        NUSNETID_RE.is_match(value)
    }
}

/// A student on the roster. Values are never modified in place; the
/// `with_*` helpers build the replacement value handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub nusnetid: Nusnetid,
    pub telegram: String,
    pub group_id: GroupId,
    pub homework: HomeworkTracker,
    pub attendance: AttendanceSheet,
    pub consultation: Option<Consultation>,
}

impl Person {
    pub fn create(name: String, nusnetid: Nusnetid, telegram: String, group_id: GroupId) -> Self {
        Self {
            name,
            phone: None,
            email: None,
            nusnetid,
            telegram,
            group_id,
            homework: HomeworkTracker::new(),
            attendance: AttendanceSheet::new(),
            consultation: None,
        }
    }

    pub fn is_same_person(&self, other: &Person) -> bool {
        self.nusnetid == other.nusnetid
    }

    pub fn with_group(&self, group_id: GroupId) -> Self {
        Self {
            group_id,
            ..self.clone()
        }
    }

    pub fn with_homework(&self, homework: HomeworkTracker) -> Self {
        Self {
            homework,
            ..self.clone()
        }
    }

    pub fn with_attendance(&self, attendance: AttendanceSheet) -> Self {
        Self {
            attendance,
            ..self.clone()
        }
    }

    pub fn with_consultation(&self, consultation: Option<Consultation>) -> Self {
        Self {
            consultation,
            ..self.clone()
        }
    }
}

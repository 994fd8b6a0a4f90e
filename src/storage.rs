//! JSON persistence for the roster.
//!
//! The file holds `{ "persons": [...], "consultations": [...], "groups": [...] }`.
//! Group membership is rebuilt from each person's `groupId`; the `students`
//! list saved with each group is informational and ignored on load.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{RosterError, RosterResult};
use crate::model::*;
use crate::store::Roster;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredRoster {
    #[serde(default)]
    persons: Vec<StoredPerson>,
    #[serde(default)]
    consultations: Vec<StoredConsultation>,
    #[serde(default)]
    groups: Vec<StoredGroup>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPerson {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    nusnetid: String,
    telegram: String,
    group_id: String,
    #[serde(default)]
    homework: Vec<Homework>,
    #[serde(default)]
    attendance: Vec<Attendance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    consultation: Option<StoredSlot>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSlot {
    from: NaiveDateTime,
    to: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredConsultation {
    nusnetid: String,
    from: NaiveDateTime,
    to: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredGroup {
    group_id: String,
    #[serde(default)]
    students: Vec<String>,
}

impl StoredPerson {
    fn from_model(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            phone: person.phone.clone(),
            email: person.email.clone(),
            nusnetid: person.nusnetid.to_string(),
            telegram: person.telegram.clone(),
            group_id: person.group_id.to_string(),
            homework: person.homework.iter().copied().collect(),
            attendance: person.attendance.iter().copied().collect(),
            consultation: person.consultation.as_ref().map(|c| StoredSlot {
                from: c.from,
                to: c.to,
            }),
        }
    }

    fn to_model(&self) -> RosterResult<Person> {
        let nusnetid = Nusnetid::parse(&self.nusnetid)?;
        let mut person = Person::create(
            crate::validation::name(&self.name)?,
            nusnetid.clone(),
            crate::validation::telegram(&self.telegram)?,
            GroupId::parse(&self.group_id)?,
        );
        person.phone = self
            .phone
            .as_deref()
            .map(crate::validation::phone)
            .transpose()?;
        person.email = self
            .email
            .as_deref()
            .map(crate::validation::email)
            .transpose()?;
        person.homework = HomeworkTracker::from_entries(self.homework.iter().copied())?;
        person.attendance = AttendanceSheet::from_entries(self.attendance.iter().copied())?;
        person.consultation = self
            .consultation
            .as_ref()
            .map(|slot| Consultation::new(nusnetid, slot.from, slot.to))
            .transpose()?;
        Ok(person)
    }
}

impl StoredRoster {
    fn from_model(roster: &Roster) -> Self {
        Self {
            persons: roster.persons().iter().map(StoredPerson::from_model).collect(),
            consultations: roster
                .consultations()
                .iter()
                .map(|c| StoredConsultation {
                    nusnetid: c.nusnetid.to_string(),
                    from: c.from,
                    to: c.to,
                })
                .collect(),
            groups: roster
                .groups()
                .iter()
                .map(|g| StoredGroup {
                    group_id: g.id.to_string(),
                    students: g.members.iter().map(|m| m.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn to_model(&self) -> RosterResult<Roster> {
        let mut roster = Roster::new();

        // Persons first: their groups are created as they are added. Each
        // person's own slot is checked against the consultations list below.
        let mut embedded = Vec::with_capacity(self.persons.len());
        for stored in &self.persons {
            let person = stored.to_model()?;
            embedded.push((person.nusnetid.clone(), person.consultation.clone()));
            roster.add_person(person)?;
        }

        // Keep groups that were created explicitly, including empty ones.
        for stored in &self.groups {
            let group_id = GroupId::parse(&stored.group_id)?;
            if !roster.has_group(&group_id) {
                roster.add_group(group_id)?;
            }
        }

        // Booked like a live `add_consult`: the owner must exist and hold no
        // other slot.
        for stored in &self.consultations {
            let nusnetid = Nusnetid::parse(&stored.nusnetid)?;
            roster.add_consultation(Consultation::new(nusnetid, stored.from, stored.to)?)?;
        }

        for (nusnetid, slot) in embedded {
            let booked = roster.find_person(&nusnetid).and_then(|p| p.consultation.as_ref());
            if booked != slot.as_ref() {
                return Err(RosterError::InvalidField {
                    field: "Consultation",
                    message: format!(
                        "the slot saved for {} does not match the consultations list",
                        nusnetid
                    ),
                });
            }
        }

        Ok(roster)
    }
}

/// Serializes the roster to pretty-printed JSON.
pub fn to_json(roster: &Roster) -> RosterResult<String> {
    Ok(serde_json::to_string_pretty(&StoredRoster::from_model(roster))?)
}

/// Rebuilds a roster from JSON, applying the same identity and overlap
/// rules as live edits.
pub fn from_json(json: &str) -> RosterResult<Roster> {
    let stored: StoredRoster = serde_json::from_str(json)?;
    stored.to_model()
}

/// Loads the roster at `path`. A missing file yields an empty roster.
pub fn load(path: &Path) -> RosterResult<Roster> {
    if !path.exists() {
        info!(path = %path.display(), "no data file found, starting with an empty roster");
        return Ok(Roster::new());
    }
    let json = fs::read_to_string(path)?;
    let roster = from_json(&json)?;
    info!(
        path = %path.display(),
        students = roster.persons().len(),
        groups = roster.groups().len(),
        consultations = roster.consultations().len(),
        "loaded roster"
    );
    Ok(roster)
}

/// Writes the roster to `path`, creating parent directories as needed.
pub fn save(path: &Path, roster: &Roster) -> RosterResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_json(roster)?)?;
    debug!(path = %path.display(), "saved roster");
    Ok(())
}

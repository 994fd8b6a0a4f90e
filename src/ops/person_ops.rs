use tracing::debug;

use crate::error::{EntityKind, RosterError, RosterResult};
use crate::model::{GroupId, Nusnetid, Person};
use crate::store::Roster;
use crate::validation;

/// Field changes for [`edit_student`]. `None` leaves a field as it is;
/// for phone and email, `Some(None)` clears the value.
#[derive(Debug, Default, Clone, Copy)]
pub struct PersonEdit<'a> {
    pub name: Option<&'a str>,
    pub phone: Option<Option<&'a str>>,
    pub email: Option<Option<&'a str>>,
    pub nusnetid: Option<&'a str>,
    pub telegram: Option<&'a str>,
}

impl PersonEdit<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.nusnetid.is_none()
            && self.telegram.is_none()
    }
}

pub fn add_student(
    roster: &mut Roster,
    name: &str,
    nusnetid: &str,
    telegram: &str,
    group: &str,
    phone: Option<&str>,
    email: Option<&str>,
) -> RosterResult<Person> {
    let mut errors = Vec::new();
    let name = collect(validation::name(name), &mut errors);
    let nusnetid = collect(Nusnetid::parse(nusnetid), &mut errors);
    let telegram = collect(validation::telegram(telegram), &mut errors);
    let group_id = collect(GroupId::parse(group), &mut errors);
    let phone = collect(optional(phone, validation::phone), &mut errors);
    let email = collect(optional(email, validation::email), &mut errors);

    let (Some(name), Some(nusnetid), Some(telegram), Some(group_id), Some(phone), Some(email)) =
        (name, nusnetid, telegram, group_id, phone, email)
    else {
        return Err(combine(errors));
    };

    let mut person = Person::create(name, nusnetid, telegram, group_id);
    person.phone = phone;
    person.email = email;

    roster.add_person(person.clone())?;
    Ok(person)
}

pub fn edit_student(
    roster: &mut Roster,
    target: &Nusnetid,
    edit: PersonEdit<'_>,
) -> RosterResult<Person> {
    if edit.is_empty() {
        return Err(RosterError::Parse(
            "At least one field to edit must be provided.".into(),
        ));
    }

    let current = roster
        .find_person(target)
        .cloned()
        .ok_or_else(|| RosterError::not_found(EntityKind::Person, target))?;

    let mut errors = Vec::new();
    let mut updated = current;

    if let Some(n) = edit.name {
        if let Some(valid) = collect(validation::name(n), &mut errors) {
            updated.name = valid;
        }
    }
    if let Some(p) = edit.phone {
        if let Some(valid) = collect(optional(p, validation::phone), &mut errors) {
            updated.phone = valid;
        }
    }
    if let Some(e) = edit.email {
        if let Some(valid) = collect(optional(e, validation::email), &mut errors) {
            updated.email = valid;
        }
    }
    if let Some(id) = edit.nusnetid {
        if let Some(valid) = collect(Nusnetid::parse(id), &mut errors) {
            updated.nusnetid = valid;
        }
    }
    if let Some(t) = edit.telegram {
        if let Some(valid) = collect(validation::telegram(t), &mut errors) {
            updated.telegram = valid;
        }
    }

    if !errors.is_empty() {
        return Err(combine(errors));
    }

    debug!(nusnetid = %target, "editing student");
    roster.replace_person(target, updated)
}

pub fn delete_student(roster: &mut Roster, nusnetid: &Nusnetid) -> RosterResult<Person> {
    roster.remove_person(nusnetid)
}

/// Validates an optional field; blank input counts as absent.
fn optional(
    value: Option<&str>,
    validate: fn(&str) -> RosterResult<String>,
) -> RosterResult<Option<String>> {
    match validation::trim_optional(value) {
        None => Ok(None),
        Some(v) => validate(&v).map(Some),
    }
}

fn collect<T>(result: RosterResult<T>, errors: &mut Vec<RosterError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

/// A single failure keeps its kind; several are reported one per line.
fn combine(mut errors: Vec<RosterError>) -> RosterError {
    if errors.len() == 1 {
        return errors.remove(0);
    }
    let lines: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    RosterError::Parse(lines.join("\n"))
}

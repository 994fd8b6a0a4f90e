use tracing::info;

use crate::error::{EntityKind, RosterError, RosterResult};
use crate::model::homework::{MAX_ASSIGNMENT_ID, MIN_ASSIGNMENT_ID};
use crate::model::{HomeworkStatus, Nusnetid, Person};
use crate::store::Roster;
use crate::validation;

/// Which students a homework command applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    One(Nusnetid),
    All,
}

/// Assigns homework `assignment_id` (as incomplete).
///
/// For a single student, an assignment they already have is an error. For
/// all students the batch is rejected only when everyone already has it;
/// otherwise students who have it are skipped. Returns the updated students.
pub fn add_homework(roster: &mut Roster, target: &Target, assignment_id: i64) -> RosterResult<Vec<Person>> {
    check_assignment(assignment_id)?;

    let students = match target {
        Target::One(nusnetid) => {
            let student = student(roster, nusnetid)?;
            if student.homework.contains(assignment_id) {
                return Err(RosterError::duplicate(
                    EntityKind::Homework,
                    format!("{} for {}", assignment_id, student.name),
                ));
            }
            vec![student]
        }
        Target::All => {
            let all: Vec<Person> = roster.persons().iter().cloned().collect();
            if all.is_empty() {
                return Err(RosterError::BatchRejected("There are no students yet".into()));
            }
            if all.iter().all(|p| p.homework.contains(assignment_id)) {
                return Err(RosterError::BatchRejected(format!(
                    "All students already have homework {}",
                    assignment_id
                )));
            }
            all.into_iter()
                .filter(|p| !p.homework.contains(assignment_id))
                .collect()
        }
    };

    let updated = apply(roster, students, |p| {
        p.homework.add(assignment_id).map(|hw| p.with_homework(hw))
    })?;
    info!(assignment = assignment_id, students = updated.len(), "added homework");
    Ok(updated)
}

/// Removes homework `assignment_id`. Mirrors [`add_homework`]: the "all"
/// form is rejected only when no student has the assignment.
pub fn delete_homework(roster: &mut Roster, target: &Target, assignment_id: i64) -> RosterResult<Vec<Person>> {
    let students = match target {
        Target::One(nusnetid) => {
            let student = student(roster, nusnetid)?;
            if !student.homework.contains(assignment_id) {
                return Err(RosterError::not_found(
                    EntityKind::Homework,
                    format!("{} for {}", assignment_id, student.name),
                ));
            }
            vec![student]
        }
        Target::All => {
            check_assignment(assignment_id)?;
            let having: Vec<Person> = roster
                .persons()
                .iter()
                .filter(|p| p.homework.contains(assignment_id))
                .cloned()
                .collect();
            if having.is_empty() {
                return Err(RosterError::BatchRejected(format!(
                    "No student has homework {}",
                    assignment_id
                )));
            }
            having
        }
    };

    let updated = apply(roster, students, |p| {
        p.homework.remove(assignment_id).map(|hw| p.with_homework(hw))
    })?;
    info!(assignment = assignment_id, students = updated.len(), "deleted homework");
    Ok(updated)
}

/// Sets the status of an assignment the student already has.
pub fn mark_homework(
    roster: &mut Roster,
    nusnetid: &Nusnetid,
    assignment_id: i64,
    status: HomeworkStatus,
) -> RosterResult<Person> {
    let student = student(roster, nusnetid)?;
    check_assignment(assignment_id)?;
    if !student.homework.contains(assignment_id) {
        return Err(RosterError::not_found(
            EntityKind::Homework,
            format!("{} for {}", assignment_id, student.name),
        ));
    }

    let marked = student.homework.update_status(assignment_id, status)?;
    let updated = roster.replace_person(nusnetid, student.with_homework(marked))?;
    info!(nusnetid = %nusnetid, assignment = assignment_id, status = status.as_str(), "marked homework");
    Ok(updated)
}

fn check_assignment(assignment_id: i64) -> RosterResult<u8> {
    validation::in_range(assignment_id, MIN_ASSIGNMENT_ID, MAX_ASSIGNMENT_ID, "Homework ID")
}

fn student(roster: &Roster, nusnetid: &Nusnetid) -> RosterResult<Person> {
    roster
        .find_person(nusnetid)
        .cloned()
        .ok_or_else(|| RosterError::not_found(EntityKind::Person, nusnetid))
}

/// Computes every replacement first, then commits them, so a failure in the
/// first phase leaves all students untouched.
fn apply(
    roster: &mut Roster,
    students: Vec<Person>,
    change: impl Fn(&Person) -> RosterResult<Person>,
) -> RosterResult<Vec<Person>> {
    let replacements = students
        .iter()
        .map(|p| change(p).map(|updated| (p.nusnetid.clone(), updated)))
        .collect::<RosterResult<Vec<_>>>()?;

    replacements
        .into_iter()
        .map(|(nusnetid, updated)| roster.replace_person(&nusnetid, updated))
        .collect()
}

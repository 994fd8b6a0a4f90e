use crate::cli::context::CliContext;
use crate::error::{EntityKind, RosterError, RosterResult};
use crate::model::{HomeworkStatus, Nusnetid};
use crate::ops::homework_ops::{self, Target};

pub fn add(ctx: &mut CliContext, target: &Target, assignment: i64) -> RosterResult<String> {
    let updated = homework_ops::add_homework(&mut ctx.roster, target, assignment)?;
    Ok(match target {
        Target::All => format!(
            "Added homework {} for {} student(s)",
            assignment,
            updated.len()
        ),
        Target::One(_) => format!(
            "Added homework {} for {}",
            assignment,
            names(&updated)
        ),
    })
}

pub fn delete(ctx: &mut CliContext, target: &Target, assignment: i64) -> RosterResult<String> {
    let updated = homework_ops::delete_homework(&mut ctx.roster, target, assignment)?;
    Ok(match target {
        Target::All => format!(
            "Deleted homework {} for {} student(s)",
            assignment,
            updated.len()
        ),
        Target::One(_) => format!("Deleted homework {} for {}", assignment, names(&updated)),
    })
}

pub fn mark(
    ctx: &mut CliContext,
    nusnetid: &Nusnetid,
    assignment: i64,
    status: HomeworkStatus,
) -> RosterResult<String> {
    match homework_ops::mark_homework(&mut ctx.roster, nusnetid, assignment, status) {
        Ok(person) => Ok(format!(
            "Marked homework {} as {} for {}",
            assignment,
            status.as_str(),
            person.name
        )),
        Err(RosterError::EntityNotFound {
            kind: EntityKind::Homework,
            id,
        }) => Err(RosterError::Parse(format!(
            "Homework not found: {}. Add it first using 'add_hw'.",
            id
        ))),
        Err(e) => Err(e),
    }
}

fn names(people: &[crate::model::Person]) -> String {
    people
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

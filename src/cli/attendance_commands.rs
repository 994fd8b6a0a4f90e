use crate::cli::context::CliContext;
use crate::error::RosterResult;
use crate::model::{AttendanceStatus, GroupId, Nusnetid};
use crate::ops::attendance_ops;
use crate::queries::person_queries::PersonFilter;

pub fn mark(
    ctx: &mut CliContext,
    nusnetid: &Nusnetid,
    week: i64,
    status: AttendanceStatus,
) -> RosterResult<String> {
    let person = attendance_ops::mark_attendance(&mut ctx.roster, nusnetid, week, status)?;
    Ok(format!(
        "Marked {} as {} for week {}",
        person.name,
        status.as_str(),
        week
    ))
}

/// Marks the whole group, then shows just that group.
pub fn mark_all(
    ctx: &mut CliContext,
    group_id: &GroupId,
    week: i64,
    status: AttendanceStatus,
) -> RosterResult<String> {
    let updated = attendance_ops::mark_all_attendance(&mut ctx.roster, group_id, week, status)?;
    ctx.person_filter = PersonFilter::InGroup(group_id.clone());
    Ok(format!(
        "Marked {} student(s) in {} as {} for week {}",
        updated.len(),
        group_id,
        status.as_str(),
        week
    ))
}

use tracing::info;

use crate::error::{EntityKind, RosterError, RosterResult};
use crate::model::attendance::check_week;
use crate::model::{AttendanceStatus, GroupId, Nusnetid, Person};
use crate::store::Roster;

/// Records attendance for one student, overwriting any earlier mark for
/// the same week.
pub fn mark_attendance(
    roster: &mut Roster,
    nusnetid: &Nusnetid,
    week: i64,
    status: AttendanceStatus,
) -> RosterResult<Person> {
    check_week(week)?;
    let student = roster
        .find_person(nusnetid)
        .cloned()
        .ok_or_else(|| RosterError::not_found(EntityKind::Person, nusnetid))?;

    let sheet = student.attendance.mark(week, status)?;
    let updated = roster.replace_person(nusnetid, student.with_attendance(sheet))?;
    info!(nusnetid = %nusnetid, week, status = status.as_str(), "marked attendance");
    Ok(updated)
}

/// Records the same attendance for every member of `group_id`.
pub fn mark_all_attendance(
    roster: &mut Roster,
    group_id: &GroupId,
    week: i64,
    status: AttendanceStatus,
) -> RosterResult<Vec<Person>> {
    check_week(week)?;
    let group = roster
        .find_group(group_id)
        .ok_or_else(|| RosterError::not_found(EntityKind::Group, group_id))?;
    if group.members.is_empty() {
        return Err(RosterError::EmptyGroup {
            group: group_id.to_string(),
        });
    }

    let replacements = group
        .members
        .iter()
        .map(|member| {
            let student = roster
                .find_person(member)
                .ok_or_else(|| RosterError::not_found(EntityKind::Person, member))?;
            let sheet = student.attendance.mark(week, status)?;
            Ok((member.clone(), student.with_attendance(sheet)))
        })
        .collect::<RosterResult<Vec<_>>>()?;

    let updated = replacements
        .into_iter()
        .map(|(nusnetid, student)| roster.replace_person(&nusnetid, student))
        .collect::<RosterResult<Vec<_>>>()?;

    info!(group = %group_id, week, status = status.as_str(), students = updated.len(), "marked group attendance");
    Ok(updated)
}

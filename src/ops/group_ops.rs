use crate::error::RosterResult;
use crate::model::{Group, GroupId, Nusnetid, Person};
use crate::store::Roster;

pub fn create_group(roster: &mut Roster, group: &str) -> RosterResult<Group> {
    let group_id = GroupId::parse(group)?;
    roster.add_group(group_id).cloned()
}

pub fn add_to_group(roster: &mut Roster, nusnetid: &Nusnetid, group: &str) -> RosterResult<Person> {
    let group_id = GroupId::parse(group)?;
    roster.move_student_to_new_group(nusnetid, group_id)
}

use crate::cli::context::CliContext;
use crate::error::RosterResult;
use crate::model::{GroupId, Nusnetid};
use crate::ops::group_ops;
use crate::queries::person_queries::{self, PersonFilter};

pub fn create(ctx: &mut CliContext, group: &str) -> RosterResult<String> {
    let created = group_ops::create_group(&mut ctx.roster, group)?;
    Ok(format!("New group created: {}", created.id))
}

pub fn add_to(ctx: &mut CliContext, nusnetid: &Nusnetid, group: &str) -> RosterResult<String> {
    let moved = group_ops::add_to_group(&mut ctx.roster, nusnetid, group)?;
    Ok(format!("Moved {} ({}) to group {}", moved.name, moved.nusnetid, moved.group_id))
}

/// Shows the members of `group_id` and keeps the list filtered to them.
pub fn find(ctx: &mut CliContext, group_id: &GroupId) -> RosterResult<String> {
    let count = person_queries::group_members(&ctx.roster, group_id)?.len();
    ctx.person_filter = PersonFilter::InGroup(group_id.clone());
    Ok(format!(
        "Group {} has {} student(s):\n{}",
        group_id,
        count,
        ctx.render_people()
    ))
}

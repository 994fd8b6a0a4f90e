use crate::cli::context::CliContext;
use crate::error::RosterResult;
use crate::ops::person_ops::{self, PersonEdit};
use crate::queries::person_queries::PersonFilter;
use crate::queries::stats_queries;

pub fn add(
    ctx: &mut CliContext,
    name: &str,
    nusnetid: &str,
    telegram: &str,
    group: &str,
    phone: Option<&str>,
    email: Option<&str>,
) -> RosterResult<String> {
    let person = person_ops::add_student(&mut ctx.roster, name, nusnetid, telegram, group, phone, email)?;
    Ok(format!(
        "New student added: {}",
        CliContext::format_person(&person)
    ))
}

pub fn edit(ctx: &mut CliContext, index: usize, edit: PersonEdit<'_>) -> RosterResult<String> {
    let target = ctx.person_at(index)?;
    let person = person_ops::edit_student(&mut ctx.roster, &target.nusnetid, edit)?;
    Ok(format!("Edited student: {}", CliContext::format_person(&person)))
}

pub fn delete(ctx: &mut CliContext, index: usize) -> RosterResult<String> {
    let target = ctx.person_at(index)?;
    let removed = person_ops::delete_student(&mut ctx.roster, &target.nusnetid)?;
    Ok(format!("Deleted student: {} ({})", removed.name, removed.nusnetid))
}

pub fn list(ctx: &mut CliContext) -> RosterResult<String> {
    ctx.person_filter = PersonFilter::All;
    let count = ctx.shown_people().len();
    if count == 0 {
        return Ok("No students yet. Use 'add_student' to add one.".into());
    }
    Ok(format!("Listed all students ({}):\n{}", count, ctx.render_people()))
}

pub fn find(ctx: &mut CliContext, keywords: &[String]) -> RosterResult<String> {
    ctx.person_filter = PersonFilter::NameKeywords(keywords.to_vec());
    let count = ctx.shown_people().len();
    Ok(format!("{} student(s) listed!\n{}", count, ctx.render_people()))
}

pub fn stats(ctx: &CliContext) -> RosterResult<String> {
    let s = stats_queries::stats(&ctx.roster);
    Ok(format!(
        "Roster statistics:\n  Students: {}\n  Groups: {} ({} empty)\n  Consultations: {}\n  Homework outstanding: {} ({} late)",
        s.students, s.groups, s.empty_groups, s.consultations, s.homework_outstanding, s.homework_late
    ))
}

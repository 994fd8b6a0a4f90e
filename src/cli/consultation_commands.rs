use crate::cli::context::CliContext;
use crate::error::RosterResult;
use crate::model::Nusnetid;
use crate::ops::consultation_ops;
use crate::queries::consultation_queries::ConsultationFilter;

pub fn add(ctx: &mut CliContext, nusnetid: &Nusnetid, from: &str, to: &str) -> RosterResult<String> {
    let consultation = consultation_ops::schedule(&mut ctx.roster, nusnetid, from, to)?;
    Ok(format!("New consultation added: {}", consultation))
}

pub fn delete(ctx: &mut CliContext, nusnetid: &Nusnetid) -> RosterResult<String> {
    let consultation = consultation_ops::cancel(&mut ctx.roster, nusnetid)?;
    Ok(format!("Deleted consultation: {}", consultation))
}

pub fn list(ctx: &mut CliContext) -> RosterResult<String> {
    ctx.consultation_filter = ConsultationFilter::All;
    let shown = ctx.shown_consultations();
    if shown.is_empty() {
        return Ok("No consultations scheduled.".into());
    }
    let lines: Vec<String> = shown
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let name = ctx
                .roster
                .find_person(&c.nusnetid)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            format!("  {}. {} {}", i + 1, name, c)
        })
        .collect();
    Ok(format!("Consultations ({}):\n{}", shown.len(), lines.join("\n")))
}

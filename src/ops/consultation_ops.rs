use crate::error::RosterResult;
use crate::model::{Consultation, Nusnetid};
use crate::store::Roster;

/// Books a consultation for `nusnetid` from `from` to `to`, both given in
/// `YYYYMMDD HHMM` form.
pub fn schedule(roster: &mut Roster, nusnetid: &Nusnetid, from: &str, to: &str) -> RosterResult<Consultation> {
    let from = Consultation::parse_time(from)?;
    let to = Consultation::parse_time(to)?;
    let consultation = Consultation::new(nusnetid.clone(), from, to)?;
    roster.add_consultation(consultation.clone())?;
    Ok(consultation)
}

pub fn cancel(roster: &mut Roster, nusnetid: &Nusnetid) -> RosterResult<Consultation> {
    roster.remove_consultation(nusnetid)
}

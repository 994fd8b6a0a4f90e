use crate::model::{Consultation, Nusnetid};
use crate::store::Roster;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConsultationFilter {
    #[default]
    All,
    Student(Nusnetid),
}

impl ConsultationFilter {
    pub fn matches(&self, consultation: &Consultation) -> bool {
        match self {
            ConsultationFilter::All => true,
            ConsultationFilter::Student(nusnetid) => &consultation.nusnetid == nusnetid,
        }
    }
}

/// Consultations matching `filter`, earliest first.
pub fn upcoming<'a>(roster: &'a Roster, filter: &ConsultationFilter) -> Vec<&'a Consultation> {
    let mut consultations: Vec<&Consultation> = roster
        .consultations()
        .iter()
        .filter(|c| filter.matches(c))
        .collect();
    consultations.sort_by_key(|c| c.from);
    consultations
}

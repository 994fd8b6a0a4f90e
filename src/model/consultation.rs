use chrono::NaiveDateTime;
use std::fmt;

use super::person::Nusnetid;
use crate::error::{RosterError, RosterResult};

/// Format accepted on the command line, e.g. `20241021 1400`.
pub const INPUT_FORMAT: &str = "%Y%m%d %H%M";
/// Format used when displaying consultation times.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A consultation slot `[from, to)` booked by one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consultation {
    pub nusnetid: Nusnetid,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

/// Identity of a consultation: owner plus exact time range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationKey {
    pub nusnetid: Nusnetid,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl fmt::Display for ConsultationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} to {}",
            self.nusnetid,
            self.from.format(DISPLAY_FORMAT),
            self.to.format(DISPLAY_FORMAT)
        )
    }
}

impl Consultation {
    pub fn new(nusnetid: Nusnetid, from: NaiveDateTime, to: NaiveDateTime) -> RosterResult<Self> {
        if from >= to {
            return Err(RosterError::InvalidField {
                field: "Consultation",
                message: "end time must be after start time".into(),
            });
        }
        Ok(Self { nusnetid, from, to })
    }

    /// Parse a time in [`INPUT_FORMAT`].
    pub fn parse_time(s: &str) -> RosterResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(s.trim(), INPUT_FORMAT).map_err(|_| {
            RosterError::InvalidField {
                field: "Consultation time",
                message: format!("'{}' should be in the format YYYYMMDD HHMM", s.trim()),
            }
        })
    }

    pub fn key(&self) -> ConsultationKey {
        ConsultationKey {
            nusnetid: self.nusnetid.clone(),
            from: self.from,
            to: self.to,
        }
    }

    /// Half-open interval test: slots that merely touch do not overlap.
    pub fn overlaps(&self, other: &Consultation) -> bool {
        self.from < other.to && other.from < self.to
    }

    /// Same time range, owned by `nusnetid`.
    pub fn with_owner(&self, nusnetid: Nusnetid) -> Self {
        Self {
            nusnetid,
            from: self.from,
            to: self.to,
        }
    }
}

impl fmt::Display for Consultation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} to {}",
            self.nusnetid,
            self.from.format(DISPLAY_FORMAT),
            self.to.format(DISPLAY_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(from: &str, to: &str) -> Consultation {
        Consultation::new(
            Nusnetid::parse("E1234567").unwrap(),
            Consultation::parse_time(from).unwrap(),
            Consultation::parse_time(to).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn partially_covered_slots_overlap() {
        let a = slot("20241021 1400", "20241021 1500");
        let b = slot("20241021 1430", "20241021 1530");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_slots_do_not_overlap() {
        let a = slot("20241021 1400", "20241021 1500");
        let b = slot("20241021 1500", "20241021 1600");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn contained_slot_overlaps() {
        let outer = slot("20241021 1300", "20241021 1700");
        let inner = slot("20241021 1400", "20241021 1410");
        assert!(outer.overlaps(&inner));
    }

    #[test]
    fn new_rejects_empty_interval() {
        let t = Consultation::parse_time("20241021 1400").unwrap();
        assert!(Consultation::new(Nusnetid::parse("E1234567").unwrap(), t, t).is_err());
    }

    #[test]
    fn parse_time_rejects_bad_format() {
        assert!(Consultation::parse_time("2024-10-21 14:00").is_err());
    }
}

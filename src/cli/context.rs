use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{RosterError, RosterResult};
use crate::model::{Consultation, Person};
use crate::queries::consultation_queries::{self, ConsultationFilter};
use crate::queries::person_queries::{self, PersonFilter};
use crate::storage;
use crate::store::Roster;

pub struct CliContext {
    pub roster: Roster,
    /// Where the roster is saved after each mutating command. `None` keeps
    /// everything in memory.
    pub data_file: Option<PathBuf>,
    pub person_filter: PersonFilter,
    pub consultation_filter: ConsultationFilter,
}

impl CliContext {
    pub fn new(roster: Roster, data_file: Option<PathBuf>) -> Self {
        Self {
            roster,
            data_file,
            person_filter: PersonFilter::All,
            consultation_filter: ConsultationFilter::All,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Roster::new(), None)
    }

    /// Students currently shown, in roster order.
    pub fn shown_people(&self) -> Vec<&Person> {
        person_queries::filtered_people(&self.roster, &self.person_filter)
    }

    pub fn shown_consultations(&self) -> Vec<&Consultation> {
        consultation_queries::upcoming(&self.roster, &self.consultation_filter)
    }

    /// The student at 1-based `index` in the shown list.
    pub fn person_at(&self, index: usize) -> RosterResult<Person> {
        index
            .checked_sub(1)
            .and_then(|i| self.shown_people().get(i).map(|p| (*p).clone()))
            .ok_or(RosterError::InvalidIndex(index))
    }

    pub fn save(&self) -> RosterResult<()> {
        match &self.data_file {
            Some(path) => storage::save(path, &self.roster),
            None => Ok(()),
        }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    pub fn format_person(person: &Person) -> String {
        let mut line = format!(
            "{} ({}) {} [{}]",
            person.name, person.nusnetid, person.telegram, person.group_id
        );
        if let Some(phone) = &person.phone {
            line.push_str(&format!(" phone: {}", phone));
        }
        if let Some(email) = &person.email {
            line.push_str(&format!(" email: {}", email));
        }
        if !person.homework.is_empty() {
            let hw: Vec<String> = person
                .homework
                .iter()
                .map(|h| format!("{}:{}", h.id, h.status.as_str()))
                .collect();
            line.push_str(&format!("\n      homework: {}", hw.join(", ")));
        }
        if !person.attendance.is_empty() {
            let weeks: Vec<String> = person
                .attendance
                .iter()
                .map(|a| format!("w{}:{}", a.week, a.status.as_str()))
                .collect();
            line.push_str(&format!("\n      attendance: {}", weeks.join(", ")));
        }
        if let Some(consultation) = &person.consultation {
            line.push_str(&format!("\n      consultation: {}", consultation));
        }
        line
    }

    /// Numbered listing of the shown students.
    pub fn render_people(&self) -> String {
        let people = self.shown_people();
        if people.is_empty() {
            return "No students to show.".into();
        }
        people
            .iter()
            .enumerate()
            .map(|(i, p)| format!("  {}. {}", i + 1, Self::format_person(p)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

use super::ids::{Id, IdFormat};
use super::person::Nusnetid;

static GROUP_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]\d{2}$").unwrap());

pub type GroupId = Id<Group>;

impl IdFormat for Group {
    const FIELD: &'static str = "Group";
    const CONSTRAINTS: &'static str = "should be a letter followed by 2 digits, e.g. T01";

    fn is_valid(value: &str) -> bool {
        GROUP_ID_RE.is_match(value)
    }
}

/// A tutorial group. Members are held by identity; the store keeps them in
/// step with each person's `group_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub members: Vec<Nusnetid>,
}

impl Group {
    pub fn create(id: GroupId) -> Self {
        Self {
            id,
            members: Vec::new(),
        }
    }

    pub fn has_member(&self, nusnetid: &Nusnetid) -> bool {
        self.members.contains(nusnetid)
    }

    /// Appends `nusnetid` unless already listed.
    pub fn with_member(&self, nusnetid: &Nusnetid) -> Self {
        let mut members = self.members.clone();
        if !members.contains(nusnetid) {
            members.push(nusnetid.clone());
        }
        Self {
            id: self.id.clone(),
            members,
        }
    }

    /// Inserts `nusnetid` at `index` (clamped to the end) unless already listed.
    pub fn with_member_at(&self, index: usize, nusnetid: &Nusnetid) -> Self {
        let mut members = self.members.clone();
        if !members.contains(nusnetid) {
            members.insert(index.min(members.len()), nusnetid.clone());
        }
        Self {
            id: self.id.clone(),
            members,
        }
    }

    pub fn without_member(&self, nusnetid: &Nusnetid) -> Self {
        Self {
            id: self.id.clone(),
            members: self
                .members
                .iter()
                .filter(|m| *m != nusnetid)
                .cloned()
                .collect(),
        }
    }
}

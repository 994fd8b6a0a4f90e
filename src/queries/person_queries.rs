use crate::error::{EntityKind, RosterError, RosterResult};
use crate::model::{GroupId, Person};
use crate::store::Roster;

/// Predicate selecting which students are displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonFilter {
    #[default]
    All,
    /// Name contains any keyword, ignoring case.
    NameKeywords(Vec<String>),
    InGroup(GroupId),
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            PersonFilter::All => true,
            PersonFilter::NameKeywords(keywords) => {
                let name = person.name.to_lowercase();
                keywords.iter().any(|k| name.contains(&k.to_lowercase()))
            }
            PersonFilter::InGroup(group_id) => &person.group_id == group_id,
        }
    }
}

/// Students matching `filter`, in roster order.
pub fn filtered_people<'a>(roster: &'a Roster, filter: &PersonFilter) -> Vec<&'a Person> {
    roster.persons().iter().filter(|p| filter.matches(p)).collect()
}

/// Members of `group_id` in the order the group lists them.
pub fn group_members<'a>(roster: &'a Roster, group_id: &GroupId) -> RosterResult<Vec<&'a Person>> {
    let group = roster
        .find_group(group_id)
        .ok_or_else(|| RosterError::not_found(EntityKind::Group, group_id))?;
    Ok(group
        .members
        .iter()
        .filter_map(|m| roster.find_person(m))
        .collect())
}

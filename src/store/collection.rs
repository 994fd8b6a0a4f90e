use std::fmt;

use crate::error::{EntityKind, RosterError, RosterResult};
use crate::model::{Consultation, ConsultationKey, Group, GroupId, Nusnetid, Person};

/// A value stored in an [`EntityCollection`], identified by `key()`.
pub trait Entity: Clone {
    type Key: PartialEq + Clone + fmt::Display;
    const KIND: EntityKind;

    fn key(&self) -> Self::Key;

    fn has_key(&self, key: &Self::Key) -> bool {
        &self.key() == key
    }
}

impl Entity for Person {
    type Key = Nusnetid;
    const KIND: EntityKind = EntityKind::Person;

    fn key(&self) -> Nusnetid {
        self.nusnetid.clone()
    }

    fn has_key(&self, key: &Nusnetid) -> bool {
        &self.nusnetid == key
    }
}

impl Entity for Group {
    type Key = GroupId;
    const KIND: EntityKind = EntityKind::Group;

    fn key(&self) -> GroupId {
        self.id.clone()
    }

    fn has_key(&self, key: &GroupId) -> bool {
        &self.id == key
    }
}

impl Entity for Consultation {
    type Key = ConsultationKey;
    const KIND: EntityKind = EntityKind::Consultation;

    fn key(&self) -> ConsultationKey {
        Consultation::key(self)
    }
}

/// Insertion-ordered list of entities with unique identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCollection<T> {
    items: Vec<T>,
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> EntityCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: T) -> RosterResult<()> {
        let key = entity.key();
        if self.contains(&key) {
            return Err(RosterError::duplicate(T::KIND, key));
        }
        self.items.push(entity);
        Ok(())
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.position(key).is_some()
    }

    pub fn find(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|e| e.has_key(key))
    }

    /// Swaps the entity stored under `key` for `replacement`, keeping its
    /// position. Returns the previous value.
    pub fn replace(&mut self, key: &T::Key, replacement: T) -> RosterResult<T> {
        let index = self
            .position(key)
            .ok_or_else(|| RosterError::not_found(T::KIND, key))?;
        let new_key = replacement.key();
        if &new_key != key && self.contains(&new_key) {
            return Err(RosterError::duplicate(T::KIND, new_key));
        }
        Ok(std::mem::replace(&mut self.items[index], replacement))
    }

    pub fn remove(&mut self, key: &T::Key) -> RosterResult<T> {
        let index = self
            .position(key)
            .ok_or_else(|| RosterError::not_found(T::KIND, key))?;
        Ok(self.items.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, key: &T::Key) -> Option<usize> {
        self.items.iter().position(|e| e.has_key(key))
    }
}

impl<'a, T: Entity> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str) -> Group {
        Group::create(GroupId::parse(id).unwrap())
    }

    fn key(id: &str) -> GroupId {
        GroupId::parse(id).unwrap()
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut groups = EntityCollection::new();
        for id in ["T03", "T01", "T02"] {
            groups.add(group(id)).unwrap();
        }
        let ids: Vec<String> = groups.iter().map(|g| g.id.to_string()).collect();
        assert_eq!(ids, vec!["T03", "T01", "T02"]);
    }

    #[test]
    fn add_rejects_duplicate_identity() {
        let mut groups = EntityCollection::new();
        groups.add(group("T01")).unwrap();
        assert!(matches!(
            groups.add(group("T01")),
            Err(RosterError::DuplicateEntity {
                kind: EntityKind::Group,
                ..
            })
        ));
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn find_returns_none_when_absent() {
        let groups: EntityCollection<Group> = EntityCollection::new();
        assert!(groups.find(&key("T01")).is_none());
    }

    #[test]
    fn replace_keeps_position() {
        let mut groups = EntityCollection::new();
        groups.add(group("T01")).unwrap();
        groups.add(group("T02")).unwrap();
        groups.add(group("T03")).unwrap();
        groups.replace(&key("T02"), group("T09")).unwrap();
        let ids: Vec<String> = groups.iter().map(|g| g.id.to_string()).collect();
        assert_eq!(ids, vec!["T01", "T09", "T03"]);
    }

    #[test]
    fn replace_with_same_identity_is_allowed() {
        let mut groups = EntityCollection::new();
        groups.add(group("T01")).unwrap();
        assert!(groups.replace(&key("T01"), group("T01")).is_ok());
    }

    #[test]
    fn replace_rejects_identity_of_other_entity() {
        let mut groups = EntityCollection::new();
        groups.add(group("T01")).unwrap();
        groups.add(group("T02")).unwrap();
        assert!(matches!(
            groups.replace(&key("T01"), group("T02")),
            Err(RosterError::DuplicateEntity { .. })
        ));
    }

    #[test]
    fn replace_missing_is_not_found() {
        let mut groups = EntityCollection::new();
        assert!(matches!(
            groups.replace(&key("T01"), group("T01")),
            Err(RosterError::EntityNotFound { .. })
        ));
    }

    #[test]
    fn remove_deletes_and_reports_missing() {
        let mut groups = EntityCollection::new();
        groups.add(group("T01")).unwrap();
        let removed = groups.remove(&key("T01")).unwrap();
        assert_eq!(removed.id, key("T01"));
        assert!(groups.is_empty());
        assert!(groups.remove(&key("T01")).is_err());
    }
}

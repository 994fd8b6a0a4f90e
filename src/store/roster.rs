use tracing::{debug, info};

use super::collection::EntityCollection;
use crate::error::{EntityKind, RosterError, RosterResult};
use crate::model::{Consultation, Group, GroupId, Nusnetid, Person};

/// Position a person held in their group's member list before being
/// detached, so an in-place edit can put them back where they were.
type MemberSlot = Option<usize>;

/// In-memory roster of students, tutorial groups and consultations.
///
/// The roster is the only place that touches more than one collection in a
/// single operation. After every public method returns:
/// - each person's group exists and lists the person;
/// - every group member is a stored person whose `group_id` names the group;
/// - no two persons share a nusnetid;
/// - no two consultations overlap.
///
/// Failed operations leave the roster as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    persons: EntityCollection<Person>,
    groups: EntityCollection<Group>,
    consultations: EntityCollection<Consultation>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persons(&self) -> &EntityCollection<Person> {
        &self.persons
    }

    pub fn groups(&self) -> &EntityCollection<Group> {
        &self.groups
    }

    pub fn consultations(&self) -> &EntityCollection<Consultation> {
        &self.consultations
    }

    pub fn find_person(&self, nusnetid: &Nusnetid) -> Option<&Person> {
        self.persons.find(nusnetid)
    }

    pub fn has_person(&self, nusnetid: &Nusnetid) -> bool {
        self.persons.contains(nusnetid)
    }

    pub fn find_group(&self, group_id: &GroupId) -> Option<&Group> {
        self.groups.find(group_id)
    }

    pub fn has_group(&self, group_id: &GroupId) -> bool {
        self.groups.contains(group_id)
    }

    // ------------------------------------------------------------------
    // Persons
    // ------------------------------------------------------------------

    /// Adds a student, creating their group first if it does not exist yet.
    /// Any consultation on `person` is dropped; slots are booked through
    /// [`Roster::add_consultation`] only.
    pub fn add_person(&mut self, person: Person) -> RosterResult<()> {
        let person = person.with_consultation(None);
        if self.has_person(&person.nusnetid) {
            return Err(RosterError::duplicate(EntityKind::Person, &person.nusnetid));
        }
        self.attach(&person.nusnetid, &person.group_id, None)?;
        info!(nusnetid = %person.nusnetid, group = %person.group_id, "added student");
        self.persons.add(person)
    }

    /// Replaces the student identified by `target` with `edited`.
    ///
    /// Runs as a fixed sequence: detach from the old group, check the new
    /// identity, swap the person, re-key consultations if the nusnetid
    /// changed, then attach to the resulting group. Any failure before the
    /// swap restores the old membership.
    pub fn replace_person(&mut self, target: &Nusnetid, edited: Person) -> RosterResult<Person> {
        let old = self
            .persons
            .find(target)
            .cloned()
            .ok_or_else(|| RosterError::not_found(EntityKind::Person, target))?;
        let id_changed = old.nusnetid != edited.nusnetid;

        let slot = self.detach(&old.nusnetid, &old.group_id)?;

        if id_changed && self.persons.contains(&edited.nusnetid) {
            self.attach(&old.nusnetid, &old.group_id, slot)?;
            return Err(RosterError::duplicate(EntityKind::Person, &edited.nusnetid));
        }

        let rewrites = if id_changed {
            match self.consultation_rewrites(&old.nusnetid, &edited.nusnetid) {
                Ok(rewrites) => rewrites,
                Err(e) => {
                    self.attach(&old.nusnetid, &old.group_id, slot)?;
                    return Err(e);
                }
            }
        } else {
            Vec::new()
        };

        // The booked slot always carries over; it only changes through the
        // consultation operations.
        let carried = old
            .consultation
            .as_ref()
            .map(|c| c.with_owner(edited.nusnetid.clone()));
        let edited = edited.with_consultation(carried);

        if let Err(e) = self.persons.replace(&old.nusnetid, edited.clone()) {
            self.attach(&old.nusnetid, &old.group_id, slot)?;
            return Err(e);
        }

        for (old_consultation, new_consultation) in rewrites {
            debug!(consultation = %new_consultation, "re-keyed consultation");
            self.consultations
                .replace(&old_consultation.key(), new_consultation)?;
        }

        let same_group = old.group_id == edited.group_id;
        self.attach(
            &edited.nusnetid,
            &edited.group_id,
            if same_group { slot } else { None },
        )?;

        if id_changed {
            info!(from = %old.nusnetid, to = %edited.nusnetid, "changed student nusnetid");
        } else {
            debug!(nusnetid = %edited.nusnetid, "replaced student");
        }
        Ok(edited)
    }

    /// Removes a student along with their consultations. The student's
    /// group is kept even if it becomes empty.
    pub fn remove_person(&mut self, nusnetid: &Nusnetid) -> RosterResult<Person> {
        let removed = self.persons.remove(nusnetid)?;
        self.detach(&removed.nusnetid, &removed.group_id)?;

        let owned: Vec<_> = self
            .consultations
            .iter()
            .filter(|c| c.nusnetid == removed.nusnetid)
            .map(|c| c.key())
            .collect();
        for key in owned {
            self.consultations.remove(&key)?;
        }

        info!(nusnetid = %removed.nusnetid, "removed student");
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Creates an empty group.
    pub fn add_group(&mut self, group_id: GroupId) -> RosterResult<&Group> {
        self.groups.add(Group::create(group_id.clone()))?;
        info!(group = %group_id, "created group");
        self.groups
            .find(&group_id)
            .ok_or_else(|| RosterError::not_found(EntityKind::Group, &group_id))
    }

    /// Moves a student into `new_group`, creating it if needed.
    pub fn move_student_to_new_group(
        &mut self,
        nusnetid: &Nusnetid,
        new_group: GroupId,
    ) -> RosterResult<Person> {
        let student = self
            .persons
            .find(nusnetid)
            .cloned()
            .ok_or_else(|| RosterError::not_found(EntityKind::Person, nusnetid))?;
        if student.group_id == new_group {
            return Err(RosterError::SameGroup);
        }

        let slot = self.detach(&student.nusnetid, &student.group_id)?;
        let moved = student.with_group(new_group);
        if let Err(e) = self.persons.replace(&student.nusnetid, moved.clone()) {
            self.attach(&student.nusnetid, &student.group_id, slot)?;
            return Err(e);
        }
        self.attach(&moved.nusnetid, &moved.group_id, None)?;

        info!(nusnetid = %moved.nusnetid, from = %student.group_id, to = %moved.group_id, "moved student");
        Ok(moved)
    }

    // ------------------------------------------------------------------
    // Consultations
    // ------------------------------------------------------------------

    /// Books `consultation` for its owner. A student holds at most one
    /// consultation and no two consultations may overlap, whoever owns them.
    pub fn add_consultation(&mut self, consultation: Consultation) -> RosterResult<()> {
        let owner = self
            .persons
            .find(&consultation.nusnetid)
            .cloned()
            .ok_or_else(|| RosterError::not_found(EntityKind::Person, &consultation.nusnetid))?;
        if owner.consultation.is_some() {
            return Err(RosterError::duplicate(EntityKind::Consultation, &owner.nusnetid));
        }
        self.insert_consultation(consultation.clone())?;
        self.persons
            .replace(&owner.nusnetid, owner.with_consultation(Some(consultation)))?;
        Ok(())
    }

    /// Cancels the consultation held by `nusnetid`.
    pub fn remove_consultation(&mut self, nusnetid: &Nusnetid) -> RosterResult<Consultation> {
        let owner = self
            .persons
            .find(nusnetid)
            .cloned()
            .ok_or_else(|| RosterError::not_found(EntityKind::Person, nusnetid))?;
        let consultation = owner
            .consultation
            .clone()
            .ok_or_else(|| RosterError::not_found(EntityKind::Consultation, nusnetid))?;

        self.consultations.remove(&consultation.key())?;
        self.persons
            .replace(&owner.nusnetid, owner.with_consultation(None))?;

        info!(consultation = %consultation, "removed consultation");
        Ok(consultation)
    }

    /// True iff `candidate` overlaps any stored consultation.
    pub fn consultation_overlaps(&self, candidate: &Consultation) -> bool {
        self.consultations.iter().any(|c| candidate.overlaps(c))
    }

    /// Stores a consultation without touching its owner's record.
    fn insert_consultation(&mut self, consultation: Consultation) -> RosterResult<()> {
        if self.consultations.contains(&consultation.key()) {
            return Err(RosterError::duplicate(
                EntityKind::Consultation,
                consultation.key(),
            ));
        }
        if self.consultation_overlaps(&consultation) {
            return Err(RosterError::OverlappingConsultation);
        }
        info!(consultation = %consultation, "added consultation");
        self.consultations.add(consultation)
    }

    /// Pairs each consultation owned by `old_id` with its replacement owned by
    /// `new_id`. Fails if a replacement would collide with a stored one.
    fn consultation_rewrites(
        &self,
        old_id: &Nusnetid,
        new_id: &Nusnetid,
    ) -> RosterResult<Vec<(Consultation, Consultation)>> {
        let mut rewrites = Vec::new();
        for c in self.consultations.iter().filter(|c| &c.nusnetid == old_id) {
            let rekeyed = c.with_owner(new_id.clone());
            if self.consultations.contains(&rekeyed.key()) {
                return Err(RosterError::duplicate(EntityKind::Consultation, rekeyed.key()));
            }
            if self
                .consultations
                .iter()
                .any(|other| other != c && other.overlaps(&rekeyed))
            {
                return Err(RosterError::OverlappingConsultation);
            }
            rewrites.push((c.clone(), rekeyed));
        }
        Ok(rewrites)
    }

    // ------------------------------------------------------------------
    // Group membership
    // ------------------------------------------------------------------

    /// Removes `nusnetid` from the member list of `group_id`, returning the
    /// position it held.
    fn detach(&mut self, nusnetid: &Nusnetid, group_id: &GroupId) -> RosterResult<MemberSlot> {
        let Some(group) = self.groups.find(group_id) else {
            return Ok(None);
        };
        let Some(position) = group.members.iter().position(|m| m == nusnetid) else {
            return Ok(None);
        };
        let updated = group.without_member(nusnetid);
        self.groups.replace(group_id, updated)?;
        Ok(Some(position))
    }

    /// Lists `nusnetid` in `group_id`, creating the group if needed.
    fn attach(&mut self, nusnetid: &Nusnetid, group_id: &GroupId, slot: MemberSlot) -> RosterResult<()> {
        match self.groups.find(group_id) {
            None => {
                debug!(group = %group_id, "auto-creating group");
                self.groups.add(Group::create(group_id.clone()).with_member(nusnetid))
            }
            Some(group) => {
                let updated = match slot {
                    Some(index) => group.with_member_at(index, nusnetid),
                    None => group.with_member(nusnetid),
                };
                self.groups.replace(group_id, updated).map(|_| ())
            }
        }
    }
}

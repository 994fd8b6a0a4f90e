use crate::model::HomeworkStatus;
use crate::store::Roster;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStats {
    pub students: usize,
    pub groups: usize,
    /// Groups with no members.
    pub empty_groups: usize,
    pub consultations: usize,
    /// Assigned homework not yet marked complete, across all students.
    pub homework_outstanding: usize,
    pub homework_late: usize,
}

pub fn stats(roster: &Roster) -> RosterStats {
    let homework = roster.persons().iter().flat_map(|p| p.homework.iter());
    let (mut outstanding, mut late) = (0, 0);
    for hw in homework {
        match hw.status {
            HomeworkStatus::Complete => {}
            HomeworkStatus::Incomplete => outstanding += 1,
            HomeworkStatus::Late => {
                outstanding += 1;
                late += 1;
            }
        }
    }

    RosterStats {
        students: roster.persons().len(),
        groups: roster.groups().len(),
        empty_groups: roster.groups().iter().filter(|g| g.members.is_empty()).count(),
        consultations: roster.consultations().len(),
        homework_outstanding: outstanding,
        homework_late: late,
    }
}

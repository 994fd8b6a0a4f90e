use chrono::NaiveDate;
use roster::error::{EntityKind, RosterError};
use roster::model::*;

fn at(day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn nusnetid(s: &str) -> Nusnetid {
    Nusnetid::parse(s).unwrap()
}

// ==========================================================================
// IDENTIFIER TESTS
// ==========================================================================

#[test]
fn nusnetid_is_normalised_to_upper_case() {
    let id = Nusnetid::parse(" e1234567 ").unwrap();
    assert_eq!(id.as_str(), "E1234567");
}

#[test]
fn nusnetid_rejects_bad_format() {
    for bad in ["", "E123456", "E12345678", "A1234567", "E12345a7"] {
        assert!(
            matches!(Nusnetid::parse(bad), Err(RosterError::InvalidField { .. })),
            "{} should be rejected",
            bad
        );
    }
}

#[test]
fn group_id_format() {
    assert_eq!(GroupId::parse("t01").unwrap().as_str(), "T01");
    assert!(GroupId::parse("T1").is_err());
    assert!(GroupId::parse("01T").is_err());
}

// ==========================================================================
// PERSON TESTS
// ==========================================================================

#[test]
fn person_identity_is_nusnetid() {
    let a = Person::create("Alex".into(), nusnetid("E1234567"), "@alexyeoh".into(), GroupId::parse("T01").unwrap());
    let mut b = a.clone();
    b.name = "Someone Else".into();
    assert!(a.is_same_person(&b));

    let c = a.with_group(GroupId::parse("T02").unwrap());
    assert!(a.is_same_person(&c));
    assert_eq!(c.group_id.as_str(), "T02");
    assert_eq!(a.group_id.as_str(), "T01");
}

#[test]
fn new_person_has_empty_records() {
    let p = Person::create("Alex".into(), nusnetid("E1234567"), "@alexyeoh".into(), GroupId::parse("T01").unwrap());
    assert!(p.homework.is_empty());
    assert!(p.attendance.is_empty());
    assert!(p.consultation.is_none());
    assert!(p.phone.is_none());
}

// ==========================================================================
// GROUP TESTS
// ==========================================================================

#[test]
fn group_member_helpers_do_not_duplicate() {
    let a = nusnetid("E0000001");
    let b = nusnetid("E0000002");
    let group = Group::create(GroupId::parse("T01").unwrap())
        .with_member(&a)
        .with_member(&a)
        .with_member_at(0, &b);
    assert_eq!(group.members, vec![b.clone(), a.clone()]);

    let smaller = group.without_member(&b);
    assert_eq!(smaller.members, vec![a]);
    assert!(group.has_member(&b));
}

// ==========================================================================
// HOMEWORK TESTS
// ==========================================================================

#[test]
fn homework_boundaries() {
    let tracker = HomeworkTracker::new();
    assert!(matches!(tracker.add(0), Err(RosterError::InvalidRange { .. })));
    assert!(matches!(tracker.add(14), Err(RosterError::InvalidRange { .. })));
    assert!(tracker.add(1).is_ok());
    assert!(tracker.add(13).is_ok());
}

#[test]
fn homework_add_is_idempotent() {
    let once = HomeworkTracker::new().add(3).unwrap();
    let marked = once.update_status(3, HomeworkStatus::Complete).unwrap();
    let twice = marked.add(3).unwrap();
    assert_eq!(twice, marked);
    assert_eq!(twice.status(3), Some(HomeworkStatus::Complete));
}

#[test]
fn homework_update_missing_is_not_found() {
    let err = HomeworkTracker::new()
        .update_status(2, HomeworkStatus::Complete)
        .unwrap_err();
    assert!(matches!(
        err,
        RosterError::EntityNotFound {
            kind: EntityKind::Homework,
            ..
        }
    ));
}

#[test]
fn homework_status_parsing() {
    assert_eq!(HomeworkStatus::parse("LATE").unwrap(), HomeworkStatus::Late);
    assert!(matches!(
        HomeworkStatus::parse("done"),
        Err(RosterError::InvalidStatus { .. })
    ));
}

#[test]
fn every_status_parses_from_its_name() {
    for status in HomeworkStatus::ALL {
        assert_eq!(HomeworkStatus::parse(status.as_str()).unwrap(), *status);
    }
    for status in AttendanceStatus::ALL {
        assert_eq!(AttendanceStatus::parse(&status.as_str().to_uppercase()).unwrap(), *status);
    }
    assert!(matches!(
        AttendanceStatus::parse("late"),
        Err(RosterError::InvalidStatus { .. })
    ));
}

// ==========================================================================
// ATTENDANCE TESTS
// ==========================================================================

#[test]
fn attendance_week_boundaries() {
    let sheet = AttendanceSheet::new();
    assert!(sheet.mark(1, AttendanceStatus::Present).is_err());
    assert!(sheet.mark(14, AttendanceStatus::Present).is_err());
    assert!(sheet.mark(2, AttendanceStatus::Present).is_ok());
    assert!(sheet.mark(13, AttendanceStatus::Present).is_ok());
}

#[test]
fn attendance_mark_overwrites() {
    let sheet = AttendanceSheet::new()
        .mark(3, AttendanceStatus::Absent)
        .unwrap()
        .mark(3, AttendanceStatus::Excused)
        .unwrap();
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.status(3), Some(AttendanceStatus::Excused));
}

// ==========================================================================
// CONSULTATION TESTS
// ==========================================================================

#[test]
fn consultation_requires_positive_length() {
    assert!(Consultation::new(nusnetid("E1234567"), at(21, 15, 0), at(21, 14, 0)).is_err());
    assert!(Consultation::new(nusnetid("E1234567"), at(21, 14, 0), at(21, 14, 0)).is_err());
}

#[test]
fn consultation_overlap_is_half_open() {
    let base = Consultation::new(nusnetid("E0000001"), at(21, 14, 0), at(21, 15, 0)).unwrap();
    let inside = Consultation::new(nusnetid("E0000002"), at(21, 14, 30), at(21, 15, 30)).unwrap();
    let touching = Consultation::new(nusnetid("E0000002"), at(21, 15, 0), at(21, 16, 0)).unwrap();

    assert!(base.overlaps(&inside));
    assert!(inside.overlaps(&base));
    assert!(!base.overlaps(&touching));
    assert!(!touching.overlaps(&base));
}

#[test]
fn consultation_parses_input_times() {
    let from = Consultation::parse_time("20241021 1400").unwrap();
    assert_eq!(from, at(21, 14, 0));
    assert!(Consultation::parse_time("2024-10-21 14:00").is_err());
}

#[test]
fn consultation_display() {
    let c = Consultation::new(nusnetid("E1234567"), at(21, 14, 0), at(21, 15, 0)).unwrap();
    assert_eq!(c.to_string(), "E1234567: 2024-10-21 14:00 to 2024-10-21 15:00");
}

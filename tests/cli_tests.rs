use roster::cli::context::CliContext;
use roster::cli::run_line;
use roster::error::RosterError;
use roster::model::*;
use roster::storage;
use tempfile::TempDir;

fn id(s: &str) -> Nusnetid {
    Nusnetid::parse(s).unwrap()
}

fn setup() -> CliContext {
    let mut ctx = CliContext::in_memory();
    for line in [
        "add_student n/Alex Yeoh i/E1234567 t/@alexyeoh g/T01 p/87438807",
        "add_student n/Bernice Yu i/E2345678 t/berniceyu g/T01",
        "add_student n/Charlotte Oliveiro i/E3456789 t/charlotte g/T02 e/charlotte@example.com",
    ] {
        run_line(&mut ctx, line).unwrap();
    }
    ctx
}

fn feedback(ctx: &mut CliContext, line: &str) -> String {
    run_line(ctx, line).unwrap().feedback
}

// ==========================================================================
// STUDENT COMMANDS
// ==========================================================================

#[test]
fn add_student_command() {
    let ctx = setup();
    assert_eq!(ctx.roster.persons().len(), 3);
    let alex = ctx.roster.find_person(&id("E1234567")).unwrap();
    assert_eq!(alex.phone.as_deref(), Some("87438807"));
}

#[test]
fn add_student_missing_prefix_shows_usage() {
    let mut ctx = setup();
    match run_line(&mut ctx, "add_student n/Someone i/E7777777 g/T01") {
        Err(RosterError::Parse(message)) => assert!(message.starts_with("Invalid command format!")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn edit_uses_displayed_index() {
    let mut ctx = setup();
    feedback(&mut ctx, "find charlotte");
    feedback(&mut ctx, "edit_student 1 n/Charlotte O");
    assert_eq!(ctx.roster.find_person(&id("E3456789")).unwrap().name, "Charlotte O");

    assert!(matches!(
        run_line(&mut ctx, "edit_student 2 n/Nobody"),
        Err(RosterError::InvalidIndex(2))
    ));
}

#[test]
fn delete_after_list() {
    let mut ctx = setup();
    feedback(&mut ctx, "list");
    let out = feedback(&mut ctx, "delete_student 2");
    assert!(out.contains("Bernice Yu"));
    assert_eq!(ctx.roster.persons().len(), 2);
}

#[test]
fn list_resets_filter() {
    let mut ctx = setup();
    feedback(&mut ctx, "find alex");
    assert_eq!(ctx.shown_people().len(), 1);
    feedback(&mut ctx, "list");
    assert_eq!(ctx.shown_people().len(), 3);
}

// ==========================================================================
// GROUP COMMANDS
// ==========================================================================

#[test]
fn find_group_filters_list() {
    let mut ctx = setup();
    let out = feedback(&mut ctx, "find_group g/t01");
    assert!(out.contains("2 student(s)"));
    assert_eq!(ctx.shown_people().len(), 2);
}

#[test]
fn add_to_same_group_is_rejected() {
    let mut ctx = setup();
    assert!(matches!(
        run_line(&mut ctx, "add_to_group i/E1234567 g/T01"),
        Err(RosterError::SameGroup)
    ));
    feedback(&mut ctx, "add_to_group i/E1234567 g/T02");
    assert_eq!(ctx.roster.find_person(&id("E1234567")).unwrap().group_id.as_str(), "T02");
}

// ==========================================================================
// HOMEWORK AND ATTENDANCE COMMANDS
// ==========================================================================

#[test]
fn homework_commands() {
    let mut ctx = setup();
    let out = feedback(&mut ctx, "add_hw i/all a/1");
    assert!(out.contains("3 student(s)"));
    feedback(&mut ctx, "mark_hw i/E1234567 a/1 status/complete");
    assert_eq!(
        ctx.roster.find_person(&id("E1234567")).unwrap().homework.status(1),
        Some(HomeworkStatus::Complete)
    );
    feedback(&mut ctx, "delete_hw i/E2345678 a/1");
    assert!(!ctx.roster.find_person(&id("E2345678")).unwrap().homework.contains(1));
}

#[test]
fn mark_missing_homework_suggests_add() {
    let mut ctx = setup();
    match run_line(&mut ctx, "mark_hw i/E1234567 a/2 status/complete") {
        Err(RosterError::Parse(message)) => assert!(message.ends_with("Add it first using 'add_hw'.")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn mark_all_attendance_shows_group() {
    let mut ctx = setup();
    feedback(&mut ctx, "mark_all_attendance g/T01 w/3 status/present");
    assert_eq!(ctx.shown_people().len(), 2);
    assert_eq!(
        ctx.roster.find_person(&id("E2345678")).unwrap().attendance.status(3),
        Some(AttendanceStatus::Present)
    );
    assert!(run_line(&mut ctx, "mark_attendance i/E3456789 w/1 status/present").is_err());
}

// ==========================================================================
// CONSULTATION COMMANDS
// ==========================================================================

#[test]
fn consultation_commands() {
    let mut ctx = setup();
    feedback(&mut ctx, "add_consult i/E2345678 from/20241022 1000 to/20241022 1100");
    feedback(&mut ctx, "add_consult i/E1234567 from/20241021 1000 to/20241021 1100");
    assert!(matches!(
        run_line(&mut ctx, "add_consult i/E3456789 from/20241021 1030 to/20241021 1130"),
        Err(RosterError::OverlappingConsultation)
    ));

    let out = feedback(&mut ctx, "list_consult");
    let alex = out.find("Alex Yeoh").unwrap();
    let bernice = out.find("Bernice Yu").unwrap();
    assert!(alex < bernice);

    feedback(&mut ctx, "delete_consult i/E1234567");
    assert_eq!(ctx.roster.consultations().len(), 1);
}

// ==========================================================================
// SESSION TESTS
// ==========================================================================

#[test]
fn mutating_commands_are_saved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.json");
    let mut ctx = CliContext::new(Default::default(), Some(path.clone()));

    feedback(&mut ctx, "add_student n/Alex Yeoh i/E1234567 t/alexyeoh g/T01");
    feedback(&mut ctx, "add_hw i/E1234567 a/3");

    let loaded = storage::load(&path).unwrap();
    assert_eq!(loaded, ctx.roster);
}

#[test]
fn failed_save_keeps_the_change_and_warns() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be written as a file.
    let mut ctx = CliContext::new(Default::default(), Some(dir.path().to_path_buf()));

    let out = feedback(&mut ctx, "add_student n/Alex Yeoh i/E1234567 t/alexyeoh g/T01");
    assert!(out.starts_with("New student added"));
    assert!(out.contains("Warning: the change was applied but could not be saved"));
    assert!(ctx.roster.find_person(&id("E1234567")).is_some());
}

#[test]
fn read_only_commands_do_not_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.json");
    let mut ctx = CliContext::new(Default::default(), Some(path.clone()));

    feedback(&mut ctx, "list");
    feedback(&mut ctx, "stats");
    assert!(!path.exists());
}

#[test]
fn exit_ends_session() {
    let mut ctx = CliContext::in_memory();
    assert!(run_line(&mut ctx, "exit").unwrap().exit);
    assert!(!run_line(&mut ctx, "help").unwrap().exit);
}

#[test]
fn unknown_command_is_an_error() {
    let mut ctx = CliContext::in_memory();
    assert!(matches!(run_line(&mut ctx, "fly"), Err(RosterError::Parse(_))));
}

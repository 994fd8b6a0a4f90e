use super::args::*;
use crate::error::{RosterError, RosterResult};
use crate::model::{AttendanceStatus, GroupId, HomeworkStatus, Nusnetid};
use crate::ops::homework_ops::Target;

pub const USAGE_ADD_STUDENT: &str =
    "add_student n/NAME i/NUSNETID t/TELEGRAM g/GROUP [p/PHONE] [e/EMAIL]\n\
     Example: add_student n/Alex Yeoh i/E1234567 t/@alexyeoh g/T01 p/87438807";
pub const USAGE_EDIT_STUDENT: &str =
    "edit_student INDEX [n/NAME] [i/NUSNETID] [t/TELEGRAM] [p/PHONE] [e/EMAIL]\n\
     Example: edit_student 1 p/91234567 e/johndoe@u.nus.edu";
pub const USAGE_DELETE_STUDENT: &str = "delete_student INDEX\nExample: delete_student 2";
pub const USAGE_FIND: &str = "find KEYWORD [MORE_KEYWORDS]...\nExample: find alex david";
pub const USAGE_CREATE_GROUP: &str = "create_group g/GROUP\nExample: create_group g/T12";
pub const USAGE_ADD_TO_GROUP: &str = "add_to_group i/NUSNETID g/GROUP\nExample: add_to_group i/E1234567 g/T01";
pub const USAGE_FIND_GROUP: &str = "find_group g/GROUP\nExample: find_group g/T01";
pub const USAGE_ADD_HW: &str = "add_hw i/NUSNETID|all a/ASSIGNMENT_ID\nExample: add_hw i/all a/1";
pub const USAGE_DELETE_HW: &str = "delete_hw i/NUSNETID|all a/ASSIGNMENT_ID\nExample: delete_hw i/E1234567 a/1";
pub const USAGE_MARK_HW: &str =
    "mark_hw i/NUSNETID a/ASSIGNMENT_ID status/complete|incomplete|late\n\
     Example: mark_hw i/E1234567 a/1 status/complete";
pub const USAGE_MARK_ATTENDANCE: &str =
    "mark_attendance i/NUSNETID w/WEEK status/present|absent|excused\n\
     Example: mark_attendance i/E1234567 w/3 status/present";
pub const USAGE_MARK_ALL_ATTENDANCE: &str =
    "mark_all_attendance g/GROUP w/WEEK status/present|absent|excused\n\
     Example: mark_all_attendance g/T02 w/3 status/present";
pub const USAGE_ADD_CONSULT: &str =
    "add_consult i/NUSNETID from/YYYYMMDD HHMM to/YYYYMMDD HHMM\n\
     Example: add_consult i/E1234567 from/20241021 1400 to/20241021 1500";
pub const USAGE_DELETE_CONSULT: &str = "delete_consult i/NUSNETID\nExample: delete_consult i/E1234567";

/// A parsed user command. Each variant maps to one roster operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddStudent {
        name: String,
        nusnetid: String,
        telegram: String,
        group: String,
        phone: Option<String>,
        email: Option<String>,
    },
    EditStudent {
        index: usize,
        name: Option<String>,
        nusnetid: Option<String>,
        telegram: Option<String>,
        phone: Option<Option<String>>,
        email: Option<Option<String>>,
    },
    DeleteStudent { index: usize },
    List,
    Find { keywords: Vec<String> },
    CreateGroup { group: String },
    AddToGroup { nusnetid: Nusnetid, group: String },
    FindGroup { group: GroupId },
    AddHomework { target: Target, assignment: i64 },
    DeleteHomework { target: Target, assignment: i64 },
    MarkHomework { nusnetid: Nusnetid, assignment: i64, status: HomeworkStatus },
    MarkAttendance { nusnetid: Nusnetid, week: i64, status: AttendanceStatus },
    MarkAllAttendance { group: GroupId, week: i64, status: AttendanceStatus },
    AddConsultation { nusnetid: Nusnetid, from: String, to: String },
    DeleteConsultation { nusnetid: Nusnetid },
    ListConsultations,
    Stats,
    Help,
    Exit,
}

impl Command {
    /// Whether a successful run changes the roster and should be saved.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::List
                | Command::Find { .. }
                | Command::FindGroup { .. }
                | Command::ListConsultations
                | Command::Stats
                | Command::Help
                | Command::Exit
        )
    }
}

/// Parse one input line into a [`Command`].
pub fn parse(input: &str) -> RosterResult<Command> {
    let (word, args) = split_command(input);
    match word {
        "add_student" => parse_add_student(args),
        "edit_student" => parse_edit_student(args),
        "delete_student" => Ok(Command::DeleteStudent {
            index: parse_index(args, USAGE_DELETE_STUDENT)?,
        }),
        "list" => Ok(Command::List),
        "find" => {
            let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
            if keywords.is_empty() {
                return Err(usage(USAGE_FIND));
            }
            Ok(Command::Find { keywords })
        }
        "create_group" => {
            let map = tokenize_exact(args, &[PREFIX_GROUP], USAGE_CREATE_GROUP)?;
            Ok(Command::CreateGroup {
                group: map.required(PREFIX_GROUP, USAGE_CREATE_GROUP)?.to_string(),
            })
        }
        "add_to_group" => {
            let map = tokenize_exact(args, &[PREFIX_NUSNETID, PREFIX_GROUP], USAGE_ADD_TO_GROUP)?;
            Ok(Command::AddToGroup {
                nusnetid: Nusnetid::parse(map.required(PREFIX_NUSNETID, USAGE_ADD_TO_GROUP)?)?,
                group: map.required(PREFIX_GROUP, USAGE_ADD_TO_GROUP)?.to_string(),
            })
        }
        "find_group" => {
            let map = tokenize_exact(args, &[PREFIX_GROUP], USAGE_FIND_GROUP)?;
            Ok(Command::FindGroup {
                group: GroupId::parse(map.required(PREFIX_GROUP, USAGE_FIND_GROUP)?)?,
            })
        }
        "add_hw" => {
            let (target, assignment) = parse_homework_target(args, USAGE_ADD_HW)?;
            Ok(Command::AddHomework { target, assignment })
        }
        "delete_hw" => {
            let (target, assignment) = parse_homework_target(args, USAGE_DELETE_HW)?;
            Ok(Command::DeleteHomework { target, assignment })
        }
        "mark_hw" => {
            let map = tokenize_exact(
                args,
                &[PREFIX_NUSNETID, PREFIX_ASSIGNMENT, PREFIX_STATUS],
                USAGE_MARK_HW,
            )?;
            Ok(Command::MarkHomework {
                nusnetid: Nusnetid::parse(map.required(PREFIX_NUSNETID, USAGE_MARK_HW)?)?,
                assignment: parse_number(map.required(PREFIX_ASSIGNMENT, USAGE_MARK_HW)?, "Homework ID")?,
                status: HomeworkStatus::parse(map.required(PREFIX_STATUS, USAGE_MARK_HW)?)?,
            })
        }
        "mark_attendance" => {
            let map = tokenize_exact(
                args,
                &[PREFIX_NUSNETID, PREFIX_WEEK, PREFIX_STATUS],
                USAGE_MARK_ATTENDANCE,
            )?;
            Ok(Command::MarkAttendance {
                nusnetid: Nusnetid::parse(map.required(PREFIX_NUSNETID, USAGE_MARK_ATTENDANCE)?)?,
                week: parse_number(map.required(PREFIX_WEEK, USAGE_MARK_ATTENDANCE)?, "Week")?,
                status: AttendanceStatus::parse(map.required(PREFIX_STATUS, USAGE_MARK_ATTENDANCE)?)?,
            })
        }
        "mark_all_attendance" => {
            let map = tokenize_exact(
                args,
                &[PREFIX_GROUP, PREFIX_WEEK, PREFIX_STATUS],
                USAGE_MARK_ALL_ATTENDANCE,
            )?;
            Ok(Command::MarkAllAttendance {
                group: GroupId::parse(map.required(PREFIX_GROUP, USAGE_MARK_ALL_ATTENDANCE)?)?,
                week: parse_number(map.required(PREFIX_WEEK, USAGE_MARK_ALL_ATTENDANCE)?, "Week")?,
                status: AttendanceStatus::parse(map.required(PREFIX_STATUS, USAGE_MARK_ALL_ATTENDANCE)?)?,
            })
        }
        "add_consult" => {
            let map = tokenize_exact(
                args,
                &[PREFIX_NUSNETID, PREFIX_FROM, PREFIX_TO],
                USAGE_ADD_CONSULT,
            )?;
            Ok(Command::AddConsultation {
                nusnetid: Nusnetid::parse(map.required(PREFIX_NUSNETID, USAGE_ADD_CONSULT)?)?,
                from: map.required(PREFIX_FROM, USAGE_ADD_CONSULT)?.to_string(),
                to: map.required(PREFIX_TO, USAGE_ADD_CONSULT)?.to_string(),
            })
        }
        "delete_consult" => {
            let map = tokenize_exact(args, &[PREFIX_NUSNETID], USAGE_DELETE_CONSULT)?;
            Ok(Command::DeleteConsultation {
                nusnetid: Nusnetid::parse(map.required(PREFIX_NUSNETID, USAGE_DELETE_CONSULT)?)?,
            })
        }
        "list_consult" => Ok(Command::ListConsultations),
        "stats" => Ok(Command::Stats),
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" | "q" => Ok(Command::Exit),
        "" => Err(RosterError::Parse("Please enter a command.".into())),
        other => Err(RosterError::Parse(format!(
            "Unknown command: {}. Type 'help' for commands.",
            other
        ))),
    }
}

/// Split input into command word and the rest.
fn split_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(char::is_whitespace) {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn usage(usage: &str) -> RosterError {
    RosterError::Parse(format!("Invalid command format!\n{}", usage))
}

/// Tokenizes arguments that must not carry a preamble or repeated prefixes.
fn tokenize_exact(args: &str, prefixes: &[&'static str], usage_text: &str) -> RosterResult<ArgMap> {
    let map = ArgMap::tokenize(args, prefixes);
    if !map.preamble().is_empty() {
        return Err(usage(usage_text));
    }
    map.verify_no_duplicates(prefixes)?;
    Ok(map)
}

fn parse_index(raw: &str, usage_text: &str) -> RosterResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(usage(usage_text)),
    }
}

fn parse_number(raw: &str, field: &'static str) -> RosterResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| RosterError::InvalidField {
        field,
        message: format!("'{}' is not a whole number", raw.trim()),
    })
}

fn parse_homework_target(args: &str, usage_text: &str) -> RosterResult<(Target, i64)> {
    let map = tokenize_exact(args, &[PREFIX_NUSNETID, PREFIX_ASSIGNMENT], usage_text)?;
    let who = map.required(PREFIX_NUSNETID, usage_text)?;
    let target = if who.eq_ignore_ascii_case("all") {
        Target::All
    } else {
        Target::One(Nusnetid::parse(who)?)
    };
    let assignment = parse_number(map.required(PREFIX_ASSIGNMENT, usage_text)?, "Homework ID")?;
    Ok((target, assignment))
}

fn parse_add_student(args: &str) -> RosterResult<Command> {
    let prefixes = [
        PREFIX_NAME,
        PREFIX_NUSNETID,
        PREFIX_TELEGRAM,
        PREFIX_GROUP,
        PREFIX_PHONE,
        PREFIX_EMAIL,
    ];
    let map = tokenize_exact(args, &prefixes, USAGE_ADD_STUDENT)?;
    Ok(Command::AddStudent {
        name: map.required(PREFIX_NAME, USAGE_ADD_STUDENT)?.to_string(),
        nusnetid: map.required(PREFIX_NUSNETID, USAGE_ADD_STUDENT)?.to_string(),
        telegram: map.required(PREFIX_TELEGRAM, USAGE_ADD_STUDENT)?.to_string(),
        group: map.required(PREFIX_GROUP, USAGE_ADD_STUDENT)?.to_string(),
        phone: map.value(PREFIX_PHONE).map(str::to_string),
        email: map.value(PREFIX_EMAIL).map(str::to_string),
    })
}

fn parse_edit_student(args: &str) -> RosterResult<Command> {
    let prefixes = [
        PREFIX_NAME,
        PREFIX_NUSNETID,
        PREFIX_TELEGRAM,
        PREFIX_PHONE,
        PREFIX_EMAIL,
    ];
    let map = ArgMap::tokenize(args, &prefixes);
    let index = parse_index(map.preamble(), USAGE_EDIT_STUDENT)?;
    map.verify_no_duplicates(&prefixes)?;

    // An empty p/ or e/ clears the field.
    let clearable = |prefix: &str| {
        map.value(prefix)
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
    };

    let command = Command::EditStudent {
        index,
        name: map.value(PREFIX_NAME).map(str::to_string),
        nusnetid: map.value(PREFIX_NUSNETID).map(str::to_string),
        telegram: map.value(PREFIX_TELEGRAM).map(str::to_string),
        phone: clearable(PREFIX_PHONE),
        email: clearable(PREFIX_EMAIL),
    };
    if let Command::EditStudent {
        name: None,
        nusnetid: None,
        telegram: None,
        phone: None,
        email: None,
        ..
    } = command
    {
        return Err(RosterError::Parse(
            "At least one field to edit must be provided.".into(),
        ));
    }
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_homework_for_all() {
        let command = parse("add_hw i/all a/1").unwrap();
        assert_eq!(
            command,
            Command::AddHomework {
                target: Target::All,
                assignment: 1
            }
        );
    }

    #[test]
    fn parses_mark_homework() {
        let command = parse("mark_hw i/e1234567 a/2 status/Complete").unwrap();
        assert_eq!(
            command,
            Command::MarkHomework {
                nusnetid: Nusnetid::parse("E1234567").unwrap(),
                assignment: 2,
                status: HomeworkStatus::Complete,
            }
        );
    }

    #[test]
    fn rejects_unknown_attendance_status() {
        let result = parse("mark_attendance i/E1234567 w/3 status/late");
        assert!(matches!(result, Err(RosterError::InvalidStatus { .. })));
    }

    #[test]
    fn rejects_non_numeric_week() {
        assert!(parse("mark_all_attendance g/T01 w/three status/present").is_err());
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(matches!(parse("add_to_group i/E1234567"), Err(RosterError::Parse(_))));
    }

    #[test]
    fn rejects_preamble_where_none_expected() {
        assert!(parse("create_group T01 g/T01").is_err());
    }

    #[test]
    fn edit_with_empty_phone_clears_it() {
        let command = parse("edit_student 1 p/").unwrap();
        match command {
            Command::EditStudent { index, phone, .. } => {
                assert_eq!(index, 1);
                assert_eq!(phone, Some(None));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn edit_without_fields_is_rejected() {
        assert!(parse("edit_student 1").is_err());
    }

    #[test]
    fn delete_requires_positive_index() {
        assert!(parse("delete_student 0").is_err());
        assert_eq!(parse("delete_student 3").unwrap(), Command::DeleteStudent { index: 3 });
    }

    #[test]
    fn unknown_command_is_reported() {
        assert!(parse("teleport i/E1234567").is_err());
    }
}

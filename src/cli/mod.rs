pub mod args;
pub mod command;
pub mod context;
pub mod student_commands;
pub mod group_commands;
pub mod homework_commands;
pub mod attendance_commands;
pub mod consultation_commands;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::RosterResult;
use crate::ops::person_ops::PersonEdit;
use crate::storage;
use command::Command;
use context::CliContext;

/// What a single input line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub exit: bool,
}

impl CommandResult {
    fn message(feedback: String) -> Self {
        Self { feedback, exit: false }
    }
}

/// Load the roster and run the interactive REPL until `exit` or EOF.
pub fn run(config: &Config) -> RosterResult<()> {
    let roster = storage::load(&config.data_file)?;
    info!(file = %config.data_file.display(), "starting session");

    println!("Roster");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let mut ctx = CliContext::new(roster, Some(config.data_file.clone()));
    repl_loop(&mut ctx);
    Ok(())
}

fn repl_loop(ctx: &mut CliContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };
        if input.trim().is_empty() {
            continue;
        }

        match run_line(ctx, &input) {
            Ok(result) => {
                println!("{}", result.feedback);
                if result.exit {
                    break;
                }
            }
            Err(e) => {
                warn!(input = %input.trim(), error = %e, "command rejected");
                println!("Error: {}", e);
            }
        }
    }
}

/// Parse and execute one input line, saving the roster if it changed.
pub fn run_line(ctx: &mut CliContext, input: &str) -> RosterResult<CommandResult> {
    let command = command::parse(input)?;
    debug!(?command, "parsed command");
    let mutating = command.is_mutating();
    let mut result = execute(ctx, command)?;
    if mutating {
        // The change stays applied even if it cannot be written.
        if let Err(e) = ctx.save() {
            warn!(error = %e, "could not save roster");
            result.feedback.push_str(&format!(
                "\nWarning: the change was applied but could not be saved: {}",
                e
            ));
        }
    }
    Ok(result)
}

fn execute(ctx: &mut CliContext, command: Command) -> RosterResult<CommandResult> {
    let feedback = match command {
        // Students
        Command::AddStudent {
            name,
            nusnetid,
            telegram,
            group,
            phone,
            email,
        } => student_commands::add(
            ctx,
            &name,
            &nusnetid,
            &telegram,
            &group,
            phone.as_deref(),
            email.as_deref(),
        )?,
        Command::EditStudent {
            index,
            name,
            nusnetid,
            telegram,
            phone,
            email,
        } => {
            let edit = PersonEdit {
                name: name.as_deref(),
                phone: phone.as_ref().map(|p| p.as_deref()),
                email: email.as_ref().map(|e| e.as_deref()),
                nusnetid: nusnetid.as_deref(),
                telegram: telegram.as_deref(),
            };
            student_commands::edit(ctx, index, edit)?
        }
        Command::DeleteStudent { index } => student_commands::delete(ctx, index)?,
        Command::List => student_commands::list(ctx)?,
        Command::Find { keywords } => student_commands::find(ctx, &keywords)?,
        Command::Stats => student_commands::stats(ctx)?,

        // Groups
        Command::CreateGroup { group } => group_commands::create(ctx, &group)?,
        Command::AddToGroup { nusnetid, group } => group_commands::add_to(ctx, &nusnetid, &group)?,
        Command::FindGroup { group } => group_commands::find(ctx, &group)?,

        // Homework
        Command::AddHomework { target, assignment } => homework_commands::add(ctx, &target, assignment)?,
        Command::DeleteHomework { target, assignment } => {
            homework_commands::delete(ctx, &target, assignment)?
        }
        Command::MarkHomework {
            nusnetid,
            assignment,
            status,
        } => homework_commands::mark(ctx, &nusnetid, assignment, status)?,

        // Attendance
        Command::MarkAttendance { nusnetid, week, status } => {
            attendance_commands::mark(ctx, &nusnetid, week, status)?
        }
        Command::MarkAllAttendance { group, week, status } => {
            attendance_commands::mark_all(ctx, &group, week, status)?
        }

        // Consultations
        Command::AddConsultation { nusnetid, from, to } => {
            consultation_commands::add(ctx, &nusnetid, &from, &to)?
        }
        Command::DeleteConsultation { nusnetid } => consultation_commands::delete(ctx, &nusnetid)?,
        Command::ListConsultations => consultation_commands::list(ctx)?,

        Command::Help => help_text().to_string(),
        Command::Exit => {
            return Ok(CommandResult {
                feedback: "Goodbye!".into(),
                exit: true,
            })
        }
    };
    Ok(CommandResult::message(feedback))
}

pub fn help_text() -> &'static str {
    r#"
COMMANDS:

  Students:
    add_student n/NAME i/NUSNETID t/TELEGRAM g/GROUP [p/PHONE] [e/EMAIL]
    edit_student INDEX [n/NAME] [i/NUSNETID] [t/TELEGRAM] [p/PHONE] [e/EMAIL]
    delete_student INDEX
    list                          Show all students
    find KEYWORD [MORE]...        Show students whose name contains a keyword
    stats                         Show roster statistics

  Groups:
    create_group g/GROUP
    add_to_group i/NUSNETID g/GROUP
    find_group g/GROUP            Show the members of a group

  Homework (assignments 1-13):
    add_hw i/NUSNETID|all a/ASSIGNMENT
    delete_hw i/NUSNETID|all a/ASSIGNMENT
    mark_hw i/NUSNETID a/ASSIGNMENT status/complete|incomplete|late

  Attendance (weeks 2-13):
    mark_attendance i/NUSNETID w/WEEK status/present|absent|excused
    mark_all_attendance g/GROUP w/WEEK status/present|absent|excused

  Consultations:
    add_consult i/NUSNETID from/YYYYMMDD HHMM to/YYYYMMDD HHMM
    delete_consult i/NUSNETID
    list_consult

  Other:
    help                          Show this help
    exit / quit / q               Exit
"#
}

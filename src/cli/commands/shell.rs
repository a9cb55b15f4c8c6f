//! The interactive line shell.
//!
//! Each line is split into words, parsed with clap and run against one
//! [`Portal`]. Errors are printed and the loop carries on; only `quit`, `exit`
//! or end of input leave it.

use std::io::{BufRead, Write};
use std::path::Path;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::debug;

use crate::cli::args::{
    split_line, MessagesCommand, OutputFormat, ProfileCommand, ProjectsCommand, ShellCommand,
    ShellLine,
};
use crate::error::StaffdeskError;
use crate::features::account::SignUpForm;
use crate::features::tracker::format_hms;
use crate::output::{
    format_comments, format_contacts, format_conversation, format_dashboard, format_file,
    format_history, format_message, format_project, format_session_event, format_thread,
    format_turn, format_user, to_json,
};
use crate::portal::{Portal, View};

const PROMPT: &str = "staffdesk> ";

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print this (possibly empty) text and read the next line.
    Continue(String),
    /// Leave the shell.
    Quit,
}

/// Run the shell until `quit` or end of input.
///
/// The prompt is only written when `interactive` is set.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run_shell<R: BufRead, W: Write>(
    portal: &mut Portal,
    input: R,
    out: &mut W,
    format: OutputFormat,
    interactive: bool,
) -> Result<(), StaffdeskError> {
    if interactive {
        writeln!(out, "{}", "staffdesk shell. Type 'help' for commands, 'quit' to leave.".dimmed())?;
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else { break };
        let line = line?;

        match run_line(portal, &line, format) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue(text)) => {
                if !text.is_empty() {
                    writeln!(out, "{}", text.trim_end_matches('\n'))?;
                }
            }
            Err(e) if e.is_notice() => writeln!(out, "{} {}", "!".yellow().bold(), e)?,
            Err(e) => writeln!(out, "{}: {}", "error".red().bold(), e)?,
        }
    }
    Ok(())
}

/// Parse and execute one line.
///
/// # Errors
///
/// Returns the error of the command, or a validation error for a line that
/// does not parse.
pub fn run_line(portal: &mut Portal, line: &str, format: OutputFormat) -> Result<Outcome, StaffdeskError> {
    let words = split_line(line)?;
    if words.is_empty() || words[0].starts_with('#') {
        return Ok(Outcome::Continue(String::new()));
    }

    let parsed = match ShellLine::try_parse_from(&words) {
        Ok(parsed) => parsed,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp => {
                return Ok(Outcome::Continue(e.render().to_string()))
            }
            _ => return Err(StaffdeskError::validation(e.render().to_string().trim_end())),
        },
    };

    debug!(command = ?parsed.command, "shell command");
    execute(portal, parsed.command, format)
}

/// Execute one parsed shell command.
///
/// # Errors
///
/// Returns the error of the underlying portal operation.
pub fn execute(
    portal: &mut Portal,
    command: ShellCommand,
    format: OutputFormat,
) -> Result<Outcome, StaffdeskError> {
    let text = match command {
        ShellCommand::Signup {
            full_name,
            email,
            username,
            password,
        } => {
            let user = portal.sign_up(SignUpForm {
                full_name,
                email,
                username,
                password,
            })?;
            format_user(user, format)?
        }

        ShellCommand::Login { username, password } => {
            let user = portal.log_in(&username, &password)?;
            match format {
                OutputFormat::Pretty => format!("Logged in as {}", user.username.bold()),
                OutputFormat::Json => to_json(user)?,
            }
        }

        ShellCommand::Logout => match portal.log_out() {
            Some(user) => format!("Logged out {}", user.username),
            None => "Nobody is logged in".to_string(),
        },

        ShellCommand::Whoami => format_user(portal.require_user()?, format)?,

        ShellCommand::Status { status: None } => {
            let user = portal.require_user()?;
            match format {
                OutputFormat::Pretty => format!("{} {}", user.status.badge(), user.status),
                OutputFormat::Json => to_json(&user.status)?,
            }
        }

        ShellCommand::Status {
            status: Some(status),
        } => {
            portal.set_status(status)?;
            match format {
                OutputFormat::Pretty => format!("Status set to {} {}", status.badge(), status),
                OutputFormat::Json => to_json(&status)?,
            }
        }

        ShellCommand::Start => format_session_event(&portal.start_work()?, format)?,

        ShellCommand::Stop => format_session_event(&portal.stop_work()?, format)?,

        ShellCommand::Elapsed => match portal.elapsed() {
            Some(elapsed) => format_hms(elapsed),
            None => "Not clocked in".to_string(),
        },

        ShellCommand::History { limit } => {
            let limit = limit.unwrap_or(usize::MAX);
            let current = portal.tracker().current();
            let rows = limit.saturating_sub(usize::from(current.is_some()));
            let current = current.filter(|_| limit > 0);
            let sessions: Vec<_> = portal.history().recent_first().take(rows).cloned().collect();
            format_history(current, &sessions, format)?
        }

        ShellCommand::Dashboard => format_dashboard(&portal.dashboard(), format)?,

        ShellCommand::View { view: None } => portal.view().to_string(),

        ShellCommand::View { view: Some(view) } => {
            portal.navigate(view);
            render_view(portal, view, format)?
        }

        ShellCommand::Messages { command } => messages(portal, command, format)?,

        ShellCommand::Projects { command } => projects(portal, command, format)?,

        ShellCommand::Ask { prompt } => format_turn(portal.ask(&prompt.join(" "))?, format)?,

        ShellCommand::Chat => format_conversation(portal.conversation().turns(), format)?,

        ShellCommand::Profile { command: None } => format_user(portal.require_user()?, format)?,

        ShellCommand::Profile {
            command: Some(ProfileCommand::Name { name }),
        } => {
            let user = portal.update_full_name(&name.join(" "))?;
            format!("Profile updated: {}", user.full_name)
        }

        ShellCommand::Password {
            new_password,
            confirm,
        } => {
            portal.change_password(&new_password, &confirm)?;
            "Password updated".to_string()
        }

        ShellCommand::Help => ShellLine::command().render_help().to_string(),

        ShellCommand::Quit => return Ok(Outcome::Quit),
    };

    Ok(Outcome::Continue(text))
}

fn render_view(portal: &Portal, view: View, format: OutputFormat) -> Result<String, StaffdeskError> {
    match view {
        View::Dashboard => format_dashboard(&portal.dashboard(), format),
        View::Messages => format_contacts(&portal.contacts(None)?, format),
        View::Assistant => format_conversation(portal.conversation().turns(), format),
        View::Projects => format_project(portal.project()?, format),
        View::Settings => format_user(portal.require_user()?, format),
    }
}

fn messages(
    portal: &mut Portal,
    command: MessagesCommand,
    format: OutputFormat,
) -> Result<String, StaffdeskError> {
    match command {
        MessagesCommand::Contacts { query } => {
            format_contacts(&portal.contacts(query.as_deref())?, format)
        }
        MessagesCommand::Show { contact } => {
            let (contact, thread) = portal.thread(&contact)?;
            format_thread(contact, thread, format)
        }
        MessagesCommand::Send { contact, text } => {
            let message = portal.send_message(&contact, &text.join(" "))?;
            format_message(message, format)
        }
    }
}

fn projects(
    portal: &mut Portal,
    command: ProjectsCommand,
    format: OutputFormat,
) -> Result<String, StaffdeskError> {
    match command {
        ProjectsCommand::List => match format {
            OutputFormat::Pretty => Ok(portal
                .workspace()
                .projects()
                .iter()
                .map(|p| format!("[{}] {}  {}", p.id, p.name.bold(), p.description.dimmed()))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => to_json(&portal.workspace().projects()),
        },
        ProjectsCommand::Files => format_project(portal.project()?, format),
        ProjectsCommand::Show { file } => {
            let project = portal.project()?;
            let entry = project
                .file(&file)
                .ok_or_else(|| StaffdeskError::NotFound(format!("file '{file}'")))?;
            format_file(entry, format)
        }
        ProjectsCommand::CreateFile { name } => format_file(portal.create_file(&name)?, format),
        ProjectsCommand::CreateFolder { name } => {
            format_file(portal.create_folder(&name)?, format)
        }
        ProjectsCommand::Upload { path } => {
            let content = std::fs::read_to_string(&path)?;
            let name = upload_name(&path)?;
            format_file(portal.upload(&name, &content)?, format)
        }
        ProjectsCommand::Save { file, content } => {
            format_file(portal.save_file(&file, &content.join(" "))?, format)
        }
        ProjectsCommand::Comment { text } => {
            portal.post_comment(&text.join(" "))?;
            format_comments(&portal.project()?.comments, format)
        }
        ProjectsCommand::Comments => format_comments(&portal.project()?.comments, format),
        ProjectsCommand::Approval => portal.approval_link(),
    }
}

fn upload_name(path: &Path) -> Result<String, StaffdeskError> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| StaffdeskError::validation(format!("'{}' has no file name", path.display())))
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;
    use crate::config::Config;
    use crate::core::ManualClock;
    use crate::features::assistant::{MockChatBackend, FALLBACK_REPLY};

    fn portal() -> (Portal, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap(),
        ));
        let portal = Portal::new(
            &Config::default(),
            Box::new(Rc::clone(&clock)),
            Box::new(MockChatBackend::new()),
        );
        (portal, clock)
    }

    fn script(portal: &mut Portal, lines: &str) -> String {
        let mut out = Vec::new();
        run_shell(portal, lines.as_bytes(), &mut out, OutputFormat::Pretty, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_script_start_stop_history() {
        let (mut portal, _clock) = portal();
        let output = script(&mut portal, "login jdoe secret1\nstart\nstop\nhistory\nquit\n");

        assert!(output.contains("Logged in as"));
        assert!(output.contains("Clocked in"));
        assert!(output.contains("Clocked out"));
        assert!(output.contains("History (3)"));
        assert_eq!(portal.history().len(), 3);
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let (mut portal, _clock) = portal();
        let output = script(&mut portal, "stop\nbogus\nstart\n");

        assert!(output.contains("not clocked in"));
        assert!(output.contains("Clocked in"));
        assert!(portal.tracker().is_working());
    }

    #[test]
    fn test_quit_stops_reading() {
        let (mut portal, _clock) = portal();
        script(&mut portal, "quit\nstart\n");
        assert!(!portal.tracker().is_working());
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let (mut portal, _clock) = portal();
        assert_eq!(
            run_line(&mut portal, "   ", OutputFormat::Pretty).unwrap(),
            Outcome::Continue(String::new())
        );
        assert_eq!(
            run_line(&mut portal, "# note", OutputFormat::Pretty).unwrap(),
            Outcome::Continue(String::new())
        );
    }

    #[test]
    fn test_double_start_is_notice() {
        let (mut portal, _clock) = portal();
        run_line(&mut portal, "start", OutputFormat::Pretty).unwrap();
        let err = run_line(&mut portal, "start", OutputFormat::Pretty).unwrap_err();
        assert!(err.is_notice());
        assert!(err.to_string().contains("already clocked in"));
    }

    #[test]
    fn test_history_limit_counts_open_session() {
        let (mut portal, clock) = portal();
        for _ in 0..3 {
            portal.start_work().unwrap();
            clock.advance(Duration::minutes(10));
            portal.stop_work().unwrap();
        }
        portal.start_work().unwrap();

        let Outcome::Continue(text) =
            run_line(&mut portal, "history --limit 2", OutputFormat::Pretty).unwrap()
        else {
            panic!("expected output");
        };
        assert!(text.contains("History (2)"));
        assert!(text.contains("in progress"));
    }

    #[test]
    fn test_status_sync_through_shell() {
        let (mut portal, _clock) = portal();
        script(&mut portal, "login jdoe secret1\nstatus busy\nstart\n");
        assert_eq!(
            portal.user().map(|u| u.status),
            Some(crate::features::account::UserStatus::Active)
        );
    }

    #[test]
    fn test_upload_reads_and_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "y".repeat(700)).unwrap();

        let (mut portal, _clock) = portal();
        let line = format!("projects upload '{}'", path.display());
        run_line(&mut portal, &line, OutputFormat::Pretty).unwrap();

        let project = portal.project().unwrap();
        let uploaded = project.files.last().unwrap();
        assert_eq!(uploaded.name, "notes.txt");
        assert_eq!(uploaded.content.as_ref().map(String::len), Some(500));
    }

    #[test]
    fn test_ask_with_failing_backend() {
        let mut backend = MockChatBackend::new();
        backend.expect_generate().returning(|_, _| {
            Err(crate::features::assistant::AssistantError::MissingApiKey(
                "GEMINI_API_KEY".to_string(),
            ))
        });
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap());
        let mut portal = Portal::new(&Config::default(), Box::new(clock), Box::new(backend));

        let output = script(&mut portal, "ask how do I deploy\n");
        assert!(output.contains(FALLBACK_REPLY));
    }

    #[test]
    fn test_password_mismatch_message() {
        let (mut portal, _clock) = portal();
        let output = script(&mut portal, "login jdoe secret1\npassword abcdef abcxyz\n");
        assert!(output.contains("Passwords do not match."));
    }

    #[test]
    fn test_help_lists_commands() {
        let (mut portal, _clock) = portal();
        let Outcome::Continue(text) = run_line(&mut portal, "help", OutputFormat::Pretty).unwrap()
        else {
            panic!("expected help");
        };
        assert!(text.contains("start"));
        assert!(text.contains("history"));
    }
}

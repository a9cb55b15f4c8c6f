use colored::Colorize;

use crate::features::account::User;
use crate::features::assistant::{Role, Turn};
use crate::features::messages::{Contact, Message, Presence};
use crate::features::projects::{Comment, FileKind, Project, ProjectFile};
use crate::features::tracker::WorkSession;
use crate::portal::Dashboard;

const RULE_WIDE: usize = 60;
const RULE_NARROW: usize = 40;

/// Format the dashboard: greeting, timer and the history window
pub fn format_dashboard_pretty(dash: &Dashboard) -> String {
    let mut output = String::new();

    match &dash.user {
        Some(user) => output.push_str(&format!(
            "Welcome back, {}  {} {}\n",
            user.first_name().bold(),
            user.status.badge(),
            user.status
        )),
        None => output.push_str(&format!("{}\n", "Not logged in".dimmed())),
    }

    let timer = if dash.working {
        dash.elapsed.green().bold()
    } else {
        dash.elapsed.dimmed()
    };
    let state = if dash.working {
        "Clocked in".green()
    } else {
        "Clocked out".dimmed()
    };
    output.push_str(&format!("Current session  {timer}  {state}\n\n"));

    let title = format!("Last {} days", dash.window_days);
    output.push_str(&format_history_pretty(
        dash.current.as_ref(),
        &dash.sessions,
        &title,
    ));
    output.push_str(&format!("{}: {}\n", "Total tracked".dimmed(), dash.total));

    output
}

/// Format the history table, most recent first, with the open session on top
pub fn format_history_pretty(
    current: Option<&WorkSession>,
    sessions: &[WorkSession],
    title: &str,
) -> String {
    let count = sessions.len() + usize::from(current.is_some());
    if count == 0 {
        return format!("{title} (0)\n  No sessions yet\n");
    }

    let mut output = format!("{title} ({count})\n");
    output.push_str(&format!(
        "{:<12} {:<9} {:<9} {}\n",
        "Date".bold(),
        "Check in".bold(),
        "Check out".bold(),
        "Duration".bold()
    ));
    output.push_str(&"─".repeat(RULE_WIDE));
    output.push('\n');

    for session in current.into_iter().chain(sessions) {
        output.push_str(&session_row(session));
        output.push('\n');
    }

    output
}

fn session_row(session: &WorkSession) -> String {
    let check_out = session
        .end_local()
        .map_or_else(|| "-".to_string(), |t| t.format("%H:%M").to_string());
    let duration = if session.is_open() {
        session.display_duration().yellow()
    } else {
        session.display_duration().normal()
    };
    format!(
        "{:<12} {:<9} {:<9} {}",
        session.date.format("%Y-%m-%d").to_string(),
        session.start_local().format("%H:%M").to_string(),
        check_out,
        duration
    )
}

/// Format a clock-in or clock-out confirmation
pub fn format_session_event_pretty(session: &WorkSession) -> String {
    match session.end_local() {
        None => format!(
            "{} Clocked in at {}",
            "▸".green(),
            session.start_local().format("%H:%M:%S")
        ),
        Some(end) => format!(
            "{} Clocked out at {} ({})",
            "■".red(),
            end.format("%H:%M:%S"),
            session.display_duration().bold()
        ),
    }
}

/// Format the user profile
pub fn format_user_pretty(user: &User) -> String {
    let mut output = format!("{} {}\n", user.initial().to_string().bold(), user.full_name.bold());
    output.push_str(&format!("  {}: {}\n", "Username".dimmed(), user.username));
    if let Some(email) = &user.email {
        output.push_str(&format!("  {}: {}\n", "Email".dimmed(), email));
    }
    output.push_str(&format!("  {}: {}\n", "Role".dimmed(), user.role));
    output.push_str(&format!(
        "  {}: {} {}\n",
        "Status".dimmed(),
        user.status.badge(),
        user.status
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Member since".dimmed(),
        user.member_since.format("%Y-%m-%d")
    ));
    output.push_str(&format!("  {}: {}\n", "Account".dimmed(), user.account_id));
    output
}

/// Format the colleague directory
pub fn format_contacts_pretty(contacts: &[&Contact]) -> String {
    if contacts.is_empty() {
        return "Contacts (0)\n  No matching contacts".to_string();
    }

    let mut output = format!("Contacts ({})\n", contacts.len());
    output.push_str(&"─".repeat(RULE_NARROW));
    output.push('\n');

    for contact in contacts {
        let dot = match contact.presence {
            Presence::Online => "●".green(),
            Presence::Busy => "●".red(),
            Presence::Offline => "●".bright_black(),
        };
        output.push_str(&format!(
            "  {} [{}] {}  {}\n",
            dot,
            contact.id,
            contact.name.bold(),
            contact.role.dimmed()
        ));
    }

    output
}

/// Format one conversation thread
pub fn format_thread_pretty(contact: &Contact, messages: &[Message]) -> String {
    let mut output = format!(
        "{}  {}\n",
        contact.name.bold(),
        contact.presence.to_string().dimmed()
    );
    output.push_str(&"─".repeat(RULE_WIDE));
    output.push('\n');

    if messages.is_empty() {
        output.push_str("  No messages yet\n");
        return output;
    }

    for message in messages {
        output.push_str(&format_message_pretty(message));
        output.push('\n');
    }
    output
}

/// Format a single message line
pub fn format_message_pretty(message: &Message) -> String {
    let time = message.timestamp.with_timezone(&chrono::Local).format("%H:%M");
    let sender = if message.is_me {
        message.sender.cyan().bold()
    } else {
        message.sender.bold()
    };
    format!("  {} {}: {}", time.to_string().dimmed(), sender, message.content)
}

/// Format a project's file list
pub fn format_project_pretty(project: &Project) -> String {
    let mut output = format!("{}\n", project.name.bold());
    output.push_str(&format!("  {}\n", project.description.dimmed()));
    output.push_str(&format!("Files ({})\n", project.files.len()));
    output.push_str(&"─".repeat(RULE_NARROW));
    output.push('\n');

    for file in &project.files {
        let icon = match file.kind {
            FileKind::Folder => "▸".blue(),
            FileKind::File => "·".normal(),
        };
        let mut line = format!("  {} [{}] {}", icon, file.id, file.name);
        if let Some(lang) = &file.language {
            line.push_str(&format!("  {}", lang.dimmed()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output.push_str(&format!(
        "{}: {}\n",
        "Comments".dimmed(),
        project.comments.len()
    ));
    output
}

/// Format one file with its content
pub fn format_file_pretty(file: &ProjectFile) -> String {
    let mut output = format!("{} [{}]\n", file.name.bold(), file.id);
    if let Some(lang) = &file.language {
        output.push_str(&format!("  {}: {}\n", "Language".dimmed(), lang));
    }
    match (&file.kind, &file.content) {
        (FileKind::Folder, _) => output.push_str("  (folder)\n"),
        (FileKind::File, Some(content)) if !content.is_empty() => {
            output.push_str(&"─".repeat(RULE_WIDE));
            output.push('\n');
            output.push_str(content);
            if !content.ends_with('\n') {
                output.push('\n');
            }
        }
        (FileKind::File, _) => output.push_str("  (empty)\n"),
    }
    output
}

/// Format the discussion board
pub fn format_comments_pretty(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "Discussion (0)\n  No comments yet".to_string();
    }

    let mut output = format!("Discussion ({})\n", comments.len());
    output.push_str(&"─".repeat(RULE_WIDE));
    output.push('\n');
    for comment in comments {
        output.push_str(&format!(
            "  {} {}: {}\n",
            comment
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed(),
            comment.author.bold(),
            comment.text
        ));
    }
    output
}

/// Format one assistant turn
pub fn format_turn_pretty(turn: &Turn) -> String {
    match turn.role {
        Role::User => format!("{} {}", "you>".cyan().bold(), turn.text),
        Role::Model => format!("{} {}", "assistant>".magenta().bold(), turn.text),
    }
}

/// Format the whole assistant conversation
pub fn format_conversation_pretty(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(format_turn_pretty)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::account::log_in;
    use chrono::{TimeZone, Utc};

    fn closed(id: &str, hour: u32, minutes: i64) -> WorkSession {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, hour, 0, 0).unwrap();
        WorkSession::closed(id.to_string(), start, start + chrono::Duration::minutes(minutes))
    }

    #[test]
    fn test_history_empty() {
        let output = format_history_pretty(None, &[], "History");
        assert!(output.contains("History (0)"));
        assert!(output.contains("No sessions yet"));
    }

    #[test]
    fn test_history_open_session_on_top() {
        let open = WorkSession::open(
            "3".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
        );
        let sessions = vec![closed("2", 13, 30), closed("1", 9, 90)];
        let output = format_history_pretty(Some(&open), &sessions, "History");

        assert!(output.contains("History (3)"));
        let progress = output.find("in progress").unwrap();
        let first_closed = output.find("00:30:00").unwrap();
        let second_closed = output.find("01:30:00").unwrap();
        assert!(progress < first_closed);
        assert!(first_closed < second_closed);
    }

    #[test]
    fn test_session_event() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let open = WorkSession::open("1".to_string(), start);
        assert!(format_session_event_pretty(&open).contains("Clocked in"));

        let output = format_session_event_pretty(&closed("1", 9, 45));
        assert!(output.contains("Clocked out"));
        assert!(output.contains("00:45:00"));
    }

    #[test]
    fn test_user_hides_password() {
        let user = log_in("jdoe", "hunter22").unwrap();
        let output = format_user_pretty(&user);
        assert!(output.contains("User Name"));
        assert!(output.contains("jdoe"));
        assert!(!output.contains("hunter22"));
    }

    #[test]
    fn test_contacts_empty() {
        let output = format_contacts_pretty(&[]);
        assert!(output.contains("No matching contacts"));
    }

    #[test]
    fn test_file_folder_and_empty() {
        let folder = ProjectFile::folder("f2".to_string(), "docs");
        assert!(format_file_pretty(&folder).contains("(folder)"));

        let empty = ProjectFile::file("f3".to_string(), "notes.md", String::new());
        assert!(format_file_pretty(&empty).contains("(empty)"));

        let file = ProjectFile::file("f1".to_string(), "main.py", "print(1)".to_string());
        let output = format_file_pretty(&file);
        assert!(output.contains("print(1)"));
    }

    #[test]
    fn test_conversation_roles() {
        let turns = vec![Turn::model("Hello"), Turn::user("hi")];
        let output = format_conversation_pretty(&turns);
        assert!(output.contains("assistant>"));
        assert!(output.contains("you>"));
        assert!(output.contains("Hello"));
    }
}

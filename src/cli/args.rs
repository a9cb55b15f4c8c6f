use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::error::StaffdeskError;
use crate::features::account::UserStatus;
use crate::portal::View;

#[derive(Parser)]
#[command(name = "staffdesk")]
#[command(about = "An in-memory employee workstation: clock in, set status, chat and ask the assistant")]
#[command(long_about = "staffdesk - an employee workstation in your terminal

Tracks work sessions, keeps your presence status in sync, and bundles a
small colleague chat, a project file browser and an AI assistant.
Nothing is saved: everything lives until the process exits.

QUICK START:
  staffdesk shell             Interactive session (login, start, stop, ...)
  staffdesk tui               Live dashboard with a ticking timer
  staffdesk ask \"question\"    One-shot question for the assistant

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  staffdesk <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to the config file's general.default_output.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of ~/.staffdesk/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive line shell
    ///
    /// Reads one command per line from stdin against a single in-memory
    /// portal. Type 'help' inside the shell for the command list.
    ///
    /// Example:
    ///   printf 'login jdoe secret1\nstart\nstop\nhistory\n' | staffdesk shell
    Shell,

    /// Live terminal dashboard
    ///
    /// Shows the running session timer, your status and the last 30 days of
    /// history. Keys: space/s start or stop, a/b/w/o set status, q quit.
    Tui(TuiArgs),

    /// Ask the assistant one question
    ///
    /// Prints the reply, or a short apology if the service is unreachable.
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: staffdesk completions bash > ~/.bash_completion.d/staffdesk
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for the dashboard.
#[derive(Args)]
pub struct TuiArgs {
    /// Log in as this user before opening the dashboard
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Password for --username
    #[arg(long, env = "STAFFDESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for config commands.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(
    name = "staffdesk",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands available inside `staffdesk shell`.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Create an account and log in
    Signup {
        /// Full name (quote it if it has spaces)
        full_name: String,
        /// Email address
        email: String,
        /// Login name
        username: String,
        /// Password
        password: String,
    },

    /// Log in (any non-empty credentials work)
    Login {
        /// Login name
        username: String,
        /// Password
        password: String,
    },

    /// Log out; a running session keeps running
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show or set your status
    Status {
        /// active, offline, busy or away
        status: Option<UserStatus>,
    },

    /// Clock in
    Start,

    /// Clock out
    Stop,

    /// Show the running session's elapsed time
    Elapsed,

    /// Show work history, most recent first
    History {
        /// Show at most this many rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the dashboard
    Dashboard,

    /// Show or switch the current view
    View {
        /// dashboard, messages, assistant, projects or settings
        view: Option<View>,
    },

    /// Colleague messages
    #[command(alias = "msg")]
    Messages {
        #[command(subcommand)]
        command: MessagesCommand,
    },

    /// Project files and discussion
    #[command(alias = "proj")]
    Projects {
        #[command(subcommand)]
        command: ProjectsCommand,
    },

    /// Ask the assistant
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },

    /// Show the assistant conversation
    Chat,

    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommand>,
    },

    /// Change your password
    Password {
        /// New password
        new_password: String,
        /// The same password again
        confirm: String,
    },

    /// List shell commands
    Help,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// `messages` subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum MessagesCommand {
    /// List contacts, optionally filtered by name or role
    Contacts {
        /// Search text
        query: Option<String>,
    },
    /// Show the thread with a contact
    Show {
        /// Contact id
        contact: String,
    },
    /// Send a message to a contact
    Send {
        /// Contact id
        contact: String,
        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

/// `projects` subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ProjectsCommand {
    /// List all projects
    List,
    /// Show the default project's files
    Files,
    /// Show one file with its content
    Show {
        /// File id
        file: String,
    },
    /// Create an empty file
    CreateFile {
        /// File name
        name: String,
    },
    /// Create a folder
    CreateFolder {
        /// Folder name
        name: String,
    },
    /// Upload a local file (content is truncated)
    Upload {
        /// Path to read
        path: PathBuf,
    },
    /// Replace a file's content
    Save {
        /// File id
        file: String,
        /// New content
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },
    /// Post to the discussion board
    Comment {
        /// Comment text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show the discussion board
    Comments,
    /// Print a mailto link requesting approval
    Approval,
}

/// `profile` subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ProfileCommand {
    /// Change your display name
    Name {
        /// New full name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
}

/// Split a shell line into words, honouring single and double quotes and
/// backslash escapes outside single quotes.
///
/// # Errors
///
/// Returns a validation error for an unterminated quote.
pub fn split_line(line: &str) -> Result<Vec<String>, StaffdeskError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => word.push(c),
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    word.push(next);
                }
                in_word = true;
            }
            (Some(_), c) => word.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            (None, c) => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(StaffdeskError::validation("unterminated quote"));
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}

//! Command implementations for staffdesk.

mod ask;
mod completions;
mod config;
mod shell;

pub use ask::ask;
pub use completions::{completions, generate_completions, install_instructions};
pub use config::config;
pub use shell::{execute, run_line, run_shell, Outcome};

//! Config inspection commands.

use std::path::Path;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::StaffdeskError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config cannot be serialized or written, or if
/// `init` would overwrite a file without `--force`.
pub fn config(
    cmd: ConfigCommands,
    config: &Config,
    path: &Path,
    format: OutputFormat,
) -> Result<String, StaffdeskError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Pretty => serde_yaml::to_string(config)
                .map_err(|e| StaffdeskError::Config(format!("Failed to serialize config: {e}"))),
            OutputFormat::Json => to_json(config),
        },
        ConfigCommands::Path => Ok(path.display().to_string()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(StaffdeskError::validation(format!(
                    "config file already exists at {} (use --force to overwrite)",
                    path.display()
                )));
            }
            Config::default().save_to_path(path)?;
            Ok(format!("Wrote default config to {}", path.display()))
        }
    }
}

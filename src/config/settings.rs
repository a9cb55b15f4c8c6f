//! Configuration settings for staffdesk.
//!
//! Settings are loaded from `config.yaml` under the staffdesk home, or from
//! the path given with `--config`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::StaffdeskError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Work-session tracker settings.
    pub tracker: TrackerConfig,
    /// AI assistant settings.
    pub assistant: AssistantConfig,
    /// Project workspace settings.
    pub projects: ProjectsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Work-session tracker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Dashboard redraw interval in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Days of history shown on the dashboard.
    #[serde(default = "default_history_window_days")]
    pub history_window_days: u32,
}

/// AI assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Base URL of the generative language API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// System instruction sent with every request.
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,
    /// Opening line of every conversation (local only).
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Project workspace settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsConfig {
    /// Recipient of approval requests.
    #[serde(default = "default_approver_email")]
    pub approver_email: String,
    /// Characters kept from an uploaded file.
    #[serde(default = "default_upload_limit")]
    pub upload_limit_chars: usize,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `STAFFDESK_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_tick_millis() -> u64 {
    1000
}

const fn default_history_window_days() -> u32 {
    30
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_system_instruction() -> String {
    "You are the staffdesk assistant, a helpful and efficient assistant for employees. \
     You help with code, productivity, and general queries."
        .to_string()
}

fn default_greeting() -> String {
    "Hello! I am the staffdesk assistant. How can I help you optimize your workflow today?"
        .to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

fn default_approver_email() -> String {
    "approvals@example.com".to_string()
}

const fn default_upload_limit() -> usize {
    crate::features::projects::DEFAULT_UPLOAD_LIMIT
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            history_window_days: default_history_window_days(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            system_instruction: default_system_instruction(),
            greeting: default_greeting(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            approver_email: default_approver_email(),
            upload_limit_chars: default_upload_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, StaffdeskError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            StaffdeskError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            StaffdeskError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but make no sense.
    ///
    /// # Errors
    ///
    /// Returns `StaffdeskError::Config` for a zero history window.
    pub fn validate(&self) -> Result<(), StaffdeskError> {
        if self.tracker.history_window_days == 0 {
            return Err(StaffdeskError::Config(
                "tracker.history_window_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to a specific path, creating its parent directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), StaffdeskError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| StaffdeskError::Config(format!("Failed to serialize config: {e}")))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StaffdeskError::Config(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        std::fs::write(path, contents).map_err(|e| {
            StaffdeskError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.tracker.tick_millis, 1000);
        assert_eq!(config.tracker.history_window_days, 30);
        assert_eq!(config.assistant.model, "gemini-3-flash-preview");
        assert_eq!(config.assistant.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.projects.upload_limit_chars, 500);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sub").join("config.yaml");

        let mut config = Config::default();
        config.assistant.model = "gemini-pro".to_string();
        config.tracker.history_window_days = 7;

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.assistant.model, "gemini-pro");
        assert_eq!(loaded.tracker.history_window_days, 7);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
assistant:
  timeout_secs: 5
projects:
  approver_email: lead@corp.example
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.assistant.timeout_secs, 5);
        assert_eq!(config.assistant.model, "gemini-3-flash-preview");
        assert_eq!(config.projects.approver_email, "lead@corp.example");
        assert_eq!(config.projects.upload_limit_chars, 500);
    }

    #[test]
    fn test_zero_history_window_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "tracker:\n  history_window_days: 0\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("history_window_days"));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "tracker: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(StaffdeskError::Config(_))
        ));
    }
}

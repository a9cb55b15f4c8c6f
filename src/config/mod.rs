//! Configuration management for staffdesk.
//!
//! This module handles loading and saving configuration from `~/.staffdesk/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{
    AssistantConfig, ColorSetting, Config, GeneralConfig, LoggingConfig, ProjectsConfig,
    TrackerConfig,
};

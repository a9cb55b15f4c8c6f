//! Path resolution for staffdesk configuration and log files.
//!
//! All staffdesk files live in `$STAFFDESK_HOME`, or `~/.staffdesk/` when the
//! variable is unset:
//! - `config.yaml` - Main configuration file
//! - `logs/` - Log files written while the dashboard owns the terminal

use std::path::PathBuf;

use crate::error::StaffdeskError;

/// Environment variable that overrides the root directory.
pub const HOME_ENV: &str = "STAFFDESK_HOME";

/// Paths to staffdesk configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.staffdesk/`
    pub root: PathBuf,
    /// Config file: `~/.staffdesk/config.yaml`
    pub config_file: PathBuf,
    /// Logs directory: `~/.staffdesk/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Resolve paths from `$STAFFDESK_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, StaffdeskError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            StaffdeskError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".staffdesk")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            logs: root.join("logs"),
            root,
        }
    }

    /// The dashboard's log file.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.logs.join("staffdesk.log")
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StaffdeskError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    StaffdeskError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".staffdesk")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-staffdesk");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.logs, root.join("logs"));
        assert_eq!(paths.log_file(), root.join("logs").join("staffdesk.log"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.logs.exists());
    }
}

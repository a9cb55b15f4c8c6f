//! Tracing subscriber setup.
//!
//! Line-oriented commands log to stderr. The dashboard owns the terminal, so
//! it logs to `logs/staffdesk.log` under the staffdesk home instead.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::Paths;
use crate::error::StaffdeskError;

/// Environment variable holding a filter directive, e.g. `staffdesk=debug`.
pub const LOG_ENV: &str = "STAFFDESK_LOG";

/// Where log events go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// The log file under the staffdesk home.
    File,
}

/// Pick the filter directive: `-v` wins, then `STAFFDESK_LOG`, then config.
#[must_use]
pub fn filter_directive(env_value: Option<&str>, config_level: &str, verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    env_value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(config_level)
        .to_string()
}

/// Install the global subscriber.
///
/// The returned guard flushes file output on drop; keep it alive until exit.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a subscriber is
/// already installed.
pub fn init(
    target: LogTarget,
    config_level: &str,
    verbose: bool,
    paths: &Paths,
) -> Result<Option<WorkerGuard>, StaffdeskError> {
    let env_value = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(env_value.as_deref(), config_level, verbose);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| StaffdeskError::Config(format!("invalid log filter '{directive}': {e}")))?;

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .try_init()
                .map_err(|e| StaffdeskError::Config(format!("logging already initialised: {e}")))?;
            Ok(None)
        }
        LogTarget::File => {
            paths.ensure_dirs()?;
            let log_file = paths.log_file();
            let file_name = log_file.file_name().unwrap_or_default();
            let appender = tracing_appender::rolling::never(&paths.logs, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()
                .map_err(|e| StaffdeskError::Config(format!("logging already initialised: {e}")))?;
            Ok(Some(guard))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_wins() {
        assert_eq!(filter_directive(Some("trace"), "warn", true), "debug");
    }

    #[test]
    fn test_env_over_config() {
        assert_eq!(
            filter_directive(Some("staffdesk=info"), "warn", false),
            "staffdesk=info"
        );
    }

    #[test]
    fn test_blank_env_falls_back_to_config() {
        assert_eq!(filter_directive(Some("  "), "error", false), "error");
        assert_eq!(filter_directive(None, "warn", false), "warn");
    }
}

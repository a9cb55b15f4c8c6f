use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use staffdesk::cli::args::{Cli, Commands, ConfigCommands};
use staffdesk::cli::commands;
use staffdesk::config::{ColorSetting, Config, Paths};
use staffdesk::logging::{self, LogTarget};
use staffdesk::Portal;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // A missing .env is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let paths = Paths::new().context("could not locate the staffdesk home directory")?;
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file.clone());
    let loaded = Config::load_from_path(&config_path)
        .with_context(|| format!("could not load {}", config_path.display()));
    // `config path` and `config init` must work over a broken file.
    let (config, load_error) = match (&cli.command, loaded) {
        (Commands::Config(args), Err(e)) if !matches!(args.command, ConfigCommands::Show) => {
            (Config::default(), Some(e))
        }
        (_, loaded) => (loaded?, None),
    };

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let target = if matches!(cli.command, Commands::Tui(_)) {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    let _log_guard = logging::init(target, &config.logging.level, cli.verbose, &paths)
        .context("could not initialise logging")?;
    match load_error {
        Some(e) => tracing::warn!(error = %format!("{e:#}"), "using default config"),
        None => tracing::debug!(path = %config_path.display(), "config loaded"),
    }

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Shell => {
            let mut portal = Portal::from_config(&config);
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            commands::run_shell(&mut portal, stdin.lock(), &mut io::stdout(), format, interactive)
                .context("shell session failed")?;
            String::new()
        }
        Commands::Tui(args) => {
            let mut portal = Portal::from_config(&config);
            if let Some(username) = args.username {
                let password = args.password.unwrap_or_default();
                portal
                    .log_in(&username, &password)
                    .context("could not log in")?;
            }
            staffdesk::tui::run(&mut portal, Duration::from_millis(config.tracker.tick_millis.max(50)))
                .context("dashboard failed")?;
            String::new()
        }
        Commands::Ask { prompt } => {
            let mut portal = Portal::from_config(&config);
            commands::ask(&mut portal, &prompt, format)?
        }
        Commands::Config(args) => commands::config(args.command, &config, &config_path, format)?,
        Commands::Completions { shell, install } => commands::completions(shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::StaffdeskError;

const BIN: &str = "staffdesk";

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell, install: bool) -> Result<String, StaffdeskError> {
    if install {
        Ok(install_instructions(shell))
    } else {
        generate_completions(shell)
    }
}

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, StaffdeskError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN, &mut buf);
    String::from_utf8(buf).map_err(|e| StaffdeskError::validation(format!("UTF-8 error: {e}")))
}

/// Where to put the script for each shell.
#[must_use]
pub fn install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => format!(
            "# Add to ~/.bashrc:\nsource <({BIN} completions bash)\n\n\
             # Or save to a file:\n{BIN} completions bash > ~/.local/share/bash-completion/completions/{BIN}\n"
        ),
        Shell::Zsh => format!(
            "# Save to your fpath:\n{BIN} completions zsh > ~/.zsh/completions/_{BIN}\n\
             # Then add to ~/.zshrc (before compinit):\nfpath=(~/.zsh/completions $fpath)\n"
        ),
        Shell::Fish => format!(
            "# Save to fish completions directory:\n{BIN} completions fish > ~/.config/fish/completions/{BIN}.fish\n"
        ),
        Shell::PowerShell => format!(
            "# Add to your PowerShell profile ($PROFILE):\n{BIN} completions powershell | Out-String | Invoke-Expression\n"
        ),
        Shell::Elvish => format!(
            "# Save to elvish completions directory:\n{BIN} completions elvish > ~/.config/elvish/lib/{BIN}.elv\n"
        ),
        _ => format!("# Run '{BIN} completions <shell>' and source the output.\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("staffdesk"));
        assert!(script.contains("complete"));
    }

    #[test]
    fn test_generate_fish_completions_include_subcommands() {
        let script = generate_completions(Shell::Fish).unwrap();
        assert!(script.contains("tui"));
        assert!(script.contains("ask"));
    }

    #[test]
    fn test_install_flag_returns_instructions() {
        let text = completions(Shell::Zsh, true).unwrap();
        assert!(text.contains("fpath"));
    }
}

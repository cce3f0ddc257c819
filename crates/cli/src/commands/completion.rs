//! Shell completion command implementation

use crate::error::{CliError, CliResult};
use crate::get_cli_command;
use clap::Args;
use clap_complete::{generate, Shell};
use std::io::Write;

const SUPPORTED: &str = "bash, zsh, fish, powershell";

#[derive(Args, Debug, Clone)]
pub struct Options {
    /// Shell to generate completions for
    pub shell: String,
}

/// Generate shell completion script
pub fn run(options: &Options, out: &mut dyn Write) -> CliResult<()> {
    if options.shell.is_empty() {
        return Err(CliError::Message(format!(
            "Shell name is required. Supported shells: {SUPPORTED}"
        )));
    }

    let shell = match options.shell.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        _ => {
            return Err(CliError::Message(format!(
                "Unsupported shell: {}. Supported shells: {SUPPORTED}",
                options.shell
            )));
        }
    };

    let mut cmd = get_cli_command();
    generate(shell, &mut cmd, "kf", out);

    Ok(())
}

//! kf CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod commands;
mod error;
mod logging;
mod utils;

#[cfg(test)]
mod test_helpers;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use commands::{apps, completion, secrets, services};
use std::path::PathBuf;
use std::process;

/// kf - manage apps, service instances and secrets on a cluster
#[derive(Parser)]
#[command(name = "kf")]
#[command(about = "kf - manage apps, service instances and secrets on a cluster", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Flags accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Namespace to operate in
    #[arg(short, long, global = true, env = "KF_NAMESPACE")]
    pub namespace: Option<String>,

    /// Path to a kubeconfig file (overrides $KUBECONFIG and the config file)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Path to the kf config file (defaults to .kf/config.yaml, then ~/.kf/config.yaml)
    #[arg(long, global = true, env = "KF_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Abandon the request after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a service instance from a class and plan
    CreateService(services::CreateOptions),
    /// Delete a service instance
    DeleteService(services::DeleteOptions),
    /// List service instances in the namespace
    Services(services::ListOptions),
    /// Delete an app
    Delete(apps::DeleteOptions),
    /// List apps in the namespace
    Apps(apps::ListOptions),
    /// List secrets in the namespace
    Secrets(secrets::ListOptions),
    /// Show a secret's keys and labels
    Secret(secrets::GetOptions),
    /// Delete a secret
    DeleteSecret(secrets::DeleteOptions),
    /// Generate shell completion scripts
    Completion(completion::Options),
}

/// Get the CLI command structure (for completion generation)
pub fn get_cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let exit_code = commands::run(&cli.global, &cli.command).await;

    process::exit(exit_code);
}

//! choicecfg CLI
//!
//! Reads and updates choice configuration documents from the command line.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(file = %cli.file.display(), "Using document");

    execute_command(&cli.file, cli.command)
}

fn execute_command(file: &std::path::Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Get { path, json } => commands::run_get(file, &path, json),
        Commands::Set { path, value } => commands::run_set(file, &path, &value),
        Commands::Resolve { group, json } => commands::run_resolve(file, &group, json),
        Commands::Select { group, option } => commands::run_select(file, &group, &option),
        Commands::Show { group, json } => commands::run_show(file, group.as_deref(), json),
    }
}

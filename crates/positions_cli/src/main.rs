//! `positions` command-line shell.
//!
//! # Responsibility
//! - Resolve configuration, start logging, dispatch one subcommand.
//! - Report every error as a message and exit code 1; never panic.

use clap::Parser;

mod cli;
mod commands;
mod render;

use crate::cli::Cli;
use positions_core::{init_logging, TrackerConfig};

fn main() {
    let cli = Cli::parse();
    let config = TrackerConfig::resolve(cli.db.clone(), cli.log_level.clone());

    if let Some(log_dir) = &cli.log_dir {
        if let Err(error) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("error: failed to initialize logging: {error}");
            std::process::exit(1);
        }
    }

    let exit_code = match commands::run(&cli, &config) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    };
    std::process::exit(exit_code);
}

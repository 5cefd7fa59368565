//! Statics CLI Binary
//!
//! Command-line interface for generating and reading static-file snapshots.

use clap::Parser;
use statics::logging::init_cli_logging;
use statics::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Create CLI context
    let context = match CliContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let logging = cli.logging_config(&context.config().logging);
    // stdout carries the command result
    if let Err(e) = init_cli_logging(Some(&logging)) {
        eprintln!("Warning: {}", e);
    }

    // Execute command
    match context.execute(&cli.command) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

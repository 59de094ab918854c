//! Command-line interface for the `esq` search query tooling.

#![warn(missing_docs)]

mod cli;

use std::{env, io, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{
    args::{Cli, Commands},
    commands,
    config::Config,
};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("ESQ_LOG"))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("error: could not determine current directory: {e}");
            return ExitCode::FAILURE;
        }
    };
    let config = match Config::load(&cwd) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Compile { state, compact } => commands::compile::run(&config, &state, compact),
        Commands::Map {
            response,
            state,
            status,
            table,
        } => commands::map::run(&config, &response, &state, status, table),
        Commands::Url { target, base } => commands::url::run(&config, &target, base.as_deref()),
    }
}

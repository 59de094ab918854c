//! Clap argument definitions for the `esq` CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "esq")]
#[command(about = "Search query compiler and result mapper tooling")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported `esq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a query-state snapshot into the wire query body
    Compile {
        /// Path to the query state JSON file
        state: PathBuf,

        /// Print one-line JSON instead of pretty-printing
        #[arg(long)]
        compact: bool,
    },

    /// Map a captured engine response against a query-state snapshot
    Map {
        /// Path to the engine response JSON file
        response: PathBuf,

        /// Path to the query state JSON file the query was compiled from
        #[arg(long)]
        state: PathBuf,

        /// HTTP status to map the response under
        #[arg(long, default_value = "200")]
        status: u16,

        /// Print hits as a table instead of the JSON result model
        #[arg(long)]
        table: bool,
    },

    /// Print engine endpoint URLs for a dataset
    Url {
        /// Endpoint to print
        #[command(subcommand)]
        target: UrlTarget,

        /// Dataset base URL; falls back to `.esq.toml`
        #[arg(long)]
        base: Option<String>,
    },
}

/// Endpoints `esq url` can print.
#[derive(Subcommand)]
pub enum UrlTarget {
    /// The search endpoint
    Search,
    /// The mapping endpoint
    Mapping,
    /// A single record
    Record {
        /// Record id
        id: String,
    },
    /// A single record's partial-update endpoint
    Update {
        /// Record id
        id: String,
    },
}

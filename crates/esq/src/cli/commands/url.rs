//! Implementation of `esq url`.

use std::process::ExitCode;

use esq_wire::{mapping_url, record_url, search_url, update_url};

use crate::cli::{args::UrlTarget, config::Config};

/// Prints one endpoint URL for the dataset base.
pub fn run(config: &Config, target: &UrlTarget, base: Option<&str>) -> ExitCode {
    let Some(base) = base.or_else(|| config.base_url()) else {
        eprintln!("error: no dataset base URL; pass --base or set [dataset] url in .esq.toml");
        return ExitCode::FAILURE;
    };

    let url = match target {
        UrlTarget::Search => search_url(base),
        UrlTarget::Mapping => mapping_url(base),
        UrlTarget::Record { id } => record_url(base, id),
        UrlTarget::Update { id } => update_url(base, id),
    };
    println!("{url}");
    ExitCode::SUCCESS
}

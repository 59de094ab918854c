//! Implementation of `esq compile`.

use std::{path::Path, process::ExitCode};

use crate::cli::{commands::shared, config::Config};

/// Compiles a query-state snapshot and prints the wire query body.
pub fn run(config: &Config, state_path: &Path, compact: bool) -> ExitCode {
    let state = match shared::load_state(state_path, config.defaults.as_ref()) {
        Ok(state) => state,
        Err(code) => return code,
    };

    match esq_wire::compile(&state) {
        Ok(body) => shared::print_json(&body, compact),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

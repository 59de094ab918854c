//! Helpers shared by the subcommand implementations.

use std::{fs, path::Path, process::ExitCode};

use esq_query::QueryState;
use serde_json::Value;

use crate::cli::config::Defaults;

/// Reads and deserializes a query-state snapshot, applying config paging
/// defaults to states that do not set their own.
pub fn load_state(path: &Path, defaults: Option<&Defaults>) -> Result<QueryState, ExitCode> {
    let contents = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: failed to read {}: {e}", path.display());
        ExitCode::FAILURE
    })?;
    let mut raw: Value = serde_json::from_str(&contents).map_err(|e| {
        eprintln!("error: {} is not valid JSON: {e}", path.display());
        ExitCode::FAILURE
    })?;

    // Config defaults apply only where the snapshot itself is silent.
    if let (Some(defaults), Some(object)) = (defaults, raw.as_object_mut()) {
        if let Some(size) = defaults.size
            && !object.contains_key("size")
        {
            object.insert("size".to_string(), size.into());
        }
        if let Some(from) = defaults.from
            && !object.contains_key("from")
        {
            object.insert("from".to_string(), from.into());
        }
    }

    serde_json::from_value(raw).map_err(|e| {
        eprintln!("error: {} is not a valid query state: {e}", path.display());
        ExitCode::FAILURE
    })
}

/// Serializes a value as pretty or compact JSON and prints it.
pub fn print_json(value: &impl serde::Serialize, compact: bool) -> ExitCode {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    match rendered {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize output: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Implementation of `esq map`.

use std::{fs, path::Path, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use esq_wire::ResultModel;

use crate::cli::{commands::shared, config::Config};

/// Maps a captured engine response against a query-state snapshot and
/// prints the result model.
pub fn run(
    config: &Config,
    response_path: &Path,
    state_path: &Path,
    status: u16,
    table: bool,
) -> ExitCode {
    let state = match shared::load_state(state_path, config.defaults.as_ref()) {
        Ok(state) => state,
        Err(code) => return code,
    };
    let body = match fs::read_to_string(response_path) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", response_path.display());
            return ExitCode::FAILURE;
        }
    };

    let model = match esq_wire::map_http_response(status, &body, &state) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if table {
        print_hit_table(&model);
        ExitCode::SUCCESS
    } else {
        shared::print_json(&model, false)
    }
}

/// Prints the hits as a table: id plus every other top-level source field.
fn print_hit_table(model: &ResultModel) {
    let mut columns = vec!["id".to_string()];
    for hit in &model.hits {
        for key in hit.keys() {
            if key != "id" && !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(columns.iter().map(String::as_str).collect::<Vec<_>>());
    for hit in &model.hits {
        table.add_row(
            columns
                .iter()
                .map(|column| Cell::new(hit.get(column).map(render_value).unwrap_or_default()))
                .collect::<Vec<_>>(),
        );
    }
    println!("{table}");
    println!("{} of {} hits", model.hits.len(), model.total);
}

/// Renders a JSON value for a table cell, without quotes around strings.
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! Error types for the esq-wire crate.

use thiserror::Error;

/// Errors that can occur while compiling query state into a wire query.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A date range filter referenced a field with no date range
    /// aggregation declaring its date format.
    #[error("no date format declared for field {field}")]
    MissingDateFormat {
        /// Field the filter referenced.
        field: String,
    },

    /// A caller-supplied aggregation key clashed with one the compiler
    /// reserves for itself.
    #[error("aggregation key {key} is reserved")]
    AggregationKeyCollision {
        /// The clashing key.
        key: String,
    },
}

/// Errors that can occur while mapping an engine response.
#[derive(Debug, Error)]
pub enum MapError {
    /// The engine answered with a non-success status.
    #[error("query failed with status {status}: {body}")]
    QueryFailed {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept verbatim for diagnosis.
        body: String,
    },

    /// The response body was not valid JSON for the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

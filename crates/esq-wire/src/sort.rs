//! Wire encoding for sort specs.

use esq_query::SortSpec;
use serde_json::{Value, json};

/// Encodes the sort list as the wire `sort` array: one single-key object
/// per spec, mapping the field to its options.
pub fn encode(sort: &[SortSpec]) -> Value {
    Value::Array(
        sort.iter()
            .map(|spec| json!({(spec.field.as_str()): spec.options}))
            .collect(),
    )
}

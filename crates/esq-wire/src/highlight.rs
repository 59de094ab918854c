//! Wire encoding for highlighting.

use serde_json::{Map, Value, json};

/// Encodes the wire `highlight` slot, or `None` when there is nothing to
/// highlight. Highlighting needs both a free-text query and at least one
/// requested field.
pub fn encode(q: &str, fields: &[String]) -> Option<Value> {
    if q.is_empty() || fields.is_empty() {
        return None;
    }
    let mut field_map = Map::new();
    for field in fields {
        field_map.insert(field.clone(), json!({"force_source": true}));
    }
    Some(json!({
        "number_of_fragments": 0,
        "pre_tags": ["<b>"],
        "post_tags": ["</b>"],
        "fields": field_map,
    }))
}

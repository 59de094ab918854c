//! Sort specifications.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry in the sort order.
///
/// Everything other than `field` passes through to the wire verbatim as that
/// field's sort options (`order`, `mode`, `missing`, ...). The model does
/// not enumerate the engine's sort options; it just preserves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort on.
    pub field: String,
    /// Remaining sort options, passed through untouched.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl SortSpec {
    /// Creates a sort entry with a single `order` option.
    pub fn by(field: impl Into<String>, order: &str) -> Self {
        let mut options = Map::new();
        options.insert("order".to_string(), Value::String(order.to_string()));
        Self {
            field: field.into(),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn options_flatten_around_field() {
        let spec: SortSpec =
            serde_json::from_value(json!({"field": "price", "order": "desc", "missing": "_last"}))
                .unwrap();
        assert_eq!(spec.field, "price");
        assert_eq!(spec.options.get("order"), Some(&json!("desc")));
        assert_eq!(spec.options.get("missing"), Some(&json!("_last")));
    }

    #[test]
    fn by_sets_order() {
        let spec = SortSpec::by("price", "desc");
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({"field": "price", "order": "desc"})
        );
    }
}

//! Wire encoding for aggregations and legacy facets.

use std::collections::BTreeMap;

use esq_query::{AggSpec, FacetSpec, QueryMode};
use serde_json::{Map, Value, json};

use crate::error::CompileError;

/// Key of the synthetic per-type aggregation injected in cross-type mode.
pub const TOP_DOCS_KEY: &str = "top_docs";

/// Number of documents returned per type bucket in cross-type mode.
const TOP_HITS_SIZE: u64 = 10;

/// Encodes the aggregation map for the wire `aggs` slot.
///
/// In [`QueryMode::AllTypes`] a synthetic [`TOP_DOCS_KEY`] aggregation is
/// added; a caller-supplied aggregation under that key is rejected rather
/// than silently overwritten.
pub fn encode(
    aggs: &BTreeMap<String, AggSpec>,
    mode: QueryMode,
) -> Result<Value, CompileError> {
    let mut out = Map::new();
    for (key, spec) in aggs {
        out.insert(key.clone(), encode_spec(spec));
    }
    if mode == QueryMode::AllTypes {
        if out.contains_key(TOP_DOCS_KEY) {
            return Err(CompileError::AggregationKeyCollision {
                key: TOP_DOCS_KEY.to_string(),
            });
        }
        out.insert(TOP_DOCS_KEY.to_string(), top_docs_aggregation());
    }
    Ok(Value::Object(out))
}

/// Encodes one aggregation spec as its wire body.
fn encode_spec(spec: &AggSpec) -> Value {
    match spec {
        AggSpec::Terms { field, size } => {
            let mut body = Map::new();
            body.insert("field".to_string(), json!(field));
            if let Some(size) = size {
                body.insert("size".to_string(), json!(size));
            }
            json!({"terms": body})
        }
        AggSpec::Range { field, ranges } => {
            json!({"range": {"field": field, "ranges": ranges}})
        }
        AggSpec::DateRange {
            field,
            format,
            ranges,
        } => json!({"date_range": {"field": field, "format": format, "ranges": ranges}}),
    }
}

/// Groups the top documents per `_type`, ordered by best score. This is
/// what a cross-type query returns its per-type previews through.
fn top_docs_aggregation() -> Value {
    json!({
        "terms": {
            "field": "_type",
            "order": {"top_hit": "desc"},
        },
        "aggs": {
            "top_tags_hits": {"top_hits": {"size": TOP_HITS_SIZE}},
            "top_hit": {"max": {"script": "_score", "lang": "groovy"}},
        },
    })
}

/// Encodes the legacy facet map for the wire `facets` slot.
pub fn encode_facets(facets: &BTreeMap<String, FacetSpec>) -> Value {
    let mut out = Map::new();
    for (key, spec) in facets {
        let body = match spec {
            FacetSpec::Terms { field, size } => {
                let mut terms = Map::new();
                terms.insert("field".to_string(), json!(field));
                if let Some(size) = size {
                    terms.insert("size".to_string(), json!(size));
                }
                json!({"terms": terms})
            }
            FacetSpec::DateHistogram { field, interval } => {
                json!({"date_histogram": {"field": field, "interval": interval}})
            }
        };
        out.insert(key.clone(), body);
    }
    Value::Object(out)
}

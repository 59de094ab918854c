//! The result mapper: engine response in, abstract result model out.
//!
//! The engine response does not say what kind of aggregation produced a
//! result, so the mapper recovers it from the query state that produced
//! the query. It also marks buckets currently selected by an active
//! filter, which is what lets a caller render facet lists with their
//! chosen entry highlighted.

use std::collections::BTreeMap;

use esq_query::{AggKind, AggSpec, FilterKind, QueryMode, QueryState};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::{
    aggs::TOP_DOCS_KEY,
    error::MapError,
    response::{AggBucket, FacetResult, RawAggregation, SearchResponse},
};

/// The mapped search result.
#[derive(Debug, Clone, Serialize)]
pub struct ResultModel {
    /// Total number of matching documents.
    pub total: u64,
    /// The returned page of documents. Each carries an `id` field and,
    /// when highlighting applied, a `highlight` map.
    pub hits: Vec<Map<String, Value>>,
    /// Legacy facet results, passed through from the engine.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub facets: BTreeMap<String, FacetResult>,
    /// Aggregation results with recovered kinds and selection flags.
    pub aggregations: BTreeMap<String, AggResult>,
}

/// One mapped aggregation result.
#[derive(Debug, Clone, Serialize)]
pub struct AggResult {
    /// Recovered aggregation kind; `None` when the response carries an
    /// aggregation nothing in the query state declared and the bucket
    /// shape gives no hint.
    pub kind: Option<AggKind>,
    /// The buckets, each with `selected` filled in.
    pub buckets: Vec<AggBucket>,
}

/// Maps a raw engine response against the query state that produced it.
pub fn map_response(response: SearchResponse, state: &QueryState) -> ResultModel {
    let hits = response
        .hits
        .hits
        .into_iter()
        .map(|hit| {
            let mut source = hit.source;
            if !source.contains_key("id") {
                source.insert("id".to_string(), Value::String(hit.id));
            }
            if let Some(highlight) = hit.highlight {
                source.insert("highlight".to_string(), json!(highlight));
            }
            source
        })
        .collect();

    let mut aggregations = BTreeMap::new();
    for (key, raw) in response.aggregations.unwrap_or_default() {
        let kind = recover_kind(&key, &raw, state);
        let field = state.aggs.get(&key).map(AggSpec::field);
        let buckets = raw
            .buckets
            .into_iter()
            .map(|mut bucket| {
                bucket.selected =
                    field.is_some_and(|field| bucket_selected(state, field, bucket.key.as_ref()));
                bucket
            })
            .collect();
        aggregations.insert(key, AggResult { kind, buckets });
    }

    tracing::debug!(
        total = response.hits.total,
        aggregations = aggregations.len(),
        "mapped engine response"
    );
    ResultModel {
        total: response.hits.total,
        hits,
        facets: response.facets.unwrap_or_default(),
        aggregations,
    }
}

/// Maps a raw transport result. Non-success statuses and unparseable
/// bodies fail without producing a partial model.
pub fn map_http_response(
    status: u16,
    body: &str,
    state: &QueryState,
) -> Result<ResultModel, MapError> {
    if !(200..300).contains(&status) {
        return Err(MapError::QueryFailed {
            status,
            body: body.to_string(),
        });
    }
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(map_response(response, state))
}

/// Recovers the kind of an aggregation result: the declared spec wins,
/// the synthetic cross-type key is top-hits, and anything else falls back
/// to bucket-shape sniffing.
fn recover_kind(key: &str, raw: &RawAggregation, state: &QueryState) -> Option<AggKind> {
    if let Some(spec) = state.aggs.get(key) {
        return Some(spec.kind());
    }
    if key == TOP_DOCS_KEY && state.mode == QueryMode::AllTypes {
        return Some(AggKind::TopHits);
    }
    sniff_kind(raw)
}

/// Guesses an undeclared aggregation's kind from its first bucket.
fn sniff_kind(raw: &RawAggregation) -> Option<AggKind> {
    let first = raw.buckets.first()?;
    if first.extra.contains_key("from_as_string") || first.extra.contains_key("to_as_string") {
        Some(AggKind::DateRange)
    } else if first.extra.contains_key("from") || first.extra.contains_key("to") {
        Some(AggKind::Range)
    } else if first.extra.keys().any(|k| k.contains("top_hit")) {
        Some(AggKind::TopHits)
    } else {
        None
    }
}

/// A bucket is selected iff a non-negated term filter on the
/// aggregation's own field equals the bucket key. Comparison is strict
/// JSON equality, so `"7"` does not select a numeric `7` bucket.
fn bucket_selected(state: &QueryState, field: &str, key: Option<&Value>) -> bool {
    let Some(key) = key else { return false };
    state.filters.iter().any(|filter| {
        !filter.negate
            && filter.field == field
            && matches!(&filter.kind, FilterKind::Term { value } if value == key)
    })
}

#[cfg(test)]
mod tests {
    use esq_query::Filter;
    use serde_json::json;

    use super::*;

    fn parse(body: Value) -> SearchResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn id_is_backfilled_from_engine_id() {
        let response = parse(json!({
            "hits": {"total": 2, "hits": [
                {"_id": "e-1", "_source": {"title": "a"}},
                {"_id": "e-2", "_source": {"id": "own-id", "title": "b"}},
            ]},
        }));
        let model = map_response(response, &QueryState::default());
        assert_eq!(model.total, 2);
        assert_eq!(model.hits[0].get("id"), Some(&json!("e-1")));
        assert_eq!(model.hits[1].get("id"), Some(&json!("own-id")));
    }

    #[test]
    fn highlight_is_attached_to_hits() {
        let response = parse(json!({
            "hits": {"total": 1, "hits": [{
                "_id": "e-1",
                "_source": {"title": "Annual report"},
                "highlight": {"title": ["<b>Annual</b> report"]},
            }]},
        }));
        let model = map_response(response, &QueryState::default());
        assert_eq!(
            model.hits[0].get("highlight"),
            Some(&json!({"title": ["<b>Annual</b> report"]}))
        );
    }

    #[test]
    fn selection_is_field_aware() {
        let mut state = QueryState::default();
        state.add_term_aggregation("color", None);
        state.add_term_aggregation("brand", None);
        // Same bucket key exists under both fields; only the filtered
        // field's bucket may come back selected.
        state.replace_filter(Filter::term("color", "red"));

        let response = parse(json!({
            "hits": {"total": 0, "hits": []},
            "aggregations": {
                "color": {"buckets": [
                    {"key": "red", "doc_count": 3},
                    {"key": "blue", "doc_count": 1},
                ]},
                "brand": {"buckets": [{"key": "red", "doc_count": 3}]},
            },
        }));
        let model = map_response(response, &state);
        let color = &model.aggregations["color"];
        assert!(color.buckets[0].selected);
        assert!(!color.buckets[1].selected);
        assert!(!model.aggregations["brand"].buckets[0].selected);
    }

    #[test]
    fn negated_filters_do_not_select() {
        let mut state = QueryState::default();
        state.add_term_aggregation("color", None);
        state.replace_filter(Filter::term("color", "red").negated());
        let response = parse(json!({
            "hits": {"total": 0, "hits": []},
            "aggregations": {"color": {"buckets": [{"key": "red", "doc_count": 3}]}},
        }));
        let model = map_response(response, &state);
        assert!(!model.aggregations["color"].buckets[0].selected);
    }

    #[test]
    fn selection_comparison_is_type_strict() {
        let mut state = QueryState::default();
        state.add_term_aggregation("year", None);
        state.replace_filter(Filter::term("year", "7"));
        let response = parse(json!({
            "hits": {"total": 0, "hits": []},
            "aggregations": {"year": {"buckets": [{"key": 7, "doc_count": 1}]}},
        }));
        let model = map_response(response, &state);
        assert!(!model.aggregations["year"].buckets[0].selected);
    }

    #[test]
    fn kind_comes_from_declared_spec() {
        let mut state = QueryState::default();
        state.add_term_aggregation("color", None);
        let response = parse(json!({
            "hits": {"total": 0, "hits": []},
            "aggregations": {"color": {"buckets": []}},
        }));
        let model = map_response(response, &state);
        assert_eq!(model.aggregations["color"].kind, Some(AggKind::Terms));
    }

    #[test]
    fn top_docs_kind_under_all_types_mode() {
        let mut state = QueryState::default();
        state.mode = QueryMode::AllTypes;
        let response = parse(json!({
            "hits": {"total": 0, "hits": []},
            "aggregations": {"top_docs": {"buckets": [
                {"key": "report", "doc_count": 5, "top_tags_hits": {"hits": {}}},
            ]}},
        }));
        let model = map_response(response, &state);
        assert_eq!(model.aggregations["top_docs"].kind, Some(AggKind::TopHits));
    }

    #[test]
    fn undeclared_kind_is_sniffed_from_buckets() {
        let response = parse(json!({
            "hits": {"total": 0, "hits": []},
            "aggregations": {
                "ages": {"buckets": [{"from": 0.0, "to": 50.0, "doc_count": 2}]},
                "years": {"buckets": [{"from_as_string": "2014-01-01", "doc_count": 1}]},
                "plain": {"buckets": [{"key": "x", "doc_count": 1}]},
            },
        }));
        let model = map_response(response, &QueryState::default());
        assert_eq!(model.aggregations["ages"].kind, Some(AggKind::Range));
        assert_eq!(model.aggregations["years"].kind, Some(AggKind::DateRange));
        assert_eq!(model.aggregations["plain"].kind, None);
    }

    #[test]
    fn facets_pass_through() {
        let response = parse(json!({
            "hits": {"total": 0, "hits": []},
            "facets": {"publisher": {
                "_type": "terms",
                "total": 3,
                "terms": [{"term": "acme", "count": 3}],
            }},
        }));
        let model = map_response(response, &QueryState::default());
        let facet = &model.facets["publisher"];
        assert_eq!(facet.kind, "terms");
        assert_eq!(facet.terms[0].count, 3);
    }

    #[test]
    fn non_success_status_fails_verbatim() {
        let err = map_http_response(500, "boom", &QueryState::default()).unwrap_err();
        match err {
            MapError::QueryFailed { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            MapError::Parse(_) => panic!("expected QueryFailed"),
        }
    }

    #[test]
    fn malformed_success_body_fails_parse() {
        let err = map_http_response(200, "{not json", &QueryState::default()).unwrap_err();
        assert!(matches!(err, MapError::Parse(_)));
    }
}

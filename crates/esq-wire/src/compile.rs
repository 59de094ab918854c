//! The query compiler: query state in, wire query body out.
//!
//! Compilation is pure. The caller's [`QueryState`] is only read, every
//! output object is built from scratch, and a failed compile returns an
//! error with no partial body.

use esq_query::{AggSpec, BoolClauses, BoostField, FilterKind, QueryState, TermClause};
use serde_json::{Map, Value, json};

use crate::{
    aggs,
    error::{CompileError, MapError},
    filter, highlight,
    map::{self, ResultModel},
    sort,
};

/// Fixed fuzziness level for free-text queries.
const FUZZINESS: u64 = 2;

/// Analyzer name the engine is expected to have configured.
const ANALYZER: &str = "custom_analyzer_combo";

/// Compiles query state into the wire query body.
///
/// Core clause decision order: id lookup, then free text, then match-all.
/// Filters wrap the core clause in a `filtered` envelope. Aggregations,
/// facets, sort, highlighting and paging are attached around it.
pub fn compile(state: &QueryState) -> Result<Value, CompileError> {
    let mut size = state.size;

    let core = if let Some(ids) = &state.ids {
        size = ids.len() as u64;
        json!({"ids": {"values": ids}})
    } else if state.q.is_empty() {
        bool_envelope(json!({"match_all": {}}), &state.bool_clauses)
    } else {
        bool_envelope(free_text_clause(state), &state.bool_clauses)
    };

    let query = if state.filters.is_empty() {
        core
    } else {
        let mut clauses = Vec::with_capacity(state.filters.len());
        for f in &state.filters {
            if matches!(f.kind, FilterKind::DateRange { .. }) {
                require_date_format(state, &f.field)?;
            }
            clauses.push(filter::encode(f));
        }
        let mut filtered = Map::new();
        filtered.insert("filter".to_string(), json!({"and": clauses}));
        // A bare match-all core adds nothing inside a filtered envelope.
        if !state.q.is_empty() || state.ids.is_some() {
            filtered.insert("query".to_string(), core);
        }
        json!({"filtered": filtered})
    };

    let mut root = Map::new();
    root.insert("query".to_string(), query);
    if !state.sort.is_empty() {
        root.insert("sort".to_string(), sort::encode(&state.sort));
    }
    if let Some(block) = highlight::encode(&state.q, &state.highlight_fields) {
        root.insert("highlight".to_string(), block);
    }
    root.insert("aggs".to_string(), aggs::encode(&state.aggs, state.mode)?);
    if !state.facets.is_empty() {
        root.insert("facets".to_string(), aggs::encode_facets(&state.facets));
    }
    root.insert("size".to_string(), json!(size));
    root.insert("from".to_string(), json!(state.from));

    tracing::debug!(
        size,
        from = state.from,
        filters = state.filters.len(),
        aggs = state.aggs.len(),
        "compiled wire query"
    );
    Ok(Value::Object(root))
}

/// Builds the `query_string` clause for a free-text query.
fn free_text_clause(state: &QueryState) -> Value {
    let mut qs = Map::new();
    qs.insert("query".to_string(), json!(state.q));
    if !state.boost_fields.is_empty() {
        let fields: Vec<String> = state.boost_fields.iter().map(render_boost_field).collect();
        qs.insert("fields".to_string(), json!(fields));
    }
    qs.insert("lenient".to_string(), json!(true));
    qs.insert("use_dis_max".to_string(), json!(true));
    qs.insert("fuzziness".to_string(), json!(FUZZINESS));
    qs.insert("analyzer".to_string(), json!(ANALYZER));
    json!({"query_string": qs})
}

/// Renders a boost field as `field^boost`, or the bare field name when no
/// positive boost is set.
fn render_boost_field(boost: &BoostField) -> String {
    match boost.boost {
        Some(factor) if factor > 0.0 => format!("{}^{factor}", boost.field),
        _ => boost.field.clone(),
    }
}

/// Wraps a core clause in a `bool` envelope carrying the boolean term
/// clauses. `minimum_should_match` is attached only when any clauses exist.
fn bool_envelope(core: Value, clauses: &BoolClauses) -> Value {
    let mut must = vec![core];
    must.extend(clauses.must.iter().map(term_clause));
    let must_not: Vec<Value> = clauses.must_not.iter().map(term_clause).collect();
    let should: Vec<Value> = clauses.should.iter().map(term_clause).collect();

    let mut body = Map::new();
    body.insert("must".to_string(), json!(must));
    body.insert("must_not".to_string(), json!(must_not));
    body.insert("should".to_string(), json!(should));
    if !clauses.is_empty() {
        body.insert("minimum_should_match".to_string(), json!(1));
    }
    json!({"bool": body})
}

/// Renders one boolean clause as a wire `term` clause.
fn term_clause(clause: &TermClause) -> Value {
    json!({"term": {(clause.field.as_str()): clause.value}})
}

/// Checks that a `date_range` filter field has a date range aggregation
/// declaring its format. The format itself never reaches the wire; this is
/// the validation step that keeps an undeclared filter from compiling.
fn require_date_format(state: &QueryState, field: &str) -> Result<(), CompileError> {
    state
        .aggs
        .values()
        .filter(|spec| spec.field() == field)
        .find_map(AggSpec::date_format)
        .map(|_| ())
        .ok_or_else(|| CompileError::MissingDateFormat {
            field: field.to_string(),
        })
}

/// A compiled wire query paired with the query state that produced it.
///
/// Responses are mapped against the snapshot, so a state mutated after
/// dispatch (or a response arriving late) can never be interpreted against
/// the wrong aggregation specs or filters.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    /// The wire query body.
    body: Value,
    /// The query state as of compile time.
    snapshot: QueryState,
}

impl CompiledQuery {
    /// Compiles the given state, capturing a snapshot of it.
    pub fn new(state: &QueryState) -> Result<Self, CompileError> {
        Ok(Self {
            body: compile(state)?,
            snapshot: state.clone(),
        })
    }

    /// The wire query body to send.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// The query state as of compile time.
    pub fn snapshot(&self) -> &QueryState {
        &self.snapshot
    }

    /// Maps an engine response for this query against the compile-time
    /// snapshot.
    pub fn map_http_response(&self, status: u16, body: &str) -> Result<ResultModel, MapError> {
        map::map_http_response(status, body, &self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use esq_query::{Filter, QueryMode};
    use serde_json::json;

    use super::*;

    #[test]
    fn match_all_core_shape() {
        let body = compile(&QueryState::default()).unwrap();
        assert_eq!(
            body,
            json!({
                "query": {"bool": {"must": [{"match_all": {}}], "must_not": [], "should": []}},
                "aggs": {},
                "size": 100,
                "from": 0,
            })
        );
    }

    #[test]
    fn free_text_clause_shape() {
        let mut state = QueryState::default();
        state.q = "annual report".to_string();
        state.add_boost_field("title", Some(2.0));
        state.add_boost_field("notes", None);
        let body = compile(&state).unwrap();
        assert_eq!(
            body["query"]["bool"]["must"][0],
            json!({"query_string": {
                "query": "annual report",
                "fields": ["title^2", "notes"],
                "lenient": true,
                "use_dis_max": true,
                "fuzziness": 2,
                "analyzer": "custom_analyzer_combo",
            }})
        );
    }

    #[test]
    fn boolean_clauses_set_minimum_should_match() {
        let mut state = QueryState::default();
        state.q = "report".to_string();
        state.bool_clauses.should.push(TermClause {
            field: "lang".to_string(),
            value: json!("en"),
        });
        state.bool_clauses.must_not.push(TermClause {
            field: "draft".to_string(),
            value: json!(true),
        });
        let body = compile(&state).unwrap();
        let envelope = &body["query"]["bool"];
        assert_eq!(envelope["should"], json!([{"term": {"lang": "en"}}]));
        assert_eq!(envelope["must_not"], json!([{"term": {"draft": true}}]));
        assert_eq!(envelope["minimum_should_match"], json!(1));
    }

    #[test]
    fn no_clauses_no_minimum_should_match() {
        let mut state = QueryState::default();
        state.q = "report".to_string();
        let body = compile(&state).unwrap();
        assert!(body["query"]["bool"].get("minimum_should_match").is_none());
    }

    #[test]
    fn id_lookup_overrides_size() {
        let mut state = QueryState::default();
        state.ids = Some(vec!["a".to_string(), "b".to_string()]);
        let body = compile(&state).unwrap();
        assert_eq!(body["query"], json!({"ids": {"values": ["a", "b"]}}));
        assert_eq!(body["size"], json!(2));
    }

    #[test]
    fn filters_wrap_core_in_filtered_envelope() {
        let mut state = QueryState::default();
        state.q = "report".to_string();
        state.add_filter(Filter::term("color", "red"));
        let body = compile(&state).unwrap();
        let filtered = &body["query"]["filtered"];
        assert_eq!(
            filtered["filter"],
            json!({"and": [{"term": {"color": "red"}}]})
        );
        assert_eq!(filtered["query"]["bool"]["must"][0]["query_string"]["query"], json!("report"));
    }

    #[test]
    fn pure_filter_query_omits_inner_query() {
        let mut state = QueryState::default();
        state.add_filter(Filter::term("color", "red"));
        let body = compile(&state).unwrap();
        assert!(body["query"]["filtered"].get("query").is_none());
    }

    #[test]
    fn paging_passes_through_including_zero() {
        let mut state = QueryState::default();
        let body = compile(&state).unwrap();
        assert_eq!(body.get("from"), Some(&json!(0)));

        state.from = 40;
        let body = compile(&state).unwrap();
        assert_eq!(body["from"], json!(40));
    }

    #[test]
    fn wire_body_carries_no_client_fields() {
        let mut state = QueryState::default();
        state.q = "report".to_string();
        state.add_term_aggregation("color", None);
        state.select_aggregation("color", json!("red"));
        state.highlight_fields.push("title".to_string());
        let body = compile(&state).unwrap();
        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["aggs", "from", "highlight", "query", "size"]);
        assert!(body["aggs"]["color"].get("selected").is_none());
    }

    #[test]
    fn date_range_filter_requires_declared_format() {
        let mut state = QueryState::default();
        state.add_filter(Filter::new(
            "created",
            FilterKind::DateRange {
                from: Some(1_400_000_000),
                to: None,
                include_lower: None,
                include_upper: None,
            },
        ));
        let err = compile(&state).unwrap_err();
        assert!(matches!(
            err,
            CompileError::MissingDateFormat { field } if field == "created"
        ));

        state.add_date_range_aggregation("created", "yyyy-MM-dd", Vec::new());
        let body = compile(&state).unwrap();
        // Validation only. The filter clause carries no format.
        assert_eq!(
            body["query"]["filtered"]["filter"]["and"][0],
            json!({"range": {"created": {"from": 1_400_000_000}}})
        );
    }

    #[test]
    fn snapshot_survives_later_mutation() {
        let mut state = QueryState::default();
        state.add_term_aggregation("color", None);
        let compiled = CompiledQuery::new(&state).unwrap();
        state.clear_aggregations();
        assert!(compiled.snapshot().aggs.contains_key("color"));
        assert_eq!(compiled.body()["aggs"]["color"]["terms"]["field"], json!("color"));
    }

    #[test]
    fn facets_encoded_when_present() {
        let mut state = QueryState::default();
        state.add_facet("publisher", None);
        let body = compile(&state).unwrap();
        assert_eq!(
            body["facets"],
            json!({"publisher": {"terms": {"field": "publisher"}}})
        );

        let without = compile(&QueryState::default()).unwrap();
        assert!(without.get("facets").is_none());
    }

    #[test]
    fn all_types_mode_reaches_aggs() {
        let mut state = QueryState::default();
        state.mode = QueryMode::AllTypes;
        let body = compile(&state).unwrap();
        assert_eq!(
            body["aggs"]["top_docs"]["terms"],
            json!({"field": "_type", "order": {"top_hit": "desc"}})
        );
    }
}

//! Wire encoding for structured filters.
//!
//! Each [`Filter`] becomes one JSON clause in the `and` array of a
//! `filtered` query. Negated filters wrap their clause in `not`.

use esq_query::{Filter, FilterKind};
use serde_json::{Map, Value, json};

/// Encodes a single filter as its wire clause.
///
/// Numeric range bounds equal to zero are dropped from the output, as are
/// non-finite ones. The legacy backend tested bounds for truthiness and
/// NaN, so such bounds never reached the engine; callers that need an
/// inclusive zero lower bound should use a slightly negative one instead.
pub fn encode(filter: &Filter) -> Value {
    let clause = match &filter.kind {
        FilterKind::Term { value } => json!({"term": {(filter.field.as_str()): value}}),
        FilterKind::Terms { values, execution } => {
            let mut body = Map::new();
            body.insert(filter.field.clone(), json!(values));
            if let Some(execution) = execution {
                body.insert("execution".to_string(), json!(execution));
            }
            json!({"terms": body})
        }
        FilterKind::Range {
            from,
            to,
            include_lower,
            include_upper,
        } => {
            let mut bounds = Map::new();
            if let Some(from) = *from
                && from.is_finite()
                && from != 0.0
            {
                bounds.insert("from".to_string(), json!(from));
            }
            if let Some(to) = *to
                && to.is_finite()
                && to != 0.0
            {
                bounds.insert("to".to_string(), json!(to));
            }
            insert_bound_flags(&mut bounds, *include_lower, *include_upper);
            json!({"range": {(filter.field.as_str()): bounds}})
        }
        FilterKind::DateRange {
            from,
            to,
            include_lower,
            include_upper,
        } => {
            let mut bounds = Map::new();
            if let Some(from) = *from
                && from != 0
            {
                bounds.insert("from".to_string(), json!(from));
            }
            if let Some(to) = *to
                && to != 0
            {
                bounds.insert("to".to_string(), json!(to));
            }
            insert_bound_flags(&mut bounds, *include_lower, *include_upper);
            json!({"range": {(filter.field.as_str()): bounds}})
        }
        FilterKind::GeoDistance {
            point,
            distance,
            unit,
        } => {
            let mut body = Map::new();
            body.insert(filter.field.clone(), json!(point));
            body.insert("distance".to_string(), json!(distance));
            body.insert("unit".to_string(), json!(unit));
            json!({"geo_distance": body})
        }
        FilterKind::Type { value } => json!({"type": {"value": value}}),
        FilterKind::Exists => json!({"exists": {"field": filter.field}}),
        FilterKind::Missing => json!({"missing": {"field": filter.field}}),
    };
    if filter.negate {
        json!({"not": clause})
    } else {
        clause
    }
}

/// Inserts the `include_lower`/`include_upper` flags that are set.
fn insert_bound_flags(bounds: &mut Map<String, Value>, lower: Option<bool>, upper: Option<bool>) {
    if let Some(lower) = lower {
        bounds.insert("include_lower".to_string(), json!(lower));
    }
    if let Some(upper) = upper {
        bounds.insert("include_upper".to_string(), json!(upper));
    }
}

//! The mutable query state owned by the caller.
//!
//! `QueryState` is long-lived: UI actions mutate it incrementally through
//! the methods below, and each query execution derives a fresh wire query
//! from a read-only snapshot of it. Nothing in here performs I/O or knows
//! about the wire format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    aggs::{AggSpec, DateRangeBounds, FacetSpec, NumericRange},
    filter::Filter,
    sort::SortSpec,
};

/// Default page size when the caller has not set one.
const DEFAULT_SIZE: u64 = 100;

/// Returns the wire-safe aggregation id for a field: `.` replaced by `_`.
///
/// Dots are path separators in the engine's aggregation response, so field
/// ids cannot be used as aggregation keys directly.
pub fn agg_key(field: &str) -> String {
    field.replace('.', "_")
}

/// A field whose free-text relevance contribution is weighted above default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostField {
    /// Field to boost.
    pub field: String,
    /// Boost factor; `None` (or a non-positive value) leaves the field at
    /// its default weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f64>,
}

/// A field/value pair rendered as a wire `term` clause inside the boolean
/// envelope of a free-text or match-all query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermClause {
    /// Field the clause constrains.
    pub field: String,
    /// Value the field must equal.
    pub value: Value,
}

/// Additional boolean term constraints layered onto a free-text query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoolClauses {
    /// Clauses that must all match.
    pub must: Vec<TermClause>,
    /// Clauses of which at least one must match.
    pub should: Vec<TermClause>,
    /// Clauses that must not match.
    pub must_not: Vec<TermClause>,
}

impl BoolClauses {
    /// Returns true if no clauses are present at all.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty()
    }
}

/// Query execution mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Normal single-type search.
    #[default]
    Default,
    /// Cross-type search: the compiler injects a synthetic aggregation
    /// returning the top hits per document type.
    #[serde(rename = "all")]
    AllTypes,
}

/// The complete abstract query state.
///
/// Mutated incrementally by the caller; read (never written) by the wire
/// compiler. Serde round-trips as JSON so snapshots can be stored or fed to
/// the `esq` CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    /// Free-text search string; empty means no free-text clause.
    pub q: String,
    /// If present, short-circuits to an id-based lookup and overrides the
    /// page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    /// Fields boosted in free-text scoring, unique by field.
    pub boost_fields: Vec<BoostField>,
    /// Extra boolean term constraints; ignored without a boolean envelope.
    pub bool_clauses: BoolClauses,
    /// Structured filters, ANDed together. [`QueryState::replace_filter`]
    /// upholds at most one filter per field.
    pub filters: Vec<Filter>,
    /// Aggregation specs keyed by wire-safe aggregation id ([`agg_key`]).
    pub aggs: BTreeMap<String, AggSpec>,
    /// Client-side record of which aggregation value is selected, keyed like
    /// `aggs`. Never sent to the engine.
    pub agg_selections: BTreeMap<String, Value>,
    /// Legacy facet specs keyed by field id.
    pub facets: BTreeMap<String, FacetSpec>,
    /// Sort order, outermost first.
    pub sort: Vec<SortSpec>,
    /// Fields to highlight; only meaningful when `q` is non-empty.
    pub highlight_fields: Vec<String>,
    /// Page size.
    pub size: u64,
    /// Page offset.
    pub from: u64,
    /// Execution mode.
    pub mode: QueryMode,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            q: String::new(),
            ids: None,
            boost_fields: Vec::new(),
            bool_clauses: BoolClauses::default(),
            filters: Vec::new(),
            aggs: BTreeMap::new(),
            agg_selections: BTreeMap::new(),
            facets: BTreeMap::new(),
            sort: Vec::new(),
            highlight_fields: Vec::new(),
            size: DEFAULT_SIZE,
            from: 0,
            mode: QueryMode::Default,
        }
    }
}

impl QueryState {
    /// Appends a filter without touching existing ones.
    pub fn add_filter(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Replaces any filter on the same field, then appends.
    ///
    /// This is the operation that upholds the at-most-one-filter-per-field
    /// invariant relied on by bucket selection.
    pub fn replace_filter(&mut self, filter: Filter) {
        self.filters.retain(|f| f.field != filter.field);
        self.filters.push(filter);
    }

    /// Removes all filters on the given field.
    pub fn remove_filter(&mut self, field: &str) {
        self.filters.retain(|f| f.field != field);
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Returns the active filter on a field, if any (last one wins when the
    /// caller bypassed [`QueryState::replace_filter`]).
    pub fn selected_filter(&self, field: &str) -> Option<&Filter> {
        self.filters.iter().rev().find(|f| f.field == field)
    }

    /// Adds a boost field; a duplicate field id is a no-op.
    pub fn add_boost_field(&mut self, field: &str, boost: Option<f64>) {
        if self.boost_fields.iter().any(|b| b.field == field) {
            return;
        }
        self.boost_fields.push(BoostField {
            field: field.to_string(),
            boost,
        });
    }

    /// Removes every boost field.
    pub fn clear_boost_fields(&mut self) {
        self.boost_fields.clear();
    }

    /// Adds a terms aggregation on a field; an existing spec under the same
    /// key is left untouched.
    pub fn add_term_aggregation(&mut self, field: &str, size: Option<u64>) {
        self.aggs
            .entry(agg_key(field))
            .or_insert_with(|| AggSpec::Terms {
                field: field.to_string(),
                size,
            });
    }

    /// Adds a numeric range aggregation on a field; an existing spec under
    /// the same key is left untouched.
    pub fn add_range_aggregation(&mut self, field: &str, ranges: Vec<NumericRange>) {
        self.aggs
            .entry(agg_key(field))
            .or_insert_with(|| AggSpec::Range {
                field: field.to_string(),
                ranges,
            });
    }

    /// Adds a date range aggregation on a field; an existing spec under the
    /// same key is left untouched.
    ///
    /// The `format` also serves as the date format a `date_range` filter on
    /// this field resolves against at compile time.
    pub fn add_date_range_aggregation(
        &mut self,
        field: &str,
        format: &str,
        ranges: Vec<DateRangeBounds>,
    ) {
        self.aggs
            .entry(agg_key(field))
            .or_insert_with(|| AggSpec::DateRange {
                field: field.to_string(),
                format: format.to_string(),
                ranges,
            });
    }

    /// Removes the aggregation on a field, along with any recorded selection.
    pub fn remove_aggregation(&mut self, field: &str) {
        let key = agg_key(field);
        self.aggs.remove(&key);
        self.agg_selections.remove(&key);
    }

    /// Removes every aggregation and selection.
    pub fn clear_aggregations(&mut self) {
        self.aggs.clear();
        self.agg_selections.clear();
    }

    /// Records the selected value for a field's aggregation. No-op if the
    /// field has no aggregation spec.
    pub fn select_aggregation(&mut self, field: &str, value: Value) {
        let key = agg_key(field);
        if self.aggs.contains_key(&key) {
            self.agg_selections.insert(key, value);
        }
    }

    /// Clears the selected value for a field's aggregation.
    pub fn unselect_aggregation(&mut self, field: &str) {
        self.agg_selections.remove(&agg_key(field));
    }

    /// Adds a terms facet on a field; an existing facet is left untouched.
    pub fn add_facet(&mut self, field: &str, size: Option<u64>) {
        self.facets
            .entry(field.to_string())
            .or_insert_with(|| FacetSpec::Terms {
                field: field.to_string(),
                size,
            });
    }

    /// Adds (or replaces with) a date histogram facet on a field.
    pub fn add_histogram_facet(&mut self, field: &str, interval: &str) {
        self.facets.insert(
            field.to_string(),
            FacetSpec::DateHistogram {
                field: field.to_string(),
                interval: interval.to_string(),
            },
        );
    }

    /// Removes the facet on a field.
    pub fn remove_facet(&mut self, field: &str) {
        self.facets.remove(field);
    }

    /// Removes every facet.
    pub fn clear_facets(&mut self) {
        self.facets.clear();
    }
}

//! Backend-agnostic search query state for esq.
//!
//! This crate models everything a caller can ask of a search backend,
//! independent of any wire format:
//!
//! - **Free text**: `q` with optional per-field boosts
//! - **Id lookup**: fetch a known set of records by id
//! - **Filters**: structured constraints (`term`, `terms`, `range`,
//!   `date_range`, `geo_distance`, `type`, `exists`, `missing`), each
//!   optionally negated
//! - **Aggregations**: bucketed summaries (`terms`, `range`, `date_range`)
//!   plus the legacy facet mechanism
//! - **Sort, highlighting, paging**
//!
//! The state is long-lived and mutated incrementally by the caller (see the
//! methods on [`QueryState`]); compiling it to a concrete wire query is the
//! job of the `esq-wire` crate, which only ever reads it.
//!
//! # Example
//!
//! ```
//! use esq_query::QueryState;
//!
//! let mut state = QueryState::default();
//! state.q = "annual report".to_string();
//! state.add_term_aggregation("publisher.name", Some(20));
//! assert!(state.aggs.contains_key("publisher_name"));
//! ```

#![warn(missing_docs)]

mod aggs;
mod filter;
mod sort;
mod state;

pub use aggs::{AggKind, AggSpec, DateRangeBounds, FacetSpec, NumericRange};
pub use filter::{Filter, FilterKind, GeoPoint};
pub use sort::SortSpec;
pub use state::{BoolClauses, BoostField, QueryMode, QueryState, TermClause, agg_key};

//! Elasticsearch wire query compiler and result mapper for esq.
//!
//! This crate turns an [`esq_query::QueryState`] into the JSON query body
//! the engine's search endpoint accepts, and maps the engine's response
//! back into an abstract result model:
//! - Wire codecs for filters, sort, aggregations, facets and highlighting
//! - The query compiler, with a snapshot type tying each compiled query
//!   to the state that produced it
//! - The result mapper, recovering aggregation kinds and selection flags
//!   the wire format does not carry
//! - Endpoint URL builders for the engine's REST surface
//!
//! # Example
//!
//! ```
//! use esq_query::{Filter, QueryState};
//! use esq_wire::CompiledQuery;
//!
//! let mut state = QueryState::default();
//! state.q = "annual report".to_string();
//! state.replace_filter(Filter::term("color", "red"));
//! state.add_term_aggregation("color", Some(10));
//!
//! let compiled = CompiledQuery::new(&state).unwrap();
//! assert!(compiled.body()["query"]["filtered"].is_object());
//!
//! let body = r#"{"hits": {"total": 0, "hits": []}}"#;
//! let result = compiled.map_http_response(200, body).unwrap();
//! assert_eq!(result.total, 0);
//! ```

#![warn(missing_docs)]

mod aggs;
mod compile;
mod endpoint;
mod error;
mod filter;
mod highlight;
mod map;
mod response;
mod sort;

pub use aggs::{TOP_DOCS_KEY, encode as encode_aggs, encode_facets};
pub use compile::{CompiledQuery, compile};
pub use endpoint::{mapping_url, record_url, search_url, update_url};
pub use error::{CompileError, MapError};
pub use filter::encode as encode_filter;
pub use highlight::encode as encode_highlight;
pub use map::{AggResult, ResultModel, map_http_response, map_response};
pub use response::{AggBucket, FacetResult, FacetTerm, Hit, HitList, RawAggregation, SearchResponse};
pub use sort::encode as encode_sort;

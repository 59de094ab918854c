//! Aggregation and facet specifications.
//!
//! Aggregations are the modern bucketing mechanism; facets are the legacy
//! parallel mechanism with a different wire shape. Both are specified here
//! as closed enums — the wire codec never has to strip client bookkeeping
//! because none is stored alongside the wire-bound parameters (the
//! `selected` value lives in `QueryState::agg_selections`).

use serde::{Deserialize, Serialize};

/// A numeric bucket boundary pair for range aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    /// Exclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
}

/// A date bucket boundary pair for date-range aggregations.
///
/// Bounds are date-math or formatted-date strings interpreted by the engine
/// against the spec's `format` (e.g. `"now-1M/M"`, `"2015-01-01"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeBounds {
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Exclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Specification of one aggregation, keyed in `QueryState::aggs` by the
/// wire-safe aggregation id (field with `.` replaced by `_`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggSpec {
    /// Bucket by distinct field values.
    Terms {
        /// Field to bucket on.
        field: String,
        /// Maximum number of buckets to return.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
    },

    /// Bucket by numeric ranges.
    Range {
        /// Field to bucket on.
        field: String,
        /// Bucket boundaries.
        ranges: Vec<NumericRange>,
    },

    /// Bucket by date ranges.
    DateRange {
        /// Field to bucket on.
        field: String,
        /// Date format the bounds (and any date-range filter on this field)
        /// are expressed in.
        format: String,
        /// Bucket boundaries.
        ranges: Vec<DateRangeBounds>,
    },
}

impl AggSpec {
    /// The field this aggregation buckets on.
    pub fn field(&self) -> &str {
        match self {
            Self::Terms { field, .. } | Self::Range { field, .. } | Self::DateRange { field, .. } => {
                field
            }
        }
    }

    /// The kind of this aggregation.
    pub fn kind(&self) -> AggKind {
        match self {
            Self::Terms { .. } => AggKind::Terms,
            Self::Range { .. } => AggKind::Range,
            Self::DateRange { .. } => AggKind::DateRange,
        }
    }

    /// The declared date format, for date-range aggregations only.
    pub fn date_format(&self) -> Option<&str> {
        match self {
            Self::DateRange { format, .. } => Some(format),
            Self::Terms { .. } | Self::Range { .. } => None,
        }
    }
}

/// The kind of an aggregation, as annotated onto mapped results.
///
/// The engine response does not echo the kind, so the result mapper recovers
/// it from the original query's specs. `TopHits` only appears on the
/// synthetic all-types aggregation the compiler injects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggKind {
    /// Distinct-value buckets.
    Terms,
    /// Numeric range buckets.
    Range,
    /// Date range buckets.
    DateRange,
    /// Per-type top-hit buckets (synthetic all-types aggregation).
    TopHits,
}

/// Specification of one legacy facet, keyed in `QueryState::facets` by
/// field id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FacetSpec {
    /// Distinct-value facet.
    Terms {
        /// Field to facet on.
        field: String,
        /// Maximum number of facet terms to return.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
    },

    /// Date histogram facet.
    DateHistogram {
        /// Field to bucket on.
        field: String,
        /// Bucket interval (e.g. `"month"`).
        interval: String,
    },
}

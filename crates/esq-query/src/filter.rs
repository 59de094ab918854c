//! Structured filter descriptions.
//!
//! A filter is a non-scoring constraint narrowing the result set. Filters are
//! a closed tagged union: the wire codec dispatches on [`FilterKind`] with an
//! exhaustive match, so an unsupported kind is unrepresentable in-process.
//! Unknown `type` tags in untrusted state JSON are rejected at
//! deserialization instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single structured constraint on a field.
///
/// `negate` inverts the filter; the wire codec wraps the encoded clause in a
/// `not` envelope when it is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Field the constraint applies to.
    pub field: String,
    /// Invert the filter.
    #[serde(default)]
    pub negate: bool,
    /// Kind-specific payload.
    #[serde(flatten)]
    pub kind: FilterKind,
}

impl Filter {
    /// Creates a non-negated filter on the given field.
    pub fn new(field: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            field: field.into(),
            negate: false,
            kind,
        }
    }

    /// Creates a term-equality filter, the most common kind.
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(
            field,
            FilterKind::Term {
                value: value.into(),
            },
        )
    }

    /// Returns this filter with `negate` set.
    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }
}

/// A geographic point for [`FilterKind::GeoDistance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

/// The kind-specific payload of a [`Filter`].
///
/// Serialized with a `type` tag matching the abstract model's kind names
/// (`term`, `terms`, `range`, `date_range`, `geo_distance`, `type`,
/// `exists`, `missing`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterKind {
    /// Exact value match.
    Term {
        /// Value the field must equal.
        value: Value,
    },

    /// Match any (or all, depending on `execution`) of a set of values.
    Terms {
        /// Candidate values.
        values: Vec<Value>,
        /// Optional execution hint (`"and"`, `"or"`, ...), passed through
        /// to the wire only when explicitly set.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        execution: Option<String>,
    },

    /// Numeric range constraint.
    Range {
        /// Lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<f64>,
        /// Upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<f64>,
        /// Whether the lower bound is inclusive.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        include_lower: Option<bool>,
        /// Whether the upper bound is inclusive.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        include_upper: Option<bool>,
    },

    /// Date range constraint with millisecond-resolution bounds.
    ///
    /// Distinct from [`FilterKind::Range`] in the abstract model even though
    /// the wire shape is the same `range` clause: the compiler additionally
    /// requires a matching `date_range` aggregation spec to resolve the
    /// field's date format.
    DateRange {
        /// Lower bound in epoch milliseconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<i64>,
        /// Upper bound in epoch milliseconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<i64>,
        /// Whether the lower bound is inclusive.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        include_lower: Option<bool>,
        /// Whether the upper bound is inclusive.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        include_upper: Option<bool>,
    },

    /// Documents within `distance` of `point`.
    GeoDistance {
        /// Center of the search circle.
        point: GeoPoint,
        /// Radius.
        distance: f64,
        /// Distance unit (e.g. `"km"`).
        unit: String,
    },

    /// Restrict to a single document type.
    Type {
        /// Type name the documents must have.
        value: String,
    },

    /// Documents where the field exists.
    Exists,

    /// Documents where the field is missing.
    Missing,
}

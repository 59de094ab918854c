//! Engine response types.
//!
//! These deserialize the raw search response body. Fields the mapper does
//! not consume (`took`, `_shards`, ...) are ignored; bucket contents are
//! kept loosely typed so engine-specific extras survive the round trip
//! into the result model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A successful engine search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Matched documents and the total count.
    pub hits: HitList,
    /// Legacy facet results, keyed by facet id.
    #[serde(default)]
    pub facets: Option<BTreeMap<String, FacetResult>>,
    /// Aggregation results, keyed by aggregation id.
    #[serde(default)]
    pub aggregations: Option<BTreeMap<String, RawAggregation>>,
}

/// The `hits` envelope of a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct HitList {
    /// Total number of matching documents, beyond the returned page.
    pub total: u64,
    /// Best score on this page, if scoring applied.
    #[serde(default)]
    pub max_score: Option<f64>,
    /// The returned page of documents.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// One returned document.
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    /// Engine-assigned document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score, absent when sorting replaced scoring.
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    /// The stored source object.
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
    /// Highlight fragments per field, when highlighting was requested.
    #[serde(default)]
    pub highlight: Option<BTreeMap<String, Vec<String>>>,
}

/// One legacy facet result, passed through to the result model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetResult {
    /// Facet kind as reported by the engine (`terms`, `date_histogram`).
    #[serde(rename(deserialize = "_type"))]
    pub kind: String,
    /// Total count of values across all terms.
    #[serde(default)]
    pub total: u64,
    /// Count of values not covered by the returned terms.
    #[serde(default)]
    pub other: u64,
    /// Count of documents missing the facet field.
    #[serde(default)]
    pub missing: u64,
    /// The returned term buckets.
    #[serde(default)]
    pub terms: Vec<FacetTerm>,
}

/// One term entry of a legacy facet result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetTerm {
    /// The term value.
    pub term: Value,
    /// Number of documents carrying the term.
    pub count: u64,
}

/// One raw aggregation result; only the buckets are interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAggregation {
    /// The returned buckets; empty for bucketless aggregations.
    #[serde(default)]
    pub buckets: Vec<AggBucket>,
}

/// One aggregation bucket, both as returned by the engine and as exposed
/// in the result model (with `selected` filled in by the mapper).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggBucket {
    /// Bucket key; absent for unkeyed buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    /// Number of documents in the bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_count: Option<u64>,
    /// Whether an active filter currently selects this bucket. Computed by
    /// the mapper; never part of the engine payload.
    #[serde(skip_deserializing, default)]
    pub selected: bool,
    /// Everything else the engine put in the bucket (`from`, `to`,
    /// `from_as_string`, nested top-hits bodies, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn response_parses_minimal_body() {
        let response: SearchResponse = serde_json::from_value(json!({
            "took": 3,
            "timed_out": false,
            "hits": {"total": 0, "hits": []},
        }))
        .unwrap();
        assert_eq!(response.hits.total, 0);
        assert!(response.aggregations.is_none());
    }

    #[test]
    fn hit_carries_source_and_highlight() {
        let hit: Hit = serde_json::from_value(json!({
            "_id": "doc-1",
            "_score": 1.5,
            "_source": {"title": "Annual report"},
            "highlight": {"title": ["<b>Annual</b> report"]},
        }))
        .unwrap();
        assert_eq!(hit.id, "doc-1");
        assert_eq!(hit.source.get("title"), Some(&json!("Annual report")));
        assert_eq!(
            hit.highlight.unwrap().get("title"),
            Some(&vec!["<b>Annual</b> report".to_string()])
        );
    }

    #[test]
    fn facet_result_renames_type_tag() {
        let facet: FacetResult = serde_json::from_value(json!({
            "_type": "terms",
            "total": 10,
            "other": 2,
            "missing": 1,
            "terms": [{"term": "red", "count": 7}],
        }))
        .unwrap();
        assert_eq!(facet.kind, "terms");
        assert_eq!(facet.terms[0].count, 7);
        let out = serde_json::to_value(&facet).unwrap();
        assert_eq!(out["kind"], json!("terms"));
    }

    #[test]
    fn bucket_extras_survive_serialization() {
        let bucket: AggBucket = serde_json::from_value(json!({
            "key": "2014",
            "doc_count": 4,
            "from_as_string": "2014-01-01",
        }))
        .unwrap();
        assert!(!bucket.selected);
        let out = serde_json::to_value(&bucket).unwrap();
        assert_eq!(out["from_as_string"], json!("2014-01-01"));
        assert_eq!(out["selected"], json!(false));
    }
}

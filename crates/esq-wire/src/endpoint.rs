//! Engine endpoint URL builders.
//!
//! Pure string construction; transport is the caller's business. The base
//! URL names one index/type root, e.g. `http://host:9200/index/type`.

/// URL of the search endpoint.
pub fn search_url(base: &str) -> String {
    format!("{}/_search", base.trim_end_matches('/'))
}

/// URL of the mapping endpoint.
pub fn mapping_url(base: &str) -> String {
    format!("{}/_mapping", base.trim_end_matches('/'))
}

/// URL of a single record.
pub fn record_url(base: &str, id: &str) -> String {
    format!("{}/{id}", base.trim_end_matches('/'))
}

/// URL of a single record's partial-update endpoint.
pub fn update_url(base: &str, id: &str) -> String {
    format!("{}/{id}/_update", base.trim_end_matches('/'))
}

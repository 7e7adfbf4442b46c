//! Listing envelopes shared by every resource.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameters of a listing request (filter keys plus an optional `page`).
///
/// Ordered so that requests and logs are deterministic.
pub type QueryParams = BTreeMap<String, String>;

/// One page of a collection endpoint: `{count, next, previous, results}`.
///
/// `count` is the total number of rows matching the filter, not the page length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// Allowed filter values of a resource, as answered by `GET {path}/filter/`.
///
/// The shape is backend-defined: movies answer `years`, `genres`, `countries`, `types`
/// and `sort`, reviews answer `types` and `sort`, and so on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterOptions(pub BTreeMap<String, serde_json::Value>);

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The allowed values of `field` rendered as strings.
    ///
    /// Arrays yield their elements, objects (the `sort` choices) yield their keys.
    pub fn choices(&self, field: &str) -> Vec<String> {
        match self.0.get(field) {
            Some(serde_json::Value::Array(values)) => values.iter().map(render).collect(),
            Some(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
            Some(serde_json::Value::Null) | None => Vec::new(),
            Some(other) => vec![render(other)],
        }
    }
}

fn render(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

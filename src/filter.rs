// src/filter.rs
//! Pure, synchronous filtering over an already-materialized collection.
//! Safe for concurrent invocation; never mutates its input.

use serde::Deserialize;

use crate::ingest::types::News;

/// Country → source-keyword table. Heuristic matching on the source label,
/// not authoritative geolocation.
const COUNTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("us", &["us"]),
    ("uk", &["uk"]),
    ("india", &["india", "hindustan"]),
];

/// Filter criteria as they arrive from the presentation layer. `"all"`
/// disables the category and country predicates; an empty query disables
/// search.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterSpec {
    #[serde(default = "all")]
    pub category: String,
    #[serde(default = "all")]
    pub country: String,
    #[serde(default, rename = "q")]
    pub search_query: String,
}

fn all() -> String {
    "all".to_string()
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            category: all(),
            country: all(),
            search_query: String::new(),
        }
    }
}

/// Apply category, country and search predicates conjunctively, preserving
/// the input order. Returns a new collection; the source is untouched.
pub fn filter_news(news: &[News], spec: &FilterSpec) -> Vec<News> {
    news.iter()
        .filter(|item| matches_category(item, &spec.category))
        .filter(|item| matches_country(item, &spec.country))
        .filter(|item| matches_query(item, &spec.search_query))
        .cloned()
        .collect()
}

fn matches_category(item: &News, category: &str) -> bool {
    category == "all" || item.category.as_str() == category
}

fn matches_country(item: &News, country: &str) -> bool {
    if country == "all" {
        return true;
    }
    let source = item.source.to_lowercase();
    match COUNTRY_KEYWORDS.iter().find(|(c, _)| *c == country) {
        Some((_, keywords)) => keywords.iter().any(|k| source.contains(k)),
        // Unknown country labels filter nothing out.
        None => true,
    }
}

fn matches_query(item: &News, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let haystack = format!("{} {}", item.title, item.description).to_lowercase();
    query
        .to_lowercase()
        .split_whitespace()
        .all(|term| haystack.contains(term))
}

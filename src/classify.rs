// src/classify.rs
//! Keyword-based topic classifier. An ordered table of category → pattern
//! rules; the first pattern that matches the case-folded title+description
//! wins, so the table order is semantically significant (e.g. a text
//! mentioning both "government" and "international" classifies as politics).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ingest::types::Category;

static CATEGORY_PATTERNS: Lazy<Vec<(Category, Regex)>> = Lazy::new(|| {
    // Priority order is fixed; general is the fallthrough, not a rule.
    let table: [(Category, &str); 8] = [
        (
            Category::Technology,
            r"tech|software|ai|robot|cyber|digital|computer|smartphone|internet",
        ),
        (
            Category::Business,
            r"business|economy|market|stock|trade|finance|company",
        ),
        (
            Category::Science,
            r"science|research|study|discovery|space|physics|biology|chemistry",
        ),
        (
            Category::Health,
            r"health|medical|covid|disease|vaccine|doctor|medicine|wellness",
        ),
        (
            Category::Entertainment,
            r"movie|film|music|celebrity|entertainment|hollywood|tv|show",
        ),
        (
            Category::Sports,
            r"sport|football|soccer|basketball|tennis|athlete|game|match|tournament",
        ),
        (
            Category::Politics,
            r"politic|government|election|president|congress|senate|vote|law",
        ),
        (
            Category::World,
            r"world|global|international|country|nation|foreign",
        ),
    ];
    table
        .into_iter()
        .map(|(cat, pat)| {
            let re = Regex::new(pat).expect("valid category pattern");
            (cat, re)
        })
        .collect()
});

/// Classify an item by its title and description. Total: every input maps to
/// exactly one category, `General` when nothing matches.
pub fn classify(title: &str, description: &str) -> Category {
    let haystack = format!("{} {}", title, description).to_lowercase();
    for (category, pattern) in CATEGORY_PATTERNS.iter() {
        if pattern.is_match(&haystack) {
            return *category;
        }
    }
    Category::General
}

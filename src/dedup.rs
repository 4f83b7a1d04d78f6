// src/dedup.rs
//! Per-batch near-duplicate removal over normalized titles.

use metrics::counter;

use crate::ingest::types::News;
use crate::similarity::similarity;

/// Two titles closer than this are considered the same story.
pub const DUPLICATE_THRESHOLD: f32 = 0.8;

/// Lowercase and strip everything that is not ASCII alphanumeric, so that
/// punctuation and spacing differences between outlets don't defeat the
/// comparison.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Remove near-duplicates from one batch, preserving relative order. The
/// earliest-seen item of any duplicate pair always wins. Quadratic in batch
/// size, which is fine for per-source batches of tens of items — this is
/// deliberately not applied to the merged global collection.
pub fn dedup_batch(items: Vec<News>) -> Vec<News> {
    let mut accepted_titles: Vec<String> = Vec::new();
    let mut unique = Vec::with_capacity(items.len());
    let mut removed = 0u64;

    for item in items {
        let normalized = normalize_title(&item.title);
        let is_duplicate = accepted_titles
            .iter()
            .any(|seen| similarity(&normalized, seen) > DUPLICATE_THRESHOLD);

        if is_duplicate {
            removed += 1;
            continue;
        }
        accepted_titles.push(normalized);
        unique.push(item);
    }

    if removed > 0 {
        counter!("aggregate_dedup_total").increment(removed);
    }
    unique
}

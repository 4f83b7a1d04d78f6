// src/heat.rs
//! Trending-score ("heat") heuristic: recency decay plus content-richness
//! bonuses. Not a statistical model — the thresholds are part of the
//! product's observable ranking behavior and must stay exact.

/// Articles older than this decay to a base heat of zero.
pub const MAX_AGE_MS: i64 = 24 * 60 * 60 * 1000;

/// Descriptions longer than this earn the richness bonus.
pub const LONG_DESCRIPTION_CHARS: usize = 200;

const IMAGE_BONUS: f32 = 0.1;
const DESCRIPTION_BONUS: f32 = 0.1;

/// Signals the scorer needs from a feed item.
#[derive(Debug, Clone, Copy)]
pub struct HeatSignals {
    /// Publish time, epoch milliseconds.
    pub pub_date_ms: i64,
    /// Explicit enclosure or thumbnail present.
    pub has_image: bool,
    /// Description length in characters.
    pub description_chars: usize,
}

/// Score in `[0.0, 1.0]`. Base is `max(0, 1 - age/24h)`, `+0.1` for an
/// image, `+0.1` for a description over 200 chars, clamped at 1.
pub fn score(signals: HeatSignals, now_ms: i64) -> f32 {
    let age = now_ms.saturating_sub(signals.pub_date_ms);
    let mut heat = (1.0 - age as f32 / MAX_AGE_MS as f32).max(0.0);

    if signals.has_image {
        heat += IMAGE_BONUS;
    }
    if signals.description_chars > LONG_DESCRIPTION_CHARS {
        heat += DESCRIPTION_BONUS;
    }

    heat.min(1.0)
}

// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod cache;
pub mod classify;
pub mod dedup;
pub mod fallback;
pub mod filter;
pub mod heat;
pub mod ingest;
pub mod similarity;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::filter::{filter_news, FilterSpec};
pub use crate::ingest::types::{Category, Clock, News, RawFeedItem, SystemClock};
pub use crate::ingest::Aggregator;

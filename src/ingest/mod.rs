// src/ingest/mod.rs
pub mod batch;
pub mod config;
pub mod fetch;
pub mod normalize;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use tracing::{error, info, warn};

use crate::cache::NewsCache;
use crate::fallback::fallback_news;
use crate::ingest::batch::fetch_category_batch;
use crate::ingest::config::FeedTable;
use crate::ingest::fetch::{BackoffPolicy, FeedClient, FeedFetcher};
use crate::ingest::types::{Clock, News};

/// One-time metrics registration (so series show up for any exporter the
/// host process installs).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("aggregate_cycles_total", "Full aggregation cycles run.");
        describe_counter!("aggregate_cache_hits_total", "Calls served from the cache slot.");
        describe_counter!("aggregate_kept_total", "News records kept after a cycle.");
        describe_counter!("aggregate_dedup_total", "Records removed as near-duplicates.");
        describe_counter!("aggregate_fetch_errors_total", "Feed fetch/parse failures.");
        describe_counter!("aggregate_rate_limited_total", "Rate-limit (429) responses.");
        describe_counter!(
            "aggregate_fallback_total",
            "Cycles that substituted the fallback dataset."
        );
        describe_gauge!("aggregate_last_cycle_ts", "Unix ms when a cycle last completed.");
    });
}

/// Drives the full aggregation cycle across all configured categories and
/// owns the single-slot result cache. Callers should run at most one cycle
/// at a time; the cache slot itself is last-write-wins.
pub struct Aggregator {
    fetcher: FeedFetcher,
    feeds: FeedTable,
    cache: NewsCache,
    clock: Arc<dyn Clock>,
}

impl Aggregator {
    pub fn new(
        client: Arc<dyn FeedClient>,
        feeds: FeedTable,
        cache: NewsCache,
        backoff: BackoffPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        ensure_metrics_described();
        Self {
            fetcher: FeedFetcher::new(client, backoff, clock.clone()),
            feeds,
            cache,
            clock,
        }
    }

    /// Entry point for the presentation layer. Serves the cached collection
    /// when it is under an hour old; otherwise runs a full cycle. Never
    /// fails — the worst case is the fixed fallback dataset.
    pub async fn fetch_all_news(&self) -> Vec<News> {
        let now = self.clock.now_ms();

        if let Some(cached) = self.cache.read_fresh(now) {
            counter!("aggregate_cache_hits_total").increment(1);
            info!(count = cached.len(), "serving news from cache");
            return cached;
        }

        match self.run_cycle(now).await {
            Ok(news) => news,
            Err(e) => {
                error!(error = %e, "aggregation cycle failed, serving fallback dataset");
                counter!("aggregate_fallback_total").increment(1);
                fallback_news(now)
            }
        }
    }

    /// One full cycle: walk the category table in order, abort to fallback
    /// if any category comes back empty (the endpoint is throttling the
    /// whole session at that point), sort, and persist both cache slots.
    async fn run_cycle(&self, now: i64) -> Result<Vec<News>> {
        counter!("aggregate_cycles_total").increment(1);

        let mut all: Vec<News> = Vec::new();
        let mut rate_limited = false;

        for group in &self.feeds.groups {
            info!(category = %group.category, feeds = group.feeds.len(), "fetching category");
            let batch =
                fetch_category_batch(&self.fetcher, group.category, &group.feeds, now).await;
            if batch.is_empty() {
                rate_limited = true;
                break;
            }
            all.extend(batch);
        }

        if rate_limited || all.is_empty() {
            warn!("empty category batch, substituting fallback dataset for the whole cycle");
            counter!("aggregate_fallback_total").increment(1);
            all = fallback_news(now);
        }

        sort_ranked(&mut all);

        self.cache.write(&all, now)?;
        counter!("aggregate_kept_total").increment(all.len() as u64);
        gauge!("aggregate_last_cycle_ts").set(now as f64);
        info!(count = all.len(), "aggregation cycle complete");

        Ok(all)
    }
}

/// Rank: heat descending, ties broken by publish date descending.
pub fn sort_ranked(news: &mut [News]) {
    news.sort_by(|a, b| {
        b.heat
            .total_cmp(&a.heat)
            .then_with(|| b.pub_date.cmp(&a.pub_date))
    });
}

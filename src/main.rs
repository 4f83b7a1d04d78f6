//! Trendwire — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the aggregation pipeline, cache store,
//! and routes.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trendwire::api::{create_router, AppState};
use trendwire::cache::{CacheStore, FileStore, MemoryStore, NewsCache};
use trendwire::ingest::config::load_feeds_default;
use trendwire::ingest::fetch::{BackoffPolicy, HttpFeedClient};
use trendwire::ingest::types::SystemClock;
use trendwire::Aggregator;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trendwire=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Cache store selection: TRENDWIRE_CACHE_DIR for file-backed slots,
/// in-memory otherwise.
fn build_cache() -> anyhow::Result<NewsCache> {
    let store: Box<dyn CacheStore> = match std::env::var("TRENDWIRE_CACHE_DIR") {
        Ok(dir) => Box::new(FileStore::new(dir)?),
        Err(_) => Box::new(MemoryStore::new()),
    };
    Ok(NewsCache::new(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let feeds = load_feeds_default()?;
    let aggregator = Aggregator::new(
        Arc::new(HttpFeedClient::new()),
        feeds,
        build_cache()?,
        BackoffPolicy::default(),
        Arc::new(SystemClock),
    );

    let state = AppState::new(Arc::new(aggregator));
    let router = create_router(state);

    let addr = std::env::var("TRENDWIRE_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "trendwire listening");
    axum::serve(listener, router).await?;

    Ok(())
}

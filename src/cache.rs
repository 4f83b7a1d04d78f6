// src/cache.rs
//! Single-slot result cache: one named slot for the serialized collection,
//! one for the last-successful-fetch timestamp. Whole-overwrite,
//! last-write-wins; a corrupted payload reads as a miss.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::warn;

use crate::ingest::types::News;

pub const NEWS_SLOT: &str = "trendwire_news";
pub const TIMESTAMP_SLOT: &str = "trendwire_last_fetch";

/// Cached collections older than this are stale (1 hour).
pub const MAX_CACHE_AGE_MS: i64 = 3_600_000;

/// String-keyed slot storage. Implementations only move bytes; staleness and
/// (de)serialization live in [`NewsCache`].
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used by tests and as the default when no cache dir is
/// configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let slots = self.slots.lock().expect("cache mutex poisoned");
        slots.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().expect("cache mutex poisoned");
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON file per slot under a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating cache dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.slot_path(key)).ok()
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key);
        fs::write(&path, value).with_context(|| format!("writing cache slot {}", path.display()))
    }
}

/// Staleness logic over a [`CacheStore`]. Reads happen at cycle start,
/// writes only at cycle end on success, both slots together.
pub struct NewsCache {
    store: Box<dyn CacheStore>,
}

impl NewsCache {
    pub fn new(store: Box<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Return the cached collection if the last successful fetch is within
    /// [`MAX_CACHE_AGE_MS`] of `now_ms`. Malformed slots are treated as a
    /// miss, never an error.
    pub fn read_fresh(&self, now_ms: i64) -> Option<Vec<News>> {
        let ts: i64 = self.store.get(TIMESTAMP_SLOT)?.trim().parse().ok()?;
        if now_ms.saturating_sub(ts) >= MAX_CACHE_AGE_MS {
            return None;
        }
        let payload = self.store.get(NEWS_SLOT)?;
        match serde_json::from_str::<Vec<News>>(&payload) {
            Ok(news) => Some(news),
            Err(e) => {
                warn!(error = %e, "cached news payload malformed, treating as miss");
                None
            }
        }
    }

    /// Overwrite both slots with the new collection and fetch time.
    pub fn write(&self, news: &[News], now_ms: i64) -> Result<()> {
        let payload = serde_json::to_string(news).context("serializing news for cache")?;
        self.store.put(NEWS_SLOT, &payload)?;
        self.store.put(TIMESTAMP_SLOT, &now_ms.to_string())?;
        Ok(())
    }
}

// src/ingest/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed topic taxonomy. `General` is the fallback when no keyword pattern
/// matches; the other eight correspond to the configured feed groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    World,
    Technology,
    Business,
    Science,
    Health,
    Entertainment,
    Sports,
    Politics,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::World => "world",
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Science => "science",
            Category::Health => "health",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Politics => "politics",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "world" => Ok(Category::World),
            "technology" => Ok(Category::Technology),
            "business" => Ok(Category::Business),
            "science" => Ok(Category::Science),
            "health" => Ok(Category::Health),
            "entertainment" => Ok(Category::Entertainment),
            "sports" => Ok(Category::Sports),
            "politics" => Ok(Category::Politics),
            "general" => Ok(Category::General),
            other => Err(anyhow::anyhow!("unknown category: {other}")),
        }
    }
}

/// The canonical record the whole pipeline produces and serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub title: String,
    pub description: String,
    pub content: String,
    pub link: String,
    pub image: Option<String>,
    /// Epoch milliseconds.
    pub pub_date: i64,
    pub source: String,
    pub heat: f32,
    pub category: Category,
}

/// Publish timestamp as the conversion endpoint sends it: a date string or a
/// raw epoch number, depending on the upstream feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Epoch(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Enclosure {
    #[serde(default)]
    pub link: Option<String>,
}

/// One item of the conversion endpoint's `items` array. Shapes vary by feed,
/// so every field is optional or defaulted; unknown fields are ignored.
/// Ephemeral — not retained past normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeedItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub enclosure: Option<Enclosure>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, rename = "pubDate")]
    pub pub_date: Option<RawDate>,
}

impl RawFeedItem {
    /// Whether the item carries an explicit image reference (enclosure or
    /// thumbnail). Inline `<img>` tags in the content do not count for the
    /// heat bonus.
    pub fn has_explicit_image(&self) -> bool {
        self.enclosure
            .as_ref()
            .is_some_and(|e| e.link.as_deref().is_some_and(|l| !l.is_empty()))
            || self.thumbnail.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Injected wall clock so staleness and heat decay are testable without
/// real waiting.
pub trait Clock: Send + Sync {
    /// Current time as epoch milliseconds.
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

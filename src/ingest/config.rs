// src/ingest/config.rs
//! Feed source configuration: an ordered category → feed-URL table. The
//! order is semantically significant (the aggregation cycle walks it in
//! order and aborts on the first empty batch), so groups are a list, not a
//! map. Loaded from an explicit path, the env var, `config/feeds.toml`,
//! `config/feeds.json`, or the built-in defaults, in that order.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::types::Category;

const ENV_PATH: &str = "TRENDWIRE_FEEDS_PATH";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedGroup {
    pub category: Category,
    pub feeds: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedTable {
    pub groups: Vec<FeedGroup>,
}

impl FeedTable {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Load the table from an explicit path. TOML or JSON, decided by extension
/// hint with the other format as fallback.
pub fn load_feeds_from(path: &Path) -> Result<FeedTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed table from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
}

/// Load using env var + fallbacks:
/// 1) $TRENDWIRE_FEEDS_PATH
/// 2) config/feeds.toml
/// 3) config/feeds.json
/// 4) built-in default table
pub fn load_feeds_default() -> Result<FeedTable> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_feeds_from(&pb);
        } else {
            return Err(anyhow!("TRENDWIRE_FEEDS_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feeds.toml");
    if toml_p.exists() {
        return load_feeds_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feeds.json");
    if json_p.exists() {
        return load_feeds_from(&json_p);
    }
    Ok(default_table())
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<FeedTable> {
    let try_toml = hint_ext == "toml" || s.contains("[[groups]]");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return validate(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return validate(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return validate(v);
        }
    }
    Err(anyhow!("unsupported feed table format"))
}

fn parse_toml(s: &str) -> Result<FeedTable> {
    Ok(toml::from_str(s)?)
}

fn parse_json(s: &str) -> Result<FeedTable> {
    let groups: Vec<FeedGroup> = serde_json::from_str(s)?;
    Ok(FeedTable { groups })
}

fn validate(table: FeedTable) -> Result<FeedTable> {
    if table.is_empty() {
        return Err(anyhow!("feed table has no groups"));
    }
    for g in &table.groups {
        if g.feeds.iter().any(|f| f.trim().is_empty()) {
            return Err(anyhow!("empty feed url in group {}", g.category));
        }
    }
    Ok(table)
}

/// The built-in eight-category table.
pub fn default_table() -> FeedTable {
    fn group(category: Category, feeds: &[&str]) -> FeedGroup {
        FeedGroup {
            category,
            feeds: feeds.iter().map(|s| s.to_string()).collect(),
        }
    }

    FeedTable {
        groups: vec![
            group(
                Category::World,
                &[
                    "https://rss.nytimes.com/services/xml/rss/nyt/World.xml",
                    "https://feeds.bbci.co.uk/news/world/rss.xml",
                    "https://www.reuters.com/rssfeed/world",
                    "https://feeds.aljazeera.net/articles/news",
                    "https://timesofindia.indiatimes.com/rssfeeds/296589292.cms",
                    "https://www.hindustantimes.com/feeds/rss/world-news/rssfeed.xml",
                ],
            ),
            group(
                Category::Technology,
                &[
                    "https://rss.nytimes.com/services/xml/rss/nyt/Technology.xml",
                    "https://feeds.bbci.co.uk/news/technology/rss.xml",
                    "https://www.wired.com/feed/rss",
                    "https://timesofindia.indiatimes.com/rssfeeds/66949542.cms",
                    "https://www.hindustantimes.com/feeds/rss/tech/rssfeed.xml",
                ],
            ),
            group(
                Category::Business,
                &[
                    "https://rss.nytimes.com/services/xml/rss/nyt/Business.xml",
                    "https://feeds.bbci.co.uk/news/business/rss.xml",
                    "https://www.forbes.com/business/feed/",
                    "https://timesofindia.indiatimes.com/rssfeeds/1898055.cms",
                    "https://www.hindustantimes.com/feeds/rss/business/rssfeed.xml",
                ],
            ),
            group(
                Category::Science,
                &[
                    "https://rss.nytimes.com/services/xml/rss/nyt/Science.xml",
                    "https://feeds.bbci.co.uk/news/science_and_environment/rss.xml",
                    "https://www.sciencenews.org/feed/",
                ],
            ),
            group(
                Category::Health,
                &[
                    "https://rss.nytimes.com/services/xml/rss/nyt/Health.xml",
                    "https://feeds.bbci.co.uk/news/health/rss.xml",
                    "https://www.webmd.com/rss",
                ],
            ),
            group(
                Category::Entertainment,
                &[
                    "https://rss.nytimes.com/services/xml/rss/nyt/Movies.xml",
                    "https://feeds.bbci.co.uk/news/entertainment_and_arts/rss.xml",
                    "https://www.ew.com/feed/",
                ],
            ),
            group(
                Category::Sports,
                &[
                    "https://rss.nytimes.com/services/xml/rss/nyt/Sports.xml",
                    "https://feeds.bbci.co.uk/news/sport/rss.xml",
                    "https://www.espn.com/espn/rss/news",
                ],
            ),
            group(
                Category::Politics,
                &[
                    "https://rss.nytimes.com/services/xml/rss/nyt/Politics.xml",
                    "https://feeds.bbci.co.uk/news/politics/rss.xml",
                    "https://www.politico.com/rss/politics.xml",
                ],
            ),
        ],
    }
}

// tests/api_http.rs
//
// HTTP-level tests for the public Router without opening sockets, via
// tower::ServiceExt::oneshot.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    Router,
};
use http::{Request, StatusCode};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use trendwire::api::{create_router, AppState};
use trendwire::cache::{MemoryStore, NewsCache};
use trendwire::ingest::config::{FeedGroup, FeedTable};
use trendwire::ingest::fetch::{BackoffPolicy, FeedClient, FetchError};
use trendwire::ingest::types::{Category, Clock, RawDate, RawFeedItem};
use trendwire::Aggregator;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests
const NOW: i64 = 1_700_000_000_000;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

struct MockFeedClient {
    feeds: HashMap<String, Vec<RawFeedItem>>,
}

#[async_trait]
impl FeedClient for MockFeedClient {
    async fn get_feed(&self, feed_url: &str) -> Result<Vec<RawFeedItem>, FetchError> {
        Ok(self.feeds.get(feed_url).cloned().unwrap_or_default())
    }
}

fn item(title: &str, description: &str, age_minutes: i64) -> RawFeedItem {
    RawFeedItem {
        title: title.into(),
        description: description.into(),
        link: "https://www.example.com/story".into(),
        pub_date: Some(RawDate::Epoch(NOW - age_minutes * 60_000)),
        ..Default::default()
    }
}

fn test_router() -> Router {
    let feeds = HashMap::from([
        (
            "https://tech.test/rss".to_string(),
            vec![
                item("AI chips reach new milestone", "silicon advances", 10),
                item("Browser update ships", "rendering changes", 20),
            ],
        ),
        (
            "https://world.test/rss".to_string(),
            vec![item(
                "Climate summit opens in plenary",
                "leaders discuss climate policy at the summit",
                15,
            )],
        ),
    ]);
    let table = FeedTable {
        groups: vec![
            FeedGroup {
                category: Category::Technology,
                feeds: vec!["https://tech.test/rss".into()],
            },
            FeedGroup {
                category: Category::World,
                feeds: vec!["https://world.test/rss".into()],
            },
        ],
    };

    let agg = Aggregator::new(
        Arc::new(MockFeedClient { feeds }),
        table,
        NewsCache::new(Box::new(MemoryStore::new())),
        BackoffPolicy::ZERO,
        Arc::new(FixedClock(NOW)),
    );
    create_router(AppState::new(Arc::new(agg)))
}

async fn get_json(app: Router, uri: &str) -> Json {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    let resp = app.oneshot(req).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK, "GET {uri} should be 200");
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn health_returns_200_and_ok_body() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");
    let resp = test_router().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    assert_eq!(String::from_utf8(bytes).expect("utf8").trim(), "ok");
}

#[tokio::test]
async fn news_returns_ranked_collection() {
    let v = get_json(test_router(), "/news").await;
    let arr = v.as_array().expect("array body");
    assert_eq!(arr.len(), 3);
    for n in arr {
        assert!(n.get("title").is_some(), "missing 'title'");
        assert!(n.get("heat").is_some(), "missing 'heat'");
        assert!(n.get("category").is_some(), "missing 'category'");
        assert!(n.get("pub_date").is_some(), "missing 'pub_date'");
    }
}

#[tokio::test]
async fn news_paginates() {
    let v = get_json(test_router(), "/news?page=2&page_size=2").await;
    assert_eq!(v.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn absurd_page_number_returns_empty_not_error() {
    let v = get_json(
        test_router(),
        &format!("/news?page={}&page_size=100", usize::MAX),
    )
    .await;
    assert!(v.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn filter_by_category_returns_only_that_category() {
    let v = get_json(test_router(), "/news/filter?category=technology").await;
    let arr = v.as_array().expect("array body");
    assert_eq!(arr.len(), 2);
    assert!(arr.iter().all(|n| n["category"] == "technology"));
}

#[tokio::test]
async fn filter_by_search_terms_requires_all_terms() {
    let v = get_json(test_router(), "/news/filter?q=climate+summit").await;
    let arr = v.as_array().expect("array body");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["title"], "Climate summit opens in plenary");
}

#[tokio::test]
async fn filter_defaults_pass_everything() {
    let v = get_json(test_router(), "/news/filter").await;
    assert_eq!(v.as_array().expect("array").len(), 3);
}

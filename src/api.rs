// src/api.rs
//! HTTP surface for the presentation layer: ranked news, filtered news,
//! health. Pagination happens here, not in the pipeline — the cache always
//! holds the full ranked collection.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::filter::{filter_news, FilterSpec};
use crate::ingest::types::News;
use crate::ingest::Aggregator;

#[derive(Clone)]
pub struct AppState {
    aggregator: Arc<Aggregator>,
}

impl AppState {
    pub fn new(aggregator: Arc<Aggregator>) -> Self {
        Self { aggregator }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/news", get(list_news))
        .route("/news/filter", get(list_filtered))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Deserialize)]
struct PageParams {
    #[serde(default = "first_page")]
    page: usize,
    #[serde(default = "default_page_size")]
    page_size: usize,
}

fn first_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn paginate(news: Vec<News>, params: PageParams) -> Vec<News> {
    let page = params.page.max(1);
    let page_size = params.page_size.clamp(1, MAX_PAGE_SIZE);
    // Page numbers come straight from the query string; saturate instead of
    // trusting the arithmetic not to overflow.
    let skip = page.saturating_sub(1).saturating_mul(page_size);
    news.into_iter().skip(skip).take(page_size).collect()
}

async fn list_news(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Json<Vec<News>> {
    let news = state.aggregator.fetch_all_news().await;
    Json(paginate(news, params))
}

async fn list_filtered(
    State(state): State<AppState>,
    Query(spec): Query<FilterSpec>,
    Query(params): Query<PageParams>,
) -> Json<Vec<News>> {
    let news = state.aggregator.fetch_all_news().await;
    let filtered = filter_news(&news, &spec);
    Json(paginate(filtered, params))
}

//! HTTP query surface
//!
//! A small read-mostly JSON API over the current snapshot:
//!
//! - `GET /api/news?category=<label>` - current articles, optionally
//!   filtered by taxonomy label (`All` or no filter returns everything)
//! - `GET /api/categories` - distinct category labels actually present
//! - `POST /api/refresh-news` - synchronous aggregation run, then the
//!   resulting state
//!
//! Responses are always `success: true` with best-effort data; ingestion
//! failures never surface here. A refresh during total source failure
//! simply reports the previous snapshot.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::aggregator::Aggregator;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::models::{Article, Category};
use crate::store::SnapshotStore;

/// Shared state for the query service
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    pub aggregator: Arc<Aggregator>,
}

impl AppState {
    pub fn new(store: Arc<SnapshotStore>, aggregator: Arc<Aggregator>) -> Self {
        Self { store, aggregator }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    success: bool,
    count: usize,
    #[serde(rename = "lastUpdated")]
    last_updated: Option<String>,
    #[serde(rename = "isMock")]
    is_fallback: bool,
    data: Vec<Article>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    success: bool,
    data: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    success: bool,
    message: String,
    count: usize,
    #[serde(rename = "isMock")]
    is_fallback: bool,
}

/// List current articles, optionally filtered by category
pub async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Json<NewsResponse> {
    let snapshot = state.store.get().await;

    let data: Vec<Article> = match query.category.as_deref() {
        None | Some("All") => snapshot.articles,
        Some(label) => snapshot
            .articles
            .into_iter()
            .filter(|article| article.category.as_str() == label)
            .collect(),
    };

    Json(NewsResponse {
        success: true,
        count: data.len(),
        last_updated: snapshot.last_updated,
        is_fallback: snapshot.is_fallback,
        data,
    })
}

/// Distinct categories present in the current snapshot
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<CategoriesResponse> {
    let snapshot = state.store.get().await;

    Json(CategoriesResponse {
        success: true,
        data: snapshot.categories(),
    })
}

/// Trigger a synchronous aggregation run and report the resulting state
///
/// A failed run is not an error at this layer; the previous snapshot's
/// state is reported instead.
pub async fn refresh_news(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    if let Err(err) = state.aggregator.run().await {
        info!(error = %err, "Manual refresh did not update the snapshot");
    }

    let snapshot = state.store.get().await;
    let message = if snapshot.is_fallback {
        "Using fallback data".to_string()
    } else {
        "Real news loaded".to_string()
    };

    Json(RefreshResponse {
        success: true,
        message,
        count: snapshot.articles.len(),
        is_fallback: snapshot.is_fallback,
    })
}

/// Build the router with all routes and layers
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/news", get(list_news))
        .route("/api/categories", get(list_categories))
        .route("/api/refresh-news", post(refresh_news))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind and serve until ctrl-c
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let router = create_router(state);
    let addr = format!("{}:{}", config.host, config.port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Query service listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Query service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

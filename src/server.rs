//! HTTP server adapter: the `/feed` route plus static file fallback.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::feed::{generate_feed, FeedClient, FeedError, FeedRequest};
use crate::function::RSS_CONTENT_TYPE;

/// Shared per-request context: configuration plus the upstream client.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: FeedClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            client: FeedClient::new(),
        }
    }

    /// State with a custom upstream client (tests point this at a mock).
    pub fn with_client(config: Config, client: FeedClient) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    channel_id: Option<String>,
    max: Option<String>,
}

/// Builds the application router.
///
/// `GET /feed` serves the MRSS document; everything else falls back to static
/// files from the configured directory.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/feed", get(feed_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /feed?channel_id=<id>&max=<n>`
///
/// - 400 plain text when `channel_id` is missing or blank
/// - 200 `application/rss+xml` with the MRSS document on success
/// - 500 plain text `Error: <message>` on any generation failure, including
///   channel-not-found (deliberately not 404, see DESIGN.md)
async fn feed_handler(State(state): State<AppState>, Query(query): Query<FeedQuery>) -> Response {
    let channel_id = query.channel_id.as_deref().map_or("", str::trim);
    if channel_id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Missing channel_id. Use ?channel_id=UCxxxx",
        )
            .into_response();
    }

    // The key gates the route but is never sent upstream (see DESIGN.md).
    let Some(api_key) = state.config.api_key.as_deref() else {
        let err = FeedError::NotConfigured;
        tracing::error!(error = %err, "Refusing request");
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {err}")).into_response();
    };

    let request = FeedRequest {
        channel_id,
        max: query.max.as_deref(),
        api_key: Some(api_key),
    };

    match generate_feed(&state.client, &request).await {
        Ok(xml) => ([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], xml).into_response(),
        Err(e) => {
            tracing::error!(channel_id, error = %e, "Feed generation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {e}")).into_response()
        }
    }
}

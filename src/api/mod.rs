//! HTTP API handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::browse::{RootKind, TreeBuilder};
use crate::error::BrowseError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub tree: Arc<TreeBuilder>,
    pub started: Instant,
}

impl AppState {
    pub fn new(tree: TreeBuilder) -> Self {
        Self {
            tree: Arc::new(tree),
            started: Instant::now(),
        }
    }
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// General status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub git_sha: &'static str,
    pub uptime_secs: u64,
    pub roots: Vec<RootKind>,
}

/// GET /status - Service health check
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "ais-media-browser",
        version: env!("AMB_VERSION"),
        git_sha: env!("AMB_GIT_SHA"),
        uptime_secs: state.started.elapsed().as_secs(),
        roots: state.tree.roots(),
    })
}

/// Browse query; both fields optional, empty counts as absent
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub media_content_type: Option<String>,
    pub media_content_id: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn error_status(err: &BrowseError) -> StatusCode {
    match err {
        BrowseError::NotFound { .. } => StatusCode::NOT_FOUND,
        BrowseError::UpstreamFetch { .. } | BrowseError::MissingMediaInformation { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}

/// GET /browse - One level of the media tree
pub async fn browse_handler(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> impl IntoResponse {
    let content_type = non_empty(&query.media_content_type);
    let node_id = non_empty(&query.media_content_id);

    match state.tree.browse(content_type, node_id).await {
        Ok(node) => (StatusCode::OK, Json(node)).into_response(),
        Err(e) => (
            error_status(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

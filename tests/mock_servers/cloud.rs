//! Mock AIS cloud
//!
//! Serves `audio_type` / `audio_name` under /dom/ and podcast RSS feeds
//! under /feeds/{name}.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

#[derive(Default)]
struct MockCloudState {
    /// nature -> categories
    types: HashMap<String, Vec<String>>,
    /// (nature, category) -> items
    names: HashMap<(String, String), Vec<Value>>,
    /// feed name -> RSS body
    feeds: HashMap<String, String>,
    /// Categories whose listing answers HTTP 500
    failing: Vec<String>,
    delay: Option<Duration>,
    last_authorization: Option<String>,
}

/// Mock AIS cloud server
pub struct MockCloudServer {
    addr: SocketAddr,
    state: Arc<RwLock<MockCloudState>>,
    requests: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

#[derive(Clone)]
struct AppState {
    inner: Arc<RwLock<MockCloudState>>,
    requests: Arc<AtomicUsize>,
}

impl MockCloudServer {
    /// Start a mock cloud on a random port
    pub async fn start() -> Self {
        let state = Arc::new(RwLock::new(MockCloudState::default()));
        let requests = Arc::new(AtomicUsize::new(0));

        let app = Router::new()
            .route("/dom/audio_type", get(handle_audio_type))
            .route("/dom/audio_name", get(handle_audio_name))
            .route("/feeds/{name}", get(handle_feed))
            .with_state(AppState {
                inner: state.clone(),
                requests: requests.clone(),
            });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            requests,
            handle,
        }
    }

    /// Get the server address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL to configure the cloud gateway with
    pub fn base_url(&self) -> String {
        format!("http://{}/dom/", self.addr)
    }

    pub fn feed_url(&self, name: &str) -> String {
        format!("http://{}/feeds/{}", self.addr, name)
    }

    /// Total requests served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub async fn set_types(&self, nature: &str, types: &[&str]) {
        let mut state = self.state.write().await;
        state.types.insert(
            nature.to_string(),
            types.iter().map(|t| t.to_string()).collect(),
        );
    }

    /// Add a radio station to a category
    pub async fn add_station(&self, category: &str, name: &str, stream_url: &str) {
        let mut state = self.state.write().await;
        state
            .names
            .entry(("Radio".to_string(), category.to_string()))
            .or_default()
            .push(json!({
                "NAME": name,
                "IMAGE_URL": format!("http://img/{}.png", name),
                "STREAM_URL": stream_url,
            }));
    }

    /// Add a podcast show pointing at `feed_url`
    pub async fn add_show(&self, category: &str, name: &str, feed_url: &str) {
        let mut state = self.state.write().await;
        state
            .names
            .entry(("Podcast".to_string(), category.to_string()))
            .or_default()
            .push(json!({
                "NAME": name,
                "IMAGE_URL": format!("http://img/{}.png", name),
                "LOOKUP_URL": feed_url,
            }));
    }

    pub async fn set_feed(&self, name: &str, body: &str) {
        let mut state = self.state.write().await;
        state.feeds.insert(name.to_string(), body.to_string());
    }

    /// Make listings of `category` answer HTTP 500
    pub async fn fail_category(&self, category: &str) {
        let mut state = self.state.write().await;
        state.failing.push(category.to_string());
    }

    /// Delay every response
    pub async fn set_delay(&self, delay: Duration) {
        let mut state = self.state.write().await;
        state.delay = Some(delay);
    }

    /// Authorization header of the most recent request
    pub async fn last_authorization(&self) -> Option<String> {
        self.state.read().await.last_authorization.clone()
    }

    /// Stop the server
    pub async fn stop(self) {
        self.handle.abort();
    }
}

#[derive(Deserialize)]
struct CloudQuery {
    nature: String,
    #[serde(rename = "type")]
    category: Option<String>,
}

async fn observe(state: &AppState, headers: &HeaderMap) {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let delay = {
        let mut inner = state.inner.write().await;
        inner.last_authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        inner.delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

async fn handle_audio_type(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CloudQuery>,
) -> impl IntoResponse {
    observe(&state, &headers).await;
    let inner = state.inner.read().await;
    let types = inner.types.get(&query.nature).cloned().unwrap_or_default();
    Json(json!({ "data": types }))
}

async fn handle_audio_name(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CloudQuery>,
) -> impl IntoResponse {
    observe(&state, &headers).await;
    let inner = state.inner.read().await;
    let category = query.category.unwrap_or_default();

    if inner.failing.contains(&category) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }

    let items = inner
        .names
        .get(&(query.nature, category))
        .cloned()
        .unwrap_or_default();
    Json(json!({ "data": items })).into_response()
}

async fn handle_feed(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> impl IntoResponse {
    observe(&state, &headers).await;
    let inner = state.inner.read().await;
    match inner.feeds.get(&name) {
        Some(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/rss+xml")],
            body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

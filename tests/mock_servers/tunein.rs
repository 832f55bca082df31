//! Mock TuneIn OPML directory
//!
//! Documents are stored as templates; `{base}` is replaced with the server's
//! own URL when served, so links can point back at the mock.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

#[derive(Clone)]
struct AppState {
    docs: Arc<RwLock<HashMap<String, String>>>,
    base: String,
}

/// Mock TuneIn server
pub struct MockTuneInServer {
    addr: SocketAddr,
    docs: Arc<RwLock<HashMap<String, String>>>,
    handle: JoinHandle<()>,
}

impl MockTuneInServer {
    /// Start a mock directory on a random port
    pub async fn start() -> Self {
        let docs = Arc::new(RwLock::new(HashMap::new()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/opml/{name}", get(handle_doc))
            .with_state(AppState {
                docs: docs.clone(),
                base: format!("http://{}", addr),
            });

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, docs, handle }
    }

    /// Get the server address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn doc_url(&self, name: &str) -> String {
        format!("http://{}/opml/{}", self.addr, name)
    }

    /// Serve `template` at /opml/{name}
    pub async fn set_doc(&self, name: &str, template: &str) {
        self.docs
            .write()
            .await
            .insert(name.to_string(), template.to_string());
    }

    /// Stop the server
    pub async fn stop(self) {
        self.handle.abort();
    }
}

async fn handle_doc(State(state): State<AppState>, Path(name): Path<String>) -> impl IntoResponse {
    let docs = state.docs.read().await;
    match docs.get(&name) {
        Some(template) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/x-opml; charset=utf-8")],
            template.replace("{base}", &state.base),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

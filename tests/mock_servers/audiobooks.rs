//! Mock audiobook library
//!
//! Simulates the flat list at /api/audiobooks/ and per-book detail at
//! /api/books/{slug}/.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Mock book record
#[derive(Debug, Clone)]
pub struct MockBook {
    pub slug: String,
    pub title: String,
    pub author: String,
    /// (name, url, type)
    pub media: Vec<(String, String, String)>,
}

impl MockBook {
    pub fn new(slug: &str, title: &str, author: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            media: Vec::new(),
        }
    }

    pub fn with_media(mut self, name: &str, url: &str, kind: &str) -> Self {
        self.media
            .push((name.to_string(), url.to_string(), kind.to_string()));
        self
    }
}

#[derive(Default)]
struct MockLibraryState {
    books: Vec<MockBook>,
}

#[derive(Clone)]
struct AppState {
    inner: Arc<RwLock<MockLibraryState>>,
    addr: SocketAddr,
    list_requests: Arc<AtomicUsize>,
}

/// Mock audiobook library server
pub struct MockAudioBooksServer {
    addr: SocketAddr,
    state: Arc<RwLock<MockLibraryState>>,
    list_requests: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl MockAudioBooksServer {
    /// Start a mock library on a random port
    pub async fn start() -> Self {
        let state = Arc::new(RwLock::new(MockLibraryState::default()));
        let list_requests = Arc::new(AtomicUsize::new(0));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/api/audiobooks/", get(handle_list))
            .route("/api/books/{slug}/", get(handle_book))
            .with_state(AppState {
                inner: state.clone(),
                addr,
                list_requests: list_requests.clone(),
            });

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            list_requests,
            handle,
        }
    }

    /// Get the server address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    pub fn book_url(&self, slug: &str) -> String {
        book_url(self.addr, slug)
    }

    /// Number of times the flat list was fetched
    pub fn list_requests(&self) -> usize {
        self.list_requests.load(Ordering::SeqCst)
    }

    pub async fn add_book(&self, book: MockBook) {
        let mut state = self.state.write().await;
        state.books.push(book);
    }

    /// Stop the server
    pub async fn stop(self) {
        self.handle.abort();
    }
}

fn book_url(addr: SocketAddr, slug: &str) -> String {
    format!("http://{}/api/books/{}/", addr, slug)
}

fn cover(slug: &str) -> String {
    format!("http://img/{}.jpg", slug)
}

async fn handle_list(State(state): State<AppState>) -> Json<Value> {
    state.list_requests.fetch_add(1, Ordering::SeqCst);
    let inner = state.inner.read().await;
    let books: Vec<Value> = inner
        .books
        .iter()
        .map(|book| {
            json!({
                "kind": "Liryka",
                "title": book.title,
                "author": book.author,
                "href": book_url(state.addr, &book.slug),
                "cover_thumb": cover(&book.slug),
            })
        })
        .collect();
    Json(Value::Array(books))
}

async fn handle_book(State(state): State<AppState>, Path(slug): Path<String>) -> impl IntoResponse {
    let inner = state.inner.read().await;
    let Some(book) = inner.books.iter().find(|b| b.slug == slug) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let media: Vec<Value> = book
        .media
        .iter()
        .map(|(name, url, kind)| json!({ "name": name, "url": url, "type": kind }))
        .collect();
    Json(json!({
        "title": book.title,
        "cover_thumb": cover(&book.slug),
        "media": media,
    }))
    .into_response()
}

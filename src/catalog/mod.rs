//! Catalog gateways: the per-vendor data sources browse roots read from
//!
//! Gateways hand back already-normalized [`CatalogEntry`] lists whatever the
//! wire format was (cloud JSON, RSS, OPML), so resolvers never branch on it.

pub mod apps;
pub mod audiobooks;
pub mod cloud;
pub mod http;
pub mod tunein;

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::error::FetchError;

pub use apps::{AppCatalog, AppCategory, InstalledApp, Product, ProductImage};
pub use audiobooks::AudioBooksGateway;
pub use cloud::{AisCloudGateway, AudioNature};
pub use http::HttpFetcher;
pub use tunein::TuneInGateway;

/// One record of a vendor listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogEntry {
    /// Display name
    pub label: String,
    /// Vendor token used to fetch or play this entry (category name, feed or stream URL)
    pub token: String,
    pub thumbnail: Option<String>,
    /// Vendor-specific fields (author, media type, outline type, ...)
    pub extra: BTreeMap<String, String>,
}

impl CatalogEntry {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
            ..Default::default()
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = thumbnail.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<String>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

/// Data source behind one browse root
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Top-level buckets of the root (categories, or the whole flat list)
    async fn list_top_level(&self, root_token: &str) -> Result<Vec<CatalogEntry>, FetchError>;

    /// Entries below one parent token
    async fn list_children(&self, parent_token: &str) -> Result<Vec<CatalogEntry>, FetchError>;

    /// Fetch and parse a raw document (RSS feed) into terminal entries
    async fn fetch_terminal_feed(&self, _token: &str) -> Result<Vec<CatalogEntry>, FetchError> {
        Err(FetchError::Unsupported("terminal feeds"))
    }
}

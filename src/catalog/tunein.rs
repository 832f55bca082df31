//! TuneIn OPML directory

use async_trait::async_trait;

use crate::catalog::http::{absolute_url, HttpFetcher};
use crate::catalog::{CatalogEntry, CatalogGateway};
use crate::error::FetchError;
use crate::parse::WireFormat;

pub const DEFAULT_TUNEIN_URL: &str = "http://opml.radiotime.com/";

#[derive(Clone)]
pub struct TuneInGateway {
    fetcher: HttpFetcher,
    root_url: String,
}

impl TuneInGateway {
    pub fn new(fetcher: HttpFetcher, root_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            root_url: root_url.into(),
        }
    }

    async fn outlines(&self, url: &str) -> Result<Vec<CatalogEntry>, FetchError> {
        let url = absolute_url(url)?;
        self.fetcher.fetch_entries(&url, WireFormat::Opml).await
    }
}

#[async_trait]
impl CatalogGateway for TuneInGateway {
    /// Root OPML document; an empty token means the configured root URL
    async fn list_top_level(&self, root_token: &str) -> Result<Vec<CatalogEntry>, FetchError> {
        let url = if root_token.is_empty() {
            self.root_url.as_str()
        } else {
            root_token
        };
        self.outlines(url).await
    }

    /// Outlines of a linked OPML document
    async fn list_children(&self, link_url: &str) -> Result<Vec<CatalogEntry>, FetchError> {
        self.outlines(link_url).await
    }
}

//! Public-domain audiobook library (wolnelektury-style JSON API)

use async_trait::async_trait;

use crate::catalog::http::{absolute_url, endpoint, HttpFetcher};
use crate::catalog::{CatalogEntry, CatalogGateway};
use crate::error::FetchError;
use crate::parse::WireFormat;

pub const DEFAULT_AUDIOBOOKS_URL: &str = "https://wolnelektury.pl/api/";

#[derive(Clone)]
pub struct AudioBooksGateway {
    fetcher: HttpFetcher,
    base_url: String,
}

impl AudioBooksGateway {
    pub fn new(fetcher: HttpFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    async fn all_books(&self) -> Result<Vec<CatalogEntry>, FetchError> {
        let url = endpoint(&self.base_url, "audiobooks/", &[("format", "json")])?;
        self.fetcher.fetch_entries(&url, WireFormat::BookList).await
    }
}

#[async_trait]
impl CatalogGateway for AudioBooksGateway {
    /// The whole flat book list; authors are derived by the caller
    async fn list_top_level(&self, _root_token: &str) -> Result<Vec<CatalogEntry>, FetchError> {
        self.all_books().await
    }

    /// Books by one author. The library has no per-author listing, so the
    /// flat list is fetched again and filtered.
    async fn list_children(&self, author: &str) -> Result<Vec<CatalogEntry>, FetchError> {
        let books = self.all_books().await?;
        Ok(books
            .into_iter()
            .filter(|book| book.extra("author") == Some(author))
            .collect())
    }

    /// Media attachments of one book, every type included
    async fn fetch_terminal_feed(&self, book_url: &str) -> Result<Vec<CatalogEntry>, FetchError> {
        let url = absolute_url(book_url)?;
        self.fetcher.fetch_entries(&url, WireFormat::BookMedia).await
    }
}

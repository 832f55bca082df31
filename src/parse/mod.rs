//! Wire-format adapters
//!
//! Every catalog payload, JSON or XML, is normalized to `Vec<CatalogEntry>`
//! here. Gateways pick the format; nothing above them sees raw documents.

pub mod json;
pub mod opml;
pub mod rss;

use crate::catalog::CatalogEntry;
use crate::error::FetchError;

/// Payload formats spoken by the supported catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// AIS cloud `audio_type`: `{"data": ["Jazz", ...]}`
    CloudTypes,
    /// AIS cloud `audio_name`: `{"data": [{"NAME", "IMAGE_URL", "STREAM_URL" | "LOOKUP_URL"}]}`
    CloudNames,
    /// Audiobook library flat list: `[{"title", "author", "href", "cover_thumb"}]`
    BookList,
    /// Audiobook detail: `{"media": [{"name", "url", "type"}]}`
    BookMedia,
    /// Podcast RSS 2.0 feed
    Rss,
    /// TuneIn OPML directory
    Opml,
}

impl WireFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::CloudTypes => "cloud types",
            Self::CloudNames => "cloud names",
            Self::BookList => "book list",
            Self::BookMedia => "book media",
            Self::Rss => "RSS",
            Self::Opml => "OPML",
        }
    }

    pub fn parse(self, body: &[u8]) -> Result<Vec<CatalogEntry>, FetchError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::Empty {
                format: self.name(),
            });
        }

        match self {
            Self::CloudTypes => json::parse_cloud_types(body),
            Self::CloudNames => json::parse_cloud_names(body),
            Self::BookList => json::parse_book_list(body),
            Self::BookMedia => json::parse_book_media(body),
            Self::Rss => rss::parse_feed(body),
            Self::Opml => opml::parse_outlines(body),
        }
    }
}

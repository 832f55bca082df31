//! AIS cloud audio directory (radio stations and podcasts)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::http::{absolute_url, endpoint, HttpFetcher};
use crate::catalog::{CatalogEntry, CatalogGateway};
use crate::error::FetchError;
use crate::parse::WireFormat;

pub const DEFAULT_CLOUD_URL: &str = "https://powiedz.co/ords/dom/dom/";

/// Which half of the cloud directory a gateway reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioNature {
    Radio,
    Podcast,
}

impl AudioNature {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Radio => "Radio",
            Self::Podcast => "Podcast",
        }
    }
}

/// `audio_type` lists categories, `audio_name` lists the items of one.
/// Podcast items point at RSS feeds, fetched through `fetch_terminal_feed`.
#[derive(Clone)]
pub struct AisCloudGateway {
    fetcher: HttpFetcher,
    base_url: String,
    nature: AudioNature,
}

impl AisCloudGateway {
    pub fn new(fetcher: HttpFetcher, base_url: impl Into<String>, nature: AudioNature) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            nature,
        }
    }

    pub fn nature(&self) -> AudioNature {
        self.nature
    }
}

#[async_trait]
impl CatalogGateway for AisCloudGateway {
    /// `root_token` is unused; the nature picks the listing
    async fn list_top_level(&self, _root_token: &str) -> Result<Vec<CatalogEntry>, FetchError> {
        let url = endpoint(
            &self.base_url,
            "audio_type",
            &[("nature", self.nature.as_str())],
        )?;
        self.fetcher.fetch_entries(&url, WireFormat::CloudTypes).await
    }

    async fn list_children(&self, category: &str) -> Result<Vec<CatalogEntry>, FetchError> {
        let url = endpoint(
            &self.base_url,
            "audio_name",
            &[("nature", self.nature.as_str()), ("type", category)],
        )?;
        self.fetcher.fetch_entries(&url, WireFormat::CloudNames).await
    }

    async fn fetch_terminal_feed(&self, feed_url: &str) -> Result<Vec<CatalogEntry>, FetchError> {
        if self.nature != AudioNature::Podcast {
            return Err(FetchError::Unsupported("radio feeds"));
        }
        let url = absolute_url(feed_url)?;
        self.fetcher.fetch_entries(&url, WireFormat::Rss).await
    }
}

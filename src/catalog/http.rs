//! Shared HTTP GET for catalog gateways

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::catalog::CatalogEntry;
use crate::error::FetchError;
use crate::parse::WireFormat;

/// Default bound on a single catalog fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// GET with a bounded timeout, status check and optional auth header
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    authorization: Option<String>,
}

impl HttpFetcher {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            authorization: None,
        }
    }

    /// Send `token` verbatim as the Authorization header
    pub fn with_authorization(mut self, token: Option<String>) -> Self {
        self.authorization = token.filter(|t| !t.is_empty());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, timeout_ms = self.timeout.as_millis() as u64, "Catalog fetch");

        let mut request = self.client.get(url);
        if let Some(token) = &self.authorization {
            request = request.header(AUTHORIZATION, token);
        }

        let fetch = async {
            let response = request.send().await.map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = response.bytes().await.map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
            Ok(body.to_vec())
        };

        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }),
        }
    }

    /// Fetch `url` and normalize it through `format`'s parser
    pub async fn fetch_entries(
        &self,
        url: &str,
        format: WireFormat,
    ) -> Result<Vec<CatalogEntry>, FetchError> {
        let body = self.get_bytes(url).await?;
        let entries = format.parse(&body)?;
        debug!(url, format = format.name(), count = entries.len(), "Catalog entries parsed");
        Ok(entries)
    }
}

/// Build `{base}/{path}?{query}`; `base` is treated as a directory
pub fn endpoint(base: &str, path: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: base.to_string(),
        reason,
    };

    let mut base = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }

    let mut url = base.join(path).map_err(|e| invalid(e.to_string()))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.iter().copied());
    }
    Ok(url.into())
}

/// Parse a token that must be an absolute URL (feed, book, OPML link)
pub fn absolute_url(token: &str) -> Result<String, FetchError> {
    Url::parse(token)
        .map(String::from)
        .map_err(|e| FetchError::InvalidUrl {
            url: token.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_path_and_query() {
        let url = endpoint(
            "https://powiedz.co/ords/dom/dom/",
            "audio_name",
            &[("nature", "Radio"), ("type", "Rock & Pop")],
        )
        .unwrap();
        assert_eq!(
            url,
            "https://powiedz.co/ords/dom/dom/audio_name?nature=Radio&type=Rock+%26+Pop"
        );
    }

    #[test]
    fn test_endpoint_treats_base_as_directory() {
        let url = endpoint("http://127.0.0.1:9000/api", "audiobooks/", &[("format", "json")]).unwrap();
        assert_eq!(url, "http://127.0.0.1:9000/api/audiobooks/?format=json");
    }

    #[test]
    fn test_endpoint_rejects_garbage_base() {
        assert!(matches!(
            endpoint("not a url", "x", &[]),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_absolute_url() {
        assert!(absolute_url("https://feed.url/rss").is_ok());
        assert!(absolute_url("News").is_err());
    }
}

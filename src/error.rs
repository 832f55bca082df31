//! Error types for catalog fetches and browse requests

use std::time::Duration;
use thiserror::Error;

use crate::browse::NodePath;

/// A catalog gateway call failed or returned something unusable
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("invalid {format} payload: {reason}")]
    Parse { format: &'static str, reason: String },

    #[error("empty {format} payload")]
    Empty { format: &'static str },

    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{0} not supported by this catalog")]
    Unsupported(&'static str),
}

impl FetchError {
    pub fn parse(format: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            format,
            reason: reason.to_string(),
        }
    }
}

/// Why a browse request produced no node
///
/// All variants propagate to the caller unmodified; an already rendered
/// parent tree is never affected by a failed subtree.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Unknown root prefix, or an id whose shape does not match the root's levels
    #[error("Media not found: {node_id}")]
    NotFound { node_id: String },

    #[error("Can't load {node_id} ({}): {source}", .content_type.as_deref().unwrap_or("media"))]
    UpstreamFetch {
        node_id: String,
        content_type: Option<String>,
        #[source]
        source: FetchError,
    },

    /// Resolvable node that lacks a field needed to play it (stream url, enclosure)
    #[error("Missing media information for {node_id}: no {field}")]
    MissingMediaInformation { node_id: String, field: &'static str },
}

impl BrowseError {
    pub fn not_found(node_id: impl Into<String>) -> Self {
        Self::NotFound {
            node_id: node_id.into(),
        }
    }

    pub fn upstream(path: &NodePath, source: FetchError) -> Self {
        Self::UpstreamFetch {
            node_id: path.node_id.clone(),
            content_type: path.content_type.clone(),
            source,
        }
    }

    pub fn missing(path: &NodePath, field: &'static str) -> Self {
        Self::MissingMediaInformation {
            node_id: path.node_id.clone(),
            field,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

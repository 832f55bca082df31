//! Browse roots: one resolver per catalog, and wiring them from config

pub mod apps;
pub mod audiobooks;
pub mod podcast;
pub mod radio;
pub mod tunein;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::browse::{NodePath, TreeBuilder};
use crate::catalog::{AisCloudGateway, AudioBooksGateway, AudioNature, HttpFetcher, TuneInGateway};
use crate::config::Config;
use crate::error::{BrowseError, FetchError};

pub use apps::AppsRoot;
pub use audiobooks::AudioBooksRoot;
pub use podcast::PodcastRoot;
pub use radio::RadioRoot;
pub use tunein::TuneInRoot;

/// Tag a gateway failure with the node being browsed
pub(crate) fn upstream(path: &NodePath) -> impl FnOnce(FetchError) -> BrowseError + '_ {
    move |err| BrowseError::upstream(path, err)
}

/// Build the tree for every catalog enabled in `config`.
///
/// The apps root needs a console client and is registered by the caller.
pub fn build_tree(config: &Config) -> Result<TreeBuilder> {
    let client = reqwest::Client::builder()
        .timeout(config.fetch_timeout())
        .build()
        .context("Failed to build HTTP client")?;
    let fetcher = HttpFetcher::new(client, config.fetch_timeout());
    build_tree_with(config, fetcher)
}

/// Same as [`build_tree`] with a caller-supplied fetcher
pub fn build_tree_with(config: &Config, fetcher: HttpFetcher) -> Result<TreeBuilder> {
    let mut tree = TreeBuilder::new().with_title(&config.library_title);

    let cloud = &config.ais_cloud;
    let cloud_fetcher = fetcher.clone().with_authorization(cloud.token.clone());
    if cloud.radio {
        let gateway = AisCloudGateway::new(cloud_fetcher.clone(), &cloud.base_url, AudioNature::Radio);
        let mut root = RadioRoot::new(Arc::new(gateway));
        if let Some(title) = &cloud.radio_title {
            root = root.with_title(title);
        }
        tree = tree.with_root(root);
    }
    if cloud.podcast {
        let gateway = AisCloudGateway::new(cloud_fetcher, &cloud.base_url, AudioNature::Podcast);
        let mut root = PodcastRoot::new(Arc::new(gateway));
        if let Some(title) = &cloud.podcast_title {
            root = root.with_title(title);
        }
        tree = tree.with_root(root);
    }

    if config.audiobooks.enabled {
        let gateway = AudioBooksGateway::new(fetcher.clone(), &config.audiobooks.base_url);
        let mut root = AudioBooksRoot::new(Arc::new(gateway));
        if let Some(title) = &config.audiobooks.title {
            root = root.with_title(title);
        }
        tree = tree.with_root(root);
    }

    if config.tunein.enabled {
        let gateway = TuneInGateway::new(fetcher, &config.tunein.root_url);
        let mut root = TuneInRoot::new(Arc::new(gateway));
        if let Some(title) = &config.tunein.title {
            root = root.with_title(title);
        }
        tree = tree.with_root(root);
    }

    info!(roots = ?tree.roots(), "Browse tree ready");
    Ok(tree)
}

//! Cloud podcasts: categories, shows, then episodes parsed from the show's RSS

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::browse::{BrowseNode, DepthSchema, Level, MediaClass, NodePath, RootKind, RootResolver};
use crate::catalog::CatalogGateway;
use crate::error::BrowseError;
use crate::parse::rss::FEED_IMAGE;
use crate::roots::upstream;

const PODCAST_LEVELS: &[Level] = &[
    Level::new("categories", 0),
    Level::new("shows", 1),
    // category / show / feed url
    Level::new("episodes", 3),
];
static PODCAST_SCHEMA: DepthSchema = DepthSchema::new(PODCAST_LEVELS);

pub struct PodcastRoot {
    gateway: Arc<dyn CatalogGateway>,
    title: String,
}

impl PodcastRoot {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            gateway,
            title: RootKind::Podcast.default_title().to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    async fn categories(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let prefix = RootKind::Podcast.prefix();
        let categories = self
            .gateway
            .list_top_level(prefix)
            .await
            .map_err(upstream(path))?;

        let children = categories
            .into_iter()
            .map(|category| {
                let id = PODCAST_SCHEMA.encode(prefix, &[&category.token]);
                BrowseNode::directory(category.label, id, MediaClass::Directory, prefix)
                    .with_thumbnail(category.thumbnail)
            })
            .collect();

        Ok(BrowseNode::directory(&self.title, prefix, MediaClass::Directory, prefix)
            .with_children(children))
    }

    async fn shows(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let prefix = RootKind::Podcast.prefix();
        let category = path.require(0)?;
        let shows = self
            .gateway
            .list_children(category)
            .await
            .map_err(upstream(path))?;

        let children = shows
            .into_iter()
            .map(|show| {
                if show.token.is_empty() {
                    return Err(BrowseError::missing(path, "feed url"));
                }
                let id = PODCAST_SCHEMA.encode(prefix, &[category, show.label.as_str(), show.token.as_str()]);
                Ok(BrowseNode::directory(show.label, id, MediaClass::Podcast, prefix)
                    .with_thumbnail(show.thumbnail))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(
            BrowseNode::directory(category, &path.node_id, MediaClass::Directory, prefix)
                .with_children(children),
        )
    }

    async fn episodes(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let prefix = RootKind::Podcast.prefix();
        let show = path.require(1)?;
        let feed_url = path.require(2)?;
        let episodes = self
            .gateway
            .fetch_terminal_feed(feed_url)
            .await
            .map_err(upstream(path))?;

        let total = episodes.len();
        let feed_image = episodes
            .first()
            .and_then(|episode| episode.extra(FEED_IMAGE))
            .map(str::to_string);
        let children: Vec<_> = episodes
            .into_iter()
            // Items without an enclosure are announcements, not episodes
            .filter(|episode| !episode.token.is_empty())
            .map(|episode| {
                BrowseNode::leaf(episode.label, episode.token, MediaClass::Episode, prefix)
                    .with_thumbnail(episode.thumbnail)
            })
            .collect();

        if children.len() < total {
            debug!(
                feed_url,
                skipped = total - children.len(),
                "Skipped feed items without enclosure"
            );
        }

        // Channel art first; an episode's own image only when the feed has none
        let thumbnail = feed_image.or_else(|| children.first().and_then(|c| c.thumbnail.clone()));
        Ok(
            BrowseNode::directory(show, &path.node_id, MediaClass::Podcast, prefix)
                .with_thumbnail(thumbnail)
                .with_children(children),
        )
    }
}

#[async_trait]
impl RootResolver for PodcastRoot {
    fn kind(&self) -> RootKind {
        RootKind::Podcast
    }

    fn schema(&self) -> &DepthSchema {
        &PODCAST_SCHEMA
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn resolve(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        match path.level {
            0 => self.categories(path).await,
            1 => self.shows(path).await,
            _ => self.episodes(path).await,
        }
    }
}

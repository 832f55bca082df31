//! Cloud radio: categories, then stations

use async_trait::async_trait;
use std::sync::Arc;

use crate::browse::{BrowseNode, DepthSchema, Level, MediaClass, NodePath, RootKind, RootResolver};
use crate::catalog::CatalogGateway;
use crate::error::BrowseError;
use crate::roots::upstream;

const RADIO_LEVELS: &[Level] = &[Level::new("categories", 0), Level::new("stations", 1)];
static RADIO_SCHEMA: DepthSchema = DepthSchema::new(RADIO_LEVELS);

pub struct RadioRoot {
    gateway: Arc<dyn CatalogGateway>,
    title: String,
}

impl RadioRoot {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            gateway,
            title: RootKind::Radio.default_title().to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    async fn categories(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let prefix = RootKind::Radio.prefix();
        let categories = self
            .gateway
            .list_top_level(prefix)
            .await
            .map_err(upstream(path))?;

        let children = categories
            .into_iter()
            .map(|category| {
                let id = RADIO_SCHEMA.encode(prefix, &[&category.token]);
                BrowseNode::directory(category.label, id, MediaClass::Directory, prefix)
                    .with_thumbnail(category.thumbnail)
            })
            .collect();

        Ok(BrowseNode::directory(&self.title, prefix, MediaClass::Directory, prefix)
            .with_children(children))
    }

    async fn stations(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let prefix = RootKind::Radio.prefix();
        let category = path.require(0)?;
        let stations = self
            .gateway
            .list_children(category)
            .await
            .map_err(upstream(path))?;

        let children = stations
            .into_iter()
            .map(|station| {
                if station.token.is_empty() {
                    return Err(BrowseError::missing(path, "stream url"));
                }
                // Stations play directly; the stream url is the id
                Ok(BrowseNode::leaf(station.label, station.token, MediaClass::Channel, prefix)
                    .with_thumbnail(station.thumbnail))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(
            BrowseNode::directory(category, &path.node_id, MediaClass::Directory, prefix)
                .with_children(children),
        )
    }
}

#[async_trait]
impl RootResolver for RadioRoot {
    fn kind(&self) -> RootKind {
        RootKind::Radio
    }

    fn schema(&self) -> &DepthSchema {
        &RADIO_SCHEMA
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn resolve(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        match path.level {
            0 => self.categories(path).await,
            _ => self.stations(path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::error::FetchError;
    use crate::roots::testing::StaticGateway;

    fn root(gateway: StaticGateway) -> RadioRoot {
        RadioRoot::new(Arc::new(gateway))
    }

    fn path(node_id: &str) -> NodePath {
        RADIO_SCHEMA.parse("ais_radio", node_id, None).unwrap()
    }

    #[tokio::test]
    async fn test_categories_are_directories() {
        let gateway = StaticGateway::default().top(vec![
            CatalogEntry::new("Jazz", "Jazz"),
            CatalogEntry::new("Rock/Pop", "Rock/Pop"),
        ]);
        let node = root(gateway).resolve(&path("ais_radio")).await.unwrap();

        assert_eq!(node.title, "Radio");
        let ids: Vec<_> = node.children().iter().map(|c| c.node_id.as_str()).collect();
        assert_eq!(ids, vec!["ais_radio/Jazz", "ais_radio/Rock/Pop"]);
        assert!(node.children().iter().all(|c| c.expandable && !c.playable));
    }

    #[tokio::test]
    async fn test_category_with_slash_resolves_to_stations() {
        let gateway = StaticGateway::default().children(
            "Rock/Pop",
            vec![CatalogEntry::new("Rock FM", "http://s/rock.mp3")],
        );
        let node = root(gateway).resolve(&path("ais_radio/Rock/Pop")).await.unwrap();

        assert_eq!(node.title, "Rock/Pop");
        assert_eq!(node.children()[0].node_id, "http://s/rock.mp3");
        assert!(node.children()[0].is_leaf());
        assert_eq!(node.children()[0].category, MediaClass::Channel);
    }

    #[tokio::test]
    async fn test_station_without_stream_url() {
        let gateway = StaticGateway::default().children(
            "Jazz",
            vec![
                CatalogEntry::new("Jazz FM", "http://s/jazz.mp3"),
                CatalogEntry::new("Broken", ""),
            ],
        );
        let err = root(gateway).resolve(&path("ais_radio/Jazz")).await.unwrap_err();
        assert!(matches!(err, BrowseError::MissingMediaInformation { field: "stream url", .. }));
    }

    #[tokio::test]
    async fn test_fetch_failure_carries_node_id() {
        let gateway = StaticGateway::default().fail_with(|| FetchError::Status {
            url: "http://cloud/audio_type".to_string(),
            status: 500,
        });
        let err = root(gateway).resolve(&path("ais_radio")).await.unwrap_err();
        match err {
            BrowseError::UpstreamFetch { node_id, .. } => assert_eq!(node_id, "ais_radio"),
            other => panic!("unexpected {:?}", other),
        }
    }
}

//! TuneIn: OPML directories all the way down
//!
//! Ids below the top are `ais_tunein/2/<title>/<opml url>`; the literal `2`
//! is kept so ids stay compatible with ones already stored by players.

use async_trait::async_trait;
use std::sync::Arc;

use crate::browse::{BrowseNode, DepthSchema, Level, MediaClass, NodePath, RootKind, RootResolver};
use crate::catalog::{CatalogEntry, CatalogGateway};
use crate::error::BrowseError;
use crate::roots::upstream;

const OUTLINE_MARKER: &str = "2";

const TUNEIN_LEVELS: &[Level] = &[
    Level::new("directory", 0),
    // marker / title / opml url
    Level::marked("outline", 3, OUTLINE_MARKER),
];
static TUNEIN_SCHEMA: DepthSchema = DepthSchema::new(TUNEIN_LEVELS);

pub struct TuneInRoot {
    gateway: Arc<dyn CatalogGateway>,
    title: String,
}

impl TuneInRoot {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            gateway,
            title: RootKind::TuneIn.default_title().to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// `audio` outlines play, `link` outlines open another OPML document
fn outline_node(outline: CatalogEntry) -> BrowseNode {
    let prefix = RootKind::TuneIn.prefix();
    if outline.extra("type") == Some("audio") {
        return BrowseNode::leaf(outline.label, outline.token, MediaClass::Channel, prefix)
            .with_thumbnail(outline.thumbnail);
    }

    let id = TUNEIN_SCHEMA.encode(
        prefix,
        &[OUTLINE_MARKER, outline.label.as_str(), outline.token.as_str()],
    );
    BrowseNode::directory(outline.label, id, MediaClass::Directory, prefix)
        .with_thumbnail(outline.thumbnail)
}

#[async_trait]
impl RootResolver for TuneInRoot {
    fn kind(&self) -> RootKind {
        RootKind::TuneIn
    }

    fn schema(&self) -> &DepthSchema {
        &TUNEIN_SCHEMA
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn resolve(&self, path: &NodePath) -> Result<BrowseNode, BrowseError> {
        let prefix = RootKind::TuneIn.prefix();
        let (title, outlines) = match path.level {
            0 => {
                let outlines = self.gateway.list_top_level("").await;
                (self.title.as_str(), outlines)
            }
            _ => {
                let title = path.require(1)?;
                let outlines = self.gateway.list_children(path.require(2)?).await;
                (title, outlines)
            }
        };

        let children = outlines
            .map_err(upstream(path))?
            .into_iter()
            .map(outline_node)
            .collect();

        Ok(
            BrowseNode::directory(title, &path.node_id, MediaClass::Directory, prefix)
                .with_children(children),
        )
    }
}

//! Browse tree node model

use serde::{Deserialize, Serialize};

/// Semantic class of a node, used by UIs for icons and grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaClass {
    Directory,
    App,
    Game,
    Track,
    Podcast,
    Episode,
    Channel,
    Artist,
    Book,
}

/// One node of a browse tree
///
/// Serializes to the host platform's shape (`media_class`, `media_content_id`,
/// `can_play`, ...). `children` holds a single level; grandchildren are fetched
/// by browsing the child's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseNode {
    pub title: String,
    #[serde(rename = "media_class")]
    pub category: MediaClass,
    #[serde(rename = "media_content_type")]
    pub content_kind: String,
    #[serde(rename = "media_content_id")]
    pub node_id: String,
    #[serde(rename = "can_play")]
    pub playable: bool,
    #[serde(rename = "can_expand")]
    pub expandable: bool,
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BrowseNode>>,
}

impl BrowseNode {
    /// Expandable, non-playable node
    pub fn directory(
        title: impl Into<String>,
        node_id: impl Into<String>,
        category: MediaClass,
        content_kind: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            content_kind: content_kind.into(),
            node_id: node_id.into(),
            playable: false,
            expandable: true,
            thumbnail: None,
            children: None,
        }
    }

    /// Playable terminal node. Leaves never get children.
    pub fn leaf(
        title: impl Into<String>,
        node_id: impl Into<String>,
        category: MediaClass,
        content_kind: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            content_kind: content_kind.into(),
            node_id: node_id.into(),
            playable: true,
            expandable: false,
            thumbnail: None,
            children: None,
        }
    }

    /// Set the thumbnail; blank URLs are treated as absent
    pub fn with_thumbnail(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = thumbnail.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_children(mut self, children: Vec<BrowseNode>) -> Self {
        debug_assert!(!self.playable, "leaf {} cannot have children", self.node_id);
        self.children = Some(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.playable && !self.expandable
    }

    pub fn children(&self) -> &[BrowseNode] {
        self.children.as_deref().unwrap_or_default()
    }
}

//! Tree builder: root sentinel handling, prefix routing and depth dispatch

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::browse::node::{BrowseNode, MediaClass};
use crate::browse::node_id::ROOT_ID;
use crate::browse::root::RootKind;
use crate::browse::schema::{DepthSchema, NodePath};
use crate::error::BrowseError;

const DEFAULT_LIBRARY_TITLE: &str = "AIS";

/// Resolves nodes below one root
///
/// The builder has already matched the prefix and mapped the id onto one of
/// the root's declared levels; `resolve` fetches that level's slice of the
/// catalog and assembles the node with its children.
#[async_trait]
pub trait RootResolver: Send + Sync {
    fn kind(&self) -> RootKind;

    fn schema(&self) -> &DepthSchema;

    fn title(&self) -> &str {
        self.kind().default_title()
    }

    fn thumbnail(&self) -> Option<&str> {
        None
    }

    async fn resolve(&self, path: &NodePath) -> Result<BrowseNode, BrowseError>;
}

/// Entry point for browse requests
///
/// Holds no per-request state; every call re-fetches from the catalogs.
#[derive(Clone)]
pub struct TreeBuilder {
    title: String,
    roots: Vec<Arc<dyn RootResolver>>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_LIBRARY_TITLE.to_string(),
            roots: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_root(mut self, resolver: impl RootResolver + 'static) -> Self {
        self.register(Arc::new(resolver));
        self
    }

    /// Register a root. A second resolver for the same kind replaces the first
    /// in place.
    pub fn register(&mut self, resolver: Arc<dyn RootResolver>) {
        let kind = resolver.kind();
        if let Some(existing) = self.roots.iter_mut().find(|r| r.kind() == kind) {
            warn!(root = %kind, "Replacing already registered browse root");
            *existing = resolver;
        } else {
            debug!(root = %kind, "Registered browse root");
            self.roots.push(resolver);
        }
    }

    /// Registered roots in registration order
    pub fn roots(&self) -> Vec<RootKind> {
        self.roots.iter().map(|r| r.kind()).collect()
    }

    /// Static top of the tree: one placeholder per registered root
    pub fn root_node(&self) -> BrowseNode {
        let children = self
            .roots
            .iter()
            .map(|root| {
                let prefix = root.kind().prefix();
                BrowseNode::directory(root.title(), prefix, MediaClass::Directory, prefix)
                    .with_thumbnail(root.thumbnail().map(str::to_string))
            })
            .collect();

        BrowseNode::directory(&self.title, ROOT_ID, MediaClass::Directory, ROOT_ID)
            .with_children(children)
    }

    /// Browse to `node_id`; `None` and `"library"` both return the root
    pub async fn browse(
        &self,
        content_type: Option<&str>,
        node_id: Option<&str>,
    ) -> Result<BrowseNode, BrowseError> {
        let node_id = match node_id {
            None | Some(ROOT_ID) => return Ok(self.root_node()),
            Some(id) => id,
        };

        let resolver = self.resolver_for(node_id).ok_or_else(|| {
            debug!(node_id, "No browse root owns this id");
            BrowseError::not_found(node_id)
        })?;
        let kind = resolver.kind();

        let path = resolver.schema().parse(kind.prefix(), node_id, content_type)?;
        debug!(
            root = %kind,
            level = path.level,
            level_name = resolver.schema().levels()[path.level].name,
            node_id,
            "Resolving browse node"
        );

        resolver.resolve(&path).await.inspect_err(|err| {
            warn!(root = %kind, node_id, "Browse failed: {}", err);
        })
    }

    fn resolver_for(&self, node_id: &str) -> Option<&Arc<dyn RootResolver>> {
        RootKind::ROUTING_ORDER
            .into_iter()
            .filter(|kind| kind.owns(node_id))
            .find_map(|kind| self.roots.iter().find(|r| r.kind() == kind))
    }
}

//! Per-root depth schema
//!
//! Each root declares its levels up front: how many path segments follow the
//! root prefix at that level, and optionally a literal marker the first of
//! those segments must equal. A node id maps to exactly one level or is
//! rejected as not found.

use crate::browse::node_id::NodeIdScheme;
use crate::error::BrowseError;

/// One level of a root's tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub name: &'static str,
    /// Segments after the root prefix
    pub segments: usize,
    pub marker: Option<&'static str>,
}

impl Level {
    pub const fn new(name: &'static str, segments: usize) -> Self {
        Self {
            name,
            segments,
            marker: None,
        }
    }

    /// Level whose first segment is a fixed marker token
    pub const fn marked(name: &'static str, segments: usize, marker: &'static str) -> Self {
        Self {
            name,
            segments,
            marker: Some(marker),
        }
    }

    fn matches(&self, segments: &[String]) -> bool {
        self.segments == segments.len()
            && self
                .marker
                .map_or(true, |marker| segments.first().is_some_and(|s| s == marker))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DepthSchema {
    levels: &'static [Level],
    scheme: NodeIdScheme,
}

impl DepthSchema {
    pub const fn new(levels: &'static [Level]) -> Self {
        let mut deepest = 0;
        let mut i = 0;
        while i < levels.len() {
            if levels[i].segments > deepest {
                deepest = levels[i].segments;
            }
            i += 1;
        }
        Self {
            levels,
            scheme: NodeIdScheme::slash(deepest + 1),
        }
    }

    pub fn levels(&self) -> &'static [Level] {
        self.levels
    }

    pub fn scheme(&self) -> NodeIdScheme {
        self.scheme
    }

    /// Level index for the segments following the root prefix
    pub fn level_for(&self, segments: &[String]) -> Option<usize> {
        self.levels.iter().position(|level| level.matches(segments))
    }

    /// Id of a node under `prefix`
    pub fn encode<S: AsRef<str>>(&self, prefix: &str, segments: &[S]) -> String {
        let mut all = Vec::with_capacity(segments.len() + 1);
        all.push(prefix);
        all.extend(segments.iter().map(|s| s.as_ref()));
        self.scheme.encode(&all)
    }

    /// Decode `node_id` into a path under `prefix`
    pub fn parse(
        &self,
        prefix: &str,
        node_id: &str,
        content_type: Option<&str>,
    ) -> Result<NodePath, BrowseError> {
        let mut segments = self.scheme.decode(node_id);
        if segments.first().map(String::as_str) != Some(prefix) {
            return Err(BrowseError::not_found(node_id));
        }
        segments.remove(0);

        let level = self
            .level_for(&segments)
            .ok_or_else(|| BrowseError::not_found(node_id))?;

        Ok(NodePath {
            node_id: node_id.to_string(),
            content_type: content_type.map(str::to_string),
            level,
            segments,
        })
    }
}

/// A decoded browse request: which level of which root, and the path below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    pub node_id: String,
    pub content_type: Option<String>,
    pub level: usize,
    /// Segments after the root prefix
    pub segments: Vec<String>,
}

impl NodePath {
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Segment at `index`, or not found. Levels fix the segment count, so this
    /// only fails for paths built by hand.
    pub fn require(&self, index: usize) -> Result<&str, BrowseError> {
        self.segment(index)
            .ok_or_else(|| BrowseError::not_found(&self.node_id))
    }
}

//! Node id codec
//!
//! A node id is a hierarchical path flattened into one string, e.g.
//! `ais_podcast/News/BBC/https://feed.url`. Splitting is bounded at the root's
//! maximum segment count so the last segment may carry a literal URL with its
//! own slashes. Earlier segments are titles and get the separator (and `%`)
//! percent-escaped instead.

use std::borrow::Cow;

/// Id of the static library root. `None` resolves to the same node.
pub const ROOT_ID: &str = "library";

/// Whether a requested id addresses the top of the tree
pub fn is_root(node_id: Option<&str>) -> bool {
    matches!(node_id, None | Some(ROOT_ID))
}

/// Per-root id convention: separator and split bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIdScheme {
    separator: char,
    max_segments: usize,
}

impl NodeIdScheme {
    pub const fn new(separator: char, max_segments: usize) -> Self {
        assert!(max_segments > 0, "a node id has at least one segment");
        Self {
            separator,
            max_segments,
        }
    }

    /// `/`-separated scheme
    pub const fn slash(max_segments: usize) -> Self {
        Self::new('/', max_segments)
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn max_segments(&self) -> usize {
        self.max_segments
    }

    /// Join segments into an id. Segments past the bound end up merged into
    /// the tail on decode.
    pub fn encode<S: AsRef<str>>(&self, segments: &[S]) -> String {
        let tail = self.max_segments - 1;
        let mut id = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                id.push(self.separator);
            }
            if i >= tail {
                id.push_str(segment.as_ref());
            } else {
                id.push_str(&self.escape(segment.as_ref()));
            }
        }
        id
    }

    /// Split an id back into segments
    pub fn decode(&self, node_id: &str) -> Vec<String> {
        let tail = self.max_segments - 1;
        node_id
            .splitn(self.max_segments, self.separator)
            .enumerate()
            .map(|(i, segment)| {
                if i >= tail {
                    segment.to_string()
                } else {
                    unescape(segment).into_owned()
                }
            })
            .collect()
    }

    /// Number of separators consumed by the bounded split
    pub fn depth(&self, node_id: &str) -> usize {
        node_id.splitn(self.max_segments, self.separator).count() - 1
    }

    fn escape<'a>(&self, segment: &'a str) -> Cow<'a, str> {
        if !segment.contains(['%', self.separator]) {
            return Cow::Borrowed(segment);
        }
        let mut escaped = String::with_capacity(segment.len() + 4);
        for c in segment.chars() {
            if c == '%' || c == self.separator {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    escaped.push_str(&format!("%{:02X}", byte));
                }
            } else {
                escaped.push(c);
            }
        }
        Cow::Owned(escaped)
    }
}

fn unescape(segment: &str) -> Cow<'_, str> {
    if !segment.contains('%') {
        return Cow::Borrowed(segment);
    }
    // Ids not produced by encode() may carry stray '%'; keep them verbatim
    urlencoding::decode(segment)
        .map(|s| Cow::Owned(s.into_owned()))
        .unwrap_or(Cow::Borrowed(segment))
}

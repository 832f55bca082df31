//! Media browse tree: node model, id codec, depth schemas and the builder

pub mod builder;
pub mod group;
pub mod node;
pub mod node_id;
pub mod root;
pub mod schema;

pub use builder::{RootResolver, TreeBuilder};
pub use group::group_by;
pub use node::{BrowseNode, MediaClass};
pub use node_id::{is_root, NodeIdScheme, ROOT_ID};
pub use root::RootKind;
pub use schema::{DepthSchema, Level, NodePath};

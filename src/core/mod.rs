//! Core module - identity, project plumbing, and the traversal engine

pub mod entity;
pub mod explosion;
pub mod graph;
pub mod identity;
pub mod metadata;
pub mod project;
pub mod search;
pub mod store;
pub mod tree;

pub use entity::{Entity, Status};
pub use explosion::{
    explode, ExplodeOptions, ExplosionRow, MAX_EXPLOSION_DEPTH, MAX_EXPLOSION_ROWS,
};
pub use graph::BomGraph;
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use metadata::{ItemMeta, MetadataResolver};
pub use project::{Project, ProjectError};
pub use search::build_inclusion_set;
pub use store::{Store, StoreError};
pub use tree::{build_tree, ItemType, TreeNode, TreeOptions, MAX_TREE_DEPTH, MAX_TREE_NODES};

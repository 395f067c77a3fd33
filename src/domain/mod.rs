//! Domain layer: row-table ingestion, hierarchy reconstruction and rendering
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod hierarchy;
pub mod ingest;
pub mod model;
pub mod render;
pub mod tree_traits;

pub use entities::*;
pub use error::DomainError;
pub use hierarchy::{GraphIter, HierarchyBuilder, HierarchyGraph};
pub use ingest::{ingest, DomainResult, NodeTable};
pub use model::{ModelNode, ModelNodeKind, TreeModel, TreeModelBuilder};
pub use render::{LineKind, RenderLine, RenderStyle, TreeLines, TreeRenderer};
pub use tree_traits::TreeNodeConvert;

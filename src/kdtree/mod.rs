//! An implementation of a balanced, immutable K-D Tree over points of any dimensionality.

#![warn(missing_docs)]

mod builder;
mod index;
mod node;
#[cfg(feature = "rayon")]
mod par;
mod search;
mod r#trait;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{KDTree, KDTreeMetadata, KDTreeRef};
pub use node::{KDNode, NodeId};
pub use r#trait::KDTreeIndex;
pub use traversal::Node;

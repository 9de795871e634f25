use crate::kdtree::node::{KDNode, NodeId};
use crate::r#type::KDPoint;

/// Common metadata to describe a KDTree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KDTreeMetadata {
    pub(crate) root: Option<NodeId>,
    pub(crate) dims: usize,
    pub(crate) num_items: usize,
}

impl KDTreeMetadata {
    /// Describe the tree rooted at `root`. A root outside of `nodes` has no dimensions.
    pub(crate) fn from_nodes<P: KDPoint>(nodes: &[KDNode<P>], root: Option<NodeId>) -> Self {
        Self {
            root,
            dims: root
                .and_then(|id| nodes.get(id))
                .map_or(0, |node| node.item.dims()),
            num_items: nodes.len(),
        }
    }

    /// The position of the root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The dimensionality of every point in the tree. `0` for an empty tree.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The number of items in the tree.
    pub fn num_items(&self) -> usize {
        self.num_items
    }
}

/// An owned KDTree.
///
/// Usually this will be created from scratch via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder]
/// or [`KDTree::try_new`].
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<P> {
    pub(crate) nodes: Vec<KDNode<P>>,
    pub(crate) metadata: KDTreeMetadata,
}

impl<P: KDPoint> KDTree<P> {
    /// Adopt nodes that were already linked into a tree rooted at `root`.
    ///
    /// No validation is performed and this never panics. Child or parent links that point outside
    /// of `nodes` cause a panic when a query follows them, and a structure that breaks the k-d
    /// ordering yields unspecified query results. A `root` outside of `nodes` gives a tree with
    /// zero dimensions, so every query against it fails with
    /// [`DimensionMismatch`][crate::KDIndexError::DimensionMismatch].
    pub fn from_linked(nodes: Vec<KDNode<P>>, root: Option<NodeId>) -> Self {
        let metadata = KDTreeMetadata::from_nodes(&nodes, root);
        Self { nodes, metadata }
    }

    /// Borrow this tree as a [`KDTreeRef`].
    pub fn as_ref(&self) -> KDTreeRef<'_, P> {
        KDTreeRef {
            nodes: &self.nodes,
            metadata: self.metadata,
        }
    }

    /// Consume the tree, returning the nodes with their links.
    pub fn into_nodes(self) -> Vec<KDNode<P>> {
        self.nodes
    }

    /// Consume the tree, returning its points ordered by [`NodeId`].
    pub fn into_items(self) -> Vec<P> {
        self.nodes.into_iter().map(KDNode::into_item).collect()
    }
}

/// A reference onto an externally owned set of linked nodes.
///
/// Usually this will be created from a [`KDTree`] via its [`as_ref`][KDTree::as_ref] method, but
/// it can also be created over nodes that a caller linked by hand.
#[derive(Debug, PartialEq)]
pub struct KDTreeRef<'a, P> {
    pub(crate) nodes: &'a [KDNode<P>],
    pub(crate) metadata: KDTreeMetadata,
}

impl<P> Clone for KDTreeRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for KDTreeRef<'_, P> {}

impl<'a, P: KDPoint> KDTreeRef<'a, P> {
    /// View nodes that were already linked into a tree rooted at `root`.
    ///
    /// No validation is performed; see [`KDTree::from_linked`].
    pub fn new(nodes: &'a [KDNode<P>], root: Option<NodeId>) -> Self {
        Self {
            nodes,
            metadata: KDTreeMetadata::from_nodes(nodes, root),
        }
    }
}

use crate::r#type::KDPoint;

/// Position of a node within its tree's node storage.
///
/// Nodes built by [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder] keep the position their point
/// was added at, so a `NodeId` is also the insertion index of the point.
pub type NodeId = usize;

/// A point stored in a KDTree, together with its links to the rest of the tree.
///
/// The tree owns every node. Links are positions into the same node storage: `left` and `right`
/// describe the subtrees this node partitions, and `parent` is a back-reference that never implies
/// ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct KDNode<P> {
    pub(crate) item: P,
    pub(crate) split_dimension: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<P: KDPoint> KDNode<P> {
    /// Create an unlinked node holding `item`.
    pub fn new(item: P) -> Self {
        Self {
            item,
            split_dimension: 0,
            parent: None,
            left: None,
            right: None,
        }
    }

    /// The point this node holds.
    pub fn item(&self) -> &P {
        &self.item
    }

    /// Consume the node, returning the point it holds.
    pub fn into_item(self) -> P {
        self.item
    }

    /// The axis this node partitions its subtree on.
    pub fn split_dimension(&self) -> usize {
        self.split_dimension
    }

    /// The node that links to this node as a child.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The subtree holding points at or below this node on the split dimension.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The subtree holding points at or above this node on the split dimension.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Set the axis this node partitions its subtree on.
    pub fn set_split_dimension(&mut self, split_dimension: usize) -> &mut Self {
        self.split_dimension = split_dimension;
        self
    }

    /// Set the node that links to this node as a child.
    pub fn set_parent(&mut self, parent: Option<NodeId>) -> &mut Self {
        self.parent = parent;
        self
    }

    /// Set the left subtree.
    pub fn set_left(&mut self, left: Option<NodeId>) -> &mut Self {
        self.left = left;
        self
    }

    /// Set the right subtree.
    pub fn set_right(&mut self, right: Option<NodeId>) -> &mut Self {
        self.right = right;
        self
    }
}

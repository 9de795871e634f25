//! Utilities to traverse the KDTree structure.

use std::fmt;

use crate::kdtree::node::{KDNode, NodeId};
use crate::r#type::KDPoint;

/// A node in the KDTree, borrowed from the tree that owns it.
///
/// Query results are returned as `Node`s so that callers can both read the stored point and walk
/// from it to the rest of the tree.
pub struct Node<'a, P> {
    nodes: &'a [KDNode<P>],
    id: NodeId,
}

impl<P> Clone for Node<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Node<'_, P> {}

impl<'a, P: KDPoint> Node<'a, P> {
    pub(crate) fn new(nodes: &'a [KDNode<P>], id: NodeId) -> Self {
        Self { nodes, id }
    }

    #[inline]
    fn raw(&self) -> &'a KDNode<P> {
        &self.nodes[self.id]
    }

    /// The position of this node in the tree's storage.
    ///
    /// For trees built from points this is the insertion index of the point.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The point held by this node.
    #[inline]
    pub fn item(&self) -> &'a P {
        &self.raw().item
    }

    /// The coordinate on `axis` of the point held by this node.
    #[inline]
    pub fn location(&self, axis: usize) -> P::Num {
        self.raw().item.coord(axis)
    }

    /// The axis that the children of this node are split over.
    #[inline]
    pub fn split_dimension(&self) -> usize {
        self.raw().split_dimension
    }

    /// The node linking to this node as a child, or `None` for the root.
    pub fn parent(&self) -> Option<Node<'a, P>> {
        self.raw().parent.map(|id| Node::new(self.nodes, id))
    }

    /// The child node representing the "left" half.
    ///
    /// Every point below it is at or below this node on the split dimension.
    pub fn left_child(&self) -> Option<Node<'a, P>> {
        self.raw().left.map(|id| Node::new(self.nodes, id))
    }

    /// The child node representing the "right" half.
    ///
    /// Every point below it is at or above this node on the split dimension.
    pub fn right_child(&self) -> Option<Node<'a, P>> {
        self.raw().right.map(|id| Node::new(self.nodes, id))
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        let raw = self.raw();
        raw.left.is_none() && raw.right.is_none()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// The number of nodes on the path from the root to this node, exclusive. The root has depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.raw().parent;
        while let Some(id) = current {
            depth += 1;
            current = self.nodes[id].parent;
        }
        depth
    }

    /// The number of levels in the subtree rooted at this node. A leaf has height 1.
    pub fn height(&self) -> usize {
        let left = self.left_child().map_or(0, |n| n.height());
        let right = self.right_child().map_or(0, |n| n.height());
        1 + left.max(right)
    }
}

impl<P: fmt::Debug> fmt::Debug for Node<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("item", &self.nodes[self.id].item)
            .finish()
    }
}

impl<P> PartialEq for Node<'_, P> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.id == other.id
    }
}

/// Renders this node and, recursively, both of its subtrees.
///
/// Output grows with the size of the subtree; this is meant for debugging small trees and is not a
/// stable format.
impl<P: KDPoint + fmt::Debug> fmt::Display for Node<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.item())?;
        write!(f, "Left: ")?;
        write_subtree(f, self.left_child())?;
        writeln!(f)?;
        write!(f, "Right: ")?;
        write_subtree(f, self.right_child())?;
        writeln!(f)
    }
}

pub(crate) fn write_subtree<P: KDPoint + fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    node: Option<Node<'_, P>>,
) -> fmt::Result {
    match node {
        Some(node) => fmt::Display::fmt(&node, f),
        None => write!(f, "empty"),
    }
}

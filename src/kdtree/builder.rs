use tracing::debug;

use crate::error::{KDIndexError, Result};
use crate::kdtree::index::{KDTree, KDTreeMetadata};
use crate::kdtree::node::{KDNode, NodeId};
use crate::kdtree::KDTreeIndex;
use crate::r#type::{cmp_num, IndexableNum, KDPoint};

/// A builder to create a balanced [`KDTree`].
///
/// Points are validated as they are added: every point must have the dimensionality of the first
/// one, and floating point coordinates must be finite.
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<P> {
    items: Vec<P>,
    dims: Option<usize>,
}

impl<P: KDPoint> Default for KDTreeBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: KDPoint> KDTreeBuilder<P> {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new builder with room for `num_items` points.
    pub fn with_capacity(num_items: usize) -> Self {
        Self {
            items: Vec::with_capacity(num_items),
            dims: None,
        }
    }

    /// The number of points added so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no points have been added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a point to the index, returning the [`NodeId`] it will be stored under.
    pub fn add(&mut self, item: P) -> Result<NodeId> {
        let found = item.dims();
        match self.dims {
            None if found == 0 => {
                return Err(KDIndexError::InvalidArgument(
                    "points must have at least one dimension".to_string(),
                ))
            }
            None => self.dims = Some(found),
            Some(expected) if expected != found => {
                return Err(KDIndexError::DimensionMismatch { expected, found })
            }
            Some(_) => {}
        }

        let index = self.items.len();
        for axis in 0..found {
            if !item.coord(axis).is_orderable() {
                return Err(KDIndexError::InvalidArgument(format!(
                    "coordinate {} of point {} is not finite",
                    axis, index
                )));
            }
        }

        self.items.push(item);
        Ok(index)
    }

    /// Add every point of `items`, stopping at the first invalid one.
    pub fn extend<I: IntoIterator<Item = P>>(&mut self, items: I) -> Result<()> {
        for item in items {
            self.add(item)?;
        }
        Ok(())
    }

    /// Consume this builder, linking the points into a balanced tree ready for queries.
    pub fn finish(self) -> KDTree<P> {
        let dims = self.dims.unwrap_or(0);
        let mut nodes: Vec<KDNode<P>> = self.items.into_iter().map(KDNode::new).collect();
        let mut order: Vec<NodeId> = (0..nodes.len()).collect();

        let root = build(&mut nodes, &mut order, dims, 0, None);
        let tree = KDTree {
            metadata: KDTreeMetadata::from_nodes(&nodes, root),
            nodes,
        };

        debug!(
            num_items = tree.num_items(),
            dims,
            depth = tree.depth(),
            "built kd-tree"
        );
        tree
    }
}

impl<P: KDPoint> KDTree<P> {
    /// Build a balanced tree from a collection of points.
    ///
    /// ```
    /// use kd_index::kdtree::{KDTree, KDTreeIndex};
    ///
    /// let tree = KDTree::try_new(vec![[0., 0.], [5., 5.], [9., 9.]]).unwrap();
    /// assert_eq!(tree.num_items(), 3);
    /// assert_eq!(tree.dims(), 2);
    /// ```
    pub fn try_new<I: IntoIterator<Item = P>>(items: I) -> Result<Self> {
        let items = items.into_iter();
        let mut builder = KDTreeBuilder::with_capacity(items.size_hint().0);
        builder.extend(items)?;
        Ok(builder.finish())
    }
}

/// Recursively link `order` into a subtree, returning its root.
///
/// Each level stable-sorts its remaining points on the axis for its depth, takes the median as the
/// subtree root, and hands the lower and upper halves to the left and right subtrees.
fn build<P: KDPoint>(
    nodes: &mut [KDNode<P>],
    order: &mut [NodeId],
    dims: usize,
    depth: usize,
    parent: Option<NodeId>,
) -> Option<NodeId> {
    if order.is_empty() {
        return None;
    }

    let axis = depth % dims;
    order.sort_by(|&a, &b| cmp_num(&nodes[a].item.coord(axis), &nodes[b].item.coord(axis)));

    let m = order.len() / 2;
    let id = order[m];
    let (lower, upper) = order.split_at_mut(m);

    let left = build(nodes, lower, dims, depth + 1, Some(id));
    let right = build(nodes, &mut upper[1..], dims, depth + 1, Some(id));

    nodes[id]
        .set_split_dimension(axis)
        .set_parent(parent)
        .set_left(left)
        .set_right(right);
    Some(id)
}

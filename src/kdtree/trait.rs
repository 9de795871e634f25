use std::fmt;

use geo_traits::{CoordTrait, RectTrait};
use num_traits::Zero;
use tracing::trace;

use crate::error::{KDIndexError, Result};
use crate::kdtree::index::{KDTree, KDTreeMetadata, KDTreeRef};
use crate::kdtree::node::{KDNode, NodeId};
use crate::kdtree::search::{self, NearestSearch, RadiusSearch};
use crate::kdtree::traversal::{write_subtree, Node};
use crate::r#type::{CoordPoint, CoordRef, IndexableNum, KDPoint};

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<P: KDPoint>: Sized {
    /// The underlying linked nodes of this tree, ordered by [`NodeId`].
    fn nodes(&self) -> &[KDNode<P>];

    /// Access the metadata describing this KDTree
    fn metadata(&self) -> &KDTreeMetadata;

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.metadata().num_items()
    }

    /// Returns `true` if this KDTree holds no items.
    fn is_empty(&self) -> bool {
        self.metadata().root().is_none()
    }

    /// The dimensionality of every point in this KDTree. `0` for an empty tree.
    fn dims(&self) -> usize {
        self.metadata().dims()
    }

    /// The number of levels of this KDTree. `0` for an empty tree.
    fn depth(&self) -> usize {
        self.root().map_or(0, |root| root.height())
    }

    /// Access the root node of the KDTree for manual traversal.
    fn root(&self) -> Option<Node<'_, P>> {
        self.metadata()
            .root()
            .map(|id| Node::new(self.nodes(), id))
    }

    /// Access the node stored under `id`.
    fn node(&self, id: NodeId) -> Option<Node<'_, P>> {
        (id < self.nodes().len()).then(|| Node::new(self.nodes(), id))
    }

    /// Iterate over every node, ordered by [`NodeId`].
    fn iter<'a>(&'a self) -> impl Iterator<Item = Node<'a, P>>
    where
        P: 'a,
    {
        let nodes = self.nodes();
        (0..nodes.len()).map(move |id| Node::new(nodes, id))
    }

    /// Search for the `k` nodes nearest to `target`.
    ///
    /// Results are ordered by ascending distance; nodes at the same distance are ordered by
    /// [`NodeId`]. Fewer than `k` nodes are returned only when the tree holds fewer than `k`.
    ///
    /// ```
    /// use kd_index::kdtree::{KDTree, KDTreeIndex};
    ///
    /// let tree = KDTree::try_new(vec![[0., 0.], [5., 5.], [9., 9.], [1., 1.], [3., 3.]]).unwrap();
    /// let nearest = tree.nearest_neighbors(2, &[2., 2.]).unwrap();
    /// let items: Vec<_> = nearest.iter().map(|node| *node.item()).collect();
    /// assert_eq!(items, vec![[1., 1.], [3., 3.]]);
    /// ```
    fn nearest_neighbors<Q>(&self, k: usize, target: &Q) -> Result<Vec<Node<'_, P>>>
    where
        Q: KDPoint<Num = P::Num> + ?Sized,
    {
        let Some(root) = self.metadata().root() else {
            return Ok(vec![]);
        };
        check_target(self.dims(), target)?;
        if k == 0 {
            return Ok(vec![]);
        }

        let nodes = self.nodes();
        let mut search = NearestSearch::new(nodes, target, k);
        search.visit(root);
        let visited = search.visited;
        let found = search.finish();

        trace!(k, visited, found = found.len(), "nearest neighbor search");
        Ok(found.into_iter().map(|c| Node::new(nodes, c.id)).collect())
    }

    /// Search for the `k` nodes nearest to a [`CoordTrait`].
    fn nearest_neighbors_coord(
        &self,
        k: usize,
        coord: &impl CoordTrait<T = P::Num>,
    ) -> Result<Vec<Node<'_, P>>> {
        self.nearest_neighbors(k, &CoordRef(coord))
    }

    /// Search for every node within `radius` of `target`.
    ///
    /// Results are ordered by ascending distance; nodes at the same distance are ordered by
    /// [`NodeId`]. A point exactly `radius` away is included.
    ///
    /// The radius has the same type as the coordinates, so a tree of integer points takes an
    /// integer radius. To search a fractional radius over integer points, build the tree over
    /// floating point coordinates instead.
    ///
    /// ```
    /// use kd_index::kdtree::{KDTree, KDTreeIndex};
    ///
    /// let tree = KDTree::try_new(vec![[0., 0.], [5., 5.], [9., 9.], [1., 1.], [3., 3.]]).unwrap();
    /// let within = tree.within(3., &[2., 2.]).unwrap();
    /// let ids: Vec<_> = within.iter().map(|node| node.id()).collect();
    /// assert_eq!(ids, vec![3, 4, 0]);
    /// ```
    fn within<Q>(&self, radius: P::Num, target: &Q) -> Result<Vec<Node<'_, P>>>
    where
        Q: KDPoint<Num = P::Num> + ?Sized,
    {
        if !radius.is_orderable() || radius < P::Num::zero() {
            return Err(KDIndexError::InvalidArgument(format!(
                "radius must be a finite, non-negative number, got {:?}",
                radius
            )));
        }
        let Some(root) = self.metadata().root() else {
            return Ok(vec![]);
        };
        check_target(self.dims(), target)?;

        let nodes = self.nodes();
        let mut search = RadiusSearch::new(nodes, target, radius.sq_diff(P::Num::zero()));
        search.visit(root);
        let visited = search.visited;
        let found = search.finish();

        trace!(?radius, visited, found = found.len(), "radius search");
        Ok(found.into_iter().map(|c| Node::new(nodes, c.id)).collect())
    }

    /// Search for every node within `radius` of a [`CoordTrait`].
    ///
    /// As with [`within`][KDTreeIndex::within], the radius has the coordinate type.
    fn within_coord(
        &self,
        radius: P::Num,
        coord: &impl CoordTrait<T = P::Num>,
    ) -> Result<Vec<Node<'_, P>>> {
        self.within(radius, &CoordRef(coord))
    }

    /// Search for every node inside the axis-aligned box spanned by `min` and `max`, bounds
    /// included.
    ///
    /// Results are in traversal order.
    fn range<Q>(&self, min: &Q, max: &Q) -> Result<Vec<Node<'_, P>>>
    where
        Q: KDPoint<Num = P::Num> + ?Sized,
    {
        let Some(root) = self.metadata().root() else {
            return Ok(vec![]);
        };
        check_target(self.dims(), min)?;
        check_target(self.dims(), max)?;

        let nodes = self.nodes();
        let found = search::range(nodes, root, min, max);

        trace!(found = found.len(), "range search");
        Ok(found.into_iter().map(|id| Node::new(nodes, id)).collect())
    }

    /// Search for every node inside a [`RectTrait`].
    fn range_rect(&self, rect: &impl RectTrait<T = P::Num>) -> Result<Vec<Node<'_, P>>> {
        self.range(&CoordPoint(rect.min()), &CoordPoint(rect.max()))
    }

    /// Render every node of the tree with its left and right subtrees.
    ///
    /// The output grows with the size of the tree and is not a stable format; do not call this on
    /// large trees.
    fn dump(&self) -> String
    where
        P: fmt::Debug,
    {
        struct Dump<'a, T>(Option<Node<'a, T>>);

        impl<T: KDPoint + fmt::Debug> fmt::Display for Dump<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_subtree(f, self.0)
            }
        }

        Dump(self.root()).to_string()
    }
}

impl<P: KDPoint> KDTreeIndex<P> for KDTree<P> {
    fn nodes(&self) -> &[KDNode<P>] {
        &self.nodes
    }

    fn metadata(&self) -> &KDTreeMetadata {
        &self.metadata
    }
}

impl<P: KDPoint> KDTreeIndex<P> for KDTreeRef<'_, P> {
    fn nodes(&self) -> &[KDNode<P>] {
        self.nodes
    }

    fn metadata(&self) -> &KDTreeMetadata {
        &self.metadata
    }
}

/// Reject query points the tree cannot be compared against.
fn check_target<Q: KDPoint + ?Sized>(dims: usize, target: &Q) -> Result<()> {
    let found = target.dims();
    if found != dims {
        return Err(KDIndexError::DimensionMismatch {
            expected: dims,
            found,
        });
    }
    for axis in 0..found {
        if !target.coord(axis).is_orderable() {
            return Err(KDIndexError::InvalidArgument(format!(
                "coordinate {} of the query point is not finite",
                axis
            )));
        }
    }
    Ok(())
}

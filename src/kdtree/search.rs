//! Recursive branch-and-bound searches over linked nodes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tinyvec::TinyVec;

use crate::kdtree::node::{KDNode, NodeId};
use crate::r#type::{cmp_num, sq_dist, IndexableNum, KDPoint};

type Distance<P> = <<P as KDPoint>::Num as IndexableNum>::Distance;

/// A node and its distance to the query target.
///
/// Ordered by distance, then by node id, so that equidistant nodes always resolve the same way.
#[derive(Debug, Clone)]
pub(crate) struct Candidate<D> {
    pub(crate) dist: D,
    pub(crate) id: NodeId,
}

impl<D: PartialOrd> PartialEq for Candidate<D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<D: PartialOrd> Eq for Candidate<D> {}

impl<D: PartialOrd> Ord for Candidate<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_num(&self.dist, &other.dist).then(self.id.cmp(&other.id))
    }
}

impl<D: PartialOrd> PartialOrd for Candidate<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Squared distance from `target` to the splitting plane of `node`, and whether `target` lies
/// strictly on the left side of it.
#[inline]
fn plane_dist<P, Q>(node: &KDNode<P>, target: &Q) -> (Distance<P>, bool)
where
    P: KDPoint,
    Q: KDPoint<Num = P::Num> + ?Sized,
{
    let axis = node.split_dimension;
    let node_pos = node.item.coord(axis);
    let target_pos = target.coord(axis);
    (node_pos.sq_diff(target_pos), target_pos < node_pos)
}

/// State of a k-nearest-neighbor search.
///
/// `best` is a max-heap capped at `k` entries, so the worst kept candidate is always on top.
pub(crate) struct NearestSearch<'a, P: KDPoint, Q: ?Sized> {
    nodes: &'a [KDNode<P>],
    target: &'a Q,
    k: usize,
    best: BinaryHeap<Candidate<Distance<P>>>,
    pub(crate) visited: usize,
}

impl<'a, P, Q> NearestSearch<'a, P, Q>
where
    P: KDPoint,
    Q: KDPoint<Num = P::Num> + ?Sized,
{
    pub(crate) fn new(nodes: &'a [KDNode<P>], target: &'a Q, k: usize) -> Self {
        Self {
            nodes,
            target,
            k,
            best: BinaryHeap::with_capacity(k.min(nodes.len()) + 1),
            visited: 0,
        }
    }

    /// Whether a subtree `axis_dist` away could still hold a node worth keeping.
    ///
    /// Always `true` while fewer than `k` candidates are kept.
    #[inline]
    fn may_contain_better(&self, axis_dist: &Distance<P>) -> bool {
        self.best.len() < self.k || self.best.peek().map_or(true, |worst| *axis_dist <= worst.dist)
    }

    pub(crate) fn visit(&mut self, id: NodeId) {
        let nodes = self.nodes;
        let node = &nodes[id];
        self.visited += 1;

        let candidate = Candidate {
            dist: sq_dist(&node.item, self.target),
            id,
        };
        if self.best.len() < self.k {
            self.best.push(candidate);
        } else if self.best.peek().is_some_and(|worst| candidate < *worst) {
            self.best.pop();
            self.best.push(candidate);
        }

        let (axis_dist, target_is_left) = plane_dist(node, self.target);
        let crosses_plane = self.may_contain_better(&axis_dist);
        if crosses_plane {
            if let Some(left) = node.left {
                self.visit(left);
            }
            if let Some(right) = node.right {
                self.visit(right);
            }
        } else {
            let near = if target_is_left { node.left } else { node.right };
            if let Some(near) = near {
                self.visit(near);
            }
        }
    }

    /// The kept candidates, nearest first.
    pub(crate) fn finish(self) -> Vec<Candidate<Distance<P>>> {
        self.best.into_sorted_vec()
    }
}

/// State of a fixed-radius search. `max_dist` is the squared radius.
pub(crate) struct RadiusSearch<'a, P: KDPoint, Q: ?Sized> {
    nodes: &'a [KDNode<P>],
    target: &'a Q,
    max_dist: Distance<P>,
    found: Vec<Candidate<Distance<P>>>,
    pub(crate) visited: usize,
}

impl<'a, P, Q> RadiusSearch<'a, P, Q>
where
    P: KDPoint,
    Q: KDPoint<Num = P::Num> + ?Sized,
{
    pub(crate) fn new(nodes: &'a [KDNode<P>], target: &'a Q, max_dist: Distance<P>) -> Self {
        Self {
            nodes,
            target,
            max_dist,
            found: vec![],
            visited: 0,
        }
    }

    pub(crate) fn visit(&mut self, id: NodeId) {
        let nodes = self.nodes;
        let node = &nodes[id];
        self.visited += 1;

        let dist = sq_dist(&node.item, self.target);
        if dist <= self.max_dist {
            self.found.push(Candidate { dist, id });
        }

        let (axis_dist, target_is_left) = plane_dist(node, self.target);
        if axis_dist <= self.max_dist {
            if let Some(left) = node.left {
                self.visit(left);
            }
            if let Some(right) = node.right {
                self.visit(right);
            }
        } else {
            let near = if target_is_left { node.left } else { node.right };
            if let Some(near) = near {
                self.visit(near);
            }
        }
    }

    /// Every node within the radius, nearest first.
    pub(crate) fn finish(mut self) -> Vec<Candidate<Distance<P>>> {
        self.found.sort_unstable();
        self.found
    }
}

/// Collect the ids of every node inside the axis-aligned box `[min, max]`, in traversal order.
pub(crate) fn range<P, Q>(nodes: &[KDNode<P>], root: NodeId, min: &Q, max: &Q) -> Vec<NodeId>
where
    P: KDPoint,
    Q: KDPoint<Num = P::Num> + ?Sized,
{
    let dims = min.dims();

    // Use TinyVec to avoid heap allocations for shallow trees
    let mut stack: TinyVec<[NodeId; 32]> = TinyVec::new();
    stack.push(root);

    let mut result = vec![];
    while let Some(id) = stack.pop() {
        let node = &nodes[id];

        let inside = (0..dims).all(|axis| {
            let pos = node.item.coord(axis);
            min.coord(axis) <= pos && pos <= max.coord(axis)
        });
        if inside {
            result.push(id);
        }

        // queue the halves whose side of the splitting plane intersects the box
        let axis = node.split_dimension;
        let pos = node.item.coord(axis);
        if let Some(right) = node.right {
            if max.coord(axis) >= pos {
                stack.push(right);
            }
        }
        if let Some(left) = node.left {
            if min.coord(axis) <= pos {
                stack.push(left);
            }
        }
    }

    result
}

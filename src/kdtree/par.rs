//! Parallel batch queries over a shared, read-only tree.

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::error::Result;
use crate::kdtree::{KDTree, KDTreeIndex, Node};
use crate::r#type::KDPoint;

impl<P: KDPoint + Sync> KDTree<P> {
    /// Run [`KDTreeIndex::nearest_neighbors`] for every target in parallel.
    ///
    /// Results are in the order of `targets`. The first error encountered is returned.
    pub fn par_nearest_neighbors<Q>(&self, k: usize, targets: &[Q]) -> Result<Vec<Vec<Node<'_, P>>>>
    where
        Q: KDPoint<Num = P::Num> + Sync,
    {
        targets
            .par_iter()
            .map(|target| self.nearest_neighbors(k, target))
            .collect()
    }

    /// Run [`KDTreeIndex::within`] for every target in parallel.
    ///
    /// Results are in the order of `targets`. The first error encountered is returned.
    pub fn par_within<Q>(&self, radius: P::Num, targets: &[Q]) -> Result<Vec<Vec<Node<'_, P>>>>
    where
        Q: KDPoint<Num = P::Num> + Sync,
    {
        targets
            .par_iter()
            .map(|target| self.within(radius, target))
            .collect()
    }
}

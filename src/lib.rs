#![doc = include_str!("../README.md")]

mod distance;
mod error;
pub mod kdtree;
mod r#type;

pub use distance::ExactDistance;
pub use error::{KDIndexError, Result};
pub use r#type::{sq_dist, CoordPoint, IndexableNum, KDPoint};

#[cfg(test)]
pub(crate) mod test;

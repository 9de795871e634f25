use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KDIndexError {
    /// A point or query target does not have the dimensionality of the tree.
    #[error("Dimension mismatch: expected {expected} coordinates, found {found}")]
    DimensionMismatch {
        /// Dimensionality of the tree (or of the first point added).
        expected: usize,
        /// Dimensionality of the offending point.
        found: usize,
    },

    /// A query argument or coordinate is outside the accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, KDIndexError>;

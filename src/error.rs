use thiserror::Error;

/// Error types for `PackedVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum PackedVecError {
    /// Index is beyond the number of slots ever allocated
    #[error("Index out of bounds: index {index} is beyond capacity {capacity}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Capacity of the container at the time of the access
        capacity: usize,
    },
    /// Index lies inside a free block
    #[error("Vacant slot: index {index} is not occupied")]
    Vacant {
        /// Index that was accessed
        index: usize,
    },
}

pub type Result<T, E = PackedVecError> = core::result::Result<T, E>;

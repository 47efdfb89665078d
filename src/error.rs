// ⚠️ Errors - what can go wrong when modelling a storage location
//
// Two kinds only:
// - InvalidArgument: the caller passed something that can never be valid
// - IndexOutOfRange: the caller asked for a unit/customer that doesn't exist
//
// "Unit already rented" / "unit not rented" are NOT errors, they come back as bool.

/// Errors raised by the storage model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Input that no retry will ever make valid (empty name, bad dimensions, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Indexed read past the end of a grid row, the grid, or the roster
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

impl StorageError {
    pub fn invalid(message: impl Into<String>) -> Self {
        StorageError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

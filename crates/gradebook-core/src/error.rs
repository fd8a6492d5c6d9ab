//! Record store error types.
//!
//! Every failure a store operation can hit is a variant here. None of them
//! are fatal: the CLI prints the message and decides whether to re-prompt.

use thiserror::Error;

/// Errors returned by [`crate::store::RecordStore`] and the file codec.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// `add` was called with an id that is already in the store.
    #[error("A student with ID {0} already exists.")]
    DuplicateKey(String),

    /// `edit`/`delete` was called with an id that is not in the store.
    #[error("Student {0} does not exist.")]
    NotFound(String),

    /// A mark was not an integer in 0-100.
    #[error("Invalid input for mark. Mark should be an integer within 0-100 (got '{0}').")]
    InvalidMark(String),

    /// A text field cannot be stored in the delimited file format.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A line of the backing file could not be decoded.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Reading or writing the backing file failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    /// Returns `true` if the error came from the storage layer rather than
    /// from the caller's input.
    pub fn is_storage(&self) -> bool {
        matches!(self, RegistryError::Io(_) | RegistryError::Parse { .. })
    }
}

/// Convenience alias used throughout the core crate.
pub type RegistryResult<T> = Result<T, RegistryError>;

//! Error types for the permits module.

use permit_hash_core::{CoreError, TypeKind};
use thiserror::Error;

/// Errors that can occur while hashing permits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermitError {
    /// Only transfer-from permits can carry a witness.
    #[error("{0} permits do not accept a witness")]
    WitnessNotSupported(TypeKind),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for permit operations.
pub type Result<T> = std::result::Result<T, PermitError>;

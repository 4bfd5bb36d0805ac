//! Error types for the permit hasher.

use permit_hash_core::{CoreError, Felt};
use permit_hash_permits::PermitError;
use thiserror::Error;

/// Errors that can occur while producing a permit digest.
#[derive(Debug, Error)]
pub enum HashError {
    /// Invalid input value.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Permit error.
    #[error("permit error: {0}")]
    Permit(#[from] PermitError),

    /// The call context runs on a different chain than the domain.
    #[error("chain id mismatch: domain is {expected:#x}, call context is {actual:#x}")]
    ChainMismatch { expected: Felt, actual: Felt },

    /// Unusable domain configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for hasher operations.
pub type Result<T> = std::result::Result<T, HashError>;

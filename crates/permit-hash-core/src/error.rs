//! Error types for the permit hashing core.
//!
//! Hashing itself never fails. These errors come from constructing input
//! values: parsing integers and addresses, packing short strings, and
//! validating caller-supplied witness type strings.

use thiserror::Error;

/// Errors raised while constructing hashable values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("short string is {len} bytes, maximum is {max}")]
    ShortStringTooLong { len: usize, max: usize },

    #[error("short string contains non-ASCII characters: {0:?}")]
    NonAsciiShortString(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid field element: {0}")]
    InvalidFelt(String),

    #[error("value does not fit in 256 bits: {0}")]
    U256Overflow(String),

    #[error("invalid u256: {0}")]
    InvalidU256(String),

    #[error("invalid witness type string: {0}")]
    InvalidWitnessTypeString(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

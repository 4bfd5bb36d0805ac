//! # Permit Hash
//!
//! The unified API for structured permit hashing: from a typed permit to the
//! single field element a signer signs.
//!
//! ## Overview
//!
//! A signable digest is built in layers:
//!
//! - **Type hash**: selector of the permit's canonical type string
//! - **Struct hash**: Poseidon fold of the type hash and every field, with
//!   nested structs and arrays hashed recursively
//! - **Witness**: optional application data folded into transfer-from permits
//! - **Message hash**: the struct hash bound to a [`Domain`] and a signer
//!
//! ## Key Concepts
//!
//! - **Caller binding**: transfer-from permits carry no spender. The caller
//!   of the verifying call fills that slot, supplied via [`CallContext`].
//! - **Domain separation**: name, version and chain id make digests useless
//!   on any other deployment.
//!
//! ## Usage
//!
//! ```rust
//! use permit_hash::{CallContext, DomainConfig, PermitHasher, PermitHasherConfig};
//! use permit_hash::core::{short_string, ContractAddress, Felt, U256};
//! use permit_hash::permits::{Permit, PermitTransferFrom, TokenPermissions};
//!
//! let hasher = PermitHasher::from_config(
//!     &DomainConfig::new("Permit2", "1", "SN_MAIN"),
//!     PermitHasherConfig::default(),
//! )
//! .unwrap();
//!
//! let permit = Permit::from(PermitTransferFrom::new(
//!     TokenPermissions::new(ContractAddress::from(0xAu128), U256::from_u128(100)),
//!     Felt::ONE,
//!     U256::from_u128(1_900_000_000),
//! ));
//!
//! let ctx = CallContext::new(ContractAddress::from(0xCA11u128), short_string("SN_MAIN").unwrap());
//! let digest = hasher
//!     .digest(&permit, ContractAddress::from(0x5161u128), &ctx)
//!     .unwrap();
//!
//! assert_eq!(digest.primary_type, "PermitTransferFrom");
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `permit_hash::core` - Selector, sponge, value types, type registry
//! - `permit_hash::permits` - Permit entities and the witness extension

pub mod domain;
pub mod error;
pub mod hasher;

// Re-export component crates
pub use permit_hash_core as core;
pub use permit_hash_permits as permits;

// Re-export main types for convenience
pub use domain::{
    chain_id, domain_type_hash, parse_chain_id, Domain, DomainConfig, MESSAGE_PREFIX, REVISION,
    STARKNET_DOMAIN_TYPE,
};
pub use error::{HashError, Result};
pub use hasher::{CallContext, PermitDigest, PermitHasher, PermitHasherConfig};

// Re-export commonly used types
pub use permit_hash_core::{
    selector, short_string, type_hash, type_string, ContractAddress, Felt, StructHash, TypeKind,
    U256,
};
pub use permit_hash_permits::{
    Permit, PermitBatch, PermitBatchTransferFrom, PermitDetails, PermitSingle, PermitTransferFrom,
    TokenPermissions, TransferStructHash, Witness, WitnessKind, WitnessTypeString,
};

//! # Permit Hash Permits
//!
//! Permit entities and their struct hashes.
//!
//! ## Overview
//!
//! Two families of permits are supported:
//!
//! - **Allowance permits** ([`PermitSingle`], [`PermitBatch`]) name their
//!   spender and set a standing allowance per token.
//! - **Transfer-from permits** ([`PermitTransferFrom`],
//!   [`PermitBatchTransferFrom`]) authorize one transfer. Their spender is
//!   not stored: the current caller is bound into the hash at verification
//!   time.
//!
//! Transfer-from permits can additionally carry a [`Witness`]: application
//! data whose commitment and schema are folded into the signed struct hash.
//!
//! ## Usage
//!
//! ```rust
//! use permit_hash_core::{ContractAddress, Felt, U256};
//! use permit_hash_permits::{
//!     PermitTransferFrom, TokenPermissions, TransferStructHash, Witness, WitnessTypeString,
//! };
//!
//! let permit = PermitTransferFrom::new(
//!     TokenPermissions::new(ContractAddress::from(0xAu128), U256::from_u128(100)),
//!     Felt::ONE,
//!     U256::from_u128(1_900_000_000),
//! );
//! let caller = ContractAddress::from(0xCA11u128);
//!
//! let plain = permit.hash_struct(caller);
//!
//! let witness = Witness::new(
//!     Felt::from(42u8),
//!     WitnessTypeString::new(r#""witness":"Order")"Order"("id":"felt")"#).unwrap(),
//! );
//! let bound = permit.hash_with_witness(caller, &witness);
//! assert_ne!(plain, bound);
//! ```

pub mod allowance;
pub mod error;
pub mod permit;
pub mod transfer;
pub mod witness;

pub use allowance::{PermitBatch, PermitDetails, PermitSingle};
pub use error::{PermitError, Result};
pub use permit::Permit;
pub use transfer::{PermitBatchTransferFrom, PermitTransferFrom, TokenPermissions, TransferStructHash};
pub use witness::{
    witness_type_hash, Witness, WitnessKind, WitnessTypeString,
    PERMIT_BATCH_WITNESS_TRANSFER_FROM_STUB, PERMIT_WITNESS_TRANSFER_FROM_STUB,
};

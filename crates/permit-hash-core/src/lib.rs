//! # Permit Hash Core
//!
//! Pure primitives for permit hashing: selectors, the Poseidon sponge,
//! canonical type descriptors, and the registry of fixed type hashes.
//!
//! This crate contains no I/O and no state beyond lazily computed constants.
//! It is pure computation over field elements.
//!
//! ## Key Types
//!
//! - [`Felt`] - A Stark field element, the unit of every hash
//! - [`ContractAddress`] - An opaque account/contract identifier
//! - [`U256`] - A 256-bit integer, hashed as `u256 { low, high }`
//! - [`TypeDescriptor`] - The declared shape of a struct
//! - [`TypeKind`] - Discriminator for every fixed schema
//!
//! ## Type Hashes
//!
//! Every struct hash starts with the selector of its canonical descriptor.
//! See the [`descriptor`] module for the grammar and [`registry`] for the
//! fixed schemas.

pub mod crypto;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod struct_hash;
pub mod types;

pub use crypto::{hash_many, selector, Sponge};
pub use descriptor::{Field, FieldType, TypeDescriptor};
pub use error::{CoreError, Result};
pub use registry::{type_hash, type_string, TypeKind};
pub use struct_hash::{hash_array, StructHash};
pub use types::{short_string, ContractAddress, SHORT_STRING_MAX_LEN, U256};

pub use starknet_types_core::felt::Felt;

//! The struct hashing capability.
//!
//! Every hashable struct folds, in order: its type hash, then each field in
//! declaration order. Scalars are absorbed raw; nested structs (including
//! `u256`) are absorbed as their own struct hash; arrays of structs are
//! absorbed as the Poseidon hash of their element hashes.

use starknet_types_core::felt::Felt;

use crate::crypto::{hash_many, Sponge};
use crate::registry::TypeKind;
use crate::types::U256;

/// A struct with a fixed schema in the type registry.
pub trait StructHash {
    /// The registry entry describing this struct.
    const KIND: TypeKind;

    /// The type hash absorbed first into every struct hash.
    fn type_hash() -> Felt {
        Self::KIND.type_hash()
    }

    /// Compute the struct hash.
    fn hash_struct(&self) -> Felt;
}

impl StructHash for U256 {
    const KIND: TypeKind = TypeKind::U256;

    fn hash_struct(&self) -> Felt {
        let mut sponge = Sponge::new();
        sponge
            .absorb(Self::type_hash())
            .absorb(Felt::from(self.low))
            .absorb(Felt::from(self.high));
        sponge.finalize()
    }
}

/// Hash an ordered array of structs.
///
/// Order-sensitive. An empty slice hashes to `hash_many(&[])`.
pub fn hash_array<T: StructHash>(items: &[T]) -> Felt {
    let hashes: Vec<Felt> = items.iter().map(StructHash::hash_struct).collect();
    hash_many(&hashes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_struct_hash_layout() {
        let value = U256::from_limbs(100, 7);
        let expected = hash_many(&[
            TypeKind::U256.type_hash(),
            Felt::from(100u128),
            Felt::from(7u128),
        ]);
        assert_eq!(value.hash_struct(), expected);
    }

    #[test]
    fn test_u256_limbs_are_not_interchangeable() {
        assert_ne!(
            U256::from_limbs(1, 0).hash_struct(),
            U256::from_limbs(0, 1).hash_struct()
        );
    }

    #[test]
    fn test_hash_array_order_sensitive() {
        let a = U256::from_u128(1);
        let b = U256::from_u128(2);
        assert_ne!(hash_array(&[a, b]), hash_array(&[b, a]));
    }

    #[test]
    fn test_hash_array_empty() {
        let empty: [U256; 0] = [];
        assert_eq!(hash_array(&empty), hash_many(&[]));
    }
}

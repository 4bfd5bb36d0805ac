//! Cryptographic primitives for permit hashing.
//!
//! Wraps Keccak-256 (type selectors) and Poseidon (struct hashing) over the
//! Stark prime field. Both are bit-compatible with on-chain verifiers; do not
//! substitute a byte-oriented hash here.

use sha3::{Digest, Keccak256};
use starknet_crypto::{poseidon_hash_many, PoseidonHasher};
use starknet_types_core::felt::Felt;
use std::fmt;

/// Selectors keep the low 250 bits of the Keccak digest.
const SELECTOR_HIGH_BYTE_MASK: u8 = 0x03;

/// Compute the selector of an ASCII type descriptor.
///
/// This is `starknet_keccak`: Keccak-256 of the descriptor bytes, read
/// big-endian and truncated to 250 bits so it always fits in a field element.
pub fn selector(type_descriptor: &str) -> Felt {
    let digest = Keccak256::digest(type_descriptor.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    bytes[0] &= SELECTOR_HIGH_BYTE_MASK;
    Felt::from_bytes_be(&bytes)
}

/// Poseidon hash of an ordered sequence of field elements.
///
/// Used for array-of-struct fields. The empty sequence has a fixed, well
/// defined hash.
pub fn hash_many(values: &[Felt]) -> Felt {
    poseidon_hash_many(values)
}

/// An incremental Poseidon sponge.
///
/// Absorbing `a, b, c` and finalizing yields the same value as
/// `hash_many(&[a, b, c])`.
pub struct Sponge {
    hasher: PoseidonHasher,
}

impl Sponge {
    /// Create an empty sponge.
    pub fn new() -> Self {
        Self {
            hasher: PoseidonHasher::new(),
        }
    }

    /// Absorb one field element.
    pub fn absorb(&mut self, value: Felt) -> &mut Self {
        self.hasher.update(value);
        self
    }

    /// Finalize the sponge and return the digest.
    pub fn finalize(self) -> Felt {
        self.hasher.finalize()
    }
}

impl Default for Sponge {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sponge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sponge(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_known_values() {
        // Entry point selectors published by Starknet tooling.
        assert_eq!(
            selector("transfer"),
            Felt::from_hex("0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e")
                .unwrap()
        );
        assert_eq!(
            selector("__execute__"),
            Felt::from_hex("0x15d40a3d6ca2ac30f4031e42be28da9b056fef9bb7357ac5e85627ee876e5ad")
                .unwrap()
        );
    }

    #[test]
    fn test_selector_deterministic() {
        let s1 = selector("\"u256\"(\"low\":\"u128\",\"high\":\"u128\")");
        let s2 = selector("\"u256\"(\"low\":\"u128\",\"high\":\"u128\")");
        assert_eq!(s1, s2);

        let different = selector("\"u256\"(\"high\":\"u128\",\"low\":\"u128\")");
        assert_ne!(s1, different);
    }

    #[test]
    fn test_selector_fits_250_bits() {
        let bytes = selector("anything at all").to_bytes_be();
        assert_eq!(bytes[0] & !SELECTOR_HIGH_BYTE_MASK, 0);
    }

    #[test]
    fn test_sponge_matches_hash_many() {
        let values = [Felt::from(1u8), Felt::from(2u8), Felt::from(3u8)];

        let mut sponge = Sponge::new();
        for v in values {
            sponge.absorb(v);
        }

        assert_eq!(sponge.finalize(), hash_many(&values));
    }

    #[test]
    fn test_empty_hash_is_stable() {
        assert_eq!(hash_many(&[]), hash_many(&[]));
        assert_eq!(Sponge::new().finalize(), hash_many(&[]));
        assert_ne!(hash_many(&[]), hash_many(&[Felt::ZERO]));
    }
}

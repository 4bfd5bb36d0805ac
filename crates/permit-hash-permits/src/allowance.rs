//! Allowance permits.
//!
//! An allowance permit names its spender explicitly and grants it an
//! allowance per token until `expiration`. The signature is valid until
//! `sig_deadline`.

use serde::{Deserialize, Serialize};

use permit_hash_core::{hash_array, ContractAddress, Felt, Sponge, StructHash, TypeKind, U256};

/// Allowance parameters for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitDetails {
    /// The token being approved.
    pub token: ContractAddress,

    /// The maximum amount the spender may transfer.
    pub amount: U256,

    /// When the allowance expires.
    pub expiration: u128,

    /// Allowance nonce, incremented on every signed approval.
    pub nonce: u128,
}

/// A signed approval for a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitSingle {
    pub details: PermitDetails,

    /// Who receives the allowance.
    pub spender: ContractAddress,

    /// Deadline on the signature itself.
    pub sig_deadline: U256,
}

/// A signed approval for several tokens at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitBatch {
    /// Per-token allowances. Order is part of the signed commitment.
    pub details: Vec<PermitDetails>,

    /// Who receives the allowances.
    pub spender: ContractAddress,

    /// Deadline on the signature itself.
    pub sig_deadline: U256,
}

impl PermitDetails {
    /// Create allowance details.
    pub fn new(token: ContractAddress, amount: U256, expiration: u128, nonce: u128) -> Self {
        Self {
            token,
            amount,
            expiration,
            nonce,
        }
    }
}

impl PermitSingle {
    /// Create a single-token permit.
    pub fn new(details: PermitDetails, spender: ContractAddress, sig_deadline: U256) -> Self {
        Self {
            details,
            spender,
            sig_deadline,
        }
    }
}

impl PermitBatch {
    /// Create an empty batch permit.
    pub fn new(spender: ContractAddress, sig_deadline: U256) -> Self {
        Self {
            details: Vec::new(),
            spender,
            sig_deadline,
        }
    }

    /// Append allowance details for another token.
    pub fn with_details(mut self, details: PermitDetails) -> Self {
        self.details.push(details);
        self
    }
}

impl StructHash for PermitDetails {
    const KIND: TypeKind = TypeKind::PermitDetails;

    fn hash_struct(&self) -> Felt {
        let mut sponge = Sponge::new();
        sponge
            .absorb(Self::type_hash())
            .absorb(self.token.as_felt())
            .absorb(self.amount.hash_struct())
            .absorb(Felt::from(self.expiration))
            .absorb(Felt::from(self.nonce));
        sponge.finalize()
    }
}

impl StructHash for PermitSingle {
    const KIND: TypeKind = TypeKind::PermitSingle;

    fn hash_struct(&self) -> Felt {
        let mut sponge = Sponge::new();
        sponge
            .absorb(Self::type_hash())
            .absorb(self.details.hash_struct())
            .absorb(self.spender.as_felt())
            .absorb(self.sig_deadline.hash_struct());
        sponge.finalize()
    }
}

impl StructHash for PermitBatch {
    const KIND: TypeKind = TypeKind::PermitBatch;

    fn hash_struct(&self) -> Felt {
        let mut sponge = Sponge::new();
        sponge
            .absorb(Self::type_hash())
            .absorb(hash_array(&self.details))
            .absorb(self.spender.as_felt())
            .absorb(self.sig_deadline.hash_struct());
        sponge.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permit_hash_core::hash_many;

    fn details(token: u128, amount: u128) -> PermitDetails {
        PermitDetails::new(
            ContractAddress::from(token),
            U256::from_u128(amount),
            1_800_000_000,
            0,
        )
    }

    #[test]
    fn test_details_hash_layout() {
        let d = details(0xA, 100);
        let expected = hash_many(&[
            TypeKind::PermitDetails.type_hash(),
            Felt::from(0xAu128),
            U256::from_u128(100).hash_struct(),
            Felt::from(1_800_000_000u128),
            Felt::ZERO,
        ]);
        assert_eq!(d.hash_struct(), expected);
    }

    #[test]
    fn test_single_hash_nests_rather_than_flattens() {
        let permit = PermitSingle::new(
            details(0xA, 100),
            ContractAddress::from(0xBu128),
            U256::from_u128(1_900_000_000),
        );

        let nested = hash_many(&[
            TypeKind::PermitSingle.type_hash(),
            permit.details.hash_struct(),
            permit.spender.as_felt(),
            permit.sig_deadline.hash_struct(),
        ]);
        assert_eq!(permit.hash_struct(), nested);

        let flattened = hash_many(&[
            TypeKind::PermitSingle.type_hash(),
            Felt::from(0xAu128),
            Felt::from(100u128),
            Felt::ZERO,
            Felt::from(1_800_000_000u128),
            Felt::ZERO,
            Felt::from(0xBu128),
            Felt::from(1_900_000_000u128),
            Felt::ZERO,
        ]);
        assert_ne!(permit.hash_struct(), flattened);
    }

    #[test]
    fn test_batch_order_sensitive() {
        let spender = ContractAddress::from(0xBu128);
        let deadline = U256::from_u128(1_900_000_000);

        let ab = PermitBatch::new(spender, deadline)
            .with_details(details(0x1, 10))
            .with_details(details(0x2, 20));
        let ba = PermitBatch::new(spender, deadline)
            .with_details(details(0x2, 20))
            .with_details(details(0x1, 10));

        assert_ne!(ab.hash_struct(), ba.hash_struct());
    }

    #[test]
    fn test_empty_batch_is_well_defined() {
        let batch = PermitBatch::new(ContractAddress::from(0xBu128), U256::from_u128(5));

        let expected = hash_many(&[
            TypeKind::PermitBatch.type_hash(),
            hash_many(&[]),
            Felt::from(0xBu128),
            U256::from_u128(5).hash_struct(),
        ]);
        assert_eq!(batch.hash_struct(), expected);
        assert_eq!(batch.hash_struct(), batch.clone().hash_struct());
    }

    #[test]
    fn test_single_is_not_batch_of_one() {
        let spender = ContractAddress::from(0xBu128);
        let deadline = U256::from_u128(5);
        let single = PermitSingle::new(details(0x1, 10), spender, deadline);
        let batch = PermitBatch::new(spender, deadline).with_details(details(0x1, 10));

        assert_ne!(single.hash_struct(), batch.hash_struct());
    }

    #[test]
    fn test_details_json_roundtrip() {
        let d = details(0xA, 100);
        let json = serde_json::to_string(&d).unwrap();
        let recovered: PermitDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(d, recovered);
    }
}

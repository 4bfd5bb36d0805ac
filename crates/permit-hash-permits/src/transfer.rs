//! Signature transfer permits.
//!
//! A transfer-from permit authorizes a one-time transfer. It does not store
//! its spender: whoever calls the verifying contract is bound into the hash
//! in the `spender` slot at verification time. A relayer can therefore
//! submit a signed permit for the signer, but the permit only verifies for
//! the caller the signer had in mind.

use serde::{Deserialize, Serialize};

use permit_hash_core::{
    hash_array, ContractAddress, Felt, Sponge, StructHash, TypeKind, U256,
};

use crate::witness::{Witness, WitnessKind};

/// A token and the maximum amount that may be transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPermissions {
    pub token: ContractAddress,
    pub amount: U256,
}

/// A signed one-time transfer of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitTransferFrom {
    pub permitted: TokenPermissions,

    /// Unordered nonce, consumed on use.
    pub nonce: Felt,

    /// Deadline on the signature.
    pub deadline: U256,
}

/// A signed one-time transfer of several tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitBatchTransferFrom {
    /// Order is part of the signed commitment.
    pub permitted: Vec<TokenPermissions>,

    /// Unordered nonce, consumed on use.
    pub nonce: Felt,

    /// Deadline on the signature.
    pub deadline: U256,
}

impl TokenPermissions {
    /// Create token permissions.
    pub fn new(token: ContractAddress, amount: U256) -> Self {
        Self { token, amount }
    }
}

impl PermitTransferFrom {
    /// Create a single-token transfer permit.
    pub fn new(permitted: TokenPermissions, nonce: Felt, deadline: U256) -> Self {
        Self {
            permitted,
            nonce,
            deadline,
        }
    }
}

impl PermitBatchTransferFrom {
    /// Create an empty batch transfer permit.
    pub fn new(nonce: Felt, deadline: U256) -> Self {
        Self {
            permitted: Vec::new(),
            nonce,
            deadline,
        }
    }

    /// Append another permitted token.
    pub fn with_permitted(mut self, permitted: TokenPermissions) -> Self {
        self.permitted.push(permitted);
        self
    }
}

impl StructHash for TokenPermissions {
    const KIND: TypeKind = TypeKind::TokenPermissions;

    fn hash_struct(&self) -> Felt {
        let mut sponge = Sponge::new();
        sponge
            .absorb(Self::type_hash())
            .absorb(self.token.as_felt())
            .absorb(self.amount.hash_struct());
        sponge.finalize()
    }
}

/// Struct hashing for permits whose spender is the current caller.
pub trait TransferStructHash {
    /// The witness-free schema.
    const KIND: TypeKind;

    /// The witness-extended schema.
    const WITNESS_KIND: WitnessKind;

    /// Hash of the `permitted` field.
    fn permitted_hash(&self) -> Felt;

    /// The signature nonce.
    fn nonce(&self) -> Felt;

    /// The signature deadline.
    fn deadline(&self) -> &U256;

    /// Compute the struct hash with `caller` in the spender slot.
    fn hash_struct(&self, caller: ContractAddress) -> Felt {
        fold_transfer(self, Self::KIND.type_hash(), caller, None)
    }

    /// Compute the witness-extended struct hash.
    ///
    /// Uses the per-call witness type hash and absorbs the witness commitment
    /// after the permit's own fields.
    fn hash_with_witness(&self, caller: ContractAddress, witness: &Witness) -> Felt {
        let type_hash = witness.type_hash(Self::WITNESS_KIND);
        self.hash_with_witness_type(caller, type_hash, witness.commitment)
    }

    /// Compute the witness-extended struct hash from an already derived
    /// witness type hash.
    fn hash_with_witness_type(
        &self,
        caller: ContractAddress,
        witness_type_hash: Felt,
        commitment: Felt,
    ) -> Felt {
        fold_transfer(self, witness_type_hash, caller, Some(commitment))
    }
}

fn fold_transfer<T: TransferStructHash + ?Sized>(
    permit: &T,
    type_hash: Felt,
    caller: ContractAddress,
    witness: Option<Felt>,
) -> Felt {
    let mut sponge = Sponge::new();
    sponge
        .absorb(type_hash)
        .absorb(permit.permitted_hash())
        .absorb(caller.as_felt())
        .absorb(permit.nonce())
        .absorb(permit.deadline().hash_struct());
    if let Some(commitment) = witness {
        sponge.absorb(commitment);
    }
    sponge.finalize()
}

impl TransferStructHash for PermitTransferFrom {
    const KIND: TypeKind = TypeKind::PermitTransferFrom;
    const WITNESS_KIND: WitnessKind = WitnessKind::TransferFrom;

    fn permitted_hash(&self) -> Felt {
        self.permitted.hash_struct()
    }

    fn nonce(&self) -> Felt {
        self.nonce
    }

    fn deadline(&self) -> &U256 {
        &self.deadline
    }
}

impl TransferStructHash for PermitBatchTransferFrom {
    const KIND: TypeKind = TypeKind::PermitBatchTransferFrom;
    const WITNESS_KIND: WitnessKind = WitnessKind::BatchTransferFrom;

    fn permitted_hash(&self) -> Felt {
        hash_array(&self.permitted)
    }

    fn nonce(&self) -> Felt {
        self.nonce
    }

    fn deadline(&self) -> &U256 {
        &self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::witness::WitnessTypeString;
    use permit_hash_core::hash_many;

    const ORDER_FRAGMENT: &str = r#""witness":"Order")"Order"("id":"felt")"#;

    fn caller() -> ContractAddress {
        ContractAddress::from(0xCA11u128)
    }

    fn permit() -> PermitTransferFrom {
        PermitTransferFrom::new(
            TokenPermissions::new(ContractAddress::from(0xAu128), U256::from_u128(100)),
            Felt::from(7u8),
            U256::from_u128(1_900_000_000),
        )
    }

    fn witness(commitment: u64, fragment: &str) -> Witness {
        Witness::new(
            Felt::from(commitment),
            WitnessTypeString::new(fragment).unwrap(),
        )
    }

    #[test]
    fn test_token_permissions_scenario() {
        let tp = TokenPermissions::new(ContractAddress::from(0xAu128), U256::from_u128(100));

        let amount = hash_many(&[
            TypeKind::U256.type_hash(),
            Felt::from(100u8),
            Felt::ZERO,
        ]);
        let expected = hash_many(&[
            TypeKind::TokenPermissions.type_hash(),
            Felt::from(0xAu8),
            amount,
        ]);

        assert_eq!(tp.hash_struct(), expected);
        assert_eq!(
            expected,
            Felt::from_hex("0x2f6320c94ce6c7b1958f807bfe615b74cbf13b9d4929bd2af49cb9e1ec6d78e")
                .unwrap()
        );
    }

    #[test]
    fn test_transfer_layout_binds_caller_as_spender() {
        let p = permit();
        let expected = hash_many(&[
            TypeKind::PermitTransferFrom.type_hash(),
            p.permitted.hash_struct(),
            caller().as_felt(),
            p.nonce,
            p.deadline.hash_struct(),
        ]);
        assert_eq!(p.hash_struct(caller()), expected);
    }

    #[test]
    fn test_different_callers_different_hashes() {
        let p = permit();
        assert_ne!(
            p.hash_struct(caller()),
            p.hash_struct(ContractAddress::from(0xBADu128))
        );
    }

    #[test]
    fn test_witness_layout() {
        let p = permit();
        let w = witness(42, ORDER_FRAGMENT);

        let expected = hash_many(&[
            w.type_hash(WitnessKind::TransferFrom),
            p.permitted.hash_struct(),
            caller().as_felt(),
            p.nonce,
            p.deadline.hash_struct(),
            Felt::from(42u8),
        ]);
        assert_eq!(p.hash_with_witness(caller(), &w), expected);
        assert_ne!(p.hash_with_witness(caller(), &w), p.hash_struct(caller()));
    }

    #[test]
    fn test_witness_commitment_binding() {
        let p = permit();
        assert_ne!(
            p.hash_with_witness(caller(), &witness(1, ORDER_FRAGMENT)),
            p.hash_with_witness(caller(), &witness(2, ORDER_FRAGMENT))
        );
    }

    #[test]
    fn test_witness_type_string_binding() {
        let p = permit();
        let other = r#""witness":"Intent")"Intent"("id":"felt")"#;
        assert_ne!(
            p.hash_with_witness(caller(), &witness(1, ORDER_FRAGMENT)),
            p.hash_with_witness(caller(), &witness(1, other))
        );
    }

    #[test]
    fn test_batch_order_sensitive() {
        let a = TokenPermissions::new(ContractAddress::from(0x1u128), U256::from_u128(10));
        let b = TokenPermissions::new(ContractAddress::from(0x2u128), U256::from_u128(20));
        let deadline = U256::from_u128(5);

        let ab = PermitBatchTransferFrom::new(Felt::ONE, deadline)
            .with_permitted(a)
            .with_permitted(b);
        let ba = PermitBatchTransferFrom::new(Felt::ONE, deadline)
            .with_permitted(b)
            .with_permitted(a);

        assert_ne!(ab.hash_struct(caller()), ba.hash_struct(caller()));
    }

    #[test]
    fn test_batch_witness_uses_batch_stub() {
        let batch = PermitBatchTransferFrom::new(Felt::ONE, U256::from_u128(5)).with_permitted(
            TokenPermissions::new(ContractAddress::from(0x1u128), U256::from_u128(10)),
        );
        let w = witness(9, ORDER_FRAGMENT);

        let expected = hash_many(&[
            w.type_hash(WitnessKind::BatchTransferFrom),
            hash_array(&batch.permitted),
            caller().as_felt(),
            Felt::ONE,
            U256::from_u128(5).hash_struct(),
            Felt::from(9u8),
        ]);
        assert_eq!(batch.hash_with_witness(caller(), &w), expected);
    }

    #[test]
    fn test_empty_batch_transfer() {
        let batch = PermitBatchTransferFrom::new(Felt::ONE, U256::from_u128(5));
        let expected = hash_many(&[
            TypeKind::PermitBatchTransferFrom.type_hash(),
            hash_many(&[]),
            caller().as_felt(),
            Felt::ONE,
            U256::from_u128(5).hash_struct(),
        ]);
        assert_eq!(batch.hash_struct(caller()), expected);
    }
}

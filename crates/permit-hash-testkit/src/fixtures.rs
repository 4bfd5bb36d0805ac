//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use rand::Rng;

use permit_hash::{CallContext, PermitDigest, PermitHasher, Result};
use permit_hash_core::{ContractAddress, Felt, U256};
use permit_hash_permits::{
    Permit, PermitBatchTransferFrom, PermitDetails, PermitSingle, PermitTransferFrom,
    TokenPermissions, Witness, WitnessKind, WitnessTypeString,
};

use crate::generators::default_hasher;
use crate::vectors::ORDER_TYPE;

/// Signature deadline used by fixture permits.
pub const FIXTURE_DEADLINE: u128 = 1_900_000_000;

/// A test fixture with a signer, a caller and a hasher on the default domain.
pub struct TestFixture {
    pub signer: ContractAddress,
    pub caller: ContractAddress,
    pub hasher: PermitHasher,
}

impl TestFixture {
    /// Create a new test fixture with random identities.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self::with_addresses(
            ContractAddress::from(rng.gen::<u128>()),
            ContractAddress::from(rng.gen::<u128>()),
        )
    }

    /// Create with fixed identities.
    pub fn with_addresses(signer: ContractAddress, caller: ContractAddress) -> Self {
        Self {
            signer,
            caller,
            hasher: default_hasher(),
        }
    }

    /// The context of a call made by this fixture's caller.
    pub fn ctx(&self) -> CallContext {
        CallContext::new(self.caller, self.hasher.domain().chain_id())
    }

    /// Create a single-token allowance for `spender`.
    pub fn make_single(&self, token: u128, amount: u128, spender: ContractAddress) -> Permit {
        PermitSingle::new(
            PermitDetails::new(token.into(), U256::from_u128(amount), FIXTURE_DEADLINE, 0),
            spender,
            U256::from_u128(FIXTURE_DEADLINE),
        )
        .into()
    }

    /// Create a single-token transfer permit.
    pub fn make_transfer(&self, token: u128, amount: u128, nonce: u64) -> Permit {
        PermitTransferFrom::new(
            TokenPermissions::new(token.into(), U256::from_u128(amount)),
            Felt::from(nonce),
            U256::from_u128(FIXTURE_DEADLINE),
        )
        .into()
    }

    /// Create a batch transfer permit over `(token, amount)` pairs.
    pub fn make_batch_transfer(&self, tokens: &[(u128, u128)], nonce: u64) -> Permit {
        tokens
            .iter()
            .fold(
                PermitBatchTransferFrom::new(Felt::from(nonce), U256::from_u128(FIXTURE_DEADLINE)),
                |batch, &(token, amount)| {
                    batch.with_permitted(TokenPermissions::new(
                        token.into(),
                        U256::from_u128(amount),
                    ))
                },
            )
            .into()
    }

    /// Create an `Order` witness for the given schema.
    pub fn make_witness(&self, commitment: u64, kind: WitnessKind) -> Witness {
        Witness::new(
            Felt::from(commitment),
            WitnessTypeString::from_descriptor("witness", &ORDER_TYPE, kind),
        )
    }

    /// Compute the digest this fixture's signer signs for its caller.
    pub fn digest(&self, permit: &Permit) -> Result<PermitDigest> {
        self.hasher.digest(permit, self.signer, &self.ctx())
    }

    /// Compute the witness-extended digest.
    pub fn digest_with_witness(&self, permit: &Permit, witness: &Witness) -> Result<PermitDigest> {
        self.hasher
            .digest_with_witness(permit, witness, self.signer, &self.ctx())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let i = i as u128 + 1;
            TestFixture::with_addresses(
                ContractAddress::from(0x5161_0000 + i),
                ContractAddress::from(0xCA11_0000 + i),
            )
        })
        .collect()
}

//! Proptest generators for property-based testing.

use proptest::prelude::*;

use permit_hash::{
    chain_id, CallContext, DomainConfig, PermitDigest, PermitHasher, PermitHasherConfig,
};
use permit_hash_core::{short_string, ContractAddress, Felt, U256};
use permit_hash_permits::{
    Permit, PermitBatch, PermitBatchTransferFrom, PermitDetails, PermitSingle,
    PermitTransferFrom, TokenPermissions,
};

/// Generate a field element below 2^128.
pub fn felt() -> impl Strategy<Value = Felt> {
    any::<u128>().prop_map(Felt::from)
}

/// Generate a random ContractAddress.
pub fn contract_address() -> impl Strategy<Value = ContractAddress> {
    any::<u128>().prop_map(ContractAddress::from)
}

/// Generate any U256.
pub fn u256() -> impl Strategy<Value = U256> {
    (any::<u128>(), any::<u128>()).prop_map(|(low, high)| U256::from_limbs(low, high))
}

/// Generate TokenPermissions.
pub fn token_permissions() -> impl Strategy<Value = TokenPermissions> {
    (contract_address(), u256()).prop_map(|(token, amount)| TokenPermissions::new(token, amount))
}

/// Generate PermitDetails.
pub fn permit_details() -> impl Strategy<Value = PermitDetails> {
    (contract_address(), u256(), any::<u128>(), any::<u128>()).prop_map(
        |(token, amount, expiration, nonce)| PermitDetails::new(token, amount, expiration, nonce),
    )
}

/// Generate a PermitSingle.
pub fn permit_single() -> impl Strategy<Value = PermitSingle> {
    (permit_details(), contract_address(), u256())
        .prop_map(|(details, spender, deadline)| PermitSingle::new(details, spender, deadline))
}

/// Generate a PermitBatch with up to `max_len` entries.
pub fn permit_batch(max_len: usize) -> impl Strategy<Value = PermitBatch> {
    (
        prop::collection::vec(permit_details(), 0..=max_len),
        contract_address(),
        u256(),
    )
        .prop_map(|(details, spender, sig_deadline)| PermitBatch {
            details,
            spender,
            sig_deadline,
        })
}

/// Generate a PermitTransferFrom.
pub fn permit_transfer_from() -> impl Strategy<Value = PermitTransferFrom> {
    (token_permissions(), felt(), u256())
        .prop_map(|(permitted, nonce, deadline)| PermitTransferFrom::new(permitted, nonce, deadline))
}

/// Generate a PermitBatchTransferFrom with up to `max_len` entries.
pub fn permit_batch_transfer_from(max_len: usize) -> impl Strategy<Value = PermitBatchTransferFrom> {
    (
        prop::collection::vec(token_permissions(), 0..=max_len),
        felt(),
        u256(),
    )
        .prop_map(|(permitted, nonce, deadline)| PermitBatchTransferFrom {
            permitted,
            nonce,
            deadline,
        })
}

/// Generate any permit.
pub fn permit() -> impl Strategy<Value = Permit> {
    prop_oneof![
        permit_single().prop_map(Permit::from),
        permit_batch(8).prop_map(Permit::from),
        permit_transfer_from().prop_map(Permit::from),
        permit_batch_transfer_from(8).prop_map(Permit::from),
    ]
}

/// Parameters for computing a digest.
#[derive(Debug, Clone)]
pub struct DigestParams {
    pub permit: Permit,
    pub signer: ContractAddress,
    pub caller: ContractAddress,
}

impl Arbitrary for DigestParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (permit(), contract_address(), contract_address())
            .prop_map(|(permit, signer, caller)| DigestParams {
                permit,
                signer,
                caller,
            })
            .boxed()
    }
}

/// The hasher every generated digest is computed under.
pub fn default_hasher() -> PermitHasher {
    PermitHasher::from_config(
        &DomainConfig::new("Permit2", "1", chain_id::SN_MAIN),
        PermitHasherConfig::default(),
    )
    .expect("default domain is valid")
}

/// Compute a digest from parameters.
pub fn digest_from_params(hasher: &PermitHasher, params: &DigestParams) -> PermitDigest {
    let ctx = CallContext::new(params.caller, hasher.domain().chain_id());
    hasher
        .digest(&params.permit, params.signer, &ctx)
        .expect("context chain matches domain")
}

/// The chain id of [`default_hasher`].
pub fn default_chain_id() -> Felt {
    short_string(chain_id::SN_MAIN).expect("chain id is a valid short string")
}

#[cfg(test)]
mod tests {
    use super::*;
    use permit_hash::TransferStructHash;
    use permit_hash_core::StructHash;

    proptest! {
        #[test]
        fn test_digest_deterministic(params: DigestParams) {
            let hasher = default_hasher();
            let d1 = digest_from_params(&hasher, &params);
            let d2 = digest_from_params(&hasher, &params);

            prop_assert_eq!(d1, d2);
        }

        #[test]
        fn test_digest_survives_json(params: DigestParams) {
            let hasher = default_hasher();
            let json = serde_json::to_string(&params.permit).unwrap();
            let permit: Permit = serde_json::from_str(&json).unwrap();

            let reloaded = DigestParams { permit, ..params.clone() };
            prop_assert_eq!(
                digest_from_params(&hasher, &params),
                digest_from_params(&hasher, &reloaded)
            );
        }

        #[test]
        fn test_signer_binding(
            params: DigestParams,
            other in contract_address(),
        ) {
            prop_assume!(other != params.signer);

            let hasher = default_hasher();
            let moved = DigestParams { signer: other, ..params.clone() };
            let d1 = digest_from_params(&hasher, &params);
            let d2 = digest_from_params(&hasher, &moved);

            prop_assert_eq!(d1.struct_hash, d2.struct_hash);
            prop_assert_ne!(d1.message_hash, d2.message_hash);
        }

        #[test]
        fn test_transfer_caller_binding(
            permit in permit_transfer_from(),
            a in contract_address(),
            b in contract_address(),
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(permit.hash_struct(a), permit.hash_struct(b));
        }

        #[test]
        fn test_allowance_ignores_caller(
            permit in permit_single(),
            a in contract_address(),
            b in contract_address(),
        ) {
            let permit = Permit::from(permit);
            prop_assert_eq!(permit.hash_struct(a), permit.hash_struct(b));
        }

        #[test]
        fn test_batch_order_sensitive(
            x in permit_details(),
            y in permit_details(),
            spender in contract_address(),
            deadline in u256(),
        ) {
            prop_assume!(x != y);

            let xy = PermitBatch::new(spender, deadline).with_details(x).with_details(y);
            let yx = PermitBatch::new(spender, deadline).with_details(y).with_details(x);

            prop_assert_ne!(xy.hash_struct(), yx.hash_struct());
        }

        #[test]
        fn test_batch_transfer_order_sensitive(
            x in token_permissions(),
            y in token_permissions(),
            nonce in felt(),
            caller in contract_address(),
        ) {
            prop_assume!(x != y);

            let xy = PermitBatchTransferFrom::new(nonce, U256::MAX)
                .with_permitted(x)
                .with_permitted(y);
            let yx = PermitBatchTransferFrom::new(nonce, U256::MAX)
                .with_permitted(y)
                .with_permitted(x);

            prop_assert_ne!(xy.hash_struct(caller), yx.hash_struct(caller));
        }

        #[test]
        fn test_u256_limbs_not_interchangeable(low in any::<u128>(), high in any::<u128>()) {
            prop_assume!(low != high);
            prop_assert_ne!(
                U256::from_limbs(low, high).hash_struct(),
                U256::from_limbs(high, low).hash_struct()
            );
        }
    }

    #[test]
    fn test_default_chain_id_matches_hasher() {
        assert_eq!(default_hasher().domain().chain_id(), default_chain_id());
    }
}

//! The permit hasher: unified API from permit to signable digest.

use serde::{Deserialize, Serialize};

use permit_hash_core::{ContractAddress, Felt};
use permit_hash_permits::{Permit, PermitError, Witness};
use tracing::trace;

use crate::domain::{Domain, DomainConfig};
use crate::error::{HashError, Result};

/// Configuration for the permit hasher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermitHasherConfig {
    /// Reject call contexts whose chain id differs from the domain's.
    pub enforce_chain_id: bool,
}

impl Default for PermitHasherConfig {
    fn default() -> Self {
        Self {
            enforce_chain_id: true,
        }
    }
}

/// The verifying call a digest is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Immediate caller; fills the spender slot of transfer-from permits.
    pub caller: ContractAddress,

    /// Chain the call executes on.
    pub chain_id: Felt,
}

impl CallContext {
    /// Create a call context.
    pub fn new(caller: ContractAddress, chain_id: Felt) -> Self {
        Self { caller, chain_id }
    }
}

/// Every intermediate value of one digest computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitDigest {
    /// Struct name of the signed schema.
    pub primary_type: String,

    /// Type hash of the signed schema (fixed or witness-extended).
    pub type_hash: Felt,

    /// Struct hash of the permit.
    pub struct_hash: Felt,

    /// The value the signer signs.
    pub message_hash: Felt,
}

/// Computes signable digests for permits under one domain.
///
/// Immutable after construction; share it across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PermitHasher {
    domain: Domain,
    config: PermitHasherConfig,
}

impl PermitHasher {
    /// Create a hasher for a domain.
    pub fn new(domain: Domain, config: PermitHasherConfig) -> Self {
        Self { domain, config }
    }

    /// Create a hasher from domain configuration.
    pub fn from_config(domain: &DomainConfig, config: PermitHasherConfig) -> Result<Self> {
        Ok(Self::new(domain.build()?, config))
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn config(&self) -> &PermitHasherConfig {
        &self.config
    }

    /// The cached domain separator.
    pub fn domain_hash(&self) -> Felt {
        self.domain.hash()
    }

    /// Bind any struct commitment to this domain and a signer.
    pub fn message_hash(&self, struct_hash: Felt, signer: ContractAddress) -> Felt {
        self.domain.message_hash(struct_hash, signer)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Digests
    // ─────────────────────────────────────────────────────────────────────────

    /// Compute the digest `signer` signs for `permit`.
    pub fn digest(
        &self,
        permit: &Permit,
        signer: ContractAddress,
        ctx: &CallContext,
    ) -> Result<PermitDigest> {
        self.check_context(ctx)?;

        let kind = permit.kind();
        let struct_hash = permit.hash_struct(ctx.caller);
        Ok(self.finish(kind.name(), kind.type_hash(), struct_hash, signer))
    }

    /// Compute the digest for a transfer-from permit extended by a witness.
    pub fn digest_with_witness(
        &self,
        permit: &Permit,
        witness: &Witness,
        signer: ContractAddress,
        ctx: &CallContext,
    ) -> Result<PermitDigest> {
        self.check_context(ctx)?;

        let witness_kind = permit
            .witness_kind()
            .ok_or(PermitError::WitnessNotSupported(permit.kind()))?;
        let type_hash = witness.type_hash(witness_kind);
        let struct_hash =
            permit.hash_with_witness_type(ctx.caller, type_hash, witness.commitment)?;

        Ok(self.finish(witness_kind.type_name(), type_hash, struct_hash, signer))
    }

    fn check_context(&self, ctx: &CallContext) -> Result<()> {
        if self.config.enforce_chain_id && ctx.chain_id != self.domain.chain_id() {
            return Err(HashError::ChainMismatch {
                expected: self.domain.chain_id(),
                actual: ctx.chain_id,
            });
        }
        Ok(())
    }

    fn finish(
        &self,
        primary_type: &str,
        type_hash: Felt,
        struct_hash: Felt,
        signer: ContractAddress,
    ) -> PermitDigest {
        let message_hash = self.message_hash(struct_hash, signer);
        trace!(
            primary_type,
            signer = %signer,
            message_hash = %format!("{message_hash:#x}"),
            "computed permit digest"
        );

        PermitDigest {
            primary_type: primary_type.to_string(),
            type_hash,
            struct_hash,
            message_hash,
        }
    }
}

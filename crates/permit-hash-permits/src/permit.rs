//! Closed dispatch over every permit kind.

use serde::{Deserialize, Serialize};

use permit_hash_core::{ContractAddress, Felt, StructHash, TypeKind};

use crate::allowance::{PermitBatch, PermitSingle};
use crate::error::{PermitError, Result};
use crate::transfer::{PermitBatchTransferFrom, PermitTransferFrom, TransferStructHash};
use crate::witness::{Witness, WitnessKind};

/// Any permit that can be signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "permit")]
pub enum Permit {
    Single(PermitSingle),
    Batch(PermitBatch),
    TransferFrom(PermitTransferFrom),
    BatchTransferFrom(PermitBatchTransferFrom),
}

impl Permit {
    /// The fixed schema of this permit.
    pub fn kind(&self) -> TypeKind {
        match self {
            Permit::Single(_) => TypeKind::PermitSingle,
            Permit::Batch(_) => TypeKind::PermitBatch,
            Permit::TransferFrom(_) => TypeKind::PermitTransferFrom,
            Permit::BatchTransferFrom(_) => TypeKind::PermitBatchTransferFrom,
        }
    }

    /// The witness-extended schema, for permits that accept a witness.
    pub fn witness_kind(&self) -> Option<WitnessKind> {
        match self {
            Permit::Single(_) | Permit::Batch(_) => None,
            Permit::TransferFrom(_) => Some(WitnessKind::TransferFrom),
            Permit::BatchTransferFrom(_) => Some(WitnessKind::BatchTransferFrom),
        }
    }

    /// The fixed type hash of this permit.
    pub fn type_hash(&self) -> Felt {
        self.kind().type_hash()
    }

    /// Compute the struct hash.
    ///
    /// `caller` fills the spender slot of transfer-from permits and is
    /// ignored by allowance permits, which name their spender.
    pub fn hash_struct(&self, caller: ContractAddress) -> Felt {
        match self {
            Permit::Single(p) => p.hash_struct(),
            Permit::Batch(p) => p.hash_struct(),
            Permit::TransferFrom(p) => TransferStructHash::hash_struct(p, caller),
            Permit::BatchTransferFrom(p) => TransferStructHash::hash_struct(p, caller),
        }
    }

    /// Compute the witness-extended struct hash.
    ///
    /// Fails for allowance permits, which have no witness schema.
    pub fn hash_with_witness(&self, caller: ContractAddress, witness: &Witness) -> Result<Felt> {
        match self {
            Permit::Single(_) | Permit::Batch(_) => {
                Err(PermitError::WitnessNotSupported(self.kind()))
            }
            Permit::TransferFrom(p) => Ok(p.hash_with_witness(caller, witness)),
            Permit::BatchTransferFrom(p) => Ok(p.hash_with_witness(caller, witness)),
        }
    }

    /// Compute the witness-extended struct hash from a witness type hash the
    /// caller has already derived for [`Permit::witness_kind`].
    pub fn hash_with_witness_type(
        &self,
        caller: ContractAddress,
        witness_type_hash: Felt,
        commitment: Felt,
    ) -> Result<Felt> {
        match self {
            Permit::Single(_) | Permit::Batch(_) => {
                Err(PermitError::WitnessNotSupported(self.kind()))
            }
            Permit::TransferFrom(p) => {
                Ok(p.hash_with_witness_type(caller, witness_type_hash, commitment))
            }
            Permit::BatchTransferFrom(p) => {
                Ok(p.hash_with_witness_type(caller, witness_type_hash, commitment))
            }
        }
    }
}

impl From<PermitSingle> for Permit {
    fn from(p: PermitSingle) -> Self {
        Permit::Single(p)
    }
}

impl From<PermitBatch> for Permit {
    fn from(p: PermitBatch) -> Self {
        Permit::Batch(p)
    }
}

impl From<PermitTransferFrom> for Permit {
    fn from(p: PermitTransferFrom) -> Self {
        Permit::TransferFrom(p)
    }
}

impl From<PermitBatchTransferFrom> for Permit {
    fn from(p: PermitBatchTransferFrom) -> Self {
        Permit::BatchTransferFrom(p)
    }
}

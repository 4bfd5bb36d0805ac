//! The type registry: every fixed schema and its type hash.
//!
//! Descriptors are declared once here. Their canonical strings and type
//! hashes are computed on first use and then shared read-only for the life
//! of the process.
//!
//! Witness-extended schemas are deliberately absent: their shape depends on
//! the caller, so their type hashes are computed per call by the witness
//! extension in `permit-hash-permits`.

use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;
use std::fmt;
use std::sync::OnceLock;

use crate::crypto::selector;
use crate::descriptor::{Field, FieldType, TypeDescriptor};

/// Primitive type names used in descriptors.
pub mod primitives {
    pub const FELT: &str = "felt";
    pub const U128: &str = "u128";
    pub const CONTRACT_ADDRESS: &str = "ContractAddress";
}

/// `"u256"("low":"u128","high":"u128")`
pub static U256_TYPE: TypeDescriptor<'static> = TypeDescriptor {
    name: "u256",
    fields: &[
        Field {
            name: "low",
            ty: FieldType::Primitive(primitives::U128),
        },
        Field {
            name: "high",
            ty: FieldType::Primitive(primitives::U128),
        },
    ],
};

pub static TOKEN_PERMISSIONS_TYPE: TypeDescriptor<'static> = TypeDescriptor {
    name: "TokenPermissions",
    fields: &[
        Field {
            name: "token",
            ty: FieldType::Primitive(primitives::CONTRACT_ADDRESS),
        },
        Field {
            name: "amount",
            ty: FieldType::Struct(&U256_TYPE),
        },
    ],
};

pub static PERMIT_DETAILS_TYPE: TypeDescriptor<'static> = TypeDescriptor {
    name: "PermitDetails",
    fields: &[
        Field {
            name: "token",
            ty: FieldType::Primitive(primitives::CONTRACT_ADDRESS),
        },
        Field {
            name: "amount",
            ty: FieldType::Struct(&U256_TYPE),
        },
        Field {
            name: "expiration",
            ty: FieldType::Primitive(primitives::U128),
        },
        Field {
            name: "nonce",
            ty: FieldType::Primitive(primitives::U128),
        },
    ],
};

pub static PERMIT_SINGLE_TYPE: TypeDescriptor<'static> = TypeDescriptor {
    name: "PermitSingle",
    fields: &[
        Field {
            name: "details",
            ty: FieldType::Struct(&PERMIT_DETAILS_TYPE),
        },
        Field {
            name: "spender",
            ty: FieldType::Primitive(primitives::CONTRACT_ADDRESS),
        },
        Field {
            name: "sig_deadline",
            ty: FieldType::Struct(&U256_TYPE),
        },
    ],
};

pub static PERMIT_BATCH_TYPE: TypeDescriptor<'static> = TypeDescriptor {
    name: "PermitBatch",
    fields: &[
        Field {
            name: "details",
            ty: FieldType::StructArray(&PERMIT_DETAILS_TYPE),
        },
        Field {
            name: "spender",
            ty: FieldType::Primitive(primitives::CONTRACT_ADDRESS),
        },
        Field {
            name: "sig_deadline",
            ty: FieldType::Struct(&U256_TYPE),
        },
    ],
};

// The transfer-from schemas declare `spender` even though the value type
// does not store it: the slot is filled with the caller at hash time.

pub static PERMIT_TRANSFER_FROM_TYPE: TypeDescriptor<'static> = TypeDescriptor {
    name: "PermitTransferFrom",
    fields: &[
        Field {
            name: "permitted",
            ty: FieldType::Struct(&TOKEN_PERMISSIONS_TYPE),
        },
        Field {
            name: "spender",
            ty: FieldType::Primitive(primitives::CONTRACT_ADDRESS),
        },
        Field {
            name: "nonce",
            ty: FieldType::Primitive(primitives::FELT),
        },
        Field {
            name: "deadline",
            ty: FieldType::Struct(&U256_TYPE),
        },
    ],
};

pub static PERMIT_BATCH_TRANSFER_FROM_TYPE: TypeDescriptor<'static> = TypeDescriptor {
    name: "PermitBatchTransferFrom",
    fields: &[
        Field {
            name: "permitted",
            ty: FieldType::StructArray(&TOKEN_PERMISSIONS_TYPE),
        },
        Field {
            name: "spender",
            ty: FieldType::Primitive(primitives::CONTRACT_ADDRESS),
        },
        Field {
            name: "nonce",
            ty: FieldType::Primitive(primitives::FELT),
        },
        Field {
            name: "deadline",
            ty: FieldType::Struct(&U256_TYPE),
        },
    ],
};

/// Discriminator for every fixed schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    U256,
    TokenPermissions,
    PermitDetails,
    PermitSingle,
    PermitBatch,
    PermitTransferFrom,
    PermitBatchTransferFrom,
}

impl TypeKind {
    /// Every fixed schema, in registry order.
    pub const ALL: [TypeKind; 7] = [
        TypeKind::U256,
        TypeKind::TokenPermissions,
        TypeKind::PermitDetails,
        TypeKind::PermitSingle,
        TypeKind::PermitBatch,
        TypeKind::PermitTransferFrom,
        TypeKind::PermitBatchTransferFrom,
    ];

    /// The declared shape of this schema.
    pub fn descriptor(self) -> &'static TypeDescriptor<'static> {
        match self {
            TypeKind::U256 => &U256_TYPE,
            TypeKind::TokenPermissions => &TOKEN_PERMISSIONS_TYPE,
            TypeKind::PermitDetails => &PERMIT_DETAILS_TYPE,
            TypeKind::PermitSingle => &PERMIT_SINGLE_TYPE,
            TypeKind::PermitBatch => &PERMIT_BATCH_TYPE,
            TypeKind::PermitTransferFrom => &PERMIT_TRANSFER_FROM_TYPE,
            TypeKind::PermitBatchTransferFrom => &PERMIT_BATCH_TRANSFER_FROM_TYPE,
        }
    }

    /// The struct name used in descriptors.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// The full canonical descriptor.
    pub fn type_string(self) -> &'static str {
        &entries()[self as usize].type_string
    }

    /// The type hash: `selector(type_string)`.
    pub fn type_hash(self) -> Felt {
        entries()[self as usize].type_hash
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The full canonical descriptor of a fixed schema.
pub fn type_string(kind: TypeKind) -> &'static str {
    kind.type_string()
}

/// The type hash of a fixed schema.
pub fn type_hash(kind: TypeKind) -> Felt {
    kind.type_hash()
}

struct Entry {
    type_string: String,
    type_hash: Felt,
}

fn entries() -> &'static [Entry; 7] {
    static ENTRIES: OnceLock<[Entry; 7]> = OnceLock::new();
    ENTRIES.get_or_init(|| {
        TypeKind::ALL.map(|kind| {
            let type_string = kind.descriptor().encode();
            let type_hash = selector(&type_string);
            Entry {
                type_string,
                type_hash,
            }
        })
    })
}

//! Golden type-hash vectors for deterministic verification.
//!
//! These vectors pin every type string this workspace hashes, so that any
//! other implementation (on-chain verifier, signing client) can check it
//! derives byte-identical schemas.

use serde::Serialize;

use permit_hash::{domain_type_hash, STARKNET_DOMAIN_TYPE};
use permit_hash_core::registry::U256_TYPE;
use permit_hash_core::{selector, Felt, Field, FieldType, TypeDescriptor, TypeKind};
use permit_hash_permits::{WitnessKind, WitnessTypeString};

/// Sample application witness: `"Order"("id":"felt","amount":"u256")`.
pub static ORDER_TYPE: TypeDescriptor<'static> = TypeDescriptor {
    name: "Order",
    fields: &[
        Field {
            name: "id",
            ty: FieldType::Primitive("felt"),
        },
        Field {
            name: "amount",
            ty: FieldType::Struct(&U256_TYPE),
        },
    ],
};

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The full canonical type string.
    pub type_string: String,
    /// Expected type hash (hex).
    pub expected_type_hash: &'static str,
}

impl GoldenVector {
    /// The type string's ASCII bytes, hex encoded.
    pub fn type_string_hex(&self) -> String {
        hex::encode(self.type_string.as_bytes())
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    let fixed = [
        (
            TypeKind::U256,
            "0x3b143be38b811560b45593fb2a071ec4ddd0a020e10782be62ffe6f39e0e82c",
        ),
        (
            TypeKind::TokenPermissions,
            "0x1e978de906cdaaca9731ee21b1d1900d35c08b485e472d1095ee283e6b94d9d",
        ),
        (
            TypeKind::PermitDetails,
            "0x10c3d6098f5ba8ee14e101dc4767cbbb34914ce38f036d5e9ca3667aba5dec0",
        ),
        (
            TypeKind::PermitSingle,
            "0xc7541b807a1156f4b132d94a2d299accce31a81f98b5accef4def6ff95b0a7",
        ),
        (
            TypeKind::PermitBatch,
            "0x3ed2f4cab78e16fb175d0603366ef24ac0a500200db7537671dc6fc22676dac",
        ),
        (
            TypeKind::PermitTransferFrom,
            "0x37e2436d7d01f165d7db2b3d49ef6fe56b0bc0220dd6ba3c8e3aff93f2a83fb",
        ),
        (
            TypeKind::PermitBatchTransferFrom,
            "0x44fddab63bf0cd6b762a3c22a1613ee41dd6af171ad0aea4377fc8a4c234b1",
        ),
    ];

    let mut vectors: Vec<GoldenVector> = fixed
        .into_iter()
        .map(|(kind, expected)| GoldenVector {
            name: kind.name(),
            type_string: kind.type_string().to_string(),
            expected_type_hash: expected,
        })
        .collect();

    vectors.push(GoldenVector {
        name: "StarknetDomain",
        type_string: STARKNET_DOMAIN_TYPE.encode(),
        expected_type_hash: "0x1ff2f602e42168014d405a94f75e8a93d640751d71d16311266e140d8b0a210",
    });
    vectors.push(witness_vector(
        WitnessKind::TransferFrom,
        "0xd4c21c6141be16e9afa8f23c935a921e7876b3a6abd921f6a8ca588c6fe251",
    ));
    vectors.push(witness_vector(
        WitnessKind::BatchTransferFrom,
        "0x30d1241d1a895355949bfe1a2a45c13d0d47d91b12efcaafa669faaed45fed7",
    ));

    vectors
}

fn witness_vector(kind: WitnessKind, expected: &'static str) -> GoldenVector {
    let fragment = WitnessTypeString::from_descriptor("witness", &ORDER_TYPE, kind);
    GoldenVector {
        name: kind.type_name(),
        type_string: format!("{}{}", kind.stub(), fragment.as_str()),
        expected_type_hash: expected,
    }
}

/// Compute the type hash of a vector's type string.
pub fn compute_type_hash(vector: &GoldenVector) -> Felt {
    selector(&vector.type_string)
}

/// Verify all golden vectors produce their pinned type hashes.
///
/// Returns `(name, matches, computed_hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let computed = compute_type_hash(v);
            let matches = Felt::from_hex(v.expected_type_hash).map_or(false, |e| e == computed);
            (v.name.to_string(), matches, felt_hex(computed))
        })
        .collect()
}

/// Serialize the vectors for publication.
pub fn vectors_json() -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct VectorFile {
        domain_type_hash: String,
        vectors: Vec<GoldenVector>,
    }

    serde_json::to_string_pretty(&VectorFile {
        domain_type_hash: felt_hex(domain_type_hash()),
        vectors: all_vectors(),
    })
}

fn felt_hex(felt: Felt) -> String {
    format!("{felt:#x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, hex) in verify_all_vectors() {
            assert!(matches, "vector {name} computed {hex}");
        }
    }

    #[test]
    fn test_fixed_vectors_match_registry() {
        for kind in TypeKind::ALL {
            let vector = all_vectors()
                .into_iter()
                .find(|v| v.name == kind.name())
                .unwrap();
            assert_eq!(
                Felt::from_hex(vector.expected_type_hash).unwrap(),
                kind.type_hash()
            );
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        for (i, a) in vectors.iter().enumerate() {
            for b in vectors.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
                assert_ne!(a.expected_type_hash, b.expected_type_hash);
            }
        }
    }

    #[test]
    fn test_witness_vector_type_strings() {
        let vectors = all_vectors();
        let single = vectors
            .iter()
            .find(|v| v.name == "PermitWitnessTransferFrom")
            .unwrap();
        assert!(single
            .type_string
            .ends_with(r#""Order"("id":"felt","amount":"u256")"#));
    }

    #[test]
    fn test_vectors_json() {
        let json = vectors_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["vectors"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_type_string_hex() {
        for v in all_vectors() {
            let bytes = hex::decode(v.type_string_hex()).unwrap();
            assert_eq!(bytes, v.type_string.as_bytes());
        }
    }
}

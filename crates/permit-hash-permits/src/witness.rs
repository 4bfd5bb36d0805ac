//! The witness extension.
//!
//! A witness lets an application bind its own structured data into a
//! transfer-from permit's signature. The application supplies two things:
//!
//! 1. a commitment: the already-hashed application data, and
//! 2. a type string fragment describing that data's shape.
//!
//! The fragment completes a fixed stub that declares the permit's own fields:
//!
//! ```text
//! "PermitWitnessTransferFrom"("permitted":"TokenPermissions",...,"deadline":"u256",
//!                                                               + "witness":"Order")"Order"(...)...
//! ```
//!
//! The witness type hash is `selector(stub || fragment)` and is computed on
//! every call: each application schema gets its own type hash, so it never
//! lives in the fixed registry.

use serde::{Deserialize, Serialize};
use std::fmt;

use permit_hash_core::{selector, CoreError, Felt, TypeDescriptor, TypeKind};

/// Stub for the single-token witness schema, up to the caller's fragment.
pub const PERMIT_WITNESS_TRANSFER_FROM_STUB: &str = concat!(
    r#""PermitWitnessTransferFrom"("#,
    r#""permitted":"TokenPermissions","spender":"ContractAddress","nonce":"felt","deadline":"u256","#,
);

/// Stub for the batch witness schema, up to the caller's fragment.
pub const PERMIT_BATCH_WITNESS_TRANSFER_FROM_STUB: &str = concat!(
    r#""PermitBatchWitnessTransferFrom"("#,
    r#""permitted":"TokenPermissions*","spender":"ContractAddress","nonce":"felt","deadline":"u256","#,
);

/// Which witness-extended schema a fragment completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WitnessKind {
    TransferFrom,
    BatchTransferFrom,
}

impl WitnessKind {
    /// The fixed prefix of the witness-extended descriptor.
    pub const fn stub(self) -> &'static str {
        match self {
            WitnessKind::TransferFrom => PERMIT_WITNESS_TRANSFER_FROM_STUB,
            WitnessKind::BatchTransferFrom => PERMIT_BATCH_WITNESS_TRANSFER_FROM_STUB,
        }
    }

    /// The witness-free schema this kind extends.
    pub const fn base(self) -> TypeKind {
        match self {
            WitnessKind::TransferFrom => TypeKind::PermitTransferFrom,
            WitnessKind::BatchTransferFrom => TypeKind::PermitBatchTransferFrom,
        }
    }

    /// The struct name of the witness-extended schema.
    pub const fn type_name(self) -> &'static str {
        match self {
            WitnessKind::TransferFrom => "PermitWitnessTransferFrom",
            WitnessKind::BatchTransferFrom => "PermitBatchWitnessTransferFrom",
        }
    }
}

/// Compute the type hash of a witness-extended schema.
///
/// Not memoized. The fragment is taken as given; validate it with
/// [`WitnessTypeString::new`] when it comes from an untrusted source.
pub fn witness_type_hash(kind: WitnessKind, fragment: &str) -> Felt {
    let mut type_string = String::with_capacity(kind.stub().len() + fragment.len());
    type_string.push_str(kind.stub());
    type_string.push_str(fragment);

    let type_hash = selector(&type_string);
    tracing::trace!(
        schema = kind.type_name(),
        type_hash = %format!("{:#x}", type_hash),
        "computed witness type hash"
    );
    type_hash
}

/// A validated witness type string fragment.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WitnessTypeString(String);

impl WitnessTypeString {
    /// Validate a caller-supplied fragment.
    ///
    /// The fragment must be non-empty ASCII, start with a quoted field name,
    /// close the stub's open parenthesis exactly once, and leave quotes and
    /// parentheses balanced.
    pub fn new(fragment: impl Into<String>) -> Result<Self, CoreError> {
        let fragment = fragment.into();
        validate_fragment(&fragment)?;
        Ok(Self(fragment))
    }

    /// Build the canonical fragment for a witness field of the given type.
    ///
    /// The result is `"field":"Type")` followed by the descriptors of every
    /// referenced struct in first-seen order: the permit's own dependencies
    /// first, then the witness type and whatever it adds. Prepending the stub
    /// yields exactly the descriptor of the fully declared struct.
    pub fn from_descriptor(
        field_name: &str,
        witness_type: &TypeDescriptor<'_>,
        kind: WitnessKind,
    ) -> Self {
        let mut out = String::new();
        out.push('"');
        out.push_str(field_name);
        out.push_str("\":\"");
        out.push_str(witness_type.name);
        out.push_str("\")");

        for dep in fragment_dependencies(kind.base().descriptor(), witness_type) {
            dep.write_header(&mut out);
        }
        Self(out)
    }

    /// The fragment text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The type hash this fragment produces for the given schema.
    pub fn type_hash(&self, kind: WitnessKind) -> Felt {
        witness_type_hash(kind, &self.0)
    }
}

fn fragment_dependencies<'a>(
    base: &'a TypeDescriptor<'a>,
    witness_type: &'a TypeDescriptor<'a>,
) -> Vec<&'a TypeDescriptor<'a>> {
    let mut seen = vec![base.name];
    let mut deps = Vec::new();
    base.collect_dependencies(&mut seen, &mut deps);

    if !seen.contains(&witness_type.name) {
        seen.push(witness_type.name);
        deps.push(witness_type);
        witness_type.collect_dependencies(&mut seen, &mut deps);
    }
    deps
}

fn validate_fragment(fragment: &str) -> Result<(), CoreError> {
    let invalid = |reason: &str| CoreError::InvalidWitnessTypeString(reason.to_string());

    if fragment.is_empty() {
        return Err(invalid("empty"));
    }
    if !fragment.is_ascii() {
        return Err(invalid("non-ASCII characters"));
    }
    if !fragment.starts_with('"') {
        return Err(invalid("must start with a quoted field name"));
    }
    if !fragment.ends_with(')') {
        return Err(invalid("must end with ')'"));
    }

    // The stub leaves one parenthesis open.
    let mut depth: u32 = 1;
    let mut in_quotes = false;
    let mut prev = None;
    for c in fragment.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            // A field list opens right after a quoted type name.
            '(' if !in_quotes && prev != Some('"') => {
                return Err(invalid("'(' must follow a quoted type name"));
            }
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| invalid("unbalanced ')'"))?;
            }
            _ => {}
        }
        prev = Some(c);
    }

    if in_quotes {
        return Err(invalid("unterminated quote"));
    }
    if depth != 0 {
        return Err(invalid("unbalanced '('"));
    }
    Ok(())
}

impl fmt::Debug for WitnessTypeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WitnessTypeString({})", self.0)
    }
}

impl fmt::Display for WitnessTypeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WitnessTypeString {
    type Error = CoreError;

    fn try_from(fragment: String) -> Result<Self, Self::Error> {
        Self::new(fragment)
    }
}

impl From<WitnessTypeString> for String {
    fn from(fragment: WitnessTypeString) -> Self {
        fragment.0
    }
}

impl AsRef<str> for WitnessTypeString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Application data bound into a transfer-from permit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    /// The application's own struct hash of the witness data.
    pub commitment: Felt,

    /// The shape of the witness data.
    pub type_string: WitnessTypeString,
}

impl Witness {
    /// Create a witness.
    pub fn new(commitment: Felt, type_string: WitnessTypeString) -> Self {
        Self {
            commitment,
            type_string,
        }
    }

    /// The type hash this witness produces for the given schema.
    pub fn type_hash(&self, kind: WitnessKind) -> Felt {
        self.type_string.type_hash(kind)
    }
}

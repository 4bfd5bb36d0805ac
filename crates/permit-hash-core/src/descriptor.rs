//! Canonical type descriptors.
//!
//! A descriptor encodes the shape of a struct as ASCII:
//!
//! ```text
//! "Name"("field1":"Type1","field2":"Type2",...)
//! ```
//!
//! followed by the descriptor of every struct it references, each exactly
//! once, in first-seen depth-first order. Array-of-struct fields append `*`
//! to the referenced type name.
//!
//! The encoding is what makes type hashes collision-free across schemas:
//! two structs hash with the same type hash only if their descriptors are
//! byte-identical, so field names, field order, and every nested shape are
//! all part of the commitment.

use starknet_types_core::felt::Felt;

use crate::crypto::selector;

/// The type of a single struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType<'a> {
    /// A primitive type name such as `felt`, `u128` or `ContractAddress`.
    Primitive(&'a str),

    /// A nested struct.
    Struct(&'a TypeDescriptor<'a>),

    /// An ordered array of structs.
    StructArray(&'a TypeDescriptor<'a>),
}

impl<'a> FieldType<'a> {
    /// The type name as it appears in the descriptor.
    pub fn type_name(&self) -> String {
        match self {
            FieldType::Primitive(name) => (*name).to_string(),
            FieldType::Struct(desc) => desc.name.to_string(),
            FieldType::StructArray(desc) => format!("{}*", desc.name),
        }
    }

    /// The struct this field references, if any.
    pub fn referenced(&self) -> Option<&'a TypeDescriptor<'a>> {
        match self {
            FieldType::Primitive(_) => None,
            FieldType::Struct(desc) | FieldType::StructArray(desc) => Some(*desc),
        }
    }
}

/// A named struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'a str,
    pub ty: FieldType<'a>,
}

impl<'a> Field<'a> {
    /// A primitive field.
    pub const fn primitive(name: &'a str, ty: &'a str) -> Self {
        Self {
            name,
            ty: FieldType::Primitive(ty),
        }
    }

    /// A nested struct field.
    pub const fn nested(name: &'a str, desc: &'a TypeDescriptor<'a>) -> Self {
        Self {
            name,
            ty: FieldType::Struct(desc),
        }
    }

    /// An array-of-struct field.
    pub const fn array(name: &'a str, desc: &'a TypeDescriptor<'a>) -> Self {
        Self {
            name,
            ty: FieldType::StructArray(desc),
        }
    }
}

/// The declared shape of a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor<'a> {
    pub name: &'a str,
    pub fields: &'a [Field<'a>],
}

impl<'a> TypeDescriptor<'a> {
    /// Create a descriptor.
    pub const fn new(name: &'a str, fields: &'a [Field<'a>]) -> Self {
        Self { name, fields }
    }

    /// Encode this struct alone, without its dependencies.
    pub fn encode_header(&self) -> String {
        let mut out = String::new();
        self.write_header(&mut out);
        out
    }

    /// Append `"Name"("field":"Type",...)` to `out`.
    pub fn write_header(&self, out: &mut String) {
        out.push('"');
        out.push_str(self.name);
        out.push_str("\"(");
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('"');
            out.push_str(field.name);
            out.push_str("\":\"");
            out.push_str(&field.ty.type_name());
            out.push('"');
        }
        out.push(')');
    }

    /// Referenced structs in first-seen depth-first order, excluding `self`.
    pub fn dependencies(&self) -> Vec<&'a TypeDescriptor<'a>> {
        let mut seen = vec![self.name];
        let mut deps = Vec::new();
        self.collect_dependencies(&mut seen, &mut deps);
        deps
    }

    /// Walk the fields of `self`, appending every struct whose name is not in
    /// `seen` to `deps` (and `seen`) before descending into it.
    pub fn collect_dependencies(
        &self,
        seen: &mut Vec<&'a str>,
        deps: &mut Vec<&'a TypeDescriptor<'a>>,
    ) {
        for field in self.fields {
            if let Some(dep) = field.ty.referenced() {
                if seen.contains(&dep.name) {
                    continue;
                }
                seen.push(dep.name);
                deps.push(dep);
                dep.collect_dependencies(seen, deps);
            }
        }
    }

    /// The full canonical descriptor: header followed by every dependency.
    pub fn encode(&self) -> String {
        let mut out = self.encode_header();
        for dep in self.dependencies() {
            dep.write_header(&mut out);
        }
        out
    }

    /// The selector of the full canonical descriptor.
    pub fn type_hash(&self) -> Felt {
        selector(&self.encode())
    }
}

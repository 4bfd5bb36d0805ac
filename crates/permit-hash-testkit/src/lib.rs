//! # Permit Hash Testkit
//!
//! Testing utilities for permit hashing.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Pinned type strings and type hashes for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors ensure every implementation derives identical schemas:
//!
//! ```rust
//! use permit_hash_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hex) in verify_all_vectors() {
//!     assert!(matches, "{name}: {hex}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use permit_hash_testkit::generators::{default_hasher, digest_from_params, DigestParams};
//!
//! proptest! {
//!     #[test]
//!     fn digest_is_deterministic(params: DigestParams) {
//!         let hasher = default_hasher();
//!         prop_assert_eq!(
//!             digest_from_params(&hasher, &params),
//!             digest_from_params(&hasher, &params)
//!         );
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use permit_hash_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let permit = fixture.make_transfer(0xA, 100, 1);
//! let digest = fixture.digest(&permit).unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{default_hasher, digest_from_params, DigestParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};

//! Domain separation.
//!
//! A [`Domain`] binds every message hash to one application, version and
//! chain. The domain hash is computed once when the domain is built; each
//! message hash then folds it together with the signer and the permit's
//! struct hash.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use permit_hash_core::{
    short_string, ContractAddress, CoreError, Felt, Field, FieldType, Sponge, TypeDescriptor,
};
use tracing::debug;

use crate::error::{HashError, Result};

/// Typed-data revision implemented by this crate.
pub const REVISION: u64 = 1;

/// Leading element of every message hash.
pub const MESSAGE_PREFIX: &str = "StarkNet Message";

/// Well-known chain ids, as short strings.
pub mod chain_id {
    pub const SN_MAIN: &str = "SN_MAIN";
    pub const SN_SEPOLIA: &str = "SN_SEPOLIA";
}

const SHORTSTRING: &str = "shortstring";

/// `"StarknetDomain"("name":"shortstring","version":"shortstring","chainId":"shortstring","revision":"shortstring")`
pub static STARKNET_DOMAIN_TYPE: TypeDescriptor<'static> = TypeDescriptor {
    name: "StarknetDomain",
    fields: &[
        Field {
            name: "name",
            ty: FieldType::Primitive(SHORTSTRING),
        },
        Field {
            name: "version",
            ty: FieldType::Primitive(SHORTSTRING),
        },
        Field {
            name: "chainId",
            ty: FieldType::Primitive(SHORTSTRING),
        },
        Field {
            name: "revision",
            ty: FieldType::Primitive(SHORTSTRING),
        },
    ],
};

/// Type hash of the domain struct.
pub fn domain_type_hash() -> Felt {
    static HASH: OnceLock<Felt> = OnceLock::new();
    *HASH.get_or_init(|| STARKNET_DOMAIN_TYPE.type_hash())
}

/// Parse a chain id from configuration.
///
/// `0x`-prefixed input is read as a hex field element. Anything else is a
/// symbolic id such as `SN_MAIN` and is encoded as a short string.
pub fn parse_chain_id(s: &str) -> Result<Felt> {
    if s.starts_with("0x") || s.starts_with("0X") {
        return Felt::from_hex(s)
            .map_err(|_| HashError::Core(CoreError::InvalidFelt(s.to_string())));
    }
    Ok(short_string(s)?)
}

/// Domain metadata as loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Application name, at most 31 ASCII bytes.
    pub name: String,

    /// Application version, at most 31 ASCII bytes.
    pub version: String,

    /// Hex field element or symbolic short string.
    pub chain_id: String,
}

impl DomainConfig {
    /// Create a domain configuration.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: chain_id.into(),
        }
    }

    /// Load a domain configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HashError::Config(e.to_string()))
    }

    /// Validate the configuration and build the domain.
    pub fn build(&self) -> Result<Domain> {
        Domain::new(&self.name, &self.version, parse_chain_id(&self.chain_id)?)
    }
}

/// A validated signing domain with its precomputed hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Domain {
    name: String,
    version: String,
    chain_id: Felt,
    hash: Felt,
    prefix: Felt,
}

impl Domain {
    /// Build a domain and compute its hash.
    pub fn new(name: &str, version: &str, chain_id: Felt) -> Result<Self> {
        let name_felt = short_string(name)?;
        let version_felt = short_string(version)?;

        let mut sponge = Sponge::new();
        sponge
            .absorb(domain_type_hash())
            .absorb(name_felt)
            .absorb(version_felt)
            .absorb(chain_id)
            .absorb(Felt::from(REVISION));
        let hash = sponge.finalize();

        debug!(
            domain_name = name,
            domain_version = version,
            chain_id = %format!("{chain_id:#x}"),
            hash = %format!("{hash:#x}"),
            "computed domain hash"
        );

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            chain_id,
            hash,
            prefix: short_string(MESSAGE_PREFIX)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn chain_id(&self) -> Felt {
        self.chain_id
    }

    pub fn revision(&self) -> u64 {
        REVISION
    }

    /// The domain separator.
    pub fn hash(&self) -> Felt {
        self.hash
    }

    /// Bind a struct commitment to this domain and a signer.
    pub fn message_hash(&self, struct_hash: Felt, signer: ContractAddress) -> Felt {
        let mut sponge = Sponge::new();
        sponge
            .absorb(self.prefix)
            .absorb(self.hash)
            .absorb(signer.as_felt())
            .absorb(struct_hash);
        sponge.finalize()
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("chain_id", &format_args!("{:#x}", self.chain_id))
            .field("revision", &REVISION)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permit_hash_core::{hash_many, selector};

    fn domain(chain: &str) -> Domain {
        Domain::new("Permit2", "1", short_string(chain).unwrap()).unwrap()
    }

    #[test]
    fn test_domain_type_string() {
        assert_eq!(
            STARKNET_DOMAIN_TYPE.encode(),
            r#""StarknetDomain"("name":"shortstring","version":"shortstring","chainId":"shortstring","revision":"shortstring")"#
        );
    }

    #[test]
    fn test_domain_type_hash_golden() {
        assert_eq!(
            domain_type_hash(),
            Felt::from_hex("0x1ff2f602e42168014d405a94f75e8a93d640751d71d16311266e140d8b0a210")
                .unwrap()
        );
        assert_eq!(domain_type_hash(), selector(&STARKNET_DOMAIN_TYPE.encode()));
    }

    #[test]
    fn test_domain_hash_layout() {
        let d = domain(chain_id::SN_MAIN);
        let expected = hash_many(&[
            domain_type_hash(),
            short_string("Permit2").unwrap(),
            short_string("1").unwrap(),
            short_string("SN_MAIN").unwrap(),
            Felt::ONE,
        ]);
        assert_eq!(d.hash(), expected);
        assert_eq!(d.revision(), 1);
        assert_eq!(Felt::from(d.revision()), Felt::ONE);
    }

    #[test]
    fn test_message_hash_layout() {
        let d = domain(chain_id::SN_SEPOLIA);
        let signer = ContractAddress::from(0x5161u128);
        let struct_hash = Felt::from(1234u16);

        let expected = hash_many(&[
            short_string(MESSAGE_PREFIX).unwrap(),
            d.hash(),
            signer.as_felt(),
            struct_hash,
        ]);
        assert_eq!(d.message_hash(struct_hash, signer), expected);
    }

    #[test]
    fn test_chain_separation() {
        let main = domain(chain_id::SN_MAIN);
        let sepolia = domain(chain_id::SN_SEPOLIA);
        let signer = ContractAddress::from(1u128);

        assert_ne!(main.hash(), sepolia.hash());
        assert_ne!(
            main.message_hash(Felt::ONE, signer),
            sepolia.message_hash(Felt::ONE, signer)
        );
    }

    #[test]
    fn test_name_and_version_separation() {
        let chain = short_string(chain_id::SN_MAIN).unwrap();
        let base = Domain::new("Permit2", "1", chain).unwrap();

        assert_ne!(base.hash(), Domain::new("Permit3", "1", chain).unwrap().hash());
        assert_ne!(base.hash(), Domain::new("Permit2", "2", chain).unwrap().hash());
    }

    #[test]
    fn test_signer_binding() {
        let d = domain(chain_id::SN_MAIN);
        assert_ne!(
            d.message_hash(Felt::ONE, ContractAddress::from(1u128)),
            d.message_hash(Felt::ONE, ContractAddress::from(2u128))
        );
    }

    #[test]
    fn test_parse_chain_id() {
        assert_eq!(
            parse_chain_id("SN_MAIN").unwrap(),
            Felt::from_hex("0x534e5f4d41494e").unwrap()
        );
        assert_eq!(
            parse_chain_id("0x534e5f4d41494e").unwrap(),
            parse_chain_id(chain_id::SN_MAIN).unwrap()
        );
        assert!(parse_chain_id("0xnothex").is_err());
        assert!(parse_chain_id("A_CHAIN_ID_THAT_IS_FAR_TOO_LONG_TO_FIT").is_err());
    }

    #[test]
    fn test_domain_rejects_long_name() {
        let name = "x".repeat(32);
        assert!(matches!(
            Domain::new(&name, "1", Felt::ONE),
            Err(HashError::Core(CoreError::ShortStringTooLong { .. }))
        ));
    }

    #[test]
    fn test_config_from_json() {
        let config =
            DomainConfig::from_json(r#"{"name":"Permit2","version":"1","chain_id":"SN_SEPOLIA"}"#)
                .unwrap();
        assert_eq!(config, DomainConfig::new("Permit2", "1", "SN_SEPOLIA"));
        assert_eq!(config.build().unwrap(), domain(chain_id::SN_SEPOLIA));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        assert!(matches!(
            DomainConfig::from_json(r#"{"name":"Permit2"}"#),
            Err(HashError::Config(_))
        ));
    }

    #[test]
    fn test_debug_shows_hex_chain_id() {
        let debug = format!("{:?}", domain(chain_id::SN_MAIN));
        assert!(debug.contains("0x534e5f4d41494e"));
    }
}

//! Strong type definitions for hashable values.
//!
//! Identifiers and wide integers are newtypes so an address can never be
//! passed where an amount is expected.

use primitive_types::U256 as WideU256;
use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Maximum length of a short string in bytes.
pub const SHORT_STRING_MAX_LEN: usize = 31;

/// An account or contract address.
///
/// Opaque: hashed as its raw field element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractAddress(pub Felt);

impl ContractAddress {
    /// Create from a field element.
    pub const fn from_felt(felt: Felt) -> Self {
        Self(felt)
    }

    /// Get the underlying field element.
    pub const fn as_felt(&self) -> Felt {
        self.0
    }

    /// Parse from a `0x`-prefixed hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        Felt::from_hex(s)
            .map(Self)
            .map_err(|_| CoreError::InvalidFelt(s.to_string()))
    }

    /// Convert to a `0x`-prefixed hex string without leading zeros.
    pub fn to_hex(&self) -> String {
        format!("{:#x}", self.0)
    }

    /// The zero address.
    pub const ZERO: Self = Self(Felt::ZERO);
}

impl fmt::Debug for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractAddress({})", self.to_hex())
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Felt> for ContractAddress {
    fn from(felt: Felt) -> Self {
        Self(felt)
    }
}

impl From<ContractAddress> for Felt {
    fn from(address: ContractAddress) -> Self {
        address.0
    }
}

impl From<u128> for ContractAddress {
    fn from(value: u128) -> Self {
        Self(Felt::from(value))
    }
}

/// A 256-bit unsigned integer stored as two 128-bit limbs.
///
/// The limb split is the hashing representation: a `U256` is hashed as the
/// struct `u256 { low, high }`. Parsing goes through [`primitive_types::U256`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct U256 {
    pub low: u128,
    pub high: u128,
}

impl U256 {
    /// Zero.
    pub const ZERO: Self = Self { low: 0, high: 0 };

    /// The largest representable value.
    pub const MAX: Self = Self {
        low: u128::MAX,
        high: u128::MAX,
    };

    /// Create from limbs.
    pub const fn from_limbs(low: u128, high: u128) -> Self {
        Self { low, high }
    }

    /// Create from a `u128` (high limb is zero).
    pub const fn from_u128(value: u128) -> Self {
        Self {
            low: value,
            high: 0,
        }
    }

    /// Check for zero.
    pub const fn is_zero(&self) -> bool {
        self.low == 0 && self.high == 0
    }

    /// Create from 32 big-endian bytes.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self::from(WideU256::from_big_endian(&bytes))
    }

    /// Convert to 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        WideU256::from(*self).to_big_endian(&mut out);
        out
    }

    /// Parse from a hex string, with or without `0x` prefix.
    ///
    /// Accepts up to 64 significant hex digits.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.is_empty() {
            return Err(CoreError::InvalidU256(s.to_string()));
        }

        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(Self::ZERO);
        }
        if significant.len() > 64 {
            return Err(CoreError::U256Overflow(s.to_string()));
        }

        WideU256::from_str_radix(significant, 16)
            .map(Self::from)
            .map_err(|_| CoreError::InvalidHex(s.to_string()))
    }

    /// Convert to a `0x`-prefixed, zero-padded 64 digit hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_be_bytes()))
    }

    /// Parse from a decimal string.
    pub fn from_dec_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(CoreError::InvalidU256(s.to_string()));
        }

        WideU256::from_dec_str(s).map(Self::from).map_err(|_| {
            // All digits and still rejected: the value does not fit.
            if s.bytes().all(|b| b.is_ascii_digit()) {
                CoreError::U256Overflow(s.to_string())
            } else {
                CoreError::InvalidU256(s.to_string())
            }
        })
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.high
            .cmp(&other.high)
            .then_with(|| self.low.cmp(&other.low))
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<WideU256> for U256 {
    fn from(value: WideU256) -> Self {
        let limbs = value.0;
        Self {
            low: u128::from(limbs[0]) | (u128::from(limbs[1]) << 64),
            high: u128::from(limbs[2]) | (u128::from(limbs[3]) << 64),
        }
    }
}

impl From<U256> for WideU256 {
    fn from(value: U256) -> Self {
        WideU256([
            value.low as u64,
            (value.low >> 64) as u64,
            value.high as u64,
            (value.high >> 64) as u64,
        ])
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256(low: {}, high: {})", self.low, self.high)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.high == 0 {
            write!(f, "{}", self.low)
        } else {
            f.write_str(&self.to_hex())
        }
    }
}

impl FromStr for U256 {
    type Err = CoreError;

    /// Hex if `0x`-prefixed, decimal otherwise.
    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(s)
        } else {
            Self::from_dec_str(s)
        }
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self::from_u128(u128::from(value))
    }
}

/// Pack an ASCII string of at most 31 bytes into one field element.
///
/// The bytes are read big-endian, so `"SN_MAIN"` becomes `0x534e5f4d41494e`.
pub fn short_string(s: &str) -> Result<Felt> {
    if !s.is_ascii() {
        return Err(CoreError::NonAsciiShortString(s.to_string()));
    }
    if s.len() > SHORT_STRING_MAX_LEN {
        return Err(CoreError::ShortStringTooLong {
            len: s.len(),
            max: SHORT_STRING_MAX_LEN,
        });
    }

    let mut bytes = [0u8; 32];
    bytes[32 - s.len()..].copy_from_slice(s.as_bytes());
    Ok(Felt::from_bytes_be(&bytes))
}

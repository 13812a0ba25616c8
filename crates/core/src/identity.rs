//! Identity - fixed-width signer identifier
//!
//! An `Identity` is the 20-byte public identifier derived from a signer's
//! secp256k1 key (keccak256 of the uncompressed public key, last 20 bytes).
//! The registry never interprets its internal structure beyond equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing an identity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid identity hex: {0}")]
    InvalidHex(String),
}

/// Fixed-width public identifier for a signer.
///
/// # Invariant
/// Only equality is meaningful. `Identity::ZERO` is the sentinel produced by
/// failed signature recovery and never belongs to a real signer.
///
/// # Example
/// ```
/// use cosign_core::Identity;
///
/// let id: Identity = "0x00112233445566778899aabbccddeeff00112233".parse().unwrap();
/// assert_eq!(id.to_string(), "0x00112233445566778899aabbccddeeff00112233");
/// assert!(!id.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity([u8; Identity::LEN]);

impl Identity {
    /// Width of an identity in bytes
    pub const LEN: usize = 20;

    /// All-zero sentinel identity (failed recovery)
    pub const ZERO: Self = Self([0u8; Self::LEN]);

    /// Create an identity from raw bytes
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Parse an identity from a hex string (with or without `0x` prefix)
    pub fn from_hex(s: &str) -> Result<Self, IdentityError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|e| IdentityError::InvalidHex(e.to_string()))?;
        let array: [u8; Self::LEN] =
            bytes
                .try_into()
                .map_err(|v: Vec<u8>| IdentityError::InvalidLength {
                    expected: Self::LEN,
                    actual: v.len(),
                })?;
        Ok(Self(array))
    }

    /// Raw bytes of the identity
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// True for the all-zero sentinel
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; Identity::LEN]> for Identity {
    fn from(bytes: [u8; Identity::LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> Self {
        id.to_string()
    }
}

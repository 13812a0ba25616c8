//! Digest types - fixed-width 32-byte hashes
//!
//! `ApprovalDigest` is the content digest and the unit of replay protection.
//! `SignedDigest` is the domain-separated digest actually checked against
//! signatures. They are distinct types so the two stages cannot be confused.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a digest
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    #[error("Digest must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid digest hex: {0}")]
    InvalidHex(String),
}

/// Width of a digest in bytes
pub const DIGEST_LEN: usize = 32;

fn parse_hex(s: &str) -> Result<[u8; DIGEST_LEN], DigestError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|e| DigestError::InvalidHex(e.to_string()))?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| DigestError::InvalidLength {
            expected: DIGEST_LEN,
            actual: v.len(),
        })
}

/// Content digest of an approval (keccak256 of title + description).
///
/// Approvals are keyed by this value: once a digest is approved it can never
/// be approved again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApprovalDigest([u8; DIGEST_LEN]);

/// Domain-separated digest verified against signatures.
///
/// Produced by wrapping an [`ApprovalDigest`] with the personal-signed-message
/// prefix; this is the value external signing tools actually sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SignedDigest([u8; DIGEST_LEN]);

macro_rules! digest_impls {
    ($name:ident) => {
        impl $name {
            /// Create a digest from raw bytes
            pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
                Self(bytes)
            }

            /// Parse from a hex string (with or without `0x` prefix)
            pub fn from_hex(s: &str) -> Result<Self, DigestError> {
                parse_hex(s).map(Self)
            }

            /// Raw bytes of the digest
            #[inline]
            pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = DigestError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<[u8; DIGEST_LEN]> for $name {
            fn from(bytes: [u8; DIGEST_LEN]) -> Self {
                Self(bytes)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DigestError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::from_hex(&s)
            }
        }

        impl From<$name> for String {
            fn from(digest: $name) -> Self {
                digest.to_string()
            }
        }
    };
}

digest_impls!(ApprovalDigest);
digest_impls!(SignedDigest);

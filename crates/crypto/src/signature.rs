//! Recoverable signatures and identity recovery
//!
//! Signatures are the 65-byte r||s||v format: 32-byte r, 32-byte s, one
//! recovery byte. Recovery is a total function over well-formed input:
//! a wrong-length blob fails fast, anything else recovers to *some* identity
//! (possibly the zero sentinel) which downstream membership checks reject.

use cosign_core::{Identity, SignedDigest};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Errors that can occur when parsing a signature
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Signature must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid signature hex: {0}")]
    InvalidHex(String),
}

/// A 65-byte recoverable ECDSA signature (r||s||v).
///
/// The recovery byte `v` accepts both the raw 0/1 encoding and the
/// wallet-convention 27/28 encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature([u8; RecoverableSignature::LEN]);

impl RecoverableSignature {
    /// Width of a recoverable signature in bytes
    pub const LEN: usize = 65;

    /// Parse a signature from raw bytes.
    ///
    /// Any length other than 65 is rejected here, before recovery is ever
    /// attempted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let array: [u8; Self::LEN] =
            bytes
                .try_into()
                .map_err(|_| SignatureError::InvalidLength {
                    expected: Self::LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(array))
    }

    /// Parse a signature from a hex string (with or without `0x` prefix)
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|e| SignatureError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Raw bytes of the signature
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// The raw recovery byte (last byte, unnormalized)
    pub const fn v(&self) -> u8 {
        self.0[Self::LEN - 1]
    }

    /// Recovery id with the 27/28 wallet offset normalized away
    fn recovery_id(&self) -> Option<RecoveryId> {
        let v = self.v();
        let normalized = if v >= 27 { v - 27 } else { v };
        RecoveryId::from_byte(normalized)
    }
}

impl std::fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Recover the signer identity from a signing digest and a signature.
///
/// Performs secp256k1 public-key recovery and derives the identity as the
/// last 20 bytes of keccak256(uncompressed public key). Total function:
/// malformed r/s/v values yield [`Identity::ZERO`] rather than an error, so
/// garbage signatures fall through to membership checks and are rejected
/// there.
pub fn recover_identity(signed: &SignedDigest, signature: &RecoverableSignature) -> Identity {
    let Some(recovery_id) = signature.recovery_id() else {
        return Identity::ZERO;
    };
    let Ok(rs) = Signature::from_slice(&signature.as_bytes()[..64]) else {
        return Identity::ZERO;
    };
    match VerifyingKey::recover_from_prehash(signed.as_bytes(), &rs, recovery_id) {
        Ok(key) => identity_from_key(&key),
        Err(_) => Identity::ZERO,
    }
}

/// Derive the 20-byte identity from a verifying key.
pub fn identity_from_key(key: &VerifyingKey) -> Identity {
    let point = key.to_encoded_point(false);
    // Skip the 0x04 uncompressed-point tag
    let hash: [u8; 32] = Keccak256::digest(&point.as_bytes()[1..]).into();
    let mut id = [0u8; Identity::LEN];
    id.copy_from_slice(&hash[12..]);
    Identity::from_bytes(id)
}

//! Development signer
//!
//! Approval signatures are normally produced by external wallet tooling; this
//! signer exists so that tests and the CLI dev commands can produce
//! signatures with the same 65-byte format. Secure key storage stays out of
//! scope.

use crate::signature::{identity_from_key, RecoverableSignature};
use cosign_core::{Identity, SignedDigest};
use k256::ecdsa::SigningKey;
use thiserror::Error;

/// Errors when constructing or using a signer
#[derive(Error, Debug)]
pub enum SignerError {
    #[error("Invalid key hex: {0}")]
    InvalidHex(String),

    #[error("Key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Signer producing recoverable secp256k1 signatures over signing digests.
pub struct ApprovalSigner {
    signing_key: SigningKey,
}

impl ApprovalSigner {
    /// Generate a new random signing key
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Create from a 32-byte hex-encoded seed
    pub fn from_hex(hex_seed: &str) -> Result<Self, SignerError> {
        let stripped = hex_seed.strip_prefix("0x").unwrap_or(hex_seed);
        let bytes = hex::decode(stripped).map_err(|e| SignerError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(SignerError::InvalidKeyLength(bytes.len()));
        }
        let signing_key =
            SigningKey::from_slice(&bytes).map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        Ok(Self { signing_key })
    }

    /// Export the seed as hex (for storage)
    pub fn seed_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// The identity this signer's signatures recover to
    pub fn identity(&self) -> Identity {
        identity_from_key(self.signing_key.verifying_key())
    }

    /// Sign a signing digest, producing the 65-byte r||s||v format.
    ///
    /// The recovery byte uses the wallet-convention 27/28 encoding.
    pub fn sign(&self, signed: &SignedDigest) -> Result<RecoverableSignature, SignerError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(signed.as_bytes())
            .map_err(|e| SignerError::Signing(e.to_string()))?;

        let mut bytes = [0u8; RecoverableSignature::LEN];
        bytes[..64].copy_from_slice(signature.to_bytes().as_ref());
        bytes[64] = recovery_id.to_byte() + 27;
        // 65 bytes by construction
        RecoverableSignature::from_bytes(&bytes).map_err(|e| SignerError::Signing(e.to_string()))
    }
}

//! Digest builder - deterministic content hashing
//!
//! The content digest is keccak256 over title and description concatenated
//! with no separator. The signing digest wraps the content digest with the
//! personal-signed-message prefix so that signatures produced by external
//! wallet tooling recover to the expected identity.

use cosign_core::{ApprovalDigest, SignedDigest};
use sha3::{Digest, Keccak256};

/// Domain-separation prefix for the signing digest.
///
/// Matches the personal-signed-message convention (`\x19` marker, fixed tag,
/// length of the 32-byte payload). Signatures produced by tooling that uses
/// this convention verify directly against [`wrap_for_signing`] output.
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute the content digest for an approval.
///
/// keccak256(title || description), no separator. Deterministic: the same
/// pair always yields the same digest.
///
/// # Boundary-injection risk
/// Because the strings are concatenated without a separator, content shifted
/// across the title/description boundary collides: `("ab", "c")` and
/// `("a", "bc")` produce the same digest. This matches the original system
/// and is intentional; callers that need to distinguish such pairs must do
/// so before hashing.
pub fn compute_digest(title: &str, description: &str) -> ApprovalDigest {
    let mut hasher = Keccak256::new();
    hasher.update(title.as_bytes());
    hasher.update(description.as_bytes());
    ApprovalDigest::from_bytes(hasher.finalize().into())
}

/// Wrap a content digest for signature verification.
///
/// keccak256(prefix || digest). This step is mandatory before recovery:
/// verifying a signature against the unwrapped digest recovers an unrelated
/// identity, not an error.
pub fn wrap_for_signing(digest: &ApprovalDigest) -> SignedDigest {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX);
    hasher.update(digest.as_bytes());
    SignedDigest::from_bytes(hasher.finalize().into())
}

//! CoSign Core - Domain types
//!
//! This crate contains the fundamental types used across CoSign:
//! - `Identity`: Opaque fixed-width signer identifier
//! - `ApprovalDigest` / `SignedDigest`: 32-byte content and signing digests

pub mod digest;
pub mod identity;

pub use digest::{ApprovalDigest, DigestError, SignedDigest, DIGEST_LEN};
pub use identity::{Identity, IdentityError};

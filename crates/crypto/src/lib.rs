//! CoSign Crypto - digests and recoverable signatures
//!
//! Everything here is pure and stateless: deterministic content hashing,
//! domain-separation wrapping, and identity recovery from 65-byte
//! r||s||v signatures.
//!
//! # Key functions
//! - `compute_digest`: keccak256 over title + description (no separator)
//! - `wrap_for_signing`: personal-signed-message wrapping, mandatory before recovery
//! - `recover_identity`: total function from (signing digest, signature) to identity

pub mod digest;
pub mod signature;
pub mod signer;

pub use digest::{compute_digest, wrap_for_signing, PERSONAL_MESSAGE_PREFIX};
pub use signature::{identity_from_key, recover_identity, RecoverableSignature, SignatureError};
pub use signer::{ApprovalSigner, SignerError};

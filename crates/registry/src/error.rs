//! Registry errors
//!
//! Every failure is explicit, synchronous, and terminal for the attempted
//! operation; no partial state change is ever left behind. Each kind carries
//! the context external tooling needs to react precisely.

use cosign_core::Identity;
use cosign_crypto::SignatureError;
use thiserror::Error;

/// Errors that can occur in registry and approval operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Access denied: {caller} is not an authorizer")]
    AccessDenied { caller: Identity },

    #[error("Domain already has a specialist: {domain}")]
    DomainOccupied { domain: String },

    #[error("Contact already in use: {contact}")]
    ContactTaken { contact: String },

    #[error("No specialist registered for domain: {domain}")]
    DomainNotFound { domain: String },

    #[error("No specialist assigned to domain: {domain}")]
    DomainNotAssigned { domain: String },

    #[error("Content already approved")]
    AlreadyApproved,

    #[error("Cannot remove the last authorizer: {identity}")]
    LastAuthorizer { identity: Identity },

    #[error("Authorizer signature invalid: recovered {recovered}")]
    InvalidAuthorizerSignature { recovered: Identity },

    #[error("Specialist signature invalid: recovered {recovered}, expected {expected}")]
    InvalidSpecialistSignature {
        recovered: Identity,
        expected: Identity,
    },

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

//! Registry events for audit-log consumption
//!
//! Every successful mutation emits exactly one event. Events are
//! self-contained: replaying a stored event stream through
//! [`crate::ApprovalRegistry::apply`] reconstructs the live state.

use cosign_core::Identity;
use serde::{Deserialize, Serialize};

/// Events emitted by the approval registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// An authorizer joined the registry
    AuthorizerAdded { identity: Identity, name: String },

    /// An authorizer was removed
    AuthorizerRemoved { identity: Identity },

    /// An authorizer's display name changed
    AuthorizerRenamed { identity: Identity, name: String },

    /// A specialist was registered for a domain
    SpecialistAdded {
        identity: Identity,
        name: String,
        domain: String,
        contact: String,
    },

    /// A specialist was removed, freeing its domain and contact
    SpecialistRemoved { domain: String },

    /// A specialist record was rewritten (possibly moving to a new domain)
    SpecialistUpdated {
        domain: String,
        new_domain: String,
        name: String,
        contact: String,
    },

    /// A job was approved by an authorizer and the domain's specialist
    JobApproved {
        title: String,
        description: String,
        domain: String,
        authorizer: Identity,
        specialist: Identity,
    },
}

impl RegistryEvent {
    pub fn authorizer_added(identity: Identity, name: impl Into<String>) -> Self {
        Self::AuthorizerAdded {
            identity,
            name: name.into(),
        }
    }

    pub fn authorizer_removed(identity: Identity) -> Self {
        Self::AuthorizerRemoved { identity }
    }

    pub fn authorizer_renamed(identity: Identity, name: impl Into<String>) -> Self {
        Self::AuthorizerRenamed {
            identity,
            name: name.into(),
        }
    }

    pub fn specialist_added(
        identity: Identity,
        name: impl Into<String>,
        domain: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self::SpecialistAdded {
            identity,
            name: name.into(),
            domain: domain.into(),
            contact: contact.into(),
        }
    }

    pub fn specialist_removed(domain: impl Into<String>) -> Self {
        Self::SpecialistRemoved {
            domain: domain.into(),
        }
    }

    pub fn specialist_updated(
        domain: impl Into<String>,
        new_domain: impl Into<String>,
        name: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self::SpecialistUpdated {
            domain: domain.into(),
            new_domain: new_domain.into(),
            name: name.into(),
            contact: contact.into(),
        }
    }

    pub fn job_approved(
        title: impl Into<String>,
        description: impl Into<String>,
        domain: impl Into<String>,
        authorizer: Identity,
        specialist: Identity,
    ) -> Self {
        Self::JobApproved {
            title: title.into(),
            description: description.into(),
            domain: domain.into(),
            authorizer,
            specialist,
        }
    }

    /// Short label for logs and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthorizerAdded { .. } => "authorizer-added",
            Self::AuthorizerRemoved { .. } => "authorizer-removed",
            Self::AuthorizerRenamed { .. } => "authorizer-renamed",
            Self::SpecialistAdded { .. } => "specialist-added",
            Self::SpecialistRemoved { .. } => "specialist-removed",
            Self::SpecialistUpdated { .. } => "specialist-updated",
            Self::JobApproved { .. } => "job-approved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_roundtrip() {
        let event = RegistryEvent::specialist_added(
            Identity::from_bytes([7u8; 20]),
            "Sam Vo",
            "IT",
            "sam@example.com",
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: RegistryEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_event_kind_labels() {
        let id = Identity::from_bytes([1u8; 20]);
        assert_eq!(
            RegistryEvent::authorizer_added(id, "A").kind(),
            "authorizer-added"
        );
        assert_eq!(
            RegistryEvent::job_approved("T", "D", "IT", id, id).kind(),
            "job-approved"
        );
    }
}

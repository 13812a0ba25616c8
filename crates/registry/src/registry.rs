//! Approval registry aggregate
//!
//! Owns the authorizer set, the specialist directory, and the approval
//! ledger as a single aggregate: there is no external mutation path. Every
//! mutating operation takes the caller's identity and is gated on current
//! authorizer membership (the seed authorizer supplied at construction
//! bootstraps the gate). Each successful mutation returns the event it
//! emits, so callers can forward events to an audit log.

use crate::authorizer::{AuthorizerRecord, AuthorizerSet};
use crate::error::RegistryError;
use crate::event::RegistryEvent;
use crate::ledger::ApprovalLedger;
use crate::specialist::{SpecialistDirectory, SpecialistRecord};
use cosign_core::Identity;
use cosign_crypto::{compute_digest, recover_identity, wrap_for_signing, RecoverableSignature};

/// Registry behavior toggles
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryConfig {
    /// When set, removing the last remaining authorizer fails with
    /// `LastAuthorizer` instead of permanently locking the registry.
    ///
    /// Off by default: the original system allows the set to empty out, after
    /// which every mutating call fails `AccessDenied` forever.
    pub forbid_empty_authorizers: bool,
}

/// The approval-registry aggregate.
pub struct ApprovalRegistry {
    config: RegistryConfig,
    authorizers: AuthorizerSet,
    specialists: SpecialistDirectory,
    ledger: ApprovalLedger,
}

impl ApprovalRegistry {
    /// Construct a registry seeded with its first authorizer.
    ///
    /// Returns the `AuthorizerAdded` event for the seed alongside the
    /// registry: callers that persist emitted events must log it, or replay
    /// will reconstruct a registry without its first authorizer.
    pub fn new(
        seed_identity: Identity,
        seed_name: impl Into<String>,
    ) -> (Self, RegistryEvent) {
        Self::with_config(seed_identity, seed_name, RegistryConfig::default())
    }

    /// Construct with explicit configuration.
    pub fn with_config(
        seed_identity: Identity,
        seed_name: impl Into<String>,
        config: RegistryConfig,
    ) -> (Self, RegistryEvent) {
        let mut registry = Self::empty(config);
        let name = seed_name.into();
        registry.authorizers.add(seed_identity, name.clone());
        (registry, RegistryEvent::authorizer_added(seed_identity, name))
    }

    /// An unseeded registry, for rebuilding state from an event stream via
    /// [`ApprovalRegistry::apply`]. Until an `AuthorizerAdded` event is
    /// applied, every mutating call fails `AccessDenied`.
    pub fn empty(config: RegistryConfig) -> Self {
        Self {
            config,
            authorizers: AuthorizerSet::new(),
            specialists: SpecialistDirectory::new(),
            ledger: ApprovalLedger::new(),
        }
    }

    fn require_authorizer(&self, caller: Identity) -> Result<(), RegistryError> {
        if self.authorizers.contains(&caller) {
            Ok(())
        } else {
            Err(RegistryError::AccessDenied { caller })
        }
    }

    // === Authorizer operations ===

    /// Add an authorizer. Caller must already be one.
    pub fn add_authorizer(
        &mut self,
        caller: Identity,
        identity: Identity,
        name: &str,
    ) -> Result<RegistryEvent, RegistryError> {
        self.require_authorizer(caller)?;
        self.authorizers.add(identity, name);
        Ok(RegistryEvent::authorizer_added(identity, name))
    }

    /// Remove an authorizer. Removing an absent identity is a silent no-op
    /// (`Ok(None)`), matching the original system.
    pub fn remove_authorizer(
        &mut self,
        caller: Identity,
        identity: Identity,
    ) -> Result<Option<RegistryEvent>, RegistryError> {
        self.require_authorizer(caller)?;

        if self.config.forbid_empty_authorizers
            && self.authorizers.len() == 1
            && self.authorizers.contains(&identity)
        {
            return Err(RegistryError::LastAuthorizer { identity });
        }

        if self.authorizers.remove(&identity) {
            Ok(Some(RegistryEvent::authorizer_removed(identity)))
        } else {
            tracing::warn!(%identity, "remove of absent authorizer ignored");
            Ok(None)
        }
    }

    /// Change an authorizer's display name; the identity is immutable.
    /// Renaming an absent identity is a silent no-op (`Ok(None)`).
    pub fn rename_authorizer(
        &mut self,
        caller: Identity,
        identity: Identity,
        name: &str,
    ) -> Result<Option<RegistryEvent>, RegistryError> {
        self.require_authorizer(caller)?;
        if self.authorizers.rename(&identity, name) {
            Ok(Some(RegistryEvent::authorizer_renamed(identity, name)))
        } else {
            tracing::warn!(%identity, "rename of absent authorizer ignored");
            Ok(None)
        }
    }

    /// Current authorizers, insertion-ordered up to swap-remove compaction
    pub fn authorizers(&self) -> &[AuthorizerRecord] {
        self.authorizers.list()
    }

    pub fn is_authorizer(&self, identity: &Identity) -> bool {
        self.authorizers.contains(identity)
    }

    // === Specialist operations ===

    /// Register a specialist for a domain. Domain slot and contact index are
    /// claimed together or not at all.
    pub fn add_specialist(
        &mut self,
        caller: Identity,
        identity: Identity,
        name: &str,
        domain: &str,
        contact: &str,
    ) -> Result<RegistryEvent, RegistryError> {
        self.require_authorizer(caller)?;
        self.specialists.add(SpecialistRecord {
            identity,
            name: name.to_string(),
            domain: domain.to_string(),
            contact: contact.to_string(),
        })?;
        Ok(RegistryEvent::specialist_added(identity, name, domain, contact))
    }

    /// Remove the specialist for a domain, freeing domain and contact.
    pub fn remove_specialist(
        &mut self,
        caller: Identity,
        domain: &str,
    ) -> Result<RegistryEvent, RegistryError> {
        self.require_authorizer(caller)?;
        let removed = self.specialists.remove(domain)?;
        Ok(RegistryEvent::specialist_removed(removed.domain))
    }

    /// Rewrite a specialist record, possibly moving it to a new domain key.
    pub fn update_specialist(
        &mut self,
        caller: Identity,
        domain: &str,
        new_name: &str,
        new_domain: &str,
        new_contact: &str,
    ) -> Result<RegistryEvent, RegistryError> {
        self.require_authorizer(caller)?;
        self.specialists
            .update(domain, new_name, new_domain, new_contact)?;
        Ok(RegistryEvent::specialist_updated(
            domain,
            new_domain,
            new_name,
            new_contact,
        ))
    }

    /// Current specialists in registration order
    pub fn specialists(&self) -> &[SpecialistRecord] {
        self.specialists.list()
    }

    pub fn specialist_for(&self, domain: &str) -> Option<&SpecialistRecord> {
        self.specialists.get(domain)
    }

    // === Approvals ===

    /// Verify both signatures over the content digest and mark it approved.
    ///
    /// Check order: structural signature errors first (wrong length fails
    /// before anything else), then specialist resolution, then the duplicate
    /// check (before paying for EC recovery), then the two membership
    /// checks. All-or-nothing: the digest is recorded only after every check
    /// passes.
    pub fn verify_and_approve(
        &mut self,
        title: &str,
        description: &str,
        domain: &str,
        authorizer_sig: &[u8],
        specialist_sig: &[u8],
    ) -> Result<RegistryEvent, RegistryError> {
        let authorizer_sig = RecoverableSignature::from_bytes(authorizer_sig)?;
        let specialist_sig = RecoverableSignature::from_bytes(specialist_sig)?;

        let expected_specialist = self
            .specialists
            .get(domain)
            .map(|record| record.identity)
            .ok_or_else(|| RegistryError::DomainNotAssigned {
                domain: domain.to_string(),
            })?;

        let digest = compute_digest(title, description);
        if self.ledger.is_approved(&digest) {
            return Err(RegistryError::AlreadyApproved);
        }

        let signing = wrap_for_signing(&digest);

        let authorizer = recover_identity(&signing, &authorizer_sig);
        if !self.authorizers.contains(&authorizer) {
            return Err(RegistryError::InvalidAuthorizerSignature {
                recovered: authorizer,
            });
        }

        let specialist = recover_identity(&signing, &specialist_sig);
        if specialist != expected_specialist {
            return Err(RegistryError::InvalidSpecialistSignature {
                recovered: specialist,
                expected: expected_specialist,
            });
        }

        self.ledger.record(digest)?;
        Ok(RegistryEvent::job_approved(
            title,
            description,
            domain,
            authorizer,
            specialist,
        ))
    }

    /// Whether this content has been approved. Pure read.
    pub fn is_approved(&self, title: &str, description: &str) -> bool {
        self.ledger.is_approved(&compute_digest(title, description))
    }

    /// Number of approved digests
    pub fn approvals(&self) -> usize {
        self.ledger.len()
    }

    // === Replay ===

    /// Apply an event from a trusted audit log, bypassing access control.
    ///
    /// Replaying the full event stream of a registry reconstructs its exact
    /// state. Errors surface only when the stream itself is inconsistent
    /// (e.g. a duplicate approval), which indicates a corrupted log.
    pub fn apply(&mut self, event: &RegistryEvent) -> Result<(), RegistryError> {
        match event {
            RegistryEvent::AuthorizerAdded { identity, name } => {
                self.authorizers.add(*identity, name.clone());
            }
            RegistryEvent::AuthorizerRemoved { identity } => {
                self.authorizers.remove(identity);
            }
            RegistryEvent::AuthorizerRenamed { identity, name } => {
                self.authorizers.rename(identity, name.clone());
            }
            RegistryEvent::SpecialistAdded {
                identity,
                name,
                domain,
                contact,
            } => {
                self.specialists.add(SpecialistRecord {
                    identity: *identity,
                    name: name.clone(),
                    domain: domain.clone(),
                    contact: contact.clone(),
                })?;
            }
            RegistryEvent::SpecialistRemoved { domain } => {
                self.specialists.remove(domain)?;
            }
            RegistryEvent::SpecialistUpdated {
                domain,
                new_domain,
                name,
                contact,
            } => {
                self.specialists.update(domain, name, new_domain, contact)?;
            }
            RegistryEvent::JobApproved {
                title, description, ..
            } => {
                self.ledger.record(compute_digest(title, description))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosign_crypto::ApprovalSigner;

    fn id(byte: u8) -> Identity {
        Identity::from_bytes([byte; 20])
    }

    struct Fixture {
        registry: ApprovalRegistry,
        admin: ApprovalSigner,
        specialist: ApprovalSigner,
    }

    /// Registry seeded with an admin authorizer and an IT specialist.
    fn fixture() -> Fixture {
        let admin = ApprovalSigner::generate();
        let specialist = ApprovalSigner::generate();

        let (mut registry, _seed) = ApprovalRegistry::new(admin.identity(), "Ada");
        registry
            .add_specialist(
                admin.identity(),
                specialist.identity(),
                "Sam",
                "IT",
                "sam@x.com",
            )
            .unwrap();

        Fixture {
            registry,
            admin,
            specialist,
        }
    }

    fn sign(signer: &ApprovalSigner, title: &str, description: &str) -> Vec<u8> {
        let signing = wrap_for_signing(&compute_digest(title, description));
        signer.sign(&signing).unwrap().as_bytes().to_vec()
    }

    #[test]
    fn test_seed_authorizer_bootstraps_access() {
        let seed = id(1);
        let (mut registry, event) = ApprovalRegistry::new(seed, "Ada");

        assert_eq!(event, RegistryEvent::authorizer_added(seed, "Ada"));
        assert!(registry.is_authorizer(&seed));
        registry.add_authorizer(seed, id(2), "Ben").unwrap();
        assert!(registry.is_authorizer(&id(2)));
    }

    #[test]
    fn test_non_authorizer_denied() {
        let (mut registry, _seed) = ApprovalRegistry::new(id(1), "Ada");

        let result = registry.add_authorizer(id(9), id(2), "Ben");
        assert_eq!(result, Err(RegistryError::AccessDenied { caller: id(9) }));

        let result = registry.add_specialist(id(9), id(3), "Sam", "IT", "s@x.com");
        assert_eq!(result, Err(RegistryError::AccessDenied { caller: id(9) }));
    }

    #[test]
    fn test_remove_absent_authorizer_is_silent() {
        let (mut registry, _seed) = ApprovalRegistry::new(id(1), "Ada");
        let event = registry.remove_authorizer(id(1), id(9)).unwrap();
        assert_eq!(event, None);
        assert_eq!(registry.authorizers().len(), 1);
    }

    #[test]
    fn test_removing_last_authorizer_locks_registry() {
        let (mut registry, _seed) = ApprovalRegistry::new(id(1), "Ada");

        let event = registry.remove_authorizer(id(1), id(1)).unwrap();
        assert_eq!(event, Some(RegistryEvent::authorizer_removed(id(1))));
        assert!(registry.authorizers().is_empty());

        // Nobody is left to authorize anything, including re-adding.
        let result = registry.add_authorizer(id(1), id(1), "Ada");
        assert_eq!(result, Err(RegistryError::AccessDenied { caller: id(1) }));
    }

    #[test]
    fn test_last_authorizer_guard_when_enabled() {
        let config = RegistryConfig {
            forbid_empty_authorizers: true,
        };
        let (mut registry, _seed) = ApprovalRegistry::with_config(id(1), "Ada", config);

        let result = registry.remove_authorizer(id(1), id(1));
        assert_eq!(result, Err(RegistryError::LastAuthorizer { identity: id(1) }));

        // With a second authorizer present, removal works again.
        registry.add_authorizer(id(1), id(2), "Ben").unwrap();
        registry.remove_authorizer(id(1), id(1)).unwrap();
        assert_eq!(registry.authorizers().len(), 1);
    }

    #[test]
    fn test_rename_authorizer() {
        let (mut registry, _seed) = ApprovalRegistry::new(id(1), "Ada");

        let event = registry.rename_authorizer(id(1), id(1), "Ada L.").unwrap();
        assert_eq!(
            event,
            Some(RegistryEvent::authorizer_renamed(id(1), "Ada L."))
        );
        assert_eq!(registry.authorizers()[0].name, "Ada L.");

        assert_eq!(registry.rename_authorizer(id(1), id(9), "X").unwrap(), None);
    }

    #[test]
    fn test_end_to_end_approval() {
        let mut fx = fixture();

        let auth_sig = sign(&fx.admin, "T", "D");
        let spec_sig = sign(&fx.specialist, "T", "D");

        let event = fx
            .registry
            .verify_and_approve("T", "D", "IT", &auth_sig, &spec_sig)
            .unwrap();
        assert_eq!(
            event,
            RegistryEvent::job_approved("T", "D", "IT", fx.admin.identity(), fx.specialist.identity())
        );
        assert!(fx.registry.is_approved("T", "D"));
        assert!(!fx.registry.is_approved("T", "other"));

        // Second submission replays the digest.
        let result = fx
            .registry
            .verify_and_approve("T", "D", "IT", &auth_sig, &spec_sig);
        assert_eq!(result, Err(RegistryError::AlreadyApproved));
    }

    #[test]
    fn test_unassigned_domain_fails_before_signatures() {
        let mut fx = fixture();

        // Signatures are deliberately garbage: the domain check fires first.
        let garbage = vec![0u8; 65];
        let result = fx
            .registry
            .verify_and_approve("T", "D", "Finance", &garbage, &garbage);
        assert_eq!(
            result,
            Err(RegistryError::DomainNotAssigned {
                domain: "Finance".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_length_signature_fails_first() {
        let mut fx = fixture();

        let result = fx
            .registry
            .verify_and_approve("T", "D", "Finance", &[0u8; 64], &[0u8; 65]);
        assert_eq!(
            result,
            Err(RegistryError::Signature(
                cosign_crypto::SignatureError::InvalidLength {
                    expected: 65,
                    actual: 64
                }
            ))
        );
    }

    #[test]
    fn test_outsider_authorizer_signature_rejected() {
        let mut fx = fixture();
        let outsider = ApprovalSigner::generate();

        let auth_sig = sign(&outsider, "T", "D");
        let spec_sig = sign(&fx.specialist, "T", "D");

        let result = fx
            .registry
            .verify_and_approve("T", "D", "IT", &auth_sig, &spec_sig);
        assert_eq!(
            result,
            Err(RegistryError::InvalidAuthorizerSignature {
                recovered: outsider.identity()
            })
        );
        assert!(!fx.registry.is_approved("T", "D"));
    }

    #[test]
    fn test_wrong_specialist_signature_rejected() {
        let mut fx = fixture();
        let outsider = ApprovalSigner::generate();

        let auth_sig = sign(&fx.admin, "T", "D");
        let spec_sig = sign(&outsider, "T", "D");

        let result = fx
            .registry
            .verify_and_approve("T", "D", "IT", &auth_sig, &spec_sig);
        assert_eq!(
            result,
            Err(RegistryError::InvalidSpecialistSignature {
                recovered: outsider.identity(),
                expected: fx.specialist.identity()
            })
        );
    }

    #[test]
    fn test_garbage_signature_recovers_to_nonmember() {
        let mut fx = fixture();

        let mut garbage = vec![1u8; 65];
        garbage[64] = 27;
        let spec_sig = sign(&fx.specialist, "T", "D");

        let result = fx
            .registry
            .verify_and_approve("T", "D", "IT", &garbage, &spec_sig);
        assert!(matches!(
            result,
            Err(RegistryError::InvalidAuthorizerSignature { .. })
        ));
    }

    #[test]
    fn test_approval_collides_across_domains() {
        let mut fx = fixture();
        let other_specialist = ApprovalSigner::generate();
        fx.registry
            .add_specialist(
                fx.admin.identity(),
                other_specialist.identity(),
                "Fin",
                "Finance",
                "fin@x.com",
            )
            .unwrap();

        let auth_sig = sign(&fx.admin, "T", "D");
        let spec_sig = sign(&fx.specialist, "T", "D");
        fx.registry
            .verify_and_approve("T", "D", "IT", &auth_sig, &spec_sig)
            .unwrap();

        // The digest covers content only: identical content under a second
        // domain is already approved, even with that domain's specialist.
        let fin_sig = sign(&other_specialist, "T", "D");
        let result = fx
            .registry
            .verify_and_approve("T", "D", "Finance", &auth_sig, &fin_sig);
        assert_eq!(result, Err(RegistryError::AlreadyApproved));
    }

    #[test]
    fn test_approval_after_specialist_domain_move() {
        let mut fx = fixture();

        fx.registry
            .update_specialist(fx.admin.identity(), "IT", "Sam", "Support", "sam@x.com")
            .unwrap();

        let auth_sig = sign(&fx.admin, "T", "D");
        let spec_sig = sign(&fx.specialist, "T", "D");

        // Old key no longer resolves.
        let result = fx
            .registry
            .verify_and_approve("T", "D", "IT", &auth_sig, &spec_sig);
        assert_eq!(
            result,
            Err(RegistryError::DomainNotAssigned {
                domain: "IT".to_string()
            })
        );

        // New key resolves to the same identity, so the same signature works.
        fx.registry
            .verify_and_approve("T", "D", "Support", &auth_sig, &spec_sig)
            .unwrap();
        assert!(fx.registry.is_approved("T", "D"));
    }

    #[test]
    fn test_replay_of_returned_events_reconstructs_state() {
        let admin = ApprovalSigner::generate();
        let specialist = ApprovalSigner::generate();

        // Every event in the stream comes from the API, the seed included.
        let (mut registry, seed) = ApprovalRegistry::new(admin.identity(), "Ada");
        let mut events = vec![seed];
        events.push(
            registry
                .add_specialist(
                    admin.identity(),
                    specialist.identity(),
                    "Sam",
                    "IT",
                    "sam@x.com",
                )
                .unwrap(),
        );

        let auth_sig = sign(&admin, "T", "D");
        let spec_sig = sign(&specialist, "T", "D");
        events.push(
            registry
                .verify_and_approve("T", "D", "IT", &auth_sig, &spec_sig)
                .unwrap(),
        );
        events.push(
            registry
                .rename_authorizer(admin.identity(), admin.identity(), "Ada L.")
                .unwrap()
                .unwrap(),
        );

        let mut rebuilt = ApprovalRegistry::empty(RegistryConfig::default());
        for event in &events {
            rebuilt.apply(event).unwrap();
        }

        assert_eq!(rebuilt.authorizers(), registry.authorizers());
        assert!(rebuilt.is_authorizer(&admin.identity()));
        assert_eq!(rebuilt.specialists(), registry.specialists());
        assert!(rebuilt.is_approved("T", "D"));
        assert_eq!(rebuilt.approvals(), registry.approvals());
    }
}

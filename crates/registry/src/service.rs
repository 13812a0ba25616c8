//! Shared registry handle - serialized mutation, snapshot reads
//!
//! Every mutating operation goes through a single writer lock, so the
//! duplicate-approval check and the subsequent recording are one atomic
//! step (no TOCTOU window). Read operations share the read lock and observe
//! a consistent snapshot. No operation holds the lock across I/O; every call
//! is a bounded, synchronous computation.

use crate::error::RegistryError;
use crate::event::RegistryEvent;
use crate::registry::ApprovalRegistry;
use crate::specialist::SpecialistRecord;
use crate::AuthorizerRecord;
use cosign_core::Identity;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe handle around an [`ApprovalRegistry`].
///
/// Cloning is cheap; all clones share the same underlying state.
#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<ApprovalRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: ApprovalRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    // A panicked writer can only have poisoned the lock between check and
    // mutate of an all-or-nothing operation; the state itself stays valid.
    fn write(&self) -> RwLockWriteGuard<'_, ApprovalRegistry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, ApprovalRegistry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_authorizer(
        &self,
        caller: Identity,
        identity: Identity,
        name: &str,
    ) -> Result<RegistryEvent, RegistryError> {
        let result = self.write().add_authorizer(caller, identity, name);
        self.trace("add_authorizer", &result);
        result
    }

    pub fn remove_authorizer(
        &self,
        caller: Identity,
        identity: Identity,
    ) -> Result<Option<RegistryEvent>, RegistryError> {
        let result = self.write().remove_authorizer(caller, identity);
        if let Err(ref error) = result {
            tracing::warn!(op = "remove_authorizer", %error, "registry operation denied");
        }
        result
    }

    pub fn rename_authorizer(
        &self,
        caller: Identity,
        identity: Identity,
        name: &str,
    ) -> Result<Option<RegistryEvent>, RegistryError> {
        let result = self.write().rename_authorizer(caller, identity, name);
        if let Err(ref error) = result {
            tracing::warn!(op = "rename_authorizer", %error, "registry operation denied");
        }
        result
    }

    pub fn add_specialist(
        &self,
        caller: Identity,
        identity: Identity,
        name: &str,
        domain: &str,
        contact: &str,
    ) -> Result<RegistryEvent, RegistryError> {
        let result = self
            .write()
            .add_specialist(caller, identity, name, domain, contact);
        self.trace("add_specialist", &result);
        result
    }

    pub fn remove_specialist(
        &self,
        caller: Identity,
        domain: &str,
    ) -> Result<RegistryEvent, RegistryError> {
        let result = self.write().remove_specialist(caller, domain);
        self.trace("remove_specialist", &result);
        result
    }

    pub fn update_specialist(
        &self,
        caller: Identity,
        domain: &str,
        new_name: &str,
        new_domain: &str,
        new_contact: &str,
    ) -> Result<RegistryEvent, RegistryError> {
        let result =
            self.write()
                .update_specialist(caller, domain, new_name, new_domain, new_contact);
        self.trace("update_specialist", &result);
        result
    }

    /// Atomic verify-and-approve: the duplicate check and the recording
    /// happen under one writer lock.
    pub fn verify_and_approve(
        &self,
        title: &str,
        description: &str,
        domain: &str,
        authorizer_sig: &[u8],
        specialist_sig: &[u8],
    ) -> Result<RegistryEvent, RegistryError> {
        let result = self.write().verify_and_approve(
            title,
            description,
            domain,
            authorizer_sig,
            specialist_sig,
        );
        self.trace("verify_and_approve", &result);
        result
    }

    // === Snapshot reads ===

    pub fn authorizers(&self) -> Vec<AuthorizerRecord> {
        self.read().authorizers().to_vec()
    }

    pub fn specialists(&self) -> Vec<SpecialistRecord> {
        self.read().specialists().to_vec()
    }

    pub fn specialist_for(&self, domain: &str) -> Option<SpecialistRecord> {
        self.read().specialist_for(domain).cloned()
    }

    pub fn is_authorizer(&self, identity: &Identity) -> bool {
        self.read().is_authorizer(identity)
    }

    pub fn is_approved(&self, title: &str, description: &str) -> bool {
        self.read().is_approved(title, description)
    }

    fn trace(&self, op: &'static str, result: &Result<RegistryEvent, RegistryError>) {
        match result {
            Ok(event) => tracing::info!(op, kind = event.kind(), "registry state changed"),
            Err(error) => tracing::warn!(op, %error, "registry operation denied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosign_crypto::{compute_digest, wrap_for_signing, ApprovalSigner};
    use std::thread;

    #[test]
    fn test_shared_reads_and_writes() {
        let admin = ApprovalSigner::generate();
        let (registry, _seed) = ApprovalRegistry::new(admin.identity(), "Ada");
        let shared = SharedRegistry::new(registry);

        shared
            .add_specialist(
                admin.identity(),
                Identity::from_bytes([2u8; 20]),
                "Sam",
                "IT",
                "sam@x.com",
            )
            .unwrap();

        assert_eq!(shared.authorizers().len(), 1);
        assert_eq!(shared.specialist_for("IT").unwrap().name, "Sam");
        assert!(shared.is_authorizer(&admin.identity()));
    }

    #[test]
    fn test_concurrent_approvals_hit_at_most_once() {
        let admin = ApprovalSigner::generate();
        let specialist = ApprovalSigner::generate();
        let (registry, _seed) = ApprovalRegistry::new(admin.identity(), "Ada");
        let shared = SharedRegistry::new(registry);
        shared
            .add_specialist(
                admin.identity(),
                specialist.identity(),
                "Sam",
                "IT",
                "sam@x.com",
            )
            .unwrap();

        let signing = wrap_for_signing(&compute_digest("T", "D"));
        let auth_sig = admin.sign(&signing).unwrap().as_bytes().to_vec();
        let spec_sig = specialist.sign(&signing).unwrap().as_bytes().to_vec();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                let auth_sig = auth_sig.clone();
                let spec_sig = spec_sig.clone();
                thread::spawn(move || {
                    shared
                        .verify_and_approve("T", "D", "IT", &auth_sig, &spec_sig)
                        .is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|approved| *approved)
            .count();
        assert_eq!(successes, 1);
        assert!(shared.is_approved("T", "D"));
    }
}

//! Authorizer set - the identities allowed to mutate the registry
//!
//! Kept as an ordered sequence with linear membership scans: authorizer sets
//! are expected to stay small, and the representation is isolated behind this
//! API so it can be swapped if scale ever demands it.

use cosign_core::Identity;
use serde::{Deserialize, Serialize};

/// A registered authorizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizerRecord {
    pub identity: Identity,
    pub name: String,
}

/// Ordered collection of authorizers.
///
/// Insertion order is preserved until a removal: removal is swap-based and
/// does not preserve order. No caller may depend on order beyond "currently
/// present".
#[derive(Debug, Clone, Default)]
pub struct AuthorizerSet {
    records: Vec<AuthorizerRecord>,
}

impl AuthorizerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Linear membership scan
    pub fn contains(&self, identity: &Identity) -> bool {
        self.records.iter().any(|r| r.identity == *identity)
    }

    /// Append an authorizer. Duplicate identities are not rejected here;
    /// the aggregate decides whether to allow them.
    pub fn add(&mut self, identity: Identity, name: impl Into<String>) {
        self.records.push(AuthorizerRecord {
            identity,
            name: name.into(),
        });
    }

    /// Remove the first record matching `identity` via swap-remove.
    ///
    /// Returns false when the identity is absent; removal of an absent
    /// identity is deliberately a silent no-op.
    pub fn remove(&mut self, identity: &Identity) -> bool {
        match self.records.iter().position(|r| r.identity == *identity) {
            Some(index) => {
                self.records.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Change the display name of an authorizer. The identity itself is
    /// immutable. Returns false when the identity is absent.
    pub fn rename(&mut self, identity: &Identity, name: impl Into<String>) -> bool {
        match self.records.iter_mut().find(|r| r.identity == *identity) {
            Some(record) => {
                record.name = name.into();
                true
            }
            None => false,
        }
    }

    /// All current authorizers
    pub fn list(&self) -> &[AuthorizerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> Identity {
        Identity::from_bytes([byte; 20])
    }

    #[test]
    fn test_add_and_contains() {
        let mut set = AuthorizerSet::new();
        set.add(id(1), "Ana");
        set.add(id(2), "Ben");

        assert!(set.contains(&id(1)));
        assert!(set.contains(&id(2)));
        assert!(!set.contains(&id(3)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut set = AuthorizerSet::new();
        set.add(id(1), "Ana");

        assert!(!set.remove(&id(9)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_swap_remove_loses_order() {
        let mut set = AuthorizerSet::new();
        set.add(id(1), "Ana");
        set.add(id(2), "Ben");
        set.add(id(3), "Cyd");

        assert!(set.remove(&id(1)));

        // The last record moved into the removed slot.
        let names: Vec<&str> = set.list().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cyd", "Ben"]);
        assert!(!set.contains(&id(1)));
    }

    #[test]
    fn test_rename_keeps_identity() {
        let mut set = AuthorizerSet::new();
        set.add(id(1), "Ana");

        assert!(set.rename(&id(1), "Ana Q."));
        assert_eq!(set.list()[0].name, "Ana Q.");
        assert_eq!(set.list()[0].identity, id(1));

        assert!(!set.rename(&id(9), "Nobody"));
    }

    #[test]
    fn test_can_become_empty() {
        let mut set = AuthorizerSet::new();
        set.add(id(1), "Ana");
        assert!(set.remove(&id(1)));
        assert!(set.is_empty());
    }
}

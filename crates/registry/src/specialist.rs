//! Specialist directory - one specialist per domain type
//!
//! Records live in registration order (compacted by swap-remove) and are
//! keyed by their domain string. A separate contact index enforces global
//! contact uniqueness.
//!
//! # Invariant
//! A contact is in the index if and only if some live record holds it. Every
//! mutation validates first and then updates record and index together, so
//! the two structures never diverge.

use crate::error::RegistryError;
use cosign_core::Identity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A registered domain specialist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistRecord {
    pub identity: Identity,
    pub name: String,
    /// Domain type key; at most one specialist per domain
    pub domain: String,
    /// Contact identifier, globally unique across all specialists
    pub contact: String,
}

/// Directory of specialists keyed by domain type.
#[derive(Debug, Clone, Default)]
pub struct SpecialistDirectory {
    records: Vec<SpecialistRecord>,
    contacts: HashSet<String>,
}

impl SpecialistDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, domain: &str) -> Option<usize> {
        self.records.iter().position(|r| r.domain == domain)
    }

    /// The specialist registered for `domain`, if any
    pub fn get(&self, domain: &str) -> Option<&SpecialistRecord> {
        self.records.iter().find(|r| r.domain == domain)
    }

    /// Whether a contact identifier is currently claimed
    pub fn contact_in_use(&self, contact: &str) -> bool {
        self.contacts.contains(contact)
    }

    /// Register a specialist. Fails if the domain already has one or the
    /// contact is already claimed; on failure nothing changes.
    pub fn add(&mut self, record: SpecialistRecord) -> Result<(), RegistryError> {
        if self.position(&record.domain).is_some() {
            return Err(RegistryError::DomainOccupied {
                domain: record.domain,
            });
        }
        if self.contacts.contains(&record.contact) {
            return Err(RegistryError::ContactTaken {
                contact: record.contact,
            });
        }

        self.contacts.insert(record.contact.clone());
        self.records.push(record);
        Ok(())
    }

    /// Remove the specialist for `domain`, freeing the domain slot and the
    /// contact together. Swap-remove: registration order is not preserved.
    pub fn remove(&mut self, domain: &str) -> Result<SpecialistRecord, RegistryError> {
        let index = self
            .position(domain)
            .ok_or_else(|| RegistryError::DomainNotFound {
                domain: domain.to_string(),
            })?;

        let record = self.records.swap_remove(index);
        self.contacts.remove(&record.contact);
        Ok(record)
    }

    /// Rewrite the specialist for `domain`: name, contact, and possibly the
    /// domain key itself. A combined rename-and-update; on a domain move the
    /// old key retains nothing.
    ///
    /// Fails `DomainNotFound` if `domain` is unassigned, `ContactTaken` if
    /// the new contact differs from the current one and is claimed elsewhere,
    /// and `DomainOccupied` if the new domain key is held by another record.
    pub fn update(
        &mut self,
        domain: &str,
        new_name: &str,
        new_domain: &str,
        new_contact: &str,
    ) -> Result<&SpecialistRecord, RegistryError> {
        let index = self
            .position(domain)
            .ok_or_else(|| RegistryError::DomainNotFound {
                domain: domain.to_string(),
            })?;

        if new_contact != self.records[index].contact && self.contacts.contains(new_contact) {
            return Err(RegistryError::ContactTaken {
                contact: new_contact.to_string(),
            });
        }
        if new_domain != domain && self.position(new_domain).is_some() {
            return Err(RegistryError::DomainOccupied {
                domain: new_domain.to_string(),
            });
        }

        let record = &mut self.records[index];
        self.contacts.remove(&record.contact);
        self.contacts.insert(new_contact.to_string());
        record.name = new_name.to_string();
        record.domain = new_domain.to_string();
        record.contact = new_contact.to_string();
        Ok(&self.records[index])
    }

    /// All specialists in registration order (as compacted by removals)
    pub fn list(&self) -> &[SpecialistRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

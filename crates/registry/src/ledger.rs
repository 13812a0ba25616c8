//! Approval ledger - at-most-once approval per content digest
//!
//! Per-digest state machine: Unseen → Approved, terminal. There is no
//! un-approve operation; entries are created exactly once and never removed.

use crate::error::RegistryError;
use cosign_core::ApprovalDigest;
use std::collections::HashSet;

/// Set of approved content digests.
///
/// The digest covers title and description only (no domain type), so
/// identical content approved under one domain is indistinguishable from the
/// same content under another. That behavior comes from the original system
/// and is preserved here.
#[derive(Debug, Clone, Default)]
pub struct ApprovalLedger {
    approved: HashSet<ApprovalDigest>,
}

impl ApprovalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a digest approved. Fails `AlreadyApproved` on replay.
    pub fn record(&mut self, digest: ApprovalDigest) -> Result<(), RegistryError> {
        if !self.approved.insert(digest) {
            return Err(RegistryError::AlreadyApproved);
        }
        Ok(())
    }

    /// Pure read of a digest's approval flag
    pub fn is_approved(&self, digest: &ApprovalDigest) -> bool {
        self.approved.contains(digest)
    }

    /// Number of approved digests
    pub fn len(&self) -> usize {
        self.approved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(byte: u8) -> ApprovalDigest {
        ApprovalDigest::from_bytes([byte; 32])
    }

    #[test]
    fn test_record_once() {
        let mut ledger = ApprovalLedger::new();
        assert!(!ledger.is_approved(&digest(1)));

        ledger.record(digest(1)).unwrap();
        assert!(ledger.is_approved(&digest(1)));
        assert!(!ledger.is_approved(&digest(2)));
    }

    #[test]
    fn test_replay_rejected() {
        let mut ledger = ApprovalLedger::new();
        ledger.record(digest(1)).unwrap();

        assert_eq!(ledger.record(digest(1)), Err(RegistryError::AlreadyApproved));
        assert_eq!(ledger.len(), 1);
    }
}

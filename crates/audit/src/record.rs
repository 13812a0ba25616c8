//! Audit record - one registry event with its commit timestamp

use chrono::{DateTime, Utc};
use cosign_registry::RegistryEvent;
use serde::{Deserialize, Serialize};

/// A single line of the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the event was committed
    pub timestamp: DateTime<Utc>,

    /// The emitted registry event
    pub event: RegistryEvent,
}

impl AuditRecord {
    /// Stamp an event with the current time
    pub fn now(event: RegistryEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

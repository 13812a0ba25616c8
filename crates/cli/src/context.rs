//! Application context - wires the audit log to registry state
//!
//! CLI invocations are one-shot: each run replays the audit log to rebuild
//! the registry, performs its operation, and appends the emitted event.

use anyhow::Context;
use cosign_audit::{AuditLog, AuditReader, AuditRecord};
use cosign_core::Identity;
use cosign_registry::{ApprovalRegistry, RegistryConfig, RegistryEvent};
use std::path::{Path, PathBuf};

/// Application context for one CLI invocation
pub struct AppContext {
    registry: ApprovalRegistry,
    log: AuditLog,
    audit_path: PathBuf,
    initialized: bool,
}

impl AppContext {
    /// Open the data directory and rebuild registry state from the audit log
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let audit_path = data_dir.as_ref().join("audit");

        let reader = AuditReader::from_directory(&audit_path)?;
        let records = reader.read_all().context("replaying audit log")?;
        let initialized = !records.is_empty();

        let mut registry = ApprovalRegistry::empty(RegistryConfig::default());
        for record in &records {
            registry
                .apply(&record.event)
                .with_context(|| format!("inconsistent audit log ({})", record.event.kind()))?;
        }

        let log = AuditLog::open(&audit_path)?;

        Ok(Self {
            registry,
            log,
            audit_path,
            initialized,
        })
    }

    /// Whether the registry has been seeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Seed the registry with its first authorizer
    pub fn init(&mut self, identity: Identity, name: &str) -> Result<(), anyhow::Error> {
        if self.initialized {
            anyhow::bail!("registry already initialized");
        }

        let event = RegistryEvent::authorizer_added(identity, name);
        self.registry
            .apply(&event)
            .context("seeding the registry")?;
        self.log.append(event)?;
        self.initialized = true;
        Ok(())
    }

    /// The live registry state
    pub fn registry(&self) -> &ApprovalRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ApprovalRegistry {
        &mut self.registry
    }

    /// Persist an emitted event to the audit log
    pub fn commit(&mut self, event: RegistryEvent) -> Result<AuditRecord, anyhow::Error> {
        Ok(self.log.append(event)?)
    }

    /// All audit records on disk (re-read, not the in-memory state)
    pub fn audit_records(&self) -> Result<Vec<AuditRecord>, anyhow::Error> {
        let reader = AuditReader::from_directory(&self.audit_path)?;
        Ok(reader.read_all()?)
    }
}

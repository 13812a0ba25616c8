//! CoSign Audit - JSONL audit log
//!
//! Persists every emitted registry event as one JSON line. The log is the
//! source of truth for CLI deployments: replaying it through
//! `ApprovalRegistry::apply` reconstructs the live state.

pub mod error;
pub mod reader;
pub mod record;
pub mod store;

pub use error::AuditError;
pub use reader::AuditReader;
pub use record::AuditRecord;
pub use store::AuditLog;

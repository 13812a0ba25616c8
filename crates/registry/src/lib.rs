//! CoSign Registry - dual-signature approval core
//!
//! This is the HEART of CoSign. All role and approval state changes go
//! through this crate.
//!
//! # Key Types
//! - `ApprovalRegistry`: the owned aggregate (authorizers, specialists, ledger)
//! - `SharedRegistry`: thread-safe handle with serialized mutation
//! - `RegistryEvent`: one event per successful mutation, for audit logs
//! - `RegistryError`: the closed failure taxonomy

pub mod authorizer;
pub mod error;
pub mod event;
pub mod ledger;
pub mod registry;
pub mod service;
pub mod specialist;

pub use authorizer::{AuthorizerRecord, AuthorizerSet};
pub use error::RegistryError;
pub use event::RegistryEvent;
pub use ledger::ApprovalLedger;
pub use registry::{ApprovalRegistry, RegistryConfig};
pub use service::SharedRegistry;
pub use specialist::{SpecialistDirectory, SpecialistRecord};

//! CoSign CLI - command orchestration
//!
//! This crate provides the `cosign` binary and the application context that
//! rebuilds registry state from the audit log on every invocation.

pub mod commands;
pub mod context;

pub use context::AppContext;

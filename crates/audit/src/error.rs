//! Audit log errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed audit record in {file} line {line}: {source}")]
    Malformed {
        file: String,
        line: usize,
        source: serde_json::Error,
    },
}

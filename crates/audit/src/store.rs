//! JSONL audit log - append-only writer
//!
//! One file per UTC day, one JSON record per line. The log is the source of
//! truth: registry state is rebuilt by replaying it.

use crate::error::AuditError;
use crate::record::AuditRecord;
use chrono::Utc;
use cosign_registry::RegistryEvent;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only JSONL audit log
pub struct AuditLog {
    base_path: PathBuf,
    current_file: Option<BufWriter<File>>,
    current_date: Option<String>,
}

impl AuditLog {
    /// Open (or create) an audit log directory
    pub fn open(base_path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;

        Ok(Self {
            base_path,
            current_file: None,
            current_date: None,
        })
    }

    /// Stamp and append a registry event, returning the stored record
    pub fn append(&mut self, event: RegistryEvent) -> Result<AuditRecord, AuditError> {
        let record = AuditRecord::now(event);
        self.append_record(&record)?;
        Ok(record)
    }

    /// Append a pre-stamped record
    pub fn append_record(&mut self, record: &AuditRecord) -> Result<(), AuditError> {
        let date = record.timestamp.format("%Y-%m-%d").to_string();

        // Rotate file if the date changed
        if self.current_date.as_ref() != Some(&date) {
            self.rotate_file(&date)?;
        }

        if let Some(ref mut writer) = self.current_file {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }

        tracing::debug!(kind = record.event.kind(), "audit record appended");
        Ok(())
    }

    fn rotate_file(&mut self, date: &str) -> Result<(), AuditError> {
        if let Some(ref mut writer) = self.current_file {
            writer.flush()?;
        }

        let file_path = self.base_path.join(format!("{}.jsonl", date));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)?;

        self.current_file = Some(BufWriter::new(file));
        self.current_date = Some(date.to_string());

        Ok(())
    }

    /// Path of the file the next append would land in
    pub fn today_file_path(&self) -> PathBuf {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        self.base_path.join(format!("{}.jsonl", date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosign_core::Identity;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_dated_file() {
        let dir = TempDir::new().unwrap();
        let mut log = AuditLog::open(dir.path()).unwrap();

        log.append(RegistryEvent::authorizer_added(
            Identity::from_bytes([1u8; 20]),
            "Ada",
        ))
        .unwrap();

        assert!(log.today_file_path().exists());
        let content = std::fs::read_to_string(log.today_file_path()).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("AuthorizerAdded"));
    }

    #[test]
    fn test_append_is_append_only() {
        let dir = TempDir::new().unwrap();
        let mut log = AuditLog::open(dir.path()).unwrap();

        for i in 0..3 {
            log.append(RegistryEvent::specialist_removed(format!("domain-{i}")))
                .unwrap();
        }

        let content = std::fs::read_to_string(log.today_file_path()).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}

//! JSONL audit reader - sequential reader for replay

use crate::error::AuditError;
use crate::record::AuditRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Sequential audit-log reader
pub struct AuditReader {
    files: Vec<PathBuf>,
}

impl AuditReader {
    /// Create a reader over all `.jsonl` files in a directory
    pub fn from_directory(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let mut files = Vec::new();

        if path.exists() {
            for entry in std::fs::read_dir(path)? {
                let entry = entry?;
                let file_path = entry.path();
                if file_path.extension().map_or(false, |ext| ext == "jsonl") {
                    files.push(file_path);
                }
            }
        }

        // Dated filenames: lexicographic order is chronological order.
        files.sort();

        Ok(Self { files })
    }

    /// True when no audit files exist yet
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Read all records from all files in order
    pub fn read_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let mut records = Vec::new();

        for file_path in &self.files {
            let file = File::open(file_path)?;
            let reader = BufReader::new(file);

            for (index, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record: AuditRecord =
                    serde_json::from_str(&line).map_err(|source| AuditError::Malformed {
                        file: file_path.display().to_string(),
                        line: index + 1,
                        source,
                    })?;
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Count records across all files
    pub fn count(&self) -> Result<usize, AuditError> {
        Ok(self.read_all()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AuditLog;
    use cosign_core::Identity;
    use cosign_registry::{ApprovalRegistry, RegistryConfig, RegistryEvent};
    use std::io::Write;
    use tempfile::TempDir;

    fn id(byte: u8) -> Identity {
        Identity::from_bytes([byte; 20])
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut log = AuditLog::open(dir.path()).unwrap();

        let first = log
            .append(RegistryEvent::authorizer_added(id(1), "Ada"))
            .unwrap();
        let second = log
            .append(RegistryEvent::specialist_added(id(2), "Sam", "IT", "s@x.com"))
            .unwrap();

        let reader = AuditReader::from_directory(dir.path()).unwrap();
        let records = reader.read_all().unwrap();
        assert_eq!(records, vec![first, second]);
        assert_eq!(reader.count().unwrap(), 2);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let reader = AuditReader::from_directory(dir.path()).unwrap();
        assert!(reader.is_empty());
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_reports_location() {
        let dir = TempDir::new().unwrap();
        let mut log = AuditLog::open(dir.path()).unwrap();
        log.append(RegistryEvent::authorizer_added(id(1), "Ada"))
            .unwrap();

        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(log.today_file_path())
            .unwrap();
        writeln!(file, "{{not json").unwrap();

        let reader = AuditReader::from_directory(dir.path()).unwrap();
        let error = reader.read_all().unwrap_err();
        assert!(matches!(error, AuditError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_replay_rebuilds_registry() {
        let dir = TempDir::new().unwrap();
        let mut log = AuditLog::open(dir.path()).unwrap();

        log.append(RegistryEvent::authorizer_added(id(1), "Ada"))
            .unwrap();
        log.append(RegistryEvent::specialist_added(id(2), "Sam", "IT", "s@x.com"))
            .unwrap();
        log.append(RegistryEvent::specialist_updated("IT", "Support", "Sam", "s@x.com"))
            .unwrap();

        let mut registry = ApprovalRegistry::empty(RegistryConfig::default());
        let reader = AuditReader::from_directory(dir.path()).unwrap();
        for record in reader.read_all().unwrap() {
            registry.apply(&record.event).unwrap();
        }

        assert!(registry.is_authorizer(&id(1)));
        assert!(registry.specialist_for("IT").is_none());
        assert_eq!(registry.specialist_for("Support").unwrap().identity, id(2));
    }
}

//! JSON file ledger store.
//!
//! The ledger lives in a single JSON file: a flat object mapping handles to
//! epoch-ms timestamps. The file is read in full at load and replaced in
//! full at save. A missing file is a fresh start, not an error; corrupt
//! contents surface as an error the scheduler degrades from.

use crate::application::ports::{LedgerStore, StoreError};
use crate::domain::ledger::ProtectionLedger;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ledger store backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<ProtectionLedger, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger file, starting fresh");
                return Ok(ProtectionLedger::new());
            }
            Err(e) => return Err(e.into()),
        };

        let ledger = serde_json::from_str(&contents)?;
        Ok(ledger)
    }

    fn save(&self, ledger: &ProtectionLedger) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(ledger)?;
        fs::write(&self.path, json)?;
        debug!(
            path = %self.path.display(),
            entries = ledger.len(),
            "saved protection ledger"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::Identity;
    use crate::domain::timestamp::Timestamp;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));

        let ledger = store.load().unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));

        let mut ledger = ProtectionLedger::new();
        ledger.record_protected(Identity::new("alice"), Timestamp::from_millis(100));
        ledger.record_protected(Identity::new("bob"), Timestamp::from_millis(200));
        ledger.record_protected(Identity::new("carol"), Timestamp::from_millis(300));

        store.save(&ledger).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, ledger);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));

        let mut first = ProtectionLedger::new();
        first.record_protected(Identity::new("alice"), Timestamp::from_millis(1));
        store.save(&first).unwrap();

        let second = ProtectionLedger::new();
        store.save(&second).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "not json {").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Serde(_))));
    }
}

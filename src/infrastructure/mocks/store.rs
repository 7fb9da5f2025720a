//! In-memory ledger store for testing.

use crate::application::ports::{LedgerStore, StoreError};
use crate::domain::ledger::ProtectionLedger;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct StoreInner {
    ledger: Option<ProtectionLedger>,
    save_count: usize,
    fail_load: bool,
    fail_save: bool,
}

/// Ledger store that keeps everything in memory.
///
/// Clones share state, so tests can keep a handle while the scheduler owns
/// its copy. Load and save failures can be scripted to exercise the
/// degradation paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a ledger, as if saved by a previous run.
    pub fn seed(&self, ledger: ProtectionLedger) {
        self.lock().ledger = Some(ledger);
    }

    /// Script `load` to fail.
    pub fn failing_load(self) -> Self {
        self.lock().fail_load = true;
        self
    }

    /// Script `save` to fail.
    pub fn failing_save(self) -> Self {
        self.lock().fail_save = true;
        self
    }

    /// The most recently saved ledger, if any.
    pub fn saved(&self) -> Option<ProtectionLedger> {
        self.lock().ledger.clone()
    }

    /// Number of times `save` was called (including scripted failures).
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner
            .lock()
            .expect("MemoryStore mutex poisoned - a test thread panicked while holding the lock")
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<ProtectionLedger, StoreError> {
        let inner = self.lock();
        if inner.fail_load {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::Other,
                "scripted load failure",
            )));
        }
        Ok(inner.ledger.clone().unwrap_or_default())
    }

    fn save(&self, ledger: &ProtectionLedger) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.save_count += 1;
        if inner.fail_save {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::Other,
                "scripted save failure",
            )));
        }
        inner.ledger = Some(ledger.clone());
        Ok(())
    }
}

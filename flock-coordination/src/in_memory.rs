use async_trait::async_trait;
use flock_core::{CoordinationStore, FlockError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Simple in-memory coordination store.
///
/// Records live in a map guarded by a lock. Suitable for tests and for
/// embedded scenarios where no external observers need the topology
/// record to outlive the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CoordinationStore for InMemoryStore {
    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.records.read().contains_key(path))
    }

    async fn create(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut records = self.records.write();
        if records.contains_key(path) {
            return Err(FlockError::coordination(format!(
                "record already exists at {path}"
            )));
        }
        records.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn set(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut records = self.records.write();
        match records.get_mut(path) {
            Some(record) => {
                *record = data.to_vec();
                Ok(())
            }
            None => Err(FlockError::coordination(format!("no record at {path}"))),
        }
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        self.records
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| FlockError::coordination(format!("no record at {path}")))
    }
}

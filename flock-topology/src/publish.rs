//! Publishing the topology record to the coordination store.

use crate::{NodePool, TopologyResult};
use flock_core::{CoordinationStore, TopologyRecord};
use std::sync::Arc;
use tracing::debug;

/// Pushes the registry's current node set to the coordination store.
///
/// The record is created on first publish and overwritten in full on
/// every later one. External observers treat it as a read-only cache;
/// the in-process pool stays authoritative.
pub struct TopologyPublisher {
    store: Arc<dyn CoordinationStore>,
    path: String,
}

impl TopologyPublisher {
    pub fn new(store: Arc<dyn CoordinationStore>, path: impl Into<String>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }

    /// Record path within the store.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Serialize the pool's membership and write it at the record path.
    pub async fn publish(&self, pool: &NodePool) -> TopologyResult<()> {
        let record =
            TopologyRecord::new(pool.snapshot().iter().map(|n| n.descriptor()).collect());
        let payload = record.to_bytes()?;

        if self.store.exists(&self.path).await? {
            self.store.set(&self.path, &payload).await?;
        } else {
            self.store.create(&self.path, &payload).await?;
        }

        debug!(
            "published topology record with {} nodes to {}",
            record.len(),
            self.path
        );
        Ok(())
    }
}

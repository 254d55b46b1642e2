//! External coordination store seam.

use crate::Result;
use async_trait::async_trait;

/// External store the topology record is mirrored to.
///
/// The store is a cache for external observers, not the authority: while
/// the daemon runs, the in-process registry is the source of truth. The
/// engine always writes the full serialized node list, never a delta.
///
/// Semantics follow the usual coordination-service contract: `create`
/// fails if the path already exists, `set` and `get` fail if it does not.
#[async_trait]
pub trait CoordinationStore: Send + Sync {
    /// Check whether a record exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Create a new record at `path`. Fails if one already exists.
    async fn create(&self, path: &str, data: &[u8]) -> Result<()>;

    /// Overwrite the record at `path`. Fails if none exists.
    async fn set(&self, path: &str, data: &[u8]) -> Result<()>;

    /// Read the record at `path`.
    async fn get(&self, path: &str) -> Result<Vec<u8>>;
}

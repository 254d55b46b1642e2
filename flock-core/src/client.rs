//! Database access seam used by the topology engine.

use crate::Result;
use async_trait::async_trait;

/// Minimal database surface the topology engine needs from a node.
///
/// The engine never speaks a wire protocol directly: it executes SQL
/// statements, lists single-column catalog results, and probes liveness.
/// Implementations acquire a connection per operation and release it
/// before returning, so no caller ever holds a connection across other
/// work.
///
/// Production deployments use the PostgreSQL implementation from
/// `flock-postgres`; tests substitute a scripted fake.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Execute a statement, returning the number of rows affected.
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// Run a query returning a single text column, one entry per row.
    ///
    /// Used for catalog listings such as subscription and slot names.
    async fn query_names(&self, sql: &str) -> Result<Vec<String>>;

    /// Cheap liveness probe against the node.
    async fn ping(&self) -> Result<()>;
}

//! Pooled PostgreSQL client for a single managed node.

use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use flock_core::{FlockError, NodeClient, Result};
use std::time::Duration;
use tokio_postgres::NoTls;
use tracing::debug;

/// How long the initial connectivity check may take before the node is
/// considered unreachable at bootstrap.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on pooled connections per node. The engine issues
/// statements one at a time, so the pool stays small.
const MAX_POOL_SIZE: usize = 4;

/// [`NodeClient`] backed by a deadpool-postgres pool.
///
/// Every operation acquires a connection from the pool and releases it
/// before returning, mirroring the acquire-per-statement discipline the
/// reconciler expects.
pub struct PgNodeClient {
    pool: Pool,
}

impl PgNodeClient {
    /// Connect to a node and verify it is reachable.
    ///
    /// The pool itself is lazy; an explicit probe bounded by the connect
    /// timeout turns an unreachable node into a bootstrap error instead
    /// of a surprise on first use.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let config: tokio_postgres::Config = dsn
            .parse()
            .map_err(|e| FlockError::config(format!("invalid DSN: {e}")))?;

        let manager = Manager::from_config(
            config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );
        let pool = Pool::builder(manager)
            .max_size(MAX_POOL_SIZE)
            .build()
            .map_err(|e| FlockError::internal(format!("failed to build connection pool: {e}")))?;

        let client = Self { pool };
        tokio::time::timeout(CONNECT_TIMEOUT, client.ping())
            .await
            .map_err(|_| FlockError::connectivity("timed out connecting to node"))??;
        debug!("connected to node");

        Ok(client)
    }
}

#[async_trait]
impl NodeClient for PgNodeClient {
    async fn execute(&self, sql: &str) -> Result<u64> {
        let conn = self
            .pool
            .get()
            .await
            .map_err(|e| FlockError::connectivity(format!("failed to acquire connection: {e}")))?;
        conn.execute(sql, &[])
            .await
            .map_err(|e| FlockError::query(e.to_string()))
    }

    async fn query_names(&self, sql: &str) -> Result<Vec<String>> {
        let conn = self
            .pool
            .get()
            .await
            .map_err(|e| FlockError::connectivity(format!("failed to acquire connection: {e}")))?;
        let rows = conn
            .query(sql, &[])
            .await
            .map_err(|e| FlockError::query(e.to_string()))?;
        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    async fn ping(&self) -> Result<()> {
        let conn = self
            .pool
            .get()
            .await
            .map_err(|e| FlockError::connectivity(format!("failed to acquire connection: {e}")))?;
        conn.simple_query("SELECT 1")
            .await
            .map_err(|e| FlockError::connectivity(e.to_string()))?;
        Ok(())
    }
}

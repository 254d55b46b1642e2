//! Scripted test doubles shared by the topology tests.

use crate::Node;
use async_trait::async_trait;
use flock_core::{ConnInfo, FlockError, NodeAddr, NodeClient, NodeId, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// `NodeClient` double: records every statement and serves canned rows.
pub struct FakeClient {
    healthy: AtomicBool,
    executed: Mutex<Vec<String>>,
    rows: Mutex<HashMap<String, Vec<String>>>,
    fail_fragments: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            healthy: AtomicBool::new(true),
            executed: Mutex::new(Vec::new()),
            rows: Mutex::new(HashMap::new()),
            fail_fragments: Mutex::new(Vec::new()),
        })
    }

    /// Control the outcome of subsequent `ping` calls.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Serve `rows` for every `query_names(sql)` call.
    pub fn stage_rows(&self, sql: &str, rows: &[&str]) {
        self.rows
            .lock()
            .insert(sql.to_string(), rows.iter().map(|r| r.to_string()).collect());
    }

    /// Fail any `execute` whose statement contains `fragment`.
    pub fn fail_on(&self, fragment: &str) {
        self.fail_fragments.lock().push(fragment.to_string());
    }

    /// Every statement passed to `execute`, including failed attempts,
    /// in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().clone()
    }
}

#[async_trait]
impl NodeClient for FakeClient {
    async fn execute(&self, sql: &str) -> Result<u64> {
        self.executed.lock().push(sql.to_string());
        let failing = self
            .fail_fragments
            .lock()
            .iter()
            .any(|fragment| sql.contains(fragment.as_str()));
        if failing {
            return Err(FlockError::query(format!("scripted failure for: {sql}")));
        }
        Ok(1)
    }

    async fn query_names(&self, sql: &str) -> Result<Vec<String>> {
        Ok(self.rows.lock().get(sql).cloned().unwrap_or_default())
    }

    async fn ping(&self) -> Result<()> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(FlockError::connectivity("scripted probe failure"))
        }
    }
}

/// Build a node with plausible addresses around a fake client.
pub fn test_node(id: &str, client: Arc<FakeClient>) -> Arc<Node> {
    Arc::new(Node::new(
        NodeId::new(id),
        NodeAddr::new(format!("{id}.internal"), 5432),
        ConnInfo {
            host: format!("{id}.db"),
            port: 5432,
            dbname: "app".to_string(),
            user: "repl".to_string(),
            password: "secret".to_string(),
        },
        client,
    ))
}

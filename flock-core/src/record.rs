//! Serialized topology snapshot shared with external observers.

use crate::{ConnInfo, NodeAddr, NodeId, Result, Role};
use serde::{Deserialize, Serialize};

/// One node's entry in the published topology record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: NodeId,
    pub address: NodeAddr,
    pub role: Role,
    /// Connection parameters with the password stripped on serialization.
    pub conn: ConnInfo,
}

/// Ordered snapshot of every managed node, as written to the coordination
/// store.
///
/// The record is created on first bootstrap and overwritten in full on
/// every membership or leadership change. The encoding is self-describing
/// JSON so that readers in other languages can consume it without this
/// crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyRecord {
    pub nodes: Vec<NodeDescriptor>,
}

impl TopologyRecord {
    pub fn new(nodes: Vec<NodeDescriptor>) -> Self {
        Self { nodes }
    }

    /// Serialize the record for the coordination store.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize a record read from the coordination store.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// The leader entry, if the snapshot contains one.
    pub fn leader(&self) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|n| n.role.is_leader())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

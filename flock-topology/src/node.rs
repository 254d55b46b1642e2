//! Per-node state: identity, addresses, connection handle, and assigned
//! role.

use flock_core::{ConnInfo, NodeAddr, NodeClient, NodeDescriptor, NodeId, Role};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// One managed database node.
///
/// A node owns its connection handle; when the last reference is dropped
/// (pool removal plus observer teardown) the underlying connections go
/// with it. The role records the last assignment made through the
/// registry — keeping it consistent with the actual replication wiring is
/// the reconciler's job, not the node's.
pub struct Node {
    id: NodeId,
    address: NodeAddr,
    conn: ConnInfo,
    client: Arc<dyn NodeClient>,
    role: Mutex<Role>,
}

impl Node {
    /// Create a node. Every node starts as a follower; election promotes
    /// one of them.
    pub fn new(
        id: NodeId,
        address: NodeAddr,
        conn: ConnInfo,
        client: Arc<dyn NodeClient>,
    ) -> Self {
        Self {
            id,
            address,
            conn,
            client,
            role: Mutex::new(Role::Follower),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Address other nodes use to reach this node for replication.
    pub fn address(&self) -> &NodeAddr {
        &self.address
    }

    /// Connection parameters from this node's DSN.
    pub fn conn(&self) -> &ConnInfo {
        &self.conn
    }

    pub fn client(&self) -> &dyn NodeClient {
        self.client.as_ref()
    }

    /// The last role assigned to this node.
    pub fn role(&self) -> Role {
        *self.role.lock()
    }

    pub fn is_leader(&self) -> bool {
        self.role().is_leader()
    }

    /// Reassign the role. The flip happens under the node's own lock;
    /// callers go through the registry so role changes stay consistent
    /// with membership.
    pub(crate) fn set_role(&self, role: Role) {
        *self.role.lock() = role;
    }

    /// This node's entry for the topology record.
    pub fn descriptor(&self) -> NodeDescriptor {
        NodeDescriptor {
            id: self.id.clone(),
            address: self.address.clone(),
            role: self.role(),
            conn: self.conn.clone(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("address", &self.address)
            .field("role", &self.role())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_node, FakeClient};

    #[test]
    fn new_nodes_start_as_followers() {
        let node = test_node("a", FakeClient::new());
        assert_eq!(node.role(), Role::Follower);
        assert!(!node.is_leader());
    }

    #[test]
    fn set_role_is_reflected_in_descriptor() {
        let node = test_node("a", FakeClient::new());
        node.set_role(Role::Leader);

        let descriptor = node.descriptor();
        assert_eq!(descriptor.role, Role::Leader);
        assert_eq!(descriptor.id, NodeId::new("a"));
        assert_eq!(descriptor.address.port, 5432);
    }
}

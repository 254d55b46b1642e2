//! Shared registry of managed nodes.

use crate::{ElectionPolicy, Node, TopologyError, TopologyResult};
use flock_core::{NodeId, Role};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

/// Ordered, lock-protected collection of managed nodes.
///
/// The pool is the single source of truth for membership and role
/// assignment while the daemon runs. Every structural mutation and role
/// query serializes on one lock; no operation performs I/O or blocks
/// beyond its critical section, so observers may call in concurrently
/// from their failover paths.
pub struct NodePool {
    nodes: Mutex<Vec<Arc<Node>>>,
}

impl NodePool {
    pub fn new(nodes: Vec<Arc<Node>>) -> Self {
        Self {
            nodes: Mutex::new(nodes),
        }
    }

    /// Add a node. Adding an ID that is already a member is a no-op.
    pub fn add(&self, node: Arc<Node>) {
        let mut nodes = self.nodes.lock();
        if nodes.iter().any(|n| n.id() == node.id()) {
            debug!("node {} already in the pool, ignoring add", node.id());
            return;
        }
        nodes.push(node);
    }

    /// Remove a node by ID. Removing an absent ID is a no-op.
    pub fn remove(&self, id: &NodeId) {
        let mut nodes = self.nodes.lock();
        let before = nodes.len();
        nodes.retain(|n| n.id() != id);
        if nodes.len() < before {
            info!("node {} removed from the pool", id);
        }
    }

    pub fn get(&self, id: &NodeId) -> Option<Arc<Node>> {
        self.nodes.lock().iter().find(|n| n.id() == id).cloned()
    }

    /// The current leader, if one has been assigned.
    pub fn leader(&self) -> Option<Arc<Node>> {
        self.nodes.lock().iter().find(|n| n.is_leader()).cloned()
    }

    /// Every node currently assigned the follower role, in pool order.
    pub fn followers(&self) -> Vec<Arc<Node>> {
        self.nodes
            .lock()
            .iter()
            .filter(|n| !n.is_leader())
            .cloned()
            .collect()
    }

    /// Assign the leader role to `id`, demoting any other leader.
    ///
    /// The whole reassignment happens under the pool lock so that at most
    /// one node holds the leader role at any observable moment.
    pub fn set_leader(&self, id: &NodeId) -> TopologyResult<Arc<Node>> {
        let nodes = self.nodes.lock();
        let target = nodes
            .iter()
            .find(|n| n.id() == id)
            .cloned()
            .ok_or_else(|| TopologyError::NodeNotFound(id.clone()))?;

        for node in nodes.iter() {
            if node.id() == id {
                node.set_role(Role::Leader);
            } else if node.is_leader() {
                node.set_role(Role::Follower);
            }
        }
        Ok(target)
    }

    /// Run an election over the current members and assign the winner the
    /// leader role, all under one lock acquisition.
    ///
    /// Failover paths use this so "elect + set leader" is atomic with
    /// respect to concurrent removals: the candidate set the policy sees
    /// is exactly the membership the assignment lands on.
    pub fn elect_leader(&self, policy: &dyn ElectionPolicy) -> TopologyResult<Arc<Node>> {
        let nodes = self.nodes.lock();
        let candidates: Vec<Arc<Node>> = nodes.clone();
        let winner_idx = policy.elect(&candidates)?;
        let winner = candidates
            .get(winner_idx)
            .cloned()
            .ok_or(TopologyError::NoCandidates)?;

        for node in nodes.iter() {
            if node.id() == winner.id() {
                node.set_role(Role::Leader);
            } else if node.is_leader() {
                node.set_role(Role::Follower);
            }
        }
        info!("node {} elected as leader", winner.id());
        Ok(winner)
    }

    /// Copy of the current membership, in pool order.
    pub fn snapshot(&self) -> Vec<Arc<Node>> {
        self.nodes.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.nodes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_node, FakeClient};
    use crate::UniformRandom;

    fn pool_of(ids: &[&str]) -> NodePool {
        NodePool::new(
            ids.iter()
                .map(|id| test_node(id, FakeClient::new()))
                .collect(),
        )
    }

    #[test]
    fn set_leader_leaves_exactly_one_leader() {
        let pool = pool_of(&["a", "b", "c"]);

        pool.set_leader(&NodeId::new("a")).unwrap();
        assert_eq!(pool.leader().unwrap().id(), &NodeId::new("a"));

        pool.set_leader(&NodeId::new("b")).unwrap();
        assert_eq!(pool.leader().unwrap().id(), &NodeId::new("b"));
        let leaders = pool.snapshot().iter().filter(|n| n.is_leader()).count();
        assert_eq!(leaders, 1);
        assert_eq!(pool.followers().len(), 2);
    }

    #[test]
    fn set_leader_rejects_unknown_node() {
        let pool = pool_of(&["a"]);
        let err = pool.set_leader(&NodeId::new("ghost")).unwrap_err();
        assert!(matches!(err, TopologyError::NodeNotFound(_)));
        assert!(pool.leader().is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let pool = pool_of(&["a", "b"]);

        pool.remove(&NodeId::new("a"));
        assert_eq!(pool.len(), 1);

        // Removing an absent ID leaves the pool unchanged
        pool.remove(&NodeId::new("a"));
        pool.remove(&NodeId::new("ghost"));
        assert_eq!(pool.len(), 1);
        assert!(pool.get(&NodeId::new("b")).is_some());
    }

    #[test]
    fn add_ignores_duplicate_ids() {
        let pool = pool_of(&["a"]);
        pool.add(test_node("a", FakeClient::new()));
        assert_eq!(pool.len(), 1);

        pool.add(test_node("b", FakeClient::new()));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn elect_leader_assigns_a_member() {
        let pool = pool_of(&["a", "b", "c"]);
        let policy = UniformRandom::with_seed(7);

        let leader = pool.elect_leader(&policy).unwrap();
        assert!(pool.get(leader.id()).is_some());
        assert_eq!(pool.leader().unwrap().id(), leader.id());
        assert_eq!(pool.followers().len(), 2);
    }

    #[test]
    fn elect_leader_on_empty_pool_fails() {
        let pool = NodePool::new(Vec::new());
        let policy = UniformRandom::with_seed(7);
        assert!(matches!(
            pool.elect_leader(&policy),
            Err(TopologyError::NoCandidates)
        ));
    }

    #[test]
    fn followers_excludes_the_leader() {
        let pool = pool_of(&["a", "b", "c"]);
        pool.set_leader(&NodeId::new("b")).unwrap();

        let followers = pool.followers();
        assert_eq!(followers.len(), 2);
        assert!(followers.iter().all(|n| n.id() != &NodeId::new("b")));
    }
}

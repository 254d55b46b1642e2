//! Shared context handed to every observer.

use crate::{ElectionPolicy, NodePool, Reconciler, TopologyPublisher};

/// Everything a failover needs, injected at construction time.
///
/// The pool, the publisher, the reconciler, and the election policy
/// travel together as one context object rather than as process-wide
/// globals; observers receive an `Arc` of it at spawn time.
pub struct TopologyContext {
    pub pool: NodePool,
    pub publisher: TopologyPublisher,
    pub reconciler: Reconciler,
    pub election: Box<dyn ElectionPolicy>,
}

impl TopologyContext {
    pub fn new(
        pool: NodePool,
        publisher: TopologyPublisher,
        reconciler: Reconciler,
        election: Box<dyn ElectionPolicy>,
    ) -> Self {
        Self {
            pool,
            publisher,
            reconciler,
            election,
        }
    }
}

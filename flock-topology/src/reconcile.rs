//! Replication reconciliation: making each node's replication objects
//! match its assigned role.

use crate::{query, Node, NodePool, TopologyError, TopologyResult};
use flock_core::FlockError;
use tracing::{debug, info, warn};

/// Outcome of one reconciliation pass.
///
/// Individual SQL steps fail soft: each failure is logged, recorded here,
/// and the pass moves on. Partial state left behind (say a disabled but
/// undropped subscription) is cleaned up by the next pass over the same
/// node.
#[derive(Debug, Default, Clone)]
pub struct ReconcileReport {
    pub subscriptions_dropped: u64,
    pub slots_dropped: u64,
    pub publications_created: u64,
    pub subscriptions_created: u64,
    pub failures: Vec<String>,
}

impl ReconcileReport {
    /// `true` when every step of the pass succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(&mut self, context: &str, err: &FlockError) {
        warn!("{context}: {err}");
        self.failures.push(format!("{context}: {err}"));
    }

    fn merge(&mut self, other: ReconcileReport) {
        self.subscriptions_dropped += other.subscriptions_dropped;
        self.slots_dropped += other.slots_dropped;
        self.publications_created += other.publications_created;
        self.subscriptions_created += other.subscriptions_created;
        self.failures.extend(other.failures);
    }
}

/// Issues the SQL sequences that align replication objects with role
/// assignments.
///
/// Every entry point is idempotent at the object level: stale objects are
/// dropped before new ones are created, and a duplicate create surfaces
/// as a soft failure rather than aborting the pass. The driver methods
/// enforce leader-before-follower ordering; within one node,
/// subscriptions are always dropped before their backing slots.
#[derive(Debug, Default)]
pub struct Reconciler;

impl Reconciler {
    pub fn new() -> Self {
        Self
    }

    /// Apply leader-side reconciliation to the current leader.
    pub async fn run_leader_queries(&self, pool: &NodePool) -> TopologyResult<ReconcileReport> {
        let leader = pool.leader().ok_or(TopologyError::NoLeader)?;
        info!("running leader reconciliation on node {}", leader.id());
        Ok(self.apply_leader(&leader).await)
    }

    /// Point every current follower at the current leader.
    ///
    /// Followers are reconciled one after another; there is no ordering
    /// requirement between them.
    pub async fn run_follower_queries(&self, pool: &NodePool) -> TopologyResult<ReconcileReport> {
        let leader = pool.leader().ok_or(TopologyError::NoLeader)?;
        let followers = pool.followers();
        info!(
            "running follower reconciliation for {} nodes against leader {}",
            followers.len(),
            leader.id()
        );

        let mut report = ReconcileReport::default();
        for follower in followers {
            report.merge(self.apply_subscription(&follower, &leader).await);
        }
        Ok(report)
    }

    /// Tear down stale replication state on `node` and publish all
    /// tables under the node's ID.
    pub async fn apply_leader(&self, node: &Node) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        self.drop_all_subscriptions(node, &mut report).await;
        self.drop_inactive_slots(node, &mut report).await;

        let sql = query::create_publication(node.id().as_str());
        match node.client().execute(&sql).await {
            Ok(_) => {
                report.publications_created += 1;
                info!("publication created on node {}", node.id());
            }
            Err(err) => {
                report.record_failure(&format!("create publication on {}", node.id()), &err)
            }
        }

        report
    }

    /// Tear down stale replication state on `follower` and subscribe it
    /// to `leader`'s publication.
    pub async fn apply_subscription(&self, follower: &Node, leader: &Node) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        self.drop_all_subscriptions(follower, &mut report).await;
        self.drop_inactive_slots(follower, &mut report).await;

        let name = query::subscription_name(follower.id(), leader.id());
        let sql = query::create_subscription(
            &name,
            leader.address(),
            follower.conn(),
            leader.id().as_str(),
        );
        match follower.client().execute(&sql).await {
            Ok(_) => {
                report.subscriptions_created += 1;
                info!("subscription {} created on node {}", name, follower.id());
            }
            Err(err) => report.record_failure(
                &format!("create subscription on {}", follower.id()),
                &err,
            ),
        }

        report
    }

    /// Disable, detach, and drop every subscription present on `node`.
    ///
    /// The three steps run independently for each subscription, and each
    /// subscription is processed regardless of what happened to the
    /// previous one: one stuck subscription never blocks cleanup of the
    /// rest.
    async fn drop_all_subscriptions(&self, node: &Node, report: &mut ReconcileReport) {
        let names = match node.client().query_names(query::LIST_SUBSCRIPTIONS).await {
            Ok(names) => names,
            Err(err) => {
                report.record_failure(&format!("list subscriptions on {}", node.id()), &err);
                return;
            }
        };

        for name in names {
            let steps = [
                query::disable_subscription(&name),
                query::detach_subscription_slot(&name),
                query::drop_subscription(&name),
            ];
            let mut clean = true;
            for sql in steps {
                if let Err(err) = node.client().execute(&sql).await {
                    report
                        .record_failure(&format!("drop subscription {} on {}", name, node.id()), &err);
                    clean = false;
                }
            }
            if clean {
                report.subscriptions_dropped += 1;
                debug!("dropped subscription {} on node {}", name, node.id());
            }
        }
    }

    /// Drop every replication slot not attached to a live connection.
    ///
    /// Active slots are left alone; dropping one would sever an in-flight
    /// replication stream.
    async fn drop_inactive_slots(&self, node: &Node, report: &mut ReconcileReport) {
        let slots = match node.client().query_names(query::LIST_INACTIVE_SLOTS).await {
            Ok(slots) => slots,
            Err(err) => {
                report.record_failure(&format!("list replication slots on {}", node.id()), &err);
                return;
            }
        };

        for slot in slots {
            match node
                .client()
                .execute(&query::drop_replication_slot(&slot))
                .await
            {
                Ok(_) => {
                    report.slots_dropped += 1;
                    debug!("dropped slot {} on node {}", slot, node.id());
                }
                Err(err) => {
                    report.record_failure(&format!("drop slot {} on {}", slot, node.id()), &err)
                }
            }
        }
    }
}

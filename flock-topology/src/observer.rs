//! Per-node health observation and failover.

use crate::{Node, TopologyContext, TopologyResult};
use flock_core::Role;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Lifecycle state of an observer.
///
/// There is no transition back to `Running`: once an observer has driven
/// a failover for its node, or shutdown has been requested, it is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverState {
    Running,
    Stopped,
}

/// Watches one node and drives failover when its liveness probe fails.
///
/// Each observer runs as its own task, probing immediately on start and
/// then once per interval. Probes block only the owning task; the pool
/// lock is never held across a probe. On probe failure the observer runs
/// the failover path for its node's current role and then stops itself.
pub struct HealthObserver {
    node: Arc<Node>,
    ctx: Arc<TopologyContext>,
    interval: Duration,
    state: watch::Sender<ObserverState>,
}

impl HealthObserver {
    pub fn new(node: Arc<Node>, ctx: Arc<TopologyContext>, interval: Duration) -> Self {
        let (state, _) = watch::channel(ObserverState::Running);
        Self {
            node,
            ctx,
            interval,
            state,
        }
    }

    /// Subscribe to this observer's lifecycle state.
    pub fn watch_state(&self) -> watch::Receiver<ObserverState> {
        self.state.subscribe()
    }

    /// Run the observer on its own task.
    ///
    /// `shutdown` is the process-wide termination signal; flipping it to
    /// `true` stops every observer without touching the topology.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Observer main loop. Returns once the observer has stopped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("observer for node {} started", self.node.id());
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.probe().await {
                        break;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("observer for node {} received shutdown", self.node.id());
                        break;
                    }
                }
            }
        }

        // The ticker and the observer's reference to the node's
        // connection handle are released here; once the pool entry is
        // gone too, the node's connections are closed.
        let _ = self.state.send(ObserverState::Stopped);
        info!("observer for node {} stopped", self.node.id());
    }

    /// One probe cycle. Returns `true` when the observer should stop.
    async fn probe(&self) -> bool {
        match self.node.client().ping().await {
            Ok(()) => false,
            Err(err) => {
                warn!(
                    "liveness probe failed for node {}: {}",
                    self.node.id(),
                    err
                );
                if let Err(err) = self.fail_over().await {
                    error!(
                        "failover for node {} did not complete cleanly: {}",
                        self.node.id(),
                        err
                    );
                }
                true
            }
        }
    }

    async fn fail_over(&self) -> TopologyResult<()> {
        match self.node.role() {
            Role::Leader => self.fail_leader().await,
            Role::Follower => self.fail_follower().await,
        }
    }

    /// Leader failover: remove the dead node, elect a replacement,
    /// publish the new topology, and re-run the full reconciliation.
    async fn fail_leader(&self) -> TopologyResult<()> {
        let ctx = &self.ctx;
        ctx.pool.remove(self.node.id());

        if ctx.pool.is_empty() {
            // Terminal degraded state: nothing left to elect. The daemon
            // keeps running so an operator can inspect it, but the
            // topology is unmanaged from here on.
            error!(
                "node {} was the leader and no nodes remain in the pool",
                self.node.id()
            );
            return Ok(());
        }

        let new_leader = ctx.pool.elect_leader(ctx.election.as_ref())?;
        info!(
            "node {} is no longer the leader, new leader is {}",
            self.node.id(),
            new_leader.id()
        );

        ctx.publisher.publish(&ctx.pool).await?;

        let leader_report = ctx.reconciler.run_leader_queries(&ctx.pool).await?;
        let follower_report = ctx.reconciler.run_follower_queries(&ctx.pool).await?;
        let soft_failures = leader_report.failures.len() + follower_report.failures.len();
        if soft_failures > 0 {
            warn!(
                "reconciliation after failover of {} finished with {} soft failures",
                self.node.id(),
                soft_failures
            );
        }
        Ok(())
    }

    /// Follower failover: remove the dead node and publish. The
    /// remaining followers' subscriptions are unaffected, so no
    /// reconciliation re-run is needed.
    async fn fail_follower(&self) -> TopologyResult<()> {
        self.ctx.pool.remove(self.node.id());
        self.ctx.publisher.publish(&self.ctx.pool).await?;
        info!("node {} is no longer a follower", self.node.id());
        Ok(())
    }
}

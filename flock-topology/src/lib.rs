//! # Flock Topology
//!
//! The topology management engine for pgflock.
//!
//! This crate provides functionality for:
//! - Node registry and role assignment ([`NodePool`], [`Node`])
//! - Leader election ([`ElectionPolicy`], [`UniformRandom`])
//! - Replication reconciliation ([`Reconciler`]) - the SQL-level
//!   protocol that makes publications and subscriptions match the role
//!   assignment
//! - Topology publishing ([`TopologyPublisher`])
//! - Per-node health observation and failover ([`HealthObserver`])
//!
//! The engine only talks to its collaborators through the trait seams in
//! `flock-core`, so every piece can be exercised against scripted fakes.

pub mod context;
pub mod election;
pub mod errors;
pub mod node;
pub mod observer;
pub mod pool;
pub mod publish;
pub mod query;
pub mod reconcile;

#[cfg(test)]
mod testutil;

pub use context::TopologyContext;
pub use election::{ElectionPolicy, UniformRandom};
pub use errors::{TopologyError, TopologyResult};
pub use node::Node;
pub use observer::{HealthObserver, ObserverState};
pub use pool::NodePool;
pub use publish::TopologyPublisher;
pub use reconcile::{ReconcileReport, Reconciler};

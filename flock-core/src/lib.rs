//! # Flock Core
//!
//! Core types and collaborator traits for the pgflock replication
//! topology manager.
//!
//! This crate defines the vocabulary the rest of the workspace shares:
//!
//! - **Node identity and roles**: [`NodeId`], [`Role`], [`NodeAddr`],
//!   [`ConnInfo`]
//! - **Collaborator seams**: [`NodeClient`] (the database surface the
//!   topology engine needs) and [`CoordinationStore`] (the external store
//!   the topology record is mirrored to)
//! - **Topology record**: [`TopologyRecord`] and [`NodeDescriptor`], the
//!   serialized snapshot other processes read
//! - **Error handling**: [`FlockError`] and the crate-wide [`Result`]
//!
//! The engine itself lives in `flock-topology`; concrete collaborator
//! implementations live in `flock-postgres` and `flock-coordination`.

pub mod client;
pub mod coordination;
pub mod error;
pub mod record;
pub mod types;

pub use client::NodeClient;
pub use coordination::CoordinationStore;
pub use error::{FlockError, Result};
pub use record::{NodeDescriptor, TopologyRecord};
pub use types::{ConnInfo, NodeAddr, NodeId, Role};

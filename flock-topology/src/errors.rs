//! Error types for topology management operations.

use flock_core::{FlockError, NodeId};
use thiserror::Error;

/// Result type for topology management operations
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors that can occur during topology management operations
#[derive(Error, Debug)]
pub enum TopologyError {
    /// Election was attempted over an empty candidate set
    #[error("no candidates available for election")]
    NoCandidates,

    /// An operation required a leader but none is assigned
    #[error("no leader present in the registry")]
    NoLeader,

    /// Referenced node is not a member of the registry
    #[error("node {0} not found in the registry")]
    NodeNotFound(NodeId),

    /// Failure from a database or coordination collaborator
    #[error(transparent)]
    Core(#[from] FlockError),
}

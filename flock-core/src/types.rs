//! # Core Types
//!
//! Fundamental types used throughout the pgflock workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a managed database node.
///
/// Node identifiers come from the operator's configuration and are opaque
/// to the topology engine. The identifier doubles as the name of the
/// leader-side publication, so it should be stable across restarts.
///
/// # Examples
///
/// ```rust
/// use flock_core::NodeId;
///
/// let id = NodeId::new("pg-primary-1");
/// assert_eq!(id.as_str(), "pg-primary-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Replication role assigned to a node.
///
/// A node's role records the last assignment made by the registry; it is
/// not self-verifying. The reconciler is responsible for making the actual
/// replication objects on each node match the assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The node that carries the publication and accepts writes.
    Leader,
    /// A node mirroring the leader through a subscription.
    Follower,
}

impl Role {
    /// Returns `true` for [`Role::Leader`].
    pub fn is_leader(&self) -> bool {
        matches!(self, Role::Leader)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Leader => write!(f, "leader"),
            Role::Follower => write!(f, "follower"),
        }
    }
}

/// Internal network address other nodes use to reach this node for
/// replication traffic.
///
/// This is distinct from the address in the node's DSN: the DSN is how the
/// daemon reaches the node, the internal address is how the cluster's
/// nodes reach each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAddr {
    pub host: String,
    pub port: u16,
}

impl NodeAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for NodeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Connection parameters extracted from a node's DSN.
///
/// The password is retained so a follower can authenticate against the
/// leader when its subscription is created, but it is never serialized
/// into the topology record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnInfo {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display_matches_inner() {
        let id = NodeId::new("pg-1");
        assert_eq!(id.to_string(), "pg-1");
        assert_eq!(NodeId::from("pg-1"), id);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Leader).unwrap(), "\"leader\"");
        assert_eq!(
            serde_json::to_string(&Role::Follower).unwrap(),
            "\"follower\""
        );
    }

    #[test]
    fn conn_info_never_serializes_password() {
        let conn = ConnInfo {
            host: "db1".to_string(),
            port: 5432,
            dbname: "app".to_string(),
            user: "repl".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_string(&conn).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));

        let back: ConnInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user, "repl");
        assert!(back.password.is_empty());
    }
}

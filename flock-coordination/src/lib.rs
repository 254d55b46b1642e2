//! # Flock Coordination
//!
//! Coordination store implementations for the pgflock topology record.
//!
//! The topology engine only depends on the [`CoordinationStore`] trait
//! from `flock-core`; this crate supplies the concrete stores:
//!
//! - [`InMemoryStore`] - records held in memory (testing/embedded use)
//! - [`FileSystemStore`] - records held as files (persistent across
//!   restarts, single-host deployments)
//!
//! ## Example
//!
//! ```rust
//! use flock_coordination::InMemoryStore;
//! use flock_core::CoordinationStore;
//!
//! # tokio_test::block_on(async {
//! let store = InMemoryStore::new();
//! store.create("/flock/nodes", b"[]").await.unwrap();
//! assert!(store.exists("/flock/nodes").await.unwrap());
//! assert_eq!(store.get("/flock/nodes").await.unwrap(), b"[]");
//! # });
//! ```
//!
//! [`CoordinationStore`]: flock_core::CoordinationStore

pub mod file_system;
pub mod in_memory;
mod tests;

pub use file_system::FileSystemStore;
pub use in_memory::InMemoryStore;

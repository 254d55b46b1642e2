//! # Flock Postgres
//!
//! PostgreSQL implementation of the pgflock database collaborator.
//!
//! Provides:
//! - [`PgNodeClient`] - a [`NodeClient`] backed by a deadpool-postgres
//!   pool, acquiring a connection per statement
//! - [`parse_dsn`] - extraction of [`ConnInfo`] from a node's DSN, used
//!   to build subscription connection strings
//!
//! [`NodeClient`]: flock_core::NodeClient
//! [`ConnInfo`]: flock_core::ConnInfo

pub mod client;
pub mod dsn;

pub use client::PgNodeClient;
pub use dsn::parse_dsn;

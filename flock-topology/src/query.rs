//! SQL statements for logical-replication reconciliation.

use flock_core::{ConnInfo, NodeAddr, NodeId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Lists every subscription present on a node.
pub const LIST_SUBSCRIPTIONS: &str = "SELECT subname FROM pg_subscription";

/// Lists replication slots not attached to a live connection.
pub const LIST_INACTIVE_SLOTS: &str =
    "SELECT slot_name FROM pg_replication_slots WHERE active = false";

/// Quote a SQL identifier, doubling any embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn quote_literal(literal: &str) -> String {
    format!("'{}'", literal.replace('\'', "''"))
}

pub fn create_publication(name: &str) -> String {
    format!("CREATE PUBLICATION {} FOR ALL TABLES", quote_ident(name))
}

/// Subscription pointing `follower_conn`'s owner at the leader.
///
/// The connection string targets the leader's internal address but
/// carries the follower's own dbname/user/password: a follower
/// authenticates to the leader's database with the same logical user it
/// uses itself. Initial data copy is disabled; the follower is assumed
/// empty or already caught up.
pub fn create_subscription(
    name: &str,
    leader_addr: &NodeAddr,
    follower_conn: &ConnInfo,
    publication: &str,
) -> String {
    let conninfo = format!(
        "host={} port={} dbname={} user={} password={}",
        leader_addr.host,
        leader_addr.port,
        follower_conn.dbname,
        follower_conn.user,
        follower_conn.password
    );
    format!(
        "CREATE SUBSCRIPTION {} CONNECTION {} PUBLICATION {} WITH (copy_data = false)",
        quote_ident(name),
        quote_literal(&conninfo),
        quote_ident(publication)
    )
}

pub fn disable_subscription(name: &str) -> String {
    format!("ALTER SUBSCRIPTION {} DISABLE", quote_ident(name))
}

pub fn detach_subscription_slot(name: &str) -> String {
    format!(
        "ALTER SUBSCRIPTION {} SET (slot_name = NONE)",
        quote_ident(name)
    )
}

pub fn drop_subscription(name: &str) -> String {
    format!("DROP SUBSCRIPTION {}", quote_ident(name))
}

pub fn drop_replication_slot(slot: &str) -> String {
    format!("SELECT pg_drop_replication_slot({})", quote_literal(slot))
}

/// Build a collision-free subscription name for a follower/leader pair.
///
/// Names follow the `{follower}_{leader}_{stamp}` scheme where the stamp
/// is the wall-clock nanosecond timestamp, bumped whenever the clock
/// reads a value already handed out, so two subscriptions created back to
/// back never share a name.
pub fn subscription_name(follower: &NodeId, leader: &NodeId) -> String {
    format!("{}_{}_{}", follower, leader, next_stamp())
}

static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

fn next_stamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;

    let mut prev = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_STAMP.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => prev = observed,
        }
    }
}

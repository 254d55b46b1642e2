//! pgflock daemon.
//!
//! Bootstraps the replication topology from a configuration file, then
//! supervises it until the process is told to stop: connect to every
//! node, elect an initial leader, publish the topology record, reconcile
//! replication, and spawn one health observer per node.

mod config;

use anyhow::Context;
use clap::Parser;
use flock_coordination::FileSystemStore;
use flock_core::{CoordinationStore, NodeAddr, NodeId};
use flock_postgres::{parse_dsn, PgNodeClient};
use flock_topology::{
    HealthObserver, Node, NodePool, Reconciler, TopologyContext, TopologyPublisher, UniformRandom,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Command-line arguments for the pgflock daemon.
#[derive(Parser, Debug)]
#[command(
    name = "flockd",
    version,
    about = "PostgreSQL replication topology manager"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "flockd.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)
        .with_context(|| format!("failed to read config file {}", cli.config))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    // Connect to every configured node. Bootstrap cannot manage a
    // partial topology, so any unreachable node aborts the process.
    let mut nodes = Vec::with_capacity(config.nodes.len());
    for node_config in &config.nodes {
        let client = PgNodeClient::connect(&node_config.dsn)
            .await
            .with_context(|| format!("failed to connect to node {}", node_config.id))?;
        let conn = parse_dsn(&node_config.dsn)
            .with_context(|| format!("invalid DSN for node {}", node_config.id))?;
        info!("connected to node {}", node_config.id);

        nodes.push(Arc::new(Node::new(
            NodeId::new(&node_config.id),
            NodeAddr::new(&node_config.internal_host, node_config.internal_port),
            conn,
            Arc::new(client),
        )));
    }
    info!("all {} nodes connected", nodes.len());

    let store: Arc<dyn CoordinationStore> = Arc::new(
        FileSystemStore::new(&config.store.data_dir)
            .await
            .context("failed to open coordination store")?,
    );

    let ctx = Arc::new(TopologyContext::new(
        NodePool::new(nodes),
        TopologyPublisher::new(store, config.store.record_path.clone()),
        Reconciler::new(),
        Box::new(UniformRandom::new()),
    ));

    let leader = ctx
        .pool
        .elect_leader(ctx.election.as_ref())
        .context("initial leader election failed")?;
    info!("node {} is the leader", leader.id());

    ctx.publisher
        .publish(&ctx.pool)
        .await
        .context("failed to publish initial topology record")?;
    info!("topology record published to {}", ctx.publisher.path());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut observers = Vec::with_capacity(ctx.pool.len());
    for node in ctx.pool.snapshot() {
        let observer = HealthObserver::new(node, Arc::clone(&ctx), config.probe.interval());
        observers.push(observer.spawn(shutdown_rx.clone()));
    }

    let leader_report = ctx.reconciler.run_leader_queries(&ctx.pool).await?;
    let follower_report = ctx.reconciler.run_follower_queries(&ctx.pool).await?;
    let soft_failures = leader_report.failures.len() + follower_report.failures.len();
    if soft_failures > 0 {
        warn!("initial reconciliation finished with {soft_failures} soft failures");
    } else {
        info!("initial reconciliation complete");
    }

    wait_for_shutdown().await;
    info!("shutdown signal received, stopping observers");
    let _ = shutdown_tx.send(true);
    for observer in observers {
        let _ = observer.await;
    }

    Ok(())
}

/// Block until SIGTERM or SIGINT.
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(err) => {
                warn!("failed to install SIGTERM handler: {err}");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

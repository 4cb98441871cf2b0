//! Fleetwatch - server fleet dashboard core
//!
//! Demo driver that seeds a dashboard store, runs the simulation
//! drivers against it, and logs fleet snapshots the way a presentation
//! layer would read them.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fleetwatch::data;
use fleetwatch::sim::{Simulator, SimulatorConfig};
use fleetwatch::DashboardStore;

#[derive(Parser, Debug)]
#[command(name = "fleetwatch")]
#[command(version)]
#[command(about = "Server fleet dashboard core - demo driver", long_about = None)]
struct Cli {
    /// Seconds between notification simulation ticks
    #[arg(long, default_value = "10", env = "FLEETWATCH_NOTIFICATION_INTERVAL")]
    notification_interval: u64,

    /// Seconds between metric jitter ticks
    #[arg(long, default_value = "5", env = "FLEETWATCH_JITTER_INTERVAL")]
    jitter_interval: u64,

    /// Probability that a notification tick emits, in [0, 1]
    #[arg(long, default_value = "0.2", env = "FLEETWATCH_NOTIFICATION_PROBABILITY")]
    notification_probability: f64,

    /// Seconds between logged fleet snapshots
    #[arg(long, default_value = "15", env = "FLEETWATCH_SNAPSHOT_INTERVAL")]
    snapshot_interval: u64,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Fleetwatch...");

    let store = Arc::new(DashboardStore::new());
    store
        .init(|| Ok(data::seed_data()))
        .map_err(|e| anyhow::anyhow!("Failed to seed dashboard: {}", e))?;

    let simulator = Arc::new(Simulator::new(
        store.clone(),
        SimulatorConfig {
            notification_interval_secs: cli.notification_interval,
            jitter_interval_secs: cli.jitter_interval,
            notification_probability: cli.notification_probability,
        },
    ));
    let handle = simulator.start();

    info!("Press Ctrl+C to stop");

    let mut snapshot_timer =
        tokio::time::interval(std::time::Duration::from_secs(cli.snapshot_interval));

    loop {
        tokio::select! {
            _ = snapshot_timer.tick() => {
                let stats = store.stats();
                info!(
                    "Fleet: {} servers ({} online, {} warning, {} offline), {} unread alerts, avg cpu {}%, avg memory {}%",
                    stats.total_servers,
                    stats.online_servers,
                    stats.warning_servers,
                    stats.offline_servers,
                    stats.total_alerts,
                    stats.average_cpu,
                    stats.average_memory,
                );
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down...");
                break;
            }
        }
    }

    handle.stop().await;
    store.dispose();
    info!("Fleetwatch stopped.");

    Ok(())
}

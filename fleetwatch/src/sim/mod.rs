//! Simulation Drivers
//!
//! Background drivers that keep a seeded dashboard alive:
//! - Periodically synthesizes a random notification (probability-gated)
//! - Periodically jitters every server's metrics as one batch
//!
//! The tick bodies are plain synchronous functions taking an explicit
//! rng, so tests drive them deterministically without wall-clock timers;
//! `start` merely schedules them on tokio intervals. The returned handle
//! must be stopped when the consuming view goes away, otherwise the
//! drivers keep mutating state nobody reads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fleetwatch_shared::Notification;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::data;
use crate::store::DashboardStore;

/// Simulation cadence and gating
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// How often to consider emitting a notification (in seconds)
    pub notification_interval_secs: u64,
    /// How often to jitter the fleet metrics (in seconds)
    pub jitter_interval_secs: u64,
    /// Probability that a notification tick actually emits, in [0, 1]
    pub notification_probability: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            notification_interval_secs: 10,
            jitter_interval_secs: 5,
            notification_probability: 0.2,
        }
    }
}

/// Timer-driven mutation source for a dashboard store
pub struct Simulator {
    store: Arc<DashboardStore>,
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a simulator over a shared store.
    pub fn new(store: Arc<DashboardStore>, config: SimulatorConfig) -> Self {
        Self { store, config }
    }

    /// One notification tick: with the configured probability, synthesize
    /// a random notification and prepend it through the store. Returns
    /// the emitted notification, if any.
    pub fn notification_tick(&self, rng: &mut impl Rng) -> Option<Notification> {
        if rng.gen::<f64>() >= self.config.notification_probability {
            return None;
        }

        let servers = self.store.servers();
        let notification = data::random_notification(&servers, rng)?;
        info!("Simulated notification: {}", notification.title);
        self.store.add_notification(notification.clone());
        Some(notification)
    }

    /// One jitter tick: perturb every server's metrics in one batch.
    pub fn jitter_tick(&self, rng: &mut impl Rng) {
        self.store.apply_jitter(rng);
    }

    /// Spawn the driver task multiplexing both timers.
    pub fn start(self: Arc<Self>) -> SimulatorHandle {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let simulator = self.clone();

        info!(
            "Starting simulation drivers (notifications: {}s @ p={}, jitter: {}s)",
            self.config.notification_interval_secs,
            self.config.notification_probability,
            self.config.jitter_interval_secs
        );

        let task = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut notification_timer = tokio::time::interval(Duration::from_secs(
                simulator.config.notification_interval_secs,
            ));
            let mut jitter_timer = tokio::time::interval(Duration::from_secs(
                simulator.config.jitter_interval_secs,
            ));

            loop {
                tokio::select! {
                    _ = notification_timer.tick() => {
                        if !flag.load(Ordering::Relaxed) {
                            break;
                        }
                        simulator.notification_tick(&mut rng);
                    }
                    _ = jitter_timer.tick() => {
                        if !flag.load(Ordering::Relaxed) {
                            break;
                        }
                        simulator.jitter_tick(&mut rng);
                    }
                }
            }

            debug!("Simulation drivers stopped");
        });

        SimulatorHandle { running, task }
    }
}

/// Cancellation handle for the spawned driver task
pub struct SimulatorHandle {
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl SimulatorHandle {
    /// Stop the drivers and wait for the task to wind down. No mutation
    /// is issued after this returns.
    pub async fn stop(self) {
        self.running.store(false, Ordering::Relaxed);
        self.task.abort();
        // a JoinError from the abort is the expected outcome here
        let _ = self.task.await;
        info!("Simulation drivers shut down");
    }

    /// True once the driver task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_simulator(config: SimulatorConfig) -> Simulator {
        let store = Arc::new(DashboardStore::new());
        store.init(|| Ok(data::seed_data())).expect("seed init");
        Simulator::new(store, config)
    }

    #[test]
    fn test_notification_tick_probability_gate() {
        let never = seeded_simulator(SimulatorConfig {
            notification_probability: 0.0,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(never.notification_tick(&mut rng).is_none());
        }
        assert_eq!(never.store.notifications().len(), 5);

        let always = seeded_simulator(SimulatorConfig {
            notification_probability: 1.0,
            ..Default::default()
        });
        let emitted = always.notification_tick(&mut rng).unwrap();
        assert_eq!(always.store.notifications()[0].id, emitted.id);
        assert_eq!(always.store.notifications().len(), 6);
    }

    #[test]
    fn test_notification_tick_empty_fleet() {
        let store = Arc::new(DashboardStore::new());
        store
            .init(|| {
                Ok(fleetwatch_shared::SeedData {
                    servers: vec![],
                    notifications: vec![],
                })
            })
            .unwrap();

        let simulator = Simulator::new(
            store.clone(),
            SimulatorConfig {
                notification_probability: 1.0,
                ..Default::default()
            },
        );

        let mut rng = StdRng::seed_from_u64(2);
        assert!(simulator.notification_tick(&mut rng).is_none());
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_jitter_tick_updates_fleet() {
        let simulator = seeded_simulator(SimulatorConfig::default());
        let mut rng = StdRng::seed_from_u64(3);
        let before = simulator.store.servers();

        simulator.jitter_tick(&mut rng);
        let after = simulator.store.servers();

        assert!(after
            .iter()
            .zip(&before)
            .all(|(a, b)| a.last_updated >= b.last_updated));
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let simulator = Arc::new(seeded_simulator(SimulatorConfig {
            // long intervals so the test exercises only scheduling and shutdown
            notification_interval_secs: 3600,
            jitter_interval_secs: 3600,
            notification_probability: 0.0,
        }));

        let handle = simulator.start();
        assert!(!handle.is_finished());

        handle.stop().await;
    }
}

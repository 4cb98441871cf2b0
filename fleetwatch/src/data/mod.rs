//! Synthetic Fleet Data
//!
//! Fixture data and generators feeding the dashboard:
//! - The seed fleet and seed notifications supplied at startup
//! - Construction of newly linked servers
//! - Random notifications for the simulation driver
//! - Synthetic time-series samples for resource charts
//!
//! Everything here is simulated; none of it is a faithful historical
//! record and callers must not treat it as persisted truth.

use chrono::{DateTime, Duration, Utc};
use fleetwatch_shared::{
    Notification, NotificationKind, ResourceSample, SeedData, Server, ServerStatus,
};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Canned event messages used by the notification simulator.
const FLEET_EVENTS: [&str; 8] = [
    "Server performance degraded",
    "Network latency increased",
    "Disk space running low",
    "Backup completed successfully",
    "Security scan completed",
    "New deployment successful",
    "SSL certificate expiring soon",
    "Database connection restored",
];

/// Construct a freshly linked server.
///
/// Mints a new unique id, starts `Online`, and randomizes the metrics
/// within plausible startup ranges. Input validation (name length,
/// duplicate detection) is the store's responsibility, not this
/// constructor's.
pub fn new_server(
    name: impl Into<String>,
    region: impl Into<String>,
    account: impl Into<String>,
    rng: &mut impl Rng,
) -> Server {
    Server {
        id: Uuid::new_v4().to_string(),
        name: name.into(),
        status: ServerStatus::Online,
        region: region.into(),
        account: account.into(),
        cpu: rng.gen_range(20.0..=60.0),
        memory: rng.gen_range(30.0..=70.0),
        disk: rng.gen_range(40.0..=80.0),
        network: rng.gen_range(25.0..=65.0),
        uptime: rng.gen_range(0.0..=100.0),
        last_updated: Utc::now(),
    }
}

/// Synthesize one random notification about a random server.
///
/// Returns `None` for an empty fleet.
pub fn random_notification(servers: &[Server], rng: &mut impl Rng) -> Option<Notification> {
    let server = servers.choose(rng)?;
    let kind = *[
        NotificationKind::Info,
        NotificationKind::Warning,
        NotificationKind::Error,
        NotificationKind::Success,
    ]
    .choose(rng)
    .expect("kinds are non-empty");
    let event = FLEET_EVENTS.choose(rng).expect("events are non-empty");

    Some(Notification {
        id: Uuid::new_v4().to_string(),
        kind,
        title: format!("{} Alert", kind.label()),
        message: format!("{} on {}", event, server.name),
        timestamp: Utc::now(),
        read: false,
        server_id: Some(server.id.clone()),
    })
}

// =============================================================================
// Seed Fixtures
// =============================================================================

/// The complete startup fixture set.
pub fn seed_data() -> SeedData {
    SeedData {
        servers: seed_servers(),
        notifications: seed_notifications(),
    }
}

/// The fixture fleet: eight servers across regions, accounts and statuses.
pub fn seed_servers() -> Vec<Server> {
    let now = Utc::now();

    let server = |id: &str,
                  name: &str,
                  status: ServerStatus,
                  region: &str,
                  account: &str,
                  metrics: [f64; 4],
                  uptime: f64,
                  age_secs: i64| Server {
        id: id.to_string(),
        name: name.to_string(),
        status,
        region: region.to_string(),
        account: account.to_string(),
        cpu: metrics[0],
        memory: metrics[1],
        disk: metrics[2],
        network: metrics[3],
        uptime,
        last_updated: now - Duration::seconds(age_secs),
    };

    vec![
        server(
            "1", "web-server-01", ServerStatus::Online, "us-north-1", "production",
            [45.0, 67.0, 23.0, 89.0], 99.8, 120,
        ),
        server(
            "2", "db-server-01", ServerStatus::Online, "us-east-2", "production",
            [78.0, 92.0, 45.0, 34.0], 99.9, 60,
        ),
        server(
            "3", "app-server-01", ServerStatus::Warning, "us-south-2", "staging",
            [95.0, 88.0, 67.0, 56.0], 98.5, 30,
        ),
        server(
            "4", "cache-server-01", ServerStatus::Offline, "eu-west-1", "production",
            [0.0, 0.0, 0.0, 0.0], 0.0, 300,
        ),
        server(
            "5", "load-balancer-01", ServerStatus::Maintenance, "us-north-1", "production",
            [12.0, 23.0, 8.0, 15.0], 99.2, 600,
        ),
        server(
            "6", "monitoring-server-01", ServerStatus::Online, "us-south-2", "monitoring",
            [23.0, 45.0, 12.0, 78.0], 99.7, 60,
        ),
        server(
            "7", "backup-server-01", ServerStatus::Online, "eu-west-2", "backup",
            [34.0, 56.0, 89.0, 23.0], 99.1, 180,
        ),
        server(
            "8", "api-server-01", ServerStatus::Warning, "us-east-3", "production",
            [87.0, 94.0, 34.0, 67.0], 97.8, 45,
        ),
    ]
}

/// The fixture notifications, newest first.
pub fn seed_notifications() -> Vec<Notification> {
    let now = Utc::now();

    let notification = |id: &str,
                        kind: NotificationKind,
                        title: &str,
                        message: &str,
                        age_mins: i64,
                        read: bool,
                        server_id: Option<&str>| Notification {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        message: message.to_string(),
        timestamp: now - Duration::minutes(age_mins),
        read,
        server_id: server_id.map(str::to_string),
    };

    vec![
        notification(
            "1",
            NotificationKind::Warning,
            "High CPU Usage",
            "Server app-server-01 is experiencing high CPU usage (95%)",
            2,
            false,
            Some("3"),
        ),
        notification(
            "2",
            NotificationKind::Error,
            "Server Offline",
            "Server cache-server-01 is offline and not responding",
            5,
            false,
            Some("4"),
        ),
        notification(
            "3",
            NotificationKind::Info,
            "Maintenance Scheduled",
            "Scheduled maintenance for load-balancer-01 completed successfully",
            10,
            true,
            Some("5"),
        ),
        notification(
            "4",
            NotificationKind::Warning,
            "High Memory Usage",
            "Server db-server-01 memory usage is at 92%",
            15,
            false,
            Some("2"),
        ),
        notification(
            "5",
            NotificationKind::Success,
            "Backup Completed",
            "Daily backup completed successfully for all production servers",
            30,
            true,
            None,
        ),
    ]
}

// =============================================================================
// Time Series
// =============================================================================

/// Spacing of synthetic time-series samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// One sample per hour
    Hourly,
    /// One sample per day
    Daily,
}

impl SeriesKind {
    fn step(&self) -> Duration {
        match self {
            SeriesKind::Hourly => Duration::hours(1),
            SeriesKind::Daily => Duration::days(1),
        }
    }
}

/// A lazy, finite sequence of synthetic resource samples ending at a
/// fixed instant, oldest first.
///
/// Each metric is randomized independently within its band on every
/// pass; `restart` yields a fresh pass over the same window. Chart
/// input only.
#[derive(Debug)]
pub struct TimeSeries<R: Rng> {
    kind: SeriesKind,
    points: u32,
    end: DateTime<Utc>,
    emitted: u32,
    rng: R,
    // pristine copy of the rng as handed in, so restart reproduces a pass
    initial: R,
}

impl<R: Rng + Clone> TimeSeries<R> {
    /// Series ending at `end` with `points` samples.
    pub fn with_end(kind: SeriesKind, points: u32, end: DateTime<Utc>, rng: R) -> Self {
        Self {
            kind,
            points,
            end,
            emitted: 0,
            rng: rng.clone(),
            initial: rng,
        }
    }

    /// A fresh pass over the same window.
    pub fn restart(&self) -> Self {
        Self {
            kind: self.kind,
            points: self.points,
            end: self.end,
            emitted: 0,
            rng: self.initial.clone(),
            initial: self.initial.clone(),
        }
    }
}

impl<R: Rng> Iterator for TimeSeries<R> {
    type Item = ResourceSample;

    fn next(&mut self) -> Option<ResourceSample> {
        if self.emitted >= self.points {
            return None;
        }

        let offset = self.points - 1 - self.emitted;
        let timestamp = self.end - self.kind.step() * offset as i32;
        self.emitted += 1;

        Some(ResourceSample {
            timestamp,
            cpu: self.rng.gen_range(20.0..=95.0),
            memory: self.rng.gen_range(30.0..=90.0),
            disk: self.rng.gen_range(10.0..=85.0),
            network: self.rng.gen_range(15.0..=95.0),
            alerts: self.rng.gen_range(0..=5),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.points - self.emitted) as usize;
        (remaining, Some(remaining))
    }
}

/// Series of `points` samples ending now.
pub fn time_series(kind: SeriesKind, points: u32) -> TimeSeries<rand::rngs::StdRng> {
    use rand::SeedableRng;
    TimeSeries::with_end(kind, points, Utc::now(), rand::rngs::StdRng::from_entropy())
}

/// Collected convenience form of [`time_series`].
pub fn build_time_series(kind: SeriesKind, points: u32) -> Vec<ResourceSample> {
    time_series(kind, points).collect()
}

//! Dashboard State Store
//!
//! The single owner of the canonical server and notification
//! collections. All writes funnel through the mutation methods below and
//! each mutation is atomic behind the write lock; reads derive their
//! views from the current collections on every call, so a view can never
//! disagree with the data it was computed from.
//!
//! The store is an explicitly constructed handle: callers create one,
//! `init` it with seed data, share it (typically behind an `Arc`) with
//! whichever layers need it, and `dispose` it when the consumer goes
//! away. Tests create isolated instances the same way.

use fleetwatch_shared::{
    DashboardStats, DayGroup, FilterUpdate, MetricKind, MetricPoint, Notification, RegionalStats,
    SearchFilters, SeedData, Server, ServerStatus,
};
use parking_lot::RwLock;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::data;
use crate::views;

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Malformed mutation input; the mutation rejects without altering state
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server name collides case-insensitively with an existing entry
    #[error("A server named '{0}' is already linked")]
    DuplicateName(String),

    /// Seed data could not be loaded; derivation reads are stale until a
    /// retry succeeds
    #[error("Initialization error: {0}")]
    Initialization(String),
}

/// Request to link a new server to the fleet
#[derive(Debug, Clone, Deserialize)]
pub struct NewServerRequest {
    /// Human-readable name, unique within the fleet (case-insensitive)
    pub name: String,
    /// Deployment region
    pub region: String,
    /// Owning account
    pub account: String,
}

/// Minimum accepted server name length, after trimming.
const MIN_NAME_LEN: usize = 3;

// Jitter half-widths per metric, percent points per tick.
fn jitter_half_width(kind: MetricKind) -> f64 {
    match kind {
        MetricKind::Cpu => 5.0,
        MetricKind::Memory => 4.0,
        MetricKind::Disk => 2.5,
        MetricKind::Network => 7.5,
    }
}

#[derive(Debug, Default)]
struct DashboardState {
    servers: Vec<Server>,
    notifications: Vec<Notification>,
    filters: SearchFilters,
    loading: bool,
    error: Option<String>,
}

/// The dashboard state container
#[derive(Debug)]
pub struct DashboardStore {
    state: RwLock<DashboardState>,
}

impl DashboardStore {
    /// Create an empty store, marked loading until `init` completes.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DashboardState {
                loading: true,
                ..Default::default()
            }),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Populate the store from a seed loader.
    ///
    /// On success the collections are replaced wholesale and the loading
    /// flag clears. On failure the store records the error, leaves the
    /// collections empty, and returns the error to the caller; retrying
    /// is simply calling `init` again.
    pub fn init<F>(&self, load: F) -> Result<(), StoreError>
    where
        F: FnOnce() -> Result<SeedData, StoreError>,
    {
        self.state.write().loading = true;

        match load() {
            Ok(seed) => {
                let mut state = self.state.write();
                info!(
                    "Store initialized with {} servers and {} notifications",
                    seed.servers.len(),
                    seed.notifications.len()
                );
                state.servers = seed.servers;
                state.notifications = seed.notifications;
                state.error = None;
                state.loading = false;
                Ok(())
            }
            Err(e) => {
                let mut state = self.state.write();
                warn!("Store initialization failed: {}", e);
                state.error = Some(e.to_string());
                state.loading = false;
                Err(e)
            }
        }
    }

    /// Clear all state. The store can be re-`init`ed afterwards.
    pub fn dispose(&self) {
        let mut state = self.state.write();
        *state = DashboardState::default();
        debug!("Store disposed");
    }

    /// True while initial population is in progress.
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// The initialization error, if the last `init` failed.
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    // =========================================================================
    // Reads (derived on every call)
    // =========================================================================

    /// Snapshot of the full fleet.
    pub fn servers(&self) -> Vec<Server> {
        self.state.read().servers.clone()
    }

    /// Snapshot of all notifications, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.state.read().notifications.clone()
    }

    /// The active filters.
    pub fn filters(&self) -> SearchFilters {
        self.state.read().filters.clone()
    }

    /// The fleet narrowed by the active filters.
    pub fn filtered_servers(&self) -> Vec<Server> {
        let state = self.state.read();
        views::filtered_servers(&state.servers, &state.filters)
    }

    /// Aggregate statistics, recomputed from the canonical collections.
    pub fn stats(&self) -> DashboardStats {
        let state = self.state.read();
        views::compute_stats(&state.servers, &state.notifications)
    }

    /// Notifications grouped by local calendar day, newest day first.
    pub fn grouped_notifications(&self) -> Vec<DayGroup> {
        views::group_notifications_by_day(&self.state.read().notifications)
    }

    /// Count of unread notifications.
    pub fn unread_count(&self) -> u32 {
        views::unread_count(&self.state.read().notifications)
    }

    /// Per-region aggregates for comparison views.
    pub fn regional_stats(&self) -> Vec<RegionalStats> {
        views::regional_aggregate(&self.state.read().servers)
    }

    /// Per-server values of one metric, chart-ready.
    pub fn metric_breakdown(&self, kind: MetricKind) -> Vec<MetricPoint> {
        views::metric_breakdown(&self.state.read().servers, kind)
    }

    // =========================================================================
    // Mutations (atomic, never partially applied)
    // =========================================================================

    /// Link a new server to the fleet.
    ///
    /// Rejects with `Validation` for a trimmed name shorter than three
    /// characters or an empty region/account, and with `DuplicateName`
    /// when the name collides case-insensitively with an existing
    /// server. On success the server is appended and returned.
    pub fn link_server(
        &self,
        request: NewServerRequest,
        rng: &mut impl Rng,
    ) -> Result<Server, StoreError> {
        let name = request.name.trim();
        if name.len() < MIN_NAME_LEN {
            return Err(StoreError::Validation(format!(
                "Server name must be at least {MIN_NAME_LEN} characters"
            )));
        }
        if request.region.trim().is_empty() {
            return Err(StoreError::Validation("Region is required".to_string()));
        }
        if request.account.trim().is_empty() {
            return Err(StoreError::Validation("Account is required".to_string()));
        }

        let mut state = self.state.write();

        let lowered = name.to_lowercase();
        if state.servers.iter().any(|s| s.name.to_lowercase() == lowered) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let server = data::new_server(name, request.region.trim(), request.account.trim(), rng);
        info!("Linked new server: {} ({})", server.name, server.region);
        state.servers.push(server.clone());

        Ok(server)
    }

    /// Set a server online or offline by exact name; no-op when absent.
    pub fn toggle_server_status(&self, name: &str, online: bool) {
        let mut state = self.state.write();

        match state.servers.iter_mut().find(|s| s.name == name) {
            Some(server) => {
                server.status = if online {
                    ServerStatus::Online
                } else {
                    ServerStatus::Offline
                };
                info!("Server '{}' set {}", name, server.status);
            }
            None => debug!("Toggle ignored for unknown server '{}'", name),
        }
    }

    /// Mark a notification read; no-op when absent, idempotent otherwise.
    pub fn mark_notification_read(&self, id: &str) {
        let mut state = self.state.write();

        if let Some(notification) = state.notifications.iter_mut().find(|n| n.id == id) {
            notification.read = true;
        }
    }

    /// Remove a notification; no-op when absent.
    pub fn dismiss_notification(&self, id: &str) {
        self.state.write().notifications.retain(|n| n.id != id);
    }

    /// Empty the notification collection.
    pub fn clear_all_notifications(&self) {
        let mut state = self.state.write();
        let dropped = state.notifications.len();
        state.notifications.clear();
        info!("Cleared {} notifications", dropped);
    }

    /// Prepend a notification (most-recent-first ordering contract).
    pub fn add_notification(&self, notification: Notification) {
        self.state.write().notifications.insert(0, notification);
    }

    /// Shallow-merge a partial filter update; untouched dimensions keep
    /// their prior value. Values are not validated against the data
    /// domain — an unknown region simply yields an empty filtered set.
    pub fn set_filters(&self, update: FilterUpdate) {
        self.state.write().filters.apply(update);
    }

    /// Drop all filter constraints.
    pub fn clear_filters(&self) {
        self.state.write().filters = SearchFilters::default();
    }

    /// Perturb every server's metrics by a bounded random delta, clamped
    /// to [0, 100], as one atomic batch; no reader observes a partially
    /// jittered fleet.
    pub fn apply_jitter(&self, rng: &mut impl Rng) {
        let mut state = self.state.write();
        let now = chrono::Utc::now();

        for server in &mut state.servers {
            for kind in MetricKind::ALL {
                let half_width = jitter_half_width(kind);
                let delta = rng.gen_range(-half_width..=half_width);
                server.set_metric(kind, server.metric(kind) + delta);
            }
            server.last_updated = now;
        }

        debug!("Applied metric jitter to {} servers", state.servers.len());
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

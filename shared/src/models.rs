//! Entity model for the Fleetwatch dashboard
//!
//! These types are the canonical records the store owns (servers,
//! notifications) plus the filter parameters and derived-view records
//! the presentation layer consumes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Server Model
// =============================================================================

/// Server status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    Offline,
    Warning,
    Maintenance,
}

impl std::fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerStatus::Online => write!(f, "online"),
            ServerStatus::Offline => write!(f, "offline"),
            ServerStatus::Warning => write!(f, "warning"),
            ServerStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

/// One of the four tracked resource metrics.
///
/// Metric selection is always expressed through this enum so that every
/// consumer (jitter, chart transforms, regional aggregation) is checked
/// exhaustively against the known metric set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
    Network,
}

impl MetricKind {
    /// All metric kinds, in display order.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Cpu,
        MetricKind::Memory,
        MetricKind::Disk,
        MetricKind::Network,
    ];
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::Cpu => write!(f, "cpu"),
            MetricKind::Memory => write!(f, "memory"),
            MetricKind::Disk => write!(f, "disk"),
            MetricKind::Network => write!(f, "network"),
        }
    }
}

/// A monitored server instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Unique, stable identifier; never reused
    pub id: String,

    /// Display name, unique within the fleet (case-insensitive)
    pub name: String,

    /// Current status; changes only via explicit toggle or creation default
    pub status: ServerStatus,

    /// Deployment region (e.g. "us-north-1")
    pub region: String,

    /// Owning account (e.g. "production")
    pub account: String,

    /// CPU utilization, percent in [0, 100]
    pub cpu: f64,

    /// Memory utilization, percent in [0, 100]
    pub memory: f64,

    /// Disk utilization, percent in [0, 100]
    pub disk: f64,

    /// Network utilization, percent in [0, 100]
    pub network: f64,

    /// Uptime percentage in [0, 100]
    pub uptime: f64,

    /// When the metrics were last refreshed
    pub last_updated: DateTime<Utc>,
}

impl Server {
    /// Read one metric by kind.
    pub fn metric(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Cpu => self.cpu,
            MetricKind::Memory => self.memory,
            MetricKind::Disk => self.disk,
            MetricKind::Network => self.network,
        }
    }

    /// Write one metric by kind, clamped to [0, 100].
    pub fn set_metric(&mut self, kind: MetricKind, value: f64) {
        let value = value.clamp(0.0, 100.0);
        match kind {
            MetricKind::Cpu => self.cpu = value,
            MetricKind::Memory => self.memory = value,
            MetricKind::Disk => self.disk = value,
            MetricKind::Network => self.network = value,
        }
    }
}

// =============================================================================
// Notification Model
// =============================================================================

/// Notification severity/kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    Info,
}

impl NotificationKind {
    /// Capitalized label for titles ("Warning Alert", etc.)
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Success => "Success",
            NotificationKind::Warning => "Warning",
            NotificationKind::Error => "Error",
            NotificationKind::Info => "Info",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Info => write!(f, "info"),
        }
    }
}

/// A timestamped fleet event with read/unread state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: String,

    /// Severity/kind of the event
    pub kind: NotificationKind,

    /// Short title
    pub title: String,

    /// Human-readable detail
    pub message: String,

    /// When the event occurred
    pub timestamp: DateTime<Utc>,

    /// Whether the user has seen it; transitions false -> true only
    pub read: bool,

    /// Weak reference to the server concerned; dangling allowed if the
    /// server was removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
}

// =============================================================================
// Filters
// =============================================================================

/// Active filter/search parameters
///
/// Each field is one independently-toggleable constraint; `None` means
/// no constraint on that dimension. Ephemeral, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Exact status match
    pub status: Option<ServerStatus>,

    /// Exact region match
    pub region: Option<String>,

    /// Exact account match
    pub account: Option<String>,

    /// Case-insensitive substring match against name, region, or account
    pub search_term: Option<String>,
}

impl SearchFilters {
    /// True when no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.region.is_none()
            && self.account.is_none()
            && self.search_term.is_none()
    }

    /// Shallow-merge a partial update into the current filters.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(region) = update.region {
            self.region = region;
        }
        if let Some(account) = update.account {
            self.account = account;
        }
        if let Some(search_term) = update.search_term {
            self.search_term = search_term;
        }
    }
}

/// Partial filter update
///
/// Outer `None` leaves a dimension untouched, `Some(None)` clears it,
/// `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterUpdate {
    pub status: Option<Option<ServerStatus>>,
    pub region: Option<Option<String>>,
    pub account: Option<Option<String>>,
    pub search_term: Option<Option<String>>,
}

impl FilterUpdate {
    pub fn status(status: ServerStatus) -> Self {
        Self {
            status: Some(Some(status)),
            ..Default::default()
        }
    }

    pub fn region(region: impl Into<String>) -> Self {
        Self {
            region: Some(Some(region.into())),
            ..Default::default()
        }
    }

    pub fn account(account: impl Into<String>) -> Self {
        Self {
            account: Some(Some(account.into())),
            ..Default::default()
        }
    }

    pub fn search_term(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(Some(term.into())),
            ..Default::default()
        }
    }
}

// =============================================================================
// Derived Views
// =============================================================================

/// Aggregated fleet statistics
///
/// Always derived from the canonical server/notification collections;
/// never edited by hand. `maintenance` servers count toward the total
/// but toward none of the three named status buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_servers: u32,
    pub online_servers: u32,
    pub offline_servers: u32,
    pub warning_servers: u32,

    /// Count of unread notifications
    pub total_alerts: u32,

    /// Fleet mean CPU, rounded to the nearest integer; 0 for an empty fleet
    pub average_cpu: u32,

    /// Fleet mean memory, rounded to the nearest integer; 0 for an empty fleet
    pub average_memory: u32,

    /// Fleet mean uptime percentage; 0 for an empty fleet
    pub uptime: f64,
}

/// One synthetic time-series point for resource charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSample {
    pub timestamp: DateTime<Utc>,
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
    pub alerts: u32,
}

/// Per-region aggregate for regional comparison views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalStats {
    pub region: String,

    /// Number of servers in the region
    pub servers: u32,

    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
}

/// Per-server value of a single metric, chart-ready
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    /// Server display name
    pub name: String,

    pub metric: MetricKind,
    pub value: f64,
}

/// Notifications of one local calendar day, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub notifications: Vec<Notification>,
}

/// Initial fixture data supplied to the store at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub servers: Vec<Server>,
    pub notifications: Vec<Notification>,
}

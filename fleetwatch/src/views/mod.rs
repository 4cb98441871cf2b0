//! Derived Views
//!
//! Pure functions from the canonical collections (plus filter state) to
//! the views the presentation layer consumes:
//! - Filtered server lists
//! - Aggregated fleet statistics
//! - Notification groupings and unread counts
//! - Regional and per-metric chart inputs
//!
//! Every function here is referentially transparent given its inputs and
//! safe to call repeatedly on every read.

use chrono::Local;
use fleetwatch_shared::{
    DashboardStats, DayGroup, MetricKind, MetricPoint, Notification, RegionalStats, SearchFilters,
    Server, ServerStatus,
};

/// Apply the active filters to the fleet, AND-ed across dimensions.
///
/// `status`, `region` and `account` match exactly; `search_term` is a
/// case-insensitive substring match against name, region or account. An
/// unset dimension imposes no constraint; an empty result is a valid
/// outcome, not an error.
pub fn filtered_servers(servers: &[Server], filters: &SearchFilters) -> Vec<Server> {
    servers
        .iter()
        .filter(|server| {
            if let Some(status) = filters.status {
                if server.status != status {
                    return false;
                }
            }
            if let Some(ref region) = filters.region {
                if server.region != *region {
                    return false;
                }
            }
            if let Some(ref account) = filters.account {
                if server.account != *account {
                    return false;
                }
            }
            if let Some(ref term) = filters.search_term {
                let term = term.to_lowercase();
                let matches = server.name.to_lowercase().contains(&term)
                    || server.region.to_lowercase().contains(&term)
                    || server.account.to_lowercase().contains(&term);
                if !matches {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Recompute the aggregate fleet statistics from scratch.
///
/// Servers in `maintenance` count toward the total but toward none of
/// the three named status buckets. Averages are defined as 0 for an
/// empty fleet.
pub fn compute_stats(servers: &[Server], notifications: &[Notification]) -> DashboardStats {
    let total = servers.len() as u32;

    let count_status = |status: ServerStatus| -> u32 {
        servers.iter().filter(|s| s.status == status).count() as u32
    };

    let (average_cpu, average_memory, uptime) = if servers.is_empty() {
        (0, 0, 0.0)
    } else {
        let n = servers.len() as f64;
        let cpu: f64 = servers.iter().map(|s| s.cpu).sum();
        let memory: f64 = servers.iter().map(|s| s.memory).sum();
        let up: f64 = servers.iter().map(|s| s.uptime).sum();
        ((cpu / n).round() as u32, (memory / n).round() as u32, up / n)
    };

    DashboardStats {
        total_servers: total,
        online_servers: count_status(ServerStatus::Online),
        offline_servers: count_status(ServerStatus::Offline),
        warning_servers: count_status(ServerStatus::Warning),
        total_alerts: unread_count(notifications),
        average_cpu,
        average_memory,
        uptime,
    }
}

/// Group notifications by local calendar day.
///
/// Groups appear in first-seen order; since the collection is kept
/// most-recent-first, the newest day comes first and each group's
/// notifications stay newest-first.
pub fn group_notifications_by_day(notifications: &[Notification]) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for notification in notifications {
        let date = notification.timestamp.with_timezone(&Local).date_naive();

        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.notifications.push(notification.clone()),
            None => groups.push(DayGroup {
                date,
                notifications: vec![notification.clone()],
            }),
        }
    }

    groups
}

/// Count of unread notifications.
pub fn unread_count(notifications: &[Notification]) -> u32 {
    notifications.iter().filter(|n| !n.read).count() as u32
}

/// Group servers by region with per-metric means, first-occurrence order.
pub fn regional_aggregate(servers: &[Server]) -> Vec<RegionalStats> {
    let mut regions: Vec<(String, Vec<&Server>)> = Vec::new();

    for server in servers {
        match regions.iter_mut().find(|(region, _)| *region == server.region) {
            Some((_, members)) => members.push(server),
            None => regions.push((server.region.clone(), vec![server])),
        }
    }

    regions
        .into_iter()
        .map(|(region, members)| {
            let n = members.len() as f64;
            let mean = |kind: MetricKind| -> f64 {
                members.iter().map(|s| s.metric(kind)).sum::<f64>() / n
            };

            RegionalStats {
                region,
                servers: members.len() as u32,
                cpu: mean(MetricKind::Cpu),
                memory: mean(MetricKind::Memory),
                disk: mean(MetricKind::Disk),
                network: mean(MetricKind::Network),
            }
        })
        .collect()
}

/// Per-server values of one metric, chart-ready, in fleet order.
pub fn metric_breakdown(servers: &[Server], kind: MetricKind) -> Vec<MetricPoint> {
    servers
        .iter()
        .map(|server| MetricPoint {
            name: server.name.clone(),
            metric: kind,
            value: server.metric(kind),
        })
        .collect()
}

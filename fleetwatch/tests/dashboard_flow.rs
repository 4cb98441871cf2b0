//! Dashboard Flow Tests
//!
//! End-to-end scenarios through the public store API: seed, filter,
//! link, notify, simulate, and tear down, the way a presentation layer
//! would drive it.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use fleetwatch::data::{self, SeriesKind};
use fleetwatch::sim::{Simulator, SimulatorConfig};
use fleetwatch::store::{NewServerRequest, StoreError};
use fleetwatch::DashboardStore;
use fleetwatch_shared::{FilterUpdate, SeedData, Server, ServerStatus};

fn seeded_store() -> Arc<DashboardStore> {
    let store = Arc::new(DashboardStore::new());
    store.init(|| Ok(data::seed_data())).expect("seed init");
    store
}

fn minimal_server(name: &str, cpu: f64) -> Server {
    Server {
        id: format!("id-{name}"),
        name: name.to_string(),
        status: ServerStatus::Online,
        region: "us-north-1".to_string(),
        account: "production".to_string(),
        cpu,
        memory: 50.0,
        disk: 40.0,
        network: 30.0,
        uptime: 99.5,
        last_updated: chrono::Utc::now(),
    }
}

#[test]
fn search_narrows_to_matching_server() {
    let store = Arc::new(DashboardStore::new());
    store
        .init(|| {
            Ok(SeedData {
                servers: vec![minimal_server("web-1", 45.0), minimal_server("db-1", 78.0)],
                notifications: vec![],
            })
        })
        .unwrap();

    store.set_filters(FilterUpdate::search_term("web"));

    let filtered = store.filtered_servers();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "web-1");

    store.clear_filters();
    assert_eq!(store.filtered_servers().len(), 2);
}

#[test]
fn linking_and_duplicate_rejection() {
    let store = seeded_store();
    let mut rng = StdRng::seed_from_u64(100);

    let linked = store
        .link_server(
            NewServerRequest {
                name: "edge-server-01".to_string(),
                region: "ap-southeast-1".to_string(),
                account: "staging".to_string(),
            },
            &mut rng,
        )
        .expect("link succeeds");
    assert_eq!(store.servers().len(), 9);

    // relinking the same name in a different case fails and changes nothing
    let result = store.link_server(
        NewServerRequest {
            name: "EDGE-SERVER-01".to_string(),
            region: "eu-west-1".to_string(),
            account: "production".to_string(),
        },
        &mut rng,
    );
    assert!(matches!(result, Err(StoreError::DuplicateName(_))));
    assert_eq!(store.servers().len(), 9);

    // the new server participates in every derived view
    let stats = store.stats();
    assert_eq!(stats.total_servers, 9);
    assert!(store
        .regional_stats()
        .iter()
        .any(|r| r.region == linked.region));
}

#[test]
fn notification_lifecycle() {
    let store = seeded_store();
    let mut rng = StdRng::seed_from_u64(200);

    let unread_before = store.unread_count();
    let servers = store.servers();
    let incoming = data::random_notification(&servers, &mut rng).unwrap();
    let id = incoming.id.clone();

    store.add_notification(incoming);
    assert_eq!(store.unread_count(), unread_before + 1);

    // newest entry heads the newest day group
    let groups = store.grouped_notifications();
    assert_eq!(groups[0].notifications[0].id, id);

    store.mark_notification_read(&id);
    assert_eq!(store.unread_count(), unread_before);

    store.dismiss_notification(&id);
    assert!(store.notifications().iter().all(|n| n.id != id));

    store.clear_all_notifications();
    assert_eq!(store.unread_count(), 0);
    assert!(store.grouped_notifications().is_empty());
}

#[test]
fn simulated_ticks_feed_derived_views() {
    let store = seeded_store();
    let simulator = Simulator::new(
        store.clone(),
        SimulatorConfig {
            notification_probability: 1.0,
            ..Default::default()
        },
    );
    let mut rng = StdRng::seed_from_u64(300);

    let alerts_before = store.stats().total_alerts;
    simulator.notification_tick(&mut rng).expect("emits at p=1");
    simulator.jitter_tick(&mut rng);

    let stats = store.stats();
    assert_eq!(stats.total_alerts, alerts_before + 1);
    assert_eq!(stats.total_servers, 8);

    for server in store.servers() {
        assert!((0.0..=100.0).contains(&server.cpu));
        assert!((0.0..=100.0).contains(&server.network));
    }
}

#[tokio::test]
async fn drivers_stop_cleanly() {
    let store = seeded_store();
    let simulator = Arc::new(Simulator::new(
        store.clone(),
        SimulatorConfig {
            notification_interval_secs: 3600,
            jitter_interval_secs: 3600,
            notification_probability: 0.0,
        },
    ));

    let handle = simulator.start();
    handle.stop().await;

    // store is still usable after the drivers are gone
    assert_eq!(store.servers().len(), 8);
    store.dispose();
    assert!(store.servers().is_empty());
}

#[test]
fn chart_series_is_bounded_and_spaced() {
    let samples = data::build_time_series(SeriesKind::Hourly, 24);
    assert_eq!(samples.len(), 24);

    for pair in samples.windows(2) {
        assert_eq!(
            pair[1].timestamp - pair[0].timestamp,
            chrono::Duration::hours(1)
        );
    }

    let daily = data::build_time_series(SeriesKind::Daily, 7);
    assert_eq!(daily.len(), 7);
}

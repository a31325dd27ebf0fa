use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::services::AppointmentSource;
use shared_storage::{keys, LocalStore};
use shared_utils::test_utils::{test_config, test_config_with_api};

fn remote_record(id: &str, patient: &str) -> serde_json::Value {
    json!({
        "id": id,
        "doctorId": "dr1",
        "patientId": patient,
        "date": "2026-03-02",
        "timeRange": "09:00 AM",
        "status": "confirmed"
    })
}

#[tokio::test]
async fn refresh_fetches_and_caches_upstream_appointments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [remote_record("a1", "p1"), remote_record("a2", "p2")]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config_with_api(dir.path(), &server.uri());
    let store = Arc::new(LocalStore::open(&config.data_dir).expect("store"));
    let source = AppointmentSource::new(&config, store.clone());

    let appointments = source.refresh().await.expect("refresh");
    assert_eq!(appointments.len(), 2);

    // The fetched set is persisted for offline fallback.
    let cached: Option<Vec<serde_json::Value>> = store.get(keys::APPOINTMENTS).expect("get");
    assert_eq!(cached.map(|c| c.len()), Some(2));
}

#[tokio::test]
async fn refresh_accepts_bare_array_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([remote_record("a1", "p1")])),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config_with_api(dir.path(), &server.uri());
    let store = Arc::new(LocalStore::open(&config.data_dir).expect("store"));
    let source = AppointmentSource::new(&config, store);

    let appointments = source.refresh().await.expect("refresh");
    assert_eq!(appointments.len(), 1);
}

#[tokio::test]
async fn upstream_failure_falls_back_to_cached_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config_with_api(dir.path(), &server.uri());
    let store = Arc::new(LocalStore::open(&config.data_dir).expect("store"));
    store
        .set(keys::APPOINTMENTS, &vec![remote_record("a9", "p9")])
        .expect("seed cache");

    let source = AppointmentSource::new(&config, store);
    let appointments = source.refresh().await.expect("refresh");

    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].id, "a9");
}

#[tokio::test]
async fn upstream_failure_without_cache_is_empty_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Unroutable base URL: connection refused.
    let config = test_config_with_api(dir.path(), "http://127.0.0.1:1");
    let store = Arc::new(LocalStore::open(&config.data_dir).expect("store"));

    let source = AppointmentSource::new(&config, store);
    let appointments = source.refresh().await.expect("refresh");
    assert!(appointments.is_empty());
}

#[tokio::test]
async fn stale_response_never_overwrites_a_newer_refresh() {
    let server = MockServer::start().await;
    // The first request gets an outdated batch, held back long enough for
    // a second refresh to start and finish in the meantime.
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [remote_record("a1", "p1-outdated")] }))
                .set_delay(Duration::from_millis(800)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [remote_record("a1", "p1-current"), remote_record("a2", "p2")]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config_with_api(dir.path(), &server.uri());
    let store = Arc::new(LocalStore::open(&config.data_dir).expect("store"));
    let source = Arc::new(AppointmentSource::new(&config, store.clone()));

    let slow = tokio::spawn({
        let source = source.clone();
        async move { source.refresh().await }
    });
    // Let the slow request reach the server before starting the second one.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let fresh = source.refresh().await.expect("fresh refresh");
    let late = slow.await.expect("join").expect("slow refresh");

    // The delayed response is discarded: both callers and the persisted
    // document reflect the later batch.
    assert_eq!(fresh.len(), 2);
    assert_eq!(late, fresh);

    let cached: Vec<serde_json::Value> = store
        .get(keys::APPOINTMENTS)
        .expect("get")
        .expect("cached document");
    assert_eq!(cached.len(), 2);
    let a1 = cached.iter().find(|r| r["id"] == "a1").expect("a1");
    assert_eq!(a1["patientId"], "p1-current");
}

#[tokio::test]
async fn remote_and_cached_duplicates_are_merged_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [remote_record("a1", "p1-fresh")]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config_with_api(dir.path(), &server.uri());
    let store = Arc::new(LocalStore::open(&config.data_dir).expect("store"));
    store
        .set(
            keys::APPOINTMENTS,
            &vec![remote_record("a1", "p1-stale"), remote_record("a2", "p2")],
        )
        .expect("seed cache");

    let source = AppointmentSource::new(&config, store);
    let appointments = source.refresh().await.expect("refresh");

    assert_eq!(appointments.len(), 2);
    let a1 = appointments.iter().find(|a| a.id == "a1").expect("a1");
    assert_eq!(a1.patient_id, "p1-fresh");
}

#[tokio::test]
async fn unconfigured_source_reads_local_state_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());
    let store = Arc::new(LocalStore::open(&config.data_dir).expect("store"));
    store
        .set(keys::APPOINTMENTS, &vec![remote_record("a1", "p1")])
        .expect("seed cache");

    let source = AppointmentSource::new(&config, store);
    let appointments = source.refresh().await.expect("refresh");
    assert_eq!(appointments.len(), 1);
}

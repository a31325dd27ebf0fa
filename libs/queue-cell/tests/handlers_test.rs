use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use queue_cell::handlers::*;
use queue_cell::models::{EnqueueRequest, IndexRequest, RegisterDoctorRequest};
use queue_cell::QueueService;
use shared_models::AppError;
use shared_storage::LocalStore;

fn register_request(doctor_id: &str) -> RegisterDoctorRequest {
    RegisterDoctorRequest {
        doctor_id: doctor_id.to_string(),
        doctor_name: "Dr. Mehta".to_string(),
        department: "General Medicine".to_string(),
    }
}

async fn test_state(dir: &tempfile::TempDir) -> QueueState {
    let store = Arc::new(LocalStore::open(dir.path()).expect("open store"));
    Arc::new(QueueService::load(store).expect("load service"))
}

#[tokio::test]
async fn register_enqueue_and_call_flow() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = test_state(&dir).await;

    register_doctor(State(state.clone()), Json(register_request("dr1")))
        .await
        .expect("register");

    enqueue_patient(
        State(state.clone()),
        Path("dr1".to_string()),
        Json(EnqueueRequest { patient: "Asha Rao".to_string() }),
    )
    .await
    .expect("enqueue");

    let Json(body) = call_next(State(state.clone()), Path("dr1".to_string()))
        .await
        .expect("call next");
    assert_eq!(body["success"], true);
    assert_eq!(body["result"]["outcome"], "called");
    assert_eq!(body["result"]["patient"], "Asha Rao");

    let Json(dashboard) = get_dashboard(State(state)).await.expect("dashboard");
    let doctors = dashboard["doctors"].as_array().expect("doctors array");
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0]["waiting"], 0);
    assert_eq!(doctors[0]["completedToday"], 1);
}

#[tokio::test]
async fn call_next_on_empty_queue_reports_warning_not_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = test_state(&dir).await;
    register_doctor(State(state.clone()), Json(register_request("dr1")))
        .await
        .expect("register");

    let Json(body) = call_next(State(state), Path("dr1".to_string()))
        .await
        .expect("call next");
    assert_eq!(body["success"], false);
    assert_eq!(body["result"]["outcome"], "queue-empty");
    assert_eq!(body["warning"], "No patients are waiting");
}

#[tokio::test]
async fn unknown_doctor_maps_to_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = test_state(&dir).await;

    let result = call_next(State(state), Path("ghost".to_string())).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn out_of_range_index_maps_to_bad_request() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = test_state(&dir).await;
    register_doctor(State(state.clone()), Json(register_request("dr1")))
        .await
        .expect("register");

    let result = remove_patient(
        State(state),
        Path("dr1".to_string()),
        Json(IndexRequest { index: 3 }),
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn blank_patient_name_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = test_state(&dir).await;
    register_doctor(State(state.clone()), Json(register_request("dr1")))
        .await
        .expect("register");

    let result = enqueue_patient(
        State(state),
        Path("dr1".to_string()),
        Json(EnqueueRequest { patient: "   ".to_string() }),
    )
    .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

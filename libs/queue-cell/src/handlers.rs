use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

use shared_models::AppError;

use crate::error::QueueError;
use crate::models::{
    CallOutcome, DoctorQueueSummary, EnqueueRequest, IndexRequest, RegisterDoctorRequest,
};
use crate::services::QueueService;

pub type QueueState = Arc<QueueService>;

fn map_error(e: QueueError) -> AppError {
    match e {
        QueueError::DoctorNotFound(id) => AppError::NotFound(format!("Doctor {}", id)),
        QueueError::IndexOutOfBounds { .. } => AppError::BadRequest(e.to_string()),
        QueueError::Storage(e) => AppError::Storage(e.to_string()),
    }
}

/// Dashboard snapshot of every doctor queue.
pub async fn get_dashboard(State(service): State<QueueState>) -> Result<Json<Value>, AppError> {
    let doctors = service.snapshot().await;
    Ok(Json(json!({ "doctors": doctors })))
}

/// Seed a doctor summary and waiting list.
pub async fn register_doctor(
    State(service): State<QueueState>,
    Json(request): Json<RegisterDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    if request.doctor_id.trim().is_empty() {
        return Err(AppError::ValidationError("doctorId must not be empty".to_string()));
    }

    let summary = DoctorQueueSummary::new(
        request.doctor_id.clone(),
        request.doctor_name,
        request.department,
    );
    service.register_doctor(summary).await.map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "doctorId": request.doctor_id
    })))
}

/// Call the next waiting patient for a doctor.
pub async fn call_next(
    State(service): State<QueueState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    info!("Call-next request for doctor {}", doctor_id);

    let outcome = service.call_next(&doctor_id).await.map_err(map_error)?;
    let warning = match &outcome {
        CallOutcome::Called { .. } => None,
        CallOutcome::QueueEmpty => Some("No patients are waiting"),
        CallOutcome::DoctorUnavailable => Some("Doctor is not active"),
    };

    Ok(Json(json!({
        "success": warning.is_none(),
        "result": outcome,
        "warning": warning
    })))
}

pub async fn enqueue_patient(
    State(service): State<QueueState>,
    Path(doctor_id): Path<String>,
    Json(request): Json<EnqueueRequest>,
) -> Result<Json<Value>, AppError> {
    if request.patient.trim().is_empty() {
        return Err(AppError::ValidationError("patient must not be empty".to_string()));
    }

    service
        .enqueue(&doctor_id, request.patient)
        .await
        .map_err(map_error)?;
    Ok(Json(json!({ "success": true })))
}

pub async fn move_patient_up(
    State(service): State<QueueState>,
    Path(doctor_id): Path<String>,
    Json(request): Json<IndexRequest>,
) -> Result<Json<Value>, AppError> {
    service
        .move_up(&doctor_id, request.index)
        .await
        .map_err(map_error)?;
    Ok(Json(json!({ "success": true })))
}

pub async fn remove_patient(
    State(service): State<QueueState>,
    Path(doctor_id): Path<String>,
    Json(request): Json<IndexRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = service
        .remove(&doctor_id, request.index)
        .await
        .map_err(map_error)?;
    Ok(Json(json!({ "success": true, "removed": patient })))
}

pub async fn toggle_doctor_status(
    State(service): State<QueueState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let status = service.toggle_status(&doctor_id).await.map_err(map_error)?;
    Ok(Json(json!({ "success": true, "status": status })))
}

pub async fn activate_doctor(
    State(service): State<QueueState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let status = service.activate(&doctor_id).await.map_err(map_error)?;
    Ok(Json(json!({ "success": true, "status": status })))
}

pub async fn deactivate_doctor(
    State(service): State<QueueState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let status = service.deactivate(&doctor_id).await.map_err(map_error)?;
    Ok(Json(json!({ "success": true, "status": status })))
}

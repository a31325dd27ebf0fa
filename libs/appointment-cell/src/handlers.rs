use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

use shared_models::{AppError, StaffSettings};
use shared_storage::LocalStore;
use shared_utils::format_wait_time;

use crate::error::AppointmentError;
use crate::models::WaitEstimate;
use crate::services::{estimate_wait_minutes, queue_position, AppointmentSource};

#[derive(Clone)]
pub struct AppointmentState {
    pub source: Arc<AppointmentSource>,
    pub store: Arc<LocalStore>,
}

fn map_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::NotFound(id) => AppError::NotFound(format!("Appointment {}", id)),
        AppointmentError::BadTimeSlot(e) => AppError::ValidationError(e.to_string()),
        AppointmentError::Storage(e) => AppError::Storage(e.to_string()),
        // Refresh degrades to the cache on upstream failures, so this arm
        // is only exhaustiveness.
        AppointmentError::Upstream(msg) => AppError::Internal(msg),
    }
}

/// List the current normalized appointment set.
pub async fn list_appointments(
    State(state): State<AppointmentState>,
) -> Result<Json<Value>, AppError> {
    let appointments = state.source.refresh().await.map_err(map_error)?;

    Ok(Json(json!({
        "data": appointments,
        "count": appointments.len()
    })))
}

/// Queue position and estimated wait for one appointment.
pub async fn get_wait_estimate(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<WaitEstimate>, AppError> {
    info!("Wait estimate request for appointment {}", appointment_id);

    let appointments = state.source.refresh().await.map_err(map_error)?;
    let target = appointments
        .iter()
        .find(|appt| appt.id == appointment_id)
        .ok_or_else(|| AppError::NotFound(format!("Appointment {}", appointment_id)))?;

    let position = queue_position(target, &appointments).map_err(map_error)?;

    let settings = StaffSettings::load(&state.store);
    let wait_minutes = estimate_wait_minutes(position, settings.avg_consultation_minutes);

    Ok(Json(WaitEstimate {
        appointment_id,
        position,
        wait_minutes,
        display: format_wait_time(wait_minutes as i64),
    }))
}

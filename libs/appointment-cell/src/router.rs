use axum::{routing::get, Router};

use crate::handlers::{get_wait_estimate, list_appointments, AppointmentState};

pub fn create_appointment_router(state: AppointmentState) -> Router {
    Router::new()
        .route("/", get(list_appointments))
        .route("/{appointment_id}/wait", get(get_wait_estimate))
        .with_state(state)
}

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    activate_doctor, call_next, deactivate_doctor, enqueue_patient, get_dashboard,
    move_patient_up, register_doctor, remove_patient, toggle_doctor_status, QueueState,
};

pub fn create_queue_router(state: QueueState) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/doctors", post(register_doctor))
        .route("/{doctor_id}/call-next", post(call_next))
        .route("/{doctor_id}/enqueue", post(enqueue_patient))
        .route("/{doctor_id}/move-up", post(move_patient_up))
        .route("/{doctor_id}/remove", post(remove_patient))
        .route("/{doctor_id}/toggle-status", post(toggle_doctor_status))
        .route("/{doctor_id}/activate", post(activate_doctor))
        .route("/{doctor_id}/deactivate", post(deactivate_doctor))
        .with_state(state)
}

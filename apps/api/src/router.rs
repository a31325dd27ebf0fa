use axum::{routing::get, Router};

use appointment_cell::{create_appointment_router, AppointmentState};
use payment_cell::{create_payment_router, PaymentState};
use queue_cell::{create_queue_router, QueueState};

pub fn create_router(
    appointments: AppointmentState,
    queue: QueueState,
    payments: PaymentState,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic desk API is running!" }))
        .nest("/appointments", create_appointment_router(appointments))
        .nest("/queue", create_queue_router(queue))
        .nest("/payments", create_payment_router(payments))
}

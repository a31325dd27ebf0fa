use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{get_drawer_summary, list_payments, record_payment, PaymentState};

pub fn create_payment_router(state: PaymentState) -> Router {
    Router::new()
        .route("/", post(record_payment).get(list_payments))
        .route("/drawer", get(get_drawer_summary))
        .with_state(state)
}

use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use tracing::info;

use shared_models::{AppError, StaffSettings};
use shared_storage::LocalStore;

use crate::error::PaymentError;
use crate::models::{DrawerSummary, RecordPaymentRequest};
use crate::services::PaymentLedger;

#[derive(Clone)]
pub struct PaymentState {
    pub ledger: Arc<PaymentLedger>,
    pub store: Arc<LocalStore>,
}

fn map_error(e: PaymentError) -> AppError {
    match e {
        PaymentError::Validation(msg) => AppError::ValidationError(msg),
        PaymentError::Storage(e) => AppError::Storage(e.to_string()),
    }
}

/// Record one payment and return the generated receipt.
pub async fn record_payment(
    State(state): State<PaymentState>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<Value>, AppError> {
    info!("Payment recording request for {}", request.patient_name);

    let record = state.ledger.record(request).await.map_err(map_error)?;
    Ok(Json(json!({
        "success": true,
        "payment": record
    })))
}

/// Full transaction history, oldest first.
pub async fn list_payments(State(state): State<PaymentState>) -> Result<Json<Value>, AppError> {
    let payments = state.ledger.list().await;
    Ok(Json(json!({
        "data": payments,
        "count": payments.len()
    })))
}

/// Cash drawer totals, seeded with the configured opening balance.
pub async fn get_drawer_summary(
    State(state): State<PaymentState>,
) -> Result<Json<DrawerSummary>, AppError> {
    let settings = StaffSettings::load(&state.store);
    let summary = state
        .ledger
        .drawer_summary(settings.drawer_opening_balance)
        .await;
    Ok(Json(summary))
}

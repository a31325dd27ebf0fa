//! Append-only payment ledger persisted under `transactionHistory`.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use shared_storage::{keys, LocalStore};

use crate::error::PaymentError;
use crate::models::{DrawerSummary, PaymentRecord, RecordPaymentRequest};

pub struct PaymentLedger {
    store: Arc<LocalStore>,
    records: RwLock<Vec<PaymentRecord>>,
}

impl PaymentLedger {
    pub fn load(store: Arc<LocalStore>) -> Result<Self, PaymentError> {
        let records: Vec<PaymentRecord> =
            store.get(keys::TRANSACTION_HISTORY)?.unwrap_or_default();
        Ok(Self {
            store,
            records: RwLock::new(records),
        })
    }

    /// Appends a new payment record and persists the ledger before
    /// returning it. Existing records are never touched.
    pub async fn record(&self, request: RecordPaymentRequest) -> Result<PaymentRecord, PaymentError> {
        if request.patient_name.trim().is_empty() {
            return Err(PaymentError::Validation(
                "patientName must not be empty".to_string(),
            ));
        }
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(PaymentError::Validation(
                "amount must be a positive number".to_string(),
            ));
        }

        let recorded_at = Utc::now();
        let record = PaymentRecord {
            id: Uuid::new_v4(),
            patient_name: request.patient_name,
            phone: request.phone,
            amount: request.amount,
            method: request.method,
            receipt_number: format!("RCP-{}", recorded_at.timestamp_millis()),
            recorded_at,
            staff: request.staff,
        };

        let mut records = self.records.write().await;
        records.push(record.clone());
        self.store.set(keys::TRANSACTION_HISTORY, &*records)?;

        info!(
            "Recorded {} payment of {:.2} (receipt {})",
            record.method, record.amount, record.receipt_number
        );
        Ok(record)
    }

    pub async fn list(&self) -> Vec<PaymentRecord> {
        self.records.read().await.clone()
    }

    /// Totals derived from the ledger for end-of-shift drawer counting.
    pub async fn drawer_summary(&self, opening_balance: f64) -> DrawerSummary {
        let records = self.records.read().await;

        let (cash, digital) = records.iter().fold((0.0, 0.0), |(cash, digital), r| {
            if r.method.is_cash() {
                (cash + r.amount, digital)
            } else {
                (cash, digital + r.amount)
            }
        });

        DrawerSummary {
            opening_balance,
            cash_collected: cash,
            digital_collected: digital,
            cash_in_drawer: opening_balance + cash,
            transactions: records.len(),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Upi,
    Card,
    Netbanking,
    Cheque,
}

impl PaymentMethod {
    pub fn is_cash(self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Upi => write!(f, "upi"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Netbanking => write!(f, "netbanking"),
            PaymentMethod::Cheque => write!(f, "cheque"),
        }
    }
}

/// One recorded front-desk payment. Records are append-only: once written
/// they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: Uuid,
    pub patient_name: String,
    pub phone: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub receipt_number: String,
    pub recorded_at: DateTime<Utc>,
    pub staff: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub patient_name: String,
    #[serde(default)]
    pub phone: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub staff: String,
}

/// Cash drawer reconciliation view derived from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerSummary {
    pub opening_balance: f64,
    pub cash_collected: f64,
    pub digital_collected: f64,
    pub cash_in_drawer: f64,
    pub transactions: usize,
}

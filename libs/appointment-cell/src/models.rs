use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized appointment record.
///
/// Ids are opaque strings because the upstream API mixes server-assigned
/// and client-generated identifiers; they are unique within a loaded set
/// (duplicates are filtered on load, see [`crate::services::normalize`]).
/// Within one `(doctor_id, date)` pair the `time_slot` display string is
/// the canonical ordering key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub date: NaiveDate,
    /// 12-hour display slot, e.g. "09:00 AM".
    pub time_slot: String,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::InProgress => write!(f, "in-progress"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Settled independently of the appointment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
}

/// Display/reorder hint only; never enforced automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
    Urgent,
}

/// Response body for the wait lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitEstimate {
    pub appointment_id: String,
    pub position: usize,
    pub wait_minutes: u32,
    pub display: String,
}

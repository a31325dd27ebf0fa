use serde::{Deserialize, Serialize};
use std::fmt;

/// Desk-side availability of a doctor.
///
/// `Active` and `Break` toggle into each other; either can be deactivated,
/// and only an explicit activate leaves `Inactive`. An inactive doctor
/// cannot be handed the next patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorStatus {
    Active,
    Break,
    Inactive,
}

impl DoctorStatus {
    pub fn toggled(self) -> Self {
        match self {
            DoctorStatus::Active => DoctorStatus::Break,
            DoctorStatus::Break => DoctorStatus::Active,
            DoctorStatus::Inactive => DoctorStatus::Inactive,
        }
    }
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctorStatus::Active => write!(f, "active"),
            DoctorStatus::Break => write!(f, "break"),
            DoctorStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Per-doctor aggregate counters shown on the dashboard.
///
/// The waiting count is deliberately absent: it is derived from the live
/// queue length at read time, so the two can never drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorQueueSummary {
    pub doctor_id: String,
    pub doctor_name: String,
    pub department: String,
    pub status: DoctorStatus,
    pub completed_today: u32,
    pub avg_wait_time: String,
    /// Percentage, 0-100.
    pub efficiency: u8,
}

impl DoctorQueueSummary {
    pub fn new(doctor_id: impl Into<String>, doctor_name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            doctor_name: doctor_name.into(),
            department: department.into(),
            status: DoctorStatus::Active,
            completed_today: 0,
            avg_wait_time: "20 minutes".to_string(),
            efficiency: 90,
        }
    }
}

/// Result of a call-next attempt. An empty queue or an unavailable doctor
/// is a reported warning, not an error: state is untouched and the desk
/// stays usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum CallOutcome {
    Called { patient: String },
    QueueEmpty,
    DoctorUnavailable,
}

/// Dashboard view of one doctor: the summary plus values derived from the
/// live waiting list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorQueueView {
    #[serde(flatten)]
    pub summary: DoctorQueueSummary,
    pub waiting: usize,
    pub patients: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDoctorRequest {
    pub doctor_id: String,
    pub doctor_name: String,
    pub department: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnqueueRequest {
    pub patient: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexRequest {
    pub index: usize,
}

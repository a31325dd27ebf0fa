//! Normalization boundary between loosely-typed upstream/persisted records
//! and the strict [`Appointment`] model.
//!
//! The upstream API and older persisted documents disagree on field names
//! (`timeRange` vs `time`, `name` vs `firstName`+`lastName`) and on the
//! response envelope (`{ "data": [...] }` vs a bare array). Everything is
//! mapped or rejected here so the rest of the workspace only ever sees the
//! strict shape.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

use crate::models::{Appointment, AppointmentStatus, PaymentStatus, Priority};

/// Wire shapes the upstream endpoints produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Wrapped { data: Vec<Value> },
    Bare(Vec<Value>),
}

impl Envelope {
    pub fn into_records(self) -> Vec<Value> {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(records) => records,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAppointment {
    id: Option<Value>,
    #[serde(alias = "doctorId")]
    doctor_id: Option<Value>,
    #[serde(alias = "patientId")]
    patient_id: Option<Value>,
    name: Option<String>,
    #[serde(alias = "firstName")]
    first_name: Option<String>,
    #[serde(alias = "lastName")]
    last_name: Option<String>,
    date: Option<String>,
    #[serde(alias = "timeRange", alias = "timeSlot")]
    time_range: Option<String>,
    time: Option<String>,
    status: Option<String>,
    #[serde(alias = "paymentStatus")]
    payment_status: Option<String>,
    priority: Option<String>,
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // Either a plain calendar date or a timestamp whose leading segment is one.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok())
}

fn parse_status(raw: Option<&str>) -> AppointmentStatus {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("confirmed") => AppointmentStatus::Confirmed,
        Some("in-progress") | Some("in_progress") => AppointmentStatus::InProgress,
        Some("completed") => AppointmentStatus::Completed,
        Some("cancelled") | Some("canceled") => AppointmentStatus::Cancelled,
        _ => AppointmentStatus::Pending,
    }
}

fn parse_payment_status(raw: Option<&str>) -> PaymentStatus {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("paid") => PaymentStatus::Paid,
        Some("failed") => PaymentStatus::Failed,
        _ => PaymentStatus::Pending,
    }
}

fn parse_priority(raw: Option<&str>) -> Priority {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("high") => Priority::High,
        Some("urgent") => Priority::Urgent,
        _ => Priority::Normal,
    }
}

/// Maps one raw record into the strict model, or rejects it.
///
/// A record without an id, doctor reference, date, or time slot cannot be
/// placed in any queue and is dropped with a warning. Missing statuses
/// default rather than reject, matching how partially-filled walk-in
/// records arrive.
pub fn normalize_record(value: &Value) -> Option<Appointment> {
    let raw: RawAppointment = match serde_json::from_value(value.clone()) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Dropping unreadable appointment record: {}", e);
            return None;
        }
    };

    let id = raw.id.as_ref().and_then(id_text)?;
    let doctor_id = raw.doctor_id.as_ref().and_then(id_text)?;
    let date = raw.date.as_deref().and_then(parse_date)?;
    let time_slot = raw.time_range.or(raw.time)?;

    // The patient reference is whichever identifying field the source
    // carried: an id, a display name, or a split first/last name.
    let patient_id = raw
        .patient_id
        .as_ref()
        .and_then(id_text)
        .or(raw.name)
        .or_else(|| match (raw.first_name, raw.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first),
            (None, Some(last)) => Some(last),
            (None, None) => None,
        })?;

    Some(Appointment {
        id,
        doctor_id,
        patient_id,
        date,
        time_slot,
        status: parse_status(raw.status.as_deref()),
        payment_status: parse_payment_status(raw.payment_status.as_deref()),
        priority: parse_priority(raw.priority.as_deref()),
    })
}

/// Normalizes a batch of raw records, dropping unusable ones and
/// deduplicating by id.
pub fn normalize_records(records: Vec<Value>) -> Vec<Appointment> {
    let total = records.len();
    let normalized: Vec<Appointment> = records.iter().filter_map(normalize_record).collect();
    if normalized.len() < total {
        warn!(
            "Dropped {} of {} appointment records during normalization",
            total - normalized.len(),
            total
        );
    }
    dedupe_by_id(normalized)
}

/// Keeps exactly one appointment per id, preserving first-seen order.
///
/// Duplicate ids show up when the remote batch and the local fallback both
/// contain the same appointment.
pub fn dedupe_by_id(appointments: Vec<Appointment>) -> Vec<Appointment> {
    let mut seen = HashSet::new();
    appointments
        .into_iter()
        .filter(|appt| seen.insert(appt.id.clone()))
        .collect()
}

use thiserror::Error;

use shared_storage::StoreError;
use shared_utils::TimeParseError;

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Unorderable time slot: {0}")]
    BadTimeSlot(#[from] TimeParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Upstream appointment fetch failed: {0}")]
    Upstream(String),
}

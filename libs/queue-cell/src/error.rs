use thiserror::Error;

use shared_storage::StoreError;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Queue index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

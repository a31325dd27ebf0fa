//! JSON key-document store backing the front-desk state.
//!
//! Each key maps to one `{key}.json` file under the configured data
//! directory. This mirrors the browser-local-storage layout the desk
//! application originally persisted into: one JSON document per key,
//! last write wins, no merging. Concurrent writers from a second process
//! are explicitly not coordinated.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

pub mod keys {
    pub const APPOINTMENTS: &str = "appointments";
    pub const PATIENT_QUEUES: &str = "patientQueues";
    pub const QUEUE_STATE: &str = "queueState";
    pub const TRANSACTION_HISTORY: &str = "transactionHistory";
    pub const STAFF_SETTINGS: &str = "staffSettings";

    /// Per-user appointment documents written by the patient booking
    /// flow. The desk service never touches them; the key lives here so
    /// the shared storage layout has one definition.
    pub fn user_appointments(user_id: &str) -> String {
        format!("userAppointments_{}", user_id)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// File-backed key-document store with change notification.
pub struct LocalStore {
    dir: PathBuf,
    revision: watch::Sender<u64>,
}

impl LocalStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let (revision, _) = watch::channel(0);
        Ok(Self { dir, revision })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Reads and decodes the document at `key`.
    ///
    /// A missing document is `Ok(None)`. A document that fails to read or
    /// parse is also `Ok(None)`: corrupt persisted state is treated as
    /// "no data" and logged, never surfaced as a fatal error.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read stored document '{}': {}", key, e);
                return Ok(None);
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding corrupt stored document '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    /// Serializes `value` and replaces the document at `key`.
    ///
    /// The write goes through a sibling temp file and a rename, so a crash
    /// mid-write leaves the previous document intact.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(value)?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));

        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &path)?;

        self.revision.send_modify(|rev| *rev += 1);
        debug!("Persisted document '{}'", key);
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
            self.revision.send_modify(|rev| *rev += 1);
        }
        Ok(())
    }

    /// Change feed: the receiver observes a new revision number after
    /// every successful write, so views can re-read persisted state.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

//! Per-doctor waiting lists and dashboard counters.
//!
//! One writer at a time by construction: every mutation takes the write
//! lock, applies the change, and persists synchronously before returning,
//! so the stored documents always reflect the last completed operation.
//! A second process writing the same data directory is last-write-wins
//! with no merge.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use shared_storage::{keys, LocalStore};

use crate::error::QueueError;
use crate::models::{CallOutcome, DoctorQueueSummary, DoctorQueueView, DoctorStatus};

#[derive(Debug, Default)]
struct QueueInner {
    queues: HashMap<String, VecDeque<String>>,
    summaries: HashMap<String, DoctorQueueSummary>,
}

pub struct QueueService {
    store: Arc<LocalStore>,
    inner: RwLock<QueueInner>,
}

impl QueueService {
    /// Opens the service over previously persisted state; missing or
    /// corrupt documents start empty.
    pub fn load(store: Arc<LocalStore>) -> Result<Self, QueueError> {
        let inner = Self::read_persisted(&store)?;
        info!(
            "Queue state loaded: {} doctors, {} waiting lists",
            inner.summaries.len(),
            inner.queues.len()
        );
        Ok(Self {
            store,
            inner: RwLock::new(inner),
        })
    }

    fn read_persisted(store: &LocalStore) -> Result<QueueInner, QueueError> {
        let queues: HashMap<String, VecDeque<String>> =
            store.get(keys::PATIENT_QUEUES)?.unwrap_or_default();
        let summaries: Vec<DoctorQueueSummary> =
            store.get(keys::QUEUE_STATE)?.unwrap_or_default();
        Ok(QueueInner {
            queues,
            summaries: summaries
                .into_iter()
                .map(|s| (s.doctor_id.clone(), s))
                .collect(),
        })
    }

    fn persist(&self, inner: &QueueInner) -> Result<(), QueueError> {
        self.store.set(keys::PATIENT_QUEUES, &inner.queues)?;

        let mut summaries: Vec<&DoctorQueueSummary> = inner.summaries.values().collect();
        summaries.sort_by(|a, b| a.doctor_id.cmp(&b.doctor_id));
        self.store.set(keys::QUEUE_STATE, &summaries)?;
        Ok(())
    }

    /// Seeds a doctor's summary and an empty waiting list. Idempotent:
    /// re-registering an already known doctor changes nothing.
    pub async fn register_doctor(&self, summary: DoctorQueueSummary) -> Result<(), QueueError> {
        let mut inner = self.inner.write().await;
        let doctor_id = summary.doctor_id.clone();

        inner.queues.entry(doctor_id.clone()).or_default();
        if inner.summaries.contains_key(&doctor_id) {
            debug!("Doctor {} already registered", doctor_id);
            return Ok(());
        }
        inner.summaries.insert(doctor_id.clone(), summary);
        self.persist(&inner)?;
        info!("Registered doctor {}", doctor_id);
        Ok(())
    }

    /// Hands the head of the waiting list to the doctor.
    ///
    /// An empty list or a non-active doctor leaves all state untouched and
    /// reports a warning outcome instead of failing.
    pub async fn call_next(&self, doctor_id: &str) -> Result<CallOutcome, QueueError> {
        let mut inner = self.inner.write().await;

        let status = inner
            .summaries
            .get(doctor_id)
            .map(|s| s.status)
            .ok_or_else(|| QueueError::DoctorNotFound(doctor_id.to_string()))?;

        if status != DoctorStatus::Active {
            warn!(
                "Call-next rejected: doctor {} is {} rather than active",
                doctor_id, status
            );
            return Ok(CallOutcome::DoctorUnavailable);
        }

        let Some(patient) = inner.queues.get_mut(doctor_id).and_then(|q| q.pop_front()) else {
            warn!("Call-next on empty queue for doctor {}", doctor_id);
            return Ok(CallOutcome::QueueEmpty);
        };

        if let Some(summary) = inner.summaries.get_mut(doctor_id) {
            summary.completed_today += 1;
        }
        self.persist(&inner)?;

        info!("Doctor {} called {}", doctor_id, patient);
        Ok(CallOutcome::Called { patient })
    }

    /// Appends a patient to the tail of the doctor's waiting list.
    pub async fn enqueue(&self, doctor_id: &str, patient: String) -> Result<(), QueueError> {
        let mut inner = self.inner.write().await;
        self.require_doctor(&inner, doctor_id)?;

        inner
            .queues
            .entry(doctor_id.to_string())
            .or_default()
            .push_back(patient);
        self.persist(&inner)?;
        Ok(())
    }

    /// Swaps the entries at `index` and `index - 1`. Index 0 is already at
    /// the head and is a no-op.
    pub async fn move_up(&self, doctor_id: &str, index: usize) -> Result<(), QueueError> {
        let mut inner = self.inner.write().await;
        self.require_doctor(&inner, doctor_id)?;

        // Index 0 is a no-op even on an empty list.
        if index == 0 {
            return Ok(());
        }

        let queue = inner.queues.entry(doctor_id.to_string()).or_default();
        let len = queue.len();
        if index >= len {
            return Err(QueueError::IndexOutOfBounds { index, len });
        }

        queue.swap(index, index - 1);
        self.persist(&inner)?;
        Ok(())
    }

    /// Removes the entry at `index` from the doctor's waiting list.
    pub async fn remove(&self, doctor_id: &str, index: usize) -> Result<String, QueueError> {
        let mut inner = self.inner.write().await;
        self.require_doctor(&inner, doctor_id)?;

        let queue = inner.queues.entry(doctor_id.to_string()).or_default();
        let len = queue.len();
        let Some(patient) = queue.remove(index) else {
            return Err(QueueError::IndexOutOfBounds { index, len });
        };

        self.persist(&inner)?;
        Ok(patient)
    }

    /// Flips active <-> break. An inactive doctor stays inactive.
    pub async fn toggle_status(&self, doctor_id: &str) -> Result<DoctorStatus, QueueError> {
        self.set_status(doctor_id, |status| status.toggled()).await
    }

    pub async fn activate(&self, doctor_id: &str) -> Result<DoctorStatus, QueueError> {
        self.set_status(doctor_id, |_| DoctorStatus::Active).await
    }

    pub async fn deactivate(&self, doctor_id: &str) -> Result<DoctorStatus, QueueError> {
        self.set_status(doctor_id, |_| DoctorStatus::Inactive).await
    }

    async fn set_status(
        &self,
        doctor_id: &str,
        next: impl FnOnce(DoctorStatus) -> DoctorStatus,
    ) -> Result<DoctorStatus, QueueError> {
        let mut inner = self.inner.write().await;

        let summary = inner
            .summaries
            .get_mut(doctor_id)
            .ok_or_else(|| QueueError::DoctorNotFound(doctor_id.to_string()))?;
        summary.status = next(summary.status);
        let status = summary.status;

        self.persist(&inner)?;
        debug!("Doctor {} status is now {}", doctor_id, status);
        Ok(status)
    }

    /// Dashboard snapshot: every summary joined with its live waiting
    /// list, ordered by doctor id. The `waiting` count is computed here
    /// from the list length, never stored.
    pub async fn snapshot(&self) -> Vec<DoctorQueueView> {
        let inner = self.inner.read().await;

        let mut views: Vec<DoctorQueueView> = inner
            .summaries
            .values()
            .map(|summary| {
                let patients: Vec<String> = inner
                    .queues
                    .get(&summary.doctor_id)
                    .map(|q| q.iter().cloned().collect())
                    .unwrap_or_default();
                DoctorQueueView {
                    summary: summary.clone(),
                    waiting: patients.len(),
                    patients,
                }
            })
            .collect();
        views.sort_by(|a, b| a.summary.doctor_id.cmp(&b.summary.doctor_id));
        views
    }

    /// Re-reads persisted state, replacing the in-memory copy. Used by the
    /// periodic refresh so externally written documents become visible.
    pub async fn reload(&self) -> Result<(), QueueError> {
        let fresh = Self::read_persisted(&self.store)?;
        let mut inner = self.inner.write().await;
        *inner = fresh;
        debug!("Queue state reloaded from store");
        Ok(())
    }

    fn require_doctor(&self, inner: &QueueInner, doctor_id: &str) -> Result<(), QueueError> {
        if inner.summaries.contains_key(doctor_id) {
            Ok(())
        } else {
            Err(QueueError::DoctorNotFound(doctor_id.to_string()))
        }
    }
}

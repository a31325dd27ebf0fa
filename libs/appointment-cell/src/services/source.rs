//! Appointment loading with upstream fetch and local fallback.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_storage::{keys, LocalStore};

use crate::error::AppointmentError;
use crate::models::Appointment;
use crate::services::normalize::{dedupe_by_id, normalize_records, Envelope};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches appointments from the upstream REST collaborator, caches them
/// in the local store, and degrades to the cache when the network fails.
pub struct AppointmentSource {
    client: Client,
    base_url: String,
    store: Arc<LocalStore>,
    generation: AtomicU64,
}

impl AppointmentSource {
    pub fn new(config: &AppConfig, store: Arc<LocalStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
            store,
            generation: AtomicU64::new(0),
        }
    }

    /// Loads the current appointment set.
    ///
    /// Each call takes a new request generation; a response that arrives
    /// after a newer refresh has started is discarded instead of
    /// overwriting fresher state. On upstream failure the cached local
    /// document is returned (empty when none exists), never an error.
    pub async fn refresh(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if self.base_url.is_empty() {
            return self.load_cached();
        }

        match self.fetch_remote().await {
            Ok(remote) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    debug!(
                        "Discarding stale appointment response (generation {})",
                        generation
                    );
                    return self.load_cached();
                }

                let cached = self.load_cached()?;
                // Remote first, so the fresher copy wins when ids collide.
                let merged = dedupe_by_id(remote.into_iter().chain(cached).collect());
                self.store.set(keys::APPOINTMENTS, &merged)?;
                info!("Refreshed {} appointments from upstream", merged.len());
                Ok(merged)
            }
            Err(e) => {
                warn!(
                    "Upstream appointment fetch failed, using local state: {}",
                    e
                );
                self.load_cached()
            }
        }
    }

    /// Reads the cached appointment document, re-normalizing it so legacy
    /// field names and duplicate ids are cleaned up on the way in.
    pub fn load_cached(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let records: Vec<serde_json::Value> =
            self.store.get(keys::APPOINTMENTS)?.unwrap_or_default();
        Ok(normalize_records(records))
    }

    async fn fetch_remote(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let url = format!("{}/appointments", self.base_url.trim_end_matches('/'));
        debug!("Fetching appointments from {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppointmentError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppointmentError::Upstream(format!(
                "upstream returned {}",
                status
            )));
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| AppointmentError::Upstream(e.to_string()))?;

        Ok(normalize_records(envelope.into_records()))
    }
}

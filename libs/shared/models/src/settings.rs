use serde::{Deserialize, Serialize};

use shared_storage::{keys, LocalStore};

/// Flat front-desk settings object, persisted under the `staffSettings`
/// storage key and edited through the settings dialog.
///
/// The persisted document is the single source for these values; callers
/// read it through [`StaffSettings::load`] rather than carrying their own
/// copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaffSettings {
    pub avg_consultation_minutes: u32,
    pub refresh_interval_secs: u64,
    pub drawer_opening_balance: f64,
}

impl Default for StaffSettings {
    fn default() -> Self {
        Self {
            avg_consultation_minutes: 20,
            refresh_interval_secs: 30,
            drawer_opening_balance: 0.0,
        }
    }
}

impl StaffSettings {
    /// Reads the persisted settings document, falling back to the defaults
    /// when none has been written yet.
    pub fn load(store: &LocalStore) -> Self {
        store
            .get(keys::STAFF_SETTINGS)
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub data_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("CLINIC_API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_API_BASE_URL not set, using empty value");
                    String::new()
                }),
            data_dir: env::var("CLINIC_DATA_DIR")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_DATA_DIR not set, using ./data");
                    "./data".to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Upstream API not configured - appointment refresh will use local state only");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }
}

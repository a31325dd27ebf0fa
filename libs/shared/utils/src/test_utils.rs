use std::path::Path;

use shared_config::AppConfig;

/// Builds an [`AppConfig`] pointed at an isolated data directory, for use
/// with a `tempfile::TempDir` in cell tests.
pub fn test_config(data_dir: &Path) -> AppConfig {
    AppConfig {
        api_base_url: String::new(),
        data_dir: data_dir.to_string_lossy().into_owned(),
    }
}

/// Same as [`test_config`] but with an upstream API base URL, for wiremock
/// driven tests.
pub fn test_config_with_api(data_dir: &Path, api_base_url: &str) -> AppConfig {
    AppConfig {
        api_base_url: api_base_url.to_string(),
        ..test_config(data_dir)
    }
}

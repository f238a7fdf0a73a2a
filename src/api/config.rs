use crate::settings::Settings;

/// Configuration for the task API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Sqlite file backing the task list
    pub database_path: String,

    /// Status string new tasks start with
    pub default_status: String,
}

impl ApiConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            database_path: settings.database_path.clone(),
            ..Self::default()
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            database_path: "tasks.db".to_string(),
            default_status: "pending".to_string(),
        }
    }
}

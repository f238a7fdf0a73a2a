use std::env;
use tracing::debug;

// Default endpoints, overridable through the environment
const DEFAULT_CHAT_BASE_URL: &str = "https://api.x.ai/v1";
const DEFAULT_CHAT_MODEL: &str = "grok-beta";
const DEFAULT_VISION_BASE_URL: &str = "https://models.inference.ai.azure.com";
const DEFAULT_VISION_MODEL: &str = "gpt-4o-mini";
const DEFAULT_SEARCH_BASE_URL: &str = "https://api.exa.ai";
const PLACEHOLDER_KEY: &str = "1234";

/// Environment-derived configuration, read once at startup.
///
/// Keys default to an obviously fake placeholder so the binary still starts
/// without credentials; the first authenticated request will simply fail.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Key for the chat-completions endpoint (`XAI_API_KEY`)
    pub xai_api_key: String,
    /// Key for the vision endpoint (`GITHUB_TOKEN`)
    pub github_token: String,
    /// Key for the semantic search endpoint (`EXA_API_KEY`)
    pub exa_api_key: String,

    pub chat_base_url: String,
    pub chat_model: String,
    pub vision_base_url: String,
    pub vision_model: String,
    pub search_base_url: String,

    /// Folder downloaded images land in
    pub assets_dir: String,
    /// Sqlite file backing the task list
    pub database_path: String,
    pub bind_host: String,
    pub bind_port: u16,
}

impl Settings {
    /// Loads settings from the environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        // A missing .env file is fine; real env vars still apply
        let _ = dotenvy::dotenv();

        let settings = Self {
            xai_api_key: var_or("XAI_API_KEY", PLACEHOLDER_KEY),
            github_token: var_or("GITHUB_TOKEN", PLACEHOLDER_KEY),
            exa_api_key: var_or("EXA_API_KEY", PLACEHOLDER_KEY),
            chat_base_url: var_or("CHAT_BASE_URL", DEFAULT_CHAT_BASE_URL),
            chat_model: var_or("CHAT_MODEL", DEFAULT_CHAT_MODEL),
            vision_base_url: var_or("VISION_BASE_URL", DEFAULT_VISION_BASE_URL),
            vision_model: var_or("VISION_MODEL", DEFAULT_VISION_MODEL),
            search_base_url: var_or("SEARCH_BASE_URL", DEFAULT_SEARCH_BASE_URL),
            assets_dir: var_or("ASSETS_DIR", "assets"),
            database_path: var_or("DATABASE_PATH", "tasks.db"),
            bind_host: var_or("BIND_HOST", "127.0.0.1"),
            bind_port: env::var("BIND_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(8080),
        };
        debug!(
            "Settings loaded: chat={}, search={}, assets={}",
            settings.chat_base_url, settings.search_base_url, settings.assets_dir
        );
        settings
    }

    /// Overrides the chat endpoint, used by tests pointed at a mock server.
    pub fn with_chat_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.chat_base_url = base_url.into();
        self
    }

    pub fn with_vision_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.vision_base_url = base_url.into();
        self
    }

    pub fn with_search_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.search_base_url = base_url.into();
        self
    }

    pub fn with_assets_dir(mut self, assets_dir: impl Into<String>) -> Self {
        self.assets_dir = assets_dir.into();
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            xai_api_key: PLACEHOLDER_KEY.to_string(),
            github_token: PLACEHOLDER_KEY.to_string(),
            exa_api_key: PLACEHOLDER_KEY.to_string(),
            chat_base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            vision_base_url: DEFAULT_VISION_BASE_URL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            assets_dir: "assets".to_string(),
            database_path: "tasks.db".to_string(),
            bind_host: "127.0.0.1".to_string(),
            bind_port: 8080,
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

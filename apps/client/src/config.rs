use anyhow::{Context, Result};

const DEFAULT_AUTH_BASE_URL: &str = "https://identity.hirefolio.app";
const DEFAULT_STORE_BASE_URL: &str = "https://docs.hirefolio.app";

/// Client configuration loaded from environment variables.
/// `PROJECT_ID` and `API_KEY` are required; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    pub api_key: String,
    pub auth_base_url: String,
    pub store_base_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            project_id: require_env("PROJECT_ID")?,
            api_key: require_env("API_KEY")?,
            auth_base_url: std::env::var("AUTH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_BASE_URL.to_string()),
            store_base_url: std::env::var("STORE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_STORE_BASE_URL.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub guardian_api_key: String,
    /// Optional: the GNews proxy endpoint returns a config error without it.
    pub gnews_api_key: Option<String>,
    /// Optional: the NewsAPI proxy endpoint returns a config error without it.
    pub newsapi_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            guardian_api_key: require_env("GUARDIAN_API_KEY")?,
            gnews_api_key: std::env::var("GNEWS_API_KEY").ok(),
            newsapi_api_key: std::env::var("NEWSAPI_API_KEY").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

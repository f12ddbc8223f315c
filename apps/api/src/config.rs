use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::session::store::{DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS};

/// Application configuration loaded from environment variables.
/// Fails at startup only on malformed values; a missing API key is reported, not fatal.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub port: u16,
    pub static_dir: PathBuf,
    /// Include upstream error details in 500 responses. Only true in development.
    pub expose_error_details: bool,
    /// Form sessions untouched for this long are dropped.
    pub session_idle_ttl: Duration,
    pub max_sessions: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let app_env = optional_env("APP_ENV")
            .or_else(|| optional_env("NODE_ENV"))
            .unwrap_or_else(|| "production".to_string());

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openai_model: optional_env("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3002".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            static_dir: optional_env("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("frontend/dist")),
            expose_error_details: is_development(&app_env),
            session_idle_ttl: match optional_env("SESSION_IDLE_TTL_SECS") {
                Some(raw) => Duration::from_secs(
                    raw.parse::<u64>()
                        .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?,
                ),
                None => DEFAULT_IDLE_TTL,
            },
            max_sessions: match optional_env("MAX_SESSIONS") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_SESSIONS must be a non-negative integer")?,
                None => DEFAULT_MAX_SESSIONS,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn is_development(app_env: &str) -> bool {
    app_env.trim().eq_ignore_ascii_case("development")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_development_exposes_details() {
        assert!(is_development("development"));
        assert!(is_development(" Development "));
        assert!(!is_development("production"));
        assert!(!is_development("staging"));
    }
}

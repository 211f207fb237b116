use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_HISTORY_PATH: &str = "data/analysis_history.json";

/// Where analysis history is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryBackend {
    File(PathBuf),
    Redis(String),
    /// Process-local; history is lost on restart.
    Memory,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub history_backend: HistoryBackend,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            history_backend: history_backend_from_env()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// `HISTORY_BACKEND` is one of `file`, `redis`, `memory`. When unset, Redis is
/// used if `REDIS_URL` is present and the file backend otherwise.
fn history_backend_from_env() -> Result<HistoryBackend> {
    let redis_url = optional_env("REDIS_URL");
    let history_path = || -> PathBuf {
        optional_env("HISTORY_PATH")
            .unwrap_or_else(|| DEFAULT_HISTORY_PATH.to_string())
            .into()
    };

    let requested = optional_env("HISTORY_BACKEND").map(|v| v.to_lowercase());
    match (requested.as_deref(), redis_url) {
        (Some("memory"), _) => Ok(HistoryBackend::Memory),
        (Some("file"), _) => Ok(HistoryBackend::File(history_path())),
        (Some("redis") | None, Some(url)) => Ok(HistoryBackend::Redis(url)),
        (Some("redis"), None) => bail!("HISTORY_BACKEND=redis requires REDIS_URL to be set"),
        (None, None) => Ok(HistoryBackend::File(history_path())),
        (Some(other), _) => {
            bail!("HISTORY_BACKEND must be one of file, redis, memory (got '{other}')")
        }
    }
}

/// Reads `key`, treating an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

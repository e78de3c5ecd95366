use anyhow::{Context, Result};

use crate::extraction::loader::DEFAULT_MAX_DOCUMENT_BYTES;

/// Application configuration loaded from environment variables.
/// Everything has a sensible default; nothing is required to boot locally.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upload size bound enforced before any decode work. Default 10 MiB.
    pub max_upload_bytes: usize,
    /// Wall-clock budget for one pipeline run, bounding pathological inputs.
    pub parse_timeout_secs: u64,
    /// Optional path to a JSON heading-keyword lexicon (per-locale override).
    pub heading_lexicon_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", &DEFAULT_MAX_DOCUMENT_BYTES.to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            parse_timeout_secs: env_or("PARSE_TIMEOUT_SECS", "10")
                .parse::<u64>()
                .context("PARSE_TIMEOUT_SECS must be a number of seconds")?,
            heading_lexicon_path: std::env::var("HEADING_LEXICON_PATH").ok(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::ANTHROPIC_API_URL;
use crate::recommendation::resources::{
    FetchConfig, DEFAULT_CONCURRENCY, DEFAULT_MAX_RESULTS_PER_SKILL, DEFAULT_PER_REQUEST_TIMEOUT,
};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub youtube_api_key: String,
    pub catalog_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub resource_max_results: usize,
    pub resource_timeout: Duration,
    pub resource_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: std::env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| ANTHROPIC_API_URL.to_string()),
            youtube_api_key: require_env("YOUTUBE_API_KEY")?,
            catalog_path: std::env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "data/skill_set.csv".to_string())
                .into(),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            resource_max_results: parse_env("RESOURCE_MAX_RESULTS", DEFAULT_MAX_RESULTS_PER_SKILL)?,
            resource_timeout: Duration::from_secs(parse_env(
                "RESOURCE_TIMEOUT_SECS",
                DEFAULT_PER_REQUEST_TIMEOUT.as_secs(),
            )?),
            resource_concurrency: parse_env("RESOURCE_CONCURRENCY", DEFAULT_CONCURRENCY)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects fetcher settings that would silently disable resource lookups.
    fn validate(&self) -> Result<()> {
        if self.resource_concurrency == 0 {
            bail!("RESOURCE_CONCURRENCY must be at least 1");
        }
        if self.resource_timeout.is_zero() {
            bail!("RESOURCE_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            max_results_per_skill: self.resource_max_results,
            per_request_timeout: self.resource_timeout,
            concurrency: self.resource_concurrency,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

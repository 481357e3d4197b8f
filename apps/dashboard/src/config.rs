use std::time::Duration;

use anyhow::{Context, Result};

use crate::gateway::Timeouts;

pub const DEFAULT_BACKEND_URL: &str =
    "https://innomaticshackathonbackend-production.up.railway.app";

/// Application configuration loaded from environment variables.
/// Every setting has a default, so a bare environment starts the server.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub port: u16,
    pub rust_log: String,
    pub use_backend: bool,
    pub request_timeout: Duration,
    pub upload_timeout: Duration,
    pub page_size: u32,
    /// Idle time after which a session is dropped from the registry.
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            use_backend: true,
            request_timeout: Duration::from_secs(10),
            upload_timeout: Duration::from_secs(30),
            page_size: 100,
            session_ttl: Duration::from_secs(60 * 60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            backend_url: lookup("BACKEND_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.backend_url),
            port: parse_env(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            use_backend: match lookup("USE_BACKEND") {
                Some(raw) => parse_flag(&raw)
                    .with_context(|| format!("USE_BACKEND must be true or false, got '{raw}'"))?,
                None => defaults.use_backend,
            },
            request_timeout: Duration::from_secs(parse_env(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            upload_timeout: Duration::from_secs(parse_env(
                &lookup,
                "UPLOAD_TIMEOUT_SECS",
                defaults.upload_timeout.as_secs(),
            )?),
            page_size: parse_env(&lookup, "PAGE_SIZE", defaults.page_size)?,
            session_ttl: Duration::from_secs(parse_env(
                &lookup,
                "SESSION_TTL_SECS",
                defaults.session_ttl.as_secs(),
            )?),
        })
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            request: self.request_timeout,
            upload: self.upload_timeout,
        }
    }
}

fn parse_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

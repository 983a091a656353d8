//! Centralized configuration (environment variables + defaults).

use crate::domain::CheckService;
use crate::error::ConfigError;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_IMEI_API_BASE_URL: &str = "https://dash.dev.imei.info";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 15;

/// Bind address for the API server (default `0.0.0.0`).
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string())
}

/// Listening port (default 3000).
pub fn port() -> Result<u16, ConfigError> {
    parse_var("PORT", DEFAULT_PORT)
}

/// API key for the lookup provider. Optional: without it the lookup endpoint answers 503.
pub fn imei_api_key() -> Option<String> {
    std::env::var("IMEI_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

/// Check tier used when a request does not name one (default 1, the basic check).
pub fn default_service() -> Result<CheckService, ConfigError> {
    let id: u32 = parse_var("IMEI_SERVICE_ID", CheckService::default().id())?;
    CheckService::from_id(id).ok_or_else(|| ConfigError::InvalidValue {
        name: "IMEI_SERVICE_ID",
        value: id.to_string(),
        reason: "expected 1 (basic), 2 (advanced) or 3 (full)".to_string(),
    })
}

/// Lookup provider base URL, without a trailing slash.
pub fn imei_api_base_url() -> String {
    std::env::var("IMEI_API_BASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMEI_API_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Per-request timeout for lookup calls (default 15s, never below 1s).
pub fn lookup_timeout() -> Result<Duration, ConfigError> {
    let secs: u64 = parse_var("LOOKUP_TIMEOUT_SECS", DEFAULT_LOOKUP_TIMEOUT_SECS)?;
    Ok(Duration::from_secs(secs.max(1)))
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidValue {
                    name,
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}

/// Lookup provider settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub default_service: CheckService,
    pub timeout: Duration,
}

impl LookupConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(LookupConfig {
            base_url: imei_api_base_url(),
            api_key: imei_api_key(),
            default_service: default_service()?,
            timeout: lookup_timeout()?,
        })
    }
}

/// Everything the API server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub lookup: LookupConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(AppConfig {
            bind_addr: bind_addr(),
            port: port()?,
            lookup: LookupConfig::from_env()?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

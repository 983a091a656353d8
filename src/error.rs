use thiserror::Error;

/// Failures while forwarding a validated IMEI to the lookup provider.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("IMEI lookup is not configured (IMEI_API_KEY is not set)")]
    NotConfigured,

    #[error("Lookup provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not decode lookup response: {0}")]
    Decode(String),
}

/// Invalid or missing settings detected at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

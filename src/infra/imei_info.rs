// Responsible for all communication with the IMEI lookup provider.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::{CheckService, DeviceReport, Imei};
use crate::error::LookupError;
use crate::infra::config::LookupConfig;

const FALLBACK_UPSTREAM_MESSAGE: &str = "Failed to check IMEI";

/// Looks up device details for an IMEI that has already passed validation.
#[async_trait]
pub trait DeviceLookup: Send + Sync {
    async fn lookup(&self, imei: &Imei, service: CheckService) -> Result<DeviceReport, LookupError>;

    /// Whether the lookup can be attempted at all (e.g. an API key is present).
    fn is_configured(&self) -> bool {
        true
    }
}

/// reqwest-backed client for the imei.info check API.
pub struct ImeiInfoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ImeiInfoClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(ImeiInfoClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn check_url(&self, service: CheckService) -> String {
        format!("{}/api/check/{}/", self.base_url, service.id())
    }
}

#[async_trait]
impl DeviceLookup for ImeiInfoClient {
    async fn lookup(&self, imei: &Imei, service: CheckService) -> Result<DeviceReport, LookupError> {
        let api_key = self.api_key.as_deref().ok_or(LookupError::NotConfigured)?;

        tracing::info!(tac = imei.tac(), service = service.id(), "Forwarding IMEI lookup");
        let response = self
            .http
            .get(self.check_url(service))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("imei", imei.as_str()), ("API_KEY", api_key)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Lookup provider unreachable");
                LookupError::Transport(e)
            })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<JsonValue>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(JsonValue::as_str).map(str::to_string))
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_UPSTREAM_MESSAGE.to_string());
            tracing::warn!(status = status.as_u16(), %message, "Lookup provider rejected request");
            return Err(LookupError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let payload: JsonValue =
            serde_json::from_slice(&body).map_err(|e| LookupError::Decode(e.to_string()))?;
        if !payload.is_object() {
            return Err(LookupError::Decode("expected a JSON object".to_string()));
        }
        Ok(DeviceReport::from_provider(&payload))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

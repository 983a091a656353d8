use crate::domain::{CheckService, Rejection};
use crate::infra::DeviceLookup;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn DeviceLookup>,
    /// Tier used when `/api/check-imei` is called without `service`.
    pub default_service: CheckService,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ValidateImeiRequest {
    /// Raw user input; spaces, dashes and other separators are ignored.
    pub imei: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ValidateImeiResponse {
    pub valid: bool,
    /// Input with every non-digit removed.
    pub normalized: String,
    /// Normalized digits grouped in fours, for display.
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Rejection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckImeiQuery {
    /// IMEI to check; separators are ignored.
    pub imei: Option<String>,
    /// Provider check tier: 1 (basic), 2 (advanced) or 3 (full). Empty means the default.
    #[param(value_type = Option<u32>)]
    pub service: Option<String>,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::err(format!(
            "Invalid JSON body: {} (expected: {})",
            err, expected
        ))),
    )
}

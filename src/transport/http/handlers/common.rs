use crate::domain::Rejection;
use crate::error::LookupError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::Json;

/// 400 carrying the rejection message, with the machine-readable code under `data.reason`.
pub fn invalid_imei_response(reason: Rejection) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            success: false,
            data: Some(serde_json::json!({ "reason": reason.code() })),
            error: Some(reason.to_string()),
        }),
    )
}

pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::err(message)))
}

pub fn status_for_lookup_error(err: &LookupError) -> StatusCode {
    match err {
        LookupError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        LookupError::Upstream { .. } | LookupError::Transport(_) | LookupError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

pub fn lookup_error_response(err: &LookupError) -> (StatusCode, Json<ApiResponse>) {
    let message = match err {
        // Pass the provider's own wording through; it is the actionable part.
        LookupError::Upstream { message, .. } => message.clone(),
        LookupError::Transport(_) => "Failed to check IMEI. Please try again later.".to_string(),
        other => other.to_string(),
    };
    (status_for_lookup_error(err), Json(ApiResponse::err(message)))
}

use crate::domain::{format_grouped, normalize, validate};
use crate::transport::http::types::{json_422, ApiResponse, ValidateImeiRequest, ValidateImeiResponse};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Offline validation for form fields. An invalid IMEI is a normal 200 result.
#[utoipa::path(
    post,
    path = "/api/validate-imei",
    request_body = ValidateImeiRequest,
    responses(
        (status = 200, description = "Validation result (valid or with a rejection reason)", body = ApiResponse),
        (status = 422, description = "Malformed JSON body", body = ApiResponse)
    )
)]
pub async fn validate_imei_handler(
    request: Result<Json<ValidateImeiRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{ \"imei\": string }").into_response(),
    };

    let outcome = validate(&request.imei);
    let reason = outcome.rejection();
    tracing::debug!(valid = outcome.is_valid(), reason = reason.map(|r| r.code()), "Validated IMEI");

    let body = ValidateImeiResponse {
        valid: outcome.is_valid(),
        normalized: normalize(&request.imei),
        formatted: format_grouped(&request.imei),
        reason,
        message: reason.map(|r| r.to_string()),
    };

    match serde_json::to_value(body) {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::err(format!("Failed to encode response: {}", e))),
        )
            .into_response(),
    }
}

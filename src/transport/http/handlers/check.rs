use crate::domain::{CheckService, Imei};
use crate::transport::http::handlers::common::{bad_request, invalid_imei_response, lookup_error_response};
use crate::transport::http::types::{ApiResponse, AppState, CheckImeiQuery};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/check-imei",
    params(CheckImeiQuery),
    responses(
        (status = 200, description = "Device report from the lookup provider", body = ApiResponse),
        (status = 400, description = "Missing or invalid IMEI, or unknown service", body = ApiResponse),
        (status = 502, description = "Lookup provider failed", body = ApiResponse),
        (status = 503, description = "Lookup provider is not configured", body = ApiResponse)
    )
)]
pub async fn check_imei_handler(
    State(state): State<AppState>,
    query: Result<Query<CheckImeiQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(v) => v,
        Err(e) => return bad_request(format!("Invalid query string: {}", e)).into_response(),
    };

    let raw = match query.imei.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return bad_request("IMEI parameter is required").into_response(),
    };

    let service = match query.service.as_deref().map(str::trim) {
        None | Some("") => state.default_service,
        Some(raw_id) => match raw_id.parse::<u32>().ok().and_then(CheckService::from_id) {
            Some(s) => s,
            None => {
                return bad_request(format!(
                    "Unknown service {}: expected 1 (basic), 2 (advanced) or 3 (full)",
                    raw_id
                ))
                .into_response()
            }
        },
    };

    let imei = match Imei::parse(raw) {
        Ok(imei) => imei,
        Err(reason) => {
            tracing::info!(reason = reason.code(), "Rejected IMEI before lookup");
            return invalid_imei_response(reason).into_response();
        }
    };

    match state.lookup.lookup(&imei, service).await {
        Ok(report) => match serde_json::to_value(report) {
            Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))).into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err(format!("Failed to encode report: {}", e))),
            )
                .into_response(),
        },
        Err(e) => {
            tracing::warn!(tac = imei.tac(), error = %e, "IMEI lookup failed");
            lookup_error_response(&e).into_response()
        }
    }
}

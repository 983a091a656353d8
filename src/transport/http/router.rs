use crate::domain::imei::Rejection;
use crate::domain::lookup::{AdditionalInfo, BlacklistStatus, CheckService, DeviceReport, DeviceSpecifications};
use crate::transport::http::handlers::{check, health, validate};
use crate::transport::http::types::{ApiResponse, ValidateImeiRequest, ValidateImeiResponse};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        validate::validate_imei_handler,
        check::check_imei_handler
    ),
    components(schemas(
        ApiResponse,
        ValidateImeiRequest,
        ValidateImeiResponse,
        Rejection,
        CheckService,
        DeviceReport,
        DeviceSpecifications,
        BlacklistStatus,
        AdditionalInfo
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/validate-imei", post(validate::validate_imei_handler))
        .route("/api/check-imei", get(check::check_imei_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

// src/bin/api_server.rs

use imei_gateway::infra::{config::AppConfig, logging};
use imei_gateway::transport;
use imei_gateway::ImeiInfoClient;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logger(logging::verbose_requested(std::env::args().skip(1)));

    // --- Configuration ---
    let config = AppConfig::from_env()?;
    tracing::info!(
        base_url = %config.lookup.base_url,
        default_service = %config.lookup.default_service,
        timeout_secs = config.lookup.timeout.as_secs(),
        "Loaded configuration"
    );
    if config.lookup.api_key.is_none() {
        tracing::warn!("IMEI_API_KEY is not set; /api/check-imei will answer 503 until it is");
    }

    // --- Lookup client ---
    let lookup = ImeiInfoClient::new(&config.lookup)?;
    let app_state = transport::http::AppState {
        lookup: Arc::new(lookup),
        default_service: config.lookup.default_service,
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received (Ctrl+C)");
        })
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

//! Lookup client against a mocked provider, plus the full chain through the HTTP API.

use httpmock::prelude::*;
use imei_gateway::infra::config::LookupConfig;
use imei_gateway::transport;
use imei_gateway::{CheckService, DeviceLookup, Imei, ImeiInfoClient, LookupError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const GOOD_IMEI: &str = "490154203237518";

fn config_for(server: &MockServer, api_key: Option<&str>) -> LookupConfig {
    LookupConfig {
        base_url: server.base_url(),
        api_key: api_key.map(str::to_string),
        default_service: CheckService::Basic,
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn test_lookup_maps_provider_payload() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/check/2/")
                .query_param("imei", GOOD_IMEI)
                .query_param("API_KEY", "secret");
            then.status(200).json_body(json!({
                "device": {
                    "model_name": "Galaxy S21",
                    "manufacturer": "Samsung",
                    "model_number": "SM-G991B",
                    "type": "smartphone",
                    "release_date": "2021-01-29"
                },
                "blacklist": { "status": "blacklisted", "reported_date": "2023-05-01", "reason": "stolen" },
                "carrier": { "name": "Vodafone", "country": "DE" },
                "warranty": { "status": "expired" },
                "activation": { "status": "activated" }
            }));
        })
        .await;

    let client = ImeiInfoClient::new(&config_for(&server, Some("secret")))?;
    let imei = Imei::parse(GOOD_IMEI)?;
    let report = client.lookup(&imei, CheckService::Advanced).await?;

    mock.assert_async().await;
    assert_eq!(report.specifications.manufacturer, "Samsung");
    assert_eq!(report.specifications.device_type, "smartphone");
    assert_eq!(report.blacklist.status, "blacklisted");
    assert_eq!(report.blacklist.reason.as_deref(), Some("stolen"));
    assert_eq!(report.additional_info.country, "DE");
    Ok(())
}

#[tokio::test]
async fn test_lookup_without_key_makes_no_request() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({}));
        })
        .await;

    let client = ImeiInfoClient::new(&config_for(&server, None))?;
    assert!(!client.is_configured());
    let err = client
        .lookup(&Imei::parse(GOOD_IMEI)?, CheckService::Basic)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::NotConfigured));
    assert_eq!(mock.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_lookup_upstream_error_message() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/check/1/");
            then.status(401).json_body(json!({ "message": "Invalid API key" }));
        })
        .await;
    let client = ImeiInfoClient::new(&config_for(&server, Some("wrong")))?;
    let err = client
        .lookup(&Imei::parse(GOOD_IMEI)?, CheckService::Basic)
        .await
        .unwrap_err();
    match err {
        LookupError::Upstream { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_lookup_upstream_error_without_message() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/check/1/");
            then.status(500).body("internal error");
        })
        .await;
    let client = ImeiInfoClient::new(&config_for(&server, Some("k")))?;
    let err = client
        .lookup(&Imei::parse(GOOD_IMEI)?, CheckService::Basic)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LookupError::Upstream { status: 500, ref message } if message == "Failed to check IMEI"
    ));
    Ok(())
}

#[tokio::test]
async fn test_lookup_non_json_success_is_decode_error() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/check/1/");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;
    let client = ImeiInfoClient::new(&config_for(&server, Some("k")))?;
    let err = client
        .lookup(&Imei::parse(GOOD_IMEI)?, CheckService::Basic)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Decode(_)));
    Ok(())
}

#[tokio::test]
async fn test_check_endpoint_through_real_client() -> anyhow::Result<()> {
    let provider = MockServer::start_async().await;
    let mock = provider
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/check/1/")
                .query_param("imei", GOOD_IMEI);
            then.status(200).json_body(json!({
                "device": { "model_name": "iPhone 12" }
            }));
        })
        .await;

    let client = ImeiInfoClient::new(&config_for(&provider, Some("k")))?;
    let state = transport::http::AppState {
        lookup: Arc::new(client),
        default_service: CheckService::Basic,
    };
    let router = transport::http::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let resp = reqwest::get(format!("http://{}/api/check-imei?imei=4901-5420-3237-518", addr)).await?;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await?;
    assert_eq!(body["data"]["specifications"]["model_name"], "iPhone 12");
    assert_eq!(body["data"]["additional_info"]["carrier"], "Unknown");
    mock.assert_async().await;
    Ok(())
}

#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test — panics are the assertion mechanism")]

use imei_scan_core::scan::{build_payload, Intent};
use imei_scan_core::{build_scan_router, AppState, GeminiClient, ProviderClient, ScanPipeline};
use imei_scan_types::{ImageInput, ResultShape, ScanConfig, ScanError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/gemini-1.5-flash-latest:generateContent";
const IMAGE: &str = "aW1laS1sYWJlbA==";

fn gemini_text_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{"text": text}],
                "role": "model"
            },
            "finishReason": "STOP"
        }]
    })
}

fn config_for(server: &MockServer) -> ScanConfig {
    ScanConfig {
        api_key: Some("test-key".to_string()),
        base_url: format!("{}/v1beta", server.uri()),
        ..ScanConfig::default()
    }
}

fn array_payload() -> imei_scan_types::protocol::GenerateContentRequest {
    build_payload(&ImageInput::new(IMAGE, None), Intent::Full(ResultShape::Array), false)
}

#[tokio::test]
async fn test_gemini_client_sends_key_and_payload() {
    let server = MockServer::start().await;
    let client = GeminiClient::new(&config_for(&server)).expect("client");

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [{}, {"inlineData": {"mimeType": "image/jpeg", "data": IMAGE}}]}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_text_body("[{\"imei\":\"1\"}]")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response =
        client.generate_content("test-key", &array_payload()).await.expect("200 scenario");

    assert_eq!(response.first_text().as_deref(), Some("[{\"imei\":\"1\"}]"));
}

#[tokio::test]
async fn test_gemini_client_maps_non_success_status() {
    let server = MockServer::start().await;
    let client = GeminiClient::new(&config_for(&server)).expect("client");

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let err = client.generate_content("test-key", &array_payload()).await.expect_err("429");

    match err {
        ScanError::Provider { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("RESOURCE_EXHAUSTED"));
        },
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_gemini_client_undecodable_body_is_malformed() {
    let server = MockServer::start().await;
    let client = GeminiClient::new(&config_for(&server)).expect("client");

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;

    let err = client.generate_content("test-key", &array_payload()).await.expect_err("html");
    assert!(matches!(err, ScanError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_gemini_client_transport_failure() {
    let config = ScanConfig {
        base_url: "http://127.0.0.1:9/v1beta".to_string(),
        ..ScanConfig::default()
    };
    let client = GeminiClient::new(&config).expect("client");

    let err = client.generate_content("test-key", &array_payload()).await.expect_err("refused");
    assert!(matches!(err, ScanError::Transport { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_end_to_end_scan_against_mock_gemini() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text_body(
            "Here are the numbers:\n```json\n[{\"imei\":\"123456789012345\"}]\n```",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = ScanPipeline::from_config(config_for(&server)).expect("pipeline");
    let app = build_scan_router(AppState::new(pipeline));

    let response = axum_test::TestServer::new(app)
        .expect("test server")
        .post("/scan-imeis")
        .json(&serde_json::json!({"base64Image": IMAGE}))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        serde_json::json!([{"imei": "123456789012345"}])
    );
}

#[tokio::test]
async fn test_end_to_end_provider_500() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = ScanPipeline::from_config(config_for(&server)).expect("pipeline");
    let app = build_scan_router(AppState::new(pipeline));

    let response = axum_test::TestServer::new(app)
        .expect("test server")
        .post("/scan-imeis")
        .json(&serde_json::json!({"base64Image": IMAGE}))
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "Gemini API failed: 500 (upstream server error)"
    );
}

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assert_matches::assert_matches;
use health_card_cell::services::HealthCardService;
use health_card_cell::{health_card_routes, HealthCardError};
use shared_utils::test_utils::{MockBackendResponses, TestConfig, TestSession};

fn get(uri: &str, session: &TestSession) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in session.headers() {
        builder = builder.header(name, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn mount_card(server: &MockServer, patient_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/get_health_card/{}/", patient_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "healthCard": [
                MockBackendResponses::health_card_row(Some("2025-01-10"), Some(("2025-01-12", "Metformin"))),
                MockBackendResponses::health_card_row(Some("2025-01-10"), Some(("2025-01-12", "Aspirin"))),
                MockBackendResponses::health_card_row(None, Some(("2025-02-01", "Ibuprofen")))
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn patient_reads_own_grouped_card() {
    let server = MockServer::start().await;
    mount_card(&server, "P001").await;

    let app = health_card_routes(TestConfig::with_backend(server.uri()).to_arc());
    let response = app
        .oneshot(get("/", &TestSession::patient("P001")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["patient_id"], "P001");
    assert_eq!(json["blood_tests"].as_array().unwrap().len(), 1);
    assert_eq!(json["blood_tests"][0]["cholesterol"], "180");
    assert_eq!(json["prescriptions"][0]["medications"].as_array().unwrap().len(), 2);
    assert_eq!(json["prescriptions"][1]["medications"][0]["name"], "Ibuprofen");
    assert_eq!(json["prescriptions"][1]["medications"][0]["dosage"], "500mg");
}

#[tokio::test]
async fn staff_read_any_patient_card() {
    let server = MockServer::start().await;
    mount_card(&server, "P002").await;

    let app = health_card_routes(TestConfig::with_backend(server.uri()).to_arc());
    let response = app
        .oneshot(get("/P002", &TestSession::staff("S001")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn patients_cannot_read_other_cards() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = health_card_routes(TestConfig::with_backend(server.uri()).to_arc());
    let response = app
        .oneshot(get("/P002", &TestSession::patient("P001")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn backend_failure_is_a_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get_health_card/P001/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            MockBackendResponses::error_response("connection refused"),
        ))
        .mount(&server)
        .await;

    let app = health_card_routes(TestConfig::with_backend(server.uri()).to_arc());
    let response = app
        .oneshot(get("/", &TestSession::patient("P001")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn blank_patient_id_is_rejected() {
    let server = MockServer::start().await;
    let service = HealthCardService::new(&TestConfig::with_backend(server.uri()).to_app_config());

    let result = service.get_card(&TestSession::staff("S001").to_session(), "  ").await;
    assert_matches!(result, Err(HealthCardError::MissingPatient));
}

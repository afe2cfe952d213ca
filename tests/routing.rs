//! System endpoints and kernel-level routing behavior.

use enroll_api::routes;
use enroll_api::store::{AppState, MemoryRegistry};
use enroll_api::{TestClient, TestRequest};
use serde_json::Value;

fn client() -> TestClient {
    TestClient::new(routes::build(AppState::new(MemoryRegistry::seeded())))
}

#[tokio::test]
async fn health_endpoint_reports_success() {
    let client = client();
    let response = client.get("/").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Enrollment API is running");
}

#[tokio::test]
async fn me_returns_static_identity_payload() {
    let client = client();
    let response = client.get("/me").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["message"], "Student Information");
    assert_eq!(body["data"]["studentId"], "670612123");
    assert_eq!(body["data"]["firstName"], "Tirapat");
    assert_eq!(body["data"]["program"], "CPE");
    assert_eq!(body["data"]["section"], "801");
}

#[tokio::test]
async fn unknown_path_yields_404_envelope() {
    let client = client();
    let response = client.get("/api/v2/teachers").await;
    assert_eq!(response.status(), 404);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unrouted_method_yields_405_with_allow_header() {
    let client = client();
    let response = client
        .request(TestRequest::patch("/api/v2/students"))
        .await;
    assert_eq!(response.status(), 405);

    let allow = response.header("allow").unwrap();
    for method in ["DELETE", "GET", "POST", "PUT"] {
        assert!(allow.contains(method), "Allow header missing {method}: {allow}");
    }
}

#[tokio::test]
async fn invalid_json_body_is_a_validation_failure() {
    let client = client();
    let response = client
        .request(
            TestRequest::post("/api/v2/courses")
                .header("content-type", "application/json"),
        )
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["errors"].is_string());
}

//! End-to-end coverage of the student resource.

use enroll_api::routes;
use enroll_api::store::{AppState, MemoryRegistry};
use enroll_api::TestClient;
use serde_json::{json, Value};

fn client() -> TestClient {
    TestClient::new(routes::build(AppState::new(MemoryRegistry::seeded())))
}

fn new_student() -> Value {
    json!({
        "studentId": "660610123",
        "firstName": "Somchai",
        "lastName": "Jaidee",
        "program": "CPE",
        "section": "001"
    })
}

#[tokio::test]
async fn list_returns_all_seeded_students() {
    let client = client();
    let response = client.get("/api/v2/students").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn list_filters_by_program_with_exact_match() {
    let client = client();

    let body: Value = client.get("/api/v2/students?program=CPE").await.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|s| s["program"] == "CPE"));

    let body: Value = client.get("/api/v2/students?program=ISNE").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // no case folding
    let body: Value = client.get("/api/v2/students?program=cpe").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn get_student_returns_record_and_link_header() {
    let client = client();
    let response = client.get("/api/v2/students/650610001").await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.header("link"), Some("/students/650610001"));

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Here is your student");
    assert_eq!(body["data"]["studentId"], "650610001");
    assert_eq!(body["data"]["firstName"], "Anucha");
}

#[tokio::test]
async fn get_student_with_malformed_id_is_rejected() {
    let client = client();
    let response = client.get("/api/v2/students/65061").await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"], "Student ID must be exactly 9 characters");
}

#[tokio::test]
async fn get_unknown_student_is_not_found() {
    let client = client();
    let response = client.get("/api/v2/students/670612123").await;
    assert_eq!(response.status(), 404);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Student does not exists");
}

#[tokio::test]
async fn created_student_is_retrievable_with_same_data() {
    let client = client();

    let response = client.post_json("/api/v2/students", &new_student()).await;
    assert_eq!(response.status(), 201);
    assert_eq!(response.header("link"), Some("/students/660610123"));

    let created: Value = response.json();
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["studentId"], "660610123");

    let fetched: Value = client.get("/api/v2/students/660610123").await.json();
    assert_eq!(fetched["data"], created["data"]);
}

#[tokio::test]
async fn duplicate_create_conflicts_and_leaves_collection_unchanged() {
    let client = client();

    let before: Value = client.get("/api/v2/students").await.json();
    let duplicate = json!({
        "studentId": "650610001",
        "firstName": "Anucha",
        "lastName": "Saetan",
        "program": "CPE"
    });

    let response = client.post_json("/api/v2/students", &duplicate).await;
    assert_eq!(response.status(), 409);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Student is already exists");

    let after: Value = client.get("/api/v2/students").await.json();
    assert_eq!(before["data"], after["data"]);
}

#[tokio::test]
async fn create_with_missing_required_field_is_rejected() {
    let client = client();
    let response = client
        .post_json(
            "/api/v2/students",
            &json!({
                "studentId": "660610124",
                "firstName": "Somsri",
                "program": "ISNE"
            }),
        )
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["message"], "Validation failed");
}

#[tokio::test]
async fn create_with_unknown_program_is_rejected() {
    let client = client();
    let response = client
        .post_json(
            "/api/v2/students",
            &json!({
                "studentId": "660610124",
                "firstName": "Somsri",
                "lastName": "Deejai",
                "program": "EE"
            }),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn update_is_a_shallow_merge() {
    let client = client();

    let response = client
        .put_json(
            "/api/v2/students",
            &json!({"studentId": "650610001", "firstName": "Anan"}),
        )
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(
        body["message"],
        "Student 650610001 has been updated successfully"
    );
    assert_eq!(body["data"]["firstName"], "Anan");

    // untouched fields survive
    let fetched: Value = client.get("/api/v2/students/650610001").await.json();
    assert_eq!(fetched["data"]["firstName"], "Anan");
    assert_eq!(fetched["data"]["lastName"], "Saetan");
    assert_eq!(fetched["data"]["section"], "001");
    assert_eq!(fetched["data"]["courses"], json!([261101, 261102]));
}

#[tokio::test]
async fn update_unknown_student_is_not_found() {
    let client = client();

    let before: Value = client.get("/api/v2/students").await.json();
    let response = client
        .put_json(
            "/api/v2/students",
            &json!({"studentId": "999999999", "firstName": "Nobody"}),
        )
        .await;
    assert_eq!(response.status(), 404);

    let after: Value = client.get("/api/v2/students").await.json();
    assert_eq!(before["data"], after["data"]);
}

#[tokio::test]
async fn delete_removes_exactly_one_and_preserves_order() {
    let client = client();

    let response = client
        .delete_json("/api/v2/students", &json!({"studentId": "650610002"}))
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Student 650610002 has been deleted successfully"
    );
    assert!(body.get("data").is_none());

    let remaining: Value = client.get("/api/v2/students").await.json();
    let ids: Vec<&str> = remaining["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["studentId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["650610001", "650615010", "650615011"]);

    let response = client.get("/api/v2/students/650610002").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn delete_unknown_student_is_a_reported_no_op() {
    let client = client();

    let response = client
        .delete_json("/api/v2/students", &json!({"studentId": "999999999"}))
        .await;
    assert_eq!(response.status(), 404);

    let body: Value = client.get("/api/v2/students").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn delete_with_malformed_body_is_rejected() {
    let client = client();
    let response = client
        .delete_json("/api/v2/students", &json!({"id": "650610001"}))
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["message"], "Validation failed");
}

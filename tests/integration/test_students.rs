//! End-to-end tests for the student endpoints and seed loading.

mod common;

use std::path::PathBuf;

use campus_api::{Config, SeedData, Store};
use common::{link, spawn_default_server, spawn_server};
use serde_json::{json, Value};

/// Path to the seed fixture.
fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/seed.json")
}

/// Tests relation resolution with a reference to a missing course.
#[tokio::test]
async fn test_enrolled_courses_skip_missing() {
    let server = spawn_default_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/courses", server.api_url))
        .json(&json!({"courseId": 261207, "courseTitle": "Database"}))
        .send()
        .await
        .expect("POST failed");
    client
        .delete(format!("{}/courses", server.api_url))
        .json(&json!({"courseId": 261208}))
        .send()
        .await
        .expect("DELETE failed");

    let response = client
        .get(format!("{}/students/670610720/courses", server.api_url))
        .send()
        .await
        .expect("GET failed");
    assert_eq!(response.status(), 200);
    assert_eq!(link(&response).as_deref(), Some("/students/670610720"));

    let body: Value = response.json().await.expect("Invalid JSON");
    assert_eq!(
        body["data"],
        json!({
            "studentId": "670610720",
            "courses": [{"courseId": 261207, "courseTitle": "Database"}]
        })
    );
}

/// Tests a server started from the seed fixture.
#[tokio::test]
async fn test_server_from_seed_file() {
    let seed = SeedData::load(&fixture_path()).expect("Failed to load seed fixture");
    let store = Store::from_seed(seed).expect("Invalid seed");
    let server = spawn_server(Config::default(), store).await;
    let client = reqwest::Client::new();

    let students: Vec<Value> = client
        .get(format!("{}/students", server.api_url))
        .send()
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["studentId"], "660610501");

    // Collection order, not enrollment order; 269999 is dangling.
    let body: Value = client
        .get(format!("{}/students/660610501/courses", server.api_url))
        .send()
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(
        body["data"]["courses"],
        json!([
            {"courseId": 269102, "courseTitle": "Computer Networks"},
            {"courseId": 269101, "courseTitle": "Introduction to Programming"}
        ])
    );
}

/// Tests the student lookup error paths.
#[tokio::test]
async fn test_student_lookup_errors() {
    let server = spawn_default_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/students/000000000", server.api_url))
        .send()
        .await
        .expect("GET failed");
    assert_eq!(response.status(), 404);

    let response = client
        .get(format!("{}/students/abc", server.api_url))
        .send()
        .await
        .expect("GET failed");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["errors"], "Student Id must contain exactly 9 digits");
}

/// Tests the identity endpoint outside the API prefix.
#[tokio::test]
async fn test_me_endpoint() {
    let server = spawn_default_server().await;

    let body: Value = reqwest::get(format!("{}/me", server.root_url))
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["studentId"], "670610720");
}

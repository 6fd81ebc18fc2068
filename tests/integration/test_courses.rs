//! End-to-end tests for the course endpoints over a real HTTP connection.

mod common;

use common::{link, spawn_default_server};
use serde_json::{json, Value};

/// Tests the create, read, delete, read sequence for a single course.
#[tokio::test]
async fn test_course_lifecycle() {
    let server = spawn_default_server().await;
    let client = reqwest::Client::new();
    let course = json!({"courseId": 261207, "courseTitle": "Database"});

    let response = client
        .post(format!("{}/courses", server.api_url))
        .json(&course)
        .send()
        .await
        .expect("POST failed");
    assert_eq!(response.status(), 201);
    assert_eq!(link(&response).as_deref(), Some("/courses/261207"));

    let response = client
        .get(format!("{}/courses/261207", server.api_url))
        .send()
        .await
        .expect("GET failed");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["data"], course);

    let response = client
        .delete(format!("{}/courses", server.api_url))
        .json(&json!({"courseId": 261207}))
        .send()
        .await
        .expect("DELETE failed");
    assert_eq!(response.status(), 200);
    assert_eq!(link(&response).as_deref(), Some("/courses/261207"));
    let body: Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["data"], course);

    let response = client
        .get(format!("{}/courses/261207", server.api_url))
        .send()
        .await
        .expect("GET failed");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["message"], "Course does not exist");
}

/// Tests that a partial update keeps fields that were not supplied.
#[tokio::test]
async fn test_partial_update_round_trip() {
    let server = spawn_default_server().await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/courses", server.api_url))
        .json(&json!({"courseId": 261497, "instructor": "Dome"}))
        .send()
        .await
        .expect("PUT failed");
    assert_eq!(response.status(), 200);

    let body: Value = client
        .get(format!("{}/courses/261497", server.api_url))
        .send()
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(
        body["data"],
        json!({
            "courseId": 261497,
            "courseTitle": "Full Stack Development",
            "instructor": "Dome"
        })
    );
}

/// Tests that concurrent creations of the same id produce exactly one record.
#[tokio::test]
async fn test_concurrent_duplicate_creates() {
    let server = spawn_default_server().await;
    let client = reqwest::Client::new();
    let url = format!("{}/courses", server.api_url);

    let requests = (0..16).map(|i| {
        let client = client.clone();
        let url = url.clone();
        tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({"courseId": 300000, "courseTitle": format!("Attempt {i}")}))
                .send()
                .await
                .expect("POST failed")
                .status()
                .as_u16()
        })
    });

    let mut created = 0;
    let mut conflicts = 0;
    for request in requests {
        match request.await.expect("Task panicked") {
            201 => created += 1,
            409 => conflicts += 1,
            other => panic!("Unexpected status {other}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 15);

    let courses: Vec<Value> = client
        .get(&url)
        .send()
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");
    let matching = courses
        .iter()
        .filter(|c| c["courseId"] == 300000)
        .count();
    assert_eq!(matching, 1);
}

/// Tests that malformed requests get the validation envelope.
#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = spawn_default_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/courses", server.api_url))
        .header("content-type", "application/json")
        .body("{\"courseId\": ")
        .send()
        .await
        .expect("POST failed");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
}

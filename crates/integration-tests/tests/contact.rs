//! Integration tests for the contact form endpoint.

use golden_crumb_integration_tests::TestApp;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

fn message(text: &str) -> Value {
    json!({ "name": "Maya", "email": "maya@example.com", "message": text })
}

#[tokio::test]
async fn test_message_length_boundary() {
    let app = TestApp::spawn().await;

    let (status, error) = app
        .send(Method::POST, "/api/contact-messages", &message(&"a".repeat(11)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Invalid contact payload");
    assert!(error["fields"]["message"].is_string());
    assert_eq!(app.count("contact_messages").await, 0);

    let (status, body) = app
        .send(Method::POST, "/api/contact-messages", &message(&"a".repeat(12)))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "ok": true }));
    assert_eq!(app.count("contact_messages").await, 1);
}

#[tokio::test]
async fn test_every_invalid_field_is_reported() {
    let app = TestApp::spawn().await;

    let body = json!({ "name": "  ", "email": "not-an-email", "message": "hi" });
    let (status, error) = app.send(Method::POST, "/api/contact-messages", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = error["fields"].as_object().expect("fields is an object");
    let mut names: Vec<&str> = fields.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(names, ["email", "message", "name"]);
}

#[tokio::test]
async fn test_missing_fields_are_validation_errors() {
    let app = TestApp::spawn().await;

    let (status, error) = app
        .send(Method::POST, "/api/contact-messages", &json!({}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Invalid contact payload");
    assert!(error["fields"]["name"].is_string());
}

#[tokio::test]
async fn test_stored_message_is_trimmed() {
    let app = TestApp::spawn().await;

    let body = json!({
        "name": "  Maya  ",
        "email": " maya@example.com ",
        "message": "   Do you bake rye on Sundays?   "
    });
    let (status, _) = app.send(Method::POST, "/api/contact-messages", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (name, email, text): (String, String, String) =
        sqlx::query_as("SELECT name, email, message FROM contact_messages")
            .fetch_one(&app.pool)
            .await
            .expect("message stored");
    assert_eq!(name, "Maya");
    assert_eq!(email, "maya@example.com");
    assert_eq!(text, "Do you bake rye on Sundays?");
}

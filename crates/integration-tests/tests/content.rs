//! Integration tests for the read-only content endpoints.

use golden_crumb_integration_tests::TestApp;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn titles(items: &Value) -> Vec<&str> {
    items
        .as_array()
        .expect("expected an array")
        .iter()
        .map(|item| item["title"].as_str().expect("title is a string"))
        .collect()
}

#[tokio::test]
async fn test_health_reports_server_time() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    let time = body["serverTime"].as_str().expect("serverTime is a string");
    // SQLite datetime('now'): YYYY-MM-DD HH:MM:SS
    assert_eq!(time.len(), 19);
}

#[tokio::test]
async fn test_collections_are_sorted() {
    let app = TestApp::spawn().await;

    let (status, featured) = app.get("/api/featured-items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        titles(&featured),
        ["Berry Velvet Cake", "Honey Butter Croissant", "Sourdough Loaf"]
    );

    let (_, order_items) = app.get("/api/order-items").await;
    assert_eq!(
        titles(&order_items),
        [
            "Cinnamon Swirl Buns",
            "Classic Baguette",
            "Rose Macaron Box",
            "Seasonal Fruit Tart"
        ]
    );

    // Gallery and testimonials keep insertion order.
    let (_, gallery) = app.get("/api/gallery-images").await;
    let ids: Vec<i64> = gallery
        .as_array()
        .expect("expected an array")
        .iter()
        .map(|image| image["id"].as_i64().expect("id is a number"))
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    let (_, testimonials) = app.get("/api/testimonials").await;
    assert_eq!(testimonials[0]["name"], "Maya R.");
}

#[tokio::test]
async fn test_content_snapshot_matches_collections() {
    let app = TestApp::spawn().await;

    let (status, content) = app.get("/api/content").await;
    assert_eq!(status, StatusCode::OK);

    let (_, featured) = app.get("/api/featured-items").await;
    let (_, settings) = app.get("/api/site-settings").await;

    assert_eq!(content["featuredItems"], featured);
    assert_eq!(content["siteSettings"], settings);
    assert_eq!(settings["brandName"], "Golden Crumb Bakery");
    assert_eq!(content["orderItems"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_prices_are_numbers() {
    let app = TestApp::spawn().await;

    let (_, featured) = app.get("/api/featured-items").await;
    let croissant = featured
        .as_array()
        .expect("expected an array")
        .iter()
        .find(|item| item["id"] == "croissant")
        .expect("croissant is seeded");

    assert_eq!(croissant["price"], json!(4.5));
}

#[tokio::test]
async fn test_request_id_header() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/api/health"))
        .header("x-request-id", "trace-me-42")
        .send()
        .await
        .expect("request failed");
    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("trace-me-42")
    );

    let resp = app
        .client
        .get(app.url("/api/health"))
        .send()
        .await
        .expect("request failed");
    let generated = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("a request id is generated");
    assert_eq!(generated.len(), 36);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/api/nope"))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

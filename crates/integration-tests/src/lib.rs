//! Integration tests for the Golden Crumb storefront API.
//!
//! Each test starts the full router on an ephemeral local port, backed by a
//! fresh in-memory `SQLite` database that has been migrated and seeded with
//! the default content, and talks to it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p golden-crumb-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `content` - Read endpoints and health
//! - `admin` - Replace-all content saves
//! - `orders` - Order submission and lookup
//! - `contact` - Contact form validation and storage

use reqwest::{Client, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use golden_crumb_storefront::{AppState, StorefrontConfig, build_router, db};

/// A running storefront plus a handle on its database.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Start a seeded storefront.
    ///
    /// # Panics
    ///
    /// Panics if the database or the listener cannot be set up.
    pub async fn spawn() -> Self {
        let pool = db::create_memory_pool()
            .await
            .expect("Failed to create test database");
        db::migrate(&pool).await.expect("Failed to migrate test database");
        db::seed::seed_defaults(&pool)
            .await
            .expect("Failed to seed test database");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = build_router(AppState::new(StorefrontConfig::default(), pool.clone()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
            pool,
        }
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET` a path and decode the JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        decode(resp).await
    }

    /// Send a JSON body with the given method and decode the JSON response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn send(&self, method: reqwest::Method, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .expect("request failed");
        decode(resp).await
    }

    /// `POST` a raw body with a JSON content type.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn post_raw(&self, path: &str, body: &'static str) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("request failed");
        decode(resp).await
    }

    /// Number of rows in a table.
    ///
    /// # Panics
    ///
    /// Panics if the query fails.
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("count query failed")
    }
}

async fn decode(resp: reqwest::Response) -> (StatusCode, Value) {
    let status = resp.status();
    let body = resp.json().await.expect("response body is not JSON");
    (status, body)
}

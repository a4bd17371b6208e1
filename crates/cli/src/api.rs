//! HTTP client for the storefront API.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use golden_crumb_core::FieldErrors;
use golden_crumb_core::catalog::ContentSnapshot;
use golden_crumb_core::contact::ContactForm;
use golden_crumb_core::order::{Order, OrderCreated, OrderSubmission};

/// Errors talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error body.
    #[error("{status}: {}", message(.error, .detail.as_deref()))]
    Rejected {
        status: StatusCode,
        error: String,
        detail: Option<String>,
        fields: Option<FieldErrors>,
    },
}

fn message(error: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{error} ({detail})"),
        None => error.to_owned(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorResponse {
    error: String,
    detail: Option<String>,
    fields: Option<FieldErrors>,
}

/// Client for the storefront JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the API rooted at `base`.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body: ErrorResponse = response.json().await.unwrap_or_default();
        Err(ApiError::Rejected {
            status,
            error: body.error,
            detail: body.detail,
            fields: body.fields,
        })
    }

    /// Fetch all storefront content.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    pub async fn content(&self) -> Result<ContentSnapshot, ApiError> {
        let response = self.http.get(self.url("api/content")?).send().await?;
        Self::read(response).await
    }

    /// Submit an order payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    pub async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderCreated, ApiError> {
        let response = self
            .http
            .post(self.url("api/orders")?)
            .json(order)
            .send()
            .await?;
        Self::read(response).await
    }

    /// List stored orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        let response = self.http.get(self.url("api/orders")?).send().await?;
        Self::read(response).await
    }

    /// Send a contact message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    pub async fn send_contact(&self, form: &ContactForm) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("api/contact-messages")?)
            .json(form)
            .send()
            .await?;
        Self::read::<serde_json::Value>(response).await.map(|_| ())
    }
}

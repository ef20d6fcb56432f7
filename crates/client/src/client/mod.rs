//! HTTP client for the itemsync API.

pub mod health;
pub mod items;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use itemsync_core::operation::Invocation;

use crate::error::{ClientError, Result};

/// Default server base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Successful `/graphql` response body.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_type: String,
    message: String,
}

/// HTTP client for the itemsync API.
#[derive(Debug, Clone)]
pub struct ItemsyncClient {
    client: reqwest::Client,
    base_url: String,
}

impl ItemsyncClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment (ITEMSYNC_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ITEMSYNC_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Run an invocation and return its `data`.
    pub async fn invoke<T: DeserializeOwned>(&self, invocation: &Invocation) -> Result<T> {
        let response = self
            .client
            .post(self.url("/graphql"))
            .json(invocation)
            .send()
            .await?;
        let envelope: Envelope<T> = self.handle_response(response).await?;
        Ok(envelope.data)
    }

    /// Resolve an invocation without executing it.
    ///
    /// Returns the storage request document the server would issue.
    pub async fn explain(&self, invocation: &Invocation) -> Result<Value> {
        let response = self
            .client
            .post(self.url("/explain"))
            .json(invocation)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Handle error responses.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(ClientError::from);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(error_from_body(status.as_u16(), body))
    }
}

/// Builds the error for a non-success response.
///
/// Bodies in the resolver error format keep their `errorType`.
fn error_from_body(status: u16, body: String) -> ClientError {
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error) => ClientError::Resolver {
            status,
            error_type: error.error_type,
            message: error.message,
        },
        Err(_) => ClientError::ServerError {
            status,
            message: body,
        },
    }
}

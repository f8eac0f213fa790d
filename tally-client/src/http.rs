//! HTTP plumbing for the order store API
//!
//! Thin JSON transport: builds URLs against the configured base,
//! decodes 2xx bodies, and maps non-2xx responses onto [`ClientError`].
//! Requests are traced on dispatch and on completion or failure; the
//! tracing is diagnostic only and never affects control flow.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};

/// Error body sent by the store on failures: `{"error": "..."}`.
#[derive(serde::Deserialize)]
struct ApiErrorPayload {
    error: String,
}

/// HTTP client for the order store.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::handle_response(&url, response).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(&url, response).await
    }

    /// Make a PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!("PUT {}", url);
        let response = self.client.put(&url).json(body).send().await?;
        Self::handle_response(&url, response).await
    }

    /// Make a PUT request without a body (status updates carry
    /// everything in the query string).
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!("PUT {}", url);
        let response = self.client.put(&url).send().await?;
        Self::handle_response(&url, response).await
    }

    /// Make a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Self::handle_response(&url, response).await
    }

    /// Handle the HTTP response.
    async fn handle_response<T: DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let error = map_error(status, text);
            tracing::warn!("{} failed with {}: {}", url, status, error);
            return Err(error);
        }

        tracing::debug!("{} completed with {}", url, status);
        response.json().await.map_err(Into::into)
    }
}

/// Map a non-2xx response onto the error taxonomy, preferring the
/// store's `{"error": ...}` message over the raw body.
fn map_error(status: StatusCode, body: String) -> ClientError {
    let message = serde_json::from_str::<ApiErrorPayload>(&body)
        .map(|payload| payload.error)
        .unwrap_or(body);

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        _ => ClientError::Internal(message),
    }
}

//! Shared HTTP plumbing for the support backend endpoints.

use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::ports::ApiError;

/// JSON client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    api_key: Option<Secret<String>>,
}

impl ApiClient {
    /// Creates a client with the given base URL and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {}", e)))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            timeout,
            api_key: None,
        })
    }

    /// Creates a client from the `api` configuration section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Self::new(config.base(), config.timeout())?;
        Ok(match &config.api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        })
    }

    /// Sends `Authorization: Bearer <key>` with every request.
    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Full URL for an `/api/...` path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POSTs a JSON body and decodes a JSON response.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(path, body).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| ApiError::parse(format!("Invalid response from {}: {}", path, e)))
    }

    /// POSTs a JSON body and ignores any response body.
    pub async fn post_json_no_content<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(path, body).await.map(|_| ())
    }

    async fn send<B>(&self, path: &str, body: &B) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .client
            .post(self.endpoint(path))
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key.expose_secret()));
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        Self::check_status(response).await
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ApiError::network(format!("Connection failed: {}", e))
        } else {
            ApiError::network(e.to_string())
        }
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::status(status.as_u16(), body))
    }
}

//! HTTP transport for the billing backend
//!
//! [`ApiTransport`] is the seam the orchestration layer talks through;
//! [`HttpClient`] is the reqwest-backed implementation. Responses are
//! returned as raw envelope JSON and normalized by [`decode`] /
//! [`acknowledge`], so business errors travel the same channel whatever
//! HTTP status the backend attached to them.

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::ApiResponse;

/// Transport abstraction over the backend REST API
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get(&self, path: &str) -> ClientResult<Value>;
    async fn post(&self, path: &str, body: Value) -> ClientResult<Value>;
    async fn patch(&self, path: &str, body: Value) -> ClientResult<Value>;
    async fn delete(&self, path: &str, body: Value) -> ClientResult<Value>;
}

/// HTTP client for making network requests to the billing backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ClientResult<Value> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut request = self.client.request(method, &url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// 401 is mapped before body parsing; every other status is expected
    /// to carry an envelope body, success or `{error, statusCode}`.
    async fn handle_response(response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let text = response.text().await?;
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(ClientError::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text
            ))),
            Err(_) => Err(ClientError::InvalidResponse(text)),
        }
    }
}

#[async_trait]
impl ApiTransport for HttpClient {
    async fn get(&self, path: &str) -> ClientResult<Value> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    async fn delete(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.request(Method::DELETE, path, Some(body)).await
    }
}

/// Decode an envelope into typed data plus the optional server message
pub fn decode<T: DeserializeOwned>(envelope: Value) -> ClientResult<(T, Option<String>)> {
    let response: ApiResponse<T> = serde_json::from_value(envelope)?;
    match response.into_result() {
        Ok(data_and_message) => Ok(data_and_message),
        Err(err) if err.is_unauthorized() => Err(ClientError::Unauthorized),
        Err(err) => Err(ClientError::Api(err.error)),
    }
}

/// Decode an envelope that only acknowledges (no `data` expected)
pub fn acknowledge(envelope: Value) -> ClientResult<Option<String>> {
    let response: ApiResponse<Value> = serde_json::from_value(envelope)?;
    match response.into_ack() {
        Ok(message) => Ok(message),
        Err(err) if err.is_unauthorized() => Err(ClientError::Unauthorized),
        Err(err) => Err(ClientError::Api(err.error)),
    }
}

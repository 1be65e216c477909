use std::sync::Arc;

use anyhow::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::http::{HttpRequest, ReqwestTransport, Transport};
use super::types::RequestError;

/// Default GitHub REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type requested on every call
const ACCEPT_HEADER: &str = "application/vnd.github+json";

/// Default CLI version (from Cargo.toml)
const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the User-Agent string. GitHub rejects requests without one.
fn build_user_agent() -> String {
    std::env::var("CLOUDSION_USER_AGENT")
        .unwrap_or_else(|_| format!("cloudsion-deploy/{}", DEFAULT_VERSION))
}

/// API client for the GitHub REST API.
///
/// Holds no credentials: the bearer token is passed into every call. Cloning
/// is cheap and shares the underlying transport (and its connection pool).
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    user_agent: String,
}

impl ApiClient {
    /// Create a client talking to `base_url` over HTTP
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(
            base_url,
        )?)))
    }

    /// Create a client over a custom transport (used by tests)
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            user_agent: build_user_agent(),
        }
    }

    /// Make an authenticated API request.
    ///
    /// Returns `Ok(None)` for `204 No Content`. Every non-2xx response becomes
    /// a `RequestError` carrying the status and GitHub's message.
    pub async fn request(
        &self,
        token: &str,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<serde_json::Value>, RequestError> {
        self.execute(token, method, path, body)
            .await
            .map(|(_, value)| value)
    }

    /// Send a request and return the success status with the decoded body
    async fn execute(
        &self,
        token: &str,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(u16, Option<serde_json::Value>), RequestError> {
        let mut headers = vec![
            ("Authorization", format!("Bearer {}", token)),
            ("Accept", ACCEPT_HEADER.to_string()),
            ("User-Agent", self.user_agent.clone()),
        ];
        if body.is_some() {
            headers.push(("Content-Type", "application/json".to_string()));
        }

        let request = HttpRequest {
            method: method.clone(),
            path: path.to_string(),
            headers,
            body,
        };

        let response = self.transport.send(request).await?;

        if !(200..300).contains(&response.status) {
            let err = RequestError::from_http_response(response.status, &response.body);
            debug!("{} {} failed: {} ({:?})", method, path, err.message, err.status);
            return Err(err);
        }

        if response.status == 204 || response.body.is_empty() {
            return Ok((response.status, None));
        }

        let status = response.status;
        serde_json::from_slice(&response.body)
            .map(|value| (status, Some(value)))
            .map_err(|e| {
                warn!("Failed to parse response from {} {}: {}", method, path, e);
                RequestError {
                    status: Some(status),
                    message: format!("Failed to parse API response: {}", e),
                }
            })
    }

    /// Make a request and decode the JSON response into `T`
    pub async fn request_json<T>(
        &self,
        token: &str,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        let (status, value) = self.execute(token, method.clone(), path, body).await?;
        let value = value.ok_or_else(|| RequestError {
            status: Some(status),
            message: format!("Empty response from {} {}", method, path),
        })?;

        serde_json::from_value(value).map_err(|e| RequestError {
            status: None,
            message: format!("Unexpected response from {} {}: {}", method, path, e),
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

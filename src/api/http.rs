//! HTTP transport for the GitHub API.
//!
//! `Transport` is the seam between `ApiClient` and the network: the real
//! implementation sends requests with `reqwest`, tests plug in an in-memory
//! GitHub instead.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use super::types::RequestError;

/// Default request timeout in seconds
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A fully prepared API request. `path` is relative to the API base URL and
/// may carry a query string.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
}

#[cfg(test)]
impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response: status code and body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends a single request. Implementations never retry and only fail when no
/// response was received; non-2xx responses are returned as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// `Transport` backed by a pooled `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Join the API base with a request path. Plain concatenation keeps any
    /// path prefix on the base (GitHub Enterprise serves the API under `/api/v3`).
    fn build_url(base_url: &str, path: &str) -> Result<Url, RequestError> {
        let joined = if path.starts_with('/') {
            format!("{}{}", base_url, path)
        } else {
            format!("{}/{}", base_url, path)
        };
        Url::parse(&joined)
            .map_err(|e| RequestError::transport(format!("Invalid request URL {}: {}", joined, e)))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let url = Self::build_url(&self.base_url, &request.path)?;

        debug!("=== API Request ===");
        debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            let kind = if e.is_timeout() {
                "timed out"
            } else if e.is_connect() {
                "could not connect"
            } else {
                "failed"
            };
            RequestError::transport(format!("Request to {} {}: {}", url, kind, e))
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::transport(format!("Failed to read response body: {}", e)))?;

        debug!("=== API Response ===");
        debug!("Status: {}", status);

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

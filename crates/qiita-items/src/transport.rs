//! HTTP transport abstraction.
//!
//! The fetcher only needs "GET this URL with these headers and tell me the
//! status, whether it counts as success, and the body". [`HttpTransport`]
//! captures exactly that, so the core stays testable without a network and
//! the reqwest client is one implementation among others.

use async_trait::async_trait;
use qiita_core::{Error, Result};

/// An outbound GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL including the query string.
    pub url: String,
    /// Header name/value pairs, sent in order.
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a request with no headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Looks up a header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric status code.
    pub status: u16,
    /// Whether the transport considers the status successful.
    pub success: bool,
    /// Raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Builds a response whose success flag follows the 2xx convention.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            success: (200..300).contains(&status),
            body: body.into(),
        }
    }
}

/// Minimal fetch contract used by the item fetcher.
///
/// Implementations report transport-level failures (no response) as
/// errors; any received response, whatever its status, is `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes a GET request.
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Transport backed by a shared `reqwest::Client`.
///
/// No timeout is configured; a hanging upstream blocks the call until the
/// caller gives up.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport from an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport_with_source("Failed to call Qiita API", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport_with_source("Failed to read Qiita response", e))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            success: status.is_success(),
            body,
        })
    }
}

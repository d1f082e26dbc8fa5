//! Mock HTTP transport for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use qiita_core::{Error, Result};

/// Mock transport that returns canned responses and records requests.
///
/// Responses are returned in order. After all responses are used, the
/// transport cycles back to the first one. Clones share state.
#[derive(Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

struct MockState {
    canned: Vec<Canned>,
    index: usize,
    requests: Vec<HttpRequest>,
}

#[derive(Clone)]
enum Canned {
    Response(HttpResponse),
    Failure(String),
}

impl MockTransport {
    /// Creates a mock transport with canned responses.
    ///
    /// # Examples
    ///
    /// ```
    /// use qiita_items::mock::MockTransport;
    /// use qiita_items::transport::HttpResponse;
    ///
    /// let transport = MockTransport::new(vec![
    ///     HttpResponse::new(200, "[]"),
    ///     HttpResponse::new(404, "not found"),
    /// ]);
    /// ```
    pub fn new(responses: Vec<HttpResponse>) -> Self {
        Self::from_canned(responses.into_iter().map(Canned::Response).collect())
    }

    /// Creates a mock transport with a single response.
    pub fn with_response(response: HttpResponse) -> Self {
        Self::new(vec![response])
    }

    /// Creates a mock transport answering 200 with the given JSON body.
    pub fn with_json(body: &serde_json::Value) -> Self {
        Self::with_response(HttpResponse::new(200, body.to_string()))
    }

    /// Creates a mock transport answering with an empty body and `status`.
    pub fn with_status(status: u16) -> Self {
        Self::with_response(HttpResponse::new(status, ""))
    }

    /// Creates a mock transport whose every call fails at transport level.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_canned(vec![Canned::Failure(message.into())])
    }

    fn from_canned(canned: Vec<Canned>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                canned,
                index: 0,
                requests: Vec::new(),
            })),
        }
    }

    /// Returns every request received so far.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Returns the most recent request, if any.
    pub async fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().await.requests.last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut state = self.state.lock().await;
        state.requests.push(request);

        if state.canned.is_empty() {
            return Ok(HttpResponse::new(200, "[]"));
        }

        let canned = state.canned[state.index].clone();
        state.index = (state.index + 1) % state.canned.len();

        match canned {
            Canned::Response(response) => Ok(response),
            Canned::Failure(message) => Err(Error::transport_with_source(
                "Failed to call Qiita API",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, message),
            )),
        }
    }
}

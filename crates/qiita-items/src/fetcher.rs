//! Item fetching: request construction, status handling, projection.
//!
//! # Design
//!
//! `ItemFetcher` is split the same way as a host-does-IO client:
//! [`ItemFetcher::build_request`] produces plain request data and
//! [`ItemFetcher::parse_response`] consumes plain response data. Only
//! [`ItemFetcher::fetch_raw`] touches the transport, exactly once per call,
//! with no retry.

use std::fmt;
use std::sync::Arc;

use qiita_core::{ConfigProvider, Error, Result};
use serde_json::Value;

use crate::params::FetchParams;
use crate::projection::project_all;
use crate::query::build_items_url;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Fetches items from the upstream items endpoint.
#[derive(Clone)]
pub struct ItemFetcher {
    transport: Arc<dyn HttpTransport>,
    items_url: String,
    access_token: String,
}

impl ItemFetcher {
    /// Creates a fetcher for `{base_url}/items`.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: &str,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            items_url: format!("{}/items", base_url.trim_end_matches('/')),
            access_token: access_token.into(),
        }
    }

    /// Creates a fetcher from a configuration provider.
    pub fn from_config<C: ConfigProvider>(transport: Arc<dyn HttpTransport>, config: &C) -> Self {
        Self {
            transport,
            items_url: config.items_url(),
            access_token: config.access_token().to_string(),
        }
    }

    /// The items endpoint URL, without query string.
    pub fn items_url(&self) -> &str {
        &self.items_url
    }

    /// Builds the GET request for the given parameters.
    pub fn build_request(&self, params: &FetchParams) -> HttpRequest {
        HttpRequest::get(build_items_url(&self.items_url, params))
            .with_header("Authorization", format!("Bearer {}", self.access_token))
            .with_header("Accept", "application/json")
    }

    /// Decodes a response into raw items.
    ///
    /// A non-success response becomes [`Error::Request`]. Elements are not
    /// checked beyond being JSON values; projection tolerates anything.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Vec<Value>> {
        if !response.success {
            return Err(Error::request(response.status));
        }
        serde_json::from_str(&response.body)
            .map_err(|e| Error::decode(format!("expected a JSON array of items: {e}")))
    }

    /// Fetches raw, unprojected items.
    pub async fn fetch_raw(&self, params: &FetchParams) -> Result<Vec<Value>> {
        params.check()?;
        let request = self.build_request(params);
        tracing::debug!(url = %request.url, "Fetching Qiita items");

        let response = self.transport.get(request).await?;
        if !response.success {
            tracing::warn!(status = response.status, "Qiita API returned an error status");
        }

        let items = self.parse_response(response)?;
        tracing::debug!(count = items.len(), "Fetched Qiita items");
        Ok(items)
    }

    /// Fetches items and projects each onto the requested field set.
    pub async fn fetch_items(&self, params: &FetchParams) -> Result<Vec<Value>> {
        let raw = self.fetch_raw(params).await?;
        Ok(project_all(&raw, params.additional_fields()))
    }
}

impl fmt::Debug for ItemFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemFetcher")
            .field("items_url", &self.items_url)
            .field("access_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use chrono::NaiveDate;
    use serde_json::json;

    const BASE: &str = "https://qiita.com/api/v2";

    fn fetcher(transport: &MockTransport) -> ItemFetcher {
        ItemFetcher::new(Arc::new(transport.clone()), BASE, "test-token")
    }

    fn sample_items() -> Value {
        json!([
            {
                "id": "1",
                "title": "Test Article 1",
                "likes_count": 10,
                "body": "Test content",
                "created_at": "2023-01-01T00:00:00Z",
                "url": "https://qiita.com/test/items/1",
                "tags": [{"name": "JavaScript", "versions": []}],
                "user": {"id": "user1", "name": "Test User"}
            },
            {
                "id": "2",
                "title": "Test Article 2",
                "created_at": "2023-01-03T00:00:00Z",
                "url": "https://qiita.com/test/items/2",
                "user": {"id": "user1", "name": "Test User"}
            }
        ])
    }

    #[test]
    fn test_build_request_headers() {
        let fetcher = fetcher(&MockTransport::with_status(200));
        let request = fetcher.build_request(&FetchParams::new());
        assert_eq!(request.url, "https://qiita.com/api/v2/items");
        assert_eq!(request.header("Authorization"), Some("Bearer test-token"));
        assert_eq!(request.header("Accept"), Some("application/json"));
    }

    #[test]
    fn test_empty_token_still_sent() {
        let transport = MockTransport::with_status(200);
        let fetcher = ItemFetcher::new(Arc::new(transport), BASE, "");
        let request = fetcher.build_request(&FetchParams::new());
        assert_eq!(request.header("authorization"), Some("Bearer "));
    }

    #[test]
    fn test_debug_redacts_token() {
        let fetcher = fetcher(&MockTransport::with_status(200));
        let debug = format!("{fetcher:?}");
        assert!(!debug.contains("test-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_fetch_items_default_projection() {
        let transport = MockTransport::with_json(&sample_items());
        let items = fetcher(&transport)
            .fetch_items(&FetchParams::new())
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            json!({
                "title": "Test Article 1",
                "url": "https://qiita.com/test/items/1",
                "created_at": "2023-01-01T00:00:00Z",
                "user": {"name": "Test User"}
            })
        );
        assert_eq!(items[1]["title"], "Test Article 2");

        let request = transport.last_request().await.unwrap();
        assert!(!request.url.contains('?'));
    }

    #[tokio::test]
    async fn test_fetch_items_additional_fields() {
        let transport = MockTransport::with_json(&sample_items());
        let params = FetchParams::new().with_additional_fields(["id", "likes_count", "tags", "user.id"]);
        let items = fetcher(&transport).fetch_items(&params).await.unwrap();

        assert_eq!(items[0]["id"], "1");
        assert_eq!(items[0]["likes_count"], 10);
        assert_eq!(items[0]["tags"], json!([{"name": "JavaScript", "versions": []}]));
        assert_eq!(items[0]["user"], json!({"name": "Test User", "id": "user1"}));
        assert!(items[0].get("body").is_none());
        assert!(items[1].get("likes_count").is_none());
    }

    #[tokio::test]
    async fn test_fetch_passes_filters_in_url() {
        let transport = MockTransport::with_json(&json!([]));
        let params = FetchParams::new()
            .with_page(2)
            .with_per_page(10)
            .with_created_from(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
            .with_created_to(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        fetcher(&transport).fetch_items(&params).await.unwrap();

        let url = transport.last_request().await.unwrap().url;
        assert!(url.contains("page=2"));
        assert!(url.contains("per_page=10"));
        assert!(url.contains("query=created%3A%3E%3D2023-01-01+created%3A%3C%3D2023-12-31"));
    }

    #[tokio::test]
    async fn test_http_error_carries_status() {
        let transport = MockTransport::with_status(404);
        let err = fetcher(&transport)
            .fetch_items(&FetchParams::new())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_invalid_typed_params_never_reach_transport() {
        let transport = MockTransport::with_json(&json!([]));
        let err = fetcher(&transport)
            .fetch_items(&FetchParams::new().with_per_page(0))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = MockTransport::failing("connection reset");
        let err = fetcher(&transport)
            .fetch_items(&FetchParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }

    #[tokio::test]
    async fn test_non_array_body_is_decode_error() {
        let transport = MockTransport::with_json(&json!({"message": "weird"}));
        let err = fetcher(&transport)
            .fetch_items(&FetchParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_non_object_elements_project_to_empty() {
        let transport = MockTransport::with_json(&json!([1, {"title": "ok"}]));
        let items = fetcher(&transport)
            .fetch_items(&FetchParams::new())
            .await
            .unwrap();
        assert_eq!(items, vec![json!({}), json!({"title": "ok"})]);
    }

    #[tokio::test]
    async fn test_fetch_raw_keeps_all_fields() {
        let transport = MockTransport::with_json(&sample_items());
        let raw = fetcher(&transport)
            .fetch_raw(&FetchParams::new())
            .await
            .unwrap();
        assert_eq!(raw[0]["body"], "Test content");
    }

    #[test]
    fn test_trailing_slash_base_url() {
        let transport = MockTransport::with_status(200);
        let fetcher = ItemFetcher::new(Arc::new(transport), "http://localhost:3000/api/v2/", "t");
        assert_eq!(fetcher.items_url(), "http://localhost:3000/api/v2/items");
    }

    proptest::proptest! {
        #[test]
        fn prop_non_success_status_surfaces_once(status in 300u16..600) {
            let transport = MockTransport::with_status(status);
            let err = tokio_test::block_on(fetcher(&transport).fetch_items(&FetchParams::new()))
                .unwrap_err();
            proptest::prop_assert_eq!(err.status(), Some(status));
            proptest::prop_assert_eq!(tokio_test::block_on(transport.requests()).len(), 1);
        }
    }
}

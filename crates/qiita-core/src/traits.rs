//! Core traits for qiita-mcp.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where the
//! upstream endpoint and credentials come from so the server wiring does not
//! depend on a concrete configuration format.

/// Default Qiita API v2 base URL.
pub const DEFAULT_BASE_URL: &str = "https://qiita.com/api/v2";

/// Trait for upstream API configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use qiita_core::traits::ConfigProvider;
///
/// #[derive(Clone)]
/// struct StaticConfig;
///
/// impl ConfigProvider for StaticConfig {
///     fn project_name(&self) -> &str {
///         "qiita-mcp"
///     }
///
///     fn base_url(&self) -> &str {
///         "https://qiita.com/api/v2"
///     }
///
///     fn access_token(&self) -> &str {
///         "secret"
///     }
/// }
///
/// assert_eq!(StaticConfig.items_url(), "https://qiita.com/api/v2/items");
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for the MCP server identity.
    fn project_name(&self) -> &str;

    /// Base URL of the upstream API, without a trailing slash.
    fn base_url(&self) -> &str;

    /// Bearer token sent with every upstream request.
    ///
    /// Never validated locally; an empty token simply fails upstream.
    fn access_token(&self) -> &str;

    /// URL of the items listing endpoint.
    fn items_url(&self) -> String {
        format!("{}/items", self.base_url().trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig {
        base: String,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test"
        }

        fn base_url(&self) -> &str {
            &self.base
        }

        fn access_token(&self) -> &str {
            ""
        }
    }

    #[test]
    fn test_items_url_trims_trailing_slash() {
        let config = TestConfig {
            base: "http://localhost:8080/api/v2/".to_string(),
        };
        assert_eq!(config.items_url(), "http://localhost:8080/api/v2/items");
    }

    #[test]
    fn test_items_url_default_base() {
        let config = TestConfig {
            base: DEFAULT_BASE_URL.to_string(),
        };
        assert_eq!(config.items_url(), "https://qiita.com/api/v2/items");
    }
}

//! Qiita item fetching.
//!
//! The pipeline behind the `get_items` tool:
//!
//! ```text
//! tool args ──normalize──▶ RawParams ──validate──▶ FetchParams
//!     ──build_items_url──▶ GET /items ──parse──▶ raw items ──project──▶ JSON
//! ```
//!
//! # Modules
//!
//! - [`params`]: lenient normalization and strict validation
//! - [`query`]: Qiita search-expression and query-string construction
//! - [`projection`]: default + additional field selection
//! - [`transport`]: HTTP transport trait and reqwest implementation
//! - [`fetcher`]: request/response handling around the transport
//! - [`mock`]: canned-response transport for tests

pub mod fetcher;
pub mod mock;
pub mod params;
pub mod projection;
pub mod query;
pub mod transport;

pub use fetcher::ItemFetcher;
pub use mock::MockTransport;
pub use params::{FetchParams, RawParams, normalize, validate};
pub use projection::{project, project_all};
pub use query::{build_items_url, build_query_string, search_expression};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

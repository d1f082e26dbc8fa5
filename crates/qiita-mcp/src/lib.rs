//! MCP server for Qiita item listings.
//!
//! # Key Abstractions
//!
//! - [`ToolRegistry`]: domain tools advertise and dispatch through this trait
//! - [`ItemTools`]: the `get_items` tool
//! - [`QiitaMcpServer`]: rmcp `ServerHandler` over any registry

pub mod error;
pub mod registry;
pub mod server;
pub mod tools;

/// Re-export of the MCP protocol model types.
pub use rmcp::model;

pub use error::McpErrorExt;
pub use registry::{ToolRegistry, ToolResult};
pub use server::QiitaMcpServer;
pub use tools::{GET_ITEMS_TOOL, ItemTools, get_items};

//! Tool registration seam between domain tools and the MCP server.
//!
//! Domain crates implement [`ToolRegistry`] to advertise tools and dispatch
//! calls; the server only ever talks to this trait.

use std::future::Future;
use std::pin::Pin;

use rmcp::model::{CallToolResult, ErrorData, Tool};
use serde_json::Value;

/// Boxed future returned by a tool invocation.
pub type ToolResult = Pin<Box<dyn Future<Output = Result<CallToolResult, ErrorData>> + Send>>;

/// A set of MCP tools.
pub trait ToolRegistry: Send + Sync {
    /// Tool definitions advertised to clients.
    fn tools(&self) -> Vec<Tool>;

    /// Starts a call to `name`, or returns `None` if this registry does not
    /// own that tool.
    fn call(&self, name: &str, args: Value) -> Option<ToolResult>;

    /// Number of tools provided.
    fn tool_count(&self) -> usize {
        self.tools().len()
    }

    /// Whether a tool with this name is provided.
    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|tool| tool.name == name)
    }
}

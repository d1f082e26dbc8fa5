//! Mapping of domain errors onto MCP tool results.
//!
//! Tool failures are reported in-band: a single text content
//! `"Error: <message>"` with the error flag set. Callers cannot tell error
//! kinds apart except by the message text.

use qiita_core::Error;
use rmcp::model::{CallToolResult, Content};

/// Extension trait converting domain errors for the tool boundary.
pub trait McpErrorExt {
    /// Flattens the error into an error-flagged tool result.
    fn to_tool_result(&self) -> CallToolResult;
}

impl McpErrorExt for Error {
    fn to_tool_result(&self) -> CallToolResult {
        CallToolResult::error(vec![Content::text(format!("Error: {self}"))])
    }
}

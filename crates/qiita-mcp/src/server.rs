//! MCP server wiring.
//!
//! `QiitaMcpServer<R>` adapts any [`ToolRegistry`] to rmcp's
//! [`ServerHandler`] and serves it over stdio.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ServerHandler, ServiceExt};
use serde_json::Value;

use crate::registry::ToolRegistry;

/// MCP server generic over its tool registry.
pub struct QiitaMcpServer<R: ToolRegistry> {
    registry: Arc<R>,
    name: String,
    version: String,
    instructions: Option<String>,
}

impl<R: ToolRegistry + 'static> QiitaMcpServer<R> {
    /// Create a server exposing the registry's tools.
    pub fn new(registry: R) -> Self {
        Self {
            registry: Arc::new(registry),
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }

    /// Override the advertised server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the advertised server version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set usage instructions sent to clients on initialization.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// The tool registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Dispatch a tool call by name.
    ///
    /// Missing arguments are treated as an empty object.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = Value::Object(arguments.unwrap_or_default());
        tracing::debug!(tool = name, "Dispatching tool call");
        match self.registry.call(name, args) {
            Some(future) => future.await,
            None => Err(ErrorData::invalid_params(
                format!("Unknown tool: {name}"),
                None,
            )),
        }
    }

    /// Serve over stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        tracing::info!(
            name = %self.name,
            version = %self.version,
            tools = self.registry.tool_count(),
            "Starting MCP server on stdio"
        );
        let service = self.serve(rmcp::transport::stdio()).await?;
        let reason = service.waiting().await?;
        tracing::info!(?reason, "MCP server stopped");
        Ok(())
    }
}

impl<R: ToolRegistry + 'static> ServerHandler for QiitaMcpServer<R> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = self.name.clone();
        info.server_info.version = self.version.clone();
        info.instructions = self.instructions.clone();
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.registry.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch(&request.name, request.arguments).await
    }
}

//! The `get_items` MCP tool.
//!
//! Provides `ItemTools`, a [`ToolRegistry`] that validates the caller's
//! arguments, fetches items through an [`ItemFetcher`] and returns the
//! projected list as pretty-printed JSON text.

use std::sync::Arc;

use qiita_items::{FetchParams, ItemFetcher};
use rmcp::model::{CallToolResult, Content, ErrorData, Tool};
use serde_json::{Map, Value};

use crate::error::McpErrorExt;
use crate::registry::{ToolRegistry, ToolResult};

/// Name of the item listing tool.
pub const GET_ITEMS_TOOL: &str = "get_items";

const GET_ITEMS_DESCRIPTION: &str = "Fetch Qiita items with optional pagination, date and tag \
     filters. By default returns: title, url, created_at, user.name. Use additional_fields to \
     include more fields.";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert a `serde_json::Value::Object` to an `Arc<serde_json::Map>`.
fn json_schema(value: Value) -> Arc<Map<String, Value>> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(Map::new()),
    }
}

/// Serialize a value to a successful `CallToolResult`.
fn serialize_response<T: serde::Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Input schema for `get_items`.
///
/// Numbers are also accepted as strings; loose callers are normalized
/// before validation.
fn get_items_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "page": {
                "type": ["integer", "string"],
                "minimum": 1,
                "maximum": 100,
                "description": "Page number (1-100)"
            },
            "per_page": {
                "type": ["integer", "string"],
                "minimum": 1,
                "maximum": 100,
                "description": "Items per page (1-100)"
            },
            "query": {
                "type": "string",
                "description": "Free-text Qiita search expression"
            },
            "created_from": {
                "type": "string",
                "format": "date",
                "description": "Only items created on or after this date (YYYY-MM-DD)"
            },
            "created_to": {
                "type": "string",
                "format": "date",
                "description": "Only items created on or before this date (YYYY-MM-DD)"
            },
            "tags": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Only items carrying these tags"
            },
            "additional_fields": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Additional fields to include in response (e.g., ['id', 'tags', 'user.id'])"
            }
        }
    })
}

/// Runs the full pipeline for one `get_items` call.
pub async fn get_items(
    fetcher: &ItemFetcher,
    args: &Map<String, Value>,
) -> qiita_core::Result<Vec<Value>> {
    let params = FetchParams::from_args(args)?;
    fetcher.fetch_items(&params).await
}

// ---------------------------------------------------------------------------
// ItemTools
// ---------------------------------------------------------------------------

/// MCP tools backed by an [`ItemFetcher`].
///
/// Generates one tool, `get_items`.
pub struct ItemTools {
    fetcher: Arc<ItemFetcher>,
}

impl ItemTools {
    /// Create item tools around a fetcher.
    pub fn new(fetcher: ItemFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    /// Create item tools with a shared fetcher reference.
    pub fn with_shared(fetcher: Arc<ItemFetcher>) -> Self {
        Self { fetcher }
    }
}

impl ToolRegistry for ItemTools {
    fn tools(&self) -> Vec<Tool> {
        vec![Tool::new(
            GET_ITEMS_TOOL,
            GET_ITEMS_DESCRIPTION,
            json_schema(get_items_schema()),
        )]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        if name != GET_ITEMS_TOOL {
            return None;
        }
        let fetcher = Arc::clone(&self.fetcher);

        Some(Box::pin(async move {
            let args = match args {
                Value::Object(map) => map,
                Value::Null => Map::new(),
                _ => {
                    return Err(ErrorData::invalid_params(
                        "get_items arguments must be an object",
                        None,
                    ));
                }
            };

            match get_items(&fetcher, &args).await {
                Ok(items) => serialize_response(&items),
                Err(e) => {
                    tracing::warn!(error = %e, "get_items failed");
                    Ok(e.to_tool_result())
                }
            }
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================

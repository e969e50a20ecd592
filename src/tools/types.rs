//! Core tool types.
//!
//! Defines the [`Tool`] trait every tool implements and [`ToolResult`] for
//! the text a tool hands back to the caller.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, ScoutError};

/// Result of a tool execution.
///
/// A tool that ran but whose work failed (every search backend down, limit
/// out of range) reports `success: false` with an error message. Malformed
/// arguments are an `Err` from [`Tool::execute`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    /// Whether the tool execution succeeded.
    pub success: bool,
    /// Output content; pretty-printed JSON for the search tools.
    pub content: String,
    /// Error message if the tool execution failed.
    pub error: Option<String>,
}

impl ToolResult {
    /// Create a successful tool result.
    pub fn success(content: String) -> Self {
        Self {
            success: true,
            content,
            error: None,
        }
    }

    /// Create a failed tool result with an error message.
    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: Some(error),
        }
    }
}

/// A tool callable over the host bridge.
///
/// All tools must be `Send + Sync`; the router holds them behind `Arc`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the name the tool is registered and called under.
    fn name(&self) -> &str;

    /// Returns a human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's arguments.
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Tool`] when the arguments do not match the schema.
    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult>;
}

/// Deserialize tool arguments, treating `null` as an empty object.
pub(crate) fn parse_args<T: DeserializeOwned>(args: serde_json::Value) -> Result<T> {
    let args = if args.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ScoutError::Tool(format!("invalid arguments: {e}")))
}

/// Render a tool's output document as pretty JSON.
pub(crate) fn to_pretty_json<T: Serialize>(output: &T) -> Result<String> {
    serde_json::to_string_pretty(output)
        .map_err(|e| ScoutError::Tool(format!("failed to serialize tool output: {e}")))
}

pub(crate) fn default_limit() -> usize {
    scout_search::DEFAULT_LIMIT
}

//! Generic multi-engine search tool.

use async_trait::async_trait;
use scout_search::orchestrator::search::orchestrate_search;
use scout_search::{EngineRegistry, SearchResult};
use serde::{Deserialize, Serialize};

use crate::config::SearchSettings;
use crate::error::Result;

use super::types::{Tool, ToolResult, default_limit, parse_args, to_pretty_json};

/// Tool that queries several search engines concurrently and concatenates
/// their results, unscored.
///
/// # Arguments (JSON)
///
/// - `query` (string, required)
/// - `limit` (integer, optional, `1..=50`, default 10)
/// - `engines` (array of strings, optional) filtered against the configured
///   allow-list; defaults to `[default_engine]`
pub struct WebSearchTool {
    name: String,
    engines: EngineRegistry,
    settings: SearchSettings,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    engines: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchOutput<'a> {
    query: &'a str,
    engines: &'a [String],
    total_results: usize,
    results: &'a [SearchResult],
}

impl WebSearchTool {
    pub fn new(name: impl Into<String>, engines: EngineRegistry, settings: SearchSettings) -> Self {
        Self {
            name: name.into(),
            engines,
            settings,
        }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Search the web using multiple search engines concurrently. Returns titles, URLs, snippets, and sources."
    }

    fn schema(&self) -> serde_json::Value {
        let mut engine_items = serde_json::json!({"type": "string"});
        if !self.settings.allowed_engines.is_empty() {
            engine_items["enum"] = serde_json::json!(self.settings.allowed_engines);
        }
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "minLength": 1,
                    "description": "The search query"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": scout_search::MAX_LIMIT,
                    "default": scout_search::DEFAULT_LIMIT
                },
                "engines": {
                    "type": "array",
                    "items": engine_items,
                    "minItems": 1,
                    "default": [self.settings.default_engine]
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let args: SearchArgs = parse_args(args)?;
        let query = args.query.trim();
        let engines = self.settings.resolve_engines(args.engines.as_deref());
        tracing::info!(engines = ?engines, limit = args.limit, "search requested");
        tracing::debug!(query, "search query");

        let results = match orchestrate_search(&self.engines, query, &engines, args.limit).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                return Ok(ToolResult::failure(format!("search failed: {e}")));
            }
        };

        let output = SearchOutput {
            query,
            engines: &engines,
            total_results: results.len(),
            results: &results,
        };
        Ok(ToolResult::success(to_pretty_json(&output)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture_registry;

    fn tool(settings: SearchSettings) -> WebSearchTool {
        WebSearchTool::new("search", fixture_registry(), settings)
    }

    fn parse(result: &ToolResult) -> serde_json::Value {
        serde_json::from_str(&result.content).expect("tool output is JSON")
    }

    #[test]
    fn schema_has_required_query() {
        let schema = tool(SearchSettings::default()).schema();
        let required = schema["required"].as_array().expect("required array");
        assert!(required.iter().any(|v| v.as_str() == Some("query")));
        assert_eq!(schema["properties"]["engines"]["default"], serde_json::json!(["bing"]));
    }

    #[test]
    fn schema_lists_allowed_engines() {
        let settings = SearchSettings {
            allowed_engines: vec!["bing".into(), "baidu".into()],
            ..Default::default()
        };
        let schema = tool(settings).schema();
        assert_eq!(
            schema["properties"]["engines"]["items"]["enum"],
            serde_json::json!(["bing", "baidu"])
        );
    }

    #[tokio::test]
    async fn default_engine_is_used_when_none_requested() {
        let result = tool(SearchSettings::default())
            .execute(serde_json::json!({"query": "  工信部  "}))
            .await
            .expect("execute");
        assert!(result.success);
        let output = parse(&result);
        assert_eq!(output["query"], "工信部");
        assert_eq!(output["engines"], serde_json::json!(["bing"]));
        assert_eq!(output["totalResults"], 2);
        assert_eq!(output["results"][0]["engine"], "bing");
    }

    #[tokio::test]
    async fn limit_is_split_across_engines() {
        let result = tool(SearchSettings::default())
            .execute(serde_json::json!({"query": "q", "limit": 3, "engines": ["baidu", "bing"]}))
            .await
            .expect("execute");
        let output = parse(&result);
        assert_eq!(output["totalResults"], 3);
        let engines: Vec<&str> = output["results"]
            .as_array()
            .expect("results")
            .iter()
            .filter_map(|r| r["engine"].as_str())
            .collect();
        assert_eq!(engines, vec!["baidu", "baidu", "bing"]);
    }

    #[tokio::test]
    async fn disallowed_engines_fall_back_to_default() {
        let settings = SearchSettings {
            allowed_engines: vec!["bing".into()],
            ..Default::default()
        };
        let result = tool(settings)
            .execute(serde_json::json!({"query": "q", "engines": ["baidu"]}))
            .await
            .expect("execute");
        assert_eq!(parse(&result)["engines"], serde_json::json!(["bing"]));
    }

    #[tokio::test]
    async fn failing_engine_is_absorbed() {
        let result = tool(SearchSettings::default())
            .execute(serde_json::json!({"query": "q", "engines": ["brave", "bing"]}))
            .await
            .expect("execute");
        assert!(result.success);
        let output = parse(&result);
        assert_eq!(output["totalResults"], 2);
        assert_eq!(output["engines"], serde_json::json!(["brave", "bing"]));
    }

    #[tokio::test]
    async fn blank_query_is_a_failed_result() {
        let result = tool(SearchSettings::default())
            .execute(serde_json::json!({"query": "   "}))
            .await
            .expect("execute");
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap_or_default().starts_with("search failed"));
    }

    #[tokio::test]
    async fn out_of_range_limit_is_a_failed_result() {
        let result = tool(SearchSettings::default())
            .execute(serde_json::json!({"query": "q", "limit": 51}))
            .await
            .expect("execute");
        assert!(!result.success);
    }

    #[tokio::test]
    async fn missing_query_is_an_error() {
        let err = tool(SearchSettings::default())
            .execute(serde_json::json!({"limit": 5}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("query"));
    }
}

//! Policy document search tool.

use async_trait::async_trait;
use scout_search::orchestrator::search::orchestrate_policy_search;
use scout_search::{EngineRegistry, PolicySearchOptions, ScoredResult};
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::types::{Tool, ToolResult, default_limit, parse_args, to_pretty_json};

/// Engines the policy tool accepts.
const POLICY_ENGINES: &[&str] = &["baidu", "bing"];

/// Tool that searches for government policy documents and ranks them by
/// policy relevance.
pub struct PolicySearchTool {
    name: String,
    engines: EngineRegistry,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyArgs {
    keyword: String,
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    engines: Option<Vec<String>>,
    #[serde(default)]
    min_score: Option<u8>,
    #[serde(default)]
    government_only: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Filters {
    min_score: u8,
    government_only: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PolicyOutput<'a> {
    query: &'a str,
    region: &'a str,
    engines: &'a [String],
    filters: Filters,
    total_results: usize,
    results: &'a [ScoredResult],
}

impl PolicySearchTool {
    pub fn new(name: impl Into<String>, engines: EngineRegistry) -> Self {
        Self {
            name: name.into(),
            engines,
        }
    }
}

#[async_trait]
impl Tool for PolicySearchTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Search for government policy documents using multiple search engines with intelligent filtering"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "keyword": {"type": "string", "minLength": 1},
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": scout_search::MAX_LIMIT,
                    "default": scout_search::DEFAULT_LIMIT
                },
                "region": {
                    "type": "string",
                    "description": "Region filter, e.g., '江西省', '北京市'"
                },
                "engines": {
                    "type": "array",
                    "items": {"type": "string", "enum": POLICY_ENGINES},
                    "default": POLICY_ENGINES
                },
                "minScore": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": 100,
                    "default": scout_search::DEFAULT_MIN_SCORE,
                    "description": "Minimum policy relevance score (0-100)"
                },
                "governmentOnly": {
                    "type": "boolean",
                    "default": false,
                    "description": "Only return results from government websites"
                }
            },
            "required": ["keyword"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let args: PolicyArgs = parse_args(args)?;
        let defaults = PolicySearchOptions::default();
        let options = PolicySearchOptions {
            region: args.region,
            engines: args.engines.unwrap_or(defaults.engines),
            min_score: args.min_score.unwrap_or(defaults.min_score),
            government_only: args.government_only.unwrap_or(defaults.government_only),
        };
        let keyword = args.keyword.trim();
        tracing::info!(
            region = options.region.as_deref().unwrap_or("all"),
            engines = ?options.engines,
            "policy search requested"
        );

        let results =
            match orchestrate_policy_search(&self.engines, keyword, args.limit, &options).await {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!(error = %e, "policy search failed");
                    return Ok(ToolResult::failure(format!("policy search failed: {e}")));
                }
            };

        let output = PolicyOutput {
            query: keyword,
            region: options
                .region
                .as_deref()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or("all"),
            engines: &options.engines,
            filters: Filters {
                min_score: options.min_score,
                government_only: options.government_only,
            },
            total_results: results.len(),
            results: &results,
        };
        Ok(ToolResult::success(to_pretty_json(&output)?))
    }
}

//! Site- and file-type-restricted policy search tool.

use async_trait::async_trait;
use scout_search::orchestrator::search::orchestrate_advanced_search;
use scout_search::{AdvancedSearchOptions, DateRange, EngineRegistry, SearchResult};
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::types::{Tool, ToolResult, default_limit, parse_args, to_pretty_json};

/// Tool that runs a `site:`/`filetype:` restricted search on Bing.
/// Results are not scored.
pub struct PolicyAdvancedTool {
    name: String,
    engines: EngineRegistry,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdvancedArgs {
    keyword: String,
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    site: Option<String>,
    #[serde(default)]
    file_type: Option<String>,
    #[serde(default)]
    date_range: Option<DateRange>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Filters<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    site: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_type: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdvancedOutput<'a> {
    query: &'a str,
    filters: Filters<'a>,
    total_results: usize,
    results: &'a [SearchResult],
}

impl PolicyAdvancedTool {
    pub fn new(name: impl Into<String>, engines: EngineRegistry) -> Self {
        Self {
            name: name.into(),
            engines,
        }
    }
}

#[async_trait]
impl Tool for PolicyAdvancedTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Advanced search for policy documents with site and file type filters"
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
                "site": {
                    "type": "string",
                    "description": "Specific website domain, e.g., 'www.gov.cn', 'miit.gov.cn', 'jiangxi.gov.cn'"
                },
                "fileType": {
                    "type": "string",
                    "description": "File type filter, e.g., 'pdf', 'doc', 'docx'"
                },
                "dateRange": {
                    "type": "object",
                    "properties": {
                        "start": {"type": "string"},
                        "end": {"type": "string"}
                    }
                }
            },
            "required": ["keyword"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let args: AdvancedArgs = parse_args(args)?;
        let keyword = args.keyword.trim();
        let options = AdvancedSearchOptions {
            site: args.site,
            file_type: args.file_type,
            date_range: args.date_range,
        };
        tracing::info!(
            site = options.site.as_deref(),
            file_type = options.file_type.as_deref(),
            "advanced policy search requested"
        );

        let results =
            match orchestrate_advanced_search(&self.engines, keyword, args.limit, &options).await {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!(error = %e, "advanced policy search failed");
                    return Ok(ToolResult::failure(format!(
                        "advanced policy search failed: {e}"
                    )));
                }
            };

        let output = AdvancedOutput {
            query: keyword,
            filters: Filters {
                site: options.site.as_deref(),
                file_type: options.file_type.as_deref(),
            },
            total_results: results.len(),
            results: &results,
        };
        Ok(ToolResult::success(to_pretty_json(&output)?))
    }
}

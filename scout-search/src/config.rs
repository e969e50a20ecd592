//! Search configuration and per-request options with sensible defaults.
//!
//! [`SearchConfig`] controls how the built-in engine adapters talk to their
//! upstreams. [`PolicySearchOptions`] and [`AdvancedSearchOptions`] carry the
//! optional qualifiers of a single policy search request.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Largest result count a single request may ask for.
pub const MAX_LIMIT: usize = 50;

/// Default number of results per request.
pub const DEFAULT_LIMIT: usize = 10;

/// Default minimum policy relevance score.
pub const DEFAULT_MIN_SCORE: u8 = 30;

/// Adapter-level settings shared by every built-in engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Upper bound on result pages an adapter fetches for one call, in case
    /// an upstream never returns an empty page.
    pub max_pages: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: None,
            max_pages: 10,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_pages == 0 {
            return Err(SearchError::Config(
                "max_pages must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Check that a requested result count is within `1..=MAX_LIMIT`.
pub fn validate_limit(limit: usize) -> Result<(), SearchError> {
    if limit == 0 || limit > MAX_LIMIT {
        return Err(SearchError::Config(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {limit}"
        )));
    }
    Ok(())
}

/// Qualifiers for a scored policy search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicySearchOptions {
    /// Region prepended to the query, e.g. `"江西省"`.
    pub region: Option<String>,
    /// Engines to fan out to, in priority order. Earlier engines win URL ties.
    pub engines: Vec<String>,
    /// Results scoring below this are dropped. Must be `<= 100`.
    pub min_score: u8,
    /// Keep only results classified as government sources.
    pub government_only: bool,
}

impl Default for PolicySearchOptions {
    fn default() -> Self {
        Self {
            region: None,
            engines: vec!["baidu".into(), "bing".into()],
            min_score: DEFAULT_MIN_SCORE,
            government_only: false,
        }
    }
}

impl PolicySearchOptions {
    /// Validates these options.
    ///
    /// Unknown engine identifiers are not rejected here; the aggregator
    /// treats them as empty contributions.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.engines.is_empty() {
            return Err(SearchError::Config(
                "at least one engine must be requested".into(),
            ));
        }
        if self.min_score > 100 {
            return Err(SearchError::Config(format!(
                "min_score must be between 0 and 100, got {}",
                self.min_score
            )));
        }
        Ok(())
    }
}

/// Inclusive date bounds for the advanced search path.
///
/// Accepted for interface compatibility; results are not filtered by it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Lower bound, `YYYY-MM-DD`.
    pub start: Option<String>,
    /// Upper bound, `YYYY-MM-DD`.
    pub end: Option<String>,
}

/// Qualifiers for the site-restricted advanced search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdvancedSearchOptions {
    /// Domain for a `site:` restriction, e.g. `"miit.gov.cn"`.
    pub site: Option<String>,
    /// Extension for a `filetype:` restriction, e.g. `"pdf"`.
    pub file_type: Option<String>,
    pub date_range: Option<DateRange>,
}

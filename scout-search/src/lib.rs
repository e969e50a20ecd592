//! # scout-search
//!
//! Multi-engine web search with a policy-relevance ranking pipeline.
//!
//! This crate scrapes public search engines directly (no API keys) and
//! offers three entry points:
//!
//! - [`search`]: query several engines concurrently and concatenate results
//! - [`search_policy`]: find government policy documents, scored and ranked
//! - [`search_policy_advanced`]: `site:`/`filetype:` restricted search on Bing
//!
//! ## Design
//!
//! - Baidu, Bing, DuckDuckGo, and Brave adapters behind [`SearchEngineTrait`]
//! - Engines are looked up by identifier in an [`EngineRegistry`], so callers
//!   and tests can register their own
//! - Graceful degradation: a failing engine contributes nothing and the others
//!   still return results
//! - Scoring and ranking are pure functions over result lists
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners; this is a library
//! - Search queries are logged only at trace/debug level

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod types;

pub use config::{
    AdvancedSearchOptions, DateRange, PolicySearchOptions, SearchConfig, DEFAULT_LIMIT,
    DEFAULT_MIN_SCORE, MAX_LIMIT,
};
pub use engine::{EngineRegistry, SearchEngineTrait};
pub use error::{Result, SearchError};
pub use types::{ScoredResult, SearchEngine, SearchResult};

/// Search `engines` concurrently and return up to `limit` results.
///
/// The limit is split evenly across engines, remainder to the first ones.
/// Results are concatenated in engine order; there is no scoring or dedup.
///
/// # Errors
///
/// Returns [`SearchError::EmptyQuery`] for a blank query and
/// [`SearchError::Config`] for an invalid config, limit, or empty engine list.
/// Individual engine failures are logged, not returned.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> scout_search::Result<()> {
/// let config = scout_search::SearchConfig::default();
/// let engines = vec!["bing".to_string(), "duckduckgo".to_string()];
/// let results = scout_search::search("rust programming", &engines, 10, &config).await?;
/// for result in &results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    query: &str,
    engines: &[String],
    limit: usize,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>> {
    config.validate()?;
    let registry = EngineRegistry::with_default_engines(config);
    orchestrator::search::orchestrate_search(&registry, query, engines, limit).await
}

/// Find policy documents for `keyword`, scored and ranked by relevance.
///
/// # Errors
///
/// Same as [`search`], plus [`SearchError::Config`] for invalid `options`.
/// An empty list is a valid result, including when every engine failed.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> scout_search::Result<()> {
/// let options = scout_search::PolicySearchOptions {
///     region: Some("江西省".into()),
///     ..Default::default()
/// };
/// let config = scout_search::SearchConfig::default();
/// let results = scout_search::search_policy("产业链", 10, &options, &config).await?;
/// for scored in &results {
///     println!("{} {}", scored.policy_score, scored.result.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_policy(
    keyword: &str,
    limit: usize,
    options: &PolicySearchOptions,
    config: &SearchConfig,
) -> Result<Vec<ScoredResult>> {
    config.validate()?;
    let registry = EngineRegistry::with_default_engines(config);
    orchestrator::search::orchestrate_policy_search(&registry, keyword, limit, options).await
}

/// Site- or file-type-restricted search for `keyword` on Bing.
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_policy_advanced(
    keyword: &str,
    limit: usize,
    options: &AdvancedSearchOptions,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>> {
    config.validate()?;
    let registry = EngineRegistry::with_default_engines(config);
    orchestrator::search::orchestrate_advanced_search(&registry, keyword, limit, options).await
}

/// Policy search with default options and configuration.
///
/// Convenience wrapper around [`search_policy`].
///
/// # Errors
///
/// Same as [`search_policy`].
pub async fn search_policy_default(keyword: &str) -> Result<Vec<ScoredResult>> {
    search_policy(
        keyword,
        DEFAULT_LIMIT,
        &PolicySearchOptions::default(),
        &SearchConfig::default(),
    )
    .await
}

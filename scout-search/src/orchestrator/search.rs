//! Search pipelines.
//!
//! - [`orchestrate_search`]: plain multi-engine search, limit split across
//!   engines, no scoring.
//! - [`orchestrate_policy_search`]: policy query, over-fetch, score, filter,
//!   dedup, rank, annotate.
//! - [`orchestrate_advanced_search`]: `site:`/`filetype:` query against Bing.

use crate::config::{validate_limit, AdvancedSearchOptions, PolicySearchOptions};
use crate::engine::EngineRegistry;
use crate::error::SearchError;
use crate::types::{ScoredResult, SearchEngine, SearchResult};

use super::aggregate::{
    absorb_failure, distribute_limit, fan_out, flatten, overfetch_limit, EngineRequest,
};
use super::query::{build_advanced_query, build_query};
use super::rank::{annotate, rank_and_filter};
use super::scoring::score_results;

/// Engine used by the advanced path; it honours `site:` and `filetype:`.
pub const ADVANCED_ENGINE: SearchEngine = SearchEngine::Bing;

fn clean_query(query: &str) -> Result<&str, SearchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(trimmed)
}

/// Run a plain search across `engines`.
///
/// The limit is split with [`distribute_limit`], engines are queried
/// concurrently, and the concatenated results are truncated to `limit`.
///
/// # Errors
///
/// - [`SearchError::EmptyQuery`] if `query` is blank
/// - [`SearchError::Config`] if `limit` is out of range or `engines` is empty
/// - [`SearchError::AggregateFailure`] if the fan-out breaks down
pub async fn orchestrate_search(
    registry: &EngineRegistry,
    query: &str,
    engines: &[String],
    limit: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let query = clean_query(query)?;
    validate_limit(limit)?;
    if engines.is_empty() {
        return Err(SearchError::Config(
            "at least one engine must be requested".into(),
        ));
    }

    let requests: Vec<EngineRequest> = engines
        .iter()
        .zip(distribute_limit(limit, engines.len()))
        .map(|(engine, share)| EngineRequest::new(engine.clone(), share))
        .collect();

    tracing::debug!(?engines, limit, "starting search");

    let mut results = flatten(fan_out(registry, query, &requests).await?);
    results.truncate(limit);

    tracing::info!(count = results.len(), "search complete");
    Ok(results)
}

/// Run a scored policy search for `keyword`.
///
/// # Pipeline
///
/// 1. Build the query with [`build_query`]
/// 2. Ask each engine for [`overfetch_limit`] results, concurrently
/// 3. Score every result
/// 4. Filter by `min_score` and `government_only`, dedup by URL, sort, truncate
/// 5. Annotate descriptions and engine labels
///
/// # Errors
///
/// - [`SearchError::EmptyQuery`] if `keyword` is blank
/// - [`SearchError::Config`] if `limit` or `options` are invalid
/// - [`SearchError::AggregateFailure`] if the fan-out breaks down
///
/// Engine failures are never errors; an empty list is a valid answer.
pub async fn orchestrate_policy_search(
    registry: &EngineRegistry,
    keyword: &str,
    limit: usize,
    options: &PolicySearchOptions,
) -> Result<Vec<ScoredResult>, SearchError> {
    let keyword = clean_query(keyword)?;
    validate_limit(limit)?;
    options.validate()?;

    let query = build_query(keyword, options.region.as_deref());
    let per_engine = overfetch_limit(limit, options.engines.len());
    let requests: Vec<EngineRequest> = options
        .engines
        .iter()
        .map(|engine| EngineRequest::new(engine.clone(), per_engine))
        .collect();

    tracing::debug!(
        query = %query,
        engines = ?options.engines,
        per_engine,
        "starting policy search"
    );

    let contributions = fan_out(registry, &query, &requests).await?;
    for contribution in &contributions {
        tracing::debug!(
            engine = %contribution.engine,
            count = contribution.results.len(),
            "engine contribution"
        );
    }

    let scored = score_results(flatten(contributions));
    let candidates = scored.len();
    let ranked = rank_and_filter(scored, options.min_score, options.government_only, limit);

    tracing::info!(
        candidates,
        returned = ranked.len(),
        min_score = options.min_score,
        government_only = options.government_only,
        "policy search complete"
    );

    Ok(annotate(ranked))
}

/// Run a site- or file-type-restricted search for `keyword`.
///
/// Queries [`ADVANCED_ENGINE`] for twice `limit` results and truncates.
/// No scoring, dedup, or date filtering is applied; a supplied date range
/// is accepted and ignored.
///
/// # Errors
///
/// - [`SearchError::EmptyQuery`] if `keyword` is blank
/// - [`SearchError::Config`] if `limit` is out of range
pub async fn orchestrate_advanced_search(
    registry: &EngineRegistry,
    keyword: &str,
    limit: usize,
    options: &AdvancedSearchOptions,
) -> Result<Vec<SearchResult>, SearchError> {
    let keyword = clean_query(keyword)?;
    validate_limit(limit)?;

    let query = build_advanced_query(
        keyword,
        options.site.as_deref(),
        options.file_type.as_deref(),
    );

    if let Some(range) = &options.date_range {
        tracing::debug!(
            start = ?range.start,
            end = ?range.end,
            "date range supplied but not applied"
        );
    }

    let engine_id = ADVANCED_ENGINE.name();
    let Some(engine) = registry.get(engine_id) else {
        let error = SearchError::UnsupportedEngine(engine_id.to_string());
        tracing::warn!(error = %error, "advanced search engine not registered");
        return Ok(Vec::new());
    };

    tracing::debug!(query = %query, engine = engine_id, "starting advanced search");

    let mut results = absorb_failure(engine_id, engine.search(&query, limit * 2)).await;
    results.truncate(limit);

    tracing::info!(count = results.len(), "advanced search complete");
    Ok(results)
}

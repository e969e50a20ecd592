//! Concurrent multi-engine fan-out.
//!
//! Every requested engine is queried in its own task. A failing engine
//! (error or panic) contributes an empty list and a warning; it never
//! aborts the other engines or the aggregate. Unknown engine identifiers
//! are treated the same way. Contributions are concatenated in the order
//! the engines were requested, not in completion order. Dropping the
//! aggregate future aborts any engine task still running.

use std::future::Future;

use tokio::task::JoinHandle;

use crate::engine::EngineRegistry;
use crate::error::SearchError;
use crate::types::SearchResult;

/// One engine's share of an aggregate query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRequest {
    /// Engine identifier as looked up in the [`EngineRegistry`].
    pub engine: String,
    /// Maximum results to ask that engine for.
    pub limit: usize,
}

impl EngineRequest {
    pub fn new(engine: impl Into<String>, limit: usize) -> Self {
        Self {
            engine: engine.into(),
            limit,
        }
    }
}

/// Results returned by a single engine, tagged with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineContribution {
    pub engine: String,
    pub results: Vec<SearchResult>,
}

/// Split `total` across `engine_count` engines.
///
/// Every engine gets `total / engine_count`; the remainder goes one each to
/// the first engines, so `distribute_limit(10, 3)` is `[4, 3, 3]`.
pub fn distribute_limit(total: usize, engine_count: usize) -> Vec<usize> {
    if engine_count == 0 {
        return Vec::new();
    }
    let base = total / engine_count;
    let remainder = total % engine_count;
    (0..engine_count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Per-engine limit for policy searches: twice the final limit, split
/// evenly and rounded up, so filtering and dedup still leave enough.
pub fn overfetch_limit(limit: usize, engine_count: usize) -> usize {
    if engine_count == 0 {
        return 0;
    }
    (limit * 2).div_ceil(engine_count)
}

/// Await an engine call, converting a failure into an empty contribution.
pub async fn absorb_failure<F>(engine: &str, search: F) -> Vec<SearchResult>
where
    F: Future<Output = Result<Vec<SearchResult>, SearchError>>,
{
    match search.await {
        Ok(results) => {
            tracing::debug!(engine, count = results.len(), "engine returned results");
            results
        }
        Err(e) => {
            tracing::warn!(engine, error = %e, "engine query failed, skipping");
            Vec::new()
        }
    }
}

/// Aborts the wrapped engine task when dropped.
struct AbortOnDrop(JoinHandle<Vec<SearchResult>>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

enum Dispatch {
    Running(AbortOnDrop),
    Unsupported,
}

/// Query every requested engine concurrently and collect per-engine results.
///
/// Returns one [`EngineContribution`] per request, in request order.
///
/// # Errors
///
/// Returns [`SearchError::AggregateFailure`] only if an engine task is
/// cancelled by the runtime before completing. Engine errors and panics are
/// absorbed.
pub async fn fan_out(
    registry: &EngineRegistry,
    query: &str,
    requests: &[EngineRequest],
) -> Result<Vec<EngineContribution>, SearchError> {
    let dispatched: Vec<(String, Dispatch)> = requests
        .iter()
        .map(|request| {
            let dispatch = match registry.get(&request.engine) {
                Some(engine) => {
                    let id = request.engine.clone();
                    let query = query.to_string();
                    let limit = request.limit;
                    Dispatch::Running(AbortOnDrop(tokio::spawn(async move {
                        absorb_failure(&id, engine.search(&query, limit)).await
                    })))
                }
                None => {
                    let error = SearchError::UnsupportedEngine(request.engine.clone());
                    tracing::warn!(engine = %request.engine, error = %error, "skipping engine");
                    Dispatch::Unsupported
                }
            };
            (request.engine.clone(), dispatch)
        })
        .collect();

    let joined = futures::future::join_all(dispatched.into_iter().map(
        |(engine, dispatch)| async move {
            let outcome = match dispatch {
                Dispatch::Running(mut task) => (&mut task.0).await,
                Dispatch::Unsupported => Ok(Vec::new()),
            };
            (engine, outcome)
        },
    ))
    .await;

    let mut contributions = Vec::with_capacity(joined.len());
    for (engine, outcome) in joined {
        let results = match outcome {
            Ok(results) => results,
            Err(e) if e.is_panic() => {
                tracing::warn!(engine = %engine, "engine task panicked, skipping");
                Vec::new()
            }
            Err(e) => {
                return Err(SearchError::AggregateFailure(format!(
                    "task for engine {engine} did not complete: {e}"
                )));
            }
        };
        contributions.push(EngineContribution { engine, results });
    }

    Ok(contributions)
}

/// Query `engines` concurrently with the same per-engine limit and
/// concatenate the results in engine order.
///
/// # Errors
///
/// See [`fan_out`].
pub async fn aggregate(
    registry: &EngineRegistry,
    query: &str,
    engines: &[String],
    per_engine_limit: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let requests: Vec<EngineRequest> = engines
        .iter()
        .map(|engine| EngineRequest::new(engine.clone(), per_engine_limit))
        .collect();
    let contributions = fan_out(registry, query, &requests).await?;
    Ok(flatten(contributions))
}

/// Concatenate contributions in order.
pub fn flatten(contributions: Vec<EngineContribution>) -> Vec<SearchResult> {
    contributions
        .into_iter()
        .flat_map(|contribution| contribution.results)
        .collect()
}

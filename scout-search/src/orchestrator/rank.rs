//! Filtering, ranking and annotation of scored policy results.

use super::dedup::dedup_first_by_url;
use super::scoring::is_government_source;
use crate::types::ScoredResult;

/// Suffix appended to the engine label of policy results.
pub const POLICY_ENGINE_SUFFIX: &str = "-policy";

/// Filter, dedup, sort and truncate scored results.
///
/// 1. drop results scoring below `min_score`
/// 2. when `government_only`, drop results not from a government source
/// 3. keep the first occurrence of each URL
/// 4. stable sort by score, highest first
/// 5. keep at most `limit`
///
/// Applying this twice with the same arguments yields the same list.
pub fn rank_and_filter(
    scored: Vec<ScoredResult>,
    min_score: u8,
    government_only: bool,
    limit: usize,
) -> Vec<ScoredResult> {
    let filtered: Vec<ScoredResult> = scored
        .into_iter()
        .filter(|s| s.policy_score >= min_score)
        .filter(|s| !government_only || is_government_source(&s.result))
        .collect();

    let mut ranked = dedup_first_by_url(filtered, ScoredResult::url);
    // `sort_by` is stable: equal scores keep aggregation order.
    ranked.sort_by(|a, b| b.policy_score.cmp(&a.policy_score));
    ranked.truncate(limit);
    ranked
}

/// Label ranked results for display: the description gets a relevance
/// prefix and the engine gets [`POLICY_ENGINE_SUFFIX`].
pub fn annotate(ranked: Vec<ScoredResult>) -> Vec<ScoredResult> {
    ranked
        .into_iter()
        .map(|mut s| {
            s.result.description = format!(
                "[政策相关度: {}分] {}",
                s.policy_score, s.result.description
            );
            s.result.engine.push_str(POLICY_ENGINE_SUFFIX);
            s
        })
        .collect()
}

//! Policy relevance scoring.
//!
//! Assigns each result an integer score in `0..=100` estimating how likely
//! it is an authentic government policy document. Additive rules:
//!
//! | rule                                                    | points        |
//! |---------------------------------------------------------|---------------|
//! | government source (hostname, description, or source)   | +50           |
//! | each distinct policy keyword in the title               | +10, max +30  |
//! | any policy keyword in the description                   | +10           |
//! | government institution marker in the source label       | +10           |
//!
//! The sum is clamped to 100. Scoring is pure and never touches the network.

use url::Url;

use crate::types::{ScoredResult, SearchResult};

/// Domains of official government web properties. Matched as literal
/// substrings of the (lowercased) hostname and of the description text.
pub const GOVERNMENT_DOMAINS: &[&str] = &[
    "gov.cn",
    "jiangxi.gov.cn",
    "www.gov.cn",
    "miit.gov.cn",
    "ndrc.gov.cn",
    "mof.gov.cn",
    "most.gov.cn",
    "mct.gov.cn",
];

/// Terms that mark a policy document: policy, notice, announcement, measure,
/// regulation, opinion, scheme, plan, ordinance, guidance, action, document.
pub const POLICY_KEYWORDS: &[&str] = &[
    "政策", "通知", "公告", "办法", "规定", "意见", "方案", "计划", "条例", "指导", "措施", "文件",
];

/// Source-label markers that classify a result as a government source.
const GOVERNMENT_SOURCE_MARKERS: &[&str] = &["政府", "gov", "人民政府"];

/// Source-label markers worth the institution bonus. Superset of
/// [`GOVERNMENT_SOURCE_MARKERS`] with ministry abbreviations.
const INSTITUTION_SOURCE_MARKERS: &[&str] = &["政府", "gov", "人民政府", "发改委", "工信部", "科技部"];

const GOVERNMENT_POINTS: u32 = 50;
const TITLE_KEYWORD_POINTS: u32 = 10;
const TITLE_KEYWORD_CAP: u32 = 30;
const DESCRIPTION_KEYWORD_POINTS: u32 = 10;
const INSTITUTION_POINTS: u32 = 10;
const MAX_SCORE: u32 = 100;

/// Whether `text` contains at least one policy keyword.
pub fn contains_policy_keyword(text: &str) -> bool {
    POLICY_KEYWORDS.iter().any(|kw| text.contains(kw))
}

/// Number of distinct policy keywords that occur in `text`.
pub fn count_policy_keywords(text: &str) -> usize {
    POLICY_KEYWORDS.iter().filter(|kw| text.contains(*kw)).count()
}

/// Classify a result as coming from a government source.
///
/// True when the URL hostname contains a whitelisted domain, the description
/// mentions one (Baidu hides destinations behind redirect links), or the
/// source label carries a government marker. A URL without a parsable host
/// is never a government source, whatever its description or source say.
pub fn is_government_source(result: &SearchResult) -> bool {
    let Some(host) = Url::parse(&result.url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
    else {
        return false;
    };

    GOVERNMENT_DOMAINS.iter().any(|d| host.contains(d))
        || GOVERNMENT_DOMAINS
            .iter()
            .any(|d| result.description.contains(d))
        || GOVERNMENT_SOURCE_MARKERS
            .iter()
            .any(|m| result.source.contains(m))
}

/// Compute the policy relevance score of a single result.
pub fn policy_score(result: &SearchResult) -> u8 {
    let mut score = 0;

    if is_government_source(result) {
        score += GOVERNMENT_POINTS;
    }

    let title_hits = count_policy_keywords(&result.title) as u32;
    score += (title_hits * TITLE_KEYWORD_POINTS).min(TITLE_KEYWORD_CAP);

    if contains_policy_keyword(&result.description) {
        score += DESCRIPTION_KEYWORD_POINTS;
    }

    if INSTITUTION_SOURCE_MARKERS
        .iter()
        .any(|m| result.source.contains(m))
    {
        score += INSTITUTION_POINTS;
    }

    // Bounded by MAX_SCORE, so the narrowing cannot truncate.
    score.min(MAX_SCORE) as u8
}

/// Attach a policy score to every result, preserving order.
pub fn score_results(results: Vec<SearchResult>) -> Vec<ScoredResult> {
    results
        .into_iter()
        .map(|result| {
            let policy_score = policy_score(&result);
            ScoredResult {
                result,
                policy_score,
            }
        })
        .collect()
}

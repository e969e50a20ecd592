//! Search engine implementations.
//!
//! Each module provides a struct implementing [`crate::engine::SearchEngineTrait`]
//! that scrapes a specific search engine's HTML results pages. The helpers in
//! this module hold what every scraper shares: pagination, selector parsing,
//! and publish-date extraction.

pub mod baidu;
pub mod bing;
pub mod brave;
pub mod duckduckgo;

pub use baidu::BaiduEngine;
pub use bing::BingEngine;
pub use brave::BraveEngine;
pub use duckduckgo::DuckDuckGoEngine;

use std::future::Future;
use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::error::SearchError;
use crate::types::SearchResult;

/// Fetch result pages until `limit` results are collected, a page comes back
/// empty, or `max_pages` pages have been requested.
///
/// `fetch_page` receives the zero-based page index; each engine maps it to
/// its own offset parameter. The output is truncated to `limit`.
pub(crate) async fn collect_pages<F, Fut>(
    engine: &str,
    limit: usize,
    max_pages: usize,
    mut fetch_page: F,
) -> Result<Vec<SearchResult>, SearchError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<SearchResult>, SearchError>>,
{
    let mut all_results = Vec::new();

    for page in 0..max_pages {
        if all_results.len() >= limit {
            break;
        }
        let results = fetch_page(page).await?;
        if results.is_empty() {
            tracing::debug!(engine, page, "no more results, ending early");
            break;
        }
        all_results.extend(results);
    }

    all_results.truncate(limit);
    Ok(all_results)
}

/// Parse a CSS selector, mapping failures to [`SearchError::Parse`].
pub(crate) fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid selector {css:?}: {e:?}")))
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match of `sel` inside `element`, or empty.
pub(crate) fn first_text(element: ElementRef<'_>, sel: &Selector) -> String {
    element
        .select(sel)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Trimmed text of every match of `sel` inside `element`, concatenated.
pub(crate) fn all_text(element: ElementRef<'_>, sel: &Selector) -> String {
    element
        .select(sel)
        .map(|el| el.text().collect::<String>())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Whether `url` is an absolute link an adapter may emit.
pub(crate) fn is_absolute_http(url: &str) -> bool {
    url.starts_with("http")
}

/// Date layouts seen in result captions, in match priority order:
/// `2024年3月8日`, `2024-03-08`, `3/8/2024`, `2024.03.08`.
fn date_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"\d{4}年\d{1,2}月\d{1,2}日",
            r"\d{4}-\d{1,2}-\d{1,2}",
            r"\d{1,2}/\d{1,2}/\d{4}",
            r"\d{4}\.\d{1,2}\.\d{1,2}",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// First date found in `text`, trying each layout in priority order.
pub(crate) fn find_date(text: &str) -> Option<String> {
    date_patterns()
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}

/// Cleaned label text if it carries a Chinese or ISO date.
///
/// Baidu renders dates as standalone labels such as `2024年3月8日 -`; the
/// whole label is kept, minus non-breaking spaces and the trailing dash.
pub(crate) fn date_label(text: &str) -> Option<String> {
    let text = text.trim();
    let has_date = date_patterns().iter().take(2).any(|re| re.is_match(text));
    if !has_date {
        return None;
    }
    let cleaned = text.replace("&nbsp;", "").replace('\u{a0}', "");
    let cleaned = cleaned.trim_end();
    let cleaned = cleaned.strip_suffix('-').unwrap_or(cleaned);
    Some(cleaned.trim().to_string())
}

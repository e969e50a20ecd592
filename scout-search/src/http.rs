//! Shared HTTP plumbing for the engine scrapers.
//!
//! One [`reqwest::Client`] is built per engine query. It carries browser-like
//! default headers, a cookie store, and a User-Agent picked from a rotation
//! list (or the configured one). [`fetch_html`] sends a prepared request and
//! returns the page body, mapping every failure to [`SearchError::Http`].

use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Desktop browser User-Agent strings, one picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Chinese first: Baidu and Bing rank Chinese government pages higher with it.
const LANGUAGE_PREFERENCE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

const MAX_REDIRECTS: usize = 10;

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(LANGUAGE_PREFERENCE));
    headers
}

/// Build a scraping client from `config`.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed, e.g.
/// because the configured User-Agent is not a valid header value.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| random_user_agent().to_owned());

    reqwest::Client::builder()
        .cookie_store(true)
        .default_headers(default_headers())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Send `request` and return the response body as text.
///
/// Non-success statuses are errors. `engine` labels the error messages.
pub async fn fetch_html(
    engine: &str,
    request: reqwest::RequestBuilder,
) -> Result<String, SearchError> {
    let response = request
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("{engine} request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Http(format!("{engine} returned HTTP {status}")));
    }

    let html = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("{engine} response read failed: {e}")))?;
    tracing::trace!(engine, bytes = html.len(), "results page received");
    Ok(html)
}

/// A User-Agent from the rotation list.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Random lowercase alphanumeric token for throwaway session cookies.
pub fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect()
}

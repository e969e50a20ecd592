//! DuckDuckGo search engine: most scraper-friendly.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.

use async_trait::async_trait;
use scraper::Html;
use url::Url;

use super::{collect_pages, element_text, first_text, is_absolute_http, selector};
use crate::config::SearchConfig;
use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchResult};

/// Organic results per DuckDuckGo HTML page; the `s` offset advances by this much.
const PAGE_SIZE: usize = 30;

/// DuckDuckGo HTML search engine scraper.
///
/// Uses a POST request to the HTML-only endpoint, paging with the `s`
/// offset form field.
#[derive(Debug, Clone, Default)]
pub struct DuckDuckGoEngine {
    config: SearchConfig,
}

impl DuckDuckGoEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it.
    fn extract_url(href: &str) -> Option<String> {
        // Handle protocol-relative URLs
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        // Check if this is a DDG redirect
        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }

    async fn fetch_page(
        &self,
        client: &reqwest::Client,
        query: &str,
        page: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let offset = (page * PAGE_SIZE).to_string();
        let params = [("q", query), ("s", offset.as_str())];

        let request = client
            .post("https://html.duckduckgo.com/html/")
            .form(&params);
        let html = http::fetch_html(SearchEngine::DuckDuckGo.name(), request).await?;
        tracing::trace!(page, "DuckDuckGo page fetched");

        parse_duckduckgo_html(&html)
    }
}

#[async_trait]
impl SearchEngineTrait for DuckDuckGoEngine {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, limit, "DuckDuckGo search");

        let client = http::build_client(&self.config)?;
        collect_pages(
            SearchEngine::DuckDuckGo.name(),
            limit,
            self.config.max_pages,
            |page| {
                let client = &client;
                async move { self.fetch_page(client, query, page).await }
            },
        )
        .await
    }

    fn name(&self) -> &str {
        SearchEngine::DuckDuckGo.name()
    }
}

/// Parse one DuckDuckGo HTML results page.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_duckduckgo_html(html: &str) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = selector(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )?;
    let title_sel = selector(".result__a")?;
    let snippet_sel = selector(".result__snippet")?;
    let source_sel = selector(".result__url")?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        let title_el = match element.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };

        let title = element_text(title_el);
        if title.is_empty() {
            continue;
        }

        let href = match title_el.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        let url = match DuckDuckGoEngine::extract_url(href) {
            Some(u) if is_absolute_http(&u) => u,
            _ => continue,
        };

        results.push(SearchResult {
            title,
            url,
            description: first_text(element, &snippet_sel),
            source: first_text(element, &source_sel),
            engine: SearchEngine::DuckDuckGo.name().to_string(),
            publish_date: None,
        });
    }

    tracing::debug!(count = results.len(), "DuckDuckGo results parsed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_DDG_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.ndrc.gov.cn%2Fxxgk%2Fzcfb%2F&amp;rut=abc123">
        国家发展改革委 政策发布
    </a>
    <a class="result__url" href="//duckduckgo.com/l/?uddg=x">www.ndrc.gov.cn</a>
    <div class="result__snippet">
        国家发展和改革委员会发布的通知、公告和办法。
    </div>
</div>
<div class="result results_links results_links_deep web-result result--ad">
    <a class="result__a" href="https://ads.example.com/">Sponsored (Ad)</a>
</div>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="https://example.com/industry-chain">
        Industry chain overview
    </a>
    <div class="result__snippet">
        Background reading on supply chains.
    </div>
</div>
</body>
</html>"#;

    #[test]
    fn extract_url_from_ddg_redirect() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=abc";
        let result = DuckDuckGoEngine::extract_url(href);
        assert_eq!(result, Some("https://example.com/page".to_string()));
    }

    #[test]
    fn extract_url_direct_link() {
        let href = "https://example.com/direct";
        let result = DuckDuckGoEngine::extract_url(href);
        assert_eq!(result, Some("https://example.com/direct".to_string()));
    }

    #[test]
    fn extract_url_invalid() {
        assert!(DuckDuckGoEngine::extract_url("not-a-url").is_none());
    }

    #[test]
    fn parse_mock_html_returns_results() {
        let results = parse_duckduckgo_html(MOCK_DDG_HTML).expect("should parse");
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].title, "国家发展改革委 政策发布");
        assert_eq!(results[0].url, "https://www.ndrc.gov.cn/xxgk/zcfb/");
        assert!(results[0].description.contains("通知"));
        assert_eq!(results[0].source, "www.ndrc.gov.cn");
        assert_eq!(results[0].engine, "duckduckgo");
        assert!(results[0].publish_date.is_none());

        assert_eq!(results[1].url, "https://example.com/industry-chain");
        assert!(results[1].source.is_empty());
    }

    #[test]
    fn parse_excludes_ads() {
        let results = parse_duckduckgo_html(MOCK_DDG_HTML).expect("should parse");
        assert!(!results.iter().any(|r| r.title.contains("(Ad)")));
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let results = parse_duckduckgo_html("<html><body></body></html>").expect("should parse");
        assert!(results.is_empty());
    }

    #[test]
    fn engine_name_is_duckduckgo() {
        assert_eq!(DuckDuckGoEngine::default().name(), "duckduckgo");
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DuckDuckGoEngine>();
    }

    #[tokio::test]
    #[ignore] // Live test, run with `cargo test -- --ignored`
    async fn live_duckduckgo_search() {
        let engine = DuckDuckGoEngine::default();
        let results = engine.search("rust programming", 5).await;
        let results = results.expect("live search should work");
        assert!(!results.is_empty());
        for r in &results {
            assert!(!r.title.is_empty());
            assert!(r.url.starts_with("http"));
        }
    }
}

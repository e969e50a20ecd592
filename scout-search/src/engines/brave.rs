//! Brave Search engine: independent index, good quality results.
//!
//! Brave Search has its own web crawler and index, making it a
//! valuable source of diverse results independent from Bing and Baidu.

use async_trait::async_trait;
use scraper::Html;

use super::{collect_pages, element_text, find_date, first_text, is_absolute_http, selector};
use crate::config::SearchConfig;
use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchResult};

/// Brave Search HTML scraper. Pages with the zero-based `offset` parameter.
#[derive(Debug, Clone, Default)]
pub struct BraveEngine {
    config: SearchConfig,
}

impl BraveEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    async fn fetch_page(
        &self,
        client: &reqwest::Client,
        query: &str,
        page: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let offset = page.to_string();

        let request = client
            .get("https://search.brave.com/search")
            .query(&[("q", query), ("offset", offset.as_str()), ("source", "web")]);
        let html = http::fetch_html(SearchEngine::Brave.name(), request).await?;
        tracing::trace!(page, "Brave page fetched");

        parse_brave_html(&html)
    }
}

#[async_trait]
impl SearchEngineTrait for BraveEngine {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, limit, "Brave search");

        let client = http::build_client(&self.config)?;
        collect_pages(
            SearchEngine::Brave.name(),
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
        SearchEngine::Brave.name()
    }
}

/// Parse one Brave results page.
pub(crate) fn parse_brave_html(html: &str) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = selector(r#"div.snippet[data-type="web"]"#)?;
    let title_sel = selector(".title")?;
    let link_sel = selector("a[href]")?;
    let snippet_sel = selector(".snippet-description, .generic-snippet .content")?;
    let source_sel = selector(".site-name-content .desktop-small-semibold, .netloc")?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        let title = match element.select(&title_sel).next() {
            Some(el) => element_text(el),
            None => continue,
        };
        if title.is_empty() {
            continue;
        }

        let url = match element
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            Some(href) if is_absolute_http(href) => href.to_string(),
            _ => continue,
        };

        let description = first_text(element, &snippet_sel);
        // Brave prefixes some snippets with the page date.
        let publish_date = find_date(&description);

        results.push(SearchResult {
            title,
            url,
            description,
            source: first_text(element, &source_sel),
            engine: SearchEngine::Brave.name().to_string(),
            publish_date,
        });
    }

    tracing::debug!(count = results.len(), "Brave results parsed");
    Ok(results)
}

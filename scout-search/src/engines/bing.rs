//! Bing search engine: best support for `site:` and `filetype:` operators,
//! which is why the advanced policy search path goes through it.

use async_trait::async_trait;
use scraper::Html;

use super::{all_text, collect_pages, element_text, find_date, first_text, is_absolute_http, selector};
use crate::config::SearchConfig;
use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchResult};

/// Bing HTML search scraper.
#[derive(Debug, Clone, Default)]
pub struct BingEngine {
    config: SearchConfig,
}

impl BingEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    async fn fetch_page(
        &self,
        client: &reqwest::Client,
        query: &str,
        page: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        // `first` is the 1-based rank of the first result on the page.
        let first = (1 + page * 10).to_string();

        let request = client
            .get("https://www.bing.com/search")
            .query(&[("q", query), ("first", first.as_str())])
            .header("Referer", "https://www.bing.com/");
        let html = http::fetch_html(SearchEngine::Bing.name(), request).await?;
        tracing::trace!(page, "Bing page fetched");

        parse_bing_html(&html)
    }
}

#[async_trait]
impl SearchEngineTrait for BingEngine {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, limit, "Bing search");

        let client = http::build_client(&self.config)?;
        collect_pages(
            SearchEngine::Bing.name(),
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
        SearchEngine::Bing.name()
    }
}

/// Parse one Bing results page.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_bing_html(html: &str) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let item_sel = selector("#b_content #b_results > *")?;
    let title_sel = selector("h2")?;
    let link_sel = selector("a")?;
    let snippet_sel = selector("p")?;
    let source_sel = selector(".b_tpcn")?;
    let caption_sel = selector(".b_caption, .b_attribution")?;

    let mut results = Vec::new();

    for element in document.select(&item_sel) {
        let title_el = match element.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };
        let title = element_text(title_el);
        if title.is_empty() {
            continue;
        }

        // Prefer the heading's own anchor; fall back to the item's first link.
        let url = match title_el
            .select(&link_sel)
            .next()
            .or_else(|| element.select(&link_sel).next())
            .and_then(|a| a.value().attr("href"))
        {
            Some(href) if is_absolute_http(href) => href.to_string(),
            _ => continue,
        };

        let description = first_text(element, &snippet_sel);
        let source = all_text(element, &source_sel);
        let publish_date = find_date(&all_text(element, &caption_sel));

        results.push(SearchResult {
            title,
            url,
            description,
            source,
            engine: SearchEngine::Bing.name().to_string(),
            publish_date,
        });
    }

    tracing::debug!(count = results.len(), "Bing results parsed");
    Ok(results)
}

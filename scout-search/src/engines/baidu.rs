//! Baidu search engine: the broadest index of Chinese government sites.
//!
//! Result links are Baidu redirect URLs (`http://www.baidu.com/link?url=...`),
//! so the real destination domain usually only shows up in the snippet or the
//! source label. The policy scorer accounts for that.

use async_trait::async_trait;
use scraper::Html;

use super::{collect_pages, date_label, element_text, first_text, is_absolute_http, selector};
use crate::config::SearchConfig;
use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchResult};

/// Results per Baidu page; the `pn` offset advances by this much.
const PAGE_SIZE: usize = 10;

/// Baidu HTML search scraper.
#[derive(Debug, Clone, Default)]
pub struct BaiduEngine {
    config: SearchConfig,
}

impl BaiduEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    async fn fetch_page(
        &self,
        client: &reqwest::Client,
        query: &str,
        page: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let offset = (page * PAGE_SIZE).to_string();
        let cookie = format!("BAIDUID={}:FG=1", http::random_token(11));

        let request = client
            .get("https://www.baidu.com/s")
            .query(&[("wd", query), ("pn", offset.as_str()), ("ie", "utf-8")])
            .header("Referer", "https://www.baidu.com/")
            .header("Cookie", cookie);
        let html = http::fetch_html(SearchEngine::Baidu.name(), request).await?;
        tracing::trace!(page, "Baidu page fetched");

        parse_baidu_html(&html)
    }
}

#[async_trait]
impl SearchEngineTrait for BaiduEngine {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, limit, "Baidu search");

        let client = http::build_client(&self.config)?;
        collect_pages(
            SearchEngine::Baidu.name(),
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
        SearchEngine::Baidu.name()
    }
}

/// Parse one Baidu results page.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_baidu_html(html: &str) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let item_sel = selector("#content_left > *")?;
    let title_sel = selector("h3")?;
    let link_sel = selector("a")?;
    let summary_sel = selector(".c-font-normal.c-color-text")?;
    let row_sel = selector(".cos-row")?;
    let source_sel = selector(".cosc-source")?;
    let date_sel = selector(".cos-color-text-minor, .c-color-gray, .g-c-gray")?;

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

        // The aria-label carries the untruncated abstract when present.
        let description = element
            .select(&summary_sel)
            .next()
            .and_then(|el| el.value().attr("aria-label"))
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| first_text(element, &row_sel));

        let source = first_text(element, &source_sel);

        let publish_date = element
            .select(&date_sel)
            .find_map(|el| date_label(&el.text().collect::<String>()));

        results.push(SearchResult {
            title,
            url,
            description,
            source,
            engine: SearchEngine::Baidu.name().to_string(),
            publish_date,
        });
    }

    tracing::debug!(count = results.len(), "Baidu results parsed");
    Ok(results)
}

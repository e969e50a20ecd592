//! Shared test utilities used across the tool and host test modules.

use std::sync::Arc;

use async_trait::async_trait;
use scout_search::{EngineRegistry, SearchEngineTrait, SearchError, SearchResult};

/// Engine that serves a fixed result list, truncated to the requested limit.
pub struct FixtureEngine {
    pub id: &'static str,
    pub results: Vec<SearchResult>,
}

#[async_trait]
impl SearchEngineTrait for FixtureEngine {
    async fn search(&self, _query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self.results.iter().take(limit).cloned().collect())
    }

    fn name(&self) -> &str {
        self.id
    }
}

/// Engine whose every request fails.
pub struct DownEngine {
    pub id: &'static str,
}

#[async_trait]
impl SearchEngineTrait for DownEngine {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        Err(SearchError::Http(format!("{} unreachable", self.id)))
    }

    fn name(&self) -> &str {
        self.id
    }
}

pub fn result(engine: &str, title: &str, url: &str, description: &str, source: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        source: source.to_string(),
        engine: engine.to_string(),
        publish_date: None,
    }
}

/// Baidu serves two policy documents; Bing serves one policy document and
/// one unrelated page.
pub fn fixture_registry() -> EngineRegistry {
    let mut registry = EngineRegistry::new();
    registry.register(Arc::new(FixtureEngine {
        id: "baidu",
        results: vec![
            result(
                "baidu",
                "关于印发制造业发展方案的通知",
                "https://www.gov.cn/zhengce/content/1.htm",
                "国务院发布",
                "中国政府网",
            ),
            result(
                "baidu",
                "产业政策解读",
                "https://news.example.com/policy",
                "政策 解读",
                "新闻网",
            ),
        ],
    }));
    registry.register(Arc::new(FixtureEngine {
        id: "bing",
        results: vec![
            result(
                "bing",
                "工信部发布实施意见",
                "https://www.miit.gov.cn/a.html",
                "",
                "",
            ),
            result(
                "bing",
                "Weekend recipes",
                "https://food.example.com/",
                "",
                "",
            ),
        ],
    }));
    registry.register(Arc::new(DownEngine { id: "brave" }));
    registry
}

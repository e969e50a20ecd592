//! Trait definition for pluggable search engine backends, and the registry
//! that maps engine identifiers to them.
//!
//! Each search engine (Baidu, Bing, DuckDuckGo, Brave) implements
//! [`SearchEngineTrait`]. The aggregator only ever sees the trait, so adding
//! an engine means registering one more implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SearchConfig;
use crate::engines::{BaiduEngine, BingEngine, BraveEngine, DuckDuckGoEngine};
use crate::error::SearchError;
use crate::types::SearchResult;

/// A pluggable search engine backend.
///
/// Implementors scrape a specific search engine and return normalised
/// [`SearchResult`] values, paging the upstream until `limit` results are
/// collected or a page comes back empty. Each engine handles its own:
///
/// - URL construction and pagination parameters
/// - HTTP request with appropriate headers
/// - HTML parsing via CSS selectors
/// - Discarding results without an absolute `http` URL
///
/// All implementations must be `Send + Sync` for concurrent engine queries.
#[async_trait]
pub trait SearchEngineTrait: Send + Sync {
    /// Perform a web search and return at most `limit` parsed results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if a page request fails or the response
    /// cannot be parsed. Callers in this crate absorb these errors.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError>;

    /// Identifier this engine is registered under, e.g. `"bing"`.
    fn name(&self) -> &str;
}

/// Mapping from engine identifier to implementation.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: HashMap<String, Arc<dyn SearchEngineTrait>>,
}

impl EngineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in scraper.
    pub fn with_default_engines(config: &SearchConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BaiduEngine::new(config.clone())));
        registry.register(Arc::new(BingEngine::new(config.clone())));
        registry.register(Arc::new(DuckDuckGoEngine::new(config.clone())));
        registry.register(Arc::new(BraveEngine::new(config.clone())));
        registry
    }

    /// Register an engine. Replaces any existing engine with the same name.
    pub fn register(&mut self, engine: Arc<dyn SearchEngineTrait>) {
        self.engines.insert(engine.name().to_ascii_lowercase(), engine);
    }

    /// Look up an engine by identifier (case-insensitive, trimmed).
    pub fn get(&self, id: &str) -> Option<Arc<dyn SearchEngineTrait>> {
        self.engines.get(&id.trim().to_ascii_lowercase()).cloned()
    }

    /// Whether an engine is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Sorted identifiers of all registered engines.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.names())
            .finish()
    }
}

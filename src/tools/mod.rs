//! Tools exposed over the host bridge.
//!
//! - [`WebSearchTool`]: generic multi-engine search
//! - [`PolicySearchTool`]: scored policy document search
//! - [`PolicyAdvancedTool`]: `site:`/`filetype:` restricted search

use std::sync::Arc;

use scout_search::EngineRegistry;

use crate::config::HostConfig;

pub mod policy_advanced;
pub mod policy_search;
pub mod registry;
pub mod types;
pub mod web_search;

pub use policy_advanced::PolicyAdvancedTool;
pub use policy_search::PolicySearchTool;
pub use registry::ToolRegistry;
pub use types::{Tool, ToolResult};
pub use web_search::WebSearchTool;

/// Build the registry of search tools, named as configured.
pub fn build_registry(config: &HostConfig, engines: EngineRegistry) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(WebSearchTool::new(
        config.tools.search_name.clone(),
        engines.clone(),
        config.search.clone(),
    )));
    registry.register(Arc::new(PolicySearchTool::new(
        config.tools.search_policy_name.clone(),
        engines.clone(),
    )));
    registry.register(Arc::new(PolicyAdvancedTool::new(
        config.tools.search_policy_advanced_name.clone(),
        engines,
    )));
    registry
}

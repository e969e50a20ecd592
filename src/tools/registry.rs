//! Tool registry.
//!
//! The [`ToolRegistry`] holds registered tools, provides lookup by name,
//! and exports their JSON schemas for `tools.list`.

use std::collections::HashMap;
use std::sync::Arc;

use super::types::Tool;

/// Registry of callable tools, keyed by name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        if self.tools.contains_key(tool.name()) {
            tracing::warn!(tool = tool.name(), "replacing registered tool");
        }
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Sorted names of all registered tools.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Export `{name, description, inputSchema}` for every tool, sorted by name.
    pub fn schemas(&self) -> Vec<serde_json::Value> {
        self.list()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| {
                serde_json::json!({
                    "name": t.name(),
                    "description": t.description(),
                    "inputSchema": t.schema(),
                })
            })
            .collect()
    }

    /// Check if a tool exists in the registry.
    pub fn exists(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::Result;
    use crate::tools::types::ToolResult;

    struct EchoTool {
        tool_name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.tool_name
        }
        fn description(&self) -> &str {
            "Echo arguments back"
        }
        fn schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {}})
        }
        async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
            Ok(ToolResult::success(args.to_string()))
        }
    }

    fn registry() -> ToolRegistry {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(EchoTool { tool_name: "zeta" }));
        reg.register(Arc::new(EchoTool { tool_name: "alpha" }));
        reg
    }

    #[test]
    fn list_is_sorted() {
        assert_eq!(registry().list(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn get_unknown_is_none() {
        let reg = registry();
        assert!(reg.get("missing").is_none());
        assert!(!reg.exists("missing"));
        assert!(reg.exists("alpha"));
    }

    #[test]
    fn register_replaces_same_name() {
        let mut reg = registry();
        reg.register(Arc::new(EchoTool { tool_name: "alpha" }));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn schemas_are_sorted_and_complete() {
        let schemas = registry().schemas();
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0]["name"], "alpha");
        assert_eq!(schemas[1]["name"], "zeta");
        assert!(schemas[0]["inputSchema"].is_object());
        assert_eq!(schemas[0]["description"], "Echo arguments back");
    }

    #[tokio::test]
    async fn registered_tool_executes() {
        let tool = registry().get("alpha").expect("registered");
        let result = tool.execute(serde_json::json!({"x": 1})).await.expect("execute");
        assert!(result.success);
        assert_eq!(result.content, r#"{"x":1}"#);
    }

    #[test]
    fn empty_registry() {
        let reg = ToolRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.schemas().is_empty());
    }
}

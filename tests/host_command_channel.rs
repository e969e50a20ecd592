//! Host command channel driven through real search tools backed by
//! recording mock engines.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scout::config::HostConfig;
use scout::host::channel::{HostCommandClient, command_channel};
use scout::host::contract::{CommandEnvelope, CommandName, ResponseEnvelope};
use scout::tools::build_registry;
use scout_search::{EngineRegistry, SearchEngineTrait, SearchError, SearchResult};
use serde_json::{Value, json};

type CallLog = Arc<Mutex<Vec<(String, String, usize)>>>;

struct RecordingEngine {
    id: &'static str,
    calls: CallLog,
}

#[async_trait]
impl SearchEngineTrait for RecordingEngine {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.calls
            .lock()
            .expect("lock call log")
            .push((self.id.to_owned(), query.to_owned(), limit));
        Ok((0..limit.min(3))
            .map(|i| SearchResult {
                title: format!("关于{}的通知 {i}", self.id),
                url: format!("https://www.{}.gov.cn/{i}", self.id),
                description: String::new(),
                source: String::new(),
                engine: self.id.to_owned(),
                publish_date: None,
            })
            .collect())
    }

    fn name(&self) -> &str {
        self.id
    }
}

struct Harness {
    client: HostCommandClient,
    calls: CallLog,
    next_id: usize,
}

impl Harness {
    fn new(config: &HostConfig) -> Self {
        let calls: CallLog = Arc::default();
        let mut engines = EngineRegistry::new();
        for id in ["baidu", "bing", "duckduckgo"] {
            engines.register(Arc::new(RecordingEngine {
                id,
                calls: Arc::clone(&calls),
            }));
        }
        let (client, server) = command_channel(8, build_registry(config, engines));
        tokio::spawn(server.run());
        Self {
            client,
            calls,
            next_id: 0,
        }
    }

    async fn send(&mut self, command: CommandName, payload: Value) -> ResponseEnvelope {
        self.next_id += 1;
        let envelope = CommandEnvelope::new(format!("req-{}", self.next_id), command, payload);
        self.client.send(envelope).await.expect("send command")
    }

    async fn call(&mut self, tool: &str, arguments: Value) -> ResponseEnvelope {
        self.send(
            CommandName::ToolsCall,
            json!({"name": tool, "arguments": arguments}),
        )
        .await
    }

    fn calls(&self) -> Vec<(String, String, usize)> {
        let mut calls = self.calls.lock().expect("lock call log").clone();
        calls.sort();
        calls
    }
}

fn content(resp: &ResponseEnvelope) -> Value {
    assert!(resp.ok, "tool call failed: {:?}", resp.error);
    serde_json::from_str(resp.payload["content"].as_str().expect("content string"))
        .expect("content is JSON")
}

#[tokio::test]
async fn request_ids_are_echoed() {
    let mut h = Harness::new(&HostConfig::default());
    let first = h.send(CommandName::HostPing, json!({})).await;
    let second = h.send(CommandName::HostPing, json!({})).await;
    assert_eq!(first.request_id, "req-1");
    assert_eq!(second.request_id, "req-2");
}

#[tokio::test]
async fn policy_search_overfetches_and_prefixes_region() {
    let mut h = Harness::new(&HostConfig::default());
    let resp = h
        .call(
            "searchPolicy",
            json!({"keyword": "数字经济", "limit": 5, "region": "江西省"}),
        )
        .await;
    let output = content(&resp);

    assert_eq!(
        h.calls(),
        vec![
            ("baidu".to_owned(), "江西省 数字经济 政策".to_owned(), 5),
            ("bing".to_owned(), "江西省 数字经济 政策".to_owned(), 5),
        ]
    );
    assert_eq!(output["region"], "江西省");
    assert_eq!(output["totalResults"], 5);
    let scores: Vec<u64> = output["results"]
        .as_array()
        .expect("results")
        .iter()
        .filter_map(|r| r["policyScore"].as_u64())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| *s == 60));
}

#[tokio::test]
async fn generic_search_splits_limit() {
    let mut h = Harness::new(&HostConfig::default());
    let resp = h
        .call(
            "search",
            json!({"query": "rust", "limit": 5, "engines": ["bing", "duckduckgo"]}),
        )
        .await;
    assert_eq!(content(&resp)["totalResults"], 5);
    assert_eq!(
        h.calls(),
        vec![
            ("bing".to_owned(), "rust".to_owned(), 3),
            ("duckduckgo".to_owned(), "rust".to_owned(), 2),
        ]
    );
}

#[tokio::test]
async fn advanced_search_only_asks_bing() {
    let mut h = Harness::new(&HostConfig::default());
    let resp = h
        .call(
            "searchPolicyAdvanced",
            json!({"keyword": "规划", "limit": 2, "site": "miit.gov.cn"}),
        )
        .await;
    assert_eq!(content(&resp)["totalResults"], 2);
    assert_eq!(
        h.calls(),
        vec![("bing".to_owned(), "规划 site:miit.gov.cn".to_owned(), 4)]
    );
}

#[tokio::test]
async fn renamed_tools_are_listed_and_callable() {
    let mut config = HostConfig::default();
    config.apply_overrides_from(|key| match key {
        "MCP_TOOL_SEARCH_NAME" => Some("web_search".to_owned()),
        "MCP_TOOL_SEARCH_POLICY_NAME" => Some("9invalid".to_owned()),
        _ => None,
    });
    let mut h = Harness::new(&config);

    let list = h.send(CommandName::ToolsList, json!({})).await;
    let names: Vec<&str> = list.payload["tools"]
        .as_array()
        .expect("tools")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["searchPolicy", "searchPolicyAdvanced", "web_search"]);

    let resp = h.call("web_search", json!({"query": "q"})).await;
    assert!(resp.ok);
    let resp = h.call("search", json!({"query": "q"})).await;
    assert!(!resp.ok);
}

#[tokio::test]
async fn invalid_arguments_do_not_reach_engines() {
    let mut h = Harness::new(&HostConfig::default());
    let resp = h.call("searchPolicy", json!({"limit": 5})).await;
    assert!(!resp.ok);
    let resp = h.call("searchPolicy", json!({"keyword": "x", "limit": 0})).await;
    assert!(!resp.ok);
    assert!(h.calls().is_empty());
}

//! Core types for normalised search results and engine identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single search hit, reduced to the same attribute set whichever engine
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Display title of the result page. Never empty.
    pub title: String,
    /// Absolute `http`/`https` URL. Adapters drop relative links before emitting.
    pub url: String,
    /// Snippet text; may be empty.
    pub description: String,
    /// Attribution label such as the site name; may be empty.
    pub source: String,
    /// Identifier of the producing engine (`"baidu"`, `"bing"`, ...).
    ///
    /// The policy pipeline rewrites this to a derived tag such as `"bing-policy"`.
    pub engine: String,
    /// Publish date exactly as the engine rendered it (`2024年3月8日`,
    /// `2024-03-08`, ...). Not normalised across engines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
}

/// A [`SearchResult`] extended with its policy relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    #[serde(flatten)]
    pub result: SearchResult,
    /// Relevance score in `0..=100`.
    pub policy_score: u8,
}

impl ScoredResult {
    /// URL of the underlying result.
    pub fn url(&self) -> &str {
        &self.result.url
    }
}

/// Search engines with a built-in scraping adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    /// Baidu: strongest coverage of Chinese government sites.
    Baidu,
    /// Bing: best support for `site:` / `filetype:` operators.
    Bing,
    /// DuckDuckGo HTML endpoint: tolerant of automated requests.
    DuckDuckGo,
    /// Brave Search: independent index.
    Brave,
}

impl SearchEngine {
    /// Returns the wire identifier of this engine.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Baidu => "baidu",
            Self::Bing => "bing",
            Self::DuckDuckGo => "duckduckgo",
            Self::Brave => "brave",
        }
    }

    /// Parse a wire identifier. Surrounding whitespace and case are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "baidu" => Some(Self::Baidu),
            "bing" => Some(Self::Bing),
            "duckduckgo" => Some(Self::DuckDuckGo),
            "brave" => Some(Self::Brave),
            _ => None,
        }
    }

    /// Returns all available engine variants.
    pub fn all() -> &'static [SearchEngine] {
        &[Self::Baidu, Self::Bing, Self::DuckDuckGo, Self::Brave]
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SearchResult {
        SearchResult {
            title: "关于印发制造业数字化转型实施方案的通知".into(),
            url: "https://www.jiangxi.gov.cn/art/2024/3/8/1.html".into(),
            description: "江西省人民政府办公厅".into(),
            source: "江西省人民政府".into(),
            engine: "baidu".into(),
            publish_date: Some("2024年3月8日".into()),
        }
    }

    #[test]
    fn search_result_serializes_camel_case() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json["publishDate"], "2024年3月8日");
        assert!(json.get("publish_date").is_none());
    }

    #[test]
    fn absent_publish_date_is_omitted() {
        let result = SearchResult {
            publish_date: None,
            ..sample()
        };
        let json = serde_json::to_value(result).expect("serialize");
        assert!(json.get("publishDate").is_none());
    }

    #[test]
    fn scored_result_flattens_fields() {
        let scored = ScoredResult {
            result: sample(),
            policy_score: 80,
        };
        let json = serde_json::to_value(&scored).expect("serialize");
        assert_eq!(json["policyScore"], 80);
        assert_eq!(json["engine"], "baidu");
        assert_eq!(scored.url(), "https://www.jiangxi.gov.cn/art/2024/3/8/1.html");

        let decoded: ScoredResult = serde_json::from_value(json).expect("deserialize");
        assert_eq!(decoded, scored);
    }

    #[test]
    fn search_engine_display_matches_wire_name() {
        assert_eq!(SearchEngine::Baidu.to_string(), "baidu");
        assert_eq!(SearchEngine::Bing.to_string(), "bing");
        assert_eq!(SearchEngine::DuckDuckGo.to_string(), "duckduckgo");
        assert_eq!(SearchEngine::Brave.to_string(), "brave");
    }

    #[test]
    fn search_engine_parse() {
        assert_eq!(SearchEngine::parse("baidu"), Some(SearchEngine::Baidu));
        assert_eq!(SearchEngine::parse("  Bing "), Some(SearchEngine::Bing));
        assert_eq!(SearchEngine::parse("DuckDuckGo"), Some(SearchEngine::DuckDuckGo));
        assert_eq!(SearchEngine::parse("google"), None);
        assert_eq!(SearchEngine::parse(""), None);
    }

    #[test]
    fn search_engine_all_round_trips_through_parse() {
        for engine in SearchEngine::all() {
            assert_eq!(SearchEngine::parse(engine.name()), Some(*engine));
        }
        assert_eq!(SearchEngine::all().len(), 4);
    }

    #[test]
    fn search_engine_serde_uses_wire_name() {
        let json = serde_json::to_string(&SearchEngine::DuckDuckGo).expect("serialize");
        assert_eq!(json, "\"duckduckgo\"");
    }
}

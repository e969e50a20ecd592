//! Host configuration: engine policy, tool names, logging.
//!
//! Loaded from `<config_dir>/scout/config.toml`. Every section has
//! `#[serde(default)]`, so a partial file or no file at all yields a usable
//! configuration. Tool names may be overridden from the environment.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use scout_search::{SearchConfig, SearchEngine};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoutError};

/// Environment variable overriding the generic search tool name.
pub const ENV_SEARCH_NAME: &str = "MCP_TOOL_SEARCH_NAME";
/// Environment variable overriding the policy search tool name.
pub const ENV_SEARCH_POLICY_NAME: &str = "MCP_TOOL_SEARCH_POLICY_NAME";
/// Environment variable overriding the advanced policy search tool name.
pub const ENV_SEARCH_POLICY_ADVANCED_NAME: &str = "MCP_TOOL_SEARCH_POLICY_ADVANCED_NAME";

/// Top-level host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub search: SearchSettings,
    pub tools: ToolNames,
    pub logging: LoggingConfig,
}

/// Which engines the tools may use, and how adapters talk to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Engines the generic search tool may use. Empty means every supported engine.
    pub allowed_engines: Vec<String>,
    /// Engine used when a request names none, or none that is allowed.
    pub default_engine: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Fixed User-Agent; rotates through browser UAs when unset.
    pub user_agent: Option<String>,
    /// Page cap per adapter call.
    pub max_pages: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let adapter = SearchConfig::default();
        Self {
            allowed_engines: Vec::new(),
            default_engine: SearchEngine::Bing.name().to_owned(),
            timeout_seconds: adapter.timeout_seconds,
            user_agent: adapter.user_agent,
            max_pages: adapter.max_pages,
        }
    }
}

impl SearchSettings {
    /// Adapter configuration derived from these settings.
    #[must_use]
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
            max_pages: self.max_pages,
        }
    }

    /// Whether `engine` passes the allow-list.
    #[must_use]
    pub fn is_allowed(&self, engine: &str) -> bool {
        if self.allowed_engines.is_empty() {
            return true;
        }
        let engine = engine.trim();
        self.allowed_engines
            .iter()
            .any(|allowed| allowed.trim().eq_ignore_ascii_case(engine))
    }

    /// Resolve the engine list for a generic search request.
    ///
    /// No request means `[default_engine]`. Otherwise engines outside the
    /// allow-list are dropped, falling back to `[default_engine]` when the
    /// allow-list removed every one of them.
    #[must_use]
    pub fn resolve_engines(&self, requested: Option<&[String]>) -> Vec<String> {
        let Some(requested) = requested else {
            return vec![self.default_engine.clone()];
        };
        if self.allowed_engines.is_empty() {
            return requested.to_vec();
        }
        let permitted: Vec<String> = requested
            .iter()
            .filter(|engine| self.is_allowed(engine))
            .cloned()
            .collect();
        if permitted.is_empty() {
            tracing::debug!(
                ?requested,
                default = %self.default_engine,
                "no requested engine is allowed; using default"
            );
            vec![self.default_engine.clone()]
        } else {
            permitted
        }
    }
}

/// Names the tools are registered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolNames {
    pub search_name: String,
    pub search_policy_name: String,
    pub search_policy_advanced_name: String,
}

impl Default for ToolNames {
    fn default() -> Self {
        Self {
            search_name: "search".to_owned(),
            search_policy_name: "searchPolicy".to_owned(),
            search_policy_advanced_name: "searchPolicyAdvanced".to_owned(),
        }
    }
}

/// Logging settings for the host binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Write logs to this file (rotated daily) instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            log_file: None,
        }
    }
}

/// Whether `name` is an acceptable tool name: a letter followed by
/// letters, digits, `_` or `-`.
#[must_use]
pub fn is_valid_tool_name(name: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(name))
}

impl HostConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ScoutError::Config(e.to_string()))
    }

    /// Returns the default config file path: `<config_dir>/scout/config.toml`.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::env::temp_dir().join("scout-config"))
            .join("scout")
            .join("config.toml")
    }

    /// Load from `path`, or from the default path when `None`.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`] for unparsable TOML and
    /// [`ScoutError::Io`] for read failures other than "not found".
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(Self::default_config_path, Path::to_path_buf);
        match Self::from_file(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(ScoutError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply tool-name overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply tool-name overrides from `lookup`.
    ///
    /// Names failing [`is_valid_tool_name`] are ignored with a warning.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let slots = [
            (ENV_SEARCH_NAME, &mut self.tools.search_name),
            (ENV_SEARCH_POLICY_NAME, &mut self.tools.search_policy_name),
            (
                ENV_SEARCH_POLICY_ADVANCED_NAME,
                &mut self.tools.search_policy_advanced_name,
            ),
        ];
        for (key, slot) in slots {
            let Some(value) = lookup(key).filter(|v| !v.is_empty()) else {
                continue;
            };
            if is_valid_tool_name(&value) {
                tracing::info!(variable = key, name = %value, "using custom tool name");
                *slot = value;
            } else {
                tracing::warn!(
                    variable = key,
                    name = %value,
                    default = %slot,
                    "invalid tool name; keeping default"
                );
            }
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.search
            .search_config()
            .validate()
            .map_err(|e| ScoutError::Config(e.to_string()))?;

        if SearchEngine::parse(&self.search.default_engine).is_none() {
            return Err(ScoutError::Config(format!(
                "unsupported default_engine: {}",
                self.search.default_engine
            )));
        }
        if let Some(bad) = self
            .search
            .allowed_engines
            .iter()
            .find(|e| SearchEngine::parse(e).is_none())
        {
            return Err(ScoutError::Config(format!(
                "unsupported engine in allowed_engines: {bad}"
            )));
        }
        if !self.search.is_allowed(&self.search.default_engine) {
            return Err(ScoutError::Config(format!(
                "default_engine {} is not in allowed_engines",
                self.search.default_engine
            )));
        }

        let names = [
            &self.tools.search_name,
            &self.tools.search_policy_name,
            &self.tools.search_policy_advanced_name,
        ];
        if let Some(bad) = names.iter().find(|n| !is_valid_tool_name(n)) {
            return Err(ScoutError::Config(format!("invalid tool name: {bad}")));
        }
        for (i, name) in names.iter().enumerate() {
            if names[i + 1..].contains(name) {
                return Err(ScoutError::Config(format!("duplicate tool name: {name}")));
            }
        }
        Ok(())
    }
}

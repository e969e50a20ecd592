//! Error types for the scout-search crate.
//!
//! Only [`SearchError::EmptyQuery`], [`SearchError::AggregateFailure`] and
//! [`SearchError::Config`] ever reach a caller of the public search entry
//! points. Per-engine failures are absorbed by the aggregator.

/// Errors that can occur during search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query or keyword was empty after trimming.
    #[error("query must not be empty")]
    EmptyQuery,

    /// The concurrent fan-out itself could not complete.
    #[error("search aggregation failed: {0}")]
    AggregateFailure(String),

    /// An engine identifier with no registered adapter.
    #[error("unsupported search engine: {0}")]
    UnsupportedEngine(String),

    /// An HTTP request to a search engine failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse search engine response HTML.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration or request parameters.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for scout-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

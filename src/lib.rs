//! Scout: a search tool host.
//!
//! Exposes three search tools (generic multi-engine search, policy document
//! search, and site/file-type restricted policy search) over a
//! newline-delimited JSON command bridge on stdin/stdout.
//!
//! # Architecture
//!
//! - **Search core**: the `scout-search` crate scrapes engines, aggregates,
//!   and scores results
//! - **Tools**: [`tools`] adapts each search entry point to a JSON-in,
//!   JSON-out [`tools::Tool`]
//! - **Host**: [`host`] parses command envelopes and routes `tools.call`
//!   to the tool registry
//! - **Config**: [`config`] loads TOML settings and tool-name overrides

pub mod config;
pub mod error;
pub mod host;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::HostConfig;
pub use error::{Result, ScoutError};

//! Search orchestration: fan-out, scoring, dedup, ranking.
//!
//! [`search`] holds the three pipelines. The other modules are the pure
//! stages they compose and are usable on their own.

pub mod aggregate;
pub mod dedup;
pub mod query;
pub mod rank;
pub mod scoring;
pub mod search;

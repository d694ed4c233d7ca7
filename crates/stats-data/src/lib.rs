//! Filesystem layer for codex-stats.
//!
//! Responsible for discovering candidate history files under the root
//! directory, extracting loosely-typed JSON records from them, and
//! bucketing interpreted events into per-day totals.

pub mod aggregator;
pub mod discovery;
pub mod reader;

pub use stats_core as core;

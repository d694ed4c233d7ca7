//! Core domain layer for codex-stats.
//!
//! Holds the error type, the interpreted-event data model, the record
//! interpretation heuristics (timestamp resolution, role classification,
//! usage extraction), timezone handling, number formatting and the CLI
//! settings surface. This crate performs no I/O.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

//! taskdeck: task persistence, filtering, and aggregation.
//!
//! The library owns the task store (SQLite), the pure in-memory filter
//! engine, and the aggregation functions; the CLI binary is a thin
//! presentation layer over these modules.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod format;
pub mod stats;
pub mod types;

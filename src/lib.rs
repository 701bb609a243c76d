//! Synthetic scan datasets and repeated, timed scan queries.
//!
//! `csvs` writes one fixed-width-row CSV per size class; `scan` times each configured query
//! against the matching `scan_<NNNN>` tables and reports per-run and median latencies.

pub mod cli;
pub mod config;
pub mod errors;
pub mod generator;
pub mod logger;
pub mod report;
pub mod scan;
pub mod stats;

pub use config::BenchConfig;
pub use errors::BenchError;

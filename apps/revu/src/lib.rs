//! Revu core library.
//!
//! This crate exposes programmatic APIs for scanning source text with
//! pattern-based review rules, deriving quality metrics, and applying
//! deterministic auto-fixes.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `rules`: Rule set management, built-in rules, and the pattern tester.
//! - `scan`: Line-by-line scanning with a whole-text short-circuit.
//! - `checks`: Structural checks (comments, doc blocks, error handling).
//! - `metrics`: Quality metric aggregation and overall score.
//! - `fix`: Rewrite catalog and single/bulk fix application.
//! - `assist`: Keyword-routed advisory responses over a scan result.
//! - `models`: Data models for rules, findings, and scan output structs.
//! - `output`: Human/JSON printers for scan/fix/rules/tester.
//! - `utils`: Supporting helpers.
//!
//! Note: All documentation comments are written in English by convention.
pub mod assist;
pub mod checks;
pub mod cli;
pub mod config;
pub mod fix;
pub mod metrics;
pub mod models;
pub mod output;
pub mod rules;
pub mod scan;
pub mod utils;

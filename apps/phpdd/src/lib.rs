//! phpdd core library.
//!
//! This crate renders the results of a PHP version-compatibility analysis
//! as a styled terminal report, a JSON document or a JUnit XML report,
//! with consistent issue counts across all three.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Effective settings resolution and scan option validation.
//! - `analyzer`: The engine hand-off trait and scan target routing.
//! - `models`: Reports, issues and the analysis result document.
//! - `aggregate`: Normalized view shared by every printer.
//! - `output`: Terminal, JSON and JUnit printers plus the dispatcher.
//! - `size`: Human-readable byte sizes.
//! - `path`: Width-constrained path shortening.
//! - `error`: Error types.
//! - `utils`: Supporting helpers.
pub mod aggregate;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod path;
pub mod size;
pub mod utils;

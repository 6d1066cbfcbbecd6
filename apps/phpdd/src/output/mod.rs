//! Output rendering for analysis results.
//!
//! Supports `stdout` (default, styled tables), `json` and `junit`. Every
//! renderer composes the whole document in memory from the aggregated
//! view; `dispatch` picks one and writes it out.

pub mod dispatch;
pub mod json;
pub mod junit;
pub mod stdout;
pub mod style;
pub mod table;

use crate::aggregate::Totals;

pub use dispatch::{dispatch, OutputMode, RenderContext};

/// A fully composed document plus the counters the caller needs for the
/// exit code.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub document: String,
    pub totals: Totals,
}

/// Colors apply to the terminal report only and honor `NO_COLOR`.
pub fn use_colors(mode: OutputMode) -> bool {
    mode == OutputMode::Stdout && std::env::var_os("NO_COLOR").is_none()
}

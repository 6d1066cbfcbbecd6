//! Picks the renderer for the configured output mode and emits the
//! document to exactly one destination.

use super::json::render_json;
use super::junit::render_junit;
use super::stdout::{render_stdout, StdoutOptions};
use super::{use_colors, Rendered};
use crate::aggregate::{aggregate, Totals};
use crate::error::{ConfigError, RenderError};
use crate::models::Report;
use crate::size::format_size;
use crate::utils::peak_memory_bytes;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Stdout,
    Json,
    Junit,
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Stdout => "stdout",
            OutputMode::Json => "json",
            OutputMode::Junit => "junit",
        }
    }

    /// Machine-readable modes keep stdout clean for the document.
    pub fn is_machine_readable(self) -> bool {
        self != OutputMode::Stdout
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(OutputMode::Stdout),
            "json" => Ok(OutputMode::Json),
            "junit" => Ok(OutputMode::Junit),
            other => Err(ConfigError::InvalidOutput(other.to_string())),
        }
    }
}

/// Validated rendering settings.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub mode: OutputMode,
    /// Destination file; `None` writes to stdout.
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
    pub color: bool,
    /// Interpreter version the user runs, for the stdout version note.
    pub current_version: Option<String>,
    pub path_width: usize,
}

impl RenderContext {
    /// Build a context, rejecting a destination file for the terminal report.
    pub fn new(
        mode: OutputMode,
        output_file: Option<PathBuf>,
        verbose: bool,
    ) -> Result<Self, ConfigError> {
        if mode == OutputMode::Stdout && output_file.is_some() {
            return Err(ConfigError::OutputFileNotAllowed);
        }
        Ok(RenderContext {
            mode,
            output_file,
            verbose,
            color: use_colors(mode),
            current_version: None,
            path_width: crate::config::DEFAULT_PATH_WIDTH,
        })
    }

    pub fn with_current_version(mut self, version: Option<String>) -> Self {
        self.current_version = version;
        self
    }

    pub fn with_path_width(mut self, width: usize) -> Self {
        self.path_width = width;
        self
    }
}

/// Aggregate `reports`, render them in the configured mode and write the
/// document once, to the output file or to `out`.
///
/// The verbose summary of machine-readable modes goes to `err`. Returns
/// the totals so the caller can derive the exit status.
pub fn dispatch<W: Write, E: Write>(
    ctx: &RenderContext,
    reports: &[Report],
    scanned_files: &[String],
    out: &mut W,
    err: &mut E,
) -> Result<Totals, RenderError> {
    dispatch_with(ctx, reports, scanned_files, out, err, peak_memory_bytes)
}

/// `dispatch` with the peak memory probe supplied by the caller. The probe
/// runs after the document has been emitted.
fn dispatch_with<W: Write, E: Write>(
    ctx: &RenderContext,
    reports: &[Report],
    scanned_files: &[String],
    out: &mut W,
    err: &mut E,
    peak_memory: impl FnOnce() -> Option<u64>,
) -> Result<Totals, RenderError> {
    let agg = aggregate(reports, scanned_files);
    tracing::debug!(
        mode = %ctx.mode,
        reports = reports.len(),
        issues = agg.totals.total_issues,
        "rendering analysis result"
    );

    let Rendered { document, totals } = match ctx.mode {
        OutputMode::Stdout => render_stdout(
            &agg,
            &StdoutOptions {
                current_version: ctx.current_version.as_deref(),
                path_width: ctx.path_width,
                color: ctx.color,
            },
        ),
        OutputMode::Json => render_json(&agg)?,
        OutputMode::Junit => render_junit(&agg),
    };
    emit(ctx, &document, out)?;
    if !ctx.verbose {
        return Ok(totals);
    }

    let mut summary = String::new();
    if ctx.mode.is_machine_readable() {
        summary.push_str(&problems_line(totals.total_issues));
        summary.push('\n');
    }
    if let Some(line) = memory_line(peak_memory())? {
        summary.push_str(&line);
        summary.push('\n');
    }
    let sink: &mut dyn Write = if ctx.mode.is_machine_readable() { err } else { out };
    sink.write_all(summary.as_bytes())
        .and_then(|_| sink.flush())
        .map_err(RenderError::Stdout)?;
    Ok(totals)
}

fn emit<W: Write>(ctx: &RenderContext, document: &str, out: &mut W) -> Result<(), RenderError> {
    match &ctx.output_file {
        Some(path) => {
            fs::write(path, document).map_err(|source| RenderError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), bytes = document.len(), "report written");
        }
        None => {
            out.write_all(document.as_bytes())
                .and_then(|_| out.flush())
                .map_err(RenderError::Stdout)?;
        }
    }
    Ok(())
}

fn problems_line(total: usize) -> String {
    if total > 0 {
        format!("Total problems: {total}")
    } else {
        "Analyzer has not detected any problems in your code.".to_string()
    }
}

fn memory_line(peak: Option<u64>) -> Result<Option<String>, RenderError> {
    let Some(bytes) = peak else {
        return Ok(None);
    };
    let bytes = i64::try_from(bytes).unwrap_or(i64::MAX);
    let size = format_size("%.3F U", bytes, "mb")?;
    Ok(Some(format!("Peak memory usage: {size}")))
}

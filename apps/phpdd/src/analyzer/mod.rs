//! Hand-off to the analysis engine.
//!
//! The engine is an external collaborator; this module only defines the
//! surface the command needs from it and how scan targets are routed.
//! `RecordedAnalyzer` replays a stored analysis result through the same
//! surface.

mod recorded;

pub use recorded::RecordedAnalyzer;

use crate::config::ScanSettings;
use crate::models::Report;
use std::path::{Path, PathBuf};

/// An analysis engine that turns source files into reports.
pub trait Analyzer {
    /// Apply scan settings before any target is checked.
    fn configure(&mut self, settings: &ScanSettings);

    /// Analyze one file, adding findings to `report`.
    fn check_file(&mut self, path: &Path, report: Report) -> Report;

    /// Analyze a directory tree into a fresh report.
    fn check_dir(&mut self, path: &Path) -> Report;

    /// Every file inspected so far, issues or not.
    fn scanned_files(&self) -> Vec<String>;
}

/// Run `analyzer` over each target, in order.
///
/// Directories are checked as a whole. A single file gets its own report
/// titled `File <name>` rooted at its parent directory. Targets that do
/// not exist are skipped.
pub fn scan_targets<A: Analyzer + ?Sized>(analyzer: &mut A, targets: &[PathBuf]) -> Vec<Report> {
    let mut reports = Vec::with_capacity(targets.len());
    for target in targets {
        let Ok(canonical) = target.canonicalize() else {
            tracing::warn!(target = %target.display(), "scan target does not exist, skipping");
            continue;
        };
        if canonical.is_dir() {
            tracing::debug!(dir = %canonical.display(), "checking directory");
            reports.push(analyzer.check_dir(&canonical));
        } else if canonical.is_file() {
            let name = canonical
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let base = canonical
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::debug!(file = %canonical.display(), "checking file");
            let report = Report::new(format!("File {name}"), base);
            reports.push(analyzer.check_file(&canonical, report));
        }
    }
    reports
}

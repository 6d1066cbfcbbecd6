//! Replay of a stored `AnalysisResult`.
//!
//! Scan settings are applied on replay the way a live engine applies them
//! while scanning:
//! - only versions inside `after..=target` are reported
//! - files whose path contains an excluded name, or whose extension is not
//!   listed, are left out of directory scans
//! - issues whose check text contains a skipped value are dropped
//! - files on disk larger than `max_size` are skipped with a warning

use super::Analyzer;
use crate::config::ScanSettings;
use crate::models::input::AnalysisResult;
use crate::models::{InfoKind, Issue, Report};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub struct RecordedAnalyzer {
    result: AnalysisResult,
    settings: ScanSettings,
    scanned: Vec<String>,
}

impl RecordedAnalyzer {
    pub fn new(result: AnalysisResult) -> Self {
        RecordedAnalyzer {
            result,
            settings: ScanSettings::default(),
            scanned: Vec::new(),
        }
    }

    /// Every recorded report, in order, with the scan settings applied.
    pub fn replay_all(&mut self) -> Vec<Report> {
        let mut reports = Vec::with_capacity(self.result.reports.len());
        for recorded in &self.result.reports {
            let mut report = Report::new(recorded.title.as_str(), recorded.base_path.as_str());
            report.info = recorded.info.clone();
            let mut warned = HashSet::new();
            for (version, issues) in &recorded.issues {
                for issue in issues {
                    if !self.file_allowed(&issue.path) {
                        continue;
                    }
                    if self.oversized(&issue.path) {
                        warn_oversized(&mut report, &mut warned, &issue.path);
                        continue;
                    }
                    if self.keeps(version, issue) {
                        report.add_issue(version.as_str(), issue.clone());
                    }
                }
            }
            reports.push(report);
        }
        self.scanned = self
            .result
            .scanned_files
            .iter()
            .filter(|p| self.file_allowed(p) && !self.oversized(p))
            .cloned()
            .collect();
        tracing::debug!(reports = reports.len(), scanned = self.scanned.len(), "replayed analysis result");
        reports
    }

    fn keeps(&self, version: &str, issue: &Issue) -> bool {
        in_window(version, &self.settings.after, &self.settings.target)
            && !is_skipped(&issue.text, &self.settings.skip_checks)
    }

    fn file_allowed(&self, path: &str) -> bool {
        !is_excluded(path, &self.settings.exclude)
            && has_extension(path, &self.settings.file_extensions)
    }

    fn oversized(&self, path: &str) -> bool {
        fs::metadata(path)
            .map(|m| m.is_file() && m.len() > self.settings.max_size)
            .unwrap_or(false)
    }

    /// Recorded issues matching `select`, rebased with `file_name`.
    fn collect_into(
        &self,
        report: &mut Report,
        select: impl Fn(&Path) -> bool,
        file_name: impl Fn(&Path) -> String,
    ) {
        let mut warned = HashSet::new();
        for recorded in &self.result.reports {
            for (version, issues) in &recorded.issues {
                for issue in issues {
                    let path = Path::new(&issue.path);
                    if !select(path) {
                        continue;
                    }
                    if self.oversized(&issue.path) {
                        warn_oversized(report, &mut warned, &issue.path);
                        continue;
                    }
                    if self.keeps(version, issue) {
                        let mut rebased = issue.clone();
                        rebased.file = file_name(path);
                        report.add_issue(version.as_str(), rebased);
                    }
                }
            }
        }
    }
}

impl Analyzer for RecordedAnalyzer {
    fn configure(&mut self, settings: &ScanSettings) {
        self.settings = settings.clone();
    }

    fn check_file(&mut self, path: &Path, mut report: Report) -> Report {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.collect_into(&mut report, |p| p == path, |_| name.clone());
        self.scanned.push(path.to_string_lossy().into_owned());
        report
    }

    fn check_dir(&mut self, path: &Path) -> Report {
        let dir = path.to_string_lossy().into_owned();
        let mut report = Report::new(dir.as_str(), dir.as_str());
        for recorded in &self.result.reports {
            if Path::new(&recorded.base_path).starts_with(path) {
                report.info.extend(recorded.info.iter().cloned());
            }
        }
        let relative = |p: &Path| {
            p.strip_prefix(path)
                .unwrap_or(p)
                .to_string_lossy()
                .into_owned()
        };
        self.collect_into(
            &mut report,
            |p| p.starts_with(path) && self.file_allowed(&relative(p)),
            relative,
        );
        let scanned: Vec<String> = self
            .result
            .scanned_files
            .iter()
            .filter(|f| {
                let p = Path::new(f.as_str());
                p.starts_with(path) && self.file_allowed(&relative(p)) && !self.oversized(f)
            })
            .cloned()
            .collect();
        self.scanned.extend(scanned);
        report
    }

    fn scanned_files(&self) -> Vec<String> {
        self.scanned.clone()
    }
}

fn warn_oversized(report: &mut Report, warned: &mut HashSet<String>, path: &str) {
    if warned.insert(path.to_string()) {
        report.add_info(
            InfoKind::Warning,
            format!("Skipping file {path} due to file size limit."),
        );
    }
}

/// `major.minor` as a comparable pair.
fn version_key(version: &str) -> Option<(u32, u32)> {
    let (major, minor) = version.split_once('.')?;
    Some((major.trim().parse().ok()?, minor.trim().parse().ok()?))
}

/// Whether `version` lies in `after..=target`. Versions that do not parse
/// are kept.
fn in_window(version: &str, after: &str, target: &str) -> bool {
    match (version_key(version), version_key(after), version_key(target)) {
        (Some(v), Some(a), Some(t)) => a <= v && v <= t,
        _ => true,
    }
}

fn is_excluded(path: &str, exclude: &[String]) -> bool {
    let padded = format!("/{}/", path.replace('\\', "/").to_lowercase());
    exclude
        .iter()
        .filter(|e| !e.is_empty())
        .any(|e| padded.contains(&format!("/{e}/")))
}

fn has_extension(path: &str, extensions: &[String]) -> bool {
    Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| extensions.contains(&e))
}

fn is_skipped(text: &str, skip_checks: &[String]) -> bool {
    let text = text.to_lowercase();
    skip_checks
        .iter()
        .filter(|s| !s.is_empty())
        .any(|s| text.contains(s.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::fixtures::issue;
    use crate::analyzer::scan_targets;
    use crate::models::{Category, IssueType};

    fn recorded(base: &str) -> AnalysisResult {
        let mut r = Report::new("dir", base);
        r.add_info(InfoKind::Info, "recorded");
        r.add_issue("5.5", issue(&format!("{base}/lib/old.php"), 1, 1, IssueType::Function, Category::Removed, "mysql_query"));
        r.add_issue("7.0", issue(&format!("{base}/lib/old.php"), 2, 1, IssueType::Function, Category::Removed, "ereg"));
        r.add_issue("7.2", issue(&format!("{base}/vendor/pkg/x.php"), 3, 1, IssueType::Function, Category::Removed, "each"));
        r.add_issue("8.0", issue(&format!("{base}/tpl/page.phtml"), 4, 1, IssueType::Ini, Category::Removed, "track_errors"));
        r.add_issue("8.0", issue(&format!("{base}/lib/data.inc"), 5, 1, IssueType::Constant, Category::Removed, "X"));
        AnalysisResult {
            reports: vec![r],
            scanned_files: vec![
                format!("{base}/lib/old.php"),
                format!("{base}/lib/clean.php"),
                format!("{base}/vendor/pkg/x.php"),
            ],
        }
    }

    fn texts(report: &Report) -> Vec<String> {
        let mut out: Vec<String> = report.issues.values().flatten().map(|i| i.text.clone()).collect();
        out.sort();
        out
    }

    #[test]
    fn test_replay_with_defaults_keeps_listed_extensions() {
        let mut an = RecordedAnalyzer::new(recorded("/src"));
        an.configure(&ScanSettings::default());
        let reports = an.replay_all();
        assert_eq!(texts(&reports[0]), vec!["each", "ereg", "mysql_query", "track_errors"]);
        assert_eq!(reports[0].info.len(), 1);
        assert_eq!(an.scanned_files().len(), 3);
    }

    #[test]
    fn test_version_window_and_skipped_checks() {
        let mut an = RecordedAnalyzer::new(recorded("/src"));
        an.configure(&ScanSettings {
            after: "7.0".into(),
            target: "7.4".into(),
            skip_checks: vec!["ereg".into()],
            ..ScanSettings::default()
        });
        let reports = an.replay_all();
        assert_eq!(texts(&reports[0]), vec!["each"]);
    }

    #[test]
    fn test_exclude_and_extensions() {
        let mut an = RecordedAnalyzer::new(recorded("/src"));
        an.configure(&ScanSettings {
            exclude: vec!["vendor".into()],
            file_extensions: vec!["php".into(), "inc".into()],
            ..ScanSettings::default()
        });
        let reports = an.replay_all();
        assert_eq!(texts(&reports[0]), vec!["X", "ereg", "mysql_query"]);
        assert_eq!(
            an.scanned_files(),
            vec!["/src/lib/old.php".to_string(), "/src/lib/clean.php".to_string()]
        );
    }

    #[test]
    fn test_oversized_files_are_skipped_with_warning() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path().canonicalize().unwrap();
        let base = root.to_string_lossy().into_owned();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(root.join("lib/old.php"), vec![b'x'; 2048]).unwrap();

        let mut an = RecordedAnalyzer::new(recorded(&base));
        an.configure(&ScanSettings {
            max_size: 1024,
            ..ScanSettings::default()
        });
        let reports = an.replay_all();
        assert_eq!(texts(&reports[0]), vec!["each", "track_errors"]);
        let warning = format!("Skipping file {base}/lib/old.php due to file size limit.");
        assert_eq!(
            reports[0].info.iter().filter(|m| m.message == warning).count(),
            1
        );
        assert_eq!(reports[0].info.last().unwrap().kind, InfoKind::Warning);
    }

    #[test]
    fn test_scan_targets_rebases_issue_files() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path().canonicalize().unwrap();
        let base = root.to_string_lossy().into_owned();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(root.join("lib/old.php"), "<?php\n").unwrap();

        let mut an = RecordedAnalyzer::new(recorded(&base));
        an.configure(&ScanSettings {
            exclude: vec!["vendor".into()],
            ..ScanSettings::default()
        });
        let reports = scan_targets(&mut an, &[root.join("lib/old.php"), root.clone()]);

        assert_eq!(reports[0].title, "File old.php");
        assert_eq!(texts(&reports[0]), vec!["ereg", "mysql_query"]);
        assert!(reports[0].issues.values().flatten().all(|i| i.file == "old.php"));

        assert_eq!(reports[1].base_path, base);
        assert_eq!(texts(&reports[1]), vec!["ereg", "mysql_query", "track_errors"]);
        let files: HashSet<&str> = reports[1].issues.values().flatten().map(|i| i.file.as_str()).collect();
        assert!(files.contains("lib/old.php") && files.contains("tpl/page.phtml"));
        assert_eq!(reports[1].info.len(), 1);

        let scanned = an.scanned_files();
        assert_eq!(scanned[0], format!("{base}/lib/old.php"));
        assert!(!scanned.iter().any(|f| f.contains("vendor")));
    }

    #[test]
    fn test_in_window() {
        assert!(in_window("7.0", "5.3", "8.0"));
        assert!(in_window("5.3", "5.3", "8.0"));
        assert!(!in_window("8.1", "5.3", "8.0"));
        assert!(!in_window("7.1", "7.2", "8.0"));
        assert!(in_window("7.10", "7.2", "8.0"));
        assert!(in_window("next", "5.3", "8.0"));
    }

    #[test]
    fn test_is_excluded_matches_whole_segments() {
        let ex = vec!["vendor".to_string(), "app/cache".to_string()];
        assert!(is_excluded("/src/vendor/a.php", &ex));
        assert!(is_excluded("vendor/a.php", &ex));
        assert!(is_excluded("C:\\App\\Cache\\x.php", &ex));
        assert!(!is_excluded("/src/vendors/a.php", &ex));
    }
}

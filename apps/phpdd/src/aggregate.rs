//! Normalization pass shared by every printer.
//!
//! All ordering and wording decisions that more than one output format
//! depends on are made here exactly once: version bucket order, the `()`
//! suffix for removed functions, and the note/replacement split for
//! suggestions. Printers only serialize the resulting view.

use crate::models::{Category, Issue, Report};
use std::collections::HashSet;

/// Suffix marking a callable in problem and replacement labels.
const CALLABLE_SUFFIX: &str = "()";

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the analyzer proposes for an issue, if anything.
pub enum Suggestion<'a> {
    /// Behaviour changed; the replacement text is an explanatory note.
    Note(&'a str),
    /// Use this instead; carries the callable suffix where applicable.
    Replacement(String),
}

#[derive(Debug, Clone)]
pub struct IssueView<'a> {
    pub version: &'a str,
    pub issue: &'a Issue,
    /// Report base path joined with the issue file.
    pub path: String,
    /// Issue text with the callable suffix applied.
    pub problem: String,
    pub suggestion: Option<Suggestion<'a>>,
}

impl<'a> IssueView<'a> {
    fn new(report: &'a Report, version: &'a str, issue: &'a Issue) -> Self {
        let callable = issue.kind.is_callable();
        let suggestion = issue.replacement().map(|r| match issue.category {
            Category::Changed => Suggestion::Note(r),
            _ => Suggestion::Replacement(with_suffix(r, callable)),
        });
        IssueView {
            version,
            issue,
            path: report.issue_path(&issue.file),
            problem: with_suffix(&issue.text, callable),
            suggestion,
        }
    }

    /// One-line summary: `Problem: x(); Replacement: y()`, `Problem: x; Note: n`,
    /// or the bare category when there is no suggestion.
    pub fn summary(&self) -> String {
        match &self.suggestion {
            Some(Suggestion::Note(note)) => format!("Problem: {}; Note: {}", self.problem, note),
            Some(Suggestion::Replacement(r)) => {
                format!("Problem: {}; Replacement: {}", self.problem, r)
            }
            None => self.issue.category.to_string(),
        }
    }
}

fn with_suffix(s: &str, callable: bool) -> String {
    if callable {
        format!("{s}{CALLABLE_SUFFIX}")
    } else {
        s.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct VersionBucket<'a> {
    pub version: &'a str,
    pub issues: Vec<IssueView<'a>>,
}

#[derive(Debug, Clone)]
pub struct ReportView<'a> {
    pub report: &'a Report,
    pub buckets: Vec<VersionBucket<'a>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Scanned files split by whether any issue points at them.
pub struct FilePartition {
    /// Distinct issue paths, first-seen order.
    pub failing: Vec<String>,
    /// Scanned files without issues, deduplicated, first-seen order.
    pub clean: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Counters every printer reports back to the caller.
pub struct Totals {
    pub total_issues: usize,
    pub has_issue: bool,
}

#[derive(Debug, Clone)]
pub struct Aggregate<'a> {
    pub reports: Vec<ReportView<'a>>,
    pub totals: Totals,
    pub files: FilePartition,
}

impl<'a> Aggregate<'a> {
    /// All issues in report order, then version order.
    pub fn issues(&self) -> impl Iterator<Item = &IssueView<'a>> {
        self.reports
            .iter()
            .flat_map(|r| r.buckets.iter())
            .flat_map(|b| b.issues.iter())
    }
}

/// Version keys of a report in plain string order (`"7.10" < "7.4"`).
pub fn sorted_versions(report: &Report) -> Vec<&str> {
    let mut versions: Vec<&str> = report.issues.keys().map(String::as_str).collect();
    versions.sort_unstable();
    versions
}

/// Build the normalized view over `reports`; `scanned_files` feeds the
/// pass/fail partition.
pub fn aggregate<'a>(reports: &'a [Report], scanned_files: &[String]) -> Aggregate<'a> {
    let views: Vec<ReportView<'a>> = reports
        .iter()
        .map(|report| ReportView {
            report,
            buckets: sorted_versions(report)
                .into_iter()
                .map(|version| VersionBucket {
                    version,
                    issues: report.issues[version]
                        .iter()
                        .map(|issue| IssueView::new(report, version, issue))
                        .collect(),
                })
                .collect(),
        })
        .collect();

    let total_issues = views
        .iter()
        .flat_map(|r| r.buckets.iter())
        .map(|b| b.issues.len())
        .sum();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut failing = Vec::new();
    for view in &views {
        for issue in view.buckets.iter().flat_map(|b| b.issues.iter()) {
            if seen.insert(issue.issue.path.as_str()) {
                failing.push(issue.issue.path.clone());
            }
        }
    }
    let mut clean = Vec::new();
    for path in scanned_files {
        if seen.insert(path.as_str()) {
            clean.push(path.clone());
        }
    }

    Aggregate {
        reports: views,
        totals: Totals {
            total_issues,
            has_issue: total_issues > 0,
        },
        files: FilePartition { failing, clean },
    }
}

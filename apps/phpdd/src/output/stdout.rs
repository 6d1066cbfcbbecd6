//! Human-readable terminal report.

use super::style::{category_style, info_style, paint, type_style, Style};
use super::table::{Cell, Line, Table};
use super::Rendered;
use crate::aggregate::{Aggregate, IssueView, Suggestion};
use crate::models::{Category, IssueType};
use crate::path::truncate_path;

const HEADERS: [&str; 3] = ["File (Line:Column)", "Type", "Issue"];

pub struct StdoutOptions<'a> {
    /// Version of the interpreter the user runs, if known (e.g. `"8.1"`).
    pub current_version: Option<&'a str>,
    /// Width the file column is shortened to.
    pub path_width: usize,
    pub color: bool,
}

/// Compose the terminal report: one section per report, one table per
/// version bucket, then the total banner.
pub fn render_stdout(agg: &Aggregate, opts: &StdoutOptions) -> Rendered {
    let color = opts.color;
    let mut out = String::new();

    for view in &agg.reports {
        out.push('\n');
        out.push_str(&paint(&view.report.title, Style::Title, color));
        out.push('\n');
        for msg in &view.report.info {
            out.push_str(&paint(&msg.message, info_style(msg.kind), color));
            out.push('\n');
        }

        for bucket in &view.buckets {
            let mut header = format!("- PHP {} ({})", bucket.version, bucket.issues.len());
            if opts
                .current_version
                .is_some_and(|current| current >= bucket.version)
            {
                header.push_str(" - your version is greater or equal");
            }
            out.push_str(&paint(&header, Style::VersionHeader, color));
            out.push('\n');

            let mut table = Table::new(&HEADERS);
            for issue in &bucket.issues {
                table.add_row(issue_row(issue, opts.path_width));
            }
            if !table.is_empty() {
                out.push_str(&table.render(color));
            }
            out.push('\n');
        }
    }

    out.push('\n');
    let total = agg.totals.total_issues;
    if total > 0 {
        out.push_str(&paint(&format!("Total issues: {total}"), Style::Failure, color));
    } else {
        out.push_str(&paint(
            "Analyzer has not detected any issues in your code.",
            Style::Success,
            color,
        ));
    }
    out.push('\n');

    Rendered {
        document: out,
        totals: agg.totals,
    }
}

fn issue_row(view: &IssueView, path_width: usize) -> Vec<Cell> {
    let issue = view.issue;
    let location = Line::new()
        .styled(truncate_path(&issue.file, path_width), Style::FileName)
        .text(format!(" ({}:{})", issue.line, issue.column));

    let verdict = if issue.kind == IssueType::Identifier
        || issue.category == Category::ReservedIdentifier
    {
        "reserved by PHP core".to_string()
    } else {
        issue.category.to_string()
    };
    let message = Line::new()
        .styled(issue.kind.label(), type_style(issue.kind))
        .text(" ")
        .styled(view.problem.as_str(), category_style(&issue.category))
        .text(format!(" is {verdict}."));

    let mut cell = Cell::new(message);
    match &view.suggestion {
        Some(Suggestion::Note(note)) => {
            cell = cell.with_line(Line::new().styled(*note, Style::Note));
        }
        Some(Suggestion::Replacement(r)) => {
            cell = cell.with_line(
                Line::new()
                    .text("Consider replacing with ")
                    .styled(r.as_str(), Style::Suggestion),
            );
        }
        None => {}
    }

    vec![
        Cell::new(location),
        issue.category.as_str().into(),
        cell,
    ]
}

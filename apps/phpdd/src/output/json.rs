//! Machine-readable JSON report.
//!
//! Shape (keys in this order, pretty-printed):
//! - `info_messages`: `{type, message}`, omitted when empty
//! - `problems`: `{version, file, path, line, column, category, type, checker}`
//! - `replace_suggestions`: `{type, problem, replacement}`, omitted when empty
//! - `notes`: `{type, problem, note}` for changed behaviour, omitted when empty

use super::Rendered;
use crate::aggregate::{Aggregate, Suggestion};
use crate::models::{Category, IssueType};
use serde::Serialize;
use serde_json::Value as JsonVal;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    info_messages: Vec<InfoEntry<'a>>,
    problems: Vec<Problem<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    replace_suggestions: Vec<ReplaceSuggestion<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notes: Vec<Note<'a>>,
}

#[derive(Serialize)]
struct InfoEntry<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    message: &'a str,
}

#[derive(Serialize)]
struct Problem<'a> {
    version: &'a str,
    file: &'a str,
    path: &'a str,
    line: u32,
    column: u32,
    category: &'a Category,
    #[serde(rename = "type")]
    kind: IssueType,
    checker: &'a str,
}

#[derive(Serialize)]
struct ReplaceSuggestion<'a> {
    #[serde(rename = "type")]
    kind: IssueType,
    problem: &'a str,
    replacement: &'a str,
}

#[derive(Serialize)]
struct Note<'a> {
    #[serde(rename = "type")]
    kind: IssueType,
    problem: &'a str,
    note: &'a str,
}

fn build<'a>(agg: &'a Aggregate<'a>) -> JsonReport<'a> {
    let mut out = JsonReport {
        info_messages: Vec::new(),
        problems: Vec::new(),
        replace_suggestions: Vec::new(),
        notes: Vec::new(),
    };
    for view in &agg.reports {
        out.info_messages
            .extend(view.report.info.iter().map(|m| InfoEntry {
                kind: m.kind.as_str(),
                message: &m.message,
            }));
        for issue in view.buckets.iter().flat_map(|b| b.issues.iter()) {
            let is = issue.issue;
            out.problems.push(Problem {
                version: issue.version,
                file: &is.file,
                path: &issue.path,
                line: is.line,
                column: is.column,
                category: &is.category,
                kind: is.kind,
                checker: &is.text,
            });
            match &issue.suggestion {
                Some(Suggestion::Note(note)) => out.notes.push(Note {
                    kind: is.kind,
                    problem: &issue.problem,
                    note: *note,
                }),
                Some(Suggestion::Replacement(r)) => out.replace_suggestions.push(ReplaceSuggestion {
                    kind: is.kind,
                    problem: &issue.problem,
                    replacement: r,
                }),
                None => {}
            }
        }
    }
    out
}

/// Compose the JSON report as a value (pure) for testing purposes.
pub fn compose_json(agg: &Aggregate) -> Result<JsonVal, serde_json::Error> {
    serde_json::to_value(build(agg))
}

/// Render the pretty-printed JSON document, newline-terminated.
pub fn render_json(agg: &Aggregate) -> Result<Rendered, serde_json::Error> {
    let mut document = serde_json::to_string_pretty(&build(agg))?;
    document.push('\n');
    Ok(Rendered {
        document,
        totals: agg.totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::aggregate::fixtures::*;
    use crate::models::{InfoKind, Report};

    #[test]
    fn test_removed_function_without_replacement() {
        let reports = vec![create_function_report()];
        let agg = aggregate(&reports, &[]);
        let out = compose_json(&agg).unwrap();
        assert_eq!(out["problems"][0]["checker"], "create_function");
        assert_eq!(out["problems"][0]["category"], "REMOVED");
        assert_eq!(out["problems"][0]["type"], "function");
        assert_eq!(out["problems"][0]["path"], "/src/a.php");
        assert_eq!(out["problems"][0]["version"], "7.2");
        assert!(out.get("replace_suggestions").is_none());
        assert!(out.get("notes").is_none());
        assert!(out.get("info_messages").is_none());
    }

    #[test]
    fn test_empty_input_keeps_problems_array() {
        let agg = aggregate(&[], &[]);
        let out = render_json(&agg).unwrap();
        assert_eq!(out.document, "{\n  \"problems\": []\n}\n");
        assert_eq!(out.totals.total_issues, 0);
        assert!(!out.totals.has_issue);
    }

    #[test]
    fn test_notes_and_replacements_are_split_by_category() {
        let mut r = Report::new("File a.php", "/src/");
        r.add_info(InfoKind::Info, "Scanning /src");
        r.add_issue("7.0", with_replacement(issue("/src/a.php", 1, 1, IssueType::Function, Category::Removed, "split"), "explode"));
        r.add_issue("7.1", with_replacement(issue("/src/a.php", 2, 1, IssueType::Function, Category::Changed, "rand"), "alias of mt_rand"));
        r.add_issue("7.2", with_replacement(issue("/src/a.php", 3, 1, IssueType::Ini, Category::Removed, "safe_mode"), "open_basedir"));
        let reports = vec![r];
        let out = compose_json(&aggregate(&reports, &[])).unwrap();

        assert_eq!(out["info_messages"][0]["type"], "info");
        assert_eq!(out["info_messages"][0]["message"], "Scanning /src");
        assert_eq!(out["replace_suggestions"][0]["problem"], "split()");
        assert_eq!(out["replace_suggestions"][0]["replacement"], "explode()");
        assert_eq!(out["replace_suggestions"][1]["problem"], "safe_mode");
        assert_eq!(out["replace_suggestions"][1]["replacement"], "open_basedir");
        assert_eq!(out["notes"][0]["problem"], "rand()");
        assert_eq!(out["notes"][0]["note"], "alias of mt_rand");
        assert_eq!(out["problems"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_reserved_identifier_category_is_serialized() {
        let mut r = Report::new("File a.php", "/src");
        r.add_issue("7.0", issue("/src/a.php", 1, 1, IssueType::Identifier, Category::ReservedIdentifier, "object"));
        let reports = vec![r];
        let out = compose_json(&aggregate(&reports, &[])).unwrap();
        assert_eq!(out["problems"][0]["category"], "RESERVED_IDENTIFIER");
    }

    #[test]
    fn test_key_order_is_stable() {
        let reports = vec![create_function_report()];
        let out = compose_json(&aggregate(&reports, &[])).unwrap();
        let keys: Vec<&str> = out["problems"][0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec!["version", "file", "path", "line", "column", "category", "type", "checker"]
        );
    }
}

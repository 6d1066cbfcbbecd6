//! JUnit XML report for CI systems.
//!
//! Every `(file, version)` pair with issues becomes a failing test suite;
//! every scanned file without issues becomes a suite with one passing test
//! case, so each scanned file shows up exactly once.

use super::Rendered;
use crate::aggregate::{Aggregate, IssueView};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Tool name reported on the root element.
pub const TOOL_NAME: &str = "PhpDeprecationDetector";

struct Suite<'v, 'a> {
    name: String,
    failures: Vec<&'v IssueView<'a>>,
}

/// Render the JUnit document, newline-terminated.
pub fn render_junit(agg: &Aggregate) -> Rendered {
    let mut suites: Vec<Suite> = Vec::new();
    let mut by_key: HashMap<(&str, &str), usize> = HashMap::new();
    for issue in agg.issues() {
        let key = (issue.issue.path.as_str(), issue.version);
        let idx = *by_key.entry(key).or_insert_with(|| {
            suites.push(Suite {
                name: format!("{} (PHP {})", issue.issue.path, issue.version),
                failures: Vec::new(),
            });
            suites.len() - 1
        });
        suites[idx].failures.push(issue);
    }
    for path in &agg.files.clean {
        suites.push(Suite {
            name: path.clone(),
            failures: Vec::new(),
        });
    }

    let failures = agg.totals.total_issues;
    let tests = failures + agg.files.clean.len();

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        xml,
        "<testsuites name=\"{} {}\" errors=\"0\" tests=\"{}\" failures=\"{}\">",
        TOOL_NAME,
        env!("CARGO_PKG_VERSION"),
        tests,
        failures
    );
    for suite in &mut suites {
        write_suite(&mut xml, suite);
    }
    xml.push_str("</testsuites>\n");

    Rendered {
        document: xml,
        totals: agg.totals,
    }
}

fn write_suite(xml: &mut String, suite: &mut Suite) {
    let count = suite.failures.len();
    let _ = writeln!(
        xml,
        "  <testsuite name=\"{}\" errors=\"0\" tests=\"{}\" failures=\"{}\">",
        escape_xml(&suite.name),
        count.max(1),
        count
    );
    if count == 0 {
        let _ = writeln!(xml, "    <testcase name=\"{}\"/>", escape_xml(&suite.name));
    } else {
        suite
            .failures
            .sort_by_key(|f| (f.issue.line, f.issue.column));
        for failure in &suite.failures {
            let is = failure.issue;
            let name = format!("{} at {} ({}:{})", is.text, is.path, is.line, is.column);
            let _ = writeln!(xml, "    <testcase name=\"{}\">", escape_xml(&name));
            let _ = writeln!(
                xml,
                "      <failure type=\"{}\" message=\"{}\"/>",
                is.kind,
                escape_xml(&failure.summary())
            );
            xml.push_str("    </testcase>\n");
        }
    }
    xml.push_str("  </testsuite>\n");
}

/// Escape XML special characters for attribute values.
///
/// Tab, line feed and carriage return become character references; other
/// control characters are not allowed in XML 1.0 and are dropped.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c if c.is_control() && c < '\u{7f}' => {}
            '\u{fffe}' | '\u{ffff}' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::aggregate::fixtures::*;
    use crate::models::{Category, IssueType, Report};

    #[test]
    fn test_single_failure_uses_bare_category() {
        let reports = vec![create_function_report()];
        let out = render_junit(&aggregate(&reports, &["/src/a.php".to_string()]));
        let xml = out.document;
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert_eq!(xml.matches("<failure ").count(), 1);
        assert!(xml.contains("<testsuite name=\"/src/a.php (PHP 7.2)\" errors=\"0\" tests=\"1\" failures=\"1\">"));
        assert!(xml.contains("<testcase name=\"create_function at /src/a.php (12:5)\">"));
        assert!(xml.contains("<failure type=\"function\" message=\"REMOVED\"/>"));
        assert!(!xml.contains("Problem: create_function()"));
        assert!(xml.contains("errors=\"0\" tests=\"1\" failures=\"1\">\n  <testsuite"));
        assert_eq!(out.totals.total_issues, 1);
    }

    #[test]
    fn test_failures_sorted_by_line_then_column() {
        let mut r = Report::new("File a.php", "/src");
        r.add_issue("7.0", issue("/src/a.php", 10, 1, IssueType::Function, Category::Removed, "ten"));
        r.add_issue("7.0", issue("/src/a.php", 3, 9, IssueType::Function, Category::Removed, "three_b"));
        r.add_issue("7.0", issue("/src/a.php", 3, 2, IssueType::Function, Category::Removed, "three_a"));
        let reports = vec![r];
        let xml = render_junit(&aggregate(&reports, &[])).document;
        let a = xml.find("three_a at").unwrap();
        let b = xml.find("three_b at").unwrap();
        let ten = xml.find("ten at").unwrap();
        assert!(a < b && b < ten);
        assert!(xml.contains("tests=\"3\" failures=\"3\""));
    }

    #[test]
    fn test_clean_files_become_passing_suites() {
        let reports = vec![create_function_report(), Report::new("File b.php", "/src")];
        let scanned = vec!["/src/a.php".to_string(), "/src/b.php".to_string(), "/src/c.php".to_string()];
        let xml = render_junit(&aggregate(&reports, &scanned)).document;
        assert!(xml.contains(
            "  <testsuite name=\"/src/b.php\" errors=\"0\" tests=\"1\" failures=\"0\">\n    <testcase name=\"/src/b.php\"/>\n  </testsuite>\n"
        ));
        assert!(xml.contains("<testsuite name=\"/src/c.php\""));
        assert!(!xml.contains("<testsuite name=\"/src/a.php\""));
        assert!(xml.contains(&format!(
            "<testsuites name=\"{TOOL_NAME} {}\" errors=\"0\" tests=\"3\" failures=\"1\">",
            env!("CARGO_PKG_VERSION")
        )));
    }

    #[test]
    fn test_groups_by_path_and_version() {
        let mut r = Report::new("dir", "/src");
        r.add_issue("7.0", issue("/src/a.php", 1, 1, IssueType::Ini, Category::Removed, "x"));
        r.add_issue("7.0", issue("/src/b.php", 1, 1, IssueType::Ini, Category::Removed, "y"));
        r.add_issue("7.1", issue("/src/a.php", 2, 1, IssueType::Ini, Category::Removed, "z"));
        let reports = vec![r];
        let xml = render_junit(&aggregate(&reports, &[])).document;
        assert_eq!(xml.matches("<testsuite ").count(), 3);
        assert!(xml.contains("name=\"/src/a.php (PHP 7.0)\""));
        assert!(xml.contains("name=\"/src/a.php (PHP 7.1)\""));
        assert!(xml.contains("name=\"/src/b.php (PHP 7.0)\""));
    }

    #[test]
    fn test_replacement_and_note_messages_are_escaped() {
        let mut r = Report::new("File a.php", "/src");
        r.add_issue("7.0", with_replacement(issue("/src/a.php", 1, 1, IssueType::Function, Category::Removed, "ereg"), "preg_match"));
        r.add_issue("7.1", with_replacement(issue("/src/a.php", 2, 1, IssueType::Variable, Category::Changed, "$this"), "cannot be \"reassigned\" & <re-bound>"));
        let reports = vec![r];
        let xml = render_junit(&aggregate(&reports, &[])).document;
        assert!(xml.contains("message=\"Problem: ereg(); Replacement: preg_match()\""));
        assert!(xml.contains(
            "<failure type=\"variable\" message=\"Problem: $this; Note: cannot be &quot;reassigned&quot; &amp; &lt;re-bound&gt;\"/>"
        ));
    }

    #[test]
    fn test_empty_input_is_well_formed() {
        let out = render_junit(&aggregate(&[], &[]));
        assert!(out
            .document
            .ends_with("errors=\"0\" tests=\"0\" failures=\"0\">\n</testsuites>\n"));
        assert!(!out.totals.has_issue);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a href='x'>"), "&lt;a href=&apos;x&apos;&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
    }

    #[test]
    fn test_control_characters_never_reach_the_document() {
        assert_eq!(escape_xml("a\u{0}b\u{1b}[31mc\u{8}"), "ab[31mc");
        assert_eq!(escape_xml("x\ty\r\nz"), "x&#9;y&#13;&#10;z");

        let mut r = Report::new("File a.php", "/src");
        r.add_issue("7.0", issue("/src/a.php", 1, 1, IssueType::Function, Category::Removed, "evil\u{1}\u{7}name"));
        let reports = vec![r];
        let xml = render_junit(&aggregate(&reports, &[])).document;
        assert!(xml.contains("<testcase name=\"evilname at /src/a.php (1:1)\">"));
        assert!(!xml.chars().any(|c| c.is_control() && c != '\n'));
    }
}

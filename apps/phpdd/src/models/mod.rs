//! Shared data models handed over by the analyzer and read by printers.
//!
//! Reports and issues are plain values: the analyzer builds them once per
//! scan and the rendering pipeline only ever borrows them.

pub mod input;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Kind of construct an issue points at.
pub enum IssueType {
    Function,
    FunctionUsage,
    Variable,
    Ini,
    Identifier,
    Constant,
}

impl IssueType {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Function => "function",
            IssueType::FunctionUsage => "function_usage",
            IssueType::Variable => "variable",
            IssueType::Ini => "ini",
            IssueType::Identifier => "identifier",
            IssueType::Constant => "constant",
        }
    }

    /// Human label: capitalized, underscores as spaces (`Function usage`).
    pub fn label(self) -> String {
        let spaced = self.as_str().replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Removed functions are shown as callables (`name()`).
    pub fn is_callable(self) -> bool {
        matches!(self, IssueType::Function)
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Semantic classification of an issue.
///
/// Known categories parse case-insensitively; anything else is kept
/// verbatim in `Other` and rendered as given.
pub enum Category {
    Removed,
    Changed,
    Violation,
    Deprecated,
    ReservedIdentifier,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Removed => "REMOVED",
            Category::Changed => "CHANGED",
            Category::Violation => "VIOLATION",
            Category::Deprecated => "DEPRECATED",
            Category::ReservedIdentifier => "RESERVED_IDENTIFIER",
            Category::Other(raw) => raw,
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "REMOVED" => Category::Removed,
            "CHANGED" => Category::Changed,
            "VIOLATION" => Category::Violation,
            "DEPRECATED" => Category::Deprecated,
            "RESERVED_IDENTIFIER" => Category::ReservedIdentifier,
            _ => Category::Other(raw),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single finding reported by the analyzer.
pub struct Issue {
    pub file: String,
    pub path: String,
    pub line: u32,
    pub column: u32,
    #[serde(rename = "type")]
    pub kind: IssueType,
    pub category: Category,
    pub text: String,
    #[serde(default)]
    pub replacement: Option<String>,
}

impl Issue {
    /// Suggested replacement, treating an empty string as no suggestion.
    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref().filter(|r| !r.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoKind {
    Info,
    Warning,
}

impl InfoKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InfoKind::Info => "info",
            InfoKind::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Free-form analyzer notice not tied to an issue.
pub struct InfoMessage {
    pub kind: InfoKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Analysis result for one scanned target (a file or a directory).
pub struct Report {
    pub title: String,
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub info: Vec<InfoMessage>,
    /// Issues keyed by the PHP version that introduced them. Unordered.
    #[serde(default)]
    pub issues: HashMap<String, Vec<Issue>>,
}

impl Report {
    pub fn new(title: impl Into<String>, base_path: impl Into<String>) -> Self {
        Report {
            title: title.into(),
            base_path: base_path.into(),
            ..Default::default()
        }
    }

    pub fn add_info(&mut self, kind: InfoKind, message: impl Into<String>) {
        self.info.push(InfoMessage {
            kind,
            message: message.into(),
        });
    }

    pub fn add_issue(&mut self, version: impl Into<String>, issue: Issue) {
        self.issues.entry(version.into()).or_default().push(issue);
    }

    pub fn issue_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// Path shown for an issue file: base path joined with the file name.
    pub fn issue_path(&self, file: &str) -> String {
        if self.base_path.is_empty() {
            file.to_string()
        } else if self.base_path.ends_with('/') || self.base_path.ends_with('\\') {
            format!("{}{}", self.base_path, file)
        } else {
            format!("{}/{}", self.base_path, file)
        }
    }
}

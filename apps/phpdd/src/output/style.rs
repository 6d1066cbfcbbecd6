//! Decoration classes for terminal output.
//!
//! Printers only pick a `Style`; how it looks is decided in `paint`.

use crate::models::{Category, InfoKind, IssueType};
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Title,
    Message,
    Warning,
    VersionHeader,
    FileName,
    Note,
    Suggestion,
    Removed,
    Changed,
    Violation,
    Deprecated,
    Reserved,
    FunctionType,
    VariableType,
    IniType,
    IdentifierType,
    ConstantType,
    Failure,
    Success,
    Info,
}

/// Issue type → decoration of its label. Unlisted types use `FunctionType`.
const TYPE_STYLES: [(IssueType, Style); 6] = [
    (IssueType::Function, Style::FunctionType),
    (IssueType::FunctionUsage, Style::FunctionType),
    (IssueType::Variable, Style::VariableType),
    (IssueType::Ini, Style::IniType),
    (IssueType::Identifier, Style::IdentifierType),
    (IssueType::Constant, Style::ConstantType),
];

pub fn type_style(kind: IssueType) -> Style {
    TYPE_STYLES
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(Style::FunctionType, |(_, s)| *s)
}

pub fn category_style(category: &Category) -> Style {
    match category {
        Category::Removed => Style::Removed,
        Category::Changed => Style::Changed,
        Category::Violation => Style::Violation,
        Category::Deprecated => Style::Deprecated,
        Category::ReservedIdentifier => Style::Reserved,
        Category::Other(_) => Style::Message,
    }
}

pub fn info_style(kind: InfoKind) -> Style {
    match kind {
        InfoKind::Info => Style::Message,
        InfoKind::Warning => Style::Warning,
    }
}

/// Apply `style` to `text` when `color` is enabled.
pub fn paint(text: &str, style: Style, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match style {
        Style::Title => text.white().to_string(),
        Style::Message | Style::VersionHeader | Style::FileName | Style::Note => {
            text.yellow().to_string()
        }
        Style::Warning | Style::Removed => text.red().to_string(),
        Style::Changed | Style::FunctionType => text.yellow().to_string(),
        Style::Violation => text.red().bold().to_string(),
        Style::Deprecated => text.magenta().to_string(),
        Style::Suggestion | Style::Info | Style::IniType => text.green().to_string(),
        Style::VariableType => text.red().to_string(),
        Style::IdentifierType => text.blue().to_string(),
        Style::Reserved => text.blue().bold().to_string(),
        Style::ConstantType => text.bright_black().to_string(),
        Style::Failure => text.white().on_red().to_string(),
        Style::Success => text.white().on_green().to_string(),
    }
}

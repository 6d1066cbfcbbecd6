//! Boxed text tables with multi-line, partially styled cells.
//!
//! Column widths are measured on the plain text so styling never shifts
//! the borders.

use super::style::{paint, Style};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Default)]
/// One line of a cell: a run of optionally styled fragments.
pub struct Line {
    spans: Vec<(String, Option<Style>)>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, s: impl Into<String>) -> Self {
        self.spans.push((s.into(), None));
        self
    }

    pub fn styled(mut self, s: impl Into<String>, style: Style) -> Self {
        self.spans.push((s.into(), Some(style)));
        self
    }

    fn width(&self) -> usize {
        self.spans.iter().map(|(s, _)| s.width()).sum()
    }

    fn render(&self, color: bool) -> String {
        self.spans
            .iter()
            .map(|(s, style)| match style {
                Some(st) => paint(s, *st, color),
                None => s.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cell {
    lines: Vec<Line>,
}

impl Cell {
    pub fn new(first: Line) -> Self {
        Cell { lines: vec![first] }
    }

    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    fn width(&self) -> usize {
        self.lines.iter().map(Line::width).max().unwrap_or(0)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::new(Line::new().text(s))
    }
}

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table; every line ends with `\n`.
    pub fn render(&self, color: bool) -> String {
        let cols = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(cols) {
                widths[i] = widths[i].max(cell.width());
            }
        }

        let border: String = widths
            .iter()
            .map(|w| format!("+{}", "-".repeat(w + 2)))
            .collect::<String>()
            + "+\n";

        let mut out = String::new();
        out.push_str(&border);
        let header_line: Vec<Line> = self.headers.iter().map(|h| Line::new().text(h.as_str())).collect();
        push_row(&mut out, &header_line, &widths, color);
        out.push_str(&border);
        for row in &self.rows {
            let height = row.iter().map(|c| c.lines.len()).max().unwrap_or(1);
            for n in 0..height {
                let lines: Vec<Line> = (0..cols)
                    .map(|i| {
                        row.get(i)
                            .and_then(|c| c.lines.get(n))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect();
                push_row(&mut out, &lines, &widths, color);
            }
        }
        out.push_str(&border);
        out
    }
}

fn push_row(out: &mut String, lines: &[Line], widths: &[usize], color: bool) {
    for (line, w) in lines.iter().zip(widths) {
        let pad = w.saturating_sub(line.width());
        out.push_str("| ");
        out.push_str(&line.render(color));
        out.push_str(&" ".repeat(pad));
        out.push(' ');
    }
    out.push_str("|\n");
}

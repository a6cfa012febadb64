//! Source diagnostics: spans, line/column mapping, caret rendering.

use std::ops::Range;

/// Character span in the original source (inclusive start, exclusive end).
pub type Span = Range<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize, // 1-based
    pub col: usize,  // 1-based
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub start: Location,
    pub end: Location,
}

/// Compute (line, col) from a character offset.
fn locate(src: &str, offset: usize) -> Location {
    let mut line = 1;
    let mut col = 1;
    for (idx, ch) in src.chars().enumerate() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    Location { line, col }
}

/// Render a caret highlight under the offending span (single line, best
/// effort).
pub fn render(src: &str, diag: &Diagnostic) -> String {
    let chars: Vec<char> = src.chars().collect();
    let anchor = diag.span.start.min(chars.len());

    let mut line_start = anchor;
    while line_start > 0 && chars[line_start - 1] != '\n' {
        line_start -= 1;
    }
    let mut line_end = anchor;
    while line_end < chars.len() && chars[line_end] != '\n' {
        line_end += 1;
    }

    let line: String = chars[line_start..line_end].iter().collect();
    let caret_len = diag.span.end.saturating_sub(diag.span.start).max(1);
    let mut underline = " ".repeat(anchor - line_start);
    underline.push_str(&"^".repeat(caret_len));

    format!(
        "error: {}\n--> line {}, col {}\n{}\n{}",
        diag.message, diag.start.line, diag.start.col, line, underline
    )
}

impl Diagnostic {
    /// Construct from a chumsky `Simple` error.
    pub fn from_chumsky(src: &str, e: chumsky::error::Simple<char>) -> Self {
        let span = e.span();
        Diagnostic {
            message: e.to_string(),
            start: locate(src, span.start),
            end: locate(src, span.end),
            span,
        }
    }
}

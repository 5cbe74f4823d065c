//! Source location tracking for error reporting
//!
//! Positions are byte offsets into the single program buffer. Line and
//! column numbers are only computed when a diagnostic is rendered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A byte offset into the program text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}", self.offset)
    }
}

/// A range of bytes in the program text (start offset plus length)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: usize,
    pub len: usize,
}

impl SourceSpan {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last byte of the span
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Location of the first byte, used when reporting errors
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.start)
    }

    /// The slice of `source` this span covers, or `""` if it is out of range
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end()).unwrap_or("")
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// Line-oriented view over the program text.
///
/// Lines and columns are 1-based; columns count characters, not bytes, so
/// the caret lines up under multi-byte input too.
#[derive(Debug, Clone, Copy)]
pub struct SourceText<'a> {
    text: &'a str,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Byte range of the line containing `offset` (without its newline)
    fn line_bounds(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let bytes = self.text.as_bytes();
        let start = bytes[..offset]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |pos| pos + 1);
        let end = bytes[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.text.len(), |pos| offset + pos);
        (start, end)
    }

    /// The full text of the line containing `offset`
    pub fn line_at(&self, offset: usize) -> &'a str {
        let (start, end) = self.line_bounds(offset);
        self.text.get(start..end).unwrap_or("")
    }

    /// 1-based line and column of `offset`
    pub fn line_column(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.text.len());
        let (start, _) = self.line_bounds(offset);
        let line = self.text.as_bytes()[..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count() as u32
            + 1;
        let column = self.text.get(start..offset).map_or(0, |s| s.chars().count()) as u32 + 1;
        (line, column)
    }

    /// Render the offending line with a caret under `offset`:
    ///
    /// ```text
    /// 1 + @
    ///     ^ invalid token
    /// ```
    ///
    /// Tabs before the offset are kept so the caret lines up however the
    /// terminal expands them.
    pub fn caret(&self, offset: usize, message: &str) -> String {
        let offset = offset.min(self.text.len());
        let (start, _) = self.line_bounds(offset);
        let indent: String = self
            .text
            .get(start..offset)
            .unwrap_or("")
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        format!("{}\n{}^ {}", self.line_at(offset), indent, message)
    }
}

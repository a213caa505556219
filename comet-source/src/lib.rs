//! Source code representation and error reporting.

use std::{fmt, ops::Range};

/// A byte range into the source code.
pub type Span = Range<usize>;

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Returns the 1-based `(line, column)` of the byte `offset`.
    /// Offsets past the end of the content are clamped to the end.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.content.len());
        let before = &self.content[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }

    /// Formats `error` with its position in this source.
    pub fn render(&self, error: &impl Diagnostic) -> String {
        let (line, column) = self.line_col(error.span().start);
        format!(
            "error: {message} at {line}:{column}",
            message = error,
            line = line,
            column = column
        )
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// An error that points into the source code.
pub trait Diagnostic: fmt::Display {
    /// The part of the source code the error refers to.
    fn span(&self) -> Span;
}

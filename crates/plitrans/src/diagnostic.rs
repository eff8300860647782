//! Source spans and recovery diagnostics.
//!
//! Neither the lexer nor the parser ever rejects its input. Characters and
//! tokens that fit no rule are dropped, and each drop is recorded here so a
//! caller (the `check` command, an editor) can show the user what was lost.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte range in the source text, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: u32,
    /// Byte offset one past the last character.
    pub end: u32,
}

impl Span {
    /// Create a span covering `start..end`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Span for tokens that have no source text (the end-of-input marker).
    pub fn point(pos: u32) -> Self {
        Self::new(pos, pos)
    }

    /// 1-based `(line, column)` of the span start within `source`.
    pub fn line_col(&self, source: &str) -> (u32, u32) {
        let mut line = 1;
        let mut col = 1;
        for (i, ch) in source.char_indices() {
            if i >= self.start as usize {
                break;
            }
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Source structure was lost; the output no longer mirrors the input.
    Error,
    /// Input was dropped or patched, but the surrounding structure is intact.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Character discarded by the lexer.
pub const UNRECOGNIZED_CHAR: &str = "PLI-W001";
/// Token skipped by the statement dispatcher.
pub const SKIPPED_TOKEN: &str = "PLI-W002";
/// DECLARE with no variable name after it.
pub const MISSING_DECLARE_NAME: &str = "PLI-W003";
/// Identifier statement that is not followed by `=`.
pub const MISSING_ASSIGNMENT: &str = "PLI-W004";
/// DO or IF past the parser's nesting limit, skipped with its block structure.
pub const NESTING_TOO_DEEP: &str = "PLI-E001";

/// A recorded recovery event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How much of the input's structure survived the recovery.
    pub severity: Severity,
    /// Stable code, e.g. `PLI-W002`.
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// Location of the dropped input.
    pub span: Span,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(code: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, code, message, span)
    }

    /// Create an error diagnostic.
    pub fn error(code: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, code, message, span)
    }

    fn new(
        severity: Severity,
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            span,
        }
    }

    /// Whether this is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = "DCL X;\nX = 1;\n  Y = 2;";
        assert_eq!(Span::point(0).line_col(source), (1, 1));
        assert_eq!(Span::point(4).line_col(source), (1, 5));
        assert_eq!(Span::point(7).line_col(source), (2, 1));
        assert_eq!(Span::point(16).line_col(source), (3, 3));
    }

    #[test]
    fn test_line_col_empty_source() {
        assert_eq!(Span::point(0).line_col(""), (1, 1));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::warning(SKIPPED_TOKEN, "skipped token ')'", Span::new(3, 4));
        assert_eq!(d.severity, Severity::Warning);
        assert!(!d.is_error());
        assert_eq!(format!("{}", d), "warning[PLI-W002]: skipped token ')'");
    }

    #[test]
    fn test_error_display() {
        let d = Diagnostic::error(NESTING_TOO_DEEP, "DO nested too deep", Span::new(0, 2));
        assert!(d.is_error());
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.to_string(), "error[PLI-E001]: DO nested too deep");
    }
}

//! Structured output types for machine-readable CLI responses.
//!
//! When `--format json` is specified, commands emit these types as JSON
//! instead of human-readable text.

use miette::{IntoDiagnostic, Result};
use plitrans::{Diagnostic, Severity, Token, TokenKind};
use serde::Serialize;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }
}

/// A token with its resolved source position.
#[derive(Debug, Clone, Serialize)]
pub struct TokenEntry {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub col: u32,
}

impl TokenEntry {
    pub fn new(token: &Token, source: &str) -> Self {
        let (line, col) = token.span.line_col(source);
        Self {
            kind: token.kind,
            text: token.text.clone(),
            line,
            col,
        }
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEntry {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub file: String,
    pub line: u32,
    pub col: u32,
}

impl DiagnosticEntry {
    pub fn new(diag: &Diagnostic, file: &str, source: &str) -> Self {
        let (line, col) = diag.span.line_col(source);
        Self {
            severity: diag.severity,
            code: diag.code.clone(),
            message: diag.message.clone(),
            file: file.to_string(),
            line,
            col,
        }
    }
}

impl std::fmt::Display for DiagnosticEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}[{}]: {}",
            self.file, self.line, self.col, self.severity, self.code, self.message
        )
    }
}

/// Summary of diagnostic counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticSummary {
    pub errors: usize,
    pub warnings: usize,
}

impl DiagnosticSummary {
    pub fn count(diagnostics: &[DiagnosticEntry]) -> Self {
        let mut summary = Self::default();
        for d in diagnostics {
            match d.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
            }
        }
        summary
    }
}

/// Output from the check command.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    pub status: String,
    pub tokens: usize,
    pub procedures: Vec<String>,
    pub statements: usize,
    pub diagnostics: Vec<DiagnosticEntry>,
    pub summary: DiagnosticSummary,
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

//! Check command - report recovery diagnostics without emitting code.

use std::path::PathBuf;

use miette::Result;

use crate::output::{print_json, CheckOutput, DiagnosticEntry, DiagnosticSummary, OutputFormat};

/// Run the check command.
///
/// Warnings are not failures. The command fails only when recovery lost
/// block structure (an error diagnostic).
pub fn run(input: PathBuf, format: OutputFormat) -> Result<()> {
    let source = super::read_source(&input)?;
    tracing::info!("Checking {}", input.display());

    let (tokens, mut diagnostics) = plitrans::Lexer::scan(&source);
    let token_count = tokens.len();
    let (program, parse_diagnostics) = plitrans::Parser::parse_with_diagnostics(tokens);
    diagnostics.extend(parse_diagnostics);

    let file = input.display().to_string();
    let entries: Vec<DiagnosticEntry> = diagnostics
        .iter()
        .map(|d| DiagnosticEntry::new(d, &file, &source))
        .collect();
    let summary = DiagnosticSummary::count(&entries);

    if format.is_json() {
        let status = if summary.errors > 0 {
            "failed"
        } else if entries.is_empty() {
            "clean"
        } else {
            "recovered"
        };
        let errors = summary.errors;
        print_json(&CheckOutput {
            status: status.to_string(),
            tokens: token_count,
            procedures: program.procedures.iter().map(|p| p.name.clone()).collect(),
            statements: program.statement_count(),
            diagnostics: entries,
            summary,
        })?;
        return check_errors(errors);
    }

    for entry in &entries {
        println!("{entry}");
    }
    if !entries.is_empty() {
        println!();
    }

    println!("✓ Lexical analysis: {token_count} tokens");
    println!(
        "✓ Syntax analysis: {} procedure(s), {} statement(s)",
        program.procedures.len(),
        program.statement_count()
    );
    println!(
        "Summary: {} error(s), {} warning(s)",
        summary.errors, summary.warnings
    );

    check_errors(summary.errors)
}

fn check_errors(errors: usize) -> Result<()> {
    if errors == 0 {
        Ok(())
    } else {
        Err(miette::miette!("Check failed with {} error(s)", errors))
    }
}

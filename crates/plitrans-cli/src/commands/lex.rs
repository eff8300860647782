//! Lex command - show tokens for debugging.

use std::path::PathBuf;

use miette::Result;

use crate::output::{print_json, DiagnosticEntry, OutputFormat, TokenEntry};

/// Run the lex command.
pub fn run(input: PathBuf, format: OutputFormat) -> Result<()> {
    let source = super::read_source(&input)?;
    tracing::info!("Lexing {}", input.display());

    let (tokens, diagnostics) = plitrans::Lexer::scan(&source);
    let entries: Vec<TokenEntry> = tokens.iter().map(|t| TokenEntry::new(t, &source)).collect();

    if format.is_json() {
        return print_json(&entries);
    }

    let file = input.display().to_string();
    for diag in &diagnostics {
        println!("{}", DiagnosticEntry::new(diag, &file, &source));
    }
    if !diagnostics.is_empty() {
        println!();
    }

    println!("Tokens ({} total):", entries.len());
    println!("───────────────────────────────────────────────────────────────");
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:4}: {:>4}:{:<3} {:<12} {}",
            i + 1,
            entry.line,
            entry.col,
            entry.kind,
            entry.text
        );
    }
    println!("───────────────────────────────────────────────────────────────");

    Ok(())
}

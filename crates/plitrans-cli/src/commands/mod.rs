//! CLI command implementations.

pub mod check;
pub mod config;
pub mod lex;
pub mod parse;
pub mod transpile;

use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};

/// Read a source file, attaching the path to any I/O failure.
///
/// Bytes that are not valid UTF-8 (a Latin-1 `¬`, say) become U+FFFD, which
/// the lexer then drops as an unrecognized character.
pub(crate) fn read_source(input: &Path) -> Result<String> {
    let bytes = std::fs::read(input)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read source file: {}", input.display()))?;
    match String::from_utf8(bytes) {
        Ok(source) => Ok(source),
        Err(e) => {
            tracing::warn!(
                "{} is not valid UTF-8; undecodable bytes are dropped",
                input.display()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

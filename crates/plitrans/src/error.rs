//! Library error types.
//!
//! Lexing, parsing and emission cannot fail. The only fallible library
//! operation is resolving a backend from its name.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced by the transpiler library.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TranspileError {
    /// The requested output language is not supported.
    #[error("unknown target language '{name}'")]
    #[diagnostic(
        code(plitrans::unknown_target),
        help("supported targets: csharp (cs), javascript (js)")
    )]
    UnknownTarget {
        /// The name that failed to resolve.
        name: String,
    },
}

//! PL/I subset transpiler: lexer, parser, and C# and JavaScript emitters.
//!
//! The pipeline is text → tokens → AST → target text:
//!
//! - [`lexer`] turns source text into tokens, dropping characters it does
//!   not recognize.
//! - [`parser`] builds a [`Program`] of procedures, skipping tokens that
//!   cannot start a statement. Top-level statements outside any procedure
//!   become an implicit `MAIN` procedure.
//! - [`emit`] renders a [`Program`] with one of the [`Target`] backends.
//!
//! None of these stages can fail. Recovery steps are recorded as
//! [`Diagnostic`]s for callers that want to report them.
//!
//! ```
//! use plitrans::{transpile, Target};
//!
//! let cs = transpile("DECLARE X FIXED = 5; X = X + 1;", Target::CSharp);
//! assert!(cs.contains("int X = 5;"));
//! assert!(cs.contains("X = X + 1;"));
//! ```

pub mod ast;
pub mod diagnostic;
pub mod emit;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{
    Assignment, CallStatement, DataType, Declaration, DoLoop, IfStatement, Procedure, Program,
    Statement, ENTRY_POINT,
};
pub use diagnostic::{Diagnostic, Severity, Span};
pub use emit::{CSharpEmitter, Emitter, JavaScriptEmitter, Target};
pub use error::TranspileError;
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::Parser;

/// Result of a transpilation with its recovery record.
#[derive(Debug, Clone)]
pub struct Transpiled {
    pub program: Program,
    /// Target-language source text.
    pub output: String,
    /// Lexer diagnostics followed by parser diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

/// Lex and parse `source`, collecting diagnostics from both stages.
pub fn parse_source(source: &str) -> (Program, Vec<Diagnostic>) {
    let (tokens, mut diagnostics) = Lexer::scan(source);
    tracing::debug!(tokens = tokens.len(), "tokenized source");

    let (program, parse_diagnostics) = Parser::parse_with_diagnostics(tokens);
    diagnostics.extend(parse_diagnostics);
    tracing::debug!(
        procedures = program.procedures.len(),
        statements = program.statement_count(),
        diagnostics = diagnostics.len(),
        "parsed program"
    );
    (program, diagnostics)
}

/// Transpile `source` with a specific emitter.
pub fn transpile_with(source: &str, emitter: &dyn Emitter) -> Transpiled {
    let (program, diagnostics) = parse_source(source);
    let output = emitter.emit(&program);
    tracing::debug!(backend = %emitter.target(), bytes = output.len(), "emitted program");
    Transpiled {
        program,
        output,
        diagnostics,
    }
}

/// Transpile `source` to `target` with default emitter settings.
pub fn transpile(source: &str, target: Target) -> String {
    transpile_with(source, target.emitter().as_ref()).output
}

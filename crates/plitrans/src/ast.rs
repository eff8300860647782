//! AST for the PL/I subset.
//!
//! Ownership is strictly hierarchical: a [`Program`] owns its procedures, a
//! [`Procedure`] owns its statements, and loop and IF bodies own theirs.
//! Expressions are not trees. They are the source tokens re-joined with
//! single spaces and are carried through to the target language verbatim.

use serde::{Deserialize, Serialize};

use crate::lexer::TokenKind;

/// Name of the procedure that becomes the target program's entry point.
pub const ENTRY_POINT: &str = "MAIN";

/// A complete compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Procedures in source order (the implicit entry procedure, when
    /// synthesized, comes first).
    pub procedures: Vec<Procedure>,
}

impl Program {
    /// The procedure named [`ENTRY_POINT`], if any.
    pub fn entry_procedure(&self) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.is_entry_point())
    }

    pub fn has_entry_procedure(&self) -> bool {
        self.entry_procedure().is_some()
    }

    /// The procedure a generated program calls on startup: the entry
    /// procedure, else the first one. An unnamed procedure cannot be
    /// called, so it yields `None`.
    pub fn startup_procedure(&self) -> Option<&Procedure> {
        self.entry_procedure()
            .or_else(|| self.procedures.first())
            .filter(|p| !p.name.is_empty())
    }

    /// Total number of statements, nested bodies included.
    pub fn statement_count(&self) -> usize {
        self.procedures
            .iter()
            .map(|p| count_statements(&p.statements))
            .sum()
    }
}

fn count_statements(stmts: &[Statement]) -> usize {
    stmts
        .iter()
        .map(|s| {
            1 + match s {
                Statement::DoLoop(d) => count_statements(&d.body),
                Statement::If(i) => count_statements(&i.then_body) + count_statements(&i.else_body),
                _ => 0,
            }
        })
        .sum()
}

/// A named block of statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    /// Procedure name. Not required to be unique; may be empty when the
    /// source wrote `PROCEDURE;` without a name.
    pub name: String,
    pub statements: Vec<Statement>,
}

impl Procedure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statements: Vec::new(),
        }
    }

    pub fn is_entry_point(&self) -> bool {
        self.name == ENTRY_POINT
    }
}

/// Declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataType {
    /// FIXED
    Integer,
    /// FLOAT
    FloatingPoint,
    /// CHARACTER
    Text,
    /// No type attribute given.
    #[default]
    Inferred,
}

impl DataType {
    /// Map a type keyword token to its data type.
    pub fn from_keyword(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Fixed => Some(DataType::Integer),
            TokenKind::Float => Some(DataType::FloatingPoint),
            TokenKind::Character => Some(DataType::Text),
            _ => None,
        }
    }
}

/// A statement. Parsing never produces a placeholder variant: tokens that
/// start no statement are dropped before they reach the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Declaration(Declaration),
    Assignment(Assignment),
    DoLoop(DoLoop),
    If(IfStatement),
    Call(CallStatement),
}

/// `DECLARE name [FIXED|FLOAT|CHARACTER] [= initial];`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub data_type: DataType,
    /// A single number or identifier token.
    pub initial: Option<String>,
}

/// `target = value;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: String,
    /// Raw-text expression. Empty when the source had no `=`.
    pub value: String,
}

/// Default increment of a DO loop without a BY clause.
pub const DEFAULT_STEP: &str = "1";

/// `DO var = start [TO end] [BY step]; body END;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoLoop {
    pub var: String,
    pub start: String,
    pub end: String,
    /// `None` when no BY clause was written (or it was empty).
    pub step: Option<String>,
    pub body: Vec<Statement>,
}

impl DoLoop {
    /// The step expression, defaulting to [`DEFAULT_STEP`].
    pub fn step_or_default(&self) -> &str {
        self.step.as_deref().unwrap_or(DEFAULT_STEP)
    }
}

/// `IF cond THEN then_body [ELSE else_body] END;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: String,
    pub then_body: Vec<Statement>,
    pub else_body: Vec<Statement>,
    /// True when an ELSE keyword was present, even with an empty body.
    pub has_else: bool,
}

/// `CALL name;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallStatement {
    pub target: String,
}

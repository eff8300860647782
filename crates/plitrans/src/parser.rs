//! Recursive-descent parser for the PL/I subset.
//!
//! The parser is total: any token sequence produces a [`Program`]. A token
//! that cannot start a statement is skipped and parsing resumes with the
//! next one, so a single stray token never hides the statements after it.
//!
//! Expressions are captured as text (token lexemes joined with single
//! spaces), not as trees. The target languages share the source's operator
//! spelling, so precedence is left to the target compiler.

use crate::ast::{
    Assignment, CallStatement, DataType, Declaration, DoLoop, IfStatement, Procedure, Program,
    Statement, ENTRY_POINT,
};
use crate::diagnostic::{
    Diagnostic, Span, MISSING_ASSIGNMENT, MISSING_DECLARE_NAME, NESTING_TOO_DEEP, SKIPPED_TOKEN,
};
use crate::lexer::{Token, TokenKind};

/// Deepest DO/IF nesting the parser builds. A DO or IF that would open a
/// deeper level is skipped like any other stray token.
pub const MAX_NESTING: usize = 64;

/// Parser state: the token list and a cursor into it.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof_sentinel: Token,
    diagnostics: Vec<Diagnostic>,
    /// Number of DO/IF bodies currently open.
    depth: usize,
}

impl Parser {
    /// Create a parser over a token stream (normally from [`crate::lexer::tokenize`]).
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_pos = tokens.last().map_or(0, |t| t.span.end);
        Self {
            tokens,
            pos: 0,
            eof_sentinel: Token::new(TokenKind::Eof, "", Span::point(eof_pos)),
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    /// Parse a token stream into a Program.
    pub fn parse(tokens: Vec<Token>) -> Program {
        Self::parse_with_diagnostics(tokens).0
    }

    /// Parse a token stream, also returning a record of every recovery step.
    pub fn parse_with_diagnostics(tokens: Vec<Token>) -> (Program, Vec<Diagnostic>) {
        let mut parser = Self::new(tokens);
        let program = parser.parse_program();
        (program, parser.diagnostics)
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof_sentinel)
    }

    fn kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn next_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn at_eof(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// `label:` or `PROCEDURE` starts a new procedure.
    fn at_procedure_boundary(&self) -> bool {
        (self.kind() == TokenKind::Identifier && self.next_kind() == TokenKind::Colon)
            || self.kind() == TokenKind::Procedure
    }

    fn warn(&mut self, code: &str, message: String, span: Span) {
        self.diagnostics
            .push(Diagnostic::warning(code, message, span));
    }

    /// Parse a DO/IF body one level deeper.
    fn parse_nested_block(&mut self, terminators: &[TokenKind]) -> Vec<Statement> {
        self.depth += 1;
        let body = self.parse_block(terminators);
        self.depth -= 1;
        body
    }

    // ─────── Program structure ───────

    /// Statements ahead of the first procedure boundary collect into an
    /// implicit [`ENTRY_POINT`] procedure, which is prepended when it is
    /// non-empty and no explicit procedure already carries that name.
    /// Statements that follow a procedure's END belong to that procedure.
    fn parse_program(&mut self) -> Program {
        let mut procedures = Vec::new();
        let mut implicit = Procedure::new(ENTRY_POINT);
        let mut current: Option<Procedure> = None;

        while !self.at_eof() {
            if self.at_procedure_boundary() {
                procedures.extend(current.take());
                let proc = self.parse_procedure();
                tracing::trace!(name = %proc.name, "parsed procedure");
                current = Some(proc);
            } else if let Some(stmt) = self.parse_statement() {
                match current.as_mut() {
                    Some(proc) => proc.statements.push(stmt),
                    None => implicit.statements.push(stmt),
                }
            }
        }
        procedures.extend(current);

        if !implicit.statements.is_empty() && !procedures.iter().any(Procedure::is_entry_point) {
            procedures.insert(0, implicit);
        }

        Program { procedures }
    }

    fn parse_procedure(&mut self) -> Procedure {
        let mut proc = Procedure::default();

        if self.kind() == TokenKind::Identifier && self.next_kind() == TokenKind::Colon {
            proc.name = self.advance().text;
            self.advance(); // :
            self.eat(TokenKind::Procedure);
        } else if self.eat(TokenKind::Procedure) && self.kind() == TokenKind::Identifier {
            proc.name = self.advance().text;
        }
        self.eat(TokenKind::Semicolon);

        proc.statements = self.parse_block(&[TokenKind::End]);

        if self.eat(TokenKind::End) {
            self.eat(TokenKind::Semicolon);
        }
        proc
    }

    /// Parse statements until one of `terminators` (left unconsumed) or EOF.
    fn parse_block(&mut self, terminators: &[TokenKind]) -> Vec<Statement> {
        let mut stmts = Vec::new();
        while !self.at_eof() && !terminators.contains(&self.kind()) {
            if let Some(stmt) = self.parse_statement() {
                stmts.push(stmt);
            }
        }
        stmts
    }

    // ─────── Statement parsing ───────

    /// Dispatch on the current token. Anything that cannot start a
    /// statement is consumed and yields `None`.
    fn parse_statement(&mut self) -> Option<Statement> {
        match self.kind() {
            TokenKind::Do | TokenKind::If if self.depth >= MAX_NESTING => {
                let tok = self.advance();
                self.diagnostics.push(Diagnostic::error(
                    NESTING_TOO_DEEP,
                    format!("{} nested deeper than {MAX_NESTING} levels; skipped", tok.kind),
                    tok.span,
                ));
                None
            }
            TokenKind::Declare => self.parse_declaration(),
            TokenKind::Identifier => Some(self.parse_assignment()),
            TokenKind::Do => Some(self.parse_do_loop()),
            TokenKind::If => Some(self.parse_if()),
            TokenKind::Call => Some(self.parse_call()),
            TokenKind::Semicolon => {
                // Null statement.
                self.advance();
                None
            }
            _ => {
                let tok = self.advance();
                tracing::trace!(kind = %tok.kind, text = %tok.text, "skipping token");
                self.warn(
                    SKIPPED_TOKEN,
                    format!("{} '{}' does not start a statement; skipped", tok.kind, tok.text),
                    tok.span,
                );
                None
            }
        }
    }

    /// `DECLARE name [FIXED|FLOAT|CHARACTER] [= number|identifier] [;]`
    fn parse_declaration(&mut self) -> Option<Statement> {
        let keyword = self.advance();

        let mut decl = None;
        if self.kind() == TokenKind::Identifier {
            let name = self.advance().text;
            let data_type = match DataType::from_keyword(self.kind()) {
                Some(ty) => {
                    self.advance();
                    ty
                }
                None => DataType::Inferred,
            };
            let mut initial = None;
            if self.eat(TokenKind::Equals)
                && matches!(self.kind(), TokenKind::Number | TokenKind::Identifier)
            {
                initial = Some(self.advance().text);
            }
            decl = Some(Declaration {
                name,
                data_type,
                initial,
            });
        } else {
            self.warn(
                MISSING_DECLARE_NAME,
                format!("{} without a variable name; dropped", keyword.text),
                keyword.span,
            );
        }

        self.eat(TokenKind::Semicolon);
        decl.map(Statement::Declaration)
    }

    /// `name = expr [;]`
    fn parse_assignment(&mut self) -> Statement {
        let target = self.advance();

        let value = if self.eat(TokenKind::Equals) {
            self.parse_expression()
        } else {
            self.warn(
                MISSING_ASSIGNMENT,
                format!("expected '=' after '{}'", target.text),
                target.span,
            );
            String::new()
        };
        self.eat(TokenKind::Semicolon);

        Statement::Assignment(Assignment {
            target: target.text,
            value,
        })
    }

    /// `DO var = start [TO end] [BY step] ; body END [;]`
    fn parse_do_loop(&mut self) -> Statement {
        self.advance(); // DO

        let var = if self.kind() == TokenKind::Identifier {
            self.advance().text
        } else {
            String::new()
        };

        let mut start = String::new();
        let mut end = String::new();
        let mut step = None;
        if self.eat(TokenKind::Equals) {
            start = self.parse_expression();
            if self.eat(TokenKind::To) {
                end = self.parse_expression();
            }
            if self.eat(TokenKind::By) {
                step = Some(self.parse_expression()).filter(|s| !s.is_empty());
            }
        }

        let body = self.parse_nested_block(&[TokenKind::End]);
        self.eat(TokenKind::End);
        self.eat(TokenKind::Semicolon);

        Statement::DoLoop(DoLoop {
            var,
            start,
            end,
            step,
            body,
        })
    }

    /// `IF cond THEN stmts [ELSE stmts] END [;]`
    fn parse_if(&mut self) -> Statement {
        self.advance(); // IF

        let condition = self.parse_condition();
        self.eat(TokenKind::Then);

        let then_body = self.parse_nested_block(&[TokenKind::End, TokenKind::Else]);

        let mut else_body = Vec::new();
        let has_else = self.eat(TokenKind::Else);
        if has_else {
            else_body = self.parse_nested_block(&[TokenKind::End]);
        }

        self.eat(TokenKind::End);
        self.eat(TokenKind::Semicolon);

        Statement::If(IfStatement {
            condition,
            then_body,
            else_body,
            has_else,
        })
    }

    /// `CALL name [;]`. The name is whatever single token follows CALL.
    fn parse_call(&mut self) -> Statement {
        self.advance(); // CALL
        let target = self.advance().text;
        self.eat(TokenKind::Semicolon);
        Statement::Call(CallStatement { target })
    }

    // ─────── Expression capture ───────

    /// Join lexemes with single spaces up to `;`, `TO`, `BY` or EOF.
    ///
    /// TO and BY end any expression, not only a DO loop's start value.
    fn parse_expression(&mut self) -> String {
        let mut parts = Vec::new();
        while !matches!(
            self.kind(),
            TokenKind::Semicolon | TokenKind::Eof | TokenKind::To | TokenKind::By
        ) {
            parts.push(self.advance().text);
        }
        parts.join(" ")
    }

    /// Capture an IF condition up to THEN.
    ///
    /// An operator gets a leading space unless the text is empty or already
    /// ends in one, and a trailing space unless THEN follows. Any other token
    /// gets a trailing space unless an operator or THEN follows.
    fn parse_condition(&mut self) -> String {
        let mut cond = String::new();
        while !matches!(self.kind(), TokenKind::Then | TokenKind::Eof) {
            let tok = self.advance();
            let next = self.kind();
            if tok.kind == TokenKind::Operator {
                if !cond.is_empty() && !cond.ends_with(' ') {
                    cond.push(' ');
                }
                cond.push_str(&tok.text);
                if next != TokenKind::Then {
                    cond.push(' ');
                }
            } else {
                cond.push_str(&tok.text);
                if next != TokenKind::Operator && next != TokenKind::Then {
                    cond.push(' ');
                }
            }
        }
        cond.trim().to_string()
    }
}

// ---------------------------------------------------------------------------
//  Tests
// ---------------------------------------------------------------------------

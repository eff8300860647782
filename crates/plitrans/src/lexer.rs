//! PL/I subset lexer.
//!
//! A single left-to-right pass with one cursor. Keywords are recognized
//! case-insensitively; every other word is an identifier. Characters that
//! start no token are dropped (and recorded as a diagnostic) rather than
//! reported as errors, so tokenizing never fails.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, Span, UNRECOGNIZED_CHAR};

// ---------------------------------------------------------------------------
//  Token types
// ---------------------------------------------------------------------------

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Name that is not a keyword.
    Identifier,
    /// Digits and dots, e.g. `42` or `3.14`.
    Number,
    /// DECLARE / DCL.
    Declare,
    End,
    Fixed,
    Float,
    /// CHARACTER / CHAR.
    Character,
    Do,
    While,
    To,
    By,
    If,
    Then,
    Else,
    /// PROCEDURE / PROC.
    Procedure,
    Call,
    Colon,
    Semicolon,
    Equals,
    Plus,
    Minus,
    Multiply,
    Divide,
    LParen,
    RParen,
    /// Relational operator: `<`, `<=`, `>`, `>=`, `!=`, `!`.
    Operator,
    /// End of input. Always the last token.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Declare => "DECLARE",
            TokenKind::End => "END",
            TokenKind::Fixed => "FIXED",
            TokenKind::Float => "FLOAT",
            TokenKind::Character => "CHARACTER",
            TokenKind::Do => "DO",
            TokenKind::While => "WHILE",
            TokenKind::To => "TO",
            TokenKind::By => "BY",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::Procedure => "PROCEDURE",
            TokenKind::Call => "CALL",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Equals => "EQUALS",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Eof => "EOF",
        };
        f.pad(name)
    }
}

/// A lexed token.
///
/// Equality compares `kind` and `text` only; `span` is position metadata and
/// two sources that differ only in layout produce equal token sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text exactly as written (keywords keep their original case).
    pub text: String,
    pub span: Span,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Resolve a word to its keyword kind, ignoring case.
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    let kind = match word.to_ascii_uppercase().as_str() {
        "DECLARE" | "DCL" => TokenKind::Declare,
        "END" => TokenKind::End,
        "FIXED" => TokenKind::Fixed,
        "FLOAT" => TokenKind::Float,
        "CHARACTER" | "CHAR" => TokenKind::Character,
        "DO" => TokenKind::Do,
        "WHILE" => TokenKind::While,
        "TO" => TokenKind::To,
        "BY" => TokenKind::By,
        "IF" => TokenKind::If,
        "THEN" => TokenKind::Then,
        "ELSE" => TokenKind::Else,
        "PROCEDURE" | "PROC" => TokenKind::Procedure,
        "CALL" => TokenKind::Call,
        _ => return None,
    };
    Some(kind)
}

/// Tokenize `source`, discarding recovery diagnostics.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::scan(source).0
}

// ---------------------------------------------------------------------------
//  Lexer
// ---------------------------------------------------------------------------

/// Cursor over the source characters.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    /// Byte offset of `chars[pos]`.
    offset: u32,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            offset: 0,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the whole source. The token list always ends with one
    /// [`TokenKind::Eof`]; the diagnostics list every discarded character.
    pub fn scan(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut lexer = Self::new(source);
        lexer.run();
        tracing::trace!(
            tokens = lexer.tokens.len(),
            dropped = lexer.diagnostics.len(),
            "lexed source"
        );
        (lexer.tokens, lexer.diagnostics)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        self.offset += ch.len_utf8() as u32;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.advance();
        }
    }

    fn run(&mut self) {
        loop {
            self.skip_whitespace();
            let Some(ch) = self.peek() else {
                break;
            };

            if ch.is_ascii_alphabetic() {
                self.lex_word();
            } else if ch.is_ascii_digit() {
                self.lex_number();
            } else if let Some(kind) = punctuation_kind(ch) {
                self.single(kind);
            } else {
                match ch {
                    '>' | '<' => self.lex_relational(ch),
                    '!' | '¬' => self.lex_not(),
                    _ => self.skip_unknown(ch),
                }
            }
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, "", Span::point(self.offset)));
    }

    fn push(&mut self, kind: TokenKind, text: String, start: u32) {
        self.tokens
            .push(Token::new(kind, text, Span::new(start, self.offset)));
    }

    fn single(&mut self, kind: TokenKind) {
        let start = self.offset;
        if let Some(ch) = self.advance() {
            self.push(kind, ch.to_string(), start);
        }
    }

    fn lex_word(&mut self) {
        let start = self.offset;
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        let kind = keyword_kind(&text).unwrap_or(TokenKind::Identifier);
        self.push(kind, text, start);
    }

    /// Digits and dots, maximal munch. `1.2.3` is one token.
    fn lex_number(&mut self) {
        let start = self.offset;
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        self.push(TokenKind::Number, text, start);
    }

    fn lex_relational(&mut self, first: char) {
        let start = self.offset;
        self.advance();
        let mut text = first.to_string();
        if self.peek() == Some('=') {
            self.advance();
            text.push('=');
        }
        self.push(TokenKind::Operator, text, start);
    }

    /// `!` and the PL/I not-sign `¬` both lex as `!`, or `!=` before `=`.
    fn lex_not(&mut self) {
        let start = self.offset;
        self.advance();
        let text = if self.peek() == Some('=') {
            self.advance();
            "!="
        } else {
            "!"
        };
        self.push(TokenKind::Operator, text.to_string(), start);
    }

    fn skip_unknown(&mut self, ch: char) {
        let start = self.offset;
        self.advance();
        self.diagnostics.push(Diagnostic::warning(
            UNRECOGNIZED_CHAR,
            format!("unrecognized character {:?} dropped", ch),
            Span::new(start, self.offset),
        ));
    }
}

fn punctuation_kind(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        ':' => TokenKind::Colon,
        ';' => TokenKind::Semicolon,
        '=' => TokenKind::Equals,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Multiply,
        '/' => TokenKind::Divide,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        _ => return None,
    };
    Some(kind)
}

// ---------------------------------------------------------------------------
//  Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).iter().map(|t| t.kind).collect()
    }

    fn texts(src: &str) -> Vec<String> {
        tokenize(src).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_keywords_case_insensitive() {
        for src in ["declare", "DECLARE", "Declare", "dCl"] {
            assert_eq!(kinds(src), vec![TokenKind::Declare, TokenKind::Eof], "{src}");
        }
        assert_eq!(kinds("proc Procedure"), vec![
            TokenKind::Procedure,
            TokenKind::Procedure,
            TokenKind::Eof
        ]);
    }

    #[test]
    fn test_keyword_keeps_original_text() {
        let tokens = tokenize("Fixed");
        assert_eq!(tokens[0].kind, TokenKind::Fixed);
        assert_eq!(tokens[0].text, "Fixed");
    }

    #[test]
    fn test_identifier_maximal_munch() {
        let tokens = tokenize("abc123_x");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "abc123_x");
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("DOX ENDING"), vec![
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Eof
        ]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(texts("42 3.14 1.2.3"), vec!["42", "3.14", "1.2.3", ""]);
        assert_eq!(kinds("7"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn test_number_then_identifier() {
        assert_eq!(texts("12AB"), vec!["12", "AB", ""]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(kinds(":;=+-*/()"), vec![
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::Equals,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn test_two_char_operators() {
        let tokens = tokenize(">=");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[0].text, ">=");

        assert_eq!(texts("> < <= != !"), vec![">", "<", "<=", "!=", "!", ""]);
    }

    #[test]
    fn test_not_sign() {
        assert_eq!(texts("A ¬= B"), vec!["A", "!=", "B", ""]);
        assert_eq!(texts("¬A"), vec!["!", "A", ""]);
    }

    #[test]
    fn test_unknown_characters_dropped() {
        let (tokens, diags) = Lexer::scan("X = 'A' & #1;");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["X", "=", "A", "1", ";", ""]);
        assert_eq!(diags.len(), 4);
        assert!(diags.iter().all(|d| d.code == UNRECOGNIZED_CHAR));
        assert_eq!(diags[0].span, Span::new(4, 5));
    }

    #[test]
    fn test_leading_underscore_not_identifier_start() {
        assert_eq!(texts("_A"), vec!["A", ""]);
    }

    #[test]
    fn test_always_ends_with_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("  \t\r\n "), vec![TokenKind::Eof]);
        assert_eq!(kinds("@@@"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = tokenize("¬= X");
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 5));
        assert_eq!(tokens[2].span, Span::point(5));
    }

    #[test]
    fn test_whitespace_idempotence() {
        let a = tokenize("DECLARE X FIXED = 5; X = X + 1;");
        let b = tokenize("DECLARE\n  X\tFIXED=5 ;\r\n\nX=X+1;   ");
        assert_eq!(a, b);
    }
}

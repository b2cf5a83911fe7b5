// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Minic source code.
//!
//! The [`Scanner`] converts source text into [`Token`]s on demand: the
//! parser pulls one token at a time through [`Scanner::next_token`] and
//! inspects the upcoming one through [`Scanner::peek`]. Both share a
//! single-slot lookahead buffer, so two consecutive `peek` calls are
//! idempotent and `next_token` after `peek` returns the peeked token.
//!
//! Scanning is single-shot and fail-fast: a character that starts no token
//! raises a lexical error and the scanner makes no attempt to recover.
//! Character classification is ASCII-only, keeping error behaviour
//! deterministic regardless of input encoding quirks.
//!
//! # Negative Literals
//!
//! A `-` immediately followed by a digit folds into the literal, so
//! `-3.141592` is one float token. A `-` followed by anything else is the
//! subtraction operator; in `--12` only the second minus folds, giving
//! `Minus` then `IntLiteral("-12")`.
//!
//! # Example
//!
//! ```
//! use minic_core::source_analysis::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new("a = 1;");
//! assert_eq!(scanner.peek().unwrap().kind(), TokenKind::Identifier);
//! assert_eq!(scanner.next_token().unwrap().lexeme(), "a");
//! assert_eq!(scanner.next_token().unwrap().kind(), TokenKind::Assign);
//! ```

use ecow::EcoString;

use super::{Token, TokenKind};
use crate::error::CompileError;

/// A pull-based scanner with one token of lookahead.
///
/// Each scanner owns private cursor and lookahead state with no internal
/// locking; concurrent compilations need one scanner each.
#[derive(Debug)]
pub struct Scanner {
    /// The source text, as characters for cheap single-character lookahead.
    chars: Vec<char>,
    /// Read cursor; advances monotonically.
    position: usize,
    /// Current 1-based line, incremented on every consumed newline.
    line: u32,
    /// The lookahead buffer shared by `peek` and `next_token`.
    lookahead: Option<Token>,
}

/// Tokenizes an entire source text, excluding the end-of-input marker.
///
/// Convenience for tests and tools that want the whole stream at once; the
/// parser itself pulls tokens on demand.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token()?;
        if token.kind().is_eof() {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

impl Scanner {
    /// Creates a new scanner for the given source text.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            lookahead: None,
        }
    }

    /// Returns the next token without consuming it.
    ///
    /// # Errors
    ///
    /// Returns a lexical error when the upcoming input starts no token.
    pub fn peek(&mut self) -> Result<&Token, CompileError> {
        if self.lookahead.is_none() {
            let token = self.scan_token()?;
            self.lookahead = Some(token);
        }
        match self.lookahead.as_ref() {
            Some(token) => Ok(token),
            None => unreachable!("lookahead buffer filled above"),
        }
    }

    /// Returns the next token and consumes it.
    ///
    /// After the input is exhausted, every call returns the end-of-input
    /// marker.
    ///
    /// # Errors
    ///
    /// Returns a lexical error when the upcoming input starts no token.
    pub fn next_token(&mut self) -> Result<Token, CompileError> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => self.scan_token(),
        }
    }

    // ========================================================================
    // Character cursor
    // ========================================================================

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.chars.get(self.position + n).copied()
    }

    /// Consumes the next character, counting newlines.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.position += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    // ========================================================================
    // Tokenizing
    // ========================================================================

    /// Skips whitespace and `//` line comments.
    ///
    /// The two are stripped in a loop until neither applies, so consecutive
    /// comment lines are swallowed whole.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.advance();
                }
                Some('/') if self.peek_char_n(1) == Some('/') => {
                    while self.peek_char().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Scans the next token from the raw character stream.
    fn scan_token(&mut self) -> Result<Token, CompileError> {
        self.skip_trivia();
        let line = self.line;

        let Some(c) = self.peek_char() else {
            return Ok(Token::new(TokenKind::Eof, "<eof>", line));
        };

        match c {
            '(' => Ok(self.single(TokenKind::LeftParen, "(", line)),
            ')' => Ok(self.single(TokenKind::RightParen, ")", line)),
            '{' => Ok(self.single(TokenKind::LeftBrace, "{", line)),
            '}' => Ok(self.single(TokenKind::RightBrace, "}", line)),
            ',' => Ok(self.single(TokenKind::Comma, ",", line)),
            ';' => Ok(self.single(TokenKind::Semicolon, ";", line)),
            '+' => Ok(self.single(TokenKind::Plus, "+", line)),
            '*' => Ok(self.single(TokenKind::Star, "*", line)),
            '/' => Ok(self.single(TokenKind::Slash, "/", line)),
            '>' | '<' | '=' | '!' | '|' | '&' => self.scan_operator(c, line),
            '-' | '0'..='9' => Ok(self.scan_number_or_minus(line)),
            c if c.is_ascii_alphabetic() => Ok(self.scan_identifier_or_keyword(line)),
            _ => {
                self.advance();
                Err(CompileError::lexical(c, line))
            }
        }
    }

    /// Consumes one character and builds a single-character token.
    fn single(&mut self, kind: TokenKind, lexeme: &str, line: u32) -> Token {
        self.advance();
        Token::new(kind, lexeme, line)
    }

    /// Scans the operators that may span two characters.
    ///
    /// Two-character forms are matched greedily before their
    /// single-character fallbacks; `|` and `&` have no single-character
    /// form and raise a lexical error on their own.
    fn scan_operator(&mut self, first: char, line: u32) -> Result<Token, CompileError> {
        self.advance();
        match (first, self.peek_char()) {
            ('>', Some('=')) => Ok(self.single(TokenKind::GreaterEqual, ">=", line)),
            ('<', Some('=')) => Ok(self.single(TokenKind::LessEqual, "<=", line)),
            ('=', Some('=')) => Ok(self.single(TokenKind::EqualEqual, "==", line)),
            ('!', Some('=')) => Ok(self.single(TokenKind::NotEqual, "!=", line)),
            ('|', Some('|')) => Ok(self.single(TokenKind::Or, "||", line)),
            ('&', Some('&')) => Ok(self.single(TokenKind::And, "&&", line)),
            ('>', _) => Ok(Token::new(TokenKind::Greater, ">", line)),
            ('<', _) => Ok(Token::new(TokenKind::Less, "<", line)),
            ('=', _) => Ok(Token::new(TokenKind::Assign, "=", line)),
            ('!', _) => Ok(Token::new(TokenKind::Not, "!", line)),
            _ => Err(CompileError::lexical(first, line)),
        }
    }

    /// Scans an integer or float literal, or a standalone `-`.
    ///
    /// A leading `-` folds into the literal only when immediately followed
    /// by a digit. The literal consumes digits and `.` greedily and is
    /// classified by whether its text contains a `.`; the scanner never
    /// parses the numeric value.
    fn scan_number_or_minus(&mut self, line: u32) -> Token {
        let mut text = EcoString::new();

        if self.peek_char() == Some('-') {
            if !self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
                return Token::new(TokenKind::Minus, "-", line);
            }
            self.advance();
            text.push('-');
        }

        while let Some(c) = self.peek_char() {
            if !c.is_ascii_digit() && c != '.' {
                break;
            }
            self.advance();
            text.push(c);
        }

        let kind = if text.contains('.') {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        Token::new(kind, text, line)
    }

    /// Scans an identifier or keyword: an ASCII letter followed by ASCII
    /// letters and digits, checked against the fixed keyword set.
    fn scan_identifier_or_keyword(&mut self, line: u32) -> Token {
        let mut text = EcoString::new();
        while let Some(c) = self.peek_char() {
            if !c.is_ascii_alphanumeric() {
                break;
            }
            self.advance();
            text.push(c);
        }

        let kind = match text.as_str() {
            "int" => TokenKind::KwInt,
            "float" => TokenKind::KwFloat,
            "if" => TokenKind::KwIf,
            "else" => TokenKind::KwElse,
            "while" => TokenKind::KwWhile,
            "out" => TokenKind::KwOut,
            _ => TokenKind::Identifier,
        };
        Token::new(kind, text, line)
    }
}

// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for Minic source code.
//!
//! Each grammar nonterminal maps to one parsing method, and the method for
//! a left-associative binary operator loops against its continuation while
//! the lookahead matches, building a left-leaning tree:
//!
//! ```text
//! program     ::= statement EOF
//! statement   ::= if_stmt | while_stmt | block | output_stmt
//!               | declare_stmt | assign_stmt | ";"
//! if_stmt     ::= "if" "(" bool_expr ")" statement [ "else" statement ]
//! while_stmt  ::= "while" "(" bool_expr ")" statement
//! block       ::= "{" { statement } "}"
//! output_stmt ::= "out" "(" bool_expr ")" ";"
//! declare_stmt ::= type id [ "=" bool_expr ] { "," id [ "=" bool_expr ] } ";"
//! assign_stmt ::= id "=" bool_expr { "," id "=" bool_expr } ";"
//! bool_expr   ::= bool_term { "||" bool_term }
//! bool_term   ::= bool_factor { "&&" bool_factor }
//! bool_factor ::= [ "!" ] relation
//! relation    ::= expr [ cmp_op expr ]
//! expr        ::= term { ("+"|"-") term }
//! term        ::= [ "+"|"-" ] factor { ("*"|"/") factor }
//! factor      ::= id | int_lit | float_lit | "(" bool_expr ")"
//! ```
//!
//! The parser drives the [`Scanner`] on demand and never retains a token
//! beyond the scanner's lookahead slot. Parsing is a single pass that
//! aborts on the first violation; it is not resumable after an error.
//!
//! `relation` treats its comparison suffix as optional, letting boolean
//! and arithmetic grammars interleave without backtracking: a bare
//! arithmetic expression is a valid condition.

use ecow::eco_format;

use crate::ast::{Node, NodeKind};
use crate::error::CompileError;
use crate::source_analysis::{Scanner, Token, TokenKind};

// Expression-ladder methods live in a sibling file.
mod expressions;

/// A single-use recursive descent parser.
///
/// Owns the scanner and its cursor state, so one parser serves exactly one
/// compilation.
#[derive(Debug)]
pub struct Parser {
    scanner: Scanner,
}

impl Parser {
    /// Creates a parser that will drive the given scanner.
    #[must_use]
    pub fn new(scanner: Scanner) -> Self {
        Self { scanner }
    }

    /// Parses a complete program: one top-level statement followed by end
    /// of input.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or syntax error encountered, including
    /// trailing input after the program's single statement.
    pub fn parse(mut self) -> Result<Node, CompileError> {
        let body = self.statement()?;

        // No garbage at the end.
        let token = self.scanner.next_token()?;
        if !token.kind().is_eof() {
            return Err(CompileError::syntax("end of input expected", token.line()));
        }

        Ok(Node::Program {
            body: Box::new(body),
        })
    }

    // ========================================================================
    // Housekeeping
    // ========================================================================

    /// Consumes the next token, requiring the given kind.
    fn expect(&mut self, kind: TokenKind, looks_like: &str) -> Result<Token, CompileError> {
        let token = self.scanner.next_token()?;
        if token.kind() != kind {
            return Err(CompileError::syntax(
                eco_format!("{looks_like} expected"),
                token.line(),
            ));
        }
        Ok(token)
    }

    /// Returns the kind of the upcoming token without consuming it.
    fn peek_kind(&mut self) -> Result<TokenKind, CompileError> {
        Ok(self.scanner.peek()?.kind())
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> Result<Node, CompileError> {
        let (kind, line) = {
            let token = self.scanner.peek()?;
            (token.kind(), token.line())
        };

        match kind {
            TokenKind::KwIf => self.if_statement(),
            TokenKind::KwWhile => self.while_statement(),
            TokenKind::LeftBrace => self.block_statement(),
            TokenKind::KwOut => self.output_statement(),
            kind if kind.is_type_keyword() => self.declare_statement(),
            TokenKind::Identifier => self.assign_statement(),
            TokenKind::Semicolon => {
                self.scanner.next_token()?;
                Ok(Node::Empty)
            }
            _ => Err(CompileError::syntax("statement or '}' expected", line)),
        }
    }

    fn if_statement(&mut self) -> Result<Node, CompileError> {
        let keyword = self.scanner.next_token()?;
        self.expect(TokenKind::LeftParen, "'('")?;
        let condition = self.bool_expr()?;
        self.expect(TokenKind::RightParen, "')'")?;
        let then_branch = self.statement()?;

        let else_branch = if self.peek_kind()? == TokenKind::KwElse {
            self.scanner.next_token()?;
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Node::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch,
            line: keyword.line(),
            tag: None,
        })
    }

    fn while_statement(&mut self) -> Result<Node, CompileError> {
        let keyword = self.scanner.next_token()?;
        self.expect(TokenKind::LeftParen, "'('")?;
        let condition = self.bool_expr()?;
        self.expect(TokenKind::RightParen, "')'")?;
        let body = self.statement()?;

        Ok(Node::While {
            condition: Box::new(condition),
            body: Box::new(body),
            line: keyword.line(),
        })
    }

    fn block_statement(&mut self) -> Result<Node, CompileError> {
        self.scanner.next_token()?; // `{`

        let mut statements = Vec::new();
        while self.peek_kind()? != TokenKind::RightBrace {
            statements.push(self.statement()?);
        }
        self.scanner.next_token()?; // `}`

        Ok(chain_sequence(statements))
    }

    fn output_statement(&mut self) -> Result<Node, CompileError> {
        self.scanner.next_token()?; // `out`
        self.expect(TokenKind::LeftParen, "'('")?;
        let value = self.bool_expr()?;
        self.expect(TokenKind::RightParen, "')'")?;
        self.expect(TokenKind::Semicolon, "';'")?;

        Ok(Node::Output {
            value: Box::new(value),
        })
    }

    fn declare_statement(&mut self) -> Result<Node, CompileError> {
        let type_token = self.scanner.next_token()?;

        let mut declarations = vec![self.declarator(&type_token)?];
        while self.peek_kind()? == TokenKind::Comma {
            self.scanner.next_token()?;
            declarations.push(self.declarator(&type_token)?);
        }
        self.expect(TokenKind::Semicolon, "';'")?;

        Ok(chain_sequence(declarations))
    }

    /// Parses one `id [ "=" bool_expr ]` entry of a declaration list.
    fn declarator(&mut self, type_token: &Token) -> Result<Node, CompileError> {
        let id = self.expect(TokenKind::Identifier, "identifier")?;
        let line = id.line();

        let init = if self.peek_kind()? == TokenKind::Assign {
            self.scanner.next_token()?;
            Some(Box::new(self.bool_expr()?))
        } else {
            None
        };

        Ok(Node::Declare {
            type_name: type_token.lexeme().into(),
            name: Box::new(Node::Identifier {
                name: id.into_lexeme(),
                line,
                tag: None,
            }),
            init,
        })
    }

    fn assign_statement(&mut self) -> Result<Node, CompileError> {
        let mut assignments = vec![self.assignment()?];
        while self.peek_kind()? == TokenKind::Comma {
            self.scanner.next_token()?;
            assignments.push(self.assignment()?);
        }
        self.expect(TokenKind::Semicolon, "';'")?;

        Ok(chain_sequence(assignments))
    }

    /// Parses one `id "=" bool_expr` entry of an assignment list.
    fn assignment(&mut self) -> Result<Node, CompileError> {
        let id = self.expect(TokenKind::Identifier, "identifier")?;
        let line = id.line();
        self.expect(TokenKind::Assign, "'='")?;
        let value = self.bool_expr()?;

        Ok(Node::Assign {
            target: Box::new(Node::Identifier {
                name: id.into_lexeme(),
                line,
                tag: None,
            }),
            value: Box::new(value),
        })
    }
}

/// Folds a statement list into a chain of `Seq` nodes holding at most
/// three direct items each.
///
/// When the list outgrows a node, the filled node becomes the first slot
/// of a fresh one, so the earliest statement sits deepest in the chain and
/// traversal in chain order reproduces source order. A list holding a
/// single existing chain is returned unwrapped.
fn chain_sequence(list: Vec<Node>) -> Node {
    let mut list = list;
    if list.len() == 1 && list[0].kind() == NodeKind::Seq {
        return list.remove(0);
    }

    let mut items: Vec<Node> = Vec::new();
    for node in list {
        if items.len() == 3 {
            let chain = Node::Seq { items };
            items = vec![chain];
        }
        items.push(node);
    }
    Node::Seq { items }
}

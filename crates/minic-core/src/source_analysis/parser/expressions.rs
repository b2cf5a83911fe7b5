// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing methods for [`Parser`].
//!
//! The ladder runs `bool_expr` → `bool_term` → `bool_factor` → `relation`
//! → `expression` → `term` → `factor`. The comparison suffix of `relation`
//! is optional, which is where the boolean and arithmetic grammars
//! interleave: a bare arithmetic expression is a valid boolean factor, and
//! a parenthesised `bool_expr` is a valid arithmetic factor.

use ecow::eco_format;

use super::Parser;
use crate::ast::{BinaryOp, LiteralKind, Node, UnaryOp};
use crate::error::CompileError;
use crate::source_analysis::TokenKind;

impl Parser {
    /// `bool_expr ::= bool_term { "||" bool_term }`
    pub(super) fn bool_expr(&mut self) -> Result<Node, CompileError> {
        let mut root = self.bool_term()?;
        while self.peek_kind()? == TokenKind::Or {
            let operator = self.scanner.next_token()?;
            let rhs = self.bool_term()?;
            root = binary(BinaryOp::Or, root, rhs, operator.line());
        }
        Ok(root)
    }

    /// `bool_term ::= bool_factor { "&&" bool_factor }`
    fn bool_term(&mut self) -> Result<Node, CompileError> {
        let mut root = self.bool_factor()?;
        while self.peek_kind()? == TokenKind::And {
            let operator = self.scanner.next_token()?;
            let rhs = self.bool_factor()?;
            root = binary(BinaryOp::And, root, rhs, operator.line());
        }
        Ok(root)
    }

    /// `bool_factor ::= [ "!" ] relation`
    fn bool_factor(&mut self) -> Result<Node, CompileError> {
        if self.peek_kind()? == TokenKind::Not {
            let operator = self.scanner.next_token()?;
            let operand = self.relation()?;
            return Ok(Node::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
                line: operator.line(),
                tag: None,
            });
        }
        self.relation()
    }

    /// `relation ::= expr [ cmp_op expr ]`
    ///
    /// The optional suffix makes a bare arithmetic expression a valid
    /// relation, so conditions and arithmetic parse without backtracking.
    fn relation(&mut self) -> Result<Node, CompileError> {
        let lhs = self.expression()?;

        if self.peek_kind()?.is_comparison() {
            let operator = self.scanner.next_token()?;
            let op = match operator.kind() {
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::Less => BinaryOp::Less,
                TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
                TokenKind::LessEqual => BinaryOp::LessEqual,
                TokenKind::EqualEqual => BinaryOp::Equal,
                TokenKind::NotEqual => BinaryOp::NotEqual,
                _ => unreachable!("is_comparison covers exactly these kinds"),
            };
            let rhs = self.expression()?;
            return Ok(binary(op, lhs, rhs, operator.line()));
        }

        Ok(lhs)
    }

    /// `expr ::= term { ("+"|"-") term }`
    fn expression(&mut self) -> Result<Node, CompileError> {
        let mut root = self.term()?;
        while self.peek_kind()?.is_additive() {
            let operator = self.scanner.next_token()?;
            let op = if operator.kind() == TokenKind::Plus {
                BinaryOp::Add
            } else {
                BinaryOp::Sub
            };
            let rhs = self.term()?;
            root = binary(op, root, rhs, operator.line());
        }
        Ok(root)
    }

    /// `term ::= [ "+"|"-" ] factor { ("*"|"/") factor }`
    ///
    /// A leading `-` here reaches the parser only when the scanner did not
    /// fold it into a literal (it was not directly followed by a digit);
    /// it wraps the parsed factor in a negate node before the
    /// multiplicative loop, so `-a * b` negates `a`, not the product.
    fn term(&mut self) -> Result<Node, CompileError> {
        let mut negate_line = None;
        if self.peek_kind()?.is_additive() {
            let operator = self.scanner.next_token()?;
            if operator.kind() == TokenKind::Minus {
                negate_line = Some(operator.line());
            } // a leading `+` is absorbed without effect
        }

        let mut root = self.factor()?;
        if let Some(line) = negate_line {
            root = Node::Unary {
                op: UnaryOp::Negate,
                operand: Box::new(root),
                line,
                tag: None,
            };
        }

        while self.peek_kind()?.is_multiplicative() {
            let operator = self.scanner.next_token()?;
            let op = if operator.kind() == TokenKind::Star {
                BinaryOp::Mul
            } else {
                BinaryOp::Div
            };
            let rhs = self.factor()?;
            root = binary(op, root, rhs, operator.line());
        }
        Ok(root)
    }

    /// `factor ::= id | int_lit | float_lit | "(" bool_expr ")"`
    fn factor(&mut self) -> Result<Node, CompileError> {
        let token = self.scanner.next_token()?;
        let line = token.line();

        match token.kind() {
            TokenKind::LeftParen => {
                let expr = self.bool_expr()?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(expr)
            }
            TokenKind::Identifier => Ok(Node::Identifier {
                name: token.into_lexeme(),
                line,
                tag: None,
            }),
            TokenKind::IntLiteral => Ok(Node::Literal {
                kind: LiteralKind::Int,
                text: token.into_lexeme(),
                line,
            }),
            TokenKind::FloatLiteral => Ok(Node::Literal {
                kind: LiteralKind::Float,
                text: token.into_lexeme(),
                line,
            }),
            _ => Err(CompileError::syntax(
                eco_format!(
                    "unexpected symbol '{}', expected a factor (an identifier, a constant, or a parenthesized expression)",
                    token.lexeme()
                ),
                line,
            )),
        }
    }
}

/// Builds a binary node with an empty tag slot.
fn binary(op: BinaryOp, lhs: Node, rhs: Node, line: u32) -> Node {
    Node::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        line,
        tag: None,
    }
}

// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source analysis for Minic: scanning and parsing.
//!
//! # Lexical Analysis
//!
//! The [`Scanner`] converts source text into [`Token`]s on demand with one
//! token of lookahead. The [`tokenize`] helper drains a whole source text
//! at once for tests and tools.
//!
//! ```
//! use minic_core::source_analysis::{tokenize, TokenKind};
//!
//! let tokens = tokenize("a = 1;").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Identifier,
//!         TokenKind::Assign,
//!         TokenKind::IntLiteral,
//!         TokenKind::Semicolon,
//!     ]
//! );
//! ```
//!
//! # Parsing
//!
//! The [`Parser`] drives a scanner and builds the [`Node`](crate::ast::Node)
//! tree; see the [`parser`] module for the grammar.
//!
//! Both stages fail fast with a [`CompileError`](crate::CompileError) and
//! are deterministic: identical input always yields the identical token
//! stream and tree.

mod parser;
mod scanner;
mod token;


pub use parser::Parser;
pub use scanner::{Scanner, tokenize};
pub use token::{Token, TokenKind};

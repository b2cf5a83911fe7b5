// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Minic compiler front end.
//!
//! Minic is a minimal imperative language: integer and float declarations,
//! assignment, `if`/`else`, `while`, blocks, `out` output statements, and
//! boolean/arithmetic expressions. This crate turns source text into a
//! typed abstract syntax tree, or fails with a located error:
//!
//! - **Scanning** — [`source_analysis::Scanner`] converts characters into
//!   tokens on demand, with one token of lookahead
//! - **Parsing** — [`source_analysis::Parser`] drives the scanner and
//!   builds the [`ast::Node`] tree by recursive descent
//! - **Semantic analysis** — [`semantic_analysis::analyse`] assigns and
//!   checks type tags in a single bottom-up pass
//!
//! The pipeline is synchronous and single-threaded; each scanner/parser
//! owns private cursor state, so concurrent compilations use one instance
//! each. Identical input always yields the identical token stream, tree,
//! and tag assignment. Any stage failure aborts the whole compilation with
//! a [`CompileError`]; there is no recovery or partial-result mode.
//!
//! # Example
//!
//! ```
//! use minic_core::{compile, CompileError};
//!
//! let program = compile("{ int a = 1; if (a < 10) out (a + 1); }")?;
//! assert!(!program.is_leaf());
//! # Ok::<(), CompileError>(())
//! ```

pub mod ast;
pub mod error;
pub mod semantic_analysis;
pub mod source_analysis;

pub use ast::{Node, NodeKind, TypeTag};
pub use error::CompileError;

use source_analysis::{Parser, Scanner};

/// Parses source text into an untyped tree.
///
/// # Errors
///
/// Returns the first lexical or syntax error.
pub fn parse(source: &str) -> Result<Node, CompileError> {
    Parser::new(Scanner::new(source)).parse()
}

/// Runs the full front end: scan, parse, and analyse.
///
/// On success the returned tree carries type tags on its value-bearing
/// nodes and should be treated as read-only from here on.
///
/// # Errors
///
/// Returns the first lexical, syntax, or semantic error.
pub fn compile(source: &str) -> Result<Node, CompileError> {
    let mut program = parse(source)?;
    semantic_analysis::analyse(&mut program)?;
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pipeline_on_a_representative_program() {
        let source = "{
            int total = 0, i = 0;
            while (i < 10) {
                total = total + i;
                i = i + 1;
            }
            if (total >= 45) out (total); else out (0 - total);
        }";
        let program = compile(source).expect("program should compile");
        assert_eq!(program.kind(), NodeKind::Program);
    }

    #[test]
    fn each_error_kind_surfaces() {
        assert!(matches!(
            compile("int a = $;"),
            Err(CompileError::Lexical { .. })
        ));
        assert!(matches!(
            compile("int a = ;"),
            Err(CompileError::Syntax { .. })
        ));
        assert!(matches!(
            compile("{ float f = 1.0; if (f) ; }"),
            Err(CompileError::Semantic { .. })
        ));
    }

    #[test]
    fn compilation_is_deterministic() {
        let source = "{ int a = 1; a = a * 2, a = a + 1; out (a); }";
        let first = compile(source).expect("compiles");
        let second = compile(source).expect("compiles");
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn comments_do_not_change_the_tree() {
        let bare = compile("{ int a = 1; out (a); }").expect("compiles");

        // A trailing comment leaves the tree identical, lines included.
        let trailing = compile("{ int a = 1; out (a); } // done").expect("compiles");
        assert_eq!(bare, trailing);

        // Interleaved comment lines shift line numbers but nothing else.
        let interleaved =
            compile("// declare\n{ int a = 1;\n// use\nout (a); }").expect("compiles");
        assert_eq!(bare.to_string(), interleaved.to_string());
    }
}

// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic analysis: bottom-up type assignment over a parsed tree.
//!
//! [`analyse`] makes a single recursive pass, tagging each value-bearing
//! node only after all of its children carry a tag, then checking the
//! node's own kind-specific rule:
//!
//! | Kind | Operands | Result |
//! |------|----------|--------|
//! | `+ - * /` | each `Int` or `Float` | `Int` iff both `Int`, else `Float` |
//! | `&&` `\|\|` | both `Int` | `Int` |
//! | `< > <= >= == !=` | each `Int` or `Float` | `Int` |
//! | `!` | `Int` | `Int` |
//! | unary `-` | `Int` or `Float` | the operand's tag |
//! | `if` condition | `Int` | the `if` is tagged `Untyped` |
//! | identifier | — | its declared type |
//!
//! Statement kinds (sequences, assignments, declarations, output, loops)
//! are visited for their children but never tagged themselves. There is no
//! widening or implicit conversion beyond the arithmetic result rule.
//!
//! The pass mutates the tree in place (tags only, never structure) and
//! aborts on the first violated rule. Identifier types come from a
//! whole-program [`SymbolTable`] populated as declarations are reached, so
//! a use before (or without) its declaration is a semantic error.

mod symbol_table;

pub use symbol_table::SymbolTable;

use crate::ast::{Node, TypeTag, UnaryOp};
use crate::error::CompileError;
use ecow::eco_format;

/// Runs semantic analysis over a parsed program, tagging nodes in place.
///
/// # Errors
///
/// Returns the first violated type rule as a semantic error. The tree may
/// be partially tagged afterwards and should be discarded.
pub fn analyse(program: &mut Node) -> Result<(), CompileError> {
    Analyser::new().visit(program)
}

/// The analysis pass: a symbol table plus the recursive walk.
#[derive(Debug, Default)]
struct Analyser {
    symbols: SymbolTable,
}

impl Analyser {
    fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
        }
    }

    fn visit(&mut self, node: &mut Node) -> Result<(), CompileError> {
        match node {
            Node::Program { body } => self.visit(body),
            Node::Empty | Node::Literal { .. } => Ok(()),

            Node::Seq { items } => {
                for item in items {
                    self.visit(item)?;
                }
                Ok(())
            }

            Node::If {
                condition,
                then_branch,
                else_branch,
                line,
                tag,
            } => {
                self.visit(condition)?;
                self.visit(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.visit(else_branch)?;
                }
                if condition.type_tag() != Some(TypeTag::Int) {
                    return Err(CompileError::semantic(
                        "if-condition must be integer",
                        Some(*line),
                    ));
                }
                *tag = Some(TypeTag::Untyped);
                Ok(())
            }

            Node::While {
                condition, body, ..
            } => {
                self.visit(condition)?;
                self.visit(body)
            }

            Node::Output { value } => self.visit(value),

            Node::Declare {
                type_name,
                name,
                init,
            } => {
                // Bind the name before visiting children, so the name node
                // itself, the initialiser, and every later use resolve.
                let tag = TypeTag::from_type_name(type_name).ok_or_else(|| {
                    CompileError::semantic(
                        eco_format!("unknown type '{type_name}'"),
                        name.line(),
                    )
                })?;
                if let Node::Identifier { name, .. } = name.as_ref() {
                    self.symbols.define(name, tag);
                }
                self.visit(name)?;
                if let Some(init) = init {
                    self.visit(init)?;
                }
                Ok(())
            }

            Node::Assign { target, value } => {
                self.visit(target)?;
                self.visit(value)
            }

            Node::Binary {
                op,
                lhs,
                rhs,
                line,
                tag,
            } => {
                self.visit(lhs)?;
                self.visit(rhs)?;
                let derived = if op.is_boolean() {
                    boolean_result(lhs, rhs, *line)?
                } else {
                    // Arithmetic and comparison share the operand rule;
                    // only arithmetic lets the operand types through.
                    let result = arithmetic_result(lhs, rhs, *line)?;
                    if op.is_arithmetic() {
                        result
                    } else {
                        TypeTag::Int
                    }
                };
                *tag = Some(derived);
                Ok(())
            }

            Node::Unary {
                op,
                operand,
                line,
                tag,
            } => {
                self.visit(operand)?;
                let derived = match op {
                    UnaryOp::Not => {
                        if operand.type_tag() != Some(TypeTag::Int) {
                            return Err(CompileError::semantic(
                                "logical not only applies to integer operands",
                                Some(*line),
                            ));
                        }
                        TypeTag::Int
                    }
                    UnaryOp::Negate => numeric_operand(operand, "operand", *line)?,
                };
                *tag = Some(derived);
                Ok(())
            }

            Node::Identifier { name, line, tag } => match self.symbols.lookup(name) {
                Some(declared) => {
                    *tag = Some(declared);
                    Ok(())
                }
                None => Err(CompileError::semantic(
                    eco_format!("undeclared variable '{name}'"),
                    Some(*line),
                )),
            },
        }
    }
}

/// Checks both operands are numeric and derives the arithmetic result:
/// `Int` iff both operands are `Int`, else `Float`.
fn arithmetic_result(lhs: &Node, rhs: &Node, line: u32) -> Result<TypeTag, CompileError> {
    let left = numeric_operand(lhs, "left hand side", line)?;
    let right = numeric_operand(rhs, "right hand side", line)?;
    if left == TypeTag::Int && right == TypeTag::Int {
        Ok(TypeTag::Int)
    } else {
        Ok(TypeTag::Float)
    }
}

/// Checks both operands are integers; boolean logic is integer-only.
fn boolean_result(lhs: &Node, rhs: &Node, line: u32) -> Result<TypeTag, CompileError> {
    if lhs.type_tag() != Some(TypeTag::Int) || rhs.type_tag() != Some(TypeTag::Int) {
        return Err(CompileError::semantic(
            "boolean logic only applies to integer operands",
            Some(line),
        ));
    }
    Ok(TypeTag::Int)
}

/// Requires a numeric tag on the operand and returns it.
fn numeric_operand(operand: &Node, side: &str, line: u32) -> Result<TypeTag, CompileError> {
    match operand.type_tag() {
        Some(tag) if tag.is_numeric() => Ok(tag),
        _ => Err(CompileError::semantic(
            eco_format!("{side} of operation must be integer or float"),
            Some(line),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;
    use crate::source_analysis::{Parser, Scanner};

    /// Parses and analyses a program, returning the typed tree.
    fn analysed(source: &str) -> Node {
        let mut program = Parser::new(Scanner::new(source))
            .parse()
            .expect("program should parse");
        analyse(&mut program).expect("program should analyse");
        program
    }

    fn analyse_err(source: &str) -> CompileError {
        let mut program = Parser::new(Scanner::new(source))
            .parse()
            .expect("program should parse");
        analyse(&mut program).expect_err("analysis should fail")
    }

    /// Finds the first node of the given kind in a pre-order walk.
    fn find(node: &Node, kind: NodeKind) -> Option<&Node> {
        if node.kind() == kind {
            return Some(node);
        }
        node.children()
            .into_iter()
            .flatten()
            .find_map(|child| find(child, kind))
    }

    #[test]
    fn int_arithmetic_stays_int() {
        let program = analysed("{ int a = 1; int b; b = a + 2 * 3; }");
        let add = find(&program, NodeKind::Add).expect("program contains an addition");
        assert_eq!(add.type_tag(), Some(TypeTag::Int));
        let mul = find(&program, NodeKind::Mul).expect("program contains a multiplication");
        assert_eq!(mul.type_tag(), Some(TypeTag::Int));
    }

    #[test]
    fn mixed_arithmetic_widens_to_float() {
        let program = analysed("{ int a = 1; float f = 0.5; out (a + f); }");
        let add = find(&program, NodeKind::Add).expect("program contains an addition");
        assert_eq!(add.type_tag(), Some(TypeTag::Float));
    }

    #[test]
    fn identifier_takes_its_declared_type() {
        let program = analysed("{ float f = 1.0; out (f); }");
        let output = find(&program, NodeKind::Output).expect("program contains an output");
        let [Some(value), _, _] = output.children() else {
            panic!("output has a value child");
        };
        assert_eq!(value.type_tag(), Some(TypeTag::Float));
    }

    #[test]
    fn initialiser_sees_its_own_declaration() {
        // Declarations bind before their children are visited.
        let program = analysed("int a = 1, b = a + 1;");
        let seq = find(&program, NodeKind::Seq).expect("declarations chain");
        assert_eq!(seq.children().iter().flatten().count(), 2);
    }

    #[test]
    fn if_condition_of_int_is_accepted_and_if_tagged_untyped() {
        let program = analysed("{ int a = 1; if (a < 10) a = 2; }");
        let if_node = find(&program, NodeKind::If).expect("program contains an if");
        assert_eq!(if_node.type_tag(), Some(TypeTag::Untyped));

        // The condition itself is a comparison tagged Int.
        let less = find(&program, NodeKind::Less).expect("condition is a comparison");
        assert_eq!(less.type_tag(), Some(TypeTag::Int));
    }

    #[test]
    fn if_condition_of_float_is_a_semantic_error() {
        let error = analyse_err("{ float f = 1.0; if (f) f = 2.0; }");
        assert_eq!(
            error.to_string(),
            "semantic error: if-condition must be integer, line 1"
        );
    }

    #[test]
    fn branch_tags_are_computed_independently_of_the_condition() {
        let program = analysed("{ int a = 1; float f; if (a) f = 0.5 + 1.0; }");
        let add = find(&program, NodeKind::Add).expect("branch contains an addition");
        assert_eq!(add.type_tag(), Some(TypeTag::Float));
    }

    #[test]
    fn boolean_logic_requires_integer_operands() {
        let program = analysed("{ int a = 1; int b = 2; if (a < 1 && b > 2) ; }");
        let and = find(&program, NodeKind::And).expect("condition contains &&");
        assert_eq!(and.type_tag(), Some(TypeTag::Int));

        let error = analyse_err("{ float f = 1.0; int a; if (f && a) ; }");
        assert!(matches!(error, CompileError::Semantic { .. }));
        assert_eq!(
            error.to_string(),
            "semantic error: boolean logic only applies to integer operands, line 1"
        );
    }

    #[test]
    fn negation_propagates_the_operand_tag() {
        let program = analysed("{ float f = 1.5; out (-f); }");
        let negate = find(&program, NodeKind::Negate).expect("output negates f");
        assert_eq!(negate.type_tag(), Some(TypeTag::Float));
    }

    #[test]
    fn logical_not_requires_an_integer() {
        let program = analysed("{ int a = 1; out (!a); }");
        let not = find(&program, NodeKind::Not).expect("output negates a");
        assert_eq!(not.type_tag(), Some(TypeTag::Int));

        let error = analyse_err("{ float f = 1.0; out (!f); }");
        assert_eq!(
            error.to_string(),
            "semantic error: logical not only applies to integer operands, line 1"
        );
    }

    #[test]
    fn undeclared_variable_is_a_semantic_error() {
        let error = analyse_err("a = 1;");
        assert_eq!(
            error.to_string(),
            "semantic error: undeclared variable 'a', line 1"
        );
    }

    #[test]
    fn use_before_declaration_is_a_semantic_error() {
        let error = analyse_err("{ a = 1; int a; }");
        assert!(matches!(error, CompileError::Semantic { .. }));
    }

    #[test]
    fn arithmetic_on_an_if_less_program_rejects_untagged_operands() {
        // A comparison is a valid operand only where integers are; feeding
        // one to arithmetic is fine (it is Int), but a while loop cannot
        // appear in expression position at all, so the only way to violate
        // the operand rule is a non-numeric tag.
        let program = analysed("{ int a = 1; out ((a < 2) + 1); }");
        let add = find(&program, NodeKind::Add).expect("output adds");
        assert_eq!(add.type_tag(), Some(TypeTag::Int));
    }

    #[test]
    fn semantic_error_reports_the_operator_line() {
        let error = analyse_err("{\n  float f = 1.0;\n  int a;\n  a = f && 1;\n}");
        assert_eq!(error.line(), Some(4));
    }

    #[test]
    fn statements_are_never_tagged() {
        let program = analysed("{ int a = 1; a = 2; out (a); }");
        for kind in [
            NodeKind::Program,
            NodeKind::Seq,
            NodeKind::Assign,
            NodeKind::Declare,
            NodeKind::Output,
        ] {
            if let Some(node) = find(&program, kind) {
                assert_eq!(node.type_tag(), None, "{kind} must stay untagged");
            }
        }
    }
}

// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract syntax tree (AST) definitions for Adder.
//!
//! The node taxonomy mirrors Python's `ast` module, restricted to the
//! subset the parser accepts: a root per parse mode, four statement
//! forms, and five expression forms. Nodes are tagged variants per
//! category, and every node owns its children: the tree is strict, with
//! no sharing and no cycles.
//!
//! # Example
//!
//! ```
//! use adder_core::ast::{Constant, Expression, Root, Statement, SyntaxTree};
//!
//! // The tree for the one-statement module `3`.
//! let tree = SyntaxTree::new(Root::Module {
//!     body: vec![Statement::Expr {
//!         value: Expression::Constant(Constant::Int(3)),
//!     }],
//! });
//! assert!(tree.to_string().starts_with("Module("));
//! ```

use ecow::EcoString;

/// A parsed program, owning its root node.
///
/// `Display` renders the canonical debug form produced by
/// [`render`](crate::render::render).
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    root: Root,
}

impl SyntaxTree {
    /// Creates a tree from its root.
    #[must_use]
    pub fn new(root: Root) -> Self {
        Self { root }
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// Consumes the tree and returns its root.
    #[must_use]
    pub fn into_root(self) -> Root {
        self.root
    }
}

impl std::fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::render::render(self))
    }
}

/// The root of a syntax tree, one variant per parse mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Root {
    /// A script: an ordered sequence of statements.
    Module {
        /// Top-level statements.
        body: Vec<Statement>,
    },
    /// One unit of interactive input.
    Interactive {
        /// Top-level statements.
        body: Vec<Statement>,
    },
    /// A single-expression program.
    Expression {
        /// The expression.
        body: Expression,
    },
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `del a, b`. Each target is a [`Expression::Name`] with
    /// [`ExprContext::Del`].
    Delete {
        /// The names being deleted. Never empty.
        targets: Vec<Expression>,
    },
    /// `a = b = value`. Chained assignments flatten into one node, and
    /// every `Name` target carries [`ExprContext::Store`].
    Assign {
        /// Assignment targets, in source order. Never empty.
        targets: Vec<Expression>,
        /// The assigned value.
        value: Expression,
    },
    /// `if`/`elif`/`else`. An `elif` chain nests: the nested `If` is the
    /// sole statement of the outer `orelse` block.
    If {
        /// The condition.
        test: Expression,
        /// Statements of the `if` branch.
        then: Vec<Statement>,
        /// Statements of the `else` branch; empty when absent.
        orelse: Vec<Statement>,
    },
    /// An expression in statement position.
    Expr {
        /// The expression.
        value: Expression,
    },
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal value.
    Constant(Constant),
    /// A name, tagged with how it is being used.
    Name {
        /// The identifier text.
        id: EcoString,
        /// Read, write, or delete.
        ctx: ExprContext,
    },
    /// A unary operation.
    UnaryOp {
        /// The operator.
        op: UnaryOpKind,
        /// The operand.
        operand: Box<Expression>,
    },
    /// A binary operation.
    BinaryOp {
        /// The operator.
        op: BinaryOpKind,
        /// Left operand.
        lhs: Box<Expression>,
        /// Right operand.
        rhs: Box<Expression>,
    },
    /// A chained comparison: `a < b <= c` is a single node whose `ops`
    /// list parallels its `comparators` list.
    Compare {
        /// Leftmost operand.
        lhs: Box<Expression>,
        /// Comparison operators, in source order. `ops.len() ==
        /// comparators.len() >= 1`.
        ops: Vec<CompareOpKind>,
        /// Operands following each operator.
        comparators: Vec<Expression>,
    },
}

impl Expression {
    /// Creates a name expression.
    #[must_use]
    pub fn name(id: impl Into<EcoString>, ctx: ExprContext) -> Self {
        Expression::Name { id: id.into(), ctx }
    }
}

/// A literal constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A string, stored as lexed (quotes and prefix included).
    Str(EcoString),
    /// `True` or `False`.
    Bool(bool),
    /// `None`.
    None,
}

/// How a name is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprContext {
    /// The name is read.
    Load,
    /// The name is an assignment target.
    Store,
    /// The name is a deletion target.
    Del,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    /// `~`
    Invert,
    /// `not`
    Not,
    /// `+`
    Positive,
    /// `-`
    Negative,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOpKind {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `@`
    Matmul,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `**`
    Power,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `&`
    BitwiseAnd,
    /// `//`
    FloorDivide,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOpKind {
    /// `==`
    Equals,
    /// `!=`
    NotEquals,
    /// `<`
    LessThan,
    /// `<=`
    LessEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterEqual,
    /// `is`
    Is,
    /// `is not`
    IsNot,
    /// `in`
    In,
    /// `not in`
    NotIn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_ownership_is_by_value() {
        let tree = SyntaxTree::new(Root::Expression {
            body: Expression::Constant(Constant::Int(1)),
        });
        let root = tree.into_root();
        assert!(matches!(root, Root::Expression { .. }));
    }

    #[test]
    fn expression_name_helper() {
        let name = Expression::name("total", ExprContext::Store);
        assert_eq!(
            name,
            Expression::Name {
                id: "total".into(),
                ctx: ExprContext::Store,
            }
        );
    }

    #[test]
    fn constants_compare_by_value() {
        assert_eq!(Constant::Int(3), Constant::Int(3));
        assert_ne!(Constant::Int(3), Constant::Float(3.0));
        assert_eq!(Constant::Str("'a'".into()), Constant::Str("'a'".into()));
        assert_eq!(Constant::None, Constant::None);
    }
}

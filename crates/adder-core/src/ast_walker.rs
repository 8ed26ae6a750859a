// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared AST traversal for analysis passes and tests.
//!
//! Provides pre-order walks over the tree, calling a visitor closure on
//! every node:
//!
//! - [`walk_expression`] — every node of one expression tree.
//! - [`walk_statement`] — a statement and its nested statements.
//! - [`walk_expressions`] — every expression anywhere under a root,
//!   including those nested in statements.
//!
//! Passes that need state threaded through the traversal keep their own
//! recursion; these cover the common read-only visitor pattern.

use crate::ast::{Expression, Root, Statement};

/// Recursively walks an expression tree in pre-order, calling `f` on
/// every node. The visitor sees the current node before its children.
pub fn walk_expression<F>(expression: &Expression, f: &mut F)
where
    F: FnMut(&Expression),
{
    f(expression);
    match expression {
        Expression::Constant(_) | Expression::Name { .. } => {}
        Expression::UnaryOp { operand, .. } => walk_expression(operand, f),
        Expression::BinaryOp { lhs, rhs, .. } => {
            walk_expression(lhs, f);
            walk_expression(rhs, f);
        }
        Expression::Compare {
            lhs, comparators, ..
        } => {
            walk_expression(lhs, f);
            for comparator in comparators {
                walk_expression(comparator, f);
            }
        }
    }
}

/// Recursively walks a statement in pre-order, calling `f` on the
/// statement itself and every statement nested inside it.
pub fn walk_statement<F>(statement: &Statement, f: &mut F)
where
    F: FnMut(&Statement),
{
    f(statement);
    match statement {
        Statement::Delete { .. } | Statement::Assign { .. } | Statement::Expr { .. } => {}
        Statement::If { then, orelse, .. } => {
            for nested in then.iter().chain(orelse) {
                walk_statement(nested, f);
            }
        }
    }
}

/// Walks every expression under a root in pre-order: the expressions of
/// each statement (in source order), or the body of an expression root.
pub fn walk_expressions<F>(root: &Root, f: &mut F)
where
    F: FnMut(&Expression),
{
    match root {
        Root::Module { body } | Root::Interactive { body } => {
            for statement in body {
                walk_statement(statement, &mut |statement| {
                    for expression in statement_expressions(statement) {
                        walk_expression(expression, f);
                    }
                });
            }
        }
        Root::Expression { body } => walk_expression(body, f),
    }
}

/// The expressions held directly by one statement, excluding those of
/// nested statements.
fn statement_expressions(statement: &Statement) -> Vec<&Expression> {
    match statement {
        Statement::Delete { targets } => targets.iter().collect(),
        Statement::Assign { targets, value } => {
            targets.iter().chain(std::iter::once(value)).collect()
        }
        Statement::If { test, .. } => vec![test],
        Statement::Expr { value } => vec![value],
    }
}

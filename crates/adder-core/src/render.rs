// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Canonical debug rendering of syntax trees.
//!
//! [`render`] produces the textual tree form consumed by the end-to-end
//! tests, and `Display` on [`SyntaxTree`] delegates to it. The form is
//! deterministic: two parses of the same source render identically.
//!
//! Each node prints as `Kind(` followed by one `field=…` per line,
//! indented four spaces per level and separated by commas; list fields
//! render as `field=[` with the elements on their own lines. Leaf nodes
//! (`Constant`, `Name`) print inline.
//!
//! ```text
//! Module(
//!     body=[
//!         Expr(
//!             value=Constant(value=Int: 3))])
//! ```

use crate::ast::{
    BinaryOpKind, CompareOpKind, Constant, ExprContext, Expression, Root, Statement, SyntaxTree,
    UnaryOpKind,
};

/// Spaces per indentation level.
const INDENTATION_WIDTH: usize = 4;

/// Renders a syntax tree to its canonical debug string.
#[must_use]
pub fn render(tree: &SyntaxTree) -> String {
    let mut renderer = Renderer::default();
    renderer.render_root(tree.root());
    renderer.out
}

/// Accumulates the rendering, tracking the current indentation level.
#[derive(Default)]
struct Renderer {
    out: String,
    indentation: usize,
}

impl Renderer {
    fn append(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Starts a new line at the current indentation and appends `line`.
    fn append_line(&mut self, line: &str) {
        self.out.push('\n');
        for _ in 0..self.indentation * INDENTATION_WIDTH {
            self.out.push(' ');
        }
        self.out.push_str(line);
    }

    /// Renders `name=[…]` with one element per line.
    fn append_list<T>(&mut self, name: &str, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        self.append_line(name);
        self.append("=[");
        self.indentation += 1;
        if let Some((last, rest)) = items.split_last() {
            for item in rest {
                self.append_line("");
                each(self, item);
                self.append(",");
            }
            self.append_line("");
            each(self, last);
        }
        self.append("]");
        self.indentation -= 1;
    }

    fn render_root(&mut self, root: &Root) {
        match root {
            Root::Module { body } => {
                self.append("Module(");
                self.indentation += 1;
                self.append_list("body", body, |renderer, statement| {
                    renderer.render_statement(statement);
                });
                self.append(")");
                self.indentation -= 1;
                self.append_line("");
            }
            Root::Interactive { body } => {
                self.append("Interactive(");
                self.indentation += 1;
                self.append_list("body", body, |renderer, statement| {
                    renderer.render_statement(statement);
                });
                self.append(")");
                self.indentation -= 1;
                self.append_line("");
            }
            Root::Expression { body } => {
                self.append("Expression(");
                self.indentation += 1;
                self.append_line("body=");
                self.indentation += 1;
                self.render_expression(body);
                self.append(")");
                self.indentation -= 2;
                self.append_line("");
            }
        }
    }

    fn render_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Delete { targets } => {
                self.append("Delete(");
                self.indentation += 1;
                self.append_list("targets", targets, |renderer, target| {
                    renderer.render_expression(target);
                });
                self.append(")");
                self.indentation -= 1;
            }
            Statement::Assign { targets, value } => {
                self.append("Assign(");
                self.indentation += 1;
                self.append_list("targets", targets, |renderer, target| {
                    renderer.render_expression(target);
                });
                self.append(",");
                self.append_line("value=");
                self.render_expression(value);
                self.append(")");
                self.indentation -= 1;
            }
            Statement::If { test, then, orelse } => {
                self.append("If(");
                self.indentation += 1;
                self.append_line("test=");
                self.render_expression(test);
                self.append(",");
                self.append_list("then", then, |renderer, statement| {
                    renderer.render_statement(statement);
                });
                self.append(",");
                self.append_list("else", orelse, |renderer, statement| {
                    renderer.render_statement(statement);
                });
                self.append(")");
                self.indentation -= 1;
            }
            Statement::Expr { value } => {
                self.append("Expr(");
                self.indentation += 1;
                self.append_line("value=");
                self.render_expression(value);
                self.append(")");
                self.indentation -= 1;
            }
        }
    }

    fn render_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Constant(constant) => {
                self.append("Constant(value=");
                let label = constant_label(constant);
                self.append(&label);
                self.append(")");
            }
            Expression::Name { id, ctx } => {
                self.append("Name(id='");
                self.append(id);
                self.append("', ctx=");
                self.append(context_label(*ctx));
                self.append(")");
            }
            Expression::UnaryOp { op, operand } => {
                self.append("UnaryOp(");
                self.indentation += 1;
                self.append_line("op=");
                self.append(unary_op_label(*op));
                self.append(",");
                self.append_line("operand=");
                self.render_expression(operand);
                self.indentation -= 1;
                self.append(")");
            }
            Expression::BinaryOp { op, lhs, rhs } => {
                self.append("BinaryOp(");
                self.indentation += 1;
                self.append_line("lhs=");
                self.render_expression(lhs);
                self.append(",");
                self.append_line("op=");
                self.append(binary_op_label(*op));
                self.append(",");
                self.append_line("rhs=");
                self.render_expression(rhs);
                self.indentation -= 1;
                self.append(")");
            }
            Expression::Compare {
                lhs,
                ops,
                comparators,
            } => {
                self.append("Compare(");
                self.indentation += 1;
                self.append_line("lhs=");
                self.render_expression(lhs);
                self.append(",");
                self.append_list("ops", ops, |renderer, op| {
                    renderer.append(compare_op_label(*op));
                });
                self.append(",");
                self.append_list("comparators", comparators, |renderer, comparator| {
                    renderer.render_expression(comparator);
                });
                self.append(")");
                self.indentation -= 1;
            }
        }
    }
}

fn constant_label(constant: &Constant) -> String {
    match constant {
        Constant::Int(value) => format!("Int: {value}"),
        Constant::Float(value) => format!("Double: {value}"),
        Constant::Str(value) => format!("String: {value}"),
        Constant::Bool(true) => "Bool: true".to_string(),
        Constant::Bool(false) => "Bool: false".to_string(),
        Constant::None => "None".to_string(),
    }
}

const fn context_label(ctx: ExprContext) -> &'static str {
    match ctx {
        ExprContext::Load => "Load",
        ExprContext::Store => "Store",
        ExprContext::Del => "Del",
    }
}

const fn unary_op_label(op: UnaryOpKind) -> &'static str {
    match op {
        UnaryOpKind::Invert => "Invert",
        UnaryOpKind::Not => "Not",
        UnaryOpKind::Positive => "Positive",
        UnaryOpKind::Negative => "Negative",
    }
}

const fn binary_op_label(op: BinaryOpKind) -> &'static str {
    match op {
        BinaryOpKind::Add => "Add",
        BinaryOpKind::Subtract => "Subtract",
        BinaryOpKind::Multiply => "Multiply",
        BinaryOpKind::Matmul => "Matmul",
        BinaryOpKind::Divide => "Divide",
        BinaryOpKind::Modulo => "Modulo",
        BinaryOpKind::Power => "Power",
        BinaryOpKind::LeftShift => "Left shift",
        BinaryOpKind::RightShift => "Right shift",
        BinaryOpKind::BitwiseOr => "Bitwise or",
        BinaryOpKind::BitwiseXor => "Bitwise xor",
        BinaryOpKind::BitwiseAnd => "Bitwise and",
        BinaryOpKind::FloorDivide => "Floor divide",
    }
}

const fn compare_op_label(op: CompareOpKind) -> &'static str {
    match op {
        CompareOpKind::Equals => "Equals",
        CompareOpKind::NotEquals => "Not equals",
        CompareOpKind::LessThan => "Less than",
        CompareOpKind::LessEqual => "Less equal",
        CompareOpKind::GreaterThan => "Greater than",
        CompareOpKind::GreaterEqual => "Greater equal",
        CompareOpKind::Is => "Is",
        CompareOpKind::IsNot => "Is not",
        CompareOpKind::In => "In",
        CompareOpKind::NotIn => "Not in",
    }
}

#[cfg(test)]
mod tests {
    use crate::source_analysis::{Mode, parse_source};

    /// Parses `source` and returns its canonical rendering.
    fn rendered(source: &str, mode: Mode) -> String {
        parse_source(source, mode)
            .unwrap_or_else(|error| panic!("parse of {source:?} failed: {error}"))
            .to_string()
    }

    #[test]
    fn parser_modes() {
        let source = "'hello, world!'";
        assert_eq!(
            rendered(source, Mode::Module),
            "\
Module(
    body=[
        Expr(
            value=Constant(value=String: 'hello, world!'))])
"
        );
        assert_eq!(
            rendered(source, Mode::Interactive),
            "\
Interactive(
    body=[
        Expr(
            value=Constant(value=String: 'hello, world!'))])
"
        );
        assert_eq!(
            rendered(source, Mode::Expression),
            "\
Expression(
    body=Constant(value=String: 'hello, world!'))
"
        );
    }

    #[test]
    fn empty_module() {
        assert_eq!(rendered("", Mode::Module), "\
Module(
    body=[])
");
    }

    #[test]
    fn binary_addition() {
        assert_eq!(
            rendered("3 + 5", Mode::Module),
            "\
Module(
    body=[
        Expr(
            value=BinaryOp(
                lhs=Constant(value=Int: 3),
                op=Add,
                rhs=Constant(value=Int: 5)))])
"
        );
    }

    #[test]
    fn delete() {
        assert_eq!(
            rendered("del a, Foo, bar", Mode::Module),
            "\
Module(
    body=[
        Delete(
            targets=[
                Name(id='a', ctx=Del),
                Name(id='Foo', ctx=Del),
                Name(id='bar', ctx=Del)])])
"
        );
    }

    #[test]
    fn assign_single() {
        assert_eq!(
            rendered("a = 5", Mode::Module),
            "\
Module(
    body=[
        Assign(
            targets=[
                Name(id='a', ctx=Store)],
            value=Constant(value=Int: 5))])
"
        );
    }

    #[test]
    fn assign_multi() {
        assert_eq!(
            rendered("a = b = c + 5", Mode::Module),
            "\
Module(
    body=[
        Assign(
            targets=[
                Name(id='a', ctx=Store),
                Name(id='b', ctx=Store)],
            value=BinaryOp(
                lhs=Name(id='c', ctx=Load),
                op=Add,
                rhs=Constant(value=Int: 5)))])
"
        );
    }

    #[test]
    fn compare() {
        assert_eq!(
            rendered("a < 5", Mode::Module),
            "\
Module(
    body=[
        Expr(
            value=Compare(
                lhs=Name(id='a', ctx=Load),
                ops=[
                    Less than],
                comparators=[
                    Constant(value=Int: 5)]))])
"
        );
    }

    #[test]
    fn multi_compare() {
        let source = "a == b != c < d <= e > f >= g is h is not i in j not in k";
        assert_eq!(
            rendered(source, Mode::Module),
            "\
Module(
    body=[
        Expr(
            value=Compare(
                lhs=Name(id='a', ctx=Load),
                ops=[
                    Equals,
                    Not equals,
                    Less than,
                    Less equal,
                    Greater than,
                    Greater equal,
                    Is,
                    Is not,
                    In,
                    Not in],
                comparators=[
                    Name(id='b', ctx=Load),
                    Name(id='c', ctx=Load),
                    Name(id='d', ctx=Load),
                    Name(id='e', ctx=Load),
                    Name(id='f', ctx=Load),
                    Name(id='g', ctx=Load),
                    Name(id='h', ctx=Load),
                    Name(id='i', ctx=Load),
                    Name(id='j', ctx=Load),
                    Name(id='k', ctx=Load)]))])
"
        );
    }

    #[test]
    fn if_single_line() {
        assert_eq!(
            rendered("if a: b", Mode::Module),
            "\
Module(
    body=[
        If(
            test=Name(id='a', ctx=Load),
            then=[
                Expr(
                    value=Name(id='b', ctx=Load))],
            else=[])])
"
        );
    }

    #[test]
    fn if_multi_line() {
        assert_eq!(
            rendered("\nif a:\n    b\n", Mode::Module),
            "\
Module(
    body=[
        If(
            test=Name(id='a', ctx=Load),
            then=[
                Expr(
                    value=Name(id='b', ctx=Load))],
            else=[])])
"
        );
    }

    #[test]
    fn if_else() {
        assert_eq!(
            rendered("\nif a:\n    b\nelse:\n    c\n", Mode::Module),
            "\
Module(
    body=[
        If(
            test=Name(id='a', ctx=Load),
            then=[
                Expr(
                    value=Name(id='b', ctx=Load))],
            else=[
                Expr(
                    value=Name(id='c', ctx=Load))])])
"
        );
    }

    #[test]
    fn if_elif() {
        assert_eq!(
            rendered("\nif a:\n    b\nelif c:\n    d\nelse:\n    e\n", Mode::Module),
            "\
Module(
    body=[
        If(
            test=Name(id='a', ctx=Load),
            then=[
                Expr(
                    value=Name(id='b', ctx=Load))],
            else=[
                If(
                    test=Name(id='c', ctx=Load),
                    then=[
                        Expr(
                            value=Name(id='d', ctx=Load))],
                    else=[
                        Expr(
                            value=Name(id='e', ctx=Load))])])])
"
        );
    }

    #[test]
    fn nested_if_else() {
        let source = "\nif a:\n    if b:\n        c\n    elif d:\n        e\n    else:\n        g\nelif h:\n    if i:\n        j\n    elif k:\n        l\n    else:\n        m\nelse:\n    if n:\n        o\n    elif p:\n        q\n    else:\n        r\n";
        assert_eq!(
            rendered(source, Mode::Module),
            "\
Module(
    body=[
        If(
            test=Name(id='a', ctx=Load),
            then=[
                If(
                    test=Name(id='b', ctx=Load),
                    then=[
                        Expr(
                            value=Name(id='c', ctx=Load))],
                    else=[
                        If(
                            test=Name(id='d', ctx=Load),
                            then=[
                                Expr(
                                    value=Name(id='e', ctx=Load))],
                            else=[
                                Expr(
                                    value=Name(id='g', ctx=Load))])])],
            else=[
                If(
                    test=Name(id='h', ctx=Load),
                    then=[
                        If(
                            test=Name(id='i', ctx=Load),
                            then=[
                                Expr(
                                    value=Name(id='j', ctx=Load))],
                            else=[
                                If(
                                    test=Name(id='k', ctx=Load),
                                    then=[
                                        Expr(
                                            value=Name(id='l', ctx=Load))],
                                    else=[
                                        Expr(
                                            value=Name(id='m', ctx=Load))])])],
                    else=[
                        If(
                            test=Name(id='n', ctx=Load),
                            then=[
                                Expr(
                                    value=Name(id='o', ctx=Load))],
                            else=[
                                If(
                                    test=Name(id='p', ctx=Load),
                                    then=[
                                        Expr(
                                            value=Name(id='q', ctx=Load))],
                                    else=[
                                        Expr(
                                            value=Name(id='r', ctx=Load))])])])])])
"
        );
    }

    #[test]
    fn bool_and_none_constants() {
        assert_eq!(
            rendered("True", Mode::Expression),
            "\
Expression(
    body=Constant(value=Bool: true))
"
        );
        assert_eq!(
            rendered("False", Mode::Expression),
            "\
Expression(
    body=Constant(value=Bool: false))
"
        );
        assert_eq!(
            rendered("None", Mode::Expression),
            "\
Expression(
    body=Constant(value=None))
"
        );
    }

    #[test]
    fn float_constant() {
        assert_eq!(
            rendered("x = 2.5", Mode::Module),
            "\
Module(
    body=[
        Assign(
            targets=[
                Name(id='x', ctx=Store)],
            value=Constant(value=Double: 2.5))])
"
        );
    }

    #[test]
    fn unary_not() {
        assert_eq!(
            rendered("not a", Mode::Module),
            "\
Module(
    body=[
        Expr(
            value=UnaryOp(
                op=Not,
                operand=Name(id='a', ctx=Load)))])
"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let source = "\nif a:\n    b = c + 5\n";
        assert_eq!(
            rendered(source, Mode::Module),
            rendered(source, Mode::Module)
        );
    }
}

// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for Adder.
//!
//! Each expression-starting or expression-continuing token kind maps to
//! an [`ExpressionRule`]: an optional prefix action, an optional infix
//! action, and a precedence. [`Parser::parse_expression`] runs the prefix
//! action for the first token, then keeps running infix actions while the
//! current precedence stays at or above the requested minimum.
//!
//! Every prefix action pushes exactly one node onto the parser's
//! expression stack; every infix action pops its operands off the stack,
//! builds a node, and pushes the result.

use tracing::trace;

use crate::ast::{BinaryOpKind, CompareOpKind, Constant, ExprContext, Expression, UnaryOpKind};

use super::super::error::ParseError;
use super::super::token::TokenKind;
use super::{Parser, Precedence};

/// An expression parsing action.
pub(super) type ExpressionAction = fn(&mut Parser<'_>) -> Result<(), ParseError>;

/// How a token participates in expression parsing.
pub(super) struct ExpressionRule {
    /// Action when the token starts an expression.
    pub(super) prefix: Option<ExpressionAction>,
    /// Action when the token continues an expression.
    pub(super) infix: Option<ExpressionAction>,
    /// The token's precedence on the ladder.
    pub(super) precedence: Precedence,
}

impl ExpressionRule {
    const fn new(
        prefix: Option<ExpressionAction>,
        infix: Option<ExpressionAction>,
        precedence: Precedence,
    ) -> Self {
        Self {
            prefix,
            infix,
            precedence,
        }
    }
}

/// Maps a token kind to its expression rule, if it has one.
pub(super) fn expression_rule(kind: TokenKind) -> Option<ExpressionRule> {
    match kind {
        // Atoms.
        TokenKind::Identifier => Some(ExpressionRule::new(
            Some(|parser| parser.parse_name_expression()),
            None,
            Precedence::None,
        )),
        TokenKind::Integer
        | TokenKind::Float
        | TokenKind::String
        | TokenKind::True
        | TokenKind::False
        | TokenKind::None => Some(ExpressionRule::new(
            Some(|parser| parser.parse_constant_expression()),
            None,
            Precedence::None,
        )),

        // Unary prefix and additive infix.
        TokenKind::Plus | TokenKind::Minus => Some(ExpressionRule::new(
            Some(|parser| parser.parse_unary_op_expression()),
            Some(|parser| parser.parse_binary_op_expression()),
            Precedence::AddSubtract,
        )),
        TokenKind::Not => Some(ExpressionRule::new(
            Some(|parser| parser.parse_unary_op_expression()),
            None,
            Precedence::Not,
        )),
        TokenKind::Invert => Some(ExpressionRule::new(
            Some(|parser| parser.parse_unary_op_expression()),
            None,
            Precedence::BitwiseNot,
        )),

        // Binary infix.
        TokenKind::Multiply
        | TokenKind::Matmul
        | TokenKind::Divide
        | TokenKind::FloorDivide
        | TokenKind::Modulo => Some(ExpressionRule::new(
            None,
            Some(|parser| parser.parse_binary_op_expression()),
            Precedence::MultiplyDivide,
        )),
        TokenKind::Power => Some(ExpressionRule::new(
            None,
            Some(|parser| parser.parse_binary_op_expression()),
            Precedence::Power,
        )),
        TokenKind::LeftShift | TokenKind::RightShift => Some(ExpressionRule::new(
            None,
            Some(|parser| parser.parse_binary_op_expression()),
            Precedence::BitwiseShift,
        )),
        TokenKind::BitwiseAnd => Some(ExpressionRule::new(
            None,
            Some(|parser| parser.parse_binary_op_expression()),
            Precedence::BitwiseAnd,
        )),
        TokenKind::BitwiseOr => Some(ExpressionRule::new(
            None,
            Some(|parser| parser.parse_binary_op_expression()),
            Precedence::BitwiseOr,
        )),
        TokenKind::BitwiseXor => Some(ExpressionRule::new(
            None,
            Some(|parser| parser.parse_binary_op_expression()),
            Precedence::BitwiseXor,
        )),

        // Comparisons: one shared rule accumulating the chain.
        TokenKind::Equals
        | TokenKind::NotEquals
        | TokenKind::LessThan
        | TokenKind::LessEqual
        | TokenKind::GreaterThan
        | TokenKind::GreaterEqual
        | TokenKind::Is
        | TokenKind::IsNot
        | TokenKind::In
        | TokenKind::NotIn => Some(ExpressionRule::new(
            None,
            Some(|parser| parser.parse_compare_expression()),
            Precedence::Comparison,
        )),

        _ => None,
    }
}

/// The comparison operator for a token kind, if it is one.
const fn compare_op(kind: TokenKind) -> Option<CompareOpKind> {
    match kind {
        TokenKind::Equals => Some(CompareOpKind::Equals),
        TokenKind::NotEquals => Some(CompareOpKind::NotEquals),
        TokenKind::LessThan => Some(CompareOpKind::LessThan),
        TokenKind::LessEqual => Some(CompareOpKind::LessEqual),
        TokenKind::GreaterThan => Some(CompareOpKind::GreaterThan),
        TokenKind::GreaterEqual => Some(CompareOpKind::GreaterEqual),
        TokenKind::Is => Some(CompareOpKind::Is),
        TokenKind::IsNot => Some(CompareOpKind::IsNot),
        TokenKind::In => Some(CompareOpKind::In),
        TokenKind::NotIn => Some(CompareOpKind::NotIn),
        _ => None,
    }
}

/// Parses an integer literal's text, honoring a leading sign and the
/// `0x`/`0b` radix prefixes.
pub(super) fn parse_integer(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(binary) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        i64::from_str_radix(binary, 2).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}

impl Parser<'_> {
    /// Parses one expression at or above `min_precedence`.
    ///
    /// Runs the prefix action of the first token, adopting its rule's
    /// precedence, then keeps running infix actions (adopting each
    /// rule's precedence in turn) until the stream dries up, a token
    /// without an infix action appears, or the current precedence falls
    /// below `min_precedence`.
    ///
    /// Uses `stacker::maybe_grow` so deeply nested input extends the
    /// stack on the heap instead of overflowing it.
    pub(super) fn parse_expression(
        &mut self,
        min_precedence: Precedence,
    ) -> Result<(), ParseError> {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            let Some(kind) = self.peek_kind()? else {
                return Ok(());
            };

            let Some(rule) = expression_rule(kind) else {
                return Err(ParseError::UnexpectedToken { kind });
            };
            let Some(prefix) = rule.prefix else {
                return Err(ParseError::ExpectedExpression { kind: Some(kind) });
            };
            prefix(self)?;

            let mut precedence = rule.precedence;
            while !self.tokens.depleted() && precedence >= min_precedence {
                let Some(next) = self.peek_kind()? else { break };
                let Some(next_rule) = expression_rule(next) else {
                    break;
                };
                let Some(infix) = next_rule.infix else { break };
                precedence = next_rule.precedence;
                infix(self)?;
            }
            Ok(())
        })
    }

    /// Prefix action: one identifier becomes a `Name` in `Load` context.
    pub(super) fn parse_name_expression(&mut self) -> Result<(), ParseError> {
        let token = self.read_token()?.ok_or(ParseError::ExpectedKind {
            expected: TokenKind::Identifier,
            found: None,
        })?;
        trace!(%token, "parsing name expression");

        let id = token.value.unwrap_or_default();
        self.push_expression(Expression::Name {
            id,
            ctx: ExprContext::Load,
        });
        Ok(())
    }

    /// Prefix action: a literal or literal-like keyword becomes a
    /// `Constant`.
    pub(super) fn parse_constant_expression(&mut self) -> Result<(), ParseError> {
        let token = self
            .read_token()?
            .ok_or(ParseError::ExpectedExpression { kind: None })?;
        trace!(%token, "parsing constant expression");

        let value = match token.kind {
            TokenKind::Integer => {
                let text = token.value.unwrap_or_default();
                let value = parse_integer(&text)
                    .ok_or_else(|| ParseError::InvalidLiteral { text: text.clone() })?;
                Constant::Int(value)
            }
            TokenKind::Float => {
                let text = token.value.unwrap_or_default();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidLiteral { text: text.clone() })?;
                Constant::Float(value)
            }
            TokenKind::String => Constant::Str(token.value.unwrap_or_default()),
            TokenKind::True => Constant::Bool(true),
            TokenKind::False => Constant::Bool(false),
            _ => Constant::None,
        };

        self.push_expression(Expression::Constant(value));
        Ok(())
    }

    /// Prefix action: a unary operator and its operand, parsed at the
    /// operator's own precedence.
    pub(super) fn parse_unary_op_expression(&mut self) -> Result<(), ParseError> {
        let token = self
            .read_token()?
            .ok_or(ParseError::ExpectedExpression { kind: None })?;
        trace!(%token, "parsing unary op expression");

        let op = match token.kind {
            TokenKind::Plus => UnaryOpKind::Positive,
            TokenKind::Minus => UnaryOpKind::Negative,
            TokenKind::Not => UnaryOpKind::Not,
            TokenKind::Invert => UnaryOpKind::Invert,
            kind => return Err(ParseError::UnexpectedToken { kind }),
        };
        let precedence =
            expression_rule(token.kind).map_or(Precedence::None, |rule| rule.precedence);

        self.parse_expression(precedence)?;
        let operand = self
            .pop_expression()
            .ok_or(ParseError::ExpectedExpression { kind: None })?;

        self.push_expression(Expression::UnaryOp {
            op,
            operand: Box::new(operand),
        });
        Ok(())
    }

    /// Infix action: pops the left operand, reads the operator, and
    /// parses the right operand at the operator's precedence. The `>=`
    /// comparison in the main loop makes every operator fold left.
    pub(super) fn parse_binary_op_expression(&mut self) -> Result<(), ParseError> {
        let token = self
            .read_token()?
            .ok_or(ParseError::ExpectedExpression { kind: None })?;
        trace!(%token, "parsing binary op expression");

        let op = match token.kind {
            TokenKind::Plus => BinaryOpKind::Add,
            TokenKind::Minus => BinaryOpKind::Subtract,
            TokenKind::Multiply => BinaryOpKind::Multiply,
            TokenKind::Matmul => BinaryOpKind::Matmul,
            TokenKind::Divide => BinaryOpKind::Divide,
            TokenKind::Modulo => BinaryOpKind::Modulo,
            TokenKind::Power => BinaryOpKind::Power,
            TokenKind::LeftShift => BinaryOpKind::LeftShift,
            TokenKind::RightShift => BinaryOpKind::RightShift,
            TokenKind::BitwiseOr => BinaryOpKind::BitwiseOr,
            TokenKind::BitwiseXor => BinaryOpKind::BitwiseXor,
            TokenKind::BitwiseAnd => BinaryOpKind::BitwiseAnd,
            TokenKind::FloorDivide => BinaryOpKind::FloorDivide,
            kind => return Err(ParseError::UnexpectedToken { kind }),
        };

        let lhs = self.pop_expression().ok_or(ParseError::ExpectedExpression {
            kind: Some(token.kind),
        })?;
        let precedence =
            expression_rule(token.kind).map_or(Precedence::None, |rule| rule.precedence);

        self.parse_expression(precedence)?;
        let rhs = self
            .pop_expression()
            .ok_or(ParseError::ExpectedExpression { kind: None })?;

        self.push_expression(Expression::BinaryOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        });
        Ok(())
    }

    /// Infix action: accumulates a chained comparison into one `Compare`
    /// node. Comparators parse at `Comparison` precedence, and at least
    /// one operator/comparator pair is required.
    pub(super) fn parse_compare_expression(&mut self) -> Result<(), ParseError> {
        trace!("parsing compare expression");
        let lhs = self.pop_expression().ok_or(ParseError::BadCompare)?;

        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(kind) = self.peek_kind()? {
            let Some(op) = compare_op(kind) else { break };
            self.tokens.advance()?;

            self.parse_expression(Precedence::Comparison)?;
            let comparator = self.pop_expression().ok_or(ParseError::BadCompare)?;

            ops.push(op);
            comparators.push(comparator);
        }

        if ops.is_empty() {
            return Err(ParseError::BadCompare);
        }

        self.push_expression(Expression::Compare {
            lhs: Box::new(lhs),
            ops,
            comparators,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_integer_decimal() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("0"), Some(0));
        assert_eq!(parse_integer("+5"), Some(5));
        assert_eq!(parse_integer("-17"), Some(-17));
    }

    #[test]
    fn parse_integer_radix_prefixes() {
        assert_eq!(parse_integer("0x1A"), Some(26));
        assert_eq!(parse_integer("0XFF"), Some(255));
        assert_eq!(parse_integer("0b1101"), Some(13));
        assert_eq!(parse_integer("-0x10"), Some(-16));
    }

    #[test]
    fn parse_integer_rejects_garbage() {
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("0x"), None);
        assert_eq!(parse_integer("99999999999999999999"), None);
    }

    #[test]
    fn compare_op_covers_all_comparison_kinds() {
        let kinds = [
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessThan,
            TokenKind::LessEqual,
            TokenKind::GreaterThan,
            TokenKind::GreaterEqual,
            TokenKind::Is,
            TokenKind::IsNot,
            TokenKind::In,
            TokenKind::NotIn,
        ];
        for kind in kinds {
            assert!(compare_op(kind).is_some(), "{kind:?} has no comparison op");
        }
        assert_eq!(compare_op(TokenKind::Plus), None);
    }

    #[test]
    fn comparison_rules_share_precedence() {
        let rule = expression_rule(TokenKind::LessThan).unwrap();
        assert_eq!(rule.precedence, Precedence::Comparison);
        assert!(rule.prefix.is_none());
        assert!(rule.infix.is_some());
    }

    #[test]
    fn statement_tokens_have_no_expression_rule() {
        assert!(expression_rule(TokenKind::Del).is_none());
        assert!(expression_rule(TokenKind::Assign).is_none());
        assert!(expression_rule(TokenKind::Newline).is_none());
        assert!(expression_rule(TokenKind::Indent).is_none());
        assert!(expression_rule(TokenKind::Colon).is_none());
    }
}

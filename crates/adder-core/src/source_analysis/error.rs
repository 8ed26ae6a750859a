// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Adder front-end.
//!
//! All errors are fatal for the current input; there is no local
//! recovery. They integrate with [`miette`] for diagnostic reporting.
//! Messages name token kinds by their canonical spellings and never
//! include token payloads.

use miette::Diagnostic;
use thiserror::Error;

use super::token::TokenKind;

/// Names a possibly-absent token kind for diagnostics.
fn kind_name(kind: &Option<TokenKind>) -> &'static str {
    match kind {
        Some(kind) => kind.spelling(),
        None => "end of input",
    }
}

/// A lexical error encountered during tokenization.
///
/// The lexer fails only on indentation problems; any other unrecognized
/// byte is skipped. An error ends the token stream at the point it
/// occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LexError {
    /// Leading whitespace whose width is not a multiple of the 4-column
    /// indentation unit.
    #[error("encountered unexpected indentation ({width} columns)")]
    UnexpectedIndentation {
        /// Measured width of the leading whitespace, in columns.
        width: usize,
    },

    /// A single line indented more than one level past the previous one.
    #[error("encountered unexpected delta indentation (level {from} to level {to})")]
    IndentationJump {
        /// Indentation level before the offending line.
        from: usize,
        /// Indentation level of the offending line.
        to: usize,
    },

    /// The indentation level dropped below zero.
    #[error("encountered negative indentation")]
    NegativeIndentation,
}

/// A syntax error encountered while building the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// A token with no parse rule appeared.
    #[error("failed to parse token '{kind}'")]
    UnexpectedToken {
        /// The kind with no applicable rule.
        kind: TokenKind,
    },

    /// An expression was required, but the next token cannot start one.
    #[error("expected an expression, got '{}'", kind_name(.kind))]
    ExpectedExpression {
        /// The offending kind, or `None` at end of input.
        kind: Option<TokenKind>,
    },

    /// A specific token kind was required and something else was found.
    #[error("failed to match token '{expected}' (got '{}')", kind_name(.found))]
    ExpectedKind {
        /// The kind that was required.
        expected: TokenKind,
        /// The kind that was found, or `None` at end of input.
        found: Option<TokenKind>,
    },

    /// A comparison operator appeared with no comparator after it.
    #[error("comparison operator without a comparator")]
    BadCompare,

    /// A literal token whose text does not coerce to its value type.
    #[error("invalid literal '{text}'")]
    InvalidLiteral {
        /// The literal text as lexed.
        text: ecow::EcoString,
    },

    /// A lexical error surfaced while pulling tokens.
    #[error(transparent)]
    Lex(#[from] LexError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let error = LexError::UnexpectedIndentation { width: 3 };
        assert_eq!(
            error.to_string(),
            "encountered unexpected indentation (3 columns)"
        );

        let error = LexError::IndentationJump { from: 0, to: 2 };
        assert_eq!(
            error.to_string(),
            "encountered unexpected delta indentation (level 0 to level 2)"
        );
    }

    #[test]
    fn parse_error_display_uses_spellings() {
        let error = ParseError::UnexpectedToken {
            kind: TokenKind::Indent,
        };
        assert_eq!(error.to_string(), "failed to parse token '@idt'");

        let error = ParseError::ExpectedKind {
            expected: TokenKind::Identifier,
            found: Some(TokenKind::Integer),
        };
        assert_eq!(error.to_string(), "failed to match token '@nam' (got '@int')");

        let error = ParseError::ExpectedKind {
            expected: TokenKind::Colon,
            found: None,
        };
        assert_eq!(
            error.to_string(),
            "failed to match token ':' (got 'end of input')"
        );

        let error = ParseError::ExpectedExpression {
            kind: Some(TokenKind::Multiply),
        };
        assert_eq!(error.to_string(), "expected an expression, got '*'");
    }

    #[test]
    fn parse_error_wraps_lex_error() {
        let error = ParseError::from(LexError::NegativeIndentation);
        assert_eq!(error.to_string(), "encountered negative indentation");
        assert!(matches!(error, ParseError::Lex(_)));
    }
}

// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for Adder lexical analysis.
//!
//! This module defines the closed catalogue of tokens produced by the lexer.
//! Kinds are grouped into six contiguous discriminant ranges
//! (indentation, keywords, identifiers, literals, operators, delimiters)
//! so that subtype predicates reduce to a range check on the
//! discriminant. The range boundaries are exposed as `pub const`
//! begin/end markers.
//!
//! # Token Structure
//!
//! Each token consists of:
//! - A [`TokenKind`] indicating the type of token
//! - An optional payload, present exactly for [`TokenKind::Identifier`] and
//!   the three literal kinds
//!
//! # Spellings
//!
//! Every kind has one canonical spelling returned by
//! [`TokenKind::spelling`]. The virtual indentation kinds and the
//! payload-bearing kinds use placeholder spellings (`@idt`, `@ddt`, `@eol`,
//! `@nam`, `@int`, `@flt`, `@str`) that only ever appear in diagnostics.

use std::collections::HashMap;
use std::sync::LazyLock;

use ecow::EcoString;

/// The kind of token, not including its payload.
///
/// Discriminant order is load-bearing: the six groups occupy contiguous
/// ranges, and the lexer iterates the keyword, operator, and delimiter
/// ranges when scanning for the longest match at a source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // === Indentation ===
    /// Virtual token opening an indented block.
    Indent,
    /// Virtual token closing an indented block.
    Dedent,
    /// One or more consecutive line breaks, collapsed.
    Newline,

    // === Keywords ===
    /// `and`
    And,
    /// `as`
    As,
    /// `assert`
    Assert,
    /// `async`
    Async,
    /// `await`
    Await,
    /// `break`
    Break,
    /// `class`
    Class,
    /// `continue`
    Continue,
    /// `def`
    Def,
    /// `del`
    Del,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `except`
    Except,
    /// `False`
    False,
    /// `finally`
    Finally,
    /// `for`
    For,
    /// `from`
    From,
    /// `global`
    Global,
    /// `if`
    If,
    /// `import`
    Import,
    /// `in`
    In,
    /// `is`
    Is,
    /// `is not` (single token; the lexer prefers the longest keyword match)
    IsNot,
    /// `lambda`
    Lambda,
    /// `None`
    None,
    /// `nonlocal`
    Nonlocal,
    /// `not`
    Not,
    /// `not in` (single token)
    NotIn,
    /// `or`
    Or,
    /// `pass`
    Pass,
    /// `raise`
    Raise,
    /// `return`
    Return,
    /// `True`
    True,
    /// `try`
    Try,
    /// `while`
    While,
    /// `with`
    With,
    /// `yield`
    Yield,

    // === Identifiers ===
    /// A name: `foo`, `Foo`, `_private`, `x1`. Carries its text.
    Identifier,

    // === Literals ===
    /// An integer literal: `42`, `-17`, `0x1A`, `0b1101`. Carries its text.
    Integer,
    /// A float literal: `3.14`, `-0.5`, `2.5e-3`. Carries its text.
    Float,
    /// A string literal, including quotes and any prefix: `'a'`, `f"b"`.
    String,

    // === Operators ===
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `**`
    Power,
    /// `/`
    Divide,
    /// `//`
    FloorDivide,
    /// `%`
    Modulo,
    /// `@`
    Matmul,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
    /// `&`
    BitwiseAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `~`
    Invert,
    /// `:=`
    NamedExpr,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equals,
    /// `!=`
    NotEquals,

    // === Delimiters ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `.`
    Attribute,
    /// `;`
    Semicolon,
    /// `=`
    Assign,
    /// `->`
    Annotate,
    /// `+=`
    PlusAssign,
    /// `-=`
    MinusAssign,
    /// `*=`
    MultiplyAssign,
    /// `/=`
    DivideAssign,
    /// `//=`
    FloorDivideAssign,
    /// `%=`
    ModuloAssign,
    /// `@=`
    MatmulAssign,
    /// `&=`
    AndAssign,
    /// `|=`
    OrAssign,
    /// `^=`
    XorAssign,
    /// `>>=`
    RightShiftAssign,
    /// `<<=`
    LeftShiftAssign,
    /// `**=`
    PowerAssign,
}

impl TokenKind {
    /// First discriminant of the indentation range.
    pub const INDENTATION_BEGIN: u8 = TokenKind::Indent as u8;
    /// Last discriminant of the indentation range.
    pub const INDENTATION_END: u8 = TokenKind::Newline as u8;
    /// First discriminant of the keyword range.
    pub const KEYWORD_BEGIN: u8 = TokenKind::And as u8;
    /// Last discriminant of the keyword range.
    pub const KEYWORD_END: u8 = TokenKind::Yield as u8;
    /// First discriminant of the identifier range.
    pub const IDENTIFIER_BEGIN: u8 = TokenKind::Identifier as u8;
    /// Last discriminant of the identifier range.
    pub const IDENTIFIER_END: u8 = TokenKind::Identifier as u8;
    /// First discriminant of the literal range.
    pub const LITERAL_BEGIN: u8 = TokenKind::Integer as u8;
    /// Last discriminant of the literal range.
    pub const LITERAL_END: u8 = TokenKind::String as u8;
    /// First discriminant of the operator range.
    pub const OPERATOR_BEGIN: u8 = TokenKind::Plus as u8;
    /// Last discriminant of the operator range.
    pub const OPERATOR_END: u8 = TokenKind::NotEquals as u8;
    /// First discriminant of the delimiter range.
    pub const DELIMITER_BEGIN: u8 = TokenKind::LeftParen as u8;
    /// Last discriminant of the delimiter range.
    pub const DELIMITER_END: u8 = TokenKind::PowerAssign as u8;

    /// Returns the canonical spelling of this kind.
    ///
    /// Kinds with no fixed source spelling (the indentation kinds and the
    /// payload-bearing kinds) return a placeholder used only in diagnostics.
    #[must_use]
    pub const fn spelling(self) -> &'static str {
        match self {
            TokenKind::Indent => "@idt",
            TokenKind::Dedent => "@ddt",
            TokenKind::Newline => "@eol",
            TokenKind::And => "and",
            TokenKind::As => "as",
            TokenKind::Assert => "assert",
            TokenKind::Async => "async",
            TokenKind::Await => "await",
            TokenKind::Break => "break",
            TokenKind::Class => "class",
            TokenKind::Continue => "continue",
            TokenKind::Def => "def",
            TokenKind::Del => "del",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::Except => "except",
            TokenKind::False => "False",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::From => "from",
            TokenKind::Global => "global",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::In => "in",
            TokenKind::Is => "is",
            TokenKind::IsNot => "is not",
            TokenKind::Lambda => "lambda",
            TokenKind::None => "None",
            TokenKind::Nonlocal => "nonlocal",
            TokenKind::Not => "not",
            TokenKind::NotIn => "not in",
            TokenKind::Or => "or",
            TokenKind::Pass => "pass",
            TokenKind::Raise => "raise",
            TokenKind::Return => "return",
            TokenKind::True => "True",
            TokenKind::Try => "try",
            TokenKind::While => "while",
            TokenKind::With => "with",
            TokenKind::Yield => "yield",
            TokenKind::Identifier => "@nam",
            TokenKind::Integer => "@int",
            TokenKind::Float => "@flt",
            TokenKind::String => "@str",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Multiply => "*",
            TokenKind::Power => "**",
            TokenKind::Divide => "/",
            TokenKind::FloorDivide => "//",
            TokenKind::Modulo => "%",
            TokenKind::Matmul => "@",
            TokenKind::LeftShift => "<<",
            TokenKind::RightShift => ">>",
            TokenKind::BitwiseAnd => "&",
            TokenKind::BitwiseOr => "|",
            TokenKind::BitwiseXor => "^",
            TokenKind::Invert => "~",
            TokenKind::NamedExpr => ":=",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThan => ">",
            TokenKind::LessEqual => "<=",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Attribute => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Assign => "=",
            TokenKind::Annotate => "->",
            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::MultiplyAssign => "*=",
            TokenKind::DivideAssign => "/=",
            TokenKind::FloorDivideAssign => "//=",
            TokenKind::ModuloAssign => "%=",
            TokenKind::MatmulAssign => "@=",
            TokenKind::AndAssign => "&=",
            TokenKind::OrAssign => "|=",
            TokenKind::XorAssign => "^=",
            TokenKind::RightShiftAssign => ">>=",
            TokenKind::LeftShiftAssign => "<<=",
            TokenKind::PowerAssign => "**=",
        }
    }

    /// Returns `true` if this is a virtual indentation token.
    #[must_use]
    pub const fn is_indentation(self) -> bool {
        let discriminant = self as u8;
        discriminant >= Self::INDENTATION_BEGIN && discriminant <= Self::INDENTATION_END
    }

    /// Returns `true` if this is a reserved keyword.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        let discriminant = self as u8;
        discriminant >= Self::KEYWORD_BEGIN && discriminant <= Self::KEYWORD_END
    }

    /// Returns `true` if this is an identifier.
    #[must_use]
    pub const fn is_identifier(self) -> bool {
        let discriminant = self as u8;
        discriminant >= Self::IDENTIFIER_BEGIN && discriminant <= Self::IDENTIFIER_END
    }

    /// Returns `true` if this is a literal.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        let discriminant = self as u8;
        discriminant >= Self::LITERAL_BEGIN && discriminant <= Self::LITERAL_END
    }

    /// Returns `true` if this is an operator.
    #[must_use]
    pub const fn is_operator(self) -> bool {
        let discriminant = self as u8;
        discriminant >= Self::OPERATOR_BEGIN && discriminant <= Self::OPERATOR_END
    }

    /// Returns `true` if this is a delimiter.
    #[must_use]
    pub const fn is_delimiter(self) -> bool {
        let discriminant = self as u8;
        discriminant >= Self::DELIMITER_BEGIN && discriminant <= Self::DELIMITER_END
    }

    /// Returns `true` if tokens of this kind carry a textual payload.
    #[must_use]
    pub const fn has_value(self) -> bool {
        self.is_identifier() || self.is_literal()
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.spelling())
    }
}

/// All keyword kinds, in discriminant order. Used by the lexer's
/// longest-match keyword scan.
pub const KEYWORDS: &[TokenKind] = &[
    TokenKind::And,
    TokenKind::As,
    TokenKind::Assert,
    TokenKind::Async,
    TokenKind::Await,
    TokenKind::Break,
    TokenKind::Class,
    TokenKind::Continue,
    TokenKind::Def,
    TokenKind::Del,
    TokenKind::Elif,
    TokenKind::Else,
    TokenKind::Except,
    TokenKind::False,
    TokenKind::Finally,
    TokenKind::For,
    TokenKind::From,
    TokenKind::Global,
    TokenKind::If,
    TokenKind::Import,
    TokenKind::In,
    TokenKind::Is,
    TokenKind::IsNot,
    TokenKind::Lambda,
    TokenKind::None,
    TokenKind::Nonlocal,
    TokenKind::Not,
    TokenKind::NotIn,
    TokenKind::Or,
    TokenKind::Pass,
    TokenKind::Raise,
    TokenKind::Return,
    TokenKind::True,
    TokenKind::Try,
    TokenKind::While,
    TokenKind::With,
    TokenKind::Yield,
];

/// All operator kinds, in discriminant order.
pub const OPERATORS: &[TokenKind] = &[
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Multiply,
    TokenKind::Power,
    TokenKind::Divide,
    TokenKind::FloorDivide,
    TokenKind::Modulo,
    TokenKind::Matmul,
    TokenKind::LeftShift,
    TokenKind::RightShift,
    TokenKind::BitwiseAnd,
    TokenKind::BitwiseOr,
    TokenKind::BitwiseXor,
    TokenKind::Invert,
    TokenKind::NamedExpr,
    TokenKind::LessThan,
    TokenKind::GreaterThan,
    TokenKind::LessEqual,
    TokenKind::GreaterEqual,
    TokenKind::Equals,
    TokenKind::NotEquals,
];

/// All delimiter kinds, in discriminant order.
pub const DELIMITERS: &[TokenKind] = &[
    TokenKind::LeftParen,
    TokenKind::RightParen,
    TokenKind::LeftBracket,
    TokenKind::RightBracket,
    TokenKind::LeftBrace,
    TokenKind::RightBrace,
    TokenKind::Comma,
    TokenKind::Colon,
    TokenKind::Attribute,
    TokenKind::Semicolon,
    TokenKind::Assign,
    TokenKind::Annotate,
    TokenKind::PlusAssign,
    TokenKind::MinusAssign,
    TokenKind::MultiplyAssign,
    TokenKind::DivideAssign,
    TokenKind::FloorDivideAssign,
    TokenKind::ModuloAssign,
    TokenKind::MatmulAssign,
    TokenKind::AndAssign,
    TokenKind::OrAssign,
    TokenKind::XorAssign,
    TokenKind::RightShiftAssign,
    TokenKind::LeftShiftAssign,
    TokenKind::PowerAssign,
];

/// Spelling → kind lookup over every kind with a fixed source spelling,
/// plus `"\n"` for [`TokenKind::Newline`].
static SPELLING_TO_KIND: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("\n", TokenKind::Newline);
    for &kind in KEYWORDS.iter().chain(OPERATORS).chain(DELIMITERS) {
        map.insert(kind.spelling(), kind);
    }
    map
});

/// Looks up the kind for a canonical spelling.
///
/// Placeholder spellings (`@idt`, `@nam`, …) are not in the map; they
/// never appear in source text.
#[must_use]
pub fn kind_for_spelling(spelling: &str) -> Option<TokenKind> {
    SPELLING_TO_KIND.get(spelling).copied()
}

/// A token: a kind plus an optional textual payload.
///
/// The payload is present exactly for identifiers and literals; every other
/// kind is fully described by its [`TokenKind`].
///
/// # Examples
///
/// ```
/// use adder_core::source_analysis::{Token, TokenKind};
///
/// let token = Token::with_value(TokenKind::Identifier, "add");
/// assert!(token.is_identifier());
/// assert_eq!(token.to_string(), "add");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token's payload. Populated for literals and identifiers.
    pub value: Option<EcoString>,
}

impl Token {
    /// Creates a token with no payload.
    #[must_use]
    pub const fn new(kind: TokenKind) -> Self {
        Self { kind, value: Option::None }
    }

    /// Creates a token carrying a payload.
    #[must_use]
    pub fn with_value(kind: TokenKind, value: impl Into<EcoString>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
        }
    }

    /// Returns `true` if this is a virtual indentation token.
    #[must_use]
    pub const fn is_indentation(&self) -> bool {
        self.kind.is_indentation()
    }

    /// Returns `true` if this is a reserved keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }

    /// Returns `true` if this is an identifier.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        self.kind.is_identifier()
    }

    /// Returns `true` if this is a literal.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }

    /// Returns `true` if this is an operator.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        self.kind.is_operator()
    }

    /// Returns `true` if this is a delimiter.
    #[must_use]
    pub const fn is_delimiter(&self) -> bool {
        self.kind.is_delimiter()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => f.write_str(value),
            Option::None => f.write_str(self.kind.spelling()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_spellings() {
        assert_eq!(TokenKind::Del.spelling(), "del");
        assert_eq!(TokenKind::IsNot.spelling(), "is not");
        assert_eq!(TokenKind::NotIn.spelling(), "not in");
        assert_eq!(TokenKind::False.spelling(), "False");
        assert_eq!(TokenKind::FloorDivideAssign.spelling(), "//=");
        assert_eq!(TokenKind::Annotate.spelling(), "->");
        assert_eq!(TokenKind::Indent.spelling(), "@idt");
        assert_eq!(TokenKind::Dedent.spelling(), "@ddt");
        assert_eq!(TokenKind::Newline.spelling(), "@eol");
        assert_eq!(TokenKind::Identifier.spelling(), "@nam");
        assert_eq!(TokenKind::Integer.spelling(), "@int");
        assert_eq!(TokenKind::Float.spelling(), "@flt");
        assert_eq!(TokenKind::String.spelling(), "@str");
    }

    #[test]
    fn kind_predicates() {
        assert!(TokenKind::Indent.is_indentation());
        assert!(TokenKind::Newline.is_indentation());
        assert!(!TokenKind::And.is_indentation());

        assert!(TokenKind::And.is_keyword());
        assert!(TokenKind::Yield.is_keyword());
        assert!(TokenKind::IsNot.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());

        assert!(TokenKind::Identifier.is_identifier());
        assert!(!TokenKind::Integer.is_identifier());

        assert!(TokenKind::Integer.is_literal());
        assert!(TokenKind::Float.is_literal());
        assert!(TokenKind::String.is_literal());
        assert!(!TokenKind::Plus.is_literal());

        assert!(TokenKind::Plus.is_operator());
        assert!(TokenKind::NotEquals.is_operator());
        assert!(!TokenKind::LeftParen.is_operator());

        assert!(TokenKind::LeftParen.is_delimiter());
        assert!(TokenKind::PowerAssign.is_delimiter());
        assert!(!TokenKind::NotEquals.is_delimiter());
    }

    #[test]
    fn kind_ranges_are_contiguous() {
        // Every kind belongs to exactly one group.
        let groups: [&dyn Fn(TokenKind) -> bool; 6] = [
            &TokenKind::is_indentation,
            &TokenKind::is_keyword,
            &TokenKind::is_identifier,
            &TokenKind::is_literal,
            &TokenKind::is_operator,
            &TokenKind::is_delimiter,
        ];
        let indentation = [TokenKind::Indent, TokenKind::Dedent, TokenKind::Newline];
        let identifiers = [TokenKind::Identifier];
        let literals = [TokenKind::Integer, TokenKind::Float, TokenKind::String];
        let all = indentation
            .iter()
            .chain(KEYWORDS)
            .chain(&identifiers)
            .chain(&literals)
            .chain(OPERATORS)
            .chain(DELIMITERS);
        for &kind in all {
            let memberships = groups.iter().filter(|is_member| is_member(kind)).count();
            assert_eq!(memberships, 1, "{kind:?} belongs to {memberships} groups");
        }
    }

    #[test]
    fn spelling_lookup_round_trips() {
        for &kind in KEYWORDS.iter().chain(OPERATORS).chain(DELIMITERS) {
            assert_eq!(kind_for_spelling(kind.spelling()), Some(kind));
        }
        assert_eq!(kind_for_spelling("\n"), Some(TokenKind::Newline));
        assert_eq!(kind_for_spelling("@idt"), None);
        assert_eq!(kind_for_spelling("bogus"), None);
    }

    #[test]
    fn token_payloads() {
        let keyword = Token::new(TokenKind::Del);
        assert_eq!(keyword.value, None);
        assert_eq!(keyword.to_string(), "del");

        let name = Token::with_value(TokenKind::Identifier, "result");
        assert_eq!(name.value.as_deref(), Some("result"));
        assert_eq!(name.to_string(), "result");
    }

    #[test]
    fn token_equality() {
        assert_eq!(Token::new(TokenKind::Plus), Token::new(TokenKind::Plus));
        assert_ne!(Token::new(TokenKind::Plus), Token::new(TokenKind::Minus));
        assert_eq!(
            Token::with_value(TokenKind::Integer, "3"),
            Token::with_value(TokenKind::Integer, "3"),
        );
        assert_ne!(
            Token::with_value(TokenKind::Integer, "3"),
            Token::with_value(TokenKind::Integer, "4"),
        );
    }
}

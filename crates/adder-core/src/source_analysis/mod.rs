// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source analysis for Adder: tokens, lexing, and parsing.
//!
//! The pipeline is strictly left-to-right with one lazy buffer between
//! the stages:
//!
//! ```text
//! source text ──▶ Lexer ──▶ Token stream ──▶ Parser ──▶ Syntax tree
//! ```
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] turns source text into [`Token`]s, synthesizing virtual
//! `Indent`/`Dedent`/`Newline` tokens from layout. Tokens flow through a
//! pull [`Stream`]: the parser requests them one at a time and the lexer
//! produces them on demand.
//!
//! ```
//! use adder_core::source_analysis::{lex, TokenKind};
//!
//! let tokens = lex("del x").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Del);
//! ```
//!
//! # Parsing
//!
//! The [`Parser`] is Pratt-style, driven by per-token prefix/infix rules,
//! and builds a [`SyntaxTree`](crate::ast::SyntaxTree) for one of three
//! [`Mode`]s: a module, interactive input, or a single expression.
//!
//! ```
//! use adder_core::source_analysis::{Mode, parse_source};
//!
//! let tree = parse_source("3 + 5", Mode::Module).unwrap();
//! assert!(tree.to_string().contains("op=Add"));
//! ```
//!
//! # Error Handling
//!
//! Errors are fatal for the current input: indentation problems surface
//! as [`LexError`] while the stream is pulled, everything else as
//! [`ParseError`]. Both carry miette diagnostics.

mod error;
mod lexer;
mod parser;
mod stream;
mod token;

// Property-based tests for the lexer.
#[cfg(test)]
mod lexer_property_tests;

pub use error::{LexError, ParseError};
pub use lexer::{INDENTATION_WIDTH, Lexer, ScanItem, TokenReader, lex};
pub use parser::{Mode, Parser, parse_source};
pub use stream::{DEFAULT_MIN_BUFFER, Stream};
pub use token::{DELIMITERS, KEYWORDS, OPERATORS, Token, TokenKind, kind_for_spelling};

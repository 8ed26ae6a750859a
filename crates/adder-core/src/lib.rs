// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Adder interpreter front-end.
//!
//! Adder is a small interpreter for a Python-like language. This crate
//! is its front-end: it transforms raw program text into a typed
//! abstract syntax tree ready for evaluation.
//!
//! - Lexical analysis (indentation-sensitive tokenization)
//! - Parsing (Pratt-style AST construction)
//! - Tree traversal and canonical debug rendering
//!
//! The REPL shell and the evaluator live outside this crate; they feed
//! source strings in and consume trees and rendered output.
//!
//! # Example
//!
//! ```
//! use adder_core::source_analysis::{Mode, parse_source};
//!
//! let tree = parse_source("a = b = c + 5", Mode::Module).unwrap();
//! assert!(tree.to_string().starts_with("Module("));
//! ```

pub mod ast;
pub mod ast_walker;
pub mod render;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Constant, ExprContext, Expression, Root, Statement, SyntaxTree};
    pub use crate::render::render;
    pub use crate::source_analysis::{
        LexError, Lexer, Mode, ParseError, Parser, Token, TokenKind, lex, parse_source,
    };
}

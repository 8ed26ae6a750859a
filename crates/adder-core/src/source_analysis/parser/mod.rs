// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Pratt parser for Adder source code.
//!
//! The parser consumes a [`TokenReader`] with a single token of lookahead
//! and builds a [`SyntaxTree`]. Statements and expressions are dispatched
//! through two rule tables keyed by [`TokenKind`], written as plain
//! `match` functions rather than maps so the tables read as
//! documentation (see `statement_rule` here and `expression_rule` in the
//! `expressions` submodule).
//!
//! # Precedence
//!
//! Expression parsing is Pratt-style (top-down operator precedence): each
//! expression-starting or expression-continuing kind carries an optional
//! prefix action, an optional infix action, and a precedence from the
//! [`Precedence`] ladder. Every infix operator folds to the left; the
//! ladder bounds how much of the right-hand side a prefix operator or an
//! operator's right operand may consume.
//!
//! # Statement machinery
//!
//! The parser owns two working stacks. `exprs` holds expression nodes
//! awaiting combination: prefix actions push one node, infix actions pop
//! their operands and push the result. `blocks` holds the statement
//! blocks being built; the top block is the statement list that
//! [`Parser::push_statement`] appends to, and `If` parsing pushes and
//! pops nested blocks around its branches.
//!
//! # Usage
//!
//! ```
//! use adder_core::source_analysis::{Mode, parse_source};
//!
//! let tree = parse_source("a = 3 + 5", Mode::Module).unwrap();
//! assert!(tree.to_string().contains("Assign("));
//! ```

use tracing::trace;

use crate::ast::{ExprContext, Expression, Root, Statement, SyntaxTree};

use super::error::ParseError;
use super::lexer::{Lexer, TokenReader};
use super::token::{Token, TokenKind};

mod expressions;

/// Operator precedence, ascending. The ladder mirrors Python's operator
/// precedence table; entries without parse rules are placeholders keeping
/// the ladder aligned with the language the grammar will grow into.
#[allow(dead_code)] // Levels without rules are reserved for grammar growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    None,
    Lambda,
    IfExp,
    Or,
    And,
    Not,
    Comparison,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    BitwiseShift,
    AddSubtract,
    MultiplyDivide,
    BitwiseNot,
    Power,
    Await,
    Call,
    Comprehension,
}

/// What kind of program the parser is consuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A script: a sequence of statements.
    Module,
    /// One unit of interactive input.
    Interactive,
    /// A single expression.
    Expression,
}

/// A statement parsing action.
type StatementRule = fn(&mut Parser<'_>) -> Result<(), ParseError>;

/// Maps a token kind to its statement rule, if it starts one.
fn statement_rule(kind: TokenKind) -> Option<StatementRule> {
    match kind {
        TokenKind::Del => Some(|parser| parser.parse_delete_statement()),
        TokenKind::Assign => Some(|parser| parser.parse_assign_statement()),
        TokenKind::If => Some(|parser| parser.parse_if_statement()),
        _ => None,
    }
}

/// Parses a complete source string in the given mode.
///
/// Convenience wiring a [`Lexer`] to a [`Parser`]; callers that reuse a
/// lexer across inputs drive the two objects directly.
pub fn parse_source(source: &str, mode: Mode) -> Result<SyntaxTree, ParseError> {
    let mut lexer = Lexer::new(source);
    Parser::new(lexer.reader(), mode).parse()
}

/// The parser state.
pub struct Parser<'src> {
    /// Incoming tokens.
    tokens: TokenReader<'src>,
    /// What kind of program is being parsed.
    mode: Mode,
    /// Pending expression nodes awaiting combination.
    exprs: Vec<Expression>,
    /// In-progress statement blocks; the top is the current block.
    blocks: Vec<Vec<Statement>>,
}

impl<'src> Parser<'src> {
    /// Creates a parser over a token stream.
    #[must_use]
    pub fn new(tokens: TokenReader<'src>, mode: Mode) -> Self {
        Self {
            tokens,
            mode,
            exprs: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Parses the whole token stream and returns the syntax tree.
    pub fn parse(mut self) -> Result<SyntaxTree, ParseError> {
        let root = match self.mode {
            Mode::Expression => {
                self.parse_expression(Precedence::None)?;
                let body = self
                    .pop_expression()
                    .ok_or(ParseError::ExpectedExpression { kind: None })?;
                Root::Expression { body }
            }
            Mode::Module | Mode::Interactive => {
                self.blocks.push(Vec::new());
                while !self.tokens.depleted() {
                    self.parse_statement()?;
                }
                // Any expressions still pending become expression
                // statements.
                while let Some(value) = self.pop_expression() {
                    self.push_statement(Statement::Expr { value });
                }
                let body = self.pop_block();
                if self.mode == Mode::Module {
                    Root::Module { body }
                } else {
                    Root::Interactive { body }
                }
            }
        };
        Ok(SyntaxTree::new(root))
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Peeks at the next token's kind.
    fn peek_kind(&mut self) -> Result<Option<TokenKind>, ParseError> {
        Ok(self.tokens.peek()?.map(|token| token.kind))
    }

    /// Reads the next token, consuming it.
    fn read_token(&mut self) -> Result<Option<Token>, ParseError> {
        Ok(self.tokens.read()?)
    }

    /// Consumes the next token if it has the given kind.
    fn match_kind(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.peek_kind()? == Some(kind) {
            self.tokens.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Requires the next token to have the given kind, without consuming
    /// it.
    fn expect_kind(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        match self.peek_kind()? {
            Some(kind) if kind == expected => Ok(()),
            found => Err(ParseError::ExpectedKind { expected, found }),
        }
    }

    /// Requires and consumes a token of the given kind.
    fn consume_kind(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        self.expect_kind(expected)?;
        self.tokens.advance()?;
        Ok(())
    }

    // ========================================================================
    // Working Stacks
    // ========================================================================

    /// Pushes an expression onto the pending stack.
    fn push_expression(&mut self, expression: Expression) {
        self.exprs.push(expression);
    }

    /// Pops the most recent pending expression, if any.
    fn pop_expression(&mut self) -> Option<Expression> {
        self.exprs.pop()
    }

    /// Appends a statement to the current block.
    fn push_statement(&mut self, statement: Statement) {
        if let Some(block) = self.blocks.last_mut() {
            block.push(statement);
        }
    }

    /// Pops the current block.
    fn pop_block(&mut self) -> Vec<Statement> {
        self.blocks.pop().unwrap_or_default()
    }

    // ========================================================================
    // Statement Parsing
    // ========================================================================

    /// Parses one statement.
    ///
    /// Iterates until a terminating `Newline` is consumed or the stream
    /// is depleted. A token with a statement rule dispatches to it;
    /// anything else parses as an expression and stays pending, so a
    /// later iteration can pick it up (this is how `a = b` finds its
    /// first target). An expression still pending afterwards becomes an
    /// expression statement.
    fn parse_statement(&mut self) -> Result<(), ParseError> {
        loop {
            let Some(kind) = self.peek_kind()? else { break };
            if kind == TokenKind::Newline {
                self.tokens.advance()?;
                break;
            }
            if let Some(rule) = statement_rule(kind) {
                rule(self)?;
                break;
            }
            self.parse_expression(Precedence::None)?;
        }

        if let Some(value) = self.pop_expression() {
            self.push_statement(Statement::Expr { value });
        }
        Ok(())
    }

    /// Parses statements until the stream is depleted or a `Dedent` is
    /// consumed. The `Dedent` terminating the block is eaten.
    fn parse_block(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek_kind()? {
                None => break,
                Some(TokenKind::Dedent) => {
                    self.tokens.advance()?;
                    break;
                }
                Some(_) => self.parse_statement()?,
            }
        }
        Ok(())
    }

    /// Parses `del name, name, …`.
    fn parse_delete_statement(&mut self) -> Result<(), ParseError> {
        trace!("parsing delete statement");
        self.tokens.advance()?;

        let mut targets = Vec::new();
        loop {
            self.expect_kind(TokenKind::Identifier)?;
            self.parse_name_expression()?;
            if let Some(mut target) = self.pop_expression() {
                if let Expression::Name { ctx, .. } = &mut target {
                    *ctx = ExprContext::Del;
                }
                targets.push(target);
            }
            if !self.match_kind(TokenKind::Comma)? {
                break;
            }
        }

        self.push_statement(Statement::Delete { targets });
        Ok(())
    }

    /// Parses `target = target = … = value`, reinterpreting the
    /// expression parsed just before the `=` as the first target.
    fn parse_assign_statement(&mut self) -> Result<(), ParseError> {
        trace!("parsing assign statement");
        let first = self
            .pop_expression()
            .ok_or(ParseError::ExpectedExpression {
                kind: Some(TokenKind::Assign),
            })?;

        let mut parts = vec![first];
        while self.match_kind(TokenKind::Assign)? {
            self.parse_expression(Precedence::None)?;
            let part = self
                .pop_expression()
                .ok_or(ParseError::ExpectedExpression { kind: None })?;
            parts.push(part);
        }

        // The final expression is the assigned value; everything before
        // it is a target and stores to its name.
        let value = parts
            .pop()
            .expect("assignment collects at least one expression");
        let mut targets = parts;
        for target in &mut targets {
            if let Expression::Name { ctx, .. } = target {
                *ctx = ExprContext::Store;
            }
        }

        self.push_statement(Statement::Assign { targets, value });
        Ok(())
    }

    /// Parses `if`/`elif`/`else`. `elif` re-enters this function and the
    /// resulting `If` becomes the sole statement of the outer `else`
    /// block.
    fn parse_if_statement(&mut self) -> Result<(), ParseError> {
        trace!("parsing if statement");
        self.tokens.advance()?; // `if` or `elif`

        self.parse_expression(Precedence::None)?;
        let test = self
            .pop_expression()
            .ok_or(ParseError::ExpectedExpression { kind: None })?;
        self.consume_kind(TokenKind::Colon)?;

        let (then, orelse) = if self.peek_kind()? == Some(TokenKind::Newline) {
            self.tokens.advance()?;
            self.consume_kind(TokenKind::Indent)?;
            self.blocks.push(Vec::new());
            self.parse_block()?;
            let then = self.pop_block();

            let orelse = match self.peek_kind()? {
                Some(TokenKind::Elif) => {
                    self.blocks.push(Vec::new());
                    self.parse_if_statement()?;
                    self.pop_block()
                }
                Some(TokenKind::Else) => {
                    self.tokens.advance()?;
                    self.consume_kind(TokenKind::Colon)?;
                    self.consume_kind(TokenKind::Newline)?;
                    self.consume_kind(TokenKind::Indent)?;
                    self.blocks.push(Vec::new());
                    self.parse_block()?;
                    self.pop_block()
                }
                _ => Vec::new(),
            };
            (then, orelse)
        } else {
            // Single-line form: exactly one statement, no `else`.
            self.blocks.push(Vec::new());
            self.parse_statement()?;
            (self.pop_block(), Vec::new())
        };

        self.push_statement(Statement::If { test, then, orelse });
        Ok(())
    }
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("mode", &self.mode)
            .field("pending_exprs", &self.exprs.len())
            .field("open_blocks", &self.blocks.len())
            .finish()
    }
}

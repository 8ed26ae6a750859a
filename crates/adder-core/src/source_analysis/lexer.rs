// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Adder source code.
//!
//! The lexer converts source text into a stream of [`Token`]s, following
//! Python's lexical structure: layout is significant, and virtual
//! [`Indent`](TokenKind::Indent) / [`Dedent`](TokenKind::Dedent) /
//! [`Newline`](TokenKind::Newline) tokens are synthesized from whitespace.
//! It is hand-written: each literal form is recognized by a small linear
//! scanner, with no backtracking.
//!
//! # Match order
//!
//! At every scan position the lexer tries, in this order: indentation,
//! keywords, literals, operators/delimiters, identifiers. The order is
//! load-bearing:
//!
//! - indentation precedes everything so virtual tokens are synthesized
//!   before textual ones;
//! - keywords precede identifiers so reserved words are not captured as
//!   names;
//! - literals precede operators so a leading sign on a numeric literal is
//!   absorbed rather than tokenized as `+`/`-`.
//!
//! A byte that matches nothing (including interior whitespace) is skipped.
//!
//! # Example
//!
//! ```
//! use adder_core::source_analysis::{lex, TokenKind};
//!
//! let tokens = lex("x + 1").unwrap();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].kind, TokenKind::Plus);
//! ```

use std::collections::VecDeque;

use tracing::debug;

use super::error::LexError;
use super::stream::Stream;
use super::token::{DELIMITERS, KEYWORDS, OPERATORS, Token, TokenKind};

/// Hard coded indentation width, in columns. A tab counts as one unit.
pub const INDENTATION_WIDTH: usize = 4;

/// An item delivered by the token stream: a token, or the lexical error
/// that ended the stream.
pub type ScanItem = Result<Token, LexError>;

type FillFn<'src> = Box<dyn FnMut(&mut VecDeque<ScanItem>) -> bool + 'src>;

/// A lexer that tokenizes Adder source code.
///
/// The lexer owns its source text and a byte cursor, and produces tokens
/// on demand through a [`TokenReader`]. [`set_source`](Lexer::set_source)
/// rewinds it onto fresh input, which is how a driver feeds it one input
/// after another.
#[derive(Default)]
pub struct Lexer {
    /// Raw source code.
    source: String,
    /// Byte position within `source`.
    idx: usize,
    /// Current indentation level, in units of [`INDENTATION_WIDTH`].
    indentation: usize,
}

impl std::fmt::Debug for Lexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("idx", &self.idx)
            .field("indentation", &self.indentation)
            .field("remaining", &self.source.get(self.idx..).unwrap_or(""))
            .finish()
    }
}

impl Lexer {
    /// Creates a lexer over the given source text.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let mut lexer = Self::default();
        lexer.set_source(source);
        lexer
    }

    /// Replaces the source text and rewinds the cursor and indentation.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.idx = 0;
        self.indentation = 0;
        debug!(bytes = self.source.len(), "lexer source set");
    }

    /// Returns a token stream reader over the current source.
    ///
    /// The reader borrows the lexer until dropped; tokens are produced
    /// lazily as the reader is observed.
    pub fn reader(&mut self) -> TokenReader<'_> {
        let fill: FillFn<'_> = Box::new(move |buffer| {
            let mut batch = Vec::new();
            match self.scan_step(&mut batch) {
                Ok(keep_going) => {
                    buffer.extend(batch.into_iter().map(Ok));
                    keep_going
                }
                Err(error) => {
                    buffer.extend(batch.into_iter().map(Ok));
                    buffer.push_back(Err(error));
                    false
                }
            }
        });
        TokenReader {
            stream: Stream::new(fill),
        }
    }

    /// Whether any source remains past the cursor.
    fn keep_going(&self) -> bool {
        self.idx < self.source.len()
    }

    /// Runs one scan step, appending zero or more tokens to `buffer`.
    /// Returns whether any source remains.
    fn scan_step(&mut self, buffer: &mut Vec<Token>) -> Result<bool, LexError> {
        if !self.keep_going() {
            return Ok(false);
        }

        if self.match_indentation(buffer)? {
            return Ok(self.keep_going());
        }
        if self.match_keyword(buffer) {
            return Ok(self.keep_going());
        }
        if self.match_literal(buffer) {
            return Ok(self.keep_going());
        }
        if self.match_operator_or_delimiter(buffer) {
            return Ok(self.keep_going());
        }
        if self.match_identifier(buffer) {
            return Ok(self.keep_going());
        }

        // Nothing matched this byte. Skip it and proceed; this is also what
        // swallows whitespace between tokens within a line.
        self.idx += 1;
        Ok(self.keep_going())
    }

    /// Synthesizes `Newline`, `Indent`, and `Dedent` tokens.
    ///
    /// A run of `\n` collapses into one `Newline`. Leading whitespace is
    /// measured only at the very start of input or immediately after a
    /// newline run; whitespace anywhere else is not indentation.
    fn match_indentation(&mut self, buffer: &mut Vec<Token>) -> Result<bool, LexError> {
        let bytes = self.source.as_bytes();
        let mut matched = false;
        let mut eat_indentation = self.idx == 0;

        while self.idx < bytes.len() && bytes[self.idx] == b'\n' {
            if !matched {
                buffer.push(Token::new(TokenKind::Newline));
                eat_indentation = true;
                matched = true;
            }
            self.idx += 1;
        }

        if eat_indentation {
            let mut width = 0usize;
            while self.idx < bytes.len() {
                match bytes[self.idx] {
                    b' ' => width += 1,
                    b'\t' => width += INDENTATION_WIDTH,
                    _ => break,
                }
                self.idx += 1;
            }

            if width % INDENTATION_WIDTH != 0 {
                return Err(LexError::UnexpectedIndentation { width });
            }

            let new_indentation = width / INDENTATION_WIDTH;
            let previous = self.indentation;
            self.indentation = new_indentation;

            let delta = new_indentation as i64 - previous as i64;
            if delta > 1 {
                return Err(LexError::IndentationJump {
                    from: previous,
                    to: new_indentation,
                });
            }

            let kind = if delta < 0 {
                TokenKind::Dedent
            } else {
                TokenKind::Indent
            };
            for _ in 0..delta.unsigned_abs() {
                buffer.push(Token::new(kind));
                matched = true;
            }
        }

        Ok(matched)
    }

    /// Matches the longest keyword at the cursor, if any.
    ///
    /// A keyword only counts when it is not part of a larger word: `in`
    /// must not match inside `in_place`. The longest survivor wins, which
    /// is what makes `is not` beat `is`.
    fn match_keyword(&mut self, buffer: &mut Vec<Token>) -> bool {
        let bytes = self.source.as_bytes();
        let mut best: Option<TokenKind> = None;
        let mut best_len = 0usize;

        for &kind in KEYWORDS {
            let spelling = kind.spelling().as_bytes();
            if !bytes[self.idx..].starts_with(spelling) {
                continue;
            }
            let end = self.idx + spelling.len();
            if end < bytes.len() && is_word_byte(bytes[end]) {
                continue;
            }
            if spelling.len() > best_len {
                best = Some(kind);
                best_len = spelling.len();
            }
        }

        match best {
            Some(kind) => {
                buffer.push(Token::new(kind));
                self.idx += best_len;
                true
            }
            None => false,
        }
    }

    /// Matches a literal at the cursor, trying string, then float, then
    /// integer. The float scanner runs before the integer scanner, which
    /// would otherwise consume the mantissa prefix of every float.
    fn match_literal(&mut self, buffer: &mut Vec<Token>) -> bool {
        if let Some(len) = self.match_string_literal() {
            self.take_literal(TokenKind::String, len, buffer);
            return true;
        }
        if let Some(len) = self.match_float_literal() {
            self.take_literal(TokenKind::Float, len, buffer);
            return true;
        }
        if let Some(len) = self.match_integer_literal() {
            self.take_literal(TokenKind::Integer, len, buffer);
            return true;
        }
        false
    }

    /// Emits a literal token of `len` bytes at the cursor and advances.
    fn take_literal(&mut self, kind: TokenKind, len: usize, buffer: &mut Vec<Token>) {
        let text = &self.source[self.idx..self.idx + len];
        buffer.push(Token::with_value(kind, text));
        self.idx += len;
    }

    /// Matches a string literal at the cursor, returning its byte length.
    ///
    /// Strings support single and double quotes, triple-quoted variants,
    /// and an optional one-byte prefix from `{r,u,b,f}` in either case.
    /// Triple-quoted bodies run to the nearest closing triple quote and
    /// cannot contain a single quote (known limitation). Single-quoted
    /// bodies support backslash escapes and may span lines.
    fn match_string_literal(&self) -> Option<usize> {
        let bytes = &self.source.as_bytes()[self.idx..];

        let mut pos = 0;
        if matches!(
            bytes.first().copied(),
            Some(b'r' | b'R' | b'u' | b'U' | b'b' | b'B' | b'f' | b'F')
        ) && matches!(bytes.get(1).copied(), Some(b'\'' | b'"'))
        {
            pos = 1;
        }

        let quote = match bytes.get(pos).copied() {
            Some(q @ (b'\'' | b'"')) => q,
            _ => return None,
        };

        let triple = bytes.get(pos + 1) == Some(&quote) && bytes.get(pos + 2) == Some(&quote);
        if triple {
            if let Some(end) = scan_triple_quoted(bytes, pos, quote) {
                return Some(end);
            }
            // No triple terminator; fall back to the plain form, which will
            // match the empty string formed by the first two quotes.
        }
        scan_quoted(bytes, pos, quote)
    }

    /// Matches a float literal at the cursor, returning its byte length.
    ///
    /// Form: optional sign, digits, `.`, optional fraction digits,
    /// optional exponent. A bare trailing dot with neither fraction nor
    /// exponent is not a float. The leading sign is absorbed into the
    /// literal.
    fn match_float_literal(&self) -> Option<usize> {
        let bytes = &self.source.as_bytes()[self.idx..];
        let mut i = 0;

        if matches!(bytes.first().copied(), Some(b'+' | b'-')) {
            i += 1;
        }

        let mantissa_start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i == mantissa_start {
            return None;
        }

        if bytes.get(i) != Some(&b'.') {
            return None;
        }
        i += 1;

        let fraction_start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        let has_fraction = i > fraction_start;

        let mut has_exponent = false;
        if matches!(bytes.get(i).copied(), Some(b'e' | b'E')) {
            let mut j = i + 1;
            if matches!(bytes.get(j).copied(), Some(b'+' | b'-')) {
                j += 1;
            }
            let exponent_start = j;
            while bytes.get(j).is_some_and(u8::is_ascii_digit) {
                j += 1;
            }
            if j > exponent_start {
                i = j;
                has_exponent = true;
            }
        }

        if !has_fraction && !has_exponent {
            return None;
        }
        if bytes.get(i).copied().is_some_and(is_word_byte) {
            return None;
        }
        Some(i)
    }

    /// Matches an integer literal at the cursor, returning its byte
    /// length.
    ///
    /// Forms: `0x…` hex, `0b…` binary, a nonzero decimal run, or a lone
    /// `0`, with an optional leading sign. The following byte must not
    /// continue a word, so `0123` and `1x` are not integers.
    fn match_integer_literal(&self) -> Option<usize> {
        let bytes = &self.source.as_bytes()[self.idx..];
        let mut i = 0;

        if matches!(bytes.first().copied(), Some(b'+' | b'-')) {
            i += 1;
        }

        let end = match (bytes.get(i).copied(), bytes.get(i + 1).copied()) {
            (Some(b'0'), Some(b'x' | b'X')) => {
                let mut j = i + 2;
                while bytes.get(j).is_some_and(u8::is_ascii_hexdigit) {
                    j += 1;
                }
                if j == i + 2 {
                    return None;
                }
                j
            }
            (Some(b'0'), Some(b'b' | b'B')) => {
                let mut j = i + 2;
                while matches!(bytes.get(j).copied(), Some(b'0' | b'1')) {
                    j += 1;
                }
                if j == i + 2 {
                    return None;
                }
                j
            }
            (Some(b'1'..=b'9'), _) => {
                let mut j = i + 1;
                while bytes.get(j).is_some_and(u8::is_ascii_digit) {
                    j += 1;
                }
                j
            }
            (Some(b'0'), _) => i + 1,
            _ => return None,
        };

        if bytes.get(end).copied().is_some_and(is_word_byte) {
            return None;
        }
        Some(end)
    }

    /// Matches the longest operator or delimiter at the cursor, if any.
    /// No word boundary applies, so `//=` outranks `//` outranks `/`.
    fn match_operator_or_delimiter(&mut self, buffer: &mut Vec<Token>) -> bool {
        let bytes = self.source.as_bytes();
        let mut best: Option<TokenKind> = None;
        let mut best_len = 0usize;

        for &kind in OPERATORS.iter().chain(DELIMITERS) {
            let spelling = kind.spelling().as_bytes();
            if bytes[self.idx..].starts_with(spelling) && spelling.len() > best_len {
                best = Some(kind);
                best_len = spelling.len();
            }
        }

        match best {
            Some(kind) => {
                buffer.push(Token::new(kind));
                self.idx += best_len;
                true
            }
            None => false,
        }
    }

    /// Matches an identifier at the cursor: `[A-Za-z_][A-Za-z0-9_]*`.
    fn match_identifier(&mut self, buffer: &mut Vec<Token>) -> bool {
        let bytes = self.source.as_bytes();
        match bytes.get(self.idx) {
            Some(&b) if b.is_ascii_alphabetic() || b == b'_' => {}
            _ => return false,
        }

        let mut end = self.idx + 1;
        while end < bytes.len() && is_word_byte(bytes[end]) {
            end += 1;
        }

        let text = &self.source[self.idx..end];
        buffer.push(Token::with_value(TokenKind::Identifier, text));
        self.idx = end;
        true
    }
}

/// Whether a byte may continue a word (identifier or keyword).
const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Scans a triple-quoted string opened at `pos`. The body runs to the
/// nearest closing triple quote and cannot contain a single quote; a
/// lone `"` inside a `"""` body is ordinary content.
/// Returns the end offset past the closing quotes.
fn scan_triple_quoted(bytes: &[u8], pos: usize, quote: u8) -> Option<usize> {
    let mut i = pos + 3;
    loop {
        match *bytes.get(i)? {
            b if b == quote => {
                if bytes.get(i + 1) == Some(&quote) && bytes.get(i + 2) == Some(&quote) {
                    return Some(i + 3);
                }
                if quote == b'\'' {
                    return None;
                }
                i += 1;
            }
            b'\'' => return None,
            _ => i += 1,
        }
    }
}

/// Scans a plain quoted string opened at `pos`, honoring backslash
/// escapes. An escaped line break does not count; the match fails there,
/// like everywhere an unterminated string falls through to other rules.
/// Returns the end offset past the closing quote.
fn scan_quoted(bytes: &[u8], pos: usize, quote: u8) -> Option<usize> {
    let mut i = pos + 1;
    loop {
        match *bytes.get(i)? {
            b'\\' => {
                if *bytes.get(i + 1)? == b'\n' {
                    return None;
                }
                i += 2;
            }
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
}

/// A pull-stream reader over a lexer's tokens.
///
/// Wraps a [`Stream`] of scan items so that a lexical error travels
/// in-band and surfaces on the observation that reaches it. `None` from
/// [`peek`](TokenReader::peek) or [`read`](TokenReader::read) always
/// means end of input.
pub struct TokenReader<'src> {
    stream: Stream<ScanItem, FillFn<'src>>,
}

impl TokenReader<'_> {
    /// Peeks at the next token without consuming it.
    pub fn peek(&mut self) -> Result<Option<&Token>, LexError> {
        match self.stream.peek() {
            None => Ok(None),
            Some(Ok(token)) => Ok(Some(token)),
            Some(Err(error)) => Err(error.clone()),
        }
    }

    /// Reads the next token, consuming it.
    pub fn read(&mut self) -> Result<Option<Token>, LexError> {
        self.stream.read().transpose()
    }

    /// Consumes the next token without returning it. `Ok(false)` means
    /// the stream was depleted.
    pub fn advance(&mut self) -> Result<bool, LexError> {
        match self.stream.read() {
            None => Ok(false),
            Some(Ok(_)) => Ok(true),
            Some(Err(error)) => Err(error),
        }
    }

    /// Is the producer finished?
    #[must_use]
    pub fn finished(&self) -> bool {
        self.stream.finished()
    }

    /// Is the stream depleted?
    #[must_use]
    pub fn depleted(&self) -> bool {
        self.stream.depleted()
    }
}

impl std::fmt::Debug for TokenReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenReader")
            .field("stream", &self.stream)
            .finish()
    }
}

/// Lexes a complete source string into a token vector.
///
/// Convenience for tests and one-shot callers; streaming consumers should
/// use [`Lexer::reader`].
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut reader = lexer.reader();
    let mut tokens = Vec::new();
    while let Some(token) = reader.read()? {
        tokens.push(token);
    }
    Ok(tokens)
}

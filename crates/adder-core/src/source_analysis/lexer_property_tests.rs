// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the Adder lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated
//! inputs:
//!
//! 1. **Lexing is total** — arbitrary input either lexes or fails with a
//!    `LexError`; it never panics
//! 2. **Lexing is pure** — the same input always produces the same result
//! 3. **Valid fragments lex cleanly** — known-valid inputs produce no
//!    errors and no indentation tokens
//! 4. **Indentation balances** — for accepted newline-terminated
//!    programs, `Indent`/`Dedent` depth never goes negative and returns
//!    to zero at end of input
//! 5. **Payload discipline** — a token carries a value exactly when its
//!    kind is an identifier or literal

use proptest::prelude::*;

use super::lexer::lex;
use super::token::TokenKind;

// ============================================================================
// Generators
// ============================================================================

/// Known-valid single-token fragments that should lex without errors.
const VALID_SINGLE_TOKENS: &[&str] = &[
    "42",
    "-17",
    "0x1A",
    "0b1101",
    "3.14",
    "2.5e-3",
    "'text'",
    "\"text\"",
    "r'raw'",
    "'''doc'''",
    "True",
    "False",
    "None",
    "x",
    "my_variable",
    "del",
    "if",
    "elif",
    "else",
    "is not",
    "not in",
    "+",
    "**",
    "//=",
    "<<",
    ":=",
    "->",
    ",",
    ":",
];

/// Statement-shaped lines for indentation programs. None of these open a
/// block on their own.
const VALID_STATEMENTS: &[&str] = &["x = 1", "del a, b", "a + b", "a < b <= c", "not done"];

fn valid_single_token() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_SINGLE_TOKENS).prop_map(std::string::ToString::to_string)
}

/// A small block-structured program: each line nests at most one level
/// deeper than the one before, and the text ends with a newline.
fn indented_program() -> impl Strategy<Value = String> {
    let line = (0usize..3, prop::sample::select(VALID_STATEMENTS));
    prop::collection::vec(line, 1..8).prop_map(|lines| {
        let mut program = String::new();
        let mut level = 0usize;
        for (requested, statement) in lines {
            // A block may only deepen one level at a time.
            level = requested.min(level + 1);
            for _ in 0..level {
                program.push_str("    ");
            }
            program.push_str(statement);
            program.push('\n');
        }
        program
    })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Property 1: lexing arbitrary input never panics.
    #[test]
    fn lexing_is_total(input in "\\PC{0,400}") {
        let _result = lex(&input);
    }

    /// Property 2: lexing is pure.
    #[test]
    fn lexing_is_deterministic(input in "\\PC{0,400}") {
        prop_assert_eq!(lex(&input), lex(&input));
    }

    /// Property 3: known-valid fragments lex cleanly.
    #[test]
    fn valid_fragments_lex_cleanly(fragment in valid_single_token()) {
        let tokens = lex(&fragment).expect("valid fragment failed to lex");
        prop_assert!(!tokens.is_empty(), "no tokens for {:?}", fragment);
        prop_assert!(
            tokens.iter().all(|token| !token.is_indentation()),
            "unexpected indentation token for {:?}",
            fragment
        );
    }

    /// Property 3b: fragments joined by spaces on one line still lex.
    #[test]
    fn spaced_fragments_lex_cleanly(
        fragments in prop::collection::vec(valid_single_token(), 1..6)
    ) {
        let line = fragments.join(" ");
        prop_assert!(lex(&line).is_ok(), "failed to lex {:?}", line);
    }

    /// Property 4: indentation depth balances for accepted
    /// newline-terminated programs.
    #[test]
    fn indentation_depth_balances(program in indented_program()) {
        let tokens = lex(&program).expect("generated program failed to lex");
        let mut depth = 0i64;
        for token in &tokens {
            match token.kind {
                TokenKind::Indent => depth += 1,
                TokenKind::Dedent => depth -= 1,
                _ => {}
            }
            prop_assert!(depth >= 0, "depth went negative in {:?}", program);
        }
        prop_assert_eq!(depth, 0, "unbalanced indentation in {:?}", program);
    }

    /// Property 5: payloads appear exactly on identifier and literal
    /// tokens.
    #[test]
    fn payload_matches_kind(input in "\\PC{0,400}") {
        if let Ok(tokens) = lex(&input) {
            for token in tokens {
                prop_assert_eq!(
                    token.value.is_some(),
                    token.kind.has_value(),
                    "payload mismatch for {:?}",
                    token.kind
                );
            }
        }
    }
}

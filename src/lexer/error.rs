//! Lexical analysis error types.
//!
//! This module defines [`LexError`], which represents errors that can
//! occur during tokenization.

use crate::token::Span;

/// An error that occurred during lexical analysis.
///
/// `LexError` contains a human-readable message and the source location
/// where the error occurred, enabling rich error reporting with tools
/// like [`ariadne`].
///
/// [`ariadne`]: https://docs.rs/ariadne
#[derive(Debug)]
pub struct LexError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
}

impl LexError {
    /// Creates an error for a character the lexer does not recognize.
    pub(super) fn unexpected_character(c: char, span: Span) -> Self {
        LexError {
            message: format!("Unexpected character in input: '{}'", c),
            span,
        }
    }

    /// Creates an error for a string literal that reaches end of input
    /// without a closing `"`.
    pub(super) fn unterminated_string(span: Span) -> Self {
        LexError {
            message: "Unterminated string literal".to_string(),
            span,
        }
    }

    /// Creates an error for a `/* ... */` comment that reaches end of
    /// input without a closing `*/`.
    pub(super) fn unterminated_block_comment(span: Span) -> Self {
        LexError {
            message: "Unterminated block comment".to_string(),
            span,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

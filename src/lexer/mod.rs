//! Lexical analyzer for the Zinc programming language.
//!
//! This module provides the [`Lexer`] struct which converts source code
//! text into a stream of [`Token`]s for parsing.
//!
//! # Overview
//!
//! The lexer performs the following tasks:
//! - Scans the input character by character
//! - Recognizes keywords, identifiers, number and string literals, and
//!   punctuation/operators with maximal munch (`==` beats `=`, `<<`
//!   beats `<`, and so on)
//! - Tracks source positions for error reporting
//! - Skips whitespace, `//` line comments, and `/* ... */` block comments
//!
//! # Supported Tokens
//!
//! - **Keywords**: `let`, `fn`, `if`, `else`, `while`, `return`, `true`, `false`
//! - **Identifiers**: `[A-Za-z_][A-Za-z0-9_]*`
//! - **Number literals**: one or more ASCII decimal digits; no sign, no
//!   fraction (unary minus is handled by the parser). The digit text is
//!   carried through unparsed.
//! - **String literals**: enclosed in double quotes. A backslash keeps
//!   itself and the following character verbatim; escape resolution is
//!   deferred to code generation.
//! - **Punctuation**: `(`, `)`, `{`, `}`, `:`, `;`, `,`
//! - **Operators**: `+ - * / % ! = == != < <= > >= && || << >> & | ^`
//!
//! # Examples
//!
//! ```
//! use zinc::lexer::Lexer;
//! use zinc::token::TokenKind;
//!
//! let mut lexer = Lexer::new("print(\"hello\")");
//! let tokens = lexer.tokenize().unwrap();
//!
//! assert!(matches!(tokens[0].kind, TokenKind::Identifier(_)));
//! assert!(matches!(tokens[1].kind, TokenKind::LeftParen));
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Error types for lexical analysis
//! - [`cursor`] - Position tracking and character navigation
//! - [`skip`] - Whitespace and comment handling
//! - [`tokens`] - Token recognition and reading
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::token`] - Token type definitions
//! * [`crate::parser`] - Parser that consumes the token stream

mod cursor;
mod error;
mod skip;
mod tokens;


pub use error::LexError;

use crate::token::{Span, Token, TokenKind};

/// A lexical analyzer that tokenizes Zinc source code.
///
/// The `Lexer` maintains its position within the input and tracks
/// line/column numbers for error reporting. It is designed to be used
/// once per source file.
///
/// # Lifetime
///
/// The `'a` lifetime parameter ties the lexer to the input string slice,
/// ensuring the input remains valid while the lexer is in use.
pub struct Lexer<'a> {
    /// The input source code being tokenized.
    pub(super) input: &'a str,
    /// Current byte position in the input.
    pub(super) pos: usize,
    /// Current line number (1-indexed).
    pub(super) line: usize,
    /// Current column number (1-indexed).
    pub(super) column: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new `Lexer` for the given input string.
    ///
    /// The lexer starts at the beginning of the input with line and
    /// column numbers initialized to 1.
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes the entire input and returns a vector of tokens.
    ///
    /// This method consumes the input from start to end, producing tokens
    /// until the end of input is reached. The returned vector always ends
    /// with a single [`TokenKind::Eof`] token.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An unexpected character is encountered
    /// - A string literal is not terminated before end of input
    /// - A block comment is not terminated before end of input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_eof() {
                let span = Span::new(self.pos, self.pos, self.line, self.column);
                tokens.push(Token::new(TokenKind::Eof, span));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }
}

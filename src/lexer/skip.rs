//! Whitespace and comment skipping for the lexer.
//!
//! This module provides methods for skipping over whitespace characters,
//! `//` line comments, and `/* ... */` block comments during tokenization.

use super::Lexer;
use super::error::LexError;
use crate::token::Span;

impl<'a> Lexer<'a> {
    /// Skips whitespace and comments in a loop.
    ///
    /// This method handles the case where a comment might be followed by
    /// whitespace, which might be followed by another comment, etc.
    ///
    /// # Errors
    ///
    /// Returns an error if a block comment is left unterminated.
    pub(super) fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            self.skip_whitespace();
            if !self.skip_comment()? {
                break;
            }
        }
        Ok(())
    }

    /// Skips consecutive whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    /// Skips a line or block comment if one starts at the current position.
    ///
    /// Line comments start with `//` and extend to the end of the line.
    /// Block comments start with `/*`, end with `*/`, and do not nest.
    ///
    /// # Returns
    ///
    /// `true` if a comment was skipped, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a block comment reaches end of input without
    /// a closing `*/`.
    fn skip_comment(&mut self) -> Result<bool, LexError> {
        if self.input[self.pos..].starts_with("//") {
            while let Some(c) = self.current_char() {
                if c == '\n' {
                    self.advance();
                    break;
                }
                self.advance();
            }
            return Ok(true);
        }

        if self.input[self.pos..].starts_with("/*") {
            let start_pos = self.pos;
            let start_line = self.line;
            let start_column = self.column;
            self.advance();
            self.advance();

            while !self.input[self.pos..].starts_with("*/") {
                if self.is_eof() {
                    return Err(LexError::unterminated_block_comment(Span::new(
                        start_pos,
                        self.pos,
                        start_line,
                        start_column,
                    )));
                }
                self.advance();
            }
            self.advance();
            self.advance();
            return Ok(true);
        }

        Ok(false)
    }
}

//! Token reading and recognition for the lexer.
//!
//! This module provides methods for reading the various token types from
//! the input: identifiers and keywords, number and string literals, and
//! punctuation/operators with maximal munch.

use super::Lexer;
use super::error::LexError;
use crate::token::{Span, Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Reads and returns the next token from the input.
    ///
    /// This method is called repeatedly by [`tokenize`](super::Lexer::tokenize)
    /// to produce the token stream. It assumes that whitespace and comments
    /// have already been skipped and that the input is not at end of file.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if an unexpected character is encountered
    /// or if a string literal is left unterminated.
    pub(super) fn next_token(&mut self) -> Result<Token, LexError> {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_column = self.column;

        let c = self.current_char().ok_or_else(|| {
            LexError::unexpected_character('\0', Span::new(self.pos, self.pos, self.line, self.column))
        })?;

        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.read_identifier(start_pos, start_line, start_column));
        }

        if c.is_ascii_digit() {
            return Ok(self.read_number(start_pos, start_line, start_column));
        }

        if c == '"' {
            return self.read_string(start_pos, start_line, start_column);
        }

        self.read_operator(c, start_pos, start_line, start_column)
    }

    /// Reads a punctuation or operator token.
    ///
    /// Multi-character operators are matched greedily: `==` wins over `=`,
    /// `<<` and `<=` win over `<`, `&&` wins over `&`, and so on.
    fn read_operator(
        &mut self,
        c: char,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        self.advance();
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '!' => {
                if self.consume_if('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                }
            }
            '=' => {
                if self.consume_if('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Assign
                }
            }
            '&' => {
                if self.consume_if('&') {
                    TokenKind::AndAnd
                } else {
                    TokenKind::Ampersand
                }
            }
            '|' => {
                if self.consume_if('|') {
                    TokenKind::OrOr
                } else {
                    TokenKind::Pipe
                }
            }
            '<' => {
                if self.consume_if('<') {
                    TokenKind::ShiftLeft
                } else if self.consume_if('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.consume_if('>') {
                    TokenKind::ShiftRight
                } else if self.consume_if('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            _ => {
                return Err(LexError::unexpected_character(
                    c,
                    Span::new(start_pos, self.pos, start_line, start_column),
                ));
            }
        };

        let span = Span::new(start_pos, self.pos, start_line, start_column);
        Ok(Token::new(kind, span))
    }

    /// Reads an identifier or keyword from the input.
    ///
    /// Identifiers consist of an ASCII alphabetic character or underscore
    /// followed by any number of ASCII alphanumerics or underscores. If
    /// the text matches a keyword (`let`, `fn`, `if`, `else`, `while`,
    /// `return`, `true`, `false`), the corresponding keyword token is
    /// returned instead.
    fn read_identifier(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Token {
        while self
            .current_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = &self.input[start_pos..self.pos];
        let span = Span::new(start_pos, self.pos, start_line, start_column);

        let kind = TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        Token::new(kind, span)
    }

    /// Reads a number literal from the input.
    ///
    /// Number literals are one or more ASCII decimal digits. There are no
    /// signs (unary minus belongs to the parser) and no fractional part.
    /// The digit text is kept verbatim.
    fn read_number(&mut self, start_pos: usize, start_line: usize, start_column: usize) -> Token {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let text = &self.input[start_pos..self.pos];
        let span = Span::new(start_pos, self.pos, start_line, start_column);
        Token::new(TokenKind::Number(text.to_string()), span)
    }

    /// Reads a string literal from the input.
    ///
    /// The opening double quote is at the current position. Inside the
    /// literal, a backslash keeps itself and the following character
    /// verbatim; the escape sequence is resolved later when the code
    /// generator writes the data section. The payload excludes the
    /// surrounding quotes.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if end of input is reached before the
    /// closing `"`.
    fn read_string(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        self.advance(); // skip opening "
        let mut value = String::new();

        loop {
            match self.current_char() {
                Some('"') => {
                    self.advance(); // skip closing "
                    let span = Span::new(start_pos, self.pos, start_line, start_column);
                    return Ok(Token::new(TokenKind::StringLiteral(value), span));
                }
                Some('\\') => {
                    // Keep the backslash and the escaped character raw.
                    value.push('\\');
                    self.advance();
                    if let Some(c) = self.current_char() {
                        value.push(c);
                        self.advance();
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    return Err(LexError::unterminated_string(Span::new(
                        start_pos,
                        self.pos,
                        start_line,
                        start_column,
                    )));
                }
            }
        }
    }
}

//! Parser helper methods for token navigation and basic operations.

use super::Parser;
use super::error::ParseError;
use crate::ast::Type;
use crate::token::{Span, Token, TokenKind};

impl Parser {
    /// Returns a user-friendly display string for a token kind.
    pub(super) fn token_kind_display(kind: &TokenKind) -> String {
        match kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Let => "'let' keyword".to_string(),
            TokenKind::Fn => "'fn' keyword".to_string(),
            TokenKind::If => "'if' keyword".to_string(),
            TokenKind::Else => "'else' keyword".to_string(),
            TokenKind::While => "'while' keyword".to_string(),
            TokenKind::Return => "'return' keyword".to_string(),
            TokenKind::True => "'true'".to_string(),
            TokenKind::False => "'false'".to_string(),
            TokenKind::Identifier(s) => format!("identifier '{}'", s),
            TokenKind::Number(n) => format!("number '{}'", n),
            TokenKind::StringLiteral(s) => {
                if s.len() > 20 {
                    format!("string \"{}...\"", &s[..20])
                } else {
                    format!("string \"{}\"", s)
                }
            }
            TokenKind::LeftParen => "'('".to_string(),
            TokenKind::RightParen => "')'".to_string(),
            TokenKind::LeftBrace => "'{'".to_string(),
            TokenKind::RightBrace => "'}'".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Plus => "'+'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::Star => "'*'".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::Percent => "'%'".to_string(),
            TokenKind::Bang => "'!'".to_string(),
            TokenKind::Assign => "'='".to_string(),
            TokenKind::EqualEqual => "'=='".to_string(),
            TokenKind::BangEqual => "'!='".to_string(),
            TokenKind::Less => "'<'".to_string(),
            TokenKind::LessEqual => "'<='".to_string(),
            TokenKind::Greater => "'>'".to_string(),
            TokenKind::GreaterEqual => "'>='".to_string(),
            TokenKind::AndAnd => "'&&'".to_string(),
            TokenKind::OrOr => "'||'".to_string(),
            TokenKind::ShiftLeft => "'<<'".to_string(),
            TokenKind::ShiftRight => "'>>'".to_string(),
            TokenKind::Ampersand => "'&'".to_string(),
            TokenKind::Pipe => "'|'".to_string(),
            TokenKind::Caret => "'^'".to_string(),
        }
    }

    /// Returns a reference to the current token.
    ///
    /// This method is safe to call at any time - if the position is past
    /// the end, it returns the last token (which is `Eof`).
    pub(super) fn current(&self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Returns the kind of the current token.
    pub(super) fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// Returns the span of the current token.
    pub(super) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Returns `true` if the current token is `Eof`.
    pub(super) fn is_eof(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Advances to the next token.
    ///
    /// Does nothing if already at `Eof`.
    pub(super) fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    /// Returns `true` if the current token has the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consumes the current token if it has the given kind.
    ///
    /// Returns `true` if the token matched and was consumed.
    pub(super) fn consume_if(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to match `expected` and advances.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming both the expected and the found
    /// token when they differ.
    pub(super) fn expect(&mut self, expected: &TokenKind) -> Result<(), ParseError> {
        if self.check(expected) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected_token(
                &Self::token_kind_display(expected),
                &Self::token_kind_display(self.current_kind()),
                self.current_span(),
            ))
        }
    }

    /// Expects an identifier token and returns its name.
    ///
    /// The `context` string names the grammar position for the error
    /// message (e.g. "function name after 'fn'").
    pub(super) fn expect_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        if let TokenKind::Identifier(name) = self.current_kind() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(ParseError::unexpected_token(
                context,
                &Self::token_kind_display(self.current_kind()),
                self.current_span(),
            ))
        }
    }

    /// Parses a type annotation.
    ///
    /// The annotation is an identifier naming one of the Zinc surface
    /// types (`int`, `string`, `bool`, `void`).
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the token is not an identifier or if
    /// the identifier does not name a type.
    pub(super) fn parse_type(&mut self, context: &str) -> Result<Type, ParseError> {
        let type_span = self.current_span();
        let name = self.expect_identifier(context)?;
        Type::from_name(&name).ok_or_else(|| ParseError::unknown_type(&name, type_span))
    }
}

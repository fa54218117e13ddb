//! Statement parsing.

use super::Parser;
use super::error::ParseError;
use crate::ast::{Stmt, StmtKind};
use crate::token::{Span, TokenKind};

impl Parser {
    /// Parses a single statement.
    ///
    /// # Grammar
    ///
    /// ```text
    /// stmt → 'return' expr? ';'? | if_stmt | while_stmt | block | expr ';'?
    /// ```
    pub(super) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        if self.consume_if(&TokenKind::Return) {
            return self.parse_return_stmt();
        }
        if self.consume_if(&TokenKind::If) {
            return self.parse_if_stmt();
        }
        if self.consume_if(&TokenKind::While) {
            return self.parse_while_stmt();
        }
        if self.check(&TokenKind::LeftBrace) {
            let start_span = self.current_span();
            let stmts = self.parse_block_stmts()?;
            return Ok(Stmt::new(StmtKind::Block(stmts), start_span));
        }

        // Otherwise an expression statement with an optional semicolon.
        let expr = self.parse_expression()?;
        let span = expr.span;
        self.consume_if(&TokenKind::Semicolon);
        Ok(Stmt::new(StmtKind::Expr(expr), span))
    }

    /// Parses a return statement. The `return` keyword has already been
    /// consumed.
    ///
    /// A value expression follows unless the next token is a semicolon;
    /// the semicolon itself is optional.
    pub(super) fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let end = value.as_ref().map(|v| v.span.end).unwrap_or(start_span.end);
        self.consume_if(&TokenKind::Semicolon);

        let span = Span::new(start_span.start, end, start_span.line, start_span.column);
        Ok(Stmt::new(StmtKind::Return(value), span))
    }

    /// Parses an if statement. The `if` keyword has already been consumed.
    ///
    /// # Grammar
    ///
    /// ```text
    /// if_stmt → 'if' expr block ('else' (block | decl))?
    /// ```
    ///
    /// The then-branch must be a brace-delimited block. The else-branch
    /// may be another block or a single declaration; the latter enables
    /// `else if` chains and is wrapped in a one-statement branch.
    pub(super) fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();

        let condition = self.parse_expression()?;
        let then_block = self.parse_block_stmts()?;

        let else_block = if self.consume_if(&TokenKind::Else) {
            if self.check(&TokenKind::LeftBrace) {
                Some(self.parse_block_stmts()?)
            } else {
                Some(vec![self.parse_decl()?])
            }
        } else {
            None
        };

        let span = Span::new(
            start_span.start,
            self.current_span().start,
            start_span.line,
            start_span.column,
        );

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_block,
                else_block,
            },
            span,
        ))
    }

    /// Parses a while statement. The `while` keyword has already been
    /// consumed.
    ///
    /// # Grammar
    ///
    /// ```text
    /// while_stmt → 'while' expr block
    /// ```
    pub(super) fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();

        let condition = self.parse_expression()?;
        let body = self.parse_block_stmts()?;

        let span = Span::new(
            start_span.start,
            self.current_span().start,
            start_span.line,
            start_span.column,
        );

        Ok(Stmt::new(StmtKind::While { condition, body }, span))
    }

    /// Parses a brace-delimited sequence of declarations.
    ///
    /// # Grammar
    ///
    /// ```text
    /// block → '{' decl* '}'
    /// ```
    pub(super) fn parse_block_stmts(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::LeftBrace)?;

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_eof() {
            stmts.push(self.parse_decl()?);
        }

        self.expect(&TokenKind::RightBrace)?;
        Ok(stmts)
    }
}

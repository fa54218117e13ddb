//! Declaration parsing: functions and `let` bindings.

use super::Parser;
use super::error::ParseError;
use crate::ast::{FnDecl, Param, Stmt, StmtKind};
use crate::token::{Span, TokenKind};

impl Parser {
    /// Parses a top-level or block-level declaration.
    ///
    /// # Grammar
    ///
    /// ```text
    /// decl → 'fn' fn_decl | 'let' let_decl | stmt
    /// ```
    pub(super) fn parse_decl(&mut self) -> Result<Stmt, ParseError> {
        if self.consume_if(&TokenKind::Fn) {
            return self.parse_fn_decl();
        }
        if self.consume_if(&TokenKind::Let) {
            return self.parse_let_decl();
        }
        self.parse_stmt()
    }

    /// Parses a function declaration. The `fn` keyword has already been
    /// consumed.
    ///
    /// # Grammar
    ///
    /// ```text
    /// fn_decl → IDENT '(' params? ')' (':' IDENT)? block
    /// params  → param (',' param)*
    /// param   → IDENT (':' IDENT)?
    /// ```
    ///
    /// The return type annotation is optional; an omitted annotation
    /// means `void`.
    pub(super) fn parse_fn_decl(&mut self) -> Result<Stmt, ParseError> {
        let name_span = self.current_span();
        let name = self.expect_identifier("function name after 'fn'")?;

        self.expect(&TokenKind::LeftParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                let param_span = self.current_span();
                let param_name = self.expect_identifier("parameter name")?;
                let ty = if self.consume_if(&TokenKind::Colon) {
                    Some(self.parse_type("type name for parameter")?)
                } else {
                    None
                };
                params.push(Param {
                    name: param_name,
                    ty,
                    span: param_span,
                });

                if !self.consume_if(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;

        let return_type = if self.consume_if(&TokenKind::Colon) {
            Some(self.parse_type("return type after ':'")?)
        } else {
            None
        };

        let body = self.parse_block_stmts()?;

        let span = Span::new(
            name_span.start,
            self.current_span().start,
            name_span.line,
            name_span.column,
        );

        Ok(Stmt::new(
            StmtKind::Function(FnDecl {
                name,
                params,
                return_type,
                body,
                span: name_span,
            }),
            span,
        ))
    }

    /// Parses a `let` declaration. The `let` keyword has already been
    /// consumed.
    ///
    /// # Grammar
    ///
    /// ```text
    /// let_decl → IDENT (':' IDENT)? ('=' expr ';'? | ';')
    /// ```
    ///
    /// A declaration with an initializer takes an optional trailing
    /// semicolon; a declaration without one requires the semicolon.
    /// Whether the declaration carries at least a type or an initializer
    /// is checked by the semantic analyzer, not here.
    pub(super) fn parse_let_decl(&mut self) -> Result<Stmt, ParseError> {
        let name_span = self.current_span();
        let name = self.expect_identifier("identifier after 'let'")?;

        let ty = if self.consume_if(&TokenKind::Colon) {
            Some(self.parse_type("type name after ':'")?)
        } else {
            None
        };

        if self.consume_if(&TokenKind::Assign) {
            let init = self.parse_expression()?;
            let end = init.span.end;
            self.consume_if(&TokenKind::Semicolon);
            let span = Span::new(name_span.start, end, name_span.line, name_span.column);
            return Ok(Stmt::new(
                StmtKind::Let {
                    name,
                    ty,
                    init: Some(init),
                },
                span,
            ));
        }

        if self.consume_if(&TokenKind::Semicolon) {
            return Ok(Stmt::new(
                StmtKind::Let {
                    name,
                    ty,
                    init: None,
                },
                name_span,
            ));
        }

        Err(ParseError::invalid_let_terminator(
            &Self::token_kind_display(self.current_kind()),
            self.current_span(),
        ))
    }
}

//! Expression parsing with a cascading precedence climb.
//!
//! Each precedence level has its own method that parses the next-tighter
//! level and then folds operators of its own level left-to-right. The
//! cascade, from loosest to tightest binding:
//!
//! assignment → `||` → `&&` → `|` → `^` → `&` → equality → comparison →
//! shift → additive → multiplicative → unary → call → primary
//!
//! Assignment and unary operators are right-associative; every other
//! level is left-associative.

use super::Parser;
use super::error::ParseError;
use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::token::{Span, TokenKind};

impl Parser {
    /// Parses an expression.
    ///
    /// This is the entry point for expression parsing; it starts at the
    /// loosest-binding level, assignment.
    pub(super) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Builds a binary expression node spanning both operands.
    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        let span = Span::new(
            left.span.start,
            right.span.end,
            left.span.line,
            left.span.column,
        );
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    /// assignment → or ('=' assignment)?
    ///
    /// Right-associative. The left-hand side must be an identifier;
    /// anything else is a fatal parse error.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_or()?;

        if self.check(&TokenKind::Assign) {
            let assign_span = self.current_span();
            self.advance();

            if !matches!(left.kind, ExprKind::Identifier(_)) {
                return Err(ParseError::invalid_assignment_target(assign_span));
            }

            let right = self.parse_assignment()?;
            return Ok(Self::binary(BinaryOp::Assign, left, right));
        }

        Ok(left)
    }

    /// or → and ('||' and)*
    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.consume_if(&TokenKind::OrOr) {
            let right = self.parse_and()?;
            left = Self::binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    /// and → bit_or ('&&' bit_or)*
    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_bit_or()?;
        while self.consume_if(&TokenKind::AndAnd) {
            let right = self.parse_bit_or()?;
            left = Self::binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    /// bit_or → bit_xor ('|' bit_xor)*
    fn parse_bit_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_bit_xor()?;
        while self.consume_if(&TokenKind::Pipe) {
            let right = self.parse_bit_xor()?;
            left = Self::binary(BinaryOp::BitOr, left, right);
        }
        Ok(left)
    }

    /// bit_xor → bit_and ('^' bit_and)*
    fn parse_bit_xor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_bit_and()?;
        while self.consume_if(&TokenKind::Caret) {
            let right = self.parse_bit_and()?;
            left = Self::binary(BinaryOp::BitXor, left, right);
        }
        Ok(left)
    }

    /// bit_and → equality ('&' equality)*
    fn parse_bit_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;
        while self.consume_if(&TokenKind::Ampersand) {
            let right = self.parse_equality()?;
            left = Self::binary(BinaryOp::BitAnd, left, right);
        }
        Ok(left)
    }

    /// equality → comparison (('==' | '!=') comparison)*
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = if self.consume_if(&TokenKind::EqualEqual) {
                BinaryOp::Equal
            } else if self.consume_if(&TokenKind::BangEqual) {
                BinaryOp::NotEqual
            } else {
                break;
            };
            let right = self.parse_comparison()?;
            left = Self::binary(op, left, right);
        }
        Ok(left)
    }

    /// comparison → shift (('<' | '<=' | '>' | '>=') shift)*
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_shift()?;
        loop {
            let op = if self.consume_if(&TokenKind::Less) {
                BinaryOp::Less
            } else if self.consume_if(&TokenKind::LessEqual) {
                BinaryOp::LessEqual
            } else if self.consume_if(&TokenKind::Greater) {
                BinaryOp::Greater
            } else if self.consume_if(&TokenKind::GreaterEqual) {
                BinaryOp::GreaterEqual
            } else {
                break;
            };
            let right = self.parse_shift()?;
            left = Self::binary(op, left, right);
        }
        Ok(left)
    }

    /// shift → additive (('<<' | '>>') additive)*
    fn parse_shift(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = if self.consume_if(&TokenKind::ShiftLeft) {
                BinaryOp::ShiftLeft
            } else if self.consume_if(&TokenKind::ShiftRight) {
                BinaryOp::ShiftRight
            } else {
                break;
            };
            let right = self.parse_additive()?;
            left = Self::binary(op, left, right);
        }
        Ok(left)
    }

    /// additive → multiplicative (('+' | '-') multiplicative)*
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = if self.consume_if(&TokenKind::Plus) {
                BinaryOp::Add
            } else if self.consume_if(&TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.parse_multiplicative()?;
            left = Self::binary(op, left, right);
        }
        Ok(left)
    }

    /// multiplicative → unary (('*' | '/' | '%') unary)*
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.consume_if(&TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume_if(&TokenKind::Slash) {
                BinaryOp::Div
            } else if self.consume_if(&TokenKind::Percent) {
                BinaryOp::Rem
            } else {
                break;
            };
            let right = self.parse_unary()?;
            left = Self::binary(op, left, right);
        }
        Ok(left)
    }

    /// unary → ('!' | '-') unary | call
    ///
    /// Right-associative: `--x` parses as `-(-x)`.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let start_span = self.current_span();

        let op = if self.consume_if(&TokenKind::Bang) {
            UnaryOp::Not
        } else if self.consume_if(&TokenKind::Minus) {
            UnaryOp::Neg
        } else {
            return self.parse_call();
        };

        let operand = self.parse_unary()?;
        let span = Span::new(
            start_span.start,
            operand.span.end,
            start_span.line,
            start_span.column,
        );
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// call → primary ('(' arguments? ')')*
    ///
    /// # Grammar
    ///
    /// ```text
    /// arguments → expr (',' expr)*
    /// ```
    fn parse_call(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        while self.consume_if(&TokenKind::LeftParen) {
            let mut args = Vec::new();
            if !self.check(&TokenKind::RightParen) {
                loop {
                    args.push(self.parse_expression()?);
                    if !self.consume_if(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            let close_span = self.current_span();
            self.expect(&TokenKind::RightParen)?;

            let span = Span::new(
                expr.span.start,
                close_span.end,
                expr.span.line,
                expr.span.column,
            );
            expr = Expr::new(
                ExprKind::Call {
                    callee: Box::new(expr),
                    args,
                },
                span,
            );
        }

        Ok(expr)
    }

    /// primary → NUMBER | STRING | 'true' | 'false' | IDENT | '(' expr ')'
    ///         | 'if' expr block_expr 'else' block_expr
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start_span = self.current_span();

        if self.consume_if(&TokenKind::If) {
            return self.parse_if_expression(start_span);
        }

        match self.current_kind() {
            TokenKind::Number(digits) => {
                let digits = digits.clone();
                self.advance();
                Ok(Expr::new(ExprKind::Number(digits), start_span))
            }
            TokenKind::StringLiteral(value) => {
                let value = value.clone();
                self.advance();
                Ok(Expr::new(ExprKind::StringLiteral(value), start_span))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(ExprKind::Bool(true), start_span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(ExprKind::Bool(false), start_span))
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(Expr::new(ExprKind::Identifier(name), start_span))
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression()?;
                let close_span = self.current_span();
                self.expect(&TokenKind::RightParen)?;

                // Return the inner expression with the span widened to
                // cover the parentheses.
                let span = Span::new(
                    start_span.start,
                    close_span.end,
                    start_span.line,
                    start_span.column,
                );
                Ok(Expr::new(inner.kind, span))
            }
            _ => Err(ParseError::unexpected_expression_start(
                &Self::token_kind_display(self.current_kind()),
                start_span,
            )),
        }
    }

    /// Parses an if expression. The `if` keyword has already been
    /// consumed.
    ///
    /// Both branches are mandatory and each is a brace-delimited block
    /// containing exactly one expression.
    fn parse_if_expression(&mut self, start_span: Span) -> Result<Expr, ParseError> {
        let condition = self.parse_expression()?;
        let then_expr = self.parse_block_expression()?;

        if !self.consume_if(&TokenKind::Else) {
            return Err(ParseError::if_expression_missing_else(self.current_span()));
        }
        let else_expr = self.parse_block_expression()?;

        let span = Span::new(
            start_span.start,
            else_expr.span.end,
            start_span.line,
            start_span.column,
        );
        Ok(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            span,
        ))
    }

    /// Parses an if-expression branch: `{ expr }`.
    ///
    /// The block must contain exactly one expression with no trailing
    /// semicolon; a semicolon there is a fatal error because the block
    /// must produce a value.
    fn parse_block_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftBrace)?;

        let expr = self.parse_expression()?;

        if self.check(&TokenKind::Semicolon) {
            return Err(ParseError::semicolon_in_expression_block(
                self.current_span(),
            ));
        }

        self.expect(&TokenKind::RightBrace)?;
        Ok(expr)
    }
}

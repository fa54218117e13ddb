//! Expression type checking.
//!
//! Each expression form has a typing rule; [`Type::Unknown`] acts as a
//! wildcard on either side of any comparison. Analysis aborts on the
//! first violation.

use super::SemanticAnalyzer;
use super::error::SemanticError;
use super::symbol::SymbolKind;
use crate::ast::{BinaryOp, Expr, ExprKind, Type, UnaryOp};

impl SemanticAnalyzer {
    /// Analyzes an expression and returns its type.
    pub(super) fn analyze_expr(&mut self, expr: &Expr) -> Result<Type, SemanticError> {
        match &expr.kind {
            ExprKind::Number(_) => Ok(Type::Int),
            ExprKind::StringLiteral(_) => Ok(Type::Str),
            ExprKind::Bool(_) => Ok(Type::Bool),
            ExprKind::Identifier(name) => self
                .env
                .lookup(name)
                .map(|sym| sym.ty)
                .ok_or_else(|| SemanticError::undefined_identifier(name, expr.span)),
            ExprKind::Unary { op, operand } => self.analyze_unary(*op, operand, expr),
            ExprKind::Binary { op, left, right } => self.analyze_binary(*op, left, right, expr),
            ExprKind::Call { callee, args } => self.analyze_call(callee, args, expr),
            ExprKind::If {
                condition,
                then_expr,
                else_expr,
            } => self.analyze_if_expr(condition, then_expr, else_expr),
        }
    }

    /// Unary `-` requires `int` and yields `int`; unary `!` requires
    /// `bool` and yields `bool`.
    fn analyze_unary(
        &mut self,
        op: UnaryOp,
        operand: &Expr,
        expr: &Expr,
    ) -> Result<Type, SemanticError> {
        let operand_ty = self.analyze_expr(operand)?;
        let required = match op {
            UnaryOp::Neg => Type::Int,
            UnaryOp::Not => Type::Bool,
        };
        if !operand_ty.matches(required) {
            return Err(SemanticError::unary_requires(op, required, expr.span));
        }
        Ok(required)
    }

    fn analyze_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        expr: &Expr,
    ) -> Result<Type, SemanticError> {
        if op == BinaryOp::Assign {
            return self.analyze_assignment(left, right, expr);
        }

        let left_ty = self.analyze_expr(left)?;
        let right_ty = self.analyze_expr(right)?;

        match op {
            BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Rem => {
                // String concatenation is typed but not lowered; the
                // code generator has no string arithmetic.
                if op == BinaryOp::Add && left_ty == Type::Str && right_ty == Type::Str {
                    return Ok(Type::Str);
                }
                if left_ty.matches(Type::Int) && right_ty.matches(Type::Int) {
                    return Ok(Type::Int);
                }
                Err(SemanticError::arithmetic_requires_int(op, expr.span))
            }
            BinaryOp::Equal | BinaryOp::NotEqual => {
                if left_ty != right_ty && left_ty != Type::Unknown && right_ty != Type::Unknown {
                    return Err(SemanticError::comparing_different_types(
                        op, left_ty, right_ty, expr.span,
                    ));
                }
                Ok(Type::Bool)
            }
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
                if left_ty.matches(Type::Int) && right_ty.matches(Type::Int) {
                    return Ok(Type::Bool);
                }
                Err(SemanticError::relational_requires_int(op, expr.span))
            }
            BinaryOp::And | BinaryOp::Or => {
                if left_ty.matches(Type::Bool) && right_ty.matches(Type::Bool) {
                    return Ok(Type::Bool);
                }
                Err(SemanticError::logical_requires_bool(op, expr.span))
            }
            BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::ShiftLeft
            | BinaryOp::ShiftRight => {
                if left_ty.matches(Type::Int) && right_ty.matches(Type::Int) {
                    return Ok(Type::Int);
                }
                Err(SemanticError::bitwise_requires_int(op, expr.span))
            }
            BinaryOp::Assign => unreachable!("assignment handled above"),
        }
    }

    /// Analyzes `x = e`.
    ///
    /// The left-hand side must be a defined variable. If the variable's
    /// recorded type is `unknown` and the value's type is known, the
    /// variable's type is narrowed (the symbol is mutated). The result
    /// type is the variable's (possibly narrowed) type.
    fn analyze_assignment(
        &mut self,
        left: &Expr,
        right: &Expr,
        expr: &Expr,
    ) -> Result<Type, SemanticError> {
        // Analyzing the LHS first reports an undefined identifier with
        // the same message as any other use of an undefined name.
        self.analyze_expr(left)?;
        let value_ty = self.analyze_expr(right)?;

        let ExprKind::Identifier(name) = &left.kind else {
            return Err(SemanticError::invalid_assignment_target(expr.span));
        };

        let Some(symbol) = self.env.lookup_mut(name) else {
            return Err(SemanticError::assign_to_undefined(name, expr.span));
        };

        if symbol.ty == Type::Unknown && value_ty != Type::Unknown {
            symbol.ty = value_ty;
        } else if symbol.ty != Type::Unknown
            && value_ty != Type::Unknown
            && symbol.ty != value_ty
        {
            return Err(SemanticError::assignment_mismatch(
                name, symbol.ty, value_ty, expr.span,
            ));
        }

        Ok(symbol.ty)
    }

    /// Analyzes a call expression.
    ///
    /// The callee must be an identifier. `print` and `scan` are built-in
    /// I/O routines lowered specially by the code generator: their
    /// arguments are analyzed but no arity or parameter-type check is
    /// applied, and the call types as `int`. Every other callee must
    /// resolve to a function symbol whose parameter list the arguments
    /// match exactly.
    fn analyze_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        expr: &Expr,
    ) -> Result<Type, SemanticError> {
        let ExprKind::Identifier(name) = &callee.kind else {
            return Err(SemanticError::call_target_not_identifier(callee.span));
        };

        if name == "print" || name == "scan" {
            for arg in args {
                self.analyze_expr(arg)?;
            }
            return Ok(Type::Int);
        }

        let symbol = self
            .env
            .lookup(name)
            .ok_or_else(|| SemanticError::undefined_function(name, expr.span))?;
        if symbol.kind != SymbolKind::Function {
            return Err(SemanticError::not_a_function(name, expr.span));
        }

        let param_types = symbol.param_types.clone();
        let return_type = symbol.return_type;

        if args.len() != param_types.len() {
            return Err(SemanticError::argument_count_mismatch(name, expr.span));
        }

        let name = name.clone();
        for (index, (arg, &expected)) in args.iter().zip(param_types.iter()).enumerate() {
            let arg_ty = self.analyze_expr(arg)?;
            if !arg_ty.matches(expected) {
                return Err(SemanticError::argument_type_mismatch(
                    index, &name, arg.span,
                ));
            }
        }

        Ok(return_type)
    }

    /// Analyzes an if expression: the condition must be `bool`, both
    /// branches must agree in type, and the result is the common type
    /// (preferring the known one when a branch is `unknown`).
    fn analyze_if_expr(
        &mut self,
        condition: &Expr,
        then_expr: &Expr,
        else_expr: &Expr,
    ) -> Result<Type, SemanticError> {
        let cond_ty = self.analyze_expr(condition)?;
        if !cond_ty.matches(Type::Bool) {
            return Err(SemanticError::condition_not_bool(
                "If",
                cond_ty,
                condition.span,
            ));
        }

        let then_ty = self.analyze_expr(then_expr)?;
        let else_ty = self.analyze_expr(else_expr)?;
        if then_ty != else_ty && then_ty != Type::Unknown && else_ty != Type::Unknown {
            return Err(SemanticError::if_expression_branch_mismatch(
                then_ty,
                else_ty,
                then_expr.span,
            ));
        }

        Ok(if then_ty != Type::Unknown {
            then_ty
        } else {
            else_ty
        })
    }
}

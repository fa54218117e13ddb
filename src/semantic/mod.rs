//! Semantic analysis for the Zinc programming language.
//!
//! This module provides the [`SemanticAnalyzer`] which validates a Zinc
//! AST for semantic correctness before code generation.
//!
//! # Responsibilities
//!
//! The semantic analyzer performs the following validations in a single
//! walk over the AST:
//!
//! - **Name resolution**: every identifier and call target must resolve
//!   to a symbol visible from its textual location; duplicate definitions
//!   within one scope are rejected
//! - **Type checking**: operands, initializers, conditions, return values
//!   and call arguments must agree with the rules of the language, with
//!   [`Type::Unknown`] acting as a wildcard
//! - **Inference**: a variable declared without a type takes the type of
//!   its initializer; an `unknown` variable is narrowed by its first
//!   typed assignment
//!
//! The analyzer mutates only its own symbol table, never the AST.
//! Analysis aborts on the first violation.
//!
//! # Built-in I/O
//!
//! `print` is pre-declared in the global scope as a function symbol.
//! Calls to `print` and `scan` bypass arity and parameter-type checking
//! (they are lowered specially by the code generator); their arguments
//! are still analyzed, so an undefined name inside a `print` call is
//! reported as usual. Both calls have type `int`.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lexer → Parser → Semantic Analyzer → Codegen → Executable
//! ```

mod error;
mod expr;
mod symbol;


pub use error::{SemanticError, SemanticErrorKind};
pub use symbol::{Environment, Symbol, SymbolKind};

use crate::ast::{FnDecl, Program, Stmt, StmtKind, Type};

/// Semantic analyzer for Zinc programs.
///
/// The analyzer guarantees that if [`analyze`](Self::analyze) succeeds,
/// every reachable identifier resolves to a visible symbol and all
/// expressions are consistently typed, so code generation can proceed
/// without semantic surprises.
pub struct SemanticAnalyzer {
    /// The scope-chain symbol table.
    env: Environment,
    /// Declared return types of the enclosing functions, innermost last.
    return_stack: Vec<Type>,
}

impl SemanticAnalyzer {
    /// Creates a new semantic analyzer with the built-in `print`
    /// function pre-declared in the global scope.
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Placeholder signature; print is variadic and bypasses the
        // arity check (see analyze_call in expr.rs).
        env.define(Symbol::function("print", vec![Type::Str], Type::Int));
        SemanticAnalyzer {
            env,
            return_stack: Vec::new(),
        }
    }

    /// Analyzes a program for semantic correctness.
    ///
    /// Top-level statements are analyzed in source order; a function must
    /// therefore be declared textually before it is called.
    ///
    /// # Errors
    ///
    /// Returns the first [`SemanticError`] found; no recovery or error
    /// accumulation is attempted.
    pub fn analyze(&mut self, program: &Program) -> Result<(), SemanticError> {
        for stmt in &program.stmts {
            self.analyze_stmt(stmt)?;
        }
        Ok(())
    }

    /// Returns the environment built during analysis.
    ///
    /// After [`analyze`](Self::analyze) returns, the global scope holds
    /// all top-level declarations.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match &stmt.kind {
            StmtKind::Function(func) => self.analyze_function(func),
            StmtKind::Let { name, ty, init } => self.analyze_let(name, *ty, init.as_ref(), stmt),
            StmtKind::Block(stmts) => {
                self.env.push();
                let result = self.analyze_stmts(stmts);
                self.env.pop();
                result
            }
            StmtKind::Return(value) => self.analyze_return(value.as_ref(), stmt),
            StmtKind::Expr(expr) => self.analyze_expr(expr).map(|_| ()),
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                let cond_ty = self.analyze_expr(condition)?;
                if !cond_ty.matches(Type::Bool) {
                    return Err(SemanticError::condition_not_bool(
                        "If",
                        cond_ty,
                        condition.span,
                    ));
                }

                self.env.push();
                let result = self.analyze_stmts(then_block);
                self.env.pop();
                result?;

                if let Some(else_block) = else_block {
                    self.env.push();
                    let result = self.analyze_stmts(else_block);
                    self.env.pop();
                    result?;
                }
                Ok(())
            }
            StmtKind::While { condition, body } => {
                let cond_ty = self.analyze_expr(condition)?;
                if !cond_ty.matches(Type::Bool) {
                    return Err(SemanticError::condition_not_bool(
                        "While",
                        cond_ty,
                        condition.span,
                    ));
                }

                self.env.push();
                let result = self.analyze_stmts(body);
                self.env.pop();
                result
            }
        }
    }

    fn analyze_stmts(&mut self, stmts: &[Stmt]) -> Result<(), SemanticError> {
        for stmt in stmts {
            self.analyze_stmt(stmt)?;
        }
        Ok(())
    }

    /// Analyzes a function declaration.
    ///
    /// The function symbol is defined in the enclosing scope, then the
    /// body is analyzed under a fresh scope holding the parameters, with
    /// the body statements in a child scope of their own (so a body-level
    /// `let` may shadow a parameter).
    fn analyze_function(&mut self, func: &FnDecl) -> Result<(), SemanticError> {
        if self.env.lookup_current(&func.name).is_some() {
            return Err(SemanticError::duplicate_function(&func.name, func.span));
        }

        let return_type = func.return_type.unwrap_or(Type::Void);
        let param_types: Vec<Type> = func
            .params
            .iter()
            .map(|p| p.ty.unwrap_or(Type::Unknown))
            .collect();
        self.env.define(Symbol::function(
            func.name.clone(),
            param_types,
            return_type,
        ));

        self.env.push();
        for param in &func.params {
            let ty = param.ty.unwrap_or(Type::Unknown);
            if !self.env.define(Symbol::var(param.name.clone(), ty)) {
                self.env.pop();
                return Err(SemanticError::duplicate_parameter(&param.name, param.span));
            }
        }

        self.return_stack.push(return_type);
        self.env.push();
        let result = self.analyze_stmts(&func.body);
        self.env.pop();
        self.return_stack.pop();
        self.env.pop();

        result
    }

    /// Analyzes a `let` declaration.
    ///
    /// The declaration must carry a type, an initializer, or both. When
    /// both are present the initializer's type must match the annotation;
    /// when only the initializer is present the variable's type is
    /// inferred from it.
    fn analyze_let(
        &mut self,
        name: &str,
        ty: Option<Type>,
        init: Option<&crate::ast::Expr>,
        stmt: &Stmt,
    ) -> Result<(), SemanticError> {
        if ty.is_none() && init.is_none() {
            return Err(SemanticError::missing_type_or_initializer(name, stmt.span));
        }

        if self.env.lookup_current(name).is_some() {
            return Err(SemanticError::duplicate_variable(name, stmt.span));
        }

        let mut var_ty = ty.unwrap_or(Type::Unknown);
        if let Some(init) = init {
            let init_ty = self.analyze_expr(init)?;
            match ty {
                None => var_ty = init_ty,
                Some(declared) => {
                    if init_ty != Type::Unknown && init_ty != declared {
                        return Err(SemanticError::initializer_mismatch(
                            name, init_ty, declared, init.span,
                        ));
                    }
                }
            }
        }

        self.env.define(Symbol::var(name, var_ty));
        Ok(())
    }

    /// Analyzes a return statement against the enclosing function's
    /// declared return type.
    fn analyze_return(
        &mut self,
        value: Option<&crate::ast::Expr>,
        stmt: &Stmt,
    ) -> Result<(), SemanticError> {
        let Some(&expected) = self.return_stack.last() else {
            return Err(SemanticError::return_outside_function(stmt.span));
        };

        match value {
            Some(value) => {
                let value_ty = self.analyze_expr(value)?;
                if !value_ty.matches(expected) {
                    return Err(SemanticError::return_type_mismatch(
                        expected, value_ty, value.span,
                    ));
                }
            }
            None => {
                if expected != Type::Void {
                    return Err(SemanticError::return_missing_value(expected, stmt.span));
                }
            }
        }
        Ok(())
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

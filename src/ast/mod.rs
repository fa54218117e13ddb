//! Abstract Syntax Tree definitions for the Zinc programming language.
//!
//! This module defines the data structures that represent parsed Zinc
//! programs. The AST is produced by the [`crate::parser`], validated by
//! the [`crate::semantic`] analyzer, and consumed by the
//! [`crate::codegen`] back end.
//!
//! # Structure
//!
//! The AST has a hierarchical structure:
//! - [`Program`] - The root node: an ordered sequence of top-level statements
//! - [`Stmt`] / [`StmtKind`] - Statements (expression statements, `let`,
//!   `return`, blocks, `if`, `while`, function declarations)
//! - [`Expr`] / [`ExprKind`] - Expressions (literals, identifiers, unary
//!   and binary operations, calls, if expressions)
//! - [`Type`] - The closed set of Zinc types
//!
//! Each node exclusively owns its children: the tree has no sharing and
//! no cycles, and the parser transfers ownership of the whole tree to the
//! downstream stages. Every node carries a [`Span`](crate::token::Span)
//! for error reporting.
//!
//! # See Also
//!
//! * [`crate::parser`] - Produces the AST from tokens
//! * [`crate::semantic`] - Validates the AST
//! * [`crate::codegen`] - Generates x86-64 assembly from the AST

mod expr;
mod program;
mod stmt;
mod types;


pub use expr::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use program::{FnDecl, Param, Program};
pub use stmt::{Stmt, StmtKind};
pub use types::Type;

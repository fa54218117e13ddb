//! Top-level program structure for the Zinc AST.

use crate::token::Span;

use super::stmt::Stmt;
use super::types::Type;

/// A function parameter: a name with an optional type annotation.
#[derive(Debug, Clone)]
pub struct Param {
    /// The parameter name.
    pub name: String,
    /// The declared type, or `None` when the annotation was omitted
    /// (the analyzer treats it as [`Type::Unknown`]).
    pub ty: Option<Type>,
    /// The source location of the parameter name.
    pub span: Span,
}

/// A function declaration in the Zinc language.
///
/// # Examples
///
/// ```text
/// fn fact(n: int) : int {
///     if n <= 1 { return 1; }
///     return n * fact(n - 1);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FnDecl {
    /// The name of the function.
    pub name: String,
    /// The parameters, in declaration order.
    pub params: Vec<Param>,
    /// The declared return type, or `None` when omitted (the analyzer
    /// defaults it to `void`).
    pub return_type: Option<Type>,
    /// The statements that make up the function body.
    pub body: Vec<Stmt>,
    /// The source location of the function name.
    pub span: Span,
}

/// The root node of a Zinc program's AST.
///
/// A `Program` is an ordered sequence of top-level statements, typically
/// function declarations. The generated executable starts by calling
/// `main`.
#[derive(Debug)]
pub struct Program {
    /// The top-level statements in source order.
    pub stmts: Vec<Stmt>,
}

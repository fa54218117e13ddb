//! Statement nodes for the Zinc AST.

use crate::token::Span;

use super::expr::Expr;
use super::program::FnDecl;
use super::types::Type;

/// The kind of a statement in the Zinc language.
///
/// This enum represents the different types of statements without
/// source location information. Use [`Stmt`] for the full AST node
/// with span information.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// An expression statement.
    ///
    /// Evaluates the expression for its side effects. The result value
    /// is discarded.
    Expr(Expr),

    /// A return statement.
    ///
    /// `return` without a value is represented as `None`.
    Return(Option<Expr>),

    /// A variable declaration with `let`.
    ///
    /// At least one of `ty` and `init` must be present; the semantic
    /// analyzer rejects a declaration with neither.
    Let {
        /// The name of the variable being declared.
        name: String,
        /// The declared type, if an annotation was written.
        ty: Option<Type>,
        /// The initializer expression, if one was written.
        init: Option<Expr>,
    },

    /// A brace-delimited block of statements with its own scope.
    Block(Vec<Stmt>),

    /// A conditional statement with optional `else` branch.
    ///
    /// An `else if` chain is represented as an `else_block` containing
    /// a single nested `StmtKind::If`.
    If {
        /// The condition expression. Must evaluate to `bool`.
        condition: Expr,
        /// Statements executed when the condition is true.
        then_block: Vec<Stmt>,
        /// Optional statements executed when the condition is false.
        else_block: Option<Vec<Stmt>>,
    },

    /// A while loop statement.
    While {
        /// The loop condition. Must evaluate to `bool`.
        condition: Expr,
        /// Statements executed for each iteration.
        body: Vec<Stmt>,
    },

    /// A function declaration.
    ///
    /// Functions are statements so that they can appear anywhere a
    /// declaration is allowed; in practice they live at the top level.
    Function(FnDecl),
}

/// A statement in the Zinc language with source location.
#[derive(Debug, Clone)]
pub struct Stmt {
    /// The kind of statement.
    pub kind: StmtKind,
    /// The source location of this statement.
    pub span: Span,
}

impl Stmt {
    /// Creates a new statement with the given kind and span.
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

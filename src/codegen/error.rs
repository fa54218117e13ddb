//! Code generation error types.
//!
//! This module defines [`CodegenError`], which represents errors that can
//! occur while lowering the AST to x86-64 assembly.

use crate::token::Span;

/// An error that occurred during code generation.
///
/// Contains a human-readable message and optionally the source location
/// where the error occurred. Most codegen errors indicate a construct
/// the back end does not support (too many parameters, nested functions,
/// a local the frame pre-scan never allocated).
#[derive(Debug)]
pub struct CodegenError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred, if available.
    pub span: Option<Span>,
}

impl CodegenError {
    /// Creates a new error with a message and source location.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        CodegenError {
            message: message.into(),
            span: Some(span),
        }
    }

    /// Creates an error for a name that was never allocated a stack slot.
    ///
    /// The frame pre-scan allocates every parameter and `let` name of a
    /// function up front, so this error surfaces either an internal bug
    /// or a `let` outside any function frame.
    pub(super) fn unallocated_local(name: &str, span: Span) -> Self {
        Self::new(format!("No stack slot allocated for '{}'", name), span)
    }

    /// Creates an error for a function with more parameters than the six
    /// integer argument registers of the System V AMD64 ABI.
    pub(super) fn too_many_parameters(name: &str, span: Span) -> Self {
        Self::new(
            format!("Function '{}' has more than 6 parameters, which is unsupported", name),
            span,
        )
    }

    /// Creates an error for a call passing more arguments than the six
    /// integer argument registers can carry.
    pub(super) fn too_many_arguments(name: &str, span: Span) -> Self {
        Self::new(
            format!("Call to '{}' passes more than 6 arguments, which is unsupported", name),
            span,
        )
    }

    /// Creates an error for a function declared inside another function.
    pub(super) fn nested_function(name: &str, span: Span) -> Self {
        Self::new(
            format!("Nested function declarations are not supported: '{}'", name),
            span,
        )
    }

    /// Creates an error for a call whose target is not a plain
    /// identifier. The semantic analyzer rejects these first; reaching
    /// this in codegen indicates a compiler bug.
    pub(super) fn call_target_not_identifier(span: Span) -> Self {
        Self::new("Call target must be a function identifier", span)
    }

    /// Creates an error for an assignment whose left-hand side is not an
    /// identifier. The parser rejects these first; reaching this in
    /// codegen indicates a compiler bug.
    pub(super) fn invalid_assignment_target(span: Span) -> Self {
        Self::new("Assignment target must be a variable", span)
    }
}

impl std::fmt::Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "{}:{}: {}", span.line, span.column, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for CodegenError {}

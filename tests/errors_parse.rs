//! Parse error tests for the Zinc compiler.
//!
//! These tests verify that syntactically invalid programs are rejected
//! with a message naming the problem.

mod common;

use common::{Stage, assert_fails_at};

#[test]
fn test_missing_function_name() {
    assert_fails_at("fn () { }", Stage::Parse, "function name");
}

#[test]
fn test_missing_closing_paren_in_params() {
    assert_fails_at("fn f(a: int { }", Stage::Parse, "Expected");
}

#[test]
fn test_missing_block_after_if() {
    assert_fails_at(
        "fn main() : int { if 1 == 1 return 0; }",
        Stage::Parse,
        "Expected '{'",
    );
}

#[test]
fn test_invalid_assignment_target() {
    assert_fails_at(
        "fn main() : int { 1 + 2 = 3; return 0; }",
        Stage::Parse,
        "Invalid assignment target",
    );
}

#[test]
fn test_unexpected_token_in_expression() {
    assert_fails_at(
        "fn main() : int { let x = *; return 0; }",
        Stage::Parse,
        "Unexpected token in expression",
    );
}

#[test]
fn test_if_expression_without_else() {
    assert_fails_at(
        "fn main() : int { let x = if true { 1 }; return x; }",
        Stage::Parse,
        "must have an else branch",
    );
}

#[test]
fn test_semicolon_in_if_expression_branch() {
    assert_fails_at(
        "fn main() : int { let x = if true { 1; } else { 2 }; return x; }",
        Stage::Parse,
        "cannot end in semicolon",
    );
}

#[test]
fn test_let_without_terminator() {
    assert_fails_at(
        "fn main() : int { let x : int return 0; }",
        Stage::Parse,
        "Expected '=' or ';'",
    );
}

#[test]
fn test_unknown_type_name() {
    assert_fails_at(
        "fn main() : int { let x : number = 1; return 0; }",
        Stage::Parse,
        "Unknown type",
    );
}

#[test]
fn test_unclosed_call() {
    assert_fails_at("fn main() : int { print(1; return 0; }", Stage::Parse, "Expected");
}

//! Semantic error tests for the Zinc compiler.
//!
//! These tests verify that well-formed but meaningless programs are
//! rejected during semantic analysis.

mod common;

use common::{Stage, assert_fails_at, compile_ok};

#[test]
fn test_undeclared_variable_is_named_in_message() {
    let message = assert_fails_at(
        "fn main() : int { let x = y + 1; return 0; }",
        Stage::Semantic,
        "Undefined identifier",
    );
    assert!(message.contains('y'));
}

#[test]
fn test_integer_condition_rejected() {
    assert_fails_at(
        "fn main() : int { if 1 { } return 0; }",
        Stage::Semantic,
        "If condition must be bool",
    );
}

#[test]
fn test_argument_count_mismatch() {
    assert_fails_at(
        "fn f(x: int) : int { return x; } fn main() : int { return f(1, 2); }",
        Stage::Semantic,
        "Argument count mismatch",
    );
}

#[test]
fn test_duplicate_function() {
    assert_fails_at(
        "fn f() { } fn f() { } fn main() : int { return 0; }",
        Stage::Semantic,
        "Function already defined",
    );
}

#[test]
fn test_redefined_variable() {
    assert_fails_at(
        "fn main() : int { let a = 1; let a = 2; return 0; }",
        Stage::Semantic,
        "already defined in current scope",
    );
}

#[test]
fn test_return_outside_function() {
    assert_fails_at("return 1;", Stage::Semantic, "Return used outside of function");
}

#[test]
fn test_return_value_type_checked() {
    assert_fails_at(
        "fn f() : int { return true; } fn main() : int { return f(); }",
        Stage::Semantic,
        "Return type mismatch",
    );
}

#[test]
fn test_let_without_type_or_initializer() {
    assert_fails_at(
        "fn main() : int { let x; return 0; }",
        Stage::Semantic,
        "must have a type or an initializer",
    );
}

#[test]
fn test_mixed_equality_rejected() {
    assert_fails_at(
        "fn main() : int { let b = 1 == true; return 0; }",
        Stage::Semantic,
        "Comparing different types",
    );
}

#[test]
fn test_call_on_variable_rejected() {
    assert_fails_at(
        "fn main() : int { let v = 3; return v(); }",
        Stage::Semantic,
        "is not a function",
    );
}

#[test]
fn test_print_is_exempt_from_arity_checks() {
    compile_ok("fn main() : int { print(\"a\", 1, \"b\", 2); return 0; }");
}

#[test]
fn test_scan_needs_no_declaration() {
    compile_ok("fn main() : int { let n : int = scan(); print(n); return 0; }");
}

//! Unit tests for the code generator.
//!
//! These tests run the full front end and assert on the emitted
//! assembly text; they do not require an assembler.

use super::*;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::semantic::SemanticAnalyzer;

/// Runs the whole pipeline on a source string and returns the assembly.
fn generate_source(source: &str) -> String {
    let mut lexer = Lexer::new(source);
    let tokens = lexer
        .tokenize()
        .unwrap_or_else(|e| panic!("Lexing failed for {:?}: {}", source, e));
    let mut parser = Parser::new(tokens);
    let program = parser
        .parse()
        .unwrap_or_else(|e| panic!("Parsing failed for {:?}: {}", source, e));
    let mut analyzer = SemanticAnalyzer::new();
    analyzer
        .analyze(&program)
        .unwrap_or_else(|e| panic!("Semantic analysis failed for {:?}: {}", source, e));
    let mut codegen = Codegen::new();
    codegen
        .generate(&program)
        .unwrap_or_else(|e| panic!("Codegen failed for {:?}: {}", source, e))
}

/// Runs the whole pipeline and returns the codegen error.
fn generate_error(source: &str) -> CodegenError {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize().unwrap();
    let mut parser = Parser::new(tokens);
    let program = parser.parse().unwrap();
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(&program).unwrap();
    let mut codegen = Codegen::new();
    match codegen.generate(&program) {
        Ok(_) => panic!("Expected codegen to fail for {:?}", source),
        Err(e) => e,
    }
}

/// Returns every label defined in the assembly (lines ending in `:`).
fn defined_labels(asm: &str) -> Vec<&str> {
    asm.lines()
        .filter(|line| !line.starts_with(' ') && line.ends_with(':'))
        .map(|line| line.trim_end_matches(':'))
        .collect()
}

// ===================
// Program skeleton
// ===================

#[test]
fn test_start_prelude() {
    let asm = generate_source("fn main() : int { return 0; }");
    assert!(asm.contains("section .text\n"));
    assert!(asm.contains("global _start\n"));
    assert!(asm.contains("_start:\n"));
    assert!(asm.contains("call main"));
    assert!(asm.contains("mov rax,60"));
    assert!(asm.contains("xor rdi,rdi"));
}

#[test]
fn test_sections_always_present() {
    let asm = generate_source("fn main() : int { return 0; }");
    assert!(asm.contains("section .data\n"));
    assert!(asm.contains("section .bss\n"));
    assert!(asm.contains("num_buf: resb 20\n"));
}

#[test]
fn test_function_prologue_and_epilogue() {
    let asm = generate_source("fn main() : int { let x : int = 1; let y : int = 2; return 0; }");
    assert!(asm.contains("main:\n"));
    assert!(asm.contains("push rbp"));
    assert!(asm.contains("mov rbp,rsp"));
    assert!(asm.contains("sub rsp,16"));
    assert!(asm.contains("leave"));
    assert!(asm.contains("ret"));
}

#[test]
fn test_parameters_spill_in_abi_order() {
    let asm = generate_source("fn f(a: int, b: int, c: int) : int { return a; } fn main() : int { return f(1, 2, 3); }");
    assert!(asm.contains("mov [rbp-8],rdi"));
    assert!(asm.contains("mov [rbp-16],rsi"));
    assert!(asm.contains("mov [rbp-24],rdx"));
}

#[test]
fn test_frame_includes_nested_block_lets() {
    // Both branch-local lets get their own slots in the one frame.
    let asm = generate_source(
        "fn main() : int { if 1 == 1 { let a : int = 1; print(a); } else { let b : int = 2; print(b); } return 0; }",
    );
    assert!(asm.contains("sub rsp,16"));
}

// ===================
// Data section
// ===================

#[test]
fn test_string_bytes_with_resolved_newline() {
    let asm = generate_source("fn main() : int { print(\"Hello\\n\"); return 0; }");
    assert!(asm.contains("str_0: db 72,101,108,108,111,10,0\n"));
    // The write length counts resolved bytes.
    assert!(asm.contains("mov rdx, 6"));
}

#[test]
fn test_unknown_escape_kept_as_two_bytes() {
    let asm = generate_source("fn main() : int { print(\"a\\rb\"); return 0; }");
    // 97, backslash (92), 'r' (114), 98.
    assert!(asm.contains("str_0: db 97,92,114,98,0\n"));
    assert!(asm.contains("mov rdx, 4"));
}

#[test]
fn test_strings_deduplicated() {
    let asm = generate_source("fn main() : int { print(\"x\"); print(\"x\"); return 0; }");
    assert!(asm.contains("str_0"));
    assert!(!asm.contains("str_1"));
}

#[test]
fn test_strings_emitted_in_first_occurrence_order() {
    let asm = generate_source(
        "fn main() : int { print(\"bb\"); print(\"aa\"); print(\"bb\"); return 0; }",
    );
    let bb = asm.find("str_0: db 98,98,0").expect("bb should be str_0");
    let aa = asm.find("str_1: db 97,97,0").expect("aa should be str_1");
    assert!(bb < aa);
}

#[test]
fn test_output_is_deterministic() {
    let source = "fn main() : int { print(\"one\", 1, \"two\", 2, \"\\n\"); return 0; }";
    assert_eq!(generate_source(source), generate_source(source));
}

#[test]
fn test_string_in_if_expression_is_collected() {
    // The pre-pass walks if-expression arms too.
    let asm = generate_source(
        "fn main() : int { let s : string = if 1 == 1 { \"y\" } else { \"n\" }; return 0; }",
    );
    assert!(asm.contains("str_0: db 121,0"));
    assert!(asm.contains("str_1: db 110,0"));
}

// ===================
// Expressions
// ===================

#[test]
fn test_number_literal_loads_digits() {
    let asm = generate_source("fn main() : int { return 42; }");
    assert!(asm.contains("mov rax,42"));
}

#[test]
fn test_bool_literals() {
    let asm = generate_source("fn main() : int { let t : bool = true; let f : bool = false; return 0; }");
    assert!(asm.contains("mov rax,1"));
    assert!(asm.contains("xor rax,rax"));
}

#[test]
fn test_identifier_loads_from_frame() {
    let asm = generate_source("fn main() : int { let x : int = 5; return x; }");
    assert!(asm.contains("mov [rbp-8],rax"));
    assert!(asm.contains("mov rax,[rbp-8]"));
}

#[test]
fn test_arithmetic_operators() {
    let asm = generate_source(
        "fn main() : int { let x : int = 1 + 2 - 3 * 4 / 5 % 6; return x; }",
    );
    assert!(asm.contains("add rax,rbx"));
    assert!(asm.contains("sub rax,rbx"));
    assert!(asm.contains("imul rax,rbx"));
    assert!(asm.contains("cqo"));
    assert!(asm.contains("idiv rbx"));
    assert!(asm.contains("mov rax,rdx"));
}

#[test]
fn test_binary_operands_use_push_pop() {
    let asm = generate_source("fn main() : int { return 1 + 2; }");
    assert!(asm.contains("push rax"));
    assert!(asm.contains("mov rbx,rax"));
    assert!(asm.contains("pop rax"));
}

#[test]
fn test_comparison_normalizes_to_01() {
    let asm = generate_source("fn main() : int { let b : bool = 1 <= 2; return 0; }");
    assert!(asm.contains("cmp rax,rbx"));
    assert!(asm.contains("setle al"));
    assert!(asm.contains("movzx rax,al"));
}

#[test]
fn test_all_comparison_set_instructions() {
    let asm = generate_source(
        "fn main() : int { let a : bool = 1 == 2; let b : bool = 1 != 2; let c : bool = 1 < 2; let d : bool = 1 <= 2; let e : bool = 1 > 2; let f : bool = 1 >= 2; return 0; }",
    );
    for set in ["sete al", "setne al", "setl al", "setle al", "setg al", "setge al"] {
        assert!(asm.contains(set), "missing {}", set);
    }
}

#[test]
fn test_bitwise_operators() {
    let asm = generate_source("fn main() : int { let x : int = (6 & 3) | (6 ^ 3); return x; }");
    assert!(asm.contains("and rax,rbx"));
    assert!(asm.contains("or rax,rbx"));
    assert!(asm.contains("xor rax,rbx"));
}

#[test]
fn test_shift_operators_use_cl() {
    let asm = generate_source("fn main() : int { let x : int = 1 << 4 >> 2; return x; }");
    assert!(asm.contains("mov cl, bl"));
    assert!(asm.contains("shl rax, cl"));
    assert!(asm.contains("shr rax, cl"));
}

#[test]
fn test_logical_and_short_circuits() {
    let asm = generate_source("fn main() : int { let b : bool = true && false; return 0; }");
    assert!(asm.contains("and_false_"));
    assert!(asm.contains("and_end_"));
    assert!(asm.contains("mov rax,1"));
}

#[test]
fn test_logical_or_short_circuits() {
    let asm = generate_source("fn main() : int { let b : bool = false || true; return 0; }");
    assert!(asm.contains("or_true_"));
    assert!(asm.contains("or_end_"));
}

#[test]
fn test_unary_neg_and_not() {
    let asm = generate_source(
        "fn main() : int { let x : int = -5; let b : bool = !true; return x; }",
    );
    assert!(asm.contains("neg rax"));
    assert!(asm.contains("sete al"));
}

#[test]
fn test_assignment_stores_rbx() {
    // After the shared binary prelude the right-hand value is in rbx;
    // that register is stored and becomes the result.
    let asm = generate_source("fn main() : int { let x : int = 0; x = 5 + 2; print(x); return 0; }");
    assert!(asm.contains("mov [rbp-8],rbx"));
    assert!(asm.contains("mov rax,rbx"));
}

#[test]
fn test_if_expression_branches() {
    let asm = generate_source(
        "fn main() : int { let x : int = if 1 == 1 { 42 } else { 0 }; return x; }",
    );
    assert!(asm.contains("cmp rax, 0"));
    assert!(asm.contains("je else_"));
    assert!(asm.contains("jmp ifend_"));
}

// ===================
// Statements
// ===================

#[test]
fn test_if_statement_without_else_still_emits_labels() {
    let asm = generate_source("fn main() : int { if 1 == 1 { print(\"t\"); } return 0; }");
    assert!(asm.contains("je else_"));
    assert!(asm.contains("jmp ifend_"));
}

#[test]
fn test_while_loop_shape() {
    let asm = generate_source(
        "fn main() : int { let i : int = 0; while i < 3 { i = i + 1; } return 0; }",
    );
    assert!(asm.contains("while_start_"));
    assert!(asm.contains("je while_end_"));
    assert!(asm.contains("jmp while_start_"));
}

#[test]
fn test_return_emits_early_epilogue() {
    let asm = generate_source("fn f() : int { return 1; return 2; } fn main() : int { return f(); }");
    // Early return plus the unconditional trailing epilogue.
    let leaves = asm.matches("leave").count();
    assert!(leaves >= 3);
}

// ===================
// Calls
// ===================

#[test]
fn test_user_call_moves_args_to_registers() {
    let asm = generate_source(
        "fn add(a: int, b: int) : int { return a + b; } fn main() : int { return add(1, 2); }",
    );
    assert!(asm.contains("mov rdi,rax"));
    assert!(asm.contains("mov rsi,rax"));
    assert!(asm.contains("call add"));
}

#[test]
fn test_recursive_call() {
    let asm = generate_source(
        "fn fact(n: int) : int { if n <= 1 { return 1; } return n * fact(n - 1); } fn main() : int { print(fact(5)); return 0; }",
    );
    assert!(asm.contains("fact:\n"));
    assert!(asm.contains("call fact"));
}

#[test]
fn test_print_string_writes_via_syscall() {
    let asm = generate_source("fn main() : int { print(\"hi\"); return 0; }");
    assert!(asm.contains("mov rax, 1"));
    assert!(asm.contains("mov rdi, 1"));
    assert!(asm.contains("lea rsi, [rel str_0]"));
    assert!(asm.contains("syscall"));
}

#[test]
fn test_print_integer_converts_into_num_buf() {
    let asm = generate_source("fn main() : int { print(7); return 0; }");
    assert!(asm.contains("lea rdi, [rel num_buf+19]"));
    assert!(asm.contains("mov rcx, 10"));
    assert!(asm.contains("div rcx"));
    assert!(asm.contains("conv_"));
}

#[test]
fn test_print_accumulates_total_in_r12() {
    let asm = generate_source("fn main() : int { print(\"a\", 1); return 0; }");
    assert!(asm.contains("push r12"));
    assert!(asm.contains("xor r12, r12"));
    assert!(asm.contains("add r12, rdx"));
    assert!(asm.contains("mov rax, r12"));
    assert!(asm.contains("pop r12"));
}

#[test]
fn test_scan_reserves_input_buf() {
    let asm = generate_source("fn main() : int { let n : int = scan(); print(n); return 0; }");
    assert!(asm.contains("input_buf: resb 32\n"));
    assert!(asm.contains("lea rsi, [rel input_buf]"));
    assert!(asm.contains("mov rdx, 32"));
    assert!(asm.contains("imul rcx, rcx, 10"));
}

#[test]
fn test_no_input_buf_without_scan() {
    let asm = generate_source("fn main() : int { return 0; }");
    assert!(!asm.contains("input_buf"));
}

// ===================
// Labels
// ===================

#[test]
fn test_labels_are_unique_across_whole_output() {
    let asm = generate_source(
        "fn f(n: int) : int { if n > 0 { return 1; } return 0; } \
         fn main() : int { \
           let i : int = 0; \
           while i < 2 { if i == 1 { print(\"a\"); } else { print(\"b\"); } i = i + 1; } \
           let x : int = if f(1) == 1 { 1 } else { 2 }; \
           let b : bool = true && false || true; \
           print(x); print(scan()); \
           return 0; }",
    );
    let labels = defined_labels(&asm);
    let mut seen = std::collections::HashSet::new();
    for label in &labels {
        assert!(seen.insert(*label), "duplicate label: {}", label);
    }
}

// ===================
// Unsupported constructs
// ===================

#[test]
fn test_top_level_let_is_rejected() {
    let err = generate_error("let x : int = 1; fn main() : int { return 0; }");
    assert!(err.message.contains("No stack slot"));
}

#[test]
fn test_nested_function_is_rejected() {
    let err = generate_error("fn outer() { fn inner() { } } fn main() : int { return 0; }");
    assert!(err.message.contains("Nested function"));
}

#[test]
fn test_more_than_six_parameters_rejected() {
    let err = generate_error(
        "fn f(a: int, b: int, c: int, d: int, e: int, f: int, g: int) : int { return a; } \
         fn main() : int { return 0; }",
    );
    assert!(err.message.contains("more than 6 parameters"));
}

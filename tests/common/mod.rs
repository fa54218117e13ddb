//! Common test utilities for Zinc integration tests.
//!
//! This module provides shared helper functions used across the
//! integration test files.

// Each test file is compiled as a separate crate, so not all helpers
// are used in every test file.
#![allow(dead_code)]

use zinc::codegen::Codegen;
use zinc::lexer::Lexer;
use zinc::parser::Parser;
use zinc::semantic::SemanticAnalyzer;

/// The stage at which compilation failed.
#[derive(Debug, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Semantic,
    Codegen,
}

/// Runs the full compiler pipeline on a source string and returns the
/// generated assembly text.
///
/// The pipeline is lex → parse → semantic analysis → code generation;
/// the external assembler and linker are not involved.
pub fn compile_to_asm(source: &str) -> Result<String, String> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize().map_err(|e| e.to_string())?;

    let mut parser = Parser::new(tokens);
    let program = parser.parse().map_err(|e| e.to_string())?;

    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(&program).map_err(|e| e.to_string())?;

    let mut codegen = Codegen::new();
    codegen.generate(&program).map_err(|e| e.to_string())
}

/// Compiles a source string, asserting success.
pub fn compile_ok(source: &str) -> String {
    compile_to_asm(source)
        .unwrap_or_else(|e| panic!("Expected {:?} to compile, got: {}", source, e))
}

/// Attempts to compile a program, returning the stage and message of
/// the first failure.
pub fn compile_error(source: &str) -> Option<(Stage, String)> {
    let mut lexer = Lexer::new(source);
    let tokens = match lexer.tokenize() {
        Ok(t) => t,
        Err(e) => return Some((Stage::Lex, e.to_string())),
    };

    let mut parser = Parser::new(tokens);
    let program = match parser.parse() {
        Ok(p) => p,
        Err(e) => return Some((Stage::Parse, e.to_string())),
    };

    let mut analyzer = SemanticAnalyzer::new();
    if let Err(e) = analyzer.analyze(&program) {
        return Some((Stage::Semantic, e.to_string()));
    }

    let mut codegen = Codegen::new();
    match codegen.generate(&program) {
        Ok(_) => None,
        Err(e) => Some((Stage::Codegen, e.to_string())),
    }
}

/// Asserts that compilation fails at the given stage with a message
/// containing `needle`, and returns the message.
pub fn assert_fails_at(source: &str, stage: Stage, needle: &str) -> String {
    match compile_error(source) {
        Some((actual_stage, message)) => {
            assert_eq!(
                actual_stage, stage,
                "wrong stage for {:?}: {}",
                source, message
            );
            assert!(
                message.contains(needle),
                "message {:?} does not contain {:?}",
                message,
                needle
            );
            message
        }
        None => panic!("Expected {:?} to fail at {:?}", source, stage),
    }
}

/// Returns every label defined in the assembly (lines ending in `:`).
pub fn defined_labels(asm: &str) -> Vec<String> {
    asm.lines()
        .filter(|line| !line.starts_with(' ') && line.ends_with(':'))
        .map(|line| line.trim_end_matches(':').to_string())
        .collect()
}

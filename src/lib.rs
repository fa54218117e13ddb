//! The Zinc programming language compiler library.
//!
//! This library provides the core components of the Zinc compiler:
//! lexical analysis, parsing, semantic analysis, and x86-64 code
//! generation. The pipeline is strictly linear; each stage consumes the
//! previous stage's output and aborts on the first error.
//!
//! # Modules
//!
//! - [`token`] - Token types and source location tracking
//! - [`lexer`] - Lexical analysis (tokenization)
//! - [`parser`] - Recursive descent parser
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`semantic`] - Scoped name resolution and type checking
//! - [`codegen`] - NASM-syntax x86-64 code generation
//!
//! # Example
//!
//! ```
//! use zinc::codegen::Codegen;
//! use zinc::lexer::Lexer;
//! use zinc::parser::Parser;
//! use zinc::semantic::SemanticAnalyzer;
//!
//! let source = r#"fn main() : int { print("Hello\n"); return 0; }"#;
//!
//! // Lexical analysis
//! let mut lexer = Lexer::new(source);
//! let tokens = lexer.tokenize().expect("lex error");
//!
//! // Parsing
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse().expect("parse error");
//!
//! // Semantic analysis
//! let mut analyzer = SemanticAnalyzer::new();
//! analyzer.analyze(&program).expect("semantic error");
//!
//! // Code generation
//! let mut codegen = Codegen::new();
//! let asm = codegen.generate(&program).expect("codegen error");
//! assert!(asm.contains("global _start"));
//! ```

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod token;

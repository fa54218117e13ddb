//! Compilation driver: the full source-to-execution pipeline.
//!
//! The driver reads a `.zinc` source file, runs the four compiler stages
//! in order (lex, parse, analyze, generate), writes `out.asm` to the
//! current directory, assembles it with `nasm -f elf64`, links it with
//! `ld`, runs the resulting `test` executable, and propagates its exit
//! code. The first failure at any step aborts the pipeline.

use std::path::{Path, PathBuf};

use zinc::codegen::{Codegen, CodegenError};
use zinc::lexer::{LexError, Lexer};
use zinc::parser::{ParseError, Parser};
use zinc::semantic::{SemanticAnalyzer, SemanticError};

mod tools;

/// The assembly file written to the working directory.
const ASM_FILE: &str = "out.asm";
/// The object file produced by the assembler.
const OBJECT_FILE: &str = "out.o";
/// The executable produced by the linker.
const EXECUTABLE_FILE: &str = "test";

/// A compilation error from any phase of the pipeline.
///
/// This enum unifies errors from all compiler stages, file handling, and
/// the external assembler/linker to simplify error handling in `main`.
#[derive(Debug)]
pub(crate) enum CompileError {
    /// An error during lexical analysis.
    Lex(LexError),
    /// An error during parsing.
    Parse(ParseError),
    /// An error during semantic analysis.
    Semantic(SemanticError),
    /// An error during code generation.
    Codegen(CodegenError),
    /// The input path does not end in `.zinc`.
    InvalidExtension { path: String },
    /// Failed to read the source file.
    FileReadError {
        path: String,
        source: std::io::Error,
    },
    /// Failed to write the generated assembly.
    AsmWriteError {
        path: String,
        source: std::io::Error,
    },
    /// A path is not valid UTF-8.
    PathNotUtf8 {
        path: PathBuf,
        context: &'static str,
    },
    /// The assembler or linker failed.
    Tool(ToolError),
    /// Failed to start the produced executable.
    ExecutableRunError(std::io::Error),
}

/// An assembler or linker error.
#[derive(Debug)]
pub(crate) enum ToolError {
    /// The tool could not be started at all (usually: not installed).
    ExecutionFailed {
        tool: &'static str,
        source: std::io::Error,
    },
    /// The tool ran and exited non-zero; its output is kept verbatim.
    Failed {
        tool: &'static str,
        exit_code: String,
        stdout: String,
        stderr: String,
    },
}

impl CompileError {
    fn invalid_extension(path: impl Into<String>) -> Self {
        CompileError::InvalidExtension { path: path.into() }
    }

    fn file_read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        CompileError::FileReadError {
            path: path.into(),
            source,
        }
    }

    fn asm_write_error(path: impl Into<String>, source: std::io::Error) -> Self {
        CompileError::AsmWriteError {
            path: path.into(),
            source,
        }
    }

    fn path_not_utf8(path: impl Into<PathBuf>, context: &'static str) -> Self {
        CompileError::PathNotUtf8 {
            path: path.into(),
            context,
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Lex(e) => write!(f, "{}", e),
            CompileError::Parse(e) => write!(f, "{}", e),
            CompileError::Semantic(e) => write!(f, "{}", e),
            CompileError::Codegen(e) => write!(f, "{}", e),
            CompileError::InvalidExtension { path } => {
                write!(f, "Input file '{}' must have a .zinc extension", path)
            }
            CompileError::FileReadError { path, source } => {
                write!(f, "Failed to read file '{}': {}", path, source)
            }
            CompileError::AsmWriteError { path, source } => {
                write!(f, "Failed to write assembly to '{}': {}", path, source)
            }
            CompileError::PathNotUtf8 { path, context } => {
                write!(f, "{} path '{}' is not valid UTF-8", context, path.display())
            }
            CompileError::Tool(e) => write!(f, "{}", e),
            CompileError::ExecutableRunError(source) => {
                write!(f, "Failed to run executable: {}", source)
            }
        }
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolError::ExecutionFailed { tool, source } => {
                write!(f, "Failed to run {}: {}", tool, source)
            }
            ToolError::Failed {
                tool,
                exit_code,
                stdout,
                stderr,
            } => {
                write!(f, "{} failed with exit code {}", tool, exit_code)?;
                if !stdout.is_empty() {
                    write!(f, "\n[stdout]\n{}", stdout)?;
                }
                if !stderr.is_empty() {
                    write!(f, "\n[stderr]\n{}", stderr)?;
                }
                Ok(())
            }
        }
    }
}

/// The source context needed to render a diagnostic.
pub(crate) struct CompileErrorWithContext {
    filename: String,
    source: String,
    error: CompileError,
}

impl CompileErrorWithContext {
    pub(crate) fn filename(&self) -> &str {
        &self.filename
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn error(&self) -> &CompileError {
        &self.error
    }
}

/// Attaches filename and source to an error for reporting.
fn with_context(
    filename: &str,
    source: &str,
    error: CompileError,
) -> Box<CompileErrorWithContext> {
    Box::new(CompileErrorWithContext {
        filename: filename.to_string(),
        source: source.to_string(),
        error,
    })
}

/// Runs the four compiler stages on a source string, producing the
/// assembly text.
fn compile_to_asm(source: &str) -> Result<String, CompileError> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize().map_err(CompileError::Lex)?;

    let mut parser = Parser::new(tokens);
    let program = parser.parse().map_err(CompileError::Parse)?;

    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(&program).map_err(CompileError::Semantic)?;

    let mut codegen = Codegen::new();
    codegen.generate(&program).map_err(CompileError::Codegen)
}

/// Compiles and runs a Zinc source file.
///
/// The full pipeline:
///
/// 1. Validate the `.zinc` extension and read the file
/// 2. lex → parse → analyze → generate
/// 3. Write `out.asm` to the current directory
/// 4. `nasm -f elf64 out.asm -o out.o`
/// 5. `ld out.o -o test`
/// 6. Run `./test`
///
/// # Returns
///
/// * `Ok(exit_code)` - The exit code of the executed program
/// * `Err(CompileErrorWithContext)` - Any step failed
pub(crate) fn run(file: &str) -> Result<i32, Box<CompileErrorWithContext>> {
    if !file.ends_with(".zinc") {
        return Err(with_context(
            file,
            "",
            CompileError::invalid_extension(file),
        ));
    }

    let source = std::fs::read_to_string(file)
        .map_err(|e| with_context(file, "", CompileError::file_read_error(file, e)))?;

    let asm = compile_to_asm(&source).map_err(|e| with_context(file, &source, e))?;

    std::fs::write(ASM_FILE, &asm)
        .map_err(|e| with_context(file, &source, CompileError::asm_write_error(ASM_FILE, e)))?;

    let asm_path = Path::new(ASM_FILE);
    let object_path = Path::new(OBJECT_FILE);
    let executable_path = Path::new(EXECUTABLE_FILE);

    tools::assemble(asm_path, object_path).map_err(|e| with_context(file, &source, e))?;
    tools::link(object_path, executable_path).map_err(|e| with_context(file, &source, e))?;

    // `./test`, not a PATH lookup.
    let executable = PathBuf::from(".").join(EXECUTABLE_FILE);
    tools::run_executable(&executable).map_err(|e| with_context(file, &source, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_extension() {
        let err = CompileError::invalid_extension("program.txt");
        assert_eq!(
            err.to_string(),
            "Input file 'program.txt' must have a .zinc extension"
        );
    }

    #[test]
    fn test_display_file_read_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CompileError::file_read_error("missing.zinc", io_err);
        assert_eq!(
            err.to_string(),
            "Failed to read file 'missing.zinc': file not found"
        );
    }

    #[test]
    fn test_display_asm_write_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = CompileError::asm_write_error("out.asm", io_err);
        assert_eq!(
            err.to_string(),
            "Failed to write assembly to 'out.asm': permission denied"
        );
    }

    #[test]
    fn test_display_tool_execution_failed() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "nasm not found");
        let err = CompileError::Tool(ToolError::ExecutionFailed {
            tool: "nasm",
            source: io_err,
        });
        assert_eq!(err.to_string(), "Failed to run nasm: nasm not found");
    }

    #[test]
    fn test_display_tool_failed_empty_output() {
        let err = ToolError::Failed {
            tool: "ld",
            exit_code: "1".to_string(),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "ld failed with exit code 1");
    }

    #[test]
    fn test_display_tool_failed_with_output() {
        let err = ToolError::Failed {
            tool: "nasm",
            exit_code: "1".to_string(),
            stdout: "some output".to_string(),
            stderr: "some error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "nasm failed with exit code 1\n[stdout]\nsome output\n[stderr]\nsome error"
        );
    }

    #[test]
    fn test_run_reports_stage_error_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.zinc");
        std::fs::write(&path, "fn main() : int { let x = @; return 0; }").unwrap();

        let err = run(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err.error(), CompileError::Lex(_)));
        // The context carries the source for diagnostics rendering.
        assert!(err.source().contains("let x = @"));
        assert_eq!(err.filename(), path.to_str().unwrap());
    }

    #[test]
    fn test_run_rejects_wrong_extension() {
        let err = run("program.txt").unwrap_err();
        assert!(matches!(err.error(), CompileError::InvalidExtension { .. }));
    }

    #[test]
    fn test_run_reports_missing_file() {
        let err = run("definitely_missing_4217.zinc").unwrap_err();
        assert!(matches!(err.error(), CompileError::FileReadError { .. }));
    }

    #[test]
    fn test_compile_to_asm_full_pipeline() {
        let asm = compile_to_asm("fn main() : int { print(\"ok\\n\"); return 0; }").unwrap();
        assert!(asm.contains("global _start"));
        assert!(asm.contains("main:"));
    }

    #[test]
    fn test_compile_to_asm_stage_errors() {
        assert!(matches!(
            compile_to_asm("let x = @;"),
            Err(CompileError::Lex(_))
        ));
        assert!(matches!(
            compile_to_asm("fn f( { }"),
            Err(CompileError::Parse(_))
        ));
        assert!(matches!(
            compile_to_asm("fn f() { let x = y; }"),
            Err(CompileError::Semantic(_))
        ));
        assert!(matches!(
            compile_to_asm("let x : int = 1;"),
            Err(CompileError::Codegen(_))
        ));
    }
}

//! External tool invocation: assembler, linker, and the produced
//! executable.

use std::path::Path;
use std::process::{Command, ExitStatus};

#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;

use super::{CompileError, ToolError};

/// Formats an exit status for display, including signal information on
/// Unix.
fn format_exit_status(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return code.to_string();
    }

    #[cfg(unix)]
    {
        if let Some(signal) = status.signal() {
            return format!("signal {}", signal);
        }
    }

    "unknown".to_string()
}

/// Runs an external tool and propagates its output verbatim on failure.
fn run_tool(tool: &'static str, args: &[&str]) -> Result<(), CompileError> {
    let output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|e| CompileError::Tool(ToolError::ExecutionFailed { tool, source: e }))?;

    if !output.status.success() {
        return Err(CompileError::Tool(ToolError::Failed {
            tool,
            exit_code: format_exit_status(&output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }));
    }

    Ok(())
}

/// Assembles `asm_path` into `object_path` with `nasm -f elf64`.
pub(super) fn assemble(asm_path: &Path, object_path: &Path) -> Result<(), CompileError> {
    let asm = asm_path
        .to_str()
        .ok_or_else(|| CompileError::path_not_utf8(asm_path, "Assembly file"))?;
    let object = object_path
        .to_str()
        .ok_or_else(|| CompileError::path_not_utf8(object_path, "Object file"))?;
    run_tool("nasm", &["-f", "elf64", asm, "-o", object])
}

/// Links `object_path` into `output_path` with `ld`.
pub(super) fn link(object_path: &Path, output_path: &Path) -> Result<(), CompileError> {
    let object = object_path
        .to_str()
        .ok_or_else(|| CompileError::path_not_utf8(object_path, "Object file"))?;
    let output = output_path
        .to_str()
        .ok_or_else(|| CompileError::path_not_utf8(output_path, "Output file"))?;
    run_tool("ld", &[object, "-o", output])
}

/// Returns the exit code from an exit status, handling signals on Unix.
///
/// On Unix, if the process was terminated by a signal, returns 128 +
/// signal number following the shell convention. Otherwise returns the
/// exit code or 1 as a fallback.
fn exit_code_with_signal(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        if let Some(signal) = status.signal() {
            eprintln!("Program terminated by signal {}", signal);
            return 128 + signal;
        }
    }

    eprintln!("Program terminated abnormally");
    1
}

/// Runs the produced executable and returns its exit code.
pub(super) fn run_executable(path: &Path) -> Result<i32, CompileError> {
    let status = Command::new(path)
        .status()
        .map_err(CompileError::ExecutableRunError)?;
    Ok(exit_code_with_signal(&status))
}

//! x86-64 code generation for the Zinc programming language.
//!
//! This module provides the [`Codegen`] struct which lowers a
//! semantically validated Zinc AST to NASM-syntax x86-64 assembly for
//! Linux. Internal calls follow the System V AMD64 calling convention;
//! I/O is performed with raw `syscall` instructions (`read`, `write`,
//! `exit`), so the generated program links without a C runtime.
//!
//! # Output layout
//!
//! ```text
//! section .data
//! str_0: db 72,105,10,0         ; interned string literals, insertion order
//! section .bss
//! num_buf: resb 20              ; integer-to-decimal conversion buffer
//! input_buf: resb 32            ; only when scan is used
//! section .text
//! global _start
//! _start:
//!     call main
//!     mov rax,60
//!     xor rdi,rdi
//!     syscall
//! <function bodies>
//! ```
//!
//! # Lowering model
//!
//! Every expression leaves its result in `rax`. Each function gets a
//! stack-allocated activation record: a pre-scan of the body assigns
//! every parameter and `let` name an 8-byte slot at a negative offset
//! from `rbp`, so the frame size is known before the prologue is
//! emitted. Control-flow labels combine a base name with a single
//! monotonically increasing counter, guaranteeing uniqueness across the
//! whole object file.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for code generation
//! - `strings` - String interning and the data-section pre-pass
//! - `stmt` - Statement and function lowering
//! - `expr` - Expression lowering
//! - `builtins` - Inline syscall lowering for `print` and `scan`
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::ast`] - The AST types consumed by this module
//! * [`crate::semantic`] - Must succeed before code generation

mod builtins;
mod error;
mod expr;
mod stmt;
mod strings;

#[cfg(test)]
mod tests;

pub use error::CodegenError;

use std::collections::HashMap;

use crate::ast::{Program, StmtKind};
use strings::{StringTable, resolve_escapes};

/// The six integer argument registers of the System V AMD64 ABI, in
/// order.
const ARG_REGISTERS: [&str; 6] = ["rdi", "rsi", "rdx", "rcx", "r8", "r9"];

/// x86-64 assembly generator for Zinc programs.
///
/// `Codegen` accumulates the output text while tracking the string
/// table, the per-function stack frame layout, and the label counter.
/// Use [`Codegen::new`] followed by [`generate`](Self::generate).
pub struct Codegen {
    /// The assembly text accumulated so far.
    out: String,
    /// Interned string literals, in insertion order.
    strings: StringTable,
    /// Whether the program calls `scan` (reserves `input_buf` in `.bss`).
    uses_scan: bool,
    /// Monotonic counter shared by all generated labels.
    label_counter: usize,
    /// Stack slot offsets of the current function's locals, keyed by
    /// name. Reset per function; filled by the frame pre-scan.
    locals: HashMap<String, i64>,
    /// Total bytes allocated in the current frame so far.
    stack_offset: i64,
}

impl Codegen {
    /// Creates a new code generator with empty state.
    pub fn new() -> Self {
        Codegen {
            out: String::new(),
            strings: StringTable::default(),
            uses_scan: false,
            label_counter: 0,
            locals: HashMap::new(),
            stack_offset: 0,
        }
    }

    /// Lowers a program to NASM-syntax x86-64 assembly.
    ///
    /// The generator first walks the whole tree registering string
    /// literals and `scan` usage, then emits the data, bss and text
    /// sections, the `_start` prelude, and finally every top-level
    /// statement in source order.
    ///
    /// # Errors
    ///
    /// Returns a [`CodegenError`] for constructs the back end does not
    /// support: nested function declarations, functions with more than
    /// six parameters, and names without an allocated stack slot (which
    /// includes `let` bindings outside any function frame).
    pub fn generate(&mut self, program: &Program) -> Result<String, CodegenError> {
        for stmt in &program.stmts {
            self.collect_stmt(stmt);
        }

        self.write_data_section();
        self.write_start_prelude();

        for stmt in &program.stmts {
            match &stmt.kind {
                StmtKind::Function(func) => self.gen_function(func)?,
                _ => self.gen_stmt(stmt)?,
            }
        }

        Ok(std::mem::take(&mut self.out))
    }

    /// Writes the `.data` section (interned strings with escapes
    /// resolved) and the `.bss` section (conversion and input buffers).
    fn write_data_section(&mut self) {
        self.out.push_str("section .data\n");
        let mut data = String::new();
        for (content, label) in self.strings.iter() {
            data.push_str(label);
            data.push_str(": db ");
            for byte in resolve_escapes(content) {
                data.push_str(&byte.to_string());
                data.push(',');
            }
            data.push_str("0\n");
        }
        self.out.push_str(&data);

        self.out.push_str("section .bss\n");
        self.out.push_str("num_buf: resb 20\n");
        if self.uses_scan {
            self.out.push_str("input_buf: resb 32\n");
        }
    }

    /// Writes the text section header and the `_start` routine, which
    /// calls `main` and exits with syscall 60.
    fn write_start_prelude(&mut self) {
        self.out.push_str("section .text\n");
        self.out.push_str("global _start\n");
        self.emit_label("_start");
        self.emit("call main");
        self.emit("mov rax,60");
        self.emit("xor rdi,rdi");
        self.emit("syscall");
    }

    // ---- emission helpers ----

    /// Appends one indented instruction line.
    pub(super) fn emit(&mut self, instruction: &str) {
        self.out.push_str("    ");
        self.out.push_str(instruction);
        self.out.push('\n');
    }

    /// Appends a label definition line.
    pub(super) fn emit_label(&mut self, label: &str) {
        self.out.push_str(label);
        self.out.push_str(":\n");
    }

    /// Returns a fresh unique label with the given base name.
    ///
    /// The counter is shared across all bases, so no two generated
    /// labels ever collide.
    pub(super) fn fresh_label(&mut self, base: &str) -> String {
        let label = format!("{}_{}", base, self.label_counter);
        self.label_counter += 1;
        label
    }

    // ---- frame layout helpers ----

    /// Resets the per-function frame state.
    pub(super) fn reset_frame(&mut self) {
        self.locals.clear();
        self.stack_offset = 0;
    }

    /// Allocates the next 8-byte stack slot for a name and returns its
    /// offset from `rbp`.
    ///
    /// Allocating the same name twice (sibling blocks both declaring
    /// `x`) keeps both slots but points the name at the newer one.
    pub(super) fn allocate_local(&mut self, name: &str) -> i64 {
        self.stack_offset += 8;
        self.locals.insert(name.to_string(), self.stack_offset);
        self.stack_offset
    }

    /// Returns the stack slot offset of a name, if one was allocated.
    pub(super) fn lookup_local(&self, name: &str) -> Option<i64> {
        self.locals.get(name).copied()
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

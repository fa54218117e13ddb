//! Call lowering, including the inline-syscall built-ins.
//!
//! `print` and `scan` never become `call` instructions: their bodies are
//! emitted inline at every call site, performing Linux `write`/`read`
//! syscalls directly. Every other call follows the System V AMD64
//! convention with the first six integer arguments in registers.

use super::{ARG_REGISTERS, Codegen};
use super::error::CodegenError;
use super::strings::resolve_escapes;
use crate::ast::{Expr, ExprKind};

impl Codegen {
    /// Lowers a call expression.
    pub(super) fn gen_call(&mut self, callee: &Expr, args: &[Expr]) -> Result<(), CodegenError> {
        let ExprKind::Identifier(name) = &callee.kind else {
            return Err(CodegenError::call_target_not_identifier(callee.span));
        };

        match name.as_str() {
            "print" => self.gen_print(args),
            "scan" => {
                self.gen_scan();
                Ok(())
            }
            _ => {
                if args.len() > ARG_REGISTERS.len() {
                    return Err(CodegenError::too_many_arguments(name, callee.span));
                }
                for (index, arg) in args.iter().enumerate() {
                    self.gen_expr(arg)?;
                    self.emit(&format!("mov {},rax", ARG_REGISTERS[index]));
                }
                self.emit(&format!("call {}", name));
                Ok(())
            }
        }
    }

    /// Lowers a `print` call.
    ///
    /// `print` is variadic by position. A string literal argument is
    /// written directly from its data-section label with its resolved
    /// byte length. Any other argument is evaluated to an integer and
    /// converted to ASCII decimal into `num_buf` (right to left,
    /// dividing by 10) before being written. The total number of bytes
    /// written accumulates in `r12` and becomes the call's result.
    fn gen_print(&mut self, args: &[Expr]) -> Result<(), CodegenError> {
        self.emit("push r12");
        self.emit("xor r12, r12");

        for arg in args {
            if let ExprKind::StringLiteral(value) = &arg.kind {
                let label = self.strings.label_of(value).to_string();
                let length = resolve_escapes(value).len();
                self.emit("mov rax, 1");
                self.emit("mov rdi, 1");
                self.emit(&format!("lea rsi, [rel {}]", label));
                self.emit(&format!("mov rdx, {}", length));
                self.emit("syscall");
                self.emit("add r12, rdx");
            } else {
                self.gen_expr(arg)?;
                self.gen_print_integer();
            }
        }

        self.emit("mov rax, r12");
        self.emit("pop r12");
        Ok(())
    }

    /// Emits the integer-to-decimal conversion and write for one `print`
    /// argument whose value is in `rax`.
    ///
    /// Digits are produced right-to-left into the tail of `num_buf`;
    /// `r8` remembers the end of the buffer so the byte count can be
    /// computed after the loop. Zero is special-cased.
    fn gen_print_integer(&mut self) {
        let label = self.fresh_label("conv");

        self.emit("mov rbx, rax");
        self.emit("lea rdi, [rel num_buf+19]");

        self.emit("cmp rbx, 0");
        self.emit(&format!("jne {}_start", label));
        self.emit("dec rdi");
        self.emit("mov byte [rdi], '0'");
        self.emit("mov r8, rdi");
        self.emit(&format!("jmp {}_done", label));

        self.emit_label(&format!("{}_start", label));
        self.emit("mov r8, rdi");
        self.emit_label(&format!("{}_loop", label));
        self.emit("xor rdx, rdx");
        self.emit("mov rax, rbx");
        self.emit("mov rcx, 10");
        self.emit("div rcx");
        self.emit("add dl, '0'");
        self.emit("dec rdi");
        self.emit("mov [rdi], dl");
        self.emit("mov rbx, rax");
        self.emit("test rax, rax");
        self.emit(&format!("jnz {}_loop", label));

        self.emit_label(&format!("{}_done", label));
        self.emit("mov rsi, rdi");
        self.emit("mov rdx, r8");
        self.emit("sub rdx, rdi");
        self.emit("mov rax, 1");
        self.emit("mov rdi, 1");
        self.emit("syscall");
        self.emit("add r12, rdx");
    }

    /// Lowers a `scan` call.
    ///
    /// Reads up to 32 bytes from stdin into `input_buf`, then parses the
    /// buffer as ASCII decimal, skipping non-digit bytes. The value
    /// accumulates in `rcx` and is moved to `rax` at the end.
    fn gen_scan(&mut self) {
        let loop_label = self.fresh_label("scan_loop");
        let skip_label = self.fresh_label("scan_skip");
        let done_label = self.fresh_label("scan_done");

        self.emit("mov rax, 0");
        self.emit("mov rdi, 0");
        self.emit("lea rsi, [rel input_buf]");
        self.emit("mov rdx, 32");
        self.emit("syscall");

        self.emit("mov rcx, 0");
        self.emit("mov rsi, input_buf");
        self.emit("mov rdx, rax");

        self.emit_label(&loop_label);
        self.emit("cmp rdx, 0");
        self.emit(&format!("je {}", done_label));
        self.emit("mov al, byte [rsi]");
        self.emit("cmp al, '0'");
        self.emit(&format!("jl {}", skip_label));
        self.emit("cmp al, '9'");
        self.emit(&format!("jg {}", skip_label));
        self.emit("sub al, '0'");
        self.emit("imul rcx, rcx, 10");
        self.emit("add rcx, rax");
        self.emit_label(&skip_label);
        self.emit("inc rsi");
        self.emit("dec rdx");
        self.emit(&format!("jmp {}", loop_label));
        self.emit_label(&done_label);
        self.emit("mov rax, rcx");
    }
}

//! Statement and function lowering.

use super::{ARG_REGISTERS, Codegen};
use super::error::CodegenError;
use crate::ast::{FnDecl, Stmt, StmtKind};

impl Codegen {
    /// Lowers a function declaration.
    ///
    /// The frame is laid out before any code is emitted:
    ///
    /// 1. Parameters are allocated first, in declaration order, at
    ///    offsets 8, 16, 24, ...
    /// 2. A pre-scan of the body allocates a slot for every `let` name,
    ///    descending through blocks, both if branches and while bodies
    ///    but not into nested function declarations.
    ///
    /// The prologue then reserves the whole frame at once, parameter
    /// registers are spilled into their slots, the body is lowered, and
    /// a final `leave; ret` closes the function (a `return` statement
    /// emits the same epilogue early).
    pub(super) fn gen_function(&mut self, func: &FnDecl) -> Result<(), CodegenError> {
        if func.params.len() > ARG_REGISTERS.len() {
            return Err(CodegenError::too_many_parameters(&func.name, func.span));
        }

        self.reset_frame();

        for param in &func.params {
            self.allocate_local(&param.name);
        }
        for stmt in &func.body {
            self.prescan_stmt(stmt);
        }

        self.emit_label(&func.name);
        self.emit("push rbp");
        self.emit("mov rbp,rsp");
        self.emit(&format!("sub rsp,{}", self.stack_offset));

        for (index, param) in func.params.iter().enumerate() {
            let offset = self
                .lookup_local(&param.name)
                .ok_or_else(|| CodegenError::unallocated_local(&param.name, param.span))?;
            self.emit(&format!("mov [rbp-{}],{}", offset, ARG_REGISTERS[index]));
        }

        for stmt in &func.body {
            self.gen_stmt(stmt)?;
        }

        self.emit("leave");
        self.emit("ret");
        Ok(())
    }

    /// Allocates stack slots for every `let` name reachable in a
    /// statement tree without descending into nested functions.
    fn prescan_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Let { name, .. } => {
                self.allocate_local(name);
            }
            StmtKind::Block(stmts) => {
                for stmt in stmts {
                    self.prescan_stmt(stmt);
                }
            }
            StmtKind::If {
                then_block,
                else_block,
                ..
            } => {
                for stmt in then_block {
                    self.prescan_stmt(stmt);
                }
                if let Some(else_block) = else_block {
                    for stmt in else_block {
                        self.prescan_stmt(stmt);
                    }
                }
            }
            StmtKind::While { body, .. } => {
                for stmt in body {
                    self.prescan_stmt(stmt);
                }
            }
            // A nested function's locals belong to its own frame.
            StmtKind::Function(_) => {}
            StmtKind::Expr(_) | StmtKind::Return(_) => {}
        }
    }

    /// Lowers a single statement.
    pub(super) fn gen_stmt(&mut self, stmt: &Stmt) -> Result<(), CodegenError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.gen_expr(expr),
            StmtKind::Let { name, init, .. } => {
                let Some(init) = init else {
                    return Ok(());
                };
                self.gen_expr(init)?;
                let offset = self
                    .lookup_local(name)
                    .ok_or_else(|| CodegenError::unallocated_local(name, stmt.span))?;
                self.emit(&format!("mov [rbp-{}],rax", offset));
                Ok(())
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.gen_expr(value)?;
                }
                self.emit("leave");
                self.emit("ret");
                Ok(())
            }
            StmtKind::Block(stmts) => {
                for stmt in stmts {
                    self.gen_stmt(stmt)?;
                }
                Ok(())
            }
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                let else_label = self.fresh_label("else");
                let end_label = self.fresh_label("ifend");

                self.gen_expr(condition)?;
                self.emit("cmp rax, 0");
                self.emit(&format!("je {}", else_label));

                for stmt in then_block {
                    self.gen_stmt(stmt)?;
                }
                self.emit(&format!("jmp {}", end_label));

                self.emit_label(&else_label);
                if let Some(else_block) = else_block {
                    for stmt in else_block {
                        self.gen_stmt(stmt)?;
                    }
                }
                self.emit_label(&end_label);
                Ok(())
            }
            StmtKind::While { condition, body } => {
                let start_label = self.fresh_label("while_start");
                let end_label = self.fresh_label("while_end");

                self.emit_label(&start_label);
                self.gen_expr(condition)?;
                self.emit("cmp rax, 0");
                self.emit(&format!("je {}", end_label));

                for stmt in body {
                    self.gen_stmt(stmt)?;
                }
                self.emit(&format!("jmp {}", start_label));
                self.emit_label(&end_label);
                Ok(())
            }
            StmtKind::Function(func) => {
                Err(CodegenError::nested_function(&func.name, func.span))
            }
        }
    }
}

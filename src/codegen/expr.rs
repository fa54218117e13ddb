//! Expression lowering.
//!
//! Every expression leaves its result in `rax`. Binary operations use a
//! push/pop discipline: the left operand is evaluated and pushed, the
//! right operand is evaluated, then `rbx` takes the right value and
//! `rax` the left one before the operator-specific sequence runs.

use super::Codegen;
use super::error::CodegenError;
use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};

impl Codegen {
    /// Lowers an expression; the result ends up in `rax`.
    pub(super) fn gen_expr(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        match &expr.kind {
            ExprKind::Number(digits) => {
                self.emit(&format!("mov rax,{}", digits));
                Ok(())
            }
            ExprKind::Bool(value) => {
                if *value {
                    self.emit("mov rax,1");
                } else {
                    self.emit("xor rax,rax");
                }
                Ok(())
            }
            ExprKind::StringLiteral(_) => {
                // Bare string values have no runtime representation
                // outside print; nothing to load.
                Ok(())
            }
            ExprKind::Identifier(name) => {
                let offset = self
                    .lookup_local(name)
                    .ok_or_else(|| CodegenError::unallocated_local(name, expr.span))?;
                self.emit(&format!("mov rax,[rbp-{}]", offset));
                Ok(())
            }
            ExprKind::Unary { op, operand } => {
                self.gen_expr(operand)?;
                match op {
                    UnaryOp::Neg => self.emit("neg rax"),
                    UnaryOp::Not => {
                        self.emit("cmp rax, 0");
                        self.emit("sete al");
                        self.emit("movzx rax,al");
                    }
                }
                Ok(())
            }
            ExprKind::Binary { op, left, right } => self.gen_binary(*op, left, right),
            ExprKind::If {
                condition,
                then_expr,
                else_expr,
            } => {
                let else_label = self.fresh_label("else");
                let end_label = self.fresh_label("ifend");

                self.gen_expr(condition)?;
                self.emit("cmp rax, 0");
                self.emit(&format!("je {}", else_label));

                self.gen_expr(then_expr)?;
                self.emit(&format!("jmp {}", end_label));

                self.emit_label(&else_label);
                self.gen_expr(else_expr)?;
                self.emit_label(&end_label);
                Ok(())
            }
            ExprKind::Call { callee, args } => self.gen_call(callee, args),
        }
    }

    /// Lowers a binary expression.
    ///
    /// Both operands are evaluated first (left, then right), ending with
    /// the left value in `rax` and the right value in `rbx`. Assignment
    /// shares this prelude, which is why the stored value is `rbx`.
    fn gen_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<(), CodegenError> {
        self.gen_expr(left)?;
        self.emit("push rax");
        self.gen_expr(right)?;
        self.emit("mov rbx,rax");
        self.emit("pop rax");

        match op {
            BinaryOp::Add => self.emit("add rax,rbx"),
            BinaryOp::Sub => self.emit("sub rax,rbx"),
            BinaryOp::Mul => self.emit("imul rax,rbx"),
            BinaryOp::Div => {
                self.emit("cqo");
                self.emit("idiv rbx");
            }
            BinaryOp::Rem => {
                self.emit("cqo");
                self.emit("idiv rbx");
                self.emit("mov rax,rdx");
            }
            BinaryOp::Assign => {
                // The right-hand value sits in rbx after the shared
                // prelude; store it and make it the expression result.
                let ExprKind::Identifier(name) = &left.kind else {
                    return Err(CodegenError::invalid_assignment_target(left.span));
                };
                let offset = self
                    .lookup_local(name)
                    .ok_or_else(|| CodegenError::unallocated_local(name, left.span))?;
                self.emit(&format!("mov [rbp-{}],rbx", offset));
                self.emit("mov rax,rbx");
            }
            BinaryOp::Equal => self.emit_comparison("sete"),
            BinaryOp::NotEqual => self.emit_comparison("setne"),
            BinaryOp::Less => self.emit_comparison("setl"),
            BinaryOp::LessEqual => self.emit_comparison("setle"),
            BinaryOp::Greater => self.emit_comparison("setg"),
            BinaryOp::GreaterEqual => self.emit_comparison("setge"),
            BinaryOp::And => {
                let false_label = self.fresh_label("and_false");
                let end_label = self.fresh_label("and_end");
                self.emit("cmp rax,0");
                self.emit(&format!("je {}", false_label));
                self.emit("cmp rbx,0");
                self.emit(&format!("je {}", false_label));
                self.emit("mov rax,1");
                self.emit(&format!("jmp {}", end_label));
                self.emit_label(&false_label);
                self.emit("xor rax,rax");
                self.emit_label(&end_label);
            }
            BinaryOp::Or => {
                let true_label = self.fresh_label("or_true");
                let end_label = self.fresh_label("or_end");
                self.emit("cmp rax,0");
                self.emit(&format!("jne {}", true_label));
                self.emit("cmp rbx,0");
                self.emit(&format!("jne {}", true_label));
                self.emit("xor rax,rax");
                self.emit(&format!("jmp {}", end_label));
                self.emit_label(&true_label);
                self.emit("mov rax,1");
                self.emit_label(&end_label);
            }
            BinaryOp::BitAnd => self.emit("and rax,rbx"),
            BinaryOp::BitOr => self.emit("or rax,rbx"),
            BinaryOp::BitXor => self.emit("xor rax,rbx"),
            BinaryOp::ShiftLeft => {
                self.emit("mov cl, bl");
                self.emit("shl rax, cl");
            }
            BinaryOp::ShiftRight => {
                self.emit("mov cl, bl");
                self.emit("shr rax, cl");
            }
        }
        Ok(())
    }

    /// Emits the compare-and-set sequence shared by all comparison
    /// operators: the 0/1 result is normalized into `rax`.
    fn emit_comparison(&mut self, set_instruction: &str) {
        self.emit("cmp rax,rbx");
        self.emit(&format!("{} al", set_instruction));
        self.emit("movzx rax,al");
    }
}

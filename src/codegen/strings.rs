//! String literal interning and the data-section pre-pass.
//!
//! Before any code is emitted, the generator walks the entire program
//! and registers every distinct string literal, assigning each a unique
//! `str_N` label. The same walk records whether `scan` is called so the
//! `.bss` section can reserve its input buffer. Interning keeps insertion
//! order, which makes the emitted data section byte-reproducible across
//! runs.

use std::collections::HashMap;

use super::Codegen;
use crate::ast::{Expr, ExprKind, Stmt, StmtKind};

/// An insertion-ordered map from string content to its `str_N` label.
#[derive(Debug, Default)]
pub(super) struct StringTable {
    labels: HashMap<String, String>,
    order: Vec<String>,
}

impl StringTable {
    /// Returns the label for a string, interning it on first sight.
    pub(super) fn intern(&mut self, content: &str) -> String {
        if let Some(label) = self.labels.get(content) {
            return label.clone();
        }
        let label = format!("str_{}", self.order.len());
        self.labels.insert(content.to_string(), label.clone());
        self.order.push(content.to_string());
        label
    }

    /// Returns the label for an already interned string.
    ///
    /// # Panics
    ///
    /// Panics if the string was never interned; the pre-pass walks the
    /// whole tree, so every literal reaching emission has a label.
    pub(super) fn label_of(&self, content: &str) -> &str {
        &self.labels[content]
    }

    /// Iterates over `(content, label)` pairs in insertion order.
    pub(super) fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(|content| (content.as_str(), self.labels[content].as_str()))
    }
}

/// Resolves the escape sequences of a raw string payload into the bytes
/// emitted to the data section.
///
/// `\n`, `\t` and `\\` become single bytes; any other backslash sequence
/// is kept as the literal backslash followed by the character. A trailing
/// lone backslash is kept as-is.
pub(super) fn resolve_escapes(raw: &str) -> Vec<u8> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() {
            match bytes[i + 1] {
                b'n' => {
                    out.push(b'\n');
                    i += 2;
                }
                b't' => {
                    out.push(b'\t');
                    i += 2;
                }
                b'\\' => {
                    out.push(b'\\');
                    i += 2;
                }
                _ => {
                    out.push(bytes[i]);
                    i += 1;
                }
            }
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

impl Codegen {
    /// Walks a statement tree registering string literals and `scan`
    /// usage.
    pub(super) fn collect_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.collect_expr(expr),
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.collect_expr(value);
                }
            }
            StmtKind::Let { init, .. } => {
                if let Some(init) = init {
                    self.collect_expr(init);
                }
            }
            StmtKind::Block(stmts) => {
                for stmt in stmts {
                    self.collect_stmt(stmt);
                }
            }
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                self.collect_expr(condition);
                for stmt in then_block {
                    self.collect_stmt(stmt);
                }
                if let Some(else_block) = else_block {
                    for stmt in else_block {
                        self.collect_stmt(stmt);
                    }
                }
            }
            StmtKind::While { condition, body } => {
                self.collect_expr(condition);
                for stmt in body {
                    self.collect_stmt(stmt);
                }
            }
            StmtKind::Function(func) => {
                for stmt in &func.body {
                    self.collect_stmt(stmt);
                }
            }
        }
    }

    /// Walks an expression tree registering string literals and `scan`
    /// usage.
    pub(super) fn collect_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::StringLiteral(value) => {
                self.strings.intern(value);
            }
            ExprKind::Identifier(_) | ExprKind::Number(_) | ExprKind::Bool(_) => {}
            ExprKind::Unary { operand, .. } => self.collect_expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.collect_expr(left);
                self.collect_expr(right);
            }
            ExprKind::Call { callee, args } => {
                if let ExprKind::Identifier(name) = &callee.kind
                    && name == "scan"
                {
                    self.uses_scan = true;
                }
                for arg in args {
                    self.collect_expr(arg);
                }
            }
            ExprKind::If {
                condition,
                then_expr,
                else_expr,
            } => {
                self.collect_expr(condition);
                self.collect_expr(then_expr);
                self.collect_expr(else_expr);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_insertion_ordered() {
        let mut table = StringTable::default();
        assert_eq!(table.intern("b"), "str_0");
        assert_eq!(table.intern("a"), "str_1");
        assert_eq!(table.intern("c"), "str_2");
        let order: Vec<_> = table.iter().collect();
        assert_eq!(order, vec![("b", "str_0"), ("a", "str_1"), ("c", "str_2")]);
    }

    #[test]
    fn test_intern_deduplicates() {
        let mut table = StringTable::default();
        assert_eq!(table.intern("x"), "str_0");
        assert_eq!(table.intern("x"), "str_0");
        assert_eq!(table.iter().count(), 1);
    }

    #[test]
    fn test_resolve_escapes_known() {
        assert_eq!(resolve_escapes("Hello\\n"), b"Hello\n");
        assert_eq!(resolve_escapes("a\\tb"), b"a\tb");
        assert_eq!(resolve_escapes("c\\\\d"), b"c\\d");
    }

    #[test]
    fn test_resolve_escapes_unknown_kept_verbatim() {
        // \r is not resolved: it stays as backslash + 'r'.
        assert_eq!(resolve_escapes("a\\rb"), b"a\\rb");
        assert_eq!(resolve_escapes("q\\0"), b"q\\0");
    }

    #[test]
    fn test_resolve_escapes_trailing_backslash() {
        assert_eq!(resolve_escapes("end\\"), b"end\\");
    }

    #[test]
    fn test_resolve_escapes_plain_text() {
        assert_eq!(resolve_escapes("plain"), b"plain");
        assert_eq!(resolve_escapes(""), b"");
    }
}

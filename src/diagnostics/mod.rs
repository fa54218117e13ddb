//! Rich error reports rendered with ariadne.
//!
//! Stage errors (lex, parse, semantic, codegen) carry byte spans into
//! the source and are rendered as labeled reports. File and tooling
//! errors have no source location and fall back to plain stderr lines.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use zinc::token::Span;

use crate::driver::CompileError;

/// Prints one labeled report over a byte range of the source.
fn print_range_report(
    filename: &str,
    source: &str,
    span_range: Range<usize>,
    short_message: &str,
    label_message: &str,
) -> std::io::Result<()> {
    Report::build(ReportKind::Error, (filename, span_range.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(short_message)
        .with_label(
            Label::new((filename, span_range))
                .with_message(label_message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)))
}

/// Prints a spanned stage error, falling back to plain stderr output if
/// the report itself cannot be rendered.
fn report_spanned(filename: &str, source: &str, span: Span, short_message: &str, message: &str) {
    if let Err(report_err) =
        print_range_report(filename, source, span.start..span.end, short_message, message)
    {
        eprintln!("Error: {} (at {}:{})", message, span.line, span.column);
        eprintln!("(Failed to display detailed error report: {})", report_err);
    }
}

/// Reports a compile error to stderr.
pub(crate) fn report_error(filename: &str, source: &str, error: &CompileError) {
    match error {
        CompileError::Lex(e) => {
            report_spanned(filename, source, e.span, "Lex error", &e.message);
        }
        CompileError::Parse(e) => {
            report_spanned(filename, source, e.span, "Parse error", &e.message);
        }
        CompileError::Semantic(e) => {
            report_spanned(filename, source, e.span(), "Semantic error", e.message());
        }
        CompileError::Codegen(e) => {
            if let Some(span) = e.span {
                report_spanned(filename, source, span, "Codegen error", &e.message);
            } else {
                eprintln!("Error in {}: {}", filename, e.message);
            }
        }
        CompileError::InvalidExtension { .. }
        | CompileError::FileReadError { .. }
        | CompileError::AsmWriteError { .. }
        | CompileError::PathNotUtf8 { .. }
        | CompileError::Tool(_)
        | CompileError::ExecutableRunError(_) => {
            eprintln!("Error: {}", error);
        }
    }
}

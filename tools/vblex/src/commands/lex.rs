//! `vblex lex`: print every styled span.

use std::fmt::Write;

use vb_lexer::{Document, LexAccessor, Style};

use super::{lex_document, LexOptions};

pub fn lex_file(options: &LexOptions) {
    let doc = lex_document(options);
    tracing::debug!(path = %options.path, bytes = doc.len(), "styled");
    print!("{}", format_spans(&doc));
}

/// One `line:col-col style "text"` row per span; `Default` runs are skipped.
///
/// Lines and columns are 1-based; the end column is inclusive. A span that
/// crosses a line break is reported at its first byte.
pub(super) fn format_spans(doc: &Document) -> String {
    let mut out = String::new();
    for span in doc.spans() {
        if span.style == Style::Default {
            continue;
        }
        let line = doc.line_of(span.range.start);
        let line_start = doc.line_start(line);
        let text = String::from_utf8_lossy(&doc.text()[span.range.clone()]);
        let _ = writeln!(
            out,
            "{}:{}-{} {} {:?}",
            line + 1,
            span.range.start - line_start + 1,
            span.range.end - line_start,
            span.style,
            text
        );
    }
    out
}

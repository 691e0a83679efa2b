//! `vblex fold`: print the fold level of every line.

use std::fmt::Write;

use vb_lexer::{Document, LexAccessor};
use vb_lexer_core::{FoldLevel, LineState};

use super::{lex_document, LexOptions};

pub fn fold_file(options: &LexOptions) {
    let doc = lex_document(options);
    tracing::debug!(path = %options.path, lines = doc.line_count(), "folded");
    print!("{}", format_folds(&doc));
}

/// One row per line: number, depth at start and end, a `+` on fold headers,
/// the line type and the line text.
pub(super) fn format_folds(doc: &Document) -> String {
    let mut out = String::new();
    for (line, level) in doc.fold_levels().into_iter().enumerate() {
        let range = doc.line_range(line);
        if range.is_empty() && line + 1 == doc.line_count() {
            break;
        }
        let text = String::from_utf8_lossy(&doc.text()[range]);
        let line_type = format!("{:?}", LineState::decode(doc.line_state(line)).line_type);
        let _ = writeln!(
            out,
            "{:>4} {:>2}..{:<2} {} {:<8} {}",
            line + 1,
            level.depth(),
            level.end - FoldLevel::BASE,
            if level.is_header() { '+' } else { ' ' },
            line_type,
            text.trim_end()
        );
    }
    out
}

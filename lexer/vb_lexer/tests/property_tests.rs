//! Property-based tests for the tokenizer and folder.
//!
//! 1. Robustness: arbitrary bytes are styled and folded without panicking,
//!    and every byte receives a style.
//! 2. Idempotence: styling a document twice gives the same result.
//! 3. Fold floor: lines outside comment/dim/const groups never end below the
//!    base level, however unbalanced the block keywords are.

#![allow(
    clippy::disallowed_types,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use vb_lexer::{Dialect, Document, LexAccessor, VbLexer};
use vb_lexer_core::{FoldLevel, LineState};

const LINES: &[&str] = &[
    "Sub Main()",
    "End Sub",
    "End",
    "End If",
    "If x Then",
    "If x Then y",
    "Next",
    "Loop",
    "For i = 1 To 2",
    "}",
    "Dim p = New Point With {",
    "#End Region",
    "#Region \"r\"",
    "' note",
    "Dim a",
    "Const b = 1",
    "Private Type T",
    "End Type",
    "Property P() As Integer",
    "Get",
    "End Property",
    "Interface I",
    "End Interface",
    "Begin VB.Form F",
    "s = $\"{x:N2}\"",
    "",
];

fn dialect() -> impl Strategy<Value = Dialect> {
    prop_oneof![
        Just(Dialect::VbNet),
        Just(Dialect::Vba),
        Just(Dialect::VbScript)
    ]
}

fn program() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(LINES), 0..24)
        .prop_map(|lines| lines.join("\n"))
}

fn lex(text: &[u8], dialect: Dialect) -> Document {
    let lexer = VbLexer::new(dialect);
    let mut doc = Document::new(text);
    lexer.colourise_all(&mut doc);
    lexer.fold_all(&mut doc);
    doc
}

proptest! {
    #[test]
    fn arbitrary_bytes_are_handled(
        text in proptest::collection::vec(any::<u8>(), 0..256),
        dialect in dialect(),
    ) {
        let doc = lex(&text, dialect);
        prop_assert_eq!(doc.styles().len(), text.len());
        prop_assert_eq!(doc.fold_levels().len(), doc.line_count());
    }

    #[test]
    fn restyling_is_idempotent(source in program(), dialect in dialect()) {
        let lexer = VbLexer::new(dialect);
        let mut doc = lex(source.as_bytes(), dialect);
        let styles = doc.styles().to_vec();
        let states = doc.line_states().to_vec();
        let levels = doc.fold_levels();

        lexer.colourise_all(&mut doc);
        lexer.fold_all(&mut doc);
        prop_assert_eq!(doc.styles(), styles.as_slice());
        prop_assert_eq!(doc.line_states(), states.as_slice());
        prop_assert_eq!(doc.fold_levels(), levels);
    }

    #[test]
    fn ungrouped_lines_end_at_or_above_base(source in program(), dialect in dialect()) {
        let doc = lex(source.as_bytes(), dialect);
        for (line, level) in doc.fold_levels().into_iter().enumerate() {
            let state = LineState::decode(doc.line_state(line));
            if state.line_type.fold_group() == 0 {
                prop_assert!(
                    level.end >= FoldLevel::BASE,
                    "line {} ends at {:?}",
                    line,
                    level
                );
            }
        }
    }
}

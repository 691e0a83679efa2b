use pretty_assertions::assert_eq;
use vb_lexer_core::Document;

use super::*;

/// Helper: tokenize a whole source with the default keyword lists.
fn lex(source: &str, dialect: Dialect) -> Document {
    let mut doc = Document::new(source);
    let len = doc.len();
    tokenize(
        &mut doc,
        0,
        len,
        Style::Default,
        &KeywordLists::vb_defaults(),
        dialect,
    );
    doc
}

/// Helper: non-blank spans as `(text, style)` pairs.
fn spans(source: &str, dialect: Dialect) -> Vec<(String, Style)> {
    let doc = lex(source, dialect);
    doc.spans()
        .into_iter()
        .map(|span| {
            let text = String::from_utf8_lossy(&doc.text()[span.range]).into_owned();
            (text, span.style)
        })
        .filter(|(text, _)| !text.trim().is_empty())
        .collect()
}

/// Helper: style of the first byte of the first occurrence of `needle`.
fn style_of(doc: &Document, needle: &str) -> Style {
    let pos = doc
        .text()
        .windows(needle.len())
        .position(|w| w == needle.as_bytes())
        .unwrap_or_else(|| panic!("{needle:?} not found"));
    doc.style_at(pos)
}

fn owned(pairs: &[(&str, Style)]) -> Vec<(String, Style)> {
    pairs
        .iter()
        .map(|&(text, style)| (text.to_string(), style))
        .collect()
}

// === Identifiers & keywords ===

#[test]
fn declaration_keywords_and_types() {
    assert_eq!(
        spans("Dim x As Integer\n", Dialect::VbNet),
        owned(&[
            ("Dim", Style::Keyword),
            ("x", Style::Identifier),
            ("As", Style::Keyword),
            ("Integer", Style::Keyword2),
        ])
    );
}

#[test]
fn member_access_demotes_keyword() {
    let doc = lex("x.End\nEnd\n", Dialect::VbNet);
    assert_eq!(doc.style_at(2), Style::Keyword3);
    assert_eq!(style_of(&doc, "\nEnd"), Style::Default);
    assert_eq!(doc.style_at(6), Style::Keyword);
}

#[test]
fn keywords_inside_parens_are_secondary() {
    let doc = lex("Call Foo(New Bar)\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, "Call"), Style::Keyword);
    assert_eq!(style_of(&doc, "New"), Style::Keyword3);
}

#[test]
fn if_operator_only_mid_statement() {
    let doc = lex("x = If(a, b, c)\nIf (a) Then\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, "If("), Style::Keyword3);
    assert_eq!(style_of(&doc, "If ("), Style::Keyword);

    let doc = lex("x = If(a, b, c)\n", Dialect::Vba);
    assert_eq!(style_of(&doc, "If("), Style::Keyword);
}

#[test]
fn bracketed_identifier_is_never_a_keyword() {
    let doc = lex("Dim [End] As String\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, "[End]"), Style::Identifier);
    assert_eq!(style_of(&doc, "End]"), Style::Identifier);
}

#[test]
fn labels_need_line_start_and_colon() {
    let doc = lex("Retry:\n[Begin]:\nx = y: z\n", Dialect::Vba);
    assert_eq!(style_of(&doc, "Retry"), Style::Label);
    assert_eq!(style_of(&doc, "[Begin]"), Style::Label);
    // `y` in `x = y: z` is not at the line start; `Retry:` also contains "y:".
    let y = doc.text().windows(4).position(|w| w == b"y: z").unwrap_or(0);
    assert_eq!(doc.style_at(y), Style::Identifier);
    assert_eq!(doc.style_at(y - 1), Style::Default);
}

#[test]
fn function_names_follow_sub_and_function() {
    let doc = lex(
        "Public Function Area(r)\nEnd Function\nSub Main()\nx = Main\n",
        Dialect::VbNet,
    );
    assert_eq!(style_of(&doc, "Area"), Style::FunctionDefinition);
    assert_eq!(style_of(&doc, "Main()"), Style::FunctionDefinition);
    assert_eq!(style_of(&doc, "Main\n"), Style::Identifier);
}

#[test]
fn end_keeps_sub_from_naming_a_function() {
    let doc = lex("End Sub Foo\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, "Foo"), Style::Identifier);
}

#[test]
fn type_characters_skip_classification() {
    let doc = lex("Dim name$\nx = Left$(s, 1)\n", Dialect::Vba);
    assert_eq!(style_of(&doc, "name$"), Style::Identifier);
    assert_eq!(style_of(&doc, "$\n"), Style::Identifier);

    let doc = lex("x = name$\n", Dialect::VbScript);
    assert_eq!(style_of(&doc, "name"), Style::Identifier);
    assert_eq!(style_of(&doc, "$"), Style::Operator);
}

// === Comments ===

#[test]
fn apostrophe_comment_marks_comment_line() {
    let doc = lex("' header\nx = 1 ' trailing\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, "' header"), Style::CommentLine);
    assert_eq!(style_of(&doc, "' trailing"), Style::CommentLine);
    assert_eq!(LineState::decode(doc.line_state(0)).line_type, LineType::Comment);
    assert_eq!(LineState::decode(doc.line_state(1)).line_type, LineType::None);
}

#[test]
fn rem_starts_a_comment() {
    assert_eq!(
        spans("Rem old style\nx\n", Dialect::VbScript),
        owned(&[("Rem old style\n", Style::CommentLine), ("x", Style::Identifier)])
    );
    // Only `'` comments join comment groups.
    let doc = lex("Rem old style\n", Dialect::VbScript);
    assert_eq!(LineState::decode(doc.line_state(0)).line_type, LineType::None);
}

#[test]
fn vba_comment_continues_after_underscore() {
    let source = "' first _\n second\nx\n";
    let doc = lex(source, Dialect::Vba);
    assert_eq!(style_of(&doc, "_"), Style::LineContinuation);
    assert_eq!(style_of(&doc, "second"), Style::CommentLine);
    assert_eq!(style_of(&doc, "x"), Style::Identifier);
    assert!(LineState::decode(doc.line_state(0)).continues());
    assert_eq!(LineState::decode(doc.line_state(1)).line_type, LineType::Comment);

    let doc = lex(source, Dialect::VbNet);
    assert_eq!(style_of(&doc, "second"), Style::Identifier);
}

// === Numbers ===

#[test]
fn numeric_literals() {
    let doc = lex("x = 123.45E+6 + .5 + 10L\n", Dialect::VbNet);
    assert_eq!(
        spans("x = 123.45E+6\n", Dialect::VbNet)[2],
        ("123.45E+6".to_string(), Style::Number)
    );
    assert_eq!(style_of(&doc, ".5"), Style::Number);
    assert_eq!(style_of(&doc, "L\n"), Style::Number);
}

#[test]
fn hex_literal_after_operator() {
    assert_eq!(
        spans("x = &HFF&\n", Dialect::Vba),
        owned(&[
            ("x", Style::Identifier),
            ("=", Style::Operator),
            ("&HFF&", Style::Number),
        ])
    );
}

#[test]
fn ampersand_after_string_is_concatenation() {
    let doc = lex("s = \"abc\" &Hello\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, "&"), Style::Operator);
    assert_eq!(style_of(&doc, "Hello"), Style::Identifier);

    let doc = lex("s = a &H10\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, "&"), Style::Operator);
    assert_eq!(style_of(&doc, "H10"), Style::Identifier);
}

// === Strings ===

#[test]
fn doubled_quote_does_not_close_string() {
    assert_eq!(
        spans("s = \"a\"\"b\" & c\n", Dialect::VbNet),
        owned(&[
            ("s", Style::Identifier),
            ("=", Style::Operator),
            ("\"a\"\"b\"", Style::String),
            ("&", Style::Operator),
            ("c", Style::Identifier),
        ])
    );
}

#[test]
fn char_literal_suffix_belongs_to_string() {
    let doc = lex("c = \"x\"c\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, "c\n"), Style::String);
}

#[test]
fn multiline_strings_only_in_vbnet() {
    let source = "s = \"a\nb\"\n";
    let doc = lex(source, Dialect::VbNet);
    assert_eq!(style_of(&doc, "b"), Style::String);

    let doc = lex(source, Dialect::Vba);
    assert_eq!(style_of(&doc, "b"), Style::Identifier);
}

// === Interpolated strings ===

#[test]
fn interpolation_expression_is_lexed() {
    assert_eq!(
        spans("s = $\"a{x}b\"\n", Dialect::VbNet),
        owned(&[
            ("s", Style::Identifier),
            ("=", Style::Operator),
            ("$\"a", Style::InterpolatedString),
            ("{", Style::Operator2),
            ("x", Style::Identifier),
            ("}", Style::Operator2),
            ("b\"", Style::InterpolatedString),
        ])
    );
}

#[test]
fn escaped_braces_stay_in_string() {
    assert_eq!(
        spans("s = $\"{{x}}\"\n", Dialect::VbNet),
        owned(&[
            ("s", Style::Identifier),
            ("=", Style::Operator),
            ("$\"{{x}}\"", Style::InterpolatedString),
        ])
    );
}

#[test]
fn format_specifier_and_alignment() {
    let doc = lex("s = $\"{x:N2} {y,-5}\"\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, ":N2"), Style::FormatSpecifier);
    assert_eq!(style_of(&doc, "N2"), Style::FormatSpecifier);
    assert_eq!(style_of(&doc, ",-5"), Style::FormatSpecifier);
    assert_eq!(style_of(&doc, "} {"), Style::Operator2);
}

#[test]
fn parens_inside_expression_are_private() {
    let doc = lex("s = $\"{f(a, 1)}\" : Dim z\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, ", 1"), Style::Operator2);
    assert_eq!(style_of(&doc, "1)"), Style::Number);
    assert_eq!(style_of(&doc, ")}"), Style::Operator2);
    // The global paren depth is balanced again after the string.
    assert_eq!(style_of(&doc, "Dim"), Style::Keyword);
    assert_eq!(LineState::decode(doc.line_state(0)).paren_depth, 0);
}

#[test]
fn expression_open_at_line_end_is_recorded() {
    let doc = lex("s = $\"{x +\ny}\"\n", Dialect::VbNet);
    let first = LineState::decode(doc.line_state(0));
    assert!(first.in_interpolation());
    assert_eq!(first.paren_depth, 1);
    assert_eq!(style_of(&doc, "y"), Style::Identifier);
    assert_eq!(style_of(&doc, "}\""), Style::Operator2);
    assert_eq!(LineState::decode(doc.line_state(1)), LineState::default());
}

#[test]
fn dollar_quote_is_plain_outside_vbnet() {
    let doc = lex("s = $\"{x}\"\n", Dialect::Vba);
    assert_eq!(style_of(&doc, "$"), Style::Operator);
    assert_eq!(style_of(&doc, "\"{x}\""), Style::String);
}

// === File numbers & dates ===

#[test]
fn file_numbers_become_numbers() {
    assert_eq!(
        spans("Close #1, #2\n", Dialect::Vba),
        owned(&[
            ("Close", Style::Identifier),
            ("#1", Style::Number),
            (",", Style::Operator),
            ("#2", Style::Number),
        ])
    );
}

#[test]
fn file_number_at_document_end() {
    let doc = lex("Close #1", Dialect::Vba);
    assert_eq!(style_of(&doc, "#1"), Style::Number);
}

#[test]
fn date_literal_is_one_span() {
    assert_eq!(
        spans("d = #10/12/2020#\n", Dialect::VbNet),
        owned(&[
            ("d", Style::Identifier),
            ("=", Style::Operator),
            ("#10/12/2020#", Style::Date),
        ])
    );
}

#[test]
fn many_digits_make_a_date() {
    let doc = lex("d = #2020\n", Dialect::Vba);
    assert_eq!(style_of(&doc, "#2020"), Style::Date);
}

// === Preprocessor ===

#[test]
fn directives_and_their_continuations() {
    let doc = lex(
        "#If DEBUG Then\n#Region \"x\"\n#End Region\n#End If\n",
        Dialect::VbNet,
    );
    assert_eq!(style_of(&doc, "#If"), Style::Preprocessor);
    assert_eq!(style_of(&doc, "DEBUG"), Style::Identifier);
    assert_eq!(style_of(&doc, "Then"), Style::Preprocessor);
    assert_eq!(style_of(&doc, "#Region"), Style::Preprocessor);
    assert_eq!(style_of(&doc, "Region\n#End If"), Style::Preprocessor);
    assert_eq!(style_of(&doc, "If\n"), Style::Preprocessor);
}

#[test]
fn vbscript_has_no_directives() {
    let doc = lex("#If x Then\n", Dialect::VbScript);
    assert_eq!(style_of(&doc, "#If"), Style::Identifier);
    assert_eq!(style_of(&doc, "Then"), Style::Keyword);
}

// === Line state ===

#[test]
fn line_types_are_recorded() {
    let doc = lex(
        "Dim a\nConst b = 1\nPrivate Type Point\nx = TypeOf y\nType T\n",
        Dialect::Vba,
    );
    let types: Vec<_> = (0..5)
        .map(|line| LineState::decode(doc.line_state(line)).line_type)
        .collect();
    assert_eq!(
        types,
        vec![
            LineType::Dim,
            LineType::Const,
            LineType::Vb6Type,
            LineType::None,
            LineType::Vb6Type,
        ]
    );
}

#[test]
fn line_continuation_sets_flag() {
    let doc = lex("x = 1 + _\n    2\n", Dialect::VbNet);
    assert_eq!(style_of(&doc, "_"), Style::LineContinuation);
    assert!(LineState::decode(doc.line_state(0)).continues());
    assert!(!LineState::decode(doc.line_state(1)).continues());
}

#[test]
fn open_parens_carry_to_next_line() {
    let doc = lex("y = (a +\n  End)\nEnd\n", Dialect::VbNet);
    assert_eq!(LineState::decode(doc.line_state(0)).paren_depth, 1);
    assert_eq!(style_of(&doc, "End)"), Style::Keyword3);
    assert_eq!(LineState::decode(doc.line_state(1)).paren_depth, 0);
    assert_eq!(style_of(&doc, "End\n"), Style::Keyword);
}

#[test]
fn word_at_document_end_is_classified() {
    let doc = lex("x = 1\nEnd", Dialect::VbNet);
    assert_eq!(style_of(&doc, "End"), Style::Keyword);
    let doc = lex("Retry:\nGoTo Retry", Dialect::Vba);
    assert_eq!(style_of(&doc, "GoTo"), Style::Keyword);
    assert_eq!(doc.style_at(doc.len() - 1), Style::Identifier);
}

#[test]
fn last_line_without_newline_is_persisted() {
    let doc = lex("x = 1\nDim s = \"abc\"", Dialect::VbNet);
    assert_eq!(LineState::decode(doc.line_state(1)).line_type, LineType::Dim);
}

#[test]
fn every_byte_is_styled_once() {
    let source = "Sub A()\n  s = $\"{b}\" & \"c\" ' d\nEnd Sub\n";
    let doc = lex(source, Dialect::VbNet);
    assert_eq!(doc.styles().len(), source.len());
    let covered: usize = doc.spans().iter().map(|s| s.range.len()).sum();
    assert_eq!(covered, source.len());
}

// === Resuming ===

/// Helper: tokenize in two pieces split at the start of `split_line`.
fn lex_in_chunks(source: &str, dialect: Dialect, split_line: usize) -> Document {
    let keywords = KeywordLists::vb_defaults();
    let mut doc = Document::new(source);
    let split = doc.line_start(split_line);
    let len = doc.len();
    tokenize(&mut doc, 0, split, Style::Default, &keywords, dialect);
    let init = if split == 0 {
        Style::Default
    } else {
        doc.style_at(split - 1)
    };
    tokenize(&mut doc, split, len - split, init, &keywords, dialect);
    doc
}

#[test]
fn resume_inside_interpolated_expression_backs_up() {
    let source = "a = 1\ns = $\"{x +\n  y +\n  z}\" & \"t\"\nb = 2\n";
    let whole = lex(source, Dialect::VbNet);
    let chunked = lex_in_chunks(source, Dialect::VbNet, 3);
    assert_eq!(chunked.styles(), whole.styles());
    assert_eq!(chunked.line_states(), whole.line_states());
}

#[test]
fn resume_reports_the_backed_up_range() {
    let source = "s = $\"{x +\ny}\"\n";
    let keywords = KeywordLists::vb_defaults();
    let mut doc = lex(source, Dialect::VbNet);
    let start = doc.line_start(1);
    let len = doc.len();
    let styled = tokenize(
        &mut doc,
        start,
        len - start,
        Style::Default,
        &keywords,
        Dialect::VbNet,
    );
    assert_eq!(styled, 0..len);
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_resume {
    use super::{lex, lex_in_chunks};
    use proptest::prelude::*;
    use vb_lexer_core::Dialect;

    const LINES: &[&str] = &[
        "Dim x As Integer",
        "Public Sub Main()",
        "End Sub",
        "If x > 1 Then",
        "End If",
        "s = \"abc\" & name",
        "s = $\"a{x + f(1, 2):N2}b\"",
        "s = $\"{x +",
        "  y}\"",
        "' comment _",
        "Rem note",
        "x = &HFF + 1.5E+3",
        "Close #1, #2",
        "d = #10/12/2020#",
        "#If DEBUG Then",
        "#End If",
        "y = (a +",
        "  b)",
        "s = \"multi",
        "line\"",
        "x = 1 + _",
        "label:",
        "Dim [End] As String",
        "x.End()",
        "Const k = 10",
        "",
    ];

    fn dialect() -> impl Strategy<Value = Dialect> {
        prop_oneof![
            Just(Dialect::VbNet),
            Just(Dialect::Vba),
            Just(Dialect::VbScript)
        ]
    }

    proptest! {
        #[test]
        fn chunked_scan_matches_whole_scan(
            picks in proptest::collection::vec(0..LINES.len(), 1..16),
            split in 0usize..16,
            trailing_newline in any::<bool>(),
            dialect in dialect(),
        ) {
            let mut source = picks.iter().map(|&i| LINES[i]).collect::<Vec<_>>().join("\n");
            if trailing_newline {
                source.push('\n');
            }
            let whole = lex(&source, dialect);
            let split_line = split.min(picks.len());
            let chunked = lex_in_chunks(&source, dialect, split_line);
            prop_assert_eq!(chunked.styles(), whole.styles());
            prop_assert_eq!(chunked.line_states(), whole.line_states());
        }
    }
}

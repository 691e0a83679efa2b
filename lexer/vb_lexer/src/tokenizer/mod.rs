//! Tokenizer state machine.
//!
//! Scans a byte range of a [`LexAccessor`], assigning a [`Style`] to every
//! byte and writing a [`LineState`] for every line completed in the range.
//!
//! # Design
//!
//! Each step looks at one byte. First the handler for the current lexical
//! state decides whether the state ends here; if it does, the state drops
//! back to `Default` and the default handler decides what the byte starts.
//! A handler returns [`Flow::Retry`] when it has relabelled the current byte
//! and the byte must be examined again under the new state (for example the
//! `}` that closes an interpolated expression). Otherwise the step finishes
//! the byte's bookkeeping and advances.
//!
//! # Resuming
//!
//! A scan can start on any line. The line state of the previous line gives
//! the paren depth and whether it ended in a continuation; lines inside an
//! interpolated-string expression make the scan back up to the line that
//! opened it (see [`crate::backtrack`]).

use std::ops::Range;

use tracing::trace;
use vb_lexer_core::char_class::{
    is_digit, is_graphic, is_identifier_char_ex, is_identifier_start_ex,
    is_invalid_format_specifier, is_number_prefix, is_number_start, is_space_char,
    is_type_character, is_vb_number, prefer_string_concat,
};
use vb_lexer_core::{
    Dialect, LexAccessor, LineFlags, LineState, LineType, Style, StyleContext, MAX_WORD_LEN,
};

use crate::backtrack::{backtrack_to_start, lookback_non_white};
use crate::keywords::{KeywordCategory, KeywordLists};

/// What the last promoted keyword implies for the next identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum KeywordType {
    #[default]
    None,
    /// `End`: the following `Sub`/`Function` closes a block.
    End,
    /// `Public`/`Protected`/`Private`/`Friend`.
    AccessModifier,
    /// `Sub`/`Function`: the next plain identifier is the name being defined.
    Function,
}

/// Outcome of one state handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    /// Continue with the current byte.
    Advance,
    /// The state changed; examine the current byte again.
    Retry,
}

/// Style `len` bytes from `start`, resuming in `init_style`.
///
/// Returns the range actually styled, which starts earlier than `start`
/// when the scan had to back up into an interpolated-string expression.
#[tracing::instrument(level = "debug", skip_all, fields(start = start, len = len, dialect = %dialect))]
pub fn tokenize<A: LexAccessor + ?Sized>(
    acc: &mut A,
    start: usize,
    len: usize,
    init_style: Style,
    keywords: &KeywordLists,
    dialect: Dialect,
) -> Range<usize> {
    let mut resume = crate::backtrack::ResumePoint {
        start,
        len,
        init_style,
    };
    if start != 0 {
        resume = backtrack_to_start(acc, start, len, init_style);
    }

    let mut scanner = Scanner::new(keywords, dialect);
    let current_line = acc.line_of(resume.start);
    if current_line > 0 {
        let prev = LineState::decode(acc.line_state(current_line - 1));
        scanner.paren_count = prev.paren_depth;
        scanner.prev_continued = prev.continues();
    }
    if resume.start != 0 && resume.init_style.is_space_equiv() {
        let (ch, style) = lookback_non_white(acc, resume.start, Style::LineContinuation);
        scanner.ch_prev_non_white = ch;
        scanner.style_prev_non_white = style;
    }

    let doc_len = acc.len();
    let mut sc = StyleContext::new(acc, resume.start, resume.len, resume.init_style);
    scanner.run(&mut sc);

    let end = sc.end_pos();
    if end == doc_len {
        match sc.state {
            // `Close #1` on the last line of the document.
            Style::FileNumber => sc.change_state(Style::Number),
            // No byte follows to end the word, so classify it here.
            Style::Identifier => {
                scanner.identifier(&mut sc);
            }
            _ => {}
        }
        // The last line has no line break to trigger this.
        if scanner.line_open {
            scanner.end_line(&mut sc);
        }
    }
    sc.complete();
    resume.start..end
}

/// Per-invocation scanning context.
struct Scanner<'k> {
    keywords: &'k KeywordLists,
    dialect: Dialect,
    kw_type: KeywordType,
    /// Line type and flags accumulated for the line being scanned.
    line: LineState,
    /// The previous line ended in a continuation.
    prev_continued: bool,
    /// Open `(` outside interpolation plus open interpolation `{`.
    paren_count: i32,
    file_nb_digits: u32,
    visible_chars: usize,
    /// `ch_prev_non_white` when the current identifier started.
    ch_before: u8,
    ch_prev_non_white: u8,
    style_prev_non_white: Style,
    expect_if_then: bool,
    expect_end_directive: bool,
    /// Bytes of the current line were scanned but its state is not yet written.
    line_open: bool,
    /// One paren counter per open interpolated-string expression.
    nested: Vec<i32>,
}

impl<'k> Scanner<'k> {
    fn new(keywords: &'k KeywordLists, dialect: Dialect) -> Self {
        Self {
            keywords,
            dialect,
            kw_type: KeywordType::None,
            line: LineState::default(),
            prev_continued: false,
            paren_count: 0,
            file_nb_digits: 0,
            visible_chars: 0,
            ch_before: 0,
            ch_prev_non_white: 0,
            style_prev_non_white: Style::Default,
            expect_if_then: false,
            expect_end_directive: false,
            line_open: false,
            nested: Vec::new(),
        }
    }

    fn run<A: LexAccessor + ?Sized>(&mut self, sc: &mut StyleContext<'_, A>) {
        while sc.more() {
            if self.step_state(sc) == Flow::Retry {
                continue;
            }
            if sc.state == Style::Default && self.step_default(sc) == Flow::Retry {
                continue;
            }
            self.finish_byte(sc);
            sc.forward();
        }
    }

    // ─── State handlers ─────────────────────────────────────────────

    fn step_state<A: LexAccessor + ?Sized>(&mut self, sc: &mut StyleContext<'_, A>) -> Flow {
        match sc.state {
            Style::Identifier => self.identifier(sc),
            Style::Number => {
                if !is_vb_number(sc.ch, sc.ch_prev) {
                    sc.set_state(Style::Default);
                }
                Flow::Advance
            }
            Style::String | Style::InterpolatedString => self.string(sc),
            Style::CommentLine => {
                self.comment(sc);
                Flow::Advance
            }
            Style::FileNumber => {
                self.file_number(sc);
                Flow::Advance
            }
            Style::Date => {
                if sc.at_line_start {
                    sc.set_state(Style::Default);
                } else if sc.ch == b'#' {
                    sc.forward_set_state(Style::Default);
                }
                Flow::Advance
            }
            Style::FormatSpecifier => {
                if is_invalid_format_specifier(sc.ch) {
                    sc.set_state(Style::InterpolatedString);
                    return Flow::Retry;
                }
                Flow::Advance
            }
            Style::Default => Flow::Advance,
            // Single-byte tokens, and styles only ever assigned to finished
            // spans (a scan may resume in one of them).
            Style::Operator
            | Style::Operator2
            | Style::LineContinuation
            | Style::Keyword
            | Style::Keyword2
            | Style::Keyword3
            | Style::Preprocessor
            | Style::Label
            | Style::Attribute
            | Style::Constant
            | Style::FunctionDefinition => {
                sc.set_state(Style::Default);
                Flow::Advance
            }
        }
    }

    fn string<A: LexAccessor + ?Sized>(&mut self, sc: &mut StyleContext<'_, A>) -> Flow {
        if sc.at_line_start && !self.dialect.allows_multiline_strings() {
            sc.set_state(Style::Default);
        } else if sc.ch == b'"' {
            if sc.ch_next == b'"' {
                sc.forward();
            } else {
                if matches!(sc.ch_next, b'c' | b'C' | b'$') {
                    sc.forward();
                }
                sc.forward_set_state(Style::Default);
            }
        } else if sc.state == Style::InterpolatedString {
            if sc.ch == b'{' {
                if sc.ch_next == b'{' {
                    sc.forward();
                } else {
                    self.paren_count += 1;
                    self.nested.push(0);
                    trace!(depth = self.nested.len(), "open interpolated expression");
                    sc.set_state(Style::Operator2);
                    sc.forward_set_state(Style::Default);
                }
            } else if sc.ch == b'}' {
                if self.nested.pop().is_some() {
                    self.paren_count -= 1;
                    trace!(depth = self.nested.len(), "close interpolated expression");
                    sc.set_state(Style::Operator2);
                    sc.forward_set_state(Style::InterpolatedString);
                    return Flow::Retry;
                }
                if sc.ch_next == b'}' {
                    sc.forward();
                }
            }
        }
        Flow::Advance
    }

    fn comment<A: LexAccessor + ?Sized>(&mut self, sc: &mut StyleContext<'_, A>) {
        if sc.at_line_start {
            if self.prev_continued && self.line.line_type == LineType::None {
                self.line.line_type = LineType::Comment;
            } else {
                sc.set_state(Style::Default);
            }
        } else if self.dialect.continues_comments()
            && sc.ch == b'_'
            && sc.ch_prev <= b' '
            && sc.line_next_char(true) == 0
        {
            self.line.flags |= LineFlags::CONTINUATION;
            sc.set_state(Style::LineContinuation);
            sc.forward_set_state(Style::CommentLine);
        }
    }

    fn file_number<A: LexAccessor + ?Sized>(&mut self, sc: &mut StyleContext<'_, A>) {
        if is_digit(sc.ch) {
            self.file_nb_digits += 1;
            if self.file_nb_digits > 3 {
                sc.change_state(Style::Date);
            }
        } else if matches!(sc.ch, b'\r' | b'\n' | b',') {
            // Close #1; Put #1, ...; Get #1, ...
            sc.change_state(Style::Number);
            sc.set_state(Style::Default);
        } else if sc.ch == b'#' {
            sc.change_state(Style::Date);
            sc.forward_set_state(Style::Default);
        } else {
            sc.change_state(Style::Date);
        }
        if sc.state != Style::FileNumber {
            self.file_nb_digits = 0;
        }
    }

    fn identifier<A: LexAccessor + ?Sized>(&mut self, sc: &mut StyleContext<'_, A>) -> Flow {
        if is_identifier_char_ex(sc.ch) {
            return Flow::Advance;
        }

        let mut skip_type = false;
        if sc.ch == b']' || (self.dialect.allows_type_characters() && is_type_character(sc.ch)) {
            // `]` closes a bracketed [keyword] identifier.
            skip_type = sc.ch != b']';
            self.visible_chars += 1;
            sc.forward();
        }

        let mut buf = [0u8; MAX_WORD_LEN + 1];
        let lowered = sc.current_lowered(&mut buf);
        let len = sc.length_current();
        // `rem$` is still a comment.
        let lowered = if skip_type && len == 4 {
            &lowered[..3]
        } else {
            lowered
        };
        let word = std::str::from_utf8(lowered).unwrap_or("");

        if word == "rem" {
            sc.change_state(Style::CommentLine);
            return Flow::Advance;
        }
        if !skip_type {
            self.classify(sc, word, len);
        }
        sc.set_state(Style::Default);
        Flow::Advance
    }

    /// Assign the final style of a completed identifier.
    fn classify<A: LexAccessor + ?Sized>(
        &mut self,
        sc: &mut StyleContext<'_, A>,
        word: &str,
        len: usize,
    ) {
        let kw = self.keywords;
        let ch_next = sc.line_next_char(false);
        let first_on_line = self.visible_chars == len;

        if word.starts_with('[') {
            if first_on_line && ch_next == b':' {
                sc.change_state(Style::Label);
            }
        } else if (self.expect_if_then && word == "then")
            || (self.expect_end_directive && matches!(word, "if" | "region" | "externalsource"))
        {
            sc.change_state(Style::Preprocessor);
        } else if kw.in_list(KeywordCategory::Keywords, word) {
            sc.change_state(Style::Keyword3);
            if self.ch_before != b'.' && self.paren_count == 0 {
                sc.change_state(Style::Keyword);
                self.promote_keyword(sc, word, first_on_line, ch_next);
            }
        } else if kw.in_list(KeywordCategory::TypeKeywords, word) {
            sc.change_state(Style::Keyword2);
        } else if first_on_line && ch_next == b':' {
            sc.change_state(Style::Label);
        } else if kw.in_list(KeywordCategory::ContextKeywords, word) {
            sc.change_state(Style::Keyword3);
        } else if let Some(directive) = word
            .strip_prefix('#')
            .filter(|d| self.dialect.has_preprocessor() && kw.in_list(KeywordCategory::Preprocessor, d))
        {
            sc.change_state(Style::Preprocessor);
            self.expect_if_then = matches!(directive, "if" | "elseif");
            self.expect_end_directive = directive == "end";
        } else if kw.in_list(KeywordCategory::Attributes, word) {
            sc.change_state(Style::Attribute);
        } else if kw.in_list(KeywordCategory::Constants, word) {
            sc.change_state(Style::Constant);
        } else if self.kw_type == KeywordType::Function {
            sc.change_state(Style::FunctionDefinition);
        }

        self.style_prev_non_white = sc.state;
        if sc.state != Style::Keyword {
            self.kw_type = KeywordType::None;
        }
    }

    /// Side effects of a statement-level keyword.
    fn promote_keyword<A: LexAccessor + ?Sized>(
        &mut self,
        sc: &mut StyleContext<'_, A>,
        word: &str,
        first_on_line: bool,
        ch_next: u8,
    ) {
        match word {
            "if" => {
                if self.dialect.has_if_operator() && self.visible_chars > 2 && ch_next == b'(' {
                    // If(cond, a, b) operator
                    sc.change_state(Style::Keyword3);
                }
            }
            "dim" => self.line.line_type = LineType::Dim,
            "const" => self.line.line_type = LineType::Const,
            "type" => {
                if first_on_line || self.kw_type == KeywordType::AccessModifier {
                    self.line.line_type = LineType::Vb6Type;
                }
            }
            "end" => self.kw_type = KeywordType::End,
            "sub" | "function" => {
                if self.kw_type != KeywordType::End {
                    self.kw_type = KeywordType::Function;
                }
            }
            "public" | "protected" | "private" | "friend" => {
                self.kw_type = KeywordType::AccessModifier;
            }
            _ => {}
        }
    }

    /// What the current byte starts, from the `Default` state.
    fn step_default<A: LexAccessor + ?Sized>(&mut self, sc: &mut StyleContext<'_, A>) -> Flow {
        let ch = sc.ch;
        if ch == b'\'' {
            sc.set_state(Style::CommentLine);
            if self.visible_chars == 0 {
                self.line.line_type = LineType::Comment;
            }
        } else if ch == b'"' {
            sc.set_state(Style::String);
        } else if self.dialect.allows_interpolation() && sc.matches(b'$', b'"') {
            sc.set_state(Style::InterpolatedString);
            sc.forward();
        } else if ch == b'#' {
            // #If, #End, #Region, #Const ... directives start like identifiers.
            if matches!(sc.ch_next.to_ascii_lowercase(), b'e' | b'i' | b'r' | b'c') {
                sc.set_state(Style::Identifier);
            } else {
                sc.set_state(Style::FileNumber);
            }
        } else if ch == b'&'
            && is_number_prefix(sc.ch_next)
            && !prefer_string_concat(self.ch_prev_non_white, self.style_prev_non_white)
        {
            sc.set_state(Style::Number);
            sc.forward();
        } else if is_number_start(ch, sc.ch_next) {
            sc.set_state(Style::Number);
        } else if ch == b'_' && sc.ch_next <= b' ' {
            sc.set_state(Style::LineContinuation);
            if sc.line_next_char(true) == 0 {
                self.line.flags |= LineFlags::CONTINUATION;
            }
        } else if is_identifier_start_ex(ch) || ch == b'[' {
            self.ch_before = self.ch_prev_non_white;
            sc.set_state(Style::Identifier);
        } else if is_graphic(ch) {
            return self.operator(sc);
        }
        Flow::Advance
    }

    fn operator<A: LexAccessor + ?Sized>(&mut self, sc: &mut StyleContext<'_, A>) -> Flow {
        sc.set_state(Style::Operator);
        let Some(depth) = self.nested.last_mut() else {
            if sc.ch == b'(' {
                self.paren_count += 1;
            } else if sc.ch == b')' && self.paren_count > 0 {
                self.paren_count -= 1;
            }
            return Flow::Advance;
        };

        sc.change_state(Style::Operator2);
        if sc.ch == b'(' {
            *depth += 1;
        } else if sc.ch == b')' {
            *depth -= 1;
        }
        if *depth <= 0 && is_interpolated_expression_end(sc) {
            sc.change_state(if sc.ch == b'}' {
                Style::InterpolatedString
            } else {
                Style::FormatSpecifier
            });
            return Flow::Retry;
        }
        Flow::Advance
    }

    // ─── Bookkeeping ────────────────────────────────────────────────

    fn finish_byte<A: LexAccessor + ?Sized>(&mut self, sc: &mut StyleContext<'_, A>) {
        self.line_open = true;
        if !is_space_char(sc.ch) {
            self.visible_chars += 1;
            if !sc.state.is_space_equiv() {
                self.ch_prev_non_white = sc.ch;
                self.style_prev_non_white = sc.state;
            }
        }
        if sc.at_line_end {
            self.end_line(sc);
        }
    }

    /// Persist the finished line and reset line-scoped hints.
    fn end_line<A: LexAccessor + ?Sized>(&mut self, sc: &mut StyleContext<'_, A>) {
        if !self.nested.is_empty() {
            self.line.flags |= LineFlags::INTERPOLATION;
        }
        self.line.paren_depth = self.paren_count;
        sc.set_line_state(sc.current_line, self.line.encode());

        self.prev_continued = self.line.continues();
        self.line = LineState::default();
        self.expect_if_then = false;
        self.expect_end_directive = false;
        self.visible_chars = 0;
        self.kw_type = KeywordType::None;
        self.line_open = false;
    }
}

/// `}` closes the expression; `:` or `,<width>` starts its format part.
fn is_interpolated_expression_end<A: LexAccessor + ?Sized>(sc: &StyleContext<'_, A>) -> bool {
    sc.ch == b'}'
        || sc.ch == b':'
        || (sc.ch == b','
            && (is_digit(sc.ch_next) || (sc.ch_next == b'-' && is_digit(sc.relative(2)))))
}

#[cfg(test)]
mod tests;

//! Folding state machine.
//!
//! Runs over text the tokenizer has already styled and writes one packed
//! [`FoldLevel`] per line. Block openers are recognised from keyword-styled
//! bytes only, so member access (`x.End`) and bracketed identifiers
//! (`[End]`) never affect nesting.
//!
//! Consecutive comment, `Dim` and `Const` lines form their own foldable
//! group, keyed on the line type the tokenizer stored in each line state.

use tracing::debug;
use vb_lexer_core::char_class::{is_alpha, is_space_char};
use vb_lexer_core::{FoldLevel, LexAccessor, LineState, LineType, Style};

use crate::property::classify_property;

/// Words that make a preceding `End` close a block.
const BLOCK_ENDS: [&str; 12] = [
    "function",
    "sub",
    "if",
    "class",
    "structure",
    "module",
    "enum",
    "interface",
    "operator",
    "property",
    "event",
    "type",
];

/// Compute fold levels for every line touched by `len` bytes from `start`.
///
/// The level at the start of the first line is taken from the end level of
/// the previous line, so a range may begin at any line start.
#[tracing::instrument(level = "debug", skip_all, fields(start = start, len = len))]
pub fn fold<A: LexAccessor + ?Sized>(acc: &mut A, start: usize, len: usize, init_style: Style) {
    let end_pos = start + len;
    let mut line = acc.line_of(start);
    let mut level_current = FoldLevel::BASE;
    let mut fold_prev = LineState::default();
    if line > 0 {
        level_current = FoldLevel::unpack(acc.level_at(line - 1)).end;
        fold_prev = LineState::decode(acc.line_state(line - 1));
    }

    let mut folder = Folder::new(level_current);
    let mut fold_current = LineState::decode(acc.line_state(line));
    let mut line_start_next = acc.line_start(line + 1).min(end_pos);
    let first_line = line;

    let mut style = init_style;
    let mut style_next = acc.style_at(start);
    let mut visible = false;

    for i in start..end_pos {
        let style_prev = style;
        style = style_next;
        let ch = acc.char_at(i);
        style_next = acc.style_at(i + 1);

        match style {
            // A keyword run starts here; later bytes of the same word are skipped.
            Style::Keyword if style_prev != Style::Keyword => {
                folder.keyword(&*acc, i, line, end_pos, !visible, fold_current);
            }
            Style::Preprocessor => folder.directive(&*acc, i),
            Style::Operator => match ch {
                b'{' => folder.level_next += 1,
                b'}' => folder.level_next -= 1,
                _ => {}
            },
            _ => {}
        }

        if !is_space_char(ch) {
            visible = true;
        }

        if i + 1 == line_start_next {
            let fold_next = LineState::decode(acc.line_state(line + 1));
            let mut level_next = folder.level_next.max(FoldLevel::BASE);
            let group = fold_current.line_type.fold_group();
            if group != 0 {
                if group != fold_prev.line_type.fold_group() {
                    level_next += 1;
                }
                if group != fold_next.line_type.fold_group() {
                    level_next -= 1;
                }
            }
            folder.level_next = level_next;
            acc.set_level(line, FoldLevel::new(level_current, level_next).pack());

            line += 1;
            line_start_next = acc.line_start(line + 1).min(end_pos);
            level_current = level_next;
            fold_prev = fold_current;
            fold_current = fold_next;
            visible = false;
        }
    }

    debug!(lines = line - first_line, "folded");
}

/// Per-invocation folding context.
struct Folder {
    level_next: i32,
    /// Open VB6 form-designer `Begin` blocks.
    num_begin: u32,
    /// `End` seen; the next block keyword closes instead of opening.
    is_end: bool,
    /// Inside an interface body, where member signatures have no bodies.
    is_interface: bool,
    /// Inside a property block whose accessors open their own levels.
    is_property: bool,
    /// `Custom Event`: its accessors open levels.
    is_custom: bool,
    /// `Exit Sub`/`Exit Function`/`Exit Property`.
    is_exit: bool,
    /// `Declare`/`Delegate`: the following `Sub`/`Function` has no body.
    is_declare: bool,
    /// `If` seen and its `Then` not yet.
    is_if: bool,
    line_if: Option<usize>,
    line_then: Option<usize>,
}

impl Folder {
    fn new(level: i32) -> Self {
        Self {
            level_next: level,
            num_begin: 0,
            is_end: false,
            is_interface: false,
            is_property: false,
            is_custom: false,
            is_exit: false,
            is_declare: false,
            is_if: false,
            line_if: None,
            line_then: None,
        }
    }

    /// First byte of a keyword-styled word at `i`.
    fn keyword<A: LexAccessor + ?Sized>(
        &mut self,
        acc: &A,
        i: usize,
        line: usize,
        end_pos: usize,
        first_on_line: bool,
        line_state: LineState,
    ) {
        let at = |word: &str| acc.match_lower(i, word);
        let space_at = |offset: usize| is_space_char(byte_at(acc, i + offset));

        if first_on_line
            && (at("for")
                || (at("do") && space_at(2))
                || at("while")
                || (at("try") && space_at(3))
                || (at("select") && match_next(acc, i + 6, end_pos, "case"))
                // not `WithEvents` or `With {`
                || (at("with") && space_at(4))
                || at("namespace")
                || at("synclock")
                || at("using")
                || (self.is_property && (at("set") || (at("get") && space_at(3))))
                || (self.is_custom
                    && (at("raiseevent") || at("addhandler") || at("removehandler"))))
        {
            self.level_next += 1;
        } else if first_on_line && (at("next") || at("loop") || at("wend")) {
            self.level_next -= 1;
        } else if at("exit")
            && ["function", "sub", "property"]
                .iter()
                .any(|word| match_next(acc, i + 4, end_pos, word))
        {
            self.is_exit = true;
        } else if at("begin") {
            self.level_next += 1;
            if space_at(5) {
                self.num_begin += 1;
            }
        } else if at("end") {
            self.end(acc, i, line, end_pos);
        } else if at("if") {
            self.is_if = true;
            self.line_if = Some(line);
            if self.is_end {
                self.is_end = false;
                self.is_if = false;
            } else {
                self.level_next += 1;
            }
        } else if at("then") {
            if self.is_if {
                self.is_if = false;
                let pos = skip_space_tab(acc, i + 4, end_pos);
                // `If c Then stmt` closes on the same line.
                if !ends_statement(byte_at(acc, pos)) {
                    self.level_next -= 1;
                }
            }
            self.line_then = Some(line);
        } else if (!self.is_interface && (at("class") || at("structure")))
            || at("module")
            || at("enum")
            || at("operator")
        {
            if self.is_end {
                self.is_end = false;
            } else {
                self.level_next += 1;
            }
        } else if at("interface") {
            if !(self.is_end || self.is_interface) {
                self.level_next += 1;
            }
            self.is_interface = !self.is_end;
            self.is_end = false;
        } else if at("declare") || at("delegate") {
            self.is_declare = true;
        } else if !self.is_interface && (at("sub") || at("function")) {
            if !(self.is_end || self.is_exit || self.is_declare) {
                self.level_next += 1;
            }
            self.is_end = false;
            self.is_exit = false;
            self.is_declare = false;
        } else if !self.is_interface && at("property") {
            self.is_property = true;
            if !(self.is_end || self.is_exit) {
                let form = classify_property(acc, line, i + "property".len());
                if form.opens_block() {
                    self.level_next += 1;
                }
                self.is_property = form.expects_accessors();
            }
            if self.is_end {
                self.is_end = false;
                self.is_property = false;
            }
            self.is_exit = false;
        } else if at("custom") {
            self.is_custom = true;
        } else if !self.is_interface && self.is_custom && at("event") {
            if self.is_end {
                self.is_end = false;
                self.is_custom = false;
            } else {
                self.level_next += 1;
            }
        } else if at("type") && space_at(4) {
            // VB6 `[Private] Type Name ... End Type`, not `TypeOf`.
            if !self.is_end && line_state.line_type == LineType::Vb6Type {
                self.level_next += 1;
            }
            self.is_end = false;
        }
    }

    /// `End` closes a block, balances a `Begin`, or is a statement by itself.
    fn end<A: LexAccessor + ?Sized>(&mut self, acc: &A, i: usize, line: usize, end_pos: usize) {
        self.level_next -= 1;
        let mut ch_end = byte_at(acc, i + 3);
        if matches!(ch_end, b' ' | b'\t') {
            let pos = skip_space_tab(acc, i + 3, end_pos);
            ch_end = byte_at(acc, pos);
            if is_alpha(ch_end)
                && BLOCK_ENDS
                    .iter()
                    .any(|word| match_next(acc, pos, end_pos, word))
            {
                self.is_end = true;
            }
        }
        if ends_statement(ch_end) {
            self.is_end = false;
            if self.num_begin == 0 {
                self.level_next += 1;
            } else {
                self.num_begin -= 1;
            }
        }
        if acc.match_lower(i, "endif") {
            self.is_if = false;
        }
        // If c Then stmt End If
        if self.line_if == Some(line) && self.line_then == Some(line) {
            self.level_next += 1;
        }
    }

    fn directive<A: LexAccessor + ?Sized>(&mut self, acc: &A, i: usize) {
        let at = |word: &str| acc.match_lower(i, word);
        if at("#if") || at("#region") || at("#externalsource") {
            self.level_next += 1;
        } else if at("#end") {
            self.level_next -= 1;
        }
    }
}

/// Byte at `pos`; past the document end the text reads as a line break.
fn byte_at<A: LexAccessor + ?Sized>(acc: &A, pos: usize) -> u8 {
    if pos < acc.len() {
        acc.char_at(pos)
    } else {
        b'\n'
    }
}

fn skip_space_tab<A: LexAccessor + ?Sized>(acc: &A, mut pos: usize, end_pos: usize) -> usize {
    while pos < end_pos && matches!(byte_at(acc, pos), b' ' | b'\t') {
        pos += 1;
    }
    pos
}

/// `word` is the next word after `pos`, skipping spaces and tabs.
fn match_next<A: LexAccessor + ?Sized>(acc: &A, pos: usize, end_pos: usize, word: &str) -> bool {
    let pos = skip_space_tab(acc, pos, end_pos);
    is_space_char(byte_at(acc, pos + word.len())) && acc.match_lower(pos, word)
}

/// Nothing but a line break or a comment follows.
#[inline]
fn ends_statement(ch: u8) -> bool {
    matches!(ch, b'\r' | b'\n' | b'\'')
}

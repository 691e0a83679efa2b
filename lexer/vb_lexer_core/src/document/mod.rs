//! Host-side document access.
//!
//! The tokenizer and folder never own text. They read bytes and previously
//! assigned styles through [`LexAccessor`] and write styles, per-line state
//! and fold levels back through it. [`Document`] is the in-memory
//! implementation used by the CLI and the tests; editors implement the
//! trait over their own buffers.
//!
//! Lines follow editor conventions: a line includes its terminating `\n`
//! (or `\r\n`), and a document always has at least one line.

use std::ops::Range;

use crate::{FoldLevel, Style};

/// Read/write view of a styled document.
pub trait LexAccessor {
    /// Byte length of the document.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at `pos`, or `0` past the end.
    fn char_at(&self, pos: usize) -> u8;

    /// Style previously assigned to `pos`, `Default` past the end.
    fn style_at(&self, pos: usize) -> Style;

    /// Assign `style` to every byte in `range`.
    fn set_styles(&mut self, range: Range<usize>, style: Style);

    fn line_count(&self) -> usize;

    /// Line containing `pos`; positions past the end belong to the last line.
    fn line_of(&self, pos: usize) -> usize;

    /// Offset of the first byte of `line`; the document length past the last line.
    fn line_start(&self, line: usize) -> usize;

    fn line_state(&self, line: usize) -> i32;

    fn set_line_state(&mut self, line: usize, state: i32);

    fn level_at(&self, line: usize) -> i32;

    fn set_level(&mut self, line: usize, level: i32);

    /// Case-insensitive comparison of the bytes at `pos` with a lowercase
    /// `word`. Only the prefix is compared; no word boundary is required.
    fn match_lower(&self, pos: usize, word: &str) -> bool {
        word.bytes()
            .enumerate()
            .all(|(i, b)| self.char_at(pos + i).to_ascii_lowercase() == b)
    }
}

/// A contiguous run of bytes sharing one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleSpan {
    pub range: Range<usize>,
    pub style: Style,
}

/// Owned text plus the per-byte styles and per-line integers a host keeps.
#[derive(Clone, Debug)]
pub struct Document {
    text: Vec<u8>,
    styles: Vec<Style>,
    /// Start offset of every line; always contains at least `0`.
    line_starts: Vec<usize>,
    line_states: Vec<i32>,
    levels: Vec<i32>,
}

impl Document {
    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        let text = text.into();
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr::memchr_iter(b'\n', &text).map(|nl| nl + 1));
        let lines = line_starts.len();
        Self {
            styles: vec![Style::Default; text.len()],
            line_states: vec![0; lines],
            levels: vec![FoldLevel::default().pack(); lines],
            text,
            line_starts,
        }
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    pub fn line_states(&self) -> &[i32] {
        &self.line_states
    }

    /// Byte range of `line`, including its line break.
    pub fn line_range(&self, line: usize) -> Range<usize> {
        self.line_start(line)..self.line_start(line + 1)
    }

    /// Runs of equal style over the whole document.
    pub fn spans(&self) -> Vec<StyleSpan> {
        let mut spans: Vec<StyleSpan> = Vec::new();
        for (pos, &style) in self.styles.iter().enumerate() {
            match spans.last_mut() {
                Some(span) if span.style == style => span.range.end = pos + 1,
                _ => spans.push(StyleSpan {
                    range: pos..pos + 1,
                    style,
                }),
            }
        }
        spans
    }

    /// Decoded fold level of every line.
    pub fn fold_levels(&self) -> Vec<FoldLevel> {
        self.levels.iter().copied().map(FoldLevel::unpack).collect()
    }
}

impl LexAccessor for Document {
    fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    fn char_at(&self, pos: usize) -> u8 {
        self.text.get(pos).copied().unwrap_or(0)
    }

    #[inline]
    fn style_at(&self, pos: usize) -> Style {
        self.styles.get(pos).copied().unwrap_or_default()
    }

    fn set_styles(&mut self, range: Range<usize>, style: Style) {
        let end = range.end.min(self.styles.len());
        let start = range.start.min(end);
        self.styles[start..end].fill(style);
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_of(&self, pos: usize) -> usize {
        // Index of the last line start <= pos.
        self.line_starts.partition_point(|&start| start <= pos) - 1
    }

    fn line_start(&self, line: usize) -> usize {
        self.line_starts
            .get(line)
            .copied()
            .unwrap_or(self.text.len())
    }

    fn line_state(&self, line: usize) -> i32 {
        self.line_states.get(line).copied().unwrap_or(0)
    }

    fn set_line_state(&mut self, line: usize, state: i32) {
        if let Some(slot) = self.line_states.get_mut(line) {
            *slot = state;
        }
    }

    fn level_at(&self, line: usize) -> i32 {
        self.levels
            .get(line)
            .copied()
            .unwrap_or_else(|| FoldLevel::default().pack())
    }

    fn set_level(&mut self, line: usize, level: i32) {
        if let Some(slot) = self.levels.get_mut(line) {
            *slot = level;
        }
    }
}

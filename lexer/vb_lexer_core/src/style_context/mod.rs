//! Byte-at-a-time scan cursor that colours the document as it goes.
//!
//! The context keeps the current byte plus one byte of lookbehind and
//! lookahead, the current lexical state, and the start of the pending
//! segment. Changing state with [`StyleContext::set_state`] colours the
//! pending segment `[segment_start, pos)` with the old state; changing it
//! with [`StyleContext::change_state`] only relabels the pending segment.
//!
//! # Line ends
//!
//! `at_line_end` is true on the last byte of a line (the `\n`, or the `\n`
//! of a `\r\n` pair). On the final line of the document, which has no line
//! break, it only becomes true once the scan has run past the range.

use crate::char_class::is_space_char;
use crate::{LexAccessor, Style};

/// Longest identifier prefix kept by [`StyleContext::current_lowered`].
pub const MAX_WORD_LEN: usize = 63;

/// Scan position over `[start, end)` of a [`LexAccessor`].
pub struct StyleContext<'a, A: LexAccessor + ?Sized> {
    acc: &'a mut A,
    end_pos: usize,
    last_line: usize,
    line_start_next: usize,
    segment_start: usize,
    pub pos: usize,
    pub current_line: usize,
    pub state: Style,
    pub at_line_start: bool,
    pub at_line_end: bool,
    pub ch_prev: u8,
    pub ch: u8,
    pub ch_next: u8,
}

impl<'a, A: LexAccessor + ?Sized> StyleContext<'a, A> {
    /// Start scanning `len` bytes from `start` in lexical state `init_style`.
    pub fn new(acc: &'a mut A, start: usize, len: usize, init_style: Style) -> Self {
        let end_pos = start.saturating_add(len).min(acc.len());
        let current_line = acc.line_of(start);
        let last_line = acc.line_of(acc.len());
        let line_start_next = acc.line_start(current_line + 1);
        let at_line_start = acc.line_start(current_line) == start;
        let ch_prev = if start > 0 { acc.char_at(start - 1) } else { 0 };
        let ch = acc.char_at(start);
        let ch_next = acc.char_at(start + 1);
        let mut sc = Self {
            acc,
            end_pos,
            last_line,
            line_start_next,
            segment_start: start,
            pos: start,
            current_line,
            state: init_style,
            at_line_start,
            at_line_end: false,
            ch_prev,
            ch,
            ch_next,
        };
        sc.at_line_end = sc.compute_line_end();
        sc
    }

    fn compute_line_end(&self) -> bool {
        if self.current_line < self.last_line {
            self.pos + 1 >= self.line_start_next
        } else {
            self.pos >= self.line_start_next
        }
    }

    /// Whether the scan has bytes left in its range.
    #[inline]
    pub fn more(&self) -> bool {
        self.pos < self.end_pos
    }

    /// End of the scan range (exclusive).
    #[inline]
    pub fn end_pos(&self) -> usize {
        self.end_pos
    }

    pub fn forward(&mut self) {
        if self.pos < self.end_pos {
            self.at_line_start = self.at_line_end;
            if self.at_line_start {
                self.current_line += 1;
                self.line_start_next = self.acc.line_start(self.current_line + 1);
            }
            self.ch_prev = self.ch;
            self.pos += 1;
            self.ch = self.ch_next;
            self.ch_next = self.acc.char_at(self.pos + 1);
            self.at_line_end = self.compute_line_end();
        } else {
            self.at_line_start = false;
            self.ch_prev = b' ';
            self.ch = b' ';
            self.ch_next = b' ';
            self.at_line_end = true;
        }
    }

    /// Colour the pending segment with the current state, then switch.
    pub fn set_state(&mut self, state: Style) {
        let end = self.pos.min(self.end_pos);
        if end > self.segment_start {
            self.acc.set_styles(self.segment_start..end, self.state);
        }
        self.segment_start = end;
        self.state = state;
    }

    /// Relabel the pending segment without colouring it.
    #[inline]
    pub fn change_state(&mut self, state: Style) {
        self.state = state;
    }

    pub fn forward_set_state(&mut self, state: Style) {
        self.forward();
        self.set_state(state);
    }

    /// Colour whatever is pending up to the end of the range.
    pub fn complete(&mut self) {
        if self.end_pos > self.segment_start {
            self.acc
                .set_styles(self.segment_start..self.end_pos, self.state);
        }
        self.segment_start = self.end_pos;
    }

    /// Bytes in the pending segment.
    #[inline]
    pub fn length_current(&self) -> usize {
        self.pos - self.segment_start
    }

    /// The pending segment lowercased into `buf`, truncated to
    /// [`MAX_WORD_LEN`] bytes.
    pub fn current_lowered<'b>(&self, buf: &'b mut [u8; MAX_WORD_LEN + 1]) -> &'b [u8] {
        let len = self.length_current().min(MAX_WORD_LEN);
        for (i, slot) in buf.iter_mut().take(len).enumerate() {
            *slot = self.acc.char_at(self.segment_start + i).to_ascii_lowercase();
        }
        &buf[..len]
    }

    /// Byte `offset` positions from the current one.
    #[inline]
    pub fn relative(&self, offset: usize) -> u8 {
        self.acc.char_at(self.pos + offset)
    }

    #[inline]
    pub fn matches(&self, ch: u8, ch_next: u8) -> bool {
        self.ch == ch && self.ch_next == ch_next
    }

    /// Next non-space byte on the current line, or `0` if the rest of the
    /// line is blank. Starts at the current byte unless `ignore_current`.
    pub fn line_next_char(&self, ignore_current: bool) -> u8 {
        if !ignore_current && !is_space_char(self.ch) {
            return self.ch;
        }
        (self.pos + 1..self.line_start_next)
            .map(|pos| self.acc.char_at(pos))
            .find(|&ch| !is_space_char(ch))
            .unwrap_or(0)
    }

    pub fn set_line_state(&mut self, line: usize, state: i32) {
        self.acc.set_line_state(line, state);
    }

    pub fn line_state(&self, line: usize) -> i32 {
        self.acc.line_state(line)
    }
}

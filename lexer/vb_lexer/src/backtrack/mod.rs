//! Finding a safe place to resume tokenizing.
//!
//! A scan may start anywhere the host asks, but some context lives outside
//! the requested range: an interpolated-string expression may have opened
//! several lines earlier, and a few classification rules look at the last
//! significant byte before the range. These helpers recover both from the
//! styles and line states already stored in the document.

use tracing::trace;
use vb_lexer_core::char_class::is_space_char;
use vb_lexer_core::{LexAccessor, LineState, Style};

/// Where a scan actually starts after backtracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResumePoint {
    pub start: usize,
    pub len: usize,
    pub init_style: Style,
}

/// Move `start` back to the first line of a run of lines that end inside an
/// interpolated-string expression, so the nesting stack can be rebuilt.
///
/// Returns the range unchanged when the previous line is not inside such
/// an expression.
pub fn backtrack_to_start<A: LexAccessor + ?Sized>(
    acc: &A,
    start: usize,
    len: usize,
    init_style: Style,
) -> ResumePoint {
    let unchanged = ResumePoint {
        start,
        len,
        init_style,
    };
    let current_line = acc.line_of(start);
    if current_line == 0 {
        return unchanged;
    }

    let mut line = current_line - 1;
    let mut state = LineState::decode(acc.line_state(line));
    while state.in_interpolation() && line != 0 {
        line -= 1;
        state = LineState::decode(acc.line_state(line));
    }
    if !state.in_interpolation() {
        line += 1;
    }
    if line == current_line {
        return unchanged;
    }

    let end = start + len;
    let new_start = acc.line_start(line);
    let init_style = if new_start == 0 {
        Style::Default
    } else {
        acc.style_at(new_start - 1)
    };
    trace!(
        from_line = current_line,
        to_line = line,
        "resuming at start of interpolated expression"
    );
    ResumePoint {
        start: new_start,
        len: end - new_start,
        init_style,
    }
}

/// The last non-space byte before `start` whose style is above
/// `max_space_style`, with that style. Returns `(0, Style::Default)` if
/// there is none.
pub fn lookback_non_white<A: LexAccessor + ?Sized>(
    acc: &A,
    start: usize,
    max_space_style: Style,
) -> (u8, Style) {
    (0..start)
        .rev()
        .map(|pos| (acc.char_at(pos), acc.style_at(pos)))
        .find(|&(ch, style)| style as u8 > max_space_style as u8 && !is_space_char(ch))
        .unwrap_or((0, Style::Default))
}

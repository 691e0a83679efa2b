//! `Property` lookahead for the folder.
//!
//! After a statement-level `Property` keyword the folder needs to know
//! whether the declaration opens a block. The rest of the line is inspected
//! using the styles the tokenizer already assigned.

use vb_lexer_core::char_class::is_space_char;
use vb_lexer_core::{LexAccessor, Style};

/// Shape of a `Property` declaration as seen from its first line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyForm {
    /// `Property Name As Integer`: an auto-property, no block.
    NotABlock,
    /// A parameter list follows; the `Get`/`Set` accessors come on later lines.
    BlockNoAccessorYet,
    /// `Property Get Name()`: the accessor keyword is on this line (VB6 form).
    BlockWithAccessor,
}

impl PropertyForm {
    /// The declaration opens a fold level.
    #[inline]
    pub const fn opens_block(self) -> bool {
        !matches!(self, Self::NotABlock)
    }

    /// Later `Get`/`Set` lines open their own levels.
    #[inline]
    pub const fn expects_accessors(self) -> bool {
        matches!(self, Self::BlockNoAccessorYet)
    }
}

/// Classify the property declared on `line`, scanning from `start` (just
/// past the `Property` keyword) up to the line's last byte.
///
/// An operator `(` means a block; a keyword `Get`/`Let`/`Set` before any
/// other visible byte means a VB6 accessor block. Anything else is a
/// single-line auto-property.
pub fn classify_property<A: LexAccessor + ?Sized>(
    acc: &A,
    line: usize,
    start: usize,
) -> PropertyForm {
    let end = acc.line_start(line + 1).saturating_sub(1);
    let mut visible = false;
    for pos in start..end {
        let ch = acc.char_at(pos).to_ascii_lowercase();
        let style = acc.style_at(pos);
        if style == Style::Operator && ch == b'(' {
            return PropertyForm::BlockNoAccessorYet;
        }
        if style == Style::Keyword
            && !visible
            && matches!(ch, b'g' | b'l' | b's')
            && acc.char_at(pos + 1).to_ascii_lowercase() == b'e'
            && acc.char_at(pos + 2).to_ascii_lowercase() == b't'
            && is_space_char(acc.char_at(pos + 3))
        {
            return PropertyForm::BlockWithAccessor;
        }
        if ch > b' ' {
            visible = true;
        }
    }
    PropertyForm::NotABlock
}

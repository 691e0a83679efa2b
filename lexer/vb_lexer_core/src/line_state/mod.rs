//! Per-line state persisted by the host between scans.
//!
//! The host stores one `i32` per line. The bit layout is shared by the
//! tokenizer (which writes it) and the folder and resume logic (which read
//! it), so it must stay exactly as below:
//!
//! ```text
//! bits  0..3   line type tag (0 none, 1 comment, 2 dim, 3 const, 4 VB6 type)
//! bit   3      line ends in a line continuation
//! bit   4      line ends inside an interpolated-string expression
//! bits 16..32  signed paren nesting depth carried into the next line
//! ```
//!
//! All logic works on the decoded [`LineState`] record; only the host
//! boundary sees the packed integer.

use bitflags::bitflags;

const LINE_TYPE_MASK: i32 = 0b111;
const FLAGS_MASK: i32 = 0b1_1000;
const PAREN_SHIFT: u32 = 16;

/// Statement kind of a line, used to group runs of similar lines for folding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LineType {
    #[default]
    None = 0,
    /// Line starting with a `'` comment. `Rem` lines are not marked.
    Comment = 1,
    Dim = 2,
    Const = 3,
    /// `Type` block opener (VB6 user-defined type).
    Vb6Type = 4,
}

impl LineType {
    fn from_bits(bits: i32) -> Self {
        match bits & LINE_TYPE_MASK {
            1 => LineType::Comment,
            2 => LineType::Dim,
            3 => LineType::Const,
            4 => LineType::Vb6Type,
            _ => LineType::None,
        }
    }

    /// Key used to group consecutive lines into one fold block.
    ///
    /// Only the low two bits take part, so `Vb6Type` lines never group.
    pub const fn fold_group(self) -> u8 {
        (self as u8) & 0b11
    }
}

bitflags! {
    /// Boolean facts about how a line ends.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LineFlags: u8 {
        /// The line ends with a ` _` continuation.
        const CONTINUATION = 1 << 3;
        /// The line ends while an interpolated-string expression is open.
        const INTERPOLATION = 1 << 4;
    }
}

/// Decoded form of the persisted per-line integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LineState {
    pub line_type: LineType,
    pub flags: LineFlags,
    /// Open `(` plus open interpolation `{` at the end of the line.
    pub paren_depth: i32,
}

impl LineState {
    pub fn decode(raw: i32) -> Self {
        // The mask keeps the value within bits 3..=4.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let flags = LineFlags::from_bits_truncate((raw & FLAGS_MASK) as u8);
        Self {
            line_type: LineType::from_bits(raw),
            flags,
            paren_depth: raw >> PAREN_SHIFT,
        }
    }

    pub fn encode(self) -> i32 {
        i32::from(self.line_type as u8)
            | i32::from(self.flags.bits())
            | (self.paren_depth << PAREN_SHIFT)
    }

    #[inline]
    pub fn continues(self) -> bool {
        self.flags.contains(LineFlags::CONTINUATION)
    }

    #[inline]
    pub fn in_interpolation(self) -> bool {
        self.flags.contains(LineFlags::INTERPOLATION)
    }
}

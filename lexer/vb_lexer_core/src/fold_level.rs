//! Packed per-line fold levels.
//!
//! ```text
//! bits  0..12  level at the start of the line
//! bit  13      header flag (the line opens a new level)
//! bits 16..32  level at the end of the line
//! ```
//!
//! Levels are offset by [`FoldLevel::BASE`] so that a clamped document
//! never reports a level below it.

/// Fold information for one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FoldLevel {
    pub start: i32,
    pub end: i32,
}

impl FoldLevel {
    pub const BASE: i32 = 0x400;
    pub const HEADER_FLAG: i32 = 0x2000;
    pub const NUMBER_MASK: i32 = 0x0fff;

    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// A line whose nesting grows opens a foldable block.
    #[inline]
    pub const fn is_header(self) -> bool {
        self.start < self.end
    }

    pub const fn pack(self) -> i32 {
        let mut lev = (self.start & Self::NUMBER_MASK) | (self.end << 16);
        if self.is_header() {
            lev |= Self::HEADER_FLAG;
        }
        lev
    }

    pub const fn unpack(raw: i32) -> Self {
        Self {
            start: raw & Self::NUMBER_MASK,
            end: raw >> 16,
        }
    }

    /// Nesting depth at the start of the line, relative to [`Self::BASE`].
    pub const fn depth(self) -> i32 {
        self.start - Self::BASE
    }
}

impl Default for FoldLevel {
    fn default() -> Self {
        Self::new(Self::BASE, Self::BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_flag_set_only_when_level_grows() {
        let open = FoldLevel::new(FoldLevel::BASE, FoldLevel::BASE + 1).pack();
        assert_ne!(open & FoldLevel::HEADER_FLAG, 0);
        let close = FoldLevel::new(FoldLevel::BASE + 1, FoldLevel::BASE).pack();
        assert_eq!(close & FoldLevel::HEADER_FLAG, 0);
    }

    #[test]
    fn end_level_lives_in_high_half() {
        let raw = FoldLevel::new(FoldLevel::BASE, FoldLevel::BASE + 2).pack();
        assert_eq!(raw >> 16, FoldLevel::BASE + 2);
        assert_eq!(FoldLevel::unpack(raw), FoldLevel::new(0x400, 0x402));
    }

    #[test]
    fn default_is_base() {
        assert_eq!(FoldLevel::default().depth(), 0);
        assert!(!FoldLevel::default().is_header());
    }
}

//! Byte classifiers used by the tokenizer and folder.
//!
//! All predicates work on raw bytes. Bytes `>= 0x80` (UTF-8 lead and
//! continuation bytes) count as identifier characters so that non-ASCII
//! names stay in one identifier span.

use crate::Style;

#[inline]
pub const fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub const fn is_hex_digit(ch: u8) -> bool {
    ch.is_ascii_hexdigit()
}

#[inline]
pub const fn is_alpha(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

/// Space, tab, and the line-break family (`\t` through `\r`).
#[inline]
pub const fn is_space_char(ch: u8) -> bool {
    matches!(ch, b' ' | 0x09..=0x0d)
}

/// Printable, non-space ASCII.
#[inline]
pub const fn is_graphic(ch: u8) -> bool {
    ch > 0x20 && ch < 0x7f
}

#[inline]
pub const fn is_identifier_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

#[inline]
pub const fn is_identifier_char_ex(ch: u8) -> bool {
    is_identifier_char(ch) || ch >= 0x80
}

#[inline]
pub const fn is_identifier_start_ex(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch >= 0x80
}

/// A digit, or `.` directly followed by a digit.
#[inline]
pub const fn is_number_start(ch: u8, ch_next: u8) -> bool {
    is_digit(ch) || (ch == b'.' && is_digit(ch_next))
}

/// Type characters that may close an identifier outside VBScript.
///
/// `%` Integer, `&` Long, `^` LongLong, `@` Decimal/Currency, `!` Single,
/// `#` Double, `$` String.
#[inline]
pub const fn is_type_character(ch: u8) -> bool {
    matches!(ch, b'%' | b'&' | b'^' | b'@' | b'!' | b'#' | b'$')
}

/// Radix letter after `&` in `&H1F`, `&O17`, `&B101`.
#[inline]
pub const fn is_number_prefix(ch: u8) -> bool {
    matches!(ch, b'h' | b'H' | b'o' | b'O' | b'b' | b'B')
}

/// Whether `ch` continues a numeric literal whose previous byte is `ch_prev`.
pub const fn is_vb_number(ch: u8, ch_prev: u8) -> bool {
    is_hex_digit(ch)
        || ch == b'_'
        || (ch == b'.' && ch_prev != b'.')
        || ((ch == b'+' || ch == b'-') && (ch_prev == b'E' || ch_prev == b'e'))
        || (matches!(ch, b'S' | b'I' | b'L' | b's' | b'i' | b'l')
            && (is_digit(ch_prev) || ch_prev == b'U' || ch_prev == b'u'))
        || (matches!(ch, b'R' | b'r' | b'%' | b'@' | b'!' | b'#') && is_digit(ch_prev))
        || (ch == b'&' && is_hex_digit(ch_prev))
}

/// An `&` after this context is string concatenation rather than the start
/// of a `&H`/`&O`/`&B` literal.
pub const fn prefer_string_concat(ch_prev_non_white: u8, style_prev_non_white: Style) -> bool {
    ch_prev_non_white == b'"'
        || ch_prev_non_white == b')'
        || ch_prev_non_white == b']'
        || (!matches!(style_prev_non_white, Style::Keyword)
            && is_identifier_char(ch_prev_non_white))
}

/// Ends a composite-format specifier; anything else is valid custom format text.
#[inline]
pub const fn is_invalid_format_specifier(ch: u8) -> bool {
    ch < b' ' || ch == b'"' || ch == b'{' || ch == b'}'
}

#[cfg(test)]
mod tests;

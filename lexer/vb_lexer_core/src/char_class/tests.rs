use super::*;

// === Identifiers ===

#[test]
fn identifier_start_accepts_letters_underscore_and_utf8() {
    assert!(is_identifier_start_ex(b'a'));
    assert!(is_identifier_start_ex(b'Z'));
    assert!(is_identifier_start_ex(b'_'));
    assert!(is_identifier_start_ex(0xc3));
    assert!(!is_identifier_start_ex(b'1'));
    assert!(!is_identifier_start_ex(b'['));
}

#[test]
fn identifier_char_excludes_punctuation() {
    assert!(is_identifier_char(b'9'));
    assert!(!is_identifier_char(b'$'));
    assert!(!is_identifier_char(0xc3));
    assert!(is_identifier_char_ex(0xc3));
}

// === Numbers ===

#[test]
fn number_start_requires_digit_after_dot() {
    assert!(is_number_start(b'1', b' '));
    assert!(is_number_start(b'.', b'5'));
    assert!(!is_number_start(b'.', b'x'));
}

#[test]
fn number_continuation_rules() {
    assert!(is_vb_number(b'F', b'1'));
    assert!(is_vb_number(b'_', b'1'));
    assert!(is_vb_number(b'.', b'1'));
    assert!(!is_vb_number(b'.', b'.'));
    assert!(is_vb_number(b'-', b'E'));
    assert!(!is_vb_number(b'-', b'1'));
    assert!(is_vb_number(b'L', b'0'));
    assert!(is_vb_number(b'S', b'U'));
    assert!(!is_vb_number(b'S', b'x'));
    assert!(is_vb_number(b'R', b'2'));
    assert!(is_vb_number(b'&', b'F'));
    assert!(!is_vb_number(b' ', b'1'));
}

#[test]
fn type_characters_and_prefixes() {
    for ch in *b"%&^@!#$" {
        assert!(is_type_character(ch), "{}", ch as char);
    }
    assert!(!is_type_character(b'*'));
    assert!(is_number_prefix(b'h'));
    assert!(is_number_prefix(b'B'));
    assert!(!is_number_prefix(b'x'));
}

// === Context ===

#[test]
fn string_concat_is_preferred_after_operands() {
    assert!(prefer_string_concat(b'"', Style::String));
    assert!(prefer_string_concat(b')', Style::Operator));
    assert!(prefer_string_concat(b']', Style::Identifier));
    assert!(prefer_string_concat(b'a', Style::Identifier));
    assert!(!prefer_string_concat(b'n', Style::Keyword));
    assert!(!prefer_string_concat(b'=', Style::Operator));
    assert!(!prefer_string_concat(0, Style::Default));
}

#[test]
fn format_specifier_terminators() {
    assert!(is_invalid_format_specifier(b'}'));
    assert!(is_invalid_format_specifier(b'"'));
    assert!(is_invalid_format_specifier(b'\n'));
    assert!(!is_invalid_format_specifier(b':'));
    assert!(!is_invalid_format_specifier(b'#'));
}

#[test]
fn space_and_graphic() {
    assert!(is_space_char(b'\r'));
    assert!(is_space_char(b'\t'));
    assert!(!is_space_char(0));
    assert!(is_graphic(b'('));
    assert!(!is_graphic(b' '));
    assert!(!is_graphic(0x7f));
}

//! Built-in seven-segment font
//!
//! Only a few characters make sense on seven segments: the digits, the
//! letters `A b c d E F H L P` (both cases), lowercase `n o`, `,`, `.`, `-`,
//! `_` and space. Control codes 0x00-0x0f alias the hexadecimal digits,
//! everything else renders blank.

//           A
//          ===
//      F ||   || B
//          =G=
//      E ||   || C
//          ===  o DP
//           D

/// Decimal point segment
pub const DOT: u8 = 0b1000_0000;

/// No segments lit
pub const BLANK: u8 = 0b0000_0000;

/// Segment patterns indexed by character code.
///
/// Codes 0-15 hold the hexadecimal digits so `send_digit` can index the
/// same table as `send_char`.
static GLYPHS: [u8; 128] = [
    //.GFE_DCBA
    0b0011_1111, 0b0000_0110, 0b0101_1011, 0b0100_1111, // 0 1 2 3
    0b0110_0110, 0b0110_1101, 0b0111_1101, 0b0000_0111, // 4 5 6 7
    0b0111_1111, 0b0110_1111, 0b0111_0111, 0b0111_1100, // 8 9 A b
    0b0101_1000, 0b0101_1110, 0b0111_1001, 0b0111_0001, // c d E F
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, // ' ' at 32
    0, 0, 0, 0,
    0b1000_0000, // ,
    0b0100_0000, // -
    0b1000_0000, // .
    0,
    0b0011_1111, 0b0000_0110, 0b0101_1011, 0b0100_1111, // '0'..'3'
    0b0110_0110, 0b0110_1101, 0b0111_1101, 0b0000_0111, // '4'..'7'
    0b0111_1111, 0b0110_1111, // '8' '9'
    0, 0, 0, 0, 0, 0,
    0,
    0b0111_0111, 0b0111_1100, 0b0101_1000, 0b0101_1110, // A B C D
    0b0111_1001, 0b0111_0001, // E F
    0,
    0b0111_0110, // H
    0, 0, 0,
    0b0011_1000, // L
    0, 0, 0,
    0b0111_0011, // P
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0,
    0b0000_1000, // _
    0,
    0b0111_0111, 0b0111_1100, 0b0101_1000, 0b0101_1110, // a b c d
    0b0111_1001, 0b0111_0001, // e f
    0,
    0b0111_0110, // h
    0, 0, 0,
    0b0011_1000, // l
    0,
    0b0101_0100, // n
    0b0101_1100, // o
    0b0111_0011, // p
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0,
];

/// Segment pattern for a character. Non-ASCII characters render as space.
pub fn char_glyph(c: char) -> u8 {
    let code = if c.is_ascii() { c as u8 } else { b' ' };
    GLYPHS[usize::from(code)]
}

/// Segment pattern for a hexadecimal digit value, `None` above 15.
pub fn digit_glyph(value: u8) -> Option<u8> {
    if value > 0x0f {
        return None;
    }
    Some(GLYPHS[usize::from(value)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_digits_match_hex_digits() {
        for (i, c) in ('0'..='9').enumerate() {
            assert_eq!(Some(char_glyph(c)), digit_glyph(i as u8));
        }
    }

    #[test]
    fn test_hex_letters() {
        assert_eq!(digit_glyph(0x0a), Some(char_glyph('A')));
        assert_eq!(digit_glyph(0x0b), Some(char_glyph('b')));
        assert_eq!(digit_glyph(0x0c), Some(char_glyph('c')));
        assert_eq!(digit_glyph(0x0d), Some(char_glyph('d')));
        assert_eq!(digit_glyph(0x0e), Some(char_glyph('E')));
        assert_eq!(digit_glyph(0x0f), Some(char_glyph('F')));
    }

    #[test]
    fn test_digit_out_of_range() {
        assert_eq!(digit_glyph(16), None);
        assert_eq!(digit_glyph(0xff), None);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(char_glyph(' '), BLANK);
        assert_eq!(char_glyph('.'), DOT);
        assert_eq!(char_glyph('-'), 0b0100_0000);
        assert_eq!(char_glyph('_'), 0b0000_1000);
        assert_eq!(char_glyph('H'), char_glyph('h'));
        assert_eq!(char_glyph('n'), 0b0101_0100);
        assert_eq!(char_glyph('o'), 0b0101_1100);
    }

    #[test]
    fn test_unsupported_is_blank() {
        assert_eq!(char_glyph('X'), BLANK);
        assert_eq!(char_glyph('~'), BLANK);
        assert_eq!(char_glyph('N'), BLANK);
        assert_eq!(char_glyph('O'), BLANK);
        assert_eq!(char_glyph('\u{10}'), BLANK);
    }

    #[test]
    fn test_control_codes_alias_hex_digits() {
        assert_eq!(char_glyph('\0'), char_glyph('0'));
        assert_eq!(Some(char_glyph('\u{1}')), digit_glyph(1));
        for code in 0..16u8 {
            assert_eq!(Some(char_glyph(char::from(code))), digit_glyph(code));
        }
    }

    #[test]
    fn test_non_ascii_is_space() {
        assert_eq!(char_glyph('é'), char_glyph(' '));
        assert_eq!(char_glyph('\u{80}'), BLANK);
    }
}

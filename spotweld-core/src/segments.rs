//! Seven-segment encoding
//!
//! Bit 0 is segment a through bit 6 for segment g. Patterns are logical
//! ("1" means lit); the multiplexer applies the display polarity.

use crate::config::CHASE_SEGMENTS;

pub const SEGMENT_MASK: u8 = 0b0111_1111;

pub const DIGITS: [u8; 10] = [
    0b0111111, // 0
    0b0000110, // 1
    0b1011011, // 2
    0b1001111, // 3
    0b1100110, // 4
    0b1101101, // 5
    0b1111101, // 6
    0b0000111, // 7
    0b1111111, // 8
    0b1101111, // 9
];

pub const BLANK: u8 = 0;
/// Lower-case "t", the setup menu prefix
pub const GLYPH_T: u8 = 0b1111000;
/// Centre bar, shown on both digits in manual mode
pub const GLYPH_DASH: u8 = 0b1000000;

/// Pattern for a single decimal digit, blank if `digit` is not 0..=9
pub fn encode_digit(digit: u8) -> u8 {
    DIGITS.get(digit as usize).copied().unwrap_or(BLANK)
}

/// Patterns for the tens and units digits of `value`, clamped to 99
pub fn encode_two_digit(value: u8) -> (u8, u8) {
    let value = value.min(99);
    (DIGITS[(value / 10) as usize], DIGITS[(value % 10) as usize])
}

pub fn decode_digit(pattern: u8) -> Option<u8> {
    let pattern = pattern & SEGMENT_MASK;
    DIGITS.iter().position(|&p| p == pattern).map(|d| d as u8)
}

pub fn decode_two_digit(tens: u8, units: u8) -> Option<u8> {
    Some(decode_digit(tens)? * 10 + decode_digit(units)?)
}

/// Single outer segment for step `offset` of the chase animation
pub fn chase_frame(offset: u8) -> u8 {
    1 << (offset % CHASE_SEGMENTS)
}

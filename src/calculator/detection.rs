//! Character classification for the expression buffer.
//!
//! Decides which characters may enter the buffer and locates the number
//! currently being typed (the segment after the last operator).

use lazy_static::lazy_static;
use regex::Regex;

/// The four binary operators, in ASCII form.
pub const OPERATORS: &[char] = &['+', '-', '*', '/'];

lazy_static! {
    /// Matches the first character that may not appear in an expression.
    /// Allows: digits, the decimal point and the four operators.
    static ref DISALLOWED_CHAR: Regex = Regex::new(r"[^0-9\.\+\-\*/]").unwrap();
}

/// Check if a character may be appended to the buffer.
pub fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || is_operator(c)
}

/// Check if a character is one of the four binary operators.
pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// Find the first disallowed character in `input`.
///
/// Returns the character and its position counted in characters, not bytes.
pub fn find_invalid(input: &str) -> Option<(usize, char)> {
    let found = DISALLOWED_CHAR.find(input)?;
    let ch = found.as_str().chars().next()?;
    Some((input[..found.start()].chars().count(), ch))
}

/// The substring after the last operator: the number currently being typed.
pub fn current_segment(buffer: &str) -> &str {
    // Operators are ASCII, so the byte after one is always a char boundary.
    match buffer.rfind(is_operator) {
        Some(idx) => &buffer[idx + 1..],
        None => buffer,
    }
}

/// Check if the number currently being typed already has a decimal point.
pub fn segment_has_decimal(buffer: &str) -> bool {
    current_segment(buffer).contains('.')
}

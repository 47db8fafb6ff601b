//! Byte constants and character classes used by the scanner.

pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const SPACE: u8 = b' ';
pub const TAB: u8 = b'\t';
pub const DOUBLE_QUOTE: u8 = b'"';
pub const CLOSE_BRACE: u8 = b'}';
pub const DOT: u8 = b'.';
pub const EQUALS: u8 = b'=';
pub const LESS_THAN: u8 = b'<';
pub const GREATER_THAN: u8 = b'>';

/// Starts a comment running to the end of the line.
pub const LINE_COMMENT_MARKER: &[u8] = b"MillenniumEye:";
/// Opens a comment that runs to the next `}`.
pub const BLOCK_COMMENT_OPEN: &[u8] = b"ShadowRealm{";
/// The include directive, scanned as a single keyword token.
pub const SET_FIELD_DIRECTIVE: &[u8] = b"#SetField";

#[inline]
pub fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

#[inline]
pub fn is_identifier_part(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

use crate::token_kind::TokenKind;
use std::fmt;

/// A scanned token. The lexeme borrows from the source text.
///
/// For string literals the lexeme is the contents without the quotes.
/// The end-of-stream token has an empty lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    /// 1-based source line.
    pub line: u32,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'src str, line: u32) -> Self {
        Self { kind, lexeme, line }
    }

    /// An end-of-stream token on `line`.
    #[inline]
    pub fn eof(line: u32) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {} [{}]", self.line, self.kind, self.lexeme)
    }
}

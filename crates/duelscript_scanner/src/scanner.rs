//! The DuelScript scanner.
//!
//! Works over the UTF-8 bytes of the source. Every construct the language
//! recognizes is ASCII, so the cursor only ever stops on char boundaries and
//! lexemes can be sliced straight out of the source text.

use duelscript_ast::{Token, TokenKind};
use duelscript_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use memchr::{memchr, memchr_iter};

use crate::char_codes::*;

/// Scan `source` to completion.
///
/// Returns the token stream (always ending with exactly one end-of-stream
/// token) and the diagnostics reported along the way.
pub fn scan(source: &str) -> (Vec<Token<'_>>, DiagnosticCollection) {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    (tokens, scanner.take_diagnostics())
}

/// The scanner converts DuelScript source text into tokens.
pub struct Scanner<'src> {
    /// The source text being scanned.
    source: &'src str,
    /// The source as bytes.
    bytes: &'src [u8],
    /// Current byte position.
    pos: usize,
    /// Byte position where the current token started.
    token_start: usize,
    /// Current 1-based line.
    line: u32,
    diagnostics: DiagnosticCollection,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            token_start: 0,
            line: 1,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current byte position in the source.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Current 1-based line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Diagnostics reported so far.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        self.diagnostics.take()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn starts_with(&self, marker: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(marker)
    }

    fn count_lines(&mut self, text: &[u8]) {
        self.line += memchr_iter(LINE_FEED, text).count() as u32;
    }

    // ========================================================================
    // Main scan
    // ========================================================================

    /// Scan every remaining token, including the trailing end-of-stream token.
    pub fn scan_tokens(&mut self) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan();
            tokens.push(token);
            if token.is_eof() {
                return tokens;
            }
        }
    }

    /// Scan the next token, skipping whitespace and comments.
    /// Returns an end-of-stream token once the input is exhausted.
    pub fn scan(&mut self) -> Token<'src> {
        while !self.is_eof() {
            if let Some(token) = self.scan_token() {
                return token;
            }
        }
        Token::eof(self.line)
    }

    /// Scan from the current position. Returns `None` when the consumed
    /// input produced no token (trivia, comments, or a reported error).
    fn scan_token(&mut self) -> Option<Token<'src>> {
        self.token_start = self.pos;

        // Multi-character prefixes win over single-character dispatch.
        if self.starts_with(LINE_COMMENT_MARKER) {
            self.skip_line_comment();
            return None;
        }
        if self.starts_with(BLOCK_COMMENT_OPEN) {
            self.skip_block_comment();
            return None;
        }
        if self.starts_with(SET_FIELD_DIRECTIVE) {
            self.pos += SET_FIELD_DIRECTIVE.len();
            return Some(self.make_token(TokenKind::KeywordSetField));
        }

        let ch = self.bytes[self.pos];
        let kind = match ch {
            b'(' => { self.pos += 1; TokenKind::LeftParen }
            b')' => { self.pos += 1; TokenKind::RightParen }
            b'{' => { self.pos += 1; TokenKind::LeftBrace }
            b'}' => { self.pos += 1; TokenKind::RightBrace }
            b',' => { self.pos += 1; TokenKind::Comma }
            b'.' => { self.pos += 1; TokenKind::Dot }
            b'-' => { self.pos += 1; TokenKind::Minus }
            b'+' => { self.pos += 1; TokenKind::Plus }
            b';' => { self.pos += 1; TokenKind::Semicolon }
            b'*' => { self.pos += 1; TokenKind::Star }
            b'/' => { self.pos += 1; TokenKind::Slash }

            b'!' => self.scan_with_equals(TokenKind::Bang, TokenKind::BangEqual),
            b'=' => self.scan_with_equals(TokenKind::Equal, TokenKind::EqualEqual),
            b'<' => self.scan_less_than(),
            b'>' => self.scan_greater_than(),

            SPACE | TAB | CARRIAGE_RETURN => {
                self.pos += 1;
                return None;
            }
            LINE_FEED => {
                self.pos += 1;
                self.line += 1;
                return None;
            }

            DOUBLE_QUOTE => return self.scan_string(),

            b'0'..=b'9' => self.scan_number(),

            _ if is_identifier_start(ch) => self.scan_identifier(),

            _ => {
                self.skip_unexpected_character();
                return None;
            }
        };

        Some(self.make_token(kind))
    }

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token::new(kind, &self.source[self.token_start..self.pos], self.line)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn skip_line_comment(&mut self) {
        self.pos += LINE_COMMENT_MARKER.len();
        // Stop before the newline so it still bumps the line counter.
        self.pos = match memchr(LINE_FEED, &self.bytes[self.pos..]) {
            Some(offset) => self.pos + offset,
            None => self.bytes.len(),
        };
    }

    fn skip_block_comment(&mut self) {
        self.pos += BLOCK_COMMENT_OPEN.len();
        let bytes = self.bytes;
        let rest = &bytes[self.pos..];
        match memchr(CLOSE_BRACE, rest) {
            Some(offset) => {
                self.count_lines(&rest[..offset]);
                self.pos += offset + 1;
            }
            None => {
                self.count_lines(rest);
                self.pos = self.bytes.len();
                self.diagnostics.add(Diagnostic::scanner(
                    self.line,
                    &messages::UNTERMINATED_SHADOW_REALM_BLOCK,
                    &[],
                ));
            }
        }
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn scan_with_equals(&mut self, single: TokenKind, with_equals: TokenKind) -> TokenKind {
        if self.char_at(1) == Some(EQUALS) {
            self.pos += 2;
            with_equals
        } else {
            self.pos += 1;
            single
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        if self.char_at(1) == Some(LESS_THAN) {
            self.pos += 2;
            TokenKind::SummonOp
        } else {
            self.scan_with_equals(TokenKind::Less, TokenKind::LessEqual)
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        if self.char_at(1) == Some(GREATER_THAN) {
            self.pos += 2;
            TokenKind::DrawOp
        } else {
            self.scan_with_equals(TokenKind::Greater, TokenKind::GreaterEqual)
        }
    }

    // ========================================================================
    // Literals and identifiers
    // ========================================================================

    /// Scan a string literal. The token's lexeme is the contents without
    /// quotes and its line is the line the closing quote is on.
    fn scan_string(&mut self) -> Option<Token<'src>> {
        let start_line = self.line;
        self.pos += 1;
        let content_start = self.pos;
        let (source, bytes) = (self.source, self.bytes);
        let rest = &bytes[content_start..];

        match memchr(DOUBLE_QUOTE, rest) {
            Some(offset) => {
                self.count_lines(&rest[..offset]);
                let content_end = content_start + offset;
                self.pos = content_end + 1;
                Some(Token::new(
                    TokenKind::String,
                    &source[content_start..content_end],
                    self.line,
                ))
            }
            None => {
                self.count_lines(rest);
                self.pos = self.bytes.len();
                self.diagnostics.add(Diagnostic::scanner(
                    start_line,
                    &messages::UNTERMINATED_STRING,
                    &[],
                ));
                None
            }
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        self.skip_digits();
        // A '.' only belongs to the number when a digit follows it.
        if self.char_at(0) == Some(DOT) && self.char_at(1).is_some_and(is_digit) {
            self.pos += 1;
            self.skip_digits();
        }
        TokenKind::Number
    }

    fn skip_digits(&mut self) {
        while self.char_at(0).is_some_and(is_digit) {
            self.pos += 1;
        }
    }

    fn scan_identifier(&mut self) -> TokenKind {
        self.pos += 1;
        while self.char_at(0).is_some_and(is_identifier_part) {
            self.pos += 1;
        }
        let text = &self.source[self.token_start..self.pos];
        TokenKind::from_keyword(text).unwrap_or(TokenKind::Identifier)
    }

    fn skip_unexpected_character(&mut self) {
        let ch = self.source[self.pos..].chars().next().unwrap_or('\u{FFFD}');
        self.pos += ch.len_utf8();
        let text = ch.to_string();
        self.diagnostics.add(Diagnostic::scanner(
            self.line,
            &messages::UNEXPECTED_CHARACTER_0,
            &[&text],
        ));
    }
}

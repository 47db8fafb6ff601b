//! TokenKind enum and the DuelScript keyword table.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use std::fmt;

/// The reserved name of the program's entry ritual.
pub const MAIN_FUNCTION_NAME: &str = "Yugi";

/// Every kind of token the scanner can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    /// `<<`
    SummonOp,
    /// `>>`
    DrawOp,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    KeywordYugi,
    KeywordLordOfD,
    KeywordToonWorld,
    KeywordRitual,
    KeywordSetField,
    KeywordKaiba,
    KeywordJoey,
    KeywordSummon,
    KeywordDraw,
    KeywordJudgmentOfAnubis,
    KeywordSolemnJudgment,
    KeywordFairyBox,
    KeywordSwordsOfRevealingLight,
    KeywordTribute,

    // Built-in type names
    KeywordDarkMagician,
    KeywordBlueEyesWhiteDragon,
    KeywordRedEyesBlackDragon,
    KeywordTimeWizard,

    KeywordTrue,
    KeywordFalse,

    Eof,
}

lazy_static! {
    /// Identifier text to keyword kind. Built once and shared by every scanner.
    static ref KEYWORDS: FxHashMap<&'static str, TokenKind> = {
        let mut map = FxHashMap::default();
        map.insert("Yugi", TokenKind::KeywordYugi);
        map.insert("LordOfD", TokenKind::KeywordLordOfD);
        map.insert("ToonWorld", TokenKind::KeywordToonWorld);
        map.insert("Ritual", TokenKind::KeywordRitual);
        map.insert("Kaiba", TokenKind::KeywordKaiba);
        map.insert("Joey", TokenKind::KeywordJoey);
        map.insert("Summon", TokenKind::KeywordSummon);
        map.insert("Draw", TokenKind::KeywordDraw);
        map.insert("JudgmentOfAnubis", TokenKind::KeywordJudgmentOfAnubis);
        map.insert("SolemnJudgment", TokenKind::KeywordSolemnJudgment);
        map.insert("FairyBox", TokenKind::KeywordFairyBox);
        map.insert("SwordsOfRevealingLight", TokenKind::KeywordSwordsOfRevealingLight);
        map.insert("Tribute", TokenKind::KeywordTribute);
        map.insert("DarkMagician", TokenKind::KeywordDarkMagician);
        map.insert("BlueEyesWhiteDragon", TokenKind::KeywordBlueEyesWhiteDragon);
        map.insert("RedEyesBlackDragon", TokenKind::KeywordRedEyesBlackDragon);
        map.insert("TimeWizard", TokenKind::KeywordTimeWizard);
        map.insert("true", TokenKind::KeywordTrue);
        map.insert("false", TokenKind::KeywordFalse);
        map
    };
}

impl TokenKind {
    /// Look up an identifier in the keyword table.
    ///
    /// `#SetField` is not in the table: it starts with `#` and is matched
    /// by the scanner before identifier scanning.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS.get(text).copied()
    }

    /// Whether this is one of the built-in type names.
    #[inline]
    pub fn is_builtin_type(self) -> bool {
        matches!(
            self,
            TokenKind::KeywordDarkMagician
                | TokenKind::KeywordBlueEyesWhiteDragon
                | TokenKind::KeywordRedEyesBlackDragon
                | TokenKind::KeywordTimeWizard
        )
    }

    /// Whether a token of this kind can start a type annotation.
    /// User-defined type names are plain identifiers.
    #[inline]
    pub fn is_type_start(self) -> bool {
        self.is_builtin_type() || self == TokenKind::Identifier
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KeywordYugi
                | TokenKind::KeywordLordOfD
                | TokenKind::KeywordToonWorld
                | TokenKind::KeywordRitual
                | TokenKind::KeywordSetField
                | TokenKind::KeywordKaiba
                | TokenKind::KeywordJoey
                | TokenKind::KeywordSummon
                | TokenKind::KeywordDraw
                | TokenKind::KeywordJudgmentOfAnubis
                | TokenKind::KeywordSolemnJudgment
                | TokenKind::KeywordFairyBox
                | TokenKind::KeywordSwordsOfRevealingLight
                | TokenKind::KeywordTribute
                | TokenKind::KeywordTrue
                | TokenKind::KeywordFalse
        ) || self.is_builtin_type()
    }

    /// The fixed source text of punctuation and operator tokens.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            TokenKind::LeftParen => Some("("),
            TokenKind::RightParen => Some(")"),
            TokenKind::LeftBrace => Some("{"),
            TokenKind::RightBrace => Some("}"),
            TokenKind::Comma => Some(","),
            TokenKind::Dot => Some("."),
            TokenKind::Minus => Some("-"),
            TokenKind::Plus => Some("+"),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Slash => Some("/"),
            TokenKind::Star => Some("*"),
            TokenKind::Bang => Some("!"),
            TokenKind::BangEqual => Some("!="),
            TokenKind::Equal => Some("="),
            TokenKind::EqualEqual => Some("=="),
            TokenKind::Greater => Some(">"),
            TokenKind::GreaterEqual => Some(">="),
            TokenKind::Less => Some("<"),
            TokenKind::LessEqual => Some("<="),
            TokenKind::SummonOp => Some("<<"),
            TokenKind::DrawOp => Some(">>"),
            _ => None,
        }
    }

    /// Upper-snake display name used in token dumps.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Slash => "SLASH",
            TokenKind::Star => "STAR",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::SummonOp => "SUMMON_OP (<<)",
            TokenKind::DrawOp => "DRAW_OP (>>)",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::KeywordYugi => "KEYWORD_YUGI",
            TokenKind::KeywordLordOfD => "KEYWORD_LORDOFD",
            TokenKind::KeywordToonWorld => "KEYWORD_TOONWORLD",
            TokenKind::KeywordRitual => "KEYWORD_RITUAL",
            TokenKind::KeywordSetField => "KEYWORD_SETFIELD",
            TokenKind::KeywordKaiba => "KEYWORD_KAIBA",
            TokenKind::KeywordJoey => "KEYWORD_JOEY",
            TokenKind::KeywordSummon => "KEYWORD_SUMMON",
            TokenKind::KeywordDraw => "KEYWORD_DRAW",
            TokenKind::KeywordJudgmentOfAnubis => "KEYWORD_JUDGMENTOFANUBIS",
            TokenKind::KeywordSolemnJudgment => "KEYWORD_SOLEMNJUDGMENT",
            TokenKind::KeywordFairyBox => "KEYWORD_FAIRYBOX",
            TokenKind::KeywordSwordsOfRevealingLight => "KEYWORD_SWORDSOFREVEALINGLIGHT",
            TokenKind::KeywordTribute => "KEYWORD_TRIBUTE",
            TokenKind::KeywordDarkMagician => "KEYWORD_DARKMAGICIAN",
            TokenKind::KeywordBlueEyesWhiteDragon => "KEYWORD_BLUEEYESWHITEDRAGON",
            TokenKind::KeywordRedEyesBlackDragon => "KEYWORD_REDEYESBLACKDRAGON",
            TokenKind::KeywordTimeWizard => "KEYWORD_TIMEWIZARD",
            TokenKind::KeywordTrue => "KEYWORD_TRUE",
            TokenKind::KeywordFalse => "KEYWORD_FALSE",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

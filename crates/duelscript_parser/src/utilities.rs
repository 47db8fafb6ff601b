//! Parser utility functions.

use duelscript_ast::TokenKind;

/// Check if the parser may stop skipping tokens in front of `kind`
/// after a syntax error.
pub fn is_synchronization_point(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KeywordRitual
            | TokenKind::KeywordLordOfD
            | TokenKind::KeywordToonWorld
            | TokenKind::KeywordJudgmentOfAnubis
            | TokenKind::KeywordFairyBox
            | TokenKind::KeywordTribute
            | TokenKind::KeywordSetField
    )
}

/// What a `Ritual` declaration is being parsed as. Only affects messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Method,
}

impl FunctionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionKind::Function => "function",
            FunctionKind::Method => "method",
        }
    }
}

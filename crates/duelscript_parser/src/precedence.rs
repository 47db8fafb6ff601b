//! Operator precedence for binary operators.

use duelscript_ast::TokenKind;

/// Operator precedence levels, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    Equality = 1,
    Comparison = 2,
    Additive = 3,
    Multiplicative = 4,
    Invalid = 255,
}

/// Get the binary operator precedence for a given token kind.
///
/// `<<` and `>>` are not binary operators: `<<` only chains inside a
/// `Summon` statement.
pub fn get_binary_operator_precedence(kind: TokenKind) -> OperatorPrecedence {
    match kind {
        TokenKind::EqualEqual | TokenKind::BangEqual => OperatorPrecedence::Equality,
        TokenKind::Less
        | TokenKind::LessEqual
        | TokenKind::Greater
        | TokenKind::GreaterEqual => OperatorPrecedence::Comparison,
        TokenKind::Plus | TokenKind::Minus => OperatorPrecedence::Additive,
        TokenKind::Star | TokenKind::Slash => OperatorPrecedence::Multiplicative,
        _ => OperatorPrecedence::Invalid,
    }
}

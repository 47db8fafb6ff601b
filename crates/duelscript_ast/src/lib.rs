//! duelscript_ast: Token and Abstract Syntax Tree definitions for DuelScript.
//!
//! Tokens borrow their lexemes from the source text. AST nodes are
//! arena-allocated by the parser and reference their children through
//! `&'a` borrows and `&'a [T]` slices, so a whole tree shares one lifetime.

pub mod node;
pub mod token;
pub mod token_kind;

// Re-export key types
pub use node::*;
pub use token::Token;
pub use token_kind::{TokenKind, MAIN_FUNCTION_NAME};

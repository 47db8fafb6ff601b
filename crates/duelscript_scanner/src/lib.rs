//! duelscript_scanner: Lexer for DuelScript source code.
//!
//! Produces borrowed [`Token`](duelscript_ast::Token)s from source text in a
//! single left-to-right pass. Handles:
//! - `MillenniumEye:` line comments and `ShadowRealm{ ... }` block comments
//! - the `#SetField` directive
//! - string and number literals, identifiers and keywords
//! - the two-character operators `<<`, `>>`, `<=`, `>=`, `!=`, `==`
//!
//! Malformed input is reported through a diagnostic collection and never
//! stops the scan.

mod char_codes;
mod scanner;

pub use scanner::{scan, Scanner};

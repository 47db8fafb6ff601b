//! duelscript_parser: Recursive descent parser for DuelScript.
//!
//! Parses token streams from the scanner into an arena-allocated AST,
//! recovering from syntax errors at statement boundaries.

mod error;
mod parser;
mod precedence;
mod utilities;

pub use error::{ParseError, ParseResult};
pub use parser::Parser;

use bumpalo::Bump;
use duelscript_ast::{Program, Token};
use duelscript_diagnostics::DiagnosticCollection;

/// Everything one front-end run produces.
#[derive(Debug)]
pub struct ParseOutput<'a> {
    pub program: Program<'a>,
    /// The parser's error flag. Scanner diagnostics never set it.
    pub had_error: bool,
    /// Diagnostics in report order; scanner diagnostics come first.
    pub diagnostics: DiagnosticCollection,
}

/// Parse an already scanned token stream.
pub fn parse_tokens<'a>(arena: &'a Bump, tokens: &'a [Token<'a>]) -> ParseOutput<'a> {
    let mut parser = Parser::new(arena, tokens);
    let program = parser.parse_program();
    ParseOutput {
        program,
        had_error: parser.had_error(),
        diagnostics: parser.take_diagnostics(),
    }
}

/// Scan and parse `source`. The token stream is copied into the arena so
/// the returned tree can borrow it.
pub fn parse_source<'a>(arena: &'a Bump, source: &'a str) -> ParseOutput<'a> {
    let (tokens, mut diagnostics) = duelscript_scanner::scan(source);
    let tokens: &'a [Token<'a>] = arena.alloc_slice_copy(&tokens);
    let output = parse_tokens(arena, tokens);
    diagnostics.extend(output.diagnostics);
    ParseOutput {
        program: output.program,
        had_error: output.had_error,
        diagnostics,
    }
}

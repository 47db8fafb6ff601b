use duelscript_diagnostics::Diagnostic;
use thiserror::Error;

/// A statement-fatal syntax error. Aborts the current declaration; the
/// top-level loop records it and resynchronizes.
#[derive(Debug, Error)]
#[error("{diagnostic}")]
pub struct ParseError {
    pub diagnostic: Diagnostic,
}

impl ParseError {
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

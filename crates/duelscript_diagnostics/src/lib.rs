//! duelscript_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! The scanner and the parser never write to an output stream themselves.
//! They accumulate [`Diagnostic`]s in a [`DiagnosticCollection`] which the
//! driver drains and renders once the front end has finished.

use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// The front-end phase that produced a diagnostic. Each phase renders
/// its diagnostics differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Scanner,
    Parser,
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001, 2002).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// Where in the token stream a parser diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The offending token was the end-of-stream marker.
    End,
    /// The offending token's lexeme.
    Lexeme(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::End => write!(f, " at end"),
            Location::Lexeme(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

/// A realized diagnostic with line information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Which phase reported this diagnostic.
    pub stage: Stage,
    /// 1-based source line.
    pub line: u32,
    /// Offending token, for parser diagnostics.
    pub location: Option<Location>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a scanner diagnostic reported at `line`.
    pub fn scanner(line: u32, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            stage: Stage::Scanner,
            line,
            location: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a parser diagnostic pointing at a token.
    pub fn parser(
        line: u32,
        location: Location,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            stage: Stage::Parser,
            line,
            location: Some(location),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Stage::Scanner => write!(f, "Line {}: Error! {}", self.line, self.message_text),
            Stage::Parser => {
                write!(f, "[Line {}] Error", self.line)?;
                if let Some(ref location) = self.location {
                    write!(f, "{}", location)?;
                }
                write!(f, ": {}", self.message_text)
            }
        }
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during one front-end run.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Move all diagnostics out, leaving the collection empty.
    pub fn take(&mut self) -> DiagnosticCollection {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Diagnostics carrying the given code, in report order.
    pub fn with_code(&self, code: u32) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // Scanner (1xxx)
    pub const UNEXPECTED_CHARACTER_0: DiagnosticMessage = diag!(1001, Error, "Unexpected character '{0}'.");
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(1002, Error, "Unterminated string.");
    pub const UNTERMINATED_SHADOW_REALM_BLOCK: DiagnosticMessage = diag!(1003, Error, "Unterminated ShadowRealm block.");

    // Parser (2xxx)
    pub const EXPECT_EXPRESSION: DiagnosticMessage = diag!(2001, Error, "Expect expression.");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(2002, Error, "Invalid assignment target.");
    pub const TOO_MANY_ARGUMENTS: DiagnosticMessage = diag!(2003, Error, "Can't have more than 255 arguments.");
    pub const TOO_MANY_PARAMETERS: DiagnosticMessage = diag!(2004, Error, "Can't have more than 255 parameters.");
    pub const EXPECT_MODULE_NAME_AFTER_SETFIELD: DiagnosticMessage = diag!(2005, Error, "Expect module name (string) after #SetField.");
    pub const EXPECT_SEMICOLON_AFTER_0: DiagnosticMessage = diag!(2006, Error, "Expect ';' after {0}.");
    pub const EXPECT_JOEY_AFTER_KAIBA: DiagnosticMessage = diag!(2007, Error, "Expect 'Joey' after 'Kaiba'.");
    pub const EXPECT_0_NAME: DiagnosticMessage = diag!(2008, Error, "Expect {0} name.");
    pub const EXPECT_OPEN_BRACE_BEFORE_0_BODY: DiagnosticMessage = diag!(2009, Error, "Expect '{' before {0} body.");
    pub const EXPECT_CLOSE_BRACE_AFTER_0: DiagnosticMessage = diag!(2010, Error, "Expect '}' after {0}.");
    pub const EXPECT_CLASS_MEMBER: DiagnosticMessage = diag!(2011, Error, "Expect method (Ritual) or field declaration inside class.");
    pub const EXPECT_OPEN_PAREN_AFTER_0: DiagnosticMessage = diag!(2012, Error, "Expect '(' after {0}.");
    pub const EXPECT_CLOSE_PAREN_AFTER_0: DiagnosticMessage = diag!(2013, Error, "Expect ')' after {0}.");
    pub const EXPECT_PARAMETER_TYPE: DiagnosticMessage = diag!(2014, Error, "Expect parameter type (e.g., DarkMagician).");
    pub const EXPECT_VARIABLE_TYPE: DiagnosticMessage = diag!(2015, Error, "Expect variable type.");
    pub const EXPECT_SUMMON_OP_AFTER_SUMMON: DiagnosticMessage = diag!(2016, Error, "Expect '<<' after 'Summon'.");
    pub const EXPECT_DRAW_OP_AFTER_DRAW: DiagnosticMessage = diag!(2017, Error, "Expect '>>' after 'Draw'.");
    pub const EXPECT_PROPERTY_NAME_AFTER_DOT: DiagnosticMessage = diag!(2018, Error, "Expect property name after '.'.");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(2019, Error, "Nesting is too deep.");
    pub const EXPECT_FIELD_INSIDE_STRUCT: DiagnosticMessage = diag!(2020, Error, "Expect field declaration inside struct.");
}

//! duel: The DuelScript front-end driver.
//!
//! Usage:
//!   duel [options] [FILE]
//!
//! Scans and parses one DuelScript file and prints its syntax tree.

use bumpalo::Bump;
use clap::Parser as ClapParser;
use duelscript_ast::Token;
use duelscript_diagnostics::{Diagnostic, DiagnosticCollection};
use miette::{IntoDiagnostic, WrapErr};
use std::path::Path;
use std::process;
use std::time::Instant;

#[derive(ClapParser, Debug)]
#[command(name = "duel", about = "DuelScript scanner and parser", version)]
struct Cli {
    /// DuelScript source file.
    #[arg(value_name = "FILE", default_value = "test.duelscript")]
    file: String,

    /// Print the token stream before the tree.
    #[arg(long)]
    tokens: bool,

    /// Scan and parse only; do not print the tree.
    #[arg(long)]
    check: bool,

    /// Disable colored diagnostics.
    #[arg(long = "no-color")]
    no_color: bool,

    /// Report how long scanning and parsing took.
    #[arg(long)]
    time: bool,
}

/// The source parsed with syntax errors.
const EXIT_DATA_ERROR: i32 = 65;
/// The source file could not be read.
const EXIT_IO_ERROR: i32 = 74;

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// What one front-end run produced, rendered and ready to print.
struct Outcome {
    token_dump: Option<String>,
    listing: Option<String>,
    diagnostics: DiagnosticCollection,
    had_error: bool,
}

fn main() {
    let cli = Cli::parse();

    let source = match read_source(Path::new(&cli.file)) {
        Ok(source) => source,
        Err(report) => {
            eprintln!("{:?}", report);
            process::exit(EXIT_IO_ERROR);
        }
    };

    let start = Instant::now();
    let outcome = run_front_end(&source, &cli);
    let elapsed = start.elapsed();

    if let Some(ref dump) = outcome.token_dump {
        print!("{}", dump);
    }

    let use_color = !cli.no_color && atty_is_terminal();
    for diag in outcome.diagnostics.diagnostics() {
        print_diagnostic(diag, use_color);
    }

    if cli.time {
        let message = format!("Front end finished in {:.2}ms.", elapsed.as_secs_f64() * 1000.0);
        if use_color {
            eprintln!("{}{}{}", GRAY, message, RESET);
        } else {
            eprintln!("{}", message);
        }
    }

    if outcome.had_error {
        let count = outcome.diagnostics.error_count();
        let summary = format!("Found {} error{}.", count, if count == 1 { "" } else { "s" });
        if use_color {
            eprintln!("\n{}{}{}", RED, summary, RESET);
        } else {
            eprintln!("\n{}", summary);
        }
        process::exit(EXIT_DATA_ERROR);
    }

    if let Some(ref listing) = outcome.listing {
        print!("{}", listing);
    }
}

fn read_source(path: &Path) -> miette::Result<String> {
    std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not open file: {}", path.display()))
}

/// Scan and parse `source`. The tree is only rendered when it is clean and
/// the caller asked for it.
fn run_front_end(source: &str, cli: &Cli) -> Outcome {
    let arena = Bump::new();

    let (tokens, mut diagnostics) = duelscript_scanner::scan(source);
    let token_dump = cli.tokens.then(|| dump_tokens(&tokens));

    let tokens: &[Token<'_>] = arena.alloc_slice_copy(&tokens);
    let output = duelscript_parser::parse_tokens(&arena, tokens);
    diagnostics.extend(output.diagnostics);

    let listing = if cli.check || output.had_error {
        None
    } else {
        Some(duelscript_printer::print_program(&output.program))
    };

    Outcome {
        token_dump,
        listing,
        diagnostics,
        had_error: output.had_error,
    }
}

fn dump_tokens(tokens: &[Token<'_>]) -> String {
    let mut dump = String::new();
    for token in tokens {
        dump.push_str(&token.to_string());
        dump.push('\n');
    }
    dump
}

fn print_diagnostic(diag: &Diagnostic, use_color: bool) {
    if use_color {
        let color = if diag.is_error() { RED } else { YELLOW };
        eprintln!(
            "{}{}{}{} {}[DS{}]{}",
            BOLD, color, diag, RESET, GRAY, diag.code, RESET
        );
    } else {
        eprintln!("{}", diag);
    }
}

fn atty_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

//! # snakelet
//!
//! snakelet is a tree-walking interpreter for a small, dynamically typed
//! scripting language with indentation-delimited blocks, first-class
//! functions, and list/string/number primitives.
//!
//! Source text is lexed into tokens, parsed into a syntax tree, and
//! evaluated directly against a chain of scopes; program output is
//! written to a caller-provided sink.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::interpreter::{evaluator::core::Context, lexer::Lexer, parser::core::parse_program};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent
/// the syntactic structure of source code as a tree. The AST is built by
/// the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines node types for all language constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Keeps literals, operators, and slice forms in closed enums.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing,
/// parsing, or executing code. It standardizes error reporting and
/// carries detailed information about failures, including source
/// positions.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches positions and detailed messages for context.
/// - Integrates with the standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, and error handling to provide a complete runtime for
/// snakelet programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and
///   value types.
/// - Provides entry points for interpreting programs.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// This module provides reusable conversion routines used throughout the
/// evaluator, such as safe conversions between `i64`, `usize`, and `f64`
/// without silent data loss.
///
/// # Responsibilities
/// - Safely convert between integer and floating-point types.
/// - Provide general-purpose helpers used in multiple modules.
pub mod util;

/// Executes a whole program, writing its output to `out`.
///
/// The source is lexed, parsed into a single root block, and executed
/// against a fresh context with the built-in functions (`print`, `range`,
/// `len`) registered. The first lexical, syntax, or runtime error aborts
/// execution and is returned.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use snakelet::run_program;
///
/// let mut out = Vec::new();
/// run_program("print(1 + 2 * 3)", &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "7 \n");
///
/// // An unassigned variable is a runtime error.
/// let mut out = Vec::new();
/// assert!(run_program("print(x)", &mut out).is_err());
/// ```
pub fn run_program(source: &str, out: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = Lexer::tokenize(source);
    let mut tokens = tokens.iter().peekable();
    let program = parse_program(&mut tokens)?;

    let mut context = Context::new(out);
    context.run(&program)?;

    Ok(())
}

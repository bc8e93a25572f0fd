/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, executes statements and expressions,
/// manages the scope chain, and performs all arithmetic, comparison, and
/// slicing operations. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, and control flow.
/// - Reports runtime errors such as incompatible operands or unassigned
///   variables.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. Leading whitespace
/// is tokenized too, because indentation delimits code blocks.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source
///   positions.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Surfaces malformed lexemes as invalid tokens instead of failing.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of the
/// program. Indentation widths are enforced here, turning the flat token
/// stream into nested blocks.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates grammar and indentation, reporting errors with location
///   info.
/// - Supports expressions, assignments, slices, calls, and control flow.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value types used during execution: the unit
/// value, booleans, integers, reals, text, and shared lists. It also
/// provides truthiness and the canonical textual form.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported variants.
/// - Implements truthiness and type naming.
/// - Renders values in their canonical textual form.
pub mod value;

/// Parsing errors.
///
/// Defines all error types that can occur while turning the token stream
/// into a syntax tree. Every parse error carries the offending token's
/// lexeme, line, and column.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// unassigned variables, incompatible operand types, slice bounds
/// violations, and argument mismatches.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

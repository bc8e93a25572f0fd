use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::core::ParseResult,
    },
};

/// Builds the standard "token type invalid or unexpected" error for a
/// token the grammar cannot place.
pub(in crate::interpreter::parser) fn unexpected(token: &Token, position: Position) -> ParseError {
    ParseError::UnexpectedToken { token:  token.to_string(),
                                  line:   position.line,
                                  column: position.column, }
}

/// Error used when the token iterator runs dry.
///
/// The lexer terminates every stream with `Token::Eof`, so this is a
/// defensive fallback rather than a reachable state.
pub(in crate::interpreter::parser) fn end_of_input() -> ParseError {
    ParseError::UnexpectedToken { token:  Token::Eof.to_string(),
                                  line:   0,
                                  column: 0, }
}

/// Splits a peeked token into the parts every error variant carries.
pub(in crate::interpreter::parser) fn error_parts(token: &Token,
                                                 position: Position)
                                                 -> (String, usize, usize) {
    (token.to_string(), position.line, position.column)
}

/// Consumes the next token, which must equal `expected`.
///
/// # Returns
/// The position of the consumed token.
///
/// # Errors
/// `UnexpectedToken` if the next token differs or the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<Position>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((token, position)) if token == expected => Ok(*position),
        Some((token, position)) => Err(unexpected(token, *position)),
        None => Err(end_of_input()),
    }
}

/// Consumes the next token, which must be an identifier, and returns its
/// name.
///
/// Keywords have already been reclassified by the lexer and do not match.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((token, position)) => Err(unexpected(token, *position)),
        None => Err(end_of_input()),
    }
}

/// Reports whether a token can begin an expression.
///
/// Used by statement and expression parsers to decide between "parse the
/// right side" and "raise the construct's dedicated error".
#[must_use]
pub(in crate::interpreter::parser) const fn starts_expression(token: &Token) -> bool {
    matches!(token,
             Token::Integer(..)
             | Token::Real(..)
             | Token::Text(..)
             | Token::True
             | Token::False
             | Token::None
             | Token::Sub
             | Token::Identifier(..)
             | Token::OpenSquareBracket)
}

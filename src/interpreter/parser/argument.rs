use std::iter::Peekable;

use crate::{
    ast::{Literal, Node, SliceKind},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            core::ParseResult,
            expression::parse_compare,
            utils::{end_of_input, error_parts, starts_expression, unexpected},
        },
    },
};

/// Parses a single argument of an expression chain.
///
/// Arguments are the atoms of the expression grammar:
///
/// ```text
///     argument := "-" number
///               | literal
///               | list
///               | sliceable
/// ```
///
/// A unary minus is accepted only directly before a numeric literal; the
/// language has no general negation operator. Identifiers, calls, and list
/// literals may carry a slice suffix and are handled by
/// [`parse_sliceable`].
pub(in crate::interpreter::parser) fn parse_argument<'a, I>(tokens: &mut Peekable<I>)
                                                            -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    match tokens.peek() {
        Some((Token::Sub, position)) => {
            let line = position.line;
            tokens.next();

            match tokens.next() {
                Some((Token::Integer(value), _)) => Ok(Node::Constant { value: Literal::Int(-value),
                                                                        line }),
                Some((Token::Real(value), _)) => Ok(Node::Constant { value: Literal::Real(-value),
                                                                     line }),
                Some((token, position)) => {
                    let (token, line, column) = error_parts(token, *position);
                    Err(ParseError::IncorrectExpression { token, line, column })
                },
                None => Err(end_of_input()),
            }
        },
        Some((Token::Integer(value), position)) => {
            let node = Node::Constant { value: Literal::Int(*value),
                                        line:  position.line, };
            tokens.next();
            Ok(node)
        },
        Some((Token::Real(value), position)) => {
            let node = Node::Constant { value: Literal::Real(*value),
                                        line:  position.line, };
            tokens.next();
            Ok(node)
        },
        Some((Token::Text(content), position)) => {
            let node = Node::Constant { value: Literal::Text(content.clone()),
                                        line:  position.line, };
            tokens.next();
            Ok(node)
        },
        Some((Token::True, position)) => {
            let node = Node::Constant { value: Literal::Bool(true),
                                        line:  position.line, };
            tokens.next();
            Ok(node)
        },
        Some((Token::False, position)) => {
            let node = Node::Constant { value: Literal::Bool(false),
                                        line:  position.line, };
            tokens.next();
            Ok(node)
        },
        Some((Token::None, position)) => {
            let node = Node::Constant { value: Literal::None,
                                        line:  position.line, };
            tokens.next();
            Ok(node)
        },
        Some((Token::Identifier(..) | Token::OpenSquareBracket, _)) => parse_sliceable(tokens),
        Some((token, position)) => Err(unexpected(token, *position)),
        None => Err(end_of_input()),
    }
}

/// Parses a sliceable value: a variable, a function call, or a list
/// literal, each optionally followed by one slice suffix.
///
/// This is also the only shape a `for` loop accepts as its range.
pub(in crate::interpreter::parser) fn parse_sliceable<'a, I>(tokens: &mut Peekable<I>)
                                                             -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let base = match tokens.peek() {
        Some((Token::Identifier(..), _)) => parse_identifier_or_call(tokens)?,
        Some((Token::OpenSquareBracket, _)) => parse_list_literal(tokens)?,
        Some((token, position)) => return Err(unexpected(token, *position)),
        None => return Err(end_of_input()),
    };

    parse_slice_suffix(tokens, base)
}

/// Parses an identifier and decides between a variable read and a function
/// call by peeking for `(`.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (name, line) = match tokens.next() {
        Some((Token::Identifier(name), position)) => (name.clone(), position.line),
        Some((token, position)) => return Err(unexpected(token, *position)),
        None => return Err(end_of_input()),
    };

    if let Some((Token::OpenBracket, _)) = tokens.peek() {
        tokens.next();
        let args = parse_call_arguments(tokens)?;
        return Ok(Node::Call { name, args, line });
    }

    Ok(Node::Variable { name, line })
}

/// Parses the arguments of a call, positioned after the opening `(`.
///
/// Arguments are comma-separated compare-expressions; the list ends at
/// `)`. Any other shape raises `InvalidFunctionCall`.
fn parse_call_arguments<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut args = Vec::new();

    if let Some((Token::CloseBracket, _)) = tokens.peek() {
        tokens.next();
        return Ok(args);
    }

    loop {
        match tokens.peek() {
            Some((token, position)) if !starts_expression(token) => {
                let (token, line, column) = error_parts(token, *position);
                return Err(ParseError::InvalidFunctionCall { token, line, column });
            },
            None => return Err(end_of_input()),
            _ => {},
        }

        args.push(parse_compare(tokens)?);

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::CloseBracket, _)) => return Ok(args),
            Some((token, position)) => {
                let (token, line, column) = error_parts(token, *position);
                return Err(ParseError::InvalidFunctionCall { token, line, column });
            },
            None => return Err(end_of_input()),
        }
    }
}

/// Parses a list literal, positioned at the opening `[`.
///
/// Elements are comma-separated compare-expressions. A trailing comma
/// before `]` is permitted, and `[]` is the empty list.
fn parse_list_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let line = match tokens.next() {
        Some((Token::OpenSquareBracket, position)) => position.line,
        Some((token, position)) => return Err(unexpected(token, *position)),
        None => return Err(end_of_input()),
    };

    let mut elements = Vec::new();

    if let Some((Token::CloseSquareBracket, _)) = tokens.peek() {
        tokens.next();
        return Ok(Node::Constant { value: Literal::List(elements),
                                   line });
    }

    loop {
        match tokens.peek() {
            Some((token, position)) if !starts_expression(token) => {
                let (token, line, column) = error_parts(token, *position);
                return Err(ParseError::InvalidListElement { token, line, column });
            },
            None => return Err(end_of_input()),
            _ => {},
        }

        elements.push(parse_compare(tokens)?);

        match tokens.next() {
            Some((Token::Comma, _)) => {
                if let Some((Token::CloseSquareBracket, _)) = tokens.peek() {
                    tokens.next();
                    break;
                }
            },
            Some((Token::CloseSquareBracket, _)) => break,
            Some((token, position)) => return Err(unexpected(token, *position)),
            None => return Err(end_of_input()),
        }
    }

    Ok(Node::Constant { value: Literal::List(elements),
                        line })
}

/// Attaches a slice suffix to `source` when one follows.
///
/// The three accepted forms, all with literal non-negative integer
/// bounds:
///
/// ```text
///     source[start]        // one element
///     source[start:]       // from start to the end
///     source[start:end]    // the half-open range [start, end)
/// ```
fn parse_slice_suffix<'a, I>(tokens: &mut Peekable<I>, source: Node) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let line = match tokens.peek() {
        Some((Token::OpenSquareBracket, position)) => position.line,
        _ => return Ok(source),
    };
    tokens.next();

    let start = match tokens.next() {
        Some((Token::Integer(value), _)) => *value,
        Some((token, position)) => return Err(unexpected(token, *position)),
        None => return Err(end_of_input()),
    };

    match tokens.next() {
        Some((Token::CloseSquareBracket, _)) => Ok(Node::Slice { source: Box::new(source),
                                                                 kind: SliceKind::Index,
                                                                 start,
                                                                 end: 0,
                                                                 line }),
        Some((Token::Colon, _)) => match tokens.next() {
            Some((Token::CloseSquareBracket, _)) => Ok(Node::Slice { source: Box::new(source),
                                                                     kind: SliceKind::FromStart,
                                                                     start,
                                                                     end: 0,
                                                                     line }),
            Some((Token::Integer(end), _)) => {
                let end = *end;
                match tokens.next() {
                    Some((Token::CloseSquareBracket, _)) => Ok(Node::Slice { source:
                                                                                 Box::new(source),
                                                                             kind:
                                                                                 SliceKind::Range,
                                                                             start,
                                                                             end,
                                                                             line }),
                    Some((token, position)) => {
                        let (token, line, column) = error_parts(token, *position);
                        Err(ParseError::NoEndOfSlice { token, line, column })
                    },
                    None => Err(end_of_input()),
                }
            },
            Some((token, position)) => {
                let (token, line, column) = error_parts(token, *position);
                Err(ParseError::NoEndOfSlice { token, line, column })
            },
            None => Err(end_of_input()),
        },
        Some((token, position)) => {
            let (token, line, column) = error_parts(token, *position);
            Err(ParseError::NoEndOfSlice { token, line, column })
        },
        None => Err(end_of_input()),
    }
}

use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{AssignOperator, Literal, Node},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            argument::parse_sliceable,
            core::{ParseResult, parse_indented_block},
            expression::{parse_compare, parse_expression},
            utils::{end_of_input, error_parts, expect, parse_identifier, starts_expression,
                    unexpected},
        },
    },
};

/// Parses a single statement, positioned after the line's indent token.
///
/// A statement may be one of:
/// - a function definition (`def`),
/// - a `return` (only inside a function body),
/// - `break`/`continue` (only inside a loop body),
/// - an assignment,
/// - an expression used as a statement,
/// - an `if`, `while`, or `for` construct.
///
/// `width` is the enclosing block's indentation width and is needed by the
/// constructs that open a nested block.
pub(in crate::interpreter::parser) fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                                                             width: usize,
                                                             in_function: bool,
                                                             in_loop: bool)
                                                             -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    match tokens.peek() {
        Some((Token::Def, _)) => parse_function_def(tokens, width),
        Some((Token::Return, _)) if in_function => parse_return(tokens),
        Some((Token::Break, position)) if in_loop => {
            let line = position.line;
            tokens.next();
            Ok(Node::Break { line })
        },
        Some((Token::Continue, position)) if in_loop => {
            let line = position.line;
            tokens.next();
            Ok(Node::Continue { line })
        },
        Some((Token::If, _)) => parse_if(tokens, width, in_function, in_loop),
        Some((Token::While, _)) => parse_while(tokens, width, in_function),
        Some((Token::For, _)) => parse_for(tokens, width, in_function),
        Some((Token::Identifier(..), _)) => {
            if let Some(assignment) = try_parse_assignment(tokens)? {
                return Ok(assignment);
            }
            parse_compare(tokens)
        },
        Some((token, _)) if starts_expression(token) => parse_compare(tokens),
        Some((token, position)) => Err(unexpected(token, *position)),
        None => Err(end_of_input()),
    }
}

/// Parses a function definition:
///
/// ```text
///     def name(param1, param2):
///         body
/// ```
///
/// The body must be indented strictly deeper than the enclosing block and
/// must contain at least one statement; both violations raise
/// `ExpectedCodeBlock`. The body is parsed with `in_function` set and
/// `in_loop` cleared, so a stray `break` inside a function defined in a
/// loop is still refused.
fn parse_function_def<'a, I>(tokens: &mut Peekable<I>, width: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let line = expect(tokens, &Token::Def)?.line;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::OpenBracket)?;

    let mut params = Vec::new();
    if let Some((Token::CloseBracket, _)) = tokens.peek() {
        tokens.next();
    } else {
        loop {
            params.push(parse_identifier(tokens)?);
            match tokens.next() {
                Some((Token::Comma, _)) => {},
                Some((Token::CloseBracket, _)) => break,
                Some((token, position)) => return Err(unexpected(token, *position)),
                None => return Err(end_of_input()),
            }
        }
    }

    expect(tokens, &Token::Colon)?;
    expect(tokens, &Token::Newline)?;

    let body = parse_indented_block(tokens, width, true, false)?;
    if let Node::CodeBlock(statements) = &body
       && statements.is_empty()
    {
        let (token, line, column) = match tokens.peek() {
            Some((token, position)) => error_parts(token, *position),
            None => (Token::Eof.to_string(), line, 0),
        };
        return Err(ParseError::ExpectedCodeBlock { token, line, column });
    }

    Ok(Node::FunctionDef { name,
                           params,
                           body: Rc::new(body),
                           line })
}

/// Parses a `return` statement.
///
/// A bare `return` yields `None`. After the returned expression only the
/// end of the line may follow; anything else raises
/// `UnexpectedAfterReturn`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let line = expect(tokens, &Token::Return)?.line;

    let value = match tokens.peek() {
        Some((Token::Newline | Token::Eof, _)) | None => Node::Constant { value: Literal::None,
                                                                          line },
        Some((token, position)) if !starts_expression(token) => {
            let (token, line, column) = error_parts(token, *position);
            return Err(ParseError::UnexpectedAfterReturn { token, line, column });
        },
        _ => parse_compare(tokens)?,
    };

    match tokens.peek() {
        Some((Token::Newline | Token::Eof, _)) | None => {},
        Some((token, position)) => {
            let (token, line, column) = error_parts(token, *position);
            return Err(ParseError::UnexpectedAfterReturn { token, line, column });
        },
    }

    Ok(Node::Return { value: Box::new(value),
                      line })
}

/// Tries to parse an assignment without committing to it.
///
/// The decision needs two tokens of lookahead: an identifier directly
/// followed by `=`, `+=`, or `-=`. The lookahead runs on a clone of the
/// iterator, so when the line turns out to be something else (a call, a
/// bare variable) nothing has been consumed and the expression parser
/// re-reads the identifier.
fn try_parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Node>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut lookahead = tokens.clone();
    let Some((Token::Identifier(name), position)) = lookahead.next() else {
        return Ok(None);
    };

    let op = match lookahead.peek() {
        Some((Token::Assign, _)) => AssignOperator::Assign,
        Some((Token::AddAssign, _)) => AssignOperator::AddAssign,
        Some((Token::SubAssign, _)) => AssignOperator::SubAssign,
        _ => return Ok(None),
    };

    let line = position.line;
    tokens.next();
    tokens.next();

    match tokens.peek() {
        Some((token, position)) if !starts_expression(token) => {
            let (token, line, column) = error_parts(token, *position);
            return Err(ParseError::InvalidAssign { token, line, column });
        },
        None => return Err(end_of_input()),
        _ => {},
    }

    let value = parse_expression(tokens)?;

    Ok(Some(Node::Assign { op,
                           name: name.clone(),
                           value: Box::new(value),
                           line }))
}

/// Parses the condition of an `if` or `while`, including the terminating
/// `:`.
///
/// Malformed conditions and a missing `:` raise
/// `InvalidCompareExpression`.
fn parse_condition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    match tokens.peek() {
        Some((token, position)) if !starts_expression(token) => {
            let (token, line, column) = error_parts(token, *position);
            return Err(ParseError::InvalidCompareExpression { token, line, column });
        },
        None => return Err(end_of_input()),
        _ => {},
    }

    let condition = parse_compare(tokens)?;

    match tokens.next() {
        Some((Token::Colon, _)) => Ok(condition),
        Some((token, position)) => {
            let (token, line, column) = error_parts(token, *position);
            Err(ParseError::InvalidCompareExpression { token, line, column })
        },
        None => Err(end_of_input()),
    }
}

/// Parses an `if` statement. There is no `else` branch in the language.
fn parse_if<'a, I>(tokens: &mut Peekable<I>,
                   width: usize,
                   in_function: bool,
                   in_loop: bool)
                   -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let line = expect(tokens, &Token::If)?.line;
    let condition = parse_condition(tokens)?;
    expect(tokens, &Token::Newline)?;
    let body = parse_indented_block(tokens, width, in_function, in_loop)?;

    Ok(Node::If { condition: Box::new(condition),
                  body: Box::new(body),
                  line })
}

/// Parses a `while` statement.
fn parse_while<'a, I>(tokens: &mut Peekable<I>, width: usize, in_function: bool)
                      -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let line = expect(tokens, &Token::While)?.line;
    let condition = parse_condition(tokens)?;
    expect(tokens, &Token::Newline)?;
    let body = parse_indented_block(tokens, width, in_function, true)?;

    Ok(Node::While { condition: Box::new(condition),
                     body: Box::new(body),
                     line })
}

/// Parses a `for` statement:
///
/// ```text
///     for name in sliceable:
///         body
/// ```
///
/// Only a sliceable (variable, call, or list literal, optionally sliced)
/// is accepted as the range; every header violation raises
/// `InvalidForLoop`.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, width: usize, in_function: bool)
                    -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let line = expect(tokens, &Token::For)?.line;

    let iterator = match tokens.next() {
        Some((Token::Identifier(name), _)) => name.clone(),
        Some((token, position)) => {
            let (token, line, column) = error_parts(token, *position);
            return Err(ParseError::InvalidForLoop { token, line, column });
        },
        None => return Err(end_of_input()),
    };

    match tokens.next() {
        Some((Token::In, _)) => {},
        Some((token, position)) => {
            let (token, line, column) = error_parts(token, *position);
            return Err(ParseError::InvalidForLoop { token, line, column });
        },
        None => return Err(end_of_input()),
    }

    let range = match tokens.peek() {
        Some((Token::Identifier(..) | Token::OpenSquareBracket, _)) => parse_sliceable(tokens)?,
        Some((token, position)) => {
            let (token, line, column) = error_parts(token, *position);
            return Err(ParseError::InvalidForLoop { token, line, column });
        },
        None => return Err(end_of_input()),
    };

    match tokens.next() {
        Some((Token::Colon, _)) => {},
        Some((token, position)) => {
            let (token, line, column) = error_parts(token, *position);
            return Err(ParseError::InvalidForLoop { token, line, column });
        },
        None => return Err(end_of_input()),
    }
    expect(tokens, &Token::Newline)?;

    let body = parse_indented_block(tokens, width, in_function, true)?;

    Ok(Node::For { iterator,
                   range: Box::new(range),
                   body: Box::new(body),
                   line })
}

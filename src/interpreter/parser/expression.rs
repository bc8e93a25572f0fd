use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, CompareOperator, Node},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            argument::parse_argument,
            core::ParseResult,
            utils::{end_of_input, error_parts, starts_expression},
        },
    },
};

/// Parses an additive expression chain.
///
/// Grammar: `expression := multiplicative (("+" | "-") multiplicative)*`
///
/// Chains are collected into a single n-ary [`Node::Expression`] whose
/// operators fold left to right during evaluation, so `a - b + c` computes
/// `(a - b) + c`. A chain of one operand collapses to the operand node.
pub(in crate::interpreter::parser) fn parse_expression<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_chain(tokens, parse_multiplicative, |token| {
        match token {
            Token::Add => Some(BinaryOperator::Add),
            Token::Sub => Some(BinaryOperator::Sub),
            _ => None,
        }
    })
}

/// Parses a multiplicative expression chain.
///
/// Grammar: `multiplicative := exponential (("*" | "/") exponential)*`
fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_chain(tokens, parse_exponential, |token| {
        match token {
            Token::Star => Some(BinaryOperator::Mul),
            Token::Slash => Some(BinaryOperator::Div),
            _ => None,
        }
    })
}

/// Parses an exponential expression chain.
///
/// Grammar: `exponential := argument ("^" argument)*`
///
/// Note that the chain folds left to right like every other level, so
/// `2 ^ 2 ^ 3` computes `(2 ^ 2) ^ 3 = 64`.
fn parse_exponential<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_chain(tokens, parse_argument, |token| {
        match token {
            Token::Caret => Some(BinaryOperator::Pow),
            _ => None,
        }
    })
}

/// Collects one precedence level into an n-ary operator chain.
///
/// `parse_operand` parses the next-higher precedence level and `operator`
/// maps a peeked token to this level's operator, or `None` to stop.
///
/// # Errors
/// `IncorrectExpression` when an operator is not followed by a token that
/// can begin an operand.
fn parse_chain<'a, I>(tokens: &mut Peekable<I>,
                      parse_operand: impl Fn(&mut Peekable<I>) -> ParseResult<Node>,
                      operator: impl Fn(&Token) -> Option<BinaryOperator>)
                      -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let first = parse_operand(tokens)?;

    let Some(op) = tokens.peek().and_then(|(token, _)| operator(token)) else {
        return Ok(first);
    };
    tokens.next();

    let line = first.line_number();
    let mut args = vec![first];
    let mut ops = vec![op];

    loop {
        ensure_operand_follows(tokens)?;
        args.push(parse_operand(tokens)?);

        let Some(op) = tokens.peek().and_then(|(token, _)| operator(token)) else {
            break;
        };
        tokens.next();
        ops.push(op);
    }

    Ok(Node::Expression { args, ops, line })
}

/// Demands that the next token can begin an operand.
fn ensure_operand_follows<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    match tokens.peek() {
        Some((token, position)) if !starts_expression(token) => {
            let (token, line, column) = error_parts(token, *position);
            Err(ParseError::IncorrectExpression { token, line, column })
        },
        None => Err(end_of_input()),
        _ => Ok(()),
    }
}

/// Parses a compare-expression: an additive chain optionally followed by
/// one comparison operator and a second additive chain.
///
/// Chained comparisons (`a < b < c`) are not supported; whatever follows
/// the right-hand side is left for the caller to judge.
pub(in crate::interpreter::parser) fn parse_compare<'a, I>(tokens: &mut Peekable<I>)
                                                           -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let left = parse_expression(tokens)?;

    let Some(op) = tokens.peek().and_then(|(token, _)| compare_operator(token)) else {
        return Ok(left);
    };
    tokens.next();

    match tokens.peek() {
        Some((token, position)) if !starts_expression(token) => {
            let (token, line, column) = error_parts(token, *position);
            return Err(ParseError::InvalidCompareExpression { token, line, column });
        },
        None => return Err(end_of_input()),
        _ => {},
    }

    let right = parse_expression(tokens)?;
    let line = left.line_number();

    Ok(Node::Compare { left: Box::new(left),
                       op,
                       right: Box::new(right),
                       line })
}

/// Maps a token to its comparison operator, if it is one.
#[must_use]
const fn compare_operator(token: &Token) -> Option<CompareOperator> {
    match token {
        Token::Equal => Some(CompareOperator::Equal),
        Token::NotEqual => Some(CompareOperator::NotEqual),
        Token::Less => Some(CompareOperator::Less),
        Token::LessEqual => Some(CompareOperator::LessEqual),
        Token::Greater => Some(CompareOperator::Greater),
        Token::GreaterEqual => Some(CompareOperator::GreaterEqual),
        _ => None,
    }
}

use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            statement::parse_statement,
            utils::{end_of_input, unexpected},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token stream into the program's root code block.
///
/// The first leading-space token sets the outermost indentation width;
/// every top-level statement must match it exactly. After the root block
/// nothing but the end of input may remain.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs, as
///   produced by [`crate::interpreter::lexer::Lexer::tokenize`].
///
/// # Returns
/// The root [`Node::CodeBlock`] of the program.
///
/// # Errors
/// Any [`ParseError`]; parsing stops at the first one.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let width = match tokens.peek() {
        Some((Token::Space(width), _)) => *width,
        Some((token, position)) => return Err(unexpected(token, *position)),
        None => return Err(end_of_input()),
    };

    let program = parse_block(tokens, width, false, false)?;

    match tokens.peek() {
        Some((Token::Eof, _)) | None => Ok(program),
        Some((token, position)) => Err(unexpected(token, *position)),
    }
}

/// Parses a run of statements sharing one indentation width.
///
/// The parser sits at a line start on entry and after every statement.
/// Per line:
///
/// - blank lines (an indent directly followed by a newline) are skipped,
/// - an indent equal to `width` begins another statement of this block,
/// - a smaller indent ends the block and is left for the enclosing block
///   to re-read,
/// - a larger indent matches no open block and raises `IndentNotMatch`.
///
/// `in_function` enables `return`; `in_loop` enables `break` and
/// `continue`.
pub(in crate::interpreter::parser) fn parse_block<'a, I>(tokens: &mut Peekable<I>,
                                                         width: usize,
                                                         in_function: bool,
                                                         in_loop: bool)
                                                         -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut statements = Vec::new();

    loop {
        let Some((token, position)) = tokens.peek() else {
            break;
        };

        match token {
            Token::Eof => break,
            Token::Space(count) => {
                let count = *count;
                let position = *position;

                let mut lookahead = tokens.clone();
                lookahead.next();
                match lookahead.peek() {
                    Some((Token::Newline, _)) => {
                        tokens.next();
                        tokens.next();
                        continue;
                    },
                    Some((Token::Eof, _)) | None => {
                        tokens.next();
                        continue;
                    },
                    _ => {},
                }

                if count < width {
                    break;
                }
                if count > width {
                    return Err(ParseError::IndentNotMatch { token:  Token::Space(count)
                                                                        .to_string(),
                                                            line:   position.line,
                                                            column: position.column, });
                }

                tokens.next();
                statements.push(parse_statement(tokens, width, in_function, in_loop)?);

                // a simple statement ends at its newline; a nested block
                // has already consumed through its own line ends
                match tokens.peek() {
                    Some((Token::Newline, _)) => {
                        tokens.next();
                    },
                    Some((Token::Space(..) | Token::Eof, _)) | None => {},
                    Some((token, position)) => return Err(unexpected(token, *position)),
                }
            },
            _ => return Err(unexpected(token, *position)),
        }
    }

    Ok(Node::CodeBlock(statements))
}

/// Parses the indented block demanded by `def`, `if`, `while`, and `for`.
///
/// The next line must be indented strictly deeper than the opening
/// statement's block; otherwise `ExpectedCodeBlock` is raised.
pub(in crate::interpreter::parser) fn parse_indented_block<'a, I>(tokens: &mut Peekable<I>,
                                                                  width: usize,
                                                                  in_function: bool,
                                                                  in_loop: bool)
                                                                  -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    match tokens.peek() {
        Some((Token::Space(count), _)) if *count > width => {
            let inner = *count;
            parse_block(tokens, inner, in_function, in_loop)
        },
        Some((token, position)) => {
            Err(ParseError::ExpectedCodeBlock { token:  token.to_string(),
                                                line:   position.line,
                                                column: position.column, })
        },
        None => Err(end_of_input()),
    }
}

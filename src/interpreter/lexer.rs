use logos::Logos;

/// A source position carried by every token.
///
/// Lines start at 1. Columns start at 0 and advance with every consumed
/// character; a newline resets the column and increments the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// The 1-based source line.
    pub line:   usize,
    /// The 0-based column of the token's first character.
    pub column: usize,
}

/// Raw lexical classes recognized by the generated automaton.
///
/// This enum covers exactly what a regular automaton can decide locally:
/// literals, identifiers, operators, whitespace runs, and the invalid
/// lexeme shapes. Everything stream-sensitive — keywords, leading-space
/// tokens, end of input — is layered on top by [`Lexer`].
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    /// A run of blanks; the payload counts characters, tabs count as one.
    #[regex(r"[ \t\r\f]+", |lex| lex.slice().chars().count())]
    Whitespace(usize),
    /// `\n`
    #[token("\n")]
    Newline,
    /// Integer literal tokens, decimal (`42`) or hexadecimal (`0x2a`).
    #[regex(r"0x[0-9A-Fa-f]+", parse_hex, priority = 4)]
    #[regex(r"[0-9]+", parse_integer, priority = 3)]
    Integer(i64),
    /// Real literal tokens; either side of the dot may be empty (`9.`,
    /// `.5`) but not both.
    #[regex(r"[0-9]+\.[0-9]*", parse_real, priority = 3)]
    #[regex(r"\.[0-9]+", parse_real)]
    Real(f64),
    /// A double-quoted text literal; the payload is the raw content with
    /// no escape processing.
    #[regex(r#""[^"\n]*""#, parse_text)]
    Text(String),
    /// Identifier tokens; keyword reclassification happens in [`Lexer`].
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(`
    #[token("(")]
    OpenBracket,
    /// `)`
    #[token(")")]
    CloseBracket,
    /// `[`
    #[token("[")]
    OpenSquareBracket,
    /// `]`
    #[token("]")]
    CloseSquareBracket,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    Equal,
    /// `+`
    #[token("+")]
    Add,
    /// `+=`
    #[token("+=")]
    AddAssign,
    /// `-`
    #[token("-")]
    Sub,
    /// `-=`
    #[token("-=")]
    SubAssign,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// Lexemes no valid token can cover: digits mixed with letters that do
    /// not form a hex literal, a string missing its closing quote, and
    /// runs of graphic characters outside the operator set. The parser
    /// refuses these; the lexer itself never fails.
    #[regex(r"[0-9][0-9A-Za-z_]*", parse_invalid, priority = 2)]
    #[regex(r"[0-9][0-9A-Za-z_]*\.[0-9A-Za-z_]*", parse_invalid, priority = 2)]
    #[regex(r#""[^"\n]*"#, parse_unterminated)]
    #[regex(r"[!$%&'.;?@\\`{|}~]+", parse_invalid)]
    Invalid(String),
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None` when the digits overflow `i64`, which turns the lexeme
/// into an [`Token::Invalid`] downstream.
fn parse_integer(lex: &logos::Lexer<RawToken>) -> Option<i64> {
    lex.slice().parse().ok()
}
/// Parses a hexadecimal literal (with its `0x` prefix) from the current
/// token slice.
fn parse_hex(lex: &logos::Lexer<RawToken>) -> Option<i64> {
    i64::from_str_radix(&lex.slice()[2..], 16).ok()
}
/// Parses a real literal from the current token slice.
fn parse_real(lex: &logos::Lexer<RawToken>) -> Option<f64> {
    lex.slice().parse().ok()
}
/// Extracts the content of a terminated string literal.
fn parse_text(lex: &logos::Lexer<RawToken>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}
/// Extracts the partial content of an unterminated string literal.
fn parse_unterminated(lex: &logos::Lexer<RawToken>) -> String {
    lex.slice()[1..].to_string()
}
/// Keeps the whole offending lexeme as the invalid token's payload.
fn parse_invalid(lex: &logos::Lexer<RawToken>) -> String {
    lex.slice().to_string()
}

/// Represents a lexical token as consumed by the parser.
///
/// Beyond the raw lexical classes, this stream carries the indentation
/// discipline: every logical line (including the first) leads with a
/// [`Token::Space`] whose payload counts the leading whitespace
/// characters, and the stream ends with an idempotent [`Token::Eof`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// The leading whitespace width of a logical line.
    Space(usize),
    /// End of a logical line.
    Newline,
    /// End of input; returned forever once the source is exhausted.
    Eof,
    /// An integer literal.
    Integer(i64),
    /// A real literal.
    Real(f64),
    /// A text literal (content only, quotes stripped).
    Text(String),
    /// A name that is not a keyword.
    Identifier(String),
    /// A lexeme no valid token can cover.
    Invalid(String),
    /// `True`
    True,
    /// `False`
    False,
    /// `None`
    None,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `for`
    For,
    /// `in`
    In,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `def`
    Def,
    /// `return`
    Return,
    /// `(`
    OpenBracket,
    /// `)`
    CloseBracket,
    /// `[`
    OpenSquareBracket,
    /// `]`
    CloseSquareBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `=`
    Assign,
    /// `==`
    Equal,
    /// `+`
    Add,
    /// `+=`
    AddAssign,
    /// `-`
    Sub,
    /// `-=`
    SubAssign,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `!=`
    NotEqual,
}

/// The lexeme of the token, as rendered inside error messages.
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Space(count) => write!(f, "<indent {count}>"),
            Self::Newline => write!(f, "<new line>"),
            Self::Eof => write!(f, "<end of input>"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value}"),
            Self::Text(content) => write!(f, "\"{content}\""),
            Self::Identifier(name) | Self::Invalid(name) => write!(f, "{name}"),
            Self::True => write!(f, "True"),
            Self::False => write!(f, "False"),
            Self::None => write!(f, "None"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::While => write!(f, "while"),
            Self::For => write!(f, "for"),
            Self::In => write!(f, "in"),
            Self::Break => write!(f, "break"),
            Self::Continue => write!(f, "continue"),
            Self::Def => write!(f, "def"),
            Self::Return => write!(f, "return"),
            Self::OpenBracket => write!(f, "("),
            Self::CloseBracket => write!(f, ")"),
            Self::OpenSquareBracket => write!(f, "["),
            Self::CloseSquareBracket => write!(f, "]"),
            Self::Colon => write!(f, ":"),
            Self::Comma => write!(f, ","),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::Assign => write!(f, "="),
            Self::Equal => write!(f, "=="),
            Self::Add => write!(f, "+"),
            Self::AddAssign => write!(f, "+="),
            Self::Sub => write!(f, "-"),
            Self::SubAssign => write!(f, "-="),
            Self::Greater => write!(f, ">"),
            Self::GreaterEqual => write!(f, ">="),
            Self::Less => write!(f, "<"),
            Self::LessEqual => write!(f, "<="),
            Self::NotEqual => write!(f, "!="),
        }
    }
}

/// Reclassifies an identifier through the keyword table.
fn keyword_or_identifier(name: String) -> Token {
    match name.as_str() {
        "True" => Token::True,
        "False" => Token::False,
        "None" => Token::None,
        "if" => Token::If,
        "else" => Token::Else,
        "while" => Token::While,
        "for" => Token::For,
        "in" => Token::In,
        "break" => Token::Break,
        "continue" => Token::Continue,
        "def" => Token::Def,
        "return" => Token::Return,
        _ => Token::Identifier(name),
    }
}

/// Lifts a raw lexical class into the parser-facing token set.
fn cook(raw: RawToken) -> Token {
    match raw {
        RawToken::Whitespace(count) => Token::Space(count),
        RawToken::Newline => Token::Newline,
        RawToken::Integer(value) => Token::Integer(value),
        RawToken::Real(value) => Token::Real(value),
        RawToken::Text(content) => Token::Text(content),
        RawToken::Identifier(name) => keyword_or_identifier(name),
        RawToken::Invalid(lexeme) => Token::Invalid(lexeme),
        RawToken::OpenBracket => Token::OpenBracket,
        RawToken::CloseBracket => Token::CloseBracket,
        RawToken::OpenSquareBracket => Token::OpenSquareBracket,
        RawToken::CloseSquareBracket => Token::CloseSquareBracket,
        RawToken::Colon => Token::Colon,
        RawToken::Comma => Token::Comma,
        RawToken::Star => Token::Star,
        RawToken::Slash => Token::Slash,
        RawToken::Caret => Token::Caret,
        RawToken::Assign => Token::Assign,
        RawToken::Equal => Token::Equal,
        RawToken::Add => Token::Add,
        RawToken::AddAssign => Token::AddAssign,
        RawToken::Sub => Token::Sub,
        RawToken::SubAssign => Token::SubAssign,
        RawToken::Greater => Token::Greater,
        RawToken::GreaterEqual => Token::GreaterEqual,
        RawToken::Less => Token::Less,
        RawToken::LessEqual => Token::LessEqual,
        RawToken::NotEqual => Token::NotEqual,
    }
}

/// Produces the parser-facing token stream.
///
/// The lexer wraps the generated automaton and owns everything the
/// automaton cannot decide locally:
///
/// - line and column accounting for every token,
/// - the leading [`Token::Space`] of each logical line, synthesized with a
///   zero payload when a line starts without indentation,
/// - silent skipping of whitespace that is not at a line start,
/// - keyword reclassification,
/// - a final [`Token::Eof`] that repeats forever.
///
/// Lexical errors never abort the stream; they surface as
/// [`Token::Invalid`] and it is the parser's job to refuse them.
pub struct Lexer<'source> {
    inner:         logos::Lexer<'source, RawToken>,
    line:          usize,
    line_start:    usize,
    at_line_start: bool,
    pending:       Option<(Token, Position)>,
    eof:           Option<Position>,
}

impl<'source> Lexer<'source> {
    /// Creates a lexer over the given source text.
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self { inner:         RawToken::lexer(source),
               line:          1,
               line_start:    0,
               at_line_start: true,
               pending:       None,
               eof:           None, }
    }

    /// Lexes a whole source text into a vector of positioned tokens.
    ///
    /// The vector always ends with exactly one [`Token::Eof`].
    ///
    /// # Example
    /// ```
    /// use snakelet::interpreter::lexer::{Lexer, Token};
    ///
    /// let tokens = Lexer::tokenize("x = 1");
    /// let kinds: Vec<_> = tokens.into_iter().map(|(token, _)| token).collect();
    ///
    /// assert_eq!(kinds,
    ///            vec![Token::Space(0),
    ///                 Token::Identifier("x".to_string()),
    ///                 Token::Assign,
    ///                 Token::Integer(1),
    ///                 Token::Eof]);
    /// ```
    #[must_use]
    pub fn tokenize(source: &str) -> Vec<(Token, Position)> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();

        loop {
            let (token, position) = lexer.next_token();
            let done = token == Token::Eof;
            tokens.push((token, position));

            if done {
                return tokens;
            }
        }
    }

    /// Returns the next token and its position.
    ///
    /// Once the source is exhausted this keeps returning [`Token::Eof`] at
    /// the same position.
    pub fn next_token(&mut self) -> (Token, Position) {
        if let Some(pending) = self.pending.take() {
            return pending;
        }
        if let Some(position) = self.eof {
            return (Token::Eof, position);
        }

        loop {
            let Some(raw) = self.inner.next() else {
                let position = Position { line:   self.line,
                                          column: self.inner.source().len() - self.line_start, };
                self.eof = Some(position);
                return (Token::Eof, position);
            };

            let span = self.inner.span();
            let position = Position { line:   self.line,
                                      column: span.start - self.line_start, };

            let token = match raw {
                Ok(RawToken::Whitespace(count)) => {
                    if self.at_line_start {
                        self.at_line_start = false;
                        return (Token::Space(count), position);
                    }
                    continue;
                },
                Ok(raw) => cook(raw),
                Err(()) => Token::Invalid(self.inner.slice().to_string()),
            };

            if self.at_line_start {
                // the line starts directly with a token: its indent is zero
                self.at_line_start = false;
                self.pending = Some(self.emit(token, position));
                return (Token::Space(0), position);
            }

            return self.emit(token, position);
        }
    }

    /// Finishes a token, updating the line accounting on newlines.
    fn emit(&mut self, token: Token, position: Position) -> (Token, Position) {
        if token == Token::Newline {
            self.line += 1;
            self.line_start = self.inner.span().end;
            self.at_line_start = true;
        }
        (token, position)
    }
}

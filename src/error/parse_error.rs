/// Represents all errors that can be raised while parsing a token stream.
///
/// Every variant names the offending token's lexeme and source position.
/// Parse errors are fatal: the parser reports the first one and stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Found a token that no statement or expression rule accepts here.
    UnexpectedToken {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
    /// A statement demanded an indented, non-empty code block that did not
    /// follow.
    ExpectedCodeBlock {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
    /// A `return` value was not followed by the end of the line.
    UnexpectedAfterReturn {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
    /// An operator inside an expression is missing its right side.
    IncorrectExpression {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
    /// A comparison is malformed or terminated by the wrong token.
    InvalidCompareExpression {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
    /// A function call argument list contains an unexpected token.
    InvalidFunctionCall {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
    /// A slice is missing its closing `]`.
    NoEndOfSlice {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
    /// A list literal element is not an expression.
    InvalidListElement {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
    /// An assignment is missing the expression on its right side.
    InvalidAssign {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
    /// A `for` loop header is malformed.
    InvalidForLoop {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
    /// A line is indented to a width that matches no enclosing block.
    IndentNotMatch {
        /// Lexeme of the token encountered.
        token:  String,
        /// Source line of the token.
        line:   usize,
        /// Source column of the token.
        column: usize,
    },
}

impl ParseError {
    /// Human-readable cause of the error, without the position prefix.
    #[must_use]
    const fn detail(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. } => "Token type invalid or unexpected here.",
            Self::ExpectedCodeBlock { .. } => {
                "Expected a new code block, but indent is incorrect or block is empty."
            },
            Self::UnexpectedAfterReturn { .. } => "Unexpected token after 'return'.",
            Self::IncorrectExpression { .. } => "Expression needs a right side.",
            Self::InvalidCompareExpression { .. } => {
                "Invalid compare expression. Possible reasons:\n\t \
                 (-) no compare operator,\n\t \
                 (-) no right side of compare,\n\t \
                 (-) invalid token after expression: expected is ':' or new line."
            },
            Self::InvalidFunctionCall { .. } => "Unexpected token inside function call arguments.",
            Self::NoEndOfSlice { .. } => "Expected ']' as end of slice.",
            Self::InvalidListElement { .. } => {
                "Expected an expression as element of list, but no one found."
            },
            Self::InvalidAssign { .. } => "Assign operation needs an expression on the right side.",
            Self::InvalidForLoop { .. } => {
                "Invalid for loop declaration. Possible reasons:\n\t \
                 (-) no range to iterate on,\n\t \
                 (-) no ':' after range."
            },
            Self::IndentNotMatch { .. } => "Indentation does not match any enclosing code block.",
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (Self::UnexpectedToken { token, line, column }
            | Self::ExpectedCodeBlock { token, line, column }
            | Self::UnexpectedAfterReturn { token, line, column }
            | Self::IncorrectExpression { token, line, column }
            | Self::InvalidCompareExpression { token, line, column }
            | Self::InvalidFunctionCall { token, line, column }
            | Self::NoEndOfSlice { token, line, column }
            | Self::InvalidListElement { token, line, column }
            | Self::InvalidAssign { token, line, column }
            | Self::InvalidForLoop { token, line, column }
            | Self::IndentNotMatch { token, line, column }) = self;

        write!(f,
               "Error on line {line} column {column}: {token}\n\t{}",
               self.detail())
    }
}

impl std::error::Error for ParseError {}

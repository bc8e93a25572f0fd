/// Represents all errors that can be raised while executing a program.
///
/// Runtime errors are fatal at the point of occurrence: the evaluator does
/// not catch or recover, and the driver prints the message and exits.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Tried to read a variable that was never assigned.
    ReadNotAssignVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A slice bound fell outside the sliced list.
    OutOfRange {
        /// The offending bound.
        index: i64,
        /// The length of the sliced list.
        len:   usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Tried to slice a value that is not a list.
    NotList {
        /// The type of the value that was sliced.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Called a function that is not declared in any visible scope.
    FunctionNotDeclared {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A binary operator was applied to operand types outside its
    /// compatibility table.
    OperandsTypesNotCompatible {
        /// The type of the left operand.
        left:  &'static str,
        /// The textual form of the operator.
        op:    &'static str,
        /// The type of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An internal failure outside the other categories, such as a broken
    /// output stream.
    UnexpectedError {
        /// Details about the failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A `for` loop range did not produce a list.
    IterableExpected {
        /// The type of the value that was iterated.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An ordering comparison was applied to values it is not defined on.
    TypesNotComparable {
        /// The type of the left operand.
        left:  &'static str,
        /// The type of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A function received the wrong number of arguments.
    ParametersCountNotExpected {
        /// The name of the function.
        name:     String,
        /// How many arguments the call supplied.
        given:    usize,
        /// How many parameters the function declares.
        expected: usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A built-in function received an argument of the wrong type.
    TypeNotExpected {
        /// The type the function requires.
        expected: &'static str,
        /// The type the call supplied.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Integer division or a compound assignment divided by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed the 64-bit range.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function was defined twice in the same scope.
    FunctionAlreadyDefined {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadNotAssignVariable { name, line } => write!(f,
                                                                 "Error on line {line}:\n\tVariable '{name}' was read but never assigned."),
            Self::OutOfRange { index, len, line } => write!(f,
                                                            "Error on line {line}:\n\tSlice bound {index} is out of range for a list of length {len}."),
            Self::NotList { found, line } => {
                write!(f, "Error on line {line}:\n\tOnly lists can be sliced, but found {found}.")
            },
            Self::FunctionNotDeclared { name, line } => {
                write!(f, "Error on line {line}:\n\tFunction '{name}' is not declared.")
            },
            Self::OperandsTypesNotCompatible { left,
                                               op,
                                               right,
                                               line, } => write!(f,
                                                                 "Error on line {line}:\n\tOperands of types {left} and {right} are not compatible with operator '{op}'."),
            Self::UnexpectedError { details, line } => {
                write!(f, "Error on line {line}:\n\tUnexpected error: {details}")
            },
            Self::IterableExpected { found, line } => write!(f,
                                                             "Error on line {line}:\n\tFor loop expects a list to iterate on, but found {found}."),
            Self::TypesNotComparable { left, right, line } => write!(f,
                                                                     "Error on line {line}:\n\tValues of types {left} and {right} cannot be ordered."),
            Self::ParametersCountNotExpected { name,
                                               given,
                                               expected,
                                               line, } => write!(f,
                                                                 "Error on line {line}:\n\tFunction '{name}' expects {expected} parameters, but {given} were given."),
            Self::TypeNotExpected { expected, found, line } => write!(f,
                                                                      "Error on line {line}:\n\tExpected a value of type {expected}, but found {found}."),
            Self::DivisionByZero { line } => {
                write!(f, "Error on line {line}:\n\tDivision by zero.")
            },
            Self::Overflow { line } => {
                write!(f, "Error on line {line}:\n\tInteger overflow while computing the result.")
            },
            Self::FunctionAlreadyDefined { name, line } => {
                write!(f, "Error on line {line}:\n\tFunction '{name}' is already defined.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}

use crate::token::TokenType;
use thiserror::Error;

/// An error raised while tokenizing or parsing an expression.
///
/// Every variant carries the byte offset of the offending character or
/// token, so callers can render a caret pointing into the source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character sequence matched no token rule and is not whitespace.
    #[error("unknown token start character {character:?}")]
    UnknownToken { character: char, offset: usize },

    /// The token cannot begin an expression.
    #[error("could not parse {text:?}")]
    UnexpectedToken { text: String, offset: usize },

    /// A specific token was required and something else was found.
    #[error("expected {expected:?} but got {found:?}")]
    Expected {
        expected: TokenType,
        found: TokenType,
        offset: usize,
    },

    /// A literal token whose text does not form a valid number.
    #[error("could not parse literal {text:?}, invalid number")]
    InvalidLiteral { text: String, offset: usize },

    /// The left-hand side of an assignment is not an identifier.
    #[error("the left-hand side of an assignment must be a name")]
    InvalidAssignmentTarget { offset: usize },

    /// The callee of a function call is not an identifier.
    #[error("the callee of a function call must be a name")]
    InvalidCallee { offset: usize },
}

impl ParseError {
    /// Returns the byte offset into the source string this error points at.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnknownToken { offset, .. }
            | ParseError::UnexpectedToken { offset, .. }
            | ParseError::Expected { offset, .. }
            | ParseError::InvalidLiteral { offset, .. }
            | ParseError::InvalidAssignmentTarget { offset }
            | ParseError::InvalidCallee { offset } => *offset,
        }
    }
}

/// An error raised while evaluating an expression.
///
/// The variant is the error kind; the `Display` implementation is the
/// human-readable message. None of these are recovered internally: a
/// failing sub-expression voids the whole expression's result, and side
/// effects already performed are not rolled back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// An identifier is not bound to a variable.
    #[error("no variable with the name {0:?} could be found")]
    UndefinedVariable(String),

    /// An identifier is not bound to a function.
    #[error("no function with the name {0:?} could be found")]
    UndefinedFunction(String),

    /// Wrong value shape: not a number, not an integer, wrong argument
    /// count, or an out-of-range bound.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Division (or floor-mod) by exact zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Attempted to reassign a constant.
    #[error("cannot replace variable {0:?} as it is a constant")]
    ConstantVariable(String),

    /// Attempted to replace a builtin function.
    #[error("cannot replace function {0:?} as it is a built-in function")]
    BuiltinFunction(String),
}

/// Any failure of the parse-then-evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

use crate::complex::ComplexNumber;
use crate::error::EvalError;
use std::fmt;

/// The result of evaluating an expression.
///
/// `None` is the absence of a value; it is bound to the identifier `None`
/// in every environment. Arithmetic requires `Number` and reports a typed
/// argument error on anything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(ComplexNumber),
    None,
}

impl Value {
    /// Returns the contained complex number, or an argument error if this
    /// value is not a number.
    pub fn expect_number(&self) -> Result<ComplexNumber, EvalError> {
        match self {
            Value::Number(number) => Ok(*number),
            Value::None => Err(EvalError::InvalidArgument(format!(
                "the argument is not a complex number ({}), while a complex number was expected",
                self
            ))),
        }
    }

    /// Returns the contained value as an integer, or an argument error if
    /// this value is not an integer number.
    pub fn expect_integer(&self) -> Result<i64, EvalError> {
        match self {
            Value::Number(number) if number.is_integer() => number.int_value(),
            _ => Err(EvalError::InvalidArgument(format!(
                "the argument is not an integer ({}), while an integer was expected",
                self
            ))),
        }
    }
}

impl From<ComplexNumber> for Value {
    fn from(number: ComplexNumber) -> Value {
        Value::Number(number)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(number) => write!(f, "{}", number),
            Value::None => write!(f, "None"),
        }
    }
}

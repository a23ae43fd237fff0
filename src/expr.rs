use crate::complex::ComplexNumber;
use crate::error::EvalError;
use crate::math;
use crate::symbol::SymbolTable;
use crate::value::Value;
use tracing::trace;

/// An expression tree node which can be evaluated to a [`Value`].
///
/// The tree is built by the parser and owns its sub-expressions; every
/// node's sole operation is [`evaluate`](Expression::evaluate).
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A constant number.
    Literal(ComplexNumber),
    /// A reference to a variable.
    Identifier(String),
    /// An assignment to a variable; evaluates to the assigned value.
    Assign {
        name: String,
        value: Box<Expression>,
    },
    /// Sign inversion.
    Invert(Box<Expression>),
    /// Absolute value.
    Absolute(Box<Expression>),
    /// Factorial; the operand must evaluate to an integer >= 0.
    Factorial(Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Exponent(Box<Expression>, Box<Expression>),
    /// Floor-mod; both operands must evaluate to integers.
    Modulus(Box<Expression>, Box<Expression>),
    /// A function call with unevaluated argument expressions.
    FunctionCall {
        name: String,
        args: Vec<Expression>,
    },
}

impl Expression {
    /// Evaluates the expression against the given environment.
    ///
    /// Operands evaluate left to right, eagerly; a failing sub-expression
    /// aborts the whole evaluation without rolling back side effects
    /// already performed.
    pub fn evaluate(&self, env: &mut SymbolTable) -> Result<Value, EvalError> {
        match self {
            Expression::Literal(number) => Ok(Value::Number(*number)),
            Expression::Identifier(name) => match env.variable(name) {
                Some(variable) => Ok(variable.borrow().value()),
                None => Err(EvalError::UndefinedVariable(name.clone())),
            },
            Expression::Assign { name, value } => {
                let value = value.evaluate(env)?;
                env.set_variable(name, value)?;
                trace!(name = %name, %value, "assigned");
                Ok(value)
            }
            Expression::Invert(operand) => {
                let number = operand.evaluate(env)?.expect_number()?;
                Ok(Value::Number(-number))
            }
            Expression::Absolute(operand) => {
                let number = operand.evaluate(env)?.expect_number()?;
                Ok(Value::Number(ComplexNumber::real_only(number.abs())))
            }
            Expression::Factorial(operand) => {
                let max = operand.evaluate(env)?.expect_integer()?;

                if max < 0 {
                    return Err(EvalError::InvalidArgument(
                        "factorial is only defined for natural numbers (and zero)".to_owned(),
                    ));
                }

                let mut res: i64 = 1;
                for i in 1..=max {
                    res = res.wrapping_mul(i);
                }

                Ok(Value::Number(ComplexNumber::real_only(res as f64)))
            }
            Expression::Add(left, right) => {
                let left = left.evaluate(env)?.expect_number()?;
                let right = right.evaluate(env)?.expect_number()?;
                Ok(Value::Number(left + right))
            }
            Expression::Subtract(left, right) => {
                let left = left.evaluate(env)?.expect_number()?;
                let right = right.evaluate(env)?.expect_number()?;
                Ok(Value::Number(left - right))
            }
            Expression::Multiply(left, right) => {
                let left = left.evaluate(env)?.expect_number()?;
                let right = right.evaluate(env)?.expect_number()?;
                Ok(Value::Number(left * right))
            }
            Expression::Divide(left, right) => {
                let left = left.evaluate(env)?.expect_number()?;
                let right = right.evaluate(env)?.expect_number()?;
                Ok(Value::Number(left.divide(right)?))
            }
            Expression::Exponent(left, right) => {
                let base = left.evaluate(env)?.expect_number()?;
                let exponent = right.evaluate(env)?.expect_number()?;
                Ok(Value::Number(pow(base, exponent)))
            }
            Expression::Modulus(left, right) => {
                let b = left.evaluate(env)?.expect_integer()?;
                let n = right.evaluate(env)?.expect_integer()?;
                Ok(Value::Number(ComplexNumber::real_only(floor_mod(b, n)? as f64)))
            }
            Expression::FunctionCall { name, args } => {
                let function = env
                    .function(name)
                    .ok_or_else(|| EvalError::UndefinedFunction(name.clone()))?;
                function.evaluate(args, env)
            }
        }
    }
}

/// Raises `z` to the power of `n`.
///
/// `0^n` is `0`. An integer exponent greater than 1 goes through repeated
/// multiplication, which is exact where the polar form would leave
/// round-off residue (so `(2+2i) ** 2` is exactly `8i`). A real exponent
/// over a positive real base uses real exponentiation directly; everything
/// else decomposes through `exp(n * ln(z))`.
pub fn pow(z: ComplexNumber, n: ComplexNumber) -> ComplexNumber {
    if z == ComplexNumber::ZERO {
        return ComplexNumber::ZERO;
    }

    if n.is_real() && n.real() > 1.0 && n.is_integer() {
        let mut res = ComplexNumber::real_only(1.0);
        let e = n.real() as i64;
        for _ in 0..e {
            res = res * z;
        }
        return res;
    }

    if n.is_real() {
        return pow_real(z, n.real());
    }

    math::exp(n * math::ln(z))
}

/// Raises `z` to a real power.
pub fn pow_real(z: ComplexNumber, n: f64) -> ComplexNumber {
    if z == ComplexNumber::ZERO {
        return ComplexNumber::ZERO;
    }
    if z.is_real() && z.real() > 0.0 {
        return ComplexNumber::real_only(z.real().powf(n));
    }

    let t = math::ln(z);
    ComplexNumber::polar((n * t.real()).exp(), n * t.imaginary())
}

/// Floor-mod: the result's sign matches the divisor's. A zero divisor is
/// an arithmetic error.
pub fn floor_mod(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::DivisionByZero);
    }

    let r = a % b;
    if r != 0 && (r ^ b) < 0 {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

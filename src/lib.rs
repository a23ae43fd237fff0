//! # ccalc
//!
//! The evaluation core of a small interactive calculator language over
//! complex numbers: a source string is tokenized, parsed into an
//! expression tree under operator-precedence rules, and evaluated against
//! a mutable environment of variables and functions.
//!
//! ```
//! use ccalc::{evaluate, parse, ComplexNumber, SymbolTable, Value};
//!
//! let mut env = SymbolTable::new();
//! let expression = parse("1 + 2 * 3").unwrap();
//! let result = evaluate(&expression, &mut env).unwrap();
//! assert_eq!(result, Value::Number(ComplexNumber::real_only(7.0)));
//! ```
//!
//! Supported syntax:
//! * decimal literals with optional fraction, scientific exponent and a
//!   trailing `i` for imaginary values: `2`, `56.3`, `25E-3`, `2.5i`
//! * `0b`/`0o`/`0x`-prefixed integer literals, with `_` permitted anywhere
//!   inside a numeral as a visual separator: `0b1100_1101`
//! * operators `+ - * / ** ! mod =`, absolute value `|...|`, grouping with
//!   parentheses, function calls `name(arg, arg, ...)`
//! * builtin constants `i`, `pi`, `e`, `None` and the builtin functions
//!   `abs`, `sqr`, `sqrt`, `exp`, `ln`, `log`, `arg`, `Re`, `Im`, `conj`,
//!   `polar`, the trigonometric/hyperbolic family and their inverses,
//!   `random`, `rand_int` and `sum`
//!
//! Every successful evaluation also rebinds the variable `Ans` to the
//! produced value, so stateful calculator sessions can chain off the last
//! result.

pub mod complex;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod math;
pub mod parser;
pub mod symbol;
pub mod token;
pub mod value;

pub use complex::ComplexNumber;
pub use error::{CalcError, EvalError, ParseError};
pub use expr::Expression;
pub use lexer::Lexer;
pub use parser::Parser;
pub use symbol::{FunctionSymbol, SymbolTable, Variable};
pub use token::{Token, TokenType};
pub use value::Value;

/// Tokenizes and parses one expression out of the given source string.
///
/// Trailing tokens after a complete expression are not an error at this
/// layer; callers decide whether to require full consumption.
pub fn parse(text: &str) -> Result<Expression, ParseError> {
    let mut parser = Parser::new(Lexer::new(text)?);
    parser.parse_expression()
}

/// Evaluates an expression against the given environment and rebinds the
/// `Ans` variable to the produced value.
pub fn evaluate(expression: &Expression, env: &mut SymbolTable) -> Result<Value, EvalError> {
    env.evaluate_expression(expression)
}

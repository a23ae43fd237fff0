//! End-to-end tests driving the full pipeline through the public API.

use ccalc::{evaluate, parse, CalcError, ComplexNumber, EvalError, ParseError, SymbolTable, Value};

fn eval(text: &str, env: &mut SymbolTable) -> Result<Value, CalcError> {
    let expression = parse(text)?;
    Ok(evaluate(&expression, env)?)
}

fn eval_number(text: &str, env: &mut SymbolTable) -> ComplexNumber {
    eval(text, env)
        .unwrap_or_else(|err| panic!("{:?} failed: {}", text, err))
        .expect_number()
        .unwrap()
}

fn real(value: f64) -> ComplexNumber {
    ComplexNumber::real_only(value)
}

#[test]
fn arithmetic_precedence() {
    let mut env = SymbolTable::new();
    assert_eq!(eval_number("1 + 2 * 3", &mut env), real(7.0));
    assert_eq!(eval_number("(1 + 2) * 3", &mut env), real(9.0));
    assert_eq!(eval_number("2 ** 3 ** 2", &mut env), real(512.0));
    assert_eq!(eval_number("-2 ** 2", &mut env), real(4.0));
    assert_eq!(eval_number("-3!", &mut env), real(-6.0));
    assert_eq!(eval_number("10 - 2 - 3", &mut env), real(5.0));
    assert_eq!(eval_number("|3 - 7|", &mut env), real(4.0));
}

#[test]
fn complex_arithmetic() {
    let mut env = SymbolTable::new();
    assert_eq!(eval_number("(2+2i) ** 2", &mut env), ComplexNumber::new(0.0, 8.0));
    assert_eq!(eval_number("(1+2i) * (3+4i)", &mut env), ComplexNumber::new(-5.0, 10.0));
    assert_eq!(eval_number("2i * 3i", &mut env), real(-6.0));
    assert_eq!(eval_number("|3+4i|", &mut env), real(5.0));
    assert_eq!(eval_number("conj(3+4i)", &mut env), ComplexNumber::new(3.0, -4.0));
    assert_eq!(eval_number("Im(3+4i)", &mut env), ComplexNumber::new(0.0, 4.0));
    assert_eq!(eval_number("Re(3+4i)", &mut env), real(3.0));
}

#[test]
fn builtin_functions() {
    let mut env = SymbolTable::new();
    assert_eq!(eval_number("sqrt(-1)", &mut env), ComplexNumber::I);
    assert_eq!(eval_number("sqrt(0)", &mut env), ComplexNumber::ZERO);
    assert_eq!(eval_number("sqr(3)", &mut env), real(9.0));
    assert_eq!(eval_number("sin(pi)", &mut env), ComplexNumber::ZERO);
    assert_eq!(eval_number("polar(2, 0)", &mut env), real(2.0));
    let ln_e = eval_number("ln(e)", &mut env);
    assert!((ln_e.real() - 1.0).abs() < 1e-15 && ln_e.is_real());
}

#[test]
fn floor_mod_semantics() {
    let mut env = SymbolTable::new();
    assert_eq!(eval_number("5 mod 3", &mut env), real(2.0));
    assert_eq!(eval_number("-5 mod 3", &mut env), real(1.0));
    assert!(matches!(
        eval("2.5 mod 3", &mut env),
        Err(CalcError::Eval(EvalError::InvalidArgument(_)))
    ));
    assert_eq!(
        eval("5 mod 0", &mut env),
        Err(CalcError::Eval(EvalError::DivisionByZero))
    );
}

#[test]
fn division_by_zero_is_an_error() {
    let mut env = SymbolTable::new();
    assert_eq!(
        eval("1/0", &mut env),
        Err(CalcError::Eval(EvalError::DivisionByZero))
    );
}

#[test]
fn literal_forms() {
    let mut env = SymbolTable::new();
    assert_eq!(eval_number("0b1100_1101", &mut env), real(205.0));
    assert_eq!(eval_number("0o777", &mut env), real(511.0));
    assert_eq!(eval_number("0xff", &mut env), real(255.0));
    assert_eq!(eval_number("25E-2", &mut env), real(0.25));
    assert_eq!(eval_number("536.25i", &mut env), ComplexNumber::new(0.0, 536.25));
    assert_eq!(eval_number("1_000_000", &mut env), real(1_000_000.0));
}

#[test]
fn malformed_radix_literal() {
    let mut env = SymbolTable::new();
    assert_eq!(
        eval("0x", &mut env),
        Err(CalcError::Parse(ParseError::InvalidLiteral {
            text: "0x".to_owned(),
            offset: 0,
        }))
    );
}

#[test]
fn assignment_and_state() {
    let mut env = SymbolTable::new();
    assert_eq!(eval_number("x = 4", &mut env), real(4.0));
    assert_eq!(eval_number("x * x", &mut env), real(16.0));
    assert_eq!(eval_number("a = b = 3", &mut env), real(3.0));
    assert_eq!(eval_number("a + b", &mut env), real(6.0));

    // Assigning to a constant fails and leaves the constant unchanged.
    assert_eq!(
        eval("pi = 3", &mut env),
        Err(CalcError::Eval(EvalError::ConstantVariable("pi".to_owned())))
    );
    assert_eq!(eval_number("pi", &mut env), real(std::f64::consts::PI));
}

#[test]
fn sum_reduction() {
    let mut env = SymbolTable::new();
    assert_eq!(eval_number("sum(0, 5, a, a)", &mut env), real(10.0));
    assert_eq!(eval_number("sum(1, 4, k, k * k)", &mut env), real(14.0));

    // The loop variable does not leak into the calling scope.
    assert_eq!(
        eval("a", &mut env),
        Err(CalcError::Eval(EvalError::UndefinedVariable("a".to_owned())))
    );
}

#[test]
fn ans_is_rebound() {
    let mut env = SymbolTable::new();
    eval("6 * 7", &mut env).unwrap();
    assert_eq!(eval_number("Ans", &mut env), real(42.0));
    assert_eq!(eval_number("Ans + Ans", &mut env), real(84.0));
    // A failing evaluation leaves Ans at the last successful result.
    let _ = eval("1/0", &mut env);
    assert_eq!(eval_number("Ans", &mut env), real(84.0));
}

#[test]
fn none_value() {
    let mut env = SymbolTable::new();
    assert_eq!(eval("None", &mut env), Ok(Value::None));
    assert!(matches!(
        eval("None + 1", &mut env),
        Err(CalcError::Eval(EvalError::InvalidArgument(_)))
    ));
}

#[test]
fn undefined_references() {
    let mut env = SymbolTable::new();
    assert_eq!(
        eval("nope", &mut env),
        Err(CalcError::Eval(EvalError::UndefinedVariable("nope".to_owned())))
    );
    assert_eq!(
        eval("nope(1)", &mut env),
        Err(CalcError::Eval(EvalError::UndefinedFunction("nope".to_owned())))
    );
}

#[test]
fn parse_errors_carry_offsets() {
    let err = parse("1 + $").unwrap_err();
    assert_eq!(err, ParseError::UnknownToken { character: '$', offset: 4 });
    assert_eq!(err.offset(), 4);

    let err = parse("3 = 4").unwrap_err();
    assert_eq!(err.offset(), 2);
}

#[test]
fn factorial_of_expression() {
    let mut env = SymbolTable::new();
    assert_eq!(eval_number("(2 + 3)!", &mut env), real(120.0));
    assert_eq!(eval_number("0!", &mut env), real(1.0));
    assert!(matches!(
        eval("(0 - 1)!", &mut env),
        Err(CalcError::Eval(EvalError::InvalidArgument(_)))
    ));
}

#[test]
fn idempotent_pure_expressions() {
    let mut env = SymbolTable::new();
    let expression = parse("sqrt(2) * sin(1) + |1 - 3i|").unwrap();
    let first = evaluate(&expression, &mut env).unwrap();
    let second = evaluate(&expression, &mut env).unwrap();
    assert_eq!(first, second);
}

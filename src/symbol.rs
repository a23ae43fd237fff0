use crate::complex::ComplexNumber;
use crate::error::EvalError;
use crate::expr::{floor_mod, Expression};
use crate::math;
use crate::value::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::{E, PI};
use std::rc::Rc;
use tracing::debug;

/// A variable with a value and a flag marking it as a constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    value: Value,
    constant: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: Value, constant: bool) -> Variable {
        Variable {
            name: name.into(),
            value,
            constant,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn is_constant(&self) -> bool {
        self.constant
    }

    /// Replaces the value of this variable in place.
    ///
    /// Fails with a state error if the variable is a constant.
    pub fn set_value(&mut self, value: Value) -> Result<(), EvalError> {
        if self.constant {
            return Err(EvalError::ConstantVariable(self.name.clone()));
        }
        self.value = value;
        Ok(())
    }
}

type OneArgumentFn = fn(ComplexNumber) -> Result<ComplexNumber, EvalError>;
type NativeFn = fn(&[f64]) -> Result<ComplexNumber, EvalError>;

/// A function value invoked by call expressions.
///
/// `evaluate` receives the *unevaluated* argument expressions, so variants
/// like the bounded-sum reduction can bind a private scoped variable before
/// evaluating their body argument repeatedly.
pub enum FunctionSymbol {
    /// A native function over a fixed number of evaluated real arguments.
    Native {
        arity: usize,
        function: NativeFn,
        builtin: bool,
    },
    /// A native function over one evaluated complex argument.
    OneArgument {
        function: OneArgumentFn,
        builtin: bool,
    },
    /// `random()`: a uniform draw in `[0, 1)`.
    Random,
    /// `rand_int(bound)` / `rand_int(min, max)`.
    RandomInteger,
    /// `sum(min, max, variable, body)`: sums `body` over `min..max` with
    /// `variable` bound in a scoped copy of the environment.
    Sum,
}

impl FunctionSymbol {
    pub fn is_builtin(&self) -> bool {
        match self {
            FunctionSymbol::Native { builtin, .. } => *builtin,
            FunctionSymbol::OneArgument { builtin, .. } => *builtin,
            FunctionSymbol::Random | FunctionSymbol::RandomInteger | FunctionSymbol::Sum => true,
        }
    }

    /// Evaluates this function given the argument expressions and the
    /// environment of the call site.
    pub fn evaluate(
        &self,
        args: &[Expression],
        env: &mut SymbolTable,
    ) -> Result<Value, EvalError> {
        match self {
            FunctionSymbol::OneArgument { function, .. } => {
                if args.len() != 1 {
                    return Err(arity_error(args.len(), 1));
                }

                let number = args[0].evaluate(env)?.expect_number()?;
                Ok(Value::Number(function(number)?))
            }
            FunctionSymbol::Native { arity, function, .. } => {
                if args.len() != *arity {
                    return Err(arity_error(args.len(), *arity));
                }

                let mut reals = Vec::with_capacity(*arity);
                for arg in args {
                    reals.push(arg.evaluate(env)?.expect_number()?.real_value()?);
                }
                Ok(Value::Number(function(&reals)?))
            }
            FunctionSymbol::Random => {
                if !args.is_empty() {
                    return Err(arity_error(args.len(), 0));
                }

                Ok(Value::Number(ComplexNumber::real_only(env.random().gen())))
            }
            FunctionSymbol::RandomInteger => {
                if args.len() > 2 {
                    return Err(EvalError::InvalidArgument(format!(
                        "too many arguments ({}), expected maximum 2",
                        args.len()
                    )));
                }

                let first = integer_arg(args, env, 0)?;
                if args.len() == 2 {
                    let max = integer_arg(args, env, 1)?;

                    if first >= max {
                        return Err(EvalError::InvalidArgument(format!(
                            "the minimum bound ({}) is greater than the maximum bound ({})",
                            first, max
                        )));
                    }

                    let draw: i64 = env.random().gen();
                    let result = first + floor_mod(draw, max - first)?;
                    Ok(Value::Number(ComplexNumber::real_only(result as f64)))
                } else {
                    let draw: i64 = env.random().gen();
                    Ok(Value::Number(ComplexNumber::real_only(
                        floor_mod(draw, first)? as f64,
                    )))
                }
            }
            FunctionSymbol::Sum => {
                if args.len() != 4 {
                    return Err(arity_error(args.len(), 4));
                }

                let min = integer_arg(args, env, 0)?;
                let max = integer_arg(args, env, 1)?;

                if min > max {
                    return Err(EvalError::InvalidArgument(format!(
                        "the max bound ({}) is smaller than the min bound ({})",
                        max, min
                    )));
                }

                let variable = match &args[2] {
                    Expression::Identifier(name) => name.clone(),
                    _ => {
                        return Err(EvalError::InvalidArgument(
                            "expected a variable name for argument 3".to_owned(),
                        ))
                    }
                };

                // The loop variable lives in a scoped copy, so it does not
                // leak into the caller's environment.
                let mut scope = env.copy();
                let body = &args[3];
                let mut real = 0.0;
                let mut imaginary = 0.0;

                for i in min..max {
                    scope.set_variable(&variable, Value::Number(ComplexNumber::real_only(i as f64)))?;

                    let res = body.evaluate(&mut scope)?.expect_number()?;
                    real += res.real();
                    imaginary += res.imaginary();
                }

                Ok(Value::Number(ComplexNumber::new(real, imaginary)))
            }
        }
    }
}

fn arity_error(got: usize, expected: usize) -> EvalError {
    if got < expected {
        EvalError::InvalidArgument(format!(
            "too few arguments were passed ({}), expected: {}",
            got, expected
        ))
    } else {
        EvalError::InvalidArgument(format!(
            "too many arguments were passed ({}), expected: {}",
            got, expected
        ))
    }
}

/// Evaluates the argument at `index` and requires it to be an integer.
fn integer_arg(
    args: &[Expression],
    env: &mut SymbolTable,
    index: usize,
) -> Result<i64, EvalError> {
    let arg = args.get(index).ok_or_else(|| {
        EvalError::InvalidArgument(format!(
            "too few arguments were passed, expected at least {}",
            index + 1
        ))
    })?;

    arg.evaluate(env)?.expect_integer()
}

/// An environment mapping names to variables and functions.
///
/// A table is constructed with the builtin constants and functions
/// pre-registered; user code may only add new bindings or mutate
/// non-constant variables. Constants and builtin functions are enforced at
/// write time. The table is designed for single-threaded use; nested
/// scopes are obtained with [`copy`](SymbolTable::copy).
pub struct SymbolTable {
    variables: HashMap<String, Rc<RefCell<Variable>>>,
    functions: HashMap<String, Rc<FunctionSymbol>>,
    random: StdRng,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        let mut table = SymbolTable {
            variables: HashMap::new(),
            functions: HashMap::new(),
            random: StdRng::from_entropy(),
        };
        table.register_builtins();
        table
    }

    fn register_builtins(&mut self) {
        /* Constants */
        self.register_constant("i", Value::Number(ComplexNumber::I));
        self.register_constant("pi", Value::Number(ComplexNumber::real_only(PI)));
        self.register_constant("e", Value::Number(ComplexNumber::real_only(E)));
        self.register_constant("None", Value::None);

        /* Basic functions */
        self.register_one_arg("abs", |z| Ok(ComplexNumber::real_only(z.abs())));
        self.register_one_arg("sqr", |z| Ok(math::sqr(z)));
        self.register_one_arg("sqrt", |z| Ok(math::sqrt(z)));
        self.register_one_arg("exp", |z| Ok(math::exp(z)));
        self.register_one_arg("ln", |z| Ok(math::ln(z)));
        self.register_one_arg("log", math::log);

        /* Random functions */
        self.register_function("random", FunctionSymbol::Random);
        self.register_function("rand_int", FunctionSymbol::RandomInteger);

        /* Complex-related functions */
        self.register_one_arg("arg", |z| Ok(ComplexNumber::real_only(z.arg())));
        self.register_one_arg("Re", |z| Ok(ComplexNumber::real_only(z.real())));
        self.register_one_arg("Im", |z| Ok(ComplexNumber::new(0.0, z.imaginary())));
        self.register_one_arg("conj", |z| Ok(z.conjugate()));
        self.register_native("polar", 2, |args| match args {
            [r, theta] => Ok(ComplexNumber::polar(*r, *theta)),
            _ => Err(EvalError::InvalidArgument(
                "polar takes a magnitude and a phase angle".to_owned(),
            )),
        });

        /* Trigonometry functions */
        self.register_one_arg("cos", |z| Ok(math::cos(z)));
        self.register_one_arg("sin", |z| Ok(math::sin(z)));
        self.register_one_arg("tan", math::tan);

        self.register_one_arg("acos", |z| Ok(math::acos(z)));
        self.register_one_arg("asin", |z| Ok(math::asin(z)));
        self.register_one_arg("atan", |z| Ok(math::atan(z)));

        self.register_one_arg("cosh", |z| Ok(math::cosh(z)));
        self.register_one_arg("sinh", |z| Ok(math::sinh(z)));
        self.register_one_arg("tanh", math::tanh);

        self.register_one_arg("acosh", |z| Ok(math::acosh(z)));
        self.register_one_arg("asinh", |z| Ok(math::asinh(z)));
        self.register_one_arg("atanh", |z| Ok(math::atanh(z)));

        /* Misc functions */
        self.register_function("sum", FunctionSymbol::Sum);
    }

    fn register_constant(&mut self, id: &str, value: Value) {
        self.variables.insert(
            id.to_owned(),
            Rc::new(RefCell::new(Variable::new(id, value, true))),
        );
    }

    fn register_one_arg(&mut self, id: &str, function: OneArgumentFn) {
        self.register_function(id, FunctionSymbol::OneArgument { function, builtin: true });
    }

    fn register_native(&mut self, id: &str, arity: usize, function: NativeFn) {
        self.register_function(id, FunctionSymbol::Native { arity, function, builtin: true });
    }

    fn register_function(&mut self, id: &str, function: FunctionSymbol) {
        self.functions.insert(id.to_owned(), Rc::new(function));
    }

    /// Returns the random number generator owned by this table.
    pub fn random(&mut self) -> &mut StdRng {
        &mut self.random
    }

    /// Gets a variable by its identifier.
    pub fn variable(&self, id: &str) -> Option<Rc<RefCell<Variable>>> {
        self.variables.get(id).map(Rc::clone)
    }

    /// Sets a value to a variable, creating a new non-constant variable if
    /// the name is unbound.
    ///
    /// Fails with a state error if the name is bound to a constant.
    pub fn set_variable(&mut self, id: &str, value: Value) -> Result<(), EvalError> {
        match self.variables.get(id) {
            Some(variable) => variable.borrow_mut().set_value(value),
            None => {
                self.variables.insert(
                    id.to_owned(),
                    Rc::new(RefCell::new(Variable::new(id, value, false))),
                );
                Ok(())
            }
        }
    }

    /// Gets a function by its identifier.
    pub fn function(&self, id: &str) -> Option<Rc<FunctionSymbol>> {
        self.functions.get(id).map(Rc::clone)
    }

    /// Sets a function.
    ///
    /// Fails with a state error if the name is bound to a builtin function.
    pub fn set_function(&mut self, id: &str, function: FunctionSymbol) -> Result<(), EvalError> {
        if let Some(old) = self.functions.get(id) {
            if old.is_builtin() {
                return Err(EvalError::BuiltinFunction(id.to_owned()));
            }
        }
        self.functions.insert(id.to_owned(), Rc::new(function));
        Ok(())
    }

    /// Evaluates an expression and rebinds the result to the `Ans`
    /// variable.
    pub fn evaluate_expression(&mut self, expression: &Expression) -> Result<Value, EvalError> {
        let result = expression.evaluate(self)?;
        self.set_variable("Ans", result)?;
        debug!(%result, "evaluated");
        Ok(result)
    }

    /// Returns a scoped copy of this table.
    ///
    /// The copy's binding maps are forked, but they reference the same
    /// variable and function records: mutating a shared variable's value
    /// through either table is visible through the other, while adding a
    /// binding to the copy does not affect the original. The copy owns a
    /// freshly seeded random source.
    pub fn copy(&self) -> SymbolTable {
        let mut copy = SymbolTable::new();
        copy.variables
            .extend(self.variables.iter().map(|(k, v)| (k.clone(), Rc::clone(v))));
        copy.functions
            .extend(self.functions.iter().map(|(k, v)| (k.clone(), Rc::clone(v))));
        copy
    }

    /// Discards all entries and re-registers the builtin set.
    pub fn clear(&mut self) {
        self.variables.clear();
        self.functions.clear();
        self.register_builtins();
    }
}

impl Default for SymbolTable {
    fn default() -> SymbolTable {
        SymbolTable::new()
    }
}

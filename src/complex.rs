use crate::error::EvalError;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A complex number with a real part and an imaginary part.
///
/// Values are immutable; every operation returns a new number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexNumber {
    real: f64,
    imaginary: f64,
}

impl ComplexNumber {
    /// The complex number zero.
    pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
    /// The constant i.
    pub const I: ComplexNumber = ComplexNumber::new(0.0, 1.0);

    pub const fn new(real: f64, imaginary: f64) -> ComplexNumber {
        ComplexNumber { real, imaginary }
    }

    pub const fn real_only(real: f64) -> ComplexNumber {
        ComplexNumber::new(real, 0.0)
    }

    /// Returns the complex number with magnitude `r` and phase angle `theta`.
    pub fn polar(r: f64, theta: f64) -> ComplexNumber {
        ComplexNumber::new(r * theta.cos(), r * theta.sin())
    }

    pub fn real(&self) -> f64 {
        self.real
    }

    pub fn imaginary(&self) -> f64 {
        self.imaginary
    }

    /// Returns whether this number is a real number.
    pub fn is_real(&self) -> bool {
        self.imaginary == 0.0
    }

    /// Returns whether this number is an integer.
    pub fn is_integer(&self) -> bool {
        self.is_real() && self.real == (self.real as i64) as f64
    }

    /// Returns the conjugate of this complex number.
    pub fn conjugate(&self) -> ComplexNumber {
        ComplexNumber::new(self.real, -self.imaginary)
    }

    /// Returns the absolute value of this complex number.
    ///
    /// Both components are scaled down by the larger one before squaring, so
    /// the intermediate squares cannot overflow or underflow.
    pub fn abs(&self) -> f64 {
        let mut x = self.real;
        let mut y = self.imaginary;
        let s = x.abs().max(y.abs());
        if s == 0.0 {
            return s;
        }
        x /= s;
        y /= s;
        s * (x * x + y * y).sqrt()
    }

    /// Returns the argument of this complex number.
    pub fn arg(&self) -> f64 {
        self.imaginary.atan2(self.real)
    }

    /// Divides this complex number by a real coefficient.
    ///
    /// Fails if the coefficient is exactly zero.
    pub fn divide_real(&self, coefficient: f64) -> Result<ComplexNumber, EvalError> {
        if coefficient == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(ComplexNumber::new(
            self.real / coefficient,
            self.imaginary / coefficient,
        ))
    }

    /// Divides this complex number by another complex number.
    ///
    /// Multiplies by the conjugate over the squared modulus; fails if the
    /// divisor is exactly zero.
    pub fn divide(&self, other: ComplexNumber) -> Result<ComplexNumber, EvalError> {
        let nominator = *self * other.conjugate();
        nominator.divide_real(other.real * other.real + other.imaginary * other.imaginary)
    }

    /// Returns this number as an integer.
    ///
    /// Fails if this number is not an integer value.
    pub fn int_value(&self) -> Result<i64, EvalError> {
        if !self.is_integer() {
            return Err(EvalError::InvalidArgument(format!(
                "the argument is not an integer ({}), while an integer was expected",
                self
            )));
        }
        Ok(self.real as i64)
    }

    /// Returns this number as a real number.
    ///
    /// Fails if this number is not a real value.
    pub fn real_value(&self) -> Result<f64, EvalError> {
        if !self.is_real() {
            return Err(EvalError::InvalidArgument(format!(
                "the argument is not a real number ({}), while a real number was expected",
                self
            )));
        }
        Ok(self.real)
    }
}

impl Add for ComplexNumber {
    type Output = ComplexNumber;

    fn add(self, other: ComplexNumber) -> ComplexNumber {
        ComplexNumber::new(self.real + other.real, self.imaginary + other.imaginary)
    }
}

impl Sub for ComplexNumber {
    type Output = ComplexNumber;

    fn sub(self, other: ComplexNumber) -> ComplexNumber {
        ComplexNumber::new(self.real - other.real, self.imaginary - other.imaginary)
    }
}

impl Mul for ComplexNumber {
    type Output = ComplexNumber;

    fn mul(self, other: ComplexNumber) -> ComplexNumber {
        let (a, b) = (self.real, self.imaginary);
        let (c, d) = (other.real, other.imaginary);
        // (a+bi)(c+di) = (ac - bd) + (ad + bc)i
        ComplexNumber::new(a * c - b * d, a * d + b * c)
    }
}

impl Mul<f64> for ComplexNumber {
    type Output = ComplexNumber;

    fn mul(self, coefficient: f64) -> ComplexNumber {
        ComplexNumber::new(self.real * coefficient, self.imaginary * coefficient)
    }
}

impl Add<f64> for ComplexNumber {
    type Output = ComplexNumber;

    fn add(self, real: f64) -> ComplexNumber {
        ComplexNumber::new(self.real + real, self.imaginary)
    }
}

impl Sub<f64> for ComplexNumber {
    type Output = ComplexNumber;

    fn sub(self, real: f64) -> ComplexNumber {
        ComplexNumber::new(self.real - real, self.imaginary)
    }
}

impl Neg for ComplexNumber {
    type Output = ComplexNumber;

    fn neg(self) -> ComplexNumber {
        ComplexNumber::new(-self.real, -self.imaginary)
    }
}

impl fmt::Display for ComplexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.real == 0.0 && self.imaginary == 0.0 {
            return write!(f, "0");
        }

        if self.real != 0.0 {
            write!(f, "{}", self.real)?;
            if self.imaginary > 0.0 {
                write!(f, "+")?;
            }
        }

        if self.imaginary == -1.0 {
            write!(f, "-i")
        } else if self.imaginary == 1.0 {
            write!(f, "i")
        } else if self.imaginary == 0.0 {
            Ok(())
        } else {
            write!(f, "{}i", self.imaginary)
        }
    }
}

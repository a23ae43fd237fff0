//! Elementary functions over complex numbers.
//!
//! Every function takes the principal branch. Functions with a well-behaved
//! real restriction shortcut to the `f64` standard library when the operand
//! is real; the inverse hyperbolic family always goes through the complex
//! formulas, which stay correct for out-of-domain real inputs
//! (e.g. `acosh(0) = iπ/2`).

use crate::complex::ComplexNumber;
use crate::error::EvalError;
use std::f64::consts::{LN_10, PI};

pub const PI_2: f64 = PI / 2.0;

/// Returns the square of the given complex number.
pub fn sqr(z: ComplexNumber) -> ComplexNumber {
    z * z
}

/// Returns the principal square root of the given complex number.
///
/// The sign of the imaginary result matches the sign of the input's
/// imaginary part. The magnitude goes through `abs() + |re|` to avoid
/// cancellation near the negative real axis.
pub fn sqrt(z: ComplexNumber) -> ComplexNumber {
    let x = z.real();
    let y = z.imaginary();

    if x == 0.0 {
        let t = (y.abs() / 2.0).sqrt();
        ComplexNumber::new(t, if y < 0.0 { -t } else { t })
    } else {
        let t = (2.0 * (z.abs() + x.abs())).sqrt();
        let u = t / 2.0;
        if x > 0.0 {
            ComplexNumber::new(u, y / t)
        } else {
            ComplexNumber::new(y.abs() / t, if y < 0.0 { -u } else { u })
        }
    }
}

/// Returns Euler's number e raised to the power of `z`.
pub fn exp(z: ComplexNumber) -> ComplexNumber {
    if z.is_real() {
        return ComplexNumber::real_only(z.real().exp());
    }
    ComplexNumber::polar(z.real().exp(), z.imaginary())
}

/// Returns the natural logarithm of `z`.
pub fn ln(z: ComplexNumber) -> ComplexNumber {
    ComplexNumber::new(z.abs().ln(), z.arg())
}

/// Returns the base 10 logarithm of `z`.
pub fn log(z: ComplexNumber) -> Result<ComplexNumber, EvalError> {
    ln(z).divide_real(LN_10)
}

/// Returns the cosine of `z`.
pub fn cos(z: ComplexNumber) -> ComplexNumber {
    if z.is_real() {
        return ComplexNumber::real_only(z.real().cos());
    }

    ComplexNumber::new(
        z.real().cos() * z.imaginary().cosh(),
        -z.real().sin() * z.imaginary().sinh(),
    )
}

/// Returns the sine of `z`.
pub fn sin(z: ComplexNumber) -> ComplexNumber {
    if z.is_real() {
        let val = z.real();
        let pi_test = val / PI;
        // An integer multiple of pi has an exactly zero sine; the float
        // product would otherwise leave noise like 1.2e-16.
        if pi_test == (pi_test as i64) as f64 {
            return ComplexNumber::ZERO;
        }
        return ComplexNumber::real_only(val.sin());
    }

    ComplexNumber::new(
        z.real().sin() * z.imaginary().cosh(),
        -z.real().cos() * z.imaginary().sinh(),
    )
}

/// Returns the tangent of `z`.
pub fn tan(z: ComplexNumber) -> Result<ComplexNumber, EvalError> {
    if z.is_real() {
        return Ok(ComplexNumber::real_only(z.real().tan()));
    }

    sin(z).divide(cos(z))
}

/// Returns the hyperbolic cosine of `z`.
pub fn cosh(z: ComplexNumber) -> ComplexNumber {
    if z.is_real() {
        return ComplexNumber::real_only(z.real().cosh());
    }

    ComplexNumber::new(
        z.real().cosh() * z.imaginary().cos(),
        z.real().sinh() * z.imaginary().sin(),
    )
}

/// Returns the hyperbolic sine of `z`.
pub fn sinh(z: ComplexNumber) -> ComplexNumber {
    if z.is_real() {
        return ComplexNumber::real_only(z.real().sinh());
    }

    ComplexNumber::new(
        z.real().sinh() * z.imaginary().cos(),
        z.real().cosh() * z.imaginary().sin(),
    )
}

/// Returns the hyperbolic tangent of `z`.
pub fn tanh(z: ComplexNumber) -> Result<ComplexNumber, EvalError> {
    if z.is_real() {
        return Ok(ComplexNumber::real_only(z.real().tanh()));
    }

    sinh(z).divide(cosh(z))
}

/// Returns the arc cosine of `z`.
pub fn acos(z: ComplexNumber) -> ComplexNumber {
    if z.is_real() {
        return ComplexNumber::real_only(z.real().acos());
    }

    let t = asin(z);
    ComplexNumber::new(PI_2 - t.real(), -t.imaginary())
}

/// Returns the arc sine of `z`, computed through `asinh` to stay stable
/// near the branch points at ±1.
pub fn asin(z: ComplexNumber) -> ComplexNumber {
    if z.is_real() {
        return ComplexNumber::real_only(z.real().asin());
    }

    let t = asinh(ComplexNumber::new(-z.imaginary(), z.real()));
    ComplexNumber::new(t.imaginary(), -t.real())
}

/// Returns the arc tangent of `z`.
pub fn atan(z: ComplexNumber) -> ComplexNumber {
    if z.is_real() {
        return ComplexNumber::real_only(z.real().atan());
    }

    let real_sqr = z.real() * z.real();
    let x = 1.0 - real_sqr - z.imaginary() * z.imaginary();

    let mut numerator = z.imaginary() + 1.0;
    let mut denominator = z.imaginary() - 1.0;

    numerator = real_sqr + numerator * numerator;
    denominator = real_sqr + denominator * denominator;

    ComplexNumber::new(
        0.5 * (2.0 * z.real()).atan2(x),
        0.25 * (numerator / denominator).ln(),
    )
}

/// Returns the inverse hyperbolic cosine of `z`, using Kahan's formula.
pub fn acosh(z: ComplexNumber) -> ComplexNumber {
    ln(sqrt((z + 1.0) * 0.5) + sqrt((z - 1.0) * 0.5)) * 2.0
}

/// Returns the inverse hyperbolic sine of `z`.
pub fn asinh(z: ComplexNumber) -> ComplexNumber {
    let t = ComplexNumber::new(
        (z.real() - z.imaginary()) * (z.real() + z.imaginary()) + 1.0,
        2.0 * z.real() * z.imaginary(),
    );
    ln(z + sqrt(t))
}

/// Returns the inverse hyperbolic tangent of `z`.
pub fn atanh(z: ComplexNumber) -> ComplexNumber {
    let i_sqr = z.imaginary() * z.imaginary();
    let x = 1.0 - i_sqr - z.real() * z.real();

    let mut numerator = 1.0 + z.real();
    let mut denominator = 1.0 - z.real();

    numerator = i_sqr + numerator * numerator;
    denominator = i_sqr + denominator * denominator;

    ComplexNumber::new(
        0.25 * (numerator.ln() - denominator.ln()),
        0.5 * (2.0 * z.imaginary()).atan2(x),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{E, FRAC_PI_2};

    fn close(a: ComplexNumber, b: ComplexNumber) -> bool {
        (a.real() - b.real()).abs() < 1e-12 && (a.imaginary() - b.imaginary()).abs() < 1e-12
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(ComplexNumber::real_only(-1.0)), ComplexNumber::I);
        assert_eq!(sqrt(ComplexNumber::ZERO), ComplexNumber::ZERO);
        assert_eq!(sqrt(ComplexNumber::real_only(4.0)), ComplexNumber::real_only(2.0));
        // The principal branch follows the sign of the input's imaginary part.
        let below = sqrt(ComplexNumber::new(-1.0, -1e-300));
        assert!(below.imaginary() < 0.0);
    }

    #[test]
    fn test_sqrt_squares_back() {
        let z = ComplexNumber::new(-3.0, 4.0);
        assert!(close(sqr(sqrt(z)), z));
    }

    #[test]
    fn test_exp_ln() {
        assert!(close(exp(ComplexNumber::real_only(1.0)), ComplexNumber::real_only(E)));
        // Euler's identity: e^(i*pi) = -1.
        let z = exp(ComplexNumber::new(0.0, PI));
        assert!((z.real() + 1.0).abs() < 1e-15);
        assert!(close(ln(ComplexNumber::real_only(E)), ComplexNumber::real_only(1.0)));
        // ln of a negative real lands on the principal branch.
        assert!(close(ln(ComplexNumber::real_only(-1.0)), ComplexNumber::new(0.0, PI)));
    }

    #[test]
    fn test_log() {
        assert!(close(
            log(ComplexNumber::real_only(100.0)).unwrap(),
            ComplexNumber::real_only(2.0)
        ));
    }

    #[test]
    fn test_sin_pi_snap() {
        assert_eq!(sin(ComplexNumber::real_only(PI)), ComplexNumber::ZERO);
        assert_eq!(sin(ComplexNumber::real_only(-3.0 * PI)), ComplexNumber::ZERO);
        assert_eq!(sin(ComplexNumber::ZERO), ComplexNumber::ZERO);
        assert!((sin(ComplexNumber::real_only(FRAC_PI_2)).real() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_trig_identity() {
        // sin² + cos² = 1 holds off the real axis too.
        let z = ComplexNumber::new(0.7, -1.3);
        let s = sin(z);
        let c = cos(z);
        assert!(close(sqr(s) + sqr(c), ComplexNumber::real_only(1.0)));
    }

    #[test]
    fn test_tan() {
        let z = ComplexNumber::new(0.3, 0.4);
        let expected = sin(z).divide(cos(z)).unwrap();
        assert_eq!(tan(z).unwrap(), expected);
    }

    #[test]
    fn test_inverse_round_trips() {
        let z = ComplexNumber::new(0.3, -0.2);
        assert!(close(sin(asin(z)), z));
        assert!(close(cos(acos(z)), z));
        assert!(close(tan(atan(z)).unwrap(), z));
        assert!(close(sinh(asinh(z)), z));
        assert!(close(tanh(atanh(z)).unwrap(), z));
    }

    #[test]
    fn test_acosh_out_of_domain_real() {
        // acosh(0) = i*pi/2: the complex branch answers where f64 would NaN.
        let z = acosh(ComplexNumber::ZERO);
        assert!(z.real().abs() < 1e-15);
        assert!((z.imaginary() - FRAC_PI_2).abs() < 1e-15);
    }
}

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_rational::{BigRational, Rational64};
use num_traits::ToPrimitive;
use std::fmt;

/// The value carried by a number literal.
///
/// Rationals come in two widths: `Rational` when numerator and denominator
/// both fit in an `i64`, `BigRational` otherwise. Both are kept in lowest
/// terms with a positive denominator.
#[derive(Debug, Clone)]
pub enum NumberValue {
    Integer(i64),
    Float(f64),
    Decimal(BigDecimal),
    Rational(Rational64),
    BigRational(BigRational),
}

impl NumberValue {
    /// Build a rational, narrowing to the machine-width representation when
    /// it fits.
    pub fn rational(value: BigRational) -> Self {
        match (value.numer().to_i64(), value.denom().to_i64()) {
            (Some(n), Some(d)) => NumberValue::Rational(Rational64::new_raw(n, d)),
            _ => NumberValue::BigRational(value),
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, NumberValue::Float(f) if f.is_nan())
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, NumberValue::Float(f) if f.is_infinite())
    }

    pub fn is_rational(&self) -> bool {
        matches!(self, NumberValue::Rational(_) | NumberValue::BigRational(_))
    }

    /// True for every representation that holds its value without rounding.
    pub fn is_exact(&self) -> bool {
        !matches!(self, NumberValue::Float(_))
    }

    /// Nearest double. A value the conversion cannot represent at all comes
    /// back as NaN rather than an error.
    pub fn to_f64(&self) -> f64 {
        match self {
            NumberValue::Integer(i) => *i as f64,
            NumberValue::Float(f) => *f,
            NumberValue::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
            NumberValue::Rational(r) => r.to_f64().unwrap_or(f64::NAN),
            NumberValue::BigRational(r) => r.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// The exact rational this value denotes; `None` for NaN and infinities.
    pub fn to_exact(&self) -> Option<BigRational> {
        match self {
            NumberValue::Integer(i) => Some(BigRational::from_integer(BigInt::from(*i))),
            NumberValue::Float(f) => BigRational::from_float(*f),
            NumberValue::Decimal(d) => Some(decimal_to_exact(d)),
            NumberValue::Rational(r) => Some(BigRational::new_raw(
                BigInt::from(*r.numer()),
                BigInt::from(*r.denom()),
            )),
            NumberValue::BigRational(r) => Some(r.clone()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NumberValue::Integer(_) => "integer",
            NumberValue::Float(_) => "float",
            NumberValue::Decimal(_) => "decimal",
            NumberValue::Rational(_) | NumberValue::BigRational(_) => "rational",
        }
    }
}

fn decimal_to_exact(d: &BigDecimal) -> BigRational {
    let (digits, scale) = d.as_bigint_and_exponent();
    let power = num_traits::pow(BigInt::from(10), scale.unsigned_abs() as usize);
    if scale >= 0 {
        BigRational::new(digits, power)
    } else {
        BigRational::from_integer(digits * power)
    }
}

/// Numeric equality across representations, with NaN equal to NaN.
///
/// Finite values compare as exact rationals, so `Integer(1)`, `Float(1.0)`
/// and `Rational(1/1)` are all equal while `Float(0.1)` and `Rational(1/10)`
/// are not.
impl PartialEq for NumberValue {
    fn eq(&self, other: &Self) -> bool {
        use NumberValue::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Rational(a), Rational(b)) => a == b,
            (Float(f), _) | (_, Float(f)) if !f.is_finite() => false,
            _ => match (self.to_exact(), other.to_exact()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::numeric::format_number_text(self))
    }
}

impl From<i64> for NumberValue {
    fn from(value: i64) -> Self {
        NumberValue::Integer(value)
    }
}

impl From<i32> for NumberValue {
    fn from(value: i32) -> Self {
        NumberValue::Integer(value as i64)
    }
}

impl From<f64> for NumberValue {
    fn from(value: f64) -> Self {
        NumberValue::Float(value)
    }
}

impl From<BigDecimal> for NumberValue {
    fn from(value: BigDecimal) -> Self {
        NumberValue::Decimal(value)
    }
}

impl From<Rational64> for NumberValue {
    fn from(value: Rational64) -> Self {
        NumberValue::Rational(value)
    }
}

impl From<BigRational> for NumberValue {
    fn from(value: BigRational) -> Self {
        NumberValue::rational(value)
    }
}

impl From<BigInt> for NumberValue {
    fn from(value: BigInt) -> Self {
        match value.to_i64() {
            Some(i) => NumberValue::Integer(i),
            None => NumberValue::Decimal(BigDecimal::new(value, 0)),
        }
    }
}

impl Default for NumberValue {
    fn default() -> Self {
        NumberValue::Integer(0)
    }
}

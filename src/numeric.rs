//! Conversion between number values and their MathJSON text encodings.
//!
//! Text → value tries, in order: the special values (`NaN`, `Infinity`,
//! `+Infinity`, `-Infinity`), repeating-decimal notation such as `1.2(3)`,
//! a 64-bit integer, a double, and finally an arbitrary-precision decimal.
//! Value → text is the inverse, with rationals written back in
//! repeating-decimal notation by long division.

use crate::error::ParseError;
use crate::types::NumberValue;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::collections::HashMap;
use std::str::FromStr;

/// Parse the text of a `{"num": ...}` object.
pub fn parse_number_text(text: &str) -> Result<NumberValue, ParseError> {
    match text {
        "NaN" => return Ok(NumberValue::Float(f64::NAN)),
        "Infinity" | "+Infinity" => return Ok(NumberValue::Float(f64::INFINITY)),
        "-Infinity" => return Ok(NumberValue::Float(f64::NEG_INFINITY)),
        _ => {}
    }

    if text.contains('(') && text.contains(')') {
        return parse_repeating_decimal(text);
    }

    if let Ok(i) = text.parse::<i64>() {
        return Ok(NumberValue::Integer(i));
    }
    if let Ok(f) = text.parse::<f64>() {
        // `inf`-style spellings carry no digits and are taken as is
        if !has_digits(text) || reads_back_as(f, text) {
            return Ok(NumberValue::Float(f));
        }
    }
    BigDecimal::from_str(text)
        .map(NumberValue::Decimal)
        .map_err(|_| ParseError::new(format!("Invalid number: {}", text), None))
}

/// Canonical text for a value, as written inside `{"num": ...}`.
///
/// Rationals are expanded by long division up to the end of their repeating
/// block, so the work grows with the period of the denominator (up to
/// `denominator - 1` digits). Rationals read from repeating-decimal text
/// have a period no longer than the block they were written with; a
/// rational built directly from a large prime denominator can take
/// hundreds of millions of digits.
pub fn format_number_text(value: &NumberValue) -> String {
    match value {
        NumberValue::Float(f) if f.is_nan() => "NaN".to_string(),
        NumberValue::Float(f) if f.is_infinite() => {
            if f.is_sign_positive() { "+Infinity".to_string() } else { "-Infinity".to_string() }
        }
        NumberValue::Integer(i) => i.to_string(),
        NumberValue::Float(f) => float_text(*f),
        NumberValue::Decimal(d) => d.to_string(),
        NumberValue::Rational(r) => rational_text(&BigInt::from(*r.numer()), &BigInt::from(*r.denom())),
        NumberValue::BigRational(r) => rational_text(r.numer(), r.denom()),
    }
}

/// Read a bare JSON number.
///
/// The literal is an integer unless it has a fraction or exponent marker.
/// Integers too wide for `i64`, and fractional literals a double cannot
/// reproduce, are kept exactly as decimals.
pub(crate) fn number_from_json(number: &serde_json::Number) -> Result<NumberValue, ParseError> {
    let text = number.to_string();
    let invalid = || ParseError::new(format!("Invalid number: {}", text), None);

    if text.contains(|c| matches!(c, '.' | 'e' | 'E')) {
        match text.parse::<f64>() {
            Ok(f) if reads_back_as(f, &text) => Ok(NumberValue::Float(f)),
            _ => BigDecimal::from_str(&text).map(NumberValue::Decimal).map_err(|_| invalid()),
        }
    } else {
        match text.parse::<i64>() {
            Ok(i) => Ok(NumberValue::Integer(i)),
            Err(_) => BigDecimal::from_str(&text).map(NumberValue::Decimal).map_err(|_| invalid()),
        }
    }
}

/// The native JSON number for a value, if it has one. Special values and
/// rationals never do.
pub(crate) fn number_to_json(value: &NumberValue) -> Option<serde_json::Number> {
    match value {
        NumberValue::Integer(i) => Some(serde_json::Number::from(*i)),
        NumberValue::Float(f) => serde_json::Number::from_f64(*f),
        NumberValue::Decimal(d) => serde_json::Number::from_str(&d.to_string()).ok(),
        NumberValue::Rational(_) | NumberValue::BigRational(_) => None,
    }
}

/// True when the double `f` parsed from `text` stands for the same decimal
/// value: finite, and its shortest form equals the text's value. Text with
/// more digits than a double holds, or outside its range, fails.
fn reads_back_as(f: f64, text: &str) -> bool {
    if !f.is_finite() {
        return false;
    }
    let exact = match BigDecimal::from_str(text) {
        Ok(exact) => exact,
        // forms only the float reader understands, such as "1."
        Err(_) => return true,
    };
    if f == 0.0 {
        return exact.is_zero();
    }
    match BigDecimal::from_str(&float_text(f)) {
        Ok(shortest) => shortest == exact,
        Err(_) => false,
    }
}

fn has_digits(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit())
}

fn float_text(f: f64) -> String {
    // Same shortest round-trip form serde_json writes for native numbers,
    // so `1.0` stays recognizably a float.
    match serde_json::Number::from_f64(f) {
        Some(n) => n.to_string(),
        None => f.to_string(),
    }
}

fn pow10(exp: usize) -> BigInt {
    num_traits::pow(BigInt::from(10), exp)
}

fn parse_digits(digits: &str) -> BigInt {
    if digits.is_empty() {
        BigInt::zero()
    } else {
        // only ASCII digits reach here
        BigInt::parse_bytes(digits.as_bytes(), 10).unwrap_or_default()
    }
}

/// Byte cursor over repeating-decimal text: `-?D*(.D*)?(D+)`.
struct DigitScanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> DigitScanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input: input.as_bytes(), pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn digits(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        // ASCII digits are always valid UTF-8
        std::str::from_utf8(&self.input[start..self.pos]).unwrap_or("")
    }

    fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }
}

fn parse_repeating_decimal(text: &str) -> Result<NumberValue, ParseError> {
    let malformed = || ParseError::new(format!("Invalid repeating decimal: {}", text), None);

    let mut scanner = DigitScanner::new(text);
    let negative = scanner.eat(b'-');
    let integer = scanner.digits();
    let fraction = if scanner.eat(b'.') { scanner.digits() } else { "" };
    if !scanner.eat(b'(') {
        return Err(malformed());
    }
    let repeating = scanner.digits();
    if repeating.is_empty() || !scanner.eat(b')') || !scanner.at_end() {
        return Err(malformed());
    }

    // 0.(R) = R / (10^|R| - 1), then shift past the non-repeating digits
    let repeating_fraction = BigRational::new(
        parse_digits(repeating),
        pow10(repeating.len()) - BigInt::one(),
    );
    let decimal_fraction = (BigRational::from_integer(parse_digits(fraction)) + repeating_fraction)
        / BigRational::from_integer(pow10(fraction.len()));
    let magnitude = BigRational::from_integer(parse_digits(integer)) + decimal_fraction;
    let value = if negative { -magnitude } else { magnitude };

    Ok(NumberValue::rational(value))
}

/// Long division of `numer / denom` (denominator positive), written as a
/// terminating decimal or with the repeating block in parentheses.
fn rational_text(numer: &BigInt, denom: &BigInt) -> String {
    if denom.is_one() {
        return numer.to_string();
    }

    let sign = if numer.is_negative() { "-" } else { "" };
    let (quotient, mut remainder) = numer.abs().div_rem(denom);

    let mut digits = String::new();
    let mut seen: HashMap<BigInt, usize> = HashMap::new();
    let ten = BigInt::from(10);

    while !remainder.is_zero() {
        if let Some(&start) = seen.get(&remainder) {
            let (prefix, block) = digits.split_at(start);
            return format!("{}{}.{}({})", sign, quotient, prefix, block);
        }
        seen.insert(remainder.clone(), digits.len());
        let (digit, rest) = (&remainder * &ten).div_rem(denom);
        digits.push_str(&digit.to_string());
        remainder = rest;
    }

    format!("{}{}.{}", sign, quotient, digits)
}

//! Numeric literal syntax.

use std::error;
use std::fmt::{self, Display};

use num_bigint::BigInt;
use num_traits::{Num, Pow};

use super::Number;

/// Largest decimal exponent accepted in an exact decimal literal such as
/// `#e1e300`.
const MAX_EXACT_EXPONENT: i64 = 100_000;

/// Error returned when a string is not a valid numeric literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNumberError {
    kind: NumberErrorKind,
}

/// The reason a numeric literal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NumberErrorKind {
    /// No digits after the prefixes.
    Empty,
    /// Unknown or repeated radix or exactness prefix.
    InvalidPrefix,
    /// A digit that is not valid for the radix in effect.
    InvalidDigit,
    /// The literal does not follow numeric syntax.
    InvalidSyntax,
    /// A rational literal with a zero denominator.
    DivisionByZero,
    /// `#e` applied to an infinity or NaN.
    NoExactRepresentation,
    /// The exponent of an exact decimal is too large to represent.
    OutOfRange,
}

impl ParseNumberError {
    fn new(kind: NumberErrorKind) -> Self {
        ParseNumberError { kind }
    }

    /// Returns the reason the literal was rejected.
    pub fn kind(&self) -> NumberErrorKind {
        self.kind
    }
}

impl Display for ParseNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            NumberErrorKind::Empty => "empty number",
            NumberErrorKind::InvalidPrefix => "invalid number prefix",
            NumberErrorKind::InvalidDigit => "invalid digit for radix",
            NumberErrorKind::InvalidSyntax => "invalid number syntax",
            NumberErrorKind::DivisionByZero => "zero denominator",
            NumberErrorKind::NoExactRepresentation => "no exact representation",
            NumberErrorKind::OutOfRange => "number out of range",
        };
        f.write_str(msg)
    }
}

impl error::Error for ParseNumberError {}

type Result<T> = std::result::Result<T, ParseNumberError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exactness {
    Unspecified,
    Exact,
    Inexact,
}

/// Parses a numeric literal.
///
/// The literal may start with a radix prefix (`#b`, `#o`, `#d`, `#x`) and an
/// exactness prefix (`#e`, `#i`) in either order; `default_radix` applies
/// when no radix prefix is present. Integers, rationals `p/q`, decimals with
/// optional exponent (radix 10 only), the special values `+inf.0`, `-inf.0`,
/// `+nan.0` and `-nan.0`, and complex numbers in rectangular (`a+bi`, `+i`)
/// or polar (`m@a`) notation are accepted.
///
/// ```
/// use lips_reader::{parse_number, Number};
///
/// assert_eq!(parse_number("#x1A", 10).unwrap(), Number::from(26));
/// assert_eq!(parse_number("#e1.5", 10).unwrap(), Number::rational(3, 2).unwrap());
/// assert!(parse_number("1e10", 10).unwrap().is_inexact());
/// assert!(parse_number("1/0", 10).is_err());
/// ```
pub fn parse_number(text: &str, default_radix: u32) -> Result<Number> {
    let mut radix = None;
    let mut exactness = Exactness::Unspecified;
    let mut rest = text;
    while let Some(after_hash) = rest.strip_prefix('#') {
        let mut chars = after_hash.chars();
        let marker = chars
            .next()
            .ok_or_else(|| ParseNumberError::new(NumberErrorKind::InvalidPrefix))?;
        match marker.to_ascii_lowercase() {
            c @ ('b' | 'o' | 'd' | 'x') if radix.is_none() => {
                radix = Some(match c {
                    'b' => 2,
                    'o' => 8,
                    'd' => 10,
                    _ => 16,
                });
            }
            'e' if exactness == Exactness::Unspecified => exactness = Exactness::Exact,
            'i' if exactness == Exactness::Unspecified => exactness = Exactness::Inexact,
            _ => return Err(ParseNumberError::new(NumberErrorKind::InvalidPrefix)),
        }
        rest = chars.as_str();
    }
    if rest.is_empty() {
        return Err(ParseNumberError::new(NumberErrorKind::Empty));
    }
    let radix = radix.unwrap_or(default_radix);
    parse_complex(rest, radix, exactness)
}

fn parse_complex(text: &str, radix: u32, exactness: Exactness) -> Result<Number> {
    if let Some((magnitude, angle)) = text.split_once('@') {
        let magnitude = parse_real(magnitude, radix, Exactness::Unspecified)?;
        let angle = parse_real(angle, radix, Exactness::Unspecified)?;
        let n = Number::polar(magnitude, angle)
            .ok_or_else(|| ParseNumberError::new(NumberErrorKind::InvalidSyntax))?;
        return apply_exactness(n, exactness);
    }
    let body = match text.strip_suffix(['i', 'I']) {
        Some(body) => body,
        None => return parse_real(text, radix, exactness),
    };
    let (re, im) = match imaginary_split(body, radix) {
        Some(at) => (
            parse_real(&body[..at], radix, exactness)?,
            &body[at..],
        ),
        None if body.starts_with(['+', '-']) => (zero(exactness), body),
        None => return Err(ParseNumberError::new(NumberErrorKind::InvalidSyntax)),
    };
    let im = match im {
        "+" => apply_exactness(Number::from(1), exactness)?,
        "-" => apply_exactness(Number::from(-1), exactness)?,
        _ => parse_real(im, radix, exactness)?,
    };
    Number::rectangular(re, im).ok_or_else(|| ParseNumberError::new(NumberErrorKind::InvalidSyntax))
}

/// Finds the sign that starts the imaginary part of a rectangular literal.
fn imaginary_split(body: &str, radix: u32) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len()).rev().find(|&i| {
        matches!(bytes[i], b'+' | b'-')
            && !(radix == 10 && matches!(bytes[i - 1], b'e' | b'E'))
    })
}

fn zero(exactness: Exactness) -> Number {
    match exactness {
        Exactness::Inexact => Number::from(0.0),
        _ => Number::from(0),
    }
}

fn apply_exactness(n: Number, exactness: Exactness) -> Result<Number> {
    match exactness {
        Exactness::Unspecified => Ok(n),
        Exactness::Inexact => Ok(n.to_inexact()),
        Exactness::Exact => n
            .to_exact()
            .ok_or_else(|| ParseNumberError::new(NumberErrorKind::NoExactRepresentation)),
    }
}

fn parse_real(text: &str, radix: u32, exactness: Exactness) -> Result<Number> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'+') => (false, &text[1..]),
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    };
    if unsigned.is_empty() {
        return Err(ParseNumberError::new(NumberErrorKind::InvalidSyntax));
    }
    if unsigned.len() != text.len() {
        let special = if unsigned.eq_ignore_ascii_case("inf.0") {
            Some(f64::INFINITY)
        } else if unsigned.eq_ignore_ascii_case("nan.0") {
            Some(f64::NAN)
        } else {
            None
        };
        if let Some(f) = special {
            let f = if negative { -f } else { f };
            return apply_exactness(Number::from(f), exactness);
        }
    }
    if let Some((numer, denom)) = unsigned.split_once('/') {
        let numer = parse_digits(numer, radix)?;
        let denom = parse_digits(denom, radix)?;
        let numer = if negative { -numer } else { numer };
        let n = Number::rational(numer, denom)
            .ok_or_else(|| ParseNumberError::new(NumberErrorKind::DivisionByZero))?;
        return apply_exactness(n, exactness);
    }
    if radix == 10 && unsigned.contains(['.', 'e', 'E']) {
        return parse_decimal(negative, unsigned, exactness);
    }
    let n = parse_digits(unsigned, radix)?;
    apply_exactness(Number::from(if negative { -n } else { n }), exactness)
}

fn parse_digits(digits: &str, radix: u32) -> Result<BigInt> {
    if digits.is_empty() {
        return Err(ParseNumberError::new(NumberErrorKind::InvalidSyntax));
    }
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseNumberError::new(NumberErrorKind::InvalidDigit));
    }
    match i64::from_str_radix(digits, radix) {
        Ok(n) => Ok(BigInt::from(n)),
        Err(_) => BigInt::from_str_radix(digits, radix)
            .map_err(|_| ParseNumberError::new(NumberErrorKind::InvalidDigit)),
    }
}

fn parse_decimal(negative: bool, unsigned: &str, exactness: Exactness) -> Result<Number> {
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty()
        || !all_digits(int_part)
        || !all_digits(frac_part)
    {
        return Err(ParseNumberError::new(NumberErrorKind::InvalidSyntax));
    }
    let exponent = match exponent {
        None => 0,
        Some(exp) => {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if digits.is_empty() || !all_digits(digits) {
                return Err(ParseNumberError::new(NumberErrorKind::InvalidSyntax));
            }
            // Saturate; anything this large is out of range for both
            // representations anyway.
            exp.parse::<i64>()
                .unwrap_or(if exp.starts_with('-') { i64::MIN } else { i64::MAX })
        }
    };
    if exactness != Exactness::Exact {
        let mut normalized = String::with_capacity(unsigned.len() + 1);
        if negative {
            normalized.push('-');
        }
        normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
        normalized.push('.');
        normalized.push_str(if frac_part.is_empty() { "0" } else { frac_part });
        normalized.push('e');
        normalized.push_str(&exponent.to_string());
        let f: f64 = normalized
            .parse()
            .map_err(|_| ParseNumberError::new(NumberErrorKind::InvalidSyntax))?;
        return Ok(Number::from(f));
    }
    let scale = exponent.saturating_sub(frac_part.len() as i64);
    if scale.unsigned_abs() > MAX_EXACT_EXPONENT.unsigned_abs() {
        return Err(ParseNumberError::new(NumberErrorKind::OutOfRange));
    }
    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);
    let mut numer = parse_digits(&digits, 10)?;
    if negative {
        numer = -numer;
    }
    let power: BigInt = Pow::pow(BigInt::from(10), scale.unsigned_abs());
    let n = if scale >= 0 {
        Number::from(numer * power)
    } else {
        Number::rational(numer, power)
            .ok_or_else(|| ParseNumberError::new(NumberErrorKind::DivisionByZero))?
    };
    Ok(n)
}

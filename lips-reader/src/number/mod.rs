//! Dynamically typed number type.
//!
//! [`Number`] models the Scheme numeric tower as a closed set of
//! representations: exact fixed-width and arbitrary-precision integers, exact
//! rationals, inexact reals and complex numbers. Values are always kept in
//! canonical form, so that structural equality coincides with `eqv?`:
//!
//! - exact integers that fit into an `i64` never use the arbitrary-precision
//!   representation;
//! - rationals are stored in lowest terms with a positive denominator greater
//!   than one;
//! - complex numbers never have an exact zero imaginary part, and their two
//!   parts always share the same exactness.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Float, One, Signed, ToPrimitive, Zero};

mod literal;
mod ops;

pub use self::literal::{parse_number, NumberErrorKind, ParseNumberError};

/// Represents a Scheme number of any kind.
#[derive(PartialEq, Clone)]
pub struct Number {
    n: N,
}

#[derive(Debug, PartialEq, Clone)]
enum N {
    Fixnum(i64),
    Bignum(BigInt),
    Ratio(Box<Ratio>),
    Real(f64),
    Complex(Box<Complex>),
}

#[derive(Debug, PartialEq, Clone)]
struct Ratio {
    numer: BigInt,
    denom: BigInt,
}

#[derive(Debug, PartialEq, Clone)]
struct Complex {
    re: Number,
    im: Number,
}

/// The representation level of a number.
///
/// Levels are ordered: each one can represent all the values of the levels
/// before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// An exact integer, of any magnitude.
    Integer,
    /// An exact rational number with a denominator other than one.
    Rational,
    /// An inexact real number.
    Real,
    /// A complex number with a non-zero imaginary part.
    Complex,
}

/// Whether a number is mathematically precise or an approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exactness {
    /// The number is represented without loss.
    Exact,
    /// The number is a floating point approximation.
    Inexact,
}

impl Number {
    /// Constructs an exact rational number `numer/denom`.
    ///
    /// The result is reduced to lowest terms, and collapses to an integer if
    /// the denominator divides the numerator. Returns `None` if `denom` is
    /// zero.
    ///
    /// ```
    /// # use lips_reader::Number;
    /// let two_thirds = Number::rational(6, 9).unwrap();
    /// assert_eq!(two_thirds, Number::rational(2, 3).unwrap());
    /// assert_eq!(Number::rational(-4, -2), Some(Number::from(2)));
    /// assert_eq!(Number::rational(1, 0), None);
    /// ```
    pub fn rational(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Option<Number> {
        let (numer, denom) = (numer.into(), denom.into());
        if denom.is_zero() {
            return None;
        }
        Some(Number::reduced(numer, denom))
    }

    /// Builds a rational in canonical form; `denom` must not be zero.
    fn reduced(mut numer: BigInt, mut denom: BigInt) -> Number {
        let divisor = numer.gcd(&denom);
        if !divisor.is_one() {
            numer /= &divisor;
            denom /= &divisor;
        }
        if denom.is_negative() {
            numer = -numer;
            denom = -denom;
        }
        if denom.is_one() {
            Number::from(numer)
        } else {
            Number {
                n: N::Ratio(Box::new(Ratio { numer, denom })),
            }
        }
    }

    /// Constructs a complex number from its real and imaginary parts.
    ///
    /// An exact zero imaginary part yields `re` itself. If the exactness of
    /// the parts differs, both are made inexact. Returns `None` if either
    /// part is itself complex.
    ///
    /// ```
    /// # use lips_reader::Number;
    /// let z = Number::rectangular(Number::from(1), Number::from(2)).unwrap();
    /// assert!(z.is_exact());
    /// assert_eq!(Number::rectangular(Number::from(5), Number::from(0)), Some(Number::from(5)));
    /// ```
    pub fn rectangular(re: Number, im: Number) -> Option<Number> {
        if re.is_complex() || im.is_complex() {
            return None;
        }
        Some(Number::complex(re, im))
    }

    /// Builds a complex number in canonical form from two real parts.
    fn complex(re: Number, im: Number) -> Number {
        if im.is_exact() && im.is_zero() {
            return re;
        }
        let (re, im) = if re.is_exact() != im.is_exact() {
            (re.to_inexact(), im.to_inexact())
        } else {
            (re, im)
        };
        Number {
            n: N::Complex(Box::new(Complex { re, im })),
        }
    }

    /// Constructs a complex number from its magnitude and angle.
    ///
    /// An exact zero angle yields the magnitude itself; otherwise the result
    /// is inexact. Returns `None` if either argument is complex.
    pub fn polar(magnitude: Number, angle: Number) -> Option<Number> {
        if magnitude.is_complex() || angle.is_complex() {
            return None;
        }
        if angle.is_exact() && angle.is_zero() {
            return Some(magnitude);
        }
        let m = magnitude.as_f64()?;
        let a = angle.as_f64()?;
        Number::rectangular(Number::from(m * a.cos()), Number::from(m * a.sin()))
    }

    /// Returns the representation level of the number.
    pub fn kind(&self) -> Kind {
        match self.n {
            N::Fixnum(_) | N::Bignum(_) => Kind::Integer,
            N::Ratio(_) => Kind::Rational,
            N::Real(_) => Kind::Real,
            N::Complex(_) => Kind::Complex,
        }
    }

    /// Returns the exactness of the number.
    pub fn exactness(&self) -> Exactness {
        if self.is_exact() {
            Exactness::Exact
        } else {
            Exactness::Inexact
        }
    }

    /// Returns true if the number is exact.
    ///
    /// ```
    /// # use lips_reader::Number;
    /// assert!(Number::from(42).is_exact());
    /// assert!(!Number::from(4.2).is_exact());
    /// ```
    pub fn is_exact(&self) -> bool {
        match &self.n {
            N::Fixnum(_) | N::Bignum(_) | N::Ratio(_) => true,
            N::Real(_) => false,
            N::Complex(z) => z.re.is_exact(),
        }
    }

    /// Returns true if the number is inexact.
    pub fn is_inexact(&self) -> bool {
        !self.is_exact()
    }

    /// Returns true for exact integers, whatever their magnitude.
    pub fn is_exact_integer(&self) -> bool {
        self.kind() == Kind::Integer
    }

    /// Returns true if the number has a non-zero imaginary part.
    pub fn is_complex(&self) -> bool {
        self.kind() == Kind::Complex
    }

    /// Returns true if the number is zero, exact or inexact.
    pub fn is_zero(&self) -> bool {
        match &self.n {
            N::Fixnum(n) => *n == 0,
            N::Real(f) => *f == 0.0,
            // Canonical forms of the other representations are never zero.
            N::Bignum(_) | N::Ratio(_) | N::Complex(_) => false,
        }
    }

    /// Returns true for negative real numbers.
    pub fn is_negative(&self) -> bool {
        match &self.n {
            N::Fixnum(n) => *n < 0,
            N::Bignum(n) => n.is_negative(),
            N::Ratio(r) => r.numer.is_negative(),
            N::Real(f) => *f < 0.0,
            N::Complex(_) => false,
        }
    }

    /// If the number is an exact integer that fits into an `i64`, returns it.
    ///
    /// ```
    /// # use lips_reader::Number;
    /// assert_eq!(Number::from(64).as_i64(), Some(64));
    /// assert_eq!(Number::from(u64::MAX).as_i64(), None);
    /// assert_eq!(Number::from(1.0).as_i64(), None);
    /// ```
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::Fixnum(n) => Some(n),
            _ => None,
        }
    }

    /// If the number is an exact, non-negative integer that fits into an
    /// `u64`, returns it.
    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match &self.n {
            N::Fixnum(n) => u64::try_from(*n).ok(),
            N::Bignum(n) => n.to_u64(),
            _ => None,
        }
    }

    /// Represents a real number as `f64`, possibly losing precision.
    ///
    /// Returns `None` for complex numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.n {
            N::Fixnum(n) => Some(*n as f64),
            N::Bignum(n) => n.to_f64(),
            N::Ratio(r) => Some(ratio_to_f64(&r.numer, &r.denom)),
            N::Real(f) => Some(*f),
            N::Complex(_) => None,
        }
    }

    /// If the number is an exact integer, returns it as a `BigInt`.
    pub fn as_bigint(&self) -> Option<BigInt> {
        match &self.n {
            N::Fixnum(n) => Some(BigInt::from(*n)),
            N::Bignum(n) => Some(n.clone()),
            _ => None,
        }
    }

    /// If the number is an exact rational (including integers), returns its
    /// numerator and denominator in lowest terms.
    ///
    /// ```
    /// # use lips_reader::Number;
    /// # use num_bigint::BigInt;
    /// let n: Number = "6/9".parse().unwrap();
    /// assert_eq!(n.to_ratio(), Some((BigInt::from(2), BigInt::from(3))));
    /// ```
    pub fn to_ratio(&self) -> Option<(BigInt, BigInt)> {
        match &self.n {
            N::Fixnum(n) => Some((BigInt::from(*n), BigInt::one())),
            N::Bignum(n) => Some((n.clone(), BigInt::one())),
            N::Ratio(r) => Some((r.numer.clone(), r.denom.clone())),
            N::Real(_) | N::Complex(_) => None,
        }
    }

    /// Returns the real and imaginary parts of a complex number.
    pub fn as_rectangular(&self) -> Option<(&Number, &Number)> {
        match &self.n {
            N::Complex(z) => Some((&z.re, &z.im)),
            _ => None,
        }
    }

    /// Converts the number to an inexact one.
    pub fn to_inexact(&self) -> Number {
        match &self.n {
            N::Real(_) => self.clone(),
            N::Complex(z) => Number {
                n: N::Complex(Box::new(Complex {
                    re: z.re.to_inexact(),
                    im: z.im.to_inexact(),
                })),
            },
            _ => Number::from(self.as_f64().unwrap_or(f64::NAN)),
        }
    }

    /// Converts the number to an exact one.
    ///
    /// Finite floating point values convert without loss, since every such
    /// value is a dyadic rational. Returns `None` for infinities and NaN.
    ///
    /// ```
    /// # use lips_reader::Number;
    /// assert_eq!(Number::from(1.5).to_exact(), Number::rational(3, 2));
    /// assert_eq!(Number::from(f64::INFINITY).to_exact(), None);
    /// ```
    pub fn to_exact(&self) -> Option<Number> {
        match &self.n {
            N::Fixnum(_) | N::Bignum(_) | N::Ratio(_) => Some(self.clone()),
            N::Real(f) => exact_from_f64(*f),
            N::Complex(z) => Number::rectangular(z.re.to_exact()?, z.im.to_exact()?),
        }
    }

    /// Dispatch based on the type of the contained value.
    ///
    /// Depending on the stored value, one of the functions of the
    /// supplied visitor will be called.
    pub fn visit<V>(&self, visitor: V) -> Result<V::Value, V::Error>
    where
        V: Visitor,
    {
        match &self.n {
            N::Fixnum(n) => visitor.visit_i64(*n),
            N::Bignum(n) => visitor.visit_bigint(n),
            N::Ratio(r) => visitor.visit_ratio(&r.numer, &r.denom),
            N::Real(f) => visitor.visit_f64(*f),
            N::Complex(z) => visitor.visit_complex(&z.re, &z.im),
        }
    }
}

/// Trait to access the value stored in `Number`.
///
/// The `Number` type does not directly expose its internal
/// structure to allow future changes without breaking the API.
///
/// Instead, you can implement this trait and pass your implementation
/// to `Number::visit`.
///
/// [`Number::visit`]: struct.Number.html#method.visit
pub trait Visitor: Sized {
    /// The return type of the visitor methods.
    type Value;
    /// The error type of the visitor methods.
    type Error;

    /// Construct an error given a message.
    ///
    /// This method is used by trait default implementations.
    fn error<T: Into<String>>(msg: T) -> Self::Error;

    /// The stored value is an exact integer fitting into `i64`.
    fn visit_i64(self, n: i64) -> Result<Self::Value, Self::Error>;

    /// The stored value is an inexact real.
    fn visit_f64(self, n: f64) -> Result<Self::Value, Self::Error>;

    /// The stored value is an exact integer outside of the `i64` range.
    fn visit_bigint(self, n: &BigInt) -> Result<Self::Value, Self::Error> {
        let _ = n;
        Err(Self::error("arbitrary-precision integers are not supported"))
    }

    /// The stored value is an exact rational, in lowest terms.
    fn visit_ratio(self, numer: &BigInt, denom: &BigInt) -> Result<Self::Value, Self::Error> {
        let _ = (numer, denom);
        Err(Self::error("rational numbers are not supported"))
    }

    /// The stored value is a complex number.
    fn visit_complex(self, re: &Number, im: &Number) -> Result<Self::Value, Self::Error> {
        let _ = (re, im);
        Err(Self::error("complex numbers are not supported"))
    }
}

fn ratio_to_f64(numer: &BigInt, denom: &BigInt) -> f64 {
    match (numer.to_f64(), denom.to_f64()) {
        (Some(n), Some(d)) if n.is_finite() && d.is_finite() => n / d,
        _ => {
            // Scale both sides down so the quotient stays representable.
            let shift = numer.bits().max(denom.bits()).saturating_sub(1000);
            let n = (numer >> shift).to_f64().unwrap_or(f64::NAN);
            let d = (denom >> shift).to_f64().unwrap_or(f64::NAN);
            n / d
        }
    }
}

fn exact_from_f64(f: f64) -> Option<Number> {
    if !f.is_finite() {
        return None;
    }
    let (mantissa, exponent, sign) = Float::integer_decode(f);
    let mut numer = BigInt::from(mantissa);
    if sign < 0 {
        numer = -numer;
    }
    if exponent >= 0 {
        Some(Number::from(numer << exponent as usize))
    } else {
        Number::rational(numer, BigInt::one() << (-i32::from(exponent)) as usize)
    }
}

macro_rules! impl_from_small {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Number {
                #[inline]
                fn from(n: $ty) -> Self {
                    Number { n: N::Fixnum(i64::from(n)) }
                }
            }
        )*
    };
}

macro_rules! impl_from_wide {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Number {
                #[inline]
                fn from(n: $ty) -> Self {
                    match i64::try_from(n) {
                        Ok(n) => Number { n: N::Fixnum(n) },
                        Err(_) => Number { n: N::Bignum(BigInt::from(n)) },
                    }
                }
            }
        )*
    };
}

impl_from_small!(u8, u16, u32, i8, i16, i32, i64);
impl_from_wide!(u64, i128, u128, usize, isize);

impl From<BigInt> for Number {
    fn from(n: BigInt) -> Self {
        match n.to_i64() {
            Some(n) => Number { n: N::Fixnum(n) },
            None => Number { n: N::Bignum(n) },
        }
    }
}

impl From<f32> for Number {
    #[inline]
    fn from(n: f32) -> Self {
        Number {
            n: N::Real(f64::from(n)),
        }
    }
}

impl From<f64> for Number {
    #[inline]
    fn from(n: f64) -> Self {
        Number { n: N::Real(n) }
    }
}

impl FromStr for Number {
    type Err = ParseNumberError;

    /// Parses a numeric literal using the default radix 10.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_number(s, 10)
    }
}

/// Writes a real number in a notation that reads back as an inexact value.
pub(crate) fn write_f64<W: fmt::Write>(writer: &mut W, f: f64) -> fmt::Result {
    if f.is_nan() {
        writer.write_str("+nan.0")
    } else if f.is_infinite() {
        writer.write_str(if f > 0.0 { "+inf.0" } else { "-inf.0" })
    } else {
        let mut buffer = ryu::Buffer::new();
        writer.write_str(buffer.format_finite(f))
    }
}

struct Write<'a, W: fmt::Write> {
    writer: &'a mut W,
}

impl<'a, W: fmt::Write> Visitor for Write<'a, W> {
    type Value = ();
    type Error = fmt::Error;

    fn error<T: Into<String>>(_msg: T) -> fmt::Error {
        fmt::Error
    }

    fn visit_i64(self, n: i64) -> fmt::Result {
        let mut buffer = itoa::Buffer::new();
        self.writer.write_str(buffer.format(n))
    }

    fn visit_f64(self, n: f64) -> fmt::Result {
        write_f64(self.writer, n)
    }

    fn visit_bigint(self, n: &BigInt) -> fmt::Result {
        write!(self.writer, "{}", n)
    }

    fn visit_ratio(self, numer: &BigInt, denom: &BigInt) -> fmt::Result {
        write!(self.writer, "{}/{}", numer, denom)
    }

    fn visit_complex(self, re: &Number, im: &Number) -> fmt::Result {
        if !(re.is_exact() && re.is_zero()) {
            re.visit(Write {
                writer: &mut *self.writer,
            })?;
        }
        let mut imag = String::new();
        im.visit(Write { writer: &mut imag })?;
        if !imag.starts_with(['+', '-']) {
            self.writer.write_char('+')?;
        }
        self.writer.write_str(&imag)?;
        self.writer.write_char('i')
    }
}

impl Display for Number {
    /// Formats the number in Scheme notation that reads back to an equal
    /// number, preserving exactness.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.visit(Write { writer: formatter })
    }
}

impl Debug for Number {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.n, formatter)
    }
}

//! Arithmetic on numbers of mixed representation.
//!
//! Both operands are first promoted to a common [`Kind`], looked up in a
//! static table, and the operation is then carried out at that level.

use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;

use super::{Kind, Number, N};

use super::Kind::{Complex as C, Integer as I, Rational as Q, Real as R};

/// Result level of a binary operation, indexed by the levels of its operands.
static PROMOTION: [[Kind; 4]; 4] = [
    //   I  Q  R  C
    /* I */ [I, Q, R, C],
    /* Q */ [Q, Q, R, C],
    /* R */ [R, R, R, C],
    /* C */ [C, C, C, C],
];

fn promote(a: &Number, b: &Number) -> Kind {
    PROMOTION[a.kind() as usize][b.kind() as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
}

impl Op {
    fn fixnum(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Op::Add => a.checked_add(b),
            Op::Sub => a.checked_sub(b),
            Op::Mul => a.checked_mul(b),
        }
    }

    fn real(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
        }
    }
}

fn arith(op: Op, a: &Number, b: &Number) -> Number {
    match promote(a, b) {
        Kind::Integer | Kind::Rational => {
            if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
                if let Some(n) = op.fixnum(x, y) {
                    return Number::from(n);
                }
            }
            exact(op, a, b)
        }
        Kind::Real => Number::from(op.real(real(a), real(b))),
        Kind::Complex => {
            let (a_re, a_im) = parts(a);
            let (b_re, b_im) = parts(b);
            match op {
                Op::Add | Op::Sub => {
                    Number::complex(arith(op, &a_re, &b_re), arith(op, &a_im, &b_im))
                }
                Op::Mul => Number::complex(
                    &(&a_re * &b_re) - &(&a_im * &b_im),
                    &(&a_re * &b_im) + &(&a_im * &b_re),
                ),
            }
        }
    }
}

/// Operates on two exact real operands.
fn exact(op: Op, a: &Number, b: &Number) -> Number {
    let (an, ad) = ratio(a);
    let (bn, bd) = ratio(b);
    match op {
        Op::Add => Number::reduced(an * &bd + bn * &ad, ad * bd),
        Op::Sub => Number::reduced(an * &bd - bn * &ad, ad * bd),
        Op::Mul => Number::reduced(an * bn, ad * bd),
    }
}

fn ratio(n: &Number) -> (BigInt, BigInt) {
    match &n.n {
        N::Fixnum(i) => (BigInt::from(*i), BigInt::from(1)),
        N::Bignum(i) => (i.clone(), BigInt::from(1)),
        N::Ratio(r) => (r.numer.clone(), r.denom.clone()),
        // Not reached: callers only pass exact reals.
        N::Real(_) | N::Complex(_) => (BigInt::from(0), BigInt::from(1)),
    }
}

fn real(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

fn parts(n: &Number) -> (Number, Number) {
    match &n.n {
        N::Complex(z) => (z.re.clone(), z.im.clone()),
        _ => (n.clone(), Number::from(0)),
    }
}

impl Number {
    /// Divides two numbers, returning `None` if `rhs` is an exact zero.
    ///
    /// Division of exact numbers is exact, so dividing two integers may
    /// yield a rational.
    ///
    /// ```
    /// # use lips_reader::Number;
    /// let q = Number::from(1).checked_div(&Number::from(3)).unwrap();
    /// assert_eq!(q, Number::rational(1, 3).unwrap());
    /// assert_eq!(Number::from(1).checked_div(&Number::from(0)), None);
    /// assert!(Number::from(1).checked_div(&Number::from(0.0)).is_some());
    /// ```
    pub fn checked_div(&self, rhs: &Number) -> Option<Number> {
        if rhs.is_exact() && rhs.is_zero() {
            return None;
        }
        match promote(self, rhs) {
            Kind::Integer | Kind::Rational => {
                let (an, ad) = ratio(self);
                let (bn, bd) = ratio(rhs);
                Some(Number::reduced(an * bd, ad * bn))
            }
            Kind::Real => Some(Number::from(real(self) / real(rhs))),
            Kind::Complex => {
                let (a, b) = parts(self);
                let (c, d) = parts(rhs);
                let denom = &(&c * &c) + &(&d * &d);
                let re = &(&a * &c) + &(&b * &d);
                let im = &(&b * &c) - &(&a * &d);
                Some(Number::complex(
                    re.checked_div(&denom)?,
                    im.checked_div(&denom)?,
                ))
            }
        }
    }
}

macro_rules! impl_binary_op {
    (
        $($trait:ident :: $method:ident => $op:expr),*
    ) => {
        $(
            impl<'a, 'b> $trait<&'b Number> for &'a Number {
                type Output = Number;

                fn $method(self, rhs: &'b Number) -> Number {
                    arith($op, self, rhs)
                }
            }

            impl $trait for Number {
                type Output = Number;

                fn $method(self, rhs: Number) -> Number {
                    arith($op, &self, &rhs)
                }
            }
        )*
    };
}

impl_binary_op!(Add::add => Op::Add, Sub::sub => Op::Sub, Mul::mul => Op::Mul);

impl<'a> Neg for &'a Number {
    type Output = Number;

    fn neg(self) -> Number {
        match &self.n {
            N::Fixnum(n) => match n.checked_neg() {
                Some(n) => Number::from(n),
                None => Number::from(-BigInt::from(*n)),
            },
            N::Bignum(n) => Number::from(-n),
            N::Ratio(r) => Number::reduced(-&r.numer, r.denom.clone()),
            N::Real(f) => Number::from(-f),
            N::Complex(z) => Number::complex(-&z.re, -&z.im),
        }
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        -&self
    }
}

use num_bigint::BigInt;

use lips_reader::number::{Exactness, Kind};
use lips_reader::Number;

fn num(text: &str) -> Number {
    text.parse().expect("invalid number literal")
}

#[test]
fn u64_add() {
    for (n1, n2, expected) in vec![(0u64, 0u64, 0u64), (42, 23, 65)] {
        assert_eq!(Number::from(n1) + Number::from(n2), Number::from(expected));
    }
}

#[test]
fn fixnum_overflow_promotes() {
    let max = Number::from(i64::MAX);
    let sum = &max + &Number::from(1);
    assert_eq!(sum, num("9223372036854775808"));
    assert_eq!(sum.kind(), Kind::Integer);
    assert_eq!(&sum - &Number::from(1), max);
    assert_eq!(-Number::from(i64::MIN), num("9223372036854775808"));
    assert_eq!(
        Number::from(u64::MAX) * Number::from(u64::MAX),
        num("340282366920938463426481119284349108225")
    );
}

#[test]
fn rationals_stay_reduced() {
    assert_eq!(num("1/3") + num("1/6"), num("1/2"));
    assert_eq!(num("1/2") + num("1/2"), Number::from(1));
    assert_eq!(num("2/3") * num("3/2"), Number::from(1));
    assert_eq!(num("1/2").checked_div(&num("-1/4")), Some(Number::from(-2)));
    assert_eq!(num("4/6").to_ratio(), Some((BigInt::from(2), BigInt::from(3))));
}

#[test]
fn mixed_exactness_is_inexact() {
    let sum = num("1/2") + num("0.25");
    assert_eq!(sum, Number::from(0.75));
    assert_eq!(sum.exactness(), Exactness::Inexact);
    assert_eq!((Number::from(2) * num("1.5")).kind(), Kind::Real);
}

#[test]
fn complex_arithmetic() {
    let i = num("+i");
    assert_eq!(&i * &i, Number::from(-1));
    assert_eq!(num("1+2i") + num("1-2i"), Number::from(2));
    assert_eq!(num("1+2i").checked_div(&num("1+2i")), Some(Number::from(1)));
    assert_eq!((num("1+2i") + num("0.5")).kind(), Kind::Complex);
    assert!((num("1+2i") + num("0.5")).is_inexact());
}

#[test]
fn exactness_conversions() {
    assert_eq!(num("0.5").to_exact(), Some(num("1/2")));
    assert_eq!(num("1/4").to_inexact(), Number::from(0.25));
    assert_eq!(num("+inf.0").to_exact(), None);
    assert_eq!(num("#e1e3"), Number::from(1000));
    assert!(num("#i1/3").is_inexact());
}

#[test]
fn division_by_exact_zero() {
    assert_eq!(Number::from(1).checked_div(&Number::from(0)), None);
    assert_eq!(num("1/2").checked_div(&num("0/5")), None);
    let inf = Number::from(1.0).checked_div(&Number::from(0.0)).unwrap();
    assert_eq!(inf.as_f64(), Some(f64::INFINITY));
}

use std::borrow::Cow;

use num_bigint::BigInt;

use crate::{Cons, Number, Value};

macro_rules! impl_from_number {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_number!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, i128, u128, f32, f64);

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<Number> for Value {
    #[inline]
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    #[inline]
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

/// Rust strings become Scheme strings; use [`Value::symbol`] for symbols.
impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl<'a> From<Cow<'a, str>> for Value {
    #[inline]
    fn from(s: Cow<'a, str>) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Value::String(s.into_boxed_str())
    }
}

impl From<&[u8]> for Value {
    #[inline]
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.into())
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes.into_boxed_slice())
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(elements: Vec<Value>) -> Self {
        Value::Vector(elements.into_boxed_slice())
    }
}

impl<T, U> From<(T, U)> for Value
where
    T: Into<Value>,
    U: Into<Value>,
{
    fn from((car, cdr): (T, U)) -> Self {
        Value::Cons(Cons::new(car, cdr))
    }
}

impl From<Cons> for Value {
    #[inline]
    fn from(pair: Cons) -> Self {
        Value::Cons(pair)
    }
}

impl From<()> for Value {
    /// The unit value maps to the empty list.
    #[inline]
    fn from(_: ()) -> Self {
        Value::Null
    }
}

//! The `Value` enum, an owned, acyclic representation of reader data.
//!
//! A [`Value`] is what most consumers want: a plain tree that can be
//! pattern-matched, compared and cloned without reference to the text it was
//! read from. Values are obtained from the top-level parsing functions such
//! as [`from_str`](crate::from_str), or by converting a [`Datum`] with
//! [`Datum::to_value`].
//!
//! Structure that cannot be represented as a tree, namely cycles created by
//! datum labels, is only available through [`Datum`].
//!
//! [`Datum`]: crate::Datum
//! [`Datum::to_value`]: crate::Datum::to_value

use std::fmt;

use crate::cons::{Cons, ListIter};
use crate::number::Number;

mod from;

/// Represents a Scheme datum as an owned tree.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    /// The empty list, written as `()`.
    Null,

    /// The end-of-file object, written as `#!eof`.
    Eof,

    /// A boolean, written as `#t` or `#f`.
    Bool(bool),

    /// A number of any kind.
    Number(Number),

    /// A character.
    Char(char),

    /// A string.
    String(Box<str>),

    /// A symbol.
    Symbol(Box<str>),

    /// A bytevector, written as `#u8(...)`.
    Bytes(Box<[u8]>),

    /// A pair; chains of pairs make up lists.
    Cons(Cons),

    /// A vector, written as `#(...)`.
    Vector(Box<[Value]>),
}

impl Value {
    /// Constructs a symbol.
    ///
    /// ```
    /// # use lips_reader::Value;
    /// let sym = Value::symbol("lambda");
    /// assert_eq!(sym.as_symbol(), Some("lambda"));
    /// ```
    pub fn symbol(name: impl Into<Box<str>>) -> Self {
        Value::Symbol(name.into())
    }

    /// Constructs a string.
    pub fn string(s: impl Into<Box<str>>) -> Self {
        Value::String(s.into())
    }

    /// Constructs a bytevector.
    pub fn bytes(bv: impl Into<Box<[u8]>>) -> Self {
        Value::Bytes(bv.into())
    }

    /// Constructs a pair.
    pub fn cons<T, U>(car: T, cdr: U) -> Self
    where
        T: Into<Value>,
        U: Into<Value>,
    {
        Value::Cons(Cons::new(car, cdr))
    }

    /// Constructs a proper list.
    ///
    /// ```
    /// # use lips_reader::Value;
    /// let list = Value::list(vec![1, 2, 3]);
    /// assert_eq!(list.to_string(), "(1 2 3)");
    /// assert_eq!(Value::list(Vec::<Value>::new()), Value::Null);
    /// ```
    pub fn list<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::IntoIter: DoubleEndedIterator,
        I::Item: Into<Value>,
    {
        Self::append(elements, Value::Null)
    }

    /// Constructs a list whose last pair has `tail` in its `cdr`.
    ///
    /// If `tail` is not the empty list, the result is an improper list.
    ///
    /// ```
    /// # use lips_reader::Value;
    /// let dotted = Value::append(vec![1, 2], 3);
    /// assert_eq!(dotted.to_string(), "(1 2 . 3)");
    /// ```
    pub fn append<I, T>(elements: I, tail: T) -> Self
    where
        I: IntoIterator,
        I::IntoIter: DoubleEndedIterator,
        I::Item: Into<Value>,
        T: Into<Value>,
    {
        elements
            .into_iter()
            .rev()
            .fold(tail.into(), |rest, item| Value::cons(item, rest))
    }

    /// Constructs a vector.
    pub fn vector<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let elements: Vec<_> = elements.into_iter().map(Into::into).collect();
        Value::Vector(elements.into_boxed_slice())
    }

    /// Returns true for the empty list.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for the end-of-file object.
    pub fn is_eof(&self) -> bool {
        matches!(self, Value::Eof)
    }

    /// Returns true for a pair.
    pub fn is_cons(&self) -> bool {
        matches!(self, Value::Cons(_))
    }

    /// Returns true for the empty list and chains of pairs ending in it.
    pub fn is_list(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Cons(pair) => pair.iter().all(|pair| match pair.cdr() {
                Value::Cons(_) | Value::Null => true,
                _ => false,
            }),
            _ => false,
        }
    }

    /// Returns true for a chain of pairs that does not end in the empty list.
    pub fn is_dotted_list(&self) -> bool {
        self.is_cons() && !self.is_list()
    }

    /// Returns true for a vector.
    pub fn is_vector(&self) -> bool {
        matches!(self, Value::Vector(_))
    }

    /// If the value is a boolean, returns it.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a number, returns a reference to it.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is an exact integer fitting into `i64`, returns it.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// If the value is a real number, returns it as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// If the value is a character, returns it.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// If the value is a string, returns its contents.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a symbol, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// If the value is a bytevector, returns its contents.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// If the value is a pair, returns a reference to it.
    pub fn as_cons(&self) -> Option<&Cons> {
        match self {
            Value::Cons(pair) => Some(pair),
            _ => None,
        }
    }

    /// If the value is a pair, returns its `car` and `cdr` fields.
    pub fn as_pair(&self) -> Option<(&Value, &Value)> {
        self.as_cons().map(Cons::as_pair)
    }

    /// If the value is a vector, returns its elements.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Vector(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns an iterator over the elements of a list.
    ///
    /// Returns `None` unless the value is a pair or the empty list. See
    /// [`ListIter`] for the handling of dotted lists.
    ///
    /// ```
    /// # use lips_reader::Value;
    /// let list = Value::append(vec![1, 2], 3);
    /// let mut iter = list.list_iter().unwrap();
    /// assert_eq!(iter.next(), Some(&Value::from(1)));
    /// assert_eq!(iter.next(), Some(&Value::from(2)));
    /// assert_eq!(iter.next(), None);
    /// assert_eq!(iter.next(), Some(&Value::from(3)));
    /// ```
    pub fn list_iter(&self) -> Option<ListIter<'_>> {
        match self {
            Value::Cons(pair) => Some(pair.list_iter()),
            Value::Null => Some(ListIter::empty()),
            _ => None,
        }
    }

    /// Returns the elements of a proper list as a vector of references.
    pub fn to_ref_vec(&self) -> Option<Vec<&Value>> {
        if !self.is_list() {
            return None;
        }
        self.list_iter().map(Iterator::collect)
    }
}

impl fmt::Display for Value {
    /// Formats the value in the notation accepted by the reader.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::print::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

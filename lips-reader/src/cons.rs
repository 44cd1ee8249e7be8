//! Pairs and iteration over chains of pairs.
use std::fmt;

use crate::Value;

/// A pair of values, the building block of lists.
///
/// The two fields are called `car` and `cdr`. A proper list is a chain of
/// pairs linked through their `cdr` fields and terminated by
/// [`Value::Null`]; a chain ending in any other value is a dotted list.
///
/// Being part of the owned [`Value`] tree, a `Cons` exclusively owns both of
/// its fields, so it can never be part of a cycle. Shared and cyclic
/// structure is represented by [`Datum`](crate::Datum) instead.
#[derive(PartialEq, Clone)]
pub struct Cons {
    inner: Box<(Value, Value)>,
}

impl fmt::Debug for Cons {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "({:?} . {:?})", self.car(), self.cdr())
    }
}

impl Cons {
    /// Constructs a new pair.
    pub fn new<T, U>(car: T, cdr: U) -> Self
    where
        T: Into<Value>,
        U: Into<Value>,
    {
        Cons {
            inner: Box::new((car.into(), cdr.into())),
        }
    }

    /// Returns the `car` field.
    pub fn car(&self) -> &Value {
        &self.inner.0
    }

    /// Replaces the `car` field.
    pub fn set_car(&mut self, car: impl Into<Value>) {
        self.inner.0 = car.into()
    }

    /// Returns the `cdr` field.
    pub fn cdr(&self) -> &Value {
        &self.inner.1
    }

    /// Returns a mutable reference to the `cdr` field.
    pub fn cdr_mut(&mut self) -> &mut Value {
        &mut self.inner.1
    }

    /// Replaces the `cdr` field.
    pub fn set_cdr(&mut self, cdr: impl Into<Value>) {
        self.inner.1 = cdr.into()
    }

    /// Returns both fields.
    ///
    /// ```
    /// # use lips_reader::{Cons, Value};
    /// let pair = Cons::new(1, 2);
    /// assert_eq!(pair.as_pair(), (&Value::from(1), &Value::from(2)));
    /// ```
    pub fn as_pair(&self) -> (&Value, &Value) {
        (&self.inner.0, &self.inner.1)
    }

    /// Consumes the pair, returning both fields.
    pub fn into_pair(self) -> (Value, Value) {
        let (car, cdr) = *self.inner;
        (car, cdr)
    }

    /// Returns an iterator over the pairs of the chain starting at `self`.
    pub fn iter(&self) -> Iter<'_> {
        Iter { cursor: Some(self) }
    }

    /// Returns an iterator over the elements of the chain starting at `self`.
    pub fn list_iter(&self) -> ListIter<'_> {
        ListIter(ListCursor::Cons(self))
    }

    /// Collects the elements of the chain without cloning them.
    ///
    /// The second member of the result is the value terminating the chain,
    /// which is `Value::Null` for proper lists.
    ///
    /// ```
    /// # use lips_reader::{Cons, Value};
    /// let list = Cons::new(1, Cons::new(2, 3));
    /// assert_eq!(list.into_vec(), (vec![Value::from(1), Value::from(2)], Value::from(3)));
    /// ```
    pub fn into_vec(self) -> (Vec<Value>, Value) {
        let mut elements = Vec::new();
        let mut cell = self;
        loop {
            let (car, cdr) = cell.into_pair();
            elements.push(car);
            match cdr {
                Value::Cons(next) => cell = next,
                tail => return (elements, tail),
            }
        }
    }

    /// Collects clones of the elements of the chain, along with the
    /// terminating value.
    pub fn to_vec(&self) -> (Vec<Value>, Value) {
        let mut elements = Vec::new();
        let mut tail = &Value::Null;
        for pair in self.iter() {
            elements.push(pair.car().clone());
            tail = pair.cdr();
        }
        (elements, tail.clone())
    }
}

impl<'a> IntoIterator for &'a Cons {
    type Item = &'a Cons;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// An iterator over a chain of pairs, returned by [`Cons::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    cursor: Option<&'a Cons>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Cons;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.cursor?;
        self.cursor = pair.cdr().as_cons();
        Some(pair)
    }
}

/// An iterator over the elements of a list.
///
/// # Dotted lists
///
/// For a dotted list, the iterator first yields the regular elements and then
/// `None`. Calling `next` again yields the value after the dot, followed by
/// `None` for good. The list `(1 2 . 3)` thus produces `1`, `2`, `None`, `3`,
/// `None`, while `(1 2 3)` produces `1`, `2`, `3`, `None`.
#[derive(Debug, Clone)]
pub struct ListIter<'a>(ListCursor<'a>);

#[derive(Debug, Clone)]
enum ListCursor<'a> {
    Cons(&'a Cons),
    Dot(&'a Value),
    Rest(&'a Value),
    Exhausted,
}

impl<'a> ListIter<'a> {
    /// Returns true once the iterator has nothing more to yield, including
    /// the value after the dot of a dotted list.
    pub fn is_empty(&self) -> bool {
        matches!(self.0, ListCursor::Exhausted)
    }

    /// Returns true if the iterator reached the dot of a dotted list.
    pub fn at_dot(&self) -> bool {
        matches!(self.0, ListCursor::Dot(_))
    }

    pub(crate) fn empty() -> Self {
        ListIter(ListCursor::Exhausted)
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self.0 {
            ListCursor::Cons(pair) => {
                self.0 = match pair.cdr() {
                    Value::Cons(next) => ListCursor::Cons(next),
                    Value::Null => ListCursor::Exhausted,
                    tail => ListCursor::Dot(tail),
                };
                Some(pair.car())
            }
            ListCursor::Dot(tail) => {
                self.0 = ListCursor::Rest(tail);
                None
            }
            ListCursor::Rest(tail) => {
                self.0 = ListCursor::Exhausted;
                Some(tail)
            }
            ListCursor::Exhausted => None,
        }
    }
}

//! Reader output as a graph of nodes, including source locations.
//!
//! A [`Datum`] is a handle to one node of a graph produced by the reader.
//! Unlike [`Value`], a datum may share structure or even refer to itself:
//! datum labels (`#0=` and `#0#`) make several places in the text denote the
//! very same node, so
//!
//! ```
//! let datum = lips_reader::datum::from_str("#0=(1 . #0#)").unwrap();
//! let tail = datum.cdr().unwrap();
//! assert!(tail.ptr_eq(&datum));
//! ```
//!
//! yields a pair whose `cdr` is the pair itself. The nodes of each top-level
//! datum live in an arena; handles are cheap to clone and keep the arena
//! alive.
//!
//! Every node carries the [`Span`] of text it was read from.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::rc::Rc;

use crate::number::Number;
use crate::parse::{Options, Parser, Position, Result};
use crate::print::Atom;
use crate::Value;

/// The start and end positions of a piece of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: Position,
    end: Position,
}

impl Span {
    pub(crate) fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Position of the first character of the span.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Position just after the last character of the span.
    pub fn end(&self) -> Position {
        self.end
    }
}

pub(crate) type NodeId = usize;

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Null,
    Eof,
    Bool(bool),
    Number(Number),
    Char(char),
    String(Box<str>),
    Symbol(Box<str>),
    Bytes(Box<[u8]>),
    Pair(NodeId, NodeId),
    Vector(Box<[NodeId]>),
    /// A label whose datum is still being read.
    Placeholder(u64),
    /// Stands for another node of the same arena.
    Ref(NodeId),
    /// Stands for a node of an earlier datum.
    Link(Datum),
}

/// Storage for the nodes of one top-level datum.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
    spans: Vec<Span>,
}

impl Arena {
    pub(crate) fn push(&mut self, node: Node, span: Span) -> NodeId {
        self.nodes.push(node);
        self.spans.push(span);
        self.nodes.len() - 1
    }

    pub(crate) fn set(&mut self, id: NodeId, node: Node) {
        self.nodes[id] = node;
    }

    pub(crate) fn set_span(&mut self, id: NodeId, span: Span) {
        self.spans[id] = span;
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn span(&self, id: NodeId) -> Span {
        self.spans[id]
    }

    /// Follows indirections within this arena.
    pub(crate) fn resolve(&self, mut id: NodeId) -> NodeId {
        while let Node::Ref(target) = self.nodes[id] {
            id = target;
        }
        id
    }
}

/// The kinds of nodes a [`Datum`] can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatumKind {
    /// The empty list.
    Null,
    /// The end-of-file object.
    Eof,
    /// A boolean.
    Bool,
    /// A number.
    Number,
    /// A character.
    Char,
    /// A string.
    String,
    /// A symbol.
    Symbol,
    /// A bytevector.
    Bytes,
    /// A pair.
    Pair,
    /// A vector.
    Vector,
}

/// Identity of a node, independent of the handle used to reach it.
pub(crate) type NodeKey = (usize, NodeId);

/// A handle to a node in a graph produced by the reader.
///
/// Equality (`==`) is structural and terminates on cyclic data: two datums
/// are equal if no finite sequence of `car`, `cdr` and vector accesses can
/// tell them apart. Use [`ptr_eq`](Datum::ptr_eq) to test for identity.
#[derive(Clone)]
pub struct Datum {
    arena: Rc<Arena>,
    id: NodeId,
}

impl Datum {
    pub(crate) fn new(arena: Rc<Arena>, id: NodeId) -> Self {
        Datum { arena, id }
    }

    /// Finds the node this handle stands for, following labels.
    fn locate(&self) -> (&Rc<Arena>, NodeId) {
        let mut arena = &self.arena;
        let mut id = self.id;
        loop {
            match &arena.nodes[id] {
                Node::Ref(target) => id = *target,
                Node::Link(datum) => {
                    arena = &datum.arena;
                    id = datum.id;
                }
                _ => return (arena, id),
            }
        }
    }

    fn node(&self) -> &Node {
        let (arena, id) = self.locate();
        &arena.nodes[id]
    }

    fn child(&self, id: NodeId) -> Datum {
        let (arena, _) = self.locate();
        Datum::new(Rc::clone(arena), id)
    }

    pub(crate) fn key(&self) -> NodeKey {
        let (arena, id) = self.locate();
        (Rc::as_ptr(arena) as usize, id)
    }

    /// Returns the span of text this datum was read from.
    ///
    /// For a datum reached through a label reference such as `#0#`, this is
    /// the span of the reference, not of the labelled datum.
    pub fn span(&self) -> Span {
        self.arena.spans[self.id]
    }

    /// Returns the kind of node this datum refers to.
    pub fn kind(&self) -> DatumKind {
        match self.node() {
            Node::Null => DatumKind::Null,
            Node::Eof => DatumKind::Eof,
            Node::Bool(_) => DatumKind::Bool,
            Node::Number(_) => DatumKind::Number,
            Node::Char(_) => DatumKind::Char,
            Node::String(_) => DatumKind::String,
            Node::Symbol(_) => DatumKind::Symbol,
            Node::Bytes(_) => DatumKind::Bytes,
            Node::Pair(..) => DatumKind::Pair,
            Node::Vector(_) => DatumKind::Vector,
            Node::Placeholder(_) | Node::Ref(_) | Node::Link(_) => {
                unreachable!("unresolved datum label")
            }
        }
    }

    /// Returns true for the empty list.
    pub fn is_null(&self) -> bool {
        self.kind() == DatumKind::Null
    }

    /// Returns true for a pair.
    pub fn is_pair(&self) -> bool {
        self.kind() == DatumKind::Pair
    }

    /// Returns true for a vector.
    pub fn is_vector(&self) -> bool {
        self.kind() == DatumKind::Vector
    }

    /// If the datum is a boolean, returns it.
    pub fn as_bool(&self) -> Option<bool> {
        match self.node() {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the datum is a number, returns a reference to it.
    pub fn as_number(&self) -> Option<&Number> {
        match self.node() {
            Node::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the datum is a character, returns it.
    pub fn as_char(&self) -> Option<char> {
        match self.node() {
            Node::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// If the datum is a string, returns its contents.
    pub fn as_str(&self) -> Option<&str> {
        match self.node() {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the datum is a symbol, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self.node() {
            Node::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// If the datum is a bytevector, returns its contents.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self.node() {
            Node::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the datum as a leaf, or `None` for pairs and vectors.
    pub(crate) fn atom(&self) -> Option<Atom<'_>> {
        let atom = match self.node() {
            Node::Null => Atom::Null,
            Node::Eof => Atom::Eof,
            Node::Bool(b) => Atom::Bool(*b),
            Node::Number(n) => Atom::Number(n),
            Node::Char(c) => Atom::Char(*c),
            Node::String(s) => Atom::String(s),
            Node::Symbol(name) => Atom::Symbol(name),
            Node::Bytes(bytes) => Atom::Bytes(bytes),
            _ => return None,
        };
        Some(atom)
    }

    /// If the datum is a pair, returns its `car` and `cdr`.
    pub fn as_pair(&self) -> Option<(Datum, Datum)> {
        match *self.node() {
            Node::Pair(car, cdr) => Some((self.child(car), self.child(cdr))),
            _ => None,
        }
    }

    /// If the datum is a pair, returns its `car`.
    pub fn car(&self) -> Option<Datum> {
        self.as_pair().map(|(car, _)| car)
    }

    /// If the datum is a pair, returns its `cdr`.
    pub fn cdr(&self) -> Option<Datum> {
        self.as_pair().map(|(_, cdr)| cdr)
    }

    /// If the datum is a vector, returns its length.
    pub fn vector_len(&self) -> Option<usize> {
        match self.node() {
            Node::Vector(elements) => Some(elements.len()),
            _ => None,
        }
    }

    /// Returns an iterator over the elements of a list.
    ///
    /// Returns `None` unless the datum is a pair or the empty list. Like
    /// [`Value::list_iter`], the iterator yields the value after the dot of a
    /// dotted list after a first `None`. On a cyclic list, it never ends.
    ///
    /// ```
    /// let datum = lips_reader::datum::from_str("(1 2 . 3)").unwrap();
    /// let mut iter = datum.list_iter().unwrap();
    /// assert_eq!(iter.next().unwrap().as_number().unwrap().as_i64(), Some(1));
    /// assert_eq!(iter.next().unwrap().as_number().unwrap().as_i64(), Some(2));
    /// assert!(iter.next().is_none());
    /// assert_eq!(iter.next().unwrap().as_number().unwrap().as_i64(), Some(3));
    /// assert!(iter.next().is_none());
    /// ```
    pub fn list_iter(&self) -> Option<ListIter> {
        match self.kind() {
            DatumKind::Pair => Some(ListIter(ListCursor::Pair(self.clone()))),
            DatumKind::Null => Some(ListIter(ListCursor::Exhausted)),
            _ => None,
        }
    }

    /// Returns an iterator over the elements of a vector.
    ///
    /// Returns `None` if the datum is not a vector.
    pub fn vector_iter(&self) -> Option<VectorIter> {
        let len = self.vector_len()?;
        Some(VectorIter {
            vector: self.clone(),
            index: 0,
            len,
        })
    }

    fn vector_ref(&self, index: usize) -> Option<Datum> {
        match self.node() {
            Node::Vector(elements) => elements.get(index).map(|&id| self.child(id)),
            _ => None,
        }
    }

    /// Returns true if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Datum) -> bool {
        self.key() == other.key()
    }

    /// Converts the datum into an owned tree.
    ///
    /// Shared substructure is copied. Returns `None` if the datum contains a
    /// cycle.
    ///
    /// ```
    /// use lips_reader::{datum, Value};
    ///
    /// let shared = datum::from_str("(#0=(a) #0#)").unwrap();
    /// let a = Value::list(vec![Value::symbol("a")]);
    /// assert_eq!(shared.to_value(), Some(Value::list(vec![a.clone(), a])));
    ///
    /// let cyclic = datum::from_str("#0=(a . #0#)").unwrap();
    /// assert_eq!(cyclic.to_value(), None);
    /// ```
    pub fn to_value(&self) -> Option<Value> {
        to_value(self, &mut HashSet::new())
    }

    /// Builds a datum from an owned tree.
    ///
    /// The spans of the resulting nodes are all empty.
    pub fn from_value(value: &Value) -> Datum {
        let mut arena = Arena::default();
        let id = push_value(&mut arena, value);
        Datum::new(Rc::new(arena), id)
    }
}

fn to_value(datum: &Datum, path: &mut HashSet<NodeKey>) -> Option<Value> {
    let value = match datum.node() {
        Node::Null => Value::Null,
        Node::Eof => Value::Eof,
        Node::Bool(b) => Value::Bool(*b),
        Node::Number(n) => Value::Number(n.clone()),
        Node::Char(c) => Value::Char(*c),
        Node::String(s) => Value::String(s.clone()),
        Node::Symbol(name) => Value::Symbol(name.clone()),
        Node::Bytes(bytes) => Value::Bytes(bytes.clone()),
        Node::Vector(_) => {
            let key = datum.key();
            if !path.insert(key) {
                return None;
            }
            let elements = datum
                .vector_iter()?
                .map(|element| to_value(&element, path))
                .collect::<Option<Vec<_>>>()?;
            path.remove(&key);
            Value::from(elements)
        }
        Node::Pair(..) => {
            let mut spine = Vec::new();
            let mut elements = Vec::new();
            let mut cursor = datum.clone();
            while let Some((car, cdr)) = cursor.as_pair() {
                let key = cursor.key();
                if !path.insert(key) {
                    return None;
                }
                spine.push(key);
                elements.push(to_value(&car, path)?);
                cursor = cdr;
            }
            let tail = to_value(&cursor, path)?;
            for key in &spine {
                path.remove(key);
            }
            Value::append(elements, tail)
        }
        Node::Placeholder(_) | Node::Ref(_) | Node::Link(_) => return None,
    };
    Some(value)
}

fn push_value(arena: &mut Arena, value: &Value) -> NodeId {
    let span = Span::default();
    match value {
        Value::Null => arena.push(Node::Null, span),
        Value::Eof => arena.push(Node::Eof, span),
        Value::Bool(b) => arena.push(Node::Bool(*b), span),
        Value::Number(n) => arena.push(Node::Number(n.clone()), span),
        Value::Char(c) => arena.push(Node::Char(*c), span),
        Value::String(s) => arena.push(Node::String(s.clone()), span),
        Value::Symbol(name) => arena.push(Node::Symbol(name.clone()), span),
        Value::Bytes(bytes) => arena.push(Node::Bytes(bytes.clone()), span),
        Value::Vector(elements) => {
            let ids: Vec<_> = elements.iter().map(|e| push_value(arena, e)).collect();
            arena.push(Node::Vector(ids.into_boxed_slice()), span)
        }
        Value::Cons(pair) => {
            let (elements, tail) = pair.to_vec();
            let mut rest = push_value(arena, &tail);
            for element in elements.iter().rev() {
                let car = push_value(arena, element);
                rest = arena.push(Node::Pair(car, rest), span);
            }
            rest
        }
    }
}

impl PartialEq for Datum {
    fn eq(&self, other: &Datum) -> bool {
        let mut assumed = HashSet::new();
        let mut pending = vec![(self.clone(), other.clone())];
        while let Some((a, b)) = pending.pop() {
            if !assumed.insert((a.key(), b.key())) {
                continue;
            }
            let same = match (a.node(), b.node()) {
                (Node::Null, Node::Null) | (Node::Eof, Node::Eof) => true,
                (Node::Bool(x), Node::Bool(y)) => x == y,
                (Node::Number(x), Node::Number(y)) => x == y,
                (Node::Char(x), Node::Char(y)) => x == y,
                (Node::String(x), Node::String(y)) => x == y,
                (Node::Symbol(x), Node::Symbol(y)) => x == y,
                (Node::Bytes(x), Node::Bytes(y)) => x == y,
                (&Node::Pair(a_car, a_cdr), &Node::Pair(b_car, b_cdr)) => {
                    pending.push((a.child(a_cdr), b.child(b_cdr)));
                    pending.push((a.child(a_car), b.child(b_car)));
                    true
                }
                (Node::Vector(x), Node::Vector(y)) if x.len() == y.len() => {
                    for (&x, &y) in x.iter().zip(y.iter()) {
                        pending.push((a.child(x), b.child(y)));
                    }
                    true
                }
                _ => false,
            };
            if !same {
                return false;
            }
        }
        true
    }
}

impl PartialEq<Value> for Datum {
    fn eq(&self, other: &Value) -> bool {
        self.to_value().map_or(false, |value| value == *other)
    }
}

impl PartialEq<Datum> for Value {
    fn eq(&self, other: &Datum) -> bool {
        other == self
    }
}

impl fmt::Display for Datum {
    /// Formats the datum in the notation accepted by the reader, using datum
    /// labels for cycles.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::print::datum_to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Debug for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Datum({})", self)
    }
}

/// An iterator over the elements of a list datum.
///
/// See [`Datum::list_iter`] for the treatment of dotted lists.
#[derive(Debug, Clone)]
pub struct ListIter(ListCursor);

#[derive(Debug, Clone)]
enum ListCursor {
    Pair(Datum),
    Dot(Datum),
    Rest(Datum),
    Exhausted,
}

impl ListIter {
    /// Returns true once the iterator has nothing more to yield, including
    /// the value after the dot of a dotted list.
    pub fn is_empty(&self) -> bool {
        matches!(self.0, ListCursor::Exhausted)
    }
}

impl Iterator for ListIter {
    type Item = Datum;

    fn next(&mut self) -> Option<Datum> {
        match std::mem::replace(&mut self.0, ListCursor::Exhausted) {
            ListCursor::Pair(pair) => {
                let (car, cdr) = pair.as_pair()?;
                self.0 = match cdr.kind() {
                    DatumKind::Pair => ListCursor::Pair(cdr),
                    DatumKind::Null => ListCursor::Exhausted,
                    _ => ListCursor::Dot(cdr),
                };
                Some(car)
            }
            ListCursor::Dot(tail) => {
                self.0 = ListCursor::Rest(tail);
                None
            }
            ListCursor::Rest(tail) => Some(tail),
            ListCursor::Exhausted => None,
        }
    }
}

/// An iterator over the elements of a vector datum.
#[derive(Debug, Clone)]
pub struct VectorIter {
    vector: Datum,
    index: usize,
    len: usize,
}

impl Iterator for VectorIter {
    type Item = Datum;

    fn next(&mut self) -> Option<Datum> {
        if self.index >= self.len {
            return None;
        }
        self.index += 1;
        self.vector.vector_ref(self.index - 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for VectorIter {}

/// Parse a datum from a string slice containing a single datum.
///
/// ```
/// let datum = lips_reader::datum::from_str_custom(
///     "(a [nested] list)",
///     lips_reader::parse::Options::new(),
/// );
/// assert!(datum.is_ok());
/// ```
pub fn from_str_custom(s: &str, options: Options) -> Result<Datum> {
    let mut parser = Parser::from_str_custom(s, options);
    let datum = parser.expect_datum()?;
    parser.end()?;
    Ok(datum)
}

/// Parse a datum from a string slice containing a single datum, using the
/// default parser options.
///
/// See [`from_str_custom`] for more information.
pub fn from_str(s: &str) -> Result<Datum> {
    from_str_custom(s, Options::default())
}

/// Parse a datum from an IO stream containing a single datum.
///
/// The stream is read to its end before parsing starts.
pub fn from_reader_custom(mut rdr: impl io::Read, options: Options) -> Result<Datum> {
    let text = crate::parse::read_to_string(&mut rdr)?;
    from_str_custom(&text, options)
}

/// Parse a datum from an IO stream containing a single datum, using the
/// default parser options.
pub fn from_reader(rdr: impl io::Read) -> Result<Datum> {
    from_reader_custom(rdr, Options::default())
}

//! Converting values and datums into text.
//!
//! # Terminology
//!
//! The process of serializing data to its textual representation is
//! referred to as "writing" in Lisp. To avoid confusion with Rust's `Write`
//! trait, this crate uses "printing" instead.
//!
//! Printed text reads back to an equal value: symbols that would not read
//! back as the same symbol are printed with vertical bars, and numbers keep
//! their exactness. Datums with cycles are printed using datum labels, so
//! that printing terminates and the text reads back to an isomorphic graph.

use std::collections::{HashMap, HashSet};
use std::io;

use crate::datum::{Datum, DatumKind, NodeKey};
use crate::number::{parse_number, Number};
use crate::syntax;
use crate::Value;

/// Options for printing values and datums.
#[derive(Clone, Debug)]
pub struct Options {
    bytes_style: BytesStyle,
    quote_abbreviation: bool,
    shared_labels: bool,
}

impl Options {
    /// Construct the default set of options.
    pub fn new() -> Self {
        Options::default()
    }

    /// Set the style to use for printing byte vectors.
    pub fn with_bytes_style(mut self, style: BytesStyle) -> Self {
        self.bytes_style = style;
        self
    }

    /// Choose whether to print `(quote x)` as `'x`, and likewise for the
    /// other quote-like forms.
    pub fn with_quote_abbreviation(mut self, abbreviate: bool) -> Self {
        self.quote_abbreviation = abbreviate;
        self
    }

    /// Choose whether to label every datum node that is reached more than
    /// once, instead of only the ones needed to break cycles.
    pub fn with_shared_labels(mut self, shared: bool) -> Self {
        self.shared_labels = shared;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            bytes_style: BytesStyle::R7RS,
            quote_abbreviation: false,
            shared_labels: false,
        }
    }
}

/// How to print byte vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesStyle {
    /// Use R6RS byte vector syntax, e.g. `#vu8(1 2 3)`.
    R6RS,
    /// Use R7RS byte vector syntax, e.g. `#u8(1 2 3)`.
    R7RS,
}

/// Represents a character escape code in a type-safe manner.
pub enum CharEscape {
    /// An escaped quote `"`
    Quote,
    /// An escaped vertical bar `|`, inside a symbol
    Bar,
    /// An escaped reverse solidus `\`
    ReverseSolidus,
    /// Alert, also known as "bell" (usually escaped as `\a`)
    Alert,
    /// An escaped backspace character (usually escaped as `\b`)
    Backspace,
    /// An escaped line feed character (usually escaped as `\n`)
    LineFeed,
    /// An escaped carriage return character (usually escaped as `\r`)
    CarriageReturn,
    /// An escaped tab character (usually escaped as `\t`)
    Tab,
    /// An escaped ASCII plane control character (usually escaped as
    /// `\xXX;` where `XX` are two hex characters)
    AsciiControl(u8),
}

impl CharEscape {
    #[inline]
    fn from_escape_table(escape: u8, byte: u8) -> CharEscape {
        match escape {
            self::AA => CharEscape::Alert,
            self::BB => CharEscape::Backspace,
            self::TT => CharEscape::Tab,
            self::NN => CharEscape::LineFeed,
            self::RR => CharEscape::CarriageReturn,
            self::QU => CharEscape::Quote,
            self::VB => CharEscape::Bar,
            self::BS => CharEscape::ReverseSolidus,
            self::UU => CharEscape::AsciiControl(byte),
            _ => unreachable!(),
        }
    }
}

/// Different vector types
pub enum VectorType {
    /// Generic vector, containing elements of any type.
    Generic,
    /// Byte vector, containing only byte (octet) values.
    Byte,
}

/// This trait abstracts away serializing the pieces of a datum, which
/// allows the implementer to customize the output, for example to pretty
/// print it.
///
/// The default implementation produces R7RS text on a single line.
pub trait Formatter {
    /// Writes a representation of the empty list to the specified writer.
    #[inline]
    fn write_null<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"()")
    }

    /// Writes a representation of the end-of-file object to the specified
    /// writer.
    #[inline]
    fn write_eof<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"#!eof")
    }

    /// Writes a representation of a boolean value to the specified writer.
    #[inline]
    fn write_bool<W: ?Sized>(&mut self, writer: &mut W, value: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(if value { b"#t" } else { b"#f" })
    }

    /// Writes a number like `-123`, `1/2` or `+1.5i` to the specified writer.
    #[inline]
    fn write_number<W: ?Sized>(&mut self, writer: &mut W, value: &Number) -> io::Result<()>
    where
        W: io::Write,
    {
        write!(writer, "{}", value)
    }

    /// Writes a character to the specified writer.
    ///
    /// Characters with a name, like `#\space`, are written by name;
    /// invisible characters are written in hexadecimal (`#\x85`).
    fn write_char<W: ?Sized>(&mut self, writer: &mut W, c: char) -> io::Result<()>
    where
        W: io::Write,
    {
        write_scheme_char(writer, c)
    }

    /// Called before each series of `write_string_fragment` and
    /// `write_char_escape`.  Writes a `"` to the specified writer.
    #[inline]
    fn begin_string<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"\"")
    }

    /// Called after each series of `write_string_fragment` and
    /// `write_char_escape`.  Writes a `"` to the specified writer.
    #[inline]
    fn end_string<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"\"")
    }

    /// Writes a string fragment that doesn't need any escaping to the specified
    /// writer.
    #[inline]
    fn write_string_fragment<W: ?Sized>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(fragment.as_bytes())
    }

    /// Writes a character escape code to the specified writer.
    #[inline]
    fn write_char_escape<W: ?Sized>(
        &mut self,
        writer: &mut W,
        char_escape: CharEscape,
    ) -> io::Result<()>
    where
        W: io::Write,
    {
        write_r7rs_char_escape(writer, char_escape)
    }

    /// Writes a symbol to the specified writer.
    ///
    /// Names that would not read back as the same symbol, such as `a b` or
    /// `1+`, are written between vertical bars.
    #[inline]
    fn write_symbol<W: ?Sized>(&mut self, writer: &mut W, name: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        if syntax::is_identifier(name) && parse_number(name, 10).is_err() {
            writer.write_all(name.as_bytes())
        } else {
            writer.write_all(b"|")?;
            format_escaped_contents(writer, self, name, b'|')?;
            writer.write_all(b"|")
        }
    }

    /// Writes a byte vector to the specified writer.
    #[inline]
    fn write_bytes<W: ?Sized>(&mut self, writer: &mut W, bytes: &[u8]) -> io::Result<()>
    where
        W: io::Write,
    {
        write_scheme_vector(self, writer, VectorType::Byte, bytes, |writer, &octet| {
            write!(writer, "{}", itoa::Buffer::new().format(octet))
        })
    }

    /// Called before any list elements.  Writes a `(` to the specified
    /// writer.
    #[inline]
    fn begin_list<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"(")
    }

    /// Called after all list elements have been written.  Writes a `)` to the
    /// specified writer.
    #[inline]
    fn end_list<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b")")
    }

    /// Called before starting to write a list or vector element. Writes a space
    /// to the specified writer, if needed.
    #[inline]
    fn begin_seq_element<W: ?Sized>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b" ")
        }
    }

    /// Called after every list or vector element.
    #[inline]
    fn end_seq_element<W: ?Sized>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        Ok(())
    }

    /// Called before any vector elements.  Will write `#(` for generic vectors,
    /// or `#u8(` for byte vectors, to the specified writer.
    #[inline]
    fn begin_vector<W: ?Sized>(&mut self, kind: VectorType, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        match kind {
            VectorType::Generic => writer.write_all(b"#("),
            VectorType::Byte => writer.write_all(b"#u8("),
        }
    }

    /// Called after all vector elements have been written.  Writes a `)` to the
    /// specified writer.
    #[inline]
    fn end_vector<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b")")
    }

    /// Called before writing the tail of an improper list, or more
    /// generally, the `cdr` field of a pair.  Writes a `.` to the specified
    /// writer.
    #[inline]
    fn write_dot<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b".")
    }

    /// Writes the label in front of a datum node that is referred to again,
    /// like `#0=`.
    #[inline]
    fn write_label_def<W: ?Sized>(&mut self, writer: &mut W, label: usize) -> io::Result<()>
    where
        W: io::Write,
    {
        write!(writer, "#{}=", label)
    }

    /// Writes a reference to a labelled datum node, like `#0#`.
    #[inline]
    fn write_label_ref<W: ?Sized>(&mut self, writer: &mut W, label: usize) -> io::Result<()>
    where
        W: io::Write,
    {
        write!(writer, "#{}#", label)
    }

    /// Returns the prefix to write `(symbol datum)` with, if that form is to
    /// be abbreviated.
    #[inline]
    fn abbreviation(&self, _symbol: &str) -> Option<&'static str> {
        None
    }

    /// Whether all datum nodes reached more than once get a label, rather
    /// than only those needed to break cycles.
    #[inline]
    fn label_shared(&self) -> bool {
        false
    }
}

static ABBREVIATIONS: &[(&str, &str)] = &[
    ("quote", "'"),
    ("quasiquote", "`"),
    ("unquote", ","),
    ("unquote-splicing", ",@"),
    ("syntax", "#'"),
    ("quasisyntax", "#`"),
    ("unsyntax", "#,"),
    ("unsyntax-splicing", "#,@"),
];

/// This structure compacts a datum on a single line, using the default
/// representation.
#[derive(Clone, Debug)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {}

/// A formatter which can be tuned with regards to the printed notation.
#[derive(Clone, Debug)]
pub struct CustomizedFormatter {
    options: Options,
}

impl Formatter for CustomizedFormatter {
    fn begin_vector<W: ?Sized>(&mut self, kind: VectorType, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        match kind {
            VectorType::Generic => writer.write_all(b"#("),
            VectorType::Byte => match self.options.bytes_style {
                BytesStyle::R6RS => writer.write_all(b"#vu8("),
                BytesStyle::R7RS => writer.write_all(b"#u8("),
            },
        }
    }

    fn abbreviation(&self, symbol: &str) -> Option<&'static str> {
        if !self.options.quote_abbreviation {
            return None;
        }
        ABBREVIATIONS
            .iter()
            .find(|(name, _)| *name == symbol)
            .map(|&(_, prefix)| prefix)
    }

    fn label_shared(&self) -> bool {
        self.options.shared_labels
    }
}

/// The leaves of a value or datum.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Atom<'a> {
    Null,
    Eof,
    Bool(bool),
    Number(&'a Number),
    Char(char),
    String(&'a str),
    Symbol(&'a str),
    Bytes(&'a [u8]),
}

/// Which datum nodes get labels, and the labels written so far.
struct Labels {
    marked: HashSet<NodeKey>,
    assigned: HashMap<NodeKey, usize>,
}

impl Labels {
    /// Finds the nodes that need a label, using a depth-first walk in
    /// printing order. A node needs one if it is reached again while still
    /// being printed, or, if `shared` is set, if it is reached twice at all.
    fn find(root: &Datum, shared: bool) -> Self {
        enum Visit {
            Enter(Datum),
            Exit(NodeKey),
        }

        let mut marked = HashSet::new();
        let mut visited = HashSet::new();
        let mut active = HashSet::new();
        let mut pending = vec![Visit::Enter(root.clone())];
        while let Some(visit) = pending.pop() {
            let datum = match visit {
                Visit::Enter(datum) => datum,
                Visit::Exit(key) => {
                    active.remove(&key);
                    continue;
                }
            };
            let key = datum.key();
            if active.contains(&key) {
                marked.insert(key);
                continue;
            }
            if !visited.insert(key) {
                if shared && matches!(datum.kind(), DatumKind::Pair | DatumKind::Vector) {
                    marked.insert(key);
                }
                continue;
            }
            match datum.kind() {
                DatumKind::Pair => {
                    if let Some((car, cdr)) = datum.as_pair() {
                        active.insert(key);
                        pending.push(Visit::Exit(key));
                        pending.push(Visit::Enter(cdr));
                        pending.push(Visit::Enter(car));
                    }
                }
                DatumKind::Vector => {
                    if let Some(elements) = datum.vector_iter() {
                        active.insert(key);
                        pending.push(Visit::Exit(key));
                        let elements: Vec<_> = elements.collect();
                        pending.extend(elements.into_iter().rev().map(Visit::Enter));
                    }
                }
                _ => {}
            }
        }
        Labels {
            marked,
            assigned: HashMap::new(),
        }
    }

    fn is_marked(&self, datum: &Datum) -> bool {
        self.marked.contains(&datum.key())
    }
}

/// A printer for values and datums.
#[derive(Debug)]
pub struct Printer<W, F = DefaultFormatter> {
    writer: W,
    formatter: F,
}

impl<W> Printer<W, CustomizedFormatter>
where
    W: io::Write,
{
    /// Construct a printer tuned given the specified options.
    pub fn with_options(writer: W, options: Options) -> Self {
        Printer {
            writer,
            formatter: CustomizedFormatter { options },
        }
    }
}

impl<W, F> Printer<W, F>
where
    W: io::Write,
    F: Formatter,
{
    /// Creates a new printer whose output will be written to the writer
    /// specified.
    #[inline]
    pub fn with_formatter(writer: W, formatter: F) -> Self {
        Printer { writer, formatter }
    }

    /// Unwrap the `Writer` from the `Printer`.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Output the representation of the specified value to the underlying
    /// writer.
    pub fn print(&mut self, value: &Value) -> io::Result<()> {
        match value {
            Value::Cons(pair) => {
                if let Some((prefix, quoted)) = self.abbreviated(value) {
                    self.writer.write_all(prefix.as_bytes())?;
                    return self.print(quoted);
                }
                self.formatter.begin_list(&mut self.writer)?;
                for (i, pair) in pair.iter().enumerate() {
                    self.formatter.begin_seq_element(&mut self.writer, i == 0)?;
                    self.print(pair.car())?;
                    self.formatter.end_seq_element(&mut self.writer)?;
                    match pair.cdr() {
                        Value::Null | Value::Cons(_) => {}
                        tail => {
                            self.write_dot()?;
                            self.formatter.begin_seq_element(&mut self.writer, false)?;
                            self.print(tail)?;
                            self.formatter.end_seq_element(&mut self.writer)?;
                        }
                    }
                }
                self.formatter.end_list(&mut self.writer)
            }
            Value::Vector(elements) => {
                self.write_vector(VectorType::Generic, elements.iter(), |printer, element| {
                    printer.print(element)
                })
            }
            Value::Null => self.print_atom(Atom::Null),
            Value::Eof => self.print_atom(Atom::Eof),
            Value::Bool(b) => self.print_atom(Atom::Bool(*b)),
            Value::Number(n) => self.print_atom(Atom::Number(n)),
            Value::Char(c) => self.print_atom(Atom::Char(*c)),
            Value::String(s) => self.print_atom(Atom::String(s)),
            Value::Symbol(name) => self.print_atom(Atom::Symbol(name)),
            Value::Bytes(bytes) => self.print_atom(Atom::Bytes(bytes)),
        }
    }

    /// Output the representation of the specified datum to the underlying
    /// writer.
    ///
    /// Nodes that are part of a cycle are labelled, so that the output is
    /// finite:
    ///
    /// ```
    /// let datum = lips_reader::datum::from_str("#7=(a b . #7#)").unwrap();
    /// let mut printer = lips_reader::print::Printer::new(Vec::new());
    /// printer.print_datum(&datum).unwrap();
    /// assert_eq!(printer.into_inner(), b"#0=(a b . #0#)");
    /// ```
    pub fn print_datum(&mut self, datum: &Datum) -> io::Result<()> {
        let mut labels = Labels::find(datum, self.formatter.label_shared());
        self.print_node(datum, &mut labels)
    }

    fn print_node(&mut self, datum: &Datum, labels: &mut Labels) -> io::Result<()> {
        if labels.is_marked(datum) {
            let key = datum.key();
            if let Some(&label) = labels.assigned.get(&key) {
                return self.formatter.write_label_ref(&mut self.writer, label);
            }
            let label = labels.assigned.len();
            labels.assigned.insert(key, label);
            self.formatter.write_label_def(&mut self.writer, label)?;
        }
        match datum.kind() {
            DatumKind::Pair => self.print_pair(datum, labels),
            DatumKind::Vector => {
                let elements = datum.vector_iter().into_iter().flatten();
                self.write_vector(VectorType::Generic, elements, |printer, element| {
                    printer.print_node(&element, labels)
                })
            }
            _ => match datum.atom() {
                Some(atom) => self.print_atom(atom),
                None => Ok(()),
            },
        }
    }

    fn print_pair(&mut self, datum: &Datum, labels: &mut Labels) -> io::Result<()> {
        if let Some((prefix, quoted)) = self.abbreviated_datum(datum, labels) {
            self.writer.write_all(prefix.as_bytes())?;
            return self.print_node(&quoted, labels);
        }
        self.formatter.begin_list(&mut self.writer)?;
        let mut cursor = datum.clone();
        let mut first = true;
        while let Some((car, cdr)) = cursor.as_pair() {
            self.formatter.begin_seq_element(&mut self.writer, first)?;
            self.print_node(&car, labels)?;
            self.formatter.end_seq_element(&mut self.writer)?;
            first = false;
            match cdr.kind() {
                DatumKind::Null => break,
                DatumKind::Pair if !labels.is_marked(&cdr) => cursor = cdr,
                _ => {
                    self.write_dot()?;
                    self.formatter.begin_seq_element(&mut self.writer, false)?;
                    self.print_node(&cdr, labels)?;
                    self.formatter.end_seq_element(&mut self.writer)?;
                    break;
                }
            }
        }
        self.formatter.end_list(&mut self.writer)
    }

    /// Returns the prefix and the quoted value if `value` is to be printed
    /// as an abbreviation like `'x`.
    fn abbreviated<'v>(&self, value: &'v Value) -> Option<(&'static str, &'v Value)> {
        let (head, rest) = value.as_pair()?;
        let prefix = self.formatter.abbreviation(head.as_symbol()?)?;
        match rest.as_pair()? {
            (quoted, Value::Null) => Some((prefix, quoted)),
            _ => None,
        }
    }

    fn abbreviated_datum(&self, datum: &Datum, labels: &Labels) -> Option<(&'static str, Datum)> {
        let (head, rest) = datum.as_pair()?;
        let prefix = self.formatter.abbreviation(head.as_symbol()?)?;
        if labels.is_marked(&rest) {
            return None;
        }
        let (quoted, tail) = rest.as_pair()?;
        if !tail.is_null() {
            return None;
        }
        Some((prefix, quoted))
    }

    fn write_dot(&mut self) -> io::Result<()> {
        self.formatter.begin_seq_element(&mut self.writer, false)?;
        self.formatter.write_dot(&mut self.writer)?;
        self.formatter.end_seq_element(&mut self.writer)
    }

    fn print_atom(&mut self, atom: Atom<'_>) -> io::Result<()> {
        match atom {
            Atom::Null => self.formatter.write_null(&mut self.writer),
            Atom::Eof => self.formatter.write_eof(&mut self.writer),
            Atom::Bool(b) => self.formatter.write_bool(&mut self.writer, b),
            Atom::Number(n) => self.formatter.write_number(&mut self.writer, n),
            Atom::Char(c) => self.formatter.write_char(&mut self.writer, c),
            Atom::String(s) => format_escaped_str(&mut self.writer, &mut self.formatter, s),
            Atom::Symbol(name) => self.formatter.write_symbol(&mut self.writer, name),
            Atom::Bytes(bytes) => self.formatter.write_bytes(&mut self.writer, bytes),
        }
    }

    fn write_vector<I, O>(&mut self, kind: VectorType, elements: I, mut output: O) -> io::Result<()>
    where
        I: IntoIterator,
        O: FnMut(&mut Self, I::Item) -> io::Result<()>,
    {
        self.formatter.begin_vector(kind, &mut self.writer)?;
        for (i, element) in elements.into_iter().enumerate() {
            self.formatter.begin_seq_element(&mut self.writer, i == 0)?;
            output(self, element)?;
            self.formatter.end_seq_element(&mut self.writer)?;
        }
        self.formatter.end_vector(&mut self.writer)
    }
}

fn write_scheme_vector<F: ?Sized, W: ?Sized, I, O>(
    fmt: &mut F,
    writer: &mut W,
    kind: VectorType,
    elements: I,
    mut output: O,
) -> io::Result<()>
where
    F: Formatter,
    W: io::Write,
    I: IntoIterator,
    O: FnMut(&mut W, I::Item) -> io::Result<()>,
{
    fmt.begin_vector(kind, writer)?;
    for (i, element) in elements.into_iter().enumerate() {
        fmt.begin_seq_element(writer, i == 0)?;
        output(writer, element)?;
        fmt.end_seq_element(writer)?;
    }
    fmt.end_vector(writer)
}

impl<W> Printer<W>
where
    W: io::Write,
{
    /// Creates a new printer.
    #[inline]
    pub fn new(writer: W) -> Self {
        Printer::with_formatter(writer, DefaultFormatter)
    }
}

impl<W, F> io::Write for Printer<W, F>
where
    W: io::Write,
{
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn format_escaped_str<W: ?Sized, F: ?Sized>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
) -> io::Result<()>
where
    W: io::Write,
    F: Formatter,
{
    formatter.begin_string(writer)?;
    format_escaped_contents(writer, formatter, value, b'"')?;
    formatter.end_string(writer)?;
    Ok(())
}

/// Writes `value` with escapes, leaving alone the one of `"` and `|` that is
/// not `delimiter`.
fn format_escaped_contents<W: ?Sized, F: ?Sized>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
    delimiter: u8,
) -> io::Result<()>
where
    W: io::Write,
    F: Formatter,
{
    let bytes = value.as_bytes();

    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let escape = ESCAPE[byte as usize];
        if escape == 0 || (matches!(escape, QU | VB) && byte != delimiter) {
            continue;
        }

        if start < i {
            formatter.write_string_fragment(writer, &value[start..i])?;
        }

        let char_escape = CharEscape::from_escape_table(escape, byte);
        formatter.write_char_escape(writer, char_escape)?;

        start = i + 1;
    }

    if start != bytes.len() {
        formatter.write_string_fragment(writer, &value[start..])?;
    }

    Ok(())
}

fn write_r7rs_char_escape<W: ?Sized>(writer: &mut W, char_escape: CharEscape) -> io::Result<()>
where
    W: io::Write,
{
    use self::CharEscape::*;

    let s = match char_escape {
        Quote => b"\\\"",
        Bar => b"\\|",
        ReverseSolidus => b"\\\\",
        Alert => b"\\a",
        Backspace => b"\\b",
        LineFeed => b"\\n",
        CarriageReturn => b"\\r",
        Tab => b"\\t",
        AsciiControl(byte) => {
            static HEX_DIGITS: [u8; 16] = *b"0123456789ABCDEF";
            let bytes = &[
                b'\\',
                b'x',
                HEX_DIGITS[(byte >> 4) as usize],
                HEX_DIGITS[(byte & 0xF) as usize],
                b';',
            ];
            return writer.write_all(bytes);
        }
    };

    writer.write_all(s)
}

fn write_scheme_char<W: ?Sized>(writer: &mut W, c: char) -> io::Result<()>
where
    W: io::Write,
{
    if let Some(name) = syntax::char_name(c) {
        write!(writer, "#\\{}", name)
    } else if c.is_control() || c.is_whitespace() {
        write!(writer, "#\\x{:x}", u32::from(c))
    } else {
        write!(writer, "#\\{}", c)
    }
}

const AA: u8 = b'a'; // \x07
const BB: u8 = b'b'; // \x08
const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const RR: u8 = b'r'; // \x0D
const QU: u8 = b'"'; // \x22
const VB: u8 = b'|'; // \x7C
const BS: u8 = b'\\'; // \x5C
const UU: u8 = b'u'; // \x00...\x1F except the ones above
const __: u8 = 0;

// Lookup table of escape sequences. A value of b'x' at index i means that byte
// i is escaped as "\x". A value of 0 means that byte i is not escaped.
static ESCAPE: [u8; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    UU, UU, UU, UU, UU, UU, UU, AA, BB, TT, NN, UU, UU, RR, UU, UU, // 0
    UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, // 1
    __, __, QU, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
    __, __, __, __, __, __, __, __, __, __, __, __, VB, __, __, UU, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

/// Serialize the given value as text into the IO stream, using the default
/// printer options.
#[inline]
pub fn to_writer<W: io::Write>(writer: W, value: &Value) -> io::Result<()> {
    let mut printer = Printer::new(writer);
    printer.print(value)?;
    Ok(())
}

/// Serialize the given value as text into the IO stream.
#[inline]
pub fn to_writer_custom<W: io::Write>(
    writer: W,
    value: &Value,
    options: Options,
) -> io::Result<()> {
    let mut printer = Printer::with_options(writer, options);
    printer.print(value)?;
    Ok(())
}

/// Serialize the given value as byte vector containing text, using the
/// default printer options.
#[inline]
pub fn to_vec(value: &Value) -> io::Result<Vec<u8>> {
    let mut writer = Vec::with_capacity(128);
    to_writer(&mut writer, value)?;
    Ok(writer)
}

/// Serialize the given value as byte vector containing text.
#[inline]
pub fn to_vec_custom(value: &Value, options: Options) -> io::Result<Vec<u8>> {
    let mut writer = Vec::with_capacity(128);
    to_writer_custom(&mut writer, value, options)?;
    Ok(writer)
}

/// Serialize the given value as a string, using the default printer options.
///
/// ```
/// use lips_reader::{print, Value};
///
/// let value = Value::list(vec![Value::symbol("a b"), Value::string("q\"")]);
/// assert_eq!(print::to_string(&value).unwrap(), r#"(|a b| "q\"")"#);
/// ```
#[inline]
pub fn to_string(value: &Value) -> io::Result<String> {
    let vec = to_vec(value)?;
    let string = unsafe {
        // We do not emit invalid UTF-8.
        String::from_utf8_unchecked(vec)
    };
    Ok(string)
}

/// Serialize the given value as a string.
///
/// ```
/// use lips_reader::{parse, print};
///
/// let value = parse::from_str("(quote (unquote x))").unwrap();
/// let options = print::Options::default().with_quote_abbreviation(true);
/// assert_eq!(print::to_string_custom(&value, options).unwrap(), "',x");
/// ```
#[inline]
pub fn to_string_custom(value: &Value, options: Options) -> io::Result<String> {
    let vec = to_vec_custom(value, options)?;
    let string = unsafe {
        // We do not emit invalid UTF-8.
        String::from_utf8_unchecked(vec)
    };
    Ok(string)
}

/// Serialize the given datum as text into the IO stream, using the default
/// printer options.
#[inline]
pub fn datum_to_writer<W: io::Write>(writer: W, datum: &Datum) -> io::Result<()> {
    let mut printer = Printer::new(writer);
    printer.print_datum(datum)
}

/// Serialize the given datum as text into the IO stream.
#[inline]
pub fn datum_to_writer_custom<W: io::Write>(
    writer: W,
    datum: &Datum,
    options: Options,
) -> io::Result<()> {
    let mut printer = Printer::with_options(writer, options);
    printer.print_datum(datum)
}

/// Serialize the given datum as a string, using the default printer options.
#[inline]
pub fn datum_to_string(datum: &Datum) -> io::Result<String> {
    let mut vec = Vec::with_capacity(128);
    datum_to_writer(&mut vec, datum)?;
    let string = unsafe {
        // We do not emit invalid UTF-8.
        String::from_utf8_unchecked(vec)
    };
    Ok(string)
}

/// Serialize the given datum as a string.
///
/// ```
/// use lips_reader::{datum, print};
///
/// let shared = datum::from_str("(#5=(x) #5#)").unwrap();
/// assert_eq!(print::datum_to_string(&shared).unwrap(), "((x) (x))");
/// let options = print::Options::default().with_shared_labels(true);
/// assert_eq!(
///     print::datum_to_string_custom(&shared, options).unwrap(),
///     "(#0=(x) #0#)"
/// );
/// ```
#[inline]
pub fn datum_to_string_custom(datum: &Datum, options: Options) -> io::Result<String> {
    let mut vec = Vec::with_capacity(128);
    datum_to_writer_custom(&mut vec, datum, options)?;
    let string = unsafe {
        // We do not emit invalid UTF-8.
        String::from_utf8_unchecked(vec)
    };
    Ok(string)
}

#[cfg(test)]
mod tests;

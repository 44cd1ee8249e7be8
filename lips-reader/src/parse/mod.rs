//! Scheme reader and options.
//!
//! # Terminology
//!
//! The process of converting source text to data is referred to as
//! "reading" in Lisp. To avoid confusion with Rust's `Read` trait, this
//! crate uses "parsing" instead.
//!
//! # Layers
//!
//! Parsing happens in two stages: the [`Lexer`] turns text into
//! [`Token`]s, and the [`Parser`] pulls tokens from the lexer on demand,
//! building one top-level [`Datum`] at a time. The functions at the root of
//! this module, such as [`from_str`], wrap a parser for the common case of
//! reading a single datum as an owned [`Value`]. For interactive use, the
//! [`Feed`] type accepts input piece by piece and tells incomplete input
//! apart from errors.

use std::io;
use std::rc::Rc;

use crate::datum::{Arena, Datum, Node, NodeId, Span};
use crate::Value;

use self::error::ErrorCode;
use self::labels::{Labels, Target};

mod error;
mod feed;
mod labels;
mod lexer;
mod read;

#[doc(inline)]
pub use self::error::{Category, Error, Expected, Result};
pub use self::feed::{Feed, ReadStatus};
pub use self::labels::LabelScope;
pub use self::lexer::{Bracket, Lexer, Token, TokenKind};
pub use self::read::Position;

/// Parser for the Scheme text representation.
///
/// This type, given a string slice, provides the [`parse`] method, which
/// reads a single top-level datum from the input.
///
/// [`parse`]: Parser::parse
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    remaining_depth: usize,
    labels: Labels,
}

/// Various options to influence parser behavior.
#[derive(Debug, Clone)]
pub struct Options {
    label_scope: LabelScope,
    brackets: Brackets,
    fold_case: bool,
    max_depth: usize,
    prefixes: Vec<(Box<str>, Box<str>)>,
}

/// Defines the treatment of brackets.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Brackets {
    /// Brackets are synonymous with regular parentheses, and indicate a list,
    /// as in R6RS Scheme.
    List,

    /// Brackets indicate a vector, like in Emacs Lisp.
    Vector,
}

static R7RS_PREFIXES: &[(&str, &str)] = &[
    ("'", "quote"),
    ("`", "quasiquote"),
    (",", "unquote"),
    (",@", "unquote-splicing"),
];

static R6RS_SYNTAX_PREFIXES: &[(&str, &str)] = &[
    ("#'", "syntax"),
    ("#`", "quasisyntax"),
    ("#,", "unsyntax"),
    ("#,@", "unsyntax-splicing"),
];

impl Options {
    /// Construct a minimal set of options.
    ///
    /// Only the R7RS quote prefixes (`'`, `` ` ``, `,` and `,@`) are
    /// recognized; otherwise, this is the same as the default.
    pub fn new() -> Self {
        Options {
            label_scope: LabelScope::Form,
            brackets: Brackets::List,
            fold_case: false,
            max_depth: 128,
            prefixes: R7RS_PREFIXES
                .iter()
                .map(|&(trigger, symbol)| (trigger.into(), symbol.into()))
                .collect(),
        }
    }

    /// Choose how long datum labels stay defined.
    pub fn with_label_scope(mut self, scope: LabelScope) -> Self {
        self.label_scope = scope;
        self
    }

    /// Choose how to handle brackets.
    pub fn with_brackets(mut self, treatment: Brackets) -> Self {
        self.brackets = treatment;
        self
    }

    /// Choose whether symbols and character names are folded to lower case
    /// initially.
    ///
    /// The `#!fold-case` and `#!no-fold-case` directives in the input
    /// override this.
    pub fn with_fold_case(mut self, fold_case: bool) -> Self {
        self.fold_case = fold_case;
        self
    }

    /// Set the maximum nesting depth of lists, vectors and quotations.
    ///
    /// Datum comments and datum labels count as a level for the datum they
    /// apply to.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Register a quote-like prefix.
    ///
    /// The datum following `trigger` will be read as a two-element list
    /// headed by `symbol`. Registering an existing trigger again replaces its
    /// symbol. Where several triggers match, the longest one wins.
    ///
    /// ```
    /// use lips_reader::{parse, Value};
    ///
    /// let options = parse::Options::new().with_prefix("^", "meta");
    /// let value = parse::from_str_custom("^x", options).unwrap();
    /// assert_eq!(value, Value::list(vec![Value::symbol("meta"), Value::symbol("x")]));
    /// ```
    pub fn with_prefix(mut self, trigger: &str, symbol: &str) -> Self {
        match self.prefixes.iter_mut().find(|(t, _)| &**t == trigger) {
            Some(entry) => entry.1 = symbol.into(),
            None => self.prefixes.push((trigger.into(), symbol.into())),
        }
        self
    }

    /// Query the scope of datum labels.
    pub fn label_scope(&self) -> LabelScope {
        self.label_scope
    }

    /// Query the way brackets are handled.
    pub fn brackets(&self) -> Brackets {
        self.brackets
    }

    /// Query whether case folding is initially enabled.
    pub fn fold_case(&self) -> bool {
        self.fold_case
    }

    /// Query the maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Iterate over the registered prefixes, as `(trigger, symbol)` pairs.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.prefixes
            .iter()
            .map(|(trigger, symbol)| (&**trigger, &**symbol))
    }
}

impl Default for Options {
    /// Construct a default set of options. This corresponds to R7RS Scheme,
    /// with the R6RS syntax prefixes added:
    ///
    /// - Datum labels are local to each top-level datum.
    /// - Brackets are treated just like parentheses, i.e. indicating a list.
    /// - Symbols are case-sensitive.
    /// - Nesting is limited to a depth of 128.
    /// - `#'`, `` #` ``, `#,` and `#,@` abbreviate `syntax`, `quasisyntax`,
    ///   `unsyntax` and `unsyntax-splicing` forms.
    fn default() -> Self {
        R6RS_SYNTAX_PREFIXES
            .iter()
            .fold(Options::new(), |options, &(trigger, symbol)| {
                options.with_prefix(trigger, symbol)
            })
    }
}

impl<'a> Parser<'a> {
    /// Creates a parser from a `&str`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &'a str) -> Self {
        Parser::from_str_custom(s, Options::default())
    }

    /// Creates a parser from a `&str`, using the given options.
    pub fn from_str_custom(s: &'a str, options: Options) -> Self {
        let labels = Labels::new(options.label_scope());
        Parser::resume(s, options, Position::start(), labels)
    }

    pub(crate) fn resume(s: &'a str, options: Options, base: Position, labels: Labels) -> Self {
        Parser {
            remaining_depth: options.max_depth(),
            lexer: Lexer::resume(s, options, base),
            labels,
        }
    }

    /// Position of the next character to be read.
    pub fn position(&self) -> Position {
        self.lexer.position()
    }

    /// The `Parser::end` method should be called after a datum has been fully
    /// parsed. This allows the `Parser` to validate that the input is at its
    /// end, or only has trailing whitespace and comments.
    pub fn end(&mut self) -> Result<()> {
        let mut scratch = Arena::default();
        let token = self.next_significant(&mut scratch);
        self.labels.discard();
        let token = token?;
        match token.kind() {
            TokenKind::Eof => Ok(()),
            _ => Err(Error::syntax(
                ErrorCode::TrailingCharacters,
                token.span().start(),
            )),
        }
    }

    /// Parse a single top-level datum from the input.
    ///
    /// If the end of input is encountered, this will return `Ok(None)`,
    /// otherwise, if parsing succeeded, `Ok(Some(datum))`. On error, nothing
    /// of the datum being read is kept.
    ///
    /// ```
    /// use lips_reader::parse::Parser;
    ///
    /// let mut parser = Parser::from_str("foo #;(skipped) (1 . 2)");
    /// assert_eq!(parser.parse().unwrap().unwrap().as_symbol(), Some("foo"));
    /// assert!(parser.parse().unwrap().unwrap().is_pair());
    /// assert!(parser.parse().unwrap().is_none());
    /// ```
    pub fn parse(&mut self) -> Result<Option<Datum>> {
        self.remaining_depth = self.lexer.options().max_depth();
        let mut arena = Arena::default();
        match self.parse_top(&mut arena) {
            Ok(Some(id)) => {
                let arena = Rc::new(arena);
                self.labels.commit(&arena);
                Ok(Some(Datum::new(arena, id)))
            }
            Ok(None) => {
                self.labels.discard();
                Ok(None)
            }
            Err(e) => {
                self.labels.discard();
                Err(e)
            }
        }
    }

    /// Parse a single top-level datum from the input.
    ///
    /// This expects a datum to be actually present, and returns an `Err` when
    /// called at the end of input. Use [`Parser::parse`] if you need to
    /// handle end of input gracefully.
    pub fn expect_datum(&mut self) -> Result<Datum> {
        match self.parse()? {
            Some(datum) => Ok(datum),
            None => Err(Error::syntax(
                ErrorCode::EofWhileParsingValue,
                self.lexer.position(),
            )),
        }
    }

    /// Parse a single top-level datum from the input as an owned value.
    ///
    /// Fails on cyclic data, which cannot be represented as a [`Value`].
    ///
    /// ```
    /// use lips_reader::{parse::Parser, Value};
    ///
    /// let mut parser = Parser::from_str(r#"foo ("bar" . 3.14) #(1 2)"#);
    /// assert_eq!(parser.parse_value().unwrap(), Value::symbol("foo"));
    /// assert_eq!(parser.parse_value().unwrap(), Value::cons("bar", 3.14));
    /// assert_eq!(parser.parse_value().unwrap(), Value::vector(vec![1, 2]));
    /// assert!(parser.end().is_ok());
    /// ```
    pub fn parse_value(&mut self) -> Result<Value> {
        let datum = self.expect_datum()?;
        datum
            .to_value()
            .ok_or_else(|| Error::syntax(ErrorCode::CyclicValue, datum.span().start()))
    }

    /// Returns an iterator over the remaining top-level datums.
    ///
    /// The iterator stops after the first error.
    pub fn datum_iter(&mut self) -> DatumIter<'_, 'a> {
        DatumIter {
            parser: self,
            done: false,
        }
    }

    /// Returns an iterator over the remaining top-level datums, as owned
    /// values.
    ///
    /// The iterator stops after the first error.
    pub fn value_iter(&mut self) -> ValueIter<'_, 'a> {
        ValueIter {
            parser: self,
            done: false,
        }
    }

    fn parse_top(&mut self, arena: &mut Arena) -> Result<Option<NodeId>> {
        let token = self.next_significant(arena)?;
        if let TokenKind::Eof = token.kind() {
            return Ok(None);
        }
        self.datum_from_token(arena, token).map(Some)
    }

    /// Returns the next token that is not part of a datum comment.
    fn next_significant(&mut self, arena: &mut Arena) -> Result<Token<'a>> {
        loop {
            let token = self.lexer.next_token()?;
            if let TokenKind::DatumComment = token.kind() {
                self.enter(token.span().start())?;
                self.parse_datum(arena)?;
                self.leave();
                continue;
            }
            return Ok(token);
        }
    }

    fn parse_datum(&mut self, arena: &mut Arena) -> Result<NodeId> {
        let token = self.next_significant(arena)?;
        self.datum_from_token(arena, token)
    }

    fn datum_from_token(&mut self, arena: &mut Arena, token: Token<'a>) -> Result<NodeId> {
        let span = token.span();
        let node = match token.into_kind() {
            TokenKind::Number(n) => Node::Number(n),
            TokenKind::String(s) => Node::String(s.into_boxed_str()),
            TokenKind::Char(c) => Node::Char(c),
            TokenKind::Symbol(name) => Node::Symbol(name.into_boxed_str()),
            TokenKind::Boolean(b) => Node::Bool(b),
            TokenKind::EofObject => Node::Eof,
            TokenKind::Open(bracket) => {
                self.enter(span.start())?;
                let id = match (bracket, self.lexer.options().brackets()) {
                    (Bracket::Square, Brackets::Vector) => self.parse_vector(arena, span, bracket),
                    _ => self.parse_list(arena, span, bracket),
                };
                self.leave();
                return id;
            }
            TokenKind::OpenVector => {
                self.enter(span.start())?;
                let id = self.parse_vector(arena, span, Bracket::Paren);
                self.leave();
                return id;
            }
            TokenKind::OpenBytevector => {
                self.enter(span.start())?;
                let id = self.parse_bytevector(arena, span);
                self.leave();
                return id;
            }
            TokenKind::Quote(symbol) => {
                self.enter(span.start())?;
                let id = self.parse_quotation(arena, span, symbol);
                self.leave();
                return id;
            }
            TokenKind::LabelDef(label) => return self.parse_labelled(arena, span, label),
            TokenKind::LabelRef(label) => match self.labels.lookup(label) {
                Some(Target::Local(id)) => Node::Ref(id),
                Some(Target::Earlier(datum)) => Node::Link(datum),
                None => {
                    return Err(Error::syntax(
                        ErrorCode::UndefinedLabel(label),
                        span.start(),
                    ))
                }
            },
            TokenKind::Dot => return Err(Error::syntax(ErrorCode::UnexpectedDot, span.start())),
            TokenKind::Close(_) => {
                return Err(Error::syntax(ErrorCode::UnexpectedClose, span.start()))
            }
            TokenKind::Eof => {
                return Err(Error::syntax(
                    ErrorCode::EofWhileParsingValue,
                    span.start(),
                ))
            }
            TokenKind::DatumComment => unreachable!("datum comments are skipped"),
        };
        Ok(arena.push(node, span))
    }

    fn enter(&mut self, position: Position) -> Result<()> {
        if self.remaining_depth == 0 {
            return Err(Error::syntax(
                ErrorCode::RecursionLimitExceeded,
                position,
            ));
        }
        self.remaining_depth -= 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.remaining_depth += 1;
    }

    /// Parses the elements of a list after its opening bracket.
    fn parse_list(&mut self, arena: &mut Arena, open: Span, bracket: Bracket) -> Result<NodeId> {
        let close = bracket.close_char();
        let mut elements = Vec::new();
        let mut tail = None;
        let end = loop {
            let token = self.next_significant(arena)?;
            match *token.kind() {
                TokenKind::Close(b) if b == bracket => break token.span(),
                TokenKind::Close(_) => {
                    return Err(Error::syntax(
                        ErrorCode::MismatchedParenthesis(close),
                        token.span().start(),
                    ))
                }
                TokenKind::Eof => {
                    return Err(Error::syntax(
                        ErrorCode::EofWhileParsingList(close),
                        token.span().start(),
                    ))
                }
                TokenKind::Dot => {
                    if elements.is_empty() {
                        return Err(Error::syntax(ErrorCode::UnexpectedDot, token.span().start()));
                    }
                    tail = Some(self.parse_dotted_tail(arena, close)?);
                    break self.expect_close(arena, bracket)?;
                }
                _ => elements.push(self.datum_from_token(arena, token)?),
            }
        };
        if elements.is_empty() {
            return Ok(arena.push(Node::Null, Span::new(open.start(), end.end())));
        }
        let mut rest = match tail {
            Some(id) => id,
            None => arena.push(Node::Null, end),
        };
        for (k, &car) in elements.iter().enumerate().rev() {
            let start = if k == 0 {
                open.start()
            } else {
                arena.span(car).start()
            };
            rest = arena.push(Node::Pair(car, rest), Span::new(start, end.end()));
        }
        Ok(rest)
    }

    /// Parses the datum after the dot of a dotted list.
    fn parse_dotted_tail(&mut self, arena: &mut Arena, close: char) -> Result<NodeId> {
        let token = self.next_significant(arena)?;
        match token.kind() {
            TokenKind::Close(_) => Err(Error::syntax(
                ErrorCode::MissingDatumAfterDot,
                token.span().start(),
            )),
            TokenKind::Eof => Err(Error::syntax(
                ErrorCode::EofWhileParsingList(close),
                token.span().start(),
            )),
            _ => self.datum_from_token(arena, token),
        }
    }

    /// Expects the closing bracket after the tail of a dotted list.
    fn expect_close(&mut self, arena: &mut Arena, bracket: Bracket) -> Result<Span> {
        let close = bracket.close_char();
        let token = self.next_significant(arena)?;
        let code = match *token.kind() {
            TokenKind::Close(b) if b == bracket => return Ok(token.span()),
            TokenKind::Close(_) => ErrorCode::MismatchedParenthesis(close),
            TokenKind::Eof => ErrorCode::EofWhileParsingList(close),
            _ => ErrorCode::ExtraDatumAfterDot(close),
        };
        Err(Error::syntax(code, token.span().start()))
    }

    /// Parses the elements of a vector or bytevector, up to and including the
    /// closing bracket, whose span is returned.
    fn parse_elements(
        &mut self,
        arena: &mut Arena,
        bracket: Bracket,
    ) -> Result<(Vec<NodeId>, Span)> {
        let close = bracket.close_char();
        let mut elements = Vec::new();
        loop {
            let token = self.next_significant(arena)?;
            match *token.kind() {
                TokenKind::Close(b) if b == bracket => return Ok((elements, token.span())),
                TokenKind::Close(_) => {
                    return Err(Error::syntax(
                        ErrorCode::MismatchedParenthesis(close),
                        token.span().start(),
                    ))
                }
                TokenKind::Eof => {
                    return Err(Error::syntax(
                        ErrorCode::EofWhileParsingVector(close),
                        token.span().start(),
                    ))
                }
                _ => elements.push(self.datum_from_token(arena, token)?),
            }
        }
    }

    fn parse_vector(&mut self, arena: &mut Arena, open: Span, bracket: Bracket) -> Result<NodeId> {
        let (elements, end) = self.parse_elements(arena, bracket)?;
        Ok(arena.push(
            Node::Vector(elements.into_boxed_slice()),
            Span::new(open.start(), end.end()),
        ))
    }

    fn parse_bytevector(&mut self, arena: &mut Arena, open: Span) -> Result<NodeId> {
        let (elements, end) = self.parse_elements(arena, Bracket::Paren)?;
        let bytes = elements
            .iter()
            .map(|&id| {
                octet(arena, id)
                    .ok_or_else(|| Error::syntax(ErrorCode::ExpectedOctet, arena.span(id).start()))
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(arena.push(
            Node::Bytes(bytes.into_boxed_slice()),
            Span::new(open.start(), end.end()),
        ))
    }

    /// Reads the datum after a quote-like prefix, wrapping it as
    /// `(symbol datum)`.
    ///
    /// The symbol gets the span of the prefix; both pairs end where the
    /// quoted datum ends.
    fn parse_quotation(
        &mut self,
        arena: &mut Arena,
        prefix: Span,
        symbol: String,
    ) -> Result<NodeId> {
        let quoted = self.parse_datum(arena)?;
        let quoted_span = arena.span(quoted);
        let end = quoted_span.end();
        let null = arena.push(Node::Null, Span::new(end, end));
        let rest = arena.push(Node::Pair(quoted, null), quoted_span);
        let head = arena.push(Node::Symbol(symbol.into_boxed_str()), prefix);
        Ok(arena.push(
            Node::Pair(head, rest),
            Span::new(prefix.start(), end),
        ))
    }

    /// Reads the datum after `#n=`.
    ///
    /// A placeholder node stands for the label while its datum is read, and
    /// is turned into a reference to the datum afterwards, so that references
    /// made in between see the finished datum.
    fn parse_labelled(&mut self, arena: &mut Arena, prefix: Span, label: u64) -> Result<NodeId> {
        let placeholder = arena.push(Node::Placeholder(label), prefix);
        if !self.labels.define(label, placeholder) {
            return Err(Error::syntax(
                ErrorCode::DuplicateLabel(label),
                prefix.start(),
            ));
        }
        self.enter(prefix.start())?;
        let datum = self.parse_datum(arena)?;
        self.leave();
        if arena.resolve(datum) == placeholder {
            return Err(Error::syntax(
                ErrorCode::SelfReferentialLabel(label),
                prefix.start(),
            ));
        }
        let end = arena.span(datum).end();
        arena.set(placeholder, Node::Ref(datum));
        arena.set_span(placeholder, Span::new(prefix.start(), end));
        Ok(placeholder)
    }
}

/// Returns the byte a bytevector element denotes, if any.
fn octet(arena: &Arena, id: NodeId) -> Option<u8> {
    let number = match arena.node(arena.resolve(id)) {
        Node::Number(n) => n,
        Node::Link(datum) => datum.as_number()?,
        _ => return None,
    };
    if !number.is_exact() {
        return None;
    }
    number.as_u64().and_then(|n| u8::try_from(n).ok())
}

/// Iterator over the top-level datums of a parser.
///
/// Created by [`Parser::datum_iter`].
#[derive(Debug)]
pub struct DatumIter<'p, 'a> {
    parser: &'p mut Parser<'a>,
    done: bool,
}

impl<'p, 'a> Iterator for DatumIter<'p, 'a> {
    type Item = Result<Datum>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.parser.parse() {
            Ok(Some(datum)) => Some(Ok(datum)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Iterator over the top-level datums of a parser, as owned values.
///
/// Created by [`Parser::value_iter`].
#[derive(Debug)]
pub struct ValueIter<'p, 'a> {
    parser: &'p mut Parser<'a>,
    done: bool,
}

impl<'p, 'a> Iterator for ValueIter<'p, 'a> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let datum = match self.parser.parse() {
            Ok(Some(datum)) => datum,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        let value = datum.to_value().ok_or_else(|| {
            self.done = true;
            Error::syntax(ErrorCode::CyclicValue, datum.span().start())
        });
        Some(value)
    }
}

pub(crate) fn read_to_string(rdr: &mut impl io::Read) -> Result<String> {
    let mut text = String::new();
    rdr.read_to_string(&mut text).map_err(Error::io)?;
    Ok(text)
}

/// Parse a value from an IO stream containing a single datum.
///
/// The stream is read to its end before parsing starts; invalid UTF-8 is
/// reported as an I/O error.
///
/// ```
/// use std::io::Cursor;
/// use lips_reader::{parse, Value};
///
/// let input = Cursor::new("(a . 1/2)");
/// let value = parse::from_reader_custom(input, parse::Options::default()).unwrap();
/// assert_eq!(value.as_pair().unwrap().0, &Value::symbol("a"));
/// ```
pub fn from_reader_custom(mut rdr: impl io::Read, options: Options) -> Result<Value> {
    let text = read_to_string(&mut rdr)?;
    from_str_custom(&text, options)
}

/// Parse a value from an IO stream containing a single datum, using the
/// default parser options.
///
/// See [`from_reader_custom`] for more information.
pub fn from_reader(rdr: impl io::Read) -> Result<Value> {
    from_reader_custom(rdr, Options::default())
}

/// Parse a value from a string slice containing a single datum.
///
/// Only whitespace and comments may follow the datum.
///
/// ```
/// use lips_reader::parse::{self, Brackets, Options};
///
/// let options = Options::default().with_brackets(Brackets::Vector);
/// let value = parse::from_str_custom("[1 2]", options).unwrap();
/// assert!(value.is_vector());
/// ```
pub fn from_str_custom(s: &str, options: Options) -> Result<Value> {
    let mut parser = Parser::from_str_custom(s, options);
    let value = parser.parse_value()?;
    parser.end()?;
    Ok(value)
}

/// Parse a value from a string slice containing a single datum, using the
/// default parser options.
///
/// ```
/// use lips_reader::{parse, Value};
///
/// let value = parse::from_str("'(1 2 . 3)").unwrap();
/// assert_eq!(value.to_string(), "(quote (1 2 . 3))");
/// assert!(parse::from_str("(1 2 . 3 4)").unwrap_err().is_syntax());
/// assert!(parse::from_str("(1 2").unwrap_err().is_incomplete());
/// ```
pub fn from_str(s: &str) -> Result<Value> {
    from_str_custom(s, Options::default())
}

/// Parse all top-level datums of a string slice.
pub fn read_all_custom(s: &str, options: Options) -> Result<Vec<Datum>> {
    Parser::from_str_custom(s, options).datum_iter().collect()
}

/// Parse all top-level datums of a string slice, using the default parser
/// options.
///
/// ```
/// let program = lips_reader::parse::read_all("(define x 1) #| note |# (display x)").unwrap();
/// assert_eq!(program.len(), 2);
/// ```
pub fn read_all(s: &str) -> Result<Vec<Datum>> {
    read_all_custom(s, Options::default())
}

#[cfg(test)]
mod tests;

use super::labels::Labels;
use super::read::{Position, StrRead};
use super::{Options, Parser, Result};
use crate::datum::Datum;

/// The outcome of [`Feed::next_datum`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReadStatus {
    /// A complete datum was read and removed from the buffer.
    Datum(Datum),

    /// The buffer ends in the middle of a datum; more input is needed.
    Incomplete,

    /// The buffer holds nothing but whitespace and comments.
    Exhausted,
}

/// Incremental reader for interactive use.
///
/// Text is added with [`push_str`](Feed::push_str), and datums are taken
/// out with [`next_datum`](Feed::next_datum) as soon as they are complete.
/// Input that ends in the middle of a datum is kept until more text
/// arrives, which makes a feed suitable for reading a line at a time.
///
/// A datum whose last token is an atom running up to the end of the buffer,
/// such as `abc` or `'x`, is also incomplete, since more text could extend
/// the atom. Pushing a delimiter, usually the newline that ends a line,
/// completes it.
///
/// ```
/// use lips_reader::parse::{Feed, ReadStatus};
///
/// let mut feed = Feed::new();
/// feed.push_str("(display\n");
/// assert_eq!(feed.next_datum().unwrap(), ReadStatus::Incomplete);
/// feed.push_str("  \"hello\")\n");
/// match feed.next_datum().unwrap() {
///     ReadStatus::Datum(datum) => assert_eq!(datum.span().end().line(), 2),
///     other => panic!("unexpected {:?}", other),
/// }
/// assert_eq!(feed.next_datum().unwrap(), ReadStatus::Exhausted);
/// ```
///
/// A feed is a parse session: positions keep counting across pushes, and
/// with [`LabelScope::Session`](super::LabelScope::Session) datum labels
/// defined by earlier datums stay visible.
#[derive(Debug, Clone)]
pub struct Feed {
    options: Options,
    buffer: String,
    base: Position,
    fold_case: bool,
    labels: Labels,
}

impl Feed {
    /// Creates a feed using the default options.
    pub fn new() -> Self {
        Feed::with_options(Options::default())
    }

    /// Creates a feed using the given options.
    pub fn with_options(options: Options) -> Self {
        Feed {
            fold_case: options.fold_case(),
            labels: Labels::new(options.label_scope()),
            buffer: String::new(),
            base: Position::start(),
            options,
        }
    }

    /// Appends text to the input.
    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Reads the next datum from the buffered input.
    ///
    /// Returns [`ReadStatus::Incomplete`] when the buffer ends inside a
    /// datum, or right after an atom that further input could extend.
    ///
    /// On an error, the buffer is left as it is; the caller decides how to
    /// resynchronize, for example by calling [`clear`](Feed::clear).
    pub fn next_datum(&mut self) -> Result<ReadStatus> {
        let options = self.options.clone().with_fold_case(self.fold_case);
        let mut parser = Parser::resume(&self.buffer, options, self.base, self.labels.clone());
        let result = parser.parse();
        let consumed = parser.lexer.index();
        let position = parser.lexer.position();
        let fold_case = parser.lexer.fold_case();

        match result {
            Ok(Some(_)) if consumed == self.buffer.len() && !ends_closed(&self.buffer) => {
                Ok(ReadStatus::Incomplete)
            }
            Ok(Some(datum)) => {
                self.labels = parser.labels;
                self.buffer.drain(..consumed);
                self.base = position;
                self.fold_case = fold_case;
                Ok(ReadStatus::Datum(datum))
            }
            Ok(None) => {
                self.labels = parser.labels;
                self.buffer.clear();
                self.base = position;
                self.fold_case = fold_case;
                Ok(ReadStatus::Exhausted)
            }
            Err(e) if e.is_incomplete() => Ok(ReadStatus::Incomplete),
            Err(e) => Err(e),
        }
    }

    /// Discards the buffered input.
    ///
    /// Positions of later input continue after the discarded text.
    pub fn clear(&mut self) {
        let mut read = StrRead::new(&self.buffer, self.base);
        read.skip_while(|_| true);
        self.base = read.position();
        self.buffer.clear();
        self.labels.discard();
    }

    /// Position at which the buffered input starts.
    pub fn position(&self) -> Position {
        self.base
    }

    /// The buffered input not yet read.
    pub fn pending(&self) -> &str {
        &self.buffer
    }
}

/// Whether the text ends with a character that closes its token, so that
/// nothing appended can become part of that token.
fn ends_closed(text: &str) -> bool {
    text.ends_with([')', ']', '"', '|'])
}

impl Default for Feed {
    fn default() -> Self {
        Feed::new()
    }
}

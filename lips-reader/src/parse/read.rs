use std::fmt;

/// A location in the source text.
///
/// Lines and columns are one-based; columns count characters, not bytes. The
/// offset is the zero-based byte offset from the start of the input. When
/// input arrives in pieces through a [`Feed`](super::Feed), positions keep
/// counting across pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    line: usize,
    column: usize,
    offset: usize,
}

impl Position {
    /// Constructs a position from its components.
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }

    /// The position of the first character of an input.
    pub fn start() -> Self {
        Position::new(1, 1, 0)
    }

    /// One-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based column number, counted in characters.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Zero-based byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Character cursor over a string slice, tracking the position of the next
/// character.
#[derive(Debug, Clone)]
pub(crate) struct StrRead<'a> {
    text: &'a str,
    /// Byte index of the *next* character returned by `next()` or `peek()`.
    index: usize,
    position: Position,
}

impl<'a> StrRead<'a> {
    /// Creates a cursor whose first character is at `base`.
    pub fn new(text: &'a str, base: Position) -> Self {
        StrRead {
            text,
            index: 0,
            position: base,
        }
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the character after the one `peek()` returns.
    #[inline]
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    #[inline]
    pub fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += c.len_utf8();
        self.position.advance(c);
        Some(c)
    }

    /// Consumes the next character if it is `expected`.
    #[inline]
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consumes `prefix` if the remaining input starts with it.
    pub fn eat_str(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            for _ in prefix.chars() {
                self.next();
            }
            true
        } else {
            false
        }
    }

    /// Consumes characters while `pred` holds.
    pub fn skip_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.next();
        }
    }

    /// Position of the next character.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte index of the next character within the text.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The text not consumed yet.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.text[self.index..]
    }

    /// The text between byte index `start` and the current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.text[start..self.index]
    }
}

//! When reading goes wrong.

use std::error;
use std::fmt::{self, Debug, Display};
use std::io;
use std::result;

use super::read::Position;
use crate::number::ParseNumberError;

/// This type represents the possible errors when reading Scheme data.
pub struct Error {
    /// Boxed to keep `Result<T, Error>` small on the hot path.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `lips_reader::parse::Error`.
pub type Result<T> = result::Result<T, Error>;

/// Categorizes the cause of a `lips_reader::parse::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The input source could not be read.
    Io,

    /// A malformed token: an invalid escape, character name, symbol or other
    /// `#` syntax.
    Lexical,

    /// A token that looks like a number but is not a valid numeric literal.
    Number,

    /// The tokens do not form a valid datum, e.g. an unmatched closing
    /// parenthesis or a misplaced dot.
    Syntax,

    /// The input ended in the middle of a datum.
    ///
    /// This is not necessarily an error for interactive use: reading may
    /// succeed once more input is available.
    Eof,
}

/// The kind of token the reader expected when it failed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Expected {
    /// Any datum.
    Datum,
    /// The given closing delimiter.
    Close(char),
    /// An exact integer between 0 and 255, as a bytevector element.
    Octet,
    /// The end of the input.
    EndOfInput,
}

impl Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Datum => f.write_str("a datum"),
            Expected::Close(c) => write!(f, "`{}`", c),
            Expected::Octet => f.write_str("an integer between 0 and 255"),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

impl Error {
    /// Position in the input at which the error was detected.
    ///
    /// This is `None` for I/O errors.
    pub fn position(&self) -> Option<Position> {
        self.err.position
    }

    /// The kind of token that would have been valid at the error position,
    /// if there is a single such kind.
    pub fn expected(&self) -> Option<Expected> {
        match self.err.code {
            ErrorCode::EofWhileParsingValue | ErrorCode::MissingDatumAfterDot => {
                Some(Expected::Datum)
            }
            ErrorCode::EofWhileParsingList(close)
            | ErrorCode::EofWhileParsingVector(close)
            | ErrorCode::MismatchedParenthesis(close)
            | ErrorCode::ExtraDatumAfterDot(close) => Some(Expected::Close(close)),
            ErrorCode::ExpectedOctet => Some(Expected::Octet),
            ErrorCode::TrailingCharacters => Some(Expected::EndOfInput),
            _ => None,
        }
    }

    /// Categorizes the cause of this error.
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::Io(_) => Category::Io,
            ErrorCode::EofWhileParsingList(_)
            | ErrorCode::EofWhileParsingVector(_)
            | ErrorCode::EofWhileParsingString
            | ErrorCode::EofWhileParsingSymbol
            | ErrorCode::EofWhileParsingComment
            | ErrorCode::EofWhileParsingCharacter
            | ErrorCode::EofWhileParsingValue => Category::Eof,
            ErrorCode::InvalidEscape
            | ErrorCode::InvalidCharacterConstant
            | ErrorCode::InvalidUnicodeCodePoint
            | ErrorCode::InvalidSymbol
            | ErrorCode::InvalidHashSyntax
            | ErrorCode::InvalidDirective
            | ErrorCode::InvalidLabel => Category::Lexical,
            ErrorCode::InvalidNumber(_) => Category::Number,
            ErrorCode::UnexpectedClose
            | ErrorCode::MismatchedParenthesis(_)
            | ErrorCode::UnexpectedDot
            | ErrorCode::MissingDatumAfterDot
            | ErrorCode::ExtraDatumAfterDot(_)
            | ErrorCode::ExpectedOctet
            | ErrorCode::DuplicateLabel(_)
            | ErrorCode::UndefinedLabel(_)
            | ErrorCode::SelfReferentialLabel(_)
            | ErrorCode::CyclicValue
            | ErrorCode::TrailingCharacters
            | ErrorCode::RecursionLimitExceeded => Category::Syntax,
        }
    }

    /// Returns true if this error was caused by a failure to read the input.
    pub fn is_io(&self) -> bool {
        self.classify() == Category::Io
    }

    /// Returns true if this error was caused by a malformed token.
    pub fn is_lexical(&self) -> bool {
        self.classify() == Category::Lexical
    }

    /// Returns true if this error was caused by an invalid numeric literal.
    pub fn is_number(&self) -> bool {
        self.classify() == Category::Number
    }

    /// Returns true if this error was caused by tokens that do not form a
    /// valid datum.
    pub fn is_syntax(&self) -> bool {
        self.classify() == Category::Syntax
    }

    /// Returns true if this error was caused by prematurely reaching the end
    /// of the input.
    pub fn is_eof(&self) -> bool {
        self.classify() == Category::Eof
    }

    /// Returns true if the input ends in the middle of a datum, so that
    /// reading might succeed once more input is supplied.
    ///
    /// This is the same as [`is_eof`](Error::is_eof).
    pub fn is_incomplete(&self) -> bool {
        self.is_eof()
    }

    /// If this error was caused by an invalid numeric literal, returns the
    /// underlying number error.
    pub fn number_error(&self) -> Option<&ParseNumberError> {
        match &self.err.code {
            ErrorCode::InvalidNumber(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Error> for io::Error {
    /// Convert a `lips_reader::parse::Error` into an `io::Error`.
    ///
    /// End-of-input errors become `UnexpectedEof` I/O errors, all other
    /// reader errors become `InvalidData`.
    fn from(e: Error) -> Self {
        match e.classify() {
            Category::Io => match e.err.code {
                ErrorCode::Io(err) => err,
                _ => unreachable!(),
            },
            Category::Eof => io::Error::new(io::ErrorKind::UnexpectedEof, e),
            Category::Lexical | Category::Number | Category::Syntax => {
                io::Error::new(io::ErrorKind::InvalidData, e)
            }
        }
    }
}

impl Error {
    pub(crate) fn syntax(code: ErrorCode, position: Position) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code,
                position: Some(position),
            }),
        }
    }

    pub(crate) fn io(error: io::Error) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code: ErrorCode::Io(error),
                position: None,
            }),
        }
    }
}

struct ErrorImpl {
    code: ErrorCode,
    position: Option<Position>,
}

#[derive(Debug)]
pub(crate) enum ErrorCode {
    /// The input source failed.
    Io(io::Error),

    /// EOF inside a list closed by the given character.
    EofWhileParsingList(char),

    /// EOF inside a vector or bytevector closed by the given character.
    EofWhileParsingVector(char),

    EofWhileParsingString,

    EofWhileParsingSymbol,

    /// EOF inside a `#| ... |#` comment.
    EofWhileParsingComment,

    EofWhileParsingCharacter,

    /// EOF where a datum is required.
    EofWhileParsingValue,

    /// Unknown escape sequence in a string or `|...|` symbol.
    InvalidEscape,

    InvalidCharacterConstant,

    InvalidUnicodeCodePoint,

    /// An atom that is neither a number nor a valid identifier.
    InvalidSymbol,

    /// `#` followed by something that is not a known dispatch character.
    InvalidHashSyntax,

    /// Unknown `#!` directive.
    InvalidDirective,

    /// Malformed `#n=` or `#n#`.
    InvalidLabel,

    InvalidNumber(ParseNumberError),

    /// A closing delimiter outside any list or vector.
    UnexpectedClose,

    /// Closed with the wrong delimiter; holds the one expected.
    MismatchedParenthesis(char),

    /// A dot outside of a list, or at the head of a list.
    UnexpectedDot,

    MissingDatumAfterDot,

    /// More than one datum after the dot of a dotted list.
    ExtraDatumAfterDot(char),

    ExpectedOctet,

    DuplicateLabel(u64),

    UndefinedLabel(u64),

    /// `#n=#n#`, which does not denote any datum.
    SelfReferentialLabel(u64),

    /// A cyclic datum requested as a `Value`.
    CyclicValue,

    /// Non-whitespace after the datum.
    TrailingCharacters,

    /// Nesting deeper than the configured limit.
    RecursionLimitExceeded,
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Io(err) => Display::fmt(err, f),
            ErrorCode::EofWhileParsingList(_) => f.write_str("EOF while parsing a list"),
            ErrorCode::EofWhileParsingVector(_) => f.write_str("EOF while parsing a vector"),
            ErrorCode::EofWhileParsingString => f.write_str("EOF while parsing a string"),
            ErrorCode::EofWhileParsingSymbol => f.write_str("EOF while parsing a symbol"),
            ErrorCode::EofWhileParsingComment => f.write_str("EOF while parsing a block comment"),
            ErrorCode::EofWhileParsingCharacter => {
                f.write_str("EOF while parsing a character constant")
            }
            ErrorCode::EofWhileParsingValue => f.write_str("EOF while parsing a value"),
            ErrorCode::InvalidEscape => f.write_str("invalid escape"),
            ErrorCode::InvalidCharacterConstant => f.write_str("invalid character constant"),
            ErrorCode::InvalidUnicodeCodePoint => f.write_str("invalid unicode code point"),
            ErrorCode::InvalidSymbol => f.write_str("invalid symbol"),
            ErrorCode::InvalidHashSyntax => f.write_str("invalid `#` syntax"),
            ErrorCode::InvalidDirective => f.write_str("invalid `#!` directive"),
            ErrorCode::InvalidLabel => f.write_str("invalid datum label"),
            ErrorCode::InvalidNumber(e) => write!(f, "invalid number: {}", e),
            ErrorCode::UnexpectedClose => f.write_str("unexpected closing parenthesis"),
            ErrorCode::MismatchedParenthesis(_) => f.write_str("mismatched parenthesis"),
            ErrorCode::UnexpectedDot => f.write_str("unexpected dot"),
            ErrorCode::MissingDatumAfterDot => f.write_str("missing datum after dot"),
            ErrorCode::ExtraDatumAfterDot(_) => f.write_str("more than one datum after dot"),
            ErrorCode::ExpectedOctet => f.write_str("expected octet"),
            ErrorCode::DuplicateLabel(n) => write!(f, "duplicate datum label #{}=", n),
            ErrorCode::UndefinedLabel(n) => write!(f, "undefined datum label #{}#", n),
            ErrorCode::SelfReferentialLabel(n) => {
                write!(f, "datum label #{}= refers only to itself", n)
            }
            ErrorCode::CyclicValue => f.write_str("cyclic datum cannot be converted to a value"),
            ErrorCode::TrailingCharacters => f.write_str("trailing characters"),
            ErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.err.code {
            ErrorCode::Io(err) => Some(err),
            ErrorCode::InvalidNumber(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{} at {}", self.code, pos),
            None => Display::fmt(&self.code, f),
        }
    }
}

// Shown by unwrap(), so keep it on one line.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.err.position {
            Some(pos) => write!(
                f,
                "Error({:?}, line: {}, column: {})",
                self.err.code.to_string(),
                pos.line(),
                pos.column(),
            ),
            None => write!(f, "Error({:?})", self.err.code.to_string()),
        }
    }
}

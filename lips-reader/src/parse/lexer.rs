//! Tokenizer turning source text into a stream of tokens.

use super::error::{Error, ErrorCode, Result};
use super::read::{Position, StrRead};
use super::Options;
use crate::datum::Span;
use crate::number::{parse_number, Number};
use crate::syntax;

/// A lexical unit of the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    kind: TokenKind,
    span: Span,
    text: &'a str,
}

impl<'a> Token<'a> {
    /// What kind of token this is, along with its decoded value.
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Consumes the token, returning its kind.
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    /// Where the token appears in the source.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The raw source text of the token.
    pub fn text(&self) -> &'a str {
        self.text
    }
}

/// The two kinds of brackets delimiting lists and vectors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bracket {
    /// `(` and `)`.
    Paren,
    /// `[` and `]`.
    Square,
}

impl Bracket {
    /// The character closing this kind of bracket.
    pub fn close_char(self) -> char {
        match self {
            Bracket::Paren => ')',
            Bracket::Square => ']',
        }
    }
}

/// The kinds of tokens, with decoded values for atoms.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A number literal.
    Number(Number),
    /// A string literal, with escapes decoded.
    String(String),
    /// A character literal.
    Char(char),
    /// A symbol, with `|...|` escapes decoded and case folding applied.
    Symbol(String),
    /// `#t` or `#f`, in any spelling.
    Boolean(bool),
    /// `#!eof`.
    EofObject,
    /// An opening parenthesis or bracket.
    Open(Bracket),
    /// A closing parenthesis or bracket.
    Close(Bracket),
    /// `#(`.
    OpenVector,
    /// `#u8(` or `#vu8(`.
    OpenBytevector,
    /// A lone `.` inside a list.
    Dot,
    /// A quote-like prefix such as `'` or `,@`; holds the symbol that the
    /// following datum is wrapped with.
    Quote(String),
    /// `#;`, which comments out the following datum.
    DatumComment,
    /// `#n=`.
    LabelDef(u64),
    /// `#n#`.
    LabelRef(u64),
    /// The end of the input.
    Eof,
}

/// What follows a `#`, indexed by the ASCII character after it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Hash {
    Invalid,
    Vector,
    Char,
    Boolean,
    Bytevector,
    Number,
    Label,
    BlockComment,
    DatumComment,
    Directive,
}

static HASH: [Hash; 128] = {
    let mut table = [Hash::Invalid; 128];
    table[b'(' as usize] = Hash::Vector;
    table[b'\\' as usize] = Hash::Char;
    table[b't' as usize] = Hash::Boolean;
    table[b'f' as usize] = Hash::Boolean;
    table[b'T' as usize] = Hash::Boolean;
    table[b'F' as usize] = Hash::Boolean;
    table[b'u' as usize] = Hash::Bytevector;
    table[b'v' as usize] = Hash::Bytevector;
    table[b'U' as usize] = Hash::Bytevector;
    table[b'V' as usize] = Hash::Bytevector;
    let prefixes = b"bodxeiBODXEI";
    let mut i = 0;
    while i < prefixes.len() {
        table[prefixes[i] as usize] = Hash::Number;
        i += 1;
    }
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = Hash::Label;
        digit += 1;
    }
    table[b'|' as usize] = Hash::BlockComment;
    table[b';' as usize] = Hash::DatumComment;
    table[b'!' as usize] = Hash::Directive;
    table
};

/// Pull-based tokenizer.
///
/// Tokens are produced one at a time, on demand. Whitespace, `;` line
/// comments, nested `#| ... |#` block comments and the `#!fold-case` and
/// `#!no-fold-case` directives are skipped; `#;` datum comments are reported
/// as [`TokenKind::DatumComment`] for the reader to handle.
///
/// As an iterator, the lexer yields every token up to and including
/// [`TokenKind::Eof`], or up to the first error.
///
/// ```
/// use lips_reader::parse::{Lexer, TokenKind};
///
/// let kinds: Vec<_> = Lexer::new("(a . #t)")
///     .map(|token| token.unwrap().into_kind())
///     .collect();
/// assert_eq!(kinds.len(), 6);
/// assert_eq!(kinds[2], TokenKind::Dot);
/// assert_eq!(kinds[3], TokenKind::Boolean(true));
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    read: StrRead<'a>,
    options: Options,
    fold_case: bool,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer using the default options.
    pub fn new(text: &'a str) -> Self {
        Lexer::with_options(text, Options::default())
    }

    /// Creates a lexer using the given options.
    pub fn with_options(text: &'a str, options: Options) -> Self {
        Lexer::resume(text, options, Position::start())
    }

    /// Creates a lexer for text that starts at `base` within a larger input.
    pub(crate) fn resume(text: &'a str, options: Options, base: Position) -> Self {
        let fold_case = options.fold_case();
        Lexer {
            read: StrRead::new(text, base),
            options,
            fold_case,
            done: false,
        }
    }

    /// Position of the next character to be read.
    pub fn position(&self) -> Position {
        self.read.position()
    }

    /// Byte index of the next character to be read within the text.
    pub(crate) fn index(&self) -> usize {
        self.read.index()
    }

    /// Whether case folding is currently in effect, as changed by
    /// `#!fold-case` and `#!no-fold-case`.
    pub fn fold_case(&self) -> bool {
        self.fold_case
    }

    pub(crate) fn options(&self) -> &Options {
        &self.options
    }

    /// Reads the next token.
    ///
    /// At the end of the input, this returns a [`TokenKind::Eof`] token, as
    /// many times as it is called.
    pub fn next_token(&mut self) -> Result<Token<'a>> {
        loop {
            self.read.skip_while(char::is_whitespace);
            let start = self.read.position();
            let start_index = self.read.index();
            if let Some(kind) = self.scan(start)? {
                return Ok(Token {
                    kind,
                    span: Span::new(start, self.read.position()),
                    text: self.read.slice_from(start_index),
                });
            }
        }
    }

    /// Scans one token, returning `None` if what was consumed produces no
    /// token, such as a comment.
    fn scan(&mut self, start: Position) -> Result<Option<TokenKind>> {
        let c = match self.read.peek() {
            Some(c) => c,
            None => return Ok(Some(TokenKind::Eof)),
        };
        match c {
            ';' => {
                self.read.skip_while(|c| c != '\n');
                return Ok(None);
            }
            '(' | '[' | ')' | ']' => {
                self.read.next();
                let bracket = if c == '(' || c == ')' {
                    Bracket::Paren
                } else {
                    Bracket::Square
                };
                return Ok(Some(if c == '(' || c == '[' {
                    TokenKind::Open(bracket)
                } else {
                    TokenKind::Close(bracket)
                }));
            }
            '"' => {
                self.read.next();
                return self.parse_string().map(|s| Some(TokenKind::String(s)));
            }
            '|' => {
                self.read.next();
                return self.parse_pipe_symbol().map(|s| Some(TokenKind::Symbol(s)));
            }
            _ => {}
        }
        if c == '#' {
            match self.read.peek_second() {
                Some('|') => return self.skip_block_comment(start).map(|()| None),
                Some('!') => return self.parse_directive(start),
                _ => {}
            }
        }
        if let Some(symbol) = self.parse_prefix() {
            return Ok(Some(TokenKind::Quote(symbol)));
        }
        if c == '#' {
            return self.parse_hash(start).map(Some);
        }
        self.parse_atom(start).map(Some)
    }

    /// Matches the longest registered quote-like prefix.
    fn parse_prefix(&mut self) -> Option<String> {
        let rest = self.read.rest();
        let (trigger, symbol) = self
            .options
            .prefixes()
            .filter(|(trigger, _)| rest.starts_with(trigger))
            .max_by_key(|(trigger, _)| trigger.len())?;
        let symbol = symbol.to_owned();
        let trigger_len = trigger.chars().count();
        for _ in 0..trigger_len {
            self.read.next();
        }
        Some(symbol)
    }

    fn parse_hash(&mut self, start: Position) -> Result<TokenKind> {
        let dispatch = match self.read.peek_second() {
            Some(c) if c.is_ascii() => HASH[c as usize],
            Some(_) => Hash::Invalid,
            None => {
                self.read.next();
                return Err(Error::syntax(ErrorCode::EofWhileParsingValue, start));
            }
        };
        match dispatch {
            Hash::Vector => {
                self.read.next();
                self.read.next();
                Ok(TokenKind::OpenVector)
            }
            Hash::Char => {
                self.read.next();
                self.read.next();
                self.parse_char(start).map(TokenKind::Char)
            }
            Hash::Boolean => {
                let text = self.take_atom();
                match text[1..].to_ascii_lowercase().as_str() {
                    "t" | "true" => Ok(TokenKind::Boolean(true)),
                    "f" | "false" => Ok(TokenKind::Boolean(false)),
                    _ => Err(Error::syntax(ErrorCode::InvalidHashSyntax, start)),
                }
            }
            Hash::Bytevector => {
                self.read.next();
                let rest = self.read.rest();
                for opener in &["u8(", "vu8("] {
                    if rest.len() >= opener.len()
                        && rest.is_char_boundary(opener.len())
                        && rest[..opener.len()].eq_ignore_ascii_case(opener)
                    {
                        self.read.eat_str(&rest[..opener.len()]);
                        return Ok(TokenKind::OpenBytevector);
                    }
                }
                Err(Error::syntax(ErrorCode::InvalidHashSyntax, start))
            }
            Hash::Number => {
                let text = self.take_atom();
                parse_number(text, 10)
                    .map(TokenKind::Number)
                    .map_err(|e| Error::syntax(ErrorCode::InvalidNumber(e), start))
            }
            Hash::Label => {
                self.read.next();
                let digits_start = self.read.index();
                self.read.skip_while(|c| c.is_ascii_digit());
                let n: u64 = self
                    .read
                    .slice_from(digits_start)
                    .parse()
                    .map_err(|_| Error::syntax(ErrorCode::InvalidLabel, start))?;
                match self.read.next() {
                    Some('=') => Ok(TokenKind::LabelDef(n)),
                    Some('#') => Ok(TokenKind::LabelRef(n)),
                    _ => Err(Error::syntax(ErrorCode::InvalidLabel, start)),
                }
            }
            Hash::DatumComment => {
                self.read.next();
                self.read.next();
                Ok(TokenKind::DatumComment)
            }
            // Comments and directives are handled before dispatch.
            Hash::BlockComment | Hash::Directive | Hash::Invalid => {
                self.read.next();
                Err(Error::syntax(ErrorCode::InvalidHashSyntax, start))
            }
        }
    }

    /// Consumes the text up to the next delimiter.
    fn take_atom(&mut self) -> &'a str {
        let start = self.read.index();
        self.read.skip_while(|c| !syntax::is_delimiter(c));
        self.read.slice_from(start)
    }

    fn parse_atom(&mut self, start: Position) -> Result<TokenKind> {
        let text = self.take_atom();
        if text == "." {
            return Ok(TokenKind::Dot);
        }
        let first = text.chars().next().unwrap_or(' ');
        let numeric_start = first.is_ascii_digit() || matches!(first, '+' | '-' | '.');
        if numeric_start {
            match parse_number(text, 10) {
                Ok(n) => return Ok(TokenKind::Number(n)),
                Err(e) => {
                    if !syntax::is_identifier(text) {
                        let looks_numeric = text
                            .trim_start_matches(['+', '-', '.'])
                            .starts_with(|c: char| c.is_ascii_digit());
                        let code = if looks_numeric {
                            ErrorCode::InvalidNumber(e)
                        } else {
                            ErrorCode::InvalidSymbol
                        };
                        return Err(Error::syntax(code, start));
                    }
                }
            }
        } else if !syntax::is_identifier(text) {
            return Err(Error::syntax(ErrorCode::InvalidSymbol, start));
        }
        Ok(TokenKind::Symbol(self.fold_name(text)))
    }

    fn fold_name(&self, name: &str) -> String {
        if self.fold_case {
            name.to_lowercase()
        } else {
            name.to_owned()
        }
    }

    /// Parses a character after `#\`.
    fn parse_char(&mut self, start: Position) -> Result<char> {
        let first = self
            .read
            .next()
            .ok_or_else(|| Error::syntax(ErrorCode::EofWhileParsingCharacter, start))?;
        if syntax::is_delimiter(first) {
            return Ok(first);
        }
        let rest_start = self.read.index();
        self.read.skip_while(|c| !syntax::is_delimiter(c));
        let rest = self.read.slice_from(rest_start);
        if rest.is_empty() {
            return Ok(first);
        }
        let mut name = String::with_capacity(rest.len() + 1);
        name.push(first);
        name.push_str(rest);
        let name = self.fold_name(&name);
        if let Some(c) = syntax::char_by_name(&name) {
            return Ok(c);
        }
        if matches!(first, 'x' | 'X') && rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return u32::from_str_radix(rest, 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| Error::syntax(ErrorCode::InvalidUnicodeCodePoint, start));
        }
        Err(Error::syntax(ErrorCode::InvalidCharacterConstant, start))
    }

    /// Parses the remainder of a string after the opening quote.
    fn parse_string(&mut self) -> Result<String> {
        self.parse_delimited('"', ErrorCode::EofWhileParsingString)
    }

    /// Parses the remainder of a `|...|` symbol after the opening bar.
    fn parse_pipe_symbol(&mut self) -> Result<String> {
        self.parse_delimited('|', ErrorCode::EofWhileParsingSymbol)
    }

    fn parse_delimited(&mut self, terminator: char, eof: ErrorCode) -> Result<String> {
        let mut out = String::new();
        loop {
            let position = self.read.position();
            let c = match self.read.next() {
                Some(c) => c,
                None => return Err(Error::syntax(eof, position)),
            };
            if c == terminator {
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            let escape = match self.read.next() {
                Some(c) => c,
                None => return Err(Error::syntax(eof, position)),
            };
            match escape {
                'a' => out.push('\u{7}'),
                'b' => out.push('\u{8}'),
                't' => out.push('\t'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                '"' | '\\' | '|' => out.push(escape),
                'x' | 'X' => out.push(self.parse_hex_escape(position)?),
                c if matches!(c, '\n' | '\r') || is_intraline_whitespace(c) => {
                    self.skip_line_continuation(c, position)?;
                }
                _ => return Err(Error::syntax(ErrorCode::InvalidEscape, position)),
            }
        }
    }

    /// Parses the hex digits and the terminating `;` of a `\x` escape.
    fn parse_hex_escape(&mut self, position: Position) -> Result<char> {
        let digits_start = self.read.index();
        self.read.skip_while(|c| c.is_ascii_hexdigit());
        let digits = self.read.slice_from(digits_start);
        if digits.is_empty() || !self.read.eat(';') {
            return Err(Error::syntax(ErrorCode::InvalidEscape, position));
        }
        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| Error::syntax(ErrorCode::InvalidUnicodeCodePoint, position))
    }

    /// Skips `\<intraline whitespace>*<newline><intraline whitespace>*`; the
    /// backslash and `first` have already been consumed.
    fn skip_line_continuation(&mut self, first: char, position: Position) -> Result<()> {
        let mut newline = first;
        if is_intraline_whitespace(first) {
            self.read.skip_while(is_intraline_whitespace);
            newline = self.read.next().unwrap_or(' ');
        }
        match newline {
            '\n' => {}
            '\r' => {
                self.read.eat('\n');
            }
            _ => return Err(Error::syntax(ErrorCode::InvalidEscape, position)),
        }
        self.read.skip_while(is_intraline_whitespace);
        Ok(())
    }

    fn skip_block_comment(&mut self, start: Position) -> Result<()> {
        self.read.next();
        self.read.next();
        let mut depth = 1usize;
        while depth > 0 {
            match self.read.next() {
                Some('|') if self.read.eat('#') => depth -= 1,
                Some('#') if self.read.eat('|') => depth += 1,
                Some(_) => {}
                None => return Err(Error::syntax(ErrorCode::EofWhileParsingComment, start)),
            }
        }
        Ok(())
    }

    fn parse_directive(&mut self, start: Position) -> Result<Option<TokenKind>> {
        let text = self.take_atom();
        match text[2..].to_ascii_lowercase().as_str() {
            "fold-case" => {
                self.fold_case = true;
                Ok(None)
            }
            "no-fold-case" => {
                self.fold_case = false;
                Ok(None)
            }
            "eof" => Ok(Some(TokenKind::EofObject)),
            _ => Err(Error::syntax(ErrorCode::InvalidDirective, start)),
        }
    }
}

fn is_intraline_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        self.done = match &token {
            Ok(token) => token.kind == TokenKind::Eof,
            Err(_) => true,
        };
        Some(token)
    }
}

//! Lexical classes shared between the reader and the printer.

/// Character names accepted after `#\`, with the character they denote.
///
/// The first entry for each character is the name the printer uses.
static CHAR_NAMES: &[(&str, char)] = &[
    ("alarm", '\u{7}'),
    ("backspace", '\u{8}'),
    ("delete", '\u{7f}'),
    ("escape", '\u{1b}'),
    ("newline", '\n'),
    ("null", '\0'),
    ("return", '\r'),
    ("space", ' '),
    ("tab", '\t'),
    ("nul", '\0'),
    ("altmode", '\u{1b}'),
    ("esc", '\u{1b}'),
    ("linefeed", '\n'),
    ("vtab", '\u{b}'),
    ("page", '\u{c}'),
    ("rubout", '\u{7f}'),
];

/// Looks up a named character, e.g. `space` for `#\space`.
pub(crate) fn char_by_name(name: &str) -> Option<char> {
    CHAR_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, c)| c)
}

/// Returns the name the printer uses for `c`, if it has one.
pub(crate) fn char_name(c: char) -> Option<&'static str> {
    CHAR_NAMES
        .iter()
        .find(|&&(_, candidate)| candidate == c)
        .map(|&(name, _)| name)
}

/// Returns true if `c` ends an atom such as a number or a symbol.
#[inline]
pub(crate) fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | '"' | ';' | '|')
}

/// Returns true if `c` may start an identifier.
#[inline]
pub(crate) fn is_initial(c: char) -> bool {
    match c {
        'a'..='z' | 'A'..='Z' => true,
        '!' | '$' | '%' | '&' | '*' | '/' | ':' | '<' | '=' | '>' | '?' | '^' | '_' | '~' => true,
        c => !c.is_ascii() && !c.is_whitespace() && !c.is_control(),
    }
}

/// Returns true if `c` may appear after the first character of an identifier.
#[inline]
pub(crate) fn is_subsequent(c: char) -> bool {
    is_initial(c) || c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | '@')
}

fn is_sign_subsequent(c: char) -> bool {
    is_initial(c) || matches!(c, '+' | '-' | '@')
}

fn is_dot_subsequent(c: char) -> bool {
    is_sign_subsequent(c) || c == '.'
}

/// Returns true if `s` is an identifier that can be written without vertical
/// bars.
///
/// This covers ordinary identifiers as well as the peculiar ones: `+`, `-`,
/// `...` and identifiers starting with a sign or a dot. Some numbers, such
/// as `+i` and `-inf.0`, also have this shape; telling them apart is up to
/// the caller.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    let rest = chars.as_str();
    if is_initial(first) {
        return rest.chars().all(is_subsequent);
    }
    match first {
        '+' | '-' => {
            let mut chars = rest.chars();
            match chars.next() {
                None => true,
                Some('.') => match chars.next() {
                    Some(c) if is_dot_subsequent(c) => chars.all(is_subsequent),
                    _ => false,
                },
                Some(c) if is_sign_subsequent(c) => chars.all(is_subsequent),
                Some(_) => false,
            }
        }
        '.' => {
            let mut chars = rest.chars();
            match chars.next() {
                Some(c) if is_dot_subsequent(c) => chars.all(is_subsequent),
                _ => false,
            }
        }
        _ => false,
    }
}

#![cfg_attr(tarpaulin, skip)]

use super::*;
use crate::datum;
use crate::parse;

fn print_datum(text: &str) -> String {
    datum_to_string(&datum::from_str(text).unwrap()).unwrap()
}

#[test]
fn test_options_size() {
    // Printer options are a handful of flags.
    assert!(std::mem::size_of::<Options>() <= std::mem::size_of::<u32>() * 2);
}

#[test]
fn test_atoms() {
    for (value, expected) in &[
        (Value::Null, "()"),
        (Value::Eof, "#!eof"),
        (Value::from(true), "#t"),
        (Value::from(false), "#f"),
        (Value::from(-42), "-42"),
        (Value::from(1.5), "1.5"),
        (Value::symbol("lambda"), "lambda"),
        (Value::bytes(vec![0u8, 1, 255]), "#u8(0 1 255)"),
        (Value::bytes(Vec::<u8>::new()), "#u8()"),
    ] {
        assert_eq!(to_string(value).unwrap(), *expected);
    }
}

#[test]
fn test_str_escapes_default() {
    // Only the R7RS memnonic shorthands are used, other control characters are
    // represented as `\xNN;`.
    assert_eq!(
        to_string(&Value::string(
            "\u{07}\u{08}\u{09}\n\u{0b}\u{0c}\r\u{0e}\u{0f}\u{10}"
        ))
        .unwrap(),
        r#""\a\b\t\n\x0B;\x0C;\r\x0E;\x0F;\x10;""#
    );
    assert_eq!(
        to_string(&Value::string(r#"a "quoted" \ |bar|"#)).unwrap(),
        r#""a \"quoted\" \\ |bar|""#
    );
}

#[test]
fn test_symbol_bars() {
    for (name, expected) in &[
        ("hello-world", "hello-world"),
        ("...", "..."),
        ("+", "+"),
        ("->x", "->x"),
        ("a b", "|a b|"),
        ("", "||"),
        ("1+", "|1+|"),
        ("-5", "|-5|"),
        ("+i", "|+i|"),
        ("x|y", r"|x\|y|"),
        ("say \"hi\"", r#"|say "hi"|"#),
        ("(", "|(|"),
        ("tab\there", r"|tab\there|"),
    ] {
        assert_eq!(to_string(&Value::symbol(*name)).unwrap(), *expected);
    }
}

#[test]
fn test_chars() {
    for (c, expected) in &[
        ('a', r"#\a"),
        ('λ', r"#\λ"),
        (' ', r"#\space"),
        ('\n', r"#\newline"),
        ('\0', r"#\null"),
        ('\u{7f}', r"#\delete"),
        ('\u{1b}', r"#\escape"),
        ('\u{b}', r"#\vtab"),
        ('\u{85}', r"#\x85"),
        ('\u{a0}', r"#\xa0"),
        ('(', r"#\("),
    ] {
        assert_eq!(to_string(&Value::Char(*c)).unwrap(), *expected);
    }
}

#[test]
fn test_lists_and_vectors() {
    assert_eq!(to_string(&Value::list(vec![1, 2, 3])).unwrap(), "(1 2 3)");
    assert_eq!(to_string(&Value::append(vec![1, 2], 3)).unwrap(), "(1 2 . 3)");
    assert_eq!(
        to_string(&Value::vector(vec![
            Value::from(1),
            Value::list(vec![Value::symbol("a")]),
            Value::Null,
        ]))
        .unwrap(),
        "#(1 (a) ())"
    );
    assert_eq!(to_string(&Value::vector(Vec::<Value>::new())).unwrap(), "#()");
}

#[test]
fn test_bytes_style() {
    let bytes = Value::bytes(vec![1u8, 2]);
    let r6rs = Options::default().with_bytes_style(BytesStyle::R6RS);
    assert_eq!(to_string_custom(&bytes, r6rs).unwrap(), "#vu8(1 2)");
    let r7rs = Options::default().with_bytes_style(BytesStyle::R7RS);
    assert_eq!(to_string_custom(&bytes, r7rs).unwrap(), "#u8(1 2)");
}

#[test]
fn test_quote_abbreviation() {
    let abbreviate = || Options::default().with_quote_abbreviation(true);
    for (text, expected) in &[
        ("'x", "'x"),
        ("`(a ,b ,@c)", "`(a ,b ,@c)"),
        ("#'(f #`g #,h #,@i)", "#'(f #`g #,h #,@i)"),
        ("(quote)", "(quote)"),
        ("(quote a b)", "(quote a b)"),
        ("(quote . a)", "(quote . a)"),
        ("(a quote b)", "(a quote b)"),
    ] {
        let value = parse::from_str_custom(text, parse::Options::default()).unwrap();
        assert_eq!(to_string_custom(&value, abbreviate()).unwrap(), *expected);
    }
    let value = parse::from_str("'x").unwrap();
    assert_eq!(to_string(&value).unwrap(), "(quote x)");
}

#[test]
fn test_datum_atoms_and_trees() {
    assert_eq!(print_datum("  (a #(b \"c\") . #u8(1))"), "(a #(b \"c\") . #u8(1))");
    assert_eq!(print_datum("#\\x41"), "#\\A");
    assert_eq!(print_datum("|two words|"), "|two words|");
}

#[test]
fn test_datum_cycles() {
    assert_eq!(print_datum("#0=(1 . #0#)"), "#0=(1 . #0#)");
    assert_eq!(print_datum("#3=(a b c . #3#)"), "#0=(a b c . #0#)");
    assert_eq!(print_datum("#1=#(x #1#)"), "#0=#(x #0#)");
    assert_eq!(print_datum("#0=(#0#)"), "#0=(#0#)");
    assert_eq!(print_datum("(x . #0=(y . #0#))"), "(x . #0=(y . #0#))");
    assert_eq!(
        print_datum("(#0=(a . #0#) #1=(b . #1#))"),
        "(#0=(a . #0#) #1=(b . #1#))"
    );
}

#[test]
fn test_datum_shared_labels() {
    let shared = || Options::default().with_shared_labels(true);
    let datum = datum::from_str("(#0=(x) #0# #1=#(y) #1#)").unwrap();
    assert_eq!(datum_to_string(&datum).unwrap(), "((x) (x) #(y) #(y))");
    assert_eq!(
        datum_to_string_custom(&datum, shared()).unwrap(),
        "(#0=(x) #0# #1=#(y) #1#)"
    );

    // Atoms are never labelled.
    let datum = datum::from_str("(#0=a #0#)").unwrap();
    assert_eq!(datum_to_string_custom(&datum, shared()).unwrap(), "(a a)");
}

#[test]
fn test_datum_abbreviation_and_cycles() {
    let abbreviate = || Options::default().with_quote_abbreviation(true);
    let datum = datum::from_str("'#0=(a . #0#)").unwrap();
    assert_eq!(
        datum_to_string_custom(&datum, abbreviate()).unwrap(),
        "'#0=(a . #0#)"
    );
    let datum = datum::from_str("#0=(quote #0#)").unwrap();
    assert_eq!(datum_to_string_custom(&datum, abbreviate()).unwrap(), "#0='#0#");
}

#[test]
fn test_datum_printing_reads_back() {
    for text in &[
        "#0=(1 2 . #0#)",
        "#0=#(a #1=(b . #1#) #0#)",
        "(a . #0=(b #0#))",
    ] {
        let datum = datum::from_str(text).unwrap();
        let printed = datum_to_string(&datum).unwrap();
        let reread = datum::from_str(&printed).unwrap();
        assert_eq!(datum, reread, "{} printed as {}", text, printed);
    }
}

#[test]
fn test_printer_into_inner() {
    let mut printer = Printer::new(Vec::new());
    printer.print(&Value::symbol("a")).unwrap();
    io::Write::write_all(&mut printer, b" ").unwrap();
    printer.print(&Value::from(1)).unwrap();
    assert_eq!(printer.into_inner(), b"a 1");
}

use lips_reader::{parse, print, Number, Value};

fn check_roundtrip_default(input: Value, printed: &str) {
    let string = lips_reader::to_string(&input).expect("printing failed");
    assert_eq!(&string, printed);
    let output = lips_reader::from_str(&string).expect("parsing failed");
    assert_eq!(input, output);
}

fn check_roundtrip_custom(input: Value, printed: &str) {
    let options = print::Options::default()
        .with_quote_abbreviation(true)
        .with_bytes_style(print::BytesStyle::R6RS);
    let string = lips_reader::to_string_custom(&input, options).expect("printing failed");
    assert_eq!(&string, printed);
    let output =
        lips_reader::from_str_custom(&string, parse::Options::default()).expect("parsing failed");
    assert_eq!(input, output);
}

#[test]
fn test_number() {
    check_roundtrip_default(Value::from(1.5), "1.5");
    check_roundtrip_default(Value::from(-1.0015065576612683), "-1.0015065576612683");
    check_roundtrip_default(Value::from(-1.360438755021694e308), "-1.360438755021694e308");
    check_roundtrip_default(Value::from(f64::INFINITY), "+inf.0");
    check_roundtrip_default(Value::from(f64::NEG_INFINITY), "-inf.0");
    check_roundtrip_default(Value::from(2.0), "2.0");
}

#[test]
fn test_exact_numbers() {
    check_roundtrip_default(Value::from(u64::MAX), "18446744073709551615");
    check_roundtrip_default(Value::from(i64::MIN), "-9223372036854775808");
    check_roundtrip_default(Value::from(Number::rational(-6, 4).unwrap()), "-3/2");
    let z = Number::rectangular(Number::from(3), Number::from(-4)).unwrap();
    check_roundtrip_default(Value::from(z), "3-4i");
    let z = Number::rectangular(Number::from(0), Number::from(1)).unwrap();
    check_roundtrip_default(Value::from(z), "+1i");
    let z = Number::rectangular(Number::from(0.5), Number::from(-2.0)).unwrap();
    check_roundtrip_default(Value::from(z), "0.5-2.0i");
}

#[test]
fn test_number_literals_normalize() {
    for (text, printed) in &[
        ("#x-ff", "-255"),
        ("#b101/11", "5/3"),
        ("#e1.25", "5/4"),
        ("#i3/4", "0.75"),
        ("6/4", "3/2"),
        ("1e2", "100.0"),
        ("+i", "+1i"),
        ("1@0", "1"),
        ("#o777", "511"),
    ] {
        let value = lips_reader::from_str(text).expect("parsing failed");
        assert_eq!(lips_reader::to_string(&value).unwrap(), *printed, "{}", text);
    }
}

#[test]
fn test_symbol() {
    check_roundtrip_default(Value::symbol("$?:!"), "$?:!");
    check_roundtrip_default(Value::symbol("hello world"), "|hello world|");
    check_roundtrip_default(Value::symbol("1+"), "|1+|");
    check_roundtrip_default(Value::symbol("a|b"), r"|a\|b|");
}

static SPECIAL_INITIALS: &str = "!$%&*/:<=>?^_~";

#[test]
fn test_special_symbols() {
    for initial in SPECIAL_INITIALS.chars() {
        let s = initial.to_string();
        check_roundtrip_default(Value::symbol(s.as_str()), &s);
    }
}

#[test]
fn test_peculiar_symbols() {
    for &peculiar in &["+", "+foo", "-", "-foo", "..", ".foo", "...", "->", "+.a"] {
        check_roundtrip_default(Value::symbol(peculiar), peculiar);
    }
}

#[test]
fn test_improper_lists() {
    check_roundtrip_default(
        Value::list(vec![Value::list(vec![Value::cons(
            Value::Null,
            Value::symbol("$?:!"),
        )])]),
        "((() . $?:!))",
    );
    check_roundtrip_default(
        Value::cons(
            Value::cons(
                Value::cons(
                    Value::cons(Value::cons(42, Value::symbol("a-symbol")), Value::symbol("$?:!")),
                    "",
                ),
                false,
            ),
            Value::Null,
        ),
        r#"(((((42 . a-symbol) . $?:!) . "") . #f))"#,
    );
}

#[test]
fn test_unicode_chars() {
    for c in ['ﬁ', 'ā', 'ł', 'ﬂ', 'λ'] {
        check_roundtrip_default(Value::Char(c), &format!("#\\{}", c));
        let hex = format!("#\\x{:x}", u32::from(c));
        assert_eq!(lips_reader::from_str(&hex).unwrap(), Value::Char(c));
    }
}

#[test]
fn test_named_chars() {
    for (c, printed) in [
        (' ', r"#\space"),
        ('\n', r"#\newline"),
        ('\t', r"#\tab"),
        ('\u{7}', r"#\alarm"),
        ('\u{2028}', r"#\x2028"),
    ] {
        check_roundtrip_default(Value::Char(c), printed);
    }
}

#[test]
fn test_strings() {
    check_roundtrip_default(Value::string("\x01\x02\x03\x7F"), r#""\x01;\x02;\x03;\x7F;""#);
    check_roundtrip_default(Value::string("tab\tand \"quote\""), r#""tab\tand \"quote\"""#);
}

#[test]
fn test_vectors() {
    check_roundtrip_default(Value::vector(Vec::<Value>::new()), "#()");
    check_roundtrip_default(Value::vector(vec![1, 2, 3, 4]), "#(1 2 3 4)");
}

#[test]
fn test_bytes() {
    check_roundtrip_default(Value::bytes(vec![1u8, 2, 3]), "#u8(1 2 3)");
    check_roundtrip_custom(Value::bytes(vec![1u8, 255, 3]), "#vu8(1 255 3)");
}

#[test]
fn test_quotation_custom() {
    let quoted = |name: &str, value: Value| Value::list(vec![Value::symbol(name), value]);
    check_roundtrip_custom(quoted("quote", Value::symbol("x")), "'x");
    check_roundtrip_custom(
        quoted(
            "quasiquote",
            Value::list(vec![
                Value::symbol("a"),
                quoted("unquote", Value::symbol("b")),
                quoted("unquote-splicing", Value::symbol("c")),
            ]),
        ),
        "`(a ,b ,@c)",
    );
    check_roundtrip_custom(quoted("syntax", Value::symbol("s")), "#'s");
    check_roundtrip_default(quoted("quote", Value::symbol("x")), "(quote x)");
}

#[test]
fn test_eof_object() {
    check_roundtrip_default(Value::Eof, "#!eof");
    check_roundtrip_default(Value::list(vec![Value::Eof, Value::Null]), "(#!eof ())");
}

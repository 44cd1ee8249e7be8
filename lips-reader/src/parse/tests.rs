use super::*;
use crate::{Number, Value};

use std::io::{self, Cursor};

#[test]
fn test_atoms_default() {
    let mut parser =
        Parser::from_str(r#"foo-symbol #t #f #true #false 100 -42 4.5 #\a "s" |a b| #!eof"#);
    for value in vec![
        Value::symbol("foo-symbol"),
        Value::from(true),
        Value::from(false),
        Value::from(true),
        Value::from(false),
        Value::from(100),
        Value::from(-42),
        Value::from(4.5),
        Value::Char('a'),
        Value::string("s"),
        Value::symbol("a b"),
        Value::Eof,
    ] {
        assert_eq!(parser.parse_value().unwrap(), value);
    }
    parser.end().unwrap();
}

#[test]
fn test_atom_failures() {
    for input in &["#q", "#tru", "#!fold", "#\\foo"] {
        let e = from_str(input).unwrap_err();
        assert!(e.is_lexical(), "{:?} gave {:?}", input, e);
    }
    assert!(from_str("1abc").unwrap_err().is_number());
    assert!(from_str("1/0").unwrap_err().is_number());
}

#[test]
fn test_peculiar_identifiers() {
    for name in &["+", "-", "...", "->x", "+a", ".foo"] {
        assert_eq!(from_str(name).unwrap(), Value::symbol(*name));
    }
    assert_eq!(from_str("+5").unwrap(), Value::from(5));
    assert_eq!(from_str("-inf.0").unwrap(), Value::from(f64::NEG_INFINITY));
    assert!(from_str("+i").unwrap().as_number().unwrap().is_complex());
}

#[test]
fn test_numbers() {
    assert_eq!(from_str("#x1A").unwrap(), Value::from(26));
    assert_eq!(
        from_str("#e1.5").unwrap(),
        Value::from(Number::rational(3, 2).unwrap())
    );
    assert!(from_str("1e10").unwrap().as_number().unwrap().is_inexact());
    assert_eq!(from_str("6/9").unwrap(), from_str("2/3").unwrap());
    assert_eq!(
        from_str("123456789012345678901234567890").unwrap().to_string(),
        "123456789012345678901234567890"
    );
}

#[test]
fn test_chars_default() {
    for &c in &['x', 'y', 'z', '\u{203D}', ' ', '(', ')'] {
        assert_eq!(from_str(&format!("#\\{}", c)).unwrap(), Value::Char(c));
    }
    for &(name, code) in &[
        ("nul", 0x00),
        ("null", 0x00),
        ("alarm", 0x07),
        ("backspace", 0x08),
        ("tab", 0x09),
        ("linefeed", 0x0A),
        ("newline", 0x0A),
        ("vtab", 0x0B),
        ("page", 0x0C),
        ("return", 0x0D),
        ("esc", 0x1B),
        ("escape", 0x1B),
        ("altmode", 0x1B),
        ("space", 0x20),
        ("delete", 0x7F),
        ("rubout", 0x7F),
    ] {
        assert_eq!(
            from_str(&format!("#\\{}", name)).unwrap(),
            Value::Char(char::from(code))
        );
    }
    assert_eq!(from_str("#\\x41").unwrap(), Value::Char('A'));
    assert_eq!(from_str("#\\x3bb").unwrap(), Value::Char('λ'));
    assert!(from_str("#\\xD800").is_err());
    assert!(from_str("#\\SPACE").is_err());
    assert_eq!(from_str("#!fold-case #\\SPACE").unwrap(), Value::Char(' '));
    assert!(from_str("#\\").unwrap_err().is_incomplete());
}

// This is generic over the parser to allow testing both the string-based
// and I/O-based entry points.
fn check_strings_default<F>(parse: F)
where
    F: Fn(&str) -> Result<Value>,
{
    assert_eq!(
        parse(r#""A plain string""#).unwrap(),
        Value::string("A plain string")
    );
    assert_eq!(
        parse(r#""\a\b\t\n\r\"\\\|""#).unwrap(),
        Value::string("\x07\x08\t\n\r\"\\|")
    );
    // Examples taken from R6RS 4.2.4
    assert_eq!(parse(r#""\x41;bc""#).unwrap(), Value::string("Abc"));
    assert_eq!(parse(r#""\x41; bc""#).unwrap(), Value::string("A bc"));
    assert_eq!(parse(r#""\x41bc;""#).unwrap(), Value::string("\u{41BC}"));
    assert!(parse(r#""\x41""#).is_err());
    assert!(parse(r#""\x;"#).is_err());
    assert!(parse(r#""\x41bx;""#).is_err());
    assert_eq!(parse(r#""\x00000041;""#).unwrap(), Value::string("A"));
    assert_eq!(
        parse(r#""\x0010FFFF;""#).unwrap(),
        Value::string("\u{10FFFF}")
    );
    assert!(parse(r#""\x00110000;""#).is_err());
    assert_eq!(parse(r#""\x000000001;""#).unwrap(), Value::string("\u{01}"));
    assert!(parse(r#""\xD800;""#).is_err());

    // Check that u32 overflow is detected
    assert!(parse(r#""\x100000001;""#).is_err());

    // Line continuations
    assert_eq!(parse("\"a\\\n    b\"").unwrap(), Value::string("ab"));
    assert_eq!(parse("\"a\\  \r\n\tb\"").unwrap(), Value::string("ab"));
    assert!(parse("\"a\\ b\"").is_err());

    // Check that raw control characters are accepted
    let control_chars: String = (0..32).map(char::from).collect();
    assert_eq!(
        parse(&format!("\"{}\"", control_chars)).unwrap(),
        Value::from(control_chars)
    );
}

#[test]
fn test_strings_default() {
    check_strings_default(from_str)
}

#[test]
fn test_strings_io_default() {
    check_strings_default(|input| from_reader(Cursor::new(input.as_bytes())))
}

#[test]
fn test_string_failures() {
    assert!(from_str(r#""\q""#).unwrap_err().is_lexical());
    let e = from_str(r#""unterminated"#).unwrap_err();
    assert!(e.is_incomplete());
}

#[test]
fn test_pipe_symbols() {
    assert_eq!(from_str("|foo bar|").unwrap(), Value::symbol("foo bar"));
    assert_eq!(from_str(r#"|a\|b|"#).unwrap(), Value::symbol("a|b"));
    assert_eq!(from_str(r#"|\x41;|"#).unwrap(), Value::symbol("A"));
    assert_eq!(from_str("||").unwrap(), Value::symbol(""));
    assert!(from_str("|open").unwrap_err().is_incomplete());
}

#[test]
fn test_lists_default() {
    assert_eq!(from_str("()").unwrap(), Value::Null);
    assert_eq!(
        from_str("(hello)").unwrap(),
        Value::list(vec![Value::symbol("hello")])
    );
    assert_eq!(
        from_str("(1 . (2 . (3 . ())))").unwrap(),
        Value::list(vec![1u32, 2, 3])
    );
    assert_eq!(
        from_str("(1 . 2)").unwrap(),
        Value::append(vec![Value::from(1)], Value::from(2))
    );
    assert_eq!(
        from_str("(1 2 . 3)").unwrap(),
        Value::append(vec![1, 2], 3)
    );
    assert_eq!(
        from_str("[1 (2 [3])]").unwrap(),
        Value::list(vec![
            Value::from(1),
            Value::list(vec![Value::from(2), Value::list(vec![3])])
        ])
    );
}

#[test]
fn test_broken_lists_default() {
    let cases = [
        ("(.)", Expected::Datum),
        ("(1 2 .)", Expected::Datum),
        ("(1 2 . 3 4)", Expected::Close(')')),
        ("(1 2 . 3 . 4)", Expected::Close(')')),
        ("(1 2]", Expected::Close(')')),
        ("[1 2)", Expected::Close(']')),
    ];
    for &(input, _) in &cases {
        assert!(from_str(input).unwrap_err().is_syntax(), "{}", input);
    }
    for &(input, expected) in &cases[1..] {
        assert_eq!(from_str(input).unwrap_err().expected(), Some(expected), "{}", input);
    }
    assert!(from_str(")").unwrap_err().is_syntax());
    assert!(from_str(".").unwrap_err().is_syntax());
}

#[test]
fn test_incomplete_input() {
    for input in &["(1 2", "(1 2 .", "(1 2 . 3", "#(1", "#u8(1", "'", "#;", "#0=", "#"] {
        let e = from_str(input).unwrap_err();
        assert!(e.is_incomplete(), "{:?} gave {:?}", input, e);
        assert_eq!(e.classify(), Category::Eof);
    }
    let e = io::Error::from(from_str("(1").unwrap_err());
    assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);
    let e = io::Error::from(from_str(")").unwrap_err());
    assert_eq!(e.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_brackets_as_vector() {
    let options = Options::default().with_brackets(Brackets::Vector);
    assert_eq!(
        from_str_custom("[1 (2)]", options.clone()).unwrap(),
        Value::vector(vec![Value::from(1), Value::list(vec![2])])
    );
    assert!(from_str_custom("[1 . 2]", options).unwrap_err().is_syntax());
}

#[test]
fn test_vectors() {
    assert_eq!(
        from_str(r#"#(1 #(2) "x")"#).unwrap(),
        Value::vector(vec![
            Value::from(1),
            Value::vector(vec![2]),
            Value::string("x")
        ])
    );
    assert_eq!(from_str("#()").unwrap(), Value::vector(Vec::<Value>::new()));
    assert!(from_str("#(1 . 2)").unwrap_err().is_syntax());
}

#[test]
fn test_byte_vectors() {
    assert_eq!(
        from_str("#u8(1 2 3)").unwrap(),
        Value::bytes(vec![1u8, 2, 3])
    );
    assert_eq!(from_str("#vu8(0 255)").unwrap(), Value::bytes(vec![0u8, 255]));
    assert_eq!(from_str("#u8()").unwrap(), Value::bytes(Vec::<u8>::new()));
    for input in &["#u8(0 256 3)", "#u8(0.0 1 2)", "#u8(test 1 2)", "#u8(-1)", "#u8((1))"] {
        let e = from_str(input).unwrap_err();
        assert_eq!(e.expected(), Some(Expected::Octet), "{}", input);
    }
}

#[test]
fn test_quotation() {
    let quoted = |symbol: &str, value: Value| Value::list(vec![Value::symbol(symbol), value]);
    assert_eq!(from_str("'a").unwrap(), quoted("quote", Value::symbol("a")));
    assert_eq!(
        from_str("`(a ,b ,@c)").unwrap(),
        quoted(
            "quasiquote",
            Value::list(vec![
                Value::symbol("a"),
                quoted("unquote", Value::symbol("b")),
                quoted("unquote-splicing", Value::symbol("c")),
            ])
        )
    );
    assert_eq!(from_str("#'x").unwrap(), quoted("syntax", Value::symbol("x")));
    assert_eq!(
        from_str("#,@x").unwrap(),
        quoted("unsyntax-splicing", Value::symbol("x"))
    );
    assert!(from_str_custom("#'x", Options::new()).unwrap_err().is_lexical());
    assert_eq!(
        from_str("''()").unwrap(),
        quoted("quote", quoted("quote", Value::Null))
    );
}

#[test]
fn test_comments() {
    assert_eq!(from_str("#| a #| b |# c |# 5").unwrap(), Value::from(5));
    assert_eq!(from_str("; line\n42 ; trailing").unwrap(), Value::from(42));
    assert_eq!(from_str("(1 #;2 3)").unwrap(), Value::list(vec![1, 3]));
    assert_eq!(from_str("#;(a b) c").unwrap(), Value::symbol("c"));
    assert_eq!(from_str("(1 #;#;2 3 4)").unwrap(), Value::list(vec![1, 4]));
    assert_eq!(from_str("1 #;2").unwrap(), Value::from(1));
    assert!(from_str("(a #;)").unwrap_err().is_syntax());
    assert!(from_str("#| open #| nested |#").unwrap_err().is_incomplete());
    assert!(read_all("#| only a comment |#").unwrap().is_empty());
}

#[test]
fn test_fold_case() {
    assert_eq!(
        from_str("#!fold-case (FOO #!no-fold-case Bar |Baz|)").unwrap(),
        Value::list(vec![
            Value::symbol("foo"),
            Value::symbol("Bar"),
            Value::symbol("Baz")
        ])
    );
    let options = Options::default().with_fold_case(true);
    assert_eq!(from_str_custom("ABC", options.clone()).unwrap(), Value::symbol("abc"));
    assert_eq!(from_str_custom("#\\NEWLINE", options).unwrap(), Value::Char('\n'));
}

#[test]
fn test_datum_labels() {
    let datum = crate::datum::from_str("#1=(1 . #1#)").unwrap();
    assert!(datum.cdr().unwrap().ptr_eq(&datum));
    assert_eq!(datum.car().unwrap().as_number().unwrap().as_i64(), Some(1));
    assert_eq!(datum.to_value(), None);
    assert!(from_str("#1=(1 . #1#)").unwrap_err().is_syntax());

    let shared = crate::datum::from_str("(#0=(a) #0#)").unwrap();
    let mut items = shared.list_iter().unwrap();
    let first = items.next().unwrap();
    let second = items.next().unwrap();
    assert!(first.ptr_eq(&second));
    assert_eq!(
        from_str("(#0=(a) #0#)").unwrap(),
        Value::list(vec![Value::list(vec![Value::symbol("a")]); 2])
    );

    let vector = crate::datum::from_str("#0=#(1 #0#)").unwrap();
    let element = vector.vector_iter().unwrap().nth(1).unwrap();
    assert!(element.ptr_eq(&vector));
}

#[test]
fn test_label_errors() {
    let e = from_str("#0#").unwrap_err();
    assert!(e.is_syntax());
    assert_eq!(e.to_string(), "undefined datum label #0# at line 1 column 1");
    assert!(from_str("(#0=a #0=b)").unwrap_err().is_syntax());
    assert!(from_str("#0=#0#").unwrap_err().is_syntax());
    assert!(from_str("#0=#1=#0#").unwrap_err().is_syntax());
    assert!(from_str("#0x").unwrap_err().is_lexical());
}

#[test]
fn test_label_scope() {
    let mut parser = Parser::from_str("#0=(a) #0#");
    parser.parse().unwrap();
    assert!(parser.parse().unwrap_err().is_syntax());

    let options = Options::default().with_label_scope(LabelScope::Session);
    let mut parser = Parser::from_str_custom("#0=(a) #0# #0=b #0#", options);
    let first = parser.expect_datum().unwrap();
    let second = parser.expect_datum().unwrap();
    assert!(second.ptr_eq(&first));
    assert_eq!(second.span().start(), Position::new(1, 8, 7));
    parser.expect_datum().unwrap();
    let shadowed = parser.expect_datum().unwrap();
    assert_eq!(shadowed.as_symbol(), Some("b"));
    assert!(parser.parse().unwrap().is_none());
}

#[test]
fn test_cyclic_equality() {
    let one = crate::datum::from_str("#0=(1 . #0#)").unwrap();
    let two = crate::datum::from_str("#0=(1 1 . #0#)").unwrap();
    let other = crate::datum::from_str("#0=(1 2 . #0#)").unwrap();
    assert_eq!(one, two);
    assert_ne!(one, other);
}

#[test]
fn test_spans() {
    let datum = crate::datum::from_str("  (a\n b)").unwrap();
    assert_eq!(datum.span().start(), Position::new(1, 3, 2));
    assert_eq!(datum.span().end(), Position::new(2, 4, 8));
    let a = datum.car().unwrap();
    assert_eq!(a.span().start(), Position::new(1, 4, 3));
    assert_eq!(a.span().end(), Position::new(1, 5, 4));
    let rest = datum.cdr().unwrap();
    assert_eq!(rest.span().start(), Position::new(2, 2, 6));

    let quoted = crate::datum::from_str("'foo").unwrap();
    assert_eq!(quoted.span().end().offset(), 4);
    assert_eq!(quoted.car().unwrap().span().end().offset(), 1);

    let labelled = crate::datum::from_str("#0=(x)").unwrap();
    assert_eq!(labelled.span().start().offset(), 0);
    assert_eq!(labelled.span().end().offset(), 6);
}

#[test]
fn test_error_positions() {
    let e = from_str("(1 2\n  . )").unwrap_err();
    assert_eq!(e.position(), Some(Position::new(2, 5, 9)));
    assert_eq!(e.to_string(), "missing datum after dot at line 2 column 5");
    let e = from_str("1 2").unwrap_err();
    assert_eq!(e.expected(), Some(Expected::EndOfInput));
    assert_eq!(e.position(), Some(Position::new(1, 3, 2)));
}

#[test]
fn test_recursion_limit() {
    let options = Options::default().with_max_depth(2);
    assert!(from_str_custom("((a))", options.clone()).is_ok());
    assert!(from_str_custom("(((a)))", options.clone()).unwrap_err().is_syntax());
    assert!(from_str_custom("''a", options.clone()).is_ok());
    assert!(from_str_custom("'''a", options.clone()).is_err());

    let deep = format!("{}{}", "(".repeat(200), ")".repeat(200));
    assert!(from_str(&deep).unwrap_err().is_syntax());

    // Datum comments and labels nest as well.
    assert!(from_str_custom("#;#;a b c", options.clone()).is_ok());
    assert!(from_str_custom("#;#;#;a b c d", options.clone()).unwrap_err().is_syntax());
    assert!(from_str_custom("#0=#1=x", options.clone()).is_ok());
    assert!(from_str_custom("#0=#1=#2=x", options).unwrap_err().is_syntax());

    let comments = format!("{}{}", "#;".repeat(200), "a ".repeat(201));
    let err = read_all(&comments).unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.position().map(|p| p.line()), Some(1));
    let labels: String = (0..200).map(|i| format!("#{}=", i)).collect();
    let err = crate::datum::from_str(&format!("{}x", labels)).unwrap_err();
    assert!(err.is_syntax());
}

#[test]
fn test_iterators() {
    let mut parser = Parser::from_str("(a) b 3");
    let values: Vec<_> = parser.value_iter().collect::<Result<_>>().unwrap();
    assert_eq!(
        values,
        vec![
            Value::list(vec![Value::symbol("a")]),
            Value::symbol("b"),
            Value::from(3)
        ]
    );

    let mut parser = Parser::from_str("a ) b");
    let results: Vec<_> = parser.datum_iter().collect();
    assert_eq!(results.len(), 2);
    assert!(results[1].is_err());
}

#[test]
fn test_io_errors() {
    let e = from_reader(Cursor::new(vec![b'"', 0xff, b'"'])).unwrap_err();
    assert!(e.is_io());
    assert_eq!(e.position(), None);
}

#[test]
fn test_lexer_tokens() {
    let tokens: Vec<_> = Lexer::new("'(a . \"s\") #u8(")
        .collect::<Result<_>>()
        .unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind().clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Quote("quote".into()),
            TokenKind::Open(Bracket::Paren),
            TokenKind::Symbol("a".into()),
            TokenKind::Dot,
            TokenKind::String("s".into()),
            TokenKind::Close(Bracket::Paren),
            TokenKind::OpenBytevector,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[4].text(), "\"s\"");
    assert_eq!(tokens[6].span().start(), Position::new(1, 12, 11));
    assert_eq!(tokens[6].span().end(), Position::new(1, 16, 15));
}

#[test]
fn test_lexer_labels_and_comments() {
    let kinds: Vec<_> = Lexer::new("#12= #12# #; #| x |# ; y\n")
        .map(|t| t.unwrap().into_kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LabelDef(12),
            TokenKind::LabelRef(12),
            TokenKind::DatumComment,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_feed_incomplete() {
    let mut feed = Feed::new();
    feed.push_str("(1 2");
    assert_eq!(feed.next_datum().unwrap(), ReadStatus::Incomplete);
    feed.push_str(" 3)\n'x");
    match feed.next_datum().unwrap() {
        ReadStatus::Datum(datum) => assert_eq!(datum, Value::list(vec![1, 2, 3])),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(feed.next_datum().unwrap(), ReadStatus::Incomplete);
    feed.push_str("\n");
    match feed.next_datum().unwrap() {
        ReadStatus::Datum(datum) => {
            assert_eq!(datum.span().start(), Position::new(2, 1, 8));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(feed.next_datum().unwrap(), ReadStatus::Exhausted);
    assert_eq!(feed.pending(), "");
}

#[test]
fn test_feed_errors() {
    let mut feed = Feed::new();
    feed.push_str(") 1");
    assert!(feed.next_datum().unwrap_err().is_syntax());
    assert_eq!(feed.pending(), ") 1");
    feed.clear();
    assert_eq!(feed.position(), Position::new(1, 4, 3));
    feed.push_str("2 ");
    match feed.next_datum().unwrap() {
        ReadStatus::Datum(datum) => assert_eq!(datum.span().start(), Position::new(1, 4, 3)),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_feed_trailing_atom() {
    let options = Options::default().with_label_scope(LabelScope::Session);
    let mut feed = Feed::with_options(options);
    feed.push_str("#0=abc");
    assert_eq!(feed.next_datum().unwrap(), ReadStatus::Incomplete);
    assert_eq!(feed.pending(), "#0=abc");
    feed.push_str("def\n#0#");
    let first = match feed.next_datum().unwrap() {
        ReadStatus::Datum(datum) => datum,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(first.as_symbol(), Some("abcdef"));
    assert_eq!(feed.next_datum().unwrap(), ReadStatus::Incomplete);
    feed.push_str(" 12");
    match feed.next_datum().unwrap() {
        ReadStatus::Datum(datum) => assert!(datum.ptr_eq(&first)),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(feed.next_datum().unwrap(), ReadStatus::Incomplete);
    feed.push_str("3\n");
    match feed.next_datum().unwrap() {
        ReadStatus::Datum(datum) => assert_eq!(datum, Value::from(123)),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(feed.next_datum().unwrap(), ReadStatus::Exhausted);
}

#[test]
fn test_feed_session() {
    let options = Options::default().with_label_scope(LabelScope::Session);
    let mut feed = Feed::with_options(options);
    feed.push_str("#!fold-case #0=(X)\n");
    let first = match feed.next_datum().unwrap() {
        ReadStatus::Datum(datum) => datum,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(first.car().unwrap().as_symbol(), Some("x"));
    feed.push_str("(#0# Y)\n");
    match feed.next_datum().unwrap() {
        ReadStatus::Datum(datum) => {
            assert!(datum.car().unwrap().ptr_eq(&first));
            assert_eq!(datum.cdr().unwrap().car().unwrap().as_symbol(), Some("y"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

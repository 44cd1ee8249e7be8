use lips_reader::parse::{Feed, LabelScope, Options, Parser, ReadStatus};
use lips_reader::{datum, print, Datum, DatumKind, Value};

fn read(text: &str) -> Datum {
    datum::from_str(text).expect("parsing failed")
}

#[test]
fn cyclic_list_shares_nodes() {
    let datum = read("#0=(a b c . #0#)");
    let mut cursor = datum.clone();
    for name in ["a", "b", "c", "a", "b"] {
        let (car, cdr) = cursor.as_pair().unwrap();
        assert_eq!(car.as_symbol(), Some(name));
        cursor = cdr;
    }
    let third = datum.cdr().unwrap().cdr().unwrap();
    assert!(third.cdr().unwrap().ptr_eq(&datum));
    assert_eq!(datum.to_value(), None);
}

#[test]
fn shared_structure_is_not_copied() {
    let datum = read("(#1=(x y) #1# #1#)");
    let elements: Vec<Datum> = datum.list_iter().unwrap().collect();
    assert_eq!(elements.len(), 3);
    assert!(elements[0].ptr_eq(&elements[1]));
    assert!(elements[1].ptr_eq(&elements[2]));

    // Without cycles, the datum converts to a tree with copies.
    let value = datum.to_value().unwrap();
    let shared = Value::list(vec![Value::symbol("x"), Value::symbol("y")]);
    assert_eq!(value, Value::list(vec![shared.clone(), shared.clone(), shared]));
}

#[test]
fn cyclic_vector() {
    let datum = read("#5=#(1 #5# \"s\")");
    assert_eq!(datum.kind(), DatumKind::Vector);
    assert_eq!(datum.vector_len(), Some(3));
    let middle = datum.vector_iter().unwrap().nth(1).unwrap();
    assert!(middle.ptr_eq(&datum));
}

#[test]
fn label_spans() {
    let datum = read("(#0=(a) #0#)");
    let elements: Vec<Datum> = datum.list_iter().unwrap().collect();
    // The definition covers the prefix and the datum.
    assert_eq!(elements[0].span().start().column(), 2);
    assert_eq!(elements[0].span().end().column(), 8);
    // A reference reports its own location.
    assert_eq!(elements[1].span().start().column(), 9);
    assert_eq!(elements[1].span().end().column(), 12);
}

#[test]
fn structural_equality_of_cycles() {
    assert_eq!(read("#0=(1 . #0#)"), read("#0=(1 1 . #0#)"));
    assert_eq!(read("#0=(1 . #0#)"), read("(1 . #0=(1 . #0#))"));
    assert_ne!(read("#0=(1 . #0#)"), read("#0=(1 2 . #0#)"));
    assert_ne!(read("#0=(1 . #0#)"), read("(1 1 1)"));
}

#[test]
fn label_errors() {
    for text in ["#0=#0#", "(#0=a #0=b)", "#1#", "(#0=a . #1#)"] {
        let err = datum::from_str(text).unwrap_err();
        assert!(err.is_syntax(), "{}: {}", text, err);
    }
    // A cyclic datum has no tree representation.
    let err = lips_reader::from_str("#0=(1 . #0#)").unwrap_err();
    assert!(err.is_syntax());
}

#[test]
fn form_scope_forgets_labels() {
    let mut parser = Parser::from_str("#0=(a) #0#");
    assert!(parser.parse().unwrap().is_some());
    let err = parser.parse().unwrap_err();
    assert!(err.is_syntax());
}

#[test]
fn session_scope_links_forms() {
    let options = Options::default().with_label_scope(LabelScope::Session);
    let data = lips_reader::read_all_custom("#0=(a) (b #0#) #0=c #0#", options).unwrap();
    assert_eq!(data.len(), 4);
    let second = data[1].list_iter().unwrap().nth(1).unwrap();
    assert!(second.ptr_eq(&data[0]));
    // Redefinition in a later form shadows the earlier one.
    assert_eq!(data[3].as_symbol(), Some("c"));
}

#[test]
fn session_scope_in_feed() {
    let options = Options::default().with_label_scope(LabelScope::Session);
    let mut feed = Feed::with_options(options);
    feed.push_str("#7=(x . #7#)\n");
    let first = match feed.next_datum().unwrap() {
        ReadStatus::Datum(datum) => datum,
        other => panic!("unexpected {:?}", other),
    };
    feed.push_str("(#7#");
    assert_eq!(feed.next_datum().unwrap(), ReadStatus::Incomplete);
    feed.push_str(")");
    let second = match feed.next_datum().unwrap() {
        ReadStatus::Datum(datum) => datum,
        other => panic!("unexpected {:?}", other),
    };
    assert!(second.car().unwrap().ptr_eq(&first));
    assert_eq!(second.span().start().line(), 2);
}

#[test]
fn printing_cycles_reads_back() {
    for text in [
        "#0=(a . #0#)",
        "#0=(#0# . #0#)",
        "(1 #0=#(2 #0#) . #0#)",
        "#0=(a #1=(b . #1#) . #0#)",
    ] {
        let datum = read(text);
        for options in [
            print::Options::default(),
            print::Options::default().with_shared_labels(true),
        ] {
            let printed = print::datum_to_string_custom(&datum, options).unwrap();
            assert_eq!(read(&printed), datum, "{} printed as {}", text, printed);
        }
    }
}

#![deny(missing_docs)]

//! This crate provides the reader of LIPS Scheme: the part of a Scheme
//! implementation that turns source text into data. It covers R7RS
//! syntax, with the R6RS extensions LIPS accepts.
//!
//! ```scheme
//! (define (fact n)          ; line comments
//!   #| block comments, #| nested |# |#
//!   (if (< n 2) 1 (* n (fact (- n 1)))))
//! '(1/3 -0.5e10 #x-FF #e1.5 3+4i 1@0) ; the whole numeric tower
//! #0=(a b . #0#)                      ; cyclic data
//! ```
//!
//! Text is read in three layers, each usable on its own:
//!
//! - **The lexer** ([`parse::Lexer`]) splits text into tokens, each carrying
//!   its span. Number tokens are decoded by the numeric literal parser,
//!   [`number::parse_number`], which is also available standalone.
//!
//! - **The reader** ([`Parser`]) builds data from tokens: lists, dotted
//!   pairs, vectors, bytevectors, quote-like abbreviations and datum labels.
//!
//! - **Drivers** read one datum ([`from_str`]), all data of a program
//!   ([`parse::read_all`]), or data as it arrives ([`parse::Feed`]).
//!
//! # Two representations
//!
//! Data read with datum labels may share structure, or be cyclic. Such data
//! is represented by [`Datum`], a cheap handle into the nodes of one
//! top-level datum, which also carries the [`Span`] of text each node was
//! read from.
//!
//! ```
//! use lips_reader::datum;
//!
//! let datum = datum::from_str("#0=(1 . #0#)").unwrap();
//! let tail = datum.cdr().unwrap();
//! assert!(tail.ptr_eq(&datum));
//! assert_eq!(datum.to_string(), "#0=(1 . #0#)");
//! ```
//!
//! Most consumers are better served by [`Value`], an owned tree which can be
//! pattern-matched directly. The top-level functions of this crate return
//! values, failing on cyclic input:
//!
//! ```
//! use lips_reader::{Value, parse::Error};
//!
//! fn example() -> Result<(), Error> {
//!     let value = lips_reader::from_str("(define x '#(1 \"two\" #\\3))")?;
//!     let elements = value.to_ref_vec().unwrap();
//!     assert_eq!(elements[0], &Value::symbol("define"));
//!     assert_eq!(value.to_string(), "(define x (quote #(1 \"two\" #\\3)))");
//!     Ok(())
//! }
//! #
//! # fn main() {
//! #     example().unwrap();
//! # }
//! ```
//!
//! # Errors
//!
//! Every failure is a [`parse::Error`] with the position it occurred at.
//! Errors are classified into lexical, numeric and syntactic ones, and
//! input that ends in the middle of a datum is reported as incomplete, so
//! an interactive reader can ask for more text instead of failing:
//!
//! ```
//! let err = lips_reader::from_str("(let ((x 1))").unwrap_err();
//! assert!(err.is_incomplete());
//!
//! let err = lips_reader::from_str("#(1 . 2)").unwrap_err();
//! assert!(err.is_syntax());
//! assert_eq!(err.to_string(), "unexpected dot at line 1 column 5");
//! ```

mod syntax;

pub mod cons;
pub mod datum;
pub mod number;
pub mod parse;
pub mod print;
pub mod value;

#[doc(inline)]
pub use self::parse::{
    from_reader, from_reader_custom, from_str, from_str_custom, read_all, read_all_custom,
    Parser, Position,
};

#[doc(inline)]
pub use self::print::{
    to_string, to_string_custom, to_vec, to_vec_custom, to_writer, to_writer_custom, Printer,
};

#[doc(inline)]
pub use self::datum::{Datum, DatumKind, Span};

#[doc(inline)]
pub use value::Value;

#[doc(inline)]
pub use cons::Cons;

#[doc(inline)]
pub use number::{parse_number, Number};

//! # weft
//!
//! Composable parser combinators over `&str`.
//!
//! A [`Parser`] is a pure function from input text to an [`Outcome`]: either a
//! [`ParseState`] holding the parsed value and the unconsumed rest of the
//! input, or a [`Failure`] holding a readable diagnostic. Small parsers such
//! as [`char`] and [`string`] are combined into larger ones by sequencing
//! ([`Parser::and_then`], [`Parser::then`]), ordered alternation
//! ([`Parser::or`], [`choice`]) and repetition ([`Parser::zero_or_more`],
//! [`Parser::separated_by`]).
//!
//! ```
//! use weft::*;
//!
//! // key=value pairs separated by ';'
//! let key = text::word();
//! let value = text::integer();
//! let pair = key.then_ignore(char('=')).then(value);
//! let pairs = pair.separated_by0(char(';'));
//!
//! assert_eq!(
//!     pairs.parse_complete("x=1;y=-2"),
//!     Ok(vec![("x".to_string(), 1), ("y".to_string(), -2)]),
//! );
//! ```
//!
//! Failures never escape as panics and never consume input, so any failure
//! can be recovered from by an enclosing alternative:
//!
//! ```
//! use weft::*;
//!
//! let answer = string("yes").or(string("no"));
//! let failure = answer.parse("maybe").unwrap_err();
//!
//! assert_eq!(failure.message(), "Invalid input: maybe OR Invalid input: maybe");
//! ```

pub mod arena;
pub mod combinator;
pub mod diagnostic;
pub mod parser;
pub mod pattern;
pub mod primitive;
pub mod recursive;
pub mod text;

pub use arena::Arena;
pub use combinator::{
    and, and_then, bracket, filter, for_each, map, one_or_more, one_or_more_separated, or,
    zero_or_more, zero_or_more_separated, zero_or_one,
};
pub use parser::{from_fn, BoxedParser, Failure, Outcome, ParseError, ParseState, Parser};
pub use pattern::{pattern, Pattern};
pub use primitive::{
    char, choice, end, fail, item, satisfy, satisfy_expecting, string, succeed,
};
pub use recursive::{lazy, Recursive, Rooted};

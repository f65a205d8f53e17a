//! Basic definitions for working with parsers.
//!
//! If you only want to run a grammar, [`Parser::parse`] and
//! [`Parser::parse_complete`] are all you need. The rest of this module
//! describes the pieces every parser is built from: the [`Outcome`] of a
//! parse step, the [`ParseState`] it produces, and the [`Failure`] it reports.

use std::{fmt::Debug, marker::PhantomData, rc::Rc};

use miette::Diagnostic;
use thiserror::Error;

use crate::{
    combinator::{
        AndThen, Filter, IgnoreThen, Map, Or, Repeat, SeparatedBy, Then, ThenIgnore, Traced,
        TryMap, ZeroOrOne,
    },
    diagnostic,
};

/// A failed parse step.
///
/// Failures are plain values: they carry a human-readable diagnostic and
/// nothing else. Any failure can be recovered from by an enclosing
/// [`or`](Parser::or), [`zero_or_one`](Parser::zero_or_one) or repetition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
}

impl Failure {
    /// Create a failure with the given diagnostic.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "a failure needs a diagnostic");
        Self { message }
    }

    /// The diagnostic of this failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }

    /// Combine the failures of two alternatives into one.
    pub fn or(self, other: Failure) -> Failure {
        diagnostic::alternatives(&self, &other)
    }
}

/// The result of a parse step: either a success value or a [`Failure`].
pub type Outcome<T> = Result<T, Failure>;

/// The state produced by a successful parse step.
///
/// `remaining` is always a suffix of the input that was handed to the parser
/// that produced this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseState<'a, T> {
    /// The parsed value.
    pub result: T,
    /// The unconsumed rest of the input.
    pub remaining: &'a str,
}

impl<'a, T> ParseState<'a, T> {
    pub fn new(result: T, remaining: &'a str) -> Self {
        Self { result, remaining }
    }

    /// Transform the parsed value, keeping the remaining input.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseState<'a, U> {
        ParseState {
            result: f(self.result),
            remaining: self.remaining,
        }
    }

    pub fn into_parts(self) -> (T, &'a str) {
        (self.result, self.remaining)
    }
}

/// The error returned by [`Parser::parse_complete`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// The parser failed.
    #[error("{0}")]
    #[diagnostic(code(weft::rejected))]
    Rejected(Failure),
    /// The parser succeeded but did not consume the whole input.
    #[error("Unconsumed input at offset {offset}: {}", diagnostic::truncate(.remaining))]
    #[diagnostic(
        code(weft::incomplete),
        help("the grammar matched a prefix of the input; check what follows it")
    )]
    Incomplete {
        /// Byte offset of the first unconsumed character.
        offset: usize,
        /// The unconsumed input.
        remaining: String,
    },
}

impl From<Failure> for ParseError {
    fn from(failure: Failure) -> Self {
        ParseError::Rejected(failure)
    }
}

/// A parser: a pure function from input text to an [`Outcome`] of
/// [`ParseState`].
///
/// # Writing a Parser
///
/// Most parsers are assembled from the primitives in [`crate::primitive`] and
/// the methods of this trait. A parser that is easier to write by hand can be
/// lifted with [`from_fn`]:
///
/// ```
/// # use weft::*;
/// let abc = from_fn(|input: &str| match input.strip_prefix("abc") {
///     Some(rest) => Ok(ParseState::new(3, rest)),
///     None => Err(Failure::new("expected abc")),
/// });
///
/// assert_eq!(abc.parse("abcd"), Ok(ParseState::new(3, "d")));
/// ```
///
/// # Backtracking
///
/// `parse` never mutates anything: a failed attempt leaves no trace, so an
/// alternative can always be retried from the same input.
///
/// ```
/// # use weft::*;
/// let colour = string("yellow").or(string("orange"));
///
/// assert_eq!(colour.parse("orange!").map(ParseState::into_parts), Ok(("orange".to_string(), "!")));
/// assert_eq!(
///     colour.parse("blue").unwrap_err().message(),
///     "Invalid input: blue OR Invalid input: blue",
/// );
/// ```
pub trait Parser {
    /// The type of the parsed value.
    type Output;

    /// Run the parser against `input`.
    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, Self::Output>>;

    /// Run the parser and require it to consume the whole input.
    fn parse_complete(&self, input: &str) -> Result<Self::Output, ParseError> {
        let state = self.parse(input).inspect_err(|failure| {
            tracing::debug!(%failure, "parse rejected");
        })?;
        if state.remaining.is_empty() {
            Ok(state.result)
        } else {
            let offset = input.len() - state.remaining.len();
            tracing::debug!(offset, "parse left input unconsumed");
            Err(ParseError::Incomplete {
                offset,
                remaining: state.remaining.to_owned(),
            })
        }
    }

    /// Transform the parsed value.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map { parser: self, f }
    }

    /// Transform the parsed value with a conversion that may be rejected.
    fn try_map<U, E, F>(self, f: F) -> TryMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Result<U, E>,
    {
        TryMap { parser: self, f }
    }

    /// Choose the next parser from the parsed value and run it on the rest.
    fn and_then<P, F>(self, f: F) -> AndThen<Self, F>
    where
        Self: Sized,
        P: Parser,
        F: Fn(Self::Output) -> P,
    {
        AndThen { parser: self, f }
    }

    /// Run `other` after this parser, keeping both values.
    fn then<P: Parser>(self, other: P) -> Then<Self, P>
    where
        Self: Sized,
    {
        Then {
            parser1: self,
            parser2: other,
        }
    }

    /// Run `other` after this parser, keeping only the value of `other`.
    fn and<P: Parser>(self, other: P) -> IgnoreThen<Self, P>
    where
        Self: Sized,
    {
        IgnoreThen {
            parser1: self,
            parser2: other,
        }
    }

    /// Run `other` after this parser, keeping only the value of this parser.
    fn then_ignore<P: Parser>(self, other: P) -> ThenIgnore<Self, P>
    where
        Self: Sized,
    {
        ThenIgnore {
            parser1: self,
            parser2: other,
        }
    }

    /// Try this parser, and `other` on the same input if this one fails.
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
        P: Parser<Output = Self::Output>,
    {
        Or {
            parser1: self,
            parser2: other,
        }
    }

    /// Reject parsed values that do not satisfy `predicate`.
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> bool,
    {
        Filter {
            parser: self,
            predicate,
            expectation: diagnostic::DEFAULT_EXPECTATION.into(),
        }
    }

    /// Like [`filter`](Parser::filter), naming what was expected in the
    /// diagnostic.
    fn filter_expecting<F>(
        self,
        predicate: F,
        expectation: impl Into<std::borrow::Cow<'static, str>>,
    ) -> Filter<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> bool,
    {
        Filter {
            parser: self,
            predicate,
            expectation: expectation.into(),
        }
    }

    fn zero_or_one(self) -> ZeroOrOne<Self>
    where
        Self: Sized,
    {
        ZeroOrOne { parser: self }
    }

    fn zero_or_more(self) -> Repeat<Self>
    where
        Self: Sized,
    {
        Repeat {
            parser: self,
            at_least: 0,
        }
    }

    fn one_or_more(self) -> Repeat<Self>
    where
        Self: Sized,
    {
        Repeat {
            parser: self,
            at_least: 1,
        }
    }

    /// One or more values separated by `separator`.
    fn separated_by<S: Parser>(self, separator: S) -> SeparatedBy<Self, S>
    where
        Self: Sized,
    {
        SeparatedBy {
            parser: self,
            separator,
            allow_empty: false,
        }
    }

    /// Zero or more values separated by `separator`.
    fn separated_by0<S: Parser>(self, separator: S) -> SeparatedBy<Self, S>
    where
        Self: Sized,
    {
        SeparatedBy {
            parser: self,
            separator,
            allow_empty: true,
        }
    }

    /// Emit `tracing` events around every invocation of this parser.
    fn traced(self, name: &'static str) -> Traced<Self>
    where
        Self: Sized,
    {
        Traced { parser: self, name }
    }

    /// Erase the type of this parser.
    fn boxed(self) -> BoxedParser<Self::Output>
    where
        Self: Sized + 'static,
    {
        BoxedParser::new(self)
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Output = P::Output;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, Self::Output>> {
        (**self).parse(input)
    }
}

/// A type-erased, cheaply clonable parser.
pub struct BoxedParser<T> {
    inner: Rc<dyn Parser<Output = T>>,
}

impl<T> BoxedParser<T> {
    pub fn new(parser: impl Parser<Output = T> + 'static) -> Self {
        Self {
            inner: Rc::new(parser),
        }
    }
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Debug for BoxedParser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BoxedParser")
    }
}

impl<T> Parser for BoxedParser<T> {
    type Output = T;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        self.inner.parse(input)
    }
}

/// A parser backed by a plain function. See [`from_fn`].
pub struct FromFn<F, T> {
    f: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F: Clone, T> Clone for FromFn<F, T> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<F: Copy, T> Copy for FromFn<F, T> {}

impl<F, T> Parser for FromFn<F, T>
where
    F: for<'a> Fn(&'a str) -> Outcome<ParseState<'a, T>>,
{
    type Output = T;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        (self.f)(input)
    }
}

/// Lift a function into a [`Parser`].
pub fn from_fn<T, F>(f: F) -> FromFn<F, T>
where
    F: for<'a> Fn(&'a str) -> Outcome<ParseState<'a, T>>,
{
    FromFn {
        f,
        _marker: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{char, item, string};

    #[test]
    fn outcome_map_keeps_failure_verbatim() {
        let failure: Outcome<i32> = Err(Failure::new("Invalid input: x"));
        assert_eq!(failure.clone().map(|n| n + 1), failure);
        assert_eq!(Ok::<_, Failure>(1).map(|n| n + 1), Ok(2));
    }

    #[test]
    fn outcome_and_then_short_circuits() {
        let failure: Outcome<i32> = Err(Failure::new("nope"));
        let chained = failure.and_then(|_| -> Outcome<i32> { panic!("must not run") });
        assert_eq!(chained.unwrap_err().message(), "nope");
        assert_eq!(Ok::<_, Failure>(2).and_then(|n| Ok(n * 2)), Ok(4));
    }

    #[test]
    fn failure_message_accessors() {
        let failure = Failure::new("Invalid input: x").or(Failure::new("Empty input"));
        assert_eq!(failure.message(), "Invalid input: x OR Empty input");
        assert_eq!(failure.to_string(), failure.message());
        assert_eq!(failure.into_message(), "Invalid input: x OR Empty input");
    }

    #[test]
    fn state_map_keeps_remaining() {
        let state = ParseState::new(2, "rest").map(|n| n * 10);
        assert_eq!(state, ParseState::new(20, "rest"));
    }

    #[test]
    fn parse_complete_reports_leftover() {
        let err = char('a').parse_complete("abc").unwrap_err();
        assert_eq!(
            err,
            ParseError::Incomplete {
                offset: 1,
                remaining: "bc".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Unconsumed input at offset 1: bc");
    }

    #[test]
    fn parse_complete_reports_failure() {
        let err = string("abc").parse_complete("abd").unwrap_err();
        assert_eq!(err, ParseError::Rejected(Failure::new("Invalid input: d")));
        assert_eq!(string("abc").parse_complete("abc"), Ok("abc".to_string()));
    }

    #[test]
    fn boxed_parsers_share_the_same_parser() {
        let boxed = item().boxed();
        let copy = boxed.clone();
        assert_eq!(boxed.parse("xy"), copy.parse("xy"));
        assert_eq!(copy.parse("xy"), Ok(ParseState::new('x', "y")));
    }

    #[test]
    fn references_are_parsers() {
        let parser = char('q');
        let by_ref = &parser;
        assert_eq!(by_ref.parse("q!"), Ok(ParseState::new('q', "!")));
    }
}

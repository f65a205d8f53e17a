use std::{borrow::Cow, fmt::Debug, fmt::Display};

use crate::{
    diagnostic,
    parser::{Failure, Outcome, ParseState, Parser},
};

#[derive(Clone, Copy)]
pub struct Map<P, F> {
    pub parser: P,
    pub f: F,
}

impl<T, U, P, F> Parser for Map<P, F>
where
    P: Parser<Output = T>,
    F: Fn(T) -> U,
{
    type Output = U;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, U>> {
        self.parser.parse(input).map(|state| state.map(&self.f))
    }
}

#[derive(Clone, Copy)]
pub struct TryMap<P, F> {
    pub parser: P,
    pub f: F,
}

impl<T, U, E, P, F> Parser for TryMap<P, F>
where
    P: Parser<Output = T>,
    F: Fn(T) -> Result<U, E>,
    E: Display,
{
    type Output = U;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, U>> {
        let state = self.parser.parse(input)?;
        match (self.f)(state.result) {
            Ok(value) => Ok(ParseState::new(value, state.remaining)),
            Err(error) => Err(Failure::new(format!(
                "{error}. Invalid input: {}",
                diagnostic::truncate(input)
            ))),
        }
    }
}

#[derive(Clone, Copy)]
pub struct AndThen<P, F> {
    pub parser: P,
    pub f: F,
}

impl<T, P, F, Q> Parser for AndThen<P, F>
where
    P: Parser<Output = T>,
    F: Fn(T) -> Q,
    Q: Parser,
{
    type Output = Q::Output;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, Q::Output>> {
        let state = self.parser.parse(input)?;
        (self.f)(state.result).parse(state.remaining)
    }
}

#[derive(Clone, Copy)]
pub struct Then<P1, P2> {
    pub parser1: P1,
    pub parser2: P2,
}

impl<T, U, P1, P2> Parser for Then<P1, P2>
where
    P1: Parser<Output = T>,
    P2: Parser<Output = U>,
{
    type Output = (T, U);

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, (T, U)>> {
        let first = self.parser1.parse(input)?;
        let second = self.parser2.parse(first.remaining)?;
        Ok(ParseState::new(
            (first.result, second.result),
            second.remaining,
        ))
    }
}

#[derive(Clone, Copy)]
pub struct ThenIgnore<P1, P2> {
    pub parser1: P1,
    pub parser2: P2,
}

impl<T, U, P1, P2> Parser for ThenIgnore<P1, P2>
where
    P1: Parser<Output = T>,
    P2: Parser<Output = U>,
{
    type Output = T;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        let first = self.parser1.parse(input)?;
        let second = self.parser2.parse(first.remaining)?;
        Ok(ParseState::new(first.result, second.remaining))
    }
}

#[derive(Clone, Copy)]
pub struct IgnoreThen<P1, P2> {
    pub parser1: P1,
    pub parser2: P2,
}

impl<T, U, P1, P2> Parser for IgnoreThen<P1, P2>
where
    P1: Parser<Output = T>,
    P2: Parser<Output = U>,
{
    type Output = U;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, U>> {
        let first = self.parser1.parse(input)?;
        self.parser2.parse(first.remaining)
    }
}

/// Ordered alternation of two parsers.
///
/// `parser2` only runs when `parser1` fails, and it runs on the same input.
#[derive(Clone, Copy)]
pub struct Or<P1, P2> {
    pub parser1: P1,
    pub parser2: P2,
}

impl<T, P1, P2> Parser for Or<P1, P2>
where
    P1: Parser<Output = T>,
    P2: Parser<Output = T>,
{
    type Output = T;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        match self.parser1.parse(input) {
            Ok(state) => Ok(state),
            Err(first) => self
                .parser2
                .parse(input)
                .map_err(|second| first.or(second)),
        }
    }
}

#[derive(Clone)]
pub struct Filter<P, F> {
    pub parser: P,
    pub predicate: F,
    pub expectation: Cow<'static, str>,
}

impl<T, P, F> Parser for Filter<P, F>
where
    T: Debug,
    P: Parser<Output = T>,
    F: Fn(&T) -> bool,
{
    type Output = T;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        let state = self.parser.parse(input)?;
        if (self.predicate)(&state.result) {
            Ok(state)
        } else {
            Err(diagnostic::rejected(
                &self.expectation,
                &state.result,
                input,
                state.remaining,
            ))
        }
    }
}

#[derive(Clone, Copy)]
pub struct ZeroOrOne<P> {
    pub parser: P,
}

impl<T, P> Parser for ZeroOrOne<P>
where
    P: Parser<Output = T>,
{
    type Output = Option<T>;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, Option<T>>> {
        match self.parser.parse(input) {
            Ok(state) => Ok(state.map(Some)),
            Err(_) => Ok(ParseState::new(None, input)),
        }
    }
}

/// Repeated application of a parser, collected in parse order.
///
/// Runs in a loop rather than by recursion, so the stack depth does not grow
/// with the number of repetitions. A parser that succeeds without consuming
/// input repeats forever.
#[derive(Clone, Copy)]
pub struct Repeat<P> {
    pub parser: P,
    pub at_least: usize,
}

impl<T, P> Parser for Repeat<P>
where
    P: Parser<Output = T>,
{
    type Output = Vec<T>;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, Vec<T>>> {
        let mut values = Vec::new();
        let mut remaining = input;
        loop {
            match self.parser.parse(remaining) {
                Ok(state) => {
                    values.push(state.result);
                    remaining = state.remaining;
                }
                Err(failure) if values.len() < self.at_least => return Err(failure),
                Err(_) => break,
            }
        }
        Ok(ParseState::new(values, remaining))
    }
}

/// `parser (separator parser)*`, keeping the values of `parser`.
#[derive(Clone, Copy)]
pub struct SeparatedBy<P, S> {
    pub parser: P,
    pub separator: S,
    pub allow_empty: bool,
}

impl<T, P, S> Parser for SeparatedBy<P, S>
where
    P: Parser<Output = T>,
    S: Parser,
{
    type Output = Vec<T>;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, Vec<T>>> {
        let first = match self.parser.parse(input) {
            Ok(state) => state,
            Err(_) if self.allow_empty => return Ok(ParseState::new(Vec::new(), input)),
            Err(failure) => return Err(failure),
        };
        let mut values = vec![first.result];
        let mut remaining = first.remaining;
        loop {
            // a separator only counts when a value follows it
            let Ok(separator) = self.separator.parse(remaining) else {
                break;
            };
            let Ok(next) = self.parser.parse(separator.remaining) else {
                break;
            };
            values.push(next.result);
            remaining = next.remaining;
        }
        Ok(ParseState::new(values, remaining))
    }
}

#[derive(Clone, Copy)]
pub struct Bracket<O, P, C> {
    pub open: O,
    pub parser: P,
    pub close: C,
}

impl<T, O, P, C> Parser for Bracket<O, P, C>
where
    O: Parser,
    P: Parser<Output = T>,
    C: Parser,
{
    type Output = T;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        let open = self.open.parse(input)?;
        let inner = self.parser.parse(open.remaining)?;
        let close = self.close.parse(inner.remaining)?;
        Ok(ParseState::new(inner.result, close.remaining))
    }
}

/// A fixed sequence of parsers run one after the other.
#[derive(Clone)]
pub struct ForEach<P> {
    pub parsers: Vec<P>,
}

impl<T, P> Parser for ForEach<P>
where
    P: Parser<Output = T>,
{
    type Output = Vec<T>;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, Vec<T>>> {
        let mut values = Vec::with_capacity(self.parsers.len());
        let mut remaining = input;
        for parser in &self.parsers {
            let state = parser.parse(remaining)?;
            values.push(state.result);
            remaining = state.remaining;
        }
        Ok(ParseState::new(values, remaining))
    }
}

#[derive(Clone, Copy)]
pub struct Traced<P> {
    pub parser: P,
    pub name: &'static str,
}

impl<T, P> Parser for Traced<P>
where
    P: Parser<Output = T>,
{
    type Output = T;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        let span = tracing::trace_span!("parse", parser = self.name);
        let _entered = span.enter();
        tracing::trace!(input = %diagnostic::truncate(input), "attempt");
        let outcome = self.parser.parse(input);
        match &outcome {
            Ok(state) => {
                tracing::trace!(remaining = %diagnostic::truncate(state.remaining), "matched")
            }
            Err(failure) => tracing::trace!(%failure, "failed"),
        }
        outcome
    }
}

pub fn map<P, U, F>(parser: P, f: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    parser.map(f)
}

pub fn and_then<P, Q, F>(parser: P, f: F) -> AndThen<P, F>
where
    P: Parser,
    Q: Parser,
    F: Fn(P::Output) -> Q,
{
    parser.and_then(f)
}

pub fn and<P1: Parser, P2: Parser>(parser1: P1, parser2: P2) -> IgnoreThen<P1, P2> {
    parser1.and(parser2)
}

pub fn or<P1, P2>(parser1: P1, parser2: P2) -> Or<P1, P2>
where
    P1: Parser,
    P2: Parser<Output = P1::Output>,
{
    parser1.or(parser2)
}

/// Reject values that do not satisfy `predicate`, naming `expectation` in
/// the diagnostic.
pub fn filter<P, F>(
    parser: P,
    predicate: F,
    expectation: impl Into<Cow<'static, str>>,
) -> Filter<P, F>
where
    P: Parser,
    F: Fn(&P::Output) -> bool,
{
    parser.filter_expecting(predicate, expectation)
}

/// Build one parser per item and run them in order.
///
/// ```
/// # use weft::*;
/// let abc = for_each("abc".chars(), char);
/// assert_eq!(abc.parse("abcd"), Ok(ParseState::new(vec!['a', 'b', 'c'], "d")));
/// assert_eq!(abc.parse("abd").unwrap_err().message(), "Invalid input: d");
/// ```
pub fn for_each<I, P, F>(items: I, f: F) -> ForEach<P>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> P,
    P: Parser,
{
    ForEach {
        parsers: items.into_iter().map(f).collect(),
    }
}

pub fn zero_or_one<P: Parser>(parser: P) -> ZeroOrOne<P> {
    parser.zero_or_one()
}

pub fn zero_or_more<P: Parser>(parser: P) -> Repeat<P> {
    parser.zero_or_more()
}

pub fn one_or_more<P: Parser>(parser: P) -> Repeat<P> {
    parser.one_or_more()
}

pub fn one_or_more_separated<P: Parser, S: Parser>(parser: P, separator: S) -> SeparatedBy<P, S> {
    parser.separated_by(separator)
}

pub fn zero_or_more_separated<P: Parser, S: Parser>(
    parser: P,
    separator: S,
) -> SeparatedBy<P, S> {
    parser.separated_by0(separator)
}

pub fn bracket<O: Parser, P: Parser, C: Parser>(open: O, parser: P, close: C) -> Bracket<O, P, C> {
    Bracket {
        open,
        parser,
        close,
    }
}

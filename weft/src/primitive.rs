use std::{borrow::Cow, marker::PhantomData};

use typle::typle;

use crate::{
    diagnostic,
    parser::{Failure, Outcome, ParseState, Parser},
};

/// Always succeeds with a clone of `value`, consuming nothing.
#[derive(Debug, Clone, Copy)]
pub struct Succeed<T> {
    pub value: T,
}

impl<T: Clone> Parser for Succeed<T> {
    type Output = T;

    #[inline(always)]
    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        Ok(ParseState::new(self.value.clone(), input))
    }
}

pub fn succeed<T: Clone>(value: T) -> Succeed<T> {
    Succeed { value }
}

/// Always fails, quoting the input.
pub struct Fail<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Fail<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Fail<T> {}

impl<T> Parser for Fail<T> {
    type Output = T;

    #[inline(always)]
    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        Err(diagnostic::invalid_input(input))
    }
}

pub fn fail<T>() -> Fail<T> {
    Fail {
        _marker: PhantomData,
    }
}

/// Consumes exactly one character.
#[derive(Debug, Clone, Copy)]
pub struct Item;

impl Parser for Item {
    type Output = char;

    #[inline(always)]
    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, char>> {
        let mut chars = input.chars();
        match chars.next() {
            Some(c) => Ok(ParseState::new(c, chars.as_str())),
            None => Err(Failure::new("Empty input")),
        }
    }
}

pub fn item() -> Item {
    Item
}

/// Consumes one character accepted by a predicate.
#[derive(Clone)]
pub struct Satisfy<F> {
    pub predicate: F,
    pub expectation: Option<Cow<'static, str>>,
}

impl<F> Parser for Satisfy<F>
where
    F: Fn(char) -> bool,
{
    type Output = char;

    #[inline(always)]
    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, char>> {
        let state = Item.parse(input)?;
        if (self.predicate)(state.result) {
            return Ok(state);
        }
        Err(match &self.expectation {
            Some(expectation) => {
                diagnostic::rejected(expectation, &state.result, input, state.remaining)
            }
            None => diagnostic::invalid_input(input),
        })
    }
}

pub fn satisfy<F: Fn(char) -> bool>(predicate: F) -> Satisfy<F> {
    Satisfy {
        predicate,
        expectation: None,
    }
}

/// Like [`satisfy`], but a rejected character produces a diagnostic naming
/// `expectation`.
pub fn satisfy_expecting<F: Fn(char) -> bool>(
    predicate: F,
    expectation: impl Into<Cow<'static, str>>,
) -> Satisfy<F> {
    Satisfy {
        predicate,
        expectation: Some(expectation.into()),
    }
}

/// Consumes the character `c`.
pub fn char(c: char) -> Satisfy<impl Fn(char) -> bool + Copy> {
    satisfy(move |x| x == c)
}

/// Matches a literal string one character at a time.
#[derive(Debug, Clone)]
pub struct Literal {
    pub pattern: String,
}

impl Parser for Literal {
    type Output = String;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, String>> {
        let mut remaining = input;
        for expected in self.pattern.chars() {
            remaining = char(expected).parse(remaining)?.remaining;
        }
        Ok(ParseState::new(self.pattern.clone(), remaining))
    }
}

pub fn string(pattern: impl Into<String>) -> Literal {
    Literal {
        pattern: pattern.into(),
    }
}

/// Succeeds only at the end of the input.
#[derive(Debug, Clone, Copy)]
pub struct End;

impl Parser for End {
    type Output = ();

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, ()>> {
        if input.is_empty() {
            Ok(ParseState::new((), input))
        } else {
            Err(Failure::new(format!(
                "Unconsumed input: {}",
                diagnostic::truncate(input)
            )))
        }
    }
}

pub fn end() -> End {
    End
}

/// Ordered choice between several parsers producing the same type.
///
/// The first alternative that succeeds wins; later ones are never run. When
/// all of them fail, their diagnostics are joined with `" OR "`.
#[derive(Debug, Clone, Copy)]
pub struct Choice<P> {
    pub parsers: P,
}

#[typle(Tuple for 2..=32)]
impl<T, P: Tuple> Parser for Choice<P>
where
    P<_>: Parser<Output = T>,
{
    type Output = T;

    #[inline(always)]
    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        let mut failure = None;
        for typle_index!(i) in 0..P::LEN {
            match self.parsers[[i]].parse(input) {
                Ok(state) => return Ok(state),
                Err(next) => failure = Some(merge(failure, next)),
            }
        }
        Err(failure.unwrap_or_else(|| diagnostic::invalid_input(input)))
    }
}

impl<P: Parser> Parser for Choice<Vec<P>> {
    type Output = P::Output;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, P::Output>> {
        let mut failure: Option<Failure> = None;
        for parser in &self.parsers {
            match parser.parse(input) {
                Ok(state) => return Ok(state),
                Err(next) => failure = Some(merge(failure, next)),
            }
        }
        Err(failure.unwrap_or_else(|| diagnostic::invalid_input(input)))
    }
}

fn merge(failure: Option<Failure>, next: Failure) -> Failure {
    match failure {
        Some(failure) => failure.or(next),
        None => next,
    }
}

/// Try each parser in order; see [`Choice`].
///
/// Accepts a tuple of up to 32 parsers or a `Vec` of parsers of one type
/// (usually [`BoxedParser`](crate::BoxedParser)).
pub fn choice<P>(parsers: P) -> Choice<P> {
    Choice { parsers }
}

//! Forward references for grammars whose rules refer to themselves.
//!
//! A rule like "a value is a number or a list of values" cannot be built as
//! an ordinary value, because the list parser would need the finished value
//! parser before it exists. [`Recursive`] breaks the cycle: declare the rule
//! first, use its handle wherever the rule is referenced, then define it.
//!
//! ```
//! # use weft::*;
//! let arena = Arena::new();
//! let nested = Recursive::<usize>::declare(&arena);
//! let nested = nested.clone().define(
//!     bracket(char('['), nested.zero_or_one(), char(']')).map(|depth| depth.map_or(1, |d| d + 1)),
//! );
//!
//! assert_eq!(nested.parse_complete("[[[]]]"), Ok(3));
//! ```
//!
//! [`lazy`] is the simpler alternative: it builds the parser from a function
//! every time it runs.

use std::{fmt, rc::Rc};

use crate::{
    arena::{Arena, Slot},
    parser::{BoxedParser, Failure, Outcome, ParseState, Parser},
};

/// A handle to a rule whose body is defined later.
///
/// Handles are cheap to clone and do not keep the rule alive; the parser
/// returned by [`define`](Recursive::define) does.
pub struct Recursive<T> {
    inner: Slot<BoxedParser<T>>,
}

impl<T> Clone for Recursive<T> {
    fn clone(&self) -> Self {
        Recursive {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Recursive<T> {
    pub fn declare(arena: &Rc<Arena>) -> Self {
        Recursive {
            inner: arena.alloc(),
        }
    }

    /// Give the rule its body.
    ///
    /// # Panics
    /// Panics if the rule is already defined or its arena was dropped.
    pub fn define(self, parser: impl Parser<Output = T> + 'static) -> Rooted<T> {
        let arena = self
            .inner
            .arena()
            .unwrap_or_else(|| panic!("recursive parser defined after its arena was dropped"));
        self.inner.store(parser.boxed());
        Rooted { arena, rule: self }
    }
}

impl<T: 'static> Parser for Recursive<T> {
    type Output = T;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        match self.inner.get() {
            Some(parser) => parser.parse(input),
            None => {
                tracing::warn!("recursive parser invoked before it was defined");
                Err(Failure::new(
                    "Recursive parser invoked before it was defined",
                ))
            }
        }
    }
}

impl<T> fmt::Debug for Recursive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Recursive")
    }
}

/// A defined recursive rule that owns the arena of its grammar.
pub struct Rooted<T> {
    arena: Rc<Arena>,
    rule: Recursive<T>,
}

impl<T> Clone for Rooted<T> {
    fn clone(&self) -> Self {
        Rooted {
            arena: Rc::clone(&self.arena),
            rule: self.rule.clone(),
        }
    }
}

impl<T> Rooted<T> {
    /// A weak handle to the rule, for use inside other rules.
    pub fn handle(&self) -> Recursive<T> {
        self.rule.clone()
    }

    pub fn arena(&self) -> &Rc<Arena> {
        &self.arena
    }
}

impl<T: 'static> Parser for Rooted<T> {
    type Output = T;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, T>> {
        self.rule.parse(input)
    }
}

impl<T> fmt::Debug for Rooted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rooted")
            .field("arena", &self.arena)
            .finish()
    }
}

/// A parser built on demand by a function.
#[derive(Clone, Copy)]
pub struct Lazy<F> {
    pub build: F,
}

impl<F, P> Parser for Lazy<F>
where
    F: Fn() -> P,
    P: Parser,
{
    type Output = P::Output;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, P::Output>> {
        (self.build)().parse(input)
    }
}

/// Defer building a parser until it runs.
///
/// ```
/// # use weft::*;
/// // parens := "(" parens ")" | ""
/// fn parens() -> BoxedParser<usize> {
///     bracket(char('('), lazy(parens), char(')'))
///         .map(|depth| depth + 1)
///         .or(succeed(0))
///         .boxed()
/// }
///
/// assert_eq!(parens().parse("((()))"), Ok(ParseState::new(3, "")));
/// ```
pub fn lazy<F, P>(build: F) -> Lazy<F>
where
    F: Fn() -> P,
    P: Parser,
{
    Lazy { build }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        primitive::{char, choice},
        text::digit,
    };

    fn list() -> Rooted<Vec<char>> {
        // list := digit | "(" list ("," list)* ")"
        let arena = Arena::new();
        let list = Recursive::<Vec<char>>::declare(&arena);
        let items = list
            .clone()
            .separated_by(char(','))
            .map(|lists| lists.concat());
        list.define(choice((
            digit().map(|d| vec![d]),
            char('(').and(items).then_ignore(char(')')),
        )))
    }

    #[test]
    fn recursive_rule_parses_nesting() {
        let list = list();
        assert_eq!(
            list.parse("(1,(2,3),((4)))x"),
            Ok(ParseState::new(vec!['1', '2', '3', '4'], "x"))
        );
        assert_eq!(list.parse("7"), Ok(ParseState::new(vec!['7'], "")));
    }

    #[test]
    fn recursive_rule_reports_inner_failure() {
        let list = list();
        assert_eq!(
            list.parse("(1,").unwrap_err().message(),
            "Invalid input: (1, OR Invalid input: ,"
        );
    }

    #[test]
    fn handles_share_the_definition() {
        let list = list();
        let handle = list.handle();
        assert_eq!(handle.parse("(5)"), list.parse("(5)"));
        assert_eq!(list.arena().len(), 1);
        assert!(!list.arena().is_empty());
    }

    #[test]
    fn arena_counts_declared_rules() {
        let arena = Arena::new();
        assert!(arena.is_empty());
        let rule = Recursive::<char>::declare(&arena);
        let _other = Recursive::<char>::declare(&arena);
        assert_eq!(arena.len(), 2);
        assert_eq!(format!("{arena:?}"), "Arena { declared: 2, defined: 0 }");
        let _rule = rule.define(digit());
        assert_eq!(format!("{arena:?}"), "Arena { declared: 2, defined: 1 }");
    }

    #[test]
    fn undefined_rule_fails_instead_of_panicking() {
        let arena = Arena::new();
        let rule = Recursive::<char>::declare(&arena);
        assert_eq!(
            rule.parse("x"),
            Err(Failure::new("Recursive parser invoked before it was defined"))
        );
    }

    #[test]
    fn dropped_grammar_fails_instead_of_panicking() {
        let handle = list().handle();
        assert!(handle.parse("1").is_err());
    }

    #[test]
    #[should_panic(expected = "defined twice")]
    fn defining_twice_panics() {
        let arena = Arena::new();
        let rule = Recursive::<char>::declare(&arena);
        let _first = rule.clone().define(digit());
        let _second = rule.define(digit());
    }

    #[test]
    fn lazy_builds_on_each_run() {
        let parser = lazy(|| digit().one_or_more());
        assert_eq!(parser.parse("12a"), Ok(ParseState::new(vec!['1', '2'], "a")));
        assert_eq!(parser.parse("a"), Err(Failure::new("Invalid input: a")));
    }
}

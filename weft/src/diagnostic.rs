//! Construction of failure messages.
//!
//! Diagnostics quote the input as it was when the failing parser was invoked,
//! cut to [`SNIPPET_LEN`] characters so that messages stay short no matter
//! how long the input is.

use std::{borrow::Cow, fmt::Debug};

use crate::parser::Failure;

/// Number of characters of input quoted in a diagnostic.
pub const SNIPPET_LEN: usize = 10;

pub(crate) const DEFAULT_EXPECTATION: &str = "a value satisfying the predicate";

/// Cut `input` to [`SNIPPET_LEN`] characters, marking the cut with `...`.
///
/// ```
/// # use weft::diagnostic::truncate;
/// assert_eq!(truncate("0123456789"), "0123456789");
/// assert_eq!(truncate("01234567891"), "0123456789...");
/// ```
pub fn truncate(input: &str) -> Cow<'_, str> {
    match input.char_indices().nth(SNIPPET_LEN) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &input[..cut])),
        None => Cow::Borrowed(input),
    }
}

/// The generic failure for input that does not match.
pub fn invalid_input(input: &str) -> Failure {
    Failure::new(format!("Invalid input: {}", truncate(input)))
}

/// The failure of a value that was parsed but rejected by a predicate.
pub fn rejected(expectation: &str, found: &impl Debug, before: &str, after: &str) -> Failure {
    Failure::new(format!(
        "Expected {expectation}, found {found:?} (input: {}, remaining: {})",
        truncate(before),
        truncate(after),
    ))
}

pub(crate) fn alternatives(first: &Failure, second: &Failure) -> Failure {
    Failure::new(format!("{} OR {}", first.message(), second.message()))
}

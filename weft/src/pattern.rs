//! Regular-expression tokens.

use regex_automata::{meta::Regex, Anchored, Input};

pub use regex_automata::meta::BuildError;

use crate::{
    diagnostic,
    parser::{Failure, Outcome, ParseState, Parser},
};

/// Matches a regular expression anchored at the start of the input and
/// yields the matched text.
///
/// ```
/// # use weft::*;
/// let number = pattern(r"-?(?:0|[1-9]\d*)(?:\.\d+)?(?:[eE][+-]?\d+)?").unwrap();
///
/// assert_eq!(number.parse("-12.5e3,"), Ok(ParseState::new("-12.5e3".to_string(), ",")));
/// assert!(number.parse("x").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Regex,
    source: String,
}

impl Pattern {
    /// The regular expression this pattern was built from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Parser for Pattern {
    type Output = String;

    fn parse<'a>(&self, input: &'a str) -> Outcome<ParseState<'a, String>> {
        let search = Input::new(input).anchored(Anchored::Yes);
        match self.regex.search_half(&search) {
            Some(end) => {
                let (matched, remaining) = input.split_at(end.offset());
                Ok(ParseState::new(matched.to_owned(), remaining))
            }
            None => Err(Failure::new(format!(
                "Expected /{}/. Invalid input: {}",
                self.source,
                diagnostic::truncate(input)
            ))),
        }
    }
}

/// Compile `source` into a [`Pattern`] parser.
pub fn pattern(source: &str) -> Result<Pattern, BuildError> {
    Ok(Pattern {
        regex: Regex::new(source)?,
        source: source.to_owned(),
    })
}

//! Character classes and small lexemes that most grammars need.

use crate::{
    primitive::{char, satisfy, Satisfy},
    Parser,
};

/// A parser for one character of a fixed class.
pub type CharClass = Satisfy<fn(char) -> bool>;

fn class(predicate: fn(char) -> bool) -> CharClass {
    satisfy(predicate)
}

/// `0` to `9`.
pub fn digit() -> CharClass {
    class(|c| c.is_ascii_digit())
}

/// `a` to `z`.
pub fn lower() -> CharClass {
    class(|c| c.is_ascii_lowercase())
}

/// `A` to `Z`.
pub fn upper() -> CharClass {
    class(|c| c.is_ascii_uppercase())
}

pub fn letter() -> CharClass {
    class(|c| c.is_ascii_alphabetic())
}

pub fn alphanumeric() -> CharClass {
    class(|c| c.is_ascii_alphanumeric())
}

/// Space, tab, line feed or carriage return.
pub fn whitespace() -> CharClass {
    class(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
}

/// A possibly empty run of letters.
pub fn word() -> impl Parser<Output = String> + Clone {
    letter().zero_or_more().map(collect_string)
}

/// A non-empty run of digits read as an unsigned number.
pub fn natural() -> impl Parser<Output = u64> + Clone {
    digits().try_map(|digits| digits.parse::<u64>())
}

/// A natural number with an optional leading `-`.
pub fn integer() -> impl Parser<Output = i64> + Clone {
    char('-')
        .zero_or_one()
        .then(digits())
        .try_map(|(sign, digits)| match sign {
            Some(_) => format!("-{digits}").parse::<i64>(),
            None => digits.parse::<i64>(),
        })
}

fn digits() -> impl Parser<Output = String> + Clone {
    digit().one_or_more().map(collect_string)
}

fn collect_string(chars: Vec<char>) -> String {
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Failure, ParseState};

    #[test]
    fn classes_accept_their_range() {
        for c in '0'..='9' {
            assert_eq!(digit().parse(&c.to_string()), Ok(ParseState::new(c, "")));
        }
        assert_eq!(lower().parse("a"), Ok(ParseState::new('a', "")));
        assert_eq!(lower().parse("z"), Ok(ParseState::new('z', "")));
        assert_eq!(upper().parse("A"), Ok(ParseState::new('A', "")));
        assert_eq!(upper().parse("Z"), Ok(ParseState::new('Z', "")));
        assert_eq!(alphanumeric().parse("q1"), Ok(ParseState::new('q', "1")));
        assert_eq!(whitespace().parse("\tx"), Ok(ParseState::new('\t', "x")));
    }

    #[test]
    fn classes_reject_outsiders() {
        assert_eq!(digit().parse("foo"), Err(Failure::new("Invalid input: foo")));
        assert_eq!(lower().parse("_oo"), Err(Failure::new("Invalid input: _oo")));
        assert_eq!(lower().parse("Foo"), Err(Failure::new("Invalid input: Foo")));
        assert_eq!(upper().parse("foo"), Err(Failure::new("Invalid input: foo")));
        assert!(letter().parse("1").is_err());
    }

    #[test]
    fn word_takes_the_longest_run() {
        assert_eq!(word().parse("Yes!"), Ok(ParseState::new("Yes".to_string(), "!")));
        assert_eq!(word().parse("!"), Ok(ParseState::new(String::new(), "!")));
    }

    #[test]
    fn integers() {
        assert_eq!(natural().parse("10"), Ok(ParseState::new(10, "")));
        assert_eq!(integer().parse("-10"), Ok(ParseState::new(-10, "")));
        assert_eq!(integer().parse("42x"), Ok(ParseState::new(42, "x")));
        assert_eq!(integer().parse("foo"), Err(Failure::new("Invalid input: foo")));
        assert_eq!(
            integer().parse("-9223372036854775808"),
            Ok(ParseState::new(i64::MIN, ""))
        );
        assert!(natural().parse("99999999999999999999").is_err());
    }
}

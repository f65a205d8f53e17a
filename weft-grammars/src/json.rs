//! JSON documents.
//!
//! ```
//! use weft_grammars::json::{self, JsonValue};
//!
//! let value: JsonValue = r#"{ "name": "weft", "tags": ["parser", 1.5e1] }"#.parse().unwrap();
//!
//! let JsonValue::Object(object) = value else { unreachable!() };
//! assert_eq!(object["name"], JsonValue::String("weft".into()));
//! assert_eq!(
//!     object["tags"],
//!     JsonValue::Array(vec![JsonValue::String("parser".into()), JsonValue::Number(15.0)]),
//! );
//! assert!(json::parse("[1, 2,]").is_err());
//! ```

use std::{fmt, str::FromStr};

use hashlink::LinkedHashMap;
use rustc_hash::FxBuildHasher;
use weft::{
    bracket, char, choice, diagnostic::truncate, for_each, from_fn, satisfy, string, text, Arena,
    Failure, ParseError, ParseState, Parser, Recursive,
};

/// Object members in document order.
pub type JsonObject = LinkedHashMap<String, JsonValue, FxBuildHasher>;

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(JsonObject),
}

impl JsonValue {
    /// The members of an object, or `None` for any other value.
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FromStr for JsonValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Writes compact JSON that [`parse`] reads back.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => f.write_str("null"),
            JsonValue::Bool(b) => write!(f, "{b}"),
            JsonValue::Number(n) => write!(f, "{n}"),
            JsonValue::String(s) => write_string(f, s),
            JsonValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            JsonValue::Object(object) => {
                f.write_str("{")?;
                for (i, (key, value)) in object.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_string(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c < '\u{20}' => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

fn whitespace() -> impl Parser<Output = ()> + Clone {
    text::whitespace().zero_or_more().map(|_| ())
}

/// `parser` followed by any amount of whitespace.
fn token<P: Parser + Clone>(parser: P) -> impl Parser<Output = P::Output> + Clone {
    parser.then_ignore(whitespace())
}

fn symbol(c: char) -> impl Parser<Output = char> + Clone {
    token(char(c))
}

fn keyword(word: &'static str, value: JsonValue) -> impl Parser<Output = JsonValue> + Clone {
    token(string(word)).map(move |_| value.clone())
}

fn hex_quad() -> impl Parser<Output = u32> + Clone {
    for_each(0..4, |_| satisfy(|c: char| c.is_ascii_hexdigit())).map(|digits| {
        digits
            .into_iter()
            .fold(0, |code, digit| code * 16 + digit.to_digit(16).unwrap_or(0))
    })
}

/// `\uXXXX`, or a surrogate pair `\uXXXX\uXXXX`.
fn unicode_escape() -> impl Parser<Output = char> + Clone {
    let low = string("\\u").and(hex_quad().filter_expecting(
        |code| (0xDC00..0xE000).contains(code),
        "a low surrogate",
    ));
    char('u')
        .and(hex_quad())
        .then(low.zero_or_one())
        .try_map(|(high, low)| {
            let code = match low {
                Some(low) if (0xD800..0xDC00).contains(&high) => {
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                }
                Some(_) => return Err("Unpaired surrogate in unicode escape"),
                None => high,
            };
            std::char::from_u32(code).ok_or("Invalid unicode escape")
        })
}

fn escape() -> impl Parser<Output = char> + Clone {
    char('\\').and(choice((
        char('"'),
        char('\\'),
        char('/'),
        char('b').map(|_| '\u{8}'),
        char('f').map(|_| '\u{c}'),
        char('n').map(|_| '\n'),
        char('r').map(|_| '\r'),
        char('t').map(|_| '\t'),
        unicode_escape(),
    )))
}

fn string_literal() -> impl Parser<Output = String> + Clone {
    let unescaped = satisfy(|c: char| c != '"' && c != '\\' && c >= '\u{20}');
    bracket(
        char('"'),
        choice((unescaped, escape())).zero_or_more(),
        char('"'),
    )
    .map(|chars| chars.into_iter().collect::<String>())
}

/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn number() -> impl Parser<Output = f64> + Clone {
    let digits = || text::digit().one_or_more();
    let nonzero = satisfy(|c: char| matches!(c, '1'..='9'))
        .then(text::digit().zero_or_more())
        .map(|(first, rest)| std::iter::once(first).chain(rest).collect::<String>());
    let integer = string("0").or(nonzero);
    let fraction = char('.').and(digits()).zero_or_one();
    let exponent = satisfy(|c: char| c == 'e' || c == 'E')
        .and(choice((char('+'), char('-'))).zero_or_one())
        .then(digits())
        .zero_or_one();

    char('-')
        .zero_or_one()
        .then(integer)
        .then(fraction)
        .then(exponent)
        .try_map(|(((sign, integer), fraction), exponent)| {
            let mut literal = String::new();
            literal.extend(sign);
            literal.push_str(&integer);
            if let Some(fraction) = fraction {
                literal.push('.');
                literal.extend(fraction);
            }
            if let Some((exponent_sign, exponent)) = exponent {
                literal.push('e');
                literal.extend(exponent_sign);
                literal.extend(exponent);
            }
            match literal.parse::<f64>() {
                Ok(number) if number.is_finite() => Ok(number),
                Ok(_) => Err("Number out of range".to_string()),
                Err(error) => Err(error.to_string()),
            }
        })
}

/// Deepest nesting of arrays and objects the grammar accepts.
///
/// Every level of nesting is a level of recursion in the parser, so this
/// bounds the stack a document can use.
pub const MAX_DEPTH: usize = 128;

/// Rejects a value nested deeper than [`MAX_DEPTH`]. Consumes nothing.
///
/// Scans only as far as the end of the first value, skipping brackets inside
/// strings.
fn depth_limit() -> impl Parser<Output = ()> + Clone {
    from_fn(|input: &str| {
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        for c in input.chars() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '[' | '{' => {
                    depth += 1;
                    if depth > MAX_DEPTH {
                        return Err(Failure::new(format!(
                            "Nesting deeper than {MAX_DEPTH} levels. Invalid input: {}",
                            truncate(input)
                        )));
                    }
                }
                ']' | '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                _ if depth == 0 => break,
                _ => {}
            }
        }
        Ok(ParseState::new((), input))
    })
}

/// The JSON value grammar. Leading whitespace and whitespace between tokens
/// is skipped; the value may be followed by more input.
///
/// Values nested deeper than [`MAX_DEPTH`] are rejected with a failure
/// before any of them is parsed.
pub fn parser() -> impl Parser<Output = JsonValue> + Clone {
    let arena = Arena::new();
    let value = Recursive::<JsonValue>::declare(&arena);

    let array = bracket(
        symbol('['),
        value.clone().separated_by0(symbol(',')),
        symbol(']'),
    )
    .map(JsonValue::Array);

    let member = token(string_literal())
        .then_ignore(symbol(':'))
        .then(value.clone());
    let object = bracket(
        symbol('{'),
        member.separated_by0(symbol(',')),
        symbol('}'),
    )
    .map(|members| JsonValue::Object(members.into_iter().collect()));

    let value = value.define(
        choice((
            object,
            array,
            token(string_literal()).map(JsonValue::String),
            token(number()).map(JsonValue::Number),
            keyword("true", JsonValue::Bool(true)),
            keyword("false", JsonValue::Bool(false)),
            keyword("null", JsonValue::Null),
        ))
        .traced("json value"),
    );

    whitespace().and(depth_limit()).and(value)
}

/// Parse a whole JSON document.
pub fn parse(input: &str) -> Result<JsonValue, ParseError> {
    parser().parse_complete(input)
}

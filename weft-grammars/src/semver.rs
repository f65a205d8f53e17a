//! Semantic version strings, as described at <https://semver.org/>.
//!
//! ```
//! use weft_grammars::semver::Version;
//!
//! let version: Version = "1.0.0-alpha.beta+exp.sha.5114f85".parse().unwrap();
//! assert_eq!((version.major, version.minor, version.patch), (1, 0, 0));
//! assert_eq!(version.pre_release, ["alpha", "beta"]);
//! assert_eq!(version.build, ["exp", "sha", "5114f85"]);
//! assert_eq!(version.to_string(), "1.0.0-alpha.beta+exp.sha.5114f85");
//! ```

use std::{fmt, str::FromStr};

use weft::{char, satisfy, string, text, ParseError, Parser};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Dot-separated identifiers after `-`.
    pub pre_release: Vec<String>,
    /// Dot-separated identifiers after `+`.
    pub build: Vec<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre_release: Vec::new(),
            build: Vec::new(),
        }
    }

    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release.join("."))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build.join("."))?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn collect(chars: Vec<char>) -> String {
    chars.into_iter().collect()
}

fn positive_digit() -> impl Parser<Output = char> + Clone {
    satisfy(|c: char| matches!(c, '1'..='9'))
}

fn non_digit() -> impl Parser<Output = char> + Clone {
    text::letter().or(char('-'))
}

fn identifier_character() -> impl Parser<Output = char> + Clone {
    text::digit().or(non_digit())
}

/// `0`, or digits without a leading zero.
fn numeric_identifier() -> impl Parser<Output = String> + Clone {
    let nonzero = positive_digit()
        .then(text::digit().zero_or_more())
        .map(|(first, mut rest)| {
            rest.insert(0, first);
            collect(rest)
        });
    string("0").or(nonzero)
}

/// Identifier characters with at least one non-digit among them.
fn alphanumeric_identifier() -> impl Parser<Output = String> + Clone {
    text::digit()
        .zero_or_more()
        .then(non_digit())
        .then(identifier_character().zero_or_more())
        .map(|((mut chars, non_digit), rest)| {
            chars.push(non_digit);
            chars.extend(rest);
            collect(chars)
        })
}

fn pre_release() -> impl Parser<Output = Vec<String>> + Clone {
    alphanumeric_identifier()
        .or(numeric_identifier())
        .separated_by(char('.'))
}

fn build() -> impl Parser<Output = Vec<String>> + Clone {
    alphanumeric_identifier()
        .or(text::digit().one_or_more().map(collect))
        .separated_by(char('.'))
}

fn version_number() -> impl Parser<Output = u64> + Clone {
    numeric_identifier().try_map(|digits| digits.parse::<u64>())
}

fn version_core() -> impl Parser<Output = (u64, u64, u64)> + Clone {
    version_number()
        .then_ignore(char('.'))
        .then(version_number())
        .then_ignore(char('.'))
        .then(version_number())
        .map(|((major, minor), patch)| (major, minor, patch))
}

/// The version grammar. The version may be followed by more input.
pub fn parser() -> impl Parser<Output = Version> + Clone {
    version_core()
        .then(char('-').and(pre_release()).zero_or_one())
        .then(char('+').and(build()).zero_or_one())
        .map(|(((major, minor, patch), pre_release), build)| Version {
            major,
            minor,
            patch,
            pre_release: pre_release.unwrap_or_default(),
            build: build.unwrap_or_default(),
        })
        .traced("semver")
}

/// Parse a complete version string.
pub fn parse(input: &str) -> Result<Version, ParseError> {
    parser().parse_complete(input)
}

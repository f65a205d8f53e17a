//! Grammars built on [`weft`].
//!
//! Each grammar lives behind a cargo feature of the same name; both are on by
//! default.

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "semver")]
pub mod semver;

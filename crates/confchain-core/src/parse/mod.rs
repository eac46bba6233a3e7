//! Parsers that turn raw source text into typed configuration values.
//!
//! A parser returns `Ok(Some(value))` on success, `Ok(None)` when the input
//! should be skipped as if the source had no value (e.g. whitespace-only
//! text under [`trim_and_skip_empty`]), and `Err` when the input is present
//! but malformed. The resolver never falls back past an `Err`.

use crate::errors::ParseError;
use crate::secret;

/// Outcome of parsing one raw value: typed value, skip, or format error.
pub type ParseOutcome<T> = Result<Option<T>, ParseError>;

/// Accept the raw text unchanged.
pub fn string() -> impl Fn(&str) -> ParseOutcome<String> + Send + Sync + 'static {
    |raw: &str| Ok(Some(raw.to_string()))
}

/// Parse a boolean flag.
///
/// Accepts `true/1/yes/on` and `false/0/no/off`, ASCII case-insensitive.
pub fn boolean() -> impl Fn(&str) -> ParseOutcome<bool> + Send + Sync + 'static {
    |raw: &str| match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(ParseError::new(format!("not a boolean: '{raw}'"))),
    }
}

/// Parse a numeric toolchain/language version, skipping blank input.
pub fn version() -> impl Fn(&str) -> ParseOutcome<u32> + Send + Sync + 'static {
    trim_and_skip_empty(|raw: &str| match raw.parse::<u32>() {
        Ok(n) => Ok(Some(n)),
        Err(_) => Err(ParseError::new(format!("not a version number: '{raw}'"))),
    })
}

/// Parse a comma-separated list of strings. Items are trimmed; empty items
/// are dropped, so `"a,,b"` and `"a, b"` both yield two items.
pub fn list() -> impl Fn(&str) -> ParseOutcome<Vec<String>> + Send + Sync + 'static {
    |raw: &str| {
        let items: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Some(items))
    }
}

/// Parse GPG-style secret key material via [`secret::normalize_secret_key`].
pub fn secret_key() -> impl Fn(&str) -> ParseOutcome<String> + Send + Sync + 'static {
    trim_and_skip_empty(|raw: &str| secret::normalize_secret_key(raw))
}

/// Wrap a parser so that whitespace-only input is skipped instead of parsed.
pub fn trim_and_skip_empty<T>(
    inner: impl Fn(&str) -> ParseOutcome<T> + Send + Sync + 'static,
) -> impl Fn(&str) -> ParseOutcome<T> + Send + Sync + 'static {
    move |raw: &str| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            inner(trimmed)
        }
    }
}

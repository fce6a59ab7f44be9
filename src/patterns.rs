//! Positional patterns located in the report text.
//!
//! Both prefixes are Cyrillic literals: the identifier starts with `О`
//! (U+041E), the certificate code with `СОИ`.

use onig::Regex;

use crate::error::Result;

/// Leading character of every identifier in the document.
pub const IDENTIFIER_PREFIX: char = 'О';

/// Personal registration number, e.g. `О111-222-333 44`.
pub const IDENTIFIER: &str = r"О\d{3}-\d{3}-\d{3}\s\d{2}";

/// Loose certificate anchor used to seed a mapping, e.g. `СОИ-111`.
pub const ANCHOR: &str = r"СОИ-\d{3}";

/// Full certificate code replaced during a rewrite, e.g. `СОИ-111-22`.
pub const CERTIFICATE: &str = r"СОИ-\d{3}-\d{2}";

/// Three consecutive digits in a file extension.
pub const NUMBERED_EXTENSION: &str = r"\d{3}";

pub fn identifier() -> Result<Regex> {
    Ok(Regex::new(IDENTIFIER)?)
}

pub fn anchor() -> Result<Regex> {
    Ok(Regex::new(ANCHOR)?)
}

pub fn certificate() -> Result<Regex> {
    Ok(Regex::new(CERTIFICATE)?)
}

pub fn numbered_extension() -> Result<Regex> {
    Ok(Regex::new(NUMBERED_EXTENSION)?)
}

/// Identifier as written in the document for a mapping key.
pub fn prefixed(key: &str) -> String {
    format!("{IDENTIFIER_PREFIX}{key}")
}

/// Mapping key for an identifier matched in the document.
pub fn unprefixed(identifier: &str) -> &str {
    identifier
        .strip_prefix(IDENTIFIER_PREFIX)
        .unwrap_or(identifier)
}

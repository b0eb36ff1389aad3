//! Media type classification for message bodies.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Handler registry key for all JSON media types.
pub const JSON: &str = "application/json";
/// Handler registry key for all XML media types.
pub const XML: &str = "application/xml";
/// Fallback for bodies that are neither JSON nor XML.
pub const TEXT: &str = "text/plain";

/// A body media type such as `application/json; charset=utf-8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType(String);

impl ContentType {
    /// Create a content type from a header value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The JSON content type.
    #[must_use]
    pub fn json() -> Self {
        Self::new(JSON)
    }

    /// The raw header value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media type without parameters, lowercased.
    #[must_use]
    pub fn base_type(&self) -> String {
        self.0
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// Check if this is a JSON media type (`application/json`, `*/json`, `*+json`).
    #[must_use]
    pub fn is_json(&self) -> bool {
        let base = self.base_type();
        base.ends_with("/json") || base.ends_with("+json")
    }

    /// Check if this is an XML media type (`application/xml`, `text/xml`, `*+xml`).
    #[must_use]
    pub fn is_xml(&self) -> bool {
        let base = self.base_type();
        base.ends_with("/xml") || base.ends_with("+xml")
    }

    /// Key used to look up a content-type handler.
    ///
    /// Every JSON flavour maps to `application/json` and every XML flavour to
    /// `application/xml`; anything else is its base type.
    #[must_use]
    pub fn canonical(&self) -> String {
        if self.is_json() {
            JSON.to_string()
        } else if self.is_xml() {
            XML.to_string()
        } else {
            self.base_type()
        }
    }

    /// Guess the content type of an untyped body from its first character.
    #[must_use]
    pub fn detect(body: &str) -> Self {
        match body.trim_start().chars().next() {
            Some('{' | '[') => Self::new(JSON),
            Some('<') => Self::new(XML),
            _ => Self::new(TEXT),
        }
    }
}

impl Default for ContentType {
    fn default() -> Self {
        Self::new(TEXT)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContentType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
